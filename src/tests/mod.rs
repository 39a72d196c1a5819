//! Test helpers, chiefly an in-memory stand-in for the monitoring server.

use std::sync::Mutex;

use crate::errors::ApiError;
use crate::prelude::*;

/// A fake monitoring server. Stores what it's given, records every call so
/// tests can assert on traffic, and can be told to reject chosen methods.
pub(crate) struct FakeZabbix {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<(String, Value)>,
    groups: Vec<Value>,
    hosts: Vec<Value>,
    templates: Vec<Value>,
    failing: Vec<String>,
    next_id: u64,
}

impl FakeState {
    fn take_id(&mut self) -> String {
        let id = self.next_id;
        self.next_id += 1;
        id.to_string()
    }
}

impl FakeZabbix {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 10001,
                ..Default::default()
            }),
        }
    }

    /// A fake where the named methods answer with an API rejection
    pub fn failing_on(methods: &[&str]) -> Self {
        let fake = Self::new();
        fake.state
            .lock()
            .expect("fake state lock poisoned")
            .failing = methods.iter().map(|method| method.to_string()).collect();
        fake
    }

    pub fn with_group(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock poisoned");
            let id = state.take_id();
            state.groups.push(json!({"groupid": id, "name": name}));
        }
        self
    }

    pub fn with_host(self, name: &str, status: &str) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock poisoned");
            let id = state.take_id();
            state
                .hosts
                .push(json!({"hostid": id, "name": name, "status": status}));
        }
        self
    }

    pub fn with_template(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().expect("fake state lock poisoned");
            let id = state.take_id();
            state
                .templates
                .push(json!({"templateid": id, "name": name}));
        }
        self
    }

    /// How many times `method` was called
    pub fn call_count(&self, method: &str) -> usize {
        self.calls(method).len()
    }

    /// The params of every call to `method`, in order
    pub fn calls(&self, method: &str) -> Vec<Value> {
        self.state
            .lock()
            .expect("fake state lock poisoned")
            .calls
            .iter()
            .filter(|(called, _)| called == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

/// The rejection shape the real server answers bad params with
fn rejection(data: String) -> Error {
    Error::Api(ApiError {
        code: -32602,
        message: "Invalid params.".to_string(),
        data,
    })
}

/// Records matching the `filter` key of a get-style call. No filter key
/// matches everything.
fn filtered(records: &[Value], params: &Value) -> Value {
    let matched = records
        .iter()
        .filter(|record| match params["filter"].as_object() {
            Some(filter) => filter.iter().all(|(key, want)| &record[key] == want),
            None => true,
        })
        .cloned()
        .collect();
    Value::Array(matched)
}

fn create(records: &mut Vec<Value>, id_field: &str, name: Value, params: Value, id: String) -> Value {
    let mut record = match params {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    record.insert(id_field.to_string(), json!(id.clone()));
    record.insert("name".to_string(), name);
    if !record.contains_key("status") {
        record.insert("status".to_string(), json!("0"));
    }
    // hosts carry the primary interface address on the record itself
    if let Some(ip) = record
        .get("interfaces")
        .and_then(|interfaces| interfaces[0].get("ip"))
        .cloned()
    {
        record.insert("ip".to_string(), ip);
    }
    records.push(Value::Object(record));
    json!([id])
}

fn update(records: &mut [Value], id_field: &str, params: Value) -> Result<Value, Error> {
    let id = params[id_field].clone();
    if id.is_null() {
        return Err(rejection(format!("Field \"{id_field}\" cannot be null.")));
    }
    let record = records
        .iter_mut()
        .find(|record| record[id_field] == id)
        .ok_or_else(|| rejection(format!("No object with {id_field} {id}.")))?;
    if let (Some(record), Value::Object(params)) = (record.as_object_mut(), params) {
        record.extend(params);
    }
    Ok(json!([id]))
}

fn delete(records: &mut Vec<Value>, id_field: &str, params: &Value) -> Result<Value, Error> {
    let ids = params
        .as_array()
        .cloned()
        .ok_or_else(|| rejection("Expected a list of ids.".to_string()))?;
    records.retain(|record| !ids.contains(&record[id_field]));
    Ok(json!(ids))
}

#[async_trait]
impl RemoteApi for FakeZabbix {
    async fn call(&self, method: &str, params: Value) -> Result<Value, Error> {
        let mut state = self.state.lock().expect("fake state lock poisoned");
        state.calls.push((method.to_string(), params.clone()));
        if state.failing.iter().any(|failing| failing == method) {
            return Err(rejection(format!("{method} is set to fail")));
        }
        match method {
            "hostgroup.get" => Ok(filtered(&state.groups, &params)),
            "hostgroup.create" => {
                let id = state.take_id();
                let name = params["name"].clone();
                let ids = create(&mut state.groups, "groupid", name, params, id);
                Ok(json!({"groupids": ids}))
            }
            "hostgroup.delete" => {
                let ids = delete(&mut state.groups, "groupid", &params)?;
                Ok(json!({"groupids": ids}))
            }
            "host.get" => Ok(filtered(&state.hosts, &params)),
            "host.create" => {
                let id = state.take_id();
                let name = params["host"].clone();
                let ids = create(&mut state.hosts, "hostid", name, params, id);
                Ok(json!({"hostids": ids}))
            }
            "host.update" => {
                let ids = update(&mut state.hosts, "hostid", params)?;
                Ok(json!({"hostids": ids}))
            }
            "host.delete" => {
                let ids = delete(&mut state.hosts, "hostid", &params)?;
                Ok(json!({"hostids": ids}))
            }
            "template.get" => Ok(filtered(&state.templates, &params)),
            "template.create" => {
                let id = state.take_id();
                let name = params["host"].clone();
                let ids = create(&mut state.templates, "templateid", name, params, id);
                Ok(json!({"templateids": ids}))
            }
            "template.update" => {
                let ids = update(&mut state.templates, "templateid", params)?;
                Ok(json!({"templateids": ids}))
            }
            "template.delete" => {
                let ids = delete(&mut state.templates, "templateid", &params)?;
                Ok(json!({"templateids": ids}))
            }
            "configuration.import" => Ok(Value::Bool(true)),
            method => Err(Error::Generic(format!(
                "FakeZabbix has no handler for {method}"
            ))),
        }
    }
}

#[tokio::test]
async fn test_fake_records_calls() {
    let fake = FakeZabbix::new();
    fake.call("hostgroup.get", json!({"filter": {"name": "linux"}}))
        .await
        .expect("call errored");
    assert_eq!(fake.call_count("hostgroup.get"), 1);
    assert_eq!(fake.call_count("host.get"), 0);
}

#[tokio::test]
async fn test_fake_failing_still_records() {
    let fake = FakeZabbix::failing_on(&["host.get"]);
    let result = fake.call("host.get", json!({"filter": {}})).await;
    assert!(matches!(result, Err(Error::Api(_))));
    assert_eq!(fake.call_count("host.get"), 1);
}
