//! Host management. Only the primary connectivity interface is handled
//! here, further interfaces are a server-side concern.

use clap::ValueEnum;

use crate::monitor::hostgroup::HostGroupManager;
use crate::monitor::{as_list, id_value};
use crate::prelude::*;

/// Default port for the primary agent interface
pub static DEFAULT_AGENT_PORT: u16 = 10050;

/// How the monitoring server reaches a host
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq, Copy, Clone, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    #[default]
    Agent,
    Snmp,
    Jmx,
    Ipmi,
}

impl InterfaceType {
    /// The integer code the API expects
    pub fn code(self) -> u16 {
        match self {
            InterfaceType::Agent => 1,
            InterfaceType::Snmp => 2,
            InterfaceType::Ipmi => 3,
            InterfaceType::Jmx => 4,
        }
    }
}

/// Whether a host is being monitored
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum HostStatus {
    Enabled,
    Disabled,
}

impl HostStatus {
    pub fn code(self) -> i64 {
        match self {
            HostStatus::Enabled => 0,
            HostStatus::Disabled => 1,
        }
    }
}

/// Parameters for creating a host
pub struct NewHost {
    pub name: String,
    pub ip: Option<String>,
    /// Defaults to the host name
    pub dns_name: Option<String>,
    pub hostgroups: Vec<String>,
    pub interface_type: InterfaceType,
    pub port: u16,
    /// Reach the host by IP rather than DNS
    pub use_ip: bool,
    /// Extra fields merged verbatim into the create params
    pub extra: Map<String, Value>,
}

impl Default for NewHost {
    fn default() -> Self {
        Self {
            name: String::new(),
            ip: None,
            dns_name: None,
            hostgroups: Vec::new(),
            interface_type: InterfaceType::default(),
            port: DEFAULT_AGENT_PORT,
            use_ip: true,
            extra: Map::new(),
        }
    }
}

pub struct HostManager {
    api: Arc<dyn RemoteApi>,
    hostgroup: HostGroupManager,
}

impl HostManager {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        let hostgroup = HostGroupManager::new(api.clone());
        Self { api, hostgroup }
    }

    /// Create a host with a single primary interface, resolving group names
    /// to ids first.
    pub async fn add(&self, host: NewHost) -> Result<Value, Error> {
        let dns_name = host.dns_name.unwrap_or_else(|| host.name.clone());
        let groups = self.hostgroup.resolve_ids(&host.hostgroups).await?;

        let mut params = json!({
            "host": host.name,
            "interfaces": [{
                "type": host.interface_type.code(),
                "main": 1,
                "useip": if host.use_ip { 1 } else { 0 },
                "port": host.port,
                "dns": dns_name,
                "ip": host.ip,
            }],
            "groups": groups,
        });
        if let Some(map) = params.as_object_mut() {
            map.extend(host.extra);
        }
        self.api.call("host.create", params).await
    }

    /// Query hosts with a filter map, an empty map matches everything.
    /// Server-side query errors yield an empty list.
    pub async fn search(&self, filters: Value) -> Result<Vec<Value>, Error> {
        match self.api.call("host.get", json!({"filter": filters})).await {
            Ok(hosts) => Ok(as_list(hosts)),
            Err(Error::Api(err)) => {
                debug!("host.get rejected: {err:?}");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&self, name: &str) -> Result<Vec<Value>, Error> {
        self.search(json!({"name": name})).await
    }

    /// Id of the first host matching `name`
    pub async fn get_id(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self
            .get(name)
            .await?
            .first()
            .and_then(|host| id_value(&host["hostid"])))
    }

    pub async fn delete(&self, name: &str) -> Result<Value, Error> {
        match self.get_id(name).await? {
            Some(id) => self.api.call("host.delete", json!([id])).await,
            None => Err(Error::HostNotFound(name.to_string())),
        }
    }

    /// Update a host by name. The id is not validated upfront, an unknown
    /// name sends a null hostid and the server's rejection is what surfaces.
    pub async fn update(
        &self,
        name: &str,
        hostgroups: Option<&[String]>,
        status: Option<HostStatus>,
        extra: Map<String, Value>,
    ) -> Result<Value, Error> {
        let id = self.get_id(name).await?;
        let mut params = Map::new();
        params.insert("hostid".to_string(), json!(id));
        if let Some(groups) = hostgroups {
            params.insert(
                "groups".to_string(),
                json!(self.hostgroup.resolve_ids(groups).await?),
            );
        }
        if let Some(status) = status {
            params.insert("status".to_string(), json!(status.code()));
        }
        params.extend(extra);
        self.api.call("host.update", Value::Object(params)).await
    }

    /// Stop monitoring a host. Already-disabled hosts are left alone with no
    /// update call, unknown hosts report `false`.
    pub async fn disable(&self, name: &str) -> Result<Value, Error> {
        self.set_status(name, HostStatus::Disabled).await
    }

    /// Resume monitoring a host, the mirror of [HostManager::disable]
    pub async fn enable(&self, name: &str) -> Result<Value, Error> {
        self.set_status(name, HostStatus::Enabled).await
    }

    async fn set_status(&self, name: &str, target: HostStatus) -> Result<Value, Error> {
        let hosts = self.get(name).await?;
        let host = match hosts.first() {
            Some(host) => host,
            None => return Ok(Value::Bool(false)),
        };
        let flips_from = match target {
            HostStatus::Enabled => HostStatus::Disabled,
            HostStatus::Disabled => HostStatus::Enabled,
        };
        // only flips from the opposite state, anything else is a no-op
        if status_code(host)? != flips_from.code() {
            return Ok(Value::Null);
        }
        self.update(name, None, Some(target), Map::new()).await
    }

    /// Map host names to `{"hostid": id}` records in input order, unknown
    /// names keep their slot with a null id.
    pub async fn resolve_ids(&self, names: &[String]) -> Result<Vec<Value>, Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(json!({"hostid": self.get_id(name).await?}));
        }
        Ok(ids)
    }
}

/// The API returns status as a string-wrapped integer
fn status_code(host: &Value) -> Result<i64, Error> {
    match &host["status"] {
        Value::Number(val) => val
            .as_i64()
            .ok_or_else(|| Error::Generic(format!("Unusable host status: {val}"))),
        Value::String(val) => val
            .parse()
            .map_err(|_| Error::Generic(format!("Unusable host status: {val:?}"))),
        other => Err(Error::Generic(format!(
            "Host record has no usable status: {other:?}"
        ))),
    }
}
