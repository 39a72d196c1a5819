//! Host group management.

use crate::monitor::{as_list, id_value};
use crate::prelude::*;

pub struct HostGroupManager {
    api: Arc<dyn RemoteApi>,
}

impl HostGroupManager {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self { api }
    }

    /// Create a host group, refusing (with a `false` result and no create
    /// call) when one with this name already exists.
    pub async fn add(&self, name: &str) -> Result<Value, Error> {
        if !self.get(name).await?.is_empty() {
            warn!("Hostgroup named {name} already exists");
            return Ok(Value::Bool(false));
        }
        self.api
            .call("hostgroup.create", json!({"name": name}))
            .await
    }

    /// Look up a group by exact name. Query rejections from the server count
    /// as no matches.
    pub async fn get(&self, name: &str) -> Result<Vec<Value>, Error> {
        match self
            .api
            .call("hostgroup.get", json!({"filter": {"name": name}}))
            .await
        {
            Ok(groups) => Ok(as_list(groups)),
            Err(Error::Api(err)) => {
                debug!("hostgroup.get for {name} rejected: {err:?}");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Id of the first group matching `name`
    pub async fn get_id(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self
            .get(name)
            .await?
            .first()
            .and_then(|group| id_value(&group["groupid"])))
    }

    pub async fn delete(&self, name: &str) -> Result<Value, Error> {
        match self.get_id(name).await? {
            Some(id) => self.api.call("hostgroup.delete", json!([id])).await,
            None => Err(Error::HostGroupNotFound(name.to_string())),
        }
    }

    /// Every group on the server
    pub async fn list(&self) -> Result<Value, Error> {
        self.api.call("hostgroup.get", json!({})).await
    }

    /// Map group names to `{"groupid": id}` records in input order. Names
    /// that don't resolve keep their slot with a null id rather than being
    /// dropped.
    pub async fn resolve_ids(&self, names: &[String]) -> Result<Vec<Value>, Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(json!({"groupid": self.get_id(name).await?}));
        }
        Ok(ids)
    }
}
