//! Template management. Mirrors the host manager's shape, with template
//! configuration import layered on top.

use crate::monitor::host::HostManager;
use crate::monitor::hostgroup::HostGroupManager;
use crate::monitor::import::{ConfigImporter, ImportFormat};
use crate::monitor::{as_list, id_value};
use crate::prelude::*;

pub struct TemplateManager {
    api: Arc<dyn RemoteApi>,
    hostgroup: HostGroupManager,
    host: HostManager,
    config: ConfigImporter,
}

impl TemplateManager {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            hostgroup: HostGroupManager::new(api.clone()),
            host: HostManager::new(api.clone()),
            config: ConfigImporter::new(api.clone()),
            api,
        }
    }

    /// Create a template, optionally attached to groups, hosts and other
    /// templates by name.
    pub async fn add(
        &self,
        name: &str,
        hostgroups: Option<&[String]>,
        hosts: Option<&[String]>,
        templates: Option<&[String]>,
    ) -> Result<Value, Error> {
        let mut params = Map::new();
        params.insert("host".to_string(), json!(name));
        self.collection_params(&mut params, hostgroups, hosts, templates)
            .await?;
        self.api
            .call("template.create", Value::Object(params))
            .await
    }

    /// Query templates with a filter map, an empty map matches everything.
    /// Server-side query errors yield an empty list.
    pub async fn search(&self, filters: Value) -> Result<Vec<Value>, Error> {
        match self
            .api
            .call("template.get", json!({"filter": filters}))
            .await
        {
            Ok(templates) => Ok(as_list(templates)),
            Err(Error::Api(err)) => {
                debug!("template.get rejected: {err:?}");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn get(&self, name: &str) -> Result<Vec<Value>, Error> {
        self.search(json!({"name": name})).await
    }

    /// Id of the first template matching `name`
    pub async fn get_id(&self, name: &str) -> Result<Option<String>, Error> {
        Ok(self
            .get(name)
            .await?
            .first()
            .and_then(|template| id_value(&template["templateid"])))
    }

    pub async fn delete(&self, name: &str) -> Result<Value, Error> {
        match self.get_id(name).await? {
            Some(id) => self.api.call("template.delete", json!([id])).await,
            None => Err(Error::TemplateNotFound(name.to_string())),
        }
    }

    /// Update a template by name. As with hosts, an unknown name sends a
    /// null templateid and the server's rejection is what surfaces.
    pub async fn update(
        &self,
        name: &str,
        hostgroups: Option<&[String]>,
        hosts: Option<&[String]>,
        templates: Option<&[String]>,
    ) -> Result<Value, Error> {
        let id = self.get_id(name).await?;
        let mut params = Map::new();
        params.insert("templateid".to_string(), json!(id));
        self.collection_params(&mut params, hostgroups, hosts, templates)
            .await?;
        self.api
            .call("template.update", Value::Object(params))
            .await
    }

    /// Map template names to `{"templateid": id}` records in input order,
    /// unknown names keep their slot with a null id.
    pub async fn resolve_ids(&self, names: &[String]) -> Result<Vec<Value>, Error> {
        let mut ids = Vec::with_capacity(names.len());
        for name in names {
            ids.push(json!({"templateid": self.get_id(name).await?}));
        }
        Ok(ids)
    }

    /// Resolve whichever collections were supplied into the id-record
    /// fields the create/update calls expect.
    async fn collection_params(
        &self,
        params: &mut Map<String, Value>,
        hostgroups: Option<&[String]>,
        hosts: Option<&[String]>,
        templates: Option<&[String]>,
    ) -> Result<(), Error> {
        if let Some(groups) = hostgroups {
            params.insert(
                "groups".to_string(),
                json!(self.hostgroup.resolve_ids(groups).await?),
            );
        }
        if let Some(hosts) = hosts {
            params.insert("hosts".to_string(), json!(self.host.resolve_ids(hosts).await?));
        }
        if let Some(templates) = templates {
            params.insert("templates".to_string(), json!(self.resolve_ids(templates).await?));
        }
        Ok(())
    }

    /// Bulk-import a serialized template configuration
    pub async fn import(&self, source: &str, format: ImportFormat) -> Result<Value, Error> {
        self.config.import_config(source, format).await
    }
}
