//! Managers for the remote inventory objects. Every manager resolves names
//! to ids just-in-time, nothing is cached between calls.

pub mod host;
pub mod hostgroup;
pub mod import;
pub mod template;

use crate::prelude::*;

use self::host::HostManager;
use self::hostgroup::HostGroupManager;
use self::import::ConfigImporter;
use self::template::TemplateManager;

/// One handle per remote resource, all sharing a session
pub struct Monitor {
    pub hostgroup: HostGroupManager,
    pub host: HostManager,
    pub template: TemplateManager,
    pub config: ConfigImporter,
}

impl Monitor {
    pub fn new(api: Arc<dyn RemoteApi>) -> Self {
        Self {
            hostgroup: HostGroupManager::new(api.clone()),
            host: HostManager::new(api.clone()),
            template: TemplateManager::new(api.clone()),
            config: ConfigImporter::new(api),
        }
    }
}

/// Ids come back as JSON strings, occasionally as bare numbers.
pub(crate) fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(val) => Some(val.clone()),
        Value::Number(val) => Some(val.to_string()),
        _ => None,
    }
}

/// get-style calls answer with an array of objects
pub(crate) fn as_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        _ => Vec::new(),
    }
}
