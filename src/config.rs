use std::env;

use crate::{DEFAULT_ZABBIX_PASSWORD, DEFAULT_ZABBIX_SERVER, DEFAULT_ZABBIX_USER};

/// Connection settings for the monitoring server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub server: String,
    pub username: String,
    pub password: String,
}

impl Configuration {
    /// Build the connection settings. An explicit server (the CLI flag) wins
    /// over `ZABBIX_SERVER`; username and password come from `ZABBIX_USER`
    /// and `ZABBIX_PASSWORD`.
    pub fn new(server: Option<String>) -> Self {
        let server = server.unwrap_or_else(|| {
            env::var("ZABBIX_SERVER").unwrap_or_else(|_| DEFAULT_ZABBIX_SERVER.to_string())
        });
        Self {
            server: ensure_scheme(server),
            username: env::var("ZABBIX_USER").unwrap_or_else(|_| DEFAULT_ZABBIX_USER.to_string()),
            password: env::var("ZABBIX_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_ZABBIX_PASSWORD.to_string()),
        }
    }

    /// The JSON-RPC endpoint URL for this server
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            crate::ZABBIX_API_PATH
        )
    }
}

/// Servers are commonly given as a bare hostname, the endpoint needs a scheme.
fn ensure_scheme(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        server
    } else {
        format!("http://{server}")
    }
}
