//! zabctl is a command-line client for a Zabbix-style monitoring server,
//! managing host groups, hosts and templates over the server's JSON-RPC API.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod log;
pub mod monitor;
pub mod prelude;
#[cfg(test)]
pub(crate) mod tests;

/// Used when `ZABBIX_SERVER` isn't set
pub static DEFAULT_ZABBIX_SERVER: &str = "http://127.0.0.1";
/// Used when `ZABBIX_USER` isn't set
pub static DEFAULT_ZABBIX_USER: &str = "Admin";
/// Used when `ZABBIX_PASSWORD` isn't set
pub static DEFAULT_ZABBIX_PASSWORD: &str = "zabbix";
/// Path to the JSON-RPC endpoint, relative to the server URL
pub static ZABBIX_API_PATH: &str = "api_jsonrpc.php";
