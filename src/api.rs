//! The JSON-RPC session with the monitoring server.

use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::ClientBuilder;

use crate::errors::ApiError;
use crate::prelude::*;

/// Generic "call method M with params P" access to the remote API, so the
/// managers can be driven by a fake server in tests.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Invoke `method` with `params`, returning the `result` payload.
    async fn call(&self, method: &str, params: Value) -> Result<Value, Error>;
}

/// An authenticated session against a server's `api_jsonrpc.php`
pub struct ZabbixClient {
    client: reqwest::Client,
    endpoint: String,
    auth: String,
    request_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<ApiError>,
}

/// `auth` is null for `user.login` and the session token for everything else.
pub(crate) fn rpc_request(method: &str, params: &Value, auth: Option<&str>, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": id,
        "auth": auth,
    })
}

async fn send(client: &reqwest::Client, endpoint: &str, body: Value) -> Result<Value, Error> {
    let response = client
        .post(endpoint)
        .json(&body)
        .send()
        .await?
        .error_for_status()?;
    let response: RpcResponse = response.json().await?;
    if let Some(err) = response.error {
        return Err(Error::Api(err));
    }
    match response.result {
        Some(result) => Ok(result),
        None => Err(Error::Generic(
            "Response carried neither result nor error".to_string(),
        )),
    }
}

impl ZabbixClient {
    /// Log in to the server, returning a session whose token rides along on
    /// every subsequent call.
    pub async fn connect(config: &Configuration) -> Result<Self, Error> {
        let client = ClientBuilder::new()
            .user_agent(format!("zabctl/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let endpoint = config.endpoint();

        let login = rpc_request(
            "user.login",
            &json!({"user": config.username, "password": config.password}),
            None,
            1,
        );
        let token = send(&client, &endpoint, login).await?;
        let auth = match token.as_str() {
            Some(val) => val.to_string(),
            None => {
                return Err(Error::Generic(format!(
                    "Expected a session token from user.login, got {token:?}"
                )))
            }
        };
        debug!("Logged in to {}", endpoint);
        Ok(Self {
            client,
            endpoint,
            auth,
            request_id: AtomicU64::new(2),
        })
    }
}

#[async_trait]
impl RemoteApi for ZabbixClient {
    async fn call(&self, method: &str, params: Value) -> Result<Value, Error> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        trace!("request id={id} method={method} params={params}");
        send(
            &self.client,
            &self.endpoint,
            rpc_request(method, &params, Some(&self.auth), id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_request_login() {
        let request = rpc_request(
            "user.login",
            &json!({"user": "Admin", "password": "zabbix"}),
            None,
            1,
        );
        assert_eq!(request["jsonrpc"], "2.0");
        assert_eq!(request["method"], "user.login");
        assert_eq!(request["auth"], Value::Null);
        assert_eq!(request["id"], 1);
    }

    #[test]
    fn test_rpc_request_authed() {
        let request = rpc_request("host.get", &json!({"filter": {}}), Some("s3cr3t"), 7);
        assert_eq!(request["auth"], "s3cr3t");
        assert_eq!(request["params"], json!({"filter": {}}));
    }

    #[test]
    fn test_rpc_response_error() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid params.","data":"Host already exists."},"id":3}"#,
        )
        .expect("Failed to parse response");
        let err = response.error.expect("Expected an error payload");
        assert_eq!(err.code, -32602);
        assert_eq!(err.data, "Host already exists.");
        assert!(response.result.is_none());
    }

    #[test]
    fn test_rpc_response_result() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","result":{"hostids":["10105"]},"id":4}"#)
                .expect("Failed to parse response");
        assert_eq!(response.result, Some(json!({"hostids": ["10105"]})));
        assert!(response.error.is_none());
    }
}
