use serde::Deserialize;

#[derive(Debug, PartialEq)]
pub enum Error {
    ConnectionFailed(String),
    /// The server rejected a call
    Api(ApiError),
    HostGroupNotFound(String),
    HostNotFound(String),
    TemplateNotFound(String),
    NotSupported(String),
    Generic(String),
    IoError(String),
    JsonParse(String),
}

/// Error payload of a JSON-RPC response
#[derive(Debug, PartialEq, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: String,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParse(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::ConnectionFailed(err.to_string())
    }
}
