//! Because loads of use statements is messy.

pub use std::collections::HashMap;
pub use std::sync::Arc;

pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use serde_json::{json, Map, Value};

pub use log::{debug, error, info, trace, warn};

pub(crate) use crate::api::RemoteApi;
pub(crate) use crate::config::Configuration;
pub(crate) use crate::errors::Error;
