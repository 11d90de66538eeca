pub mod message;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use message::*;

use crate::{Error, Result};

/// JSON-RPC protocol version carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Id given to requests that were not assigned one explicitly
pub const DEFAULT_REQUEST_ID: i64 = 1;

/// Represents a unique identifier for JSON-RPC requests
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl Default for RequestId {
    fn default() -> Self {
        RequestId::Number(DEFAULT_REQUEST_ID)
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::String(id.to_string())
    }
}

/// Arguments of a JSON-RPC call, either by position or by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Params {
    /// Ordered sequence of untyped argument values
    Positional(Vec<Value>),
    /// Keyword arguments
    Named(Map<String, Value>),
}

impl Params {
    /// Serializes each argument into a positional parameter list
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let values = args
            .into_iter()
            .map(|arg| serde_json::to_value(arg).map_err(Error::Serialization))
            .collect::<Result<Vec<_>>>()?;
        Ok(Params::Positional(values))
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Positional(values) => values.len(),
            Params::Named(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::Positional(Vec::new())
    }
}

impl From<Vec<Value>> for Params {
    fn from(values: Vec<Value>) -> Self {
        Params::Positional(values)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Params::Named(map)
    }
}
