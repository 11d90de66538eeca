use serde_json::Value;
use thiserror::Error;

use crate::protocol::error_codes;

/// Boxed cause carried by network failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("{message}")]
    NetworkRequest {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("HTTP {status}. {message}")]
    Transport { status: u16, message: String },

    #[error("Response body is empty")]
    EmptyResponse,

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("JSON-RPC error: {code} - {message}")]
    JsonRpc {
        code: i64,
        message: String,
        data: Option<Value>,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unexpected result shape: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// Wraps a transport-level failure, keeping the original cause
    pub fn network(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Error::NetworkRequest {
            message: format!("Network error: {}", source),
            source,
        }
    }

    /// HTTP status code of a [`Error::Transport`] failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server rejected the call because the Odoo session is gone
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::JsonRpc { code, .. } if *code == error_codes::ODOO_SESSION_EXPIRED)
    }
}
