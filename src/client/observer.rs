use tracing::{debug, warn};

use crate::{protocol::JsonRpcRequest, Error};

/// Hook points of a call, used for logging
///
/// Every method defaults to doing nothing.
pub trait CallObserver: Send + Sync {
    /// Called right before the HTTP request is executed
    fn on_call_start(&self, _url: &str, _request: &JsonRpcRequest) {}

    /// Called once an HTTP response arrived, whatever its status
    fn on_response(&self, _url: &str, _status: u16) {}

    /// Called for every failure, including ones raised before the request is sent
    fn on_error(&self, _url: &str, _error: &Error) {}
}

/// Emits `tracing` events for each hook
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CallObserver for TracingObserver {
    fn on_call_start(&self, url: &str, request: &JsonRpcRequest) {
        debug!(
            method = request.method(),
            id = ?request.id(),
            url,
            "calling JSON-RPC method"
        );
    }

    fn on_response(&self, url: &str, status: u16) {
        debug!(status, url, "received HTTP response");
    }

    fn on_error(&self, url: &str, error: &Error) {
        warn!(url, error = %error, "JSON-RPC call failed");
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CallObserver for NoopObserver {}
