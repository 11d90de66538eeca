use std::{collections::HashMap, sync::Arc};

use crate::{
    codec::{JsonRequestConverter, JsonResponseParser, RequestConverter, ResponseParser},
    protocol::{JsonRpcRequest, JsonRpcResponse},
    transport::{build_url, HttpClient, HttpClientConfig, HttpExecutor, HttpRequest},
    Error, Result,
};

pub mod observer;

pub use observer::{CallObserver, NoopObserver, TracingObserver};

/// Executes one JSON-RPC call end to end
///
/// Calls block the current thread; offload them from async code.
pub trait JsonRpcCaller: Send + Sync {
    /// Sends `request` to the base URL extended by `paths`
    fn call(
        &self,
        request: &JsonRpcRequest,
        headers: &HashMap<String, String>,
        paths: &[&str],
    ) -> Result<JsonRpcResponse>;
}

/// JSON-RPC caller over HTTP POST
///
/// Holds no per-call state, so one instance can be shared between threads.
pub struct HttpJsonRpcCaller {
    base_url: String,
    executor: Arc<dyn HttpExecutor>,
    converter: Arc<dyn RequestConverter>,
    parser: Arc<dyn ResponseParser>,
    observer: Arc<dyn CallObserver>,
}

impl HttpJsonRpcCaller {
    /// Create a caller with the JSON codec and tracing observer
    pub fn new(base_url: impl Into<String>, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            base_url: base_url.into(),
            executor,
            converter: Arc::new(JsonRequestConverter),
            parser: Arc::new(JsonResponseParser),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Create a caller backed by the reqwest client
    ///
    /// Blocks; from async code go through `OdooClient::connect` or `spawn_blocking`.
    pub fn from_config(config: &HttpClientConfig) -> Result<Self> {
        let client = HttpClient::new(config)?;
        Ok(Self::new(config.base_url.clone(), Arc::new(client)))
    }

    pub fn with_converter(self, converter: Arc<dyn RequestConverter>) -> Self {
        Self { converter, ..self }
    }

    pub fn with_parser(self, parser: Arc<dyn ResponseParser>) -> Self {
        Self { parser, ..self }
    }

    pub fn with_observer(self, observer: Arc<dyn CallObserver>) -> Self {
        Self { observer, ..self }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn execute(&self, url: &str, request: HttpRequest) -> Result<JsonRpcResponse> {
        let response = self.executor.execute(request).map_err(Error::network)?;
        self.observer.on_response(url, response.status);

        if !response.is_success() {
            return Err(Error::Transport {
                status: response.status,
                message: response.reason,
            });
        }

        match response.body {
            Some(body) => self.parser.parse(&body),
            None => Err(Error::EmptyResponse),
        }
    }
}

impl JsonRpcCaller for HttpJsonRpcCaller {
    fn call(
        &self,
        request: &JsonRpcRequest,
        headers: &HashMap<String, String>,
        paths: &[&str],
    ) -> Result<JsonRpcResponse> {
        let url = build_url(&self.base_url, paths);
        let result = self
            .converter
            .convert(request)
            .and_then(|body| HttpRequest::new(url.clone(), headers.clone(), body))
            .and_then(|http_request| {
                self.observer.on_call_start(&url, request);
                self.execute(&url, http_request)
            });

        if let Err(error) = &result {
            self.observer.on_error(&url, error);
        }
        result
    }
}
