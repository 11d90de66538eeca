use std::{collections::HashMap, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    client::{HttpJsonRpcCaller, JsonRpcCaller},
    protocol::JsonRpcRequest,
    transport::HttpClientConfig,
    Error, Result,
};

pub mod de;
pub mod employees;
pub mod recruitment;

pub use employees::*;
pub use recruitment::*;

/// Path of Odoo's generic ORM endpoint
pub const CALL_KW_PATH: [&str; 3] = ["web", "dataset", "call_kw"];

/// Authenticated Odoo web session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OdooSession {
    pub session_id: String,
}

impl OdooSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }

    /// Headers that authenticate a call with this session
    pub fn headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            "Cookie".to_string(),
            format!("session_id={}", self.session_id),
        );
        headers
    }
}

/// An ORM method call on a model
#[derive(Debug, Clone, PartialEq)]
pub struct CallKw {
    pub model: String,
    pub method: String,
    pub args: Vec<Value>,
    pub kwargs: Map<String, Value>,
}

impl CallKw {
    pub fn new(model: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            method: method.into(),
            args: Vec::new(),
            kwargs: Map::new(),
        }
    }

    /// Appends a positional argument
    pub fn arg(mut self, arg: impl Serialize) -> Result<Self> {
        self.args
            .push(serde_json::to_value(arg).map_err(Error::Serialization)?);
        Ok(self)
    }

    /// Sets a keyword argument
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Serialize) -> Result<Self> {
        self.kwargs.insert(
            name.into(),
            serde_json::to_value(value).map_err(Error::Serialization)?,
        );
        Ok(self)
    }

    /// JSON-RPC `call` request carrying this ORM call
    pub fn to_request(&self) -> JsonRpcRequest {
        let mut params = Map::new();
        params.insert("model".into(), Value::String(self.model.clone()));
        params.insert("method".into(), Value::String(self.method.clone()));
        params.insert("args".into(), Value::Array(self.args.clone()));
        params.insert("kwargs".into(), Value::Object(self.kwargs.clone()));
        JsonRpcRequest::named("call", params)
    }

    /// `web/dataset/call_kw/<model>/<method>`
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = CALL_KW_PATH.to_vec();
        paths.push(self.model.as_str());
        paths.push(self.method.as_str());
        paths
    }
}

/// Runs ORM calls for one session on the blocking thread pool
#[derive(Clone)]
pub struct OdooClient {
    caller: Arc<dyn JsonRpcCaller>,
    session: OdooSession,
}

impl OdooClient {
    pub fn new(caller: Arc<dyn JsonRpcCaller>, session: OdooSession) -> Self {
        Self { caller, session }
    }

    /// Builds the reqwest-backed caller off the async threads
    ///
    /// The blocking client runs its own runtime and panics if created on a
    /// tokio worker, so construction goes through the blocking pool.
    pub async fn connect(config: HttpClientConfig, session: OdooSession) -> Result<Self> {
        let caller =
            tokio::task::spawn_blocking(move || HttpJsonRpcCaller::from_config(&config)).await??;
        Ok(Self::new(Arc::new(caller), session))
    }

    pub fn session(&self) -> &OdooSession {
        &self.session
    }

    /// Executes `call` and decodes its result
    pub async fn call_kw<T>(&self, call: CallKw) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let caller = Arc::clone(&self.caller);
        let headers = self.session.headers();

        let response = tokio::task::spawn_blocking(move || {
            caller.call(&call.to_request(), &headers, &call.paths())
        })
        .await??;

        response.deserialize()
    }
}

/// Odoo answers `null` instead of `true` for some write-like methods
pub(crate) fn acknowledged(value: Option<bool>) -> bool {
    value.unwrap_or(true)
}


#[cfg(test)]
mod tests {
    use super::testing::StubCaller;
    use super::*;
    use crate::protocol::Params;
    use serde_json::json;

    #[test]
    fn test_session_headers() {
        let headers = OdooSession::new("abc123").headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Cookie"], "session_id=abc123");
    }

    #[test]
    fn test_call_kw_request_and_paths() {
        let call = CallKw::new("hr.job", "write")
            .arg([4])
            .unwrap()
            .arg(json!({"website_published": true}))
            .unwrap()
            .kwarg("context", json!({"lang": "ru_RU"}))
            .unwrap();

        let request = call.to_request();
        assert_eq!(request.method(), "call");
        assert_eq!(
            serde_json::to_value(request.params()).unwrap(),
            json!({
                "model": "hr.job",
                "method": "write",
                "args": [[4], {"website_published": true}],
                "kwargs": {"context": {"lang": "ru_RU"}}
            })
        );
        assert!(matches!(request.params(), Params::Named(_)));
        assert_eq!(
            call.paths(),
            vec!["web", "dataset", "call_kw", "hr.job", "write"]
        );
    }

    #[tokio::test]
    async fn test_client_sends_session_and_decodes() {
        let stub = Arc::new(StubCaller::returning(json!([1, 2])));
        let client = OdooClient::new(stub.clone(), OdooSession::new("s1"));

        let ids: Vec<i64> = client
            .call_kw(CallKw::new("hr.employee", "search"))
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2]);
        let seen = stub.last();
        assert_eq!(seen.headers["Cookie"], "session_id=s1");
        assert_eq!(seen.paths.last().map(String::as_str), Some("search"));
    }

    #[tokio::test]
    async fn test_client_propagates_errors() {
        let client = OdooClient::new(Arc::new(StubCaller::failing()), OdooSession::new("old"));
        let err = client
            .call_kw::<Value>(CallKw::new("hr.employee", "search"))
            .await
            .unwrap_err();
        assert!(err.is_session_expired());
    }

    #[test]
    fn test_acknowledged() {
        assert!(acknowledged(Some(true)));
        assert!(acknowledged(None));
        assert!(!acknowledged(Some(false)));
    }
}
