use std::collections::HashMap;

use reqwest::{
    header::{HeaderName, HeaderValue},
    Url,
};

use crate::{error::BoxError, Error, Result};

pub mod http;

pub use self::http::{HttpClient, HttpClientConfig};

/// Outgoing HTTP POST, built once per call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Target URL
    pub url: String,
    /// Headers attached verbatim
    pub headers: HashMap<String, String>,
    /// Serialized request body
    pub body: Vec<u8>,
}

/// Outcome of an executed HTTP call
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Reason phrase reported for the status
    pub reason: String,
    /// Response body, `None` when absent or empty
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request after checking that the URL and every header are valid
    pub fn new(url: String, headers: HashMap<String, String>, body: Vec<u8>) -> Result<Self> {
        Url::parse(&url).map_err(|e| Error::InvalidRequest(format!("bad url {}: {}", url, e)))?;

        for (name, value) in &headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::InvalidRequest(format!("bad header name: {:?}", name)))?;
            HeaderValue::from_str(value)
                .map_err(|_| Error::InvalidRequest(format!("bad value for header {}", name)))?;
        }

        Ok(Self { url, headers, body })
    }
}

impl HttpResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.filter(|bytes| !bytes.is_empty()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single blocking HTTP POST
///
/// An `Err` means the request never produced an HTTP response (DNS, connect,
/// TLS, timeout). Non-2xx statuses are returned as `Ok`.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

/// Joins `paths` onto `base_url`, with a trailing `/` only if there are segments
pub fn build_url<S: AsRef<str>>(base_url: &str, paths: &[S]) -> String {
    if paths.is_empty() {
        return base_url.to_string();
    }

    let joined = paths
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/");
    format!("{}{}/", base_url, joined)
}
