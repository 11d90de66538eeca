use crate::{
    error::BoxError,
    transport::{HttpExecutor, HttpRequest, HttpResponse},
    Error, Result,
};
use reqwest::{blocking::Client, header, StatusCode};
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, env, time::Duration};

/// HTTP client configuration
/// HTTP 客户端配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Base URL every call path is appended to
    /// 所有调用路径拼接的基础 URL
    pub base_url: String,
    /// Optional bearer token
    /// 可选的 Bearer 令牌
    pub auth_token: Option<String>,
    /// Overall request timeout; the reqwest default applies when unset
    /// 请求总超时；未设置时使用 reqwest 的默认值
    #[serde(rename = "timeout_secs", deserialize_with = "deserialize_secs")]
    pub timeout: Option<Duration>,
    /// Optional User-Agent header
    /// 可选的 User-Agent 头
    pub user_agent: Option<String>,
    /// Headers sent with every call unless the call overrides them
    /// 每次调用都会发送的头，调用方可覆盖
    pub default_headers: HashMap<String, String>,
}

fn deserialize_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

impl HttpClientConfig {
    /// Creates a configuration with only a base URL
    /// 创建仅包含基础 URL 的配置
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads `ODOO_BASE_URL`, `ODOO_AUTH_TOKEN`, `ODOO_TIMEOUT_SECS` and `ODOO_USER_AGENT`
    /// 从环境变量读取配置
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("ODOO_BASE_URL")
            .map_err(|_| Error::InvalidRequest("ODOO_BASE_URL is not set".into()))?;

        let timeout = match env::var("ODOO_TIMEOUT_SECS") {
            Ok(secs) => Some(Duration::from_secs(secs.trim().parse().map_err(|_| {
                Error::InvalidRequest(format!("ODOO_TIMEOUT_SECS is not a number: {}", secs))
            })?)),
            Err(_) => None,
        };

        Ok(Self {
            base_url,
            auth_token: env::var("ODOO_AUTH_TOKEN").ok(),
            timeout,
            user_agent: env::var("ODOO_USER_AGENT").ok(),
            default_headers: HashMap::new(),
        })
    }
}

/// Blocking HTTP client implementation
/// 阻塞式 HTTP 客户端实现
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client
    /// 创建一个新的 HTTP 客户端
    ///
    /// Must not be called from inside an async context, the blocking client
    /// owns its own runtime. Async callers use `OdooClient::connect`.
    /// 不能在异步上下文中调用，阻塞客户端自带运行时。
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(token) = &config.auth_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|e| Error::InvalidRequest(e.to_string()))?,
            );
        }

        for (name, value) in &config.default_headers {
            let name = header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidRequest(e.to_string()))?;
            let value = header::HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidRequest(e.to_string()))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| Error::InvalidRequest(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpExecutor for HttpClient {
    fn execute(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let mut builder = self.client.post(&request.url).body(request.body);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send()?;
        let status = response.status();
        let reason = reason_phrase(status);

        // Error bodies are never parsed, so they are not read either
        // 错误响应体不会被解析，因此也不读取
        if !status.is_success() {
            return Ok(HttpResponse::new(status.as_u16(), reason, None));
        }

        let body = response.bytes()?;
        Ok(HttpResponse::new(status.as_u16(), reason, Some(body.to_vec())))
    }
}

/// Reason phrase for `status`, never empty
/// 状态码对应的原因短语，保证非空
fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unknown Status")
        .to_string()
}
