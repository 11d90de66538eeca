use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Params, RequestId, JSONRPC_VERSION};
use crate::{Error, Result};

/// JSON-RPC request message
/// JSON-RPC 请求消息
///
/// Immutable once built; the fields are only reachable through accessors.
/// 构建后不可变，字段只能通过访问器读取。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (must be "2.0")
    /// 协议版本（必须为 "2.0"）
    jsonrpc: String,
    /// Request ID
    /// 请求 ID
    id: RequestId,
    /// Request method
    /// 请求方法
    method: String,
    /// Call arguments
    /// 调用参数
    #[serde(default)]
    params: Params,
}

/// JSON-RPC response message, reduced to what a caller consumes
/// JSON-RPC 响应消息，仅保留调用方需要的部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Echoed request ID, if the server sent one
    /// 服务器回传的请求 ID（如果有）
    pub id: Option<RequestId>,
    /// Response result
    /// 响应结果
    pub result: Value,
}

/// Error object of a JSON-RPC response
/// JSON-RPC 响应中的错误对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    /// Error code
    /// 错误代码
    pub code: i64,
    /// Error message
    /// 错误消息
    pub message: String,
    /// Additional error data
    /// 附加错误数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Error codes the client reacts to
/// 客户端会处理的错误代码
pub mod error_codes {
    // Odoo reports an expired web session with this code
    // Odoo 使用此代码报告会话过期
    pub const ODOO_SESSION_EXPIRED: i64 = 100;
}

impl JsonRpcRequest {
    /// Creates a new request with the default ID
    /// 使用默认 ID 创建一个新的请求
    pub fn new(method: impl Into<String>, params: impl Into<Params>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: RequestId::default(),
            method: method.into(),
            params: params.into(),
        }
    }

    /// Creates a request whose positional arguments are serialized from `args`
    /// 创建一个请求，位置参数由 `args` 序列化而来
    pub fn positional<I, T>(method: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        Ok(Self::new(method, Params::from_args(args)?))
    }

    /// Creates a request with keyword arguments
    /// 创建一个使用命名参数的请求
    pub fn named(method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self::new(method, Params::Named(params))
    }

    /// Returns the same request carrying another ID
    /// 返回使用另一个 ID 的相同请求
    pub fn with_id(self, id: impl Into<RequestId>) -> Self {
        Self {
            id: id.into(),
            ..self
        }
    }

    pub fn jsonrpc(&self) -> &str {
        &self.jsonrpc
    }

    pub fn id(&self) -> &RequestId {
        &self.id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl JsonRpcResponse {
    /// Creates a new successful response
    /// 创建一个新的成功响应
    pub fn success(result: Value, id: Option<RequestId>) -> Self {
        Self { id, result }
    }

    pub fn result(&self) -> &Value {
        &self.result
    }

    pub fn into_result(self) -> Value {
        self.result
    }

    /// Decodes the result into a typed model
    /// 将结果解码为具体类型
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(self.result).map_err(Error::Decode)
    }
}

impl From<ResponseError> for Error {
    fn from(error: ResponseError) -> Self {
        Error::JsonRpc {
            code: error.code,
            message: error.message,
            data: error.data,
        }
    }
}
