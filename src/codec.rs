use serde_json::{Map, Value};

use crate::{
    protocol::{JsonRpcRequest, JsonRpcResponse, RequestId, ResponseError, JSONRPC_VERSION},
    Error, Result,
};

/// Turns a request into the bytes sent over the wire
pub trait RequestConverter: Send + Sync {
    fn convert(&self, request: &JsonRpcRequest) -> Result<Vec<u8>>;
}

/// Turns a response body into a parsed response or a typed failure
pub trait ResponseParser: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<JsonRpcResponse>;
}

/// JSON envelope converter
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRequestConverter;

impl RequestConverter for JsonRequestConverter {
    fn convert(&self, request: &JsonRpcRequest) -> Result<Vec<u8>> {
        serde_json::to_vec(request).map_err(Error::Serialization)
    }
}

/// JSON-RPC 2.0 response parser
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonResponseParser;

impl ResponseParser for JsonResponseParser {
    fn parse(&self, body: &[u8]) -> Result<JsonRpcResponse> {
        let value: Value = serde_json::from_slice(body).map_err(Error::Parse)?;
        let Value::Object(mut envelope) = value else {
            return Err(Error::Protocol(
                "expected a JSON-RPC response object".into(),
            ));
        };

        match envelope.get("jsonrpc") {
            None => {}
            Some(Value::String(version)) if version == JSONRPC_VERSION => {}
            Some(other) => {
                return Err(Error::Protocol(format!(
                    "unsupported jsonrpc version: {}",
                    other
                )))
            }
        }

        let id = take_id(&mut envelope)?;

        match envelope.remove("error") {
            None | Some(Value::Null) => {}
            Some(error) => {
                let error: ResponseError = serde_json::from_value(error)
                    .map_err(|e| Error::Protocol(format!("malformed error object: {}", e)))?;
                return Err(error.into());
            }
        }

        // A present `null` result is a valid answer, only a missing one is not
        let result = envelope
            .remove("result")
            .ok_or_else(|| Error::Protocol("response has neither result nor error".into()))?;

        Ok(JsonRpcResponse::success(result, id))
    }
}

fn take_id(envelope: &mut Map<String, Value>) -> Result<Option<RequestId>> {
    match envelope.remove("id") {
        None | Some(Value::Null) => Ok(None),
        Some(id) => serde_json::from_value(id)
            .map(Some)
            .map_err(|e| Error::Protocol(format!("invalid response id: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Params;
    use serde_json::json;

    fn parse(body: &str) -> Result<JsonRpcResponse> {
        JsonResponseParser.parse(body.as_bytes())
    }

    #[test]
    fn test_convert_writes_full_envelope() {
        let request = JsonRpcRequest::new("call", Params::from(vec![json!(1), json!("x")]));
        let bytes = JsonRequestConverter.convert(&request).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 1, "method": "call", "params": [1, "x"]})
        );
    }

    #[test]
    fn test_parse_success() {
        let response = parse(r#"{"jsonrpc":"2.0","id":3,"result":{"uid":2}}"#).unwrap();
        assert_eq!(response.id, Some(RequestId::Number(3)));
        assert_eq!(response.result, json!({"uid": 2}));
    }

    #[test]
    fn test_parse_null_result_is_success() {
        let response = parse(r#"{"jsonrpc":"2.0","id":null,"result":null}"#).unwrap();
        assert_eq!(response.id, None);
        assert_eq!(response.result, Value::Null);
    }

    #[test]
    fn test_parse_tolerates_missing_version() {
        let response = parse(r#"{"id":"a","result":true}"#).unwrap();
        assert_eq!(response.id, Some(RequestId::String("a".into())));
    }

    #[test]
    fn test_parse_malformed_bytes() {
        assert!(matches!(parse("{not json"), Err(Error::Parse(_))));
        assert!(matches!(parse(""), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_not_json_rpc_shaped() {
        assert!(matches!(parse(r#"{"message":"ok"}"#), Err(Error::Protocol(_))));
        assert!(matches!(parse("[1,2,3]"), Err(Error::Protocol(_))));
        assert!(matches!(parse("42"), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_parse_wrong_version() {
        let err = parse(r#"{"jsonrpc":"1.0","id":1,"result":1}"#).unwrap_err();
        assert!(matches!(err, Error::Protocol(msg) if msg.contains("version")));
    }

    #[test]
    fn test_parse_invalid_id() {
        let err = parse(r#"{"jsonrpc":"2.0","id":{"x":1},"result":1}"#).unwrap_err();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn test_parse_error_object() {
        let err = parse(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":200,"message":"Odoo Server Error","data":{"name":"x"}}}"#,
        )
        .unwrap_err();

        match err {
            Error::JsonRpc {
                code,
                message,
                data,
            } => {
                assert_eq!(code, 200);
                assert_eq!(message, "Odoo Server Error");
                assert_eq!(data, Some(json!({"name": "x"})));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_wins_over_result() {
        let err = parse(r#"{"jsonrpc":"2.0","id":1,"result":1,"error":{"code":-32601,"message":"nope"}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::JsonRpc { code: -32601, .. }));
    }

    #[test]
    fn test_parse_malformed_error_object() {
        let err = parse(r#"{"jsonrpc":"2.0","id":1,"error":"boom"}"#).unwrap_err();
        assert!(matches!(err, Error::Protocol(msg) if msg.contains("error object")));
    }
}
