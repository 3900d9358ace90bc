//! 客户端错误模型
//!
//! 后端返回的错误体形态不统一（FastAPI 风格）：
//! - `{"detail": "Incorrect username or password"}`
//! - `{"detail": [{"loc": [...], "msg": "field required"}]}`
//! - `[{"msg": "..."}]`
//! - `{"message": "..."}`
//!
//! `extract_error_message` 把这些形态归一为一条可展示的消息。

use serde_json::Value;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 请求未能到达服务器
    #[error("network error: {0}")]
    Network(String),
    /// 401: 令牌缺失或失效
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// 403: 角色无权访问
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// 其他非 2xx 响应
    #[error("request failed ({status}): {message}")]
    Status { status: u16, message: String },
    /// 响应体无法解析为期望的类型
    #[error("invalid response: {0}")]
    Decode(String),
    /// 组件已卸载，结果被丢弃
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    /// 根据状态码与响应体构造错误
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .map(|value| extract_error_message(&value, fallback))
            .unwrap_or_else(|_| fallback.to_string());

        match status {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::Forbidden(message),
            _ => ApiError::Status { status, message },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// 机器可读的错误代码（日志用）
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Status { .. } => "REQUEST_FAILED",
            ApiError::Decode(_) => "DECODE_ERROR",
            ApiError::Cancelled => "CANCELLED",
        }
    }

    /// 页面内联提示使用的文本
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Unable to reach the server. Please check your connection.".to_string()
            }
            ApiError::Unauthorized(msg) | ApiError::Forbidden(msg) => msg.clone(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) => "The server returned an unexpected response.".to_string(),
            ApiError::Cancelled => String::new(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

// =========================================================
// 错误消息提取
// =========================================================

/// 从错误体中提取可展示的消息
pub fn extract_error_message(body: &Value, fallback: &str) -> String {
    match body {
        Value::Object(map) => {
            match map.get("detail") {
                Some(Value::String(detail)) => return detail.clone(),
                Some(Value::Array(items)) => {
                    if let Some(joined) = join_validation_messages(items) {
                        return joined;
                    }
                }
                _ => {}
            }
            match map.get("message") {
                Some(Value::String(message)) if !message.is_empty() => message.clone(),
                _ => fallback.to_string(),
            }
        }
        Value::Array(items) => {
            join_validation_messages(items).unwrap_or_else(|| fallback.to_string())
        }
        _ => fallback.to_string(),
    }
}

fn join_validation_messages(items: &[Value]) -> Option<String> {
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Object(obj) => obj
                .get("msg")
                .or_else(|| obj.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| item.to_string()),
            other => other.to_string(),
        })
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FALLBACK: &str = "Something went wrong";

    #[test]
    fn detail_string_wins() {
        let body = json!({ "detail": "Incorrect username or password", "message": "ignored" });
        assert_eq!(
            extract_error_message(&body, FALLBACK),
            "Incorrect username or password"
        );
    }

    #[test]
    fn detail_array_is_joined() {
        let body = json!({ "detail": [
            { "loc": ["body", "email"], "msg": "value is not a valid email address" },
            { "message": "password too short" },
            "raw entry"
        ]});
        assert_eq!(
            extract_error_message(&body, FALLBACK),
            "value is not a valid email address, password too short, raw entry"
        );
    }

    #[test]
    fn top_level_validation_array() {
        let body = json!([{ "msg": "a" }, { "msg": "b" }]);
        assert_eq!(extract_error_message(&body, FALLBACK), "a, b");
    }

    #[test]
    fn message_then_fallback() {
        assert_eq!(extract_error_message(&json!({ "message": "m" }), FALLBACK), "m");
        assert_eq!(extract_error_message(&json!({ "error": 1 }), FALLBACK), FALLBACK);
        assert_eq!(extract_error_message(&json!(null), FALLBACK), FALLBACK);
    }

    #[test]
    fn from_response_classifies_status() {
        let err = ApiError::from_response(401, r#"{"detail":"Could not validate credentials"}"#, FALLBACK);
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "Could not validate credentials");

        let err = ApiError::from_response(403, r#"{"detail":"Not enough permissions"}"#, FALLBACK);
        assert_eq!(err.status(), Some(403));

        let err = ApiError::from_response(500, "<html>oops</html>", FALLBACK);
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                message: FALLBACK.to_string()
            }
        );
    }
}
