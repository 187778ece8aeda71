//! HTTP Error Handling
//!
//! MaryError 到 `{errno, error, data}` 响应的映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::MaryError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => errno::NOT_FOUND,
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.errno();
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = code, error = %msg, "Resource not found");
                ErrorResponse::new(code, msg)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = code, error = %msg, "Bad request");
                ErrorResponse::new(code, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = code, error = %msg, "Internal server error");
                ErrorResponse::new(code, msg)
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = code, error = %msg, "MARY server unavailable");
                ErrorResponse::new(code, msg)
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<MaryError> for ApiError {
    fn from(e: MaryError) -> Self {
        match e {
            MaryError::NotFound(msg) => ApiError::NotFound(msg),
            MaryError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            MaryError::Connection(_) | MaryError::Protocol(_) | MaryError::Timeout(_) => {
                ApiError::ServiceUnavailable(e.to_string())
            }
            MaryError::Output(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mary_error_mapping() {
        assert_eq!(
            ApiError::from(MaryError::not_found("no voices for xx")).errno(),
            errno::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(MaryError::invalid_request("empty type")).errno(),
            errno::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(MaryError::protocol("zero lines")).errno(),
            errno::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(MaryError::Timeout("read".into())).errno(),
            errno::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(MaryError::output("broken pipe")).errno(),
            errno::INTERNAL_ERROR
        );
    }

    #[test]
    fn test_service_unavailable_keeps_error_kind() {
        match ApiError::from(MaryError::connect("localhost:59125", "refused")) {
            ApiError::ServiceUnavailable(msg) => assert!(msg.starts_with("Connection error")),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }
}
