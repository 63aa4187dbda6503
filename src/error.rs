//! Error types for the HTTP surface
//!
//! The cache and reducers are total; only request handling can fail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == App Error Enum ==
/// Unified error type for the server.
#[derive(Error, Debug)]
pub enum AppError {
    /// Key not found in cache (absent or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The remote document store failed
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the server.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use proptest::prelude::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (AppError::NotFound("key".to_string()), StatusCode::NOT_FOUND),
            (AppError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
            (AppError::Upstream("offline".to_string()), StatusCode::BAD_GATEWAY),
            (AppError::Internal("error".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        // Every error variant renders as JSON with a string "error" field
        // carrying the display message.
        #[test]
        fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}") {
            let variants = vec![
                AppError::NotFound(error_msg.clone()),
                AppError::InvalidRequest(error_msg.clone()),
                AppError::Upstream(error_msg.clone()),
                AppError::Internal(error_msg.clone()),
            ];
            let rt = tokio::runtime::Runtime::new().unwrap();

            for error in variants {
                let expected_msg = error.to_string();
                let response = error.into_response();

                let content_type = response
                    .headers()
                    .get("content-type")
                    .and_then(|v| v.to_str().ok());
                prop_assert!(content_type.map(|ct| ct.contains("application/json")).unwrap_or(false));

                let bytes = rt.block_on(async { to_bytes(response.into_body(), usize::MAX).await.unwrap() });
                let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

                prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
            }
        }
    }
}
