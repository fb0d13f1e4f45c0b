//! REST API module for HTTP endpoints
//!
//! - `GET /messages` - Full message log
//! - `POST /messages` - Create a message
//! - `DELETE /messages/:id` - Delete a message

pub mod messages;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;

use crate::error::ChatError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "INTERNAL_ERROR".to_string(),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ChatError::Validation(_) => {
                (StatusCode::BAD_REQUEST, ApiError::bad_request(self.to_string()))
            }
            ChatError::NotFound(_) => {
                (StatusCode::NOT_FOUND, ApiError::not_found(self.to_string()))
            }
            ChatError::Storage(_) | ChatError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal(self.to_string()),
            ),
        };
        (status, Json(body)).into_response()
    }
}
