//! Message endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::api::websocket::state::AppState;
use crate::error::ChatError;
use crate::types::{Message, NewMessage};

/// Response for POST /messages
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: Message,
    /// Log length after the insert
    pub total: usize,
}

/// Response for DELETE /messages/:id
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
}

/// GET /messages - Full log, oldest first
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Message>>, ChatError> {
    let messages = state.service.list_messages().await?;
    Ok(Json(messages))
}

/// POST /messages - Create a message and broadcast it
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewMessage>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let error = ApiError::bad_request(rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    match state.service.create_message(payload).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(CreatedResponse {
                message: created.message,
                total: created.total,
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /messages/:id - Delete a message and broadcast the removal
pub async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ChatError> {
    let id = state.service.delete_message(id).await?;
    Ok(Json(DeletedResponse { id }))
}
