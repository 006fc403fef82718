use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use shared_lib::webhook_structs::WebhookId;

use super::{error_response, internal_error};
use crate::SharedAppState;

pub async fn list_handler(State(state): State<SharedAppState>) -> Response {
    match state.retrieval.get_all().await {
        Ok(records) => Json(records).into_response(),
        Err(_) => internal_error(),
    }
}

pub async fn get_handler(
    State(state): State<SharedAppState>,
    Path(webhook_id): Path<i64>,
) -> Response {
    match state.retrieval.get_one(WebhookId(webhook_id)).await {
        Ok(record) => Json(record).into_response(),
        Err(err) if err.is_not_found() => error_response(
            StatusCode::NOT_FOUND,
            None,
            "Webhook not found".to_string(),
        ),
        Err(_) => internal_error(),
    }
}
