pub mod capture;
pub mod home;
pub mod html_template;
pub mod webhook_detail;
pub mod webhooks;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

pub fn error_response(status: StatusCode, code: Option<&'static str>, detail: String) -> Response {
    (status, Json(ErrorResponse { detail, code })).into_response()
}

pub fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
        "Internal server error".to_string(),
    )
}
