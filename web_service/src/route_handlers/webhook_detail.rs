use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use shared_lib::utils::pretty_json;
use shared_lib::webhook_structs::WebhookId;

use crate::SharedAppState;

pub async fn handler(
    State(state): State<SharedAppState>,
    Path(webhook_id): Path<i64>,
) -> Response {
    let record = match state.retrieval.get_one(WebhookId(webhook_id)).await {
        Ok(record) => record,
        Err(err) if err.is_not_found() => {
            return (
                StatusCode::NOT_FOUND,
                super::html_template::HtmlTemplate(NotFoundTemplate { id: webhook_id }),
            )
                .into_response();
        }
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    super::html_template::HtmlTemplate(WebhookTemplate {
        id: record.id.0,
        received_at: record.received_at.to_rfc3339(),
        body_formatted: pretty_json(&record.body),
        headers_formatted: pretty_json(&record.headers),
        query_params_formatted: pretty_json(&record.query_params),
    })
    .into_response()
}

#[derive(askama::Template)]
#[template(path = "pages/webhook.html")]
struct WebhookTemplate {
    id: i64,
    received_at: String,
    body_formatted: String,
    headers_formatted: String,
    query_params_formatted: String,
}

#[derive(askama::Template)]
#[template(path = "pages/not_found.html")]
struct NotFoundTemplate {
    id: i64,
}
