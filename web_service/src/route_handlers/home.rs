use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use shared_lib::utils::json_preview;
use shared_lib::webhook_structs::WebhookRecord;

use crate::SharedAppState;

pub async fn handler(State(state): State<SharedAppState>) -> Response {
    let webhooks = match state.retrieval.get_all().await {
        Ok(records) => records,
        Err(_) => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    };

    let template = HomeTemplate {
        webhook_url: state.webhook_url(),
        webhooks: webhooks.iter().map(WebhookSummary::from).collect(),
    };
    super::html_template::HtmlTemplate(template).into_response()
}

struct WebhookSummary {
    id: i64,
    received_at: String,
    preview: String,
}

impl From<&WebhookRecord> for WebhookSummary {
    fn from(record: &WebhookRecord) -> Self {
        WebhookSummary {
            id: record.id.0,
            received_at: record.received_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            preview: json_preview(&record.body),
        }
    }
}

#[derive(askama::Template)]
#[template(path = "pages/home.html")]
struct HomeTemplate {
    webhook_url: String,
    webhooks: Vec<WebhookSummary>,
}
