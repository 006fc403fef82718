use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use capture_service::{CaptureError, RawCapture};
use shared_lib::webhook_structs::WebhookId;

use super::{error_response, internal_error};
use crate::SharedAppState;

#[derive(Debug, Serialize)]
pub struct CaptureResponse {
    status: &'static str,
    id: WebhookId,
}

pub async fn handler(
    State(state): State<SharedAppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let query_params = match parse_query(query.as_deref()) {
        Ok(query_params) => query_params,
        Err(err) => {
            tracing::warn!("Rejected webhook with unparsable query string: {}", err);
            return error_response(
                StatusCode::BAD_REQUEST,
                Some("invalid_query"),
                format!("Invalid query string: {err}"),
            );
        }
    };

    let capture = RawCapture {
        body: body.to_vec(),
        headers: header_pairs(&headers),
        query_params,
    };

    match state.intake.receive(capture).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(CaptureResponse { status: "saved", id }),
        )
            .into_response(),
        Err(CaptureError::Rejected(reason)) => {
            error_response(StatusCode::BAD_REQUEST, Some(reason.code()), reason.to_string())
        }
        Err(CaptureError::Storage(_)) => internal_error(),
    }
}

fn parse_query(query: Option<&str>) -> Result<Vec<(String, String)>, serde_urlencoded::de::Error> {
    match query {
        Some(query) => serde_urlencoded::from_str(query),
        None => Ok(Vec::new()),
    }
}

// header values may carry arbitrary bytes, anything that is not utf-8 is replaced
fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn query_pairs_are_percent_decoded_in_order() {
        let pairs = parse_query(Some("a=1&b=hello%20world&a=2&flag")).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "hello world".to_string()),
                ("a".to_string(), "2".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn missing_query_is_empty() {
        assert!(parse_query(None).unwrap().is_empty());
    }

    #[test]
    fn repeated_headers_are_all_passed_through() {
        let mut headers = HeaderMap::new();
        headers.append("x-tag", HeaderValue::from_static("one"));
        headers.append("x-tag", HeaderValue::from_static("two"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let pairs = header_pairs(&headers);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.contains(&("x-tag".to_string(), "two".to_string())));
    }

    #[test]
    fn non_utf8_header_values_are_replaced() {
        let mut headers = HeaderMap::new();
        headers.insert("x-raw", HeaderValue::from_bytes(b"caf\xe9").unwrap());

        let pairs = header_pairs(&headers);
        assert_eq!(pairs, vec![("x-raw".to_string(), "caf\u{fffd}".to_string())]);
    }
}
