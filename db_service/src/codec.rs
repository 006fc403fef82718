//! Flat text encoding for webhook fields.
//!
//! Every structured field is stored as compact JSON. Object keys come out
//! sorted, so equal values always encode to the same string.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use shared_lib::webhook_structs::{FieldMap, NewWebhook, WebhookId, WebhookRecord};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode {field}: {reason}")]
    Decode { field: &'static str, reason: String },
}

/// A webhook in its stored form: one text value per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedWebhook {
    pub body: String,
    pub headers: String,
    pub query_params: String,
    pub received_at: String,
}

/// A stored row including its identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredRow {
    pub id: i64,
    pub body: String,
    pub headers: String,
    pub query_params: String,
    pub received_at: String,
}

impl StoredRow {
    pub fn new(id: i64, encoded: EncodedWebhook) -> Self {
        StoredRow {
            id,
            body: encoded.body,
            headers: encoded.headers,
            query_params: encoded.query_params,
            received_at: encoded.received_at,
        }
    }
}

pub fn encode_value(value: &serde_json::Value) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(|source| CodecError::Encode {
        field: "body",
        source,
    })
}

pub fn decode_value(text: &str) -> Result<serde_json::Value, CodecError> {
    decode_field("body", text)
}

pub fn encode_map(map: &FieldMap) -> Result<String, CodecError> {
    serde_json::to_string(map).map_err(|source| CodecError::Encode {
        field: "field map",
        source,
    })
}

pub fn decode_map(text: &str) -> Result<FieldMap, CodecError> {
    decode_field("field map", text)
}

pub fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn decode_timestamp(text: &str) -> Result<DateTime<Utc>, CodecError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| CodecError::Decode {
            field: "received_at",
            reason: err.to_string(),
        })
}

pub fn encode_webhook(webhook: &NewWebhook) -> Result<EncodedWebhook, CodecError> {
    Ok(EncodedWebhook {
        body: encode_value(&webhook.body)?,
        headers: encode_map(&webhook.headers).map_err(rename("headers"))?,
        query_params: encode_map(&webhook.query_params).map_err(rename("query_params"))?,
        received_at: encode_timestamp(&webhook.received_at),
    })
}

pub fn decode_row(row: &StoredRow) -> Result<WebhookRecord, CodecError> {
    Ok(WebhookRecord {
        id: WebhookId(row.id),
        body: decode_value(&row.body)?,
        headers: decode_map(&row.headers).map_err(rename("headers"))?,
        query_params: decode_map(&row.query_params).map_err(rename("query_params"))?,
        received_at: decode_timestamp(&row.received_at)?,
    })
}

impl CodecError {
    pub fn field(&self) -> &'static str {
        match self {
            CodecError::Encode { field, .. } | CodecError::Decode { field, .. } => field,
        }
    }
}

fn decode_field<T>(field: &'static str, text: &str) -> Result<T, CodecError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(text).map_err(|err| CodecError::Decode {
        field,
        reason: err.to_string(),
    })
}

fn rename(field: &'static str) -> impl Fn(CodecError) -> CodecError {
    move |err| match err {
        CodecError::Encode { source, .. } => CodecError::Encode { field, source },
        CodecError::Decode { reason, .. } => CodecError::Decode { field, reason },
    }
}
