use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header or query-parameter names mapped to a single value.
pub type FieldMap = BTreeMap<String, String>;

/// Store-assigned identity of a captured webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookId(pub i64);

impl Display for WebhookId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WebhookId {
    fn from(id: i64) -> Self {
        WebhookId(id)
    }
}

/// A validated webhook that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWebhook {
    pub body: serde_json::Value,
    pub headers: FieldMap,
    pub query_params: FieldMap,
    pub received_at: DateTime<Utc>,
}

/// A persisted webhook. Records are never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRecord {
    pub id: WebhookId,
    pub body: serde_json::Value,
    pub headers: FieldMap,
    pub query_params: FieldMap,
    pub received_at: DateTime<Utc>,
}

impl WebhookRecord {
    pub fn from_new(id: WebhookId, webhook: NewWebhook) -> Self {
        WebhookRecord {
            id,
            body: webhook.body,
            headers: webhook.headers,
            query_params: webhook.query_params,
            received_at: webhook.received_at,
        }
    }
}
