pub mod codec;
mod libsql_store;
mod memory_store;

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use async_trait::async_trait;

use shared_lib::webhook_structs::{NewWebhook, WebhookId, WebhookRecord};

pub use crate::codec::CodecError;
pub use crate::libsql_store::LibsqlStore;
pub use crate::memory_store::MemoryStore;

pub type SharedStore = Arc<dyn RecordStore>;

pub enum DBTable {
    Webhooks,
}

impl Display for DBTable {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DBTable::Webhooks => write!(f, "webhooks"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("unexpected row shape: {0}")]
    Row(#[from] serde::de::value::Error),

    #[error("failed to encode webhook: {0}")]
    Encode(#[source] CodecError),

    #[error("stored webhook {id} has a corrupt {field}: {source}")]
    Corrupt {
        id: WebhookId,
        field: &'static str,
        #[source]
        source: CodecError,
    },

    #[error("insert into {0} did not return an id")]
    MissingId(String),
}

/// Durable keyed storage for captured webhooks.
///
/// Records are created once and never updated or deleted. Implementations
/// must assign ids atomically: concurrent `create` calls never share an id
/// and readers never observe a partially written record.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists the webhook and returns its newly assigned id.
    async fn create(&self, webhook: NewWebhook) -> Result<WebhookId, StoreError>;

    async fn get_by_id(&self, id: WebhookId) -> Result<Option<WebhookRecord>, StoreError>;

    /// Every stored record, ordered by id ascending.
    async fn list_all(&self) -> Result<Vec<WebhookRecord>, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

fn decode_stored(row: &codec::StoredRow) -> Result<WebhookRecord, StoreError> {
    codec::decode_row(row).map_err(|source| {
        tracing::error!("Failed to decode {} row {}: {}", DBTable::Webhooks, row.id, source);
        StoreError::Corrupt {
            id: WebhookId(row.id),
            field: source.field(),
            source,
        }
    })
}
