use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_lib::webhook_structs::{NewWebhook, WebhookId, WebhookRecord};

use crate::codec::{self, StoredRow};
use crate::{decode_stored, RecordStore, StoreError};

#[derive(Default)]
struct Rows {
    last_id: i64,
    rows: BTreeMap<i64, StoredRow>,
}

/// Process-local store holding the encoded rows in memory.
///
/// Id assignment and insertion happen under one write lock, so a row is
/// either fully visible or not visible at all.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Rows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(&self, webhook: NewWebhook) -> Result<WebhookId, StoreError> {
        let encoded = codec::encode_webhook(&webhook).map_err(StoreError::Encode)?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(id, StoredRow::new(id, encoded));

        tracing::trace!("webhook {} stored in memory", id);
        Ok(WebhookId(id))
    }

    async fn get_by_id(&self, id: WebhookId) -> Result<Option<WebhookRecord>, StoreError> {
        let inner = self.inner.read().await;
        inner.rows.get(&id.0).map(decode_stored).transpose()
    }

    async fn list_all(&self) -> Result<Vec<WebhookRecord>, StoreError> {
        let inner = self.inner.read().await;
        inner.rows.values().map(decode_stored).collect()
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.inner.read().await.rows.len() as u64)
    }
}
