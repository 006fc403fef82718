use db_service::SharedStore;
use shared_lib::webhook_structs::{WebhookId, WebhookRecord};

use crate::error::RetrievalError;

/// Read side over the record store. Records come back decoded.
#[derive(Clone)]
pub struct RetrievalService {
    store: SharedStore,
}

impl RetrievalService {
    pub fn new(store: SharedStore) -> Self {
        RetrievalService { store }
    }

    pub async fn get_one(&self, id: WebhookId) -> Result<WebhookRecord, RetrievalError> {
        match self.store.get_by_id(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                tracing::debug!("Webhook {} not found", id);
                Err(RetrievalError::NotFound { id })
            }
            Err(err) => {
                tracing::error!("Failed to read webhook {}: {}", id, err);
                Err(err.into())
            }
        }
    }

    pub async fn get_all(&self) -> Result<Vec<WebhookRecord>, RetrievalError> {
        self.store.list_all().await.map_err(|err| {
            tracing::error!("Failed to list webhooks: {}", err);
            err.into()
        })
    }
}
