use chrono::Utc;

use db_service::SharedStore;
use shared_lib::webhook_structs::{NewWebhook, WebhookId};

use crate::error::CaptureError;
use crate::validator::{RawCapture, Validator};

/// Validates inbound captures and persists the accepted ones.
///
/// Rejection always happens before the store is touched, so a failed
/// capture never leaves a record behind. A store failure after validation
/// is reported as [`CaptureError::Storage`], never as a rejection.
#[derive(Clone)]
pub struct IntakePipeline {
    validator: Validator,
    store: SharedStore,
}

impl IntakePipeline {
    pub fn new(store: SharedStore, validator: Validator) -> Self {
        IntakePipeline { validator, store }
    }

    pub async fn receive(&self, capture: RawCapture) -> Result<WebhookId, CaptureError> {
        let body_len = capture.body.len();

        let validated = match self.validator.validate(capture) {
            Ok(validated) => validated,
            Err(err) => {
                tracing::warn!("Rejected webhook ({} bytes): {}", body_len, err);
                return Err(err.into());
            }
        };

        let webhook = NewWebhook {
            body: validated.body,
            headers: validated.headers,
            query_params: validated.query_params,
            received_at: Utc::now(),
        };

        match self.store.create(webhook).await {
            Ok(id) => {
                tracing::info!("Captured webhook {} ({} bytes)", id, body_len);
                Ok(id)
            }
            Err(err) => {
                tracing::error!("Failed to store webhook: {}", err);
                Err(err.into())
            }
        }
    }
}
