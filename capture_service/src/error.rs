use db_service::StoreError;
use shared_lib::webhook_structs::WebhookId;

/// Why an inbound payload was refused before anything was stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid UTF-8 data: invalid byte sequence at offset {valid_up_to}")]
    Encoding { valid_up_to: usize },

    #[error("Invalid JSON data: {reason}")]
    Structure {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("Invalid JSON data: expected a top-level object but got {kind}")]
    NotAnObject { kind: &'static str },
}

impl ValidationError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Encoding { .. } => "invalid_utf8",
            ValidationError::Structure { .. } | ValidationError::NotAnObject { .. } => {
                "invalid_json"
            }
        }
    }

    pub fn is_encoding(&self) -> bool {
        matches!(self, ValidationError::Encoding { .. })
    }

    pub fn is_structure(&self) -> bool {
        !self.is_encoding()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// The payload failed validation; nothing was persisted.
    #[error(transparent)]
    Rejected(#[from] ValidationError),

    /// Validation passed but the store could not persist the record.
    #[error("failed to store webhook: {0}")]
    Storage(#[from] StoreError),
}

impl CaptureError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, CaptureError::Rejected(_))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("webhook {id} not found")]
    NotFound { id: WebhookId },

    #[error("failed to read webhooks: {0}")]
    Storage(#[from] StoreError),
}

impl RetrievalError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RetrievalError::NotFound { .. })
    }
}
