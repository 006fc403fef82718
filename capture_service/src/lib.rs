pub mod error;
pub mod intake;
pub mod retrieval;
pub mod validator;

pub use crate::error::{CaptureError, RetrievalError, ValidationError};
pub use crate::intake::IntakePipeline;
pub use crate::retrieval::RetrievalService;
pub use crate::validator::{RawCapture, ValidatedCapture, Validator};
