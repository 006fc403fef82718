//! The validation gate: UTF-8 first, then JSON syntax.
//!
//! Numbers keep their decimal text, so no well-formed literal is out of range.
//! Nesting deeper than 127 arrays/objects is rejected as a structure error;
//! stored bodies are decoded by the same parser, so anything accepted here
//! can always be read back.
//!
//! Header and query pairs are folded into maps here as well. When a name
//! repeats, the last occurrence wins.

use serde_json::Value;

use shared_lib::webhook_structs::FieldMap;

use crate::error::ValidationError;

/// Raw request data as it arrived, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCapture {
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
    pub query_params: Vec<(String, String)>,
}

impl RawCapture {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        RawCapture {
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }
}

/// A capture that passed the gate, ready to become a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCapture {
    pub body: Value,
    pub headers: FieldMap,
    pub query_params: FieldMap,
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    require_object: bool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also reject well-formed JSON whose top level is not an object.
    pub fn require_object(mut self, require: bool) -> Self {
        self.require_object = require;
        self
    }

    pub fn validate(&self, capture: RawCapture) -> Result<ValidatedCapture, ValidationError> {
        let body = self.validate_body(&capture.body)?;

        Ok(ValidatedCapture {
            body,
            headers: normalize_headers(capture.headers),
            query_params: normalize_query_params(capture.query_params),
        })
    }

    pub fn validate_body(&self, raw: &[u8]) -> Result<Value, ValidationError> {
        let text = std::str::from_utf8(raw).map_err(|err| ValidationError::Encoding {
            valid_up_to: err.valid_up_to(),
        })?;

        let body: Value = serde_json::from_str(text).map_err(|err| ValidationError::Structure {
            line: err.line(),
            column: err.column(),
            reason: err.to_string(),
        })?;

        if self.require_object && !body.is_object() {
            return Err(ValidationError::NotAnObject {
                kind: json_kind(&body),
            });
        }

        Ok(body)
    }
}

/// Header names are case-insensitive, so they are stored lower-cased.
pub fn normalize_headers<I>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (String, String)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect()
}

pub fn normalize_query_params<I>(pairs: I) -> FieldMap
where
    I: IntoIterator<Item = (String, String)>,
{
    // collecting into a map keeps the last value for a repeated key
    pairs.into_iter().collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
