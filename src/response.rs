use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

/// The envelope the backend wraps payloads in. Not every endpoint uses it,
/// so decoding always goes through [`peel_envelope`] instead of this type
/// directly; it exists for the places that need `message` or `meta`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

/// Reduce a response body to its payload. Enveloped bodies yield their
/// `data` field; anything else passes through unchanged.
pub fn peel_envelope(body: Value) -> Value {
    match body {
        Value::Object(ref map) if map.contains_key("message") && map.contains_key("data") => {
            map.get("data").cloned().unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Total count carried in envelope meta, when present.
pub fn meta_total(body: &Value) -> Option<i64> {
    body.get("meta")?.get("total")?.as_i64()
}

/// Server-provided error message from a failure body, falling back to the
/// transport-level description.
pub fn error_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| fallback.to_owned())
}
