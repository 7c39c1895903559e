//! Decoding of failure bodies returned by the service.
//!
//! The service reports errors as `{"detail": ...}`, but proxies and crashes
//! can produce plain text. Decoding is two explicit steps: the structured
//! envelope first, then the raw body.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Value,
}

/// Human-readable message extracted from a failure response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// Taken from the `detail` field of a JSON error envelope.
    Detail(String),
    /// The body as received, because it was not a usable envelope.
    Raw(String),
}

impl ServerMessage {
    pub fn decode(body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => match detail_text(envelope.detail) {
                Some(detail) => Self::Detail(detail),
                None => Self::Raw(body.to_string()),
            },
            Err(_) => Self::Raw(body.to_string()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Detail(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Detail(s) | Self::Raw(s) => s,
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Validation errors carry a list of objects under `detail`; keep them as
// compact JSON rather than dropping them.
fn detail_text(detail: Value) -> Option<String> {
    match detail {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Array(ref items) if items.is_empty() => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        let msg = ServerMessage::decode(r#"{"detail":"invalid email"}"#);
        assert_eq!(msg, ServerMessage::Detail("invalid email".into()));
        assert_eq!(msg.to_string(), "invalid email");
        assert!(msg.is_structured());
    }

    #[test]
    fn plain_text_falls_back_to_raw() {
        let msg = ServerMessage::decode("Internal Server Error");
        assert_eq!(msg, ServerMessage::Raw("Internal Server Error".into()));
        assert!(!msg.is_structured());
    }

    #[test]
    fn json_without_detail_falls_back_to_raw_body() {
        let body = r#"{"error":"boom"}"#;
        assert_eq!(ServerMessage::decode(body), ServerMessage::Raw(body.into()));
    }

    #[test]
    fn empty_detail_falls_back_to_raw_body() {
        let body = r#"{"detail":""}"#;
        assert_eq!(ServerMessage::decode(body), ServerMessage::Raw(body.into()));
    }

    #[test]
    fn non_object_json_falls_back_to_raw() {
        assert_eq!(ServerMessage::decode("[]"), ServerMessage::Raw("[]".into()));
        assert_eq!(ServerMessage::decode(""), ServerMessage::Raw(String::new()));
    }

    #[test]
    fn validation_list_is_rendered_as_json() {
        let body = r#"{"detail":[{"loc":["body","email_text"],"msg":"field required"}]}"#;
        let msg = ServerMessage::decode(body);
        assert!(msg.is_structured());
        assert!(msg.as_str().contains("field required"));
    }
}
