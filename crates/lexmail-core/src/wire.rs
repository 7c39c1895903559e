//! Request and response bodies exchanged with the analysis/drafting service.
//!
//! Field names follow the service's snake_case JSON. Response types are
//! lenient: the service may grow fields without breaking the client.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Structured analysis of an email, as returned by `/api/analyze`.
///
/// Kept as an open JSON object. The client only cares whether one exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indented JSON, as shown in the analysis panel.
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| "{}".to_string())
    }
}

impl From<Map<String, Value>> for AnalysisResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Draft variant label used when comparing two generated replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::A, Variant::B];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub email_text: String,
    pub contract_snippet: String,
}

/// Body of `POST /api/draft`.
///
/// `analysis` is sent as `null` when absent; `variant` is left out entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub email_text: String,
    pub analysis: Option<AnalysisResult>,
    pub contract_snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

/// Body of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub email_text: String,
    pub contract_snippet: String,
}

/// Reply of `POST /api/draft`. A missing or non-string `draft` decodes as
/// an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftResult {
    #[serde(default, deserialize_with = "lenient_text")]
    pub draft: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub risk_score: Option<u8>,
}

/// Reply of `POST /api/process`: analysis and draft from one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub analysis: AnalysisResult,
    pub draft: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub risk_score: Option<u8>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

// Scores outside 0..=255 or non-integral ones are dropped, not rejected.
fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    Ok(Value::deserialize(deserializer)?
        .as_u64()
        .and_then(|n| u8::try_from(n).ok()))
}

/// Reply of `GET /api/models`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub candidates: Vec<String>,
    #[serde(default)]
    pub current: Option<String>,
}

/// Reply of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_request_sends_null_analysis_and_omits_variant() {
        let req = DraftRequest {
            email_text: "Hi".into(),
            analysis: None,
            contract_snippet: String::new(),
            variant: None,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"email_text": "Hi", "analysis": null, "contract_snippet": ""})
        );
    }

    #[test]
    fn draft_request_carries_variant_label() {
        let req = DraftRequest {
            email_text: "Hi".into(),
            analysis: Some(AnalysisResult::default()),
            contract_snippet: "Clause 9.1".into(),
            variant: Some(Variant::B),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["variant"], "B");
        assert_eq!(value["analysis"], json!({}));
    }

    #[test]
    fn analysis_keeps_unknown_fields() {
        let json = r#"{"risk":"low","parties":{"client":"Buyer"},"x_new":[1,2]}"#;
        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.get("risk"), Some(&json!("low")));
        assert_eq!(analysis.get("x_new"), Some(&json!([1, 2])));
        assert_eq!(serde_json::to_value(&analysis).unwrap()["parties"]["client"], "Buyer");
    }

    #[test]
    fn analysis_rejects_non_object() {
        assert!(serde_json::from_str::<AnalysisResult>("[1,2]").is_err());
    }

    #[test]
    fn draft_result_defaults_missing_draft() {
        let parsed: DraftResult = serde_json::from_str(r#"{"detail":"oops"}"#).unwrap();
        assert_eq!(parsed.draft, "");
        assert!(parsed.risk_score.is_none());
    }

    #[test]
    fn draft_result_tolerates_null_and_odd_fields() {
        let parsed: DraftResult =
            serde_json::from_str(r#"{"draft":null,"detail":"x","risk_score":"high"}"#).unwrap();
        assert_eq!(parsed, DraftResult::default());

        let parsed: DraftResult =
            serde_json::from_str(r#"{"draft":"Dear..","risk_score":42.5}"#).unwrap();
        assert_eq!(parsed.draft, "Dear..");
        assert!(parsed.risk_score.is_none());

        let parsed: DraftResult =
            serde_json::from_str(r#"{"draft":"Dear..","risk_score":900}"#).unwrap();
        assert!(parsed.risk_score.is_none());
    }

    #[test]
    fn process_result_ignores_unreadable_score() {
        let parsed: ProcessResult =
            serde_json::from_str(r#"{"analysis":{},"draft":"Dear..","risk_score":-3}"#).unwrap();
        assert_eq!(parsed.draft, "Dear..");
        assert!(parsed.risk_score.is_none());
    }

    #[test]
    fn process_result_requires_both_halves() {
        assert!(serde_json::from_str::<ProcessResult>(r#"{"draft":"Dear..."}"#).is_err());
        assert!(serde_json::from_str::<ProcessResult>(r#"{"analysis":{}}"#).is_err());

        let parsed: ProcessResult =
            serde_json::from_str(r#"{"analysis":{"intent":"approval"},"draft":"Dear...","risk_score":40}"#)
                .unwrap();
        assert_eq!(parsed.draft, "Dear...");
        assert_eq!(parsed.risk_score, Some(40));
        assert_eq!(parsed.analysis.get("intent"), Some(&json!("approval")));
    }

    #[test]
    fn model_info_tolerates_empty_object() {
        let parsed: ModelInfo = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
        assert!(parsed.current.is_none());
    }
}
