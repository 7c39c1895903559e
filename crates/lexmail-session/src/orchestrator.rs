//! Builds request bodies from user input and runs them against the service.
//!
//! Every operation validates locally before touching the network. Results
//! are returned to the caller; nothing here holds UI state.

use lexmail_client::{AssistantApi, ClientError};
use lexmail_core::{
    AnalysisResult, AnalyzeRequest, DraftRequest, DraftResult, ProcessRequest, ProcessResult,
    ValidationError, Variant, validate_email_text,
};
use tracing::{info, warn};

use crate::{OrchestratorError, settle_all};

/// Drafts produced by one compare run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPair {
    pub a: String,
    pub b: String,
}

pub struct RequestOrchestrator<A> {
    api: A,
}

impl<A: AssistantApi> RequestOrchestrator<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Analyze an email, optionally against a contract clause.
    pub async fn analyze(
        &self,
        email_text: &str,
        contract_snippet: &str,
    ) -> Result<AnalysisResult, OrchestratorError> {
        let email_text = validate_email_text(email_text)?;
        let req = AnalyzeRequest {
            email_text: email_text.to_string(),
            contract_snippet: contract_snippet.to_string(),
        };
        Ok(self.api.analyze(&req).await?)
    }

    /// Draft a reply from an existing analysis.
    pub async fn draft_only(
        &self,
        email_text: &str,
        contract_snippet: &str,
        analysis: Option<&AnalysisResult>,
    ) -> Result<DraftResult, OrchestratorError> {
        let email_text = validate_email_text(email_text)?;
        let analysis = analysis.ok_or(ValidationError::MissingAnalysis)?;
        let req = DraftRequest {
            email_text: email_text.to_string(),
            analysis: Some(analysis.clone()),
            contract_snippet: contract_snippet.to_string(),
            variant: None,
        };
        Ok(self.api.draft(&req).await?)
    }

    /// Analyze and draft in one round trip.
    pub async fn process_all(
        &self,
        email_text: &str,
        contract_snippet: &str,
    ) -> Result<ProcessResult, OrchestratorError> {
        let email_text = validate_email_text(email_text)?;
        let req = ProcessRequest {
            email_text: email_text.to_string(),
            contract_snippet: contract_snippet.to_string(),
        };
        Ok(self.api.process(&req).await?)
    }

    /// Request variant A and variant B drafts concurrently.
    ///
    /// Both requests settle before anything is returned. A slot that fails
    /// without a JSON body fails the whole comparison.
    pub async fn compare(
        &self,
        email_text: &str,
        contract_snippet: &str,
        analysis: Option<&AnalysisResult>,
    ) -> Result<DraftPair, OrchestratorError> {
        let email_text = validate_email_text(email_text)?;
        let requests: Vec<DraftRequest> = Variant::ALL
            .iter()
            .map(|&variant| DraftRequest {
                email_text: email_text.to_string(),
                analysis: analysis.cloned(),
                contract_snippet: contract_snippet.to_string(),
                variant: Some(variant),
            })
            .collect();

        info!(variants = requests.len(), "dispatching compare drafts");
        let settled = settle_all(requests.iter().map(|req| self.api.draft(req))).await;

        let mut drafts = Variant::ALL
            .iter()
            .zip(settled)
            .map(|(&variant, outcome)| compare_slot(variant, outcome));
        let a = drafts.next().unwrap_or(Ok(String::new()))?;
        let b = drafts.next().unwrap_or(Ok(String::new()))?;
        Ok(DraftPair { a, b })
    }
}

// A failure status whose body is still a JSON object is read like a reply
// without a draft.
fn compare_slot(
    variant: Variant,
    outcome: Result<DraftResult, ClientError>,
) -> Result<String, OrchestratorError> {
    match outcome {
        Ok(result) => Ok(result.draft),
        Err(ClientError::Server { status, body, .. }) => {
            match serde_json::from_str::<DraftResult>(&body) {
                Ok(result) => {
                    warn!(%variant, status, "compare slot failed with JSON body, using its draft field");
                    Ok(result.draft)
                }
                Err(e) => Err(OrchestratorError::Transport(format!(
                    "variant {variant}: status {status}: {e}"
                ))),
            }
        }
        Err(other) => Err(other.into()),
    }
}
