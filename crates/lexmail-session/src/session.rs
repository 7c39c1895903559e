//! The single owner of front-end state.
//!
//! Renderers receive [`AppState`] snapshots; every change goes through a
//! `Session` method. Request methods never fail: each outcome is folded into
//! state (on success) and reported as a [`Notice`].

use lexmail_client::AssistantApi;
use lexmail_core::samples::{SAMPLE_CONTRACT, SAMPLE_EMAIL};
use lexmail_core::{AnalysisResult, ThemeMode};
use lexmail_store::{KEY_CONTRACT_SNIPPET, KEY_EMAIL_TEXT, PrefStore, StoreError};
use tracing::{debug, error};

use crate::{AppState, Notice, OrchestratorError, RequestOrchestrator};

pub struct Session<A> {
    orchestrator: RequestOrchestrator<A>,
    prefs: PrefStore,
    state: AppState,
}

impl<A: AssistantApi> Session<A> {
    /// Start a session, restoring the persisted text fields and theme.
    pub fn open(api: A, prefs: PrefStore) -> Self {
        let state = AppState {
            email_text: prefs.get(KEY_EMAIL_TEXT).unwrap_or_default().to_string(),
            contract_snippet: prefs
                .get(KEY_CONTRACT_SNIPPET)
                .unwrap_or_default()
                .to_string(),
            theme: prefs.theme(),
            ..AppState::default()
        };
        debug!(
            email_chars = state.email_text.len(),
            contract_chars = state.contract_snippet.len(),
            theme = %state.theme,
            "session opened"
        );
        Self {
            orchestrator: RequestOrchestrator::new(api),
            prefs,
            state,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn snapshot(&self) -> AppState {
        self.state.clone()
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator<A> {
        &self.orchestrator
    }

    /// Label for the busy indicator.
    pub fn loading_label(&self) -> &'static str {
        if self.state.has_analysis() {
            "Generating draft…"
        } else {
            "Analyzing…"
        }
    }

    /// Seed results carried over from an earlier run.
    pub fn restore(&mut self, analysis: Option<AnalysisResult>, draft: String) {
        self.state.analysis = analysis;
        self.state.draft = draft;
    }

    pub fn set_email_text(&mut self, text: impl Into<String>) -> Result<(), StoreError> {
        self.state.email_text = text.into();
        self.prefs.set(KEY_EMAIL_TEXT, &self.state.email_text)
    }

    pub fn set_contract_snippet(&mut self, text: impl Into<String>) -> Result<(), StoreError> {
        self.state.contract_snippet = text.into();
        self.prefs
            .set(KEY_CONTRACT_SNIPPET, &self.state.contract_snippet)
    }

    pub fn load_sample_email(&mut self) -> Result<(), StoreError> {
        self.set_email_text(SAMPLE_EMAIL)
    }

    pub fn load_sample_contract(&mut self) -> Result<(), StoreError> {
        self.set_contract_snippet(SAMPLE_CONTRACT)
    }

    pub fn set_theme(&mut self, mode: ThemeMode) -> Result<(), StoreError> {
        self.state.theme = mode;
        self.prefs.set_theme(mode)
    }

    pub fn toggle_theme(&mut self) -> Result<ThemeMode, StoreError> {
        let next = self.state.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub async fn analyze(&mut self) -> Notice {
        self.state.loading = true;
        let outcome = self
            .orchestrator
            .analyze(&self.state.email_text, &self.state.contract_snippet)
            .await;
        self.state.loading = false;

        match outcome {
            Ok(analysis) => {
                self.state.analysis = Some(analysis);
                Notice::success("Analyzed")
            }
            Err(e) => failure("analyze", "Analysis failed", e),
        }
    }

    pub async fn draft_only(&mut self) -> Notice {
        self.state.loading = true;
        let outcome = self
            .orchestrator
            .draft_only(
                &self.state.email_text,
                &self.state.contract_snippet,
                self.state.analysis.as_ref(),
            )
            .await;
        self.state.loading = false;

        match outcome {
            Ok(result) => {
                self.state.draft = result.draft;
                self.state.risk_score = result.risk_score;
                Notice::success("Draft generated")
            }
            Err(e) => failure("draft", "Draft failed", e),
        }
    }

    pub async fn process_all(&mut self) -> Notice {
        self.state.loading = true;
        let outcome = self
            .orchestrator
            .process_all(&self.state.email_text, &self.state.contract_snippet)
            .await;
        self.state.loading = false;

        match outcome {
            Ok(result) => {
                self.state.analysis = Some(result.analysis);
                self.state.draft = result.draft;
                self.state.risk_score = result.risk_score;
                Notice::success("Analysis + Draft ready")
            }
            Err(e) => failure("process", "Processing failed", e),
        }
    }

    pub async fn compare(&mut self) -> Notice {
        self.state.loading = true;
        let outcome = self
            .orchestrator
            .compare(
                &self.state.email_text,
                &self.state.contract_snippet,
                self.state.analysis.as_ref(),
            )
            .await;
        self.state.loading = false;

        match outcome {
            Ok(pair) => {
                self.state.compare = pair;
                Notice::success("Drafts compared")
            }
            Err(e) => failure("compare", "Compare failed", e),
        }
    }
}

fn failure(op: &str, fallback: &str, err: OrchestratorError) -> Notice {
    match &err {
        OrchestratorError::Validation(v) => {
            debug!(op, reason = %v, "request blocked");
            Notice::error(v.to_string())
        }
        OrchestratorError::Http { status, message } => {
            error!(op, status, message = %message, "request failed");
            if message.as_str().trim().is_empty() {
                Notice::error(fallback)
            } else {
                Notice::error(message.to_string())
            }
        }
        OrchestratorError::Transport(detail) => {
            error!(op, error = %detail, "request failed");
            Notice::error(fallback)
        }
    }
}
