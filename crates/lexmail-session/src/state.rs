use lexmail_core::{AnalysisResult, ThemeMode};

use crate::DraftPair;

/// Side-by-side drafts from the last successful compare.
pub type CompareDrafts = DraftPair;

/// Everything the front-end renders. Owned by [`crate::Session`]; readers
/// get clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub email_text: String,
    pub contract_snippet: String,
    pub analysis: Option<AnalysisResult>,
    pub draft: String,
    pub risk_score: Option<u8>,
    pub compare: CompareDrafts,
    pub loading: bool,
    pub theme: ThemeMode,
}

impl AppState {
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }

    pub fn has_draft(&self) -> bool {
        !self.draft.is_empty()
    }
}
