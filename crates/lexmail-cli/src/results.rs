//! Last analysis and draft, kept next to the preference file so that a later
//! `lexmail draft` or `lexmail export` can pick up where `analyze` left off.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lexmail_core::AnalysisResult;
use lexmail_session::AppState;
use tracing::debug;

const ANALYSIS_FILE: &str = "analysis.json";
const DRAFT_FILE: &str = "draft.txt";

pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_analysis(&self) -> anyhow::Result<Option<AnalysisResult>> {
        let path = self.dir.join(ANALYSIS_FILE);
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let analysis = serde_json::from_str(&raw)
                    .with_context(|| format!("parsing {}", path.display()))?;
                Ok(Some(analysis))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    pub fn load_draft(&self) -> anyhow::Result<String> {
        let path = self.dir.join(DRAFT_FILE);
        match std::fs::read_to_string(&path) {
            Ok(draft) => Ok(draft),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Write the analysis and draft held in `state`.
    pub fn save(&self, state: &AppState) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;

        if let Some(analysis) = &state.analysis {
            write(&self.dir.join(ANALYSIS_FILE), &analysis.to_pretty_json())?;
        }
        if state.has_draft() {
            write(&self.dir.join(DRAFT_FILE), &state.draft)?;
        }
        Ok(())
    }
}

fn write(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), "result saved");
    Ok(())
}

/// Write `draft` as UTF-8 text to `out`.
pub fn export_txt(draft: &str, out: &Path) -> anyhow::Result<()> {
    anyhow::ensure!(!draft.is_empty(), "no draft to export; run `lexmail draft` or `lexmail process` first");
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    write(out, draft)
}
