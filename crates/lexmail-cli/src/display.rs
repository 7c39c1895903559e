//! Plain-text rendering of session state for the terminal.

use std::fmt::Write as _;

use lexmail_core::{AnalysisResult, HealthStatus, ModelInfo};
use lexmail_session::{AppState, CompareDrafts, Notice, NoticeLevel};

const EMPTY_SLOT: &str = "—";
const PREVIEW_CHARS: usize = 240;

pub fn render_analysis(analysis: Option<&AnalysisResult>) -> String {
    match analysis {
        Some(a) => a.to_pretty_json(),
        None => "No analysis yet.".to_string(),
    }
}

pub fn render_draft(draft: &str, risk_score: Option<u8>) -> String {
    if draft.is_empty() {
        return "No draft yet.".to_string();
    }
    match risk_score {
        Some(score) => format!("{draft}\n\n[risk score: {score}/100]"),
        None => draft.to_string(),
    }
}

pub fn render_compare(drafts: &CompareDrafts) -> String {
    let mut out = String::new();
    for (label, text) in [("Version A", &drafts.a), ("Version B", &drafts.b)] {
        let body = if text.is_empty() { EMPTY_SLOT } else { text.as_str() };
        let _ = writeln!(out, "── {label} ──");
        let _ = writeln!(out, "{body}");
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Summary card for `lexmail show`.
pub fn render_state(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Legal Email Assistant ===");
    let _ = writeln!(out, "theme: {}", state.theme);
    out.push('\n');

    section(&mut out, "Email Text", &preview(&state.email_text));
    section(&mut out, "Contract Clause", &preview(&state.contract_snippet));
    section(&mut out, "Analysis JSON", &render_analysis(state.analysis.as_ref()));
    section(&mut out, "Draft Preview", &render_draft(&state.draft, state.risk_score));
    out.trim_end().to_string()
}

pub fn render_notice(notice: &Notice) -> String {
    let mark = match notice.level {
        NoticeLevel::Success => "✓",
        NoticeLevel::Error => "✗",
    };
    format!("{mark} {}", notice.message)
}

pub fn render_models(info: &ModelInfo) -> String {
    let mut out = String::new();
    let current = info.current.as_deref().unwrap_or(EMPTY_SLOT);
    let _ = writeln!(out, "current: {current}");
    if info.candidates.is_empty() {
        let _ = writeln!(out, "candidates: (none)");
    } else {
        let _ = writeln!(out, "candidates:");
        for name in &info.candidates {
            let _ = writeln!(out, "  - {name}");
        }
    }
    out.trim_end().to_string()
}

pub fn render_health(base_url: &str, health: &HealthStatus) -> String {
    format!("{base_url}: {}", health.status)
}

fn section(out: &mut String, title: &str, body: &str) {
    let _ = writeln!(out, "── {title} ──");
    let _ = writeln!(out, "{body}");
    out.push('\n');
}

fn preview(text: &str) -> String {
    if text.trim().is_empty() {
        return "(empty)".to_string();
    }
    let total = text.chars().count();
    if total <= PREVIEW_CHARS {
        return text.to_string();
    }
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}… ({total} chars)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_results_have_placeholders() {
        assert_eq!(render_analysis(None), "No analysis yet.");
        assert_eq!(render_draft("", Some(10)), "No draft yet.");

        let rendered = render_compare(&CompareDrafts::default());
        assert!(rendered.contains("Version A"));
        assert_eq!(rendered.matches(EMPTY_SLOT).count(), 2);
    }

    #[test]
    fn analysis_is_pretty_json() {
        let serde_json::Value::Object(map) = json!({"risk": "low"}) else {
            unreachable!()
        };
        let rendered = render_analysis(Some(&AnalysisResult::new(map)));
        assert_eq!(rendered, "{\n  \"risk\": \"low\"\n}");
    }

    #[test]
    fn draft_shows_risk_score() {
        assert_eq!(render_draft("Dear...", None), "Dear...");
        assert!(render_draft("Dear...", Some(35)).ends_with("[risk score: 35/100]"));
    }

    #[test]
    fn long_text_is_truncated_on_char_boundary() {
        let text = "é".repeat(PREVIEW_CHARS + 5);
        let shown = preview(&text);
        assert!(shown.ends_with(&format!("({} chars)", PREVIEW_CHARS + 5)));
        assert!(shown.starts_with("éé"));
    }

    #[test]
    fn notice_marks_level() {
        assert_eq!(render_notice(&Notice::success("Analyzed")), "✓ Analyzed");
        assert_eq!(
            render_notice(&Notice::error("Compare failed")),
            "✗ Compare failed"
        );
    }

    #[test]
    fn state_card_lists_sections() {
        let state = AppState {
            email_text: "Hello Team".into(),
            ..AppState::default()
        };
        let card = render_state(&state);
        assert!(card.starts_with("=== Legal Email Assistant ==="));
        assert!(card.contains("theme: light"));
        assert!(card.contains("Hello Team"));
        assert!(card.contains("(empty)"));
        assert!(card.contains("No draft yet."));
    }
}
