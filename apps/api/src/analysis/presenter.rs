//! Presentation Adapter: maps a parse outcome into display-ready fields.

use serde::Serialize;

use crate::analysis::parser::{AnalysisResult, MalformedResponse, SCORE_NOT_AVAILABLE};

pub const NO_MISSING_KEYWORDS: &str = "No missing keywords. Your resume covers the key terms.";
pub const NO_SUGGESTIONS: &str = "No suggestions. Your resume looks well aligned.";
pub const RAW_RESPONSE_WARNING: &str =
    "The analysis could not be read as structured data. Showing the raw model response instead.";

/// A list section: either items to show, or an explicit affirmation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ListView {
    Items(Vec<String>),
    Empty(&'static str),
}

impl ListView {
    fn from_items(items: Vec<String>, empty_message: &'static str) -> Self {
        if items.is_empty() {
            ListView::Empty(empty_message)
        } else {
            ListView::Items(items)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    /// Always "<number>/10" or "N/A".
    pub score: String,
    /// Rendered as tags.
    pub missing_keywords: ListView,
    /// Rendered as bullets.
    pub suggestions: ListView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderedAnalysis {
    Report(ReportView),
    Raw { warning: &'static str, raw: String },
}

pub fn render(outcome: Result<AnalysisResult, MalformedResponse>) -> RenderedAnalysis {
    match outcome {
        Ok(result) => RenderedAnalysis::Report(ReportView {
            score: normalize_score(&result.relevance_score),
            missing_keywords: ListView::from_items(result.missing_keywords, NO_MISSING_KEYWORDS),
            suggestions: ListView::from_items(result.suggestions, NO_SUGGESTIONS),
        }),
        Err(malformed) => RenderedAnalysis::Raw {
            warning: RAW_RESPONSE_WARNING,
            raw: malformed.raw,
        },
    }
}

/// Strips one trailing "/10" or "out of 10" (whitespace tolerant, any case)
/// and re-appends "/10".
pub fn normalize_score(raw: &str) -> String {
    let bare = strip_out_of_ten(raw.trim());
    if bare.is_empty() || bare.eq_ignore_ascii_case(SCORE_NOT_AVAILABLE) {
        return SCORE_NOT_AVAILABLE.to_string();
    }
    format!("{bare}/10")
}

fn strip_out_of_ten(score: &str) -> &str {
    const OUT_OF: &str = "out of";

    let Some(rest) = score.strip_suffix("10").map(str::trim_end) else {
        return score;
    };
    if let Some(head) = rest.strip_suffix('/') {
        return head.trim_end();
    }
    // ASCII lowercasing keeps byte offsets, so the cut is on a char boundary.
    if rest.to_ascii_lowercase().ends_with(OUT_OF) {
        let head = &rest[..rest.len() - OUT_OF.len()];
        if head.is_empty() || head.ends_with(char::is_whitespace) {
            return head.trim_end();
        }
    }
    score
}
