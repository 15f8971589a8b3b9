//! Highlight triple and detail records persisted per report.

use serde::Deserialize;
use serde::Serialize;

/// The three decision-oriented phrases summarizing a report.
///
/// Every field is guaranteed non-empty: the synthesis pipeline substitutes a
/// fixed default for any phrase it cannot derive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightTriple {
    pub most_important: String,
    pub top_issue: String,
    pub opportunity: String,
}

/// Supporting detail for one highlight phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightDetail {
    /// One sentence stating the underlying fact, with numbers when known.
    pub fact: String,
    /// 2-3 likely causes.
    pub causes: Vec<String>,
    /// 2-3 concrete next actions.
    pub actions: Vec<String>,
}

/// Detail blocks for all three triple slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleDetail {
    pub most_important: HighlightDetail,
    pub top_issue: HighlightDetail,
    pub opportunity: HighlightDetail,
}

/// The persisted unit, immutable once written for a given report identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub triple: HighlightTriple,
    pub detail: TripleDetail,
}
