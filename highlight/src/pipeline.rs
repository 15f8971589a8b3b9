//! The highlight synthesis pipeline.
//!
//! Stage A derives one phrase per context from the document text. Stage B
//! rewrites the top issue when it would restate the most-important phrase's
//! metric. Stage C replaces an abstract opportunity with an action derived
//! from the top issue. Defaults guarantee three non-empty phrases.

use mieru_protocol::HighlightTriple;
use mieru_protocol::MetricBreakdownEntry;
use mieru_protocol::ReportMode;
use mieru_protocol::ReportSections;
use mieru_protocol::TargetArea;
use mieru_protocol::TripleDetail;
use tracing::debug;
use tracing::warn;

use crate::action;
use crate::bottleneck;
use crate::context::PhraseContext;
use crate::detail;
use crate::dict;
use crate::finalize;
use crate::normalize;
use crate::phrase;
use crate::phrase::PhraseOutcome;

/// Deterministic synthesizer for one client mode.
///
/// Pure given its inputs: the same document, mode and target area always
/// produce the same triple, which is what makes lazy backfill safe.
#[derive(Debug, Clone, Copy)]
pub struct HighlightSynthesizer {
    mode: ReportMode,
}

struct SlotResult {
    text: String,
    metric: Option<&'static str>,
}

impl HighlightSynthesizer {
    pub fn new(mode: ReportMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Compress a generated report document into the highlight triple.
    pub fn synthesize(&self, document: &str, target_area: Option<&TargetArea>) -> HighlightTriple {
        let normalized = normalize::normalize_fragment(document);
        let sentences = normalize::split_sentences(&normalized);

        let most_important =
            self.derive_slot(&sentences, PhraseContext::SiteWide, target_area);
        let mut top_issue = self.derive_slot(&sentences, PhraseContext::Issue, None);
        let mut opportunity = self.derive_slot(&sentences, PhraseContext::Action, None);

        // Stage B: the top issue must not restate the most-important metric.
        if let Some(metric) = self.overlapping_metric(&most_important, &top_issue) {
            debug!(metric, "top issue restates most-important metric, rewriting");
            let rewritten = finalize::finalize(
                &bottleneck::build(metric, Some("減少")),
                PhraseContext::Issue,
            );
            if !rewritten.is_empty() {
                top_issue = SlotResult {
                    text: rewritten,
                    metric: Some(metric),
                };
            }
        }

        // Stage C: an empty or abstract opportunity is replaced by an action
        // derived from the top issue.
        if opportunity.text.is_empty() || dict::is_abstract_standalone(&opportunity.text) {
            if let Some(derived) = action::derive(&top_issue.text, self.mode) {
                let finalized = finalize::finalize(&derived, PhraseContext::Action);
                if !finalized.is_empty() {
                    opportunity = SlotResult {
                        text: finalized,
                        metric: opportunity.metric,
                    };
                }
            }
        }

        HighlightTriple {
            most_important: self.or_default(most_important.text, PhraseContext::SiteWide),
            top_issue: self.or_default(top_issue.text, PhraseContext::Issue),
            opportunity: self.or_default(opportunity.text, PhraseContext::Action),
        }
    }

    /// Build the fact/causes/actions detail block for each triple slot.
    pub fn detail(
        &self,
        triple: &HighlightTriple,
        breakdown: &[MetricBreakdownEntry],
        sections: &ReportSections,
    ) -> TripleDetail {
        detail::build_detail(triple, breakdown, sections, self.mode)
    }

    fn derive_slot(
        &self,
        sentences: &[String],
        ctx: PhraseContext,
        target_area: Option<&TargetArea>,
    ) -> SlotResult {
        let selected = self.select_sentence(sentences, ctx, target_area);
        let Some(sentence) = selected else {
            return SlotResult {
                text: String::new(),
                metric: None,
            };
        };

        let PhraseOutcome { text, metric } = phrase::build_phrase(sentence, ctx, self.mode);
        SlotResult {
            text: finalize::finalize(&text, ctx),
            metric,
        }
    }

    /// First sentence containing any context keyword, in sentence order.
    /// Sentences mentioning the target area win ties for the site-wide slot.
    /// Falls back to the first sentence when nothing matches.
    fn select_sentence<'a>(
        &self,
        sentences: &'a [String],
        ctx: PhraseContext,
        target_area: Option<&TargetArea>,
    ) -> Option<&'a str> {
        let rules = ctx.rules();
        let matches_keywords = |sentence: &str| {
            rules.keywords.iter().any(|k| sentence.contains(k))
                || (self.mode.is_simplified()
                    && rules.simplified_keywords.iter().any(|k| sentence.contains(k)))
        };

        if let Some(area) = target_area {
            if let Some(hit) = sentences
                .iter()
                .find(|s| s.contains(&area.name) && matches_keywords(s))
            {
                return Some(hit.as_str());
            }
        }

        sentences
            .iter()
            .find(|s| matches_keywords(s))
            .or_else(|| sentences.first())
            .map(String::as_str)
    }

    /// Canonical metric shared by both phrases, if any.
    ///
    /// Every issue phrase the derivation step can produce is a relational
    /// bottleneck sentence, which never restates the fact-style phrase, so
    /// those are left alone (rebuilding one is a fixed point). The metric
    /// comparison catches any derivation change that starts yielding bare
    /// fact-style issue phrases.
    fn overlapping_metric(
        &self,
        most_important: &SlotResult,
        top_issue: &SlotResult,
    ) -> Option<&'static str> {
        if top_issue.text.is_empty() || is_relational(&top_issue.text) {
            return None;
        }

        let metric = most_important.metric?;
        (top_issue.metric == Some(metric)).then_some(metric)
    }

    fn or_default(&self, text: String, ctx: PhraseContext) -> String {
        if !text.is_empty() {
            return text;
        }
        let rules = ctx.rules();
        let default = if self.mode.is_simplified() {
            rules.default_simplified
        } else {
            rules.default_standard
        };
        warn!(context = ?ctx, default, "phrase fell back to default");
        default.to_string()
    }
}

/// Whether a phrase is already a relational bottleneck sentence rather than
/// a bare "metric + change" fact.
fn is_relational(text: &str) -> bool {
    text.contains('、') || text.ends_with("です") || text.ends_with("ません")
}
