//! Phrase contexts and the per-context rule table.
//!
//! Each of the three highlight slots is derived under one context. All
//! context-dependent behavior (keyword list, output style, length limit,
//! default phrase) is dispatched through [`ContextRules`] so adding a
//! context or changing one context's rules stays a local change.

use crate::keywords;

/// Output style of a finalized phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseStyle {
    /// Bare-noun form, e.g. "セッション数の増加".
    Fact,
    /// Short sentence form, e.g. "訪問数が伸び悩んでおり、改善が必要です".
    Sentence,
}

/// Derivation context for one highlight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseContext {
    /// Most important result: positive site-wide movement.
    SiteWide,
    /// Top issue: negative movement or unrealized outcome.
    Issue,
    /// Improvement opportunity: a concrete next action.
    Action,
}

/// Rule set for one context.
#[derive(Debug)]
pub struct ContextRules {
    pub keywords: &'static [&'static str],
    /// Unioned in when the client runs in simplified-vocabulary mode.
    pub simplified_keywords: &'static [&'static str],
    pub style: PhraseStyle,
    pub max_chars: usize,
    pub default_standard: &'static str,
    pub default_simplified: &'static str,
}

/// Upper bound for fact-style phrases, in chars.
pub const FACT_MAX_CHARS: usize = 22;
/// Upper bound for sentence-style phrases, in chars.
pub const SENTENCE_MAX_CHARS: usize = 40;

static SITE_WIDE_RULES: ContextRules = ContextRules {
    keywords: keywords::SITE_WIDE,
    simplified_keywords: keywords::SITE_WIDE_SIMPLIFIED,
    style: PhraseStyle::Fact,
    max_chars: FACT_MAX_CHARS,
    default_standard: "アクセス状況の維持",
    default_simplified: "サイトの調子は安定",
};

static ISSUE_RULES: ContextRules = ContextRules {
    keywords: keywords::ISSUE,
    simplified_keywords: keywords::ISSUE_SIMPLIFIED,
    style: PhraseStyle::Sentence,
    max_chars: SENTENCE_MAX_CHARS,
    default_standard: "大きな課題は見られませんでした",
    default_simplified: "大きな問題はありませんでした",
};

static ACTION_RULES: ContextRules = ContextRules {
    keywords: keywords::ACTION,
    simplified_keywords: keywords::ACTION_SIMPLIFIED,
    style: PhraseStyle::Fact,
    max_chars: FACT_MAX_CHARS,
    default_standard: "コンテンツの継続的な改善",
    default_simplified: "お知らせ記事の追加",
};

impl PhraseContext {
    pub fn rules(&self) -> &'static ContextRules {
        match self {
            PhraseContext::SiteWide => &SITE_WIDE_RULES,
            PhraseContext::Issue => &ISSUE_RULES,
            PhraseContext::Action => &ACTION_RULES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fit_within_context_limits() {
        for ctx in [
            PhraseContext::SiteWide,
            PhraseContext::Issue,
            PhraseContext::Action,
        ] {
            let rules = ctx.rules();
            assert!(rules.default_standard.chars().count() <= rules.max_chars);
            assert!(rules.default_simplified.chars().count() <= rules.max_chars);
        }
    }

    #[test]
    fn issue_context_is_sentence_style() {
        assert_eq!(PhraseContext::Issue.rules().style, PhraseStyle::Sentence);
        assert_eq!(PhraseContext::SiteWide.rules().style, PhraseStyle::Fact);
    }
}
