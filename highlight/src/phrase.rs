//! Noun-phrase construction from a selected candidate sentence.

use mieru_protocol::ReportMode;

use crate::bottleneck;
use crate::context::PhraseContext;
use crate::dict;

/// Result of phrase construction. `text` may be empty (caller falls back);
/// `metric` carries the canonical metric for overlap resolution.
#[derive(Debug, Clone, Default)]
pub struct PhraseOutcome {
    pub text: String,
    pub metric: Option<&'static str>,
}

impl PhraseOutcome {
    fn empty() -> Self {
        Self::default()
    }

    fn new(text: String, metric: Option<&'static str>) -> Self {
        Self { text, metric }
    }
}

/// Convert one selected sentence into a canonical phrase for a context.
///
/// Under simplified mode the colloquial dictionaries are tried first; on a
/// miss the standard path runs unchanged.
pub fn build_phrase(sentence: &str, ctx: PhraseContext, mode: ReportMode) -> PhraseOutcome {
    if mode.is_simplified() {
        let outcome = simplified_phrase(sentence, ctx);
        if !outcome.text.is_empty() {
            return outcome;
        }
    }

    standard_phrase(sentence, ctx)
}

fn standard_phrase(sentence: &str, ctx: PhraseContext) -> PhraseOutcome {
    let (stripped, gloss) = split_bracket_gloss(sentence);

    // A short bracket gloss names the metric more reliably than the prose.
    let metric = gloss
        .as_deref()
        .and_then(dict::lookup_metric)
        .or_else(|| dict::lookup_metric(&stripped));
    let change = dict::normalize_change(&stripped);

    match ctx {
        PhraseContext::SiteWide => match (metric, change) {
            (Some(m), Some(c)) => PhraseOutcome::new(format!("{m}の{c}"), Some(m)),
            (Some(m), None) => PhraseOutcome::new(m.to_string(), Some(m)),
            (None, Some(c)) => PhraseOutcome::new(format!("アクセス数の{c}"), Some("セッション数")),
            (None, None) => PhraseOutcome::empty(),
        },
        PhraseContext::Issue => match metric {
            Some(m) => PhraseOutcome::new(bottleneck::build(m, change), Some(m)),
            None => PhraseOutcome::empty(),
        },
        PhraseContext::Action => match dict::lookup_action(&stripped) {
            // Abstract category names are rejected here so the pipeline can
            // derive something concrete from the top issue instead.
            Some(action) if !action.abstract_standalone => {
                PhraseOutcome::new(action.canonical.to_string(), metric)
            }
            _ => PhraseOutcome::empty(),
        },
    }
}

fn simplified_phrase(sentence: &str, ctx: PhraseContext) -> PhraseOutcome {
    let metric = dict::SIMPLIFIED_METRIC_DICT
        .iter()
        .find(|(pattern, _, _)| sentence.contains(pattern));
    let change = dict::SIMPLIFIED_CHANGE_DICT
        .iter()
        .find(|(pattern, _)| sentence.contains(pattern))
        .map(|(_, canonical)| *canonical);

    match ctx {
        PhraseContext::SiteWide => match (metric, change) {
            (Some((_, display, canonical)), Some(c)) => PhraseOutcome::new(
                format!("{display}の{}", dict::simplified_change_display(c)),
                Some(canonical),
            ),
            _ => PhraseOutcome::empty(),
        },
        PhraseContext::Issue => match (metric, change) {
            (Some((_, display, canonical)), Some(c)) if dict::is_negative_change(c) => {
                PhraseOutcome::new(
                    format!("{display}が減っており、見直しが必要です"),
                    Some(canonical),
                )
            }
            _ => PhraseOutcome::empty(),
        },
        PhraseContext::Action => dict::SIMPLIFIED_MICRO_ACTIONS
            .iter()
            .find(|(trigger, _)| sentence.contains(trigger))
            .map(|(_, action)| PhraseOutcome::new(action.to_string(), None))
            .unwrap_or_else(PhraseOutcome::empty),
    }
}

/// Remove short （...） glosses from the sentence, returning the first gloss
/// content as a metric hint. Long parentheticals are already gone after
/// normalization.
fn split_bracket_gloss(sentence: &str) -> (String, Option<String>) {
    let mut out = String::with_capacity(sentence.len());
    let mut hint: Option<String> = None;
    let mut rest = sentence;

    while let Some(start) = rest.find(['（', '(']) {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);
        let open_len = tail.chars().next().map_or(1, char::len_utf8);
        let inner = &tail[open_len..];
        match inner.find(['）', ')']) {
            Some(end) => {
                let content = &inner[..end];
                if hint.is_none() && !content.is_empty() {
                    hint = Some(content.to_string());
                }
                let close_len = inner[end..].chars().next().map_or(1, char::len_utf8);
                rest = &inner[end + close_len..];
            }
            None => {
                out.push_str(tail);
                return (out, hint);
            }
        }
    }

    out.push_str(rest);
    (out, hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn site_wide_composes_metric_and_change() {
        let outcome = build_phrase(
            "当月のセッション数は120で、前月の80から+50.0%増加しました",
            PhraseContext::SiteWide,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "セッション数の増加");
        assert_eq!(outcome.metric, Some("セッション数"));
    }

    #[test]
    fn site_wide_without_metric_uses_access_fallback() {
        let outcome = build_phrase(
            "全体として前月より増加しました",
            PhraseContext::SiteWide,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "アクセス数の増加");
    }

    #[test]
    fn bracket_gloss_overrides_prose_metric() {
        let outcome = build_phrase(
            "主要指標（クリック率）は前月から改善しています",
            PhraseContext::SiteWide,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "クリック率の改善");
        assert_eq!(outcome.metric, Some("クリック率"));
    }

    #[test]
    fn issue_delegates_to_bottleneck() {
        let outcome = build_phrase(
            "セッション数は前月から減少しました",
            PhraseContext::Issue,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "訪問数が伸び悩んでおり、改善が必要です");
        assert_eq!(outcome.metric, Some("セッション数"));
    }

    #[test]
    fn abstract_action_yields_empty_for_fallback() {
        let outcome = build_phrase(
            "引き続きSEO対策を進めることをおすすめします",
            PhraseContext::Action,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "");
    }

    #[test]
    fn concrete_action_maps_to_canonical_name() {
        let outcome = build_phrase(
            "内部リンクの見直しを行いましょう",
            PhraseContext::Action,
            ReportMode::Standard,
        );
        assert_eq!(outcome.text, "内部リンクの整理");
    }

    #[test]
    fn simplified_direct_path_composes_friendly_phrase() {
        let outcome = build_phrase(
            "サイトに来た人が前より増えました",
            PhraseContext::SiteWide,
            ReportMode::Simplified,
        );
        assert_eq!(outcome.text, "サイトに来た人数のアップ");
        assert_eq!(outcome.metric, Some("セッション数"));
    }

    #[test]
    fn simplified_falls_through_to_standard_path() {
        let outcome = build_phrase(
            "セッション数は前月から増加しました",
            PhraseContext::SiteWide,
            ReportMode::Simplified,
        );
        assert_eq!(outcome.text, "セッション数の増加");
    }
}
