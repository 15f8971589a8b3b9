//! Phrase finalization: symbol cleanup, length limits, natural truncation.

use crate::context::PhraseContext;
use crate::context::PhraseStyle;

/// Bounded pass count for the suffix-stripping loop. The loop also stops on
/// a fixed point; the cap only guards against pathological rule overlap.
const MAX_SUFFIX_PASSES: usize = 5;

/// Never strip a phrase below this many chars.
const MIN_PHRASE_CHARS: usize = 2;

/// Colloquial sentence endings removed in fact-style contexts.
const COLLOQUIAL_ENDINGS: &[&str] = &[
    "かもしれません",
    "と思います",
    "でしょう",
    "ですよね",
    "ですね",
    "ますね",
    "ですよ",
    "ますよ",
];

/// Verb/auxiliary suffixes stripped to reach a bare-noun form. Ordered
/// longest first; applied iteratively with [`MAX_SUFFIX_PASSES`].
const VERB_SUFFIXES: &[&str] = &[
    "となっています",
    "になっています",
    "しております",
    "していきます",
    "されています",
    "となりました",
    "になりました",
    "しています",
    "されました",
    "しました",
    "ています",
    "できます",
    "ました",
    "でした",
    "される",
    "している",
    "ている",
    "します",
    "した",
    "する",
    "です",
    "ます",
];

/// Trailing grammatical particles stripped after verb suffixes.
const TRAILING_PARTICLES: &[char] = &['は', 'が', 'を', 'に', 'で', 'と', 'も', 'へ', 'の'];

/// Particle boundaries used when truncating a fact-style phrase.
const CUT_PARTICLES: &[char] = &['の', 'と', 'や'];

/// Problem nouns that need a closing predicate when an issue sentence ends
/// on them after truncation.
const PROBLEM_NOUNS: &[&str] = &["課題", "不足", "停滞", "低下", "減少", "低迷", "伸び悩み"];

const CLOSING_PREDICATE: &str = "が見られます";

/// Enforce the length/format contract for a context.
///
/// Returns an empty string when nothing usable remains; callers substitute
/// the context's fixed default in that case.
pub fn finalize(text: &str, ctx: PhraseContext) -> String {
    let rules = ctx.rules();
    let cleaned = strip_symbols(text);
    let collapsed: String = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    let result = match rules.style {
        PhraseStyle::Sentence => finalize_sentence(&collapsed, rules.max_chars),
        PhraseStyle::Fact => finalize_fact(&collapsed, rules.max_chars),
    };

    if result.chars().count() < MIN_PHRASE_CHARS {
        String::new()
    } else {
        result
    }
}

/// Sentence-style: keep punctuation as text, trim the trailing full stop,
/// truncate at the last clause boundary within the limit, and close a bare
/// problem-noun ending with a predicate when it still fits.
fn finalize_sentence(text: &str, max_chars: usize) -> String {
    let mut sentence = text.trim().trim_end_matches('。').to_string();

    let chars: Vec<char> = sentence.chars().collect();
    if chars.len() > max_chars {
        sentence = truncate_sentence(&chars, max_chars);
    }

    let sentence = sentence.trim_end_matches(['、', '，']).to_string();
    if ends_with_problem_noun(&sentence)
        && sentence.chars().count() + CLOSING_PREDICATE.chars().count() <= max_chars
    {
        return format!("{sentence}{CLOSING_PREDICATE}");
    }
    sentence
}

fn truncate_sentence(chars: &[char], max_chars: usize) -> String {
    let window = &chars[..max_chars];

    // Prefer a sentence/clause boundary, cutting the boundary mark itself.
    if let Some(pos) = window.iter().rposition(|c| *c == '。' || *c == '、') {
        if pos >= MIN_PHRASE_CHARS {
            return window[..pos].iter().collect();
        }
    }

    // Otherwise cut just after the last particle so no word is split.
    if let Some(pos) = window.iter().rposition(|c| TRAILING_PARTICLES.contains(c)) {
        if pos >= MIN_PHRASE_CHARS {
            return window[..=pos].iter().collect();
        }
    }

    window.iter().collect()
}

fn ends_with_problem_noun(sentence: &str) -> bool {
    PROBLEM_NOUNS.iter().any(|noun| sentence.ends_with(noun))
}

/// Fact-style: drop punctuation and colloquial endings, reduce to bare-noun
/// form with a bounded suffix loop, then truncate at a particle boundary.
fn finalize_fact(text: &str, max_chars: usize) -> String {
    let mut phrase: String = text
        .chars()
        .filter(|c| !matches!(c, '。' | '、' | '．' | '，' | '！' | '？' | '!' | '?' | ',' | '.'))
        .collect();
    phrase = phrase.trim().to_string();

    for ending in COLLOQUIAL_ENDINGS {
        if let Some(stripped) = phrase.strip_suffix(ending) {
            phrase = stripped.to_string();
        }
    }

    for _ in 0..MAX_SUFFIX_PASSES {
        let before = phrase.clone();
        phrase = strip_one_suffix(phrase);
        if phrase == before {
            break;
        }
    }

    let chars: Vec<char> = phrase.chars().collect();
    if chars.len() <= max_chars {
        return phrase;
    }

    let window = &chars[..max_chars];
    if let Some(pos) = window.iter().rposition(|c| CUT_PARTICLES.contains(c)) {
        if pos >= MIN_PHRASE_CHARS {
            return window[..pos].iter().collect();
        }
    }
    window.iter().collect()
}

/// One pass of suffix reduction: longest matching verb suffix first, then a
/// single trailing particle. Guards the minimum length so a phrase is never
/// stripped to nothing.
fn strip_one_suffix(phrase: String) -> String {
    for suffix in VERB_SUFFIXES {
        if let Some(stripped) = phrase.strip_suffix(suffix) {
            if stripped.chars().count() >= MIN_PHRASE_CHARS {
                return stripped.to_string();
            }
        }
    }

    let mut chars: Vec<char> = phrase.chars().collect();
    if chars.len() > MIN_PHRASE_CHARS
        && let Some(last) = chars.last()
        && TRAILING_PARTICLES.contains(last)
    {
        chars.pop();
        return chars.into_iter().collect();
    }

    phrase
}

/// Remove decorative symbols and emoji, keeping textual punctuation.
fn strip_symbols(text: &str) -> String {
    text.chars()
        .filter(|c| !is_decorative(*c))
        .collect()
}

fn is_decorative(c: char) -> bool {
    matches!(
        c,
        '■' | '□' | '●' | '○' | '★' | '☆' | '▼' | '▲' | '◆' | '◇' | '※' | '♪' | '✓' | '✔'
    ) || ('\u{2190}'..='\u{21FF}').contains(&c)      // arrows
        || ('\u{2600}'..='\u{27BF}').contains(&c)    // misc symbols / dingbats
        || ('\u{1F000}'..='\u{1FAFF}').contains(&c)  // emoji blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fact_phrase_reduces_to_bare_noun() {
        let out = finalize("セッション数の増加しました。", PhraseContext::SiteWide);
        assert_eq!(out, "セッション数の増加");
    }

    #[test]
    fn fact_phrase_strips_trailing_particle() {
        let out = finalize("アクセス数の", PhraseContext::SiteWide);
        assert_eq!(out, "アクセス数");
    }

    #[test]
    fn fact_output_never_exceeds_limit() {
        let long = "あ".repeat(500);
        let inputs = [
            "セッション数の増加",
            "オーガニック検索経由の新規ユーザー数の大幅な増加が継続しています",
            "今月はページビュー数とセッション数と問い合わせ数がすべて増加しました",
            long.as_str(),
        ];
        for input in inputs.iter().copied().chain(std::iter::once(
            "記号■★☆まみれ✨のテキスト🎉です",
        )) {
            let out = finalize(input, PhraseContext::SiteWide);
            assert!(
                out.chars().count() <= 22,
                "{input} -> {out} exceeds 22 chars"
            );
        }
    }

    #[test]
    fn sentence_truncates_at_clause_boundary() {
        let long = "訪問数が伸び悩んでおり、検索からの流入も減少しているため、早急な改善施策の検討が必要です";
        let out = finalize(long, PhraseContext::Issue);
        assert!(out.chars().count() <= 40);
        // Cut lands on a clause boundary, not mid-word.
        assert_eq!(out, "訪問数が伸び悩んでおり、検索からの流入も減少しているため");
    }

    #[test]
    fn sentence_keeps_short_input_and_trims_full_stop() {
        let out = finalize("問い合わせが減っています。", PhraseContext::Issue);
        assert_eq!(out, "問い合わせが減っています");
    }

    #[test]
    fn bare_problem_noun_gets_closing_predicate() {
        let out = finalize("問い合わせ件数の不足", PhraseContext::Issue);
        assert_eq!(out, "問い合わせ件数の不足が見られます");
    }

    #[test]
    fn decorative_symbols_and_emoji_are_removed() {
        let out = finalize("★セッション数の増加🎉", PhraseContext::SiteWide);
        assert_eq!(out, "セッション数の増加");
    }

    #[test]
    fn unusable_input_yields_empty() {
        assert_eq!(finalize("★", PhraseContext::SiteWide), "");
        assert_eq!(finalize("", PhraseContext::Issue), "");
    }

    #[test]
    fn suffix_loop_terminates_on_pathological_input() {
        let input = "しましたしましたしましたしましたしましたしました";
        let out = finalize(input, PhraseContext::SiteWide);
        assert!(out.chars().count() <= 22);
    }
}
