//! Text normalization and candidate sentence splitting.

use scraper::Html;

/// Sentences shorter than this many chars are noise, not candidates.
pub const MIN_SENTENCE_CHARS: usize = 4;

/// Parentheticals longer than this are asides and get dropped; shorter ones
/// are kept because they are usually metric glosses ("セッション数（訪問数）").
pub const LONG_PAREN_CHARS: usize = 15;

/// Section-title residue the generator tends to repeat inside body text.
const BOILERPLATE: &[&str] = &[
    "全体サマリー",
    "良かった点",
    "課題点",
    "改善アクション",
    "商圏・エリア動向",
    "来月の見通し",
    "月次レポート",
];

/// Normalize one labeled document fragment into plain analyzable text.
///
/// Strips markup, bold markers, 【】-wrapped headers, long parenthetical
/// asides and section-title boilerplate, then collapses whitespace. Never
/// fails: malformed markup degrades to whatever text the lenient parser
/// recovers.
pub fn normalize_fragment(raw: &str) -> String {
    let mut text = if raw.contains('<') {
        strip_markup(raw)
    } else {
        raw.to_string()
    };

    text = text.replace("**", "").replace("__", "");
    text = strip_delimited(&text, '【', '】', 0);
    text = strip_delimited(&text, '（', '）', LONG_PAREN_CHARS);
    text = strip_delimited(&text, '(', ')', LONG_PAREN_CHARS);

    for phrase in BOILERPLATE {
        text = text.replace(phrase, "");
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split normalized text into candidate sentences.
///
/// Splits at sentence-ending punctuation and line breaks; fragments under
/// [`MIN_SENTENCE_CHARS`] chars are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['。', '．', '！', '？', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .map(str::to_string)
        .collect()
}

fn strip_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut out = String::new();
    for chunk in fragment.root_element().text() {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(trimmed);
    }
    out
}

/// Remove `open`..`close` spans whose content exceeds `keep_under` chars.
/// With `keep_under == 0` every span is removed. Unbalanced delimiters are
/// left untouched from the point of imbalance.
fn strip_delimited(text: &str, open: char, close: char, keep_under: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);
        let inner = &tail[open.len_utf8()..];
        match inner.find(close) {
            Some(end) => {
                let content = &inner[..end];
                if keep_under > 0 && content.chars().count() < keep_under {
                    out.push(open);
                    out.push_str(content);
                    out.push(close);
                }
                rest = &inner[end + close.len_utf8()..];
            }
            None => {
                // No closing delimiter; keep the remainder as-is.
                out.push_str(tail);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}
