//! Section extraction from raw generator output.

use mieru_protocol::SectionSpec;
use scraper::ElementRef;
use scraper::Html;

/// Pull one section's fragment out of generated markup.
///
/// Parses `raw` leniently, finds the first element whose class set contains
/// the section marker (ASCII case-insensitive, the generator does not
/// guarantee exact casing) and returns its serialized subtree. Returns an
/// empty string when the marker is absent or the container has no content;
/// malformed markup never panics or errors.
pub fn extract(raw: &str, spec: &SectionSpec) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(raw);
    let container = fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value()
                .classes()
                .any(|class| class.eq_ignore_ascii_case(spec.marker))
        });

    match container {
        Some(el) if !el.inner_html().trim().is_empty() => el.html(),
        _ => String::new(),
    }
}

/// Normalize a raw generator response before extraction.
///
/// Generators wrap output unpredictably: fenced code blocks, a full
/// `<html>`/`<body>` shell, or a line of prose before the markup. All three
/// wrappers are stripped; the markup itself is left untouched.
pub fn normalize_response(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if let Some(rest) = text.strip_prefix("```") {
        let body = rest.split_once('\n').map_or("", |(_, body)| body);
        let body = body.rsplit_once("```").map_or(body, |(head, _)| head);
        text = body.trim().to_string();
    }

    let lower = text.to_ascii_lowercase();
    if let Some(open) = lower.find("<body")
        && let Some(close) = lower[open..].find('>')
    {
        let start = open + close + 1;
        let end = lower.find("</body>").unwrap_or(text.len()).max(start);
        text = text[start..end].trim().to_string();
    }

    match text.find('<') {
        Some(pos) if pos > 0 => text[pos..].to_string(),
        _ => text,
    }
}
