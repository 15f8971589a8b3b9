//! Action derivation from a top-issue phrase.
//!
//! Used when the generator's own action text is too abstract to present.
//! Three-stage fallback: bottleneck concept → metric-to-concept reverse
//! lookup → generic negative-outcome keywords. Returns `None` only when all
//! three stages miss, in which case the caller keeps the original text.

use mieru_protocol::ReportMode;

use crate::dict;

/// Bottleneck concept → concrete action (standard, simplified).
const CONCEPT_ACTIONS: &[(&str, &str, &str)] = &[
    ("成果転換", "問い合わせ導線の明確化", "問い合わせ案内の改善"),
    ("クリック獲得", "タイトル・説明文の改善", "ページ題名の見直し"),
    ("上位表示", "対策キーワードの見直し", "よく使う言葉の見直し"),
    ("回遊", "内部リンクの整理", "ページのつながり改善"),
    ("件数確保", "口コミの獲得促進", "口コミへのお返事"),
    ("集客", "コンテンツの拡充", "お知らせ記事の追加"),
];

/// Canonical metric → bottleneck concept.
const METRIC_CONCEPTS: &[(&str, &str)] = &[
    ("セッション数", "集客"),
    ("ユーザー数", "集客"),
    ("新規ユーザー数", "集客"),
    ("オーガニック流入", "集客"),
    ("ページビュー数", "回遊"),
    ("直帰率", "回遊"),
    ("滞在時間", "回遊"),
    ("表示回数", "クリック獲得"),
    ("クリック数", "成果転換"),
    ("クリック率", "成果転換"),
    ("検索順位", "上位表示"),
    ("問い合わせ数", "件数確保"),
    ("コンバージョン数", "件数確保"),
    ("コンバージョン率", "件数確保"),
];

/// Generic negative-outcome keyword → fallback action (standard, simplified).
const GENERIC_FALLBACKS: &[(&str, &str, &str)] = &[
    ("停滞", "新規コンテンツの追加", "お知らせ記事の追加"),
    ("不足", "情報量の拡充", "ページの内容を増やす"),
    ("課題", "改善施策の優先順位付け", "できることから着手"),
    ("伸び悩", "主要ページの見直し", "よく見られるページの手直し"),
    ("減少", "流入経路の点検", "サイトの入り口の確認"),
    ("減っ", "流入経路の点検", "サイトの入り口の確認"),
    ("低下", "主要ページの見直し", "よく見られるページの手直し"),
    ("低迷", "新規コンテンツの追加", "お知らせ記事の追加"),
];

fn pick(standard: &'static str, simplified: &'static str, mode: ReportMode) -> &'static str {
    if mode.is_simplified() {
        simplified
    } else {
        standard
    }
}

/// Concept behind a top-issue phrase, when one can be recognized.
pub fn issue_concept(top_issue: &str) -> Option<&'static str> {
    CONCEPT_ACTIONS
        .iter()
        .find(|(concept, _, _)| top_issue.contains(concept))
        .map(|(concept, _, _)| *concept)
        .or_else(|| {
            let metric = dict::find_metric_reference(top_issue)?;
            metric_concept(metric)
        })
}

/// Concept a canonical metric bottlenecks on.
pub fn metric_concept(canonical: &str) -> Option<&'static str> {
    METRIC_CONCEPTS
        .iter()
        .find(|(metric, _)| *metric == canonical)
        .map(|(_, concept)| *concept)
}

/// Concrete action for a bottleneck concept.
pub fn concept_action(concept: &str, mode: ReportMode) -> Option<&'static str> {
    CONCEPT_ACTIONS
        .iter()
        .find(|(c, _, _)| *c == concept)
        .map(|(_, standard, simplified)| pick(standard, simplified, mode))
}

/// Derive a concrete action phrase from a top-issue phrase.
pub fn derive(top_issue: &str, mode: ReportMode) -> Option<String> {
    // Stage a: direct bottleneck-concept match.
    for (concept, standard, simplified) in CONCEPT_ACTIONS {
        if top_issue.contains(concept) {
            return Some(pick(standard, simplified, mode).to_string());
        }
    }

    // Stage b: metric reference → concept → action.
    if let Some(metric) = dict::find_metric_reference(top_issue)
        && let Some(concept) = metric_concept(metric)
        && let Some(action) = concept_action(concept, mode)
    {
        return Some(action.to_string());
    }

    // Stage c: generic negative-outcome keywords.
    GENERIC_FALLBACKS
        .iter()
        .find(|(keyword, _, _)| top_issue.contains(keyword))
        .map(|(_, standard, simplified)| pick(standard, simplified, mode).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn concept_match_wins_first() {
        let derived = derive("クリックは増えていますが、成果転換に至っていません", ReportMode::Standard);
        assert_eq!(derived.as_deref(), Some("問い合わせ導線の明確化"));
    }

    #[test]
    fn metric_reference_falls_back_to_concept_table() {
        let derived = derive("訪問数が伸び悩んでおり、改善が必要です", ReportMode::Standard);
        // 訪問数 → セッション数 → 集客 → コンテンツの拡充
        assert_eq!(derived.as_deref(), Some("コンテンツの拡充"));
    }

    #[test]
    fn generic_keyword_is_last_resort() {
        let derived = derive("全体的に停滞しています", ReportMode::Standard);
        assert_eq!(derived.as_deref(), Some("新規コンテンツの追加"));
    }

    #[test]
    fn no_match_returns_none() {
        assert_eq!(derive("特筆事項はありません", ReportMode::Standard), None);
    }

    #[test]
    fn simplified_mode_uses_friendly_wording() {
        let derived = derive("成果転換に至っていません", ReportMode::Simplified);
        assert_eq!(derived.as_deref(), Some("問い合わせ案内の改善"));
    }
}
