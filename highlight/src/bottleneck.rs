//! Relational bottleneck sentences.
//!
//! Turns a bare metric fact into an issue statement expressing what the
//! metric has *not yet* achieved ("visits up but inquiries flat"). This is
//! the single mechanism that makes the top-issue phrase actionable-sounding,
//! and the overlap resolver reuses it when the most-important phrase and the
//! top issue would otherwise restate the same fact.

use crate::dict;

/// Shortened surface form of a canonical metric, used inside sentences.
pub fn short_metric(canonical: &str) -> &str {
    match canonical {
        "セッション数" => "訪問数",
        "ユーザー数" => "訪問者数",
        "新規ユーザー数" => "新規の訪問",
        "ページビュー数" => "閲覧数",
        "表示回数" => "検索表示",
        "クリック数" => "クリック",
        "問い合わせ数" => "問い合わせ",
        "コンバージョン数" => "成果",
        "コンバージョン率" => "成果率",
        "オーガニック流入" => "検索流入",
        other => other,
    }
}

/// The next desired outcome this metric has not yet reached.
fn next_step(canonical: &str) -> &'static str {
    match canonical {
        "セッション数" | "ユーザー数" | "新規ユーザー数" | "ページビュー数"
        | "オーガニック流入" => "成果につなげきれていない状況です",
        "表示回数" => "クリック獲得につながっていません",
        "クリック数" | "クリック率" => "成果転換に至っていません",
        "問い合わせ数" | "コンバージョン数" | "コンバージョン率" => {
            "さらなる件数確保が課題です"
        }
        "検索順位" => "上位表示を活かしきれていません",
        "直帰率" | "滞在時間" => "サイト内の回遊改善が進んでいません",
        _ => "改善の余地が残っています",
    }
}

/// Progressive form of a positive canonical change.
fn progressive(change: &str) -> &'static str {
    match change {
        "上昇" => "上がっています",
        "向上" => "高まっています",
        "改善" => "改善しています",
        _ => "伸びています",
    }
}

/// Metric-specific sentences for a clearly negative movement.
fn negative_sentence(canonical: &str) -> String {
    match canonical {
        "セッション数" => "訪問数が伸び悩んでおり、改善が必要です".to_string(),
        "ユーザー数" => "訪問者数が伸び悩んでおり、改善が必要です".to_string(),
        "ページビュー数" => "閲覧数が減っており、回遊の見直しが必要です".to_string(),
        "表示回数" => "検索表示が減っており、対策の強化が必要です".to_string(),
        "クリック数" => "クリックが減少しており、表示内容の見直しが必要です".to_string(),
        "クリック率" => "クリック率が低下しており、タイトルの見直しが必要です".to_string(),
        "検索順位" => "順位が下がっており、対策の強化が必要です".to_string(),
        "問い合わせ数" => "問い合わせが減っており、導線の見直しが必要です".to_string(),
        "コンバージョン数" => "成果が伸び悩んでおり、導線の見直しが必要です".to_string(),
        other => format!("{}が伸び悩んでおり、改善が必要です", short_metric(other)),
    }
}

/// Build the relational bottleneck sentence for a metric and an optional
/// canonical change direction.
pub fn build(canonical: &str, change: Option<&str>) -> String {
    match change {
        Some(c) if dict::is_positive_change(c) => {
            format!(
                "{}は{}が、{}",
                short_metric(canonical),
                progressive(c),
                next_step(canonical)
            )
        }
        Some(c) if dict::is_negative_change(c) => negative_sentence(canonical),
        _ => format!("{}を{}", short_metric(canonical), next_step(canonical)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn negative_session_decline_uses_table_sentence() {
        assert_eq!(
            build("セッション数", Some("減少")),
            "訪問数が伸び悩んでおり、改善が必要です"
        );
    }

    #[test]
    fn positive_change_composes_progressive_form() {
        assert_eq!(
            build("セッション数", Some("増加")),
            "訪問数は伸びていますが、成果につなげきれていない状況です"
        );
        assert_eq!(
            build("検索順位", Some("上昇")),
            "検索順位は上がっていますが、上位表示を活かしきれていません"
        );
    }

    #[test]
    fn undetermined_change_uses_generic_form() {
        assert_eq!(
            build("クリック数", None),
            "クリックを成果転換に至っていません"
        );
    }

    #[test]
    fn all_sentences_fit_sentence_limit() {
        let metrics = [
            "セッション数",
            "ユーザー数",
            "ページビュー数",
            "表示回数",
            "クリック数",
            "クリック率",
            "検索順位",
            "問い合わせ数",
            "コンバージョン数",
            "直帰率",
            "滞在時間",
        ];
        for metric in metrics {
            for change in [Some("増加"), Some("減少"), None] {
                let sentence = build(metric, change);
                assert!(
                    sentence.chars().count() <= 40,
                    "{sentence} exceeds 40 chars"
                );
            }
        }
    }
}
