//! Static metric, change and action dictionaries.
//!
//! All tables are ordered with longer/more specific patterns before generic
//! ones; lookups take the first match. The ordering is a committed contract
//! (e.g. クリック率 must win over クリック数 for the text "クリック率").

// ============================================
// Metric dictionary
// ============================================

/// One surface pattern mapped to a canonical metric name.
#[derive(Debug, Clone, Copy)]
pub struct MetricPattern {
    pub pattern: &'static str,
    pub canonical: &'static str,
}

const fn m(pattern: &'static str, canonical: &'static str) -> MetricPattern {
    MetricPattern { pattern, canonical }
}

pub const METRIC_DICT: &[MetricPattern] = &[
    m("オーガニック検索", "オーガニック流入"),
    m("自然検索", "オーガニック流入"),
    m("検索流入", "オーガニック流入"),
    m("検索順位", "検索順位"),
    m("掲載順位", "検索順位"),
    m("平均順位", "検索順位"),
    m("クリック率", "クリック率"),
    m("CTR", "クリック率"),
    m("クリック数", "クリック数"),
    m("クリック", "クリック数"),
    m("表示回数", "表示回数"),
    m("インプレッション", "表示回数"),
    m("コンバージョン率", "コンバージョン率"),
    m("CVR", "コンバージョン率"),
    m("コンバージョン", "コンバージョン数"),
    m("CV", "コンバージョン数"),
    m("成約", "コンバージョン数"),
    m("予約", "コンバージョン数"),
    m("お問い合わせ", "問い合わせ数"),
    m("問い合わせ", "問い合わせ数"),
    m("問合せ", "問い合わせ数"),
    m("直帰率", "直帰率"),
    m("滞在時間", "滞在時間"),
    m("ページビュー", "ページビュー数"),
    m("PV", "ページビュー数"),
    m("閲覧数", "ページビュー数"),
    m("新規ユーザー", "新規ユーザー数"),
    m("ユーザー数", "ユーザー数"),
    m("訪問者数", "ユーザー数"),
    m("セッション数", "セッション数"),
    m("セッション", "セッション数"),
    m("訪問数", "セッション数"),
    m("アクセス数", "セッション数"),
    m("アクセス", "セッション数"),
];

/// First metric pattern contained in `text`, if any.
pub fn lookup_metric(text: &str) -> Option<&'static str> {
    METRIC_DICT
        .iter()
        .find(|entry| text.contains(entry.pattern))
        .map(|entry| entry.canonical)
}

/// Like [`lookup_metric`] but also recognizes the shortened surface forms
/// used inside relational bottleneck sentences ("順位", "成果", ...).
pub fn find_metric_reference(text: &str) -> Option<&'static str> {
    const EXTRA_SURFACES: &[MetricPattern] = &[
        m("検索表示", "表示回数"),
        m("順位", "検索順位"),
        m("成果", "コンバージョン数"),
    ];

    lookup_metric(text).or_else(|| {
        EXTRA_SURFACES
            .iter()
            .find(|entry| text.contains(entry.pattern))
            .map(|entry| entry.canonical)
    })
}

// ============================================
// Change-word dictionary
// ============================================

/// Ordered surface → canonical change mapping.
///
/// "伸び悩" and "落ち込" are listed before their positive-looking prefixes
/// so that "伸び悩み" never canonicalizes to 増加.
pub const CHANGE_DICT: &[(&str, &str)] = &[
    ("伸び悩", "伸び悩み"),
    ("落ち込", "減少"),
    ("増加", "増加"),
    ("増え", "増加"),
    ("急増", "増加"),
    ("伸び", "増加"),
    ("上昇", "上昇"),
    ("上がっ", "上昇"),
    ("アップ", "増加"),
    ("向上", "向上"),
    ("改善", "改善"),
    ("好調", "増加"),
    ("減少", "減少"),
    ("減っ", "減少"),
    ("減り", "減少"),
    ("急落", "減少"),
    ("低下", "低下"),
    ("下がっ", "低下"),
    ("下落", "低下"),
    ("ダウン", "減少"),
    ("悪化", "悪化"),
    ("停滞", "停滞"),
    ("横ばい", "横ばい"),
];

/// Canonical form of the first change word found in `text`.
pub fn normalize_change(text: &str) -> Option<&'static str> {
    CHANGE_DICT
        .iter()
        .find(|(surface, _)| text.contains(surface))
        .map(|(_, canonical)| *canonical)
}

pub const POSITIVE_CHANGES: &[&str] = &["増加", "上昇", "向上", "改善"];
pub const NEGATIVE_CHANGES: &[&str] = &["減少", "低下", "悪化", "伸び悩み", "停滞"];

pub fn is_positive_change(change: &str) -> bool {
    POSITIVE_CHANGES.contains(&change)
}

pub fn is_negative_change(change: &str) -> bool {
    NEGATIVE_CHANGES.contains(&change)
}

// ============================================
// Action dictionary
// ============================================

/// One surface pattern mapped to a canonical action name.
///
/// `abstract_standalone` marks category names too generic to present on
/// their own ("SEO対策" with no concrete object); the pipeline replaces
/// those with an action derived from the top issue.
#[derive(Debug, Clone, Copy)]
pub struct ActionPattern {
    pub pattern: &'static str,
    pub canonical: &'static str,
    pub abstract_standalone: bool,
}

const fn a(pattern: &'static str, canonical: &'static str) -> ActionPattern {
    ActionPattern {
        pattern,
        canonical,
        abstract_standalone: false,
    }
}

const fn a_abstract(pattern: &'static str, canonical: &'static str) -> ActionPattern {
    ActionPattern {
        pattern,
        canonical,
        abstract_standalone: true,
    }
}

pub const ACTION_DICT: &[ActionPattern] = &[
    a("タイトルタグ", "タイトル・説明文の改善"),
    a("メタディスクリプション", "タイトル・説明文の改善"),
    a("ディスクリプション", "タイトル・説明文の改善"),
    a("内部リンク", "内部リンクの整理"),
    a("問い合わせフォーム", "問い合わせ導線の明確化"),
    a("導線", "問い合わせ導線の明確化"),
    a("リライト", "既存記事のリライト"),
    a("ブログ", "ブログ記事の更新"),
    a("口コミ", "口コミの獲得促進"),
    a("レビュー", "口コミの獲得促進"),
    a("ビジネスプロフィール", "ビジネスプロフィールの更新"),
    a("マイビジネス", "ビジネスプロフィールの更新"),
    a("表示速度", "ページ表示速度の改善"),
    a("ページ速度", "ページ表示速度の改善"),
    a("モバイル", "モバイル対応の強化"),
    a("スマホ", "モバイル対応の強化"),
    a("キーワード", "対策キーワードの見直し"),
    a("広告", "広告運用の見直し"),
    a("SNS", "SNS発信の強化"),
    a("コンテンツ", "コンテンツの拡充"),
    a_abstract("SEO対策", "SEO対策"),
    a_abstract("SEO", "SEO対策"),
    a_abstract("アクセス解析", "アクセス解析"),
    a_abstract("サイト改善", "サイト改善"),
    a_abstract("集客", "集客強化"),
];

/// First action pattern contained in `text`, if any.
pub fn lookup_action(text: &str) -> Option<&'static ActionPattern> {
    ACTION_DICT.iter().find(|entry| text.contains(entry.pattern))
}

/// Action phrases judged too generic to present to the end user.
pub const ABSTRACT_STANDALONE: &[&str] = &[
    "SEO対策",
    "アクセス解析",
    "サイト改善",
    "集客強化",
    "マーケティング強化",
    "コンテンツ強化",
];

/// Whether `text` is exactly one of the abstract-standalone names.
pub fn is_abstract_standalone(text: &str) -> bool {
    let trimmed = text.trim();
    ABSTRACT_STANDALONE.contains(&trimmed)
}

// ============================================
// Simplified-vocabulary dictionaries
// ============================================

/// Colloquial fragment → (display name, canonical metric).
pub const SIMPLIFIED_METRIC_DICT: &[(&str, &str, &str)] = &[
    ("見に来てくれた人", "サイトに来た人数", "セッション数"),
    ("来てくれた人", "サイトに来た人数", "セッション数"),
    ("サイトに来た人", "サイトに来た人数", "セッション数"),
    ("見てもらえた", "ページを見られた回数", "ページビュー数"),
    ("見られた回数", "ページを見られた回数", "ページビュー数"),
    ("検索で出てくる", "検索での表示", "表示回数"),
    ("検索結果", "検索での表示", "表示回数"),
    ("お問い合わせ", "お問い合わせの数", "問い合わせ数"),
    ("問い合わせ", "お問い合わせの数", "問い合わせ数"),
    ("クリック", "クリックの数", "クリック数"),
];

/// Colloquial fragment → canonical change direction.
pub const SIMPLIFIED_CHANGE_DICT: &[(&str, &str)] = &[
    ("増え", "増加"),
    ("たくさん", "増加"),
    ("多く", "増加"),
    ("上が", "上昇"),
    ("良く", "改善"),
    ("減っ", "減少"),
    ("減り", "減少"),
    ("少な", "減少"),
    ("下が", "低下"),
];

/// Friendly display form of a canonical change, for simplified phrases.
pub fn simplified_change_display(change: &str) -> &'static str {
    match change {
        "増加" | "上昇" | "向上" => "アップ",
        "減少" | "低下" => "ダウン",
        _ => "変化",
    }
}

/// Trigger → fixed micro-action, for the simplified action context.
pub const SIMPLIFIED_MICRO_ACTIONS: &[(&str, &str)] = &[
    ("写真", "お店の写真の追加"),
    ("ブログ", "お知らせ記事の追加"),
    ("お知らせ", "お知らせ記事の追加"),
    ("口コミ", "口コミへのお返事"),
    ("レビュー", "口コミへのお返事"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn specific_metric_patterns_win_over_generic() {
        assert_eq!(lookup_metric("クリック率が改善"), Some("クリック率"));
        assert_eq!(lookup_metric("クリック数が増加"), Some("クリック数"));
        assert_eq!(lookup_metric("CVRの推移"), Some("コンバージョン率"));
        assert_eq!(lookup_metric("セッション数は120"), Some("セッション数"));
        assert_eq!(lookup_metric("アクセスが好調"), Some("セッション数"));
    }

    #[test]
    fn nobishinayami_is_not_positive() {
        assert_eq!(normalize_change("訪問数が伸び悩んでいます"), Some("伸び悩み"));
        assert_eq!(normalize_change("訪問数が伸びています"), Some("増加"));
        assert!(is_negative_change("伸び悩み"));
        assert!(!is_positive_change("伸び悩み"));
    }

    #[test]
    fn change_words_canonicalize() {
        assert_eq!(normalize_change("前月から増えました"), Some("増加"));
        assert_eq!(normalize_change("順位が下がっています"), Some("低下"));
        assert_eq!(normalize_change("変わりません"), None);
    }

    #[test]
    fn abstract_actions_are_flagged() {
        let seo = lookup_action("SEO対策を進めましょう").unwrap();
        assert!(seo.abstract_standalone);

        let links = lookup_action("内部リンクを整理しましょう").unwrap();
        assert!(!links.abstract_standalone);
        assert_eq!(links.canonical, "内部リンクの整理");
    }

    #[test]
    fn abstract_standalone_requires_exact_match() {
        assert!(is_abstract_standalone("SEO対策"));
        assert!(is_abstract_standalone(" SEO対策 "));
        assert!(!is_abstract_standalone("トップページのSEO対策"));
    }

    #[test]
    fn short_surface_forms_resolve_for_relational_sentences() {
        assert_eq!(
            find_metric_reference("順位が下がっており、対策の強化が必要です"),
            Some("検索順位")
        );
        assert_eq!(
            find_metric_reference("訪問数が伸び悩んでおり、改善が必要です"),
            Some("セッション数")
        );
    }
}
