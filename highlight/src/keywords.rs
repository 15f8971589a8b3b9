//! Context keyword lists for candidate sentence selection.
//!
//! Declared order is a committed contract: when a sentence matches keywords
//! of more than one context, selection is decided by sentence order first
//! and by this declared order second. Do not re-sort.

/// Positive-change words selecting the "most important result" sentence.
pub const SITE_WIDE: &[&str] = &[
    "増加",
    "増え",
    "伸び",
    "上昇",
    "改善",
    "好調",
    "アップ",
    "向上",
    "過去最高",
    "最多",
];

/// Negative-change and problem words selecting the "top issue" sentence.
pub const ISSUE: &[&str] = &[
    "減少",
    "減っ",
    "低下",
    "課題",
    "伸び悩",
    "悪化",
    "ダウン",
    "落ち込",
    "不足",
    "低迷",
];

/// Initiative words selecting the "improvement opportunity" sentence.
pub const ACTION: &[&str] = &[
    "施策",
    "改善",
    "対策",
    "強化",
    "追加",
    "見直し",
    "更新",
    "作成",
    "最適化",
    "取り組み",
];

/// Extended colloquial vocabulary, unioned in under simplified mode.
pub const SITE_WIDE_SIMPLIFIED: &[&str] = &["たくさん", "多く", "良く", "好評", "うれしい"];

pub const ISSUE_SIMPLIFIED: &[&str] = &["少な", "減り", "下が", "いまいち", "もったいない"];

pub const ACTION_SIMPLIFIED: &[&str] = &["やってみ", "続け", "増やし", "直し", "おすすめ"];
