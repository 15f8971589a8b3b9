//! Fact / causes / actions detail blocks for each highlight phrase.

use mieru_protocol::HighlightDetail;
use mieru_protocol::HighlightTriple;
use mieru_protocol::MetricBreakdownEntry;
use mieru_protocol::ReportMode;
use mieru_protocol::ReportSections;
use mieru_protocol::SectionId;
use mieru_protocol::TripleDetail;

use crate::action;
use crate::bottleneck;
use crate::dict;
use crate::normalize;

/// Cause and action templates for one bottleneck concept.
struct ConceptProfile {
    concept: &'static str,
    positive_causes: [&'static str; 2],
    negative_causes: [&'static str; 2],
    actions: [&'static str; 3],
}

const PROFILES: &[ConceptProfile] = &[
    ConceptProfile {
        concept: "集客",
        positive_causes: [
            "検索経由の露出が広がったと考えられます",
            "既存コンテンツの評価が安定しています",
        ],
        negative_causes: [
            "検索経由の流入が細っていると考えられます",
            "新しいコンテンツの追加が止まっています",
        ],
        actions: [
            "検索ニーズに合わせた記事を追加する",
            "既存記事に最新情報を追記する",
            "流入キーワードを月次で確認する",
        ],
    },
    ConceptProfile {
        concept: "クリック獲得",
        positive_causes: [
            "検索結果での表示機会が増えています",
            "タイトルが検索意図に合っていると考えられます",
        ],
        negative_causes: [
            "表示はされてもクリックされていない状態です",
            "タイトルや説明文が検索意図とずれている可能性があります",
        ],
        actions: [
            "主要ページのタイトルに対策キーワードを含める",
            "説明文をクリックしたくなる文面に書き換える",
            "表示回数の多いページから優先して見直す",
        ],
    },
    ConceptProfile {
        concept: "成果転換",
        positive_causes: [
            "クリック後の受け皿ページが機能しています",
            "訪問の質が高まっていると考えられます",
        ],
        negative_causes: [
            "訪問が問い合わせにつながっていません",
            "問い合わせまでの導線が分かりにくい可能性があります",
        ],
        actions: [
            "トップページに問い合わせボタンを配置する",
            "主要ページの下部に連絡先を明記する",
            "問い合わせフォームの入力項目を減らす",
        ],
    },
    ConceptProfile {
        concept: "上位表示",
        positive_causes: [
            "対策キーワードの評価が上がっています",
            "コンテンツの専門性が評価されています",
        ],
        negative_causes: [
            "競合ページに順位を譲っている可能性があります",
            "コンテンツの更新が滞っていると考えられます",
        ],
        actions: [
            "順位が落ちたキーワードを洗い出す",
            "該当ページの情報を最新に更新する",
            "検索ボリュームの近い代替語を検討する",
        ],
    },
    ConceptProfile {
        concept: "回遊",
        positive_causes: [
            "ページ間の導線が機能しています",
            "記事の内容が読者の関心に合っています",
        ],
        negative_causes: [
            "1ページだけ見て離脱する訪問が多い状態です",
            "関連ページへの案内が不足しています",
        ],
        actions: [
            "関連記事同士を相互リンクする",
            "記事末尾に次に読むページを案内する",
            "直帰の多いページを洗い出す",
        ],
    },
    ConceptProfile {
        concept: "件数確保",
        positive_causes: [
            "問い合わせ導線が機能しています",
            "口コミなどの後押し材料が効いています",
        ],
        negative_causes: [
            "比較検討の段階で離脱されている可能性があります",
            "後押しになる実績や口コミが不足しています",
        ],
        actions: [
            "来店客に口コミ投稿を案内する",
            "既存の口コミへ返信する",
            "実績や事例のページを拡充する",
        ],
    },
];

const GENERIC_PROFILE: ConceptProfile = ConceptProfile {
    concept: "全般",
    positive_causes: [
        "継続的な運用が成果につながっています",
        "サイト全体の評価が安定しています",
    ],
    negative_causes: [
        "季節要因など外部環境の影響が考えられます",
        "サイトの更新頻度が影響している可能性があります",
    ],
    actions: [
        "優先度の高いページから着手する",
        "翌月のレポートで効果を確認する",
        "主要指標の推移を記録する",
    ],
};

fn profile_for(concept: Option<&str>) -> &'static ConceptProfile {
    concept
        .and_then(|c| PROFILES.iter().find(|p| p.concept == c))
        .unwrap_or(&GENERIC_PROFILE)
}

/// Build the detail blocks for all three triple slots.
pub fn build_detail(
    triple: &HighlightTriple,
    breakdown: &[MetricBreakdownEntry],
    sections: &ReportSections,
    mode: ReportMode,
) -> TripleDetail {
    TripleDetail {
        most_important: fact_slot(
            &triple.most_important,
            breakdown,
            sections,
            SectionId::GoodPoints,
            true,
            mode,
        ),
        top_issue: fact_slot(
            &triple.top_issue,
            breakdown,
            sections,
            SectionId::Issues,
            false,
            mode,
        ),
        opportunity: opportunity_slot(triple, mode),
    }
}

fn fact_slot(
    phrase: &str,
    breakdown: &[MetricBreakdownEntry],
    sections: &ReportSections,
    mine_from: SectionId,
    positive: bool,
    mode: ReportMode,
) -> HighlightDetail {
    let metric = dict::find_metric_reference(phrase);
    let entry = metric.and_then(|m| find_entry(breakdown, m));

    let fact = match entry {
        Some(e) => fact_sentence(e, mode),
        None => {
            if mode.is_simplified() {
                format!("今回のポイントは「{phrase}」です。")
            } else {
                format!("「{phrase}」が今回のレポートの注目ポイントです。")
            }
        }
    };

    let profile = profile_for(metric.and_then(action::metric_concept));
    let mut causes: Vec<String> = if positive {
        profile.positive_causes.iter().copied().map(str::to_string).collect()
    } else {
        profile.negative_causes.iter().copied().map(str::to_string).collect()
    };
    if let Some(mined) = mine_sentence(sections, mine_from, metric) {
        causes.push(mined);
    }
    causes.truncate(3);

    let action_count = if positive { 2 } else { 3 };
    let actions = profile
        .actions
        .iter()
        .take(action_count)
        .copied()
        .map(str::to_string)
        .collect();

    HighlightDetail {
        fact,
        causes,
        actions,
    }
}

fn opportunity_slot(triple: &HighlightTriple, mode: ReportMode) -> HighlightDetail {
    let phrase = &triple.opportunity;
    let fact = if mode.is_simplified() {
        format!("次にやると良いのは「{phrase}」です。")
    } else {
        format!("次の一手として「{phrase}」が有効と考えられます。")
    };

    let profile = profile_for(action::issue_concept(&triple.top_issue));
    let causes = profile
        .negative_causes
        .iter()
        .map(|s| s.to_string())
        .collect();

    HighlightDetail {
        fact,
        causes,
        actions: action_steps(phrase),
    }
}

/// Concrete first steps for a canonical action phrase.
fn action_steps(phrase: &str) -> Vec<String> {
    const STEPS: &[(&str, [&str; 2])] = &[
        (
            "問い合わせ導線の明確化",
            [
                "トップページに問い合わせボタンを配置する",
                "主要ページの下部に連絡先を明記する",
            ],
        ),
        (
            "タイトル・説明文の改善",
            [
                "主要ページのタイトルに対策キーワードを含める",
                "説明文をクリックしたくなる文面に書き換える",
            ],
        ),
        (
            "内部リンクの整理",
            [
                "関連記事同士を相互リンクする",
                "導線の切れているページを洗い出す",
            ],
        ),
        (
            "口コミの獲得促進",
            ["来店客に口コミ投稿を案内する", "既存の口コミへ返信する"],
        ),
        (
            "コンテンツの拡充",
            [
                "検索ニーズに合わせた記事を追加する",
                "既存記事に最新情報を追記する",
            ],
        ),
        (
            "対策キーワードの見直し",
            [
                "順位が落ちたキーワードを洗い出す",
                "検索ボリュームの近い代替語を検討する",
            ],
        ),
    ];

    STEPS
        .iter()
        .find(|(name, _)| phrase.contains(name))
        .map(|(_, steps)| steps.iter().copied().map(str::to_string).collect())
        .unwrap_or_else(|| {
            GENERIC_PROFILE
                .actions
                .iter()
                .take(2)
                .copied()
                .map(str::to_string)
                .collect()
        })
}

fn find_entry<'a>(
    breakdown: &'a [MetricBreakdownEntry],
    canonical: &str,
) -> Option<&'a MetricBreakdownEntry> {
    breakdown.iter().find(|e| {
        e.key == canonical || e.key.contains(canonical) || canonical.contains(e.key.as_str())
    })
}

fn fact_sentence(entry: &MetricBreakdownEntry, mode: ReportMode) -> String {
    let key = &entry.key;
    let curr = fmt_value(entry.curr);
    let prev = fmt_value(entry.prev);

    let mut fact = if entry.prev == 0.0 {
        if mode.is_simplified() {
            format!("「{key}」は今月{curr}でした（先月は実績なし）。")
        } else {
            format!("「{key}」は当月{curr}で、前月の実績はありませんでした。")
        }
    } else if mode.is_simplified() {
        format!("「{key}」は{prev}から{curr}に変わりました（{:+.1}%）。", entry.pct)
    } else {
        format!(
            "「{key}」は前月の{prev}から{curr}へ、{:+.1}%の変化となりました。",
            entry.pct
        )
    };

    if let (Some(points), Some(max)) = (entry.points, entry.max) {
        fact.push_str(&format!("（スコア{}/{}）", fmt_value(points), fmt_value(max)));
    }
    fact
}

fn fmt_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// First sentence of a section that mentions the metric, used as an extra
/// grounded cause.
fn mine_sentence(
    sections: &ReportSections,
    id: SectionId,
    metric: Option<&str>,
) -> Option<String> {
    let metric = metric?;
    let fragment = sections.get(id)?;
    let normalized = normalize::normalize_fragment(fragment);
    let short = bottleneck::short_metric(metric);

    normalize::split_sentences(&normalized)
        .into_iter()
        .find(|s| s.contains(metric) || s.contains(short))
}
