//! Instruction payload construction for the text generator.

use mieru_protocol::ClientProfile;
use mieru_protocol::PeriodDataset;
use mieru_protocol::ReportMode;
use mieru_protocol::SectionSpec;
use mieru_protocol::TargetArea;

/// Rows rendered per ranked breakdown. Deeper rows rarely influence the
/// prose and inflate the payload.
const BREAKDOWN_ROW_LIMIT: usize = 5;

/// Build one instruction payload asking for exactly `batch`.
///
/// The payload names each requested section with its container marker,
/// includes a compact fact sheet per period, and closes with mode-specific
/// style rules. Sections outside the batch are explicitly excluded so a
/// retry never regenerates what is already extracted.
pub fn build_instruction(
    batch: &[SectionSpec],
    current: &PeriodDataset,
    prior: &PeriodDataset,
    profile: &ClientProfile,
    target_area: Option<&TargetArea>,
    mode: ReportMode,
) -> String {
    let mut out = String::new();

    out.push_str("あなたはWebサイトの月次マーケティングレポートの執筆者です。\n");
    out.push_str(&format!(
        "クライアント: {}（業種: {} / サイト: {}）\n",
        profile.name, profile.industry, profile.site_url
    ));
    if let Some(area) = target_area {
        out.push_str(&format!("対象エリア: {}\n", area.name));
    }

    out.push_str("\n今回作成するセクション:\n");
    for spec in batch {
        out.push_str(&format!(
            "- {}: 内容全体を <div class=\"{}\"> ... </div> で囲んで出力してください\n",
            spec.label, spec.marker
        ));
    }

    out.push_str(&format!("\n[当月データ: {}]\n", current.label));
    push_fact_sheet(&mut out, current);
    out.push_str(&format!("\n[前月データ: {}]\n", prior.label));
    push_fact_sheet(&mut out, prior);

    out.push('\n');
    out.push_str(style_rules(mode));
    out.push_str("指定したセクション以外は出力しないでください。\n");

    out
}

fn style_rules(mode: ReportMode) -> &'static str {
    if mode.is_simplified() {
        "専門用語を避け、マーケティングの知識がない読者にも伝わるやさしい言葉で書いてください。\n"
    } else {
        "簡潔なビジネス文体で、数値の根拠を示しながら書いてください。\n"
    }
}

fn push_fact_sheet(out: &mut String, dataset: &PeriodDataset) {
    for (key, value) in &dataset.totals {
        out.push_str(&format!("- {key}: {}\n", format_value(*value)));
    }
    for (dimension, rows) in &dataset.breakdowns {
        out.push_str(&format!("- {dimension}:\n"));
        for row in rows.iter().take(BREAKDOWN_ROW_LIMIT) {
            out.push_str(&format!("  - {}: {}\n", row.name, format_value(row.value)));
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
