//! End-to-end flow: assemble a document from scripted generator output, then
//! serve its highlight record through the lazy-backfill service.

use async_trait::async_trait;
use mieru_core::HighlightService;
use mieru_core::MemoryHighlightStore;
use mieru_core::ReportAssembler;
use mieru_core::TextGenerator;
use mieru_protocol::ClientProfile;
use mieru_protocol::MetricBreakdownEntry;
use mieru_protocol::PeriodDataset;
use mieru_protocol::ReportId;
use mieru_protocol::ReportMode;
use mieru_protocol::section_template;
use pretty_assertions::assert_eq;

struct FixedGenerator(String);

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(&self, _instruction: &str) -> mieru_genai::Result<String> {
        Ok(self.0.clone())
    }
}

fn generated_document() -> String {
    section_template(false)
        .iter()
        .map(|spec| {
            let body = match spec.marker {
                "report-summary" => "当月のセッション数は120で、前月の80から増加しました。",
                "report-issues" => "クリック数が減少しており、成果転換に課題があります。",
                "report-actions" => "引き続きSEO対策を進めましょう。",
                _ => "特筆すべき変化はありませんでした。",
            };
            format!("<div class=\"{}\"><p>{body}</p></div>", spec.marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tokio::test]
async fn assembled_report_feeds_highlight_backfill() -> anyhow::Result<()> {
    let current = PeriodDataset::new("2026-07").with_total("セッション数", 120.0);
    let prior = PeriodDataset::new("2026-06").with_total("セッション数", 80.0);
    let profile = ClientProfile {
        name: "テスト商店".to_string(),
        industry: "小売".to_string(),
        site_url: "https://example.jp".to_string(),
    };

    let assembler = ReportAssembler::new(FixedGenerator(generated_document()), ReportMode::Standard);
    let report = assembler.assemble(&current, &prior, &profile, None).await;

    assert!(report.missing.is_empty());
    assert_eq!(report.retries, 1);

    let breakdown = vec![
        MetricBreakdownEntry::new("セッション数", 120.0, 80.0),
        MetricBreakdownEntry::new("クリック数", 40.0, 60.0),
    ];
    let service = HighlightService::new(MemoryHighlightStore::new(), ReportMode::Standard);
    let id = ReportId::new("user-1", "2026-07", 1);

    let record = service
        .get_or_synthesize(&id, &report.document, &breakdown, &report.sections, None)
        .await?;

    assert_eq!(record.triple.most_important, "セッション数の増加");
    // The abstract "SEO対策" suggestion is replaced with a concrete action.
    assert_ne!(record.triple.opportunity, "SEO対策");
    assert!(!record.detail.top_issue.causes.is_empty());

    let again = service
        .get_or_synthesize(&id, &report.document, &breakdown, &report.sections, None)
        .await?;
    assert_eq!(record, again);

    Ok(())
}
