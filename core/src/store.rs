//! Highlight persistence with lazy backfill.

use async_trait::async_trait;
use dashmap::DashMap;
use mieru_highlight::HighlightSynthesizer;
use mieru_protocol::HighlightRecord;
use mieru_protocol::MetricBreakdownEntry;
use mieru_protocol::ReportId;
use mieru_protocol::ReportMode;
use mieru_protocol::ReportSections;
use mieru_protocol::TargetArea;
use tracing::debug;

use crate::error::Result;

/// Storage seam for highlight records. One upsert per report identity;
/// records are immutable once written.
#[async_trait]
pub trait HighlightStore: Send + Sync {
    async fn load(&self, id: &ReportId) -> Result<Option<HighlightRecord>>;
    async fn save(&self, id: &ReportId, record: &HighlightRecord) -> Result<()>;
}

/// In-memory store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryHighlightStore {
    records: DashMap<ReportId, HighlightRecord>,
}

impl MemoryHighlightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HighlightStore for MemoryHighlightStore {
    async fn load(&self, id: &ReportId) -> Result<Option<HighlightRecord>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, id: &ReportId, record: &HighlightRecord) -> Result<()> {
        self.records.insert(id.clone(), record.clone());
        Ok(())
    }
}

/// Read-through highlight access for one client mode.
///
/// Reports generated before highlights existed have no stored record; the
/// first read synthesizes one from the stored document and persists it.
/// Pipeline determinism makes the backfill idempotent.
#[derive(Debug)]
pub struct HighlightService<S> {
    store: S,
    synthesizer: HighlightSynthesizer,
}

impl<S: HighlightStore> HighlightService<S> {
    pub fn new(store: S, mode: ReportMode) -> Self {
        Self {
            store,
            synthesizer: HighlightSynthesizer::new(mode),
        }
    }

    pub async fn get_or_synthesize(
        &self,
        id: &ReportId,
        document: &str,
        breakdown: &[MetricBreakdownEntry],
        sections: &ReportSections,
        target_area: Option<&TargetArea>,
    ) -> Result<HighlightRecord> {
        if let Some(record) = self.store.load(id).await? {
            return Ok(record);
        }

        debug!(
            user = %id.user_id,
            month = %id.year_month,
            version = id.version,
            "no stored highlight record, synthesizing"
        );
        let triple = self.synthesizer.synthesize(document, target_area);
        let detail = self.synthesizer.detail(&triple, breakdown, sections);
        let record = HighlightRecord { triple, detail };
        self.store.save(id, &record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use mieru_protocol::HighlightDetail;
    use mieru_protocol::HighlightTriple;
    use mieru_protocol::TripleDetail;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::CoreError;

    fn id() -> ReportId {
        ReportId::new("user-1", "2026-07", 1)
    }

    fn stored_record() -> HighlightRecord {
        HighlightRecord {
            triple: HighlightTriple {
                most_important: "保存済みの結果".to_string(),
                top_issue: "保存済みの課題".to_string(),
                opportunity: "保存済みの施策".to_string(),
            },
            detail: TripleDetail {
                most_important: HighlightDetail::default(),
                top_issue: HighlightDetail::default(),
                opportunity: HighlightDetail::default(),
            },
        }
    }

    #[tokio::test]
    async fn stored_record_short_circuits_synthesis() {
        let store = MemoryHighlightStore::new();
        store.save(&id(), &stored_record()).await.unwrap();

        let service = HighlightService::new(store, ReportMode::Standard);
        let record = service
            .get_or_synthesize(&id(), "セッション数が増加しました。", &[], &ReportSections::default(), None)
            .await
            .unwrap();

        // The document text is ignored when a record already exists.
        assert_eq!(record, stored_record());
    }

    struct FailingStore;

    #[async_trait]
    impl HighlightStore for FailingStore {
        async fn load(&self, _id: &ReportId) -> Result<Option<HighlightRecord>> {
            Err(CoreError::Store("connection refused".to_string()))
        }

        async fn save(&self, _id: &ReportId, _record: &HighlightRecord) -> Result<()> {
            Err(CoreError::Store("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn store_failure_propagates_to_the_caller() {
        let service = HighlightService::new(FailingStore, ReportMode::Standard);
        let err = service
            .get_or_synthesize(&id(), "本文です。", &[], &ReportSections::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
    }

    #[tokio::test]
    async fn missing_record_is_backfilled_and_persisted() {
        let service = HighlightService::new(MemoryHighlightStore::new(), ReportMode::Standard);
        let doc = "当月のセッション数は120で、前月の80から+50.0%増加しました。";

        let first = service
            .get_or_synthesize(&id(), doc, &[], &ReportSections::default(), None)
            .await
            .unwrap();
        assert_eq!(first.triple.most_important, "セッション数の増加");

        // Second read hits the stored record and stays identical.
        let second = service
            .get_or_synthesize(&id(), doc, &[], &ReportSections::default(), None)
            .await
            .unwrap();
        assert_eq!(first, second);
    }
}
