//! Shared data model for the Mieru report pipeline.
//!
//! This crate only carries serde types and their constructors. Business
//! logic lives in `mieru-highlight` (synthesis) and `mieru-core`
//! (orchestration); keeping the model here lets both sides agree on wire
//! and storage shapes without depending on each other.

mod highlight;
mod metrics;
mod report;
mod sections;

pub use highlight::HighlightDetail;
pub use highlight::HighlightRecord;
pub use highlight::HighlightTriple;
pub use highlight::TripleDetail;
pub use metrics::BreakdownRow;
pub use metrics::MetricBreakdownEntry;
pub use metrics::PeriodDataset;
pub use metrics::percent_change;
pub use report::AssembledReport;
pub use report::ClientProfile;
pub use report::ReportId;
pub use report::ReportMode;
pub use report::ReportSections;
pub use report::TargetArea;
pub use sections::SectionId;
pub use sections::SectionSpec;
pub use sections::section_template;
