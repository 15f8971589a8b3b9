//! Report identity, client context and assembled output shapes.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::sections::SectionId;

/// Vocabulary mode, set once per client and passed down the pipeline.
///
/// `Simplified` swaps in dictionaries and sentence templates aimed at
/// readers with no marketing background; it is never mutated mid-pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    #[default]
    Standard,
    Simplified,
}

impl ReportMode {
    pub fn is_simplified(&self) -> bool {
        matches!(self, ReportMode::Simplified)
    }
}

/// Persistence key for one report's highlight record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId {
    pub user_id: String,
    /// "YYYY-MM" of the current period.
    pub year_month: String,
    pub version: u32,
}

impl ReportId {
    pub fn new(user_id: impl Into<String>, year_month: impl Into<String>, version: u32) -> Self {
        Self {
            user_id: user_id.into(),
            year_month: year_month.into(),
            version,
        }
    }
}

/// Client context included in generator instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub industry: String,
    pub site_url: String,
}

/// Optional geographic focus; enables the area section of the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetArea {
    pub name: String,
}

impl TargetArea {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Extracted section fragments keyed by section id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSections {
    pub fragments: BTreeMap<SectionId, String>,
}

impl ReportSections {
    pub fn get(&self, id: SectionId) -> Option<&str> {
        self.fragments.get(&id).map(String::as_str)
    }

    pub fn insert(&mut self, id: SectionId, fragment: String) {
        self.fragments.insert(id, fragment);
    }
}

/// Final output of one orchestrated build.
///
/// `missing` lists sections the generator never produced within the retry
/// ceiling; their slots in `document` hold the fixed placeholder fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledReport {
    pub sections: ReportSections,
    pub document: String,
    pub missing: Vec<SectionId>,
    pub retries: u32,
}
