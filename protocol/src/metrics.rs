//! Period comparison data supplied by the metrics collaborator.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// One row of a ranked breakdown (e.g. top landing pages, top queries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub name: String,
    pub value: f64,
}

/// Read-only metrics for one comparison window (current or prior period).
///
/// The core never interprets the field names; it only formats named totals
/// and ranked lists into fact sheets for the generator. `BTreeMap` keeps the
/// rendered order stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodDataset {
    /// Human label for the window, e.g. "2026-07".
    pub label: String,
    /// Named numeric totals, e.g. "セッション数" -> 1234.0.
    pub totals: BTreeMap<String, f64>,
    /// Ranked breakdowns by dimension, e.g. "流入チャネル" -> rows.
    pub breakdowns: BTreeMap<String, Vec<BreakdownRow>>,
}

impl PeriodDataset {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            totals: BTreeMap::new(),
            breakdowns: BTreeMap::new(),
        }
    }

    pub fn with_total(mut self, key: impl Into<String>, value: f64) -> Self {
        self.totals.insert(key.into(), value);
        self
    }

    pub fn with_breakdown(mut self, dimension: impl Into<String>, rows: Vec<BreakdownRow>) -> Self {
        self.breakdowns.insert(dimension.into(), rows);
        self
    }
}

/// Percent change between two period values.
///
/// Convention: `100.0` when there is no prior baseline but a current value,
/// `0.0` when both are zero. The sign always matches `curr - prev` when
/// `prev != 0`.
pub fn percent_change(curr: f64, prev: f64) -> f64 {
    if prev == 0.0 {
        if curr > 0.0 { 100.0 } else { 0.0 }
    } else {
        (curr - prev) / prev * 100.0
    }
}

/// One named KPI's current/previous comparison, with an optional 0..max score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdownEntry {
    pub key: String,
    pub curr: f64,
    pub prev: f64,
    pub pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl MetricBreakdownEntry {
    /// Build an entry, deriving `pct` from the period values.
    pub fn new(key: impl Into<String>, curr: f64, prev: f64) -> Self {
        Self {
            key: key.into(),
            curr,
            prev,
            pct: percent_change(curr, prev),
            points: None,
            max: None,
        }
    }

    /// Attach a KPI score out of `max`.
    pub fn with_score(mut self, points: f64, max: f64) -> Self {
        self.points = Some(points);
        self.max = Some(max);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn percent_change_sign_matches_delta() {
        assert!(percent_change(120.0, 80.0) > 0.0);
        assert!(percent_change(60.0, 80.0) < 0.0);
        assert_eq!(percent_change(120.0, 80.0), 50.0);
    }

    #[test]
    fn percent_change_zero_baseline_convention() {
        assert_eq!(percent_change(5.0, 0.0), 100.0);
        assert_eq!(percent_change(0.0, 0.0), 0.0);
    }

    #[test]
    fn entry_derives_pct() {
        let entry = MetricBreakdownEntry::new("セッション数", 120.0, 80.0);
        assert_eq!(entry.pct, 50.0);
        assert_eq!(entry.points, None);

        let scored = entry.with_score(3.0, 5.0);
        assert_eq!(scored.points, Some(3.0));
        assert_eq!(scored.max, Some(5.0));
    }
}
