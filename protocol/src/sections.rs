//! Document sections and the template the generator is asked to fill.

use serde::Deserialize;
use serde::Serialize;

/// Identifier for one named region of the generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    GoodPoints,
    Issues,
    NextActions,
    AreaInsights,
    Outlook,
}

impl SectionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::Summary => "summary",
            SectionId::GoodPoints => "good_points",
            SectionId::Issues => "issues",
            SectionId::NextActions => "next_actions",
            SectionId::AreaInsights => "area_insights",
            SectionId::Outlook => "outlook",
        }
    }
}

/// One entry of the document template.
///
/// `marker` is the class token used to locate the fragment inside generated
/// markup; `label` is the human instruction name sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: SectionId,
    pub marker: &'static str,
    pub label: &'static str,
}

const TEMPLATE: &[SectionSpec] = &[
    SectionSpec {
        id: SectionId::Summary,
        marker: "report-summary",
        label: "全体サマリー",
    },
    SectionSpec {
        id: SectionId::GoodPoints,
        marker: "report-good-points",
        label: "良かった点",
    },
    SectionSpec {
        id: SectionId::Issues,
        marker: "report-issues",
        label: "課題点",
    },
    SectionSpec {
        id: SectionId::NextActions,
        marker: "report-actions",
        label: "改善アクション",
    },
    SectionSpec {
        id: SectionId::AreaInsights,
        marker: "report-area",
        label: "商圏・エリア動向",
    },
    SectionSpec {
        id: SectionId::Outlook,
        marker: "report-outlook",
        label: "来月の見通し",
    },
];

/// Ordered section template for one report build.
///
/// The area section only applies when the client has a target area; without
/// one it is filtered out and the generator is never asked for it.
pub fn section_template(with_area: bool) -> Vec<SectionSpec> {
    TEMPLATE
        .iter()
        .filter(|spec| with_area || spec.id != SectionId::AreaInsights)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn template_has_six_sections_with_area() {
        let specs = section_template(true);
        assert_eq!(specs.len(), 6);
        assert_eq!(specs[0].id, SectionId::Summary);
        assert_eq!(specs[5].id, SectionId::Outlook);
    }

    #[test]
    fn area_section_is_dropped_without_target_area() {
        let specs = section_template(false);
        assert_eq!(specs.len(), 5);
        assert!(specs.iter().all(|s| s.id != SectionId::AreaInsights));
    }

    #[test]
    fn markers_are_unique() {
        let specs = section_template(true);
        for (i, a) in specs.iter().enumerate() {
            for b in specs.iter().skip(i + 1) {
                assert_ne!(a.marker, b.marker);
            }
        }
    }
}
