//! The generation orchestrator.
//!
//! Drives the unreliable generator through bounded retries until every
//! template section is extracted or the retry ceiling is reached. Sections
//! still missing at final assembly get a fixed placeholder fragment, so the
//! produced document is always structurally complete.

use mieru_protocol::AssembledReport;
use mieru_protocol::ClientProfile;
use mieru_protocol::PeriodDataset;
use mieru_protocol::ReportMode;
use mieru_protocol::ReportSections;
use mieru_protocol::SectionId;
use mieru_protocol::SectionSpec;
use mieru_protocol::TargetArea;
use mieru_protocol::section_template;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AssemblyConfig;
use crate::extract;
use crate::generator::TextGenerator;
use crate::prompt;

/// What the assembly loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Ask the generator for these sections.
    Request(Vec<SectionSpec>),
    /// Every section is present, or the retry ceiling is reached.
    Done,
}

/// Accumulated state of one document build. Local to a single `assemble`
/// call, never shared.
#[derive(Debug)]
pub struct AssemblyState {
    template: Vec<SectionSpec>,
    sections: ReportSections,
    retries: u32,
    config: AssemblyConfig,
}

impl AssemblyState {
    pub fn new(template: Vec<SectionSpec>, config: AssemblyConfig) -> Self {
        Self {
            template,
            sections: ReportSections::default(),
            retries: 0,
            config,
        }
    }

    /// Template sections with no extracted fragment yet, in template order.
    pub fn missing(&self) -> Vec<SectionSpec> {
        self.template
            .iter()
            .filter(|spec| self.sections.get(spec.id).is_none_or(str::is_empty))
            .cloned()
            .collect()
    }

    /// Derive the next step. Terminal when nothing is missing or the retry
    /// counter has reached the ceiling.
    pub fn next_step(&self) -> Step {
        let missing = self.missing();
        if missing.is_empty() || self.retries >= self.config.retry_ceiling {
            Step::Done
        } else {
            Step::Request(
                missing
                    .into_iter()
                    .take(self.config.section_batch)
                    .collect(),
            )
        }
    }

    fn record(&mut self, id: SectionId, fragment: String) {
        self.sections.insert(id, fragment);
    }
}

/// Orchestrates one report build against a [`TextGenerator`].
#[derive(Debug)]
pub struct ReportAssembler<G> {
    generator: G,
    mode: ReportMode,
    config: AssemblyConfig,
}

impl<G: TextGenerator> ReportAssembler<G> {
    pub fn new(generator: G, mode: ReportMode) -> Self {
        Self {
            generator,
            mode,
            config: AssemblyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AssemblyConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the full document for one report period.
    ///
    /// Never fails: generator errors and unextractable sections consume a
    /// retry and are reported as tracing events; whatever is still missing
    /// after the ceiling is filled with placeholder fragments.
    pub async fn assemble(
        &self,
        current: &PeriodDataset,
        prior: &PeriodDataset,
        profile: &ClientProfile,
        target_area: Option<&TargetArea>,
    ) -> AssembledReport {
        let template = section_template(target_area.is_some());
        let mut state = AssemblyState::new(template.clone(), self.config);

        while let Step::Request(batch) = state.next_step() {
            let instruction =
                prompt::build_instruction(&batch, current, prior, profile, target_area, self.mode);

            match self.generator.generate(&instruction).await {
                Ok(raw) => {
                    let normalized = extract::normalize_response(&raw);
                    // The generator sometimes produces sections beyond the
                    // requested batch; harvest every missing one so those
                    // responses are not wasted.
                    for spec in state.missing() {
                        let fragment = extract::extract(&normalized, &spec);
                        if fragment.is_empty() {
                            debug!(section = spec.id.as_str(), "section not extracted");
                        } else {
                            debug!(
                                section = spec.id.as_str(),
                                chars = fragment.chars().count(),
                                "section extracted"
                            );
                            state.record(spec.id, fragment);
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "generator call failed, batch stays missing");
                }
            }

            state.retries += 1;
            info!(
                iteration = state.retries,
                missing = state.missing().len(),
                "assembly iteration finished"
            );
        }

        let missing: Vec<SectionId> = state.missing().iter().map(|spec| spec.id).collect();
        if !missing.is_empty() {
            warn!(?missing, retries = state.retries, "assembly finished with placeholder sections");
        }

        let document = template
            .iter()
            .map(|spec| {
                state
                    .sections
                    .get(spec.id)
                    .map_or_else(|| placeholder(spec), str::to_string)
            })
            .collect::<Vec<_>>()
            .join("\n");

        AssembledReport {
            sections: state.sections,
            document,
            missing,
            retries: state.retries,
        }
    }
}

/// Fixed fragment substituted for a section the generator never produced.
pub fn placeholder(spec: &SectionSpec) -> String {
    format!(
        "<div class=\"{}\"><p>{}は今回作成できませんでした。次回のレポートで改めてお届けします。</p></div>",
        spec.marker, spec.label
    )
}
