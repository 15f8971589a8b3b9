//! Assembly loop tuning knobs.

/// Sections requested per generator call. Two keeps each response well under
/// the generator's output-length limits.
pub const DEFAULT_SECTION_BATCH: usize = 2;

/// Hard cap on assembly iterations. Bounds the loop even against a generator
/// that echoes section markers without content.
pub const DEFAULT_RETRY_CEILING: u32 = 3;

/// Tuning for one [`ReportAssembler`](crate::ReportAssembler).
///
/// The defaults are empirically tuned values carried over from production;
/// downstream output depends on them, so overrides are for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyConfig {
    pub section_batch: usize,
    pub retry_ceiling: u32,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            section_batch: DEFAULT_SECTION_BATCH,
            retry_ceiling: DEFAULT_RETRY_CEILING,
        }
    }
}

impl AssemblyConfig {
    pub fn with_section_batch(mut self, section_batch: usize) -> Self {
        self.section_batch = section_batch;
        self
    }

    pub fn with_retry_ceiling(mut self, retry_ceiling: u32) -> Self {
        self.retry_ceiling = retry_ceiling;
        self
    }
}
