//! Report build orchestration.
//!
//! Drives the external text generator through bounded retries to assemble a
//! complete multi-section report document, extracts individual sections from
//! its unreliable output, and serves persisted highlight records with lazy
//! backfill. Nothing here is fatal: the worst outcome is a document with
//! placeholder sections and default highlight phrases.

mod assemble;
mod config;
mod error;
mod extract;
mod generator;
mod prompt;
mod store;

pub use assemble::AssemblyState;
pub use assemble::ReportAssembler;
pub use assemble::Step;
pub use assemble::placeholder;
pub use config::AssemblyConfig;
pub use config::DEFAULT_RETRY_CEILING;
pub use config::DEFAULT_SECTION_BATCH;
pub use error::CoreError;
pub use error::Result;
pub use extract::extract;
pub use extract::normalize_response;
pub use generator::TextGenerator;
pub use prompt::build_instruction;
pub use store::HighlightService;
pub use store::HighlightStore;
pub use store::MemoryHighlightStore;
