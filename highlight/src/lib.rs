//! Highlight synthesis pipeline.
//!
//! Compresses a generated marketing-report document into three short
//! canonical phrases (the most important result, the top issue, and an
//! improvement opportunity) plus a fact/causes/actions detail block per
//! phrase. Everything here is deterministic and pattern-driven: given the
//! same document, mode and target area, the output is identical, which is
//! what makes lazy backfill at the persistence boundary safe.
//!
//! The heuristics are Japanese-only by design. Keyword lists and dictionary
//! entries are ordered; first match wins, and that ordering is a committed
//! contract because downstream consumers depend on the exact phrases.

pub mod action;
pub mod bottleneck;
pub mod context;
pub mod detail;
pub mod dict;
pub mod finalize;
pub mod keywords;
pub mod normalize;
pub mod phrase;
pub mod pipeline;

pub use context::PhraseContext;
pub use finalize::finalize;
pub use pipeline::HighlightSynthesizer;
