//! Client SDK for the external text generator.
//!
//! The report orchestrator treats the generator as an unreliable
//! collaborator: calls may time out, return non-2xx, or produce text missing
//! the requested sections. This crate only handles the transport half of
//! that contract (auth, JSON wire shape, timeouts and bounded retry on
//! retryable statuses). Section-level validation lives in `mieru-core`.

mod client;
mod config;
mod error;
mod types;

pub use client::Client;
pub use config::ClientConfig;
pub use error::GenAiError;
pub use error::Result;
pub use types::GenerationRequest;
pub use types::GenerationResponse;
