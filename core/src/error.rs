use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors surfaced by the core services.
///
/// The assembly loop itself never returns these: generator and extraction
/// failures consume a retry and leave sections missing. Only the persistence
/// boundary propagates errors to the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("highlight store error: {0}")]
    Store(String),
}
