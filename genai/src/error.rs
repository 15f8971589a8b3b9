//! Error types for the generator client.

use thiserror::Error;

/// Result type alias using [`GenAiError`].
pub type Result<T> = std::result::Result<T, GenAiError>;

/// Errors that can occur when calling the text generator.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// Invalid or missing client configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Network or HTTP transport failure (includes timeouts).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API returned a non-success status.
    #[error("api error: {status}: {message}")]
    Api { status: u16, message: String },

    /// The response parsed but contained no usable text.
    #[error("empty completion")]
    EmptyCompletion,

    /// The response body did not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Parse(String),
}

impl GenAiError {
    /// Whether a retry at the transport level may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenAiError::Api { status, .. } => {
                matches!(*status, 408 | 429) || (500..600).contains(status)
            }
            GenAiError::Transport(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        for status in [408, 429, 500, 503] {
            let err = GenAiError::Api {
                status,
                message: String::new(),
            };
            assert!(err.is_retryable(), "status {status} should be retryable");
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for status in [400, 401, 403, 404] {
            let err = GenAiError::Api {
                status,
                message: String::new(),
            };
            assert!(!err.is_retryable(), "status {status} should not retry");
        }
        assert!(!GenAiError::EmptyCompletion.is_retryable());
    }
}
