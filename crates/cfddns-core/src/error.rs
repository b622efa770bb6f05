//! Error types for the DDNS updater
//!
//! Every failure in a run is fatal, so there is a single error enum shared by
//! the engine and all plugin crates.

use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS updater
#[derive(Error, Debug)]
pub enum Error {
    /// Network or connection failure (request could not complete)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not well-formed JSON of the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Zone or record absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Provider envelope reported failure
    #[error("{provider} API error{}: {message}", code_suffix(.code))]
    Provider {
        /// Provider name
        provider: String,
        /// First error code reported by the provider, if any
        code: Option<i64>,
        /// First error message reported by the provider
        message: String,
    },

    /// Non-success HTTP status with a body that could not be decoded
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body, trimmed and cut to a bounded prefix
        body: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Longest response body kept in an `Http` error, in characters
const MAX_HTTP_BODY_CHARS: usize = 200;

fn code_suffix(code: &Option<i64>) -> String {
    code.map(|c| format!(" ({c})")).unwrap_or_default()
}

impl Error {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    ///
    /// Long bodies (HTML error pages) are cut to `MAX_HTTP_BODY_CHARS`.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let trimmed = body.trim();

        let body = match trimmed.char_indices().nth(MAX_HTTP_BODY_CHARS) {
            Some((cut, _)) => format!("{}...", &trimmed[..cut]),
            None => trimmed.to_string(),
        };

        Self::Http { status, body }
    }

    /// Create a provider-specific error
    pub fn provider(
        provider: impl Into<String>,
        code: Option<i64>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            provider: provider.into(),
            code,
            message: message.into(),
        }
    }
}
