//! Error types for pbddns
//!
//! Every fallible operation in the workspace returns [`Result`]. Nothing in
//! the library terminates the process; the binary maps errors to exit codes.

use thiserror::Error;

/// Result type alias for pbddns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing fields, bad endpoint, unreadable file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input supplied by the caller (e.g. a malformed domain name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered, but not in the shape we expected
    #[error("Unexpected response from {provider}: {message}")]
    UnexpectedResponse {
        /// Provider name
        provider: String,
        /// What was wrong with the response
        message: String,
    },

    /// The provider refused to list records for the domain.
    ///
    /// Usually the domain is not in the account, or API access has not been
    /// switched on for it. No record is mutated after this error.
    #[error("Provider rejected domain {domain}: {message}")]
    DomainRejected {
        /// Root domain that was queried
        domain: String,
        /// Message reported by the provider
        message: String,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an unexpected-response error
    pub fn unexpected(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a domain-rejected error
    pub fn domain_rejected(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DomainRejected {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from user-supplied input or configuration
    /// rather than from talking to the provider.
    pub fn is_usage_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::InvalidInput(_))
    }
}
