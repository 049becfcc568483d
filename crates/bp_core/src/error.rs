use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Write failure: {0}")]
    Write(String),

    #[error("Topics error: {0}")]
    Topics(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// How a failed provider call should be treated by the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderErrorKind {
    RateLimited,
    /// Network errors, timeouts and server-side failures.
    Transient,
    /// The request itself is unsatisfiable; retrying cannot help.
    Invalid,
    Unknown,
}

impl ProviderErrorKind {
    pub fn is_retryable(self) -> bool {
        !matches!(self, ProviderErrorKind::Invalid)
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderErrorKind::RateLimited => "rate limited",
            ProviderErrorKind::Transient => "transient",
            ProviderErrorKind::Invalid => "invalid request",
            ProviderErrorKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transient, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Invalid, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unknown, message)
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_is_terminal() {
        assert!(ProviderErrorKind::RateLimited.is_retryable());
        assert!(ProviderErrorKind::Transient.is_retryable());
        assert!(ProviderErrorKind::Unknown.is_retryable());
        assert!(!ProviderErrorKind::Invalid.is_retryable());
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::rate_limited("quota exhausted");
        assert_eq!(err.to_string(), "rate limited: quota exhausted");

        let wrapped: Error = err.into();
        assert_eq!(wrapped.to_string(), "Provider error: rate limited: quota exhausted");
    }
}
