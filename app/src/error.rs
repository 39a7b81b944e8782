//! Error types for the page controller.
//!
//! Only fragment loading has a user-visible failure path; configuration errors
//! are reported to the console by the entry point, which then falls back to
//! the default configuration.

use thiserror::Error;

/// Failure while fetching a shared HTML fragment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("unreadable response body: {0}")]
    Body(String),
}

/// Failure while loading a [`PageConfig`](crate::config::PageConfig) override.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid page config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid page config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_error_messages() {
        assert_eq!(FragmentError::Status(404).to_string(), "HTTP 404");
        assert_eq!(
            FragmentError::Network("offline".into()).to_string(),
            "network error: offline"
        );
    }

    #[test]
    fn config_error_wraps_serde() {
        let err: ConfigError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("invalid page config JSON"));
    }
}
