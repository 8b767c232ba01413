//! Domain errors for MSI measurement.

use thiserror::Error;

/// Domain-level errors that can occur while driving a generator.
///
/// A failing or early-failing trial is a search outcome, not an error. Only
/// infrastructure problems and unusable options end up here, and every one of
/// them aborts the whole measurement.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Generator {operation} failed: {message}")]
    Generator {
        operation: &'static str,
        message: String,
    },

    #[error("Generator returned malformed counters: {0}")]
    MalformedCounters(String),

    #[error("Invalid search options: {0}")]
    InvalidOptions(String),
}

impl DomainError {
    /// Shorthand for a failed generator command.
    pub fn generator(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Generator {
            operation,
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedCounters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_error_message() {
        let err = DomainError::generator("start", "connection refused");
        assert_eq!(err.to_string(), "Generator start failed: connection refused");
    }

    #[test]
    fn test_serde_error_maps_to_malformed_counters() {
        let parse_err = serde_json::from_str::<u64>("not a number").unwrap_err();
        let err: DomainError = parse_err.into();
        assert!(matches!(err, DomainError::MalformedCounters(_)));
    }
}
