//! Error handling for sashimi rendering

use thiserror::Error;

/// Hard failures that terminate a render.
///
/// Recoverable geometry cases (clamped junction endpoints, a degenerate axis
/// range, empty junction sets) are resolved inside the component that meets
/// them and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SashimiError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Empty region or profile: {message}")]
    EmptyInput { message: String },
}

impl SashimiError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput { message: message.into() }
    }

    pub fn empty<S: Into<String>>(message: S) -> Self {
        Self::EmptyInput { message: message.into() }
    }
}

/// Result type for sashimi operations
pub type SashimiResult<T> = Result<T, SashimiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SashimiError::configuration("exon_scale must be positive");
        assert!(matches!(err, SashimiError::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: exon_scale must be positive");
    }

    #[test]
    fn test_error_kinds_are_distinct() {
        assert!(matches!(SashimiError::malformed("x"), SashimiError::MalformedInput { .. }));
        assert!(matches!(SashimiError::empty("x"), SashimiError::EmptyInput { .. }));
        assert_ne!(SashimiError::malformed("x"), SashimiError::empty("x"));
    }
}
