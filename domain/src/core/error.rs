//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DomainError {
    /// Check if this error comes from persona or discussion configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, DomainError::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let error = DomainError::InvalidConfiguration("unknown role 'bard'".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: unknown role 'bard'"
        );
        assert!(error.is_configuration());
    }
}
