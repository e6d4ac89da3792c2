use thiserror::Error;

/// Analysis error types.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        context: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("No indicator snapshot available; run analyze first")]
    NotAnalyzed,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Shorthand for an `InsufficientData` error.
    pub fn insufficient(context: &'static str, required: usize, actual: usize) -> Self {
        AnalysisError::InsufficientData {
            context,
            required,
            actual,
        }
    }

    /// Shorthand for an `InvalidConfiguration` error.
    pub fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = AnalysisError::insufficient("indicators", 2, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient data for indicators: need at least 2, got 1"
        );
    }

    #[test]
    fn test_invalid_configuration_message() {
        let err = AnalysisError::invalid("rsi_period must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: rsi_period must be positive"
        );
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str::<u32>("nope");
        let err: AnalysisError = parse.unwrap_err().into();
        assert!(matches!(err, AnalysisError::SerdeJson(_)));
    }
}
