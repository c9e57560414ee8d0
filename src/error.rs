//! Error types for forecasting and reporting

use thiserror::Error;

/// Errors raised by the forecast library
#[derive(Debug, Error)]
pub enum ForecastError {
    /// An assumption is outside its documented range. Raised before the recurrence runs.
    #[error("invalid input for `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ForecastError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ForecastError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's assumptions rather than the environment
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ForecastError::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = ForecastError::invalid("take_rate_pct", "must be between 0 and 100, got 120");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "invalid input for `take_rate_pct`: must be between 0 and 100, got 120"
        );
    }

    #[test]
    fn test_json_error_is_not_invalid_input() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ForecastError = parse.into();
        assert!(!err.is_invalid_input());
    }
}
