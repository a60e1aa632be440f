//! Error handling for the weather impact backend
//!
//! The analysis engine never fails on data gaps; these errors cover what
//! surrounds it: files, decoding, configuration and input validation.

use shared::ValidationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Input errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    // Decoding errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Stable code for log lines and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::MissingColumn(_) => "MISSING_COLUMN",
            AppError::Configuration(_) | AppError::ConfigError(_) => "CONFIGURATION_ERROR",
            AppError::InvalidTimezone(_) => "INVALID_TIMEZONE",
            AppError::Io(_) => "IO_ERROR",
            AppError::Csv(_) => "CSV_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) | AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Code for an error that reached the CLI boundary as `anyhow::Error`
    pub fn code_of(err: &anyhow::Error) -> &'static str {
        if let Some(app) = err.downcast_ref::<AppError>() {
            app.code()
        } else if err.is::<config::ConfigError>() {
            "CONFIGURATION_ERROR"
        } else if err.is::<serde_json::Error>() {
            "JSON_ERROR"
        } else if err.is::<std::io::Error>() {
            "IO_ERROR"
        } else {
            "INTERNAL_ERROR"
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::OutOfRange { field, .. } | ValidationError::NotFinite { field } => {
                (*field).to_string()
            }
            ValidationError::Inconsistent(_) => "input".to_string(),
        };
        AppError::Validation {
            field,
            message: err.to_string(),
        }
    }
}

/// Result type alias for backend operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_conversion() {
        let err: AppError = shared::validate_percentage("humidity_pct", 140.0)
            .unwrap_err()
            .into();
        match &err {
            AppError::Validation { field, message } => {
                assert_eq!(field, "humidity_pct");
                assert!(message.contains("140"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_code_of_boundary_errors() {
        let app = anyhow::Error::new(AppError::MissingColumn("valor_pago".into()));
        assert_eq!(AppError::code_of(&app), "MISSING_COLUMN");

        let config = anyhow::Error::new(config::ConfigError::NotFound("business".into()));
        assert_eq!(AppError::code_of(&config), "CONFIGURATION_ERROR");

        let json = anyhow::Error::new(serde_json::from_str::<u32>("x").unwrap_err());
        assert_eq!(AppError::code_of(&json), "JSON_ERROR");

        assert_eq!(AppError::code_of(&anyhow::anyhow!("boom")), "INTERNAL_ERROR");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::MissingColumn("Data_Hora".into()).code(), "MISSING_COLUMN");
        assert_eq!(
            AppError::InvalidTimezone("Mars/Olympus".into()).to_string(),
            "Invalid timezone: Mars/Olympus"
        );
    }
}
