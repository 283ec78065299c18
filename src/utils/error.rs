use thiserror::Error;

#[derive(Error, Debug)]
pub enum LensError {
    #[error("Catalog request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

impl LensError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LensError::ApiError(_) => ErrorCategory::Network,
            LensError::ConfigError { .. }
            | LensError::InvalidConfigValueError { .. }
            | LensError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LensError::CsvError(_)
            | LensError::SerializationError(_)
            | LensError::ProcessingError { .. }
            | LensError::ValidationError { .. } => ErrorCategory::Data,
            LensError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LensError::ApiError(_) => ErrorSeverity::Medium,
            LensError::ValidationError { .. } => ErrorSeverity::Low,
            LensError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the catalog endpoint and your network connection, then retry"
            }
            ErrorCategory::Configuration => {
                "Review the CLI flags or TOML session file for the reported field"
            }
            ErrorCategory::Data => {
                "Inspect the prescription/catalog JSON for the reported shape problem"
            }
            ErrorCategory::System => "Check disk space and output directory permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LensError::ApiError(_) => "Could not reach the lens catalog".to_string(),
            LensError::ValidationError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_covers_config_and_data_errors() {
        let e = LensError::MissingConfigError {
            field: "prescription".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::Configuration);
        assert_eq!(e.severity(), ErrorSeverity::High);

        let e = LensError::ValidationError {
            message: "unknown lens type: 'varifocal'".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::Data);
        assert_eq!(e.severity(), ErrorSeverity::Low);
        assert_eq!(e.user_friendly_message(), "unknown lens type: 'varifocal'");
    }
}
