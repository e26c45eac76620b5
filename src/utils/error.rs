use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Input is not valid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl NormalizeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            NormalizeError::IoError(_) => ErrorCategory::Io,
            NormalizeError::EncodingError(_) => ErrorCategory::Input,
            NormalizeError::CsvError(_) | NormalizeError::SerializationError(_) => {
                ErrorCategory::Output
            }
            NormalizeError::UrlError(_)
            | NormalizeError::ConfigValidationError { .. }
            | NormalizeError::InvalidConfigValueError { .. }
            | NormalizeError::MissingConfigError { .. } => ErrorCategory::Configuration,
            NormalizeError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io | ErrorCategory::Output => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Processing => ErrorSeverity::Medium,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NormalizeError::IoError(e) => format!("Could not read or write a file: {}", e),
            NormalizeError::EncodingError(_) => {
                "The statement file is not UTF-8 text".to_string()
            }
            NormalizeError::CsvError(e) => format!("Could not write the output CSV: {}", e),
            NormalizeError::SerializationError(e) => {
                format!("Could not render the run report: {}", e)
            }
            NormalizeError::MissingConfigError { field } => {
                format!("Missing setting '{}'", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the input file exists and the output directory is writable",
            ErrorCategory::Input => "Re-export the statement as UTF-8 CSV",
            ErrorCategory::Output => "Check free disk space and permissions of the output directory",
            ErrorCategory::Configuration => "Review the command-line flags or the TOML config file",
            ErrorCategory::Processing => "Run again with --debug to inspect the parsed rows",
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_critical() {
        let err = NormalizeError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.csv",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("missing.csv"));
    }

    #[test]
    fn test_config_errors_point_at_flags() {
        let err = NormalizeError::MissingConfigError {
            field: "input.path".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.user_friendly_message(), "Missing setting 'input.path'");
        assert!(err.recovery_suggestion().contains("TOML"));
    }

    #[test]
    fn test_report_serialization_errors_are_output_errors() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = NormalizeError::from(source);
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err
            .user_friendly_message()
            .starts_with("Could not render the run report"));
    }
}
