use thiserror::Error;

#[derive(Error, Debug)]
pub enum CampError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid domain data: {message}")]
    DataError { message: String },

    #[error("Unknown challenge set: {name}")]
    UnknownSetError { name: String },
}

/// Severity drives the CLI exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CampError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampError::ApiError(_) => ErrorSeverity::Medium,
            CampError::CsvError(_) | CampError::SerializationError(_) => ErrorSeverity::High,
            CampError::ZipError(_) | CampError::IoError(_) => ErrorSeverity::Critical,
            CampError::JoinError(_) => ErrorSeverity::High,
            CampError::ConfigError { .. }
            | CampError::InvalidConfigValueError { .. }
            | CampError::MissingConfigError { .. }
            | CampError::UnknownSetError { .. } => ErrorSeverity::High,
            CampError::DataError { .. } => ErrorSeverity::Medium,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CampError::ApiError(_) => {
                "Could not reach the practice API. The network demos need outbound HTTPS."
                    .to_string()
            }
            CampError::IoError(_) => {
                "Could not read or write under the output directory.".to_string()
            }
            CampError::UnknownSetError { name } => {
                format!("'{}' is not a challenge set this build knows about.", name)
            }
            CampError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            CampError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required but missing.", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CampError::ApiError(_) => "Re-run with --offline to skip the HTTP challenge set.",
            CampError::IoError(_) | CampError::ZipError(_) => {
                "Check that --output-path points to a writable directory."
            }
            CampError::UnknownSetError { .. } => {
                "Run with --help to list the available challenge sets."
            }
            CampError::ConfigError { .. }
            | CampError::InvalidConfigValueError { .. }
            | CampError::MissingConfigError { .. } => {
                "Fix the flagged configuration value and run again."
            }
            CampError::CsvError(_) | CampError::SerializationError(_) => {
                "The generated report data could not be encoded; re-run with --verbose for details."
            }
            CampError::JoinError(_) => "A spawned demo task panicked; re-run with --verbose.",
            CampError::DataError { .. } => {
                "Adjust --students/--courses so the generator produces a consistent dataset."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CampError>;
