use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Rate endpoint returned status {status}")]
    HttpStatusError { status: u16 },

    #[error("Malformed rate payload: {message}")]
    RatePayloadError { message: String },

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input '{value}' for '{field}': {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SimError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SimError::HttpError(_) | SimError::HttpStatusError { .. } => ErrorCategory::Network,
            SimError::RatePayloadError { .. }
            | SimError::CsvError(_)
            | SimError::SerializationError(_) => ErrorCategory::Data,
            SimError::ConfigError { .. }
            | SimError::ConfigValidationError { .. }
            | SimError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SimError::InvalidInputError { .. } => ErrorCategory::Input,
            SimError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // The rate provider recovers from these on its own.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Input | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SimError::HttpError(_) | SimError::HttpStatusError { .. } => {
                "Could not reach the benchmark rate service".to_string()
            }
            SimError::RatePayloadError { .. } => {
                "The benchmark rate service answered with unexpected data".to_string()
            }
            SimError::CsvError(_) | SimError::SerializationError(_) => {
                "Failed to export the simulation results".to_string()
            }
            SimError::IoError(e) => format!("File system error: {}", e),
            SimError::ConfigError { message } => format!("Configuration problem: {}", message),
            SimError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SimError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            SimError::InvalidInputError { field, reason, .. } => {
                format!("Input '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check your connection or pass --benchmark-rate to skip the fetch"
            }
            ErrorCategory::Data => "Verify the endpoint and the value_field in [rate_source]",
            ErrorCategory::Configuration => "Review the configuration file and CLI flags",
            ErrorCategory::Input => {
                "Use non-negative amounts, a horizon between 1 and 1200 months and a CDB percent between 80 and 130"
            }
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
