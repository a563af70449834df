use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid calculator input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("History store error: {message}")]
    Store { message: String },

    #[error("Record not found: {id}")]
    NotFound { id: String },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Network,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MaintenanceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. }
            | Self::TomlParse(_) => ErrorCategory::Configuration,
            Self::Store { .. } | Self::NotFound { .. } | Self::Csv(_) | Self::Serialization(_) => {
                ErrorCategory::Storage
            }
            Self::Api(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::System,
        }
    }

    /// Store and network failures are notices: the calculation itself is unaffected.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Store { .. } | Self::Api(_) => ErrorSeverity::Medium,
            Self::NotFound { .. }
            | Self::Validation { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValue { .. }
            | Self::MissingConfig { .. }
            | Self::TomlParse(_)
            | Self::Csv(_)
            | Self::Serialization(_) => ErrorSeverity::High,
            Self::InvalidInput { .. } | Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a failed command; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidInput { message } => format!("Cannot calculate maintenance: {}", message),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfig { field } => format!("Setting '{}' is required", field),
            Self::Store { .. } | Self::Api(_) => "Failed to reach the history store".to_string(),
            Self::NotFound { id } => format!("No saved calculation with id {}", id),
            Self::Csv(_) => "Failed to write the spreadsheet export".to_string(),
            Self::Serialization(_) => "Saved history could not be read".to_string(),
            Self::Io(e) => format!("File system error: {}", e),
            Self::TomlParse(_) => "Configuration file is not valid TOML".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Enter whole numbers greater than 0 for every field",
            ErrorCategory::Configuration => "Check the configuration file and command line flags",
            ErrorCategory::Storage => "Check the history store location and try again",
            ErrorCategory::Network => "Check the network connection and the store URL",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_not_fatal() {
        let err = MaintenanceError::store("connection refused");
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.severity() < ErrorSeverity::High);
    }

    #[test]
    fn test_invalid_input_is_critical() {
        let err = MaintenanceError::invalid_input("number of flats must be greater than 0");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err
            .user_friendly_message()
            .contains("number of flats must be greater than 0"));
    }

    #[test]
    fn test_unknown_record_fails_the_command() {
        let err = MaintenanceError::NotFound {
            id: "missing-id".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.user_friendly_message(), "No saved calculation with id missing-id");
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = [
            MaintenanceError::store("down"),
            MaintenanceError::invalid_input("bad"),
            MaintenanceError::validation("water", "Please enter water bill"),
            MaintenanceError::NotFound { id: "x".to_string() },
            MaintenanceError::MissingConfig {
                field: "store.location".to_string(),
            },
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{}", err);
        }
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = MaintenanceError::validation("water", "Please enter water bill");
        assert_eq!(err.user_friendly_message(), "Please enter water bill");
    }
}
