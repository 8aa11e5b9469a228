use thiserror::Error;

/// Rejection reasons for a candidate set of opening hours.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoursError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("opening hours overlap on weekday {weekday}")]
    Overlap { weekday: i32 },
}

#[derive(Error, Debug)]
pub enum GastroError {
    #[error("Invalid opening hours: {0}")]
    Hours(#[from] HoursError),

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Business rule violated: {message}")]
    BusinessRule { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GastroError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        GastroError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        GastroError::BusinessRule {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GastroError::Hours(_)
            | GastroError::Conflict { .. }
            | GastroError::BusinessRule { .. }
            | GastroError::ValidationError { .. } => ErrorCategory::Input,
            GastroError::NotFound { .. } => ErrorCategory::Lookup,
            GastroError::ConfigValidationError { .. }
            | GastroError::InvalidConfigValueError { .. }
            | GastroError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GastroError::IoError(_) | GastroError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GastroError::Hours(HoursError::OutOfRange { .. }) => {
                "Use weekdays 0-6 (0 = Sunday) and minutes 0-1439 since midnight"
            }
            GastroError::Hours(HoursError::Overlap { .. }) => {
                "Remove or shorten one of the intervals on the reported weekday"
            }
            GastroError::NotFound { .. } => "Check the slug or id against `gastro-hours list`",
            GastroError::Conflict { .. } => "Pick a different slug for the restaurant",
            GastroError::BusinessRule { .. } => {
                "Complete the restaurant's address, opening hours and payment methods first"
            }
            GastroError::IoError(_) => "Make sure the file exists and is readable",
            GastroError::SerializationError(_) => "Check the data for malformed JSON",
            GastroError::ConfigValidationError { .. }
            | GastroError::InvalidConfigValueError { .. }
            | GastroError::MissingConfigError { .. } => {
                "Fix the catalog file; `${VAR}` placeholders must name set environment variables"
            }
            GastroError::ValidationError { .. } => "Correct the input and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GastroError::Hours(HoursError::Overlap { weekday }) => format!(
                "Opening hours on {} overlap each other",
                crate::core::hours::weekday_name(*weekday)
            ),
            GastroError::NotFound { entity, key } => format!("No {} named '{}'", entity, key),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GastroError>;
