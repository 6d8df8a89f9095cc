use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Candidate file {} is malformed: {}", path.display(), source)]
    CorruptStoreError {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Environment,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CandidateError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CandidateError::IoError(_)
            | CandidateError::SerializationError(_)
            | CandidateError::CorruptStoreError { .. } => ErrorCategory::Environment,
            CandidateError::ConfigValidationError { .. }
            | CandidateError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CandidateError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    /// None of these abort an editing session; severity only drives the CLI exit code.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CandidateError::ValidationError { .. } => ErrorSeverity::Low,
            CandidateError::CorruptStoreError { .. } => ErrorSeverity::Medium,
            CandidateError::ConfigValidationError { .. }
            | CandidateError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            CandidateError::IoError(_) | CandidateError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CandidateError::IoError(_) => {
                "Check that the candidate file location exists and is writable".to_string()
            }
            CandidateError::SerializationError(_) => {
                "Retry the save; the in-memory candidates are unchanged".to_string()
            }
            CandidateError::CorruptStoreError { path, .. } => format!(
                "Fix or remove {} and restart; candidates start empty until then",
                path.display()
            ),
            CandidateError::ConfigValidationError { field, .. } => {
                format!("Review the '{}' entry in the settings file", field)
            }
            CandidateError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
            CandidateError::ValidationError { .. } => "Provide a non-empty candidate".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Environment => format!("Could not access saved candidates: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CandidateError>;
