use crate::utils::error::{CandidateError, Result};
use regex::Regex;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CandidateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CandidateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Candidates are taken verbatim, so only the empty string is refused.
/// Whitespace-only values are legitimate candidates.
pub fn validate_candidate(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CandidateError::ValidationError {
            message: "Candidate cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Compiles a character-class body into a matcher for the symbol run that
/// ends the input.
pub fn compile_symbol_class(field_name: &str, class: &str) -> Result<Regex> {
    if class.is_empty() {
        return Err(CandidateError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: class.to_string(),
            reason: "Symbol character class cannot be empty".to_string(),
        });
    }

    Regex::new(&format!("[{}]*$", class)).map_err(|e| CandidateError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: class.to_string(),
        reason: format!("Invalid character class: {}", e),
    })
}
