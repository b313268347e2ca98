//! Diagnostic engine errors
//!
//! Both variants are input contract violations; nothing here is transient.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticError {
    /// Reading/reference does not have the shape the process requires
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Process tag is not one of `c41`, `bw`
    #[error("Unsupported process type: {0}")]
    UnsupportedProcess(String),
}

impl DiagnosticError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DiagnosticError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
