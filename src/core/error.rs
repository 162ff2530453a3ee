use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while building, editing, or exchanging quotations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuotationError {
    /// A numeric input was non-finite or otherwise unusable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder or draft edit received invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// Document number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),

    /// Backend payload could not be encoded or decoded.
    #[error("payload error: {0}")]
    Payload(String),
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks [`QuotationDraftBuilder::build`](crate::core::QuotationDraftBuilder::build).
    Error,
    /// Shown to the user but does not block saving.
    Warning,
}

/// A single validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "lines[0].discount_percent").
    pub field: String,
    /// Human-readable description.
    pub message: String,
    pub severity: Severity,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "{}: {}", self.field, self.message),
            Severity::Warning => write!(f, "warning: {}: {}", self.field, self.message),
        }
    }
}

impl ValidationError {
    /// Create an error-severity finding.
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Create a warning-severity finding.
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
