//! Transform error types.

use graft_core::GraphError;
use graft_pattern::PatternError;
use thiserror::Error;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Errors that can occur while building or applying a transform.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Invalid rename pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}

impl TransformError {
    pub fn invalid_regex(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// True when the pattern text itself could not be parsed.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Pattern(PatternError::Syntax(_)))
    }
}
