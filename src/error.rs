//! Terminal failures of a transform.

use std::fmt;

use crate::diagnostics::Diagnostic;
use crate::lexer::Pos;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that stop a transform from producing output. Recoverable syntax
/// errors are reported as [`Diagnostic`]s instead.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Blocks or brackets nested deeper than the configured limit.
    #[error("Maximum nesting depth of {max_depth} exceeded")]
    DepthExceeded {
        max_depth: usize,
        diagnostics: Vec<Diagnostic>,
    },

    /// A string still open at the end of the input.
    #[error("Unterminated string starting at offset {offset}")]
    UnterminatedString {
        offset: Pos,
        diagnostics: Vec<Diagnostic>,
    },

    /// Input too long for the `u32` byte offsets used in token ranges.
    #[error("Input of {len} bytes exceeds the maximum of {max} bytes", max = Pos::MAX)]
    InputTooLarge { len: usize },

    #[error("Failed to serialize stylesheet: {0}")]
    Serialize(#[from] fmt::Error),
}

impl TransformError {
    /// Diagnostics gathered before the failure.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            TransformError::DepthExceeded { diagnostics, .. }
            | TransformError::UnterminatedString { diagnostics, .. } => diagnostics,
            TransformError::InputTooLarge { .. } | TransformError::Serialize(_) => &[],
        }
    }
}
