//! Parser error types.

use fsmgen_core::FsmError;
use thiserror::Error;

/// A rejected statement. Carries the 1-based source line so diagnostics can
/// point back into the script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected {expected}, found '{found}'")]
    UnexpectedToken {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}: expected {expected} at end of statement")]
    UnexpectedEnd { line: usize, expected: &'static str },

    #[error("line {line}: unknown statement '{keyword}'")]
    UnknownStatement { line: usize, keyword: String },

    #[error("line {line}: invalid character '{ch}'")]
    InvalidCharacter { line: usize, ch: char },

    #[error("line {line}: {source}")]
    Model {
        line: usize,
        #[source]
        source: FsmError,
    },
}

impl ParseError {
    /// The source line the diagnostic refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. }
            | ParseError::UnexpectedEnd { line, .. }
            | ParseError::UnknownStatement { line, .. }
            | ParseError::InvalidCharacter { line, .. }
            | ParseError::Model { line, .. } => *line,
        }
    }
}
