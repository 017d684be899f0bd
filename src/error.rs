// src/error.rs
use thiserror::Error;

/// Malformed component source. Fatal to the `analyze` call that hit it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at {line}:{column}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub reason: String,
}

impl ParseError {
    #[must_use]
    pub fn new(line: usize, column: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            column,
            reason: reason.into(),
        }
    }
}

/// A color literal that is neither `#RGB`, `#RRGGBB` nor a supported name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: {reason}")]
pub struct InvalidColorError {
    pub input: String,
    pub reason: &'static str,
}

impl InvalidColorError {
    #[must_use]
    pub fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Only surfaced when the engine runs with `strict_colors`.
    #[error("rule `{rule_id}` failed: {source}")]
    InvalidColor {
        rule_id: &'static str,
        source: InvalidColorError,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
