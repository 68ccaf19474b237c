//! Structured errors produced while driving a parse.
//!
//! Every error carries a severity, a human-readable message (via `Display`),
//! and a 1-based line/column position. The driver never aborts: it collects
//! errors into a [`ParseResult`] and keeps going until the input is exhausted
//! or the error cap is hit.

use crate::ast::AstNode;
use crate::token::SourcePos;
use compact_str::CompactString;
use std::fmt;
use thiserror::Error;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Fatal => f.write_str("fatal"),
        }
    }
}

/// A syntax error recorded during a parse run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The scanner tagged this token as erroneous; it is reported up front and
    /// withheld from the automaton.
    #[error("unexpected or unknown token `{lexeme}`")]
    InvalidToken {
        lexeme: CompactString,
        pos: SourcePos,
    },

    /// The token sequence did not end with an end-of-input token.
    #[error("missing end-of-input token")]
    MissingEof { pos: SourcePos },

    /// No action is defined for the current state and token.
    #[error("unexpected token `{lexeme}`")]
    UnexpectedToken {
        lexeme: CompactString,
        pos: SourcePos,
    },

    /// The tables disagreed with themselves mid-reduce. Should not happen for
    /// a correctly built automaton.
    #[error("parser table inconsistency: {detail}")]
    TableInconsistency {
        detail: CompactString,
        pos: SourcePos,
    },

    /// The recovery cap was reached and scanning stopped early.
    #[error("too many syntax errors; giving up")]
    TooManyErrors { pos: SourcePos },
}

impl ParseError {
    /// Position the error refers to.
    #[must_use]
    pub const fn pos(&self) -> SourcePos {
        match self {
            Self::InvalidToken { pos, .. }
            | Self::MissingEof { pos }
            | Self::UnexpectedToken { pos, .. }
            | Self::TableInconsistency { pos, .. }
            | Self::TooManyErrors { pos } => *pos,
        }
    }

    /// 1-based line of the error.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.pos().line
    }

    /// 1-based column of the error.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.pos().column
    }

    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::TooManyErrors { .. } => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

/// Outcome of a single parse run.
///
/// `ast` is absent when no accepting reduction was reached. `success` is true
/// only when the run recorded zero errors, pre-pass validation included.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub ast: Option<AstNode>,
    pub errors: Vec<ParseError>,
    pub success: bool,
}

impl ParseResult {
    /// Errors at or above the given severity.
    pub fn errors_at_least(&self, severity: Severity) -> impl Iterator<Item = &ParseError> {
        self.errors.iter().filter(move |e| e.severity() >= severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = ParseError::UnexpectedToken {
            lexeme: "@".into(),
            pos: SourcePos::new(2, 5),
        };
        assert_eq!(err.to_string(), "unexpected token `@`");
        assert_eq!(err.line(), 2);
        assert_eq!(err.column(), 5);
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn too_many_errors_is_fatal() {
        let err = ParseError::TooManyErrors {
            pos: SourcePos::default(),
        };
        assert_eq!(err.severity(), Severity::Fatal);
        assert!(err.to_string().contains("too many"));
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn errors_at_least_filters() {
        let result = ParseResult {
            ast: None,
            errors: vec![
                ParseError::MissingEof {
                    pos: SourcePos::default(),
                },
                ParseError::TooManyErrors {
                    pos: SourcePos::default(),
                },
            ],
            success: false,
        };
        assert_eq!(result.errors_at_least(Severity::Fatal).count(), 1);
        assert_eq!(result.errors_at_least(Severity::Warning).count(), 2);
    }
}
