//! Errors and diagnostics shared by the lexer and the parser.
//!
//! [`LexError`] and [`SyntaxError`] are what the lexer and parser return
//! through `?`. [`Diagnostic`] is the flattened record handed to callers,
//! one per reported problem.

use std::fmt;

use thiserror::Error;

use crate::ast::{Position, Span};

/// Errors raised while turning characters into tokens.
///
/// Every variant is fatal for the current parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unterminated string literal starting at {start}")]
    UnterminatedString { start: Position, end: Position },

    #[error("unterminated character literal starting at {start}")]
    UnterminatedCharacter { start: Position, end: Position },

    #[error("backtick at {start} must be followed by a symbol name")]
    UnterminatedSymbol { start: Position, end: Position },

    #[error("illegal character {ch:?} at {at}")]
    IllegalCharacter { ch: char, at: Position },

    #[error("integer literal `{lexeme}` at {} does not fit in 64 bits", .span.start)]
    IntegerOutOfRange { lexeme: String, span: Span },

    #[error("float literal `{lexeme}` at {} is too large for 64 bits", .span.start)]
    FloatOutOfRange { lexeme: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { start, end }
            | LexError::UnterminatedCharacter { start, end }
            | LexError::UnterminatedSymbol { start, end } => Span::new(*start, *end),
            LexError::IllegalCharacter { ch, at } => {
                let end = Position::new(at.offset + ch.len_utf8(), at.line, at.column + 1);
                Span::new(*at, end)
            }
            LexError::IntegerOutOfRange { span, .. }
            | LexError::FloatOutOfRange { span, .. } => *span,
        }
    }
}

/// A required construct was missing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, found {found} at {}", .span.start)]
pub struct SyntaxError {
    /// What the grammar required at this point
    pub expected: String,
    /// Description of the token that was there instead
    pub found: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(expected: impl Into<String>, found: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            expected: expected.into(),
            found: found.into(),
            span,
        }
    }
}

/// Anything that stops a parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex(e) => e.span(),
            ParseError::Syntax(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A reported problem with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl From<&ParseError> for Diagnostic {
    fn from(e: &ParseError) -> Self {
        Diagnostic::error(e.to_string(), e.span())
    }
}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Diagnostic::from(&e)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.severity, self.span.start, self.message)
    }
}
