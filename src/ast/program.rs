use crate::ast::{Span, Statement};

/// A complete source unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Text after `#!` on the first line, if the buffer had one
    pub shebang: Option<String>,

    /// Top-level statements in source order
    pub statements: Vec<Statement>,

    pub span: Span,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
