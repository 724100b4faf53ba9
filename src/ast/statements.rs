use crate::ast::{Expr, Span};

/// Statement.
///
/// A program, a function body and every control-form arm are sequences of
/// statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Any expression, including assignments and control forms
    ///
    /// # Example
    /// ```text
    /// total: sum xs
    /// ```
    Expression(Expr),

    /// Host command line, payload kept verbatim
    ///
    /// # Example
    /// ```text
    /// !load utils.wq
    /// ```
    MagicCommand { payload: String, span: Span },
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Expression(expr) => expr.span,
            Statement::MagicCommand { span, .. } => *span,
        }
    }
}

/// Non-empty statement sequence forming a function body or a control-form
/// arm.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub statements: Vec<Statement>,
    pub span: Span,
}
