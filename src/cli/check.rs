//! Syntax-check wq sources

use crate::{Diagnostic, ParseOptions, parse_with};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The wq source text
    pub source: String,
    /// Keep going after a syntax error to report as many as possible
    pub recover: bool,
}

/// Result of a check operation
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// Number of top-level statements that parsed
    pub statements: usize,
    /// Errors and warnings in source order
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Execute a wq check operation
pub fn execute_check(options: &CheckOptions) -> CheckReport {
    let output = parse_with(
        &options.source,
        ParseOptions {
            recover: options.recover,
        },
    );

    CheckReport {
        statements: output.program.statements.len(),
        diagnostics: output.diagnostics,
    }
}
