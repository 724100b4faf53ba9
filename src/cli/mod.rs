//! CLI support for wq-lang
//!
//! Provides programmatic access to the `wq` tool's functionality so editors
//! and REPL hosts can embed it.

mod check;
mod docs;
mod inspect;
mod report;

pub use check::{CheckOptions, CheckReport, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use inspect::{dump_ast, format_source, list_tokens};
pub use report::render_diagnostics;

use std::io;

use thiserror::Error;

use crate::Diagnostic;

fn error_count(diagnostics: &[Diagnostic]) -> usize {
    diagnostics.iter().filter(|d| d.is_error()).count()
}

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Source did not parse
    #[error("parsing failed with {} error(s)", error_count(.0))]
    Parse(Vec<Diagnostic>),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// No input provided
    #[error("No input provided. Pass a FILE, use -e, or pipe source to stdin.")]
    NoInput,

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'wq docs' to see available categories.")]
    UnknownCategory(String),
}
