//! Terminal rendering of diagnostics, with the offending source underlined.

use miette::{GraphicalReportHandler, GraphicalTheme, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::{Diagnostic, Severity};

#[derive(Debug, Error)]
#[error("{message}")]
struct Rendered {
    message: String,
    severity: Severity,
    code: NamedSource<String>,
    offset: usize,
    len: usize,
}

impl miette::Diagnostic for Rendered {
    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.code)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(Some("here".to_string()), (self.offset, self.len));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Render `diagnostics` against `source`, one report after another.
///
/// `name` labels the source (a file path or `<stdin>`).
pub fn render_diagnostics(
    name: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    color: bool,
) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let mut out = String::new();
    for diagnostic in diagnostics {
        let rendered = Rendered {
            message: diagnostic.message.clone(),
            severity: diagnostic.severity,
            code: NamedSource::new(name, source.to_string()),
            offset: diagnostic.span.start.offset,
            len: diagnostic.span.len(),
        };
        if handler.render_report(&mut out, &rendered).is_err() {
            out.push_str(&diagnostic.to_string());
            out.push('\n');
        }
    }
    out
}
