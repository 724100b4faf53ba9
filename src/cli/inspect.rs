//! Token listings, AST dumps and reformatting

use super::CliError;
use crate::output::{JsonOptions, to_json, to_json_pretty};
use crate::printer::Printer;
use crate::{Diagnostic, ParseError, Program, TokenKind, parse, tokenize};

fn parse_clean(source: &str) -> Result<Program, CliError> {
    parse(source).into_result().map_err(CliError::Parse)
}

/// One line per token: `line:col kind lexeme`
pub fn list_tokens(source: &str) -> Result<String, CliError> {
    let tokens = tokenize(source)
        .map_err(|e| CliError::Parse(vec![Diagnostic::from(ParseError::from(e))]))?;

    let mut out = String::new();
    for token in tokens {
        let lexeme = match token.kind {
            TokenKind::Eof => String::new(),
            _ => format!("{:?}", token.lexeme),
        };
        out.push_str(&format!(
            "{:>4}:{:<3} {:<10} {}\n",
            token.span.start.line,
            token.span.start.column,
            token.kind.name(),
            lexeme
        ));
    }
    Ok(out)
}

/// JSON dump of the parsed program
pub fn dump_ast(source: &str, pretty: bool, spans: bool) -> Result<String, CliError> {
    let program = parse_clean(source)?;
    let options = JsonOptions { spans };
    if pretty {
        Ok(to_json_pretty(&program, options)?)
    } else {
        Ok(to_json(&program, options))
    }
}

/// Reprint the source in canonical form
pub fn format_source(source: &str) -> Result<String, CliError> {
    let program = parse_clean(source)?;
    let mut text = Printer::new(true).print(&program);
    if !text.is_empty() {
        text.push('\n');
    }
    Ok(text)
}
