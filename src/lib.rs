pub mod ast;
pub mod builtins;
pub mod diagnostic;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod printer;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{BinOp, Expr, ExprKind, Literal, Position, Program, Span, Statement, Token, TokenKind};
pub use diagnostic::{Diagnostic, LexError, ParseError, Severity, SyntaxError};
pub use lexer::{Lexer, tokenize};
pub use output::{JsonOptions, to_json, to_json_pretty};
pub use parser::{ParseOptions, ParseOutput, Parser, parse, parse_with};
pub use printer::print_program;
