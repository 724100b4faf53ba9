//! Source printer for the wq AST.
//!
//! Renders a parsed tree back to wq source in a canonical layout. The
//! output parses back to the same tree (positions aside):
//!
//! - **Pretty output** via [`print_program()`] - spaces around operators and after `;`
//! - **Compact output** via [`Printer::compact()`] - minimal whitespace
//! - **No added parentheses** - grouping already lives in the tree as a
//!   one-element list, so the printer only emits the parentheses it finds
//!
//! # Examples
//!
//! ```
//! use wq_lang::{parse, printer::print_program};
//!
//! let output = parse("x:1+2*3");
//! assert_eq!(print_program(&output.program), "x: 1 + 2 * 3");
//! ```

use crate::ast::{
    Branch, DictEntry, Expr, ExprKind, Literal, Param, ParenForm, Program, Statement, Suffix,
};

pub struct Printer {
    pretty: bool,
}

impl Printer {
    pub fn new(pretty: bool) -> Self {
        Printer { pretty }
    }

    pub fn compact() -> Self {
        Printer::new(false)
    }

    pub fn print(&self, program: &Program) -> String {
        let mut lines = vec![];
        if let Some(shebang) = &program.shebang {
            lines.push(format!("#!{}", shebang));
        }
        for statement in &program.statements {
            lines.push(self.print_statement(statement));
        }
        lines.join("\n")
    }

    pub fn print_statement(&self, statement: &Statement) -> String {
        match statement {
            Statement::Expression(expr) => self.print_expr(expr),
            Statement::MagicCommand { payload, .. } => format!("!{}", payload),
        }
    }

    fn sep(&self) -> &'static str {
        if self.pretty { "; " } else { ";" }
    }

    fn infix(&self, op: &str) -> String {
        if self.pretty {
            format!(" {} ", op)
        } else {
            op.to_string()
        }
    }

    pub fn print_expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Assignment { left, right } => {
                let colon = if self.pretty { ": " } else { ":" };
                format!("{}{}{}", self.print_expr(left), colon, self.print_expr(right))
            }
            ExprKind::Pipe { stages } => self.join(stages, &self.infix("|")),
            ExprKind::Comma { elements } => {
                let comma = if self.pretty { ", " } else { "," };
                self.join(elements, comma)
            }
            ExprKind::BinaryOp { op, left, right } => format!(
                "{}{}{}",
                self.print_expr(left),
                self.infix(op.symbol()),
                self.print_expr(right)
            ),
            ExprKind::UnaryOp { ops, operand } => {
                let prefix: String = ops.iter().map(|op| op.symbol()).collect();
                format!("{}{}", prefix, self.print_expr(operand))
            }
            ExprKind::Power { base, exponent } => {
                format!("{}^{}", self.print_expr(base), self.print_expr(exponent))
            }
            ExprKind::Postfix { base, suffixes } => {
                let mut result = self.print_expr(base);
                for suffix in suffixes {
                    match suffix {
                        // index brackets must touch what they index
                        Suffix::Index { args, .. } => {
                            result.push('[');
                            result.push_str(&self.join(args, self.sep()));
                            result.push(']');
                        }
                        Suffix::Apply { arg } => {
                            result.push(' ');
                            result.push_str(&self.print_expr(arg));
                        }
                    }
                }
                result
            }
            ExprKind::Literal(literal) => print_literal(literal),
            ExprKind::Variable { name, .. } => name.clone(),
            ExprKind::Function { params, body } => self.print_function(params, body.as_ref()),
            ExprKind::Paren(form) => self.print_paren(form),
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => format!(
                "$[{}{}{}{}{}]",
                self.print_expr(cond),
                self.sep(),
                // a `;` would end the true arm early
                self.print_branch(then_branch, "\n"),
                self.sep(),
                self.print_branch(else_branch, self.sep())
            ),
            ExprKind::ConditionalOneArm { cond, branch } => format!(
                "$.[{}{}{}]",
                self.print_expr(cond),
                self.sep(),
                self.print_branch(branch, self.sep())
            ),
            ExprKind::While { cond, body } => format!(
                "W[{}{}{}]",
                self.print_expr(cond),
                self.sep(),
                self.print_branch(body, self.sep())
            ),
            ExprKind::For { count, body } => format!(
                "N[{}{}{}]",
                self.print_expr(count),
                self.sep(),
                self.print_branch(body, self.sep())
            ),
            ExprKind::Return(None) => "@r".to_string(),
            ExprKind::Return(Some(value)) => format!("@r {}", self.print_expr(value)),
            ExprKind::Break => "@b".to_string(),
            ExprKind::Continue => "@c".to_string(),
            ExprKind::Assert(value) => format!("@a {}", self.print_expr(value)),
            ExprKind::Try(value) => format!("@t {}", self.print_expr(value)),
        }
    }

    fn join(&self, exprs: &[Expr], separator: &str) -> String {
        exprs
            .iter()
            .map(|e| self.print_expr(e))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn print_branch(&self, branch: &Branch, separator: &str) -> String {
        branch
            .statements
            .iter()
            .map(|s| self.print_statement(s))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn print_function(&self, params: &[Param], body: Option<&Branch>) -> String {
        let mut result = "{".to_string();
        if !params.is_empty() {
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            result.push('[');
            result.push_str(&names.join(self.sep()));
            result.push(']');
        }
        if let Some(body) = body {
            if !params.is_empty() {
                result.push(' ');
            }
            result.push_str(&self.print_branch(body, self.sep()));
        }
        result.push('}');
        result
    }

    fn print_paren(&self, form: &ParenForm) -> String {
        match form {
            ParenForm::Unit => "()".to_string(),
            ParenForm::List(items) => format!("({})", self.join(items, self.sep())),
            ParenForm::Dict(entries) => {
                let colon = if self.pretty { ": " } else { ":" };
                let items: Vec<String> = entries
                    .iter()
                    .map(|DictEntry { key, value, .. }| {
                        format!("`{}{}{}", key, colon, self.print_expr(value))
                    })
                    .collect();
                format!("({})", items.join(self.sep()))
            }
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Printer::new(true)
    }
}

fn print_literal(literal: &Literal) -> String {
    match literal {
        Literal::Integer(n) => n.to_string(),
        Literal::Float(n) => {
            // `Display` drops the fraction of whole floats, which would read
            // back as an integer
            let mut text = n.to_string();
            if !text.contains('.') {
                text.push_str(".0");
            }
            text
        }
        Literal::Character(c) => format!("'{}'", escape_char(*c, '\'')),
        Literal::String(s) => {
            let escaped: String = s.chars().map(|c| escape_char(c, '"')).collect();
            format!("\"{}\"", escaped)
        }
        Literal::Symbol(s) => format!("`{}", s),
        Literal::Boolean(b) => b.to_string(),
        Literal::Inf => "inf".to_string(),
        Literal::Nan => "nan".to_string(),
    }
}

fn escape_char(c: char, quote: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        '\\' => "\\\\".to_string(),
        c if c == quote => format!("\\{}", c),
        c => c.to_string(),
    }
}

/// Pretty-print a program.
pub fn print_program(program: &Program) -> String {
    Printer::default().print(program)
}

/// Pretty-print a single expression.
pub fn print_expr(expr: &Expr) -> String {
    Printer::default().print_expr(expr)
}
