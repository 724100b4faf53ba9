//! JSON rendering of the wq AST.
//!
//! Each node becomes an object with a `"type"` tag. Spans are optional:
//! with them the dump is a faithful record for tooling, without them two
//! dumps compare equal exactly when the trees have the same shape.
//!
//! # Examples
//!
//! ```
//! use wq_lang::{parse, output::{program_to_json, JsonOptions}};
//!
//! let program = parse("f x").program;
//! let json = program_to_json(&program, JsonOptions::default());
//! assert_eq!(json["statements"][0]["type"], "postfix");
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{
    Branch, Expr, ExprKind, Literal, Param, ParenForm, Program, Span, Statement, Suffix,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOptions {
    /// Include `"span": [start, end]` byte offsets on every node
    pub spans: bool,
}

struct JsonBuilder {
    options: JsonOptions,
}

impl JsonBuilder {
    fn node(&self, kind: &str, span: Span, fields: Value) -> Value {
        let mut object = Map::new();
        object.insert("type".to_string(), Value::String(kind.to_string()));
        if let Value::Object(fields) = fields {
            object.extend(fields);
        }
        if self.options.spans {
            object.insert(
                "span".to_string(),
                json!([span.start.offset, span.end.offset]),
            );
        }
        Value::Object(object)
    }

    fn program(&self, program: &Program) -> Value {
        let statements: Vec<Value> = program
            .statements
            .iter()
            .map(|s| self.statement(s))
            .collect();
        self.node(
            "program",
            program.span,
            json!({ "shebang": program.shebang, "statements": statements }),
        )
    }

    fn statement(&self, statement: &Statement) -> Value {
        match statement {
            Statement::Expression(expr) => self.expr(expr),
            Statement::MagicCommand { payload, span } => {
                self.node("magic", *span, json!({ "payload": payload }))
            }
        }
    }

    fn branch(&self, branch: &Branch) -> Value {
        let statements: Vec<Value> = branch
            .statements
            .iter()
            .map(|s| self.statement(s))
            .collect();
        self.node("branch", branch.span, json!({ "statements": statements }))
    }

    fn exprs(&self, exprs: &[Expr]) -> Vec<Value> {
        exprs.iter().map(|e| self.expr(e)).collect()
    }

    fn expr(&self, expr: &Expr) -> Value {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Assignment { left, right } => self.node(
                "assign",
                span,
                json!({ "left": self.expr(left), "right": self.expr(right) }),
            ),
            ExprKind::Pipe { stages } => {
                self.node("pipe", span, json!({ "stages": self.exprs(stages) }))
            }
            ExprKind::Comma { elements } => {
                self.node("comma", span, json!({ "elements": self.exprs(elements) }))
            }
            ExprKind::BinaryOp { op, left, right } => self.node(
                "binary",
                span,
                json!({
                    "op": op.symbol(),
                    "left": self.expr(left),
                    "right": self.expr(right),
                }),
            ),
            ExprKind::UnaryOp { ops, operand } => {
                let ops: Vec<&str> = ops.iter().map(|op| op.symbol()).collect();
                self.node(
                    "unary",
                    span,
                    json!({ "ops": ops, "operand": self.expr(operand) }),
                )
            }
            ExprKind::Power { base, exponent } => self.node(
                "power",
                span,
                json!({ "base": self.expr(base), "exponent": self.expr(exponent) }),
            ),
            ExprKind::Postfix { base, suffixes } => {
                let suffixes: Vec<Value> = suffixes.iter().map(|s| self.suffix(s)).collect();
                self.node(
                    "postfix",
                    span,
                    json!({ "base": self.expr(base), "suffixes": suffixes }),
                )
            }
            ExprKind::Literal(literal) => self.node("literal", span, literal_fields(literal)),
            ExprKind::Variable { name, builtin } => self.node(
                "variable",
                span,
                json!({ "name": name, "builtin": builtin }),
            ),
            ExprKind::Function { params, body } => self.node(
                "function",
                span,
                json!({
                    "params": self.params(params),
                    "body": body.as_ref().map(|b| self.branch(b)),
                }),
            ),
            ExprKind::Paren(form) => self.paren(form, span),
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            } => self.node(
                "conditional",
                span,
                json!({
                    "cond": self.expr(cond),
                    "then": self.branch(then_branch),
                    "else": self.branch(else_branch),
                }),
            ),
            ExprKind::ConditionalOneArm { cond, branch } => self.node(
                "conditional_one_arm",
                span,
                json!({ "cond": self.expr(cond), "branch": self.branch(branch) }),
            ),
            ExprKind::While { cond, body } => self.node(
                "while",
                span,
                json!({ "cond": self.expr(cond), "body": self.branch(body) }),
            ),
            ExprKind::For { count, body } => self.node(
                "for",
                span,
                json!({ "count": self.expr(count), "body": self.branch(body) }),
            ),
            ExprKind::Return(value) => self.node(
                "return",
                span,
                json!({ "value": value.as_ref().map(|v| self.expr(v)) }),
            ),
            ExprKind::Break => self.node("break", span, json!({})),
            ExprKind::Continue => self.node("continue", span, json!({})),
            ExprKind::Assert(value) => {
                self.node("assert", span, json!({ "value": self.expr(value) }))
            }
            ExprKind::Try(value) => self.node("try", span, json!({ "value": self.expr(value) })),
        }
    }

    fn suffix(&self, suffix: &Suffix) -> Value {
        match suffix {
            Suffix::Index { args, span } => {
                self.node("index", *span, json!({ "args": self.exprs(args) }))
            }
            Suffix::Apply { arg } => self.node("apply", arg.span, json!({ "arg": self.expr(arg) })),
        }
    }

    fn params(&self, params: &[Param]) -> Vec<Value> {
        params
            .iter()
            .map(|p| self.node("param", p.span, json!({ "name": p.name })))
            .collect()
    }

    fn paren(&self, form: &ParenForm, span: Span) -> Value {
        match form {
            ParenForm::Unit => self.node("unit", span, json!({})),
            ParenForm::List(items) => self.node("list", span, json!({ "items": self.exprs(items) })),
            ParenForm::Dict(entries) => {
                let entries: Vec<Value> = entries
                    .iter()
                    .map(|entry| {
                        self.node(
                            "entry",
                            entry.key_span.merge(entry.value.span),
                            json!({ "key": entry.key, "value": self.expr(&entry.value) }),
                        )
                    })
                    .collect();
                self.node("dict", span, json!({ "entries": entries }))
            }
        }
    }
}

fn literal_fields(literal: &Literal) -> Value {
    match literal {
        Literal::Integer(n) => json!({ "kind": "integer", "value": n }),
        // f64 may not map onto a JSON number, so keep the text
        Literal::Float(n) => json!({ "kind": "float", "value": n.to_string() }),
        Literal::Character(c) => json!({ "kind": "character", "value": c.to_string() }),
        Literal::String(s) => json!({ "kind": "string", "value": s }),
        Literal::Symbol(s) => json!({ "kind": "symbol", "value": s }),
        Literal::Boolean(b) => json!({ "kind": "boolean", "value": b }),
        Literal::Inf => json!({ "kind": "inf" }),
        Literal::Nan => json!({ "kind": "nan" }),
    }
}

/// Convert a program to a JSON value.
pub fn program_to_json(program: &Program, options: JsonOptions) -> Value {
    JsonBuilder { options }.program(program)
}

/// Convert a single expression to a JSON value.
pub fn expr_to_json(expr: &Expr, options: JsonOptions) -> Value {
    JsonBuilder { options }.expr(expr)
}

/// Compact JSON text for a program.
pub fn to_json(program: &Program, options: JsonOptions) -> String {
    program_to_json(program, options).to_string()
}

/// Indented JSON text for a program.
pub fn to_json_pretty(program: &Program, options: JsonOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&program_to_json(program, options))
}
