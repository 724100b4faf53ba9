use crate::ast::{BinOp, Branch, Span, UnaryOp};

/// Expression node: what it is, and the source range it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Abstract Syntax Tree node representing a parsed expression.
///
/// Variants are listed loosest-binding first.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Assignment, right-associative
    ///
    /// The left side is any pipe-level expression. Whether it names an
    /// assignable place is decided by whoever runs the program.
    ///
    /// # Examples
    /// ```text
    /// x: 1
    /// a: b: 0
    /// xs[0]: 5
    /// ```
    Assignment { left: Box<Expr>, right: Box<Expr> },

    /// Pipe, at least two stages, left to right
    ///
    /// # Example
    /// ```text
    /// xs | sort | rev
    /// ```
    Pipe { stages: Vec<Expr> },

    /// Comma join, at least two elements
    ///
    /// # Example
    /// ```text
    /// 1, 2, x
    /// ```
    Comma { elements: Vec<Expr> },

    /// Comparison, additive and multiplicative operations
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// One or more prefix operators applied to a power-level operand
    ///
    /// # Examples
    /// ```text
    /// -x
    /// #xs
    /// -#-y
    /// ```
    UnaryOp { ops: Vec<UnaryOp>, operand: Box<Expr> },

    /// Power, right-associative
    ///
    /// # Example
    /// ```text
    /// 2^3^2      // 2^(3^2)
    /// ```
    Power { base: Box<Expr>, exponent: Box<Expr> },

    /// A primary followed by index and application suffixes
    ///
    /// # Examples
    /// ```text
    /// xs[0]
    /// f x
    /// m[1;2] y
    /// ```
    Postfix { base: Box<Expr>, suffixes: Vec<Suffix> },

    Literal(Literal),

    /// Variable reference; `builtin` marks names from the reserved table
    Variable { name: String, builtin: bool },

    /// Function literal
    ///
    /// # Examples
    /// ```text
    /// {}
    /// {[x] x*x}
    /// {[a;b] a+b}
    /// ```
    Function { params: Vec<Param>, body: Option<Branch> },

    /// Parenthesized form: unit, list or dict
    Paren(ParenForm),

    /// Two-armed conditional
    ///
    /// # Example
    /// ```text
    /// $[x>0; "pos"; "neg"]
    /// ```
    Conditional {
        cond: Box<Expr>,
        then_branch: Branch,
        else_branch: Branch,
    },

    /// One-armed conditional
    ///
    /// # Example
    /// ```text
    /// $.[done; @b]
    /// ```
    ConditionalOneArm { cond: Box<Expr>, branch: Branch },

    /// While loop
    ///
    /// # Example
    /// ```text
    /// W[i<10; i: i+1]
    /// ```
    While { cond: Box<Expr>, body: Branch },

    /// Repeat `body` `count` times
    ///
    /// # Example
    /// ```text
    /// N[3; echo "hi"]
    /// ```
    For { count: Box<Expr>, body: Branch },

    /// `@r` with or without a value
    Return(Option<Box<Expr>>),
    /// `@b`
    Break,
    /// `@c`
    Continue,
    /// `@a expr`
    Assert(Box<Expr>),
    /// `@t expr`
    Try(Box<Expr>),
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Character(char),
    String(String),
    Symbol(String),
    Boolean(bool),
    Inf,
    Nan,
}

/// One link of a postfix chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Suffix {
    /// `base[a;b]`, possibly with no arguments
    Index { args: Vec<Expr>, span: Span },
    /// `base arg`
    Apply { arg: Box<Expr> },
}

impl Suffix {
    pub fn span(&self) -> Span {
        match self {
            Suffix::Index { span, .. } => *span,
            Suffix::Apply { arg } => arg.span,
        }
    }
}

/// Function parameter name.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub span: Span,
}

/// The three shapes of `( ... )`.
///
/// Which one is chosen depends only on the first item: `)` gives `Unit`, a
/// symbol followed by `:` gives `Dict`, anything else gives `List`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParenForm {
    /// `()`
    Unit,
    /// `(a; b; c)`; a single element is plain grouping
    List(Vec<Expr>),
    /// `` (`a: 1; `b: 2) ``, entries in source order, keys not deduplicated
    Dict(Vec<DictEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub key: String,
    pub key_span: Span,
    pub value: Expr,
}
