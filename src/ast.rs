//! # wq - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for wq,
//! a terse, array-flavoured scripting language in the APL/K family.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[span]** - Source positions and ranges attached to tokens and nodes
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[operators]** - Binary and prefix operators
//! - **[expressions]** - Expression nodes (literals, operations, control forms)
//! - **[statements]** - Statements and statement branches
//! - **[program]** - The root of a parsed source unit
//!
//! ## Quick Start
//!
//! ```text
//! sq: {[x] x*x}
//! sq 4          // 16
//! ```
//!
//! ## Core Concepts
//!
//! ### Precedence
//!
//! From loosest to tightest:
//!
//! ```text
//! :   |   ,   = ~ != < <= > >=   + -   * / /. % %.   - # (prefix)   ^   suffixes
//! ```
//!
//! Assignment and power are right-associative, everything else groups to the
//! left. `-2^2` is `-(2^2)`.
//!
//! ### Juxtaposition
//!
//! Writing two operands next to each other applies the first to the second:
//! `f x` is a [`Suffix::Apply`]. A juxtaposed operand never starts with `-`,
//! so `f -x` and `f-x` are both subtraction.
//!
//! ### Parenthesized forms
//!
//! ```text
//! ()                // unit
//! (1; 2; 3)         // list
//! (`a: 1; `b: 2)    // dict
//! ```
//!
//! ### Control forms
//!
//! ```text
//! $[c; t; f]    $.[c; t]    W[c; body]    N[n; body]
//! @r x   @r   @b   @c   @a cond   @t expr
//! ```
//!
//! ## Ownership
//!
//! Nodes are built once by the parser and never mutated. Parents own their
//! children; there are no back-references.
pub mod span;
pub mod tokens;
pub mod operators;
pub mod expressions;
pub mod statements;
pub mod program;

pub use span::{Position, Span};
pub use tokens::{Token, TokenKind};
pub use operators::{BinOp, UnaryOp};
pub use expressions::{DictEntry, Expr, ExprKind, Literal, Param, ParenForm, Suffix};
pub use statements::{Branch, Statement};
pub use program::Program;
