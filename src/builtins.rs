//! Reserved builtin names.
//!
//! The lexer tags identifiers found here as [`TokenKind::Builtin`] so later
//! stages can tell them from user names. They still parse as ordinary
//! variable references.
//!
//! [`TokenKind::Builtin`]: crate::ast::TokenKind::Builtin

/// Builtin names, sorted so lookups can binary search.
pub const BUILTINS: &[&str] = &[
    "abs", "acos", "asc", "asin", "atan", "atom?", "avg", "band", "bnot", "bool?", "bor",
    "bxor", "cat", "ceil", "chr", "chr?", "cos", "cosh", "desc", "dict?", "distinct", "drop",
    "echo", "exec", "exit", "exp", "first", "flat", "float", "float?", "floor", "fmt", "fn?",
    "idx", "in", "input", "int", "int?", "join", "keys", "last", "list?", "ln", "log",
    "lower", "max", "min", "num?", "ord", "print", "println", "prod", "rand", "range", "read",
    "rev", "round", "sgn", "shl", "shr", "sin", "sinh", "sleep", "sort", "split", "sqrt",
    "str", "str?", "sum", "sym", "sym?", "take", "tan", "tanh", "til", "time", "trim", "type",
    "upper", "vals", "where", "write",
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.binary_search(&name).is_ok()
}
