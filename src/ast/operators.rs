/// Binary operators, grouped by precedence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    /// Equal (`=`)
    Equal,
    /// Not equal (`~` or `!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Additive
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,

    // Multiplicative
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Integer division (`/.`)
    IntDivide,
    /// Modulo (`%`)
    Modulo,
    /// Float modulo (`%.`)
    FloatModulo,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Equal => "=",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::IntDivide => "/.",
            BinOp::Modulo => "%",
            BinOp::FloatModulo => "%.",
        }
    }
}

/// Prefix operators of the unary tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (`-`)
    Negate,
    /// Count (`#`)
    Count,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Count => "#",
        }
    }
}
