use crate::ast::Span;

/// A lexical token: its kind, the exact source text it was read from, and
/// where that text sits in the buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal, one or more digits
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Integer(i64),

    /// Float literal, digits on both sides of the dot
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 0.5
    /// ```
    Float(f64),

    /// Character literal enclosed in single quotes
    ///
    /// # Examples
    /// ```text
    /// 'a'
    /// '\n'
    /// ```
    Character(char),

    /// String literal enclosed in double quotes
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "tab\tseparated"
    /// ```
    String(String),

    /// Symbol literal: a backtick immediately followed by a name
    ///
    /// # Examples
    /// ```text
    /// `name
    /// `empty?
    /// ```
    Symbol(String),

    /// `true` or `false`
    Boolean(bool),

    /// `inf`
    Inf,

    /// `nan`
    Nan,

    // Names
    /// User identifier
    ///
    /// Starts with a letter or underscore, continues with letters, digits,
    /// underscores or `?`.
    ///
    /// # Examples
    /// ```text
    /// x
    /// item_count
    /// done?
    /// ```
    Identifier(String),

    /// Identifier found in the reserved builtin-name table
    ///
    /// # Examples
    /// ```text
    /// sqrt
    /// echo
    /// int?
    /// ```
    Builtin(String),

    // Arithmetic
    /// Addition (`+`)
    Plus,
    /// Subtraction or negation (`-`)
    Minus,
    /// Multiplication (`*`)
    Star,
    /// Division (`/`)
    Slash,
    /// Integer division (`/.`)
    SlashDot,
    /// Modulo (`%`)
    Percent,
    /// Float modulo (`%.`)
    PercentDot,
    /// Power (`^`)
    Caret,
    /// Count prefix (`#`)
    Hash,

    // Comparison
    /// Equality (`=`)
    Eq,
    /// Inequality (`~`)
    Tilde,
    /// Inequality (`!=`)
    BangEq,
    /// Less than (`<`)
    Lt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than (`>`)
    Gt,
    /// Greater than or equal (`>=`)
    GtEq,

    // Structure
    /// Assignment and dict entry marker (`:`)
    Colon,
    /// Comma join (`,`)
    Comma,
    /// Pipe stage separator (`|`)
    Pipe,
    /// Statement and item separator (`;`)
    Semicolon,
    /// Dot, only meaningful in `$.[...]`
    Dot,
    /// Conditional introducer (`$`)
    Dollar,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // Control words
    /// `@r`
    Return,
    /// `@b`
    Break,
    /// `@c`
    Continue,
    /// `@a`
    Assert,
    /// `@t`
    Try,

    // Lines
    /// One or more newlines, with any blank or comment-only lines between
    /// them collapsed into the same token
    Newline,

    /// `#!...` line at the very start of the buffer (text after `#!`)
    Shebang(String),

    /// `!...` line in statement position (text after `!`, verbatim)
    ///
    /// # Examples
    /// ```text
    /// !load lib.wq
    /// !time
    /// ```
    MagicCommand(String),

    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable name used in syntax errors.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Integer(n) => format!("integer `{}`", n),
            TokenKind::Float(n) => format!("float `{}`", n),
            TokenKind::Character(c) => format!("character {:?}", c),
            TokenKind::String(s) => format!("string {:?}", s),
            TokenKind::Symbol(s) => format!("symbol `{}", s),
            TokenKind::Boolean(b) => format!("`{}`", b),
            TokenKind::Inf => "`inf`".to_string(),
            TokenKind::Nan => "`nan`".to_string(),
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Builtin(name) => format!("builtin `{}`", name),
            TokenKind::Newline => "newline".to_string(),
            TokenKind::Shebang(_) => "shebang line".to_string(),
            TokenKind::MagicCommand(_) => "magic command".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other.symbol().unwrap_or("?")),
        }
    }

    /// Source spelling of punctuation, operator and control-word tokens.
    pub fn symbol(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::SlashDot => "/.",
            TokenKind::Percent => "%",
            TokenKind::PercentDot => "%.",
            TokenKind::Caret => "^",
            TokenKind::Hash => "#",
            TokenKind::Eq => "=",
            TokenKind::Tilde => "~",
            TokenKind::BangEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Pipe => "|",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Dollar => "$",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Return => "@r",
            TokenKind::Break => "@b",
            TokenKind::Continue => "@c",
            TokenKind::Assert => "@a",
            TokenKind::Try => "@t",
            _ => return None,
        };
        Some(text)
    }

    /// Short tag used by `wq tokens`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Integer(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Character(_) => "character",
            TokenKind::String(_) => "string",
            TokenKind::Symbol(_) => "symbol",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Inf => "inf",
            TokenKind::Nan => "nan",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Builtin(_) => "builtin",
            TokenKind::Newline => "newline",
            TokenKind::Shebang(_) => "shebang",
            TokenKind::MagicCommand(_) => "magic",
            TokenKind::Eof => "eof",
            TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Assert
            | TokenKind::Try => "control",
            _ => "punct",
        }
    }
}
