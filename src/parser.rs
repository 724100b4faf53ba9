use crate::{
    ast::{
        BinOp, Branch, DictEntry, Expr, ExprKind, Literal, Param, ParenForm, Position, Program,
        Span, Statement, Suffix, Token, TokenKind, UnaryOp,
    },
    diagnostic::{Diagnostic, ParseError, SyntaxError},
    lexer::Lexer,
};
use std::mem;

type PResult<T> = Result<T, ParseError>;

/// Deepest expression nesting accepted before the parse is abandoned.
/// Each level costs a dozen stack frames, so this stays well below what a
/// default-sized thread can hold.
pub const MAX_NESTING: usize = 24;

/// Options for [`parse_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Report a syntax error, skip to the next top-level separator and keep
    /// going, instead of stopping at the first error
    pub recover: bool,
}

/// Everything a parse produced: the tree (partial if parsing stopped
/// early) and the problems found on the way, in source order.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// The program if no error was reported. Warnings are dropped.
    pub fn into_result(self) -> Result<Program, Vec<Diagnostic>> {
        if self.has_errors() {
            Err(self.diagnostics)
        } else {
            Ok(self.program)
        }
    }
}

/// Parse a whole source unit, stopping at the first error.
pub fn parse(source: &str) -> ParseOutput {
    parse_with(source, ParseOptions::default())
}

pub fn parse_with(source: &str, options: ParseOptions) -> ParseOutput {
    let mut parser = match Parser::new(Lexer::new(source)) {
        Ok(parser) => parser.with_recovery(options.recover),
        Err(e) => {
            return ParseOutput {
                program: Program::default(),
                diagnostics: vec![Diagnostic::from(&e)],
            };
        }
    };

    let (program, failure) = parser.parse_partial();
    let mut diagnostics = parser.take_diagnostics();
    if let Some(e) = failure {
        diagnostics.push(Diagnostic::from(&e));
    }
    diagnostics.sort_by_key(|d| d.span.start.offset);

    ParseOutput {
        program,
        diagnostics,
    }
}

/// Tokens that may begin a primary expression.
fn starts_primary(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::Character(_)
            | TokenKind::String(_)
            | TokenKind::Symbol(_)
            | TokenKind::Boolean(_)
            | TokenKind::Inf
            | TokenKind::Nan
            | TokenKind::Identifier(_)
            | TokenKind::Builtin(_)
            | TokenKind::LBrace
            | TokenKind::LParen
            | TokenKind::Dollar
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Assert
            | TokenKind::Try
    )
}

/// Tokens that may begin a juxtaposed argument. A leading `-` is excluded:
/// between two operands it is always subtraction.
fn starts_juxtaposed(kind: &TokenKind) -> bool {
    starts_primary(kind) || matches!(kind, TokenKind::Hash)
}

fn starts_expression(kind: &TokenKind) -> bool {
    starts_juxtaposed(kind) || matches!(kind, TokenKind::Minus)
}

fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(right.span);
    Expr::new(
        ExprKind::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    peeked: Option<Token>,
    // end of the last consumed token
    prev_end: Position,
    // brackets consumed and not yet closed, used by recovery
    depth: usize,
    // expressions currently being parsed, bounded by MAX_NESTING
    nesting: usize,
    recover: bool,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            peeked: None,
            prev_end: Position::start(),
            depth: 0,
            nesting: 0,
            recover: false,
            diagnostics: Vec::new(),
        })
    }

    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    /// Warnings, plus the syntax errors skipped over in recovery mode.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }

    fn advance(&mut self) -> PResult<Token> {
        let next = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        let prev = mem::replace(&mut self.current_token, next);
        self.prev_end = prev.span.end;
        match prev.kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => self.depth += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                self.depth = self.depth.saturating_sub(1)
            }
            _ => {}
        }
        Ok(prev)
    }

    /// One token of lookahead past the current one.
    fn peek(&mut self) -> PResult<&TokenKind> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(&self.peeked.insert(token).kind)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        mem::discriminant(&self.current_token.kind) == mem::discriminant(kind)
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> PResult<Token> {
        if !self.check(&expected) {
            return Err(self.error(what));
        }
        self.advance()
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        SyntaxError::new(
            expected,
            self.current_token.kind.describe(),
            self.current_token.span,
        )
        .into()
    }

    fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end)
    }

    fn skip_newlines(&mut self) -> PResult<()> {
        while self.check(&TokenKind::Newline) {
            self.advance()?;
        }
        Ok(())
    }

    fn at_separator(&self) -> bool {
        matches!(
            self.current_token.kind,
            TokenKind::Newline | TokenKind::Semicolon
        )
    }

    /// `[` with no whitespace between it and the previous token.
    fn at_adjacent_bracket(&self) -> bool {
        self.check(&TokenKind::LBracket)
            && self.current_token.span.start.offset == self.prev_end.offset
    }

    /// `W[` or `N[`.
    fn at_loop_keyword(&mut self) -> PResult<bool> {
        let is_keyword = matches!(
            &self.current_token.kind,
            TokenKind::Identifier(name) if name == "W" || name == "N"
        );
        Ok(is_keyword && matches!(self.peek()?, TokenKind::LBracket))
    }

    fn enter(&mut self) -> PResult<()> {
        if self.nesting >= MAX_NESTING {
            return Err(self.error(format!(
                "shallower nesting (at most {} levels)",
                MAX_NESTING
            )));
        }
        self.nesting += 1;
        Ok(())
    }

    /// Run `inner` one nesting level deeper.
    fn nested<T>(&mut self, inner: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.enter()?;
        let result = inner(self);
        self.nesting -= 1;
        result
    }

    fn note_legacy_spelling(&mut self, name: &str, span: Span) {
        let lower = name.to_ascii_lowercase();
        if lower == "inf" || lower == "nan" {
            self.diagnostics.push(Diagnostic::warning(
                format!(
                    "`{}` is a legacy spelling and parses as an identifier; write `{}` for the literal",
                    name, lower
                ),
                span,
            ));
        }
    }

    /// Parse primary expressions: literals, names, function literals,
    /// parenthesized forms and control forms
    fn parse_primary(&mut self) -> PResult<Expr> {
        if self.at_loop_keyword()? {
            return self.parse_loop();
        }
        if !starts_primary(&self.current_token.kind) {
            return Err(self.error("expression"));
        }

        let token = self.advance()?;
        let start = token.span.start;

        let kind = match token.kind {
            // Literals
            TokenKind::Integer(n) => ExprKind::Literal(Literal::Integer(n)),
            TokenKind::Float(n) => ExprKind::Literal(Literal::Float(n)),
            TokenKind::Character(c) => ExprKind::Literal(Literal::Character(c)),
            TokenKind::String(s) => ExprKind::Literal(Literal::String(s)),
            TokenKind::Symbol(s) => ExprKind::Literal(Literal::Symbol(s)),
            TokenKind::Boolean(b) => ExprKind::Literal(Literal::Boolean(b)),
            TokenKind::Inf => ExprKind::Literal(Literal::Inf),
            TokenKind::Nan => ExprKind::Literal(Literal::Nan),

            // Names
            TokenKind::Identifier(name) => {
                self.note_legacy_spelling(&name, token.span);
                ExprKind::Variable {
                    name,
                    builtin: false,
                }
            }
            TokenKind::Builtin(name) => ExprKind::Variable {
                name,
                builtin: true,
            },

            TokenKind::LBrace => return self.parse_function(start),
            TokenKind::LParen => return self.parse_paren(start),
            TokenKind::Dollar => return self.parse_conditional(start),

            // Control words
            TokenKind::Return => {
                let value = if starts_expression(&self.current_token.kind) {
                    Some(Box::new(self.parse_expression()?))
                } else {
                    None
                };
                ExprKind::Return(value)
            }
            TokenKind::Break => ExprKind::Break,
            TokenKind::Continue => ExprKind::Continue,
            TokenKind::Assert => ExprKind::Assert(Box::new(self.parse_expression()?)),
            TokenKind::Try => ExprKind::Try(Box::new(self.parse_expression()?)),

            other => {
                return Err(SyntaxError::new("expression", other.describe(), token.span).into());
            }
        };

        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// `{ [params] body }`, both parts optional
    fn parse_function(&mut self, start: Position) -> PResult<Expr> {
        let params = if self.check(&TokenKind::LBracket) {
            self.parse_params()?
        } else {
            Vec::new()
        };

        let body = self.parse_function_body()?;
        self.expect(TokenKind::RBrace, "`}` to close function")?;

        Ok(Expr::new(
            ExprKind::Function { params, body },
            self.span_from(start),
        ))
    }

    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.advance()?; // consume '['
        let mut params = vec![];

        if !self.check(&TokenKind::RBracket) {
            loop {
                params.push(self.parse_param()?);
                if self.check(&TokenKind::Semicolon) {
                    self.advance()?;
                } else {
                    break;
                }
            }
        }

        self.expect(TokenKind::RBracket, "`;` or `]` in parameter list")?;
        Ok(params)
    }

    fn parse_param(&mut self) -> PResult<Param> {
        let name = match &self.current_token.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Builtin(name) => {
                return Err(SyntaxError::new(
                    "parameter name",
                    format!("builtin `{}`, which cannot be rebound", name),
                    self.current_token.span,
                )
                .into());
            }
            _ => return Err(self.error("parameter name")),
        };
        let token = self.advance()?;
        Ok(Param {
            name,
            span: token.span,
        })
    }

    /// Statements up to `}`, separated by any mix of `;` and newlines.
    /// Returns `None` when there are none.
    fn parse_function_body(&mut self) -> PResult<Option<Branch>> {
        let mut statements = vec![];
        let mut span: Option<Span> = None;

        loop {
            while self.at_separator() {
                self.advance()?;
            }
            if self.check(&TokenKind::RBrace) {
                break;
            }

            let statement = self.parse_statement()?;
            let stmt_span = statement.span();
            span = Some(span.map_or(stmt_span, |s| s.merge(stmt_span)));
            statements.push(statement);

            if !self.at_separator() && !self.check(&TokenKind::RBrace) {
                return Err(self.error("`;`, newline or `}`"));
            }
        }

        Ok(span.map(|span| Branch { statements, span }))
    }

    /// After `(`: unit, dict or list, decided by the first token(s)
    fn parse_paren(&mut self, start: Position) -> PResult<Expr> {
        self.skip_newlines()?;

        let form = if self.check(&TokenKind::RParen) {
            self.advance()?;
            ParenForm::Unit
        } else if matches!(self.current_token.kind, TokenKind::Symbol(_))
            && matches!(self.peek()?, TokenKind::Colon)
        {
            ParenForm::Dict(self.parse_items(TokenKind::RParen, Self::parse_dict_entry)?)
        } else {
            ParenForm::List(self.parse_items(TokenKind::RParen, Self::parse_expression)?)
        };

        Ok(Expr::new(ExprKind::Paren(form), self.span_from(start)))
    }

    fn parse_dict_entry(&mut self) -> PResult<DictEntry> {
        let key = match &self.current_token.kind {
            TokenKind::Symbol(name) => name.clone(),
            _ => return Err(self.error("symbol key in dict")),
        };
        let key_token = self.advance()?;
        self.expect(TokenKind::Colon, "`:` after dict key")?;
        let value = self.parse_expression()?;

        Ok(DictEntry {
            key,
            key_span: key_token.span,
            value,
        })
    }

    /// Items separated by required item separators, with leading blank
    /// lines and one trailing separator allowed, through `close`
    fn parse_items<T>(
        &mut self,
        close: TokenKind,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![];
        self.skip_newlines()?;

        while !self.check(&close) {
            items.push(item(self)?);
            if self.check(&close) {
                break;
            }
            self.item_separator(&close)?;
        }

        self.advance()?; // consume closer
        Ok(items)
    }

    /// `;` optionally flanked by newlines, or a bare newline run
    fn item_separator(&mut self, close: &TokenKind) -> PResult<()> {
        let mut seen = false;
        if self.check(&TokenKind::Newline) {
            self.advance()?;
            seen = true;
        }
        if self.check(&TokenKind::Semicolon) {
            self.advance()?;
            seen = true;
            self.skip_newlines()?;
        }
        if !seen {
            return Err(self.error(format!("`;`, newline or {}", close.describe())));
        }
        Ok(())
    }

    /// After `$`: `[cond; t; f]` or `.[cond; t]`
    fn parse_conditional(&mut self, start: Position) -> PResult<Expr> {
        let one_arm = self.check(&TokenKind::Dot);
        if one_arm {
            self.advance()?;
            self.expect(TokenKind::LBracket, "`[` after `$.`")?;
        } else {
            self.expect(TokenKind::LBracket, "`[` or `.[` after `$`")?;
        }

        self.skip_newlines()?;
        let cond = Box::new(self.parse_expression()?);
        self.control_separator()?;

        let kind = if one_arm {
            let branch = self.parse_branch(true)?;
            ExprKind::ConditionalOneArm { cond, branch }
        } else {
            // `;` ends the true arm, so only newlines separate inside it
            let mut then_branch = self.parse_branch(false)?;
            let else_branch = if self.check(&TokenKind::RBracket) {
                // no `;`: the last newline-separated statement is the false arm
                Self::split_last(&mut then_branch)
                    .ok_or_else(|| self.error("`;` between conditional arms"))?
            } else {
                self.expect(TokenKind::Semicolon, "`;` between conditional arms")?;
                self.skip_newlines()?;
                self.parse_branch(true)?
            };
            ExprKind::Conditional {
                cond,
                then_branch,
                else_branch,
            }
        };

        self.expect(TokenKind::RBracket, "`]` to close conditional")?;
        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// Move the last statement of `branch` into a branch of its own, if
    /// at least one statement stays behind.
    fn split_last(branch: &mut Branch) -> Option<Branch> {
        if branch.statements.len() < 2 {
            return None;
        }
        let last = branch.statements.pop()?;
        let rest = branch.statements.iter().map(Statement::span);
        branch.span = rest.reduce(Span::merge)?;
        let span = last.span();
        Some(Branch {
            statements: vec![last],
            span,
        })
    }

    /// `W[cond; body]` or `N[count; body]`
    fn parse_loop(&mut self) -> PResult<Expr> {
        let keyword = self.advance()?;
        let start = keyword.span.start;
        self.expect(TokenKind::LBracket, "`[`")?;

        self.skip_newlines()?;
        let head = Box::new(self.parse_expression()?);
        self.control_separator()?;
        let body = self.parse_branch(true)?;
        self.expect(TokenKind::RBracket, "`]` to close loop")?;

        let kind = if keyword.lexeme == "W" {
            ExprKind::While { cond: head, body }
        } else {
            ExprKind::For { count: head, body }
        };
        Ok(Expr::new(kind, self.span_from(start)))
    }

    /// `;` followed by optional newlines, or a newline run
    fn control_separator(&mut self) -> PResult<()> {
        match self.current_token.kind {
            TokenKind::Semicolon => {
                self.advance()?;
                self.skip_newlines()
            }
            TokenKind::Newline => {
                self.advance()?;
                Ok(())
            }
            _ => Err(self.error("`;` or newline")),
        }
    }

    /// Non-empty statement sequence inside a control form. Stops in front of
    /// `]`, or in front of `;` when `semicolons` is false.
    fn parse_branch(&mut self, semicolons: bool) -> PResult<Branch> {
        self.skip_newlines()?;

        let first = self.parse_statement()?;
        let mut span = first.span();
        let mut statements = vec![first];

        loop {
            let mut seen = false;
            if self.check(&TokenKind::Newline) {
                self.advance()?;
                seen = true;
            }
            if semicolons && self.check(&TokenKind::Semicolon) {
                self.advance()?;
                seen = true;
                self.skip_newlines()?;
            }
            if !seen
                || self.check(&TokenKind::RBracket)
                || (!semicolons && self.check(&TokenKind::Semicolon))
            {
                break;
            }

            let statement = self.parse_statement()?;
            span = span.merge(statement.span());
            statements.push(statement);
        }

        Ok(Branch { statements, span })
    }

    /// Primary with adjacent `[...]` suffixes only
    fn parse_index_chain(&mut self, base: Expr) -> PResult<Expr> {
        let mut suffixes = vec![];
        while self.at_adjacent_bracket() {
            suffixes.push(self.parse_index_suffix()?);
        }
        Ok(Self::with_suffixes(base, suffixes, self.prev_end))
    }

    fn parse_index_suffix(&mut self) -> PResult<Suffix> {
        let open = self.advance()?;
        let args = self.parse_items(TokenKind::RBracket, Self::parse_expression)?;
        Ok(Suffix::Index {
            args,
            span: Span::new(open.span.start, self.prev_end),
        })
    }

    fn with_suffixes(base: Expr, suffixes: Vec<Suffix>, end: Position) -> Expr {
        if suffixes.is_empty() {
            return base;
        }
        let span = Span::new(base.span.start, end);
        Expr::new(
            ExprKind::Postfix {
                base: Box::new(base),
                suffixes,
            },
            span,
        )
    }

    /// Argument written next to a function: `#` prefixes, then a primary
    /// with its index suffixes, then an optional exponent
    fn parse_juxtaposed(&mut self) -> PResult<Expr> {
        let start = self.current_token.span.start;
        let mut ops = vec![];
        while self.check(&TokenKind::Hash) {
            self.advance()?;
            ops.push(UnaryOp::Count);
        }

        let primary = self.parse_primary()?;
        let base = self.parse_index_chain(primary)?;
        let operand = self.parse_power_tail(base)?;

        if ops.is_empty() {
            return Ok(operand);
        }
        Ok(Expr::new(
            ExprKind::UnaryOp {
                ops,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    /// Primary followed by index and application suffixes, left to right
    fn parse_postfix(&mut self) -> PResult<Expr> {
        let base = self.parse_primary()?;
        let mut suffixes = vec![];

        loop {
            if self.at_adjacent_bracket() {
                suffixes.push(self.parse_index_suffix()?);
            } else if starts_juxtaposed(&self.current_token.kind) {
                let arg = self.parse_juxtaposed()?;
                suffixes.push(Suffix::Apply { arg: Box::new(arg) });
            } else {
                break;
            }
        }

        Ok(Self::with_suffixes(base, suffixes, self.prev_end))
    }

    fn parse_power_tail(&mut self, base: Expr) -> PResult<Expr> {
        if !self.check(&TokenKind::Caret) {
            return Ok(base);
        }
        self.advance()?;

        // Right-associative: the exponent is itself a (unary) power
        let exponent = self.nested(Self::parse_unary)?;
        let span = base.span.merge(exponent.span);
        Ok(Expr::new(
            ExprKind::Power {
                base: Box::new(base),
                exponent: Box::new(exponent),
            },
            span,
        ))
    }

    fn parse_power(&mut self) -> PResult<Expr> {
        let base = self.parse_postfix()?;
        self.parse_power_tail(base)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let start = self.current_token.span.start;
        let mut ops = vec![];

        loop {
            let op = match self.current_token.kind {
                TokenKind::Minus => UnaryOp::Negate,
                TokenKind::Hash => UnaryOp::Count,
                _ => break,
            };
            self.advance()?;
            ops.push(op);
        }

        let operand = self.parse_power()?;
        if ops.is_empty() {
            return Ok(operand);
        }

        Ok(Expr::new(
            ExprKind::UnaryOp {
                ops,
                operand: Box::new(operand),
            },
            self.span_from(start),
        ))
    }

    fn parse_multiplicative(&mut self) -> PResult<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Star => BinOp::Multiply,
                TokenKind::Slash => BinOp::Divide,
                TokenKind::SlashDot => BinOp::IntDivide,
                TokenKind::Percent => BinOp::Modulo,
                TokenKind::PercentDot => BinOp::FloatModulo,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> PResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Subtract,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current_token.kind {
                TokenKind::Eq => BinOp::Equal,
                TokenKind::Tilde | TokenKind::BangEq => BinOp::NotEqual,
                TokenKind::Lt => BinOp::LessThan,
                TokenKind::LtEq => BinOp::LessEqual,
                TokenKind::Gt => BinOp::GreaterThan,
                TokenKind::GtEq => BinOp::GreaterEqual,
                _ => break,
            };

            self.advance()?;
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_comma(&mut self) -> PResult<Expr> {
        let first = self.parse_comparison()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut elements = vec![first];
        while self.check(&TokenKind::Comma) {
            self.advance()?;
            elements.push(self.parse_comparison()?);
        }

        Ok(Expr::new(ExprKind::Comma { elements }, self.span_from(start)))
    }

    fn parse_pipe(&mut self) -> PResult<Expr> {
        let first = self.parse_comma()?;
        if !self.check(&TokenKind::Pipe) {
            return Ok(first);
        }

        let start = first.span.start;
        let mut stages = vec![first];
        while self.check(&TokenKind::Pipe) {
            self.advance()?;
            stages.push(self.parse_comma()?);
        }

        Ok(Expr::new(ExprKind::Pipe { stages }, self.span_from(start)))
    }

    /// Parse a full expression, assignment included
    pub fn parse_expression(&mut self) -> PResult<Expr> {
        self.nested(Self::parse_assignment)
    }

    fn parse_assignment(&mut self) -> PResult<Expr> {
        let left = self.parse_pipe()?;
        if !self.check(&TokenKind::Colon) {
            return Ok(left);
        }
        self.advance()?;

        let right = self.parse_expression()?;
        let span = left.span.merge(right.span);
        Ok(Expr::new(
            ExprKind::Assignment {
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        ))
    }

    /// Parse exactly one expression, allowing surrounding newlines
    pub fn parse(&mut self) -> PResult<Expr> {
        self.skip_newlines()?;
        let expr = self.parse_expression()?;
        self.skip_newlines()?;
        self.expect(TokenKind::Eof, "end of input")?;
        Ok(expr)
    }
}

impl Parser {
    /// Parse a complete program.
    ///
    /// Without recovery the first error is returned. With recovery, syntax
    /// errors are collected in [`Parser::diagnostics`] and the program holds
    /// every statement that parsed.
    pub fn parse_program(&mut self) -> PResult<Program> {
        match self.parse_partial() {
            (program, None) => Ok(program),
            (_, Some(e)) => Err(e),
        }
    }

    /// Parse as far as possible; the error, if any, is the one that stopped
    /// the parse.
    fn parse_partial(&mut self) -> (Program, Option<ParseError>) {
        let mut shebang = None;
        let mut statements = vec![];

        let failure = match self.parse_shebang() {
            Ok(text) => {
                shebang = text;
                self.parse_top_level(&mut statements)
            }
            Err(e) => Some(e),
        };

        let program = Program {
            shebang,
            statements,
            span: Span::new(Position::start(), self.current_token.span.end),
        };
        (program, failure)
    }

    fn parse_shebang(&mut self) -> PResult<Option<String>> {
        if let TokenKind::Shebang(text) = &self.current_token.kind {
            let text = text.clone();
            self.advance()?;
            return Ok(Some(text));
        }
        Ok(None)
    }

    fn parse_top_level(&mut self, statements: &mut Vec<Statement>) -> Option<ParseError> {
        loop {
            match self.parse_top_level_statement(statements) {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e @ ParseError::Syntax(_)) if self.recover => {
                    self.diagnostics.push(Diagnostic::from(&e));
                    if let Err(e) = self.synchronize() {
                        return Some(e);
                    }
                }
                Err(e) => return Some(e),
            }
        }
    }

    /// Parse one statement into `statements`. `Ok(false)` at end of input.
    fn parse_top_level_statement(&mut self, statements: &mut Vec<Statement>) -> PResult<bool> {
        while self.at_separator() {
            self.advance()?;
        }
        if self.check(&TokenKind::Eof) {
            return Ok(false);
        }

        statements.push(self.parse_statement()?);

        if !self.at_separator() && !self.check(&TokenKind::Eof) {
            return Err(self.error("`;` or newline"));
        }
        Ok(true)
    }

    /// Skip to the next `;` or newline outside any brackets.
    fn synchronize(&mut self) -> PResult<()> {
        loop {
            match self.current_token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Newline | TokenKind::Semicolon if self.depth == 0 => return Ok(()),
                _ => {
                    self.advance()?;
                }
            }
        }
    }

    fn parse_statement(&mut self) -> PResult<Statement> {
        if let TokenKind::MagicCommand(payload) = &self.current_token.kind {
            let payload = payload.clone();
            let token = self.advance()?;
            return Ok(Statement::MagicCommand {
                payload,
                span: token.span,
            });
        }
        Ok(Statement::Expression(self.parse_expression()?))
    }
}
