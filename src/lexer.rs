use crate::{
    ast::{Position, Span, Token, TokenKind},
    builtins,
    diagnostic::LexError,
};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    offset: usize,
    line: usize,
    column: usize,
    // open ( [ { not yet closed; magic commands only exist at depth 0
    depth: usize,
    // nothing but trivia seen since the last newline
    line_start: bool,
}

/// Lex `input` through end-of-input. The returned vector always ends with
/// an `Eof` token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '?'
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            offset: 0,
            line: 1,
            column: 1,
            depth: 0,
            line_start: true,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn here(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.position].iter().collect()
    }

    /// Skip spaces, tabs, carriage returns and `//` comments. Newlines are
    /// tokens and stop the scan.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' => self.advance(),
                '/' if self.peek_char(1) == Some('/') => {
                    while let Some(c) = self.current_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                c if c != '\n' && c.is_whitespace() => self.advance(),
                _ => break,
            }
        }
    }

    fn read_rest_of_line(&mut self) -> String {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        let mut text = self.text_from(start);
        if text.ends_with('\r') {
            text.pop();
        }
        text
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_ident_continue(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Read the character after a backslash. `None` means the buffer ended.
    fn read_escape(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.advance();
        Some(match ch {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            other => other,
        })
    }

    fn read_string(&mut self, start: Position) -> Result<String, LexError> {
        let mut result = String::new();
        self.advance(); // opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance();
                    match self.read_escape() {
                        Some(c) => result.push(c),
                        None => break,
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString {
            start,
            end: self.here(),
        })
    }

    fn read_character(&mut self, start: Position) -> Result<char, LexError> {
        self.advance(); // opening quote

        let value = match self.current_char() {
            Some('\\') => {
                self.advance();
                self.read_escape()
            }
            Some('\'') | None => None,
            Some(ch) => {
                self.advance();
                Some(ch)
            }
        };

        match (value, self.current_char()) {
            (Some(ch), Some('\'')) => {
                self.advance();
                Ok(ch)
            }
            _ => Err(LexError::UnterminatedCharacter {
                start,
                end: self.here(),
            }),
        }
    }

    fn read_number(&mut self, start: Position) -> Result<TokenKind, LexError> {
        let mut number = String::new();
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            match number.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(TokenKind::Float(value)),
                _ => Err(LexError::FloatOutOfRange {
                    span: Span::new(start, self.here()),
                    lexeme: number,
                }),
            }
        } else {
            number
                .parse::<i64>()
                .map(TokenKind::Integer)
                .map_err(|_| LexError::IntegerOutOfRange {
                    span: Span::new(start, self.here()),
                    lexeme: number,
                })
        }
    }

    /// Consume a run of newlines together with any blank or comment-only
    /// lines in between.
    fn read_newlines(&mut self) -> (Position, usize) {
        let mut end = (self.here(), self.position);
        while self.current_char() == Some('\n') {
            self.advance();
            end = (self.here(), self.position);
            self.skip_trivia();
        }
        end
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn one_or_two(&mut self, second: char, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.peek_char(1) == Some(second) {
            self.advance();
            self.advance();
            long
        } else {
            self.advance();
            short
        }
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if self.position == 0 && self.current_char() == Some('#') && self.peek_char(1) == Some('!')
        {
            let start = self.here();
            self.advance();
            self.advance();
            let text = self.read_rest_of_line();
            let lexeme = format!("#!{}", text);
            return Ok(Token::new(
                TokenKind::Shebang(text),
                lexeme,
                Span::new(start, self.here()),
            ));
        }

        self.skip_trivia();

        let start = self.here();
        let start_index = self.position;
        let at_line_start = self.line_start;
        self.line_start = false;

        let kind = match self.current_char() {
            None => {
                self.line_start = at_line_start;
                TokenKind::Eof
            }
            Some('\n') => {
                let (end, end_index) = self.read_newlines();
                self.line_start = true;
                let lexeme: String = self.input[start_index..end_index].iter().collect();
                return Ok(Token::new(TokenKind::Newline, lexeme, Span::new(start, end)));
            }
            Some('!') if at_line_start && self.depth == 0 && self.peek_char(1) != Some('=') => {
                self.advance();
                TokenKind::MagicCommand(self.read_rest_of_line())
            }
            Some('!') if self.peek_char(1) == Some('=') => {
                self.advance();
                self.advance();
                TokenKind::BangEq
            }
            Some('+') => self.single(TokenKind::Plus),
            Some('-') => self.single(TokenKind::Minus),
            Some('*') => self.single(TokenKind::Star),
            Some('/') => self.one_or_two('.', TokenKind::SlashDot, TokenKind::Slash),
            Some('%') => self.one_or_two('.', TokenKind::PercentDot, TokenKind::Percent),
            Some('^') => self.single(TokenKind::Caret),
            Some('#') => self.single(TokenKind::Hash),
            Some('=') => self.single(TokenKind::Eq),
            Some('~') => self.single(TokenKind::Tilde),
            Some('<') => self.one_or_two('=', TokenKind::LtEq, TokenKind::Lt),
            Some('>') => self.one_or_two('=', TokenKind::GtEq, TokenKind::Gt),
            Some(':') => self.single(TokenKind::Colon),
            Some(',') => self.single(TokenKind::Comma),
            Some('|') => self.single(TokenKind::Pipe),
            Some(';') => self.single(TokenKind::Semicolon),
            Some('.') => self.single(TokenKind::Dot),
            Some('$') => self.single(TokenKind::Dollar),
            Some('(') => {
                self.depth += 1;
                self.single(TokenKind::LParen)
            }
            Some('[') => {
                self.depth += 1;
                self.single(TokenKind::LBracket)
            }
            Some('{') => {
                self.depth += 1;
                self.single(TokenKind::LBrace)
            }
            Some(')') => {
                self.depth = self.depth.saturating_sub(1);
                self.single(TokenKind::RParen)
            }
            Some(']') => {
                self.depth = self.depth.saturating_sub(1);
                self.single(TokenKind::RBracket)
            }
            Some('}') => {
                self.depth = self.depth.saturating_sub(1);
                self.single(TokenKind::RBrace)
            }
            Some('@') => {
                let word = match self.peek_char(1) {
                    Some('r') => Some(TokenKind::Return),
                    Some('b') => Some(TokenKind::Break),
                    Some('c') => Some(TokenKind::Continue),
                    Some('a') => Some(TokenKind::Assert),
                    Some('t') => Some(TokenKind::Try),
                    _ => None,
                };
                match word {
                    Some(kind) if !self.peek_char(2).is_some_and(is_ident_continue) => {
                        self.advance();
                        self.advance();
                        kind
                    }
                    _ => return Err(LexError::IllegalCharacter { ch: '@', at: start }),
                }
            }
            Some('"') => TokenKind::String(self.read_string(start)?),
            Some('\'') => TokenKind::Character(self.read_character(start)?),
            Some('`') => {
                self.advance();
                if !self.current_char().is_some_and(is_ident_start) {
                    return Err(LexError::UnterminatedSymbol {
                        start,
                        end: self.here(),
                    });
                }
                TokenKind::Symbol(self.read_identifier())
            }
            Some(ch) if is_ident_start(ch) => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "true" => TokenKind::Boolean(true),
                    "false" => TokenKind::Boolean(false),
                    "inf" => TokenKind::Inf,
                    "nan" => TokenKind::Nan,
                    name if builtins::is_builtin(name) => TokenKind::Builtin(ident),
                    _ => TokenKind::Identifier(ident),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(start)?,
            Some(ch) => return Err(LexError::IllegalCharacter { ch, at: start }),
        };

        let lexeme = self.text_from(start_index);
        Ok(Token::new(kind, lexeme, Span::new(start, self.here())))
    }
}
