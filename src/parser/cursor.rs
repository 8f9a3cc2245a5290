use crate::lexer::{Lexer, Token, TokenKind};
use crate::parser::{InnerParseError, ParseError, Result};

/// Token cursor: holds the current token and pulls the next one from the lexer on demand.
#[derive(Debug)]
pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    in_function: bool,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            in_function: false,
        })
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    /// The token after the current one, without consuming anything.
    pub fn peek_2nd(&self) -> Result<Token> {
        Ok(self.lexer.peek_token()?)
    }

    /// Consumes the current token and returns it.
    pub fn bump(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn bump_if(&mut self, kind: TokenKind) -> Result<bool> {
        let condition = self.peek_is(kind);
        if condition {
            self.bump()?;
        }
        Ok(condition)
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.peek_is(kind) {
            self.bump()
        } else {
            let got = self.current.clone();
            Err(self.error(InnerParseError::ExpectedButGot {
                expected: kind,
                got,
            }))
        }
    }

    pub fn at_end(&self) -> bool {
        self.peek_is(TokenKind::Eof)
    }

    pub fn get_line(&self) -> &'a str {
        self.lexer.current_line()
    }

    pub fn error(&self, inner: InnerParseError) -> ParseError {
        inner.set_line(self.get_line())
    }

    pub fn in_function(&self) -> bool {
        self.in_function
    }

    pub fn set_in_function(&mut self, in_function: bool) {
        self.in_function = in_function;
    }
}
