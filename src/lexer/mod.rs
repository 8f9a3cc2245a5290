mod cursor;
mod lexer_error;
mod token;

use cursor::Cursor;
use regex::Regex;
use std::sync::LazyLock;

pub use lexer_error::LexError;
pub use token::{Token, TokenKind};

pub type Tokens = Vec<Token>;
pub type Result<T> = std::result::Result<T, LexError>;

/// Lexical rules, tried in order. The first rule matching at the cursor wins,
/// so keywords precede identifiers and `!=`/`==` precede `!`/`=`.
static RULES: LazyLock<Vec<(Regex, TokenKind)>> = LazyLock::new(|| {
    [
        (r"^return\b", TokenKind::Return),
        (r"^;", TokenKind::Semicolon),
        (r"^if\b", TokenKind::If),
        (r"^else\b", TokenKind::Else),
        (r"^function\b", TokenKind::Function),
        (r"^var\b", TokenKind::Var),
        (r"^while\b", TokenKind::While),
        (r"^[0-9]+", TokenKind::Number),
        (r"^!=", TokenKind::NotEqual),
        (r"^==", TokenKind::Equal),
        (r"^,", TokenKind::Comma),
        (r"^!", TokenKind::Not),
        (r"^=", TokenKind::Assign),
        (r"^\+", TokenKind::Plus),
        (r"^-", TokenKind::Minus),
        (r"^\*", TokenKind::Star),
        (r"^/", TokenKind::Slash),
        (r"^\(", TokenKind::LeftParen),
        (r"^\)", TokenKind::RightParen),
        (r"^\{", TokenKind::LeftBrace),
        (r"^\}", TokenKind::RightBrace),
        (r"^[a-zA-Z_][a-zA-Z0-9_]*", TokenKind::Identifier),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("Should never fail"), kind))
    .collect()
});

/// On-demand tokenizer with one token of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Matches the token following the cursor and returns it together with the
    /// offset right past it. Never moves the cursor.
    fn scan(&self) -> Result<(Token, usize)> {
        let mut cursor = Cursor::at(self.source, self.position);
        cursor.skip_trivia();
        let start = cursor.offset();

        if cursor.is_eof() {
            return Ok((Token::eof(start), start));
        }

        let rest = cursor.as_str();
        RULES
            .iter()
            .find_map(|(regex, kind)| regex.find(rest).map(|m| (*kind, m.as_str())))
            .map(|(kind, text)| (Token::new(kind, text, start), start + text.len()))
            .ok_or_else(|| LexError::UnexpectedChar {
                ch: cursor.peek().unwrap_or('\0'),
                offset: start,
            })
    }

    pub fn next_token(&mut self) -> Result<Token> {
        let (token, end) = self.scan()?;
        self.position = end;
        Ok(token)
    }

    pub fn peek_token(&self) -> Result<Token> {
        self.scan().map(|(token, _)| token)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Full text of the source line the cursor currently stands on.
    pub fn current_line(&self) -> &'a str {
        let position = self.position.min(self.source.len());
        let start = self.source[..position].rfind('\n').map_or(0, |i| i + 1);
        let end = self.source[position..]
            .find('\n')
            .map_or(self.source.len(), |i| position + i);
        &self.source[start..end]
    }
}

/// Tokenizes the whole input. The end-of-input token is not included.
pub fn lex(source: &str) -> Result<Tokens> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Tokens::new();
    loop {
        let token = lexer.next_token()?;
        if token.is(TokenKind::Eof) {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}
