use crate::ast::Identifier;
use crate::lexer::{LexError, Token, TokenKind};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InnerParseError {
    #[error("expected {expected}, but got {got}")]
    ExpectedButGot { expected: TokenKind, got: Token },
    #[error("expected identifier, but got {0}")]
    ExpectedIdentifierButGot(Token),
    #[error("bad factor {0}")]
    BadFactor(Token),
    #[error("number literal {0} does not fit in 32 bits")]
    BadNumber(String),
    #[error("function {0} is defined inside another function")]
    NestedFunction(Identifier),
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("{inner}\n{line}")]
    Syntax {
        inner: InnerParseError,
        line: String,
    },
}

impl InnerParseError {
    pub fn set_line(self, line: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            inner: self,
            line: line.into(),
        }
    }
}

impl ParseError {
    pub fn get_inner(&self) -> Option<&InnerParseError> {
        match self {
            Self::Syntax { inner, .. } => Some(inner),
            Self::Lex(_) => None,
        }
    }

    pub fn get_line(&self) -> Option<&str> {
        match self {
            Self::Syntax { line, .. } => Some(line),
            Self::Lex(_) => None,
        }
    }
}
