use std::fmt;

/// Token together with the source text it was matched from.
///
/// The starting byte offset is kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub offset: usize,
}

/// Basic token type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// end of input
    Eof,
    /// decimal numeric literal (e.g. 42)
    Number,
    /// variable and function names
    Identifier,
    /// return keyword
    Return,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// function keyword
    Function,
    /// var keyword
    Var,
    /// while keyword
    While,
    /// !
    Not,
    /// =
    Assign,
    /// ==
    Equal,
    /// !=
    NotEqual,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ;
    Semicolon,
    /// ,
    Comma,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            offset,
        }
    }

    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset)
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl TokenKind {
    #[inline]
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Return | Self::If | Self::Else | Self::Function | Self::Var | Self::While
        )
    }

    #[inline]
    pub fn is_comparison(self) -> bool {
        matches!(self, Self::Equal | Self::NotEqual)
    }

    #[inline]
    pub fn is_additive(self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }

    #[inline]
    pub fn is_multiplicative(self) -> bool {
        matches!(self, Self::Star | Self::Slash)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "end of input"),
            Self::Number => write!(f, "number"),
            Self::Identifier => write!(f, "identifier"),
            Self::Return => write!(f, "'return'"),
            Self::If => write!(f, "'if'"),
            Self::Else => write!(f, "'else'"),
            Self::Function => write!(f, "'function'"),
            Self::Var => write!(f, "'var'"),
            Self::While => write!(f, "'while'"),
            Self::Not => write!(f, "'!'"),
            Self::Assign => write!(f, "'='"),
            Self::Equal => write!(f, "'=='"),
            Self::NotEqual => write!(f, "'!='"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::LeftBrace => write!(f, "'{{'"),
            Self::RightBrace => write!(f, "'}}'"),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::Semicolon => write!(f, "';'"),
            Self::Comma => write!(f, "','"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Number | TokenKind::Identifier => write!(f, "{} '{}'", self.kind, self.text),
            kind => write!(f, "{kind}"),
        }
    }
}
