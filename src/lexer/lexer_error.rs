use thiserror::Error;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LexError {
    #[error("invalid character at position {offset}: {ch}")]
    UnexpectedChar { ch: char, offset: usize },
}

impl LexError {
    pub fn get_offset(&self) -> usize {
        match self {
            Self::UnexpectedChar { offset, .. } => *offset,
        }
    }
}
