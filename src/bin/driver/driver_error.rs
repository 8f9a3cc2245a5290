use armc::codegen::CodegenError;
use armc::lexer::LexError;
use armc::parser::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("File {0} does not exist")]
    InputFileDoesNotExist(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("parse error: {0}")]
    Parse(ParseError),
    #[error("codegen error: {0}")]
    Codegen(#[from] CodegenError),
}

impl From<ParseError> for DriverError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Lex(e) => Self::Lex(e),
            e => Self::Parse(e),
        }
    }
}
