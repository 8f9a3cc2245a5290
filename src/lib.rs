#![deny(unused_must_use)]
#![warn(clippy::pedantic)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod ast;
#[cfg(feature = "codegen")]
pub mod codegen;
#[cfg(feature = "emission")]
pub mod emission;
#[cfg(feature = "lexer")]
pub mod lexer;
#[cfg(feature = "parser")]
pub mod parser;

#[cfg(feature = "codegen")]
pub use pipeline::{compile, Error};

#[cfg(feature = "codegen")]
mod pipeline {
    use crate::codegen::{self, AsmProgram, CodegenError};
    use crate::lexer::LexError;
    use crate::parser::{self, ParseError};
    use thiserror::Error;

    /// Failure of any compilation stage.
    #[derive(Debug, Error, Eq, PartialEq)]
    pub enum Error {
        #[error("lex error: {0}")]
        Lex(#[from] LexError),
        #[error("parse error: {0}")]
        Parse(ParseError),
        #[error("codegen error: {0}")]
        Codegen(#[from] CodegenError),
    }

    impl From<ParseError> for Error {
        fn from(e: ParseError) -> Self {
            match e {
                ParseError::Lex(e) => Self::Lex(e),
                e => Self::Parse(e),
            }
        }
    }

    /// Compiles a whole source file into its instruction list.
    pub fn compile(source: &str) -> Result<AsmProgram, Error> {
        let ast = parser::parse_program(source)?;
        let program = codegen::codegen(&ast)?;
        Ok(program)
    }
}
