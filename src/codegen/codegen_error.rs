use crate::ast::Identifier;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CodegenError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(Identifier),
    #[error("call to {callee} passes {count} arguments, more than 4 arguments not supported")]
    TooManyArguments { callee: Identifier, count: usize },
    #[error("function {name} declares {count} parameters, more than 4 parameters not supported")]
    TooManyParameters { name: Identifier, count: usize },
}
