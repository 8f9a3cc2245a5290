pub mod asm_ast;
mod codegen_error;
mod emitter;
mod environment;
mod gen;

use crate::ast::AstStatement;
use tracing::debug;

pub use asm_ast::*;
pub use codegen_error::{CodegenError, Result};
pub use emitter::{Emitter, LabelGenerator};
pub use environment::{Environment, MAX_REGISTER_ARGS};

use gen::gen_statement;

/// Lowers a whole program. Statements outside any function are lowered under
/// an empty context.
pub fn codegen(ast: &AstStatement) -> Result<AsmProgram> {
    let mut emitter = Emitter::new();
    let mut env = Environment::new();
    gen_statement(ast, &mut env, &mut emitter)?;
    debug!(instructions = emitter.len(), "code generation done");

    Ok(emitter.into_program())
}
