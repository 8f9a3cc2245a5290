use super::asm_ast::{AsmInstructions, AsmProgram, Instruction};
use crate::ast::Identifier;
use tracing::trace;

/// Source of `.L<n>` labels, unique for one whole lowering run.
#[derive(Debug, Default)]
pub struct LabelGenerator {
    count: u64,
}

impl LabelGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_label(&mut self) -> Identifier {
        self.count += 1;
        format!(".L{}", self.count)
    }
}

/// Append-only sink the lowering writes its instructions to.
#[derive(Debug, Default)]
pub struct Emitter {
    instructions: AsmInstructions,
    labels: LabelGenerator,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn emit_all(&mut self, instructions: impl IntoIterator<Item = Instruction>) {
        self.instructions.extend(instructions);
    }

    pub fn fresh_label(&mut self) -> Identifier {
        let label = self.labels.get_label();
        trace!(%label, "allocated label");
        label
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn into_program(self) -> AsmProgram {
        AsmProgram {
            instructions: self.instructions,
        }
    }
}
