use crate::ast::Identifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmProgram {
    pub instructions: AsmInstructions,
}

pub type AsmInstructions = Vec<Instruction>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Empty line separating functions.
    Blank,
    Global(Identifier),
    Label(Identifier),
    /// `ldr reg, =value`, load of an arbitrary 32-bit constant.
    LoadConst(Register, u32),
    MovImm(Register, i32),
    Mov(Register, Register),
    MovCC(Condition, Register, i32),
    /// `ldr dst, [base, #offset]`
    Load(Register, Register, i32),
    /// `str src, [base, #offset]`
    Store(Register, Register, i32),
    Push(Vec<Register>),
    Pop(Vec<Register>),
    Cmp(Register, Operand),
    Binary(BinaryOp, Register, Register, Operand),
    Branch(Identifier),
    BranchCC(Condition, Identifier),
    BranchLink(Identifier),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// unsigned division
    Udiv,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    Eq,
    Ne,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Imm(i32),
    Reg(Register),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    Ip,
    Fp,
    Sp,
    Lr,
    Pc,
}

impl Register {
    /// Registers carrying the first four integer arguments.
    pub const ARGS: [Register; 4] = [Self::R0, Self::R1, Self::R2, Self::R3];
}

impl Instruction {
    /// Number of bytes this instruction moves the stack pointer down by.
    /// Negative when the stack shrinks.
    pub fn stack_growth(&self) -> i32 {
        let bytes = |regs: &Vec<Register>| 4 * regs.len() as i32;
        match self {
            Self::Push(regs) => bytes(regs),
            Self::Pop(regs) if !regs.contains(&Register::Pc) => -bytes(regs),
            Self::Binary(BinaryOp::Sub, Register::Sp, Register::Sp, Operand::Imm(i)) => *i,
            Self::Binary(BinaryOp::Add, Register::Sp, Register::Sp, Operand::Imm(i)) => -*i,
            _ => 0,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Self::Label(_))
    }
}
