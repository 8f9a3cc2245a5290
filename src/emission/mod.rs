//! Code emission using [Display]
//!
//! Implements [Display] for the [assembly AST](crate::codegen) so a lowered program can be
//! rendered with [to_string] or used as an argument in any formatting context
//! ([format!], [write!], [println!], ..). Every instruction is printed on its own line in
//! GNU `as` syntax for 32-bit ARM.
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string
//! [format!]: https://doc.rust-lang.org/std/macro.format.html
//! [write!]: https://doc.rust-lang.org/std/macro.write.html
//! [println!]: https://doc.rust-lang.org/std/macro.println.html


use crate::codegen::*;

use std::fmt;

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::R0 => "r0",
            Self::R1 => "r1",
            Self::R2 => "r2",
            Self::R3 => "r3",
            Self::Ip => "ip",
            Self::Fp => "fp",
            Self::Sp => "sp",
            Self::Lr => "lr",
            Self::Pc => "pc",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Imm(i) => write!(f, "#{i}"),
            Self::Reg(r) => write!(f, "{r}"),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Eq => write!(f, "eq"),
            Self::Ne => write!(f, "ne"),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Mul => write!(f, "mul"),
            Self::Udiv => write!(f, "udiv"),
        }
    }
}

struct RegisterList<'a>(&'a [Register]);

impl fmt::Display for RegisterList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, reg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{reg}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Global(name) => write!(f, ".global {name}"),
            Self::Label(name) => write!(f, "{name}:"),
            Self::LoadConst(dst, value) => write!(f, "ldr {dst}, ={value}"),
            Self::MovImm(dst, imm) => write!(f, "mov {dst}, #{imm}"),
            Self::Mov(dst, src) => write!(f, "mov {dst}, {src}"),
            Self::MovCC(cond, dst, imm) => write!(f, "mov{cond} {dst}, #{imm}"),
            Self::Load(dst, base, offset) => write!(f, "ldr {dst}, [{base}, #{offset}]"),
            Self::Store(src, base, offset) => write!(f, "str {src}, [{base}, #{offset}]"),
            Self::Push(regs) => write!(f, "push {}", RegisterList(regs)),
            Self::Pop(regs) => write!(f, "pop {}", RegisterList(regs)),
            Self::Cmp(lhs, rhs) => write!(f, "cmp {lhs}, {rhs}"),
            Self::Binary(op, dst, lhs, rhs) => write!(f, "{op} {dst}, {lhs}, {rhs}"),
            Self::Branch(label) => write!(f, "b {label}"),
            Self::BranchCC(cond, label) => write!(f, "b{cond} {label}"),
            Self::BranchLink(name) => write!(f, "bl {name}"),
        }
    }
}

impl fmt::Display for AsmProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}
