#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use anyhow::{anyhow, bail, Result};
use armc::codegen::{AsmProgram, BinaryOp, Condition, Instruction, Operand, Register};

const STACK_TOP: u32 = 0x0010_0000;
/// Return address handed to the entry function; popping it into pc halts.
const EXIT_ADDRESS: u32 = u32::MAX;
const STEP_LIMIT: usize = 1_000_000;

/// Compiles `source`, panicking on any compilation error.
pub fn compile(source: &str) -> AsmProgram {
    armc::compile(source).unwrap_or_else(|e| panic!("failed to compile {source:?}: {e}"))
}

/// Compiles `source` and returns what `main()` leaves in r0.
pub fn run_main(source: &str) -> u32 {
    let program = compile(source);
    Machine::new(&program)
        .and_then(|mut machine| machine.call("main", &[]))
        .unwrap_or_else(|e| panic!("failed to run {source:?}: {e}"))
}

pub fn labels(program: &AsmProgram) -> Vec<&str> {
    program
        .instructions
        .iter()
        .filter_map(|i| match i {
            Instruction::Label(name) => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

pub fn has_unique_labels(program: &AsmProgram) -> bool {
    let labels = labels(program);
    let unique: HashSet<_> = labels.iter().collect();
    unique.len() == labels.len()
}

/// Interpreter for the subset of 32-bit ARM the compiler emits.
///
/// Memory is word addressed through a sparse map, flags are reduced to the
/// zero flag and `udiv` by zero yields 0 as on cores without the trap enabled.
pub struct Machine<'a> {
    program: &'a [Instruction],
    labels: HashMap<&'a str, u32>,
    registers: HashMap<Register, u32>,
    memory: HashMap<u32, u32>,
    zero: bool,
    /// sp at each pending `bl`, checked again when the callee returns.
    calls: Vec<u32>,
    pub max_depth: usize,
}

impl<'a> Machine<'a> {
    pub fn new(program: &'a AsmProgram) -> Result<Self> {
        let mut labels = HashMap::new();
        for (index, instruction) in program.instructions.iter().enumerate() {
            if let Instruction::Label(name) = instruction {
                if labels.insert(name.as_str(), index as u32).is_some() {
                    bail!("duplicate label {name}");
                }
            }
        }
        Ok(Self {
            program: &program.instructions,
            labels,
            registers: HashMap::new(),
            memory: HashMap::new(),
            zero: false,
            calls: Vec::new(),
            max_depth: 0,
        })
    }

    pub fn register(&self, reg: Register) -> u32 {
        self.registers.get(&reg).copied().unwrap_or(0)
    }

    fn set(&mut self, reg: Register, value: u32) {
        self.registers.insert(reg, value);
    }

    fn load(&self, address: u32) -> Result<u32> {
        if address % 4 != 0 {
            bail!("unaligned load from {address:#x}");
        }
        Ok(self.memory.get(&address).copied().unwrap_or(0))
    }

    fn store(&mut self, address: u32, value: u32) -> Result<()> {
        if address % 4 != 0 {
            bail!("unaligned store to {address:#x}");
        }
        if address >= STACK_TOP {
            bail!("store above the stack top at {address:#x}");
        }
        self.memory.insert(address, value);
        Ok(())
    }

    fn operand(&self, operand: Operand) -> u32 {
        match operand {
            Operand::Imm(i) => i as u32,
            Operand::Reg(r) => self.register(r),
        }
    }

    fn holds(&self, cond: Condition) -> bool {
        match cond {
            Condition::Eq => self.zero,
            Condition::Ne => !self.zero,
        }
    }

    fn target(&self, label: &str) -> Result<u32> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| anyhow!("branch to unknown label {label}"))
    }

    /// Calls `entry` with up to four arguments and runs until it returns.
    /// Fails if the stack pointer differs after any call returns.
    pub fn call(&mut self, entry: &str, args: &[u32]) -> Result<u32> {
        for (reg, value) in Register::ARGS.iter().zip(args) {
            self.set(*reg, *value);
        }
        self.set(Register::Sp, STACK_TOP);
        self.set(Register::Lr, EXIT_ADDRESS);
        self.calls.push(STACK_TOP);

        let mut pc = self.target(entry)?;
        for _ in 0..STEP_LIMIT {
            if pc == EXIT_ADDRESS {
                return Ok(self.register(Register::R0));
            }
            let instruction = self
                .program
                .get(pc as usize)
                .ok_or_else(|| anyhow!("fell off the end of the program at {pc}"))?;
            pc = self.step(instruction, pc)?;
        }
        bail!("no return after {STEP_LIMIT} steps")
    }

    fn step(&mut self, instruction: &Instruction, pc: u32) -> Result<u32> {
        let sp = self.register(Register::Sp);
        let next = pc + 1;
        match instruction {
            Instruction::Blank | Instruction::Global(_) | Instruction::Label(_) => {}
            Instruction::LoadConst(dst, value) => self.set(*dst, *value),
            Instruction::MovImm(dst, imm) => self.set(*dst, *imm as u32),
            Instruction::Mov(dst, src) => self.set(*dst, self.register(*src)),
            Instruction::MovCC(cond, dst, imm) => {
                if self.holds(*cond) {
                    self.set(*dst, *imm as u32);
                }
            }
            Instruction::Load(dst, base, offset) => {
                let value = self.load(self.register(*base).wrapping_add_signed(*offset))?;
                self.set(*dst, value);
            }
            Instruction::Store(src, base, offset) => {
                let address = self.register(*base).wrapping_add_signed(*offset);
                self.store(address, self.register(*src))?;
            }
            Instruction::Push(regs) => {
                let bottom = sp - 4 * regs.len() as u32;
                for (reg, address) in regs.iter().zip((bottom..).step_by(4)) {
                    self.store(address, self.register(*reg))?;
                }
                self.set(Register::Sp, bottom);
            }
            Instruction::Pop(regs) => {
                let mut jump = None;
                for (reg, address) in regs.iter().zip((sp..).step_by(4)) {
                    let value = self.load(address)?;
                    if *reg == Register::Pc {
                        jump = Some(value);
                    } else {
                        self.set(*reg, value);
                    }
                }
                let top = sp + 4 * regs.len() as u32;
                self.set(Register::Sp, top);
                if let Some(ret) = jump {
                    let expected = self.calls.pop().ok_or_else(|| anyhow!("return without call"))?;
                    if expected != top {
                        bail!("unbalanced stack: sp {top:#x} after return, {expected:#x} at call");
                    }
                    return Ok(ret);
                }
            }
            Instruction::Cmp(lhs, rhs) => self.zero = self.register(*lhs) == self.operand(*rhs),
            Instruction::Binary(op, dst, lhs, rhs) => {
                let (a, b) = (self.register(*lhs), self.operand(*rhs));
                let value = match op {
                    BinaryOp::Add => a.wrapping_add(b),
                    BinaryOp::Sub => a.wrapping_sub(b),
                    BinaryOp::Mul => a.wrapping_mul(b),
                    BinaryOp::Udiv => a.checked_div(b).unwrap_or(0),
                };
                self.set(*dst, value);
            }
            Instruction::Branch(label) => return self.target(label),
            Instruction::BranchCC(cond, label) => {
                if self.holds(*cond) {
                    return self.target(label);
                }
            }
            Instruction::BranchLink(name) => {
                self.set(Register::Lr, next);
                self.calls.push(sp);
                self.max_depth = self.max_depth.max(self.calls.len());
                return self.target(name);
            }
        }
        Ok(next)
    }
}
