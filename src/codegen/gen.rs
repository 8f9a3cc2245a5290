use super::asm_ast::*;
use super::codegen_error::{CodegenError, Result};
use super::emitter::Emitter;
use super::environment::{Environment, MAX_REGISTER_ARGS};
use crate::ast::*;
use tracing::debug;

use super::asm_ast::Register::{Fp, Ip, Lr, Pc, Sp, R0, R1};

/// Bytes reserved below the stack pointer for staging call arguments.
const ARG_AREA_SIZE: i32 = 16;

/// Machine operation for an arithmetic operator; `None` for comparisons.
fn arith_op(op: AstBinaryOp) -> Option<BinaryOp> {
    match op {
        AstBinaryOp::Add => Some(BinaryOp::Add),
        AstBinaryOp::Subtract => Some(BinaryOp::Sub),
        AstBinaryOp::Multiply => Some(BinaryOp::Mul),
        AstBinaryOp::Divide => Some(BinaryOp::Udiv),
        AstBinaryOp::Equal | AstBinaryOp::NotEqual => None,
    }
}

/// Sets r0 to `if_equal` or `if_not_equal` depending on the last `cmp`.
fn set_boolean(emitter: &mut Emitter, if_equal: i32, if_not_equal: i32) {
    emitter.emit(Instruction::MovCC(Condition::Eq, R0, if_equal));
    emitter.emit(Instruction::MovCC(Condition::Ne, R0, if_not_equal));
}

fn gen_binary(
    op: AstBinaryOp,
    lhs: &AstExp,
    rhs: &AstExp,
    env: &Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    gen_exp(rhs, env, emitter)?;
    emitter.emit(Instruction::Push(vec![R0, Ip]));
    gen_exp(lhs, env, emitter)?;
    emitter.emit(Instruction::Pop(vec![R1, Ip]));

    if let Some(op) = arith_op(op) {
        emitter.emit(Instruction::Binary(op, R0, R0, Operand::Reg(R1)));
    } else {
        let equal = i32::from(op == AstBinaryOp::Equal);
        emitter.emit(Instruction::Cmp(R0, Operand::Reg(R1)));
        set_boolean(emitter, equal, 1 - equal);
    }
    Ok(())
}

fn gen_call(
    callee: &Identifier,
    args: &[AstExp],
    env: &Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    if args.len() > MAX_REGISTER_ARGS {
        return Err(CodegenError::TooManyArguments {
            callee: callee.clone(),
            count: args.len(),
        });
    }

    match args {
        [] => (),
        // r0 is both the scratch and the first argument register
        [arg] => gen_exp(arg, env, emitter)?,
        _ => {
            emitter.emit(Instruction::Binary(
                BinaryOp::Sub,
                Sp,
                Sp,
                Operand::Imm(ARG_AREA_SIZE),
            ));
            for (arg, slot) in args.iter().zip(0..) {
                gen_exp(arg, env, emitter)?;
                emitter.emit(Instruction::Store(R0, Sp, 4 * slot));
            }
            emitter.emit(Instruction::Pop(Register::ARGS.to_vec()));
        }
    }

    emitter.emit(Instruction::BranchLink(callee.clone()));
    Ok(())
}

/// Lowers an expression, leaving its value in r0.
fn gen_exp(exp: &AstExp, env: &Environment, emitter: &mut Emitter) -> Result<()> {
    match exp {
        AstExp::Number(value) => emitter.emit(Instruction::LoadConst(R0, *value)),
        AstExp::Var(name) => {
            let offset = env.lookup(name)?;
            emitter.emit(Instruction::Load(R0, Fp, offset));
        }
        AstExp::Not(operand) => {
            gen_exp(operand, env, emitter)?;
            emitter.emit(Instruction::Cmp(R0, Operand::Imm(0)));
            set_boolean(emitter, 1, 0);
        }
        AstExp::Binary(op, lhs, rhs) => gen_binary(*op, lhs, rhs, env, emitter)?,
        AstExp::Call(callee, args) => gen_call(callee, args, env, emitter)?,
    }
    Ok(())
}

fn gen_return(exp: &AstExp, env: &Environment, emitter: &mut Emitter) -> Result<()> {
    gen_exp(exp, env, emitter)?;
    emitter.emit_all([Instruction::Mov(Sp, Fp), Instruction::Pop(vec![Fp, Pc])]);
    Ok(())
}

fn gen_block(block: &AstBlock, env: &mut Environment, emitter: &mut Emitter) -> Result<()> {
    block
        .statements
        .iter()
        .try_for_each(|statement| gen_statement(statement, env, emitter))
}

fn gen_if(
    condition: &AstExp,
    then: &AstStatement,
    els: &AstStatement,
    env: &mut Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    let else_label = emitter.fresh_label();
    let end_label = emitter.fresh_label();

    gen_exp(condition, env, emitter)?;
    emitter.emit(Instruction::Cmp(R0, Operand::Imm(0)));
    emitter.emit(Instruction::BranchCC(Condition::Eq, else_label.clone()));
    gen_statement(then, env, emitter)?;
    emitter.emit(Instruction::Branch(end_label.clone()));
    emitter.emit(Instruction::Label(else_label));
    gen_statement(els, env, emitter)?;
    emitter.emit(Instruction::Label(end_label));
    Ok(())
}

fn gen_while(
    condition: &AstExp,
    body: &AstBlock,
    env: &mut Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    let start_label = emitter.fresh_label();
    let end_label = emitter.fresh_label();

    emitter.emit(Instruction::Label(start_label.clone()));
    gen_exp(condition, env, emitter)?;
    emitter.emit(Instruction::Cmp(R0, Operand::Imm(0)));
    emitter.emit(Instruction::BranchCC(Condition::Eq, end_label.clone()));
    gen_block(body, env, emitter)?;
    emitter.emit(Instruction::Branch(start_label));
    emitter.emit(Instruction::Label(end_label));
    Ok(())
}

fn gen_prologue(emitter: &mut Emitter) {
    emitter.emit_all([
        Instruction::Push(vec![Fp, Lr]),
        Instruction::Mov(Fp, Sp),
        Instruction::Push(Register::ARGS.to_vec()),
    ]);
}

/// Reached only when the body falls through without `return`: yields 0.
fn gen_epilogue(emitter: &mut Emitter) {
    emitter.emit_all([
        Instruction::Mov(Sp, Fp),
        Instruction::MovImm(R0, 0),
        Instruction::Pop(vec![Fp, Pc]),
    ]);
}

fn gen_function(function: &AstFunction, emitter: &mut Emitter) -> Result<()> {
    let AstFunction { name, params, body } = function;
    if params.len() > MAX_REGISTER_ARGS {
        return Err(CodegenError::TooManyParameters {
            name: name.clone(),
            count: params.len(),
        });
    }
    debug!(%name, params = params.len(), "lowering function");

    emitter.emit_all([
        Instruction::Blank,
        Instruction::Global(name.clone()),
        Instruction::Label(name.clone()),
    ]);
    gen_prologue(emitter);

    let mut env = Environment::for_function(params);
    gen_block(body, &mut env, emitter)?;

    gen_epilogue(emitter);
    Ok(())
}

fn gen_var(name: &str, init: &AstExp, env: &mut Environment, emitter: &mut Emitter) -> Result<()> {
    gen_exp(init, env, emitter)?;
    // the pushed slot is the variable's home for the rest of the function
    emitter.emit(Instruction::Push(vec![R0, Ip]));
    env.declare(name);
    Ok(())
}

fn gen_assign(
    name: &str,
    value: &AstExp,
    env: &Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    let offset = env.lookup(name)?;
    gen_exp(value, env, emitter)?;
    emitter.emit(Instruction::Store(R0, Fp, offset));
    Ok(())
}

pub(super) fn gen_statement(
    statement: &AstStatement,
    env: &mut Environment,
    emitter: &mut Emitter,
) -> Result<()> {
    match statement {
        AstStatement::Return(exp) => gen_return(exp, env, emitter),
        AstStatement::Block(block) => gen_block(block, env, emitter),
        AstStatement::If {
            condition,
            then,
            els,
        } => gen_if(condition, then, els, env, emitter),
        AstStatement::While { condition, body } => gen_while(condition, body, env, emitter),
        AstStatement::Function(function) => gen_function(function, emitter),
        AstStatement::Var { name, init } => gen_var(name, init, env, emitter),
        AstStatement::Assign { name, value } => gen_assign(name, value, env, emitter),
        AstStatement::Exp(exp) => gen_exp(exp, env, emitter),
    }
}
