mod args;
mod driver_error;

use anyhow::Context;
use args::Args;
use armc::*;
use clap::Parser;
use driver_error::DriverError;
use std::fs;
use std::path::Path;
use tracing::info;

fn read_source(input: &Path) -> anyhow::Result<String> {
    if !input.exists() {
        let filename = input.to_string_lossy().to_string();
        return Err(DriverError::InputFileDoesNotExist(filename).into());
    }
    let source = fs::read_to_string(input)
        .map_err(DriverError::from)
        .with_context(|| format!("reading {}", input.display()))?;
    info!(input = %input.display(), bytes = source.len(), "read source");
    Ok(source)
}

fn tokenize(source: &str) -> Result<(), DriverError> {
    let tokens = lexer::lex(source)?;
    info!(tokens = tokens.len(), "lexing done");
    println!("{tokens:#?}");
    Ok(())
}

fn parse(source: &str, args: &Args) -> Result<ast::AstStatement, DriverError> {
    let ast = parser::parse_program(source)?;
    if args.parse {
        println!("{ast}");
    }
    Ok(ast)
}

fn gen_asm(ast: &ast::AstStatement, args: &Args) -> Result<codegen::AsmProgram, DriverError> {
    let asm = codegen::codegen(ast)?;
    info!(instructions = asm.instructions.len(), "code generation done");
    if args.codegen {
        println!("{:#?}", asm.instructions);
    }
    Ok(asm)
}

fn emit_asm(asm: &codegen::AsmProgram, args: &Args) -> anyhow::Result<()> {
    let asm_file = args.output_path();
    fs::write(&asm_file, asm.to_string())
        .map_err(DriverError::from)
        .with_context(|| format!("writing {}", asm_file.display()))?;
    info!(output = %asm_file.display(), "assembly written");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(args.log_level())
        .init();

    let source = read_source(&args.input)?;

    if args.lex {
        tokenize(&source)?;
        return Ok(());
    }

    let ast = parse(&source, &args)?;
    if args.parse {
        return Ok(());
    }

    let asm = gen_asm(&ast, &args)?;
    if args.codegen {
        return Ok(());
    }

    emit_asm(&asm, &args)
}
