use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Source file to compile
    pub input: PathBuf,

    /// Assembly output file [default: INPUT with the .s extension]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Stop after lexing and dump the tokens
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and dump the syntax tree
    #[arg(long)]
    pub parse: bool,

    /// Stop after code generation and dump the instructions
    #[arg(long)]
    pub codegen: bool,

    /// More logging on stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut asm_file = self.input.clone();
            asm_file.set_extension("s");
            asm_file
        })
    }

    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
