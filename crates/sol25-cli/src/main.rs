use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

#[derive(Parser)]
#[command(name = "sol25")]
#[command(about = "SOL25 interpreter - executes XML-serialized SOL25 programs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a SOL25 program
    Run {
        /// Path to the XML AST (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Load and validate a program without executing it
    Check {
        /// Path to the XML AST (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Dump the loaded AST as JSON
    Ast {
        /// Path to the XML AST (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file } => commands::run::run(file.as_deref()),
        Commands::Check { file } => commands::check::run(file.as_deref()),
        Commands::Ast { file } => commands::ast::run(file.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}
