//! CLI subcommands

pub mod ast;
pub mod check;
pub mod run;

use anyhow::Context;
use sol25_runtime::RuntimeError;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Exit code when the program source cannot be read at all
pub(crate) const EXIT_INPUT_ERROR: u8 = 11;

/// Read the XML source from a file, or from stdin when no file is given
pub(crate) fn read_input(file: Option<&Path>) -> Result<String, u8> {
    let source = match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read program from stdin")
                .map(|_| buffer)
        }
    };
    source.map_err(|err| {
        eprintln!("error: {:#}", err);
        EXIT_INPUT_ERROR
    })
}

/// Print the error to stderr and map its category to the exit code
pub(crate) fn report(err: RuntimeError) -> u8 {
    eprintln!("{}", err);
    err.kind().exit_code()
}
