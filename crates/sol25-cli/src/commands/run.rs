//! Run command - execute a SOL25 program

use sol25_runtime::Sol25;
use std::path::Path;

/// Load the XML AST and run `Main run`, wiring the program to the
/// process's stdout and stdin
pub fn run(file: Option<&Path>) -> Result<(), u8> {
    let source = super::read_input(file)?;
    let runtime = Sol25::new();
    runtime.run_source(&source).map_err(super::report)
}
