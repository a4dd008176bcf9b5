//! Ast command - dump the loaded AST as JSON for tooling

use sol25_runtime::{loader, VersionedProgram};
use std::path::Path;

/// Internal failure that is not part of the interpreter error taxonomy
const EXIT_INTERNAL_ERROR: u8 = 99;

pub fn run(file: Option<&Path>) -> Result<(), u8> {
    let source = super::read_input(file)?;
    let program = loader::parse_program(&source).map_err(super::report)?;
    let json = VersionedProgram::new(program).to_json().map_err(|err| {
        eprintln!("error: failed to serialize AST: {}", err);
        EXIT_INTERNAL_ERROR
    })?;
    println!("{}", json);
    Ok(())
}
