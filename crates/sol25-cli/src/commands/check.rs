//! Check command - validate a program without executing it
//!
//! Runs the loader, the class merge, and the `Main`/`run` entry-point
//! check, then stops. Succeeds quietly.

use sol25_runtime::Sol25;
use std::path::Path;

pub fn run(file: Option<&Path>) -> Result<(), u8> {
    let source = super::read_input(file)?;
    let runtime = Sol25::new();
    runtime.check_source(&source).map_err(super::report)
}
