//! Built-in class library
//!
//! Native implementations of the seven built-in classes. Each submodule
//! builds one immutable class whose methods are function handles; the
//! handles receive the interpreter so they can construct result values and
//! re-enter the evaluator for block invocation.

pub mod block;
pub mod boolean;
pub mod integer;
pub mod nil;
pub mod object;
pub mod string;

use crate::classes::ClassRegistry;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{Closure, Value};
use std::io::{BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};

/// Shared output handle for `String print`. Defaults to real stdout;
/// tests substitute a capture buffer.
pub type OutputWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Shared line-oriented input handle for `String read`.
pub type InputReader = Arc<Mutex<Box<dyn BufRead + Send>>>;

/// Construct a writer that goes to real stdout (the default)
pub fn stdout_writer() -> OutputWriter {
    Arc::new(Mutex::new(Box::new(std::io::stdout())))
}

/// Construct a reader over real stdin (the default)
pub fn stdin_reader() -> InputReader {
    Arc::new(Mutex::new(Box::new(BufReader::new(std::io::stdin()))))
}

/// Register the seven built-in classes. Runs before user classes merge,
/// so a user class reusing a built-in name is rejected by the registry.
pub fn register_builtins(registry: &mut ClassRegistry) -> Result<(), RuntimeError> {
    registry.register(object::class())?;
    registry.register(nil::class())?;
    registry.register(boolean::true_class())?;
    registry.register(boolean::false_class())?;
    registry.register(integer::class())?;
    registry.register(string::class())?;
    registry.register(block::class())?;
    Ok(())
}

// ----------------------------------------------------------------------
// Argument helpers shared by the native methods
// ----------------------------------------------------------------------

/// Extract the integer payload of an `Integer` (or subclass) argument
pub(crate) fn expect_integer(
    interp: &Interpreter,
    selector: &str,
    value: &Value,
) -> Result<i64, RuntimeError> {
    if !interp.registry().is_subclass(value.class(), "Integer") {
        return Err(RuntimeError::type_mismatch(format!(
            "'{}' expects an Integer, got {}",
            selector,
            value.class_name()
        )));
    }
    value.as_integer().ok_or_else(|| {
        RuntimeError::type_mismatch(format!(
            "'{}' expects an Integer, got an {} with no integer value",
            selector,
            value.class_name()
        ))
    })
}

/// Extract the closure of a `Block` value with exactly `params` parameters
pub(crate) fn expect_block(
    selector: &str,
    value: &Value,
    params: usize,
) -> Result<Closure, RuntimeError> {
    let closure = value.as_closure().ok_or_else(|| {
        RuntimeError::type_mismatch(format!(
            "'{}' expects a Block, got {}",
            selector,
            value.class_name()
        ))
    })?;
    if closure.block.parameters.len() != params {
        return Err(RuntimeError::type_mismatch(format!(
            "'{}' expects a Block with {} parameter(s), got one with {}",
            selector,
            params,
            closure.block.parameters.len()
        )));
    }
    Ok(closure.clone())
}
