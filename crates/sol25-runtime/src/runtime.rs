//! SOL25 runtime API for embedding
//!
//! High-level entry points over the loader, the class registry, and the
//! evaluator. The launcher and the tests both drive the interpreter
//! through this type.

use crate::ast::Program;
use crate::builtins::{self, InputReader, OutputWriter};
use crate::classes::ClassRegistry;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::loader;

/// SOL25 runtime instance
///
/// Holds the stdio handles the program runs against. The defaults are the
/// process's stdout and stdin; embedders and tests may substitute capture
/// buffers.
///
/// # Examples
///
/// ```no_run
/// use sol25_runtime::Sol25;
///
/// let runtime = Sol25::new();
/// let xml = std::fs::read_to_string("program.xml").unwrap();
/// if let Err(err) = runtime.run_source(&xml) {
///     eprintln!("{}", err);
/// }
/// ```
pub struct Sol25 {
    output: OutputWriter,
    input: InputReader,
}

impl Sol25 {
    /// Runtime over real stdout and stdin
    pub fn new() -> Self {
        Self {
            output: builtins::stdout_writer(),
            input: builtins::stdin_reader(),
        }
    }

    /// Runtime over caller-supplied stdio handles
    pub fn with_io(output: OutputWriter, input: InputReader) -> Self {
        Self { output, input }
    }

    /// Load and execute a program from its XML serialization
    pub fn run_source(&self, source: &str) -> Result<(), RuntimeError> {
        let program = loader::parse_program(source)?;
        self.run_program(&program)
    }

    /// Execute an already-loaded program: bootstrap, then `Main run`
    pub fn run_program(&self, program: &Program) -> Result<(), RuntimeError> {
        let mut interpreter = self.bootstrap(program)?;
        interpreter.run_main()
    }

    /// Load and validate without executing: XML structure, class merge,
    /// and the `Main`/`run` entry point
    pub fn check_source(&self, source: &str) -> Result<(), RuntimeError> {
        let program = loader::parse_program(source)?;
        self.check_program(&program)
    }

    /// Validate an already-loaded program without executing it
    pub fn check_program(&self, program: &Program) -> Result<(), RuntimeError> {
        let interpreter = self.bootstrap(program)?;
        interpreter.resolve_main().map(|_| ())
    }

    /// Register built-ins, overlay the user classes, and wire up stdio
    fn bootstrap(&self, program: &Program) -> Result<Interpreter, RuntimeError> {
        let mut registry = ClassRegistry::new();
        builtins::register_builtins(&mut registry)?;
        registry.merge_program(program)?;
        Interpreter::new(registry, self.output.clone(), self.input.clone())
    }
}

impl Default for Sol25 {
    fn default() -> Self {
        Self::new()
    }
}
