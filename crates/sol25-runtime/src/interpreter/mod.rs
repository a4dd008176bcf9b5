//! Tree-walking evaluator
//!
//! Executes a bootstrapped program by walking block bodies and dispatching
//! message sends through the class registry. Evaluation is strictly
//! single-threaded and synchronous; the only suspension points are the
//! blocking stdio calls inside `String print` and `String read`.

mod expr;

use crate::ast::Block;
use crate::builtins::{InputReader, OutputWriter};
use crate::classes::{ClassRegistry, Method};
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::value::{Closure, Payload, Value};
use std::rc::Rc;

/// Interpreter state: the sealed class registry, the global scope, and the
/// stdio handles the built-in library writes to and reads from
pub struct Interpreter {
    registry: Rc<ClassRegistry>,
    globals: Environment,
    output: OutputWriter,
    input: InputReader,
    builtins: BuiltinHandles,
}

/// Class pointers and singleton values resolved once at construction.
///
/// `true`, `false`, and `nil` literals share one allocation each so that
/// `identicalTo:` and `equalTo:` behave like singleton comparisons.
struct BuiltinHandles {
    integer_class: Rc<crate::classes::Class>,
    string_class: Rc<crate::classes::Class>,
    block_class: Rc<crate::classes::Class>,
    true_value: Value,
    false_value: Value,
    nil_value: Value,
}

impl Interpreter {
    /// Build an interpreter over a fully populated registry
    ///
    /// Fails with `UndefinedClass` if any of the seven built-in classes is
    /// missing, which indicates bootstrap was skipped.
    pub fn new(
        registry: ClassRegistry,
        output: OutputWriter,
        input: InputReader,
    ) -> Result<Self, RuntimeError> {
        let registry = Rc::new(registry);
        let builtins = BuiltinHandles {
            integer_class: registry.find("Integer")?,
            string_class: registry.find("String")?,
            block_class: registry.find("Block")?,
            true_value: Value::plain(registry.find("True")?),
            false_value: Value::plain(registry.find("False")?),
            nil_value: Value::plain(registry.find("Nil")?),
        };
        Ok(Self {
            registry,
            globals: Environment::new(),
            output,
            input,
            builtins,
        })
    }

    pub fn registry(&self) -> &Rc<ClassRegistry> {
        &self.registry
    }

    pub fn output(&self) -> &OutputWriter {
        &self.output
    }

    pub fn input(&self) -> &InputReader {
        &self.input
    }

    /// The class scope user methods execute under
    pub(crate) fn globals_env(&self) -> Environment {
        self.globals.clone()
    }

    // ------------------------------------------------------------------
    // Value construction
    // ------------------------------------------------------------------

    pub fn make_integer(&self, n: i64) -> Value {
        Value::with_payload(self.builtins.integer_class.clone(), Payload::Integer(n))
    }

    pub fn make_string(&self, s: impl Into<String>) -> Value {
        Value::with_payload(self.builtins.string_class.clone(), Payload::Str(s.into()))
    }

    pub fn make_block(&self, closure: Closure) -> Value {
        Value::with_payload(self.builtins.block_class.clone(), Payload::Block(closure))
    }

    pub fn make_bool(&self, b: bool) -> Value {
        if b {
            self.true_value()
        } else {
            self.false_value()
        }
    }

    pub fn true_value(&self) -> Value {
        self.builtins.true_value.clone()
    }

    pub fn false_value(&self) -> Value {
        self.builtins.false_value.clone()
    }

    pub fn nil_value(&self) -> Value {
        self.builtins.nil_value.clone()
    }

    // ------------------------------------------------------------------
    // Program entry
    // ------------------------------------------------------------------

    /// Verify that `Main` exists and defines a parameterless user `run`
    pub fn resolve_main(&self) -> Result<(Rc<crate::classes::Class>, Rc<Block>), RuntimeError> {
        let main_class = self
            .registry
            .find("Main")
            .map_err(|_| RuntimeError::undefined("program does not define class 'Main'"))?;
        let method = self
            .registry
            .find_method(&main_class, "run")
            .map_err(|_| RuntimeError::undefined("class 'Main' does not define method 'run'"))?;
        let Method::User(block) = method else {
            return Err(RuntimeError::undefined(
                "class 'Main' does not define method 'run'",
            ));
        };
        if !block.parameters.is_empty() {
            return Err(RuntimeError::undefined(
                "method 'run' of class 'Main' must take no parameters",
            ));
        }
        Ok((main_class, block))
    }

    /// Instantiate `Main`, bind it as `self` in the global scope, and run
    pub fn run_main(&mut self) -> Result<(), RuntimeError> {
        let (main_class, run_block) = self.resolve_main()?;
        let main_instance = Value::plain(main_class);
        self.globals.set("self", main_instance.clone());
        let globals = self.globals.clone();
        self.eval_block(&run_block, main_instance, &[], &globals)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Block execution
    // ------------------------------------------------------------------

    /// Execute a block body in a fresh frame linked to `caller_env`
    ///
    /// For user methods the caller environment is the class scope (the
    /// global frame); for block-value invocations it is the closure's
    /// captured frame. Binds positional parameters and `self`, runs the
    /// statements in order, and returns the last statement's value, or
    /// `nil` for an empty body.
    pub fn eval_block(
        &mut self,
        block: &Rc<Block>,
        receiver: Value,
        args: &[Value],
        caller_env: &Environment,
    ) -> Result<Value, RuntimeError> {
        if block.parameters.len() != args.len() {
            return Err(RuntimeError::type_mismatch(format!(
                "block expects {} argument(s), got {}",
                block.parameters.len(),
                args.len()
            )));
        }

        let env = caller_env.child();
        for (name, value) in block.parameters.iter().zip(args) {
            env.set(name, value.clone());
        }
        env.set("self", receiver);

        let mut result = self.nil_value();
        for statement in &block.statements {
            result = self.eval_statement(statement, &env)?;
        }
        Ok(result)
    }

    /// Invoke a reified block value
    ///
    /// `self` inside the block is whatever the block's defining scope bound
    /// it to, so the binding is looked up in the captured environment.
    pub fn call_closure(
        &mut self,
        closure: &Closure,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let receiver = closure
            .env
            .get("self")
            .unwrap_or_else(|| self.nil_value());
        let env = closure.env.clone();
        self.eval_block(&closure.block, receiver, args, &env)
    }
}
