//! Expression evaluation and message dispatch

use crate::ast::{Expr, Literal, Statement};
use crate::classes::Method;
use crate::env::Environment;
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::{Closure, Value};

impl Interpreter {
    /// Evaluate the statement's expression and bind the result under the
    /// target name in the current frame
    pub(super) fn eval_statement(
        &mut self,
        statement: &Statement,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(&statement.expr, env)?;
        env.set(&statement.var, value.clone());
        Ok(value)
    }

    /// Evaluate an expression
    pub(crate) fn eval_expr(
        &mut self,
        expr: &Expr,
        env: &Environment,
    ) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => self.eval_literal(literal),
            Expr::Var(name) => env
                .get(name)
                .ok_or_else(|| RuntimeError::undefined(format!("undefined variable '{}'", name))),
            Expr::Block(block) => Ok(self.make_block(Closure {
                block: block.clone(),
                env: env.clone(),
            })),
            Expr::Send {
                selector,
                receiver,
                args,
            } => {
                // Strict evaluation: receiver first, then arguments
                // left to right.
                let receiver = self.eval_expr(receiver, env)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg, env)?);
                }
                self.dispatch(receiver, selector, &values)
            }
        }
    }

    fn eval_literal(&mut self, literal: &Literal) -> Result<Value, RuntimeError> {
        match literal {
            Literal::Integer(n) => Ok(self.make_integer(*n)),
            Literal::String(s) => Ok(self.make_string(s.clone())),
            Literal::True => Ok(self.true_value()),
            Literal::False => Ok(self.false_value()),
            Literal::Nil => Ok(self.nil_value()),
            Literal::Class(name) => {
                let class = self.registry().find(name)?;
                Ok(Value::plain(class))
            }
        }
    }

    /// Dispatch a message send
    ///
    /// A selector with no match anywhere in the receiver's class hierarchy
    /// falls back to attribute access: a trailing-colon selector with one
    /// argument writes the attribute and answers the receiver, a bare
    /// selector reads it. Anything else is `DoesNotUnderstand`.
    pub(crate) fn dispatch(
        &mut self,
        receiver: Value,
        selector: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        if !self.registry().has_method(receiver.class(), selector) {
            return self.attribute_access(receiver, selector, args);
        }

        match self.registry().find_method(receiver.class(), selector)? {
            Method::Native(native) => native(self, receiver, args),
            Method::User(block) => {
                // User methods run in the class scope: a fresh frame over
                // the globals, never over the caller's locals.
                let globals = self.globals_env();
                self.eval_block(&block, receiver, args, &globals)
            }
        }
    }

    fn attribute_access(
        &mut self,
        receiver: Value,
        selector: &str,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        // True, False, and Nil are singleton-like and carry no attributes.
        let attributes_allowed = !matches!(receiver.class_name(), "True" | "False" | "Nil");

        if let Some(name) = selector.strip_suffix(':') {
            if args.len() == 1 && !name.contains(':') {
                if !attributes_allowed {
                    return Err(RuntimeError::does_not_understand(
                        receiver.class_name(),
                        selector,
                    ));
                }
                receiver.set_attr(name, args[0].clone());
                return Ok(receiver);
            }
        }

        if attributes_allowed && args.is_empty() {
            if let Some(value) = receiver.get_attr(selector) {
                return Ok(value);
            }
        }
        Err(RuntimeError::does_not_understand(
            receiver.class_name(),
            selector,
        ))
    }
}
