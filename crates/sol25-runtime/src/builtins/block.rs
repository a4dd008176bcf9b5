//! `Block`: reified closures
//!
//! `value`-family selectors invoke the captured block; the block's
//! parameter count must equal the selector's arity. `whileTrue:` is the
//! loop primitive: both the receiver and the body are zero-parameter
//! blocks.

use super::expect_block;
use crate::classes::{Class, Method};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn class() -> Class {
    let mut class = Class::new("Block", Some("Object"));

    class.define("value", Method::Native(|interp, receiver, args| {
        invoke(interp, "value", receiver, args)
    }));
    class.define("value:", Method::Native(|interp, receiver, args| {
        invoke(interp, "value:", receiver, args)
    }));
    class.define("value:value:", Method::Native(|interp, receiver, args| {
        invoke(interp, "value:value:", receiver, args)
    }));
    class.define("value:value:value:", Method::Native(|interp, receiver, args| {
        invoke(interp, "value:value:value:", receiver, args)
    }));

    class.define("whileTrue:", Method::Native(|interp, receiver, args| {
        let condition = expect_block("whileTrue:", &receiver, 0)?;
        let body = expect_block("whileTrue:", &args[0], 0)?;
        loop {
            let result = interp.call_closure(&condition, &[])?;
            if result.class_name() != "True" {
                return Ok(interp.nil_value());
            }
            interp.call_closure(&body, &[])?;
        }
    }));

    class.define("isBlock", Method::Native(|interp, _receiver, _args| {
        Ok(interp.true_value())
    }));

    class
}

fn invoke(
    interp: &mut Interpreter,
    selector: &str,
    receiver: Value,
    args: &[Value],
) -> Result<Value, RuntimeError> {
    let closure = expect_block(selector, &receiver, args.len())?;
    interp.call_closure(&closure, args)
}
