//! `True` and `False`
//!
//! Conditional and short-circuit methods. Every block argument must be a
//! zero-parameter `Block` value; the side that short-circuits is never
//! invoked.

use super::expect_block;
use crate::classes::{Class, Method};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn true_class() -> Class {
    let mut class = Class::new("True", Some("Object"));

    class.define("not", Method::Native(|interp, _receiver, _args| {
        Ok(interp.false_value())
    }));

    class.define("and:", Method::Native(|interp, _receiver, args| {
        invoke_condition(interp, "and:", &args[0])
    }));

    // `true or: _` answers true without invoking the argument.
    class.define("or:", Method::Native(|interp, _receiver, args| {
        expect_block("or:", &args[0], 0)?;
        Ok(interp.true_value())
    }));

    class.define("ifTrue:ifFalse:", Method::Native(|interp, _receiver, args| {
        let then_block = expect_block("ifTrue:ifFalse:", &args[0], 0)?;
        expect_block("ifTrue:ifFalse:", &args[1], 0)?;
        interp.call_closure(&then_block, &[])
    }));

    class.define("asString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.make_string("true"))
    }));

    class
}

pub(super) fn false_class() -> Class {
    let mut class = Class::new("False", Some("Object"));

    class.define("not", Method::Native(|interp, _receiver, _args| {
        Ok(interp.true_value())
    }));

    // `false and: _` answers false without invoking the argument.
    class.define("and:", Method::Native(|interp, _receiver, args| {
        expect_block("and:", &args[0], 0)?;
        Ok(interp.false_value())
    }));

    class.define("or:", Method::Native(|interp, _receiver, args| {
        invoke_condition(interp, "or:", &args[0])
    }));

    class.define("ifTrue:ifFalse:", Method::Native(|interp, _receiver, args| {
        expect_block("ifTrue:ifFalse:", &args[0], 0)?;
        let else_block = expect_block("ifTrue:ifFalse:", &args[1], 0)?;
        interp.call_closure(&else_block, &[])
    }));

    class.define("asString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.make_string("false"))
    }));

    class
}

/// Invoke a zero-parameter block and normalize its result to a boolean:
/// a `True`-classed result answers true, anything else false
fn invoke_condition(
    interp: &mut Interpreter,
    selector: &str,
    arg: &Value,
) -> Result<Value, RuntimeError> {
    let block = expect_block(selector, arg, 0)?;
    let result = interp.call_closure(&block, &[])?;
    Ok(interp.make_bool(result.class_name() == "True"))
}
