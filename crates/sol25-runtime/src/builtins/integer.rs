//! `Integer`: exact signed 64-bit arithmetic
//!
//! All binary operations require an `Integer` (or subclass) argument.
//! Overflowing results and division by zero are value-domain errors, not
//! wrap-around.

use super::{expect_block, expect_integer};
use crate::classes::{Class, Method};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::Value;

pub(super) fn class() -> Class {
    let mut class = Class::new("Integer", Some("Object"));

    class.define("plus:", Method::Native(|interp, receiver, args| {
        binary_op(interp, "plus:", &receiver, &args[0], i64::checked_add)
    }));
    class.define("minus:", Method::Native(|interp, receiver, args| {
        binary_op(interp, "minus:", &receiver, &args[0], i64::checked_sub)
    }));
    class.define("multiplyBy:", Method::Native(|interp, receiver, args| {
        binary_op(interp, "multiplyBy:", &receiver, &args[0], i64::checked_mul)
    }));

    // Truncated division, rejecting a zero divisor.
    class.define("divBy:", Method::Native(|interp, receiver, args| {
        let a = expect_integer(interp, "divBy:", &receiver)?;
        let b = expect_integer(interp, "divBy:", &args[0])?;
        if b == 0 {
            return Err(RuntimeError::value_error("division by zero"));
        }
        let quotient = a
            .checked_div(b)
            .ok_or_else(|| RuntimeError::value_error("integer overflow in 'divBy:'"))?;
        Ok(interp.make_integer(quotient))
    }));

    class.define("greaterThan:", Method::Native(|interp, receiver, args| {
        let a = expect_integer(interp, "greaterThan:", &receiver)?;
        let b = expect_integer(interp, "greaterThan:", &args[0])?;
        Ok(interp.make_bool(a > b))
    }));

    // Canonical signed decimal: no leading '+', no padding zeros.
    class.define("asString", Method::Native(|interp, receiver, _args| {
        let n = expect_integer(interp, "asString", &receiver)?;
        Ok(interp.make_string(n.to_string()))
    }));

    class.define("asInteger", Method::Native(|_interp, receiver, _args| {
        Ok(receiver)
    }));

    // Invokes the block with 1, 2, ..., n; nothing when n <= 0.
    class.define("timesRepeat:", Method::Native(|interp, receiver, args| {
        let n = expect_integer(interp, "timesRepeat:", &receiver)?;
        let body = expect_block("timesRepeat:", &args[0], 1)?;
        let mut i = 1;
        while i <= n {
            let index = interp.make_integer(i);
            interp.call_closure(&body, &[index])?;
            i += 1;
        }
        Ok(interp.nil_value())
    }));

    class.define("isNumber", Method::Native(|interp, _receiver, _args| {
        Ok(interp.true_value())
    }));

    class
}

fn binary_op(
    interp: &Interpreter,
    selector: &str,
    receiver: &Value,
    arg: &Value,
    op: fn(i64, i64) -> Option<i64>,
) -> Result<Value, RuntimeError> {
    let a = expect_integer(interp, selector, receiver)?;
    let b = expect_integer(interp, selector, arg)?;
    let result = op(a, b).ok_or_else(|| {
        RuntimeError::value_error(format!("integer overflow in '{}'", selector))
    })?;
    Ok(interp.make_integer(result))
}
