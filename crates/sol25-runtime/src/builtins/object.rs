//! `Object`, the root of the class tree
//!
//! Every class inherits these methods. The type predicates all answer
//! `false` here; `Integer`, `String`, `Block`, and `Nil` override their
//! own predicate.

use crate::classes::{Class, Method};
use crate::value::Value;

pub(super) fn class() -> Class {
    let mut class = Class::new("Object", None);

    // Construction works through the receiver's class, so `new` and
    // `from:` sent to a subclass instance (or a class-name literal)
    // produce values of that class.
    class.define("new", Method::Native(|_interp, receiver, _args| {
        Ok(Value::plain(receiver.class().clone()))
    }));

    class.define("from:", Method::Native(|_interp, receiver, args| {
        Ok(Value::with_payload(
            receiver.class().clone(),
            args[0].payload().clone(),
        ))
    }));

    class.define("identicalTo:", Method::Native(|interp, receiver, args| {
        Ok(interp.make_bool(Value::ptr_eq(&receiver, &args[0])))
    }));

    // Payload-less values compare by identity; everything else compares
    // payloads by value.
    class.define("equalTo:", Method::Native(|interp, receiver, args| {
        let other = &args[0];
        let equal = if !receiver.has_payload() && !other.has_payload() {
            Value::ptr_eq(&receiver, other)
        } else {
            receiver.payload() == other.payload()
        };
        Ok(interp.make_bool(equal))
    }));

    class.define("asString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.make_string(""))
    }));

    class.define("isNumber", Method::Native(|interp, _receiver, _args| {
        Ok(interp.false_value())
    }));
    class.define("isString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.false_value())
    }));
    class.define("isBlock", Method::Native(|interp, _receiver, _args| {
        Ok(interp.false_value())
    }));
    class.define("isNil", Method::Native(|interp, _receiver, _args| {
        Ok(interp.false_value())
    }));

    class
}
