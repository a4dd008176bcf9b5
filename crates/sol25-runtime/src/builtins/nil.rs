//! `Nil`, the class of the nil singleton

use crate::classes::{Class, Method};

pub(super) fn class() -> Class {
    let mut class = Class::new("Nil", Some("Object"));

    class.define("isNil", Method::Native(|interp, _receiver, _args| {
        Ok(interp.true_value())
    }));

    class.define("asString", Method::Native(|interp, _receiver, _args| {
        Ok(interp.make_string("nil"))
    }));

    class
}
