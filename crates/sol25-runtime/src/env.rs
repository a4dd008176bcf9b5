//! Lexically nested variable environments
//!
//! An environment is a chain of frames. Assignment always writes into the
//! current frame; lookup walks outward to the first frame that defines the
//! name. Frames are reference-counted so that `Block` values can keep their
//! defining environment alive after the creating invocation returns.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// One frame chain; cloning shares the underlying frame
#[derive(Clone)]
pub struct Environment {
    frame: Rc<RefCell<Frame>>,
}

struct Frame {
    vars: HashMap<String, Value>,
    parent: Option<Environment>,
}

impl Environment {
    /// Create a root environment with no parent
    pub fn new() -> Self {
        Self {
            frame: Rc::new(RefCell::new(Frame {
                vars: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a fresh frame whose lookups fall back to `self`
    pub fn child(&self) -> Self {
        Self {
            frame: Rc::new(RefCell::new(Frame {
                vars: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Bind `name` in the current frame, never in a parent
    pub fn set(&self, name: &str, value: Value) {
        self.frame.borrow_mut().vars.insert(name.to_string(), value);
    }

    /// Resolve `name`, walking from the current frame outward
    ///
    /// `None` means the name is unbound anywhere in the chain, which the
    /// evaluator distinguishes from a present `Nil` value.
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.frame.borrow();
        if let Some(value) = frame.vars.get(name) {
            return Some(value.clone());
        }
        match &frame.parent {
            Some(parent) => parent.get(name),
            None => None,
        }
    }

    /// Frame identity, used when comparing block payloads
    pub fn ptr_eq(a: &Environment, b: &Environment) -> bool {
        Rc::ptr_eq(&a.frame, &b.frame)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Frames can be cyclic through captured blocks, so Debug stays shallow.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        f.debug_struct("Environment")
            .field("names", &frame.vars.keys().collect::<Vec<_>>())
            .field("has_parent", &frame.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::Class;
    use std::rc::Rc;

    fn dummy_value() -> Value {
        Value::plain(Rc::new(Class::new("Object", None)))
    }

    #[test]
    fn test_set_then_get() {
        let env = Environment::new();
        let v = dummy_value();
        env.set("x", v.clone());
        assert!(Value::ptr_eq(&env.get("x").unwrap(), &v));
    }

    #[test]
    fn test_get_missing_is_none() {
        let env = Environment::new();
        assert!(env.get("missing").is_none());
    }

    #[test]
    fn test_lookup_walks_to_parent() {
        let outer = Environment::new();
        let v = dummy_value();
        outer.set("x", v.clone());

        let inner = outer.child();
        assert!(Value::ptr_eq(&inner.get("x").unwrap(), &v));
    }

    #[test]
    fn test_set_shadows_in_current_frame() {
        let outer = Environment::new();
        let original = dummy_value();
        outer.set("x", original.clone());

        let inner = outer.child();
        let shadow = dummy_value();
        inner.set("x", shadow.clone());

        // Inner frame sees the shadow; the outer binding is untouched.
        assert!(Value::ptr_eq(&inner.get("x").unwrap(), &shadow));
        assert!(Value::ptr_eq(&outer.get("x").unwrap(), &original));
    }

    #[test]
    fn test_frame_outlives_creating_scope() {
        let captured = {
            let outer = Environment::new();
            outer.set("x", dummy_value());
            outer.child()
        };
        assert!(captured.get("x").is_some());
    }

    #[test]
    fn test_ptr_eq() {
        let a = Environment::new();
        let b = a.clone();
        let c = Environment::new();
        assert!(Environment::ptr_eq(&a, &b));
        assert!(!Environment::ptr_eq(&a, &c));
    }
}
