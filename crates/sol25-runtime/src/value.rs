//! Runtime value representation
//!
//! Every SOL25 value is a reference-counted object carrying a pointer to
//! its class, a mutable attribute map, and an optional internal payload
//! used by the built-in classes:
//! - `Integer`: a signed 64-bit integer
//! - `String`: a UTF-8 string
//! - `Block`: a block AST node plus its captured environment (the closure)
//! - `True`, `False`, `Nil` and user classes: no payload

use crate::ast::Block;
use crate::classes::Class;
use crate::env::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Runtime object; cloning shares the underlying allocation
#[derive(Clone)]
pub struct Value(Rc<ValueData>);

struct ValueData {
    class: Rc<Class>,
    attrs: RefCell<HashMap<String, Value>>,
    payload: Payload,
}

/// Internal payload of a built-in value
#[derive(Debug, Clone)]
pub enum Payload {
    None,
    Integer(i64),
    Str(String),
    Block(Closure),
}

/// A block AST node coupled with the environment it was reified in
#[derive(Debug, Clone)]
pub struct Closure {
    pub block: Rc<Block>,
    pub env: Environment,
}

impl Value {
    /// A value with no payload and no attributes
    pub fn plain(class: Rc<Class>) -> Self {
        Self::with_payload(class, Payload::None)
    }

    pub fn with_payload(class: Rc<Class>, payload: Payload) -> Self {
        Value(Rc::new(ValueData {
            class,
            attrs: RefCell::new(HashMap::new()),
            payload,
        }))
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.0.class
    }

    pub fn class_name(&self) -> &str {
        &self.0.class.name
    }

    pub fn payload(&self) -> &Payload {
        &self.0.payload
    }

    /// Object identity, the meaning of `identicalTo:`
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn get_attr(&self, name: &str) -> Option<Value> {
        self.0.attrs.borrow().get(name).cloned()
    }

    pub fn set_attr(&self, name: &str, value: Value) {
        self.0.attrs.borrow_mut().insert(name.to_string(), value);
    }

    pub fn as_integer(&self) -> Option<i64> {
        match &self.0.payload {
            Payload::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.0.payload {
            Payload::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Closure> {
        match &self.0.payload {
            Payload::Block(closure) => Some(closure),
            _ => None,
        }
    }

    pub fn has_payload(&self) -> bool {
        !matches!(self.0.payload, Payload::None)
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::None, Payload::None) => true,
            (Payload::Integer(a), Payload::Integer(b)) => a == b,
            (Payload::Str(a), Payload::Str(b)) => a == b,
            // Blocks compare by identity of both halves of the closure
            (Payload::Block(a), Payload::Block(b)) => {
                Rc::ptr_eq(&a.block, &b.block) && Environment::ptr_eq(&a.env, &b.env)
            }
            _ => false,
        }
    }
}

// Attribute maps can point back at the value itself (a block stored in an
// attribute of self), so Debug prints the shape and never the attributes.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = match &self.0.payload {
            Payload::None => "none".to_string(),
            Payload::Integer(n) => format!("integer {}", n),
            Payload::Str(s) => format!("string {:?}", s),
            Payload::Block(c) => format!("block/{}", c.block.parameters.len()),
        };
        write!(f, "<{} {}>", self.class_name(), payload)
    }
}
