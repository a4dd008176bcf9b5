//! Class model and inheritance-aware registry
//!
//! Classes are immutable after registration. The registry owns the single
//! name -> class table and guarantees the inheritance graph is a tree rooted
//! at `Object`: acyclic, and closed over every referenced parent. Method
//! lookup and subclass tests walk the parent chain through the registry.

use crate::ast::{Block, Program};
use crate::error::RuntimeError;
use crate::interpreter::Interpreter;
use crate::value::Value;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// A built-in procedure: receiver and evaluated arguments in, value out.
///
/// Natives receive the interpreter so they can build result values and
/// re-enter the evaluator for block invocation (`whileTrue:`, `and:`, ...).
pub type NativeFn = fn(&mut Interpreter, Value, &[Value]) -> Result<Value, RuntimeError>;

/// A method is either a user block or a native procedure
#[derive(Debug, Clone)]
pub enum Method {
    User(Rc<Block>),
    Native(NativeFn),
}

/// An immutable class: name, optional parent name, selector table
#[derive(Debug)]
pub struct Class {
    pub name: String,
    /// Absent only for `Object`, the root of the tree
    pub parent: Option<String>,
    methods: HashMap<String, Method>,
}

impl Class {
    pub fn new(name: &str, parent: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            methods: HashMap::new(),
        }
    }

    /// Add a method while the class is still under construction
    pub fn define(&mut self, selector: &str, method: Method) {
        self.methods.insert(selector.to_string(), method);
    }

    /// Look up a selector in this class only, ignoring ancestors
    pub fn own_method(&self, selector: &str) -> Option<&Method> {
        self.methods.get(selector)
    }
}

/// Name -> class table populated once during bootstrap
#[derive(Debug, Default)]
pub struct ClassRegistry {
    classes: HashMap<String, Rc<Class>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class; a second class with the same name is rejected
    pub fn register(&mut self, class: Class) -> Result<(), RuntimeError> {
        if self.classes.contains_key(&class.name) {
            return Err(RuntimeError::structure(format!(
                "class '{}' is defined more than once",
                class.name
            )));
        }
        self.classes.insert(class.name.clone(), Rc::new(class));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn find(&self, name: &str) -> Result<Rc<Class>, RuntimeError> {
        self.classes
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::undefined(format!("unknown class '{}'", name)))
    }

    /// True iff the class or any ancestor defines the selector
    pub fn has_method(&self, class: &Rc<Class>, selector: &str) -> bool {
        let mut current = class.clone();
        loop {
            if current.own_method(selector).is_some() {
                return true;
            }
            match &current.parent {
                Some(parent) => match self.find(parent) {
                    Ok(parent_class) => current = parent_class,
                    Err(_) => return false,
                },
                None => return false,
            }
        }
    }

    /// Walk the parent chain and return the first match
    pub fn find_method(&self, class: &Rc<Class>, selector: &str) -> Result<Method, RuntimeError> {
        let mut current = class.clone();
        loop {
            if let Some(method) = current.own_method(selector) {
                return Ok(method.clone());
            }
            match &current.parent {
                Some(parent) => current = self.find(parent)?,
                None => {
                    return Err(RuntimeError::does_not_understand(&class.name, selector));
                }
            }
        }
    }

    /// Reflexive subclass test: every class is a subclass of itself
    pub fn is_subclass(&self, class: &Rc<Class>, ancestor: &str) -> bool {
        let mut current = class.clone();
        loop {
            if current.name == ancestor {
                return true;
            }
            match &current.parent {
                Some(parent) => match self.find(parent) {
                    Ok(parent_class) => current = parent_class,
                    Err(_) => return false,
                },
                None => return false,
            }
        }
    }

    /// Overlay user classes on top of the registered built-ins
    ///
    /// Rejects name collisions (including collisions with built-ins) and
    /// duplicate selectors, then verifies that every parent exists and that
    /// the resulting graph is acyclic.
    pub fn merge_program(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for class_def in &program.classes {
            let mut class = Class::new(&class_def.name, Some(&class_def.parent));
            for method in &class_def.methods {
                if class.own_method(&method.selector).is_some() {
                    return Err(RuntimeError::structure(format!(
                        "class '{}' defines selector '{}' more than once",
                        class_def.name, method.selector
                    )));
                }
                class.define(&method.selector, Method::User(method.block.clone()));
            }
            self.register(class)?;
        }
        self.verify_tree()
    }

    /// Check that every parent resolves and no parent chain cycles
    fn verify_tree(&self) -> Result<(), RuntimeError> {
        for class in self.classes.values() {
            let mut seen = HashSet::new();
            let mut current = class.clone();
            seen.insert(current.name.clone());
            while let Some(parent) = &current.parent {
                if !seen.insert(parent.clone()) {
                    return Err(RuntimeError::structure(format!(
                        "inheritance cycle through class '{}'",
                        parent
                    )));
                }
                current = self.find(parent).map_err(|_| {
                    RuntimeError::undefined(format!(
                        "class '{}' inherits from unknown class '{}'",
                        class.name, parent
                    ))
                })?;
            }
        }
        Ok(())
    }
}
