//! Abstract Syntax Tree (AST) definitions
//!
//! Immutable representation of a loaded SOL25 program. The loader produces
//! these nodes from the XML serialization; the interpreter only reads them.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// AST schema version
///
/// Included in JSON dumps so tooling can detect incompatible output.
/// Increment when making breaking changes to the AST structure.
pub const AST_VERSION: u32 = 1;

/// Top-level program: the ordered list of user class definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub classes: Vec<ClassDef>,
}

/// Versioned AST wrapper for JSON serialization
///
/// Wraps a Program with version metadata for stable JSON output,
/// used by the `ast` dump command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedProgram {
    /// AST schema version
    pub ast_version: u32,
    /// The actual program AST
    #[serde(flatten)]
    pub program: Program,
}

impl VersionedProgram {
    pub fn new(program: Program) -> Self {
        Self {
            ast_version: AST_VERSION,
            program,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<Program> for VersionedProgram {
    fn from(program: Program) -> Self {
        Self::new(program)
    }
}

/// User class definition: `class C : Parent { ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: String,
    /// Name of the parent class. Always present for user classes; only the
    /// built-in `Object` has no parent.
    pub parent: String,
    pub methods: Vec<MethodDef>,
}

/// Method definition: a selector bound to a block body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    pub selector: String,
    pub block: Rc<Block>,
}

/// A parameterized, suspended computation
///
/// Blocks are shared via `Rc`: a method body is one block, and every
/// reification of a block literal points at the same node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub parameters: Vec<String>,
    pub statements: Vec<Statement>,
}

/// Assignment statement: `var := expr.`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub var: String,
    pub expr: Expr,
}

/// Expression, a closed sum over the four SOL25 shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(Literal),
    /// Variable reference, resolved in the current environment
    Var(String),
    /// Block literal, reified as a `Block`-class value with a captured
    /// environment when evaluated
    Block(Rc<Block>),
    /// Message send: receiver, selector, ordered arguments
    Send {
        selector: String,
        receiver: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// Literal expression
///
/// Integer text is parsed at load time; the other variants carry the
/// textual payload (or none) straight from the XML attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    String(String),
    True,
    False,
    Nil,
    /// Class-name literal, e.g. the receiver in `Main new`
    Class(String),
}

impl Expr {
    /// Arity of a selector: the number of trailing-colon argument positions
    pub fn selector_arity(selector: &str) -> usize {
        selector.matches(':').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> Program {
        Program {
            classes: vec![ClassDef {
                name: "Main".to_string(),
                parent: "Object".to_string(),
                methods: vec![MethodDef {
                    selector: "run".to_string(),
                    block: Rc::new(Block {
                        parameters: vec![],
                        statements: vec![Statement {
                            var: "x".to_string(),
                            expr: Expr::Send {
                                selector: "plus:".to_string(),
                                receiver: Box::new(Expr::Literal(Literal::Integer(1))),
                                args: vec![Expr::Literal(Literal::Integer(2))],
                            },
                        }],
                    }),
                }],
            }],
        }
    }

    #[test]
    fn test_selector_arity() {
        assert_eq!(Expr::selector_arity("run"), 0);
        assert_eq!(Expr::selector_arity("plus:"), 1);
        assert_eq!(Expr::selector_arity("ifTrue:ifFalse:"), 2);
        assert_eq!(Expr::selector_arity("value:value:value:"), 3);
    }

    #[test]
    fn test_json_round_trip() {
        let versioned = VersionedProgram::new(sample_program());
        let json = versioned.to_json().unwrap();
        let back = VersionedProgram::from_json(&json).unwrap();
        assert_eq!(back, versioned);
    }

    #[test]
    fn test_json_contains_version() {
        let versioned = VersionedProgram::new(sample_program());
        let json = versioned.to_json().unwrap();
        assert!(json.contains(&format!("\"ast_version\": {}", AST_VERSION)));
    }
}
