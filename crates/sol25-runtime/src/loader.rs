//! XML front end: materializes the typed AST
//!
//! Consumes the XML serialization produced by the SOL25 parser and hands
//! the core a `Program`. Every structural deviation - malformed XML, wrong
//! root, unknown elements, missing attributes, unparsable integer literals -
//! is a `StructureError`; nothing here executes user code.

use crate::ast::{Block, ClassDef, Expr, Literal, MethodDef, Program, Statement};
use crate::error::RuntimeError;
use roxmltree::{Document, Node};
use std::rc::Rc;

/// Parse the XML serialization of a SOL25 program
pub fn parse_program(source: &str) -> Result<Program, RuntimeError> {
    let doc = Document::parse(source)
        .map_err(|e| RuntimeError::structure(format!("malformed XML: {}", e)))?;

    let root = doc.root_element();
    if root.tag_name().name() != "program" {
        return Err(RuntimeError::structure(format!(
            "expected root element 'program', found '{}'",
            root.tag_name().name()
        )));
    }
    match root.attribute("language") {
        Some("SOL25") => {}
        Some(other) => {
            return Err(RuntimeError::structure(format!(
                "unsupported language '{}'",
                other
            )));
        }
        None => {
            return Err(RuntimeError::structure(
                "'program' element is missing the 'language' attribute",
            ));
        }
    }

    let mut classes = Vec::new();
    for child in element_children(&root) {
        expect_element(&child, "class")?;
        classes.push(parse_class(&child)?);
    }
    Ok(Program { classes })
}

fn parse_class(node: &Node) -> Result<ClassDef, RuntimeError> {
    let name = require_attribute(node, "name")?;
    let parent = require_attribute(node, "parent")?;

    let mut methods = Vec::new();
    for child in element_children(node) {
        expect_element(&child, "method")?;
        methods.push(parse_method(&child)?);
    }
    Ok(ClassDef {
        name,
        parent,
        methods,
    })
}

fn parse_method(node: &Node) -> Result<MethodDef, RuntimeError> {
    let selector = require_attribute(node, "selector")?;

    let children: Vec<_> = element_children(node).collect();
    match children.as_slice() {
        [block] => {
            expect_element(block, "block")?;
            Ok(MethodDef {
                selector,
                block: Rc::new(parse_block(block)?),
            })
        }
        _ => Err(RuntimeError::structure(format!(
            "method '{}' must contain exactly one 'block' element",
            selector
        ))),
    }
}

fn parse_block(node: &Node) -> Result<Block, RuntimeError> {
    // Parameters come first, then assignments. The reference serializer
    // numbers both with 1-based 'order' attributes; honor them when present.
    let mut parameters = Vec::new();
    let mut statements = Vec::new();
    let mut in_statements = false;

    for child in element_children(node) {
        match child.tag_name().name() {
            "parameter" if !in_statements => {
                let order = optional_order(&child)?;
                parameters.push((order, require_attribute(&child, "name")?));
            }
            "assign" => {
                in_statements = true;
                let order = optional_order(&child)?;
                statements.push((order, parse_assign(&child)?));
            }
            other => {
                return Err(RuntimeError::structure(format!(
                    "unexpected element '{}' in block",
                    other
                )));
            }
        }
    }

    parameters.sort_by_key(|(order, _)| *order);
    statements.sort_by_key(|(order, _)| *order);
    Ok(Block {
        parameters: parameters.into_iter().map(|(_, name)| name).collect(),
        statements: statements.into_iter().map(|(_, stmt)| stmt).collect(),
    })
}

fn parse_assign(node: &Node) -> Result<Statement, RuntimeError> {
    let mut var = None;
    let mut expr = None;
    for child in element_children(node) {
        match child.tag_name().name() {
            "var" if var.is_none() => var = Some(require_attribute(&child, "name")?),
            "expr" if expr.is_none() => expr = Some(parse_expr(&child)?),
            other => {
                return Err(RuntimeError::structure(format!(
                    "unexpected element '{}' in assign",
                    other
                )));
            }
        }
    }
    match (var, expr) {
        (Some(var), Some(expr)) => Ok(Statement { var, expr }),
        _ => Err(RuntimeError::structure(
            "assign must contain one 'var' and one 'expr'",
        )),
    }
}

fn parse_expr(node: &Node) -> Result<Expr, RuntimeError> {
    let children: Vec<_> = element_children(node).collect();
    let [child] = children.as_slice() else {
        return Err(RuntimeError::structure(
            "expr must contain exactly one child element",
        ));
    };

    match child.tag_name().name() {
        "literal" => parse_literal(child).map(Expr::Literal),
        "var" => Ok(Expr::Var(require_attribute(child, "name")?)),
        "block" => Ok(Expr::Block(Rc::new(parse_block(child)?))),
        "send" => parse_send(child),
        other => Err(RuntimeError::structure(format!(
            "unexpected element '{}' in expr",
            other
        ))),
    }
}

fn parse_literal(node: &Node) -> Result<Literal, RuntimeError> {
    let class = require_attribute(node, "class")?;
    let value = node.attribute("value");

    match class.as_str() {
        "Integer" => {
            let text = value.ok_or_else(|| {
                RuntimeError::structure("Integer literal is missing the 'value' attribute")
            })?;
            let n = text.parse::<i64>().map_err(|_| {
                RuntimeError::structure(format!("invalid Integer literal '{}'", text))
            })?;
            Ok(Literal::Integer(n))
        }
        "String" => {
            let text = value.ok_or_else(|| {
                RuntimeError::structure("String literal is missing the 'value' attribute")
            })?;
            Ok(Literal::String(text.to_string()))
        }
        "True" => Ok(Literal::True),
        "False" => Ok(Literal::False),
        "Nil" => Ok(Literal::Nil),
        "class" => {
            let name = value.filter(|v| !v.is_empty()).ok_or_else(|| {
                RuntimeError::structure("class literal is missing the class name")
            })?;
            Ok(Literal::Class(name.to_string()))
        }
        other => Err(RuntimeError::structure(format!(
            "unknown literal class '{}'",
            other
        ))),
    }
}

fn parse_send(node: &Node) -> Result<Expr, RuntimeError> {
    let selector = require_attribute(node, "selector")?;

    let mut receiver = None;
    let mut args = Vec::new();
    for child in element_children(node) {
        match child.tag_name().name() {
            "expr" if receiver.is_none() => receiver = Some(parse_expr(&child)?),
            "arg" => {
                let order = optional_order(&child)?;
                let inner: Vec<_> = element_children(&child).collect();
                let [expr] = inner.as_slice() else {
                    return Err(RuntimeError::structure(
                        "arg must contain exactly one 'expr' element",
                    ));
                };
                expect_element(expr, "expr")?;
                args.push((order, parse_expr(expr)?));
            }
            other => {
                return Err(RuntimeError::structure(format!(
                    "unexpected element '{}' in send",
                    other
                )));
            }
        }
    }

    let Some(receiver) = receiver else {
        return Err(RuntimeError::structure(format!(
            "send '{}' is missing its receiver expression",
            selector
        )));
    };
    // Selector arity is its colon count; the argument list must agree.
    if Expr::selector_arity(&selector) != args.len() {
        return Err(RuntimeError::structure(format!(
            "send '{}' expects {} argument(s), found {}",
            selector,
            Expr::selector_arity(&selector),
            args.len()
        )));
    }
    args.sort_by_key(|(order, _)| *order);
    Ok(Expr::Send {
        selector,
        receiver: Box::new(receiver),
        args: args.into_iter().map(|(_, expr)| expr).collect(),
    })
}

fn element_children<'a, 'input>(
    node: &Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn expect_element(node: &Node, name: &str) -> Result<(), RuntimeError> {
    if node.tag_name().name() == name {
        Ok(())
    } else {
        Err(RuntimeError::structure(format!(
            "expected element '{}', found '{}'",
            name,
            node.tag_name().name()
        )))
    }
}

fn require_attribute(node: &Node, name: &str) -> Result<String, RuntimeError> {
    node.attribute(name).map(str::to_string).ok_or_else(|| {
        RuntimeError::structure(format!(
            "element '{}' is missing the '{}' attribute",
            node.tag_name().name(),
            name
        ))
    })
}

/// 1-based ordering attribute emitted by the reference serializer
fn optional_order(node: &Node) -> Result<usize, RuntimeError> {
    match node.attribute("order") {
        Some(text) => text
            .parse::<usize>()
            .map_err(|_| RuntimeError::structure(format!("invalid order attribute '{}'", text))),
        // Preserve document order for serializers that omit 'order'.
        None => Ok(usize::MAX),
    }
}
