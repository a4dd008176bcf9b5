//! Runtime error taxonomy
//!
//! Errors are fatal and non-recoverable inside the interpreted program:
//! the evaluator short-circuits on the first error and unwinds to the
//! driver, which maps the error kind to a process exit code.

use thiserror::Error;

/// Runtime error raised by the loader, the class registry, or the evaluator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Malformed XML input or AST structure
    #[error("StructureError: {msg}")]
    Structure { msg: String },
    /// Reference to an unknown class, variable, or a missing `Main`/`run`
    #[error("UndefinedClass: {msg}")]
    Undefined { msg: String },
    /// Message sent with no method found in the receiver's class chain
    #[error("DoesNotUnderstand: class '{class}' does not understand '{selector}'")]
    DoesNotUnderstand { class: String, selector: String },
    /// Argument of the wrong class passed to a built-in method
    #[error("TypeMismatch: {msg}")]
    TypeMismatch { msg: String },
    /// Value-domain violation, e.g. division by zero
    #[error("ValueError: {msg}")]
    ValueError { msg: String },
}

impl RuntimeError {
    pub fn structure(msg: impl Into<String>) -> Self {
        RuntimeError::Structure { msg: msg.into() }
    }

    pub fn undefined(msg: impl Into<String>) -> Self {
        RuntimeError::Undefined { msg: msg.into() }
    }

    pub fn does_not_understand(class: impl Into<String>, selector: impl Into<String>) -> Self {
        RuntimeError::DoesNotUnderstand {
            class: class.into(),
            selector: selector.into(),
        }
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch { msg: msg.into() }
    }

    pub fn value_error(msg: impl Into<String>) -> Self {
        RuntimeError::ValueError { msg: msg.into() }
    }

    /// The error category, the only part of an error the launcher needs
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::Structure { .. } => ErrorKind::Structure,
            RuntimeError::Undefined { .. } => ErrorKind::Undefined,
            RuntimeError::DoesNotUnderstand { .. } => ErrorKind::DoesNotUnderstand,
            RuntimeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RuntimeError::ValueError { .. } => ErrorKind::ValueError,
        }
    }
}

/// Error category with a stable process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Structure,
    Undefined,
    DoesNotUnderstand,
    TypeMismatch,
    ValueError,
}

impl ErrorKind {
    /// Stable exit code for the process-level launcher
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Structure => 31,
            ErrorKind::Undefined => 32,
            ErrorKind::DoesNotUnderstand => 51,
            ErrorKind::TypeMismatch => 52,
            ErrorKind::ValueError => 53,
        }
    }

    /// Human-readable category name, included in every stderr diagnostic
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Structure => "StructureError",
            ErrorKind::Undefined => "UndefinedClass",
            ErrorKind::DoesNotUnderstand => "DoesNotUnderstand",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::ValueError => "ValueError",
        }
    }
}
