//! Shared test utilities
//!
//! Helpers to assemble XML-serialized SOL25 programs and to run them with
//! captured stdout and scripted stdin.

#![allow(dead_code)]

use sol25_runtime::{ErrorKind, InputReader, OutputWriter, RuntimeError, Sol25};
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// A thin Write wrapper around Arc<Mutex<Vec<u8>>> for capturing output.
struct VecWriter(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for VecWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run a program with the given stdin contents; return the result and
/// everything it printed
pub fn run_with_stdin(xml: &str, stdin: &str) -> (Result<(), RuntimeError>, String) {
    let buffer: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let output: OutputWriter = Arc::new(Mutex::new(Box::new(VecWriter(buffer.clone()))));
    let input: InputReader = Arc::new(Mutex::new(Box::new(Cursor::new(
        stdin.as_bytes().to_vec(),
    ))));

    let runtime = Sol25::with_io(output, input);
    let result = runtime.run_source(xml);
    let printed = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
    (result, printed)
}

pub fn run_program(xml: &str) -> (Result<(), RuntimeError>, String) {
    run_with_stdin(xml, "")
}

/// Run a program that must succeed; return its stdout
pub fn run_ok(xml: &str) -> String {
    let (result, printed) = run_program(xml);
    result.unwrap_or_else(|err| panic!("program failed with {}: output {:?}", err, printed));
    printed
}

/// Run a program that must fail; return the error kind
pub fn run_err(xml: &str) -> ErrorKind {
    let (result, printed) = run_program(xml);
    match result {
        Err(err) => err.kind(),
        Ok(()) => panic!("program unexpectedly succeeded with output {:?}", printed),
    }
}

// ----------------------------------------------------------------------
// XML program builders
// ----------------------------------------------------------------------

pub fn program(classes: &str) -> String {
    format!(r#"<program language="SOL25">{}</program>"#, classes)
}

pub fn class(name: &str, parent: &str, methods: &str) -> String {
    format!(
        r#"<class name="{}" parent="{}">{}</class>"#,
        name, parent, methods
    )
}

pub fn method(selector: &str, block: &str) -> String {
    format!(r#"<method selector="{}">{}</method>"#, selector, block)
}

/// A block element with the given parameter names and statements
pub fn block(params: &[&str], statements: &[String]) -> String {
    let params: String = params
        .iter()
        .enumerate()
        .map(|(i, name)| format!(r#"<parameter order="{}" name="{}"/>"#, i + 1, name))
        .collect();
    let body: String = statements
        .iter()
        .enumerate()
        .map(|(i, stmt)| format!(r#"<assign order="{}">{}</assign>"#, i + 1, stmt))
        .collect();
    format!("<block>{}{}</block>", params, body)
}

/// The contents of one assign element: `var := expr.`
pub fn stmt(var: &str, expr: &str) -> String {
    format!(r#"<var name="{}"/><expr>{}</expr>"#, var, expr)
}

/// A program consisting of `Main` with a parameterless `run`
pub fn main_run(statements: &[String]) -> String {
    program(&class(
        "Main",
        "Object",
        &method("run", &block(&[], statements)),
    ))
}

// Expression builders; each returns one element to nest inside <expr>.

pub fn int_lit(n: i64) -> String {
    format!(r#"<literal class="Integer" value="{}"/>"#, n)
}

pub fn str_lit(s: &str) -> String {
    let escaped = s
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('"', "&quot;");
    format!(r#"<literal class="String" value="{}"/>"#, escaped)
}

pub fn true_lit() -> String {
    r#"<literal class="True" value="true"/>"#.to_string()
}

pub fn false_lit() -> String {
    r#"<literal class="False" value="false"/>"#.to_string()
}

pub fn nil_lit() -> String {
    r#"<literal class="Nil" value="nil"/>"#.to_string()
}

pub fn class_lit(name: &str) -> String {
    format!(r#"<literal class="class" value="{}"/>"#, name)
}

pub fn var(name: &str) -> String {
    format!(r#"<var name="{}"/>"#, name)
}

pub fn send(selector: &str, receiver: &str, args: &[&str]) -> String {
    let args: String = args
        .iter()
        .enumerate()
        .map(|(i, arg)| format!(r#"<arg order="{}"><expr>{}</expr></arg>"#, i + 1, arg))
        .collect();
    format!(
        r#"<send selector="{}"><expr>{}</expr>{}</send>"#,
        selector, receiver, args
    )
}

/// `<receiver> asString print`
pub fn print_as_string(receiver: &str) -> String {
    send("print", &send("asString", receiver, &[]), &[])
}
