//! End-to-end tests for the `sol25` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const HELLO_PROGRAM: &str = r#"<program language="SOL25">
  <class name="Main" parent="Object">
    <method selector="run">
      <block>
        <assign order="1">
          <var name="x"/>
          <expr>
            <send selector="print">
              <expr>
                <send selector="asString">
                  <expr>
                    <send selector="plus:">
                      <expr><literal class="Integer" value="1"/></expr>
                      <arg order="1"><expr><literal class="Integer" value="2"/></expr></arg>
                    </send>
                  </expr>
                </send>
              </expr>
            </send>
          </expr>
        </assign>
      </block>
    </method>
  </class>
</program>"#;

const DIV_BY_ZERO_PROGRAM: &str = r#"<program language="SOL25">
  <class name="Main" parent="Object">
    <method selector="run">
      <block>
        <assign order="1">
          <var name="x"/>
          <expr>
            <send selector="divBy:">
              <expr><literal class="Integer" value="10"/></expr>
              <arg order="1"><expr><literal class="Integer" value="0"/></expr></arg>
            </send>
          </expr>
        </assign>
      </block>
    </method>
  </class>
</program>"#;

fn sol25() -> Command {
    Command::cargo_bin("sol25").unwrap()
}

fn program_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_run_prints_result() {
    let file = program_file(HELLO_PROGRAM);
    sol25()
        .arg("run")
        .arg(file.path())
        .assert()
        .success()
        .stdout("3");
}

#[test]
fn test_run_reads_program_from_stdin() {
    sol25()
        .arg("run")
        .write_stdin(HELLO_PROGRAM)
        .assert()
        .success()
        .stdout("3");
}

#[test]
fn test_value_error_exit_code() {
    let file = program_file(DIV_BY_ZERO_PROGRAM);
    sol25()
        .arg("run")
        .arg(file.path())
        .assert()
        .code(53)
        .stderr(predicate::str::contains("ValueError"));
}

#[test]
fn test_does_not_understand_exit_code() {
    let program = r#"<program language="SOL25">
      <class name="Main" parent="Object">
        <method selector="run">
          <block>
            <assign order="1">
              <var name="x"/>
              <expr>
                <send selector="frobnicate">
                  <expr><literal class="Integer" value="1"/></expr>
                </send>
              </expr>
            </assign>
          </block>
        </method>
      </class>
    </program>"#;
    sol25()
        .arg("run")
        .write_stdin(program)
        .assert()
        .code(51)
        .stderr(predicate::str::contains("DoesNotUnderstand"));
}

#[test]
fn test_structure_error_exit_code() {
    sol25()
        .arg("run")
        .write_stdin("<program language=\"SOL25\"")
        .assert()
        .code(31)
        .stderr(predicate::str::contains("StructureError"));
}

#[test]
fn test_missing_main_exit_code() {
    sol25()
        .arg("run")
        .write_stdin(r#"<program language="SOL25"/>"#)
        .assert()
        .code(32)
        .stderr(predicate::str::contains("UndefinedClass"));
}

#[test]
fn test_unreadable_file_exit_code() {
    sol25()
        .arg("run")
        .arg("does-not-exist.xml")
        .assert()
        .code(11)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_check_valid_program_is_quiet() {
    let file = program_file(HELLO_PROGRAM);
    sol25()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_check_does_not_execute() {
    // divBy: 0 only fails at runtime; check accepts the program.
    let file = program_file(DIV_BY_ZERO_PROGRAM);
    sol25().arg("check").arg(file.path()).assert().success();
}

#[test]
fn test_ast_dumps_versioned_json() {
    let file = program_file(HELLO_PROGRAM);
    sol25()
        .arg("ast")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ast_version"))
        .stdout(predicate::str::contains("Main"));
}

#[test]
fn test_ast_rejects_malformed_input() {
    sol25()
        .arg("ast")
        .write_stdin("not xml at all")
        .assert()
        .code(31)
        .stderr(predicate::str::contains("StructureError"));
}
