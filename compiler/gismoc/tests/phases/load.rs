//! `$LOAD` against files on disk.

use std::path::{Path, PathBuf};

use gismo_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use crate::common::{output, run};

fn write_module(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap_or_else(|e| panic!("{e}"));
    path
}

fn load(path: &Path) -> String {
    format!("$LOAD(\"{}\")", path.display())
}

#[test]
fn loaded_definitions_land_in_the_calling_scope() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(
        dir.path(),
        "double.gsm",
        "(int double) ::= $MUL($1, 2)\n$PRINTLN(loaded)",
    );
    let source = format!("{}\n$PRINTLN(4 double)", load(&module));
    assert_eq!(output(&source), "loaded\n8\n");
}

#[test]
fn loading_twice_runs_the_statements_twice() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(dir.path(), "hello.gsm", "$PRINTLN(hello)");
    let source = format!("{}\n{}", load(&module), load(&module));
    assert_eq!(output(&source), "hello\nhello\n");
}

#[test]
fn loads_inside_a_block_stay_in_the_block() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(dir.path(), "value.gsm", "answer ::= 42");
    let source = format!("{{ {}; $PRINTLN(answer) }}\n$PRINTLN(answer)", load(&module));
    assert_eq!(output(&source), "42\nanswer\n");
}

#[test]
fn module_exports_reach_the_program() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(
        dir.path(),
        "export.gsm",
        "$EXPORT($QUOTE(shared), 7)\n$EXPORT($QUOTE(int bump), $QUOTE($ADD($1, 1)))",
    );
    let source = format!("{}\n$PRINTLN(shared)\n$PRINTLN(1 bump)", load(&module));
    assert_eq!(output(&source), "7\n2\n");
}

#[test]
fn missing_modules_load_as_nil() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let source = format!("$PRINTLN({})", load(&dir.path().join("missing.gsm")));
    assert_eq!(output(&source), "nil\n");
}

#[test]
fn syntax_errors_in_modules_are_fatal() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(dir.path(), "broken.gsm", "\n$PRINTLN(\"unterminated");
    let outcome = run(&load(&module));
    match &outcome.result {
        Err(problem) => assert_eq!(problem.code(), ErrorCode::E6007),
        Ok(value) => panic!("expected a failure, got {value}"),
    }
    let rendered = outcome.rendered();
    assert!(rendered.contains("cannot load"), "{rendered}");
    assert!(rendered.contains("broken.gsm:2:"), "{rendered}");
}

#[test]
fn runtime_errors_in_modules_point_into_the_module() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let module = write_module(dir.path(), "raise.gsm", "x ::= 1\n$DIV(x, 0)");
    let rendered = run(&load(&module)).rendered();
    assert!(rendered.starts_with("error[E6005]: division by zero"), "{rendered}");
    assert!(rendered.contains("raise.gsm:2:"), "{rendered}");
}
