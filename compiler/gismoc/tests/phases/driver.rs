//! Source assembly, diagnostics and the output file.

use std::path::Path;

use gismo_diagnostic::emitter::ColorMode;
use gismo_diagnostic::ErrorCode;
use gismoc::{Config, Input, SourceText};
use pretty_assertions::assert_eq;

use crate::common::{prelude, prelude_path, run, run_parts};

#[test]
fn parts_run_in_order_as_one_module() {
    let outcome = run_parts(&[
        SourceText::new("before.gsm", "$PRINTLN(before)\n(int twice) ::= $MUL($1, 2)"),
        SourceText::new("main.gsm", "$PRINTLN(3 twice)"),
        SourceText::new("after.gsm", "$PRINTLN(after)"),
    ]);
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.printed, "before\n6\nafter\n");
}

#[test]
fn parts_without_trailing_newlines_stay_separate_statements() {
    let outcome = run_parts(&[
        SourceText::new("a.gsm", "$PRINTLN(a)"),
        SourceText::new("b.gsm", "$PRINTLN(b)"),
    ]);
    assert_eq!(outcome.printed, "a\nb\n");
}

#[test]
fn each_part_gets_its_own_source() {
    let outcome = run_parts(&[
        SourceText::new("before.gsm", "x ::= 1"),
        SourceText::new("main.gsm", "x ::= 2"),
    ]);
    assert_eq!(outcome.sources.len(), 2);
    let paths: Vec<String> = (0..2)
        .filter_map(|i| outcome.sources.file(gismo_ir::SourceId::new(i)))
        .map(|file| file.path.to_string())
        .collect();
    assert_eq!(paths, ["before.gsm", "main.gsm"]);
}

#[test]
fn runtime_errors_point_into_the_right_file() {
    let rendered = run("(string foo string) ::= 1\n\"a\" foo 5").rendered();
    assert!(
        rendered.starts_with("error[E6001]: no match for macro `string foo int`\n"),
        "{rendered}"
    );
    assert!(rendered.contains("--> main.gsm:2:5"), "{rendered}");
    assert!(rendered.contains("\"a\" foo 5"), "{rendered}");
    assert!(rendered.contains("help: did you mean `string foo string`?"), "{rendered}");
}

#[test]
fn syntax_errors_in_the_prelude_name_the_prelude() {
    let rendered = run_parts(&[
        SourceText::new("before.gsm", "f(1"),
        SourceText::new("main.gsm", "$PRINTLN(1)"),
    ])
    .rendered();
    assert!(rendered.starts_with("error[E1003]"), "{rendered}");
    assert!(rendered.contains("before.gsm:1:"), "{rendered}");
}

#[test]
fn lex_errors_stop_before_evaluation() {
    let outcome = run_parts(&[
        SourceText::new("before.gsm", "$PRINTLN(early)"),
        SourceText::new("main.gsm", "$PRINTLN(\"oops)"),
    ]);
    assert_eq!(outcome.printed, "");
    assert_eq!(outcome.problem().code(), ErrorCode::E0001);
}

#[test]
fn raised_errors_carry_their_message() {
    let rendered = run("$RAISE(x, \"bad input\")").rendered();
    assert!(rendered.starts_with("error[E6004]: bad input\n"), "{rendered}");
    assert!(rendered.contains("--> main.gsm:1:"), "{rendered}");
}

#[test]
fn writes_go_to_the_output_sink() {
    let outcome = run("$WRITE(\"hi\")\n$WRITEB(10)\n$WRITEB(321)");
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.written, b"hi\n\x41".to_vec());
}

fn file_config(dir: &Path, main: &str, output_enabled: bool) -> Config {
    let main_path = dir.join("main.gsm");
    std::fs::write(&main_path, main).unwrap_or_else(|e| panic!("{e}"));
    Config {
        input: Input::File(main_path),
        output_path: dir.join("out.a"),
        output_enabled,
        color: ColorMode::Never,
        before_path: prelude_path(),
        after_path: dir.join("missing-after.gsm"),
    }
}

#[test]
fn run_creates_the_output_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let config = file_config(dir.path(), "$WRITE(1 + 2)\n$WRITEB(10)", true);

    let _ = gismoc::run(&config);
    let written = std::fs::read(dir.path().join("out.a")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(written, b"3\n".to_vec());
}

#[test]
fn run_keeps_output_written_before_a_failure() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let config = file_config(dir.path(), "$WRITE(partial)\n$RAISE(x)", true);

    let _ = gismoc::run(&config);
    let written = std::fs::read(dir.path().join("out.a")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(written, b"partial".to_vec());
}

#[test]
fn disabled_output_creates_no_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let config = file_config(dir.path(), "$WRITE(ignored)", false);

    let _ = gismoc::run(&config);
    assert!(!dir.path().join("out.a").exists());
}

#[test]
fn unreadable_input_creates_no_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let mut config = file_config(dir.path(), "", true);
    config.input = Input::File(dir.path().join("absent.gsm"));

    let _ = gismoc::run(&config);
    assert!(!dir.path().join("out.a").exists());
}

#[test]
fn inline_code_runs_with_the_prelude() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("{e}"));
    let mut config = file_config(dir.path(), "", true);
    config.input = Input::Inline("$WRITE(2 * 21)".to_owned());

    let _ = gismoc::run(&config);
    let written = std::fs::read(dir.path().join("out.a")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(written, b"42".to_vec());
}

#[test]
fn prelude_is_a_plain_source() {
    let outcome = run_parts(&[prelude()]);
    assert_eq!(outcome.result.map(|value| value.to_string()).ok(), Some("nil".to_owned()));
}
