//! Shared helpers for phase tests.

use std::path::PathBuf;

use gismo_diagnostic::emitter::{ColorMode, TerminalEmitter};
use gismo_eval::{buffer_handler, InterpreterBuilder, OutputSink, SharedBuffer, Value};
use gismo_ir::SharedSourceMap;
use gismoc::{emit_problem, evaluate_source, FileLoader, Problem, SourceText};

/// The prelude shipped in the repository.
pub fn prelude_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../toolchain/before.gsm")
}

pub fn prelude() -> SourceText {
    let path = prelude_path();
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    SourceText::new("before.gsm", text)
}

pub struct Outcome {
    pub result: Result<Value, Problem>,
    pub printed: String,
    pub written: Vec<u8>,
    pub sources: SharedSourceMap,
}

impl Outcome {
    pub fn problem(self) -> Problem {
        match self.result {
            Ok(value) => panic!("expected a failure, program returned {value}\n{}", self.printed),
            Err(problem) => problem,
        }
    }

    /// The failure as the terminal emitter renders it, without colors.
    pub fn rendered(self) -> String {
        let sources = self.sources.clone();
        let problem = self.problem();
        let mut emitter =
            TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_sources(sources);
        emit_problem(&problem, &mut emitter);
        String::from_utf8_lossy(&emitter.into_inner()).into_owned()
    }
}

pub fn run_parts(parts: &[SourceText]) -> Outcome {
    let sources = SharedSourceMap::new();
    let printed = buffer_handler();
    let written = SharedBuffer::new();
    let mut interp = InterpreterBuilder::new()
        .print_handler(printed.clone())
        .output(OutputSink::Buffer(written.clone()))
        .loader(FileLoader::new(sources.clone()))
        .build();
    let result = evaluate_source(&mut interp, &sources, parts);
    Outcome {
        result,
        printed: printed.get_output(),
        written: written.contents(),
        sources,
    }
}

/// Run `source` as `main.gsm` after the standard prelude.
pub fn run(source: &str) -> Outcome {
    run_parts(&[prelude(), SourceText::new("main.gsm", source)])
}

/// Printed output of a program that must succeed.
pub fn output(source: &str) -> String {
    let outcome = run(source);
    if let Err(problem) = &outcome.result {
        panic!("program failed: {problem}\noutput so far:\n{}", outcome.printed);
    }
    outcome.printed
}
