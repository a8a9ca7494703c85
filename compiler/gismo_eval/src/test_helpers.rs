//! Running Gismo source in unit tests.

use gismo_ir::SourceId;

use crate::output::{OutputSink, SharedBuffer};
use crate::print_handler::{buffer_handler, SharedPrintHandler};
use crate::{lower, EvalError, EvalResult, Interpreter, InterpreterBuilder, Value};

/// Everything a test program produced.
pub(crate) struct Run {
    pub result: EvalResult,
    pub printed: String,
    pub written: Vec<u8>,
}

impl Run {
    /// The error, failing the test if the program succeeded.
    pub fn error(self) -> EvalError {
        match self.result {
            Ok(value) => panic!("expected an error, program returned {value}\n{}", self.printed),
            Err(err) => err,
        }
    }
}

pub(crate) fn program(source: &str) -> Value {
    let tokens = gismo_lexer::tokenize(source, SourceId::new(0))
        .unwrap_or_else(|e| panic!("lex error: {e}"));
    let tree = gismo_parse::parse(tokens).unwrap_or_else(|e| panic!("parse error: {e}"));
    lower(&tree).unwrap_or_else(|e| panic!("lowering error: {e}"))
}

pub(crate) fn interpreter() -> (Interpreter, SharedPrintHandler, SharedBuffer) {
    let printed = buffer_handler();
    let written = SharedBuffer::new();
    let interp = InterpreterBuilder::new()
        .print_handler(printed.clone())
        .output(OutputSink::Buffer(written.clone()))
        .build();
    (interp, printed, written)
}

pub(crate) fn run(source: &str) -> Run {
    let (mut interp, printed, written) = interpreter();
    let result = interp.run_program(&program(source));
    Run {
        result,
        printed: printed.get_output(),
        written: written.contents(),
    }
}

/// Printed output of a program that must succeed.
pub(crate) fn output(source: &str) -> String {
    let run = run(source);
    if let Err(err) = &run.result {
        panic!("program failed: {err}\noutput so far:\n{}", run.printed);
    }
    run.printed
}
