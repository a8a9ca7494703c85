//! Everything that can stop a run, and its rendering as a [`Diagnostic`].
//!
//! Each phase reports its own error type. `Problem` gathers them so the
//! driver has a single thing to hand to the emitter.

use std::fmt;

use gismo_diagnostic::{Diagnostic, ErrorCode};
use gismo_eval::{EvalError, EvalErrorKind};
use gismo_lexer::LexError;
use gismo_parse::ParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Problem {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
    /// Usage or I/O failure of the driver itself.
    Driver { message: String },
}

impl Problem {
    #[cold]
    pub fn driver(message: impl Into<String>) -> Self {
        Problem::Driver {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Problem::Lex(err) => err.code(),
            Problem::Parse(err) => err.code(),
            Problem::Eval(err) => err.code(),
            Problem::Driver { .. } => ErrorCode::E9001,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Problem::Lex(err) => err.to_diagnostic(),
            Problem::Parse(err) => err.to_diagnostic(),
            Problem::Eval(err) => eval_error_to_diagnostic(err),
            Problem::Driver { message } => Diagnostic::driver(message.clone()),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Lex(err) => fmt::Display::fmt(err, f),
            Problem::Parse(err) => fmt::Display::fmt(err, f),
            Problem::Eval(err) => fmt::Display::fmt(err, f),
            Problem::Driver { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for Problem {}

impl From<LexError> for Problem {
    fn from(err: LexError) -> Self {
        Problem::Lex(err)
    }
}

impl From<ParseError> for Problem {
    fn from(err: ParseError) -> Self {
        Problem::Parse(err)
    }
}

impl From<EvalError> for Problem {
    fn from(err: EvalError) -> Self {
        Problem::Eval(err)
    }
}

fn label_for(kind: &EvalErrorKind) -> &'static str {
    match kind {
        EvalErrorKind::NoMatchingSignature { .. } => "no signature accepts these operand types",
        EvalErrorKind::UnownedLocal { .. } => "not bound in any enclosing scope",
        EvalErrorKind::MalformedForm { .. } => "malformed here",
        EvalErrorKind::Raised { .. } => "raised here",
        EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero => "divisor is zero",
        EvalErrorKind::InvalidLiteral { .. } => "invalid literal",
        EvalErrorKind::OutputFailed { .. } => "while writing this",
        EvalErrorKind::LoadFailed { .. } => "error in loaded module",
    }
}

/// Render a runtime error: message, labelled span, notes, then one help
/// line per suggested signature.
pub fn eval_error_to_diagnostic(err: &EvalError) -> Diagnostic {
    let mut diag = Diagnostic::error(err.code())
        .with_message(err.to_string())
        .with_label_opt(err.span, label_for(&err.kind))
        .with_notes(err.notes.iter().cloned());
    if let EvalErrorKind::UnownedLocal { .. } = err.kind {
        diag = diag.with_suggestion("define it first with `$DEF`");
    }
    diag.with_did_you_mean(err.suggestions())
}

#[cfg(test)]
mod tests {
    use gismo_ir::{Name, SourceId, Span};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dispatch_failures_list_suggestions() {
        let err = EvalError::no_matching_signature(
            Name::intern("foo"),
            vec![Name::STRING, Name::INT],
            vec!["string foo string".to_owned(), "int foo int".to_owned()],
        )
        .with_span(Span::new(SourceId::new(0), 4, 7));

        let diag = Problem::from(err).to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E6001);
        assert_eq!(diag.message, "no match for macro `string foo int`");
        assert_eq!(diag.primary_span(), Some(Span::new(SourceId::new(0), 4, 7)));
        assert_eq!(
            diag.suggestions,
            ["did you mean `string foo string`?", "did you mean `int foo int`?"]
        );
    }

    #[test]
    fn spanless_errors_have_no_label() {
        let diag = eval_error_to_diagnostic(&EvalError::raised("boom").with_note("in a loop"));
        assert_eq!(diag.code, ErrorCode::E6004);
        assert!(diag.labels.is_empty());
        assert_eq!(diag.notes, ["in a loop"]);
    }

    #[test]
    fn driver_problems_use_the_driver_code() {
        let problem = Problem::driver("cannot read `main.gsm`");
        assert_eq!(problem.code(), ErrorCode::E9001);
        assert_eq!(problem.to_string(), "cannot read `main.gsm`");
        assert_eq!(
            problem.to_diagnostic().headline(),
            "error[E9001]: cannot read `main.gsm`"
        );
    }
}
