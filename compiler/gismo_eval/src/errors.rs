//! Runtime errors.
//!
//! Every fatal condition of evaluation is an [`EvalError`]: a structured
//! [`EvalErrorKind`] plus the span of the offending form, when known.
//! Evaluation never recovers from one; it propagates with `?` up to the
//! driver, which renders it as a diagnostic.

use std::fmt;
use std::path::PathBuf;

use gismo_diagnostic::ErrorCode;
use gismo_ir::{Name, Span};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// No signature matches the operand tags at any scope level.
    NoMatchingSignature {
        operator: Name,
        /// One tag for unary dispatch, two for binary.
        operand_types: Vec<Name>,
        /// Best guesses, most relevant first.
        suggestions: Vec<String>,
    },
    /// `$SET` on a local nothing owns.
    UnownedLocal { name: String },
    /// A special form without the operands it needs.
    MalformedForm { message: String },
    /// `$RAISE`.
    Raised { message: String },
    DivisionByZero,
    ModuloByZero,
    /// A number literal that does not fit its type.
    InvalidLiteral { text: String },
    OutputFailed { message: String },
    LoadFailed { path: PathBuf, message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalErrorKind::NoMatchingSignature {
                operator,
                operand_types,
                ..
            } => match operand_types.as_slice() {
                [operand] => write!(f, "no match for unary macro `{operator} {operand}`"),
                [left, right] => write!(f, "no match for macro `{left} {operator} {right}`"),
                _ => write!(f, "no match for macro `{operator}`"),
            },
            EvalErrorKind::UnownedLocal { name } => write!(f, "no existing local for `{name}`"),
            EvalErrorKind::MalformedForm { message }
            | EvalErrorKind::Raised { message }
            | EvalErrorKind::OutputFailed { message } => f.write_str(message),
            EvalErrorKind::DivisionByZero => f.write_str("division by zero"),
            EvalErrorKind::ModuloByZero => f.write_str("modulo by zero"),
            EvalErrorKind::InvalidLiteral { text } => {
                write!(f, "invalid numeric literal `{text}`")
            }
            EvalErrorKind::LoadFailed { path, message } => {
                write!(f, "cannot load `{}`: {message}", path.display())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
    /// Extra context, rendered as notes.
    pub notes: Vec<String>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            span: None,
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn no_matching_signature(
        operator: Name,
        operand_types: Vec<Name>,
        suggestions: Vec<String>,
    ) -> Self {
        Self::from_kind(EvalErrorKind::NoMatchingSignature {
            operator,
            operand_types,
            suggestions,
        })
    }

    #[cold]
    pub fn unowned_local(name: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::UnownedLocal { name: name.into() })
    }

    #[cold]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::MalformedForm {
            message: message.into(),
        })
    }

    #[cold]
    pub fn raised(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Raised {
            message: message.into(),
        })
    }

    #[cold]
    pub fn division_by_zero() -> Self {
        Self::from_kind(EvalErrorKind::DivisionByZero)
    }

    #[cold]
    pub fn modulo_by_zero() -> Self {
        Self::from_kind(EvalErrorKind::ModuloByZero)
    }

    #[cold]
    pub fn invalid_literal(text: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::InvalidLiteral { text: text.into() })
    }

    #[cold]
    pub fn output_failed(err: &std::io::Error) -> Self {
        Self::from_kind(EvalErrorKind::OutputFailed {
            message: format!("cannot write output: {err}"),
        })
    }

    #[cold]
    pub fn load_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::LoadFailed {
            path: path.into(),
            message: message.into(),
        })
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless the error already has one.
    #[must_use]
    pub fn with_span_opt(mut self, span: Option<Span>) -> Self {
        if self.span.is_none() {
            self.span = span;
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            EvalErrorKind::InvalidLiteral { .. } => ErrorCode::E0003,
            EvalErrorKind::NoMatchingSignature { .. } => ErrorCode::E6001,
            EvalErrorKind::UnownedLocal { .. } => ErrorCode::E6002,
            EvalErrorKind::MalformedForm { .. } => ErrorCode::E6003,
            EvalErrorKind::Raised { .. } => ErrorCode::E6004,
            EvalErrorKind::DivisionByZero | EvalErrorKind::ModuloByZero => ErrorCode::E6005,
            EvalErrorKind::OutputFailed { .. } => ErrorCode::E6006,
            EvalErrorKind::LoadFailed { .. } => ErrorCode::E6007,
        }
    }

    /// Suggestions attached to a dispatch failure.
    pub fn suggestions(&self) -> &[String] {
        match &self.kind {
            EvalErrorKind::NoMatchingSignature { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}
