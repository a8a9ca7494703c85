//! Lexer errors.

use std::fmt;

use gismo_diagnostic::{Diagnostic, ErrorCode};
use gismo_ir::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    UnterminatedString,
    UnexpectedCharacter(char),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnterminatedString,
            span,
        }
    }

    #[cold]
    pub fn unexpected_character(c: char, span: Span) -> Self {
        LexError {
            kind: LexErrorKind::UnexpectedCharacter(c),
            span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::UnexpectedCharacter(_) => ErrorCode::E0002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self.kind {
            LexErrorKind::UnterminatedString => diag
                .with_label(self.span, "string starts here")
                .with_suggestion("add a closing `\"`"),
            LexErrorKind::UnexpectedCharacter(_) => {
                diag.with_label(self.span, "not part of any token")
            }
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LexErrorKind::UnterminatedString => write!(f, "unterminated string literal"),
            LexErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
        }
    }
}

impl std::error::Error for LexError {}
