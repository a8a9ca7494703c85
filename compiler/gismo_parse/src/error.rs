//! Parse error types.

use std::fmt;

use gismo_diagnostic::{Diagnostic, ErrorCode};
use gismo_ir::{Span, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A `(` or `{` was never closed.
    UnclosedDelimiter { open: char, open_span: Span },
    /// A token that cannot continue or start a statement.
    UnexpectedToken { found: TokenKind, text: String },
    /// A call's parentheses hold something other than an expression.
    ExpectedExpression,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Where the parser was when it gave up.
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn unclosed(open: char, open_span: Span, found: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::UnclosedDelimiter { open, open_span },
            span: found,
        }
    }

    #[cold]
    pub fn unexpected(found: TokenKind, text: &str, span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::UnexpectedToken {
                found,
                text: text.to_owned(),
            },
            span,
        }
    }

    #[cold]
    pub fn expected_expression(span: Span) -> Self {
        ParseError {
            kind: ParseErrorKind::ExpectedExpression,
            span,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } => ErrorCode::E1001,
            ParseErrorKind::ExpectedExpression => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.kind {
            ParseErrorKind::UnclosedDelimiter { open, open_span } => {
                let close = if *open == '(' { ')' } else { '}' };
                diag.with_label(self.span, format!("expected `{close}` here"))
                    .with_secondary_label(*open_span, format!("`{open}` opened here"))
            }
            ParseErrorKind::UnexpectedToken { .. } => {
                diag.with_label(self.span, "cannot appear here")
            }
            ParseErrorKind::ExpectedExpression => diag
                .with_label(self.span, "expected an argument expression")
                .with_suggestion("write `f()` to call without arguments"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnclosedDelimiter { open, .. } => {
                write!(f, "unclosed delimiter `{open}`")
            }
            ParseErrorKind::UnexpectedToken { found, text } => {
                if text.is_empty() {
                    write!(f, "unexpected {found}")
                } else {
                    write!(f, "unexpected {found} `{text}`")
                }
            }
            ParseErrorKind::ExpectedExpression => write!(f, "expected expression"),
        }
    }
}

impl std::error::Error for ParseError {}
