//! Lexical tokens.

use std::fmt;

use crate::Span;

/// Token categories produced by the lexer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Operator,
    Number,
    String,
    LParen,
    RParen,
    LCurly,
    RCurly,
    LSquare,
    RSquare,
    /// Statement separator: a line break or `;`.
    Newline,
    /// Synthetic root of a parsed file.
    Module,
    Eof,
}

impl TokenKind {
    /// Human-readable description for diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Operator => "operator",
            TokenKind::Number => "number",
            TokenKind::String => "string literal",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LCurly => "`{`",
            TokenKind::RCurly => "`}`",
            TokenKind::LSquare => "`[`",
            TokenKind::RSquare => "`]`",
            TokenKind::Newline => "end of statement",
            TokenKind::Module => "module",
            TokenKind::Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A lexed token.
///
/// `text` is the token's value (for strings, the unescaped contents).
/// `alias` starts out equal to `text`; the parser renames bracket tokens to
/// the special-form heads they introduce (`@call`, `@callCurly`, `@begin`),
/// and lowering turns the alias into a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub alias: String,
    pub span: Span,
    /// Binding power when the token is used as an infix operator; 0 means
    /// it never binds.
    pub precedence: u8,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, precedence: u8) -> Self {
        let text = text.into();
        Token {
            kind,
            alias: text.clone(),
            text,
            span,
            precedence,
        }
    }

    /// Replace the alias, keeping the original text for diagnostics.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        alias.clone_into(&mut self.alias);
        self
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}
