//! Gismo Lexer - turns source text into [`Token`]s.
//!
//! The token set is deliberately small: identifiers, operators, numbers,
//! strings, the three bracket pairs, and statement separators. Almost any
//! token can act as an infix operator; the binding power stored on each
//! token (see [`precedence`]) is what the parser climbs on.
//!
//! ```text
//! x ::= 2 add 3   // `add` is an identifier used infix
//! ```

mod cursor;
mod error;
pub mod precedence;

use gismo_ir::{SourceId, Span, Token, TokenKind};

use cursor::Cursor;
pub use error::{LexError, LexErrorKind};
use precedence::{operator_precedence, IDENTIFIER_PRECEDENCE};

/// Characters that make up operator tokens.
pub const OPERATOR_CHARS: &str = "+-*/=~#:?!%&|,.^<>@";

/// Tokenize `source`, tagging spans with `source_id`.
///
/// The returned stream always ends with a [`TokenKind::Eof`] token.
pub fn tokenize(source: &str, source_id: SourceId) -> Result<Vec<Token>, LexError> {
    Lexer {
        cursor: Cursor::new(source),
        source_id,
        tokens: Vec::new(),
    }
    .run()
}

struct Lexer<'a> {
    cursor: Cursor<'a>,
    source_id: SourceId,
    tokens: Vec<Token>,
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || matches!(c, '_' | '$' | '\\')
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}

fn is_operator_char(c: char) -> bool {
    OPERATOR_CHARS.contains(c)
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(c) = self.cursor.current() {
            let start = self.cursor.pos();
            match c {
                '/' if self.cursor.peek() == Some('/') => self.cursor.eat_until_newline(),
                '\\' if self.at_line_continuation() => self.skip_line_continuation(),
                '\n' | ';' => {
                    self.cursor.bump();
                    self.push(TokenKind::Newline, start, c.to_string(), 0);
                }
                c if c.is_whitespace() => {
                    self.cursor.bump();
                }
                c if is_identifier_start(c) => self.identifier(start),
                '.' if self.cursor.peek().is_some_and(|n| n.is_ascii_digit()) => {
                    self.number(start);
                }
                c if is_operator_char(c) => self.operator(start),
                c if c.is_ascii_digit() => self.number(start),
                '"' => self.string(start)?,
                '(' | ')' | '{' | '}' | '[' | ']' => {
                    self.cursor.bump();
                    let kind = match c {
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LCurly,
                        '}' => TokenKind::RCurly,
                        '[' => TokenKind::LSquare,
                        _ => TokenKind::RSquare,
                    };
                    self.push(kind, start, c.to_string(), 0);
                }
                other => {
                    self.cursor.bump();
                    return Err(LexError::unexpected_character(
                        other,
                        self.span_from(start),
                    ));
                }
            }
        }

        let end = self.cursor.pos();
        self.tokens.push(Token::new(
            TokenKind::Eof,
            "",
            Span::from_range(self.source_id, end..end),
            0,
        ));
        Ok(self.tokens)
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(self.source_id, start..self.cursor.pos())
    }

    fn push(&mut self, kind: TokenKind, start: usize, text: String, precedence: u8) {
        let span = self.span_from(start);
        self.tokens.push(Token::new(kind, text, span, precedence));
    }

    fn at_line_continuation(&self) -> bool {
        match self.cursor.peek() {
            Some('\n') => true,
            Some('\r') => self.cursor.peek_nth(1) == Some('\n'),
            _ => false,
        }
    }

    fn skip_line_continuation(&mut self) {
        self.cursor.bump();
        if self.cursor.current() == Some('\r') {
            self.cursor.bump();
        }
        self.cursor.bump();
    }

    fn identifier(&mut self, start: usize) {
        self.cursor.bump();
        self.cursor.eat_while(is_identifier_continue);
        let text = self.cursor.slice_from(start).to_owned();
        self.push(TokenKind::Identifier, start, text, IDENTIFIER_PRECEDENCE);
    }

    fn operator(&mut self, start: usize) {
        self.cursor.eat_while(is_operator_char);
        let text = self.cursor.slice_from(start).to_owned();
        let precedence = operator_precedence(&text);
        self.push(TokenKind::Operator, start, text, precedence);
    }

    /// Decimal, hex (`0x`), binary (`0b`), octal (`0o`), and floats with a
    /// fraction (`1.5`, `.5`). The fraction is only taken when a digit
    /// follows the dot, so `1.foo` lexes as `1`, `.`, `foo`.
    fn number(&mut self, start: usize) {
        let first = self.cursor.bump();
        match (first, self.cursor.current()) {
            (Some('.'), _) => self.cursor.eat_while(|c| c.is_ascii_digit()),
            (Some('0'), Some('x' | 'X')) => {
                self.cursor.bump();
                self.cursor.eat_while(|c| c.is_ascii_hexdigit());
            }
            (Some('0'), Some('b' | 'B')) => {
                self.cursor.bump();
                self.cursor.eat_while(|c| matches!(c, '0' | '1'));
            }
            (Some('0'), Some('o' | 'O')) => {
                self.cursor.bump();
                self.cursor.eat_while(|c| matches!(c, '0'..='7'));
            }
            _ => {
                self.cursor.eat_while(|c| c.is_ascii_digit());
                let has_fraction = self.cursor.current() == Some('.')
                    && self.cursor.peek().is_some_and(|c| c.is_ascii_digit());
                if has_fraction {
                    self.cursor.bump();
                    self.cursor.eat_while(|c| c.is_ascii_digit());
                }
            }
        }
        let text = self.cursor.slice_from(start).to_owned();
        self.push(TokenKind::Number, start, text, IDENTIFIER_PRECEDENCE);
    }

    /// Escapes: `\" \\ \n \r \t`. Any other escaped character is dropped.
    fn string(&mut self, start: usize) -> Result<(), LexError> {
        self.cursor.bump();
        let mut value = String::new();
        loop {
            match self.cursor.bump() {
                None => return Err(LexError::unterminated_string(self.span_from(start))),
                Some('"') => break,
                Some('\\') => match self.cursor.bump() {
                    None => return Err(LexError::unterminated_string(self.span_from(start))),
                    Some('"') => value.push('"'),
                    Some('\\') => value.push('\\'),
                    Some('n') => value.push('\n'),
                    Some('r') => value.push('\r'),
                    Some('t') => value.push('\t'),
                    Some(_) => {}
                },
                Some(c) => value.push(c),
            }
        }
        self.push(TokenKind::String, start, value, 0);
        Ok(())
    }
}
