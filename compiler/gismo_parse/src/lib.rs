//! Gismo Parser - precedence climbing over lexer tokens.
//!
//! The grammar has almost no fixed syntax. Every expression is a literal,
//! a prefix operator applied to a literal, or a left operand followed by an
//! infix token and a right operand parsed one power higher:
//!
//! ```text
//! int add int ::= $ADD($1, $2)
//! => (::= (add int int) (@call $ADD (, $1 $2)))
//! ```
//!
//! Brackets introduce the special forms:
//! - `f(args)` => `(@call f args)`
//! - `f{a; b}` => `(@callCurly f a b)`
//! - `{a; b}`  => `(@begin a b)`
//!
//! A whole file parses to `(Module stmt...)`.

mod error;

use gismo_ir::{Span, SyntaxNode, Token, TokenKind};
use gismo_lexer::precedence::{CALL_PRECEDENCE, CURLY_CALL_PRECEDENCE};
use gismo_stack::ensure_sufficient_stack;

pub use error::{ParseError, ParseErrorKind};

/// Parse a token stream into a `Module` node.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: Vec<Token>) -> Result<SyntaxNode, ParseError> {
    let start = tokens.first().map_or(Span::DUMMY, |t| Span::new(t.span.source, 0, 0));
    let mut parser = Parser::new(tokens);
    let statements = parser.parse_statements()?;

    let rest = parser.peek();
    if !rest.is(TokenKind::Eof) {
        return Err(parser.unexpected_here());
    }

    let module = Token::new(TokenKind::Module, "Module", start, 0);
    Ok(SyntaxNode::node(module, statements))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    eof: Token,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(Span::DUMMY, |t| {
            Span::new(t.span.source, t.span.end, t.span.end)
        });
        Parser {
            tokens,
            pos: 0,
            eof: Token::new(TokenKind::Eof, "", end, 0),
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    /// Consume the current token. `Eof` is never consumed.
    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is(TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn unexpected_here(&self) -> ParseError {
        let token = self.peek();
        let text = match token.kind {
            TokenKind::Identifier | TokenKind::Operator | TokenKind::Number | TokenKind::String => {
                token.text.as_str()
            }
            _ => "",
        };
        ParseError::unexpected(token.kind, text, token.span)
    }

    /// Statements separated by newlines; empty statements are skipped.
    fn parse_statements(&mut self) -> Result<Vec<SyntaxNode>, ParseError> {
        let mut statements = Vec::new();
        loop {
            if let Some(statement) = self.parse_expression(0)? {
                statements.push(statement);
            }
            if !self.check(TokenKind::Newline) {
                break;
            }
            self.next();
        }
        Ok(statements)
    }

    fn parse_expression(&mut self, min_precedence: u8) -> Result<Option<SyntaxNode>, ParseError> {
        ensure_sufficient_stack(|| self.parse_expression_inner(min_precedence))
    }

    fn parse_expression_inner(
        &mut self,
        min_precedence: u8,
    ) -> Result<Option<SyntaxNode>, ParseError> {
        let mut left = if self.check(TokenKind::Operator) {
            let operator = self.next();
            match self.parse_literal()? {
                Some(operand) => SyntaxNode::node(operator, vec![operand]),
                None => SyntaxNode::Leaf(operator),
            }
        } else {
            match self.parse_literal()? {
                Some(literal) => literal,
                None => return Ok(None),
            }
        };

        loop {
            let next = self.peek();
            if next.is(TokenKind::LParen) {
                if CALL_PRECEDENCE < min_precedence {
                    break;
                }
                left = self.parse_call(left)?;
                continue;
            }
            if next.is(TokenKind::LCurly) {
                if CURLY_CALL_PRECEDENCE < min_precedence {
                    break;
                }
                left = self.parse_curly_call(left)?;
                continue;
            }

            let precedence = next.precedence;
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            let operator = self.next();
            tracing::trace!(operator = %operator.text, precedence, "infix");
            left = match self.parse_expression(precedence + 1)? {
                Some(right) => SyntaxNode::node(operator, vec![left, right]),
                None => SyntaxNode::node(operator, vec![left]),
            };
        }

        Ok(Some(left))
    }

    /// `left(` ... `)`
    fn parse_call(&mut self, left: SyntaxNode) -> Result<SyntaxNode, ParseError> {
        let open = self.next().with_alias("@call");
        if self.check(TokenKind::RParen) {
            self.next();
            return Ok(SyntaxNode::node(open, vec![left]));
        }

        let Some(arguments) = self.parse_expression(0)? else {
            return Err(if self.check(TokenKind::Eof) {
                ParseError::unclosed('(', open.span, self.peek().span)
            } else {
                ParseError::expected_expression(self.peek().span)
            });
        };
        self.expect_close(TokenKind::RParen, '(', open.span)?;
        Ok(SyntaxNode::node(open, vec![left, arguments]))
    }

    /// `left{` statements `}`
    fn parse_curly_call(&mut self, left: SyntaxNode) -> Result<SyntaxNode, ParseError> {
        let open = self.next().with_alias("@callCurly");
        let mut arguments = vec![left];
        if self.check(TokenKind::RCurly) {
            self.next();
            return Ok(SyntaxNode::node(open, arguments));
        }

        arguments.extend(self.parse_statements()?);
        self.expect_close(TokenKind::RCurly, '{', open.span)?;
        Ok(SyntaxNode::node(open, arguments))
    }

    fn parse_literal(&mut self) -> Result<Option<SyntaxNode>, ParseError> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::Operator | TokenKind::String | TokenKind::Number => {
                Ok(Some(SyntaxNode::Leaf(self.next())))
            }
            TokenKind::LParen => {
                let open = self.next();
                let inner = self.parse_expression(0)?;
                self.expect_close(TokenKind::RParen, '(', open.span)?;
                Ok(inner)
            }
            TokenKind::LCurly => {
                let open = self.next().with_alias("@begin");
                let statements = self.parse_statements()?;
                self.expect_close(TokenKind::RCurly, '{', open.span)?;
                Ok(Some(SyntaxNode::node(open, statements)))
            }
            _ => Ok(None),
        }
    }

    fn expect_close(
        &mut self,
        close: TokenKind,
        open: char,
        open_span: Span,
    ) -> Result<(), ParseError> {
        if self.check(close) {
            self.next();
            Ok(())
        } else {
            Err(ParseError::unclosed(open, open_span, self.peek().span))
        }
    }
}
