//! Parser output.

use std::fmt;

use crate::{Span, Token, TokenKind};

/// A parsed tree: either a bare token or an operator token applied to
/// argument subtrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxNode {
    Leaf(Token),
    Node {
        operator: Token,
        arguments: Vec<SyntaxNode>,
    },
}

impl SyntaxNode {
    pub fn node(operator: Token, arguments: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Node {
            operator,
            arguments,
        }
    }

    /// The leaf token, or the operator token of an interior node.
    pub fn token(&self) -> &Token {
        match self {
            SyntaxNode::Leaf(token) | SyntaxNode::Node {
                operator: token, ..
            } => token,
        }
    }

    pub fn span(&self) -> Span {
        self.token().span
    }

    pub fn arguments(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Leaf(_) => &[],
            SyntaxNode::Node { arguments, .. } => arguments,
        }
    }
}

/// S-expression rendering using token aliases; string literals are quoted.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn leaf(f: &mut fmt::Formatter<'_>, token: &Token) -> fmt::Result {
            if token.is(TokenKind::String) {
                write!(f, "{:?}", token.alias)
            } else {
                f.write_str(&token.alias)
            }
        }

        match self {
            SyntaxNode::Leaf(token) => leaf(f, token),
            SyntaxNode::Node {
                operator,
                arguments,
            } => {
                f.write_str("(")?;
                leaf(f, operator)?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests;
