use pretty_assertions::assert_eq;

use crate::{SourceId, Span, SyntaxNode, Token, TokenKind};

fn token(kind: TokenKind, text: &str, start: u32) -> Token {
    let end = start + u32::try_from(text.len()).unwrap_or(0);
    Token::new(kind, text, Span::new(SourceId::new(0), start, end), 0)
}

#[test]
fn leaf_displays_alias() {
    let paren = token(TokenKind::LParen, "(", 3).with_alias("@call");
    assert_eq!(SyntaxNode::Leaf(paren.clone()).to_string(), "@call");
    assert_eq!(paren.text, "(");
}

#[test]
fn node_displays_as_s_expression() {
    let tree = SyntaxNode::node(
        token(TokenKind::Identifier, "add", 2),
        vec![
            SyntaxNode::Leaf(token(TokenKind::Number, "2", 0)),
            SyntaxNode::Leaf(token(TokenKind::String, "three", 6)),
        ],
    );
    assert_eq!(tree.to_string(), "(add 2 \"three\")");
    assert_eq!(tree.arguments().len(), 2);
    assert_eq!(tree.span().start, 2);
}

#[test]
fn leaf_has_no_arguments() {
    let leaf = SyntaxNode::Leaf(token(TokenKind::Identifier, "x", 0));
    assert!(leaf.arguments().is_empty());
    assert_eq!(leaf.token().text, "x");
}
