//! Lowering parser output into values.
//!
//! - number leaves become `Int` or `Float` by the literal's form
//! - string leaves become `Str`
//! - every other leaf becomes a symbol named by the token's alias, so a
//!   call bracket lowers to `@call`
//! - a node `op(a, b)` becomes the list `(op a b)`
//!
//! Symbols and cons cells keep the span of their token for diagnostics.

use gismo_ir::{Name, SyntaxNode, Token, TokenKind};
use gismo_stack::ensure_sufficient_stack;

use crate::{EvalError, Value};

pub fn lower(node: &SyntaxNode) -> Result<Value, EvalError> {
    ensure_sufficient_stack(|| match node {
        SyntaxNode::Leaf(token) => lower_token(token),
        SyntaxNode::Node {
            operator,
            arguments,
        } => {
            let head = lower_token(operator)?;
            let mut tail = Value::Nil;
            for argument in arguments.iter().rev() {
                tail = Value::cons(lower(argument)?, tail);
            }
            Ok(Value::cons_at(head, tail, Some(operator.span)))
        }
    })
}

fn lower_token(token: &Token) -> Result<Value, EvalError> {
    match token.kind {
        TokenKind::Number => parse_number(&token.text).ok_or_else(|| {
            EvalError::invalid_literal(token.text.as_str()).with_span(token.span)
        }),
        TokenKind::String => Ok(Value::string(&token.text)),
        _ => Ok(Value::symbol_at(Name::intern(&token.alias), Some(token.span))),
    }
}

/// `0x1F`, `0b101`, `0o17`, `42`, `1.5`, `.5`.
pub fn parse_number(text: &str) -> Option<Value> {
    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0b" | "0B") => Some(2),
        Some("0o" | "0O") => Some(8),
        _ => None,
    };
    if let Some(radix) = radix {
        return i64::from_str_radix(&text[2..], radix).ok().map(Value::Int);
    }
    if text.contains('.') {
        return text.parse::<f64>().ok().map(Value::Float);
    }
    text.parse::<i64>().ok().map(Value::Int)
}

#[cfg(test)]
mod tests {
    use gismo_diagnostic::ErrorCode;
    use gismo_ir::SourceId;
    use pretty_assertions::assert_eq;

    use super::*;

    fn lower_source(source: &str) -> Result<Value, EvalError> {
        let tokens = gismo_lexer::tokenize(source, SourceId::new(0))
            .unwrap_or_else(|e| panic!("lex error: {e}"));
        let tree = gismo_parse::parse(tokens).unwrap_or_else(|e| panic!("parse error: {e}"));
        lower(&tree)
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("42"), Some(Value::Int(42)));
        assert_eq!(parse_number("0x1F"), Some(Value::Int(31)));
        assert_eq!(parse_number("0b101"), Some(Value::Int(5)));
        assert_eq!(parse_number("0o17"), Some(Value::Int(15)));
        assert_eq!(parse_number("1.5"), Some(Value::Float(1.5)));
        assert_eq!(parse_number(".25"), Some(Value::Float(0.25)));
        assert_eq!(parse_number("0x"), None);
        assert_eq!(parse_number("99999999999999999999"), None);
    }

    #[test]
    fn program_lowers_to_module_list() {
        let program = lower_source("int add int ::= $ADD($1, $2)\n\"s\" foo 1.5")
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            program.to_string(),
            "(Module (::= (add int int) (@call $ADD (, $1 $2))) (foo s 1.5))"
        );
        assert!(program.is_form(Name::MODULE));
    }

    #[test]
    fn brackets_lower_to_form_symbols() {
        let program = lower_source("f{a}; {b}").unwrap_or_else(|e| panic!("{e}"));
        let statements: Vec<&Value> = program.iter().skip(1).collect();
        assert!(statements[0].is_form(Name::CALL_CURLY));
        assert!(statements[1].is_form(Name::BEGIN));
    }

    #[test]
    fn string_literals_stay_strings() {
        let program = lower_source("\"add\"").unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(program.nth(1), Some(&Value::string("add")));
    }

    #[test]
    fn symbols_keep_spans() {
        let program = lower_source("ab + cd").unwrap_or_else(|e| panic!("{e}"));
        let form = program.nth(1).cloned().unwrap_or(Value::Nil);
        assert_eq!(form.span().map(|s| s.start), Some(3));
        assert_eq!(form.nth(2).and_then(Value::span).map(|s| s.start), Some(5));
    }

    #[test]
    fn oversized_literal_is_an_error() {
        let err = lower_source("x ::= 0xFFFFFFFFFFFFFFFFFF").err();
        assert_eq!(err.map(|e| e.code()), Some(ErrorCode::E0003));
    }
}
