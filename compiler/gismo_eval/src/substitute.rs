//! Placeholder substitution for macro expansion.
//!
//! Expansion is not hygienic: `$1`, `$2` and `$$` are replaced by plain tree
//! rewriting, and the result is evaluated in the caller's scope. A body can
//! therefore see and bind the caller's names, which programs rely on.
//!
//! The one guard is [`SubstitutionMode::Limited`]: it leaves nested
//! signature definitions (`(::= (op a b) body)`) alone, so a macro that
//! defines another macro does not fill in the inner macro's placeholders
//! with its own operands.

use gismo_ir::Name;
use gismo_stack::ensure_sufficient_stack;

use crate::Value;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubstitutionMode {
    /// Replace every occurrence.
    Full,
    /// Skip `::=` forms whose key is a signature.
    Limited,
}

/// Copy `expr` with every symbol `target` replaced by `replacement`.
///
/// Always builds new cells; the template is reused by later expansions.
pub fn substitute(expr: &Value, target: Name, replacement: &Value, mode: SubstitutionMode) -> Value {
    ensure_sufficient_stack(|| match expr {
        Value::Symbol(symbol) if symbol.name == target => replacement.clone(),
        Value::Cons(cell) => {
            if mode == SubstitutionMode::Limited && is_signature_definition(expr) {
                return expr.clone();
            }
            Value::cons_at(
                substitute(&cell.head, target, replacement, mode),
                substitute(&cell.tail, target, replacement, mode),
                cell.span,
            )
        }
        _ => expr.clone(),
    })
}

/// `(::= key body)` where `key` is itself a cons cell.
fn is_signature_definition(expr: &Value) -> bool {
    expr.is_form(Name::DEFINE)
        && matches!(expr.nth(1), Some(Value::Cons(_)))
}

#[cfg(test)]
mod tests {
    use gismo_ir::Name;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sym(text: &str) -> Value {
        Value::symbol(Name::intern(text))
    }

    #[test]
    fn replaces_every_occurrence() {
        let body = Value::list([sym("$ADD"), sym("$1"), Value::list([sym("neg"), sym("$1")])]);
        let out = substitute(&body, Name::FIRST_OPERAND, &Value::Int(4), SubstitutionMode::Full);
        assert_eq!(out.to_string(), "($ADD 4 (neg 4))");
    }

    #[test]
    fn template_is_not_modified() {
        let body = Value::list([sym("f"), sym("$2")]);
        let before = body.to_string();
        let _ = substitute(&body, Name::SECOND_OPERAND, &Value::Int(1), SubstitutionMode::Full);
        assert_eq!(body.to_string(), before);
    }

    #[test]
    fn limited_mode_skips_nested_signatures() {
        // inner ::= (x neg) ::= $1
        let inner = Value::list([
            sym("::="),
            Value::list([sym("neg"), sym("x")]),
            sym("$1"),
        ]);
        let body = Value::list([sym("@begin"), inner, sym("$1")]);

        let limited =
            substitute(&body, Name::FIRST_OPERAND, &Value::Int(7), SubstitutionMode::Limited);
        assert_eq!(limited.to_string(), "(@begin (::= (neg x) $1) 7)");

        let full = substitute(&body, Name::FIRST_OPERAND, &Value::Int(7), SubstitutionMode::Full);
        assert_eq!(full.to_string(), "(@begin (::= (neg x) 7) 7)");
    }

    #[test]
    fn limited_mode_still_enters_variable_definitions() {
        let body = Value::list([sym("::="), sym("y"), sym("$1")]);
        let out = substitute(&body, Name::FIRST_OPERAND, &Value::Int(3), SubstitutionMode::Limited);
        assert_eq!(out.to_string(), "(::= y 3)");
    }

    #[test]
    fn improper_tails_are_substituted() {
        let dotted = Value::cons(sym("$1"), sym("$1"));
        let out = substitute(&dotted, Name::FIRST_OPERAND, &Value::Int(0), SubstitutionMode::Full);
        assert_eq!(out.to_string(), "(0 . 0)");
    }
}
