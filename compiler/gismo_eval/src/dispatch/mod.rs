//! Type-directed signature dispatch.
//!
//! An operator form `(op a)` or `(op a b)` is resolved against the
//! definitions table by the type tags of its operands:
//!
//! 1. Evaluate the left operand and list its candidate tags
//!    ([`type_tags`]).
//! 2. Binary only: for each left tag, look for `op tag *`. A hit runs the
//!    body with the right operand still unevaluated, which is how
//!    short-circuiting and quoting operators are written.
//! 3. Otherwise evaluate the right operand and try every (left, right) tag
//!    pair in order.
//!
//! Tags are tried in priority order and, for each tag, the whole scope
//! chain is searched before the next tag is considered. The matched body is
//! expanded by substituting `$1`, `$2` and `$$`, then evaluated in the
//! calling scope.

mod suggest;

use gismo_ir::{Name, Span};
use smallvec::SmallVec;

use crate::substitute::{substitute, SubstitutionMode};
use crate::{EvalError, EvalResult, Interpreter, ScopeRef, SignatureKey, TypePattern, Value};

pub use suggest::suggest_signatures;

/// Candidate tags of `value`, most specific first.
///
/// - typed wrapper: primary tag, then fallbacks in declared order
/// - union: `Union`, then the tags of each alternative in order
/// - anything else: its single type tag
pub fn type_tags(value: &Value) -> SmallVec<[Name; 4]> {
    let mut tags = SmallVec::new();
    collect_tags(value, &mut tags);
    tags
}

fn collect_tags(value: &Value, tags: &mut SmallVec<[Name; 4]>) {
    match value {
        Value::Typed(typed) => tags.extend(typed.tags()),
        Value::Union(alternatives) => {
            tags.push(Name::UNION);
            for alternative in alternatives.iter() {
                collect_tags(alternative, tags);
            }
        }
        other => tags.push(other.type_tag()),
    }
}

/// The part of `value` that carries `tag`.
///
/// A typed wrapper yields its inner value; a union yields itself for
/// `Union` or else the first alternative carrying the tag.
pub fn resolve_for_tag(value: &Value, tag: Name) -> Option<Value> {
    match value {
        Value::Typed(typed) => typed.has_tag(tag).then(|| typed.inner.clone()),
        Value::Union(alternatives) => {
            if tag == Name::UNION {
                return Some(value.clone());
            }
            alternatives
                .iter()
                .find_map(|alternative| resolve_for_tag(alternative, tag))
        }
        other => (other.type_tag() == tag).then(|| other.clone()),
    }
}

fn resolve_or_self(value: &Value, tag: Name) -> Value {
    resolve_for_tag(value, tag).unwrap_or_else(|| value.clone())
}

impl Interpreter {
    /// Dispatch `(operator operand)` with the operand already evaluated.
    #[tracing::instrument(level = "trace", skip_all, fields(operator = %operator))]
    pub fn dispatch_unary(
        &mut self,
        operator: Name,
        operand: Value,
        span: Option<Span>,
        scope: &ScopeRef,
    ) -> EvalResult {
        for tag in type_tags(&operand) {
            let key = SignatureKey::unary(operator, tag);
            if let Some(body) = scope.find_definition(&key) {
                tracing::debug!(signature = %key, "matched");
                let resolved = resolve_or_self(&operand, tag);
                let whole = Value::form(operator, [resolved.clone()], span);
                return self.expand(&body, resolved, Value::Nil, whole, scope);
            }
        }

        let operand_types = vec![operand.type_tag()];
        let suggestions = suggest_signatures(scope, operator, &operand_types);
        Err(EvalError::no_matching_signature(operator, operand_types, suggestions).with_span_opt(span))
    }

    /// Dispatch `(operator left raw_right)` with `left` already evaluated.
    ///
    /// `raw_right` is only evaluated when no wildcard signature matches.
    #[tracing::instrument(level = "trace", skip_all, fields(operator = %operator))]
    pub fn dispatch_binary(
        &mut self,
        operator: Name,
        left: Value,
        raw_right: &Value,
        span: Option<Span>,
        scope: &ScopeRef,
    ) -> EvalResult {
        let left_tags = type_tags(&left);

        for &tag in &left_tags {
            let key = SignatureKey::binary(operator, tag, TypePattern::Any);
            tracing::trace!(signature = %key, "wildcard probe");
            if let Some(body) = scope.find_definition(&key) {
                tracing::debug!(signature = %key, "matched");
                let resolved = resolve_or_self(&left, tag);
                let whole = Value::form(operator, [resolved.clone(), raw_right.clone()], span);
                return self.expand(&body, resolved, raw_right.clone(), whole, scope);
            }
        }

        let right = self.eval(raw_right, scope)?;
        let right_tags = type_tags(&right);

        for &left_tag in &left_tags {
            for &right_tag in &right_tags {
                let key = SignatureKey::binary(operator, left_tag, TypePattern::Tag(right_tag));
                if let Some(body) = scope.find_definition(&key) {
                    tracing::debug!(signature = %key, "matched");
                    let resolved_left = resolve_or_self(&left, left_tag);
                    let resolved_right = resolve_or_self(&right, right_tag);
                    let whole = Value::form(
                        operator,
                        [resolved_left.clone(), resolved_right.clone()],
                        span,
                    );
                    return self.expand(&body, resolved_left, resolved_right, whole, scope);
                }
            }
        }

        let operand_types = vec![left.type_tag(), right.type_tag()];
        let suggestions = suggest_signatures(scope, operator, &operand_types);
        Err(EvalError::no_matching_signature(operator, operand_types, suggestions).with_span_opt(span))
    }

    /// Substitute the operands into a macro body and evaluate it in the
    /// calling scope.
    fn expand(
        &mut self,
        body: &Value,
        first: Value,
        second: Value,
        whole: Value,
        scope: &ScopeRef,
    ) -> EvalResult {
        let body = substitute(body, Name::FIRST_OPERAND, &first, SubstitutionMode::Limited);
        let body = substitute(&body, Name::SECOND_OPERAND, &second, SubstitutionMode::Limited);
        let body = substitute(&body, Name::WHOLE_FORM, &whole, SubstitutionMode::Limited);
        self.eval(&body, scope)
    }
}
