//! `$EQUALS $GREATER $TYPEDEF $TYPEOF $UNTYPE $UNION`

use gismo_ir::Name;

use super::{argument_list, evaluated};
use crate::{EvalResult, Interpreter, PrimitiveCall, Value};

/// Equal display forms.
pub(super) fn equals(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([left, right]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(Value::truth(left.to_string() == right.to_string()))
}

/// Ints only; anything else is false.
pub(super) fn greater(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([left, right]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(match (left, right) {
        (Value::Int(a), Value::Int(b)) => Value::truth(a > b),
        _ => Value::Nil,
    })
}

fn tag_of(raw: &Value) -> Name {
    raw.as_symbol()
        .unwrap_or_else(|| Name::intern(&raw.to_string()))
}

/// `$TYPEDEF(value, Tag, Fallback...)`. Only the value is evaluated.
pub(super) fn typedef(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [value, primary, fallbacks @ ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let inner = interp.eval(value, call.scope)?;
    Ok(Value::typed(
        inner,
        tag_of(primary),
        fallbacks.iter().map(tag_of).collect(),
    ))
}

/// Whether the value's tag, or any fallback of a typed value, is `Tag`.
pub(super) fn type_of(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [value, tag, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let value = interp.eval(value, call.scope)?;
    let tag = tag_of(tag);
    let matches = match &value {
        Value::Typed(typed) => typed.has_tag(tag),
        other => other.type_tag() == tag,
    };
    Ok(Value::truth(matches))
}

pub(super) fn untype(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(match value {
        Value::Typed(typed) => typed.inner.clone(),
        _ => Value::Nil,
    })
}

pub(super) fn union(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let alternatives = argument_list(call.args)
        .iter()
        .map(|arg| interp.eval(arg, call.scope))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::union(alternatives))
}
