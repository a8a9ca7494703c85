//! `$VECTOR $VECTOR_GET $VECTOR_SET $VECTOR_LEN $VECTOR_RESIZE`
//!
//! Vectors are shared: every value referring to one sees writes made
//! through any other. Out-of-range indices and sizes that cannot be
//! allocated yield `nil`.

use super::evaluated;
use crate::{EvalResult, Interpreter, PrimitiveCall, Value, VectorValue};

fn as_index(value: &Value) -> Option<usize> {
    value.as_int().and_then(|n| usize::try_from(n).ok())
}

pub(super) fn create(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([len]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(as_index(&len)
        .and_then(VectorValue::with_len)
        .map_or(Value::Nil, Value::Vector))
}

pub(super) fn get(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([vector, index]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let element = match (&vector, as_index(&index)) {
        (Value::Vector(vector), Some(index)) => vector.get(index),
        _ => None,
    };
    Ok(element.unwrap_or(Value::Nil))
}

/// Yields the stored value, or `nil` when nothing was stored.
pub(super) fn set(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([vector, index, value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    match (&vector, as_index(&index)) {
        (Value::Vector(vector), Some(index)) if vector.set(index, value.clone()) => Ok(value),
        _ => Ok(Value::Nil),
    }
}

pub(super) fn len(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([vector]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(match vector {
        Value::Vector(vector) => Value::Int(i64::try_from(vector.len()).unwrap_or(i64::MAX)),
        _ => Value::Nil,
    })
}

/// Grows with `nil` slots or truncates; yields the vector.
pub(super) fn resize(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([vector, len]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    match (&vector, as_index(&len)) {
        (Value::Vector(inner), Some(len)) if inner.resize(len) => Ok(vector),
        _ => Ok(Value::Nil),
    }
}
