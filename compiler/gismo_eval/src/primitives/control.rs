//! `$IF $WHILE $FOREACH`
//!
//! Branches and loop bodies stay raw until chosen.

use super::argument_list;
use crate::substitute::{substitute, SubstitutionMode};
use crate::{EvalResult, Interpreter, PrimitiveCall, Value};

pub(super) fn if_(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [condition, then, otherwise, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let branch = if interp.eval(condition, call.scope)?.is_nil() {
        otherwise
    } else {
        then
    };
    interp.eval(branch, call.scope)
}

pub(super) fn while_(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [condition, body, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    while !interp.eval(condition, call.scope)?.is_nil() {
        interp.eval(body, call.scope)?;
    }
    Ok(Value::Nil)
}

/// `$FOREACH(collection, var, body)`: `var` names the symbol replaced by
/// each element in a fresh copy of `body`.
pub(super) fn foreach(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [collection, variable, body, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let collection = interp.eval(collection, call.scope)?;
    let Some(variable) = interp.eval(variable, call.scope)?.as_symbol() else {
        return Ok(Value::Nil);
    };

    let elements: Vec<Value> = match &collection {
        Value::Vector(vector) => vector.to_vec(),
        Value::Cons(_) => collection.iter().cloned().collect(),
        Value::Str(text) => text.bytes().map(|b| Value::Int(i64::from(b))).collect(),
        _ => Vec::new(),
    };
    tracing::trace!(count = elements.len(), "foreach");

    for element in &elements {
        let instance = substitute(body, variable, element, SubstitutionMode::Limited);
        interp.eval(&instance, call.scope)?;
    }
    Ok(Value::Nil)
}
