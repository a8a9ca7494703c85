//! `$DEF $GET $SET $EXPORT`
//!
//! Locals live in their own namespace, apart from definitions, and are
//! keyed by the display form of the raw key expression.

use gismo_ir::Name;

use super::argument_list;
use crate::{EvalResult, Interpreter, PrimitiveCall, SignatureKey, Value};

fn local_name(raw: &Value) -> Name {
    raw.as_symbol()
        .unwrap_or_else(|| Name::intern(&raw.to_string()))
}

/// Binds a local in the calling scope, shadowing outer ones.
pub(super) fn def(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [key, value, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let value = interp.eval(value, call.scope)?;
    call.scope.define_local(local_name(key), value);
    Ok(Value::Nil)
}

pub(super) fn get(_interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let Some(key) = raw.first() else {
        return Ok(Value::Nil);
    };
    Ok(call.scope.get_local(local_name(key)))
}

/// Rebinds the nearest local with this name.
pub(super) fn set(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [key, value, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let value = interp.eval(value, call.scope)?;
    call.scope
        .set_local(local_name(key), value)
        .map_err(|err| err.with_span_opt(key.span().or(call.span)))?;
    Ok(Value::Nil)
}

/// `$EXPORT(key, value)`: both are evaluated, so a quoted key expression
/// such as `$QUOTE(x twice)` names a signature.
pub(super) fn export(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [key, value, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let key = interp.eval(key, call.scope)?;
    let value = interp.eval(value, call.scope)?;
    let key = SignatureKey::from_key_expr(&key).map_err(|err| err.with_span_opt(call.span))?;
    if !call.scope.export_definition(key, value) {
        tracing::debug!("export dropped: no scope accepts exports");
    }
    Ok(Value::Nil)
}
