//! `$QUOTE $EVAL $LAMBDA $REPLACE $FLATTEN $RAISE $NIL $IOTA $ISOLATE`

use gismo_ir::Name;

use super::{argument_list, evaluated};
use crate::substitute::{substitute, SubstitutionMode};
use crate::{Callable, EvalError, EvalResult, Interpreter, PrimitiveCall, Value, VectorValue};

const DEFAULT_RAISE_MESSAGE: &str = "An error occurred";

/// The argument tree exactly as written, separators included.
pub(super) fn quote(_interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    Ok(call.args.clone())
}

pub(super) fn eval(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([code]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    interp.eval(&code, call.scope)
}

/// `$LAMBDA(param, body)` closes over the calling scope.
pub(super) fn lambda(_interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [param, body, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let Some(param) = param.as_symbol() else {
        return Ok(Value::Nil);
    };
    Ok(Value::Callable(Callable::closure(
        param,
        body.clone(),
        call.scope.clone(),
    )))
}

/// `$REPLACE(expr, sym, replacement)`, reaching inside definitions too.
pub(super) fn replace(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let [expr, target, replacement, ..] = raw.as_slice() else {
        return Ok(Value::Nil);
    };
    let expr = interp.eval(expr, call.scope)?;
    let replacement = interp.eval(replacement, call.scope)?;
    let Some(target) = target.as_symbol() else {
        return Ok(Value::Nil);
    };
    Ok(substitute(&expr, target, &replacement, SubstitutionMode::Full))
}

pub(super) fn flatten(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([tree, separator]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let separator = Name::intern(&separator.to_string());
    Ok(Value::Vector(VectorValue::from_vec(super::flatten(
        &tree, separator,
    ))))
}

/// `$RAISE(target, message)`: a fatal error pointing at the unevaluated
/// target.
pub(super) fn raise(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let raw = argument_list(call.args);
    let Some(target) = raw.first() else {
        return Ok(Value::Nil);
    };
    let message = match raw.get(1) {
        Some(message) => interp.eval(message, call.scope)?.to_string(),
        None => DEFAULT_RAISE_MESSAGE.to_owned(),
    };
    Err(EvalError::raised(message).with_span_opt(target.span().or(call.span)))
}

pub(super) fn nil(_interp: &mut Interpreter, _call: PrimitiveCall<'_>) -> EvalResult {
    Ok(Value::Nil)
}

pub(super) fn iota(interp: &mut Interpreter, _call: PrimitiveCall<'_>) -> EvalResult {
    Ok(Value::Int(interp.next_iota()))
}

/// Evaluate the argument tree where only primitives are visible.
pub(super) fn isolate(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let scope = interp.builtin_scope();
    interp.eval(call.args, &scope)
}
