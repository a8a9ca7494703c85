//! `$CAR $CDR $CONS`

use super::evaluated;
use crate::{EvalResult, Interpreter, PrimitiveCall, Value};

pub(super) fn car(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([list]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(list.as_cons().map_or(Value::Nil, |cell| cell.head.clone()))
}

pub(super) fn cdr(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([list]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(list.as_cons().map_or(Value::Nil, |cell| cell.tail.clone()))
}

/// The new cell takes the head's span, so errors raised on it point at
/// the head's source.
pub(super) fn cons(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([head, tail]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let span = head.span();
    Ok(Value::cons_at(head, tail, span))
}
