//! `$ADD $SUB $MUL $DIV $MOD $INT $BWA $BWO $SHL $SHR`

use super::evaluated;
use crate::{EvalError, EvalResult, Interpreter, PrimitiveCall, Value};

#[expect(
    clippy::cast_precision_loss,
    reason = "int operands are promoted to float as in any mixed arithmetic"
)]
fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Int(n) => Some(*n as f64),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

/// Integer arithmetic when both sides are ints, float arithmetic when
/// either is a float, `nil` otherwise.
fn numeric(
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Value::Int(int_op(*a, *b));
    }
    match (as_float(left), as_float(right)) {
        (Some(a), Some(b)) => Value::Float(float_op(a, b)),
        _ => Value::Nil,
    }
}

fn numeric_primitive(
    interp: &mut Interpreter,
    call: &PrimitiveCall<'_>,
    int_op: fn(i64, i64) -> i64,
    float_op: fn(f64, f64) -> f64,
) -> EvalResult {
    let Some([left, right]) = evaluated(interp, call)? else {
        return Ok(Value::Nil);
    };
    Ok(numeric(&left, &right, int_op, float_op))
}

pub(super) fn add(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    numeric_primitive(interp, &call, i64::wrapping_add, |a, b| a + b)
}

pub(super) fn sub(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    numeric_primitive(interp, &call, i64::wrapping_sub, |a, b| a - b)
}

pub(super) fn mul(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    numeric_primitive(interp, &call, i64::wrapping_mul, |a, b| a * b)
}

pub(super) fn div(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([left, right]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    if let (Value::Int(_), Value::Int(0)) = (&left, &right) {
        return Err(EvalError::division_by_zero().with_span_opt(call.span));
    }
    Ok(numeric(&left, &right, i64::wrapping_div, |a, b| a / b))
}

/// Integer-only operation; `nil` unless both sides are ints.
fn integer_primitive(
    interp: &mut Interpreter,
    call: &PrimitiveCall<'_>,
    op: impl FnOnce(i64, i64) -> Result<i64, EvalError>,
) -> EvalResult {
    let Some([left, right]) = evaluated(interp, call)? else {
        return Ok(Value::Nil);
    };
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => op(a, b).map(Value::Int),
        _ => Ok(Value::Nil),
    }
}

pub(super) fn rem(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let span = call.span;
    integer_primitive(interp, &call, |a, b| {
        if b == 0 {
            Err(EvalError::modulo_by_zero().with_span_opt(span))
        } else {
            Ok(a.wrapping_rem(b))
        }
    })
}

pub(super) fn bit_and(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    integer_primitive(interp, &call, |a, b| Ok(a & b))
}

pub(super) fn bit_or(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    integer_primitive(interp, &call, |a, b| Ok(a | b))
}

/// Shifting by 64 or more (or by a negative amount) shifts every bit out.
pub(super) fn shift_left(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    integer_primitive(interp, &call, |a, b| {
        Ok(u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shl(shift))
            .unwrap_or(0))
    })
}

/// Arithmetic shift; out-of-range amounts leave only the sign.
pub(super) fn shift_right(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    integer_primitive(interp, &call, |a, b| {
        Ok(u32::try_from(b)
            .ok()
            .and_then(|shift| a.checked_shr(shift))
            .unwrap_or(if a < 0 { -1 } else { 0 }))
    })
}

pub(super) fn to_int(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(match value {
        Value::Int(n) => Value::Int(n),
        Value::Float(x) => Value::Int(truncate(x)),
        Value::Str(text) => leading_integer(&text).map_or(Value::Nil, Value::Int),
        _ => Value::Nil,
    })
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float to int conversion truncates and saturates"
)]
fn truncate(x: f64) -> i64 {
    x as i64
}

/// A signed decimal at the start of `text`, after leading whitespace.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(|c: char| c == '+' || c == '-'));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}
