//! `$CAT $CHAR $STRLEN $STR $SYMCAT`
//!
//! These work on display forms, so `$CAT(1, x)` is `"1x"`. Indexing and
//! length count UTF-8 bytes.

use gismo_ir::Name;

use super::{argument_list, evaluated};
use crate::{EvalResult, Interpreter, PrimitiveCall, Value};

pub(super) fn cat(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([left, right]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(Value::string(&format!("{left}{right}")))
}

/// Byte at an index, as an int.
pub(super) fn char_at(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([text, index]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let byte = index
        .as_int()
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| text.to_string().as_bytes().get(i).copied());
    Ok(byte.map_or(Value::Nil, |b| Value::Int(i64::from(b))))
}

/// Byte length of the display form; `0` without an argument.
pub(super) fn len(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    if argument_list(call.args).is_empty() {
        return Ok(Value::Int(0));
    }
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    Ok(Value::Int(
        i64::try_from(value.to_string().len()).unwrap_or(i64::MAX),
    ))
}

/// One-character string from a code point.
pub(super) fn from_code(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([code]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let ch = code
        .as_int()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(char::from_u32);
    Ok(ch.map_or(Value::Nil, |c| Value::string(c.encode_utf8(&mut [0; 4]))))
}

pub(super) fn symcat(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([left, right]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let name = Name::intern(&format!("{left}{right}"));
    Ok(Value::symbol_at(name, left.span()))
}
