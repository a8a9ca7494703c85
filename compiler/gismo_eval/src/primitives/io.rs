//! `$PRINT $PRINTLN $WRITE $WRITEB $SCOPE $LOAD`

use gismo_ir::Name;

use super::evaluated;
use crate::{EvalResult, Interpreter, PrimitiveCall, Value};

pub(super) fn print(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    interp.print_handler().print(&value.to_string());
    Ok(Value::Nil)
}

/// Without an argument, prints an empty line.
pub(super) fn println(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let line = match evaluated::<1>(interp, &call)? {
        Some([value]) => value.to_string(),
        None => String::new(),
    };
    interp.print_handler().println(&line);
    Ok(Value::Nil)
}

pub(super) fn write(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    interp
        .output()
        .write(value.to_string().as_bytes())
        .map_err(|err| err.with_span_opt(call.span))?;
    Ok(Value::Nil)
}

/// Low eight bits of an int.
pub(super) fn write_byte(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([value]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    if let Some(n) = value.as_int() {
        interp
            .output()
            .write(&n.to_le_bytes()[..1])
            .map_err(|err| err.with_span_opt(call.span))?;
    }
    Ok(Value::Nil)
}

pub(super) fn scope(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let dump = call.scope.dump(interp.colors()).to_string();
    interp.print_handler().println(&dump);
    Ok(Value::Nil)
}

/// Run another file's statements in the calling scope.
///
/// The lowered program is cached by canonical path and evaluated again on
/// every load. Paths that do not resolve and unreadable files yield `nil`.
#[tracing::instrument(level = "debug", skip_all)]
pub(super) fn load(interp: &mut Interpreter, call: PrimitiveCall<'_>) -> EvalResult {
    let Some([path]) = evaluated(interp, &call)? else {
        return Ok(Value::Nil);
    };
    let Ok(canonical) = std::fs::canonicalize(path.to_string()) else {
        tracing::debug!(path = %path, "unresolved load path");
        return Ok(Value::Nil);
    };

    let program = match interp.cached_program(&canonical) {
        Some(program) => program,
        None => {
            let loaded = interp
                .loader()
                .load(&canonical)
                .map_err(|err| err.with_span_opt(call.span))?;
            let Some(program) = loaded else {
                tracing::debug!(path = %canonical.display(), "unreadable module");
                return Ok(Value::Nil);
            };
            interp.cache_program(canonical.clone(), program.clone());
            program
        }
    };
    tracing::debug!(path = %canonical.display(), "loading module");

    if program.is_form(Name::MODULE) {
        for statement in program.iter().skip(1) {
            interp.eval(statement, call.scope)?;
        }
    } else {
        interp.eval(&program, call.scope)?;
    }
    Ok(Value::Nil)
}
