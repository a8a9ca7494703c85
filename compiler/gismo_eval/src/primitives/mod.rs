//! Primitive library.
//!
//! Every primitive receives its argument tree raw. A call `$F(a, b, c)`
//! passes `(, (, a b) c)`, which [`argument_list`] flattens back into
//! `[a, b, c]`. Primitives then evaluate what they need, so `$IF` and
//! `$WHILE` can skip or repeat their operands.
//!
//! Missing arguments are not an error: a primitive called with fewer
//! arguments than it needs yields `nil`.

mod arithmetic;
mod bindings;
mod control;
mod io;
mod lists;
mod meta;
mod strings;
mod types;
mod vectors;

use gismo_ir::Name;
use smallvec::SmallVec;

use crate::{EvalError, Interpreter, Primitive, PrimitiveCall, Value};

/// Every primitive, registered in builtin scopes under its name.
pub const PRIMITIVES: &[Primitive] = &[
    // Arithmetic
    Primitive { name: "$ADD", func: arithmetic::add },
    Primitive { name: "$SUB", func: arithmetic::sub },
    Primitive { name: "$MUL", func: arithmetic::mul },
    Primitive { name: "$DIV", func: arithmetic::div },
    Primitive { name: "$MOD", func: arithmetic::rem },
    Primitive { name: "$INT", func: arithmetic::to_int },
    // Bitwise
    Primitive { name: "$BWA", func: arithmetic::bit_and },
    Primitive { name: "$BWO", func: arithmetic::bit_or },
    Primitive { name: "$SHL", func: arithmetic::shift_left },
    Primitive { name: "$SHR", func: arithmetic::shift_right },
    // Lists
    Primitive { name: "$CAR", func: lists::car },
    Primitive { name: "$CDR", func: lists::cdr },
    Primitive { name: "$CONS", func: lists::cons },
    // Strings
    Primitive { name: "$CAT", func: strings::cat },
    Primitive { name: "$CHAR", func: strings::char_at },
    Primitive { name: "$STRLEN", func: strings::len },
    Primitive { name: "$STR", func: strings::from_code },
    Primitive { name: "$SYMCAT", func: strings::symcat },
    // Vectors
    Primitive { name: "$VECTOR", func: vectors::create },
    Primitive { name: "$VECTOR_GET", func: vectors::get },
    Primitive { name: "$VECTOR_SET", func: vectors::set },
    Primitive { name: "$VECTOR_LEN", func: vectors::len },
    Primitive { name: "$VECTOR_RESIZE", func: vectors::resize },
    // Comparison
    Primitive { name: "$EQUALS", func: types::equals },
    Primitive { name: "$GREATER", func: types::greater },
    // Types
    Primitive { name: "$TYPEDEF", func: types::typedef },
    Primitive { name: "$TYPEOF", func: types::type_of },
    Primitive { name: "$UNTYPE", func: types::untype },
    Primitive { name: "$UNION", func: types::union },
    // Control flow
    Primitive { name: "$IF", func: control::if_ },
    Primitive { name: "$WHILE", func: control::while_ },
    Primitive { name: "$FOREACH", func: control::foreach },
    // Bindings
    Primitive { name: "$DEF", func: bindings::def },
    Primitive { name: "$GET", func: bindings::get },
    Primitive { name: "$SET", func: bindings::set },
    Primitive { name: "$EXPORT", func: bindings::export },
    // I/O
    Primitive { name: "$PRINT", func: io::print },
    Primitive { name: "$PRINTLN", func: io::println },
    Primitive { name: "$WRITE", func: io::write },
    Primitive { name: "$WRITEB", func: io::write_byte },
    Primitive { name: "$SCOPE", func: io::scope },
    Primitive { name: "$LOAD", func: io::load },
    // Meta
    Primitive { name: "$QUOTE", func: meta::quote },
    Primitive { name: "$EVAL", func: meta::eval },
    Primitive { name: "$LAMBDA", func: meta::lambda },
    Primitive { name: "$REPLACE", func: meta::replace },
    Primitive { name: "$FLATTEN", func: meta::flatten },
    Primitive { name: "$RAISE", func: meta::raise },
    Primitive { name: "$NIL", func: meta::nil },
    Primitive { name: "$IOTA", func: meta::iota },
    Primitive { name: "$ISOLATE", func: meta::isolate },
];

/// Leaves of `tree` split on every `(separator ...)` form, left to right.
pub fn flatten(tree: &Value, separator: Name) -> Vec<Value> {
    let mut leaves = Vec::new();
    if !tree.is_nil() {
        flatten_into(tree, separator, &mut leaves);
    }
    leaves
}

fn flatten_into(tree: &Value, separator: Name, leaves: &mut Vec<Value>) {
    if tree.is_form(separator) {
        for part in tree.iter().skip(1) {
            flatten_into(part, separator, leaves);
        }
    } else {
        leaves.push(tree.clone());
    }
}

/// Raw arguments of a call, split on `,`.
pub fn argument_list(args: &Value) -> SmallVec<[Value; 4]> {
    flatten(args, Name::COMMA).into()
}

/// Evaluate the first `N` arguments, left to right.
///
/// `None` when fewer than `N` were passed.
pub(crate) fn evaluated<const N: usize>(
    interp: &mut Interpreter,
    call: &PrimitiveCall<'_>,
) -> Result<Option<[Value; N]>, EvalError> {
    let raw = argument_list(call.args);
    if raw.len() < N {
        return Ok(None);
    }
    let mut values: [Value; N] = std::array::from_fn(|_| Value::Nil);
    for (slot, arg) in values.iter_mut().zip(&raw) {
        *slot = interp.eval(arg, call.scope)?;
    }
    Ok(Some(values))
}

#[cfg(test)]
mod tests;
