//! Gismo Eval - the dispatch-and-substitution runtime.
//!
//! Programs are values: the driver lowers a parse tree into cons cells
//! ([`lower`]) and hands the resulting `(Module ...)` list to an
//! [`Interpreter`].
//!
//! # Architecture
//!
//! - `Value`: the closed value model, shared through `Rc`
//! - `SignatureKey`: structured keys of the definitions table
//! - `ScopeRef`: scope chain holding definitions and locals
//! - `dispatch`: picks a definition by the type tags of the operands
//! - `substitute`: non-hygienic replacement of `$1`, `$2` and `$$`
//! - `primitives`: the `$NAME` builtins
//!
//! Everything here is single-threaded. Printing and file output go through
//! handles the driver passes to [`InterpreterBuilder`].

mod dispatch;
mod errors;
mod interpreter;
pub mod loader;
mod lower;
pub mod output;
pub mod primitives;
pub mod print_handler;
mod scope;
mod signature;
mod substitute;
mod value;

#[cfg(test)]
mod test_helpers;

pub use dispatch::{resolve_for_tag, suggest_signatures, type_tags};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use loader::{ModuleLoader, NoModuleLoader};
pub use lower::{lower, parse_number};
pub use output::{OutputSink, SharedBuffer};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use scope::{LocalScope, Scope, ScopeDump, ScopeRef};
pub use signature::{SignatureKey, TypePattern};
pub use substitute::{substitute, SubstitutionMode};
pub use value::{
    Callable, Closure, Cons, ListIter, Primitive, PrimitiveCall, PrimitiveFn, Symbol, TypedValue,
    Value, VectorValue,
};
