//! Callable values: primitives and closures.

use std::fmt;
use std::rc::Rc;

use gismo_ir::{Name, Span};

use super::Value;
use crate::{EvalResult, Interpreter, ScopeRef};

/// Signature of a primitive.
///
/// A primitive receives its argument tree unevaluated and decides itself
/// what to evaluate, in which order, and how often.
pub type PrimitiveFn = fn(&mut Interpreter, PrimitiveCall<'_>) -> EvalResult;

/// Everything a primitive sees of its call site.
#[derive(Copy, Clone)]
pub struct PrimitiveCall<'a> {
    /// The raw argument tree (`Nil` for `f()`).
    pub args: &'a Value,
    /// The scope the call appears in.
    pub scope: &'a ScopeRef,
    /// The call bracket.
    pub span: Option<Span>,
}

#[derive(Copy, Clone)]
pub struct Primitive {
    pub name: &'static str,
    pub func: PrimitiveFn,
}

/// A closure made by `$LAMBDA`.
pub struct Closure {
    pub param: Name,
    pub body: Value,
    /// The scope `$LAMBDA` was evaluated in. The body runs there.
    pub scope: ScopeRef,
}

#[derive(Clone)]
pub enum Callable {
    Primitive(Primitive),
    Closure(Rc<Closure>),
}

impl Callable {
    pub fn closure(param: Name, body: Value, scope: ScopeRef) -> Self {
        Callable::Closure(Rc::new(Closure { param, body, scope }))
    }

    /// Name shown in the display form.
    pub fn name(&self) -> &'static str {
        match self {
            Callable::Primitive(primitive) => primitive.name,
            Callable::Closure(_) => "COMPOSED",
        }
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callable::Primitive(a), Callable::Primitive(b)) => a.name == b.name,
            (Callable::Closure(a), Callable::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@builtin:{}", self.name())
    }
}
