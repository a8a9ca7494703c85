//! Runtime values.
//!
//! `Value` is the closed set of data the evaluator works on. Programs are
//! values too: the parser's tree is lowered into symbols and cons cells
//! before evaluation, and macro bodies are stored as raw cons trees.
//!
//! Everything except vector slots is immutable once built. Interior variants
//! share ownership through `Rc`, so cloning a value is cheap and tree
//! rewriting builds new cells instead of touching old ones.

mod callable;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use gismo_ir::{Name, Span};
use smallvec::SmallVec;

pub use callable::{Callable, Closure, Primitive, PrimitiveCall, PrimitiveFn};

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Symbol(Symbol),
    /// The empty marker. Terminates proper lists and is the only falsy value.
    Nil,
    Cons(Rc<Cons>),
    Vector(VectorValue),
    Typed(Rc<TypedValue>),
    Union(Rc<[Value]>),
    Callable(Callable),
}

/// A name used as a variable reference or as operator text.
///
/// The span is where the symbol was written, when it came from source.
/// Equality ignores it.
#[derive(Copy, Clone, Debug)]
pub struct Symbol {
    pub name: Name,
    pub span: Option<Span>,
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

/// A cons cell. `span` points at the operator token of the form it was
/// lowered from, if any.
pub struct Cons {
    pub head: Value,
    pub tail: Value,
    pub span: Option<Span>,
}

/// A value annotated with a primary type tag and ordered fallback tags.
pub struct TypedValue {
    pub inner: Value,
    pub primary: Name,
    pub fallbacks: SmallVec<[Name; 2]>,
}

impl TypedValue {
    /// Primary tag first, then fallbacks in declared order.
    pub fn tags(&self) -> impl Iterator<Item = Name> + '_ {
        std::iter::once(self.primary).chain(self.fallbacks.iter().copied())
    }

    pub fn has_tag(&self, tag: Name) -> bool {
        self.tags().any(|t| t == tag)
    }
}

/// A vector with replaceable slots. Clones share storage.
#[derive(Clone)]
pub struct VectorValue(Rc<RefCell<Vec<Value>>>);

impl VectorValue {
    /// A vector of `len` empty slots, or `None` when the slots cannot be
    /// allocated.
    pub fn with_len(len: usize) -> Option<Self> {
        let mut elements = Vec::new();
        elements.try_reserve_exact(len).ok()?;
        elements.resize(len, Value::Nil);
        Some(VectorValue::from_vec(elements))
    }

    pub fn from_vec(elements: Vec<Value>) -> Self {
        VectorValue(Rc::new(RefCell::new(elements)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replace a slot. Returns `false` when `index` is out of bounds.
    pub fn set(&self, index: usize, value: Value) -> bool {
        match self.0.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Grow with empty slots or truncate. Returns `false` and leaves the
    /// vector untouched when growing cannot allocate.
    pub fn resize(&self, len: usize) -> bool {
        let mut elements = self.0.borrow_mut();
        if let Some(extra) = len.checked_sub(elements.len()) {
            if elements.try_reserve_exact(extra).is_err() {
                return false;
            }
        }
        elements.resize(len, Value::Nil);
        true
    }

    /// Copy of the current elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Construction

impl Value {
    pub fn string(text: &str) -> Self {
        Value::Str(Rc::from(text))
    }

    pub fn symbol(name: Name) -> Self {
        Value::Symbol(Symbol { name, span: None })
    }

    pub fn symbol_at(name: Name, span: Option<Span>) -> Self {
        Value::Symbol(Symbol { name, span })
    }

    pub fn cons(head: Value, tail: Value) -> Self {
        Value::cons_at(head, tail, None)
    }

    pub fn cons_at(head: Value, tail: Value, span: Option<Span>) -> Self {
        Value::Cons(Rc::new(Cons { head, tail, span }))
    }

    /// A proper list of `elements`.
    pub fn list(elements: impl IntoIterator<Item = Value>) -> Self {
        let elements: Vec<Value> = elements.into_iter().collect();
        elements
            .into_iter()
            .rev()
            .fold(Value::Nil, |tail, head| Value::cons(head, tail))
    }

    /// `(head args...)` with the head symbol and the outer cell at `span`.
    pub fn form(head: Name, args: impl IntoIterator<Item = Value>, span: Option<Span>) -> Self {
        let args = Value::list(args);
        Value::cons_at(Value::symbol_at(head, span), args, span)
    }

    pub fn typed(inner: Value, primary: Name, fallbacks: SmallVec<[Name; 2]>) -> Self {
        Value::Typed(Rc::new(TypedValue {
            inner,
            primary,
            fallbacks,
        }))
    }

    pub fn union(alternatives: Vec<Value>) -> Self {
        Value::Union(Rc::from(alternatives))
    }

    /// `1` for true, the empty marker for false.
    pub fn truth(condition: bool) -> Self {
        if condition {
            Value::Int(1)
        } else {
            Value::Nil
        }
    }
}

// Inspection

impl Value {
    /// The dispatch tag of this value.
    pub fn type_tag(&self) -> Name {
        match self {
            Value::Int(_) => Name::INT,
            Value::Float(_) => Name::FLOAT,
            Value::Str(_) => Name::STRING,
            Value::Symbol(_) => Name::SYMBOL,
            Value::Nil => Name::NIL,
            Value::Cons(_) => Name::CONS_CELL,
            Value::Vector(_) => Name::VECTOR,
            Value::Typed(typed) => typed.primary,
            Value::Union(_) => Name::UNION,
            Value::Callable(_) => Name::BUILTIN,
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_symbol(&self) -> Option<Name> {
        match self {
            Value::Symbol(symbol) => Some(symbol.name),
            _ => None,
        }
    }

    pub fn as_cons(&self) -> Option<&Cons> {
        match self {
            Value::Cons(cell) => Some(cell),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is a cons cell whose head is the symbol `head`.
    pub fn is_form(&self, head: Name) -> bool {
        self.as_cons()
            .is_some_and(|cell| cell.head.as_symbol() == Some(head))
    }

    /// Source location of a symbol or cons cell.
    pub fn span(&self) -> Option<Span> {
        match self {
            Value::Symbol(symbol) => symbol.span,
            Value::Cons(cell) => cell.span,
            _ => None,
        }
    }

    /// Elements of the tail chain, stopping at the first non-cell tail.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter { next: self }
    }

    /// Number of cells in the tail chain. An improper tail ends the count.
    pub fn list_len(&self) -> usize {
        self.iter().count()
    }

    /// Element `index` of the tail chain.
    pub fn nth(&self, index: usize) -> Option<&Value> {
        self.iter().nth(index)
    }
}

/// Iterator over the heads of a cons chain.
pub struct ListIter<'a> {
    next: &'a Value,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next {
            Value::Cons(cell) => {
                self.next = &cell.tail;
                Some(&cell.head)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::Symbol(symbol) => f.write_str(symbol.name.as_str()),
            Value::Nil => f.write_str("nil"),
            Value::Cons(cell) => {
                write!(f, "({}", cell.head)?;
                let mut tail = &cell.tail;
                loop {
                    match tail {
                        Value::Cons(next) => {
                            write!(f, " {}", next.head)?;
                            tail = &next.tail;
                        }
                        Value::Nil => break,
                        other => {
                            write!(f, " . {other}")?;
                            break;
                        }
                    }
                }
                f.write_str(")")
            }
            Value::Vector(vector) => {
                f.write_str("[")?;
                for (i, element) in vector.0.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Value::Typed(typed) => write!(f, "<{} {}>", typed.primary, typed.inner),
            Value::Union(alternatives) => {
                f.write_str("<Union")?;
                for alternative in alternatives.iter() {
                    write!(f, " {alternative}")?;
                }
                f.write_str(">")
            }
            Value::Callable(callable) => write!(f, "{callable}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(s) => return write!(f, "Str({:?})", &**s),
            Value::Symbol(_) => "Symbol",
            Value::Nil => return f.write_str("Nil"),
            Value::Cons(_) => "Cons",
            Value::Vector(_) => "Vector",
            Value::Typed(_) => "Typed",
            Value::Union(_) => "Union",
            Value::Callable(_) => "Callable",
        };
        write!(f, "{variant}({self})")
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Cons(a), Value::Cons(b)) => {
                Rc::ptr_eq(a, b) || (a.head == b.head && a.tail == b.tail)
            }
            (Value::Vector(a), Value::Vector(b)) => {
                a.ptr_eq(b) || *a.0.borrow() == *b.0.borrow()
            }
            (Value::Typed(a), Value::Typed(b)) => {
                a.primary == b.primary && a.fallbacks == b.fallbacks && a.inner == b.inner
            }
            (Value::Union(a), Value::Union(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}
