//! Scope chain.
//!
//! Each scope has two independent namespaces:
//! - definitions, keyed by [`SignatureKey`]: variables (evaluated values)
//!   and macro templates (raw bodies)
//! - locals, keyed by name: the mutable store behind `$DEF`, `$GET` and `$SET`
//!
//! Children hold a strong reference to their parent. Parents never point
//! at children, so the chain itself has no cycles.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use gismo_ir::Name;

use crate::{EvalError, SignatureKey, Value};

/// Single-threaded shared handle with interior mutability.
///
/// All scope allocations go through [`LocalScope::new`]. `Rc` rather than
/// `Arc`: evaluation never leaves its thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Shared handle to a [`Scope`].
pub type ScopeRef = LocalScope<Scope>;

#[derive(Default)]
pub struct Scope {
    parent: Option<ScopeRef>,
    definitions: FxHashMap<SignatureKey, Value>,
    locals: FxHashMap<Name, Value>,
    /// Set while a block or module introduced by this scope is running.
    accepts_exports: bool,
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("definitions", &self.definitions.len())
            .field("locals", &self.locals.len())
            .field("accepts_exports", &self.accepts_exports)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

impl ScopeRef {
    /// A scope with no parent.
    pub fn root() -> Self {
        LocalScope::new(Scope::default())
    }

    pub fn child(&self) -> Self {
        LocalScope::new(Scope {
            parent: Some(self.clone()),
            ..Scope::default()
        })
    }

    pub fn parent(&self) -> Option<ScopeRef> {
        self.borrow().parent.clone()
    }

    /// Store a definition in this scope, replacing any previous one.
    ///
    /// The value is stored as given; evaluating variable values first is
    /// the interpreter's job.
    pub fn insert_definition(&self, key: SignatureKey, value: Value) {
        self.borrow_mut().definitions.insert(key, value);
    }

    /// Nearest definition of `key`, walking up the chain.
    pub fn find_definition(&self, key: &SignatureKey) -> Option<Value> {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            let scope = scope.borrow();
            if let Some(value) = scope.definitions.get(key) {
                return Some(value.clone());
            }
            current = scope.parent.clone();
        }
        None
    }

    /// Value of the variable `name`, if any scope defines it.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.find_definition(&SignatureKey::variable(name))
    }

    /// All signatures for `operator` visible from here, nearest first,
    /// without duplicates.
    pub fn signatures_for(&self, operator: Name) -> Vec<SignatureKey> {
        let mut found: Vec<SignatureKey> = Vec::new();
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            let scope = scope.borrow();
            let mut here: Vec<&SignatureKey> = scope
                .definitions
                .keys()
                .filter(|key| key.operator == operator && !key.is_variable())
                .collect();
            here.sort_by_cached_key(|key| key.to_string());
            for key in here {
                if !found.contains(key) {
                    found.push(key.clone());
                }
            }
            current = scope.parent.clone();
        }
        found
    }

    // Locals

    /// Create or overwrite `name` in this scope.
    pub fn define_local(&self, name: Name, value: Value) {
        tracing::trace!(local = %name, "define local");
        self.borrow_mut().locals.insert(name, value);
    }

    /// Value of the nearest owner of `name`, or the empty marker.
    pub fn get_local(&self, name: Name) -> Value {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            let scope = scope.borrow();
            if let Some(value) = scope.locals.get(&name) {
                return value.clone();
            }
            current = scope.parent.clone();
        }
        Value::Nil
    }

    /// Assign to `name`.
    ///
    /// Writes here if this scope owns `name` or the chain yields the empty
    /// marker for it; otherwise moves on to the parent. Reaching the root
    /// without writing is a usage error.
    pub fn set_local(&self, name: Name, value: Value) -> Result<(), EvalError> {
        let mut current = self.clone();
        loop {
            let owns = current.borrow().locals.contains_key(&name);
            if owns || current.get_local(name).is_nil() {
                tracing::trace!(local = %name, "set local");
                current.borrow_mut().locals.insert(name, value);
                return Ok(());
            }
            let parent = current.parent();
            match parent {
                Some(parent) => current = parent,
                None => return Err(EvalError::unowned_local(name.as_str())),
            }
        }
    }

    // Exports

    pub fn accepts_exports(&self) -> bool {
        self.borrow().accepts_exports
    }

    pub fn set_accepts_exports(&self, accepts: bool) {
        self.borrow_mut().accepts_exports = accepts;
    }

    /// Define `key` in the nearest scope that accepts exports.
    ///
    /// Returns `false` when no scope on the chain accepts, in which case
    /// the definition is dropped.
    pub fn export_definition(&self, key: SignatureKey, value: Value) -> bool {
        let mut current = Some(self.clone());
        while let Some(scope) = current {
            if scope.accepts_exports() {
                tracing::trace!(key = %key, "export");
                scope.insert_definition(key, value);
                return true;
            }
            current = scope.parent();
        }
        false
    }

    /// Printable dump of this scope and its ancestors.
    pub fn dump(&self, colored: bool) -> ScopeDump {
        ScopeDump {
            scope: self.clone(),
            colored,
        }
    }
}

/// Display adapter for `$SCOPE`.
pub struct ScopeDump {
    scope: ScopeRef,
    colored: bool,
}

impl fmt::Display for ScopeDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paint = |code: &'static str| if self.colored { code } else { "" };
        let (reset, blue, green, yellow) = (
            paint("\x1b[0m"),
            paint("\x1b[1;34m"),
            paint("\x1b[1;32m"),
            paint("\x1b[1;33m"),
        );

        let mut level = 0usize;
        let mut current = Some(self.scope.clone());
        while let Some(scope) = current {
            let indent = "  ".repeat(level);
            let scope = scope.borrow();
            writeln!(f, "{indent}{blue}scope level {level}:{reset}")?;

            let mut definitions: Vec<(String, &Value)> = scope
                .definitions
                .iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect();
            definitions.sort_by(|a, b| a.0.cmp(&b.0));
            if definitions.is_empty() {
                writeln!(f, "{indent}  (no definitions)")?;
            }
            for (key, value) in definitions {
                writeln!(f, "{indent}  {green}{key}{reset}: {yellow}{value}{reset}")?;
            }

            let mut locals: Vec<(&str, &Value)> = scope
                .locals
                .iter()
                .map(|(name, value)| (name.as_str(), value))
                .collect();
            locals.sort_by(|a, b| a.0.cmp(b.0));
            for (name, value) in locals {
                writeln!(f, "{indent}  local {green}{name}{reset} = {yellow}{value}{reset}")?;
            }

            if scope.parent.is_some() {
                writeln!(f, "{indent}{blue}parent scope:{reset}")?;
            }
            current = scope.parent.clone();
            level += 1;
        }
        Ok(())
    }
}
