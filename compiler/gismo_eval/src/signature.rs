//! Structured keys for the definitions table.
//!
//! A definition written as `x ::= ...` is a plain variable. One written as
//! `int add int ::= ...` lowers to the key expression `(add int int)`, which
//! becomes an operator name plus one type pattern per operand.

use std::fmt;

use gismo_ir::Name;
use smallvec::SmallVec;

use crate::{EvalError, Value};

/// One operand position of a signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypePattern {
    /// `*`: any type. Only looked up in the right-hand position of a
    /// binary form, where it also leaves the right operand unevaluated.
    Any,
    Tag(Name),
}

impl TypePattern {
    fn from_name(name: Name) -> Self {
        if name == Name::WILDCARD {
            TypePattern::Any
        } else {
            TypePattern::Tag(name)
        }
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Any => f.write_str("*"),
            TypePattern::Tag(name) => f.write_str(name.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SignatureKey {
    pub operator: Name,
    pub patterns: SmallVec<[TypePattern; 2]>,
}

impl SignatureKey {
    pub fn variable(name: Name) -> Self {
        SignatureKey {
            operator: name,
            patterns: SmallVec::new(),
        }
    }

    pub fn unary(operator: Name, operand: Name) -> Self {
        let mut patterns = SmallVec::new();
        patterns.push(TypePattern::Tag(operand));
        SignatureKey { operator, patterns }
    }

    pub fn binary(operator: Name, left: Name, right: TypePattern) -> Self {
        let mut patterns = SmallVec::new();
        patterns.push(TypePattern::Tag(left));
        patterns.push(right);
        SignatureKey { operator, patterns }
    }

    /// Build a key from the left-hand side of `::=`.
    ///
    /// Patterns are taken literally from the display form of each element,
    /// so `(add int (a b))` has the second pattern `(a b)`.
    pub fn from_key_expr(key: &Value) -> Result<Self, EvalError> {
        match key {
            Value::Symbol(symbol) => Ok(SignatureKey::variable(symbol.name)),
            Value::Cons(cell) => {
                let operator = name_of(&cell.head);
                let patterns = cell
                    .tail
                    .iter()
                    .map(|pattern| TypePattern::from_name(name_of(pattern)))
                    .collect();
                Ok(SignatureKey { operator, patterns })
            }
            other => Err(EvalError::malformed(format!(
                "cannot define `{other}`: a definition key must be a name or a signature"
            ))
            .with_span_opt(other.span())),
        }
    }

    /// A key with no patterns binds an evaluated value, not a template.
    #[inline]
    pub fn is_variable(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn arity(&self) -> usize {
        self.patterns.len()
    }
}

fn name_of(value: &Value) -> Name {
    match value.as_symbol() {
        Some(name) => name,
        None => Name::intern(&value.to_string()),
    }
}

/// Space-joined form: `add int int`.
impl fmt::Display for SignatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator.as_str())?;
        for pattern in &self.patterns {
            write!(f, " {pattern}")?;
        }
        Ok(())
    }
}
