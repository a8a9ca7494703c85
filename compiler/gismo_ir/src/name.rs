//! Interned string handle.

use std::fmt;

use crate::StringInterner;

/// Handle to a string stored in the process-wide [`StringInterner`].
///
/// Two names are equal exactly when their text is equal, so comparing names
/// is a single `u32` comparison. Runtime values display themselves without an
/// interner reference, which is why the interner is global rather than
/// threaded through every call.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

/// Strings interned at fixed indices when the interner is created.
///
/// The associated constants on [`Name`] index into this table, so the two
/// must stay in the same order.
pub(crate) const WELL_KNOWN: [&str; 21] = [
    "",
    "int",
    "float",
    "string",
    "symbol",
    "Nil",
    "ConsCell",
    "Vector",
    "Union",
    "builtin",
    "*",
    "$1",
    "$2",
    "$$",
    "@call",
    "@callCurly",
    "@begin",
    "::=",
    "Module",
    ",",
    "$QUOTE",
];

impl Name {
    pub const EMPTY: Name = Name(0);

    // Type tags
    pub const INT: Name = Name(1);
    pub const FLOAT: Name = Name(2);
    pub const STRING: Name = Name(3);
    pub const SYMBOL: Name = Name(4);
    pub const NIL: Name = Name(5);
    pub const CONS_CELL: Name = Name(6);
    pub const VECTOR: Name = Name(7);
    pub const UNION: Name = Name(8);
    pub const BUILTIN: Name = Name(9);

    /// `*` in a signature key.
    pub const WILDCARD: Name = Name(10);

    // Macro body placeholders
    pub const FIRST_OPERAND: Name = Name(11);
    pub const SECOND_OPERAND: Name = Name(12);
    pub const WHOLE_FORM: Name = Name(13);

    // Special form heads
    pub const CALL: Name = Name(14);
    pub const CALL_CURLY: Name = Name(15);
    pub const BEGIN: Name = Name(16);
    pub const DEFINE: Name = Name(17);
    pub const MODULE: Name = Name(18);

    /// Argument separator.
    pub const COMMA: Name = Name(19);

    /// The quoting primitive closures wrap their argument in.
    pub const QUOTE: Name = Name(20);

    #[inline]
    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Intern `text` in the global interner.
    #[inline]
    pub fn intern(text: &str) -> Name {
        StringInterner::global().intern(text)
    }

    /// The interned text.
    #[inline]
    pub fn as_str(self) -> &'static str {
        StringInterner::global().lookup(self)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
