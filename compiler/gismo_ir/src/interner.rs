//! Global string interner.
//!
//! Strings are leaked to obtain `'static` lifetimes. The set of distinct
//! names in a Gismo run is small (identifiers, type tags, and the occasional
//! `$SYMCAT` result), so the leak is bounded by program size.

use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::name::WELL_KNOWN;
use crate::Name;

struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// Thread-safe string interner backing [`Name`].
pub struct StringInterner {
    table: RwLock<InternTable>,
}

static GLOBAL: OnceLock<StringInterner> = OnceLock::new();

impl StringInterner {
    fn new() -> Self {
        let mut table = InternTable {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        for (index, text) in (0u32..).zip(WELL_KNOWN) {
            table.map.insert(text, index);
            table.strings.push(text);
        }
        StringInterner {
            table: RwLock::new(table),
        }
    }

    /// The process-wide interner.
    pub fn global() -> &'static StringInterner {
        GLOBAL.get_or_init(StringInterner::new)
    }

    /// Intern a string, returning its [`Name`].
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct strings are interned.
    pub fn intern(&self, text: &str) -> Name {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(text) {
                return Name::from_index(index);
            }
        }

        let mut guard = self.table.write();
        // Another thread may have inserted between the two locks.
        if let Some(&index) = guard.map.get(text) {
            return Name::from_index(index);
        }

        let Ok(index) = u32::try_from(guard.strings.len()) else {
            panic!("string interner exceeded {} entries", u32::MAX);
        };
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Name::from_index(index)
    }

    /// Text for `name`. Unknown handles resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the well-known ones.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
