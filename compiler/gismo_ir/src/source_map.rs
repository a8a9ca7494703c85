//! Registry of source texts.
//!
//! Every text that reaches the lexer (prelude, main program, epilogue,
//! `$LOAD`ed modules) is registered here first; spans carry the returned
//! [`SourceId`] so diagnostics can find the text again.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::SourceId;

/// One registered source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: Arc<str>,
    pub text: Arc<str>,
}

#[derive(Default, Debug)]
pub struct SourceMap {
    files: Vec<SourceFile>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source text and return its id.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` sources are registered.
    pub fn add(&mut self, path: &str, text: &str) -> SourceId {
        let Ok(raw) = u32::try_from(self.files.len()) else {
            panic!("source map exceeded {} files", u32::MAX);
        };
        self.files.push(SourceFile {
            path: Arc::from(path),
            text: Arc::from(text),
        });
        SourceId::new(raw)
    }

    pub fn get(&self, id: SourceId) -> Option<&SourceFile> {
        self.files.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Cloneable handle to a [`SourceMap`] shared between the driver, the module
/// loader and the diagnostic emitter.
#[derive(Clone, Default, Debug)]
pub struct SharedSourceMap(Arc<RwLock<SourceMap>>);

impl SharedSourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: &str, text: &str) -> SourceId {
        self.0.write().add(path, text)
    }

    /// A cheap copy of the registered file.
    pub fn file(&self, id: SourceId) -> Option<SourceFile> {
        self.0.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_are_assigned_in_order() {
        let map = SharedSourceMap::new();
        let first = map.add("before.gsm", "a");
        let second = map.add("main.gsm", "b");
        assert_eq!(first, SourceId::new(0));
        assert_eq!(second, SourceId::new(1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn files_round_trip_through_the_handle() {
        let map = SharedSourceMap::new();
        let id = map.add("main.gsm", "x ::= 1");
        let clone = map.clone();
        let file = clone.file(id);
        assert_eq!(file.as_ref().map(|f| &*f.path), Some("main.gsm"));
        assert_eq!(file.as_ref().map(|f| &*f.text), Some("x ::= 1"));
        assert_eq!(map.file(SourceId::new(7)), None);
    }
}
