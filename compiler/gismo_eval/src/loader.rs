//! Source loading for `$LOAD`.
//!
//! The evaluator does not read files itself: lexing and parsing live in
//! other crates, so the driver supplies a [`ModuleLoader`] that turns a
//! path into a lowered program.

use std::path::Path;

use crate::{EvalError, Value};

pub trait ModuleLoader {
    /// Read, parse and lower the file at `path` (already canonical).
    ///
    /// `Ok(None)` means the file could not be read, which `$LOAD` treats
    /// as a no-op. Syntax errors are `Err`.
    fn load(&self, path: &Path) -> Result<Option<Value>, EvalError>;
}

/// Loader for interpreters without file access: every file is unreadable.
pub struct NoModuleLoader;

impl ModuleLoader for NoModuleLoader {
    fn load(&self, _path: &Path) -> Result<Option<Value>, EvalError> {
        Ok(None)
    }
}
