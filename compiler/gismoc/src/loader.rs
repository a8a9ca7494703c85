//! File-backed module loading for `$LOAD`.

use std::path::Path;

use gismo_eval::{EvalError, ModuleLoader, Value};
use gismo_ir::SharedSourceMap;

/// Reads modules from disk, registering each text in the shared source map
/// so diagnostics inside loaded files point at the right file.
pub struct FileLoader {
    sources: SharedSourceMap,
}

impl FileLoader {
    pub fn new(sources: SharedSourceMap) -> Self {
        FileLoader { sources }
    }
}

impl ModuleLoader for FileLoader {
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Option<Value>, EvalError> {
        let Ok(text) = std::fs::read_to_string(path) else {
            tracing::debug!("unreadable module");
            return Ok(None);
        };
        let id = self.sources.add(&path.display().to_string(), &text);

        let tokens = gismo_lexer::tokenize(&text, id)
            .map_err(|e| EvalError::load_failed(path, e.to_string()).with_span(e.span))?;
        let tree = gismo_parse::parse(tokens)
            .map_err(|e| EvalError::load_failed(path, e.to_string()).with_span(e.span))?;
        let program = gismo_eval::lower(&tree)
            .map_err(|e| EvalError::load_failed(path, e.to_string()).with_span_opt(e.span))?;
        Ok(Some(program))
    }
}
