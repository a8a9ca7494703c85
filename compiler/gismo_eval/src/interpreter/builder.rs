//! `InterpreterBuilder` for creating interpreters with various configurations.

use rustc_hash::FxHashMap;

use super::Interpreter;
use crate::loader::{ModuleLoader, NoModuleLoader};
use crate::output::OutputSink;
use crate::print_handler::{stdout_handler, SharedPrintHandler};

/// Builder for [`Interpreter`].
///
/// Defaults: output to stdout, file output disabled, no module loading,
/// plain `$SCOPE` dumps.
#[derive(Default)]
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    output: Option<OutputSink>,
    loader: Option<Box<dyn ModuleLoader>>,
    colors: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where `$PRINT`, `$PRINTLN` and `$SCOPE` go.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Where `$WRITE` and `$WRITEB` go.
    #[must_use]
    pub fn output(mut self, output: OutputSink) -> Self {
        self.output = Some(output);
        self
    }

    /// How `$LOAD` reads source files.
    #[must_use]
    pub fn loader(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loader = Some(Box::new(loader));
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            print: self.print_handler.unwrap_or_else(stdout_handler),
            output: self.output.unwrap_or(OutputSink::Disabled),
            loader: self.loader.unwrap_or_else(|| Box::new(NoModuleLoader)),
            load_cache: FxHashMap::default(),
            iota: 0,
            colors: self.colors,
        }
    }
}
