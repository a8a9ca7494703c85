//! Output file behind `$WRITE` and `$WRITEB`.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::EvalError;

/// In-memory output, readable after the interpreter is done with it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().clone()
    }
}

pub enum OutputSink {
    /// Writes are dropped.
    Disabled,
    File(BufWriter<File>),
    Buffer(SharedBuffer),
}

impl OutputSink {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(OutputSink::File(BufWriter::new(File::create(path)?)))
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, OutputSink::Disabled)
    }

    pub fn write(&mut self, bytes: &[u8]) -> Result<(), EvalError> {
        match self {
            OutputSink::Disabled => Ok(()),
            OutputSink::File(file) => file.write_all(bytes).map_err(|e| EvalError::output_failed(&e)),
            OutputSink::Buffer(buffer) => {
                buffer.0.lock().extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    pub fn flush(&mut self) -> Result<(), EvalError> {
        match self {
            OutputSink::File(file) => file.flush().map_err(|e| EvalError::output_failed(&e)),
            OutputSink::Disabled | OutputSink::Buffer(_) => Ok(()),
        }
    }
}
