//! Print handler for program output.
//!
//! `$PRINT`, `$PRINTLN` and `$SCOPE` write through a print handler so the
//! destination can be swapped:
//! - stdout (default)
//! - a buffer, for tests and embedding
//! - nowhere
//!
//! Enum dispatch rather than a trait object: this sits on every print.

use std::io::Write;

use parking_lot::Mutex;

/// Writes to stdout.
///
/// A failed write (closed pipe, full disk) does not stop the program; it
/// is logged and the fragment is lost.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn println(&self, msg: &str) {
        report(write_fragment(&mut std::io::stdout().lock(), msg, true));
    }

    pub fn print(&self, msg: &str) {
        report(write_fragment(&mut std::io::stdout().lock(), msg, false));
    }
}

fn write_fragment(out: &mut impl Write, msg: &str, newline: bool) -> std::io::Result<()> {
    out.write_all(msg.as_bytes())?;
    if newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn report(result: std::io::Result<()>) {
    if let Err(err) = result {
        tracing::warn!(%err, "stdout write failed");
    }
}

/// Captures output in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between the interpreter and whoever reads it.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}
