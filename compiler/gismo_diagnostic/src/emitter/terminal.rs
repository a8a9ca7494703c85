//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support and
//! source snippets:
//!
//! ```text
//! error[E6001]: no match for macro `string foo int`
//!   --> main.gsm:3:5
//!    |
//!  3 | "a" foo 5
//!    |     ^^^ no signature accepts these operand types
//!    |
//!   = help: did you mean one of these?
//! ```

use std::io::{self, Write};

use gismo_ir::SharedSourceMap;

use super::DiagnosticEmitter;
use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const HELP: &str = "\x1b[1;32m";
    pub const BOLD: &str = "\x1b[1m";
    pub const GUTTER: &str = "\x1b[1;34m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse a `--color=` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Terminal emitter with optional colors and source snippets.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    sources: Option<SharedSourceMap>,
}

impl<W: Write> TerminalEmitter<W> {
    /// * `is_tty` - whether `writer` is a terminal (used for `ColorMode::Auto`)
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            sources: None,
        }
    }

    /// Resolve label spans against `sources` to print file positions and
    /// source lines. Without it, labels print raw spans.
    #[must_use]
    pub fn with_sources(mut self, sources: SharedSourceMap) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) {
        let head = format!("error[{}]", diagnostic.code.as_str());
        self.paint(&head, colors::ERROR);
        if self.colors {
            let _ = writeln!(
                self.writer,
                "{}: {}{}",
                colors::BOLD,
                diagnostic.message,
                colors::RESET
            );
        } else {
            let _ = writeln!(self.writer, ": {}", diagnostic.message);
        }
    }

    fn write_label(&mut self, label: &Label) {
        let marker = if label.is_primary { "-->" } else { ":::" };
        let file = self
            .sources
            .as_ref()
            .and_then(|sources| sources.file(label.span.source));

        let Some(file) = file else {
            let _ = write!(self.writer, "  {marker} {:?}: ", label.span);
            self.write_label_message(label);
            let _ = writeln!(self.writer);
            return;
        };

        let table = LineOffsetTable::build(&file.text);
        let (line, col) = table.offset_to_line_col(&file.text, label.span.start);
        let line_text = table.line_text(&file.text, line).unwrap_or("");
        let gutter = " ".repeat(line.to_string().len());

        let _ = write!(self.writer, "{gutter}");
        self.paint(marker, colors::GUTTER);
        let _ = writeln!(self.writer, " {}:{line}:{col}", file.path);

        self.write_gutter(&gutter, None);
        let _ = writeln!(self.writer);
        self.write_gutter(&gutter, Some(line));
        let _ = writeln!(self.writer, " {line_text}");

        // Underline at most to the end of the line.
        let col_chars = (col - 1) as usize;
        let line_chars = line_text.chars().count();
        let span_chars = file
            .text
            .get(label.span.start as usize..label.span.end as usize)
            .map_or(1, |text| text.chars().count());
        let width = span_chars
            .min(line_chars.saturating_sub(col_chars))
            .max(1);

        self.write_gutter(&gutter, None);
        let _ = write!(self.writer, " {}", " ".repeat(col_chars));
        let underline = if label.is_primary { "^" } else { "-" };
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::GUTTER
        };
        self.paint(&underline.repeat(width), color);
        if !label.message.is_empty() {
            let _ = write!(self.writer, " ");
            self.write_label_message(label);
        }
        let _ = writeln!(self.writer);
    }

    fn write_gutter(&mut self, gutter: &str, line: Option<u32>) {
        let text = match line {
            Some(line) => format!("{line} |"),
            None => format!("{gutter} |"),
        };
        self.paint(&text, colors::GUTTER);
    }

    fn write_label_message(&mut self, label: &Label) {
        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::GUTTER
        };
        self.paint(&label.message, color);
    }

    fn write_trailer(&mut self, kind: &str, color: &str, text: &str) {
        let _ = write!(self.writer, "  = ");
        self.paint(kind, color);
        let _ = writeln!(self.writer, ": {text}");
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Emitter for stderr, detecting whether stderr is a terminal.
    pub fn stderr(mode: ColorMode) -> Self {
        let is_tty = io::IsTerminal::is_terminal(&io::stderr());
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.write_header(diagnostic);

        for label in &diagnostic.labels {
            self.write_label(label);
        }

        for note in &diagnostic.notes {
            self.write_trailer("note", colors::BOLD, note);
        }

        for suggestion in &diagnostic.suggestions {
            self.write_trailer("help", colors::HELP, suggestion);
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }
}
