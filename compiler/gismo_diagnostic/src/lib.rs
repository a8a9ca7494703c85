//! Diagnostic system for Gismo error reporting.
//!
//! Every fatal condition in the toolchain (lexing, parsing, lowering and
//! evaluation) ends up as a [`Diagnostic`]:
//! - an [`ErrorCode`] for searchability
//! - a message saying what went wrong
//! - a primary label saying where
//! - notes and help lines with context and suggestions
//!
//! [`emitter::TerminalEmitter`] renders diagnostics with the offending
//! source line and a caret underline.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
