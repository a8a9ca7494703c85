//! Error codes for all Gismo diagnostics.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where the first digit names the phase:
/// - E0xxx: lexer (and literal conversion)
/// - E1xxx: parser
/// - E6xxx: runtime
/// - E9xxx: driver
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Character that cannot start any token
    E0002,
    /// Numeric literal that does not fit or does not parse
    E0003,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,

    // Runtime Errors (E6xxx)
    /// No signature matches the operand types
    E6001,
    /// Local binding misuse
    E6002,
    /// Malformed special form
    E6003,
    /// Error raised by the program
    E6004,
    /// Division or modulo by zero
    E6005,
    /// Output file write failed
    E6006,
    /// Module could not be loaded
    E6007,

    // Driver Errors (E9xxx)
    /// I/O or usage error
    E9001,
}

impl ErrorCode {
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E9001,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line summary of what the code means.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "unexpected character",
            ErrorCode::E0003 => "invalid numeric literal",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "unclosed delimiter",
            ErrorCode::E6001 => "no matching signature",
            ErrorCode::E6002 => "local binding misuse",
            ErrorCode::E6003 => "malformed special form",
            ErrorCode::E6004 => "raised by the program",
            ErrorCode::E6005 => "division by zero",
            ErrorCode::E6006 => "output write failed",
            ErrorCode::E6007 => "module load failed",
            ErrorCode::E9001 => "driver error",
        }
    }

    pub fn is_runtime(self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
