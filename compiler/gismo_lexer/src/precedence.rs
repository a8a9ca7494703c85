//! Binding powers for infix use of tokens.
//!
//! Every identifier, number and unknown operator can act as an infix
//! operator with [`IDENTIFIER_PRECEDENCE`]; operators in
//! [`BINARY_PRECEDENCES`] bind with their listed power. Higher binds tighter.

/// Power of a call `f(...)`.
pub const CALL_PRECEDENCE: u8 = 16;

/// Power of a curly call `f{...}`.
pub const CURLY_CALL_PRECEDENCE: u8 = 14;

/// Power of identifiers, numbers and operators missing from the table.
pub const IDENTIFIER_PRECEDENCE: u8 = 4;

pub const BINARY_PRECEDENCES: &[(&str, u8)] = &[
    ("::=", 1),
    ("=", 2),
    ("+=", 2),
    ("-=", 2),
    ("*=", 2),
    ("/=", 2),
    ("%=", 2),
    ("#=", 2),
    (":=", 2),
    ("<-", 2),
    (",", 3),
    ("=>", 4),
    ("||", 5),
    ("&&", 6),
    ("|", 7),
    ("&", 8),
    ("==", 9),
    ("!=", 9),
    ("<", 10),
    (">", 10),
    ("<=", 10),
    (">=", 10),
    ("<<", 11),
    (">>", 11),
    ("+", 13),
    ("-", 13),
    ("*", 14),
    ("/", 14),
    ("%", 14),
    ("->", 15),
    (":", 15),
    (".", 17),
    ("@", 18),
];

/// Binding power of an operator token's text.
pub fn operator_precedence(operator: &str) -> u8 {
    BINARY_PRECEDENCES
        .iter()
        .find(|(text, _)| *text == operator)
        .map_or(IDENTIFIER_PRECEDENCE, |&(_, power)| power)
}
