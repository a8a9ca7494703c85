//! Operators from `toolchain/before.gsm`.

use gismo_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use crate::common::{output, run};

#[test]
fn arithmetic_follows_precedence() {
    assert_eq!(output("$PRINTLN(1 + 2 * 3)"), "7\n");
    assert_eq!(output("$PRINTLN((1 + 2) * 3)"), "9\n");
}

#[test]
fn arithmetic_is_left_associative() {
    assert_eq!(output("$PRINTLN(10 - 4 - 3)"), "3\n");
    assert_eq!(output("$PRINTLN(100 / 10 / 5)"), "2\n");
}

#[test]
fn mixed_arithmetic_promotes_to_float() {
    assert_eq!(output("$PRINTLN(1 + 0.5)"), "1.5\n");
    assert_eq!(output("$PRINTLN(0.5 * 4)"), "2\n");
}

#[test]
fn negation() {
    assert_eq!(output("$PRINTLN(-5)\n$PRINTLN(-(2 + 3))"), "-5\n-5\n");
}

#[test]
fn integer_division_by_zero_is_fatal() {
    assert_eq!(run("$PRINTLN(1 / 0)").problem().code(), ErrorCode::E6005);
    assert_eq!(run("$PRINTLN(1 % 0)").problem().code(), ErrorCode::E6005);
}

#[test]
fn string_concatenation() {
    assert_eq!(output("$PRINTLN(\"a\" + \"b\" + 3)"), "ab3\n");
}

#[test]
fn comparisons() {
    let source = "$PRINTLN(2 < 3)\n\
                  $PRINTLN(3 < 2)\n\
                  $PRINTLN(2 <= 2)\n\
                  $PRINTLN(\"x\" == \"x\")\n\
                  $PRINTLN(1 != 1)";
    assert_eq!(output(source), "1\nnil\n1\n1\nnil\n");
}

#[test]
fn logic_short_circuits() {
    let source = "$PRINTLN($NIL() && $RAISE(never))\n\
                  $PRINTLN(0 || $RAISE(never))\n\
                  $PRINTLN(1 && 2)\n\
                  $PRINTLN($NIL() || 3)";
    assert_eq!(output(source), "nil\n0\n2\n3\n");
}

#[test]
fn logical_not() {
    assert_eq!(output("$PRINTLN(!($NIL()))\n$PRINTLN(!1)"), "1\nnil\n");
}

#[test]
fn comparisons_drive_loops() {
    let source = "i := 0\n\
                  $WHILE($GET(i) < 3, { $PRINT($GET(i)); i = $GET(i) + 1 })\n\
                  $PRINTLN()";
    assert_eq!(output(source), "012\n");
}

#[test]
fn assignment_creates_a_missing_local() {
    assert_eq!(output("y = 1\n$PRINTLN($GET(y))"), "1\n");
    assert_eq!(output("{ z = 2; $PRINTLN($GET(z)) }\n$PRINTLN($GET(z))"), "2\nnil\n");
}

#[test]
fn programs_can_extend_prelude_operators() {
    let source = "string * int ::= $IF($GREATER($2, 0), $CAT($1, $1 * $SUB($2, 1)), \"\")\n\
                  $PRINTLN(\"ab\" * 3)";
    assert_eq!(output(source), "ababab\n");
}
