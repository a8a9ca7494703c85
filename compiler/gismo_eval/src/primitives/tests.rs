use gismo_diagnostic::ErrorCode;
use gismo_ir::Name;
use pretty_assertions::assert_eq;

use super::{argument_list, flatten};
use crate::test_helpers::{output, program, run};
use crate::{EvalErrorKind, Value};

// Argument lists

#[test]
fn argument_list_splits_on_commas() {
    let call = program("$F(a, b + c, d)").nth(1).cloned().unwrap_or(Value::Nil);
    let args = call.nth(2).cloned().unwrap_or(Value::Nil);
    let rendered: Vec<String> = argument_list(&args).iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["a", "(+ b c)", "d"]);
}

#[test]
fn empty_argument_tree_is_no_arguments() {
    assert!(argument_list(&Value::Nil).is_empty());
    assert!(flatten(&Value::Nil, Name::COMMA).is_empty());
}

#[test]
fn single_argument_is_its_own_list() {
    let args = argument_list(&Value::Int(3));
    assert_eq!(args.as_slice(), [Value::Int(3)]);
}

#[test]
fn missing_arguments_yield_nil() {
    assert_eq!(
        output("$PRINTLN($ADD(1))\n$PRINTLN($CAR())\n$PRINTLN($IF(1, 2))"),
        "nil\nnil\nnil\n"
    );
}

// Arithmetic

#[test]
fn integer_arithmetic() {
    assert_eq!(
        output("$PRINTLN($ADD(2, 3))\n$PRINTLN($SUB(2, 3))\n$PRINTLN($MUL(6, 7))\n$PRINTLN($DIV(7, 2))"),
        "5\n-1\n42\n3\n"
    );
}

#[test]
fn integer_arithmetic_wraps() {
    assert_eq!(
        output("$PRINTLN($ADD(9223372036854775807, 1))"),
        "-9223372036854775808\n"
    );
}

#[test]
fn floats_promote_ints() {
    assert_eq!(
        output("$PRINTLN($ADD(1, 0.5))\n$PRINTLN($MUL(0.5, 4))\n$PRINTLN($DIV(1, 4.0))"),
        "1.5\n2\n0.25\n"
    );
}

#[test]
fn non_numbers_yield_nil() {
    assert_eq!(output("$PRINTLN($ADD(\"1\", 2))"), "nil\n");
}

#[test]
fn division_by_zero_is_fatal() {
    let err = run("$DIV(1, 0)").error();
    assert_eq!(err.code(), ErrorCode::E6005);
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    assert!(err.span.is_some());
}

#[test]
fn modulo_by_zero_is_fatal() {
    let err = run("$MOD(7, 0)").error();
    assert_eq!(err.code(), ErrorCode::E6005);
    assert_eq!(err.kind, EvalErrorKind::ModuloByZero);
}

#[test]
fn integer_only_operations() {
    assert_eq!(
        output("$PRINTLN($MOD(7, 3))\n$PRINTLN($BWA(12, 10))\n$PRINTLN($BWO(12, 10))\n$PRINTLN($MOD(7.5, 2))"),
        "1\n8\n14\nnil\n"
    );
}

#[test]
fn shifts() {
    assert_eq!(
        output(
            "$PRINTLN($SHL(1, 4))\n$PRINTLN($SHR($SUB(0, 8), 1))\n\
             $PRINTLN($SHL(1, 70))\n$PRINTLN($SHR($SUB(0, 8), 70))\n$PRINTLN($SHR(8, 70))"
        ),
        "16\n-4\n0\n-1\n0\n"
    );
}

#[test]
fn int_conversion() {
    assert_eq!(
        output("$PRINTLN($INT(3.9))\n$PRINTLN($INT(\"  42abc\"))\n$PRINTLN($INT(\"x\"))\n$PRINTLN($INT(7))"),
        "3\n42\nnil\n7\n"
    );
}

// Lists

#[test]
fn list_primitives() {
    assert_eq!(
        output(
            "$PRINTLN($CONS(1, 2))\n$PRINTLN($CAR($CONS(1, 2)))\n\
             $PRINTLN($CDR($CONS(1, $NIL())))\n$PRINTLN($CONS(1, $CONS(2, $NIL())))\n$PRINTLN($CAR(5))"
        ),
        "(1 . 2)\n1\nnil\n(1 2)\nnil\n"
    );
}

// Strings

#[test]
fn string_primitives() {
    assert_eq!(
        output(
            "$PRINTLN($CAT(\"a\", 1))\n$PRINTLN($STRLEN(\"h\u{e9}llo\"))\n$PRINTLN($STRLEN())\n\
             $PRINTLN($CHAR(\"A\", 0))\n$PRINTLN($CHAR(\"A\", 5))\n$PRINTLN($STR(65))\n$PRINTLN($STR(233))"
        ),
        "a1\n6\n0\n65\nnil\nA\n\u{e9}\n"
    );
}

#[test]
fn symcat_builds_symbols() {
    assert_eq!(
        output("s ::= $SYMCAT(ab, cd)\n$PRINTLN(s)\n$PRINTLN($TYPEOF(s, symbol))"),
        "abcd\n1\n"
    );
}

// Vectors

#[test]
fn vector_primitives() {
    assert_eq!(
        output(
            "v ::= $VECTOR(2)\n$VECTOR_SET(v, 0, 7)\n$PRINTLN(v)\n\
             $PRINTLN($VECTOR_GET(v, 1))\n$PRINTLN($VECTOR_GET(v, 9))\n\
             $PRINTLN($VECTOR_SET(v, 9, 1))\n\
             $PRINTLN($VECTOR_LEN($VECTOR_RESIZE(v, 3)))\n$PRINTLN(v)"
        ),
        "[7, nil]\nnil\nnil\nnil\n3\n[7, nil, nil]\n"
    );
}

#[test]
fn vectors_are_shared() {
    assert_eq!(
        output("v ::= $VECTOR(1)\nw ::= v\n$VECTOR_SET(w, 0, x)\n$PRINTLN(v)"),
        "[x]\n"
    );
}

#[test]
fn negative_sizes_yield_nil() {
    assert_eq!(
        output("$PRINTLN($VECTOR($SUB(0, 1)))\n$PRINTLN($VECTOR_RESIZE($VECTOR(1), $SUB(0, 1)))"),
        "nil\nnil\n"
    );
}

#[test]
fn unallocatable_sizes_yield_nil() {
    assert_eq!(
        output(
            "$PRINTLN($VECTOR(9223372036854775807))\n\
             v ::= $VECTOR(1)\n\
             $PRINTLN($VECTOR_RESIZE(v, 9223372036854775807))\n\
             $PRINTLN($VECTOR_LEN(v))"
        ),
        "nil\nnil\n1\n"
    );
}

// Comparison and types

#[test]
fn comparisons() {
    assert_eq!(
        output(
            "$PRINTLN($EQUALS(1, \"1\"))\n$PRINTLN($EQUALS(1, 2))\n\
             $PRINTLN($GREATER(3, 2))\n$PRINTLN($GREATER(2, 3))\n$PRINTLN($GREATER(2.5, 1))"
        ),
        "1\nnil\n1\nnil\nnil\n"
    );
}

#[test]
fn typed_values() {
    assert_eq!(
        output(
            "t ::= $TYPEDEF(5, Celsius, Number)\n$PRINTLN(t)\n\
             $PRINTLN($TYPEOF(t, Celsius))\n$PRINTLN($TYPEOF(t, Number))\n$PRINTLN($TYPEOF(t, int))\n\
             $PRINTLN($TYPEOF(5, int))\n$PRINTLN($UNTYPE(t))\n$PRINTLN($UNTYPE(5))"
        ),
        "<Celsius 5>\n1\n1\nnil\n1\n5\nnil\n"
    );
}

#[test]
fn unions() {
    assert_eq!(
        output("$PRINTLN($UNION(1, \"a\"))\n$PRINTLN($TYPEOF($UNION(1), Union))"),
        "<Union 1 a>\n1\n"
    );
}

// Control flow

#[test]
fn if_only_evaluates_the_chosen_branch() {
    assert_eq!(
        output(
            "$PRINTLN($IF(0, yes, no))\n$PRINTLN($IF($NIL(), yes, no))\n\
             $IF(1, $PRINTLN(a), $PRINTLN(b))"
        ),
        "yes\nno\na\n"
    );
}

#[test]
fn while_loops() {
    assert_eq!(
        output(
            "$DEF(i, 0)\n\
             $WHILE($GREATER(3, $GET(i)), { $PRINT($GET(i)); $SET(i, $ADD($GET(i), 1)) })"
        ),
        "012"
    );
}

#[test]
fn foreach_over_collections() {
    assert_eq!(
        output(
            "$FOREACH($FLATTEN($QUOTE(1, 2, 3), \",\"), x, $PRINT(x))\n\
             $FOREACH($CONS(4, $CONS(5, $NIL())), x, $PRINT(x))\n\
             $FOREACH(\"AB\", b, $PRINT(b))\n\
             $FOREACH(7, x, $PRINT(x))"
        ),
        "123456566"
    );
}

#[test]
fn foreach_substitutes_fresh_copies() {
    // Each iteration starts from the original body.
    assert_eq!(
        output("$FOREACH($FLATTEN($QUOTE(a, b), \",\"), x, $PRINT($CAT(x, x)))"),
        "aabb"
    );
}

// Bindings

#[test]
fn def_shadows_in_inner_blocks() {
    assert_eq!(
        output("$DEF(n, 1)\n{ $DEF(n, 2); $PRINT($GET(n)) }\n$PRINT($GET(n))"),
        "21"
    );
}

#[test]
fn set_writes_the_owning_scope() {
    assert_eq!(output("$DEF(n, 1)\n{ $SET(n, 5) }\n$PRINT($GET(n))"), "5");
}

#[test]
fn set_of_an_unbound_local_creates_it_here() {
    assert_eq!(
        output("{ $SET(fresh, 3); $PRINT($GET(fresh)) }\n$PRINT($GET(fresh))"),
        "3nil"
    );
}

#[test]
fn locals_and_definitions_are_separate() {
    assert_eq!(output("x ::= 1\n$DEF(x, 2)\n$PRINT(x)\n$PRINT($GET(x))"), "12");
}

#[test]
fn export_defines_a_signature() {
    assert_eq!(
        output("$EXPORT($QUOTE(int twice), $QUOTE($MUL($1, 2)))\n$PRINTLN(4 twice)"),
        "8\n"
    );
}

#[test]
fn export_without_an_accepting_scope_is_dropped() {
    assert_eq!(output("$ISOLATE($EXPORT($QUOTE(z), 1))\n$PRINTLN(z)"), "z\n");
}

// I/O

#[test]
fn printing() {
    assert_eq!(output("$PRINT(a)\n$PRINTLN()\n$PRINTLN(b)"), "a\nb\n");
}

#[test]
fn writing_to_the_output_sink() {
    let run = run("$WRITE(\"hi\")\n$WRITEB(10)\n$WRITEB(321)\n$WRITEB(x)");
    assert!(run.result.is_ok());
    assert_eq!(run.written, b"hi\nA");
    assert_eq!(run.printed, "");
}

#[test]
fn scope_dump_shows_locals() {
    let printed = output("$DEF(i, 0)\n$SCOPE()");
    assert!(printed.starts_with("scope level 0:\n"), "{printed}");
    assert!(printed.contains("  local i = 0\n"), "{printed}");
    assert!(printed.contains("$ADD: @builtin:$ADD"), "{printed}");
}

#[test]
fn load_of_a_missing_file_yields_nil() {
    assert_eq!(output("$PRINTLN($LOAD(\"no/such/file.gsm\"))"), "nil\n");
}

// Meta

#[test]
fn quote_returns_the_raw_tree() {
    assert_eq!(
        output("$PRINTLN($QUOTE(a + b))\n$PRINTLN($QUOTE(a, b))"),
        "(+ a b)\n(, a b)\n"
    );
}

#[test]
fn eval_evaluates_twice() {
    assert_eq!(output("$PRINTLN($EVAL($QUOTE($ADD(1, 2))))"), "3\n");
}

#[test]
fn lambdas() {
    assert_eq!(
        output("double ::= $LAMBDA(x, $MUL(x, 2))\n$PRINTLN(double(21))\n$PRINTLN(double)"),
        "42\n@builtin:COMPOSED\n"
    );
}

#[test]
fn lambda_needs_a_symbol_parameter() {
    assert_eq!(output("$PRINTLN($LAMBDA(1, 2))"), "nil\n");
}

#[test]
fn replace_substitutes_everywhere() {
    assert_eq!(
        output("$PRINTLN($REPLACE($QUOTE(a + a), a, 1))\n$PRINTLN($REPLACE($QUOTE(a ::= a), a, 1))"),
        "(+ 1 1)\n(::= 1 1)\n"
    );
}

#[test]
fn flatten_splits_on_any_operator() {
    assert_eq!(
        output("$PRINTLN($FLATTEN($QUOTE(1 + 2 + 3), \"+\"))\n$PRINTLN($FLATTEN($QUOTE(1 + 2), \",\"))"),
        "[1, 2, 3]\n[(+ 1 2)]\n"
    );
}

#[test]
fn raise_points_at_the_target() {
    let err = run("$RAISE(here, \"boom\")").error();
    assert_eq!(err.code(), ErrorCode::E6004);
    assert_eq!(err.kind, EvalErrorKind::Raised { message: "boom".into() });
    assert_eq!(err.span.map(|s| s.start), Some(7));
}

#[test]
fn raise_has_a_default_message() {
    let err = run("$RAISE(x)").error();
    assert_eq!(
        err.kind,
        EvalErrorKind::Raised {
            message: "An error occurred".into()
        }
    );
}

#[test]
fn raise_stops_the_program() {
    let run = run("$PRINTLN(before)\n$RAISE(x)\n$PRINTLN(after)");
    assert_eq!(run.printed, "before\n");
    assert!(run.result.is_err());
}

#[test]
fn iota_counts_per_interpreter() {
    assert_eq!(output("$PRINT($IOTA())\n$PRINT($IOTA())\n$PRINT($IOTA())"), "012");
    assert_eq!(output("$PRINT($IOTA())"), "0");
}

#[test]
fn isolate_sees_only_primitives() {
    assert_eq!(
        output("x ::= 5\n$PRINTLN($ISOLATE(x))\n$PRINTLN($ISOLATE($ADD(1, 2)))"),
        "x\n3\n"
    );
}
