use crate::test_utils::first_failure;
use minic_error::ErrorCode;

fn type_error(source: &str) -> String {
    let failure = first_failure(source);
    assert_eq!(failure.stage, "type_checker");
    assert_eq!(failure.code, ErrorCode::InvalidInput);
    failure.message
}

#[test]
fn arithmetic_requires_int_operands() {
    let message = type_error("func main() : int { var x = true + 1; return 0; }");
    assert!(message.contains("Arithmetic operator requires int"));
}

#[test]
fn undefined_variable_is_reported_by_name() {
    let message = type_error("func main() : int { return y; }");
    assert!(message.contains("Undefined variable 'y'"));
}

#[test]
fn return_type_must_match_the_declaration() {
    let message = type_error("func f() : bool { return 1; } func main() : int { return 0; }");
    assert!(message.contains("Return type mismatch"));
}

#[test]
fn bare_return_in_a_value_function_is_a_mismatch() {
    let message = type_error("func f() : int { return; }");
    assert!(message.contains("Return type mismatch"));
}

#[test]
fn duplicate_functions_are_rejected() {
    let message = type_error(
        "func f() : int { return 1; } func f() : int { return 2; } \
         func main() : int { return 0; }",
    );
    assert!(message.contains("Duplicate function 'f'"));
}

#[test]
fn print_cannot_be_redefined() {
    let message = type_error("func print(n: int) : int { return n; }");
    assert!(message.contains("Duplicate function 'print'"));
}

#[test]
fn duplicate_parameters_are_rejected() {
    let message = type_error("func f(a: int, a: int) : int { return a; }");
    assert!(message.contains("Duplicate parameter 'a'"));
}

#[test]
fn duplicate_variables_in_the_same_scope_are_rejected() {
    let message = type_error("func f() : int { var x = 1; var x = 2; return x; }");
    assert!(message.contains("Duplicate variable 'x'"));
}

#[test]
fn if_condition_must_be_bool() {
    let message = type_error("func f() : int { if (1) { return 1; } return 0; }");
    assert!(message.contains("If condition must be bool, found int"));
}

#[test]
fn while_condition_must_be_bool() {
    let message = type_error("func f() : int { while (1) { return 1; } return 0; }");
    assert!(message.contains("While condition must be bool, found int"));
}

#[test]
fn logical_operators_require_bool_operands() {
    let message = type_error("func f() : bool { return 1 && 2; }");
    assert!(message.contains("Logical operator requires bool operands"));
}

#[test]
fn comparison_requires_int_operands() {
    let message = type_error("func f() : bool { return true < false; }");
    assert!(message.contains("Comparison operator requires int"));
}

#[test]
fn equality_requires_matching_types() {
    let message = type_error("func f() : bool { return 1 == true; }");
    assert!(message.contains("Equality operator requires matching operand types"));
}

#[test]
fn not_requires_a_bool_operand() {
    let message = type_error("func f() : bool { return !1; }");
    assert!(message.contains("Operator '!' requires a bool operand"));
}

#[test]
fn call_arity_is_checked() {
    let message = type_error(
        "func add(a: int, b: int) : int { return a + b; } \
         func main() : int { return add(1); }",
    );
    assert!(message.contains("Function 'add' expects 2 argument(s), found 1"));
}

#[test]
fn argument_types_are_checked() {
    let message = type_error(
        "func add(a: int, b: int) : int { return a + b; } \
         func main() : int { return add(1, true); }",
    );
    assert!(message.contains("Argument 2 of 'add' must be int, found bool"));
}

#[test]
fn unknown_functions_are_reported() {
    let message = type_error("func main() : int { return missing(); }");
    assert!(message.contains("Undefined function 'missing'"));
}

#[test]
fn variables_cannot_be_called() {
    let message = type_error("func main() : int { var x = 1; return x(); }");
    assert!(message.contains("'x' is not a function"));
}

#[test]
fn functions_cannot_be_read_as_variables() {
    let message = type_error("func f() : int { return 1; } func main() : int { return f; }");
    assert!(message.contains("'f' is a function, not a variable"));
}

#[test]
fn functions_cannot_be_assigned() {
    let message = type_error(
        "func f() : int { return 1; } func main() : int { f = 2; return 0; }",
    );
    assert!(message.contains("'f' is a function and cannot be assigned"));
}

#[test]
fn assignments_must_preserve_the_variable_type() {
    let message = type_error("func main() : int { var x = 1; x = true; return x; }");
    assert!(message.contains("Assignment type mismatch"));
}

#[test]
fn void_cannot_initialize_a_variable() {
    let message = type_error("func main() : int { var x = print(1); return 0; }");
    assert!(message.contains("Cannot initialize variable 'x' with a void value"));
}

#[test]
fn out_of_scope_variables_are_undefined() {
    let message = type_error(
        "func main() : int { { var inner = 1; } return inner; }",
    );
    assert!(message.contains("Undefined variable 'inner'"));
}

#[test]
fn failures_carry_source_positions() {
    let failure = first_failure("func main() : int {\n    return y;\n}");
    let location = failure.location.expect("type failures carry a position");
    assert_eq!(location.line, 2);
}
