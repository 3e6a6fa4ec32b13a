use crate::test_utils::first_failure;
use minic_error::ErrorCode;

#[test]
fn missing_semicolon_points_at_the_following_token() {
    let failure = first_failure("func main() : int { var x = 1 return x; }");
    assert_eq!(failure.stage, "parser");
    assert_eq!(failure.code, ErrorCode::InvalidInput);
    assert!(
        failure
            .message
            .contains("Expected ';' after variable declaration")
    );
    // The offending token is the `return` keyword.
    let location = failure.location.expect("parse failures carry a position");
    assert_eq!((location.line, location.column), (1, 31));
}

#[test]
fn empty_program_must_contain_a_function() {
    let failure = first_failure("   \n\n");
    assert_eq!(failure.stage, "parser");
    assert!(
        failure
            .message
            .contains("Program must contain at least one function")
    );
}

#[test]
fn top_level_input_must_be_a_function() {
    let failure = first_failure("1 + 2;");
    assert_eq!(failure.stage, "parser");
    assert!(failure.message.contains("Expected 'func' at top level"));
}

#[test]
fn trailing_comma_in_parameters_is_rejected() {
    let failure = first_failure("func f(a: int,) : int { return a; }");
    assert_eq!(failure.stage, "parser");
    assert!(failure.message.contains("Expected parameter name"));
}

#[test]
fn trailing_comma_in_arguments_is_rejected() {
    let failure = first_failure("func f(a: int) : int { return f(1,); }");
    assert_eq!(failure.stage, "parser");
    assert!(failure.message.contains("Expected expression"));
}

#[test]
fn missing_return_type_annotation_is_rejected() {
    let failure = first_failure("func f() : { return 0; }");
    assert!(failure.message.contains("Expected type 'int' or 'bool'"));
}

#[test]
fn missing_parens_around_condition_are_rejected() {
    let failure = first_failure("func f() : int { if true { return 1; } return 0; }");
    assert!(failure.message.contains("Expected '(' after 'if'"));
}

#[test]
fn condition_bodies_must_be_blocks() {
    let failure = first_failure("func f(c: bool) : int { while (c) return 1; }");
    assert!(failure.message.contains("Expected '{' after while condition"));
}

#[test]
fn unterminated_block_is_rejected() {
    let failure = first_failure("func f() : int { return 0;");
    assert!(failure.message.contains("Expected '}' after block"));
}

#[test]
fn missing_expression_reports_the_found_token() {
    let failure = first_failure("func f() : int { return 1 + ; }");
    assert!(failure.message.contains("Expected expression, found ';'"));
}
