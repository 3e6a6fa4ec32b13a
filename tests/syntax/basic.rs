use crate::test_utils::FACTORIAL;
use minic_frontend::lexer::tokenize;
use minic_frontend::parser::parse;
use minic_ir::ast::{BinaryOperator, Expression, Program, Statement};
use minic_types::Type;

fn parse_source(source: &str) -> Program {
    parse(&tokenize(source)).expect("the program should parse")
}

/// The expression of the only return statement in a one-function program
fn return_expression(source: &str) -> Expression {
    let program = parse_source(source);
    let function = &program.functions[0];
    for statement in &function.body {
        if let Statement::Return(return_stmt) = statement {
            return return_stmt.value.clone().expect("a return value");
        }
    }
    panic!("no return statement found");
}

#[test]
fn parses_the_factorial_program() {
    let program = parse_source(FACTORIAL);
    assert_eq!(program.functions.len(), 2);

    let factorial = &program.functions[0];
    assert_eq!(factorial.name, "factorial");
    assert_eq!(factorial.parameters.len(), 1);
    assert_eq!(factorial.parameters[0].name, "n");
    assert_eq!(factorial.parameters[0].param_type, Type::Int);
    assert_eq!(factorial.return_type, Type::Int);
    assert!(
        factorial
            .body
            .iter()
            .any(|statement| matches!(statement, Statement::While(_)))
    );

    let main = &program.functions[1];
    assert_eq!(main.name, "main");
    assert!(main.parameters.is_empty());
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expression = return_expression("func f() : int { return 1 + 2 * 3; }");
    let Expression::Binary(add) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(add.operator, BinaryOperator::Add);
    let Expression::Binary(mul) = *add.right else {
        panic!("expected the right operand to be a product");
    };
    assert_eq!(mul.operator, BinaryOperator::Mul);
}

#[test]
fn binary_operators_are_left_associative() {
    let expression = return_expression("func f() : int { return 1 - 2 - 3; }");
    let Expression::Binary(outer) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operator, BinaryOperator::Sub);
    let Expression::Binary(inner) = *outer.left else {
        panic!("expected the left operand to be the first subtraction");
    };
    assert_eq!(inner.operator, BinaryOperator::Sub);
    assert!(matches!(*outer.right, Expression::IntLiteral(_)));
}

#[test]
fn logical_or_is_the_loosest_operator() {
    let expression =
        return_expression("func f() : bool { return true || false && true == false; }");
    let Expression::Binary(or) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(or.operator, BinaryOperator::Or);
    let Expression::Binary(and) = *or.right else {
        panic!("expected the right operand to be a conjunction");
    };
    assert_eq!(and.operator, BinaryOperator::And);
}

#[test]
fn parentheses_group_without_creating_nodes() {
    let expression = return_expression("func f() : int { return (1 + 2) * 3; }");
    let Expression::Binary(mul) = expression else {
        panic!("expected a binary expression");
    };
    assert_eq!(mul.operator, BinaryOperator::Mul);
    let Expression::Binary(add) = *mul.left else {
        panic!("expected the left operand to be the parenthesized sum");
    };
    assert_eq!(add.operator, BinaryOperator::Add);

    let nested = return_expression("func f() : int { return (((7))); }");
    assert!(matches!(nested, Expression::IntLiteral(_)));
}

#[test]
fn unary_not_nests() {
    let expression = return_expression("func f() : bool { return !!true; }");
    let Expression::Unary(outer) = expression else {
        panic!("expected a unary expression");
    };
    assert!(matches!(*outer.operand, Expression::Unary(_)));
}

#[test]
fn identifier_followed_by_assign_parses_as_assignment() {
    let program = parse_source("func f() : int { var x = 1; x = 2; return x; }");
    assert!(matches!(program.functions[0].body[1], Statement::Assign(_)));
}

#[test]
fn identifier_without_assign_parses_as_expression_statement() {
    let program = parse_source("func f() : int { var x = 1; x == 2; f(); return x; }");
    let body = &program.functions[0].body;
    assert!(matches!(
        body[1],
        Statement::Expression(Expression::Binary(_))
    ));
    assert!(matches!(body[2], Statement::Expression(Expression::Call(_))));
}

#[test]
fn if_with_and_without_else() {
    let program = parse_source(
        "func f(c: bool) : int { if (c) { return 1; } if (c) { return 2; } else { return 3; } }",
    );
    let body = &program.functions[0].body;
    let Statement::If(without_else) = &body[0] else {
        panic!("expected an if statement");
    };
    assert!(without_else.else_block.is_none());
    let Statement::If(with_else) = &body[1] else {
        panic!("expected an if statement");
    };
    assert!(with_else.else_block.is_some());
}

#[test]
fn bare_blocks_are_statements() {
    let program = parse_source("func f() : int { { var x = 1; } return 0; }");
    assert!(matches!(program.functions[0].body[0], Statement::Block(_)));
}

#[test]
fn calls_parse_argument_lists() {
    let expression = return_expression("func f() : int { return g(1, 2 + 3, h()); }");
    let Expression::Call(call) = expression else {
        panic!("expected a call");
    };
    assert_eq!(call.name, "g");
    assert_eq!(call.arguments.len(), 3);
}
