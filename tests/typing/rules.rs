use minic_frontend::lexer::tokenize;
use minic_frontend::parser::parse;
use minic_frontend::type_checker::check;
use minic_ir::ast::{Expression, Program, Statement};
use minic_types::Type;

fn checked(source: &str) -> Program {
    let mut program = parse(&tokenize(source)).expect("the program should parse");
    check(&mut program).expect("the program should type check");
    program
}

#[test]
fn var_decl_infers_the_initializer_type() {
    let program = checked("func f() : int { var x = 1; var b = true; return x; }");
    let body = &program.functions[0].body;
    let Statement::VarDecl(x) = &body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(x.declared_type, Type::Int);
    let Statement::VarDecl(b) = &body[1] else {
        panic!("expected a declaration");
    };
    assert_eq!(b.declared_type, Type::Bool);
}

#[test]
fn expression_slots_are_rewritten() {
    let program = checked(
        "func flag(n: int) : bool { return n < 3; } \
         func main() : int { var ok = flag(2); var m = 1 + 2; return m; }",
    );

    let Statement::Return(ret) = &program.functions[0].body[0] else {
        panic!("expected a return");
    };
    assert_eq!(ret.value.as_ref().unwrap().ty(), Type::Bool);

    let body = &program.functions[1].body;
    let Statement::VarDecl(ok) = &body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(ok.init.ty(), Type::Bool);
    assert_eq!(ok.declared_type, Type::Bool);
    let Statement::VarDecl(m) = &body[1] else {
        panic!("expected a declaration");
    };
    assert_eq!(m.init.ty(), Type::Int);
}

#[test]
fn variables_resolve_through_the_scope_chain() {
    checked(
        "func f(n: int) : int { \
         var total = 0; \
         while (n > 0) { total = total + n; n = n - 1; } \
         return total; \
         }",
    );
}

#[test]
fn shadowing_in_a_child_scope_is_legal() {
    let program = checked(
        "func f() : int { var x = 1; { var x = true; var y = x && false; } return x; }",
    );
    // The outer `x` keeps its type; the return checks as int.
    let Statement::VarDecl(outer) = &program.functions[0].body[0] else {
        panic!("expected a declaration");
    };
    assert_eq!(outer.declared_type, Type::Int);
}

#[test]
fn print_is_preregistered() {
    let program = checked("func main() : int { print(42); return 0; }");
    let Statement::Expression(Expression::Call(call)) = &program.functions[0].body[0] else {
        panic!("expected a call statement");
    };
    assert_eq!(call.expr_type, Type::Void);
}

#[test]
fn functions_may_be_called_before_their_definition() {
    checked(
        "func main() : int { return late(2); } \
         func late(n: int) : int { return n * 2; }",
    );
}

#[test]
fn equality_accepts_matching_bool_operands() {
    checked("func f(a: bool, b: bool) : bool { return a == b; }");
}

#[test]
fn expression_statements_accept_any_type() {
    checked("func f() : int { 1 + 2; true && false; f(); return 0; }");
}

#[test]
fn recursion_type_checks() {
    checked(
        "func fib(n: int) : int { \
         if (n < 2) { return n; } \
         return fib(n - 1) + fib(n - 2); \
         }",
    );
}
