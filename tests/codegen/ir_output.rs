use crate::test_utils::{FACTORIAL, compile_to_ir};
use minic::compiler::{CompileOptions, compile_source};
use minic_backend::Target;

#[test]
fn factorial_compiles_to_ir() {
    let output = compile_to_ir(FACTORIAL);

    assert!(output.contains("declare void @print(i32)"));
    assert!(output.contains("define i32 @factorial(i32 %n.param)"));
    assert!(output.contains("define i32 @main()"));
    assert!(output.contains("entry:"));
    assert!(output.contains("icmp gt"));
    assert!(output.contains("br i1 "));
    assert!(output.contains("call void @print(i32 "));
    assert!(output.contains("ret i32 "));
}

#[test]
fn parameters_use_the_slot_convention() {
    let output = compile_to_ir("func id(n: int) : int { return n; }");
    assert!(output.contains("%n = alloca i32"));
    assert!(output.contains("store i32 %n.param, %n"));
    assert!(output.contains("= load %n"));
}

#[test]
fn while_lowers_to_cond_body_end() {
    let output = compile_to_ir(
        "func f(n: int) : int { while (n > 0) { n = n - 1; } return n; }",
    );
    assert!(output.contains("br label %Lcond0"));
    assert!(output.contains("Lcond0:"));
    assert!(output.contains("br i1 %t"));
    assert!(output.contains("label %Lbody0, label %Lend0"));
    assert!(output.contains("Lbody0:"));
    assert!(output.contains("Lend0:"));
}

#[test]
fn if_else_lowers_to_then_else_end() {
    let output = compile_to_ir(
        "func f(c: bool) : int { if (c) { return 1; } else { return 2; } }",
    );
    assert!(output.contains("label %Lthen0, label %Lelse0"));
    assert!(output.contains("Lthen0:"));
    assert!(output.contains("Lelse0:"));
    assert!(output.contains("Lend0:"));
}

#[test]
fn if_without_else_branches_to_end() {
    let output = compile_to_ir("func f(c: bool) : int { if (c) { return 1; } return 0; }");
    assert!(output.contains("label %Lthen0, label %Lend0"));
    assert!(!output.contains("Lelse"));
}

#[test]
fn literals_become_constants() {
    let output = compile_to_ir("func f() : int { var x = 5; var b = true; return x; }");
    assert!(output.contains("= const i32 5"));
    assert!(output.contains("= const i1 1"));
}

#[test]
fn logical_operators_do_not_branch() {
    let output = compile_to_ir(
        "func f(a: bool, b: bool) : bool { return a && b || !a; }",
    );
    assert!(output.contains("= and i1"));
    assert!(output.contains("= or i1"));
    assert!(output.contains("= xor i1"));
    // Both operands evaluate unconditionally; the only branches would be
    // control-flow statements, of which there are none.
    assert!(!output.contains("br i1"));
}

#[test]
fn calls_carry_argument_types() {
    let output = compile_to_ir(
        "func add(a: int, b: int) : int { return a + b; } \
         func main() : int { return add(1, 2); }",
    );
    assert!(output.contains("= call i32 @add(i32 %t"));
}

#[test]
fn temporaries_increase_monotonically() {
    let output = compile_to_ir("func f() : int { return 1 + 2 + 3; }");
    let t0 = output.find("%t0 = const i32 1").unwrap();
    let t1 = output.find("%t1 = const i32 2").unwrap();
    let t2 = output.find("%t2 = add i32 %t0, %t1").unwrap();
    assert!(t0 < t1 && t1 < t2);
    assert!(output.contains("%t4 = add i32 %t2, %t3"));
}

#[test]
fn fall_through_bodies_get_a_default_terminator() {
    let output = compile_to_ir("func f(n: int) : int { while (n > 0) { n = n - 1; } }");
    assert!(output.contains("ret i32 0"));
}

#[test]
fn local_declarations_allocate_slots() {
    let output = compile_to_ir("func f() : int { var x = 7; x = x + 1; return x; }");
    assert!(output.contains("%x = alloca i32"));
    assert!(output.contains("store i32 %t0, %x"));
}

#[test]
fn header_comment_is_opt_in() {
    let options = CompileOptions {
        target: Target::Ir,
        emit_comments: true,
        ..CompileOptions::default()
    };
    let output = compile_source(FACTORIAL, &options).unwrap().unwrap();
    assert!(output.starts_with("; Generated by minic\n"));
}

#[test]
fn compact_mode_drops_instruction_indentation() {
    let options = CompileOptions {
        target: Target::Ir,
        pretty_print: false,
        ..CompileOptions::default()
    };
    let output = compile_source("func f() : int { return 0; }", &options)
        .unwrap()
        .unwrap();
    assert!(output.lines().all(|line| !line.starts_with(' ')));
}
