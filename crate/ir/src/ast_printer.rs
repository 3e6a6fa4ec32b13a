//! Prints an AST back to minic source form.
//!
//! The printed text re-parses to a structurally identical tree: every
//! binary and unary operation is parenthesized, so no precedence is lost.

use crate::ast::{Expression, Function, Program, Statement};

/// Renders a program in canonical source form
pub fn print_program(program: &Program) -> String {
    let mut printer = AstPrinter::new();
    for (index, function) in program.functions.iter().enumerate() {
        if index > 0 {
            printer.out.push('\n');
        }
        printer.print_function(function);
    }
    printer.out
}

struct AstPrinter {
    out: String,
    depth: usize,
}

impl AstPrinter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn print_function(&mut self, function: &Function) {
        let params = function
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.param_type))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(&format!(
            "func {}({}) : {} {{",
            function.name, params, function.return_type
        ));
        self.depth += 1;
        for statement in &function.body {
            self.print_statement(statement);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn print_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl(s) => {
                self.line(&format!("var {} = {};", s.name, print_expression(&s.init)));
            }
            Statement::Assign(s) => {
                self.line(&format!("{} = {};", s.name, print_expression(&s.value)));
            }
            Statement::If(s) => {
                self.line(&format!("if ({}) {{", print_expression(&s.condition)));
                self.print_block_body(&s.then_block);
                match &s.else_block {
                    Some(else_block) => {
                        self.line("} else {");
                        self.print_block_body(else_block);
                        self.line("}");
                    }
                    None => self.line("}"),
                }
            }
            Statement::While(s) => {
                self.line(&format!("while ({}) {{", print_expression(&s.condition)));
                self.print_block_body(&s.body);
                self.line("}");
            }
            Statement::Return(s) => match &s.value {
                Some(value) => self.line(&format!("return {};", print_expression(value))),
                None => self.line("return;"),
            },
            Statement::Expression(e) => {
                self.line(&format!("{};", print_expression(e)));
            }
            Statement::Block(stmts) => {
                self.line("{");
                self.depth += 1;
                for inner in stmts {
                    self.print_statement(inner);
                }
                self.depth -= 1;
                self.line("}");
            }
        }
    }

    /// Prints the statements of a block without emitting its braces,
    /// which the surrounding statement already produced.
    fn print_block_body(&mut self, block: &Statement) {
        self.depth += 1;
        match block {
            Statement::Block(stmts) => {
                for statement in stmts {
                    self.print_statement(statement);
                }
            }
            other => self.print_statement(other),
        }
        self.depth -= 1;
    }
}

/// Renders a single expression, fully parenthesized
pub fn print_expression(expression: &Expression) -> String {
    match expression {
        Expression::IntLiteral(e) => e.value.to_string(),
        Expression::BoolLiteral(e) => e.value.to_string(),
        Expression::Variable(e) => e.name.clone(),
        Expression::Binary(e) => format!(
            "({} {} {})",
            print_expression(&e.left),
            e.operator,
            print_expression(&e.right)
        ),
        Expression::Unary(e) => format!("({}{})", e.operator, print_expression(&e.operand)),
        Expression::Call(e) => {
            let arguments = e
                .arguments
                .iter()
                .map(print_expression)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", e.name, arguments)
        }
    }
}
