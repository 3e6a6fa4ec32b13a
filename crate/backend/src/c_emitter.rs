//! Emits C99 source from a type-checked program.
//!
//! Every binary and unary operation is wrapped in its own parentheses, so
//! the generated code never relies on C operator precedence.

use crate::codegen::CodegenOptions;
use minic_ir::ast::{Expression, Function, Program, Statement};

pub fn emit(program: &Program, options: &CodegenOptions) -> String {
    let mut emitter = CEmitter::new(options);
    emitter.emit_program(program);
    emitter.out
}

struct CEmitter<'a> {
    out: String,
    depth: usize,
    options: &'a CodegenOptions,
}

impl<'a> CEmitter<'a> {
    fn new(options: &'a CodegenOptions) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            options,
        }
    }

    /// Writes one line at the current indentation depth
    fn line(&mut self, text: &str) {
        if self.options.pretty_print {
            for _ in 0..self.depth {
                self.out.push_str("    ");
            }
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn emit_program(&mut self, program: &Program) {
        if self.options.emit_comments {
            self.line("// Generated by minic");
        }
        self.line("#include <stdio.h>");
        self.line("#include <stdbool.h>");
        self.line("");

        // Forward declarations keep definition order irrelevant to C.
        for function in &program.functions {
            let signature = self.signature(function);
            self.line(&format!("{signature};"));
        }
        self.line("");

        for (index, function) in program.functions.iter().enumerate() {
            if index > 0 {
                self.line("");
            }
            self.emit_function(function);
        }
    }

    fn signature(&self, function: &Function) -> String {
        let params = if function.parameters.is_empty() {
            "void".to_string()
        } else {
            function
                .parameters
                .iter()
                .map(|p| format!("{} {}", p.param_type.c_name(), p.name))
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!(
            "{} {}({})",
            function.return_type.c_name(),
            function.name,
            params
        )
    }

    fn emit_function(&mut self, function: &Function) {
        let signature = self.signature(function);
        self.line(&format!("{signature} {{"));
        self.depth += 1;
        for statement in &function.body {
            self.emit_statement(statement);
        }
        self.depth -= 1;
        self.line("}");
    }

    fn emit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl(decl) => {
                let init = expression(&decl.init);
                self.line(&format!(
                    "{} {} = {};",
                    decl.declared_type.c_name(),
                    decl.name,
                    init
                ));
            }
            Statement::Assign(assign) => {
                self.line(&format!("{} = {};", assign.name, expression(&assign.value)));
            }
            Statement::If(if_stmt) => {
                self.line(&format!("if ({}) {{", expression(&if_stmt.condition)));
                self.emit_block_body(&if_stmt.then_block);
                match &if_stmt.else_block {
                    Some(else_block) => {
                        self.line("} else {");
                        self.emit_block_body(else_block);
                        self.line("}");
                    }
                    None => self.line("}"),
                }
            }
            Statement::While(while_stmt) => {
                self.line(&format!("while ({}) {{", expression(&while_stmt.condition)));
                self.emit_block_body(&while_stmt.body);
                self.line("}");
            }
            Statement::Return(return_stmt) => match &return_stmt.value {
                Some(value) => self.line(&format!("return {};", expression(value))),
                None => self.line("return;"),
            },
            Statement::Expression(expr) => {
                self.line(&format!("{};", expression(expr)));
            }
            Statement::Block(statements) => {
                self.line("{");
                self.depth += 1;
                for inner in statements {
                    self.emit_statement(inner);
                }
                self.depth -= 1;
                self.line("}");
            }
        }
    }

    /// Emits the statements of a block whose braces the caller printed
    fn emit_block_body(&mut self, block: &Statement) {
        self.depth += 1;
        match block {
            Statement::Block(statements) => {
                for statement in statements {
                    self.emit_statement(statement);
                }
            }
            other => self.emit_statement(other),
        }
        self.depth -= 1;
    }
}

/// Renders an expression as C text
fn expression(expr: &Expression) -> String {
    match expr {
        Expression::IntLiteral(e) => e.value.to_string(),
        Expression::BoolLiteral(e) => if e.value { "true" } else { "false" }.to_string(),
        Expression::Variable(e) => e.name.clone(),
        Expression::Binary(e) => format!(
            "({} {} {})",
            expression(&e.left),
            e.operator,
            expression(&e.right)
        ),
        Expression::Unary(e) => format!("({}{})", e.operator, expression(&e.operand)),
        Expression::Call(e) => {
            if e.name == "print" {
                let argument = e
                    .arguments
                    .first()
                    .map(expression)
                    .unwrap_or_default();
                return format!("printf(\"%d\\n\", {argument})");
            }
            let arguments = e
                .arguments
                .iter()
                .map(expression)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", e.name, arguments)
        }
    }
}
