//! Emits the human-readable SSA-like textual IR.
//!
//! Three name families are used: integer-indexed temporaries `%tN`,
//! labels `L...N`, and source-variable slots `%name`. The temporary and
//! label counters increase monotonically over one code-gen run. Variable
//! slots are `alloca i32` regardless of the source type; boolean
//! temporaries are `i1`. Logical `&&` and `||` evaluate both operands and
//! combine them with `and i1` / `or i1`; no short-circuit branches are
//! synthesized.

use crate::codegen::CodegenOptions;
use minic_ir::ast::{
    BinaryOperator, Expression, Function, Program, Statement, UnaryOperator,
};
use minic_types::Type;

pub fn emit(program: &Program, options: &CodegenOptions) -> String {
    let mut emitter = IrEmitter::new(options);
    emitter.emit_program(program);
    emitter.out
}

struct IrEmitter<'a> {
    out: String,
    /// Next temporary index (`%tN`)
    next_temp: usize,
    /// Next label index (`L...N`)
    next_label: usize,
    options: &'a CodegenOptions,
}

impl<'a> IrEmitter<'a> {
    fn new(options: &'a CodegenOptions) -> Self {
        Self {
            out: String::new(),
            next_temp: 0,
            next_label: 0,
            options,
        }
    }

    /// Writes an instruction line, indented inside a function body
    fn instruction(&mut self, text: &str) {
        if self.options.pretty_print {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Writes a column-zero line (labels, define/declare, braces)
    fn line(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn fresh_temp(&mut self) -> String {
        let temp = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        temp
    }

    fn fresh_label_id(&mut self) -> usize {
        let id = self.next_label;
        self.next_label += 1;
        id
    }

    fn emit_program(&mut self, program: &Program) {
        if self.options.emit_comments {
            self.line("; Generated by minic");
        }
        self.line("declare void @print(i32)");
        self.line("");

        for (index, function) in program.functions.iter().enumerate() {
            if index > 0 {
                self.line("");
            }
            self.emit_function(function);
        }
    }

    fn emit_function(&mut self, function: &Function) {
        let params = function
            .parameters
            .iter()
            .map(|p| format!("{} %{}.param", p.param_type.ir_name(), p.name))
            .collect::<Vec<_>>()
            .join(", ");
        self.line(&format!(
            "define {} @{}({}) {{",
            function.return_type.ir_name(),
            function.name,
            params
        ));
        self.line("entry:");

        // Parameters share the load/store convention of locals: each one
        // gets a slot initialized from its incoming value.
        for parameter in &function.parameters {
            self.instruction(&format!("%{} = alloca i32", parameter.name));
            self.instruction(&format!(
                "store i32 %{}.param, %{}",
                parameter.name, parameter.name
            ));
        }

        for statement in &function.body {
            self.emit_statement(statement);
        }

        if !matches!(function.body.last(), Some(Statement::Return(_))) {
            self.emit_default_return(function.return_type);
        }

        self.line("}");
    }

    /// Terminates a body that can fall off its end
    fn emit_default_return(&mut self, return_type: Type) {
        match return_type {
            Type::Int => self.instruction("ret i32 0"),
            Type::Bool => self.instruction("ret i1 0"),
            Type::Void => self.instruction("ret void"),
        }
    }

    fn emit_statement(&mut self, statement: &Statement) {
        match statement {
            Statement::VarDecl(decl) => {
                self.instruction(&format!("%{} = alloca i32", decl.name));
                let value = self.emit_expression(&decl.init);
                self.instruction(&format!("store i32 {}, %{}", value, decl.name));
            }
            Statement::Assign(assign) => {
                let value = self.emit_expression(&assign.value);
                self.instruction(&format!("store i32 {}, %{}", value, assign.name));
            }
            Statement::If(if_stmt) => {
                let condition = self.emit_expression(&if_stmt.condition);
                let id = self.fresh_label_id();
                let false_target = if if_stmt.else_block.is_some() {
                    format!("Lelse{id}")
                } else {
                    format!("Lend{id}")
                };
                self.instruction(&format!(
                    "br i1 {condition}, label %Lthen{id}, label %{false_target}"
                ));

                self.line(&format!("Lthen{id}:"));
                self.emit_block_body(&if_stmt.then_block);
                self.instruction(&format!("br label %Lend{id}"));

                if let Some(else_block) = &if_stmt.else_block {
                    self.line(&format!("Lelse{id}:"));
                    self.emit_block_body(else_block);
                    self.instruction(&format!("br label %Lend{id}"));
                }

                self.line(&format!("Lend{id}:"));
            }
            Statement::While(while_stmt) => {
                let id = self.fresh_label_id();
                self.instruction(&format!("br label %Lcond{id}"));

                self.line(&format!("Lcond{id}:"));
                let condition = self.emit_expression(&while_stmt.condition);
                self.instruction(&format!(
                    "br i1 {condition}, label %Lbody{id}, label %Lend{id}"
                ));

                self.line(&format!("Lbody{id}:"));
                self.emit_block_body(&while_stmt.body);
                self.instruction(&format!("br label %Lcond{id}"));

                self.line(&format!("Lend{id}:"));
            }
            Statement::Return(return_stmt) => match &return_stmt.value {
                Some(value) => {
                    let temp = self.emit_expression(value);
                    self.instruction(&format!("ret {} {}", value.ty().ir_name(), temp));
                }
                None => self.instruction("ret void"),
            },
            Statement::Expression(expr) => {
                // A void call produces no temporary; everything else is
                // evaluated and its result discarded.
                let _ = self.emit_expression(expr);
            }
            Statement::Block(statements) => {
                for inner in statements {
                    self.emit_statement(inner);
                }
            }
        }
    }

    fn emit_block_body(&mut self, block: &Statement) {
        match block {
            Statement::Block(statements) => {
                for statement in statements {
                    self.emit_statement(statement);
                }
            }
            other => self.emit_statement(other),
        }
    }

    /// Evaluates an expression, returning the temporary holding its value.
    ///
    /// A call to the void `print` built-in emits the call and returns an
    /// empty name; the type checker keeps such calls out of value
    /// positions.
    fn emit_expression(&mut self, expression: &Expression) -> String {
        match expression {
            Expression::IntLiteral(e) => {
                let temp = self.fresh_temp();
                self.instruction(&format!("{} = const i32 {}", temp, e.value));
                temp
            }
            Expression::BoolLiteral(e) => {
                let temp = self.fresh_temp();
                self.instruction(&format!(
                    "{} = const i1 {}",
                    temp,
                    if e.value { 1 } else { 0 }
                ));
                temp
            }
            Expression::Variable(e) => {
                let temp = self.fresh_temp();
                self.instruction(&format!("{} = load %{}", temp, e.name));
                temp
            }
            Expression::Binary(e) => {
                let left = self.emit_expression(&e.left);
                let right = self.emit_expression(&e.right);
                let temp = self.fresh_temp();
                let instruction = match e.operator {
                    BinaryOperator::Add
                    | BinaryOperator::Sub
                    | BinaryOperator::Mul
                    | BinaryOperator::Div
                    | BinaryOperator::Mod => format!(
                        "{} = {} i32 {}, {}",
                        temp,
                        arithmetic_op(e.operator),
                        left,
                        right
                    ),
                    BinaryOperator::Eq
                    | BinaryOperator::Ne
                    | BinaryOperator::Lt
                    | BinaryOperator::Le
                    | BinaryOperator::Gt
                    | BinaryOperator::Ge => format!(
                        "{} = icmp {} i32 {}, {}",
                        temp,
                        comparison_op(e.operator),
                        left,
                        right
                    ),
                    BinaryOperator::And => format!("{} = and i1 {}, {}", temp, left, right),
                    BinaryOperator::Or => format!("{} = or i1 {}, {}", temp, left, right),
                };
                self.instruction(&instruction);
                temp
            }
            Expression::Unary(e) => {
                let operand = self.emit_expression(&e.operand);
                let temp = self.fresh_temp();
                match e.operator {
                    UnaryOperator::Not => {
                        self.instruction(&format!("{} = xor i1 {}, 1", temp, operand));
                    }
                }
                temp
            }
            Expression::Call(e) => {
                let arguments: Vec<(String, &'static str)> = e
                    .arguments
                    .iter()
                    .map(|argument| {
                        let ty = argument.ty().ir_name();
                        (self.emit_expression(argument), ty)
                    })
                    .collect();
                let argument_list = arguments
                    .iter()
                    .map(|(temp, ty)| format!("{ty} {temp}"))
                    .collect::<Vec<_>>()
                    .join(", ");

                if e.name == "print" {
                    self.instruction(&format!("call void @print({argument_list})"));
                    return String::new();
                }

                let temp = self.fresh_temp();
                self.instruction(&format!(
                    "{} = call {} @{}({})",
                    temp,
                    e.expr_type.ir_name(),
                    e.name,
                    argument_list
                ));
                temp
            }
        }
    }
}

fn arithmetic_op(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Add => "add",
        BinaryOperator::Sub => "sub",
        BinaryOperator::Mul => "mul",
        BinaryOperator::Div => "div",
        BinaryOperator::Mod => "mod",
        _ => unreachable!("not an arithmetic operator"),
    }
}

fn comparison_op(operator: BinaryOperator) -> &'static str {
    match operator {
        BinaryOperator::Eq => "eq",
        BinaryOperator::Ne => "ne",
        BinaryOperator::Lt => "lt",
        BinaryOperator::Le => "le",
        BinaryOperator::Gt => "gt",
        BinaryOperator::Ge => "ge",
        _ => unreachable!("not a comparison operator"),
    }
}
