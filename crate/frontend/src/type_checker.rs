use minic_error::{CompileResult, CompilerError, ErrorCode};
use minic_ir::SourceLocation;
use minic_ir::ast::{Expression, Function, Program, Statement};
use minic_shared::{FunctionSignature, Symbol, SymbolKind, SymbolTable};
use minic_types::Type;

/// Type checks a program, annotating it in place
///
/// Runs two passes: the first registers every function signature into the
/// global scope (with the `print` built-in pre-registered), the second
/// checks each function body. On success every expression's type slot and
/// every declaration's inferred type reflect the typing rules.
pub fn check(program: &mut Program) -> CompileResult<()> {
    let mut checker = TypeChecker::new();
    checker.register_signatures(program)?;
    for function in &mut program.functions {
        checker.check_function(function)?;
    }
    Ok(())
}

/// Walks the AST enforcing the typing rules
struct TypeChecker {
    /// Scope chain; the global scope holds function signatures
    symbols: SymbolTable,
    /// Return type of the function currently being checked
    return_type: Type,
}

impl TypeChecker {
    fn new() -> Self {
        let mut symbols = SymbolTable::new();
        symbols
            .define(Symbol::function(
                "print",
                FunctionSignature::new(vec![Type::Int], Type::Void),
            ))
            .expect("the global scope starts empty");
        TypeChecker {
            symbols,
            return_type: Type::Void,
        }
    }

    /// Pass 1: registers every function signature into the global scope
    fn register_signatures(&mut self, program: &Program) -> CompileResult<()> {
        for function in &program.functions {
            if self.symbols.lookup_current(&function.name).is_some() {
                return Err(error(
                    format!("Duplicate function '{}'", function.name),
                    function.location,
                ));
            }
            let param_types = function.parameters.iter().map(|p| p.param_type).collect();
            let signature = FunctionSignature::new(param_types, function.return_type);
            self.symbols
                .define(Symbol::function(&function.name, signature))
                .map_err(|message| error(message, function.location))?;
        }
        Ok(())
    }

    /// Pass 2: checks one function body under a fresh function scope
    fn check_function(&mut self, function: &mut Function) -> CompileResult<()> {
        self.return_type = function.return_type;

        // Parameters live in the function scope, outside the body's
        // outermost block but visible from within it.
        self.symbols.begin_scope();
        for parameter in &function.parameters {
            if self.symbols.lookup_current(&parameter.name).is_some() {
                return Err(error(
                    format!("Duplicate parameter '{}'", parameter.name),
                    parameter.location,
                ));
            }
            self.symbols
                .define(Symbol::variable(&parameter.name, parameter.param_type))
                .map_err(|message| error(message, parameter.location))?;
        }

        self.symbols.begin_scope();
        let result = function
            .body
            .iter_mut()
            .try_for_each(|statement| self.check_statement(statement));
        self.symbols.end_scope();
        self.symbols.end_scope();
        result
    }

    fn check_statement(&mut self, statement: &mut Statement) -> CompileResult<()> {
        match statement {
            Statement::VarDecl(decl) => {
                let init_type = self.check_expression(&mut decl.init)?;
                if init_type == Type::Void {
                    return Err(error(
                        format!("Cannot initialize variable '{}' with a void value", decl.name),
                        decl.location,
                    ));
                }
                decl.declared_type = init_type;
                if self.symbols.lookup_current(&decl.name).is_some() {
                    return Err(error(
                        format!("Duplicate variable '{}'", decl.name),
                        decl.location,
                    ));
                }
                self.symbols
                    .define(Symbol::variable(&decl.name, init_type))
                    .map_err(|message| error(message, decl.location))?;
                Ok(())
            }
            Statement::Assign(assign) => {
                let variable_type = match self.symbols.lookup(&assign.name) {
                    None => {
                        return Err(error(
                            format!("Undefined variable '{}'", assign.name),
                            assign.location,
                        ));
                    }
                    Some(symbol) if symbol.kind == SymbolKind::Function => {
                        return Err(error(
                            format!("'{}' is a function and cannot be assigned", assign.name),
                            assign.location,
                        ));
                    }
                    Some(symbol) => symbol.ty,
                };
                let value_type = self.check_expression(&mut assign.value)?;
                if value_type != variable_type {
                    return Err(error(
                        format!(
                            "Assignment type mismatch: variable '{}' has type {}, found {}",
                            assign.name, variable_type, value_type
                        ),
                        assign.location,
                    ));
                }
                Ok(())
            }
            Statement::If(if_stmt) => {
                let condition_type = self.check_expression(&mut if_stmt.condition)?;
                if condition_type != Type::Bool {
                    return Err(error(
                        format!("If condition must be bool, found {}", condition_type),
                        if_stmt.condition.location(),
                    ));
                }
                self.check_statement(&mut if_stmt.then_block)?;
                if let Some(else_block) = &mut if_stmt.else_block {
                    self.check_statement(else_block)?;
                }
                Ok(())
            }
            Statement::While(while_stmt) => {
                let condition_type = self.check_expression(&mut while_stmt.condition)?;
                if condition_type != Type::Bool {
                    return Err(error(
                        format!("While condition must be bool, found {}", condition_type),
                        while_stmt.condition.location(),
                    ));
                }
                self.check_statement(&mut while_stmt.body)
            }
            Statement::Return(return_stmt) => match &mut return_stmt.value {
                Some(value) => {
                    let value_type = self.check_expression(value)?;
                    if value_type != self.return_type {
                        return Err(error(
                            format!(
                                "Return type mismatch: expected {}, found {}",
                                self.return_type, value_type
                            ),
                            return_stmt.location,
                        ));
                    }
                    Ok(())
                }
                None => {
                    if self.return_type != Type::Void {
                        return Err(error(
                            format!(
                                "Return type mismatch: expected {}, found no value",
                                self.return_type
                            ),
                            return_stmt.location,
                        ));
                    }
                    Ok(())
                }
            },
            Statement::Expression(expression) => {
                self.check_expression(expression)?;
                Ok(())
            }
            Statement::Block(statements) => {
                self.symbols.begin_scope();
                let result = statements
                    .iter_mut()
                    .try_for_each(|inner| self.check_statement(inner));
                self.symbols.end_scope();
                result
            }
        }
    }

    fn check_expression(&mut self, expression: &mut Expression) -> CompileResult<Type> {
        match expression {
            Expression::IntLiteral(_) => Ok(Type::Int),
            Expression::BoolLiteral(_) => Ok(Type::Bool),
            Expression::Variable(variable) => match self.symbols.lookup(&variable.name) {
                None => Err(error(
                    format!("Undefined variable '{}'", variable.name),
                    variable.location,
                )),
                Some(symbol) if symbol.kind == SymbolKind::Function => Err(error(
                    format!("'{}' is a function, not a variable", variable.name),
                    variable.location,
                )),
                Some(symbol) => {
                    variable.expr_type = symbol.ty;
                    Ok(symbol.ty)
                }
            },
            Expression::Binary(binary) => {
                let left_type = self.check_expression(&mut binary.left)?;
                let right_type = self.check_expression(&mut binary.right)?;
                let operator = binary.operator;

                let result_type = if operator.is_arithmetic() {
                    if left_type != Type::Int || right_type != Type::Int {
                        return Err(error(
                            format!(
                                "Arithmetic operator requires int operands, found {} and {}",
                                left_type, right_type
                            ),
                            binary.location,
                        ));
                    }
                    Type::Int
                } else if operator.is_comparison() {
                    if left_type != Type::Int || right_type != Type::Int {
                        return Err(error(
                            format!(
                                "Comparison operator requires int operands, found {} and {}",
                                left_type, right_type
                            ),
                            binary.location,
                        ));
                    }
                    Type::Bool
                } else if operator.is_equality() {
                    if left_type == Type::Void || right_type == Type::Void {
                        return Err(error(
                            "Equality operator cannot be applied to void values",
                            binary.location,
                        ));
                    }
                    if left_type != right_type {
                        return Err(error(
                            format!(
                                "Equality operator requires matching operand types, found {} and {}",
                                left_type, right_type
                            ),
                            binary.location,
                        ));
                    }
                    Type::Bool
                } else {
                    if left_type != Type::Bool || right_type != Type::Bool {
                        return Err(error(
                            format!(
                                "Logical operator requires bool operands, found {} and {}",
                                left_type, right_type
                            ),
                            binary.location,
                        ));
                    }
                    Type::Bool
                };

                binary.expr_type = result_type;
                Ok(result_type)
            }
            Expression::Unary(unary) => {
                let operand_type = self.check_expression(&mut unary.operand)?;
                if operand_type != Type::Bool {
                    return Err(error(
                        format!("Operator '!' requires a bool operand, found {}", operand_type),
                        unary.location,
                    ));
                }
                unary.expr_type = Type::Bool;
                Ok(Type::Bool)
            }
            Expression::Call(call) => {
                let signature = match self.symbols.lookup(&call.name) {
                    None => {
                        return Err(error(
                            format!("Undefined function '{}'", call.name),
                            call.location,
                        ));
                    }
                    Some(symbol) if symbol.kind != SymbolKind::Function => {
                        return Err(error(
                            format!("'{}' is not a function", call.name),
                            call.location,
                        ));
                    }
                    Some(symbol) => symbol
                        .signature
                        .clone()
                        .expect("function symbols always carry a signature"),
                };

                if call.arguments.len() != signature.param_types.len() {
                    return Err(error(
                        format!(
                            "Function '{}' expects {} argument(s), found {}",
                            call.name,
                            signature.param_types.len(),
                            call.arguments.len()
                        ),
                        call.location,
                    ));
                }

                for (index, (argument, expected)) in call
                    .arguments
                    .iter_mut()
                    .zip(signature.param_types.iter())
                    .enumerate()
                {
                    let argument_type = self.check_expression(argument)?;
                    if argument_type != *expected {
                        return Err(error(
                            format!(
                                "Argument {} of '{}' must be {}, found {}",
                                index + 1,
                                call.name,
                                expected,
                                argument_type
                            ),
                            argument.location(),
                        ));
                    }
                }

                call.expr_type = signature.return_type;
                Ok(signature.return_type)
            }
        }
    }
}

fn error(message: impl Into<String>, location: SourceLocation) -> CompilerError {
    CompilerError::new(
        ErrorCode::InvalidInput,
        message,
        location.line,
        location.column,
    )
}
