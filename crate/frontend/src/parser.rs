use crate::token::{Token, TokenKind};
use minic_error::{CompileResult, CompilerError, ErrorCode};
use minic_ir::SourceLocation;
use minic_ir::ast::{
    AssignStmt, BinaryExpr, BinaryOperator, BoolLiteralExpr, CallExpr, Expression, Function,
    IfStmt, IntLiteralExpr, Parameter, Program, ReturnStmt, Statement, UnaryExpr, UnaryOperator,
    VarDeclStmt, VariableExpr, WhileStmt,
};
use minic_types::Type;

/// Parses a token stream into a program
///
/// The first grammar violation aborts parsing; no partial AST is produced.
pub fn parse(tokens: &[Token]) -> CompileResult<Program> {
    Parser::new(tokens).parse_program()
}

/// Recursive-descent parser over a token slice
pub struct Parser<'a> {
    /// The tokens being parsed
    tokens: &'a [Token],
    /// Current position in the token list
    current: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the whole program: one or more function definitions
    fn parse_program(&mut self) -> CompileResult<Program> {
        let mut functions = Vec::new();

        while !self.check(TokenKind::Eof) {
            if !self.match_token(TokenKind::Func) {
                return Err(self.error(format!(
                    "Expected 'func' at top level, found {}",
                    self.peek().kind
                )));
            }
            functions.push(self.function()?);
        }

        if functions.is_empty() {
            return Err(self.error("Program must contain at least one function"));
        }

        Ok(Program { functions })
    }

    /// Parses a function definition after its `func` keyword
    fn function(&mut self) -> CompileResult<Function> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.error(format!(
                "Expected function name, found {}",
                self.peek().kind
            )));
        }
        let token = self.advance();
        let name = token.lexeme.clone();
        let location = token.location();

        if !self.match_token(TokenKind::LParen) {
            return Err(self.error("Expected '(' after function name"));
        }

        let parameters = self.parameters()?;

        if !self.match_token(TokenKind::Colon) {
            return Err(self.error("Expected ':' before return type"));
        }
        let return_type = self.type_annotation()?;

        let body = self.brace_block()?;

        Ok(Function {
            name,
            parameters,
            return_type,
            body,
            location,
        })
    }

    /// Parses the parameter list up to and including the closing paren
    fn parameters(&mut self) -> CompileResult<Vec<Parameter>> {
        let mut parameters = Vec::new();

        if self.match_token(TokenKind::RParen) {
            return Ok(parameters);
        }

        loop {
            if !self.check(TokenKind::Identifier) {
                return Err(self.error(format!(
                    "Expected parameter name, found {}",
                    self.peek().kind
                )));
            }
            let token = self.advance();
            let name = token.lexeme.clone();
            let location = token.location();

            if !self.match_token(TokenKind::Colon) {
                return Err(self.error("Expected ':' after parameter name"));
            }
            let param_type = self.type_annotation()?;

            parameters.push(Parameter {
                name,
                param_type,
                location,
            });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        if !self.match_token(TokenKind::RParen) {
            return Err(self.error("Expected ')' after parameters"));
        }

        Ok(parameters)
    }

    /// Parses a type annotation: `int` or `bool`
    ///
    /// `void` cannot be written; it is reachable only through the built-in
    /// `print` function.
    fn type_annotation(&mut self) -> CompileResult<Type> {
        if self.match_token(TokenKind::IntKw) {
            Ok(Type::Int)
        } else if self.match_token(TokenKind::BoolKw) {
            Ok(Type::Bool)
        } else {
            Err(self.error(format!(
                "Expected type 'int' or 'bool', found {}",
                self.peek().kind
            )))
        }
    }

    /// Parses `{ Stmt* }` and returns the enclosed statements
    fn brace_block(&mut self) -> CompileResult<Vec<Statement>> {
        if !self.match_token(TokenKind::LBrace) {
            return Err(self.error(format!("Expected '{{', found {}", self.peek().kind)));
        }

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.check(TokenKind::Eof) {
            statements.push(self.statement()?);
        }

        if !self.match_token(TokenKind::RBrace) {
            return Err(self.error("Expected '}' after block"));
        }

        Ok(statements)
    }

    /// Parses `{ Stmt* }` as a block statement
    fn block_statement(&mut self) -> CompileResult<Statement> {
        Ok(Statement::Block(self.brace_block()?))
    }

    /// Parses a single statement
    fn statement(&mut self) -> CompileResult<Statement> {
        if self.match_token(TokenKind::Var) {
            self.var_declaration()
        } else if self.match_token(TokenKind::If) {
            self.if_statement()
        } else if self.match_token(TokenKind::While) {
            self.while_statement()
        } else if self.match_token(TokenKind::Return) {
            self.return_statement()
        } else if self.check(TokenKind::LBrace) {
            self.block_statement()
        } else if self.check(TokenKind::Identifier) && self.check_next(TokenKind::Assign) {
            self.assignment()
        } else {
            self.expression_statement()
        }
    }

    /// Parses `var Ident = Expr ;` after its `var` keyword
    fn var_declaration(&mut self) -> CompileResult<Statement> {
        if !self.check(TokenKind::Identifier) {
            return Err(self.error(format!(
                "Expected variable name after 'var', found {}",
                self.peek().kind
            )));
        }
        let token = self.advance();
        let name = token.lexeme.clone();
        let location = token.location();

        if !self.match_token(TokenKind::Assign) {
            return Err(self.error("Expected '=' after variable name"));
        }

        let init = self.expression()?;

        if !self.match_token(TokenKind::Semicolon) {
            return Err(self.error("Expected ';' after variable declaration"));
        }

        Ok(Statement::VarDecl(VarDeclStmt {
            name,
            declared_type: Type::Int,
            init,
            location,
        }))
    }

    /// Parses `Ident = Expr ;`
    fn assignment(&mut self) -> CompileResult<Statement> {
        let token = self.advance();
        let name = token.lexeme.clone();
        let location = token.location();

        // the '=' was confirmed by check_next
        self.advance();

        let value = self.expression()?;

        if !self.match_token(TokenKind::Semicolon) {
            return Err(self.error("Expected ';' after assignment"));
        }

        Ok(Statement::Assign(AssignStmt {
            name,
            value,
            location,
        }))
    }

    /// Parses `if ( Expr ) Block (else Block)?` after its `if` keyword
    fn if_statement(&mut self) -> CompileResult<Statement> {
        let location = self.previous().location();

        if !self.match_token(TokenKind::LParen) {
            return Err(self.error("Expected '(' after 'if'"));
        }
        let condition = self.expression()?;
        if !self.match_token(TokenKind::RParen) {
            return Err(self.error("Expected ')' after if condition"));
        }

        if !self.check(TokenKind::LBrace) {
            return Err(self.error("Expected '{' after if condition"));
        }
        let then_block = Box::new(self.block_statement()?);

        let else_block = if self.match_token(TokenKind::Else) {
            if !self.check(TokenKind::LBrace) {
                return Err(self.error("Expected '{' after 'else'"));
            }
            Some(Box::new(self.block_statement()?))
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_block,
            else_block,
            location,
        }))
    }

    /// Parses `while ( Expr ) Block` after its `while` keyword
    fn while_statement(&mut self) -> CompileResult<Statement> {
        let location = self.previous().location();

        if !self.match_token(TokenKind::LParen) {
            return Err(self.error("Expected '(' after 'while'"));
        }
        let condition = self.expression()?;
        if !self.match_token(TokenKind::RParen) {
            return Err(self.error("Expected ')' after while condition"));
        }

        if !self.check(TokenKind::LBrace) {
            return Err(self.error("Expected '{' after while condition"));
        }
        let body = Box::new(self.block_statement()?);

        Ok(Statement::While(WhileStmt {
            condition,
            body,
            location,
        }))
    }

    /// Parses `return Expr? ;` after its `return` keyword
    fn return_statement(&mut self) -> CompileResult<Statement> {
        let location = self.previous().location();

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };

        if !self.match_token(TokenKind::Semicolon) {
            return Err(self.error("Expected ';' after return value"));
        }

        Ok(Statement::Return(ReturnStmt { value, location }))
    }

    /// Parses `Expr ;`
    fn expression_statement(&mut self) -> CompileResult<Statement> {
        let expression = self.expression()?;

        if !self.match_token(TokenKind::Semicolon) {
            return Err(self.error("Expected ';' after expression"));
        }

        Ok(Statement::Expression(expression))
    }

    fn expression(&mut self) -> CompileResult<Expression> {
        self.logic_or()
    }

    /// `LogicOr ::= LogicAnd ("||" LogicAnd)*`
    fn logic_or(&mut self) -> CompileResult<Expression> {
        let mut expr = self.logic_and()?;

        while self.match_token(TokenKind::Or) {
            let right = self.logic_and()?;
            expr = binary(expr, BinaryOperator::Or, right);
        }

        Ok(expr)
    }

    /// `LogicAnd ::= Equality ("&&" Equality)*`
    fn logic_and(&mut self) -> CompileResult<Expression> {
        let mut expr = self.equality()?;

        while self.match_token(TokenKind::And) {
            let right = self.equality()?;
            expr = binary(expr, BinaryOperator::And, right);
        }

        Ok(expr)
    }

    /// `Equality ::= Comparison (("==" | "!=") Comparison)*`
    fn equality(&mut self) -> CompileResult<Expression> {
        let mut expr = self.comparison()?;

        loop {
            let operator = if self.match_token(TokenKind::Eq) {
                BinaryOperator::Eq
            } else if self.match_token(TokenKind::Ne) {
                BinaryOperator::Ne
            } else {
                break;
            };
            let right = self.comparison()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// `Comparison ::= Term (("<" | "<=" | ">" | ">=") Term)*`
    fn comparison(&mut self) -> CompileResult<Expression> {
        let mut expr = self.term()?;

        loop {
            let operator = if self.match_token(TokenKind::Lt) {
                BinaryOperator::Lt
            } else if self.match_token(TokenKind::Le) {
                BinaryOperator::Le
            } else if self.match_token(TokenKind::Gt) {
                BinaryOperator::Gt
            } else if self.match_token(TokenKind::Ge) {
                BinaryOperator::Ge
            } else {
                break;
            };
            let right = self.term()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// `Term ::= Factor (("+" | "-") Factor)*`
    fn term(&mut self) -> CompileResult<Expression> {
        let mut expr = self.factor()?;

        loop {
            let operator = if self.match_token(TokenKind::Plus) {
                BinaryOperator::Add
            } else if self.match_token(TokenKind::Minus) {
                BinaryOperator::Sub
            } else {
                break;
            };
            let right = self.factor()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// `Factor ::= Unary (("*" | "/" | "%") Unary)*`
    fn factor(&mut self) -> CompileResult<Expression> {
        let mut expr = self.unary()?;

        loop {
            let operator = if self.match_token(TokenKind::Star) {
                BinaryOperator::Mul
            } else if self.match_token(TokenKind::Slash) {
                BinaryOperator::Div
            } else if self.match_token(TokenKind::Percent) {
                BinaryOperator::Mod
            } else {
                break;
            };
            let right = self.unary()?;
            expr = binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// `Unary ::= "!" Unary | Primary`
    fn unary(&mut self) -> CompileResult<Expression> {
        if self.match_token(TokenKind::Not) {
            let location = self.previous().location();
            let operand = self.unary()?;
            return Ok(Expression::Unary(UnaryExpr {
                operator: UnaryOperator::Not,
                operand: Box::new(operand),
                expr_type: Type::Bool,
                location,
            }));
        }
        self.primary()
    }

    /// `Primary ::= IntLit | "true" | "false" | Ident | Call | "(" Expr ")"`
    ///
    /// Parentheses affect grouping only; no AST node is created for them.
    fn primary(&mut self) -> CompileResult<Expression> {
        if self.check(TokenKind::IntLiteral) {
            let token = self.advance();
            return Ok(Expression::IntLiteral(IntLiteralExpr {
                value: token.value,
                location: token.location(),
            }));
        }

        if self.check(TokenKind::True) || self.check(TokenKind::False) {
            let token = self.advance();
            return Ok(Expression::BoolLiteral(BoolLiteralExpr {
                value: token.kind == TokenKind::True,
                location: token.location(),
            }));
        }

        if self.check(TokenKind::Identifier) {
            let token = self.advance();
            let name = token.lexeme.clone();
            let location = token.location();

            if self.match_token(TokenKind::LParen) {
                return self.finish_call(name, location);
            }

            return Ok(Expression::Variable(VariableExpr {
                name,
                expr_type: Type::Int,
                location,
            }));
        }

        if self.match_token(TokenKind::LParen) {
            let expr = self.expression()?;
            if !self.match_token(TokenKind::RParen) {
                return Err(self.error("Expected ')' after expression"));
            }
            return Ok(expr);
        }

        Err(self.error(format!("Expected expression, found {}", self.peek().kind)))
    }

    /// Parses the argument list of a call whose name and '(' are consumed
    fn finish_call(&mut self, name: String, location: SourceLocation) -> CompileResult<Expression> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        if !self.match_token(TokenKind::RParen) {
            return Err(self.error("Expected ')' after arguments"));
        }

        Ok(Expression::Call(CallExpr {
            name,
            arguments,
            expr_type: Type::Int,
            location,
        }))
    }

    /// Creates a parse error at the current token position
    fn error(&self, message: impl Into<String>) -> CompilerError {
        let token = self.peek();
        CompilerError::new(ErrorCode::InvalidInput, message, token.line, token.column)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn check_next(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.current + 1)
            .is_some_and(|token| token.kind == kind)
    }

    fn advance(&mut self) -> &Token {
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        &self.tokens[self.current - 1]
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Builds a left-associative binary node; its location is the left operand's
fn binary(left: Expression, operator: BinaryOperator, right: Expression) -> Expression {
    let location = left.location();
    Expression::Binary(BinaryExpr {
        left: Box::new(left),
        operator,
        right: Box::new(right),
        expr_type: Type::Int,
        location,
    })
}
