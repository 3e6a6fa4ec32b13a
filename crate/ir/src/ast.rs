use crate::SourceLocation;
use minic_types::Type;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition operator
    Add,
    /// Subtraction operator
    Sub,
    /// Multiplication operator
    Mul,
    /// Division operator
    Div,
    /// Modulus operator
    Mod,
    /// Equality operator
    Eq,
    /// Inequality operator
    Ne,
    /// Less than operator
    Lt,
    /// Less than or equal operator
    Le,
    /// Greater than operator
    Gt,
    /// Greater than or equal operator
    Ge,
    /// Logical AND operator
    And,
    /// Logical OR operator
    Or,
}

impl BinaryOperator {
    /// True for `+ - * / %`
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Add
                | BinaryOperator::Sub
                | BinaryOperator::Mul
                | BinaryOperator::Div
                | BinaryOperator::Mod
        )
    }

    /// True for `< <= > >=`
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Lt | BinaryOperator::Le | BinaryOperator::Gt | BinaryOperator::Ge
        )
    }

    /// True for `==` and `!=`
    pub fn is_equality(&self) -> bool {
        matches!(self, BinaryOperator::Eq | BinaryOperator::Ne)
    }

    /// True for `&&` and `||`
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOperator::And | BinaryOperator::Or)
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op_str = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        };
        write!(f, "{}", op_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Logical NOT operator
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Not => write!(f, "!"),
        }
    }
}

/// Expression nodes in the AST
#[derive(Debug, Clone)]
pub enum Expression {
    /// An integer literal
    IntLiteral(IntLiteralExpr),
    /// A boolean literal
    BoolLiteral(BoolLiteralExpr),
    /// A variable reference
    Variable(VariableExpr),
    /// A binary operation (e.g., a + b)
    Binary(BinaryExpr),
    /// A unary operation (e.g., !x)
    Unary(UnaryExpr),
    /// A function call
    Call(CallExpr),
}

impl Expression {
    /// The type assigned to this expression.
    ///
    /// Literals carry their type by construction; every other node starts
    /// with a provisional `Int` that the type checker rewrites.
    pub fn ty(&self) -> Type {
        match self {
            Expression::IntLiteral(_) => Type::Int,
            Expression::BoolLiteral(_) => Type::Bool,
            Expression::Variable(e) => e.expr_type,
            Expression::Binary(e) => e.expr_type,
            Expression::Unary(e) => e.expr_type,
            Expression::Call(e) => e.expr_type,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::IntLiteral(e) => e.location,
            Expression::BoolLiteral(e) => e.location,
            Expression::Variable(e) => e.location,
            Expression::Binary(e) => e.location,
            Expression::Unary(e) => e.location,
            Expression::Call(e) => e.location,
        }
    }
}

/// An integer literal expression
#[derive(Debug, Clone)]
pub struct IntLiteralExpr {
    /// Value of the literal
    pub value: i64,
    /// Source code location information
    pub location: SourceLocation,
}

/// A boolean literal expression
#[derive(Debug, Clone)]
pub struct BoolLiteralExpr {
    /// Value of the literal
    pub value: bool,
    /// Source code location information
    pub location: SourceLocation,
}

/// A variable reference
#[derive(Debug, Clone)]
pub struct VariableExpr {
    /// Name of the referenced variable
    pub name: String,
    /// Type of the variable, filled in by the type checker
    pub expr_type: Type,
    /// Source code location information
    pub location: SourceLocation,
}

/// A binary expression (e.g., a + b)
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    /// Left operand
    pub left: Box<Expression>,
    /// Operator
    pub operator: BinaryOperator,
    /// Right operand
    pub right: Box<Expression>,
    /// Type of the binary expression, filled in by the type checker
    pub expr_type: Type,
    /// Source code location information
    pub location: SourceLocation,
}

/// A unary expression (e.g., !x)
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    /// The operator
    pub operator: UnaryOperator,
    /// The operand
    pub operand: Box<Expression>,
    /// Type of the unary expression, filled in by the type checker
    pub expr_type: Type,
    /// Source code location information
    pub location: SourceLocation,
}

/// A function call expression
#[derive(Debug, Clone)]
pub struct CallExpr {
    /// Name of the function being called
    pub name: String,
    /// Arguments passed to the function
    pub arguments: Vec<Expression>,
    /// Type of the call expression, filled in by the type checker
    pub expr_type: Type,
    /// Source code location information
    pub location: SourceLocation,
}

/// Statement nodes in the AST
#[derive(Debug, Clone)]
pub enum Statement {
    /// Variable declaration with inferred type
    VarDecl(VarDeclStmt),
    /// Variable assignment
    Assign(AssignStmt),
    /// Conditional statement
    If(IfStmt),
    /// Loop statement
    While(WhileStmt),
    /// Return statement
    Return(ReturnStmt),
    /// Expression statement
    Expression(Expression),
    /// Block of statements
    Block(Vec<Statement>),
}

/// A variable declaration statement
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    /// Name of the variable
    pub name: String,
    /// Type of the variable, inferred from the initializer by the checker
    pub declared_type: Type,
    /// Initial value for the variable
    pub init: Expression,
    /// Source code location information
    pub location: SourceLocation,
}

/// A variable assignment statement
#[derive(Debug, Clone)]
pub struct AssignStmt {
    /// Name of the variable being assigned
    pub name: String,
    /// New value for the variable
    pub value: Expression,
    /// Source code location information
    pub location: SourceLocation,
}

/// A conditional statement
#[derive(Debug, Clone)]
pub struct IfStmt {
    /// Branch condition
    pub condition: Expression,
    /// Block executed when the condition holds
    pub then_block: Box<Statement>,
    /// Optional block executed otherwise
    pub else_block: Option<Box<Statement>>,
    /// Source code location information
    pub location: SourceLocation,
}

/// A loop statement
#[derive(Debug, Clone)]
pub struct WhileStmt {
    /// Loop condition
    pub condition: Expression,
    /// Loop body
    pub body: Box<Statement>,
    /// Source code location information
    pub location: SourceLocation,
}

/// A return statement
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    /// Returned value, absent for void returns
    pub value: Option<Expression>,
    /// Source code location information
    pub location: SourceLocation,
}

/// A function parameter
#[derive(Debug, Clone)]
pub struct Parameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub param_type: Type,
    /// Source code location information
    pub location: SourceLocation,
}

/// A function definition
#[derive(Debug, Clone)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Function parameters
    pub parameters: Vec<Parameter>,
    /// Function return type
    pub return_type: Type,
    /// Statements of the function body block
    pub body: Vec<Statement>,
    /// Source code location information
    pub location: SourceLocation,
}

/// A whole program: a non-empty ordered sequence of functions
#[derive(Debug, Clone)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    /// Counts every statement and expression node, used by the context
    /// for memory accounting.
    pub fn node_count(&self) -> usize {
        self.functions
            .iter()
            .map(|f| 1 + f.body.iter().map(count_statement).sum::<usize>())
            .sum()
    }
}

fn count_statement(statement: &Statement) -> usize {
    match statement {
        Statement::VarDecl(s) => 1 + count_expression(&s.init),
        Statement::Assign(s) => 1 + count_expression(&s.value),
        Statement::If(s) => {
            1 + count_expression(&s.condition)
                + count_statement(&s.then_block)
                + s.else_block.as_deref().map(count_statement).unwrap_or(0)
        }
        Statement::While(s) => 1 + count_expression(&s.condition) + count_statement(&s.body),
        Statement::Return(s) => 1 + s.value.as_ref().map(count_expression).unwrap_or(0),
        Statement::Expression(e) => 1 + count_expression(e),
        Statement::Block(stmts) => 1 + stmts.iter().map(count_statement).sum::<usize>(),
    }
}

fn count_expression(expression: &Expression) -> usize {
    match expression {
        Expression::IntLiteral(_) | Expression::BoolLiteral(_) | Expression::Variable(_) => 1,
        Expression::Binary(e) => 1 + count_expression(&e.left) + count_expression(&e.right),
        Expression::Unary(e) => 1 + count_expression(&e.operand),
        Expression::Call(e) => 1 + e.arguments.iter().map(count_expression).sum::<usize>(),
    }
}
