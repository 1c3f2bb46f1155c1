// AST (Abstract Syntax Tree) definitions for the cccp language

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators with an infix parse rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    NotEq,
}

impl InfixOp {
    /// The operator as written in both the source language and C.
    pub fn symbol(self) -> &'static str {
        match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(self, InfixOp::Eq | InfixOp::NotEq)
    }
}

/// A `{ ... }` sequence of statements, owned by its enclosing construct
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SourceLocation,
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var name;` or `var name = value;`
    Let {
        name: String,
        value: Option<Expression>,
        location: SourceLocation,
    },
    /// `name = value;`
    Assignment {
        name: String,
        value: Expression,
        location: SourceLocation,
    },
    /// `print(value);`
    Print {
        value: Expression,
        location: SourceLocation,
    },
    If {
        condition: Expression,
        consequence: Block,
        alternative: Option<Block>,
        location: SourceLocation,
    },
    Block(Block),
    /// `extern name;`
    Extern {
        name: String,
        location: SourceLocation,
    },
    Return {
        value: Option<Expression>,
        location: SourceLocation,
    },
    /// `func name(params) { body }`
    Function {
        name: String,
        parameters: Vec<String>,
        body: Block,
        location: SourceLocation,
    },
    Expression {
        expression: Expression,
        location: SourceLocation,
    },
}

impl Statement {
    /// Get the source location of this statement
    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Let { location, .. }
            | Statement::Assignment { location, .. }
            | Statement::Print { location, .. }
            | Statement::If { location, .. }
            | Statement::Extern { location, .. }
            | Statement::Return { location, .. }
            | Statement::Function { location, .. }
            | Statement::Expression { location, .. } => *location,
            Statement::Block(block) => block.location,
        }
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String, SourceLocation),
    IntegerLiteral(i64, SourceLocation),
    StringLiteral(String, SourceLocation),
    Infix {
        operator: InfixOp,
        left: Box<Expression>,
        right: Box<Expression>,
        location: SourceLocation,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
        location: SourceLocation,
    },
    /// Anonymous `func(params) { body }`
    FunctionLiteral {
        parameters: Vec<String>,
        body: Block,
        location: SourceLocation,
    },
}

impl Expression {
    /// Get the source location of this expression
    pub fn location(&self) -> SourceLocation {
        match self {
            Expression::Identifier(_, loc)
            | Expression::IntegerLiteral(_, loc)
            | Expression::StringLiteral(_, loc) => *loc,
            Expression::Infix { location, .. }
            | Expression::Call { location, .. }
            | Expression::FunctionLiteral { location, .. } => *location,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
