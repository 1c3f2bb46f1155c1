//! Code generation error types
//!
//! [`GenError`] covers every program the parser accepts but the generator
//! cannot turn into valid C. The first error aborts generation; no partial
//! output is returned.

use crate::codegen::types::ValueType;
use crate::parser::ast::SourceLocation;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    /// Identifier used as a value with no binding in scope
    #[error("undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Same name declared twice in one scope
    #[error("'{name}' is already declared in this scope at {location}")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Name that would collide with C or the emitted runtime
    #[error("'{name}' is a reserved name and cannot be declared at {location}")]
    ReservedName {
        name: String,
        location: SourceLocation,
    },

    #[error("function '{name}' is defined more than once at {location}")]
    DuplicateFunction {
        name: String,
        location: SourceLocation,
    },

    /// Named function declared anywhere but the top level
    #[error("function '{name}' must be declared at the top level at {location}")]
    NestedFunction {
        name: String,
        location: SourceLocation,
    },

    #[error("function literals cannot be used as values at {location}")]
    FunctionLiteralValue { location: SourceLocation },

    #[error("'{callee}' is not callable at {location}")]
    UnsupportedCallee {
        callee: String,
        location: SourceLocation,
    },

    #[error("function '{function}' expects {expected} argument(s), got {got} at {location}")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    #[error("type mismatch in {context}: expected {expected}, found {found} at {location}")]
    TypeMismatch {
        context: String,
        expected: ValueType,
        found: ValueType,
        location: SourceLocation,
    },

    /// Integer literal that does not fit in a C `int`
    #[error("integer literal {value} does not fit in a C int at {location}")]
    IntegerOutOfRange {
        value: i64,
        location: SourceLocation,
    },

    /// String operand mixed with an int, or used with `- * /`
    #[error("operator '{operator}' cannot be applied to these operand types at {location}")]
    InvalidStringOperation {
        operator: &'static str,
        location: SourceLocation,
    },
}

impl GenError {
    pub fn location(&self) -> SourceLocation {
        match self {
            GenError::UndefinedVariable { location, .. }
            | GenError::Redeclaration { location, .. }
            | GenError::ReservedName { location, .. }
            | GenError::DuplicateFunction { location, .. }
            | GenError::NestedFunction { location, .. }
            | GenError::FunctionLiteralValue { location }
            | GenError::UnsupportedCallee { location, .. }
            | GenError::ArgumentCountMismatch { location, .. }
            | GenError::TypeMismatch { location, .. }
            | GenError::IntegerOutOfRange { location, .. }
            | GenError::InvalidStringOperation { location, .. } => *location,
        }
    }
}
