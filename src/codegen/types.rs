//! The two value types the generator distinguishes.

use std::fmt;

/// Inferred type of an expression or variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Str,
}

impl ValueType {
    /// C spelling used in declarations
    pub fn c_type(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Str => "char*",
        }
    }

    /// `printf` conversion used by `print` and auto-print
    pub fn printf_format(self) -> &'static str {
        match self {
            ValueType::Int => "%d",
            ValueType::Str => "%s",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "int"),
            ValueType::Str => write!(f, "string"),
        }
    }
}
