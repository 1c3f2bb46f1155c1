//! Expression emission and type inference
//!
//! Expressions are rendered to strings rather than written straight into the
//! output so statements can wrap them (`printf(...)`, `int x = ...;`).
//!
//! # Type Inference
//!
//! - string literal → `Str`
//! - identifier → its binding in the scope chain, `Int` when unbound
//! - `+` → `Str` when both operands are `Str`
//! - anything else → `Int`

use crate::codegen::errors::GenError;
use crate::codegen::generator::CodeGenerator;
use crate::codegen::types::ValueType;
use crate::parser::ast::*;

impl CodeGenerator {
    pub fn infer_type(&self, expr: &Expression) -> ValueType {
        match expr {
            Expression::StringLiteral(..) => ValueType::Str,
            Expression::Identifier(name, _) => self.symbols.lookup(name).unwrap_or(ValueType::Int),
            Expression::Infix {
                operator: InfixOp::Add,
                left,
                right,
                ..
            } if self.infer_type(left) == ValueType::Str
                && self.infer_type(right) == ValueType::Str =>
            {
                ValueType::Str
            }
            _ => ValueType::Int,
        }
    }

    /// Render `expr` as C.
    pub(crate) fn expression(&mut self, expr: &Expression) -> Result<String, GenError> {
        match expr {
            Expression::Identifier(name, location) => {
                if self.symbols.lookup(name).is_none() {
                    return Err(GenError::UndefinedVariable {
                        name: name.clone(),
                        location: *location,
                    });
                }
                Ok(name.clone())
            }
            Expression::IntegerLiteral(value, location) => {
                if i32::try_from(*value).is_err() {
                    return Err(GenError::IntegerOutOfRange {
                        value: *value,
                        location: *location,
                    });
                }
                Ok(value.to_string())
            }
            Expression::StringLiteral(value, _) => Ok(c_string(value)),
            Expression::Infix {
                operator,
                left,
                right,
                location,
            } => self.infix(*operator, left, right, *location),
            Expression::Call {
                callee,
                arguments,
                location,
            } => self.call(callee, arguments, *location),
            Expression::FunctionLiteral { location, .. } => {
                Err(GenError::FunctionLiteralValue {
                    location: *location,
                })
            }
        }
    }

    fn infix(
        &mut self,
        operator: InfixOp,
        left: &Expression,
        right: &Expression,
        location: SourceLocation,
    ) -> Result<String, GenError> {
        let left_code = self.expression(left)?;
        let right_code = self.expression(right)?;

        let invalid = || GenError::InvalidStringOperation {
            operator: operator.symbol(),
            location,
        };

        match (self.infer_type(left), self.infer_type(right)) {
            (ValueType::Int, ValueType::Int) => Ok(format!(
                "{} {} {}",
                parenthesise(left, left_code),
                operator.symbol(),
                parenthesise(right, right_code)
            )),
            (ValueType::Str, ValueType::Str) => match operator {
                InfixOp::Add => match (constant_string(left), constant_string(right)) {
                    (Some(l), Some(r)) => Ok(format!("\"{}{}\"", l, r)),
                    _ => Ok(format!("concat_strings({}, {})", left_code, right_code)),
                },
                op if op.is_comparison() => Ok(format!(
                    "(strcmp({}, {}) {} 0)",
                    left_code,
                    right_code,
                    op.symbol()
                )),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }

    fn call(
        &mut self,
        callee: &Expression,
        arguments: &[Expression],
        location: SourceLocation,
    ) -> Result<String, GenError> {
        let name = match callee {
            Expression::Identifier(name, _) if self.symbols.lookup(name).is_none() => name,
            Expression::Identifier(name, _) => {
                return Err(GenError::UnsupportedCallee {
                    callee: name.clone(),
                    location,
                })
            }
            _ => {
                return Err(GenError::UnsupportedCallee {
                    callee: "expression".to_string(),
                    location,
                })
            }
        };

        // Functions outside the program (libc, externs) are passed through
        // unchecked.
        if let Some(function) = self.functions.get(name) {
            if function.parameters.len() != arguments.len() {
                return Err(GenError::ArgumentCountMismatch {
                    function: name.clone(),
                    expected: function.parameters.len(),
                    got: arguments.len(),
                    location,
                });
            }
            for (i, arg) in arguments.iter().enumerate() {
                let found = self.infer_type(arg);
                if found != ValueType::Int {
                    return Err(GenError::TypeMismatch {
                        context: format!("argument {} of '{}'", i + 1, name),
                        expected: ValueType::Int,
                        found,
                        location: arg.location(),
                    });
                }
            }
        }

        let args = arguments
            .iter()
            .map(|arg| self.expression(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("{}({})", name, args.join(", ")))
    }
}

/// Wrap a nested infix operand in parentheses so C keeps the AST grouping.
fn parenthesise(expr: &Expression, code: String) -> String {
    if matches!(expr, Expression::Infix { .. }) {
        format!("({})", code)
    } else {
        code
    }
}

/// C literal body of `expr` if it is a string known at compile time.
fn constant_string(expr: &Expression) -> Option<String> {
    match expr {
        Expression::StringLiteral(value, _) => Some(c_string_body(value)),
        Expression::Infix {
            operator: InfixOp::Add,
            left,
            right,
            ..
        } => Some(constant_string(left)? + &constant_string(right)?),
        _ => None,
    }
}

fn c_string(value: &str) -> String {
    format!("\"{}\"", c_string_body(value))
}

/// Translate the raw text of one source literal into the body of a C string
/// literal. Backslash sequences C understands pass through; any other
/// backslash is doubled, so the text can never end the literal early. Raw
/// control characters become escapes.
fn c_string_body(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some(&next) if is_c_escape(next) => {
                    out.push('\\');
                    out.push(next);
                    chars.next();
                }
                _ => out.push_str("\\\\"),
            },
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

/// Single-character C escapes. Octal and hex escapes are left out: they
/// swallow following digits, which would change meaning when two literals
/// are folded together.
fn is_c_escape(c: char) -> bool {
    matches!(
        c,
        'n' | 't' | 'r' | '\\' | '\'' | '"' | '?' | 'a' | 'b' | 'f' | 'v'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::Identifier(name.to_string(), SourceLocation::default())
    }

    fn string(value: &str) -> Expression {
        Expression::StringLiteral(value.to_string(), SourceLocation::default())
    }

    fn add(left: Expression, right: Expression) -> Expression {
        Expression::Infix {
            operator: InfixOp::Add,
            left: Box::new(left),
            right: Box::new(right),
            location: SourceLocation::default(),
        }
    }

    #[test]
    fn test_infer_literals_and_unknowns() {
        let generator = CodeGenerator::new();
        assert_eq!(generator.infer_type(&string("a")), ValueType::Str);
        assert_eq!(
            generator.infer_type(&Expression::IntegerLiteral(1, SourceLocation::default())),
            ValueType::Int
        );
        assert_eq!(generator.infer_type(&ident("nobody")), ValueType::Int);
    }

    #[test]
    fn test_infer_string_addition() {
        let mut generator = CodeGenerator::new();
        generator.symbols.push_scope();
        generator.symbols.declare("s", ValueType::Str);
        generator.symbols.declare("n", ValueType::Int);

        assert_eq!(generator.infer_type(&add(string("a"), string("b"))), ValueType::Str);
        assert_eq!(generator.infer_type(&add(string("a"), ident("s"))), ValueType::Str);
        assert_eq!(generator.infer_type(&add(ident("s"), ident("s"))), ValueType::Str);
        assert_eq!(generator.infer_type(&add(ident("s"), ident("n"))), ValueType::Int);
    }

    #[test]
    fn test_constant_folding_nests() {
        let expr = add(add(string("a"), string("b")), string("c"));
        assert_eq!(constant_string(&expr).as_deref(), Some("abc"));
        assert_eq!(constant_string(&add(string("a"), ident("s"))), None);
    }

    #[test]
    fn test_c_string_escapes_control_characters() {
        assert_eq!(c_string("a\nb"), "\"a\\nb\"");
        assert_eq!(c_string("tab\there"), "\"tab\\there\"");
    }

    #[test]
    fn test_c_string_backslashes() {
        // Known escapes pass through, anything else is a literal backslash.
        assert_eq!(c_string("line\\n"), "\"line\\n\"");
        assert_eq!(c_string("back\\slash"), "\"back\\\\slash\"");
        assert_eq!(c_string("a\\"), "\"a\\\\\"");
        assert_eq!(c_string("\\0"), "\"\\\\0\"");
    }

    #[test]
    fn test_folding_keeps_trailing_backslash_literal() {
        let expr = add(string("a\\"), string("b"));
        assert_eq!(constant_string(&expr).as_deref(), Some("a\\\\b"));
    }
}
