// Statement emission

use crate::codegen::errors::GenError;
use crate::codegen::generator::{is_reserved, CodeGenerator};
use crate::codegen::types::ValueType;
use crate::parser::ast::*;

impl CodeGenerator {
    pub(crate) fn emit_statement(&mut self, stmt: &Statement) -> Result<(), GenError> {
        match stmt {
            Statement::Let {
                name,
                value,
                location,
            } => self.emit_let(name, value.as_ref(), *location),

            Statement::Assignment {
                name,
                value,
                location,
            } => self.emit_assignment(name, value, *location),

            Statement::Print { value, .. } => self.emit_print(value),

            Statement::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.expression(condition)?;
                self.line(&format!("if ({}) {{", condition));
                self.emit_scoped(&consequence.statements)?;
                if let Some(alternative) = alternative {
                    self.line("} else {");
                    self.emit_scoped(&alternative.statements)?;
                }
                self.line("}");
                Ok(())
            }

            Statement::Block(block) => {
                self.line("{");
                self.emit_scoped(&block.statements)?;
                self.line("}");
                Ok(())
            }

            Statement::Extern { name, .. } => {
                self.line(&format!("// extern {} declared (handled by C headers)", name));
                Ok(())
            }

            Statement::Return { value, location } => {
                let Some(value) = value else {
                    self.line("return 0;");
                    return Ok(());
                };
                let found = self.infer_type(value);
                if found != ValueType::Int {
                    return Err(GenError::TypeMismatch {
                        context: "return value".to_string(),
                        expected: ValueType::Int,
                        found,
                        location: *location,
                    });
                }
                let value = self.expression(value)?;
                self.line(&format!("return {};", value));
                Ok(())
            }

            Statement::Function { name, location, .. } => Err(GenError::NestedFunction {
                name: name.clone(),
                location: *location,
            }),

            Statement::Expression { expression, .. } => {
                if self.in_function {
                    let code = self.expression(expression)?;
                    self.line(&format!("{};", code));
                    Ok(())
                } else {
                    self.emit_print(expression)
                }
            }
        }
    }

    /// Emit statements one indentation level deeper, inside their own scope.
    fn emit_scoped(&mut self, statements: &[Statement]) -> Result<(), GenError> {
        self.indent += 1;
        self.symbols.push_scope();

        let result = statements
            .iter()
            .try_for_each(|stmt| self.emit_statement(stmt));

        self.symbols.pop_scope();
        self.indent -= 1;
        result
    }

    fn emit_let(
        &mut self,
        name: &str,
        value: Option<&Expression>,
        location: SourceLocation,
    ) -> Result<(), GenError> {
        if is_reserved(name) {
            return Err(GenError::ReservedName {
                name: name.to_string(),
                location,
            });
        }
        let Some(value) = value else {
            self.declare(name, ValueType::Int, location)?;
            self.line(&format!("int {};", name));
            return Ok(());
        };

        // In C the new name is already in scope inside its own initializer.
        if let Some(loc) = mentions(value, name) {
            return Err(GenError::UndefinedVariable {
                name: name.to_string(),
                location: loc,
            });
        }

        let ty = self.infer_type(value);
        let code = self.expression(value)?;
        self.declare(name, ty, location)?;
        self.line(&format!("{} {} = {};", ty.c_type(), name, code));
        Ok(())
    }

    fn emit_assignment(
        &mut self,
        name: &str,
        value: &Expression,
        location: SourceLocation,
    ) -> Result<(), GenError> {
        let Some(expected) = self.symbols.lookup(name) else {
            return self.emit_let(name, Some(value), location);
        };

        let found = self.infer_type(value);
        if found != expected {
            return Err(GenError::TypeMismatch {
                context: format!("assignment to '{}'", name),
                expected,
                found,
                location,
            });
        }

        let code = self.expression(value)?;
        self.line(&format!("{} = {};", name, code));
        Ok(())
    }

    fn emit_print(&mut self, value: &Expression) -> Result<(), GenError> {
        let ty = self.infer_type(value);
        let code = self.expression(value)?;
        self.line(&format!("printf(\"{}\\n\", {});", ty.printf_format(), code));
        Ok(())
    }
}

/// Location of the first use of `name` inside `expr`, if any.
fn mentions(expr: &Expression, name: &str) -> Option<SourceLocation> {
    match expr {
        Expression::Identifier(ident, location) if ident == name => Some(*location),
        Expression::Identifier(..)
        | Expression::IntegerLiteral(..)
        | Expression::StringLiteral(..)
        | Expression::FunctionLiteral { .. } => None,
        Expression::Infix { left, right, .. } => {
            mentions(left, name).or_else(|| mentions(right, name))
        }
        Expression::Call {
            callee, arguments, ..
        } => mentions(callee, name).or_else(|| arguments.iter().find_map(|a| mentions(a, name))),
    }
}
