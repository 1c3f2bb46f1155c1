//! Indented tree rendering of a parsed [`Program`] for debug output.
//!
//! ```text
//! Program:
//!   Let: x
//!     Integer: 5
//!   Print:
//!     Identifier: x
//! ```

use crate::parser::ast::*;
use std::fmt;

const INDENT: &str = "  ";

fn pad(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, label: &str, block: &Block, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    writeln!(f, "{}:", label)?;
    for stmt in &block.statements {
        write_statement(f, stmt, depth + 1)?;
    }
    Ok(())
}

fn write_statement(f: &mut fmt::Formatter<'_>, stmt: &Statement, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    match stmt {
        Statement::Let { name, value, .. } => {
            writeln!(f, "Let: {}", name)?;
            if let Some(value) = value {
                write_expression(f, value, depth + 1)?;
            }
        }
        Statement::Assignment { name, value, .. } => {
            writeln!(f, "Assign: {}", name)?;
            write_expression(f, value, depth + 1)?;
        }
        Statement::Print { value, .. } => {
            writeln!(f, "Print:")?;
            write_expression(f, value, depth + 1)?;
        }
        Statement::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            writeln!(f, "If:")?;
            write_expression(f, condition, depth + 1)?;
            write_block(f, "Then", consequence, depth + 1)?;
            if let Some(alternative) = alternative {
                write_block(f, "Else", alternative, depth + 1)?;
            }
        }
        Statement::Block(block) => {
            writeln!(f, "Block:")?;
            for stmt in &block.statements {
                write_statement(f, stmt, depth + 1)?;
            }
        }
        Statement::Extern { name, .. } => writeln!(f, "Extern: {}", name)?,
        Statement::Return { value, .. } => {
            writeln!(f, "Return:")?;
            if let Some(value) = value {
                write_expression(f, value, depth + 1)?;
            }
        }
        Statement::Function {
            name,
            parameters,
            body,
            ..
        } => {
            writeln!(f, "Function: {}({})", name, parameters.join(", "))?;
            write_block(f, "Body", body, depth + 1)?;
        }
        Statement::Expression { expression, .. } => {
            writeln!(f, "Expression:")?;
            write_expression(f, expression, depth + 1)?;
        }
    }
    Ok(())
}

fn write_expression(f: &mut fmt::Formatter<'_>, expr: &Expression, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    match expr {
        Expression::Identifier(name, _) => writeln!(f, "Identifier: {}", name),
        Expression::IntegerLiteral(value, _) => writeln!(f, "Integer: {}", value),
        Expression::StringLiteral(value, _) => writeln!(f, "String: \"{}\"", value),
        Expression::Infix {
            operator,
            left,
            right,
            ..
        } => {
            writeln!(f, "Infix: ({})", operator.symbol())?;
            write_expression(f, left, depth + 1)?;
            write_expression(f, right, depth + 1)
        }
        Expression::Call {
            callee, arguments, ..
        } => {
            writeln!(f, "Call:")?;
            write_expression(f, callee, depth + 1)?;
            for arg in arguments {
                write_expression(f, arg, depth + 1)?;
            }
            Ok(())
        }
        Expression::FunctionLiteral {
            parameters, body, ..
        } => {
            writeln!(f, "FunctionLiteral: ({})", parameters.join(", "))?;
            write_block(f, "Body", body, depth + 1)
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program:")?;
        for stmt in &self.statements {
            write_statement(f, stmt, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parser::parse;

    #[test]
    fn test_print_tree() {
        let program = parse("var x = 1 + 2; if x == 3 { print(\"yes\"); } else { f(x); }")
            .unwrap();
        let expected = "\
Program:
  Let: x
    Infix: (+)
      Integer: 1
      Integer: 2
  If:
    Infix: (==)
      Identifier: x
      Integer: 3
    Then:
      Print:
        String: \"yes\"
    Else:
      Expression:
        Call:
          Identifier: f
          Identifier: x
";
        assert_eq!(program.to_string(), expected);
    }

    #[test]
    fn test_print_function() {
        let program = parse("func add(a, b) { return a + b; }").unwrap();
        let expected = "\
Program:
  Function: add(a, b)
    Body:
      Return:
        Infix: (+)
          Identifier: a
          Identifier: b
";
        assert_eq!(program.to_string(), expected);
    }
}
