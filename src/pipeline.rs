//! Source text to C in one call
//!
//! [`compile`] runs the lexer, parser and generator in order. Code generation
//! is never attempted while syntax diagnostics exist.

use crate::codegen::{CodeGenerator, GenError};
use crate::parser::parser::{Diagnostics, Parser};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{} syntax error(s):\n{0}", .0.len())]
    Syntax(Diagnostics),

    #[error("code generation failed: {0}")]
    Codegen(#[from] GenError),
}

impl From<Diagnostics> for CompileError {
    fn from(diagnostics: Diagnostics) -> Self {
        CompileError::Syntax(diagnostics)
    }
}

/// Compile `source` to a complete C translation unit.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        tracing::debug!(errors = parser.errors().len(), "parsing failed");
        return Err(Diagnostics(parser.errors().to_vec()).into());
    }
    tracing::debug!(statements = program.statements.len(), "parsed program");
    tracing::debug!("AST:\n{}", program);

    let code = CodeGenerator::new().generate(program)?;
    tracing::debug!(bytes = code.len(), "generated C source");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_errors_suppress_codegen() {
        match compile("var = 5;") {
            Err(CompileError::Syntax(diagnostics)) => assert_eq!(diagnostics.len(), 1),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_codegen_errors_surface() {
        match compile("print(missing);") {
            Err(CompileError::Codegen(GenError::UndefinedVariable { name, .. })) => {
                assert_eq!(name, "missing")
            }
            other => panic!("Expected codegen error, got {:?}", other),
        }
    }

    #[test]
    fn test_compile_is_deterministic() {
        let source = "func sq(n) { return n * n; } var s = \"a\"; print(s + \"b\"); print(sq(4));";
        let first = compile(source).unwrap();
        let second = compile(source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_display() {
        let err = compile("var = 5;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "1 syntax error(s):\nParse error at line 1, column 5: expected identifier, got '='"
        );
    }
}
