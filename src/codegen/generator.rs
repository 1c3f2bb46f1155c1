//! C code generator
//!
//! [`CodeGenerator::generate`] consumes a [`Program`] and produces one C99
//! translation unit in two passes:
//!
//! 1. **Extraction**: top-level `func name(...)` declarations and top-level
//!    anonymous function literals move into the [`FunctionTable`]. Anonymous
//!    ones are named `func_0`, `func_1`, ... (source identifiers cannot
//!    contain digits, so these never collide). Everything else becomes the
//!    body of `main`.
//! 2. **Emission**: includes, the `concat_strings` helper, forward
//!    declarations, function definitions, then `int main()`.
//!
//! Every parameter and every return value is `int`. Variables are `int` or
//! `char*` depending on the inferred type of their initializer.

use crate::codegen::errors::GenError;
use crate::codegen::scope::{FunctionDef, FunctionTable, SymbolTable};
use crate::codegen::types::ValueType;
use crate::parser::ast::*;

const PRELUDE: &str = "\
#include <stdio.h>
#include <string.h>
#include <stdlib.h>

char* concat_strings(const char* a, const char* b) {
    char* result = malloc(strlen(a) + strlen(b) + 1);
    strcpy(result, a);
    strcat(result, b);
    return result;
}
";

const INDENT: &str = "    ";

/// Names that cannot be declared: C keywords, everything the emitted program
/// itself defines or calls, and the functions, macros and types declared by
/// the three included headers.
const RESERVED_NAMES: &[&str] = &[
    // C99 keywords
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
    "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex",
    "_Imaginary",
    // emitted program
    "main", "concat_strings",
    // stdio.h
    "printf", "fprintf", "sprintf", "snprintf", "vprintf", "vfprintf", "vsprintf",
    "vsnprintf", "scanf", "fscanf", "sscanf", "puts", "fputs", "putchar", "fputc", "putc",
    "getchar", "fgetc", "getc", "gets", "fgets", "ungetc", "fopen", "freopen", "fclose",
    "fflush", "fread", "fwrite", "fseek", "ftell", "rewind", "fgetpos", "fsetpos", "feof",
    "ferror", "clearerr", "remove", "rename", "perror", "tmpfile", "tmpnam", "setbuf",
    "setvbuf", "FILE", "fpos_t", "EOF", "BUFSIZ", "FILENAME_MAX", "SEEK_SET", "SEEK_CUR",
    "SEEK_END", "stdin", "stdout", "stderr",
    // string.h
    "strlen", "strcpy", "strncpy", "strcat", "strncat", "strcmp", "strncmp", "strcoll",
    "strxfrm", "strchr", "strrchr", "strstr", "strspn", "strcspn", "strpbrk", "strtok",
    "strerror", "memcpy", "memmove", "memset", "memcmp", "memchr",
    // stdlib.h
    "malloc", "calloc", "realloc", "free", "exit", "abort", "atexit", "getenv", "system",
    "atoi", "atol", "atoll", "atof", "strtol", "strtoll", "strtoul", "strtoull", "strtod",
    "strtof", "abs", "labs", "llabs", "div", "ldiv", "rand", "srand", "qsort", "bsearch",
    "mblen", "mbtowc", "wctomb", "mbstowcs", "wcstombs", "div_t", "ldiv_t", "size_t",
    "wchar_t", "RAND_MAX", "EXIT_SUCCESS", "EXIT_FAILURE", "MB_CUR_MAX",
    // shared
    "NULL",
];

pub(crate) fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Translates a parsed program into C source text
#[derive(Debug, Default)]
pub struct CodeGenerator {
    pub(crate) output: String,
    pub(crate) indent: usize,
    pub(crate) symbols: SymbolTable,
    pub(crate) functions: FunctionTable,
    anon_counter: usize,
    /// Whether a function body (rather than `main`) is being emitted
    pub(crate) in_function: bool,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate C source for `program`.
    pub fn generate(&mut self, program: Program) -> Result<String, GenError> {
        self.reset();

        let main_body = self.extract_functions(program)?;
        tracing::debug!(
            functions = self.functions.len(),
            main_statements = main_body.len(),
            "extracted functions"
        );

        self.output.push_str(PRELUDE);
        self.emit_forward_declarations();

        let functions: Vec<FunctionDef> = self.functions.iter().cloned().collect();
        for function in &functions {
            self.emit_function(function)?;
        }

        self.emit_main(&main_body)?;

        Ok(std::mem::take(&mut self.output))
    }

    fn reset(&mut self) {
        self.output.clear();
        self.indent = 0;
        self.symbols.clear();
        self.functions.clear();
        self.anon_counter = 0;
        self.in_function = false;
    }

    /// Pass 1: lift top-level functions out, returning the rest in order.
    fn extract_functions(&mut self, program: Program) -> Result<Vec<Statement>, GenError> {
        let mut main_body = Vec::new();

        for stmt in program.statements {
            match stmt {
                Statement::Function {
                    name,
                    parameters,
                    body,
                    location,
                } => {
                    if is_reserved(&name) {
                        return Err(GenError::ReservedName { name, location });
                    }
                    self.register_function(FunctionDef {
                        name,
                        parameters,
                        body,
                        location,
                    })?;
                }
                Statement::Expression {
                    expression:
                        Expression::FunctionLiteral {
                            parameters,
                            body,
                            location,
                        },
                    ..
                } => {
                    let name = format!("func_{}", self.anon_counter);
                    self.anon_counter += 1;
                    self.register_function(FunctionDef {
                        name,
                        parameters,
                        body,
                        location,
                    })?;
                }
                other => main_body.push(other),
            }
        }

        Ok(main_body)
    }

    fn register_function(&mut self, def: FunctionDef) -> Result<(), GenError> {
        tracing::trace!(name = %def.name, params = def.parameters.len(), "registering function");
        self.functions
            .insert(def)
            .map_err(|def| GenError::DuplicateFunction {
                name: def.name,
                location: def.location,
            })
    }

    fn emit_forward_declarations(&mut self) {
        if self.functions.is_empty() {
            return;
        }
        self.output.push('\n');
        let signatures: Vec<String> = self.functions.iter().map(signature).collect();
        for sig in signatures {
            self.line(&format!("{};", sig));
        }
    }

    fn emit_function(&mut self, function: &FunctionDef) -> Result<(), GenError> {
        self.output.push('\n');
        self.line(&format!("{} {{", signature(function)));

        self.in_function = true;
        self.indent = 1;
        self.symbols.push_scope();

        for param in &function.parameters {
            self.declare(param, ValueType::Int, function.location)?;
        }
        for stmt in &function.body.statements {
            self.emit_statement(stmt)?;
        }
        if !matches!(
            function.body.statements.last(),
            Some(Statement::Return { .. })
        ) {
            self.line("return 0;");
        }

        self.symbols.pop_scope();
        self.indent = 0;
        self.in_function = false;
        self.output.push_str("}\n");
        Ok(())
    }

    fn emit_main(&mut self, body: &[Statement]) -> Result<(), GenError> {
        self.output.push_str("\nint main() {\n");
        self.indent = 1;
        self.symbols.push_scope();

        for stmt in body {
            self.emit_statement(stmt)?;
        }
        self.line("return 0;");

        self.symbols.pop_scope();
        self.indent = 0;
        self.output.push_str("}\n");
        Ok(())
    }

    /// Declare a variable in the innermost scope after the name checks.
    pub(crate) fn declare(
        &mut self,
        name: &str,
        ty: ValueType,
        location: SourceLocation,
    ) -> Result<(), GenError> {
        if is_reserved(name) {
            return Err(GenError::ReservedName {
                name: name.to_string(),
                location,
            });
        }
        if !self.symbols.declare(name, ty) {
            return Err(GenError::Redeclaration {
                name: name.to_string(),
                location,
            });
        }
        Ok(())
    }

    /// Write one indented line of output.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }
}

fn signature(function: &FunctionDef) -> String {
    let params: Vec<String> = function
        .parameters
        .iter()
        .map(|p| format!("int {}", p))
        .collect();
    format!("int {}({})", function.name, params.join(", "))
}
