//! Front end of the compiler
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST + diagnostics)
//! - [`ast`]: AST node definitions
//! - [`printer`]: indented tree rendering of a parsed program
//!
//! # Language
//!
//! - Statements: `var`, assignment, `print(...)`, `if`/`else`, `extern`,
//!   `func`, `return`, nested `{ }` blocks and bare expressions
//! - Expressions: integers, strings, identifiers, `+ - * /`, `== !=`,
//!   calls and anonymous `func(...) { ... }` literals
//! - Semicolons are optional
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent for statements with precedence climbing for
//! expressions. No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parser;
pub mod printer;
mod statements;
