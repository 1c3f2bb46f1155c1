//! # Introduction
//!
//! cccp compiles a tiny imperative language (`var`, `print`, `if`/`else`,
//! `func`, `return`, `extern`) to C and hands the result to the system C
//! compiler.
//!
//! ## Compilation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → CodeGenerator → C source → cc → executable
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds an AST, collecting every
//!    syntax error in one pass.
//! 2. [`codegen`]: infers `int` / `string` types, tracks scopes and emits a
//!    single C translation unit.
//! 3. [`pipeline`]: runs both stages; syntax errors suppress generation.
//! 4. [`toolchain`]: writes `output.c`, compiles it and runs the executable.
//! 5. [`config`]: environment-driven settings for the binary.

pub mod codegen;
pub mod config;
pub mod parser;
pub mod pipeline;
pub mod toolchain;

pub use pipeline::{compile, CompileError};
