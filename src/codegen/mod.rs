//! C back end
//!
//! Turns a parsed [`Program`](crate::parser::ast::Program) into C source:
//! - [`generator`]: [`CodeGenerator`] state, function extraction, layout
//! - `statements` / `expressions`: emission for each AST node
//! - [`scope`]: [`SymbolTable`](scope::SymbolTable) and function table
//! - [`types`]: the `int` / `string` distinction
//! - [`errors`]: [`GenError`]

pub mod errors;
mod expressions;
pub mod generator;
pub mod scope;
mod statements;
pub mod types;

pub use errors::GenError;
pub use generator::CodeGenerator;
pub use types::ValueType;
