//! Lexical scopes for code generation
//!
//! - [`SymbolTable`]: stack of name → type frames
//! - [`FunctionTable`]: top-level functions in declaration order
//!
//! A frame is pushed when a function body, `main`, an `if` branch or a bare
//! block is entered and popped when it is left, so names declared inside a
//! block disappear with it and any outer binding they shadowed is visible
//! again.

use crate::codegen::types::ValueType;
use crate::parser::ast::{Block, SourceLocation};
use rustc_hash::FxHashMap;

/// Stack of scopes, innermost last
#[derive(Debug, Default)]
pub struct SymbolTable {
    scopes: Vec<FxHashMap<String, ValueType>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new scope
    pub fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Exit the current scope, dropping everything declared in it
    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare `name` in the innermost scope. Returns `false` without
    /// changing anything if the name is already declared in that scope.
    pub fn declare(&mut self, name: &str, ty: ValueType) -> bool {
        if self.scopes.is_empty() {
            self.push_scope();
        }
        let Some(scope) = self.scopes.last_mut() else {
            return false;
        };
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(name.to_string(), ty);
        true
    }

    /// Innermost binding of `name`
    pub fn lookup(&self, name: &str) -> Option<ValueType> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}

/// A function lifted out of the program for emission before `main`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Block,
    pub location: SourceLocation,
}

/// Functions in insertion order with a name index
#[derive(Debug, Default)]
pub struct FunctionTable {
    functions: Vec<FunctionDef>,
    index: FxHashMap<String, usize>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. Hands the definition back if the name is taken.
    pub fn insert(&mut self, def: FunctionDef) -> Result<(), FunctionDef> {
        if self.index.contains_key(&def.name) {
            return Err(def);
        }
        self.index.insert(def.name.clone(), self.functions.len());
        self.functions.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.iter()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn clear(&mut self) {
        self.functions.clear();
        self.index.clear();
    }
}
