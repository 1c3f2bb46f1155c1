//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser keeps a two-token window (`current`, `peek`) over a lazily
//! driven [`Lexer`]:
//! - This module: Parser struct, diagnostics, helper methods, recovery
//! - `statements`: statement dispatch and the statement forms
//! - `expressions`: precedence climbing for expressions
//!
//! Every statement parser starts with `current` on the statement's first
//! token and returns with `current` on its last token (the `;` or `}`).
//!
//! # Error Recovery
//!
//! A statement that fails to parse is dropped, its [`ParseError`] is pushed
//! into the diagnostics list, and the parser skips to the next statement
//! boundary. A single pass therefore reports every independent error.

use crate::parser::ast::*;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Every diagnostic collected while parsing one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<ParseError>);

impl Diagnostics {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Pratt parser for the cccp language
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    pub(crate) errors: Vec<ParseError>,
    /// Number of `{` blocks currently open.
    pub(crate) block_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            block_depth: 0,
        }
    }

    /// Parse the entire program. Statements that fail to parse are left out
    /// of the result and reported through [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(stmt) => {
                    program.statements.push(stmt);
                    self.next_token();
                }
                Err(err) => self.record(err),
            }
        }

        program
    }

    /// Diagnostics collected so far
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parse, then hand back either the program or every diagnostic.
    pub fn finish(mut self) -> Result<Program, Diagnostics> {
        let program = self.parse_program();
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(Diagnostics(self.errors))
        }
    }

    /// Push a diagnostic and resynchronise on the next statement.
    pub(crate) fn record(&mut self, err: ParseError) {
        tracing::trace!(%err, "recording parse error");
        self.errors.push(err);
        self.synchronize();
    }

    /// Skip to the first token of the next statement: just past a `;`, onto
    /// a statement keyword, onto the enclosing block's `}`, or to the end of
    /// input. Always makes progress unless it is already at a stopping point
    /// that the caller's loop handles.
    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::RBrace if self.block_depth > 0 => return,
                TokenKind::Semicolon => {
                    self.next_token();
                    return;
                }
                _ => {}
            }
            self.next_token();
            if self.current.kind.starts_statement() {
                return;
            }
        }
    }

    // ===== Helper methods =====

    pub(crate) fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.current.location
    }

    /// Advance onto `peek` if it has the expected kind, otherwise fail with
    /// "expected X, got Y" and leave the window untouched.
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> ParseResult<()> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(self.peek_error(&kind.to_string()))
        }
    }

    pub(crate) fn peek_error(&self, expected: &str) -> ParseError {
        ParseError::new(
            format!("expected {}, got {}", expected, self.peek),
            self.peek.location,
        )
    }

    /// Consume a trailing `;` if there is one.
    pub(crate) fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    /// Read the current token as an identifier name.
    pub(crate) fn current_identifier(&self) -> ParseResult<String> {
        if self.current_is(TokenKind::Ident) {
            Ok(self.current.literal.clone())
        } else {
            Err(ParseError::new(
                format!("expected identifier, got {}", self.current),
                self.current.location,
            ))
        }
    }

    /// Parse a comma-separated list closed by `end`. On entry `current` is
    /// the opening delimiter; on exit it is `end`. `item` starts on the
    /// item's first token and must leave `current` on its last token.
    pub(crate) fn parse_delimited<T>(
        &mut self,
        end: TokenKind,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Ok(items);
        }

        self.next_token();
        items.push(item(self)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token(); // ','
            self.next_token();
            items.push(item(self)?);
        }

        if !self.peek_is(end) {
            return Err(self.peek_error(&format!("',' or {}", end)));
        }
        self.next_token();

        Ok(items)
    }
}

/// Parse a complete source text.
pub fn parse(source: &str) -> Result<Program, Diagnostics> {
    Parser::new(source).finish()
}
