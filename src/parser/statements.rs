//! Statement parsing implementation
//!
//! Dispatch is on the current token's kind. Each method here is entered with
//! `current` on the statement's first token and leaves `current` on its last
//! token; the caller advances past it.
//!
//! # Supported Statements
//!
//! - `var name;` / `var name = expr;`
//! - `name = expr;`
//! - `print(expr);`
//! - `if cond { ... } [else { ... }]`
//! - `extern name;`
//! - `return [expr];`
//! - `func name(params) { ... }`
//! - `{ ... }`
//! - any expression, e.g. a call made for its side effect

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::{ParseError, ParseResult, Parser};
use crate::parser::expressions::Precedence;

impl Parser<'_> {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Var => self.parse_let_statement(),
            TokenKind::Print => self.parse_print_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Extern => self.parse_extern_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Func if self.peek_is(TokenKind::Ident) => {
                self.parse_function_statement()
            }
            TokenKind::LBrace => Ok(Statement::Block(self.parse_block()?)),
            TokenKind::Ident if self.peek_is(TokenKind::Assign) => {
                self.parse_assignment_statement()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Parse `var name;` or `var name = value;`
    fn parse_let_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current.literal.clone();

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
            return Ok(Statement::Let {
                name,
                value: None,
                location,
            });
        }

        if !self.peek_is(TokenKind::Assign) {
            return Err(self.peek_error("'=' or ';' after variable name"));
        }
        self.next_token(); // '='
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Let {
            name,
            value: Some(value),
            location,
        })
    }

    /// Parse `name = value;`
    fn parse_assignment_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        let name = self.current.literal.clone();
        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Assignment {
            name,
            value,
            location,
        })
    }

    /// Parse `print(value);`
    fn parse_print_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        self.expect_peek(TokenKind::LParen)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        self.skip_optional_semicolon();

        Ok(Statement::Print { value, location })
    }

    /// Parse `if condition { ... }` with an optional `else { ... }`.
    ///
    /// `else` is not in the keyword table, so it is matched as an identifier
    /// spelled `else` directly after the consequence block.
    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative =
            if self.peek_is(TokenKind::Ident) && self.peek.literal == "else" {
                self.next_token();
                self.expect_peek(TokenKind::LBrace)?;
                Some(self.parse_block()?)
            } else {
                None
            };

        Ok(Statement::If {
            condition,
            consequence,
            alternative,
            location,
        })
    }

    /// Parse `extern name;`. Only the parameterless form exists.
    fn parse_extern_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current.literal.clone();

        if !self.peek_is(TokenKind::Semicolon) {
            return Err(ParseError::new(
                "extern declarations with parameters are not supported",
                self.peek.location,
            ));
        }
        self.next_token();

        Ok(Statement::Extern { name, location })
    }

    /// Parse `return;` or `return value;`
    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
            return Ok(Statement::Return {
                value: None,
                location,
            });
        }
        if self.peek_is(TokenKind::RBrace) || self.peek_is(TokenKind::Eof) {
            return Ok(Statement::Return {
                value: None,
                location,
            });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Return {
            value: Some(value),
            location,
        })
    }

    /// Parse `func name(params) { body }`
    fn parse_function_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        self.expect_peek(TokenKind::Ident)?;
        let name = self.current.literal.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Statement::Function {
            name,
            parameters,
            body,
            location,
        })
    }

    /// Parse an expression used as a statement.
    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let location = self.current_location();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Ok(Statement::Expression {
            expression,
            location,
        })
    }

    /// Parse `( name, name, ... )` with `current` on the `(`.
    pub(crate) fn parse_parameters(&mut self) -> ParseResult<Vec<String>> {
        self.parse_delimited(TokenKind::RParen, |p| p.current_identifier())
    }

    /// Parse a `{ ... }` block with `current` on the `{`. Leaves `current` on
    /// the matching `}`.
    ///
    /// Statements inside the block that fail to parse are recorded and
    /// skipped like top-level ones, so the block still closes on its own
    /// brace.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        let location = self.current_location();
        let mut statements = Vec::new();

        self.block_depth += 1;
        self.next_token();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                self.block_depth -= 1;
                return Err(ParseError::new(
                    format!(
                        "expected '}}' to close block opened at {}, got end of file",
                        location
                    ),
                    self.current_location(),
                ));
            }

            match self.parse_statement() {
                Ok(stmt) => {
                    statements.push(stmt);
                    self.next_token();
                }
                Err(err) => self.record(err),
            }
        }

        self.block_depth -= 1;
        Ok(Block {
            statements,
            location,
        })
    }
}
