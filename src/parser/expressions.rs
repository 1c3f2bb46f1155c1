//! Expression parsing implementation
//!
//! Precedence climbing over prefix and infix rules. Every rule is entered
//! with `current` on the expression's first token and leaves `current` on
//! its last token.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parser::{ParseError, ParseResult, Parser};

/// Binding power of infix operators, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Precedence {
    Lowest,
    Equals,  // == !=
    Sum,     // + -
    Product, // * /
    Call,    // f(x)
}

impl Precedence {
    pub(crate) fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOp> {
    match kind {
        TokenKind::Plus => Some(InfixOp::Add),
        TokenKind::Minus => Some(InfixOp::Sub),
        TokenKind::Asterisk => Some(InfixOp::Mul),
        TokenKind::Slash => Some(InfixOp::Div),
        TokenKind::Eq => Some(InfixOp::Eq),
        TokenKind::NotEq => Some(InfixOp::NotEq),
        _ => None,
    }
}

impl Parser<'_> {
    /// Parse an expression whose operators all bind tighter than `precedence`.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek.kind)
        {
            self.next_token();
            left = if self.current_is(TokenKind::LParen) {
                self.parse_call(left)?
            } else {
                self.parse_infix(left)?
            };
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expression> {
        let location = self.current_location();
        match self.current.kind {
            TokenKind::Ident => Ok(Expression::Identifier(
                self.current.literal.clone(),
                location,
            )),
            TokenKind::Int => self
                .current
                .literal
                .parse::<i64>()
                .map(|value| Expression::IntegerLiteral(value, location))
                .map_err(|_| {
                    ParseError::new(
                        format!("could not parse \"{}\" as integer", self.current.literal),
                        location,
                    )
                }),
            TokenKind::String => Ok(Expression::StringLiteral(
                self.current.literal.clone(),
                location,
            )),
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::Func => self.parse_function_literal(),
            TokenKind::Illegal => Err(ParseError::new(
                format!("illegal token '{}'", self.current.literal),
                location,
            )),
            kind => Err(ParseError::new(
                format!("no prefix parse rule for {}", kind),
                location,
            )),
        }
    }

    /// `( expr )`; the parentheses leave no trace in the tree.
    fn parse_grouped(&mut self) -> ParseResult<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expr)
    }

    /// `func(params) { body }` in expression position
    fn parse_function_literal(&mut self) -> ParseResult<Expression> {
        let location = self.current_location();
        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expression::FunctionLiteral {
            parameters,
            body,
            location,
        })
    }

    fn parse_infix(&mut self, left: Expression) -> ParseResult<Expression> {
        let location = self.current_location();
        let operator = infix_operator(self.current.kind).ok_or_else(|| {
            ParseError::new(
                format!("no infix parse rule for {}", self.current.kind),
                location,
            )
        })?;
        let precedence = Precedence::of(self.current.kind);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            location,
        })
    }

    /// `callee(args)` with `current` on the `(`
    fn parse_call(&mut self, callee: Expression) -> ParseResult<Expression> {
        let location = self.current_location();
        let arguments =
            self.parse_delimited(TokenKind::RParen, |p| p.parse_expression(Precedence::Lowest))?;

        Ok(Expression::Call {
            callee: Box::new(callee),
            arguments,
            location,
        })
    }
}
