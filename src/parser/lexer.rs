//! Lexer (tokenizer) for cccp source code
//!
//! Converts raw source text into [`Token`]s on demand. The lexer never fails:
//! anything it cannot classify becomes a [`TokenKind::Illegal`] token and the
//! parser decides what to report.

use super::ast::SourceLocation;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    // Literals and names
    Ident,
    Int,
    String,

    // Operators
    Assign,   // =
    Plus,     // +
    Minus,    // -
    Asterisk, // *
    Slash,    // /
    Eq,       // ==
    NotEq,    // !=

    // Punctuation
    Comma,     // ,
    Semicolon, // ;
    Colon,     // :
    Dot,       // .
    Ellipsis,  // ...
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }

    // Keywords
    Print,
    Var,
    If,
    Extern,
    Func,
    Return,
}

impl TokenKind {
    /// Keyword table; every other word is an identifier.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "print" => Some(TokenKind::Print),
            "var" => Some(TokenKind::Var),
            "if" => Some(TokenKind::If),
            "extern" => Some(TokenKind::Extern),
            "func" => Some(TokenKind::Func),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Keywords that always open a statement, used for error recovery.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Print
                | TokenKind::Var
                | TokenKind::If
                | TokenKind::Extern
                | TokenKind::Func
                | TokenKind::Return
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Illegal => "illegal token",
            TokenKind::Eof => "end of file",
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::String => "string literal",
            TokenKind::Assign => "'='",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Asterisk => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Eq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Dot => "'.'",
            TokenKind::Ellipsis => "'...'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Print => "'print'",
            TokenKind::Var => "'var'",
            TokenKind::If => "'if'",
            TokenKind::Extern => "'extern'",
            TokenKind::Func => "'func'",
            TokenKind::Return => "'return'",
        };
        f.write_str(text)
    }
}

/// A single token: its kind, the source text it was read from, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        literal: impl Into<String>,
        location: SourceLocation,
    ) -> Self {
        Self {
            kind,
            literal: literal.into(),
            location,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.literal),
            TokenKind::Int => write!(f, "integer literal {}", self.literal),
            TokenKind::String => {
                write!(f, "string literal \"{}\"", self.literal)
            }
            TokenKind::Illegal => write!(f, "illegal token '{}'", self.literal),
            kind => write!(f, "{}", kind),
        }
    }
}

/// Lexer for cccp source code
pub struct Lexer<'a> {
    source: &'a str,
    position: usize,
    line: usize,
    column: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Produce the next token. Past the end of input this keeps returning
    /// `Eof`.
    pub fn next_token(&mut self) -> Token {
        if let Some(unterminated) = self.skip_whitespace_and_comments() {
            return unterminated;
        }

        let loc = self.current_location();
        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::Eof, "", loc);
        };

        match ch {
            b'"' => self.string_literal(),
            b'0'..=b'9' => self.number_literal(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier_or_keyword(),

            b'=' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    Token::new(TokenKind::Eq, "==", loc)
                } else {
                    Token::new(TokenKind::Assign, "=", loc)
                }
            }
            b'!' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    Token::new(TokenKind::NotEq, "!=", loc)
                } else {
                    Token::new(TokenKind::Illegal, "!", loc)
                }
            }
            b'.' => {
                self.advance();
                if self.peek() != Some(b'.') {
                    return Token::new(TokenKind::Dot, ".", loc);
                }
                self.advance();
                if self.peek() == Some(b'.') {
                    self.advance();
                    Token::new(TokenKind::Ellipsis, "...", loc)
                } else {
                    Token::new(TokenKind::Illegal, "..", loc)
                }
            }

            b'+' => self.single(TokenKind::Plus, loc),
            b'-' => self.single(TokenKind::Minus, loc),
            b'*' => self.single(TokenKind::Asterisk, loc),
            b'/' => self.single(TokenKind::Slash, loc),
            b',' => self.single(TokenKind::Comma, loc),
            b';' => self.single(TokenKind::Semicolon, loc),
            b':' => self.single(TokenKind::Colon, loc),
            b'(' => self.single(TokenKind::LParen, loc),
            b')' => self.single(TokenKind::RParen, loc),
            b'{' => self.single(TokenKind::LBrace, loc),
            b'}' => self.single(TokenKind::RBrace, loc),

            _ => {
                // Consume the whole character so multi-byte UTF-8 input
                // yields one illegal token rather than one per byte.
                let rest = &self.source[self.position..];
                let width = rest.chars().next().map_or(1, char::len_utf8);
                let literal = &rest[..width];
                for _ in 0..width {
                    self.advance();
                }
                Token::new(TokenKind::Illegal, literal, loc)
            }
        }
    }

    /// Consume one byte and produce a token of the given kind for it.
    fn single(&mut self, kind: TokenKind, loc: SourceLocation) -> Token {
        let start = self.position;
        self.advance();
        Token::new(kind, &self.source[start..self.position], loc)
    }

    /// Parse string literal. No escape sequences: the literal ends at the
    /// next `"`.
    fn string_literal(&mut self) -> Token {
        let loc = self.current_location();
        self.advance(); // opening quote
        let start = self.position;

        while let Some(ch) = self.peek() {
            if ch == b'"' {
                let value = &self.source[start..self.position];
                self.advance(); // closing quote
                return Token::new(TokenKind::String, value, loc);
            }
            self.advance();
        }

        let rest = &self.source[start..self.position];
        Token::new(TokenKind::Illegal, format!("\"{}", rest), loc)
    }

    /// Parse numeric literal (maximal run of decimal digits)
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        Token::new(TokenKind::Int, &self.source[start..self.position], loc)
    }

    /// Parse identifier or keyword. Identifiers are letters and underscores
    /// only.
    fn identifier_or_keyword(&mut self) -> Token {
        let loc = self.current_location();
        let start = self.position;
        while matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_')) {
            self.advance();
        }
        let word = &self.source[start..self.position];
        let kind = TokenKind::keyword(word).unwrap_or(TokenKind::Ident);
        Token::new(kind, word, loc)
    }

    /// Skip whitespace and comments. Returns an illegal token if a block
    /// comment runs off the end of the input.
    fn skip_whitespace_and_comments(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r' | b'\n') => {
                    self.advance();
                }
                Some(b'/') if self.peek_ahead(1) == Some(b'/') => {
                    self.skip_line_comment();
                }
                Some(b'/') if self.peek_ahead(1) == Some(b'*') => {
                    if let Err(token) = self.skip_block_comment() {
                        return Some(token);
                    }
                }
                _ => return None,
            }
        }
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == b'\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), Token> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some(b'*') && self.peek_ahead(1) == Some(b'/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(Token::new(TokenKind::Illegal, "/*", start_loc))
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.position + n).copied()
    }

    /// Advance the cursor by one byte, tracking line and column.
    fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else if ch & 0xC0 != 0x80 {
            // Continuation bytes do not start a new column.
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Yields every token up to and including the first `Eof`, then stops.
impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = Lexer::new("var x = 5;").tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].literal, "x");
        assert_eq!(tokens[2].kind, TokenKind::Assign);
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[3].literal, "5");
        assert_eq!(tokens[4].kind, TokenKind::Semicolon);
        assert_eq!(tokens[5].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= == != + - * / , ; : ( ) { }"),
            vec![
                TokenKind::Assign,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Asterisk,
                TokenKind::Slash,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dots() {
        let tokens = Lexer::new(". ... ..").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Dot);
        assert_eq!(tokens[1].kind, TokenKind::Ellipsis);
        assert_eq!(tokens[2].kind, TokenKind::Illegal);
        assert_eq!(tokens[2].literal, "..");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("print var if extern func return Print _name else"),
            vec![
                TokenKind::Print,
                TokenKind::Var,
                TokenKind::If,
                TokenKind::Extern,
                TokenKind::Func,
                TokenKind::Return,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_stop_at_digits() {
        let tokens = Lexer::new("abc123").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].literal, "abc");
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(tokens[1].literal, "123");
    }

    #[test]
    fn test_comments() {
        let tokens =
            Lexer::new("var x; // comment\nvar y; /* block\ncomment */ z")
                .tokenize();

        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[1].literal, "x");
        assert_eq!(tokens[2].kind, TokenKind::Semicolon);
        assert_eq!(tokens[3].kind, TokenKind::Var);
        assert_eq!(tokens[4].literal, "y");
        assert_eq!(tokens[5].kind, TokenKind::Semicolon);
        assert_eq!(tokens[6].literal, "z");
        assert_eq!(tokens[6].location, SourceLocation::new(3, 12));
    }

    #[test]
    fn test_string_literal_has_no_escapes() {
        let tokens = Lexer::new(r#""hello\nworld" 1"#).tokenize();

        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, r"hello\nworld");
        assert_eq!(tokens[1].kind, TokenKind::Int);
    }

    #[test]
    fn test_unterminated_string_is_illegal() {
        let tokens = Lexer::new("\"abc").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Illegal);
        assert_eq!(tokens[0].literal, "\"abc");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_unterminated_block_comment_is_illegal() {
        let tokens = Lexer::new("x /* never closed").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "/*");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_illegal_characters_do_not_stop_lexing() {
        let tokens = Lexer::new("a @ ! é b").tokenize();
        assert_eq!(tokens[1].kind, TokenKind::Illegal);
        assert_eq!(tokens[1].literal, "@");
        assert_eq!(tokens[2].kind, TokenKind::Illegal);
        assert_eq!(tokens[2].literal, "!");
        assert_eq!(tokens[3].kind, TokenKind::Illegal);
        assert_eq!(tokens[3].literal, "é");
        assert_eq!(tokens[4].literal, "b");
        assert_eq!(tokens[4].location, SourceLocation::new(1, 9));
    }

    #[test]
    fn test_eof_repeats() {
        let mut lexer = Lexer::new("x");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }
}
