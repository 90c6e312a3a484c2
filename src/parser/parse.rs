//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, cursor primitives, and the per-file entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one token of lookahead:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: file headers, procedure/function/data definitions, parameters
//! - `statements`: definition bodies and call statements
//!
//! Parsing is fail-fast. The first mismatch aborts the whole file and no
//! partial tree is returned.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::lexer::{tokenize, Keyword, LexError, Token, TokenKind};
use log::debug;
use thiserror::Error;

/// Grammar violation, located at the offending token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {location}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub location: SourceLocation,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Any failure while turning one file's text into a tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Syntax(err) => err.location,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ParseError::Lex(err) => &err.message,
            ParseError::Syntax(err) => &err.message,
        }
    }
}

/// Recursive descent parser over one file's token stream
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Build a parser over an already lexed token stream. A trailing
    /// [`TokenKind::Eof`] is appended if the stream lacks one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }

        Self {
            tokens,
            position: 0,
        }
    }

    /// Lex `source` and build a parser over the result.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        Ok(Self::new(tokenize(source)?))
    }

    // ===== Helper methods =====

    /// Current token. Never runs past the trailing `Eof`.
    pub(crate) fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    /// Token `n` positions after the cursor, clamped to `Eof`.
    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + n).min(last)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Pure predicate; does not consume.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind. The cursor is
    /// left untouched on a mismatch.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("Expected {}, found {}", kind, self.peek().kind)))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Token, SyntaxError> {
        self.expect(TokenKind::Keyword(keyword))
    }

    pub(crate) fn expect_name(&mut self) -> Result<String, SyntaxError> {
        self.expect(TokenKind::Name).map(|token| token.value)
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.match_token(TokenKind::Newline) {}
    }

    /// Error located at the current token
    pub(crate) fn error(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(message, self.current_location())
    }
}

fn report<T>(kind: &str, name: &str, result: Result<T, ParseError>) -> Result<T, ParseError> {
    if let Err(err) = &result {
        debug!("{} '{}' rejected at {}: {}", kind, name, err.location(), err.message());
    }
    result
}

/// Lex and parse one executable file.
pub fn parse_source_file(name: &str, source: &str) -> Result<SourceFile, ParseError> {
    let result = Parser::from_source(source)
        .map_err(ParseError::from)
        .and_then(|mut parser| {
            debug!("parsing source file '{}' ({} tokens)", name, parser.tokens.len());
            parser.parse_source_file(name).map_err(ParseError::from)
        });
    report("source file", name, result)
}

/// Lex and parse one data file.
pub fn parse_data_file(name: &str, data: &str) -> Result<DataFile, ParseError> {
    let result = Parser::from_source(data)
        .map_err(ParseError::from)
        .and_then(|mut parser| {
            debug!("parsing data file '{}' ({} tokens)", name, parser.tokens.len());
            parser.parse_data_file(name).map_err(ParseError::from)
        });
    report("data file", name, result)
}

/// Lex both texts, then parse the source file followed by the data file.
/// Both files are named after the module.
pub fn parse_module(name: &str, source: &str, data: &str) -> Result<Module, ParseError> {
    report("module", name, module(name, source, data))
}

fn module(name: &str, source: &str, data: &str) -> Result<Module, ParseError> {
    let mut source_parser = Parser::from_source(source)?;
    let mut data_parser = Parser::from_source(data)?;
    debug!(
        "parsing module '{}' ({} source tokens, {} data tokens)",
        name,
        source_parser.tokens.len(),
        data_parser.tokens.len()
    );

    let source_file = source_parser.parse_source_file(name)?;
    let data_file = data_parser.parse_data_file(name)?;

    Ok(Module {
        name: name.to_string(),
        source_file,
        data_file,
    })
}
