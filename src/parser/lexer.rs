//! Lexer (tokenizer) for KRL source and data files
//!
//! Converts raw program text into a flat [`Token`] stream consumed by the parser.
//! Line breaks are significant in KRL and come out as [`TokenKind::Newline`];
//! `;` comments and horizontal whitespace are dropped. Keywords are recognised
//! case-insensitively, so `def`, `Def` and `DEF` all lex as [`Keyword::Def`].

use super::ast::SourceLocation;
use log::trace;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Reserved words of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Def,
    End,
    DefFct,
    EndFct,
    DefDat,
    EndDat,
    Global,
    Public,
    In,
    Out,
}

impl Keyword {
    pub const ALL: [Keyword; 10] = [
        Keyword::Def,
        Keyword::End,
        Keyword::DefFct,
        Keyword::EndFct,
        Keyword::DefDat,
        Keyword::EndDat,
        Keyword::Global,
        Keyword::Public,
        Keyword::In,
        Keyword::Out,
    ];

    /// Canonical upper-case spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Def => "DEF",
            Keyword::End => "END",
            Keyword::DefFct => "DEFFCT",
            Keyword::EndFct => "ENDFCT",
            Keyword::DefDat => "DEFDAT",
            Keyword::EndDat => "ENDDAT",
            Keyword::Global => "GLOBAL",
            Keyword::Public => "PUBLIC",
            Keyword::In => "IN",
            Keyword::Out => "OUT",
        }
    }

    /// Look up a word in the keyword table, ignoring case.
    pub fn lookup(word: &str) -> Option<Keyword> {
        static TABLE: OnceLock<FxHashMap<&'static str, Keyword>> = OnceLock::new();
        let table = TABLE.get_or_init(|| Keyword::ALL.iter().map(|k| (k.as_str(), *k)).collect());
        table.get(word.to_ascii_uppercase().as_str()).copied()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of token categories shared by lexer and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Newline,
    LParen, // (
    RParen, // )
    Colon,  // :
    Comma,  // ,
    Name,
    FileAttribute, // &...
    Keyword(Keyword),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Name => write!(f, "identifier"),
            TokenKind::FileAttribute => write!(f, "file attribute"),
            TokenKind::Keyword(keyword) => write!(f, "'{}'", keyword),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A lexed token. `value` is the source text (attribute text for
/// [`TokenKind::FileAttribute`], empty for `Newline` and `Eof`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            value: value.into(),
            location,
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Tokenize a whole file in one go.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

/// Lexer for KRL program text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The last token is always [`TokenKind::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            let loc = self.current_location();
            let Some(ch) = self.advance() else {
                tokens.push(Token::new(TokenKind::Eof, "", loc));
                break;
            };

            tokens.push(self.next_token(ch, loc)?);
        }

        trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Classify the token starting with `ch`, which is already consumed
    fn next_token(&mut self, ch: char, loc: SourceLocation) -> Result<Token, LexError> {
        match ch {
            '\n' => Ok(Token::new(TokenKind::Newline, "", loc)),
            '&' => self.file_attribute(loc),
            c if is_name_start(c) => Ok(self.name_or_keyword(c, loc)),
            '(' => Ok(Token::new(TokenKind::LParen, "(", loc)),
            ')' => Ok(Token::new(TokenKind::RParen, ")", loc)),
            ':' => Ok(Token::new(TokenKind::Colon, ":", loc)),
            ',' => Ok(Token::new(TokenKind::Comma, ",", loc)),

            _ => Err(LexError {
                message: format!("Unexpected character '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse a file attribute line; the leading `&` is already consumed
    fn file_attribute(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();

        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        let trimmed = text.trim_end();
        if trimmed.is_empty() {
            return Err(LexError {
                message: "Empty file attribute".to_string(),
                location: loc,
            });
        }

        Ok(Token::new(TokenKind::FileAttribute, trimmed, loc))
    }

    /// Parse identifier or keyword
    fn name_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if is_name_continue(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match Keyword::lookup(&ident) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), ident, loc),
            None => Token::new(TokenKind::Name, ident, loc),
        }
    }

    /// Skip horizontal whitespace and `;` comments. Stops at `\n`.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\u{c}') => {
                    self.advance();
                }
                Some(';') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    /// Skip a comment up to, but not including, the line break
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_name_continue(ch: char) -> bool {
    is_name_start(ch) || ch.is_ascii_digit()
}
