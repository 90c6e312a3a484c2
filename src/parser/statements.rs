//! Statement parsing implementation
//!
//! A definition body is a sequence of call statements, one per line. Call
//! arguments are restricted to bare identifiers; literals and nested
//! expressions are rejected with a syntax error.
//!
//! # Grammar
//!
//! ```text
//! body      ::= (NEWLINE* mod_call)* NEWLINE*
//! mod_call  ::= NAME "(" params ")" NEWLINE
//! params    ::= [NAME ("," NAME)*]
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, SyntaxError};

impl Parser {
    /// Parse call statements until the next token is not an identifier
    pub(crate) fn parse_body(&mut self) -> Result<Vec<FunctionCall>, SyntaxError> {
        let mut body = Vec::new();

        loop {
            self.skip_newlines();

            if self.check(TokenKind::Name) {
                body.push(self.parse_call()?);
            } else {
                break;
            }
        }

        Ok(body)
    }

    /// Parse call statement: name(arg, arg)
    pub(crate) fn parse_call(&mut self) -> Result<FunctionCall, SyntaxError> {
        let location = self.current_location();
        let name = self.expect_name()?;

        self.expect(TokenKind::LParen)?;
        let arguments = self.parse_arguments()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Newline)?;

        Ok(FunctionCall {
            name,
            arguments,
            location,
        })
    }

    fn parse_arguments(&mut self) -> Result<Vec<String>, SyntaxError> {
        let mut args = Vec::new();

        if !self.check(TokenKind::Name) {
            return Ok(args);
        }

        loop {
            args.push(self.expect_name()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(text: &str) -> Result<Vec<FunctionCall>, SyntaxError> {
        let source = format!("DEF main()\n{}END\n", text);
        let mut parser = Parser::from_source(&source).unwrap();
        parser.parse_source_file("test").map(|mut file| file.statements.remove(0).body)
    }

    #[test]
    fn test_parse_calls_in_order() {
        let calls = body("  init()\n\n  move(home, fast)\n  stop(x)\n").unwrap();

        let names: Vec<_> = calls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["init", "move", "stop"]);
        assert!(calls[0].arguments.is_empty());
        assert_eq!(calls[1].arguments, vec!["home", "fast"]);
        assert_eq!(calls[1].location, SourceLocation::new(4, 3));
    }

    #[test]
    fn test_call_needs_newline() {
        let err = body("a() b()\n").unwrap_err();

        assert_eq!(err.message, "Expected newline, found identifier");
        assert_eq!(err.location, SourceLocation::new(2, 5));
    }

    #[test]
    fn test_argument_must_be_name() {
        let err = body("a(b, )\n").unwrap_err();

        assert_eq!(err.message, "Expected identifier, found ')'");
    }

    #[test]
    fn test_keyword_is_not_an_argument() {
        let err = body("a(IN)\n").unwrap_err();

        assert_eq!(err.message, "Expected ')', found 'IN'");
    }

    #[test]
    fn test_unclosed_call() {
        let err = body("a(b\n").unwrap_err();

        assert_eq!(err.message, "Expected ')', found newline");
        assert_eq!(err.location, SourceLocation::new(2, 4));
    }
}
