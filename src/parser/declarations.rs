//! Declaration parsing implementation
//!
//! This module handles the file-level grammar of KRL programs:
//!
//! - File headers: `&ACCESS RVP` attribute lines
//! - Procedure definitions: `[GLOBAL] DEF name(params) ... END`
//! - Function definitions: `[GLOBAL] DEFFCT type name(params) ... ENDFCT`
//! - Data definitions: `DEFDAT name [PUBLIC] ... ENDDAT`
//! - Formal parameters with their mandatory `IN`/`OUT` direction
//!
//! # Grammar
//!
//! ```text
//! source_file  ::= header definition+ EOF
//! data_file    ::= header data_def EOF
//! header       ::= (FILE_ATTRIBUTE NEWLINE+)*
//! definition   ::= ["GLOBAL"] (procedure | function)
//! procedure    ::= "DEF" NAME "(" params_def ")" NEWLINE body "END"
//! function     ::= "DEFFCT" NAME NAME "(" params_def ")" NEWLINE body "ENDFCT"
//! data_def     ::= "DEFDAT" NAME ["PUBLIC"] NEWLINE "ENDDAT"
//! params_def   ::= [param_def ("," param_def)*]
//! param_def    ::= NAME ":" ("IN" | "OUT")
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{Parser, SyntaxError};
use log::trace;

impl Parser {
    /// Parse a complete executable file
    pub(crate) fn parse_source_file(&mut self, name: &str) -> Result<SourceFile, SyntaxError> {
        let file_attributes = self.parse_header()?;

        let mut statements = Vec::new();
        while self.at_definition() {
            statements.push(self.parse_definition()?);
        }

        if statements.is_empty() {
            return Err(self.error("No module or function definition found"));
        }

        self.expect(TokenKind::Eof)?;

        Ok(SourceFile {
            name: name.to_string(),
            file_attributes,
            statements,
        })
    }

    /// Parse a complete data file
    pub(crate) fn parse_data_file(&mut self, name: &str) -> Result<DataFile, SyntaxError> {
        let file_attributes = self.parse_header()?;

        let mut statements = Vec::new();
        while self.check_keyword(Keyword::DefDat) {
            statements.push(self.parse_data_definition()?);
        }

        match statements.len() {
            0 => return Err(self.error("No data definition found")),
            1 => {}
            _ => return Err(self.error("More than one data definition found")),
        }

        self.expect(TokenKind::Eof)?;

        Ok(DataFile {
            name: name.to_string(),
            file_attributes,
            statements,
        })
    }

    /// Parse the attribute lines at the top of a file
    pub(crate) fn parse_header(&mut self) -> Result<Vec<FileAttribute>, SyntaxError> {
        let mut attributes = Vec::new();
        self.skip_newlines();

        while self.check(TokenKind::FileAttribute) {
            let token = self.advance();
            attributes.push(FileAttribute {
                raw_value: token.value,
            });
            self.expect(TokenKind::Newline)?;
            self.skip_newlines();
        }

        Ok(attributes)
    }

    fn at_definition(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(Keyword::Global | Keyword::Def | Keyword::DefFct)
        )
    }

    /// Parse a procedure or function definition, with its optional `GLOBAL`
    ///
    /// `GLOBAL` is only consumed once the following token is `DEF` or `DEFFCT`.
    pub(crate) fn parse_definition(&mut self) -> Result<FunctionDefinition, SyntaxError> {
        let location = self.current_location();

        let is_global = if self.check_keyword(Keyword::Global) {
            let next = self.peek_ahead(1);
            let (next_kind, next_location) = (next.kind, next.location);
            match next_kind {
                TokenKind::Keyword(Keyword::Def | Keyword::DefFct) => {
                    self.advance();
                    true
                }
                kind => {
                    return Err(SyntaxError::new(
                        format!("Expected 'DEF' or 'DEFFCT' after 'GLOBAL', found {}", kind),
                        next_location,
                    ))
                }
            }
        } else {
            false
        };

        let kind = self.peek().kind;
        match kind {
            TokenKind::Keyword(Keyword::Def) => self.parse_procedure(is_global, location),
            TokenKind::Keyword(Keyword::DefFct) => self.parse_function(is_global, location),
            kind => Err(self.error(format!("Expected 'DEF' or 'DEFFCT', found {}", kind))),
        }
    }

    /// Parse procedure definition: DEF name(params) ... END
    fn parse_procedure(
        &mut self,
        is_global: bool,
        location: SourceLocation,
    ) -> Result<FunctionDefinition, SyntaxError> {
        self.expect_keyword(Keyword::Def)?;
        let name = self.expect_name()?;
        trace!("procedure '{}' at {}", name, location);

        let parameters = self.parse_signature()?;
        let body = self.parse_body()?;

        self.expect_keyword(Keyword::End)?;
        self.skip_newlines();

        Ok(FunctionDefinition {
            name,
            parameters,
            body,
            return_type: None,
            is_global,
            location,
        })
    }

    /// Parse function definition: DEFFCT type name(params) ... ENDFCT
    fn parse_function(
        &mut self,
        is_global: bool,
        location: SourceLocation,
    ) -> Result<FunctionDefinition, SyntaxError> {
        self.expect_keyword(Keyword::DefFct)?;
        let return_type = Type::new(self.expect_name()?);
        let name = self.expect_name()?;
        trace!("function '{}' returning {} at {}", name, return_type.name, location);

        let parameters = self.parse_signature()?;
        let body = self.parse_body()?;

        self.expect_keyword(Keyword::EndFct)?;
        self.skip_newlines();

        Ok(FunctionDefinition {
            name,
            parameters,
            body,
            return_type: Some(return_type),
            is_global,
            location,
        })
    }

    /// `(params_def)` followed by the line break that opens the body
    fn parse_signature(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        self.expect(TokenKind::LParen)?;
        let parameters = self.parse_parameter_list()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Newline)?;
        Ok(parameters)
    }

    /// Parse data definition: DEFDAT name [PUBLIC] ... ENDDAT
    pub(crate) fn parse_data_definition(&mut self) -> Result<DataDefinition, SyntaxError> {
        self.skip_newlines();
        let location = self.current_location();

        self.expect_keyword(Keyword::DefDat)?;
        let name = self.expect_name()?;
        let is_public = self.match_token(TokenKind::Keyword(Keyword::Public));
        trace!("data definition '{}' at {}", name, location);

        self.expect(TokenKind::Newline)?;
        self.skip_newlines();
        self.expect_keyword(Keyword::EndDat)?;
        self.skip_newlines();

        Ok(DataDefinition {
            name,
            is_public,
            location,
        })
    }

    /// Parse parameter list: name:IN, name:OUT, ...
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>, SyntaxError> {
        let mut params = Vec::new();

        if !self.check(TokenKind::Name) {
            return Ok(params);
        }

        loop {
            params.push(self.parse_parameter()?);

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    fn parse_parameter(&mut self) -> Result<Parameter, SyntaxError> {
        let location = self.current_location();
        let name = self.expect_name()?;
        self.expect(TokenKind::Colon)?;

        let direction = if self.match_token(TokenKind::Keyword(Keyword::In)) {
            Direction::In
        } else if self.match_token(TokenKind::Keyword(Keyword::Out)) {
            Direction::Out
        } else {
            return Err(self.error(format!(
                "Expected 'IN' or 'OUT', found {}",
                self.peek().kind
            )));
        };

        Ok(Parameter {
            name,
            direction,
            location,
        })
    }
}
