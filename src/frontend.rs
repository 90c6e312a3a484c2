//! Caller-facing façade that accumulates parsed files
//!
//! A [`Frontend`] owns an ordered [`Program`]. Each `parse_*` call lexes and
//! parses its input independently and appends exactly one node on success.
//! A failed call appends nothing and leaves earlier nodes untouched.
//!
//! The frontend holds no shared state. Parse files concurrently with one
//! frontend per thread and merge the programs afterwards with
//! [`Frontend::extend`].

use crate::parser::ast::{AstNode, Program};
use crate::parser::parse::{self, ParseError};
use log::debug;

#[derive(Debug, Default)]
pub struct Frontend {
    program: Program,
}

impl Frontend {
    pub fn new() -> Self {
        Frontend {
            program: Program::new(),
        }
    }

    /// Parse a `.src`/`.dat` pair into a module named `name`.
    pub fn parse_module(
        &mut self,
        name: &str,
        source: &str,
        data: &str,
    ) -> Result<(), ParseError> {
        let module = parse::parse_module(name, source, data)?;
        self.push(module.into());
        Ok(())
    }

    pub fn parse_source_file(&mut self, name: &str, source: &str) -> Result<(), ParseError> {
        let file = parse::parse_source_file(name, source)?;
        self.push(file.into());
        Ok(())
    }

    pub fn parse_data_file(&mut self, name: &str, data: &str) -> Result<(), ParseError> {
        let file = parse::parse_data_file(name, data)?;
        self.push(file.into());
        Ok(())
    }

    /// Nodes accumulated so far, in call order
    pub fn ast(&self) -> &[AstNode] {
        &self.program.nodes
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    /// Append the nodes of another frontend after this one's.
    pub fn extend(&mut self, other: Frontend) {
        self.program.nodes.extend(other.program.nodes);
    }

    fn push(&mut self, node: AstNode) {
        debug!("appending '{}' as node #{}", node.name(), self.program.nodes.len());
        self.program.nodes.push(node);
    }
}
