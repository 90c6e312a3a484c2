//! KRL source and data file parser
//!
//! This module transforms KRL program text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), cursor primitives and error types
//! - [`ast`]: AST node definitions
//!
//! # Supported KRL Subset
//!
//! - Source files (`.src`): procedures (`DEF`/`END`) and functions
//!   (`DEFFCT`/`ENDFCT`), optionally `GLOBAL`, with `IN`/`OUT` parameters
//! - Bodies: call statements whose arguments are bare identifiers
//! - Data files (`.dat`): exactly one `DEFDAT`/`ENDDAT` block, optionally `PUBLIC`
//! - File attribute lines (`&ACCESS RVP`) ahead of any definition
//! - `;` line comments
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
pub mod lexer;
pub mod parse;
mod statements;
