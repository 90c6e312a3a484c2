//! # Introduction
//!
//! `krlparse` is the syntax front-end for KRL robot programs. A KRL module is
//! split into an executable source file (`.src`) holding procedure and
//! function definitions and a data file (`.dat`) holding one data definition.
//! This crate turns the text of those files into a typed, position-annotated
//! AST, or reports the first syntax error with its line and column.
//!
//! ## Pipeline
//!
//! ```text
//! Text → Lexer → Tokens → Parser → AST node → Frontend (accumulated Program)
//! ```
//!
//! 1. [`parser::lexer`] tokenises program text.
//! 2. [`parser::parse`] runs the recursive-descent grammar over one file.
//! 3. [`parser::ast`] holds the resulting node types.
//! 4. [`frontend`] collects nodes from many parse calls, in call order.
//!
//! Reading files from disk, semantic checks and code generation are left to
//! the caller.
//!
//! ## Example
//!
//! ```
//! use krlparse::Frontend;
//!
//! let mut frontend = Frontend::new();
//! frontend
//!     .parse_module("main", "DEF main()\n  init()\nEND\n", "DEFDAT main\nENDDAT\n")
//!     .unwrap();
//! assert_eq!(frontend.ast().len(), 1);
//! ```

pub mod frontend;
pub mod parser;

pub use frontend::Frontend;
pub use parser::ast::{
    AstNode, DataDefinition, DataFile, Direction, FileAttribute, FunctionCall, FunctionDefinition,
    Module, Parameter, Program, SourceFile, SourceLocation, Type,
};
pub use parser::lexer::{tokenize, Keyword, LexError, Token, TokenKind};
pub use parser::parse::{parse_data_file, parse_module, parse_source_file, ParseError, SyntaxError};
