// AST (Abstract Syntax Tree) definitions for KRL source and data files

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Parameter passing direction. Every parameter must declare one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    In,  // :IN
    Out, // :OUT
}

/// Bare type-name reference (only used for function return types)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Type {
    pub name: String,
}

impl Type {
    pub fn new(name: impl Into<String>) -> Self {
        Type { name: name.into() }
    }
}

/// Formal parameter of a procedure or function definition
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Parameter {
    pub name: String,
    pub direction: Direction,
    pub location: SourceLocation,
}

/// Opaque metadata line (`&ACCESS RVP`) preceding all definitions.
///
/// `raw_value` is the text after the `&` marker, trailing whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileAttribute {
    pub raw_value: String,
}

/// A call statement inside a definition body: `name(arg, arg)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<String>, // Bare identifiers only
    pub location: SourceLocation,
}

/// Procedure (`DEF ... END`) or function (`DEFFCT type ... ENDFCT`) definition
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub body: Vec<FunctionCall>,
    pub return_type: Option<Type>, // None for procedures
    pub is_global: bool,
    pub location: SourceLocation,
}

impl FunctionDefinition {
    /// True for the `DEFFCT` form, which always declares a return type.
    pub fn is_function(&self) -> bool {
        self.return_type.is_some()
    }
}

/// `DEFDAT name [PUBLIC] ... ENDDAT`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataDefinition {
    pub name: String,
    pub is_public: bool,
    pub location: SourceLocation,
}

/// Executable file (`.src`). `statements` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceFile {
    pub name: String,
    pub file_attributes: Vec<FileAttribute>,
    pub statements: Vec<FunctionDefinition>,
}

/// Data file (`.dat`). `statements` holds exactly one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataFile {
    pub name: String,
    pub file_attributes: Vec<FileAttribute>,
    pub statements: Vec<DataDefinition>,
}

impl DataFile {
    /// The file's single data definition.
    pub fn definition(&self) -> Option<&DataDefinition> {
        self.statements.first()
    }
}

/// A source file and a data file sharing one name
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    pub name: String,
    pub source_file: SourceFile,
    pub data_file: DataFile,
}

/// Top-level node produced by one parse call
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AstNode {
    Module(Module),
    SourceFile(SourceFile),
    DataFile(DataFile),
}

impl AstNode {
    pub fn name(&self) -> &str {
        match self {
            AstNode::Module(module) => &module.name,
            AstNode::SourceFile(file) => &file.name,
            AstNode::DataFile(file) => &file.name,
        }
    }
}

impl From<Module> for AstNode {
    fn from(module: Module) -> Self {
        AstNode::Module(module)
    }
}

impl From<SourceFile> for AstNode {
    fn from(file: SourceFile) -> Self {
        AstNode::SourceFile(file)
    }
}

impl From<DataFile> for AstNode {
    fn from(file: DataFile) -> Self {
        AstNode::DataFile(file)
    }
}

/// Ordered list of top-level nodes, in the order they were parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Program {
    pub nodes: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
