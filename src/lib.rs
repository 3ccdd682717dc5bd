//! A compiler from a single infix arithmetic expression to x86_64 assembly
//! targeting a stack machine discipline.
//!
//! The pipeline runs three total passes in order:
//! - `lexer` turns the source text into a [`seq::Seq`] of tokens.
//! - `parser` folds the tokens into an [`ast::ExprNode`] tree.
//! - `codegen` walks the tree in postorder and emits instruction lines.
//!
//! Each stage reports failure with a typed error. Only the binary turns an
//! error into a [`diagnostic::Diagnostic`] and exits.

#[macro_use]
pub mod ast;
pub mod codegen;
pub mod diagnostic;
pub mod lexer;
pub mod parser;
pub mod seq;

use codegen::machine::arch::AvailableArchitectures;
use codegen::CodeGenerator;
use diagnostic::{Diagnostic, Locate};

/// CompileErr captures the first failure from any stage of the pipeline.
#[derive(Clone, PartialEq, Eq)]
pub enum CompileErr {
    Lex(lexer::LexErr),
    Parse(parser::ParseErr),
}

impl CompileErr {
    /// Renders the error against the source it was produced from.
    pub fn diagnostic(&self, source: &str) -> Diagnostic {
        match self {
            Self::Lex(e) => e.diagnostic(source),
            Self::Parse(e) => e.diagnostic(source),
        }
    }
}

impl Locate for CompileErr {
    fn offset(&self) -> usize {
        match self {
            Self::Lex(e) => e.offset(),
            Self::Parse(e) => e.offset(),
        }
    }
}

impl From<lexer::LexErr> for CompileErr {
    fn from(src: lexer::LexErr) -> Self {
        Self::Lex(src)
    }
}

impl From<parser::ParseErr> for CompileErr {
    fn from(src: parser::ParseErr) -> Self {
        Self::Parse(src)
    }
}

impl std::fmt::Debug for CompileErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "lex err: {:?}", e),
            Self::Parse(e) => write!(f, "parse err: {:?}", e),
        }
    }
}

impl std::fmt::Display for CompileErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", &self)
    }
}

/// Compiles `source` into a complete x86_64 assembly listing.
pub fn compile(source: &str) -> Result<String, CompileErr> {
    compile_for(AvailableArchitectures::default(), source)
}

/// Compiles `source` for the given target architecture.
pub fn compile_for(arch: AvailableArchitectures, source: &str) -> Result<String, CompileErr> {
    let tokens = lexer::lex(source)?;
    let expr = parser::parse(tokens, source)?;

    Ok(arch.generator().generate(expr).concat())
}
