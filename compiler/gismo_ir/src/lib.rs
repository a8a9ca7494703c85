//! Gismo IR - vocabulary shared by every stage of the toolchain.
//!
//! - [`Name`]: interned strings, used for symbols, type tags and operators
//! - [`Span`] / [`SourceId`] / [`SharedSourceMap`]: source locations across files
//! - [`Token`] / [`TokenKind`]: lexer output
//! - [`SyntaxNode`]: parser output, lowered into runtime values by the evaluator

mod interner;
mod name;
mod source_map;
mod span;
mod syntax;
mod token;

pub use interner::StringInterner;
pub use name::Name;
pub use source_map::{SharedSourceMap, SourceFile, SourceMap};
pub use span::{SourceId, Span};
pub use syntax::SyntaxNode;
pub use token::{Token, TokenKind};
