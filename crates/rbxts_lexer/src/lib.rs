//! rbxts-lexer - Tokenizer for TypeScript sources
//!
//! This crate provides a fast, hand-written lexer that produces a stream
//! of tokens suitable for parsing. It handles the TypeScript-specific
//! ambiguities the linter cares about: regex literals vs. division,
//! template strings, and `#` private identifiers.

mod token;
mod lexer;

pub use token::{Token, TokenKind, Span};
pub use lexer::Lexer;
