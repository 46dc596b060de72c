//! rbxts-parser - AST builder for TypeScript sources
//!
//! A hand-written recursive descent parser that produces a borrowed AST
//! from tokens. The grammar covers the statements, expressions, binding
//! patterns and type annotations the lint rules inspect; exotic corners
//! of TypeScript degrade to permissive fallbacks rather than parse errors.

mod ast;
mod parse;

pub use ast::*;
pub use parse::{ParseError, Parser};
