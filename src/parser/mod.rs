//! Parser module for building the Abstract Syntax Tree.
//!
//! This module contains the recursive-descent parser. Expressions are
//! parsed with precedence climbing over a mutable operator table, which
//! is what makes user-defined `binary` operators work: parsing a binary
//! operator prototype installs its precedence immediately, so source
//! appearing later in the same session can already use it.
//!
//! Submodules:
//! - parser: parser state (lexer, one-token lookahead, precedence table)
//! - precedence: the operator precedence table
//! - expr: expression parsing
//! - items: top-level units (definitions, externs, globals, expressions)

pub mod expr;
pub mod items;
pub mod parser;
pub mod precedence;

#[cfg(test)]
mod tests;
