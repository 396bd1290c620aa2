//! AST (Abstract Syntax Tree) module.
//!
//! Contains all definitions related to the AST structure.
//!
//! Submodules:
//! - ast: the closed set of node variants the parser produces
//! - render: rendering nodes back to canonical Kalos source text

pub mod ast;
pub mod render;
