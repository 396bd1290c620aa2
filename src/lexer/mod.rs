//! Lexical analysis module for the Kalos front end.
//!
//! This module contains the lexer that turns a character stream into
//! tokens, one at a time. It handles:
//!
//! - Keywords, identifiers, numeric literals and `#` line comments
//! - Raw operator/punctuation characters (returned verbatim so the parser
//!   can treat user-defined operators uniformly with built-in ones)
//! - Both character sources: an eagerly loaded file buffer and a blocking
//!   interactive stream with a `ready> ` prompt

pub mod lexer;
pub mod source;
pub mod tokens;
