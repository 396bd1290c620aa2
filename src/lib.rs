#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

pub mod ast;
pub mod driver;
pub mod engine;
pub mod errors;
pub mod lexer;
pub mod parser;

/// A character offset into a named source stream.
///
/// Interactive sessions have no resident buffer to point back into, so a
/// position is just the count of characters consumed so far plus the name
/// of the stream (`<stdin>` or the input file path).
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    /// Position for diagnostics that have no meaningful source location,
    /// e.g. failures raised while executing an already-parsed unit.
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }

    pub fn is_null(&self) -> bool {
        self.1.as_str() == "<null>"
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}
