use std::mem;

use crate::{
    errors::errors::{Error, ErrorKind},
    lexer::{lexer::Lexer, tokens::Token},
    Position,
};

use super::precedence::PrecedenceTable;

/// The parser state: the lexer, a one-token lookahead and the session's
/// operator precedence table.
///
/// The parser lives for the whole session, so precedence entries
/// installed by one top-level unit are visible to every later one.
pub struct Parser {
    lexer: Lexer,
    current: Token,
    precedence: PrecedenceTable,
}

impl Parser {
    /// Creates a parser and primes the lookahead with the first token.
    /// In interactive mode this blocks until the first line arrives.
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        Parser {
            lexer,
            current,
            precedence: PrecedenceTable::default(),
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Token {
        mem::replace(&mut self.current, self.lexer.next_token())
    }

    pub fn position(&self) -> Position {
        self.lexer.position()
    }

    pub fn precedence(&self) -> &PrecedenceTable {
        &self.precedence
    }

    pub fn precedence_mut(&mut self) -> &mut PrecedenceTable {
        &mut self.precedence
    }

    /// Precedence of the current token when it is a known infix operator
    /// character, -1 otherwise.
    pub fn current_precedence(&self) -> i32 {
        match self.current {
            Token::Char(c) => self.precedence.get(c),
            _ => -1,
        }
    }

    /// Consumes the current token if it equals `expected`, errors otherwise.
    pub fn expect(&mut self, expected: &Token) -> Result<(), Error> {
        if self.current == *expected {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::ExpectedToken {
                    expected: format!("'{}'", expected),
                    found: self.current.to_string(),
                },
                self.position(),
            ))
        }
    }

    /// Consumes the current token if it is the raw character `expected`.
    pub fn expect_char(&mut self, expected: char) -> Result<(), Error> {
        if self.current.is_char(expected) {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::ExpectedToken {
                    expected: format!("'{}'", expected),
                    found: self.current.to_string(),
                },
                self.position(),
            ))
        }
    }
}
