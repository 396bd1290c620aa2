use std::rc::Rc;

use crate::Position;

use super::{
    source::CharSource,
    tokens::{Token, RESERVED_LOOKUP},
};

/// Streaming tokenizer with exactly one character of lookahead.
///
/// `last_char` always holds the first character that has not been folded
/// into a token yet (`None` once the source is exhausted), mirroring the
/// classic hand-written scanner shape. Tokens are produced lazily, one per
/// `next_token` call, which is what lets the interactive source block only
/// when the parser genuinely needs more input.
pub struct Lexer {
    source: CharSource,
    last_char: Option<char>,
    consumed: u32,
    name: Rc<String>,
}

impl Lexer {
    pub fn new(source: CharSource, name: &str) -> Lexer {
        Lexer {
            source,
            // A pseudo-space so the first call falls into whitespace
            // skipping and pulls the real first character.
            last_char: Some(' '),
            consumed: 0,
            name: Rc::new(String::from(name)),
        }
    }

    /// Position of the lookahead character in the stream.
    pub fn position(&self) -> Position {
        Position(self.consumed, Rc::clone(&self.name))
    }

    fn bump(&mut self) {
        self.last_char = self.source.next_char();
        if self.last_char.is_some() {
            self.consumed += 1;
        }
    }

    /// Returns the next token, advancing the lookahead cursor.
    ///
    /// Once the source is exhausted this returns `Token::Eof` on every
    /// call without reading further.
    pub fn next_token(&mut self) -> Token {
        while matches!(self.last_char, Some(c) if c.is_whitespace()) {
            self.bump();
        }

        let c = match self.last_char {
            Some(c) => c,
            None => return Token::Eof,
        };

        // identifier: [a-zA-Z][a-zA-Z0-9]*
        if c.is_ascii_alphabetic() {
            let mut ident = String::from(c);
            self.bump();
            while let Some(c) = self.last_char {
                if !c.is_ascii_alphanumeric() {
                    break;
                }
                ident.push(c);
                self.bump();
            }

            return match RESERVED_LOOKUP.get(ident.as_str()) {
                Some(token) => token.clone(),
                None => Token::Identifier(ident),
            };
        }

        // number: [0-9.]+
        if c.is_ascii_digit() || c == '.' {
            let mut text = String::new();
            while let Some(c) = self.last_char {
                if !c.is_ascii_digit() && c != '.' {
                    break;
                }
                text.push(c);
                self.bump();
            }

            // Runs like "1.2.3" are accepted as a single token; the value
            // of malformed text is not meaningful and defaults to 0.
            return Token::Number(text.parse().unwrap_or(0.0));
        }

        // '#' comments run to end of line and never become tokens.
        if c == '#' {
            while let Some(c) = self.last_char {
                if c == '\n' || c == '\r' {
                    break;
                }
                self.bump();
            }
            if self.last_char.is_none() {
                return Token::Eof;
            }
            return self.next_token();
        }

        // Anything else reaches the parser as a raw operator character.
        self.bump();
        Token::Char(c)
    }
}
