use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Token> = {
        let mut map = HashMap::new();
        map.insert("def", Token::Def);
        map.insert("extern", Token::Extern);
        map.insert("global", Token::Global);
        map.insert("if", Token::If);
        map.insert("then", Token::Then);
        map.insert("else", Token::Else);
        map.insert("for", Token::For);
        map.insert("in", Token::In);
        map.insert("binary", Token::Binary);
        map.insert("unary", Token::Unary);
        map.insert("var", Token::Var);
        map
    };
}

/// One lexed token. Keywords and structure get their own variant;
/// identifiers and numbers carry their payload; every other character is
/// passed through verbatim as `Char` so the parser sees user-defined
/// operator characters the same way it sees `+` or `(`.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Eof,

    // commands
    Def,
    Extern,
    Global,

    // primary
    Identifier(String),
    Number(f64),

    // control
    If,
    Then,
    Else,
    For,
    In,

    // operators
    Binary,
    Unary,

    // var definition
    Var,

    // anything else, returned as its raw character
    Char(char),
}

impl Token {
    pub fn is_char(&self, expected: char) -> bool {
        matches!(self, Token::Char(c) if *c == expected)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::Def => write!(f, "def"),
            Token::Extern => write!(f, "extern"),
            Token::Global => write!(f, "global"),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Number(value) => write!(f, "{}", value),
            Token::If => write!(f, "if"),
            Token::Then => write!(f, "then"),
            Token::Else => write!(f, "else"),
            Token::For => write!(f, "for"),
            Token::In => write!(f, "in"),
            Token::Binary => write!(f, "binary"),
            Token::Unary => write!(f, "unary"),
            Token::Var => write!(f, "var"),
            Token::Char(c) => write!(f, "{}", c),
        }
    }
}
