use crate::{
    ast::ast::{Function, Global, OperatorKind, Prototype},
    errors::errors::{Error, ErrorKind},
    lexer::tokens::Token,
};

use super::{expr::parse_expression, parser::Parser};

/// Reserved name of the zero-parameter wrapper synthesized around a bare
/// top-level expression so it can be compiled and invoked like any other
/// function.
pub const ANONYMOUS_FUNCTION_NAME: &str = "__anon_expr";

/// prototype
///   ::= id '(' id* ')'
///   ::= unary OPCHAR '(' id ')'
///   ::= binary OPCHAR number? '(' id id ')'
///
/// A successfully parsed binary operator prototype installs its precedence
/// into the session table before this returns, so the operator is usable
/// in its own body and in every later unit.
pub fn parse_prototype(parser: &mut Parser) -> Result<Prototype, Error> {
    let (name, kind, precedence) = match parser.current().clone() {
        Token::Identifier(name) => {
            parser.advance();
            (name, OperatorKind::Plain, None)
        }
        Token::Unary => {
            parser.advance();
            let op = expect_operator_char(parser, "unary")?;
            (format!("unary{}", op), OperatorKind::Unary, None)
        }
        Token::Binary => {
            parser.advance();
            let op = expect_operator_char(parser, "binary")?;

            let precedence = match *parser.current() {
                Token::Number(value) => {
                    if !(1.0..=100.0).contains(&value) {
                        return Err(Error::new(
                            ErrorKind::InvalidPrecedence { value },
                            parser.position(),
                        ));
                    }
                    parser.advance();
                    Some(value as i32)
                }
                _ => None,
            };

            (format!("binary{}", op), OperatorKind::Binary, precedence)
        }
        token => {
            return Err(Error::new(
                ErrorKind::ExpectedPrototypeName {
                    found: token.to_string(),
                },
                parser.position(),
            ))
        }
    };

    parser.expect_char('(')?;
    let mut params = vec![];
    while let Token::Identifier(param) = parser.current() {
        params.push(param.clone());
        parser.advance();
    }
    parser.expect_char(')')?;

    let expected_arity = match kind {
        OperatorKind::Plain => None,
        OperatorKind::Unary => Some(1),
        OperatorKind::Binary => Some(2),
    };
    if let Some(expected) = expected_arity {
        if params.len() != expected {
            return Err(Error::new(
                ErrorKind::WrongOperatorArity {
                    expected,
                    found: params.len(),
                },
                parser.position(),
            ));
        }
    }

    let proto = Prototype {
        name,
        params,
        kind,
        precedence,
    };

    if proto.is_binary_operator() {
        if let Some(op) = proto.operator_char() {
            parser.precedence_mut().install(op, proto.binary_precedence());
        }
    }

    Ok(proto)
}

fn expect_operator_char(parser: &mut Parser, keyword: &str) -> Result<char, Error> {
    match *parser.current() {
        Token::Char(op) => {
            parser.advance();
            Ok(op)
        }
        ref token => Err(Error::new(
            ErrorKind::ExpectedOperatorChar {
                keyword: keyword.to_string(),
                found: token.to_string(),
            },
            parser.position(),
        )),
    }
}

/// definition ::= 'def' prototype expression
pub fn parse_definition(parser: &mut Parser) -> Result<Function, Error> {
    parser.advance(); // eat 'def'
    let proto = parse_prototype(parser)?;
    let body = parse_expression(parser)?;
    Ok(Function { proto, body })
}

/// external ::= 'extern' prototype
pub fn parse_extern(parser: &mut Parser) -> Result<Prototype, Error> {
    parser.advance(); // eat 'extern'
    parse_prototype(parser)
}

/// global ::= 'global' identifier '=' expression
pub fn parse_global(parser: &mut Parser) -> Result<Global, Error> {
    parser.advance(); // eat 'global'

    let name = match parser.current() {
        Token::Identifier(name) => name.clone(),
        token => {
            return Err(Error::new(
                ErrorKind::ExpectedToken {
                    expected: String::from("identifier after 'global'"),
                    found: token.to_string(),
                },
                parser.position(),
            ))
        }
    };
    parser.advance();

    parser.expect_char('=')?;
    let initializer = parse_expression(parser)?;

    Ok(Global { name, initializer })
}

/// toplevelexpr ::= expression
pub fn parse_top_level_expr(parser: &mut Parser) -> Result<Function, Error> {
    let body = parse_expression(parser)?;
    Ok(Function {
        proto: Prototype::function(String::from(ANONYMOUS_FUNCTION_NAME), vec![]),
        body,
    })
}
