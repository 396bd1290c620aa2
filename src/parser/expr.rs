use crate::{
    ast::ast::Expr,
    errors::errors::{Error, ErrorKind},
    lexer::tokens::Token,
};

use super::parser::Parser;

/// expression ::= unary binoprhs
pub fn parse_expression(parser: &mut Parser) -> Result<Expr, Error> {
    let lhs = parse_unary(parser)?;
    parse_binop_rhs(parser, 0, lhs)
}

/// primary
///   ::= identifierexpr
///   ::= numberexpr
///   ::= parenexpr
///   ::= ifexpr
///   ::= forexpr
///   ::= varexpr
pub fn parse_primary(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current() {
        Token::Identifier(_) => parse_identifier_expr(parser),
        Token::Number(_) => parse_number_expr(parser),
        Token::Char('(') => parse_paren_expr(parser),
        Token::If => parse_if_expr(parser),
        Token::For => parse_for_expr(parser),
        Token::Var => parse_var_expr(parser),
        token => Err(Error::new(
            ErrorKind::ExpectedExpression {
                found: token.to_string(),
            },
            parser.position(),
        )),
    }
}

/// unary
///   ::= primary
///   ::= OPCHAR unary
///
/// Any raw operator character other than `(` and `,` in prefix position is
/// treated as a unary operator application.
pub fn parse_unary(parser: &mut Parser) -> Result<Expr, Error> {
    let op = match parser.current() {
        Token::Char(c) if *c != '(' && *c != ',' => *c,
        _ => return parse_primary(parser),
    };

    parser.advance();
    let operand = parse_unary(parser)?;
    Ok(Expr::Unary {
        op,
        operand: Box::new(operand),
    })
}

/// binoprhs ::= (OPCHAR unary)*
///
/// Precedence climbing: operators below `min_prec` end the production.
/// A strictly tighter-binding operator after the right-hand side is
/// absorbed into it recursively, so equal precedence associates left.
/// `=` is the one exception: it also absorbs at equal precedence, which
/// makes assignment chains like `a = b = 3` associate right.
pub fn parse_binop_rhs(parser: &mut Parser, min_prec: i32, mut lhs: Expr) -> Result<Expr, Error> {
    loop {
        let tok_prec = parser.current_precedence();
        if tok_prec < min_prec {
            return Ok(lhs);
        }

        let op = match *parser.current() {
            Token::Char(c) => c,
            // current_precedence is -1 for anything that is not an
            // operator character, so with min_prec >= 0 this arm is only
            // a formality.
            _ => return Ok(lhs),
        };
        parser.advance();

        let mut rhs = parse_unary(parser)?;

        let next_prec = parser.current_precedence();
        if next_prec > tok_prec {
            rhs = parse_binop_rhs(parser, tok_prec + 1, rhs)?;
        } else if op == '=' && next_prec == tok_prec {
            rhs = parse_binop_rhs(parser, tok_prec, rhs)?;
        }

        lhs = Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        };
    }
}

/// numberexpr ::= number
fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.advance() {
        Token::Number(value) => Ok(Expr::Number(value)),
        token => Err(Error::new(
            ErrorKind::ExpectedExpression {
                found: token.to_string(),
            },
            parser.position(),
        )),
    }
}

/// parenexpr ::= '(' expression ')'
fn parse_paren_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance(); // eat '('
    let expr = parse_expression(parser)?;
    parser.expect_char(')')?;
    Ok(expr)
}

/// identifierexpr
///   ::= identifier
///   ::= identifier '(' expression* ')'
fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let name = match parser.advance() {
        Token::Identifier(name) => name,
        token => {
            return Err(Error::new(
                ErrorKind::ExpectedExpression {
                    found: token.to_string(),
                },
                parser.position(),
            ))
        }
    };

    if !parser.current().is_char('(') {
        return Ok(Expr::Variable(name));
    }

    parser.advance(); // eat '('
    let mut args = vec![];
    if !parser.current().is_char(')') {
        loop {
            args.push(parse_expression(parser)?);

            if parser.current().is_char(')') {
                break;
            }
            if !parser.current().is_char(',') {
                return Err(Error::new(
                    ErrorKind::ExpectedToken {
                        expected: String::from("')' or ',' in argument list"),
                        found: parser.current().to_string(),
                    },
                    parser.position(),
                ));
            }
            parser.advance();
        }
    }
    parser.advance(); // eat ')'

    Ok(Expr::Call { callee: name, args })
}

/// ifexpr ::= 'if' expression 'then' expression 'else' expression
fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance(); // eat 'if'

    let cond = parse_expression(parser)?;
    parser.expect(&Token::Then)?;
    let then_branch = parse_expression(parser)?;
    parser.expect(&Token::Else)?;
    let else_branch = parse_expression(parser)?;

    Ok(Expr::If {
        cond: Box::new(cond),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

/// forexpr ::= 'for' identifier '=' expr ',' expr (',' expr)? 'in' expression
fn parse_for_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance(); // eat 'for'

    let var = match parser.current() {
        Token::Identifier(name) => name.clone(),
        token => {
            return Err(Error::new(
                ErrorKind::ExpectedToken {
                    expected: String::from("identifier after 'for'"),
                    found: token.to_string(),
                },
                parser.position(),
            ))
        }
    };
    parser.advance();

    parser.expect_char('=')?;
    let start = parse_expression(parser)?;
    parser.expect_char(',')?;
    let end = parse_expression(parser)?;

    let step = if parser.current().is_char(',') {
        parser.advance();
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };

    parser.expect(&Token::In)?;
    let body = parse_expression(parser)?;

    Ok(Expr::For {
        var,
        start: Box::new(start),
        end: Box::new(end),
        step,
        body: Box::new(body),
    })
}

/// varexpr ::= 'var' identifier ('=' expression)?
///                   (',' identifier ('=' expression)?)* 'in' expression
fn parse_var_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance(); // eat 'var'

    let mut bindings = vec![];
    loop {
        let name = match parser.current() {
            Token::Identifier(name) => name.clone(),
            token => {
                return Err(Error::new(
                    ErrorKind::ExpectedBinding {
                        found: token.to_string(),
                    },
                    parser.position(),
                ))
            }
        };
        parser.advance();

        let init = if parser.current().is_char('=') {
            parser.advance();
            Some(parse_expression(parser)?)
        } else {
            None
        };
        bindings.push((name, init));

        if !parser.current().is_char(',') {
            break;
        }
        parser.advance();
    }

    parser.expect(&Token::In)?;
    let body = parse_expression(parser)?;

    Ok(Expr::Var {
        bindings,
        body: Box::new(body),
    })
}
