//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs:
//! - Operator precedence and associativity, including the mutable table
//! - Primary expression forms (calls, if, for, var)
//! - The three prototype surfaces and their arity rules
//! - Error cases that the driver later recovers from

use crate::{
    ast::ast::{Expr, OperatorKind},
    errors::errors::ErrorKind,
    lexer::{lexer::Lexer, source::CharSource},
};

use super::{
    expr::parse_expression,
    items::{
        parse_definition, parse_extern, parse_global, parse_top_level_expr,
        ANONYMOUS_FUNCTION_NAME,
    },
    parser::Parser,
};

fn parser_for(source: &str) -> Parser {
    Parser::new(Lexer::new(CharSource::buffer(source.to_string()), "test.kl"))
}

fn binary(op: char, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let mut parser = parser_for("1+2*3");
    let expr = parse_expression(&mut parser).unwrap();

    assert_eq!(
        expr,
        binary(
            '+',
            Expr::Number(1.0),
            binary('*', Expr::Number(2.0), Expr::Number(3.0))
        )
    );
}

#[test]
fn test_equal_precedence_associates_left() {
    let mut parser = parser_for("1-2-3");
    let expr = parse_expression(&mut parser).unwrap();

    assert_eq!(
        expr,
        binary(
            '-',
            binary('-', Expr::Number(1.0), Expr::Number(2.0)),
            Expr::Number(3.0)
        )
    );
}

#[test]
fn test_assignment_chains_right() {
    let mut parser = parser_for("a=b=3");
    let expr = parse_expression(&mut parser).unwrap();

    assert_eq!(
        expr,
        binary(
            '=',
            Expr::Variable("a".to_string()),
            binary('=', Expr::Variable("b".to_string()), Expr::Number(3.0))
        )
    );
}

#[test]
fn test_parenthesized_expression() {
    let mut parser = parser_for("(1+2)*3");
    let expr = parse_expression(&mut parser).unwrap();

    assert_eq!(
        expr,
        binary(
            '*',
            binary('+', Expr::Number(1.0), Expr::Number(2.0)),
            Expr::Number(3.0)
        )
    );
}

#[test]
fn test_unclosed_paren_is_an_error() {
    let mut parser = parser_for("(1+2");
    assert!(parse_expression(&mut parser).is_err());
}

#[test]
fn test_variable_versus_call() {
    let mut parser = parser_for("foo");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::Variable("foo".to_string())
    );

    let mut parser = parser_for("foo(1, bar)");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::Call {
            callee: "foo".to_string(),
            args: vec![Expr::Number(1.0), Expr::Variable("bar".to_string())],
        }
    );

    let mut parser = parser_for("foo()");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::Call {
            callee: "foo".to_string(),
            args: vec![],
        }
    );
}

#[test]
fn test_malformed_argument_list_is_an_error() {
    let mut parser = parser_for("foo(1 2)");
    assert!(parse_expression(&mut parser).is_err());
}

#[test]
fn test_prefix_unary_operator() {
    let mut parser = parser_for("!x");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::Unary {
            op: '!',
            operand: Box::new(Expr::Variable("x".to_string())),
        }
    );

    // Unary parsing nests: !!x applies ! twice.
    let mut parser = parser_for("!!x");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::Unary {
            op: '!',
            operand: Box::new(Expr::Unary {
                op: '!',
                operand: Box::new(Expr::Variable("x".to_string())),
            }),
        }
    );
}

#[test]
fn test_if_requires_then_and_else() {
    let mut parser = parser_for("if x < 2 then 1 else 0");
    assert_eq!(
        parse_expression(&mut parser).unwrap(),
        Expr::If {
            cond: Box::new(binary(
                '<',
                Expr::Variable("x".to_string()),
                Expr::Number(2.0)
            )),
            then_branch: Box::new(Expr::Number(1.0)),
            else_branch: Box::new(Expr::Number(0.0)),
        }
    );

    let mut parser = parser_for("if x then 1");
    assert!(parse_expression(&mut parser).is_err());
}

#[test]
fn test_for_with_and_without_step() {
    let mut parser = parser_for("for i = 1, i < 10, 2 in i");
    let expr = parse_expression(&mut parser).unwrap();
    match expr {
        Expr::For { var, step, .. } => {
            assert_eq!(var, "i");
            assert_eq!(step, Some(Box::new(Expr::Number(2.0))));
        }
        other => panic!("expected a for expression, got {:?}", other),
    }

    let mut parser = parser_for("for i = 1, i < 10 in i");
    let expr = parse_expression(&mut parser).unwrap();
    match expr {
        Expr::For { step, .. } => assert_eq!(step, None),
        other => panic!("expected a for expression, got {:?}", other),
    }
}

#[test]
fn test_for_requires_in() {
    let mut parser = parser_for("for i = 1, i < 10 i");
    assert!(parse_expression(&mut parser).is_err());
}

#[test]
fn test_var_bindings_record_missing_initializers() {
    let mut parser = parser_for("var x = 1, y in x+y");
    let expr = parse_expression(&mut parser).unwrap();

    assert_eq!(
        expr,
        Expr::Var {
            bindings: vec![
                ("x".to_string(), Some(Expr::Number(1.0))),
                ("y".to_string(), None),
            ],
            body: Box::new(binary(
                '+',
                Expr::Variable("x".to_string()),
                Expr::Variable("y".to_string())
            )),
        }
    );
}

#[test]
fn test_var_requires_at_least_one_binding() {
    let mut parser = parser_for("var in x");
    let error = parse_expression(&mut parser).unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::ExpectedBinding { .. }));
}

#[test]
fn test_parse_plain_definition() {
    let mut parser = parser_for("def add(a b) a+b");
    let function = parse_definition(&mut parser).unwrap();

    assert_eq!(function.proto.name, "add");
    assert_eq!(function.proto.params, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(function.proto.kind, OperatorKind::Plain);
    assert_eq!(
        function.body,
        binary(
            '+',
            Expr::Variable("a".to_string()),
            Expr::Variable("b".to_string())
        )
    );
}

#[test]
fn test_parse_unary_operator_definition() {
    let mut parser = parser_for("def unary!(v) if v then 0 else 1");
    let function = parse_definition(&mut parser).unwrap();

    assert_eq!(function.proto.name, "unary!");
    assert_eq!(function.proto.kind, OperatorKind::Unary);
    assert_eq!(function.proto.operator_char(), Some('!'));
}

#[test]
fn test_binary_definition_installs_precedence_for_later_units() {
    let mut parser = parser_for("def binary> 10 (a b) b < a\n1>2>3");

    let function = parse_definition(&mut parser).unwrap();
    assert_eq!(function.proto.name, "binary>");
    assert_eq!(function.proto.kind, OperatorKind::Binary);
    assert_eq!(parser.precedence().get('>'), 10);

    // Equal precedence, so the fresh operator associates left.
    let expr = parse_expression(&mut parser).unwrap();
    assert_eq!(
        expr,
        binary(
            '>',
            binary('>', Expr::Number(1.0), Expr::Number(2.0)),
            Expr::Number(3.0)
        )
    );
}

#[test]
fn test_binary_definition_default_precedence() {
    let mut parser = parser_for("def binary| (a b) a+b");
    let function = parse_definition(&mut parser).unwrap();

    assert_eq!(function.proto.precedence, None);
    assert_eq!(function.proto.binary_precedence(), 30);
    assert_eq!(parser.precedence().get('|'), 30);
}

#[test]
fn test_binary_operator_usable_in_its_own_body() {
    let mut parser = parser_for("def binary& 6 (a b) a & b & b");
    assert!(parse_definition(&mut parser).is_ok());
}

#[test]
fn test_invalid_precedence_is_an_error() {
    let mut parser = parser_for("def binary% 200 (a b) a");
    let error = parse_definition(&mut parser).unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::InvalidPrecedence { .. }));
}

#[test]
fn test_operator_arity_is_enforced() {
    let mut parser = parser_for("def binary$ 5 (a) a");
    let error = parse_definition(&mut parser).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::WrongOperatorArity { expected: 2, found: 1 }
    ));

    let mut parser = parser_for("def unary$ (a b) a");
    let error = parse_definition(&mut parser).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::WrongOperatorArity { expected: 1, found: 2 }
    ));
}

#[test]
fn test_parse_extern() {
    let mut parser = parser_for("extern printd(x)");
    let proto = parse_extern(&mut parser).unwrap();

    assert_eq!(proto.name, "printd");
    assert_eq!(proto.params, vec!["x".to_string()]);
    assert_eq!(proto.kind, OperatorKind::Plain);
}

#[test]
fn test_missing_paren_in_prototype_is_an_error() {
    let mut parser = parser_for("def foo(x x+1");
    assert!(parse_definition(&mut parser).is_err());
}

#[test]
fn test_parse_global() {
    let mut parser = parser_for("global g = 41+1");
    let global = parse_global(&mut parser).unwrap();

    assert_eq!(global.name, "g");
    assert_eq!(
        global.initializer,
        binary('+', Expr::Number(41.0), Expr::Number(1.0))
    );
}

#[test]
fn test_top_level_expression_gets_anonymous_wrapper() {
    let mut parser = parser_for("4*2");
    let function = parse_top_level_expr(&mut parser).unwrap();

    assert_eq!(function.proto.name, ANONYMOUS_FUNCTION_NAME);
    assert!(function.proto.params.is_empty());
    assert_eq!(
        function.body,
        binary('*', Expr::Number(4.0), Expr::Number(2.0))
    );
}

#[test]
fn test_unknown_expression_starter_is_an_error() {
    let mut parser = parser_for("then");
    let error = parse_expression(&mut parser).unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::ExpectedExpression { .. }));
}
