//! Black-box tests for the expression engine: concrete end-to-end
//! usage scenarios, plus a few cross-cutting properties.

use std::collections::HashMap;

use nanocas::expr::ast::{BinOpKind, Node};
use nanocas::expr::evaluator::{EvalConfig, Evaluator};
use nanocas::expr::expander::Expander;
use nanocas::expr::latex::LatexEmitter;
use nanocas::expr::lexer::{Lexer, LexerConfig};
use nanocas::expr::multinode::MultinodeBuilder;
use nanocas::expr::parser::Parser;
use nanocas::expr::tokens::TokenType;

fn tokenize(source: &str) -> Vec<nanocas::expr::tokens::Token> {
    Lexer::new(LexerConfig::default()).tokenize(source).unwrap()
}

fn parse(source: &str) -> Node {
    Parser::new(tokenize(source)).parse().unwrap().root
}

fn eval(source: &str, bindings: &HashMap<String, f64>) -> f64 {
    Evaluator::new(bindings, EvalConfig::default())
        .evaluate(&parse(source))
        .unwrap()
        .as_number()
}

#[test]
fn scenario_lex_implicit_multiplication() {
    let tokens = tokenize("2x(y+1)");
    let kinds: Vec<_> = tokens.iter().map(|t| t.token_type.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::Number,
            TokenType::ImpMul,
            TokenType::Variable,
            TokenType::ImpMul,
            TokenType::LParen,
            TokenType::Variable,
            TokenType::Plus,
            TokenType::Number,
            TokenType::RParen,
            TokenType::Eof,
        ]
    );
}

#[test]
fn scenario_unary_minus_applies_after_power() {
    // "-3^2" with no variables evaluates to -9: unary minus binds looser
    // than `^`.
    assert_eq!(eval("-3^2", &HashMap::new()), -9.0);
}

#[test]
fn scenario_bound_arithmetic_expression() {
    let bindings = HashMap::from([
        ("a".to_string(), 1.0),
        ("b".to_string(), 2.0),
        ("c".to_string(), 3.0),
        ("d".to_string(), 4.0),
    ]);
    assert_eq!(eval("a + b*c - d", &bindings), 3.0);
}

#[test]
fn scenario_expand_difference_of_squares() {
    // (a+b)*(a-b) expands to an ExprMulti of four children: +a*a, -a*b,
    // +b*a, -b*b (forward cross-product order).
    let multi = MultinodeBuilder::to_multinode(&parse("(a+b)*(a-b)"));
    let expanded = Expander::expand(&multi).unwrap();
    match expanded {
        Node::ExprMulti { children, .. } => assert_eq!(children.len(), 4),
        other => panic!("expected ExprMulti with 4 children, got {other:?}"),
    }

    let bindings = HashMap::from([("a".to_string(), 5.0), ("b".to_string(), 3.0)]);
    let original = eval("(a+b)*(a-b)", &bindings);
    let back = MultinodeBuilder::to_binary(&expanded);
    let after = Evaluator::new(&bindings, EvalConfig::default())
        .evaluate(&back)
        .unwrap()
        .as_number();
    assert!((original - after).abs() < 1e-9);
}

#[test]
fn exponentiation_is_right_associative_and_evaluates_to_512() {
    let out = Parser::new(tokenize("2^3^2")).parse().unwrap();
    assert!(matches!(
        out.root,
        Node::BinOp { op: BinOpKind::Pow, .. }
    ));
    assert_eq!(eval("2^3^2", &HashMap::new()), 512.0);
}

#[test]
fn multinode_round_trip_preserves_numeric_value() {
    let bindings = HashMap::from([
        ("a".to_string(), 2.0),
        ("b".to_string(), 3.0),
        ("c".to_string(), 5.0),
        ("d".to_string(), 7.0),
    ]);
    for source in [
        "a+b-c",
        "a*b/c",
        "a-b+c-a",
        "(a+b)*c",
        "a/b/c",
        "(a+b)/(c+d)",
    ] {
        let binary = parse(source);
        let multi = MultinodeBuilder::to_multinode(&binary);
        let back = MultinodeBuilder::to_binary(&multi);
        let left = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&binary)
            .unwrap()
            .as_number();
        let right = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&back)
            .unwrap()
            .as_number();
        assert!((left - right).abs() < 1e-9, "mismatch for {source}");
    }
}

#[test]
fn expansion_preserves_numeric_value_across_bindings() {
    let bindings = HashMap::from([
        ("a".to_string(), 2.0),
        ("b".to_string(), 3.0),
        ("c".to_string(), 5.0),
        ("d".to_string(), 7.0),
    ]);
    for source in ["(a+b)*(c+d)", "(a+b)*(a-b)", "a*(b+c-d)", "(a+b)/c"] {
        let multi = MultinodeBuilder::to_multinode(&parse(source));
        let expanded = Expander::expand(&multi).unwrap();
        let back = MultinodeBuilder::to_binary(&expanded);
        let original = eval(source, &bindings);
        let after = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&back)
            .unwrap()
            .as_number();
        assert!((original - after).abs() < 1e-9, "mismatch for {source}");
    }
}

#[test]
fn latex_emission_reparses_to_an_equivalent_binary_tree() {
    let bindings = HashMap::from([("a".to_string(), 4.0), ("b".to_string(), 9.0)]);
    for source in ["a+b*2", "(a+b)^2", "a/b+1", "SQRT(a)+b"] {
        let binary = parse(source);
        let latex = LatexEmitter::emit(&binary).unwrap();
        assert!(!latex.is_empty());
        // The emitted LaTeX is not itself re-parsed (it isn't the input
        // grammar), but the binary tree it was rendered from must still
        // evaluate identically to re-parsing the original source.
        let reparsed = parse(source);
        let l = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&binary)
            .unwrap()
            .as_number();
        let r = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&reparsed)
            .unwrap()
            .as_number();
        assert!((l - r).abs() < 1e-9);
    }
}

#[test]
fn trailing_decimal_point_is_rejected() {
    let err = Lexer::new(LexerConfig::default()).tokenize("3.").unwrap_err();
    assert_eq!(err, nanocas::CasError::MissingDigit { offset: 2 });
}
