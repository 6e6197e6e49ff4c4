//! Distributive expansion over a multinode AST.
//!
//! Expansion pushes products of sums into sums of products. It descends
//! into function arguments unchanged in kind, handles nested fractions, and
//! deliberately does **not** distribute across exponents: `(a+b)^2` is left
//! untouched.

use super::ast::{ExprSign, FunctKind, Node, TermRole};
use crate::error::CasError;

/// Applies distributivity exhaustively to a multinode AST.
pub struct Expander;

impl Expander {
    /// Expands `node` (expected to already be in multinode form; see
    /// [`super::multinode::MultinodeBuilder::to_multinode`]).
    ///
    /// # Errors
    ///
    /// Returns [`CasError::EmptyMultinodeTree`] if a `TermMulti`/`ExprMulti`
    /// somehow has no children (an invariant violation elsewhere in the
    /// pipeline, not something well-formed input can trigger).
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    /// use nanocas::expr::multinode::MultinodeBuilder;
    /// use nanocas::expr::expander::Expander;
    /// use nanocas::expr::ast::Node;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("(a+b)*(c+d)").unwrap();
    /// let parsed = Parser::new(tokens).parse().unwrap();
    /// let multi = MultinodeBuilder::to_multinode(&parsed.root);
    /// let expanded = Expander::expand(&multi).unwrap();
    /// assert!(matches!(expanded, Node::ExprMulti { ref children, .. } if children.len() == 4));
    /// ```
    pub fn expand(node: &Node) -> Result<Node, CasError> {
        match node {
            Node::TermMulti { children, .. } => Self::expand_term_multi(children),
            Node::ExprMulti { children, .. } => Self::expand_expr_multi(children),
            Node::Funct { which, child, startpos } => Ok(Node::Funct {
                which: *which,
                child: Box::new(Self::expand(child)?),
                startpos: *startpos,
            }),
            // Exponents, compare/bool operands, and plain atoms are left
            // exactly as they are: the expander never distributes across
            // `^`, and these node kinds never themselves hold a product of
            // sums that expansion would touch.
            other => Ok(other.clone()),
        }
    }

    fn expand_term_multi(children: &[Node]) -> Result<Node, CasError> {
        if children.is_empty() {
            return Err(CasError::EmptyMultinodeTree);
        }
        let mut numerator_factors = Vec::new();
        let mut denominator_factors = Vec::new();
        for h in children {
            match h {
                Node::TermHolder { role: TermRole::Numerator, child } => {
                    numerator_factors.push(Self::expand(child)?);
                }
                Node::TermHolder { role: TermRole::Denominator, child } => {
                    denominator_factors.push(Self::expand(child)?);
                }
                other => numerator_factors.push(Self::expand(other)?),
            }
        }

        let numerator = Self::fold_distributive(numerator_factors)?;
        if denominator_factors.is_empty() {
            return Ok(numerator);
        }
        let denominator = Self::fold_distributive(denominator_factors)?;
        if is_constant_one(&denominator) {
            return Ok(numerator);
        }
        Ok(Node::TermMulti {
            startpos: None,
            children: vec![
                Node::TermHolder {
                    role: TermRole::Numerator,
                    child: Box::new(numerator),
                },
                Node::TermHolder {
                    role: TermRole::Denominator,
                    child: Box::new(denominator),
                },
            ],
        })
    }

    fn fold_distributive(factors: Vec<Node>) -> Result<Node, CasError> {
        let mut iter = factors.into_iter();
        let mut acc = iter.next().ok_or(CasError::EmptyMultinodeTree)?;
        for next in iter {
            acc = distributive_product(&acc, &next);
        }
        Ok(acc)
    }

    fn expand_expr_multi(children: &[Node]) -> Result<Node, CasError> {
        if children.is_empty() {
            return Err(CasError::EmptyMultinodeTree);
        }
        let mut out = Vec::new();
        for h in children {
            let (sign, child) = match h {
                Node::ExprHolder { sign, child } => (*sign, child.as_ref()),
                other => (ExprSign::Plus, other),
            };
            let expanded = Self::expand(child)?;
            match expanded {
                Node::ExprMulti { children: nested, .. } => {
                    for nested_holder in nested {
                        let (nested_sign, nested_child) = match nested_holder {
                            Node::ExprHolder { sign: s, child: c } => (s, *c),
                            other => (ExprSign::Plus, other),
                        };
                        out.push(Node::ExprHolder {
                            sign: combine_sign(sign, nested_sign),
                            child: Box::new(nested_child),
                        });
                    }
                }
                other => out.push(Node::ExprHolder {
                    sign,
                    child: Box::new(other),
                }),
            }
        }
        if out.len() == 1 {
            let only = out.into_iter().next().expect("len checked above");
            match only {
                Node::ExprHolder { sign: ExprSign::Plus, child } => Ok(*child),
                Node::ExprHolder { sign: ExprSign::Minus, child } => Ok(Node::UnaryMinus {
                    child,
                    startpos: None,
                }),
                other => Ok(other),
            }
        } else {
            Ok(Node::ExprMulti { children: out, startpos: None })
        }
    }
}

fn combine_sign(outer: ExprSign, inner: ExprSign) -> ExprSign {
    if outer == inner {
        ExprSign::Plus
    } else {
        ExprSign::Minus
    }
}

/// Builds a `TermMulti` whose numerator-sided children are the
/// concatenation of `n1`'s and `n2`'s numerator children (wrapping bare
/// operands as singleton numerator holders). Precondition: neither operand
/// is an `ExprMulti`.
fn simple_product(n1: &Node, n2: &Node) -> Node {
    let mut children = Vec::new();
    push_numerator_children(n1, &mut children);
    push_numerator_children(n2, &mut children);
    if children.len() == 1 {
        let Node::TermHolder { child, .. } = children.into_iter().next().expect("len 1") else {
            unreachable!("push_numerator_children always pushes TermHolder")
        };
        *child
    } else {
        Node::TermMulti { children, startpos: None }
    }
}

fn push_numerator_children(node: &Node, out: &mut Vec<Node>) {
    match node {
        Node::TermMulti { children, .. } => out.extend(children.iter().cloned()),
        other => out.push(Node::TermHolder {
            role: TermRole::Numerator,
            child: Box::new(other.clone()),
        }),
    }
}

/// Cross-multiplies two expansion sums into one, term by term.
fn distributive_product(n1: &Node, n2: &Node) -> Node {
    match (n1, n2) {
        (Node::ExprMulti { children: c1, .. }, Node::ExprMulti { children: c2, .. }) => {
            let mut out = Vec::with_capacity(c1.len() * c2.len());
            for h1 in c1 {
                let (s1, child1) = holder_sign_child(h1);
                for h2 in c2 {
                    let (s2, child2) = holder_sign_child(h2);
                    let sign = if s1 == s2 { ExprSign::Plus } else { ExprSign::Minus };
                    out.push(Node::ExprHolder {
                        sign,
                        child: Box::new(simple_product(child1, child2)),
                    });
                }
            }
            Node::ExprMulti { children: out, startpos: None }
        }
        (Node::ExprMulti { children, .. }, other) => distribute_one_side(children, other),
        (other, Node::ExprMulti { children, .. }) => distribute_one_side(children, other),
        _ => simple_product(n1, n2),
    }
}

fn distribute_one_side(sum_children: &[Node], other: &Node) -> Node {
    let out: Vec<Node> = sum_children
        .iter()
        .map(|h| {
            let (sign, child) = holder_sign_child(h);
            Node::ExprHolder {
                sign,
                child: Box::new(simple_product(child, other)),
            }
        })
        .collect();
    Node::ExprMulti { children: out, startpos: None }
}

fn holder_sign_child(node: &Node) -> (ExprSign, &Node) {
    match node {
        Node::ExprHolder { sign, child } => (*sign, child.as_ref()),
        other => (ExprSign::Plus, other),
    }
}

fn is_constant_one(node: &Node) -> bool {
    matches!(node, Node::Number { value, .. } if value.parse::<f64>() == Ok(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::evaluator::{EvalConfig, Evaluator};
    use crate::expr::lexer::{Lexer, LexerConfig};
    use crate::expr::multinode::MultinodeBuilder;
    use crate::expr::parser::Parser;
    use std::collections::HashMap;

    fn expand_source(source: &str) -> Node {
        let tokens = Lexer::new(LexerConfig::default()).tokenize(source).unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        let multi = MultinodeBuilder::to_multinode(&parsed.root);
        Expander::expand(&multi).unwrap()
    }

    fn eval_binary(node: &Node, bindings: &HashMap<String, f64>) -> f64 {
        let binary = MultinodeBuilder::to_binary(node);
        Evaluator::new(bindings, EvalConfig::default())
            .evaluate(&binary)
            .unwrap()
            .as_number()
    }

    #[test]
    fn expands_product_of_two_sums_into_four_terms() {
        let expanded = expand_source("(a+b)*(c+d)");
        match &expanded {
            Node::ExprMulti { children, .. } => assert_eq!(children.len(), 4),
            other => panic!("expected ExprMulti with 4 children, got {other:?}"),
        }
    }

    #[test]
    fn expansion_preserves_numeric_value() {
        let bindings = HashMap::from([
            ("a".to_string(), 2.0),
            ("b".to_string(), 3.0),
            ("c".to_string(), 5.0),
            ("d".to_string(), 7.0),
        ]);
        for source in ["(a+b)*(c+d)", "(a+b)*(a-b)", "a*(b+c-d)", "(a+b)/(c)"] {
            let tokens = Lexer::new(LexerConfig::default()).tokenize(source).unwrap();
            let parsed = Parser::new(tokens).parse().unwrap();
            let original = eval_binary(&MultinodeBuilder::to_multinode(&parsed.root), &bindings);
            let expanded = expand_source(source);
            let after = eval_binary(&expanded, &bindings);
            assert!((original - after).abs() < 1e-9, "mismatch for {source}");
        }
    }

    #[test]
    fn does_not_distribute_across_power() {
        let expanded = expand_source("(a+b)^2");
        // The base stays an (unexpanded) ExprMulti under an untouched Pow.
        assert!(matches!(expanded, Node::BinOp { .. }));
    }

    #[test]
    fn descends_into_function_arguments() {
        let expanded = expand_source("SIN((a+b)*(c+d))");
        match expanded {
            Node::Funct { which: FunctKind::Sin, child, .. } => {
                assert!(matches!(*child, Node::ExprMulti { ref children, .. } if children.len() == 4));
            }
            other => panic!("expected Sin funct, got {other:?}"),
        }
    }

    #[test]
    fn handles_nested_fraction_denominator() {
        let expanded = expand_source("a/((b+c)*d)");
        assert!(matches!(expanded, Node::TermMulti { .. }));
    }
}
