//! Binary AST ⇄ multinode AST transforms.
//!
//! The multinode form collapses chains of `+`/`−`/unary-minus into a single
//! [`Node::ExprMulti`] of signed [`Node::ExprHolder`]s, and chains of
//! `×`/`×ᵢₘₚ`/`÷` into a single [`Node::TermMulti`] of numerator/denominator
//! [`Node::TermHolder`]s. Both directions are total: every binary AST has a
//! multinode form and vice versa, modulo the deterministic child ordering
//! the reverse transform applies to `TermMulti` children.

use std::cmp::Ordering;

use super::ast::{BinOpKind, ExprSign, FunctKind, MathConst, Node, TermRole};

/// Builds and inverts the multinode representation of a binary AST.
pub struct MultinodeBuilder;

impl MultinodeBuilder {
    /// Converts a binary AST into its multinode form.
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    /// use nanocas::expr::multinode::MultinodeBuilder;
    /// use nanocas::expr::ast::Node;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("a+b+c").unwrap();
    /// let parsed = Parser::new(tokens).parse().unwrap();
    /// let multi = MultinodeBuilder::to_multinode(&parsed.root);
    /// assert!(matches!(multi, Node::ExprMulti { .. }));
    /// ```
    #[must_use]
    pub fn to_multinode(node: &Node) -> Node {
        match node {
            Node::Number { .. } | Node::Variable { .. } | Node::MathConst { .. } => node.clone(),
            Node::UnaryMinus { .. } | Node::BinOp { op: BinOpKind::Add | BinOpKind::Sub, .. } => {
                Self::build_expr_multi(node)
            }
            Node::BinOp {
                op: BinOpKind::Mul | BinOpKind::ImpMul | BinOpKind::Div,
                ..
            } => Self::build_term_multi(node),
            Node::BinOp { op: BinOpKind::Pow, left, right, startpos } => Node::BinOp {
                op: BinOpKind::Pow,
                left: Box::new(Self::to_multinode(left)),
                right: Box::new(Self::to_multinode(right)),
                startpos: *startpos,
            },
            Node::CompareOp { op, left, right, startpos } => Node::CompareOp {
                op: *op,
                left: Box::new(Self::to_multinode(left)),
                right: Box::new(Self::to_multinode(right)),
                startpos: *startpos,
            },
            Node::BoolOp { op, left, right, startpos } => Node::BoolOp {
                op: *op,
                left: Box::new(Self::to_multinode(left)),
                right: Box::new(Self::to_multinode(right)),
                startpos: *startpos,
            },
            Node::Funct { which, child, startpos } => Node::Funct {
                which: *which,
                child: Box::new(Self::to_multinode(child)),
                startpos: *startpos,
            },
            // Already a multinode tree (e.g. re-entrant call); pass through
            // after recursing into children.
            Node::ExprMulti { children, startpos } => Node::ExprMulti {
                children: children.iter().map(Self::to_multinode).collect(),
                startpos: *startpos,
            },
            Node::TermMulti { children, startpos } => Node::TermMulti {
                children: children.iter().map(Self::to_multinode).collect(),
                startpos: *startpos,
            },
            Node::ExprHolder { sign, child } => Node::ExprHolder {
                sign: *sign,
                child: Box::new(Self::to_multinode(child)),
            },
            Node::TermHolder { role, child } => Node::TermHolder {
                role: *role,
                child: Box::new(Self::to_multinode(child)),
            },
        }
    }

    fn build_expr_multi(node: &Node) -> Node {
        let mut holders = Vec::new();
        Self::collect_expr_chain(node, ExprSign::Plus, &mut holders);
        if holders.len() == 1 {
            let (sign, child) = holders.into_iter().next().expect("len checked above");
            match sign {
                ExprSign::Plus => child,
                ExprSign::Minus => Node::UnaryMinus {
                    startpos: node.startpos(),
                    child: Box::new(child),
                },
            }
        } else {
            Node::ExprMulti {
                startpos: node.startpos(),
                children: holders
                    .into_iter()
                    .map(|(sign, child)| Node::ExprHolder {
                        sign,
                        child: Box::new(child),
                    })
                    .collect(),
            }
        }
    }

    fn collect_expr_chain(node: &Node, sign: ExprSign, out: &mut Vec<(ExprSign, Node)>) {
        match node {
            Node::BinOp { op: BinOpKind::Add, left, right, .. } => {
                Self::collect_expr_chain(left, sign, out);
                Self::collect_expr_chain(right, sign, out);
            }
            Node::BinOp { op: BinOpKind::Sub, left, right, .. } => {
                Self::collect_expr_chain(left, sign, out);
                Self::collect_expr_chain(right, flip_expr_sign(sign), out);
            }
            Node::UnaryMinus { child, .. } => {
                Self::collect_expr_chain(child, flip_expr_sign(sign), out);
            }
            other => out.push((sign, Self::to_multinode(other))),
        }
    }

    fn build_term_multi(node: &Node) -> Node {
        let mut holders = Vec::new();
        Self::collect_term_chain(node, TermRole::Numerator, &mut holders);
        if holders.len() == 1 {
            let (_, child) = holders.into_iter().next().expect("len checked above");
            child
        } else {
            Node::TermMulti {
                startpos: node.startpos(),
                children: holders
                    .into_iter()
                    .map(|(role, child)| Node::TermHolder {
                        role,
                        child: Box::new(child),
                    })
                    .collect(),
            }
        }
    }

    fn collect_term_chain(node: &Node, role: TermRole, out: &mut Vec<(TermRole, Node)>) {
        match node {
            Node::BinOp { op: BinOpKind::Mul | BinOpKind::ImpMul, left, right, .. } => {
                Self::collect_term_chain(left, role, out);
                Self::collect_term_chain(right, role, out);
            }
            Node::BinOp { op: BinOpKind::Div, left, right, .. } => {
                Self::collect_term_chain(left, role, out);
                Self::collect_term_chain(right, flip_role(role), out);
            }
            other => out.push((role, Self::to_multinode(other))),
        }
    }

    /// Converts a multinode AST back into strictly-binary form, applying
    /// the canonical `TermMulti` child ordering (numerators before
    /// denominators, each group in original encounter order).
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    /// use nanocas::expr::multinode::MultinodeBuilder;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("a+b+c").unwrap();
    /// let parsed = Parser::new(tokens).parse().unwrap();
    /// let multi = MultinodeBuilder::to_multinode(&parsed.root);
    /// let back = MultinodeBuilder::to_binary(&multi);
    /// assert!(matches!(back, nanocas::expr::ast::Node::BinOp { .. }));
    /// ```
    #[must_use]
    pub fn to_binary(node: &Node) -> Node {
        match node {
            Node::Number { .. } | Node::Variable { .. } | Node::MathConst { .. } => node.clone(),
            Node::UnaryMinus { child, startpos } => Node::UnaryMinus {
                child: Box::new(Self::to_binary(child)),
                startpos: *startpos,
            },
            Node::BinOp { op, left, right, startpos } => Node::BinOp {
                op: *op,
                left: Box::new(Self::to_binary(left)),
                right: Box::new(Self::to_binary(right)),
                startpos: *startpos,
            },
            Node::CompareOp { op, left, right, startpos } => Node::CompareOp {
                op: *op,
                left: Box::new(Self::to_binary(left)),
                right: Box::new(Self::to_binary(right)),
                startpos: *startpos,
            },
            Node::BoolOp { op, left, right, startpos } => Node::BoolOp {
                op: *op,
                left: Box::new(Self::to_binary(left)),
                right: Box::new(Self::to_binary(right)),
                startpos: *startpos,
            },
            Node::Funct { which, child, startpos } => Node::Funct {
                which: *which,
                child: Box::new(Self::to_binary(child)),
                startpos: *startpos,
            },
            Node::ExprMulti { children, startpos } => Self::fold_expr_multi(children, *startpos),
            Node::TermMulti { children, startpos } => Self::fold_term_multi(children, *startpos),
            // Holders never appear outside their parent multinode; treat a
            // stray one as its bare child.
            Node::ExprHolder { child, .. } | Node::TermHolder { child, .. } => Self::to_binary(child),
        }
    }

    fn fold_expr_multi(children: &[Node], startpos: Option<usize>) -> Node {
        let converted: Vec<(ExprSign, Node)> = children
            .iter()
            .map(|h| match h {
                Node::ExprHolder { sign, child } => (*sign, Self::to_binary(child)),
                other => (ExprSign::Plus, Self::to_binary(other)),
            })
            .collect();

        let mut iter = converted.into_iter();
        let (first_sign, first) = iter.next().expect("ExprMulti has at least two children");
        let mut result = match first_sign {
            ExprSign::Plus => first,
            ExprSign::Minus => Node::UnaryMinus {
                child: Box::new(first),
                startpos,
            },
        };
        for (sign, child) in iter {
            let op = match sign {
                ExprSign::Plus => BinOpKind::Add,
                ExprSign::Minus => BinOpKind::Sub,
            };
            result = Node::BinOp {
                op,
                left: Box::new(result),
                right: Box::new(child),
                startpos,
            };
        }
        result
    }

    fn fold_term_multi(children: &[Node], startpos: Option<usize>) -> Node {
        let mut ordered: Vec<&Node> = children.iter().collect();
        ordered.sort_by(|a, b| term_holder_key(a).cmp(&term_holder_key(b)));

        let mut numerators = Vec::new();
        let mut denominators = Vec::new();
        for h in ordered {
            match h {
                Node::TermHolder { role: TermRole::Numerator, child } => {
                    numerators.push(Self::to_binary(child));
                }
                Node::TermHolder { role: TermRole::Denominator, child } => {
                    denominators.push(Self::to_binary(child));
                }
                other => numerators.push(Self::to_binary(other)),
            }
        }

        let numerator_chain = if numerators.is_empty() {
            Node::Number { value: "1".to_string(), startpos: None }
        } else {
            fold_left_mul(numerators, startpos)
        };

        if denominators.is_empty() {
            numerator_chain
        } else {
            let denominator_chain = fold_left_mul(denominators, startpos);
            Node::BinOp {
                op: BinOpKind::Div,
                left: Box::new(numerator_chain),
                right: Box::new(denominator_chain),
                startpos,
            }
        }
    }
}

fn fold_left_mul(nodes: Vec<Node>, startpos: Option<usize>) -> Node {
    let mut iter = nodes.into_iter();
    let mut result = iter.next().expect("non-empty factor list");
    for next in iter {
        result = Node::BinOp {
            op: BinOpKind::Mul,
            left: Box::new(result),
            right: Box::new(next),
            startpos,
        };
    }
    result
}

fn flip_expr_sign(sign: ExprSign) -> ExprSign {
    match sign {
        ExprSign::Plus => ExprSign::Minus,
        ExprSign::Minus => ExprSign::Plus,
    }
}

fn flip_role(role: TermRole) -> TermRole {
    match role {
        TermRole::Numerator => TermRole::Denominator,
        TermRole::Denominator => TermRole::Numerator,
    }
}

/// Sort key for `TermMulti` children: numerator before denominator; within
/// a role, Numbers (ascending value) < MathConsts < Variables (ascending
/// first code point) < everything else (original order preserved via a
/// stable sort).
fn term_holder_key(node: &Node) -> (u8, u8, TotalF64, u32) {
    let (role, child) = match node {
        Node::TermHolder { role, child } => (*role, child.as_ref()),
        other => (TermRole::Numerator, other),
    };
    let role_rank = match role {
        TermRole::Numerator => 0,
        TermRole::Denominator => 1,
    };
    match child {
        Node::Number { value, .. } => (role_rank, 0, TotalF64(value.parse().unwrap_or(0.0)), 0),
        Node::MathConst { which, .. } => {
            let order = match which {
                MathConst::E => 0,
                MathConst::Pi => 1,
            };
            (role_rank, 1, TotalF64(0.0), order)
        }
        Node::Variable { name, .. } => (
            role_rank,
            2,
            TotalF64(0.0),
            name.chars().next().map_or(0, |c| c as u32),
        ),
        _ => (role_rank, 3, TotalF64(0.0), 0),
    }
}

/// A thin wrapper giving `f64` a total order for sort keys (no NaN ever
/// reaches here: it would only come from an unparsable numeric literal,
/// which the lexer already rejects).
#[derive(Debug, Clone, Copy, PartialEq)]
struct TotalF64(f64);

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
    }
}
