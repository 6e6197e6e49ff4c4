//! LaTeX rendering of a binary or multinode AST.
//!
//! The bulk of the work is deciding where traditional notation needs
//! parentheses that the tree itself doesn't carry; [`LatexEmitter`] applies
//! precedence and associativity rules while walking.

use super::ast::{BinOpKind, BoolOpKind, CompareOpKind, ExprSign, FunctKind, MathConst, Node, TermRole};
use crate::error::CasError;

/// Renders a binary or multinode AST as a LaTeX string.
pub struct LatexEmitter;

impl LatexEmitter {
    /// Renders `node` as LaTeX.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::UnknownNodeKind`] only if the tree contains a
    /// bare holder with no parent multinode (an invariant violation, not
    /// something a well-formed tree produces).
    ///
    /// # Examples
    ///
    /// ```
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    /// use nanocas::expr::latex::LatexEmitter;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("(a+b)*c").unwrap();
    /// let parsed = Parser::new(tokens).parse().unwrap();
    /// assert_eq!(LatexEmitter::emit(&parsed.root).unwrap(), r"\left(a+b\right)\cdot c");
    /// ```
    pub fn emit(node: &Node) -> Result<String, CasError> {
        Self::render(node)
    }

    fn render(node: &Node) -> Result<String, CasError> {
        match node {
            Node::Number { value, .. } => Ok(value.clone()),
            Node::Variable { name, .. } => Ok(name.clone()),
            Node::MathConst { which, .. } => Ok(match which {
                MathConst::E => r"\mathrm{e}".to_string(),
                MathConst::Pi => r"\pi".to_string(),
            }),
            Node::UnaryMinus { child, .. } => {
                let inner = Self::render(child)?;
                Ok(format!(
                    "-{}",
                    Self::parens_if(needs_parens_unary_child(child), &inner)
                ))
            }
            Node::BinOp { op, left, right, .. } => Self::render_binop(*op, left, right),
            Node::CompareOp { op, left, right, .. } => {
                let l = Self::render(left)?;
                let r = Self::render(right)?;
                Ok(format!("{l}{}{r}", compare_op_latex(*op)))
            }
            Node::BoolOp { op, left, right, .. } => Self::render_boolop(*op, left, right),
            Node::Funct { which, child, .. } => Self::render_funct(*which, child),
            Node::ExprMulti { children, .. } => Self::render_expr_multi(children),
            Node::TermMulti { children, .. } => Self::render_term_multi(children),
            Node::ExprHolder { .. } | Node::TermHolder { .. } => Err(CasError::UnknownNodeKind),
        }
    }

    fn render_binop(op: BinOpKind, left: &Node, right: &Node) -> Result<String, CasError> {
        match op {
            BinOpKind::Div => {
                let l = Self::render(left)?;
                let r = Self::render(right)?;
                Ok(format!(r"\frac{{{l}}}{{{r}}}"))
            }
            BinOpKind::Pow => {
                let base = Self::render(left)?;
                let exp = Self::render(right)?;
                Ok(format!(
                    "{}^{{{exp}}}",
                    Self::parens_if(needs_parens_power_base(left), &base)
                ))
            }
            BinOpKind::Mul | BinOpKind::ImpMul => {
                let l = Self::render(left)?;
                let r = Self::render(right)?;
                let l = Self::parens_if(needs_parens_multiplicand(left), &l);
                let r = Self::parens_if(needs_parens_multiplicator(right), &r);
                match op {
                    BinOpKind::ImpMul => Ok(format!("{l}{r}")),
                    _ => Ok(format!(r"{l}\cdot {r}")),
                }
            }
            BinOpKind::Add => {
                let l = Self::render(left)?;
                let r = Self::render(right)?;
                let r = Self::parens_if(needs_parens_addend(right), &r);
                Ok(format!("{l}+{r}"))
            }
            BinOpKind::Sub => {
                let l = Self::render(left)?;
                let r = Self::render(right)?;
                let r = Self::parens_if(needs_parens_subtrahend(right), &r);
                Ok(format!("{l}-{r}"))
            }
        }
    }

    fn render_boolop(op: BoolOpKind, left: &Node, right: &Node) -> Result<String, CasError> {
        let l = Self::render(left)?;
        let r = Self::render(right)?;
        match op {
            BoolOpKind::And => {
                let l = Self::parens_if(is_bool_or(left), &l);
                let r = Self::parens_if(is_bool_or(right) || is_bool_and(right), &r);
                Ok(format!(r"{l}\wedge {r}"))
            }
            BoolOpKind::Or => {
                let r = Self::parens_if(is_bool_or(right), &r);
                Ok(format!(r"{l}\vee {r}"))
            }
        }
    }

    fn render_funct(which: FunctKind, child: &Node) -> Result<String, CasError> {
        let inner = Self::render(child)?;
        Ok(match which {
            FunctKind::Sqrt => format!(r"\sqrt{{{inner}}}"),
            FunctKind::Abs => format!(r"\left|{inner}\right|"),
            FunctKind::Exp => format!(r"\exp\left({inner}\right)"),
            FunctKind::Ln => format!(r"\ln\left({inner}\right)"),
            FunctKind::Log10 => format!(r"\lg\left({inner}\right)"),
            FunctKind::Sin => format!(r"\sin\left({inner}\right)"),
            FunctKind::Cos => format!(r"\cos\left({inner}\right)"),
            FunctKind::Tan => format!(r"\tan\left({inner}\right)"),
            FunctKind::Asin => format!(r"\arcsin\left({inner}\right)"),
            FunctKind::Acos => format!(r"\arccos\left({inner}\right)"),
            FunctKind::Atan => format!(r"\arctan\left({inner}\right)"),
        })
    }

    fn render_expr_multi(children: &[Node]) -> Result<String, CasError> {
        let mut parts = Vec::with_capacity(children.len());
        for (i, h) in children.iter().enumerate() {
            let (sign, child) = match h {
                Node::ExprHolder { sign, child } => (*sign, child.as_ref()),
                other => (ExprSign::Plus, other),
            };
            let rendered = Self::render(child)?;
            let signed = match (i, sign) {
                (0, ExprSign::Plus) => rendered,
                (0, ExprSign::Minus) => format!("-{rendered}"),
                (_, ExprSign::Plus) => format!("+{rendered}"),
                (_, ExprSign::Minus) => format!("-{rendered}"),
            };
            parts.push(signed);
        }
        Ok(format!(r"\left[{}\right]", parts.join("")))
    }

    fn render_term_multi(children: &[Node]) -> Result<String, CasError> {
        let mut numerators = Vec::new();
        let mut denominators = Vec::new();
        for h in children {
            match h {
                Node::TermHolder { role: TermRole::Numerator, child } => {
                    numerators.push(Self::render(child)?);
                }
                Node::TermHolder { role: TermRole::Denominator, child } => {
                    denominators.push(Self::render(child)?);
                }
                other => numerators.push(Self::render(other)?),
            }
        }
        let numerator = if numerators.is_empty() {
            "1".to_string()
        } else {
            numerators.join(r"\cdot ")
        };
        if denominators.is_empty() {
            Ok(numerator)
        } else {
            let denominator = denominators.join(r"\cdot ");
            Ok(format!(r"\frac{{{numerator}}}{{{denominator}}}"))
        }
    }

    fn parens_if(condition: bool, s: &str) -> String {
        if condition {
            format!(r"\left({s}\right)")
        } else {
            s.to_string()
        }
    }
}

fn compare_op_latex(op: CompareOpKind) -> &'static str {
    match op {
        CompareOpKind::Eq => "=",
        CompareOpKind::Gt => ">",
        CompareOpKind::Ge => r"\geq ",
        CompareOpKind::Lt => "<",
        CompareOpKind::Le => r"\leq ",
        CompareOpKind::Ne => r"\neq ",
    }
}

fn is_additive(node: &Node) -> bool {
    matches!(node, Node::BinOp { op: BinOpKind::Add | BinOpKind::Sub, .. })
}

fn is_unary_minus(node: &Node) -> bool {
    matches!(node, Node::UnaryMinus { .. })
}

fn is_mul_like(node: &Node) -> bool {
    matches!(node, Node::BinOp { op: BinOpKind::Mul | BinOpKind::ImpMul, .. })
}

fn is_bool_or(node: &Node) -> bool {
    matches!(node, Node::BoolOp { op: BoolOpKind::Or, .. })
}

fn is_bool_and(node: &Node) -> bool {
    matches!(node, Node::BoolOp { op: BoolOpKind::And, .. })
}

/// Multiplicand (left of `×`): parenthesize if `+`/`−`.
fn needs_parens_multiplicand(node: &Node) -> bool {
    is_additive(node)
}

/// Multiplicator (right of `×`): parenthesize if `+`, `−`, unary minus, or
/// another `×` (preserves left-associativity visually).
fn needs_parens_multiplicator(node: &Node) -> bool {
    is_additive(node) || is_unary_minus(node) || is_mul_like(node)
}

/// Addend (right of `+`): parenthesize if `+` or unary minus.
fn needs_parens_addend(node: &Node) -> bool {
    matches!(node, Node::BinOp { op: BinOpKind::Add, .. }) || is_unary_minus(node)
}

/// Subtrahend (right of `−`): parenthesize if `+`, `−`, or unary minus.
fn needs_parens_subtrahend(node: &Node) -> bool {
    is_additive(node) || is_unary_minus(node)
}

/// Unary-minus child: parenthesize if `+`, `−`, or unary minus.
fn needs_parens_unary_child(node: &Node) -> bool {
    is_additive(node) || is_unary_minus(node)
}

/// Power base: parenthesize unless it's a `MathConst`, `Number`, `Variable`,
/// or `Funct`.
fn needs_parens_power_base(node: &Node) -> bool {
    !matches!(
        node,
        Node::MathConst { .. } | Node::Number { .. } | Node::Variable { .. } | Node::Funct { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::{Lexer, LexerConfig};
    use crate::expr::multinode::MultinodeBuilder;
    use crate::expr::parser::Parser;

    fn emit(source: &str) -> String {
        let tokens = Lexer::new(LexerConfig::default()).tokenize(source).unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        LatexEmitter::emit(&parsed.root).unwrap()
    }

    #[test]
    fn renders_implicit_and_explicit_multiplication_differently() {
        assert_eq!(emit("2x"), "2x");
        assert_eq!(emit("2*x"), r"2\cdot x");
    }

    #[test]
    fn parenthesizes_sum_as_multiplicand() {
        assert_eq!(emit("(a+b)*c"), r"\left(a+b\right)\cdot c");
    }

    #[test]
    fn division_renders_as_frac() {
        assert_eq!(emit("a/b"), r"\frac{a}{b}");
    }

    #[test]
    fn sqrt_has_no_outer_parens() {
        assert_eq!(emit("SQRT(x)"), r"\sqrt{x}");
    }

    #[test]
    fn abs_uses_vertical_bars() {
        assert_eq!(emit("ABS(x)"), r"\left|x\right|");
    }

    #[test]
    fn power_parenthesizes_non_atomic_base() {
        assert_eq!(emit("(a+b)^2"), r"\left(a+b\right)^{2}");
        assert_eq!(emit("x^2"), "x^{2}");
    }

    #[test]
    fn right_associative_subtraction_needs_parens() {
        // "a-(b-c)" must keep its parens; they are semantically load-bearing.
        assert_eq!(emit("a-(b-c)"), r"a-\left(b-c\right)");
    }

    #[test]
    fn left_associative_subtraction_has_no_redundant_parens() {
        assert_eq!(emit("a-b-c"), "a-b-c");
    }

    #[test]
    fn compare_and_bool_render() {
        assert_eq!(emit("[a>b]&[c<d]"), r"a>b\wedge c<d");
    }

    #[test]
    fn multinode_expr_renders_with_brackets() {
        let tokens = Lexer::new(LexerConfig::default()).tokenize("a-b+c").unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        let multi = MultinodeBuilder::to_multinode(&parsed.root);
        assert_eq!(LatexEmitter::emit(&multi).unwrap(), r"\left[a-b+c\right]");
    }

    #[test]
    fn multinode_term_renders_as_frac_with_cdot_lists() {
        let tokens = Lexer::new(LexerConfig::default()).tokenize("a*b/(c*d)").unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        let multi = MultinodeBuilder::to_multinode(&parsed.root);
        assert_eq!(
            LatexEmitter::emit(&multi).unwrap(),
            r"\frac{a\cdot b}{c\cdot d}"
        );
    }
}
