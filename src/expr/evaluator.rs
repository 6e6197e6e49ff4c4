//! Numeric evaluation of a binary AST.
//!
//! Evaluation is always IEEE-754 double precision; it is a wholly separate
//! code path from the exact bignum layer in [`crate::bignum`], which never
//! participates in expression evaluation.

use std::collections::HashMap;

use super::ast::{BinOpKind, BoolOpKind, CompareOpKind, FunctKind, MathConst, Node};
use crate::error::CasError;

/// Evaluator behavior fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    /// `true`: trig functions take/return radians. `false`: degrees.
    pub radians: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { radians: true }
    }
}

/// A runtime value: either a number or a boolean. A nonzero number is truthy
/// in boolean context, and a bool coerces to 1.0/0.0 when an arithmetic
/// operator receives one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
}

impl Value {
    #[must_use]
    pub fn as_number(self) -> f64 {
        match self {
            Self::Number(n) => n,
            Self::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    #[must_use]
    pub fn as_bool(self) -> bool {
        match self {
            Self::Bool(b) => b,
            Self::Number(n) => n != 0.0,
        }
    }
}

const ZERO_DENOMINATOR_THRESHOLD: f64 = 1e-30;

/// Evaluates a binary AST against a variable binding table.
pub struct Evaluator<'a> {
    bindings: &'a HashMap<String, f64>,
    config: EvalConfig,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(bindings: &'a HashMap<String, f64>, config: EvalConfig) -> Self {
        Self { bindings, config }
    }

    /// Evaluates `node`, requiring every [`Node::Variable`] it touches to
    /// have a binding in the table passed at construction.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::MissingVariable`] for an unbound variable and
    /// [`CasError::ZeroDenominator`] when a `÷` divisor's absolute value is
    /// below `1e-30`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use nanocas::expr::evaluator::{EvalConfig, Evaluator};
    /// use nanocas::expr::lexer::{Lexer, LexerConfig};
    /// use nanocas::expr::parser::Parser;
    ///
    /// let tokens = Lexer::new(LexerConfig::default()).tokenize("a+b*c").unwrap();
    /// let parsed = Parser::new(tokens).parse().unwrap();
    /// let bindings = HashMap::from([
    ///     ("a".to_string(), 1.0),
    ///     ("b".to_string(), 2.0),
    ///     ("c".to_string(), 3.0),
    /// ]);
    /// let value = Evaluator::new(&bindings, EvalConfig::default())
    ///     .evaluate(&parsed.root)
    ///     .unwrap()
    ///     .as_number();
    /// assert_eq!(value, 3.0);
    /// ```
    pub fn evaluate(&self, node: &Node) -> Result<Value, CasError> {
        match node {
            Node::Number { value, .. } => Ok(Value::Number(value.parse().unwrap_or(f64::NAN))),
            Node::Variable { name, .. } => {
                let v = self
                    .bindings
                    .get(name)
                    .ok_or_else(|| CasError::MissingVariable { name: name.clone() })?;
                Ok(Value::Number(*v))
            }
            Node::MathConst { which, .. } => Ok(Value::Number(match which {
                MathConst::E => std::f64::consts::E,
                MathConst::Pi => std::f64::consts::PI,
            })),
            Node::UnaryMinus { child, .. } => {
                Ok(Value::Number(-self.evaluate(child)?.as_number()))
            }
            Node::BinOp { op, left, right, .. } => self.eval_binop(*op, left, right),
            Node::CompareOp { op, left, right, .. } => {
                let l = self.evaluate(left)?.as_number();
                let r = self.evaluate(right)?.as_number();
                Ok(Value::Bool(match op {
                    CompareOpKind::Eq => (l - r).abs() < f64::EPSILON,
                    CompareOpKind::Ne => (l - r).abs() >= f64::EPSILON,
                    CompareOpKind::Gt => l > r,
                    CompareOpKind::Ge => l >= r,
                    CompareOpKind::Lt => l < r,
                    CompareOpKind::Le => l <= r,
                }))
            }
            Node::BoolOp { op, left, right, .. } => {
                let l = self.evaluate(left)?.as_bool();
                match op {
                    BoolOpKind::And => {
                        if !l {
                            return Ok(Value::Bool(false));
                        }
                        Ok(Value::Bool(self.evaluate(right)?.as_bool()))
                    }
                    BoolOpKind::Or => {
                        if l {
                            return Ok(Value::Bool(true));
                        }
                        Ok(Value::Bool(self.evaluate(right)?.as_bool()))
                    }
                }
            }
            Node::Funct { which, child, .. } => self.eval_funct(*which, child),
            Node::ExprMulti { .. }
            | Node::ExprHolder { .. }
            | Node::TermMulti { .. }
            | Node::TermHolder { .. } => Err(CasError::UnknownNodeKind),
        }
    }

    fn eval_binop(&self, op: BinOpKind, left: &Node, right: &Node) -> Result<Value, CasError> {
        let l = self.evaluate(left)?.as_number();
        let r = self.evaluate(right)?.as_number();
        let result = match op {
            BinOpKind::Add => l + r,
            BinOpKind::Sub => l - r,
            BinOpKind::Mul | BinOpKind::ImpMul => l * r,
            BinOpKind::Div => {
                if r.abs() < ZERO_DENOMINATOR_THRESHOLD {
                    return Err(CasError::ZeroDenominator);
                }
                l / r
            }
            BinOpKind::Pow => l.powf(r),
        };
        Ok(Value::Number(result))
    }

    fn eval_funct(&self, which: FunctKind, child: &Node) -> Result<Value, CasError> {
        let x = self.evaluate(child)?.as_number();
        let (sin_x, cos_x, tan_x) = if self.config.radians {
            (x, x, x)
        } else {
            (x.to_radians(), x.to_radians(), x.to_radians())
        };
        let to_output_angle = |radians: f64| -> f64 {
            if self.config.radians {
                radians
            } else {
                radians.to_degrees()
            }
        };
        let result = match which {
            FunctKind::Abs => x.abs(),
            FunctKind::Sqrt => x.sqrt(),
            FunctKind::Exp => x.exp(),
            FunctKind::Ln => x.ln(),
            FunctKind::Log10 => x.log10(),
            FunctKind::Sin => sin_x.sin(),
            FunctKind::Cos => cos_x.cos(),
            FunctKind::Tan => tan_x.tan(),
            FunctKind::Asin => to_output_angle(x.asin()),
            FunctKind::Acos => to_output_angle(x.acos()),
            FunctKind::Atan => to_output_angle(x.atan()),
        };
        Ok(Value::Number(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::{Lexer, LexerConfig};
    use crate::expr::parser::Parser;

    fn eval(source: &str, bindings: &HashMap<String, f64>) -> Value {
        let tokens = Lexer::new(LexerConfig::default()).tokenize(source).unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        Evaluator::new(bindings, EvalConfig::default())
            .evaluate(&parsed.root)
            .unwrap()
    }

    #[test]
    fn unary_minus_applies_after_power() {
        // Unary minus binds looser than `^`, so "-3^2" is -(3^2).
        let bindings = HashMap::new();
        assert_eq!(eval("-3^2", &bindings).as_number(), -9.0);
    }

    #[test]
    fn scenario_a_plus_b_times_c_minus_d() {
        let bindings = HashMap::from([
            ("a".to_string(), 1.0),
            ("b".to_string(), 2.0),
            ("c".to_string(), 3.0),
            ("d".to_string(), 4.0),
        ]);
        assert_eq!(eval("a+b*c-d", &bindings).as_number(), 3.0);
    }

    #[test]
    fn right_associative_power_scenario() {
        let bindings = HashMap::new();
        assert_eq!(eval("2^3^2", &bindings).as_number(), 512.0);
    }

    #[test]
    fn missing_variable_errors() {
        let tokens = Lexer::new(LexerConfig::default()).tokenize("a+1").unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        let bindings = HashMap::new();
        let err = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&parsed.root)
            .unwrap_err();
        assert_eq!(err, CasError::MissingVariable { name: "a".to_string() });
    }

    #[test]
    fn near_zero_denominator_errors() {
        let tokens = Lexer::new(LexerConfig::default()).tokenize("1/x").unwrap();
        let parsed = Parser::new(tokens).parse().unwrap();
        let bindings = HashMap::from([("x".to_string(), 1e-40)]);
        let err = Evaluator::new(&bindings, EvalConfig::default())
            .evaluate(&parsed.root)
            .unwrap_err();
        assert_eq!(err, CasError::ZeroDenominator);
    }

    #[test]
    fn compare_and_bool_ops_short_circuit() {
        let bindings = HashMap::from([("a".to_string(), 1.0), ("b".to_string(), 2.0)]);
        assert!(eval("[a<b]&[b>a]", &bindings).as_bool());
        assert!(!eval("[a>b]&[b>a]", &bindings).as_bool());
    }

    #[test]
    fn math_constants_evaluate() {
        let bindings = HashMap::new();
        assert!((eval("PI", &bindings).as_number() - std::f64::consts::PI).abs() < 1e-12);
        assert!((eval("E", &bindings).as_number() - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn trig_functions_use_radians_by_default() {
        let bindings = HashMap::new();
        assert!((eval("SIN(0)", &bindings).as_number()).abs() < 1e-12);
    }
}
