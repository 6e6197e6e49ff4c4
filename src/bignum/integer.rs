//! Arbitrary-precision signed integers layered on [`NatBig`].
//!
//! An [`IntBig`] pairs a `NatBig` magnitude with a sign. Zero is always
//! unsigned (never "negative zero").

use std::cmp::Ordering;

use super::natural::NatBig;
use crate::error::CasError;

/// The sign of a non-zero [`IntBig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntBig {
    /// `None` means zero (unsigned); `Some(sign)` otherwise.
    sign: Option<Sign>,
    magnitude: NatBig,
}

impl IntBig {
    /// The canonical zero value.
    #[must_use]
    pub fn zero(radix: u64) -> Self {
        Self {
            sign: None,
            magnitude: NatBig::zero(radix),
        }
    }

    /// Builds an `IntBig` from a sign and magnitude, canonicalizing zero.
    #[must_use]
    pub fn from_parts(sign: Sign, magnitude: NatBig) -> Self {
        if magnitude.is_zero() {
            Self {
                sign: None,
                magnitude,
            }
        } else {
            Self {
                sign: Some(sign),
                magnitude,
            }
        }
    }

    #[must_use]
    pub fn radix(&self) -> u64 {
        self.magnitude.radix()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign.is_none()
    }

    #[must_use]
    pub fn sign(&self) -> Option<Sign> {
        self.sign
    }

    #[must_use]
    pub fn magnitude(&self) -> &NatBig {
        &self.magnitude
    }

    /// Parses an optional leading `-` followed by a `NatBig` string.
    ///
    /// # Errors
    ///
    /// Propagates [`CasError::IllegalChar`] from the underlying `NatBig`
    /// parse (with the offset shifted past a leading sign).
    pub fn parse(radix: u64, s: &str) -> Result<Self, CasError> {
        if let Some(rest) = s.strip_prefix('-') {
            let magnitude = NatBig::parse(radix, rest).map_err(|e| match e {
                CasError::IllegalChar { offset } => CasError::IllegalChar { offset: offset + 1 },
                other => other,
            })?;
            Ok(Self::from_parts(Sign::Negative, magnitude))
        } else {
            let magnitude = NatBig::parse(radix, s)?;
            Ok(Self::from_parts(Sign::Positive, magnitude))
        }
    }

    /// Renders as `Z`: optional leading `-`, then the `NatBig` rendering.
    /// Zero always renders as `"0"`, never `"-0"`.
    #[must_use]
    pub fn render(&self) -> String {
        match self.sign {
            None => "0".to_string(),
            Some(Sign::Positive) => self.magnitude.render(),
            Some(Sign::Negative) => format!("-{}", self.magnitude.render()),
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::from_parts(Sign::Positive, self.magnitude.clone())
    }

    /// Flips the sign of a non-zero value; zero is unaffected.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self.sign {
            None => self.clone(),
            Some(Sign::Positive) => Self::from_parts(Sign::Negative, self.magnitude.clone()),
            Some(Sign::Negative) => Self::from_parts(Sign::Positive, self.magnitude.clone()),
        }
    }

    /// Positive > zero > negative; within a sign, by magnitude (reversed for
    /// negatives).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (None, None) => Ordering::Equal,
            (None, Some(Sign::Positive)) => Ordering::Less,
            (None, Some(Sign::Negative)) => Ordering::Greater,
            (Some(Sign::Positive), None) => Ordering::Greater,
            (Some(Sign::Negative), None) => Ordering::Less,
            (Some(Sign::Positive), Some(Sign::Negative)) => Ordering::Greater,
            (Some(Sign::Negative), Some(Sign::Positive)) => Ordering::Less,
            (Some(Sign::Positive), Some(Sign::Positive)) => self.magnitude.compare(&other.magnitude),
            (Some(Sign::Negative), Some(Sign::Negative)) => {
                other.magnitude.compare(&self.magnitude)
            }
        }
    }

    /// Same sign: magnitudes add, sign kept. Opposite sign: subtract the
    /// smaller magnitude from the larger, taking the larger's sign (or zero).
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        match (self.sign, other.sign) {
            (None, _) => other.clone(),
            (_, None) => self.clone(),
            (Some(sa), Some(sb)) if same_sign(sa, sb) => {
                Self::from_parts(sa, self.magnitude.add(&other.magnitude))
            }
            (Some(sa), Some(_)) => match self.magnitude.compare(&other.magnitude) {
                Ordering::Equal => Self::zero(self.radix()),
                Ordering::Greater => {
                    Self::from_parts(sa, self.magnitude.sub(&other.magnitude))
                }
                Ordering::Less => {
                    Self::from_parts(other.sign.unwrap(), other.magnitude.sub(&self.magnitude))
                }
            },
        }
    }

    /// `self - other`, implemented as `self + (-other)`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Sign is positive iff both operands share a sign; zero stays unsigned.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.radix());
        }
        let sa = self.sign.unwrap();
        let sb = other.sign.unwrap();
        let sign = if same_sign(sa, sb) {
            Sign::Positive
        } else {
            Sign::Negative
        };
        Self::from_parts(sign, self.magnitude.mult(&other.magnitude))
    }

    /// Division with a non-mathematical sign rule: the
    /// quotient is positive iff both operands are positive (negative
    /// otherwise, for non-zero results); the remainder always takes the
    /// dividend's sign.
    ///
    /// ```text
    ///  7,  3 -> q= 2, r= 1
    /// -7,  3 -> q=-2, r=-1
    ///  7, -3 -> q=-2, r= 1
    /// -7, -3 -> q= 2, r=-1
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_mod(&self, other: &Self) -> (Self, Self) {
        assert!(!other.is_zero(), "IntBig::div_mod by zero");
        let (q_mag, r_mag) = self.magnitude.div_mod(&other.magnitude);

        let quotient = if q_mag.is_zero() {
            Self::zero(self.radix())
        } else {
            let sa = self.sign.unwrap_or(Sign::Positive);
            let sb = other.sign.unwrap();
            let sign = if same_sign(sa, sb) {
                Sign::Positive
            } else {
                Sign::Negative
            };
            Self::from_parts(sign, q_mag)
        };

        let remainder = if r_mag.is_zero() {
            Self::zero(self.radix())
        } else {
            let sign = self.sign.unwrap_or(Sign::Positive);
            Self::from_parts(sign, r_mag)
        };

        (quotient, remainder)
    }
}

fn same_sign(a: Sign, b: Sign) -> bool {
    matches!(
        (a, b),
        (Sign::Positive, Sign::Positive) | (Sign::Negative, Sign::Negative)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z(radix: u64, s: &str) -> IntBig {
        IntBig::parse(radix, s).unwrap()
    }

    #[test]
    fn parse_and_render_round_trip() {
        for s in ["0", "42", "-42", "1000000"] {
            assert_eq!(z(10, s).render(), s);
        }
    }

    #[test]
    fn zero_never_negative() {
        let neg_zero = IntBig::from_parts(Sign::Negative, NatBig::zero(10));
        assert_eq!(neg_zero.render(), "0");
        assert!(neg_zero.is_zero());
    }

    #[test]
    fn add_same_sign() {
        assert_eq!(z(10, "5").add(&z(10, "7")).render(), "12");
        assert_eq!(z(10, "-5").add(&z(10, "-7")).render(), "-12");
    }

    #[test]
    fn add_opposite_sign() {
        assert_eq!(z(10, "5").add(&z(10, "-7")).render(), "-2");
        assert_eq!(z(10, "-5").add(&z(10, "7")).render(), "2");
        assert_eq!(z(10, "5").add(&z(10, "-5")).render(), "0");
    }

    #[test]
    fn sub_is_add_of_negation() {
        assert_eq!(z(10, "5").sub(&z(10, "3")).render(), "2");
        assert_eq!(z(10, "3").sub(&z(10, "5")).render(), "-2");
    }

    #[test]
    fn mult_sign_rules() {
        assert_eq!(z(10, "3").mult(&z(10, "4")).render(), "12");
        assert_eq!(z(10, "-3").mult(&z(10, "4")).render(), "-12");
        assert_eq!(z(10, "3").mult(&z(10, "-4")).render(), "-12");
        assert_eq!(z(10, "-3").mult(&z(10, "-4")).render(), "12");
        assert_eq!(z(10, "0").mult(&z(10, "-4")).render(), "0");
    }

    #[test]
    fn div_mod_sign_table_exact() {
        let cases: [(i64, i64, i64, i64); 4] =
            [(7, 3, 2, 1), (-7, 3, -2, -1), (7, -3, -2, 1), (-7, -3, 2, -1)];
        for (a, b, eq, er) in cases {
            let (q, r) = z(10, &a.to_string()).div_mod(&z(10, &b.to_string()));
            assert_eq!(q.render(), eq.to_string(), "q for {a}/{b}");
            assert_eq!(r.render(), er.to_string(), "r for {a}/{b}");
        }
    }

    #[test]
    fn compare_orders_by_sign_then_magnitude() {
        assert_eq!(z(10, "5").compare(&z(10, "-5")), Ordering::Greater);
        assert_eq!(z(10, "0").compare(&z(10, "5")), Ordering::Less);
        assert_eq!(z(10, "-5").compare(&z(10, "-3")), Ordering::Less);
        assert_eq!(z(10, "-3").compare(&z(10, "-5")), Ordering::Greater);
    }

    #[test]
    fn abs_clears_sign() {
        assert_eq!(z(10, "-7").abs().render(), "7");
        assert_eq!(z(10, "7").abs().render(), "7");
        assert_eq!(z(10, "0").abs().render(), "0");
    }
}
