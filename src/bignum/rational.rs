//! Arbitrary-precision rationals layered on [`IntBig`].
//!
//! A [`RatBig`] is always kept in lowest terms with a positive denominator.
//! Zero is represented as `0/1`.

use std::cmp::Ordering;

use super::integer::{IntBig, Sign};
use crate::error::CasError;

/// An arbitrary-precision rational number, always reduced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatBig {
    numerator: IntBig,
    denominator: IntBig,
}

impl RatBig {
    /// The canonical zero value, `0/1`.
    #[must_use]
    pub fn zero(radix: u64) -> Self {
        Self {
            numerator: IntBig::zero(radix),
            denominator: IntBig::parse(radix, "1").expect("literal 1 parses"),
        }
    }

    /// Builds a `RatBig` from a numerator and a non-zero denominator,
    /// reducing by their GCD and normalizing the denominator's sign to
    /// positive.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::RationalDenominatorZero`] if `denominator` is zero.
    pub fn from_parts(numerator: IntBig, denominator: IntBig) -> Result<Self, CasError> {
        if denominator.is_zero() {
            return Err(CasError::RationalDenominatorZero);
        }
        if numerator.is_zero() {
            return Ok(Self::zero(numerator.radix()));
        }
        let g = numerator.magnitude().gcd(denominator.magnitude());
        let (n_mag, _) = numerator.magnitude().div_mod(&g);
        let (d_mag, _) = denominator.magnitude().div_mod(&g);

        let negative_overall = numerator.sign() != denominator.sign();
        let n_sign = if negative_overall {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Ok(Self {
            numerator: IntBig::from_parts(n_sign, n_mag),
            denominator: IntBig::from_parts(Sign::Positive, d_mag),
        })
    }

    #[must_use]
    pub fn radix(&self) -> u64 {
        self.numerator.radix()
    }

    #[must_use]
    pub fn numerator(&self) -> &IntBig {
        &self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> &IntBig {
        &self.denominator
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Parses `Q` literals: `N`, `-N`, `N/M`, or `-N/M`, reducing to lowest
    /// terms and requiring a positive denominator on input before reduction
    /// (a negative divisor is folded into the numerator's sign).
    ///
    /// # Errors
    ///
    /// Returns [`CasError::MalformedRationalLiteral`] if the literal has more
    /// than one `/`, and propagates [`CasError::IllegalChar`] or
    /// [`CasError::RationalDenominatorZero`] from the underlying parses.
    pub fn parse(radix: u64, s: &str) -> Result<Self, CasError> {
        let mut parts = s.split('/');
        let num_str = parts.next().unwrap_or("");
        let den_str = parts.next();
        if parts.next().is_some() {
            return Err(CasError::MalformedRationalLiteral {
                literal: s.to_string(),
            });
        }
        let numerator = IntBig::parse(radix, num_str)?;
        let denominator = match den_str {
            Some(d) => IntBig::parse(radix, d)?,
            None => IntBig::parse(radix, "1")?,
        };
        Self::from_parts(numerator, denominator)
    }

    /// Renders as `N` when the denominator is 1, else `N/M`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.denominator.magnitude().digit_count() == 1
            && self.denominator.magnitude().digits().first() == Some(&1)
        {
            self.numerator.render()
        } else {
            format!("{}/{}", self.numerator.render(), self.denominator.render())
        }
    }

    /// `a/b` compared to `c/d` via `a*d` compared to `c*b` (denominators are
    /// always positive, so the cross-multiplication preserves order).
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        let lhs = self.numerator.mult(&other.denominator);
        let rhs = other.numerator.mult(&self.denominator);
        lhs.compare(&rhs)
    }

    /// `a/b + c/d = (a*d + c*b) / (b*d)`, reduced.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let numerator = self
            .numerator
            .mult(&other.denominator)
            .add(&other.numerator.mult(&self.denominator));
        let denominator = self.denominator.mult(&other.denominator);
        Self::from_parts(numerator, denominator).expect("product of non-zero denominators is non-zero")
    }

    /// `self - other`, via negation and addition.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Negates the numerator; `0` stays `0`.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            numerator: self.numerator.negate(),
            denominator: self.denominator.clone(),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// `a/b * c/d`, pre-cancelling `gcd(a,d)` and `gcd(c,b)` before
    /// multiplying so intermediate magnitudes stay small.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        let g1 = self.numerator.magnitude().gcd(other.denominator.magnitude());
        let g2 = other.numerator.magnitude().gcd(self.denominator.magnitude());

        let (a_reduced, _) = self.numerator.magnitude().div_mod(&g1);
        let (d_reduced, _) = other.denominator.magnitude().div_mod(&g1);
        let (c_reduced, _) = other.numerator.magnitude().div_mod(&g2);
        let (b_reduced, _) = self.denominator.magnitude().div_mod(&g2);

        let numerator_mag = a_reduced.mult(&c_reduced);
        let denominator_mag = b_reduced.mult(&d_reduced);

        let negative_overall = self.numerator.sign() != other.numerator.sign()
            && !(self.numerator.is_zero() || other.numerator.is_zero());
        let n_sign = if negative_overall {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let numerator = IntBig::from_parts(n_sign, numerator_mag);
        let denominator = IntBig::from_parts(Sign::Positive, denominator_mag);
        Self::from_parts(numerator, denominator).expect("non-zero operand denominators stay non-zero")
    }

    /// The reciprocal `1/self`.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::ReciprocalOfZero`] if `self` is zero.
    pub fn reciprocal(&self) -> Result<Self, CasError> {
        if self.is_zero() {
            return Err(CasError::ReciprocalOfZero);
        }
        Self::from_parts(self.denominator.clone(), self.numerator.clone())
            .map_err(|_| CasError::ReciprocalOfZero)
    }

    /// `self / other`, via multiplication by the reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::ReciprocalOfZero`] if `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self, CasError> {
        Ok(self.mult(&other.reciprocal()?))
    }

    /// Raises `self` to an integer power `n` by square-and-multiply on
    /// `|n|`, then reciprocating for negative `n`.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::NegativePowerOfZero`] if `self` is zero and `n`
    /// is negative.
    pub fn power(&self, n: i64) -> Result<Self, CasError> {
        if n == 0 {
            return Ok(Self::from_parts(
                IntBig::parse(self.radix(), "1").expect("literal 1 parses"),
                IntBig::parse(self.radix(), "1").expect("literal 1 parses"),
            )
            .expect("1/1 is non-zero denominator"));
        }
        if self.is_zero() && n < 0 {
            return Err(CasError::NegativePowerOfZero);
        }
        let mut result = Self::from_parts(
            IntBig::parse(self.radix(), "1").expect("literal 1 parses"),
            IntBig::parse(self.radix(), "1").expect("literal 1 parses"),
        )
        .expect("1/1 is non-zero denominator");
        let mut base = self.clone();
        let mut exponent = n.unsigned_abs();
        while exponent > 0 {
            if exponent & 1 == 1 {
                result = result.mult(&base);
            }
            base = base.mult(&base);
            exponent >>= 1;
        }
        if n < 0 {
            result.reciprocal()
        } else {
            Ok(result)
        }
    }

    #[must_use]
    pub fn debug_render(&self) -> String {
        format!(
            "{}/{}",
            self.numerator.magnitude().debug_render(),
            self.denominator.magnitude().debug_render()
        )
    }
}
