//! Arbitrary-precision natural numbers in a decimal-power radix.
//!
//! A [`NatBig`] is a little-endian digit vector over a radix `B = 10^L`
//! fixed at construction. Canonical form has no leading
//! (high-order) zero digits and represents zero as an empty digit vector.
//! Every operation here routes its host-word arithmetic through
//! [`MachineInt`].
//!
//! Digits and products are kept within `i64` range; this bounds the
//! usable radix to roughly `10^9` (so that a single digit-by-digit
//! product, which can reach `(B-1)^2`, never overflows `i64`). This is
//! well past any radix actually exercised in practice (10, 100, 1000, ...).

use std::cmp::Ordering;

use super::machine_int::MachineInt;
use crate::error::CasError;

/// An arbitrary-precision natural number in radix `B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NatBig {
    radix: u64,
    /// Little-endian digits, each in `[0, radix)`. Empty means zero.
    /// Invariant: the last element, if present, is non-zero.
    digits: Vec<u64>,
}

impl NatBig {
    /// The canonical zero value in the given radix.
    #[must_use]
    pub fn zero(radix: u64) -> Self {
        Self {
            radix,
            digits: Vec::new(),
        }
    }

    /// The canonical value `1` in the given radix.
    #[must_use]
    pub fn one(radix: u64) -> Self {
        Self {
            radix,
            digits: vec![1],
        }
    }

    /// Builds a `NatBig` directly from little-endian digits, normalizing
    /// away high-order zeros.
    #[must_use]
    pub fn from_digits(radix: u64, digits: Vec<u64>) -> Self {
        Self {
            radix,
            digits: Self::normalize(digits),
        }
    }

    /// The radix this value was constructed with.
    #[must_use]
    pub fn radix(&self) -> u64 {
        self.radix
    }

    /// `L = log10(radix)`: the decimal digit width of one internal digit.
    #[must_use]
    pub fn radix_width(&self) -> usize {
        Self::width_of(self.radix)
    }

    fn width_of(radix: u64) -> usize {
        let mut l = 0;
        let mut r = radix;
        while r > 1 {
            r /= 10;
            l += 1;
        }
        l
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Number of internal digits (0 for zero).
    #[must_use]
    pub fn digit_count(&self) -> usize {
        self.digits.len()
    }

    /// The little-endian digit slice.
    #[must_use]
    pub fn digits(&self) -> &[u64] {
        &self.digits
    }

    fn normalize(mut digits: Vec<u64>) -> Vec<u64> {
        while digits.last() == Some(&0) {
            digits.pop();
        }
        digits
    }

    /// Parses a decimal string with no sign and no decimal point.
    ///
    /// Strips a leading run of `'0'`s, then groups the remaining decimal
    /// digits into chunks of `L = log10(radix)` from the right.
    ///
    /// # Errors
    ///
    /// Returns [`CasError::IllegalChar`] if a non-digit byte is found, with
    /// `offset` set to its position in `s`.
    pub fn parse(radix: u64, s: &str) -> Result<Self, CasError> {
        for (i, b) in s.bytes().enumerate() {
            if !b.is_ascii_digit() {
                return Err(CasError::IllegalChar { offset: i });
            }
        }
        let trimmed = s.trim_start_matches('0');
        if trimmed.is_empty() {
            return Ok(Self::zero(radix));
        }
        let l = Self::width_of(radix);
        let bytes = trimmed.as_bytes();
        let mut digits = Vec::new();
        let mut end = bytes.len();
        while end > 0 {
            let start = end.saturating_sub(l);
            let chunk = std::str::from_utf8(&bytes[start..end]).expect("ascii digits");
            let value: u64 = chunk.parse().expect("validated digit chunk");
            digits.push(value);
            end = start;
        }
        Ok(Self::from_digits(radix, digits))
    }

    /// Renders in canonical decimal form: high-to-low digit order, each
    /// non-leading digit left-padded with `'0'` to width `L`.
    #[must_use]
    pub fn render(&self) -> String {
        if self.digits.is_empty() {
            return "0".to_string();
        }
        let l = self.radix_width();
        let mut out = String::new();
        for (i, &digit) in self.digits.iter().enumerate().rev() {
            if i == self.digits.len() - 1 {
                out.push_str(&digit.to_string());
            } else {
                out.push_str(&format!("{digit:0>l$}"));
            }
        }
        out
    }

    /// A debug representation printing digit count and delimited digits,
    /// high to low: `#{count}||{d_k}|...|{d_0}`.
    #[must_use]
    pub fn debug_render(&self) -> String {
        let joined: Vec<String> = self.digits.iter().rev().map(ToString::to_string).collect();
        format!("#{}||{}", self.digits.len(), joined.join("|"))
    }

    /// Compares two naturals in the same radix: first by digit count, then
    /// most-significant digit first.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.radix, other.radix);
        match self.digits.len().cmp(&other.digits.len()) {
            Ordering::Equal => {
                for i in (0..self.digits.len()).rev() {
                    match self.digits[i].cmp(&other.digits[i]) {
                        Ordering::Equal => continue,
                        ord => return ord,
                    }
                }
                Ordering::Equal
            }
            ord => ord,
        }
    }

    /// `self + other`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.radix, other.radix);
        let radix = self.radix as i64;
        let n = self.digits.len().max(other.digits.len());
        let mut out = Vec::with_capacity(n + 1);
        let mut carry = 0i64;
        for i in 0..n {
            let a = *self.digits.get(i).unwrap_or(&0) as i64;
            let b = *other.digits.get(i).unwrap_or(&0) as i64;
            let sum = a + b + carry;
            out.push(MachineInt::modulo(sum, radix) as u64);
            carry = MachineInt::div(sum, radix);
        }
        if carry != 0 {
            out.push(carry as u64);
        }
        Self::from_digits(self.radix, out)
    }

    /// `self - other`. Precondition: `self >= other`.
    ///
    /// # Panics
    ///
    /// Panics (debug-only) if `self < other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.radix, other.radix);
        debug_assert_ne!(self.compare(other), Ordering::Less, "NatBig::sub underflow");
        let radix = self.radix as i64;
        let mut out = Vec::with_capacity(self.digits.len());
        let mut borrow = 0i64;
        for i in 0..self.digits.len() {
            let a = self.digits[i] as i64;
            let b = *other.digits.get(i).unwrap_or(&0) as i64;
            let mut diff = a - b - borrow;
            if diff < 0 {
                diff += radix;
                borrow = 1;
            } else {
                borrow = 0;
            }
            out.push(diff as u64);
        }
        Self::from_digits(self.radix, out)
    }

    /// Schoolbook `O(mn)` multiplication.
    #[must_use]
    pub fn mult(&self, other: &Self) -> Self {
        debug_assert_eq!(self.radix, other.radix);
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.radix);
        }
        let radix = self.radix as i64;
        let m = self.digits.len();
        let n = other.digits.len();
        let mut acc = vec![0i64; m + n];
        for j in 0..n {
            let vj = other.digits[j] as i64;
            if vj == 0 {
                continue;
            }
            let mut carry = 0i64;
            for i in 0..m {
                let ui = self.digits[i] as i64;
                let sum = acc[i + j] + ui * vj + carry;
                acc[i + j] = MachineInt::modulo(sum, radix);
                carry = MachineInt::div(sum, radix);
            }
            let mut k = m + j;
            while carry != 0 {
                let sum = acc[k] + carry;
                acc[k] = MachineInt::modulo(sum, radix);
                carry = MachineInt::div(sum, radix);
                k += 1;
            }
        }
        let digits = acc.into_iter().map(|d| d as u64).collect();
        Self::from_digits(self.radix, digits)
    }

    /// Multiplies by a host scalar `m` (used internally by division
    /// normalization; `m` need not be a single canonical digit).
    #[must_use]
    fn mul_small(&self, m: u64) -> Self {
        if self.is_zero() || m == 0 {
            return Self::zero(self.radix);
        }
        let radix = self.radix as i64;
        let m = m as i64;
        let mut out = Vec::with_capacity(self.digits.len() + 2);
        let mut carry = 0i64;
        for &d in &self.digits {
            let sum = d as i64 * m + carry;
            out.push(MachineInt::modulo(sum, radix) as u64);
            carry = MachineInt::div(sum, radix);
        }
        while carry != 0 {
            out.push(MachineInt::modulo(carry, radix) as u64);
            carry = MachineInt::div(carry, radix);
        }
        Self::from_digits(self.radix, out)
    }

    /// Single-digit division: divides by `d` in `[1, radix)` in one
    /// most-significant-to-least sweep.
    ///
    /// # Panics
    ///
    /// Panics if `d == 0`.
    #[must_use]
    pub fn short_div_mod(&self, d: u64) -> (Self, u64) {
        assert!(d != 0, "NatBig::short_div_mod by zero");
        if self.is_zero() {
            return (Self::zero(self.radix), 0);
        }
        let radix = self.radix as i64;
        let d = d as i64;
        let mut quotient = vec![0i64; self.digits.len()];
        let mut r = 0i64;
        for i in (0..self.digits.len()).rev() {
            let partial = self.digits[i] as i64 + radix * r;
            quotient[i] = MachineInt::div(partial, d);
            r = MachineInt::modulo(partial, d);
        }
        let digits = quotient.into_iter().map(|q| q as u64).collect();
        (Self::from_digits(self.radix, digits), r as u64)
    }

    /// Multiplies by `B^k` by prepending `k` zero digits.
    #[must_use]
    pub fn radix_shift(&self, k: usize) -> Self {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut digits = vec![0u64; k];
        digits.extend_from_slice(&self.digits);
        Self::from_digits(self.radix, digits)
    }

    /// Full long division (Knuth Algorithm D), returning `(quotient, remainder)`.
    ///
    /// If `self` has fewer digits than `other`, the quotient is zero and the
    /// remainder is `self`.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_mod(&self, other: &Self) -> (Self, Self) {
        debug_assert_eq!(self.radix, other.radix);
        assert!(!other.is_zero(), "NatBig::div_mod by zero");

        if self.compare(other) == Ordering::Less {
            return (Self::zero(self.radix), self.clone());
        }
        if other.digit_count() == 1 {
            let (q, r) = self.short_div_mod(other.digits[0]);
            return (q, Self::from_digits(self.radix, vec![r]));
        }

        let radix = self.radix;
        let v_top = *other.digits.last().expect("non-zero divisor has digits");
        let d = MachineInt::div(radix as i64, v_top as i64 + 1) as u64;

        let un = self.mul_small(d);
        let vn = other.mul_small(d);
        let n = vn.digit_count();
        let vn_top = *vn.digits.last().expect("normalized divisor has digits");

        // Normalized dividend digits, high to low, most-significant first,
        // zero-extended on the left so the leading partial dividend is
        // well-defined.
        let mut u_digits = un.digits.clone();
        u_digits.resize(self.digit_count() + 1, 0);

        let m = u_digits.len().saturating_sub(n);
        let mut quotient_digits = vec![0u64; m];

        // `partial` holds the running (n+1)-digit dividend, most-significant
        // digit at the end (little-endian), seeded with the top n digits.
        let mut partial: Vec<u64> = u_digits[u_digits.len() - n..].to_vec();

        for step in 0..m {
            let incoming_index = u_digits.len() - n - 1 - step;
            partial.insert(0, u_digits[incoming_index]);
            // `partial` now has n+1 digits.
            let partial_big = Self::from_digits(radix, partial.clone());

            let top = *partial.last().unwrap_or(&0);
            let second = if partial.len() >= 2 {
                partial[partial.len() - 2]
            } else {
                0
            };
            let two_digit = top * radix + second;
            let mut qhat = (two_digit / vn_top).min(radix - 1);

            let vn_big = vn.clone();
            while qhat > 0 && vn_big.mul_small(qhat).compare(&partial_big) == Ordering::Greater {
                qhat -= 1;
            }

            let product = vn_big.mul_small(qhat);
            let remainder = partial_big.sub(&product);

            quotient_digits[m - 1 - step] = qhat;

            // The leftover (up to n digits) becomes the low part of the
            // next partial dividend.
            let mut next = remainder.digits.clone();
            next.resize(n, 0);
            partial = next;
        }

        let quotient = Self::from_digits(radix, quotient_digits);
        let remainder_normalized = Self::from_digits(radix, partial);
        let (remainder, _) = remainder_normalized.short_div_mod(d);
        (quotient, remainder)
    }

    /// Euclidean GCD. `gcd(u, 0) = u` for any `u` (including zero).
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        debug_assert_eq!(self.radix, other.radix);
        let mut u = self.clone();
        let mut v = other.clone();
        while !v.is_zero() {
            let (_, r) = u.div_mod(&v);
            u = v;
            v = r;
        }
        u
    }
}
