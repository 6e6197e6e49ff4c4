//! Black-box tests for the bignum layer: round-trips, algebraic
//! identities, and a handful of concrete worked scenarios.

use nanocas::bignum::{IntBig, NatBig, RatBig};

fn nat(radix: u64, s: &str) -> NatBig {
    NatBig::parse(radix, s).unwrap()
}

fn int(radix: u64, s: &str) -> IntBig {
    IntBig::parse(radix, s).unwrap()
}

fn rat(radix: u64, s: &str) -> RatBig {
    RatBig::parse(radix, s).unwrap()
}

#[test]
fn natural_round_trip_for_unpadded_decimals() {
    for s in ["0", "1", "9", "42", "1000", "999999999999999"] {
        assert_eq!(nat(10, s).render(), s);
        assert_eq!(nat(1000, s).render(), s);
    }
}

#[test]
fn natural_add_is_commutative() {
    let a = nat(10, "918273645918273645");
    let b = nat(10, "102938475");
    assert_eq!(a.add(&b), b.add(&a));
}

#[test]
fn natural_mult_is_commutative() {
    let a = nat(10, "31415926535");
    let b = nat(10, "271828");
    assert_eq!(a.mult(&b), b.mult(&a));
}

#[test]
fn natural_div_mod_satisfies_division_identity() {
    let cases = [
        ("123456789012345", "9876"),
        ("1", "999999"),
        ("999999999999", "3"),
    ];
    for (u, v) in cases {
        let ub = nat(10, u);
        let vb = nat(10, v);
        let (q, r) = ub.div_mod(&vb);
        assert_eq!(q.mult(&vb).add(&r), ub, "u = q*v + r for {u}/{v}");
        assert!(r.compare(&vb).is_lt(), "remainder < divisor for {u}/{v}");
    }
}

#[test]
fn natural_gcd_divides_both_operands_and_matches_zero_identity() {
    let a = nat(10, "270");
    let b = nat(10, "192");
    assert_eq!(a.gcd(&NatBig::zero(10)), a);
    let g = a.gcd(&b);
    assert!(a.div_mod(&g).1.is_zero());
    assert!(b.div_mod(&g).1.is_zero());
}

#[test]
fn natural_short_div_mod_by_one_is_identity() {
    let a = nat(10, "8675309");
    let (q, r) = a.short_div_mod(1);
    assert_eq!(q, a);
    assert_eq!(r, 0);
}

#[test]
fn scenario_str_to_nn_groups_digits_in_radix_1000() {
    // Parsing "012340" in radix 1000 groups into digits [340, 12], count
    // 2, rendering back to "12340".
    let v = nat(1000, "012340");
    assert_eq!(v.digit_count(), 2);
    assert_eq!(v.digits(), &[340, 12]);
    assert_eq!(v.render(), "12340");
}

#[test]
fn scenario_nn_div_mod_radix_10() {
    let (q, r) = nat(10, "1000000").div_mod(&nat(10, "7"));
    assert_eq!(q.render(), "142857");
    assert_eq!(r.render(), "1");
}

#[test]
fn integer_sign_table_matches_spec_exactly() {
    let cases: [(i64, i64, i64, i64); 4] =
        [(7, 3, 2, 1), (-7, 3, -2, -1), (7, -3, -2, 1), (-7, -3, 2, -1)];
    for (a, b, eq, er) in cases {
        let (q, r) = int(10, &a.to_string()).div_mod(&int(10, &b.to_string()));
        assert_eq!(q.render(), eq.to_string());
        assert_eq!(r.render(), er.to_string());
    }
}

#[test]
fn integer_sub_is_add_of_negation() {
    let u = int(10, "31415");
    let v = int(10, "9265");
    assert_eq!(u.sub(&v), u.add(&v.negate()));
}

#[test]
fn rational_results_are_always_reduced_with_positive_denominator() {
    let cases = [
        rat(10, "1/2").add(&rat(10, "1/6")),
        rat(10, "2/3").mult(&rat(10, "3/4")),
        rat(10, "5/7").sub(&rat(10, "2/7")),
        rat(10, "-3/4").div(&rat(10, "9/8")).unwrap(),
    ];
    for r in cases {
        let g = r.numerator().magnitude().gcd(r.denominator().magnitude());
        assert_eq!(g.digit_count(), 1, "gcd should be 1 for {}", r.render());
        assert_eq!(g.digits().first().copied(), Some(1));
        assert_eq!(r.denominator().sign(), Some(nanocas::bignum::Sign::Positive));
    }
}

#[test]
fn rational_power_zero_is_one_for_any_nonzero_base() {
    for s in ["1/2", "-7/3", "5", "-11"] {
        assert_eq!(rat(10, s).power(0).unwrap().render(), "1");
    }
}

#[test]
fn rational_power_of_one_half() {
    assert_eq!(rat(10, "1/2").power(5).unwrap().render(), "1/32");
}

#[test]
fn rational_mult_by_reciprocal_is_one() {
    for s in ["3/4", "-5/9", "7"] {
        let r = rat(10, s);
        assert_eq!(r.mult(&r.reciprocal().unwrap()).render(), "1");
    }
}

#[test]
fn scenario_power_of_negative_fraction() {
    // (-2/3)^(-3) -> -27/8.
    assert_eq!(rat(10, "-2/3").power(-3).unwrap().render(), "-27/8");
}

#[test]
fn debug_render_matches_spec_example() {
    let n = NatBig::from_digits(1000, vec![17, 432, 5]);
    assert_eq!(n.debug_render(), "#3||5|432|17");
}
