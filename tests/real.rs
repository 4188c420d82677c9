use num_bigint::BigUint;

use float_ctx::{RealFloat, RoundingMode};

fn real(s: bool, exp: i64, c: u64) -> RealFloat {
    RealFloat::new(s, exp, BigUint::from(c))
}

#[test]
fn accessors() {
    let x = real(false, -3, 10); // 1.25
    assert_eq!(x.p(), 4);
    assert_eq!(x.e(), Some(0));
    assert_eq!(x.n(), -4);
    assert!(!x.is_zero() && x.is_positive() && !x.is_negative());
    assert!(!x.is_integer());
    assert!(x.bit(-2), "1.25 has its quarter bit set");
    assert!(!x.bit(-1));
    assert!(x.is_more_significant(-4));
    assert!(!x.is_more_significant(-3));

    assert!(real(false, -2, 12).is_integer(), "12 * 2^-2 = 3");
    assert!(real(true, 0, 0).is_zero());
    assert!(real(false, 3, 1).is_power_of_two());
    assert!(!real(false, 0, 6).is_power_of_two());
}

#[test]
fn split_recombines() {
    let x = real(false, -3, 10); // 1.25 = 1.01b
    let (hi, lo) = x.split(-2);
    assert_eq!(hi, real(false, -1, 2), "hi keeps the bits above 2^-2");
    assert_eq!(lo, real(false, -2, 1), "lo keeps the bits at and below");
    assert_eq!(&hi + &lo, x);

    // everything above
    let (hi, lo) = x.split(-10);
    assert_eq!(hi, x);
    assert!(lo.is_zero());

    // everything below
    let (hi, lo) = x.split(10);
    assert!(hi.is_zero());
    assert_eq!(lo, x);
}

#[test]
fn normalize_forms() {
    let six = real(false, 1, 3);
    let wide = six.normalize(Some(4), None).unwrap();
    assert_eq!(wide, six);
    assert_eq!(wide.p(), 4);
    assert_eq!(wide.exp(), -1);

    // 6 does not fit in one bit
    assert!(six.normalize(Some(1), None).is_err());

    // anchoring above the grid is fine, crossing nonzero bits is not
    assert!(six.normalize(None, Some(-3)).is_ok());
    assert!(six.normalize(None, Some(0)).is_ok());
    assert!(six.normalize(None, Some(1)).is_err());

    let z = RealFloat::signed_zero(true);
    let z4 = z.normalize(Some(4), Some(-7)).unwrap();
    assert!(z4.is_zero() && z4.sign());
}

#[test]
fn round_nearest_even_tie() {
    // 1.25 at two bits of precision: tie between 1.0 and 1.5,
    // nearest-even keeps the even significand
    let x = real(false, -3, 10);
    assert_eq!(
        x.round(Some(2), None, RoundingMode::NearestEven),
        RealFloat::one()
    );
    assert_eq!(
        x.round(Some(2), None, RoundingMode::NearestAway),
        real(false, -1, 3)
    );

    // 1.75 ties toward 2.0
    let x = real(false, -3, 14);
    assert_eq!(
        x.round(Some(2), None, RoundingMode::NearestEven),
        RealFloat::from(2i64)
    );
}

#[test]
fn round_directed() {
    // -1.375 rounds down to -1.5 toward negative
    let x = real(true, -3, 11);
    assert_eq!(
        x.round(Some(2), None, RoundingMode::ToNegative),
        real(true, -1, 3)
    );
    assert_eq!(
        x.round(Some(2), None, RoundingMode::ToPositive),
        real(true, -1, 2)
    );
    assert_eq!(
        x.round(Some(2), None, RoundingMode::ToZero),
        real(true, -1, 2)
    );
    assert_eq!(
        x.round(Some(2), None, RoundingMode::AwayZero),
        real(true, -1, 3)
    );
}

#[test]
fn round_parity_modes() {
    // 1.25 truncates to the even 1.0; to-odd bumps it, to-even keeps it
    let x = real(false, -3, 10);
    assert_eq!(x.round(Some(2), None, RoundingMode::ToOdd), real(false, -1, 3));
    assert_eq!(x.round(Some(2), None, RoundingMode::ToEven), RealFloat::one());

    // exact values never move
    let x = real(false, -1, 3);
    assert_eq!(x.round(Some(2), None, RoundingMode::ToOdd), x);
    assert_eq!(x.round(Some(2), None, RoundingMode::ToEven), x);
}

#[test]
fn round_at_position() {
    let x = real(false, -2, 15); // 3.75
    assert_eq!(x.round_at(-1, RoundingMode::ToZero), RealFloat::from(3i64));
    assert_eq!(x.round_at(-1, RoundingMode::ToPositive), RealFloat::from(4i64));
    assert_eq!(x.round_at(-1, RoundingMode::NearestEven), RealFloat::from(4i64));
}

#[test]
fn round_reports_exactness() {
    let x = real(false, -3, 10);
    let (_, inexact) = x.round_exact(Some(2), None, RoundingMode::NearestEven);
    assert!(inexact);
    let (_, inexact) = x.round_exact(Some(4), None, RoundingMode::NearestEven);
    assert!(!inexact);
}

#[test]
fn round_underflows_to_zero() {
    // far below the anchor everything collapses toward zero
    let tiny = real(false, -20, 1);
    let r = tiny.round(None, Some(-2), RoundingMode::NearestEven);
    assert!(r.is_zero());
    let r = tiny.round(None, Some(-2), RoundingMode::ToPositive);
    assert_eq!(r, real(false, -1, 1), "directed up lands on one ulp");
}

#[test]
fn stochastic_halfway_split() {
    // 1.25 is exactly halfway between the two-bit neighbors 1.0 and
    // 1.5; with two random bits the draw splits 50/50
    let x = real(false, -3, 10);
    for bits in 0..4u64 {
        let (r, inexact) = x.round_stochastic(Some(2), None, 2, bits);
        assert!(inexact);
        if bits < 2 {
            assert_eq!(r, real(false, -1, 3), "low draws round up (bits = {})", bits);
        } else {
            assert_eq!(r, RealFloat::one(), "high draws round down (bits = {})", bits);
        }
    }
}

#[test]
fn stochastic_exact_is_untouched() {
    let x = real(false, -1, 3);
    for bits in 0..8u64 {
        let (r, inexact) = x.round_stochastic(Some(2), None, 3, bits);
        assert_eq!(r, x);
        assert!(!inexact);
    }
}

#[test]
fn exact_arithmetic() {
    let eighth = real(false, -3, 1);
    let quarter = real(false, -2, 1);
    assert_eq!(&eighth + &quarter, real(false, -3, 3));
    assert_eq!(&quarter - &eighth, eighth);
    assert_eq!(&quarter * &quarter, real(false, -4, 1));
    assert_eq!(real(true, 0, 3).pow(2), RealFloat::from(9i64));
    assert_eq!(real(true, 0, 3).pow(3), RealFloat::from(-27i64));
    assert_eq!(real(true, 0, 3).pow(0), RealFloat::one());
    assert_eq!(real(false, -1, 5).scale(3), real(false, 2, 5));

    // cancellation is exact
    let x = real(false, -7, 123);
    assert!((&x - &x).is_zero());
}

#[test]
fn comparison_is_value_based() {
    // different representations of the same rational
    assert_eq!(real(false, -1, 2), RealFloat::one());
    assert_eq!(real(false, 2, 3), RealFloat::from(12i64));
    assert!(real(true, 0, 1) < real(false, 0, 0));
    assert!(real(false, -3, 10) < real(false, -3, 11));
    assert!(real(true, -3, 11) < real(true, -3, 10));

    // signed zeros are equal as rationals
    assert_eq!(RealFloat::signed_zero(true), RealFloat::zero());

    // mixed comparisons
    assert!(real(false, -3, 10) == 1.25f64);
    assert!(real(false, -3, 10) > 1i64);
    assert!(real(false, -3, 10) < 2i64);
    assert!(RealFloat::try_from(0.1f64).unwrap() == 0.1f64);
}

#[test]
fn f64_round_trips() {
    for f in [0.0, -0.0, 1.0, -1.0, 0.1, 1e300, -1e-300, f64::MIN_POSITIVE, 5e-324, f64::MAX] {
        let r = RealFloat::try_from(f).unwrap();
        assert_eq!(r.to_f64().to_bits(), f.to_bits(), "round trip failed: {:e}", f);
    }
    assert!(RealFloat::try_from(f64::NAN).is_err());
    assert!(RealFloat::try_from(f64::INFINITY).is_err());
}

#[test]
fn rational_interop() {
    let x = real(true, -3, 11);
    let q = x.to_rational();
    assert_eq!(q, rug::Rational::from((-11, 8)));
    assert_eq!(RealFloat::try_from(&q).unwrap(), x);

    let third = rug::Rational::from((1, 3));
    assert!(RealFloat::try_from(&third).is_err());
}
