use float_ctx::{
    ops, Error, Float, MPFloatContext, OrdinalContext, OverflowMode, RoundingMode, FP32, FP64,
    INTEGER, REAL, SINT32,
};

fn f(x: f64) -> Float {
    Float::from(x)
}

#[test]
fn multiplication_specials() {
    // 0 × ∞ is invalid
    let v = ops::mul(&f(0.0), &f(f64::INFINITY), &FP64).unwrap();
    assert!(v.is_nan());

    let v = ops::mul(&f(-3.0), &f(f64::INFINITY), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign());

    // the sign of a zero product follows the xor rule
    let v = ops::mul(&f(-0.0), &f(5.0), &FP64).unwrap();
    assert!(v.is_zero() && v.sign());
}

#[test]
fn addition_overflow() {
    let max = FP32.maxval().unwrap();
    let v = ops::add(&max, &max, &FP32).unwrap();
    assert!(v.is_infinity() && !v.sign(), "binary32 overflow goes to +inf");

    // a saturating variant clamps instead
    let sat = FP32
        .with_rm(RoundingMode::ToZero)
        .with_overflow(OverflowMode::Saturate);
    let v = ops::add(&max, &max, &sat).unwrap();
    assert_eq!(v, max);

    // ∞ − ∞ is invalid
    let inf = f(f64::INFINITY);
    assert!(ops::sub(&inf, &inf, &FP64).unwrap().is_nan());
}

#[test]
fn zero_sign_of_exact_cancellation() {
    let x = f(1.5);
    for rm in [
        RoundingMode::NearestEven,
        RoundingMode::NearestAway,
        RoundingMode::ToPositive,
        RoundingMode::ToZero,
        RoundingMode::AwayZero,
    ] {
        let v = ops::sub(&x, &x, &FP64.with_rm(rm)).unwrap();
        assert!(v.is_zero() && !v.sign(), "x - x is +0 under {:?}", rm);
    }
    let v = ops::sub(&x, &x, &FP64.with_rm(RoundingMode::ToNegative)).unwrap();
    assert!(v.is_zero() && v.sign(), "x - x is -0 toward negative");
}

#[test]
fn division() {
    let v = ops::div(&f(1.0), &f(3.0), &FP64).unwrap();
    assert_eq!(v.to_f64(), 1.0 / 3.0);
    assert!(v.inexact());

    // exact quotients are exact
    let v = ops::div(&f(6.0), &f(3.0), &FP64).unwrap();
    assert_eq!(v, 2i64);
    assert!(!v.inexact());

    // division by zero is ±∞ where the context has it
    let v = ops::div(&f(1.0), &f(0.0), &FP64).unwrap();
    assert!(v.is_infinity() && !v.sign());
    let v = ops::div(&f(1.0), &f(-0.0), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign());

    // and NaN where it does not
    let v = ops::div(&f(1.0), &f(0.0), &SINT32).unwrap();
    assert!(v.is_nan());

    // 0/0 and ∞/∞ are invalid
    assert!(ops::div(&f(0.0), &f(0.0), &FP64).unwrap().is_nan());
    let inf = f(f64::INFINITY);
    assert!(ops::div(&inf, &inf, &FP64).unwrap().is_nan());
}

#[test]
fn fused_multiply_add() {
    let v = ops::fma(&f(2.0), &f(3.0), &f(1.0), &FP64).unwrap();
    assert_eq!(v, 7i64);

    // a single rounding, unlike mul-then-add
    let v = ops::fma(&f(0.1), &f(0.2), &f(0.3), &FP64).unwrap();
    assert_eq!(v.to_f64(), 0.1f64.mul_add(0.2, 0.3));

    // ∞ in the addend dominates a finite product
    let v = ops::fma(&f(2.0), &f(3.0), &f(f64::NEG_INFINITY), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign());

    // 0 × ∞ poisons the whole thing
    let v = ops::fma(&f(0.0), &f(f64::INFINITY), &f(1.0), &FP64).unwrap();
    assert!(v.is_nan());
}

#[test]
fn square_roots() {
    let v = ops::sqrt(&f(4.0), &FP64).unwrap();
    assert_eq!(v, 2i64);
    assert_eq!(
        ops::sqrt(&f(2.0), &FP64).unwrap().to_f64(),
        2.0f64.sqrt()
    );
    assert!(ops::sqrt(&f(-1.0), &FP64).unwrap().is_nan());
    // sqrt(−0) is −0
    let v = ops::sqrt(&f(-0.0), &FP64).unwrap();
    assert!(v.is_zero() && v.sign());

    let v = ops::cbrt(&f(-27.0), &FP64).unwrap();
    assert_eq!(v, -3i64);
}

#[test]
fn pow_table() {
    // pow(x, ±0) is 1 for every x, NaN included
    assert_eq!(ops::pow(&f(0.0), &f(0.0), &FP64).unwrap(), 1i64);
    assert_eq!(ops::pow(&f(f64::NAN), &f(0.0), &FP64).unwrap(), 1i64);
    // pow(1, y) is 1 for every y
    assert_eq!(ops::pow(&f(1.0), &f(f64::NAN), &FP64).unwrap(), 1i64);
    assert_eq!(
        ops::pow(&f(-1.0), &f(f64::INFINITY), &FP64).unwrap(),
        1i64
    );

    assert_eq!(ops::pow(&f(2.0), &f(10.0), &FP64).unwrap(), 1024i64);
    assert_eq!(ops::pow(&f(-2.0), &f(3.0), &FP64).unwrap(), -8i64);
    // negative base with a non-integer exponent is invalid
    assert!(ops::pow(&f(-2.0), &f(0.5), &FP64).unwrap().is_nan());
}

#[test]
fn exponentials_and_logs() {
    assert_eq!(ops::exp(&f(0.0), &FP64).unwrap(), 1i64);
    assert!(ops::exp(&f(f64::NEG_INFINITY), &FP64).unwrap().is_zero());
    assert_eq!(ops::exp2(&f(10.0), &FP64).unwrap(), 1024i64);

    let v = ops::log(&f(0.0), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign(), "log(0) = -inf");
    assert!(ops::log(&f(-1.0), &FP64).unwrap().is_nan());
    let v = ops::log(&f(1.0), &FP64).unwrap();
    assert!(v.is_zero());
    assert_eq!(ops::log2(&f(8.0), &FP64).unwrap(), 3i64);

    // expm1/log1p keep their precision near zero
    let v = ops::expm1(&f(-0.0), &FP64).unwrap();
    assert!(v.is_zero() && v.sign());
    let v = ops::log1p(&f(-1.0), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign());
}

#[test]
fn trigonometry() {
    let v = ops::sin(&f(-0.0), &FP64).unwrap();
    assert!(v.is_zero() && v.sign());
    assert!(ops::sin(&f(f64::INFINITY), &FP64).unwrap().is_nan());
    assert_eq!(ops::cos(&f(0.0), &FP64).unwrap(), 1i64);

    // correctly rounded π via atan2(0, -1)
    let v = ops::atan2(&f(0.0), &f(-1.0), &FP64).unwrap();
    assert_eq!(v.to_f64(), std::f64::consts::PI);

    assert!(ops::asin(&f(1.5), &FP64).unwrap().is_nan());
    assert!(ops::acos(&f(-1.5), &FP64).unwrap().is_nan());
}

#[test]
fn special_functions() {
    assert!(ops::erf(&f(0.0), &FP64).unwrap().is_zero());
    assert_eq!(ops::erfc(&f(0.0), &FP64).unwrap(), 1i64);
    assert_eq!(ops::tgamma(&f(5.0), &FP64).unwrap(), 24i64);
    // lgamma(3) = ln 2
    let v = ops::lgamma(&f(3.0), &FP64).unwrap();
    assert_eq!(v.to_f64(), std::f64::consts::LN_2);
}

#[test]
fn hypotenuse() {
    assert_eq!(ops::hypot(&f(3.0), &f(4.0), &FP64).unwrap(), 5i64);
    // an infinite leg wins even over NaN
    let v = ops::hypot(&f(f64::INFINITY), &f(f64::NAN), &FP64).unwrap();
    assert!(v.is_infinity() && !v.sign());
}

#[test]
fn remainders() {
    assert_eq!(ops::fmod(&f(5.5), &f(2.0), &FP64).unwrap().to_f64(), 1.5);
    assert_eq!(ops::fmod(&f(-5.5), &f(2.0), &FP64).unwrap().to_f64(), -1.5);
    assert!(ops::fmod(&f(1.0), &f(0.0), &FP64).unwrap().is_nan());
    assert!(ops::fmod(&f(f64::INFINITY), &f(2.0), &FP64).unwrap().is_nan());
    // finite % ∞ passes the dividend through
    assert_eq!(ops::fmod(&f(5.5), &f(f64::INFINITY), &FP64).unwrap().to_f64(), 5.5);

    // IEEE remainder rounds the quotient to nearest-even
    assert_eq!(ops::remainder(&f(5.5), &f(2.0), &FP64).unwrap().to_f64(), -0.5);
    assert_eq!(ops::remainder(&f(5.0), &f(2.0), &FP64).unwrap().to_f64(), 1.0);
    assert_eq!(ops::remainder(&f(6.0), &f(4.0), &FP64).unwrap().to_f64(), -2.0);

    // agreement with the hardware
    for (a, b) in [(7.75, 2.5), (-9.1, 3.2), (100.0, 7.0), (0.5, 0.25)] {
        assert_eq!(
            ops::fmod(&f(a), &f(b), &FP64).unwrap().to_f64(),
            a % b,
            "fmod({}, {})",
            a,
            b
        );
    }
}

#[test]
fn integer_rounding() {
    assert_eq!(ops::ceil(&f(2.1), &FP64).unwrap(), 3i64);
    assert_eq!(ops::ceil(&f(-2.1), &FP64).unwrap(), -2i64);
    assert_eq!(ops::floor(&f(-2.1), &FP64).unwrap(), -3i64);
    assert_eq!(ops::trunc(&f(-2.9), &FP64).unwrap(), -2i64);
    // C round: ties away from zero
    assert_eq!(ops::round(&f(2.5), &FP64).unwrap(), 3i64);
    assert_eq!(ops::round(&f(-2.5), &FP64).unwrap(), -3i64);
    // nearbyint honors the context mode
    assert_eq!(ops::nearbyint(&f(2.5), &FP64).unwrap(), 2i64);

    let (frac, int) = ops::modf(&f(-3.5), &FP64).unwrap();
    assert_eq!(frac.to_f64(), -0.5);
    assert_eq!(int.to_f64(), -3.0);
    let (frac, int) = ops::modf(&f(f64::INFINITY), &FP64).unwrap();
    assert!(frac.is_zero() && int.is_infinity());
}

#[test]
fn comparisons_and_sign_ops() {
    assert_eq!(ops::fdim(&f(5.0), &f(3.0), &FP64).unwrap(), 2i64);
    let v = ops::fdim(&f(3.0), &f(5.0), &FP64).unwrap();
    assert!(v.is_zero() && !v.sign());

    // NaN is a missing operand for max/min
    assert_eq!(ops::fmax(&f(f64::NAN), &f(2.0), &FP64).unwrap(), 2i64);
    assert_eq!(ops::fmin(&f(2.0), &f(f64::NAN), &FP64).unwrap(), 2i64);
    assert!(ops::fmax(&f(f64::NAN), &f(f64::NAN), &FP64).unwrap().is_nan());
    // -0 sorts below +0
    let v = ops::fmax(&f(-0.0), &f(0.0), &FP64).unwrap();
    assert!(v.is_zero() && !v.sign());
    let v = ops::fmin(&f(-0.0), &f(0.0), &FP64).unwrap();
    assert!(v.is_zero() && v.sign());

    let v = ops::copysign(&f(3.0), &f(-1.0), &FP64).unwrap();
    assert_eq!(v, -3i64);

    assert_eq!(ops::logb(&f(8.5), &FP64).unwrap(), 3i64);
    let v = ops::logb(&f(0.0), &FP64).unwrap();
    assert!(v.is_infinity() && v.sign());
    assert_eq!(ops::ldexp(&f(3.0), 5, &FP64).unwrap(), 96i64);
}

#[test]
fn ops_under_small_formats() {
    // exact integer arithmetic bypasses MPFR entirely
    let v = ops::add(&f(100.0), &f(20.0), &SINT32).unwrap();
    assert_eq!(v, 120i64);
    assert!(!v.inexact());

    // a transcendental result lands on the integer grid
    let v = ops::exp(&f(1.0), &INTEGER).unwrap();
    assert_eq!(v, 2i64, "exp(1) truncates to 2");

    let v = ops::sqrt(&f(2.0), &INTEGER).unwrap();
    assert_eq!(v, 1i64);

    // wrap applies after the exact computation
    let v = ops::mul(&f(200.0), &f(2.0), &float_ctx::SINT8).unwrap();
    assert_eq!(v, -112i64, "400 wraps to -112 in int8");
}

#[test]
fn ops_under_the_reals() {
    // exact operations are fine
    let v = ops::add(&f(1.5), &f(2.25), &REAL).unwrap();
    assert_eq!(v.to_f64(), 3.75);
    let v = ops::mul(&f(1.5), &f(2.0), &REAL).unwrap();
    assert_eq!(v, 3i64);

    // inexact ones cannot be correctly rounded to the reals
    assert!(matches!(
        ops::div(&f(1.0), &f(3.0), &REAL),
        Err(Error::NoSuchContext(_))
    ));
    assert!(matches!(
        ops::sqrt(&f(2.0), &REAL),
        Err(Error::NoSuchContext(_))
    ));
}

#[test]
fn ops_with_stochastic_rounding() {
    let ctx = MPFloatContext::new(2).with_num_randbits(2);
    // 1.25 must land on one of its two-bit neighbors
    let v = ops::add(&f(1.0), &f(0.25), &ctx).unwrap();
    assert!(v.to_f64() == 1.0 || v.to_f64() == 1.5);
}

#[test]
fn results_carry_the_context() {
    let v = ops::add(&f(1.0), &f(2.0), &FP32).unwrap();
    match v.ctx() {
        Some(float_ctx::Context::Ieee(ctx)) => assert_eq!(*ctx, FP32),
        other => panic!("expected an IEEE context tag, got {:?}", other),
    }
}
