use num_bigint::{BigInt, BigUint};

use float_ctx::{
    Context, EncodableContext, ExpContext, Error, FixedContext, Float, MPBFixedContext,
    MPFloatContext, MPSFloatContext, OrdinalContext, OverflowMode, RealFloat, RoundingContext,
    RoundingMode, SMFixedContext, SizedContext, FP8P3, INTEGER, MX_E2M1, MX_E4M3, MX_E8M0, REAL,
    S1E4M3, SINT8, UINT8,
};

fn from_u64(bits: u64, width: usize) -> float_ctx::BitVec {
    let mut bv = float_ctx::bitvec![0; width];
    for b in 0..width {
        bv.set(b, (bits >> b) & 1 == 1);
    }
    bv
}

#[test]
fn real_context_is_identity() {
    let x = Float::from(0.1);
    let v = REAL.round(&x).unwrap();
    assert_eq!(v, x);
    assert!(!v.inexact());
    assert!(REAL.representable(&x));

    // no anchored rounding on the reals
    assert!(matches!(
        REAL.round_at(&x, -10),
        Err(Error::NoSuchContext(_))
    ));
    // and no way to absorb a non-dyadic rational
    let third = rug::Rational::from((1, 3));
    assert!(matches!(REAL.round_rational(&third), Err(Error::NonDyadic)));
}

#[test]
fn mp_float_rounds_to_precision() {
    let ctx = MPFloatContext::new(4);
    let v = ctx.round(0.1).unwrap();
    assert!(v.inexact());
    assert_eq!(v.to_f64(), 13.0 / 128.0, "0.1 at four bits is 13/128");

    // results are normalized to exactly four bits
    assert_eq!(v.real().unwrap().p(), 4);

    // exponents are unbounded
    let v = ctx.round(Float::from(RealFloat::power_of_two(-100000))).unwrap();
    assert!(!v.inexact());
}

#[test]
fn mps_float_has_subnormals() {
    let ctx = MPSFloatContext::new(8, -20);
    assert_eq!(ctx.expmin(), -27);
    let v = ctx.round(Float::from(RealFloat::power_of_two(-25))).unwrap();
    assert!(!v.inexact(), "2^-25 sits inside the subnormal range");

    // below the grid, rounds to zero
    let v = ctx.round(Float::from(RealFloat::power_of_two(-40))).unwrap();
    assert!(v.is_zero() && v.inexact());
}

#[test]
fn rational_rounding() {
    let third = rug::Rational::from((1, 3));
    let v = Context::from(float_ctx::FP64).round_rational(&third).unwrap();
    assert_eq!(v.to_f64(), 1.0 / 3.0);
    assert!(v.inexact());

    let exact = rug::Rational::from((3, 8));
    let v = MPFloatContext::new(10).round_rational(&exact).unwrap();
    assert!(!v.inexact());
    assert_eq!(v.to_f64(), 0.375);

    // fixed-point target: 1/3 in units of 2^-4
    let ctx = FixedContext::new(true, -4, 16).with_rm(RoundingMode::NearestEven);
    let v = ctx.round_rational(&third).unwrap();
    assert_eq!(v.to_f64(), 5.0 / 16.0);
}

#[test]
fn fixed_wraps_like_twos_complement() {
    // 130 mod 256, reinterpreted signed, is -126
    let v = SINT8.round(130i64).unwrap();
    assert_eq!(v, -126i64);

    // unsigned wrapping pulls negatives back into range
    let v = UINT8.round(-3i64).unwrap();
    assert_eq!(v, 253i64);

    let v = SINT8.round(-129i64).unwrap();
    assert_eq!(v, 127i64);
}

#[test]
fn fixed_saturates_and_overflows() {
    let sat = SINT8.with_overflow(OverflowMode::Saturate);
    assert_eq!(sat.round(130i64).unwrap(), 127i64);
    assert_eq!(sat.round(-200i64).unwrap(), -128i64);

    // overflow policy with no sentinels is an error
    let ovf = SINT8.with_overflow(OverflowMode::Overflow);
    assert!(matches!(ovf.round(130i64), Err(Error::Overflow)));
}

#[test]
fn fixed_rounds_fractions() {
    // scale -4: sixteenths, truncating toward zero
    let ctx = FixedContext::new(true, -4, 16);
    let v = ctx.round(0.3).unwrap();
    assert_eq!(v.to_f64(), 4.0 / 16.0);
    assert!(v.inexact());

    let v = ctx.with_rm(RoundingMode::NearestEven).round(0.3).unwrap();
    assert_eq!(v.to_f64(), 5.0 / 16.0);

    // integers in range are exact
    let v = ctx.round(100i64).unwrap();
    assert!(!v.inexact());
}

#[test]
fn fixed_sentinels() {
    // a 64-bit integer whose INT_MIN pattern means NaN
    let ctx = FixedContext::new(true, 0, 64)
        .with_overflow(OverflowMode::Saturate)
        .with_nan_value(BigUint::from(1u8) << 63);

    // the shadowed endpoint shrinks the numeric range by one
    let v = ctx.round(Float::from(RealFloat::new(true, 0, BigUint::from(1u128 << 70)))).unwrap();
    assert_eq!(v.to_f64(), -(9223372036854775807.0), "saturates to INT_MIN + 1");

    // NaN round-trips through the sentinel
    let nan = ctx.round(f64::NAN).unwrap();
    let bv = ctx.encode(&nan).unwrap();
    assert_eq!(bv, from_u64(1u64 << 63, 64));
    assert!(ctx.decode(&bv).is_nan());
}

#[test]
fn fixed_encoding_round_trip() {
    for i in 0..256u64 {
        let v = SINT8.decode(&from_u64(i, 8));
        assert!(SINT8.representable(&v));
        assert_eq!(SINT8.encode(&v).unwrap(), from_u64(i, 8), "pattern {:#04x}", i);
        // matches the i8 reinterpretation
        assert_eq!(v, i as u8 as i8 as i64);
    }
}

#[test]
fn sign_magnitude_fixed() {
    let ctx = SMFixedContext::new(0, 8);
    assert_eq!(ctx.nbits(), 8);

    let v = ctx.round(-5i64).unwrap();
    assert_eq!(ctx.encode(&v).unwrap(), from_u64(0x85, 8));

    // the range is symmetric
    let sat = ctx.with_overflow(OverflowMode::Saturate);
    assert_eq!(sat.round(500i64).unwrap(), 127i64);
    assert_eq!(sat.round(-500i64).unwrap(), -127i64);

    // -0 is a first-class encoding
    let nz = ctx.round(-0.0).unwrap();
    assert!(nz.is_zero() && nz.sign());
    assert_eq!(ctx.encode(&nz).unwrap(), from_u64(0x80, 8));
    let back = ctx.decode(&from_u64(0x80, 8));
    assert!(back.is_zero() && back.sign());
}

#[test]
fn unbounded_integers() {
    let v = INTEGER.round(7.9).unwrap();
    assert_eq!(v, 7i64, "truncation toward zero");
    let v = INTEGER.round(-7.9).unwrap();
    assert_eq!(v, -7i64);

    // NaN and infinities pass through as tagged values
    assert!(INTEGER.round(f64::NAN).unwrap().is_nan());
    assert!(INTEGER.round(f64::INFINITY).unwrap().is_infinity());
    assert!(INTEGER.representable(&Float::nan(false)));

    // ordinals are the integers themselves
    let v = INTEGER.round(42i64).unwrap();
    assert_eq!(INTEGER.to_ordinal(&v).unwrap(), BigInt::from(42));
}

#[test]
fn bounded_fixed() {
    let ctx = MPBFixedContext::new(-1, RealFloat::from(100i64));
    assert_eq!(ctx.round(150i64).unwrap(), 100i64);
    assert_eq!(ctx.round(-150i64).unwrap(), -100i64);
    assert_eq!(ctx.round(99i64).unwrap(), 99i64);

    // overflow carries to infinity only for modes that round away
    let ovf = MPBFixedContext::new(-1, RealFloat::from(100i64))
        .with_rm(RoundingMode::NearestEven)
        .with_overflow(OverflowMode::Overflow);
    assert!(ovf.round(150i64).unwrap().is_infinity());
}

#[test]
fn graphcore_nan_code_points() {
    // every pattern decodes; exactly S.1111111 is NaN
    let mut nans = Vec::new();
    for i in 0..256u64 {
        let v = S1E4M3.decode(&from_u64(i, 8));
        assert!(!v.is_infinity(), "S1E4M3 has no infinities: {:#04x}", i);
        if v.is_nan() {
            nans.push(i);
        } else {
            assert!(S1E4M3.representable(&v));
            assert_eq!(S1E4M3.encode(&v).unwrap(), from_u64(i, 8));
        }
    }
    assert_eq!(nans, vec![0x7f, 0xff]);
}

#[test]
fn ocp_mx_formats() {
    // E4M3 reaches 448 and overflows to NaN under round-to-nearest
    assert_eq!(MX_E4M3.maxval().unwrap().to_f64(), 448.0);
    let v = MX_E4M3
        .with_overflow(OverflowMode::Overflow)
        .round(1000.0)
        .unwrap();
    assert!(v.is_nan());
    // the default policy saturates
    let v = MX_E4M3.round(1000.0).unwrap();
    assert_eq!(v.to_f64(), 448.0);

    // E2M1 is all-finite with range ±6
    assert_eq!(MX_E2M1.maxval().unwrap().to_f64(), 6.0);
    for i in 0..16u64 {
        let v = MX_E2M1.decode(&from_u64(i, 4));
        assert!(v.is_finite(), "every E2M1 code point is a number");
    }
    assert_eq!(MX_E2M1.round(1000.0).unwrap().to_f64(), 6.0);
}

#[test]
fn p3109_formats() {
    // NaN lives in the -0 slot, infinities at the extremes
    assert!(FP8P3.decode(&from_u64(0x80, 8)).is_nan());
    let pinf = FP8P3.decode(&from_u64(0x7f, 8));
    assert!(pinf.is_infinity() && !pinf.sign());
    let ninf = FP8P3.decode(&from_u64(0xff, 8));
    assert!(ninf.is_infinity() && ninf.sign());

    // bias is 2^(es-1): the largest finite value is 1.5 * 2^15
    assert_eq!(FP8P3.maxval().unwrap().to_f64(), 49152.0);

    // -0 is not representable; it rounds to +0
    let v = FP8P3.round(-0.0).unwrap();
    assert!(v.is_zero() && !v.sign());
    assert!(!FP8P3.representable(&Float::zero(true)));

    // non-NaN patterns round-trip
    for i in 0..256u64 {
        let v = FP8P3.decode(&from_u64(i, 8));
        if !v.is_nan() {
            assert_eq!(FP8P3.encode(&v).unwrap(), from_u64(i, 8), "pattern {:#04x}", i);
        }
    }
}

#[test]
fn exponent_only_format() {
    assert_eq!(MX_E8M0.nbits(), 8);
    assert_eq!(MX_E8M0.emin(), -127);
    assert_eq!(MX_E8M0.emax(), 127);

    // rounding 3.0 in the log domain
    let v = MX_E8M0.with_rm(RoundingMode::ToNegative).round(3.0).unwrap();
    assert_eq!(v.to_f64(), 2.0);
    let v = MX_E8M0.with_rm(RoundingMode::ToPositive).round(3.0).unwrap();
    assert_eq!(v.to_f64(), 4.0);

    // the geometric midpoint of [2, 4] is 2*sqrt(2) = 2.828...; nearest
    // in the log domain sends 2.9 up but 2.8 down
    let v = MX_E8M0.round(2.9).unwrap();
    assert_eq!(v.to_f64(), 4.0);
    let v = MX_E8M0.round(2.8).unwrap();
    assert_eq!(v.to_f64(), 2.0);

    // zero, negatives, and infinities have no encoding: NaN by convention
    assert!(MX_E8M0.round(0.0).unwrap().is_nan());
    assert!(MX_E8M0.round(-2.0).unwrap().is_nan());
    assert!(MX_E8M0.round(f64::INFINITY).unwrap().is_nan());

    // the all-ones pattern is NaN, everything else a power of two
    assert!(MX_E8M0.decode(&from_u64(0xff, 8)).is_nan());
    assert_eq!(MX_E8M0.decode(&from_u64(127, 8)).to_f64(), 1.0);
    let v = MX_E8M0.round(1.0).unwrap();
    assert_eq!(MX_E8M0.encode(&v).unwrap(), from_u64(127, 8));

    // saturation at the exponent range
    assert_eq!(MX_E8M0.round(1e300).unwrap().to_f64(), 2.0f64.powi(127));

    // ordinals count exponents from emin
    let v = MX_E8M0.round(2.0f64.powi(-127)).unwrap();
    assert_eq!(MX_E8M0.to_ordinal(&v).unwrap(), BigInt::from(0));
    assert_eq!(ExpContext::new(8).to_ordinal(&MX_E8M0.round(1.0).unwrap()).unwrap(), BigInt::from(127));
}

#[test]
fn context_equality_and_tagging() {
    assert_eq!(MPFloatContext::new(8), MPFloatContext::new(8));
    assert_ne!(
        MPFloatContext::new(8),
        MPFloatContext::new(8).with_rm(RoundingMode::ToZero)
    );

    let ctx: Context = MPFloatContext::new(8).into();
    let v = ctx.round(0.1).unwrap();
    assert_eq!(v.ctx(), Some(&ctx));

    // the sum type dispatches encodings
    assert_eq!(Context::from(UINT8).nbits(), Some(8));
    assert_eq!(Context::from(REAL).nbits(), None);
    assert!(Context::from(REAL).to_ordinal(&Float::from(1i64)).is_err());
}

#[test]
fn stochastic_context_draws() {
    let ctx = MPFloatContext::new(2).with_num_randbits(2);
    assert!(ctx.is_stochastic());

    // explicit draws reproduce the 50/50 split at the halfway point
    for bits in 0..4u64 {
        let v = ctx.round_with_randbits(1.25, bits).unwrap();
        if bits < 2 {
            assert_eq!(v.to_f64(), 1.5, "low draws round up");
        } else {
            assert_eq!(v.to_f64(), 1.0, "high draws round down");
        }
    }

    // an RNG draw still lands on a neighbor
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(12345);
    let v = ctx.round_rng(1.25, &mut rng).unwrap();
    assert!(v.to_f64() == 1.0 || v.to_f64() == 1.5);
}
