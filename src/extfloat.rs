/*
    Extended small floating-point contexts (Graphcore, OCP MX, P3109)
*/

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

use crate::context::{Context, OrdinalContext, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::mp::{from_mag_ordinal, to_mag_ordinal, to_signed_ordinal, MPSFloatContext};
use crate::real::RealFloat;
use crate::rounding::{OverflowMode, RoundingMode};

mod encode;

/// Which code point(s) of an [`ExtFloatContext`] denote NaN.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NanKind {
    /// The whole top binade is reserved, as in IEEE-754.
    Ieee754,
    /// The maximum-magnitude code point is NaN (e.g. OCP MX E4M3's
    /// `S.1111.111`).
    MaxVal,
    /// The would-be −0 code point is NaN (IEEE-P3109); −0 itself is not
    /// representable.
    NegZero,
    /// No code point denotes NaN; every pattern is a number.
    None,
}

/// A family of IEEE-like small floating-point formats that reinterpret
/// the top of the encoding.
///
/// The layer spans Graphcore S1E5M2/S1E4M3, the OCP MX E*M* formats,
/// and IEEE-P3109: `nan_kind` selects which code points denote NaN,
/// `enable_inf` whether ±∞ exist, and `eoffset` shifts the exponent
/// bias. All variants round identically through the kernel; they differ
/// only in which values are representable and in encode/decode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtFloatContext {
    es: usize,
    nbits: usize,
    enable_inf: bool,
    nan_kind: NanKind,
    eoffset: i64,
    rm: RoundingMode,
    overflow: OverflowMode,
    num_randbits: u32,
}

impl ExtFloatContext {
    /// Creates a format with `es` exponent bits and `nbits` total bits.
    /// Rounds to nearest (even); overflow saturates.
    pub const fn new(es: usize, nbits: usize, enable_inf: bool, nan_kind: NanKind) -> Self {
        // P3109 reaches down to a single exponent bit (binary8p7)
        assert!((1 <= es) && (es <= 60), "invalid exponent width");
        assert!(es < nbits, "total width must exceed the exponent width");
        assert!(
            !(matches!(nan_kind, NanKind::Ieee754) && nbits - es < 2),
            "an IEEE-754 NaN needs a mantissa bit"
        );
        Self {
            es,
            nbits,
            enable_inf,
            nan_kind,
            eoffset: 0,
            rm: RoundingMode::NearestEven,
            overflow: OverflowMode::Saturate,
            num_randbits: 0,
        }
    }

    /// Shifts the exponent bias by `eoffset`.
    pub const fn with_eoffset(mut self, eoffset: i64) -> Self {
        self.eoffset = eoffset;
        self
    }

    /// Sets the rounding mode.
    pub const fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Sets the overflow policy.
    pub const fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }

    /// Sets the number of random bits per stochastic rounding decision.
    pub const fn with_num_randbits(mut self, num_randbits: u32) -> Self {
        self.num_randbits = num_randbits;
        self
    }

    /// Bitwidth of the exponent field.
    pub const fn es(&self) -> usize {
        self.es
    }

    /// Number of binary digits of a full significand, `nbits - es`.
    pub const fn pmax(&self) -> usize {
        self.nbits - self.es
    }

    /// Bitwidth of the mantissa field, `pmax - 1`.
    pub const fn m(&self) -> usize {
        self.pmax() - 1
    }

    /// The exponent field bias, shifted by `eoffset`.
    pub const fn bias(&self) -> i64 {
        ((1i64 << (self.es - 1)) - 1) - self.eoffset
    }

    /// Exponent of the smallest normal value.
    pub const fn emin(&self) -> i64 {
        1 - self.bias()
    }

    /// Least exponent of an integer-significand representation.
    pub const fn expmin(&self) -> i64 {
        self.emin() - (self.pmax() as i64 - 1)
    }

    pub(crate) const fn nan_kind(&self) -> NanKind {
        self.nan_kind
    }

    pub(crate) const fn has_inf(&self) -> bool {
        self.enable_inf
    }

    // Number of top magnitude codes that do not denote finite values.
    pub(crate) fn reserved_top(&self) -> BigUint {
        match self.nan_kind {
            NanKind::Ieee754 => BigUint::one() << self.m() as u64,
            NanKind::MaxVal => BigUint::from(1u8 + self.enable_inf as u8),
            NanKind::NegZero | NanKind::None => BigUint::from(self.enable_inf as u8),
        }
    }

    // The largest magnitude code, all magnitude bits high.
    pub(crate) fn top_mag_code(&self) -> BigUint {
        (BigUint::one() << (self.nbits - 1) as u64) - 1u8
    }

    // Finite value of a magnitude code.
    pub(crate) fn mag_value(&self, code: &BigUint) -> RealFloat {
        let mlen = self.m() as u64;
        let e_field = code >> mlen;
        let m = code - (&e_field << mlen);
        if e_field.is_zero() {
            RealFloat::new(false, self.expmin(), m)
        } else {
            let biased = e_field.to_i64().unwrap_or(0);
            let c = m + (BigUint::one() << mlen);
            RealFloat::new(false, (biased - self.bias()) - mlen as i64, c)
        }
    }

    // Largest finite magnitude.
    pub(crate) fn max_real(&self) -> RealFloat {
        self.mag_value(&(self.top_mag_code() - self.reserved_top()))
    }

    // The unbounded subnormal view of this format.
    pub(crate) fn as_mps(&self) -> MPSFloatContext {
        MPSFloatContext::new(self.pmax(), self.emin())
            .with_rm(self.rm)
            .with_num_randbits(self.num_randbits)
    }
}

impl RoundingContext for ExtFloatContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (Some(self.pmax()), Some(self.expmin() - 1))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn num_randbits(&self) -> u32 {
        self.num_randbits
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                if r.is_zero() {
                    // NEG_ZERO formats repurpose the −0 code point
                    return !(self.nan_kind == NanKind::NegZero && r.sign());
                }
                let canon = r.canonicalized();
                canon.p() <= self.pmax()
                    && canon.exp() >= self.expmin()
                    && canon.cmp_abs(&self.max_real()) != Ordering::Greater
            }
            FloatNum::Infinity(_) => self.enable_inf,
            FloatNum::Nan(_) => self.nan_kind != NanKind::None,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl ExtFloatContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::ExtFloat(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => {
                if self.enable_inf {
                    Ok(Float::infinity(*s).with_ctx(ctx))
                } else if self.nan_kind != NanKind::None {
                    Ok(Float::nan(*s).with_ctx(ctx))
                } else {
                    // an all-finite format can only saturate
                    let v = self.max_real().with_sign(*s);
                    Ok(Float::from(v).with_ctx(ctx).with_inexact(true))
                }
            }
            FloatNum::Real(r) => {
                let (rounded, inexact) = self.as_mps().round_finite(r, min_n, randbits);
                if rounded.cmp_abs(&self.max_real()) == Ordering::Greater {
                    let s = rounded.sign();
                    let v = match self.overflow {
                        OverflowMode::Overflow if self.rm.overflow_to_infinity(s) => {
                            if self.enable_inf {
                                Float::infinity(s)
                            } else if self.nan_kind != NanKind::None {
                                Float::nan(s)
                            } else {
                                return Err(Error::Overflow);
                            }
                        }
                        _ => Float::from(self.max_real().with_sign(s)),
                    };
                    return Ok(v.with_ctx(ctx).with_inexact(true));
                }
                // a NEG_ZERO format has no −0; zero results are positive
                let rounded = if self.nan_kind == NanKind::NegZero && rounded.is_zero() {
                    RealFloat::zero()
                } else {
                    rounded
                };
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl OrdinalContext for ExtFloatContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                Ok(to_signed_ordinal(self.pmax(), self.expmin(), r))
            }
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let max_ord = to_mag_ordinal(self.pmax(), self.expmin(), &self.max_real());
        if i.magnitude() > &max_ord {
            return Err(Error::Overflow);
        }
        let mag = from_mag_ordinal(self.pmax(), self.expmin(), i.magnitude())
            .ok_or(Error::Overflow)?;
        let r = mag.with_sign(i.sign() == Sign::Minus);
        Ok(Float::from(r).with_ctx(Context::ExtFloat(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.expmin()))
    }

    fn maxval(&self) -> Option<Float> {
        Some(Float::from(self.max_real()))
    }
}
