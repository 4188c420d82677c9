/*
    Multi-precision floating-point contexts
*/

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

use crate::context::{draw_randbits, Context, OrdinalContext, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::RealFloat;
use crate::rounding::{OverflowMode, RoundingMode};

// Rounds a finite value with the kernel, drawing stochastic bits when
// the context asks for them. Returns the rounded value and exactness.
pub(crate) fn round_real_with(
    r: &RealFloat,
    max_p: Option<usize>,
    min_n: Option<i64>,
    rm: RoundingMode,
    num_randbits: u32,
    randbits: Option<u64>,
) -> (RealFloat, bool) {
    if num_randbits > 0 {
        let bits =
            randbits.unwrap_or_else(|| draw_randbits(&mut rand::thread_rng(), num_randbits));
        r.round_stochastic(max_p, min_n, num_randbits, bits)
    } else {
        r.round_exact(max_p, min_n, rm)
    }
}

// Position of a nonzero magnitude in the standard float layout with
// precision `p` and least exponent `expmin`: subnormal significands
// come first, then one block of `2^(p-1)` values per binade. The value
// must lie on the grid.
pub(crate) fn to_mag_ordinal(p: usize, expmin: i64, r: &RealFloat) -> BigUint {
    if r.is_zero() {
        return BigUint::zero();
    }
    let e = r.e().unwrap();
    let emin = expmin + p as i64 - 1;
    let exp_g = expmin.max(e - p as i64 + 1);
    let shift = r.exp() - exp_g;
    let c_g = if shift >= 0 {
        r.significand() << shift as u64
    } else {
        debug_assert!(r.significand().trailing_zeros().unwrap_or(0) >= (-shift) as u64);
        r.significand() >> (-shift) as u64
    };

    let csub = BigUint::one() << (p - 1) as u64;
    if c_g < csub {
        c_g
    } else {
        let b = BigUint::from((e - emin) as u64);
        c_g + b * csub
    }
}

// Inverse of `to_mag_ordinal`; `None` when the binade index exceeds
// the exponent range.
pub(crate) fn from_mag_ordinal(p: usize, expmin: i64, m: &BigUint) -> Option<RealFloat> {
    if m.is_zero() {
        return Some(RealFloat::zero());
    }
    let csub = BigUint::one() << (p - 1) as u64;
    if *m < csub {
        Some(RealFloat::new(false, expmin, m.clone()))
    } else {
        let b = m / &csub - 1u8;
        let c_g = m - &b * &csub;
        let exp = expmin.checked_add(b.to_i64()?)?;
        Some(RealFloat::new(false, exp, c_g))
    }
}

// Ordinal of a signed finite representable.
pub(crate) fn to_signed_ordinal(p: usize, expmin: i64, r: &RealFloat) -> BigInt {
    let mag = to_mag_ordinal(p, expmin, r);
    let sign = if mag.is_zero() {
        Sign::NoSign
    } else if r.sign() {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, mag)
}

/// Binary floating-point numbers with a bounded precision and an
/// unbounded exponent.
///
/// Representable values have at most `p` significant bits; rounded
/// results are normalized so their significand is anchored at
/// `e - (p - 1)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MPFloatContext {
    p: usize,
    rm: RoundingMode,
    num_randbits: u32,
}

impl MPFloatContext {
    /// Creates a context with precision `p`, rounding to nearest (even).
    pub const fn new(p: usize) -> Self {
        assert!(p >= 1, "precision must be at least 1");
        Self {
            p,
            rm: RoundingMode::NearestEven,
            num_randbits: 0,
        }
    }

    /// Sets the rounding mode.
    pub const fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Sets the number of random bits per stochastic rounding decision.
    pub const fn with_num_randbits(mut self, num_randbits: u32) -> Self {
        self.num_randbits = num_randbits;
        self
    }

    /// Returns the maximum precision.
    pub const fn pmax(&self) -> usize {
        self.p
    }
}

impl RoundingContext for MPFloatContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (Some(self.p), None)
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn num_randbits(&self) -> u32 {
        self.num_randbits
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => r.is_zero() || r.canonicalized().p() <= self.p,
            _ => true,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl MPFloatContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::MPFloat(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let (rounded, inexact) =
                    round_real_with(r, Some(self.p), min_n, self.rm, self.num_randbits, randbits);
                let rounded = rounded.normalize_unchecked(Some(self.p), min_n);
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

/// [`MPFloatContext`] with a minimum unbiased exponent: values below
/// `2^emin` degrade into a subnormal range and underflow to zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MPSFloatContext {
    p: usize,
    emin: i64,
    rm: RoundingMode,
    num_randbits: u32,
}

impl MPSFloatContext {
    /// Creates a context with precision `p` and least unbiased exponent
    /// `emin`, rounding to nearest (even).
    pub const fn new(p: usize, emin: i64) -> Self {
        assert!(p >= 1, "precision must be at least 1");
        Self {
            p,
            emin,
            rm: RoundingMode::NearestEven,
            num_randbits: 0,
        }
    }

    /// Sets the rounding mode.
    pub const fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Sets the number of random bits per stochastic rounding decision.
    pub const fn with_num_randbits(mut self, num_randbits: u32) -> Self {
        self.num_randbits = num_randbits;
        self
    }

    /// Returns the maximum precision.
    pub const fn pmax(&self) -> usize {
        self.p
    }

    /// Returns the least unbiased exponent of a normal value.
    pub const fn emin(&self) -> i64 {
        self.emin
    }

    /// Returns the least exponent of a representable significand,
    /// `emin - (pmax - 1)`.
    pub const fn expmin(&self) -> i64 {
        self.emin - (self.p as i64 - 1)
    }

    // Shared by the bounded variant and the IEEE family.
    pub(crate) fn round_finite(
        &self,
        r: &RealFloat,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> (RealFloat, bool) {
        let anchor = min_n.map_or(self.expmin() - 1, |n| n.max(self.expmin() - 1));
        let (rounded, inexact) = round_real_with(
            r,
            Some(self.p),
            Some(anchor),
            self.rm,
            self.num_randbits,
            randbits,
        );
        (rounded.normalize_unchecked(Some(self.p), Some(anchor)), inexact)
    }
}

impl RoundingContext for MPSFloatContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (Some(self.p), Some(self.expmin() - 1))
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
                    return true;
                }
                let canon = r.canonicalized();
                canon.p() <= self.p && canon.exp() >= self.expmin()
            }
            _ => true,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl MPSFloatContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::MPSFloat(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let (rounded, inexact) = self.round_finite(r, min_n, randbits);
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl OrdinalContext for MPSFloatContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                Ok(to_signed_ordinal(self.p, self.expmin(), r))
            }
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let mag = from_mag_ordinal(self.p, self.expmin(), i.magnitude())
            .ok_or(Error::Overflow)?;
        let r = mag.with_sign(i.sign() == Sign::Minus);
        Ok(Float::from(r).with_ctx(Context::MPSFloat(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.expmin()))
    }

    fn maxval(&self) -> Option<Float> {
        None
    }
}

/// [`MPSFloatContext`] with a hard magnitude bound and an overflow
/// policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MPBFloatContext {
    inner: MPSFloatContext,
    maxval: RealFloat,
    overflow: OverflowMode,
}

impl MPBFloatContext {
    /// Creates a bounded context. `maxval` must itself be representable
    /// at precision `p` with least exponent `emin`.
    pub fn new(p: usize, emin: i64, maxval: RealFloat) -> Self {
        let inner = MPSFloatContext::new(p, emin);
        assert!(
            inner.representable(&Float::from(maxval.clone())) && maxval.is_positive(),
            "maxval must be a positive representable value"
        );
        Self {
            inner,
            maxval,
            overflow: OverflowMode::Overflow,
        }
    }

    /// Sets the rounding mode.
    pub fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.inner = self.inner.with_rm(rm);
        self
    }

    /// Sets the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }

    /// Sets the number of random bits per stochastic rounding decision.
    pub fn with_num_randbits(mut self, num_randbits: u32) -> Self {
        self.inner = self.inner.with_num_randbits(num_randbits);
        self
    }

    /// Returns the maximum precision.
    pub fn pmax(&self) -> usize {
        self.inner.pmax()
    }
}

impl RoundingContext for MPBFloatContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        self.inner.round_params()
    }

    fn rm(&self) -> RoundingMode {
        self.inner.rm()
    }

    fn num_randbits(&self) -> u32 {
        self.inner.num_randbits()
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                self.inner.representable(x) && r.cmp_abs(&self.maxval) != std::cmp::Ordering::Greater
            }
            _ => true,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl MPBFloatContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::MPBFloat(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let (rounded, inexact) = self.inner.round_finite(r, min_n, randbits);
                if rounded.cmp_abs(&self.maxval) == std::cmp::Ordering::Greater {
                    let s = rounded.sign();
                    let v = match self.overflow {
                        OverflowMode::Overflow if self.rm().overflow_to_infinity(s) => {
                            Float::infinity(s)
                        }
                        _ => Float::from(self.maxval.clone().with_sign(s)),
                    };
                    return Ok(v.with_ctx(ctx).with_inexact(true));
                }
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl OrdinalContext for MPBFloatContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                Ok(to_signed_ordinal(self.inner.p, self.inner.expmin(), r))
            }
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let max_ord = to_mag_ordinal(self.inner.p, self.inner.expmin(), &self.maxval);
        if i.magnitude() > &max_ord {
            return Err(Error::Overflow);
        }
        let mag = from_mag_ordinal(self.inner.p, self.inner.expmin(), i.magnitude())
            .ok_or(Error::Overflow)?;
        let r = mag.with_sign(i.sign() == Sign::Minus);
        Ok(Float::from(r).with_ctx(Context::MPBFloat(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.inner.expmin()))
    }

    fn maxval(&self) -> Option<Float> {
        Some(Float::from(self.maxval.clone()))
    }
}
