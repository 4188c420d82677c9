/*
    Fixed-point contexts
*/

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::One;

use crate::real::RealFloat;
use crate::rounding::{OverflowMode, RoundingMode};

mod encode;
mod ordinal;
mod round;

// Integer view of an on-grid value: `r / 2^ulp_exp`.
pub(crate) fn int_of_grid(r: &RealFloat, ulp_exp: i64) -> BigInt {
    if r.is_zero() {
        return BigInt::default();
    }
    debug_assert!(r.exp() >= ulp_exp || r.canonicalized().exp() >= ulp_exp);
    let canon = r.canonicalized();
    let mag = canon.significand() << (canon.exp() - ulp_exp) as u64;
    let sign = if canon.sign() { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, mag)
}

// Value of an integer on the grid `2^ulp_exp`.
pub(crate) fn grid_value(k: &BigInt, ulp_exp: i64) -> RealFloat {
    RealFloat::new(k.sign() == Sign::Minus, ulp_exp, k.magnitude().clone())
}

/// Two's-complement fixed-point numbers.
///
/// Representables are the multiples of `2^scale` whose integer part fits
/// in `nbits` bits (two's complement when `signed`). Optional sentinel
/// bit patterns stand in for NaN and ∞, e.g. a 64-bit integer format
/// whose `INT_MIN` pattern means NaN; a sentinel that collides with an
/// endpoint of the numeric range shrinks that range by one step.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FixedContext {
    signed: bool,
    scale: i64,
    nbits: usize,
    rm: RoundingMode,
    overflow: OverflowMode,
    nan_value: Option<BigUint>,
    inf_value: Option<BigUint>,
}

impl FixedContext {
    /// Creates a fixed-point format of `nbits` digits scaled by
    /// `2^scale`, truncating toward zero, wrapping on overflow.
    pub const fn new(signed: bool, scale: i64, nbits: usize) -> Self {
        assert!(nbits >= 1, "total width must be at least 1");
        Self {
            signed,
            scale,
            nbits,
            rm: RoundingMode::ToZero,
            overflow: OverflowMode::Wrap,
            nan_value: None,
            inf_value: None,
        }
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

    /// Reserves a bit pattern to encode NaN.
    pub fn with_nan_value(mut self, pattern: BigUint) -> Self {
        assert!(pattern.bits() as usize <= self.nbits, "pattern is too wide");
        self.nan_value = Some(pattern);
        self
    }

    /// Reserves a bit pattern to encode ∞.
    pub fn with_inf_value(mut self, pattern: BigUint) -> Self {
        assert!(pattern.bits() as usize <= self.nbits, "pattern is too wide");
        self.inf_value = Some(pattern);
        self
    }

    /// Returns true if this format is two's-complement signed.
    pub const fn is_signed(&self) -> bool {
        self.signed
    }

    /// Returns the exponent of every representable value.
    pub const fn scale(&self) -> i64 {
        self.scale
    }

    pub(crate) fn nan_pattern(&self) -> Option<&BigUint> {
        self.nan_value.as_ref()
    }

    pub(crate) fn inf_pattern(&self) -> Option<&BigUint> {
        self.inf_value.as_ref()
    }

    // Signed reinterpretation of a bit pattern.
    pub(crate) fn pattern_to_int(&self, pattern: &BigUint) -> BigInt {
        let half = BigUint::one() << (self.nbits - 1) as u64;
        if self.signed && *pattern >= half {
            BigInt::from(pattern.clone()) - (BigInt::from(half) << 1)
        } else {
            BigInt::from(pattern.clone())
        }
    }

    // Integer range, with sentinel-shadowed endpoints excluded.
    pub(crate) fn bounds(&self) -> (BigInt, BigInt) {
        let half = BigInt::one() << (self.nbits - 1) as u64;
        let (mut kmin, mut kmax) = if self.signed {
            (-half.clone(), half - 1)
        } else {
            (BigInt::default(), (BigInt::one() << self.nbits as u64) - 1)
        };
        for pattern in [&self.nan_value, &self.inf_value].into_iter().flatten() {
            let k = self.pattern_to_int(pattern);
            if k == kmin {
                kmin += 1;
            }
            if k == kmax {
                kmax -= 1;
            }
        }
        (kmin, kmax)
    }
}

/// Sign-magnitude fixed-point numbers: a sign bit over an
/// `nbits - 1`-bit magnitude. The range is symmetric and −0 is
/// representable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SMFixedContext {
    scale: i64,
    nbits: usize,
    rm: RoundingMode,
    overflow: OverflowMode,
}

impl SMFixedContext {
    /// Creates a sign-magnitude format of `nbits` digits scaled by
    /// `2^scale`, truncating toward zero, wrapping on overflow.
    pub const fn new(scale: i64, nbits: usize) -> Self {
        assert!(nbits >= 2, "total width must be at least 2");
        Self {
            scale,
            nbits,
            rm: RoundingMode::ToZero,
            overflow: OverflowMode::Wrap,
        }
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

    /// Returns the exponent of every representable value.
    pub const fn scale(&self) -> i64 {
        self.scale
    }

    // Largest representable magnitude as an integer.
    pub(crate) fn kmax(&self) -> BigUint {
        (BigUint::one() << (self.nbits - 1) as u64) - 1u8
    }
}

/// Fixed-point numbers with an unbounded integer part: every
/// representable value has its bits strictly above position `nmin`.
/// NaN and ±∞ are admitted as tagged values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MPFixedContext {
    nmin: i64,
    rm: RoundingMode,
}

impl MPFixedContext {
    /// Creates an unbounded fixed-point format with grid `2^(nmin + 1)`,
    /// truncating toward zero.
    pub const fn new(nmin: i64) -> Self {
        Self {
            nmin,
            rm: RoundingMode::ToZero,
        }
    }

    /// Sets the rounding mode.
    pub const fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Returns the position below the least significant representable
    /// bit.
    pub const fn nmin(&self) -> i64 {
        self.nmin
    }

    /// Returns the exponent of the representable grid, `nmin + 1`.
    pub const fn scale(&self) -> i64 {
        self.nmin + 1
    }
}

/// [`MPFixedContext`] with a hard magnitude bound and an overflow
/// policy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MPBFixedContext {
    nmin: i64,
    maxval: RealFloat,
    rm: RoundingMode,
    overflow: OverflowMode,
}

impl MPBFixedContext {
    /// Creates a bounded fixed-point format with grid `2^(nmin + 1)`.
    /// `maxval` must be a positive multiple of the grid.
    pub fn new(nmin: i64, maxval: RealFloat) -> Self {
        assert!(
            maxval.is_positive() && maxval.canonicalized().exp() > nmin,
            "maxval must be a positive multiple of the grid"
        );
        Self {
            nmin,
            maxval,
            rm: RoundingMode::ToZero,
            overflow: OverflowMode::Saturate,
        }
    }

    /// Sets the rounding mode.
    pub fn with_rm(mut self, rm: RoundingMode) -> Self {
        self.rm = rm;
        self
    }

    /// Sets the overflow policy.
    pub fn with_overflow(mut self, overflow: OverflowMode) -> Self {
        self.overflow = overflow;
        self
    }

    /// Returns the position below the least significant representable
    /// bit.
    pub fn nmin(&self) -> i64 {
        self.nmin
    }
}
