/*
    IEEE-754-style binary floating-point contexts
*/

use crate::float::Float;
use crate::mp::MPSFloatContext;
use crate::real::RealFloat;
use crate::rounding::{OverflowMode, RoundingMode};

use num_bigint::BigUint;
use num_traits::One;

mod encode;
mod ordinal;
mod round;

macro_rules! assert_valid_format {
    ($E:expr, $N:expr) => {
        assert!(
            (2 <= $E) && ($E <= 60),
            "invalid exponent width, must be 2 <= es <= 60"
        );
        assert!(2 <= ($N - $E), "invalid total width, must be es + 2 <= nbits");
    };
}

/// An IEEE-754-style binary floating-point format.
///
/// The parameters `es` and `nbits` give the exponent field width and the
/// total width; every other format constant is derived from them exactly
/// as the standard does. Values are encodable as `nbits`-wide strings
/// with the standard sign/exponent/significand layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IEEEContext {
    es: usize,
    nbits: usize,
    rm: RoundingMode,
    overflow: OverflowMode,
    num_randbits: u32,
}

impl IEEEContext {
    /// Creates a format with `es` exponent bits and `nbits` total bits,
    /// rounding to nearest (even), overflowing to ±∞.
    pub const fn new(es: usize, nbits: usize) -> Self {
        assert_valid_format!(es, nbits);
        Self {
            es,
            nbits,
            rm: RoundingMode::NearestEven,
            overflow: OverflowMode::Overflow,
            num_randbits: 0,
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

    /// Sets the number of random bits per stochastic rounding decision.
    pub const fn with_num_randbits(mut self, num_randbits: u32) -> Self {
        self.num_randbits = num_randbits;
        self
    }

    /// Bitwidth of the exponent field.
    pub const fn es(&self) -> usize {
        self.es
    }

    /// Number of binary digits when the significand is expressed as an
    /// integer, `nbits - es`.
    pub const fn pmax(&self) -> usize {
        self.nbits - self.es
    }

    /// Bitwidth of the mantissa field, `pmax - 1`.
    pub const fn m(&self) -> usize {
        self.pmax() - 1
    }

    /// Exponent of the largest finite value in the form
    /// `(-1)^s 2^e (1.m)`.
    pub const fn emax(&self) -> i64 {
        (1i64 << (self.es - 1)) - 1
    }

    /// Exponent of the smallest normal value, `1 - emax`.
    pub const fn emin(&self) -> i64 {
        1 - self.emax()
    }

    /// Least exponent of an integer-significand representation,
    /// `emin - (pmax - 1)`.
    pub const fn expmin(&self) -> i64 {
        self.emin() - (self.pmax() as i64 - 1)
    }

    /// Greatest exponent of an integer-significand representation,
    /// `emax - (pmax - 1)`.
    pub const fn expmax(&self) -> i64 {
        self.emax() - (self.pmax() as i64 - 1)
    }

    /// The exponent field bias, `emax`.
    pub const fn bias(&self) -> i64 {
        self.emax()
    }

    // Largest finite magnitude: all-ones significand at `emax`.
    pub(crate) fn max_real(&self) -> RealFloat {
        let c = (BigUint::one() << self.pmax() as u64) - 1u8;
        RealFloat::new(false, self.expmax(), c)
    }

    // The unbounded subnormal view of this format.
    pub(crate) fn as_mps(&self) -> MPSFloatContext {
        MPSFloatContext::new(self.pmax(), self.emin())
            .with_rm(self.rm)
            .with_num_randbits(self.num_randbits)
    }

    /// Returns true if `x` is subnormal under this format: finite,
    /// nonzero, with magnitude below `2^emin`.
    pub fn is_subnormal(&self, x: &Float) -> bool {
        match x.real() {
            Some(r) => !r.is_zero() && r.e().unwrap() < self.emin(),
            None => false,
        }
    }

    /// Returns true if `x` is a normal value under this format.
    pub fn is_normal(&self, x: &Float) -> bool {
        match x.real() {
            Some(r) => {
                !r.is_zero() && r.e().unwrap() >= self.emin() && r.e().unwrap() <= self.emax()
            }
            None => false,
        }
    }
}
