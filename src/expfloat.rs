/*
    Exponent-only contexts (e.g. OCP MX E8M0)
*/

use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive};

use crate::context::{Context, EncodableContext, OrdinalContext, RoundingContext, SizedContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::round_requires_increment;
use crate::real::RealFloat;
use crate::rounding::RoundingMode;
use crate::util::{bitvec_to_biguint, biguint_to_bitvec, BitVec};

/// An exponent-only format: the representables are the powers of two
/// `2^e` for `e` in a bounded range, plus a single NaN code point.
///
/// The encoding is an unsigned `es`-wide exponent field with no sign
/// bit (the all-ones pattern is NaN), so neither zero, negative values,
/// nor ±∞ are representable; rounding maps them all to NaN. Nonzero
/// magnitudes round in the log domain: the fractional part of
/// `log2(x)` decides, under the context's rounding mode, whether to
/// step up one power of two.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExpContext {
    es: usize,
    eoffset: i64,
    rm: RoundingMode,
}

impl ExpContext {
    /// Creates an exponent-only format with an `es`-bit exponent field,
    /// rounding to nearest.
    pub const fn new(es: usize) -> Self {
        assert!((2 <= es) && (es <= 60), "invalid exponent width");
        Self {
            es,
            eoffset: 0,
            rm: RoundingMode::NearestEven,
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

    /// The exponent field bias, shifted by `eoffset`.
    pub const fn bias(&self) -> i64 {
        ((1i64 << (self.es - 1)) - 1) - self.eoffset
    }

    /// The least representable exponent (the all-zeros code).
    pub const fn emin(&self) -> i64 {
        -self.bias()
    }

    /// The greatest representable exponent (one below the NaN code).
    pub const fn emax(&self) -> i64 {
        ((1i64 << self.es) - 2) - self.bias()
    }

    // Rounds the exponent of a positive, non-power-of-two magnitude in
    // the log domain: `half` holds iff the fractional part of `log2`
    // exceeds one half, i.e. `c^2 > 2^(2p - 1)`. The geometric midpoint
    // is irrational, so exact ties cannot occur.
    fn round_log(&self, r: &RealFloat) -> i64 {
        let canon = r.canonicalized();
        let e = canon.e().unwrap();
        let p = canon.p() as u64;
        let c = canon.significand();
        let half = (c * c) > (BigUint::one() << (2 * p - 1));
        let up = round_requires_increment(false, e % 2 != 0, half, true, self.rm);
        e + up as i64
    }
}

impl RoundingContext for ExpContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        // log-domain decisions have no linear precision; 64 intermediate
        // bits decide the geometric midpoint except for adversarially
        // close inputs
        (Some(64), None)
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                if !r.is_power_of_two() {
                    return false;
                }
                let e = r.e().unwrap();
                self.emin() <= e && e <= self.emax()
            }
            FloatNum::Infinity(_) => false,
            FloatNum::Nan(_) => true,
        }
    }

    fn round_with(&self, x: &Float, _randbits: Option<u64>) -> Result<Float, Error> {
        let ctx = Context::Exp(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                if r.is_zero() || r.is_negative() {
                    // no zero and no sign bit: NaN by convention
                    return Ok(Float::nan(r.sign()).with_ctx(ctx));
                }
                let (e, inexact) = if r.is_power_of_two() {
                    (r.e().unwrap(), false)
                } else {
                    (self.round_log(r), true)
                };
                let (e, inexact) = if e > self.emax() {
                    (self.emax(), true)
                } else if e < self.emin() {
                    (self.emin(), true)
                } else {
                    (e, inexact)
                };
                Ok(Float::from(RealFloat::power_of_two(e))
                    .with_ctx(ctx)
                    .with_inexact(inexact))
            }
        }
    }

    // an exponent-only grid has no fixed-point anchor; rounding at a
    // position is just rounding
    fn round_at_with(&self, x: &Float, _n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_with(x, randbits)
    }
}

impl OrdinalContext for ExpContext {
    // This format has no zero, so ordinal 0 is the least representable
    // power of two rather than a zero.
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) if self.representable(x) => {
                Ok(BigInt::from(r.e().unwrap() - self.emin()))
            }
            FloatNum::Real(_) => Err(Error::NoSuchContext("value is not representable here")),
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let i = i.to_i64().ok_or(Error::Overflow)?;
        if i < 0 || i > self.emax() - self.emin() {
            return Err(Error::Overflow);
        }
        Ok(Float::from(RealFloat::power_of_two(self.emin() + i))
            .with_ctx(Context::Exp(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.emin()))
    }

    fn maxval(&self) -> Option<Float> {
        Some(Float::from(RealFloat::power_of_two(self.emax())))
    }
}

impl SizedContext for ExpContext {
    fn nbits(&self) -> usize {
        self.es
    }
}

impl EncodableContext for ExpContext {
    fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        match &x.num {
            FloatNum::Nan(_) => {
                let ones = (BigUint::one() << self.es as u64) - 1u8;
                Ok(biguint_to_bitvec(&ones, self.es))
            }
            FloatNum::Real(r) if self.representable(x) => {
                let code = BigUint::from((r.e().unwrap() + self.bias()) as u64);
                Ok(biguint_to_bitvec(&code, self.es))
            }
            _ => Err(Error::NoSuchContext("value is not representable here")),
        }
    }

    fn decode(&self, bv: &BitVec) -> Float {
        assert_eq!(
            bv.len(),
            self.es,
            "expected a BitVec of length {}, received {}",
            self.es,
            bv.len()
        );

        let ctx = Context::Exp(self.clone());
        let code = bitvec_to_biguint(bv);
        let ones = (BigUint::one() << self.es as u64) - 1u8;
        if code == ones {
            Float::nan(false).with_ctx(ctx)
        } else {
            let e = code.to_i64().unwrap_or(0) - self.bias();
            Float::from(RealFloat::power_of_two(e)).with_ctx(ctx)
        }
    }
}
