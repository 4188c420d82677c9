/*
    Constructors and accessors
*/

use num_bigint::BigUint;

use crate::context::Context;
use crate::real::RealFloat;

use super::{Float, FloatNum};

impl Float {
    /// Returns a NaN with a particular sign.
    pub fn nan(sign: bool) -> Self {
        Self {
            num: FloatNum::Nan(sign),
            ctx: None,
            inexact: false,
        }
    }

    /// Returns an infinity with a particular sign.
    pub fn infinity(sign: bool) -> Self {
        Self {
            num: FloatNum::Infinity(sign),
            ctx: None,
            inexact: false,
        }
    }

    /// Returns a zero with a particular sign.
    pub fn zero(sign: bool) -> Self {
        Self {
            num: FloatNum::Real(RealFloat::signed_zero(sign)),
            ctx: None,
            inexact: false,
        }
    }

    /// Returns the sign of this value; `true` means negative.
    /// NaN signs are representational only and never affect equality.
    pub fn sign(&self) -> bool {
        match &self.num {
            FloatNum::Real(r) => r.sign(),
            FloatNum::Infinity(s) => *s,
            FloatNum::Nan(s) => *s,
        }
    }

    /// Returns the finite value underneath, if there is one.
    pub fn real(&self) -> Option<&RealFloat> {
        match &self.num {
            FloatNum::Real(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the binary exponent of a finite value.
    pub fn exponent(&self) -> Option<i64> {
        self.real().map(|r| r.exp())
    }

    /// Returns the integer significand of a finite value.
    pub fn significand(&self) -> Option<&BigUint> {
        self.real().map(|r| r.significand())
    }

    /// Returns true if this `Float` encodes a NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self.num, FloatNum::Nan(_))
    }

    /// Returns true if this `Float` encodes an infinity.
    pub fn is_infinity(&self) -> bool {
        matches!(self.num, FloatNum::Infinity(_))
    }

    /// Returns true if this `Float` is NaN or ±∞ (not a real).
    pub fn is_nar(&self) -> bool {
        !matches!(self.num, FloatNum::Real(_))
    }

    /// Returns true if this `Float` encodes a finite value.
    pub fn is_finite(&self) -> bool {
        matches!(self.num, FloatNum::Real(_))
    }

    /// Returns true if this `Float` encodes a zero.
    pub fn is_zero(&self) -> bool {
        matches!(&self.num, FloatNum::Real(r) if r.is_zero())
    }

    /// Returns true if this value is strictly negative (−∞ included,
    /// −0 and NaN excluded).
    pub fn is_negative(&self) -> bool {
        match &self.num {
            FloatNum::Real(r) => r.is_negative(),
            FloatNum::Infinity(s) => *s,
            FloatNum::Nan(_) => false,
        }
    }

    /// Returns true if this value is strictly positive (+∞ included,
    /// +0 and NaN excluded).
    pub fn is_positive(&self) -> bool {
        match &self.num {
            FloatNum::Real(r) => r.is_positive(),
            FloatNum::Infinity(s) => !*s,
            FloatNum::Nan(_) => false,
        }
    }

    /// Returns the context that produced this value, if any.
    pub fn ctx(&self) -> Option<&Context> {
        self.ctx.as_ref()
    }

    /// Returns true if the rounding that produced this value discarded
    /// nonzero bits.
    pub fn inexact(&self) -> bool {
        self.inexact
    }

    /// Returns an equal value whose finite representation satisfies the
    /// requested form (see [`RealFloat::normalize`]); non-finite values
    /// and zeros pass through, zeros canonicalized onto the grid.
    pub fn normalize(
        &self,
        p: Option<usize>,
        n: Option<i64>,
    ) -> Result<Self, crate::error::Error> {
        match &self.num {
            FloatNum::Real(r) => Ok(Float::from(r.normalize(p, n)?)),
            _ => Ok(self.clone().without_ctx().with_inexact(false)),
        }
    }

    /// Tags this value with a context.
    pub fn with_ctx(mut self, ctx: Context) -> Self {
        self.ctx = Some(ctx);
        self
    }

    /// Drops the context tag.
    pub fn without_ctx(mut self) -> Self {
        self.ctx = None;
        self
    }

    pub(crate) fn with_inexact(mut self, inexact: bool) -> Self {
        self.inexact = inexact;
        self
    }
}

impl Default for Float {
    fn default() -> Self {
        Self::zero(false)
    }
}
