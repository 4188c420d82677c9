/*
    Conversions to and from `Float`
*/

use num_bigint::{BigInt, Sign};
use rug::Rational;

use crate::error::Error;
use crate::real::RealFloat;

use super::{Float, FloatNum};

impl From<RealFloat> for Float {
    fn from(r: RealFloat) -> Self {
        Self {
            num: FloatNum::Real(r),
            ctx: None,
            inexact: false,
        }
    }
}

impl From<&RealFloat> for Float {
    fn from(r: &RealFloat) -> Self {
        Float::from(r.clone())
    }
}

impl From<&Float> for Float {
    fn from(x: &Float) -> Self {
        x.clone()
    }
}

// Total: NaN and infinities become their tagged counterparts.
impl From<f64> for Float {
    fn from(f: f64) -> Self {
        if f.is_nan() {
            Float::nan(f.is_sign_negative())
        } else if f.is_infinite() {
            Float::infinity(f.is_sign_negative())
        } else {
            match RealFloat::try_from(f) {
                Ok(r) => Float::from(r),
                Err(_) => Float::nan(false),
            }
        }
    }
}

impl From<f32> for Float {
    fn from(f: f32) -> Self {
        Float::from(f as f64)
    }
}

macro_rules! impl_from_prim {
    ($($t:ty)*) => {
        $(
            impl From<$t> for Float {
                fn from(i: $t) -> Self {
                    Float::from(RealFloat::from(i))
                }
            }
        )*
    };
}

impl_from_prim! { i8 i16 i32 i64 u8 u16 u32 u64 }

impl TryFrom<&Rational> for Float {
    type Error = Error;

    fn try_from(q: &Rational) -> Result<Self, Error> {
        Ok(Float::from(RealFloat::try_from(q)?))
    }
}

impl Float {
    /// Truncates this value toward zero to an integer.
    /// Fails with [`Error::NotFinite`] on NaN or ±∞.
    pub fn to_integer(&self) -> Result<BigInt, Error> {
        match &self.num {
            FloatNum::Real(r) => {
                let t = r.round(None, Some(-1), crate::rounding::RoundingMode::ToZero);
                if t.is_zero() {
                    return Ok(BigInt::default());
                }
                let mag = t.significand() << t.exp() as u64;
                let sign = if t.sign() { Sign::Minus } else { Sign::Plus };
                Ok(BigInt::from_biguint(sign, mag))
            }
            _ => Err(Error::NotFinite),
        }
    }

    /// Rounds this value to the nearest IEEE double.
    pub fn to_f64(&self) -> f64 {
        match &self.num {
            FloatNum::Nan(_) => f64::NAN,
            FloatNum::Infinity(s) => {
                if *s {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }
            FloatNum::Real(r) => r.to_f64(),
        }
    }

    /// Returns this value as an exact rational.
    /// Fails with [`Error::NotFinite`] on NaN or ±∞.
    pub fn as_rational(&self) -> Result<Rational, Error> {
        match &self.num {
            FloatNum::Real(r) => Ok(r.to_rational()),
            _ => Err(Error::NotFinite),
        }
    }
}
