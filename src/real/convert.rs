/*
    Conversions to and from `RealFloat`
*/

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rug::{Integer, Rational};

use crate::error::Error;
use crate::mpfr::{biguint_to_integer, integer_to_biguint};
use crate::rounding::RoundingMode;

use super::RealFloat;

macro_rules! impl_from_int {
    ($($t:ty)*) => {
        $(
            impl From<$t> for RealFloat {
                fn from(i: $t) -> Self {
                    let neg = i < 0;
                    let mag = i.unsigned_abs();
                    RealFloat::new(neg, 0, BigUint::from(mag))
                }
            }
        )*
    };
}

macro_rules! impl_from_uint {
    ($($t:ty)*) => {
        $(
            impl From<$t> for RealFloat {
                fn from(i: $t) -> Self {
                    RealFloat::new(false, 0, BigUint::from(i))
                }
            }
        )*
    };
}

impl_from_int! { i8 i16 i32 i64 }
impl_from_uint! { u8 u16 u32 u64 }

// Exact decomposition of an IEEE double; NaN and infinities have no
// dyadic value.
impl TryFrom<f64> for RealFloat {
    type Error = Error;

    fn try_from(f: f64) -> Result<Self, Error> {
        let b = f.to_bits();
        let s = (b >> 63) == 1;
        let efield = (b >> 52) & 0x7ff;
        let frac = b & ((1u64 << 52) - 1);

        if efield == 0x7ff {
            Err(Error::NotFinite)
        } else if efield == 0 {
            if frac == 0 {
                Ok(RealFloat::signed_zero(s))
            } else {
                Ok(RealFloat::new(s, -1074, BigUint::from(frac)))
            }
        } else {
            let c = frac | (1u64 << 52);
            Ok(RealFloat::new(s, efield as i64 - 1075, BigUint::from(c)))
        }
    }
}

impl RealFloat {
    /// Rounds this value to the nearest IEEE double (ties to even).
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return if self.s { -0.0 } else { 0.0 };
        }

        let r = self.round(Some(53), Some(-1075), RoundingMode::NearestEven);
        if r.is_zero() {
            return if self.s { -0.0 } else { 0.0 };
        }
        if r.e().unwrap() > 1023 {
            return if self.s {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            };
        }

        // canonical double layout: 53 bits anchored no lower than 2^-1074
        let r = r.normalize_unchecked(Some(53), Some(-1075));
        let c = r.c.to_u64().unwrap_or(0);
        let sign = (self.s as u64) << 63;
        let bits = if c >= (1u64 << 52) {
            // normal
            let biased = (r.exp + 1075) as u64;
            sign | (biased << 52) | (c & ((1u64 << 52) - 1))
        } else {
            // subnormal
            sign | c
        };
        f64::from_bits(bits)
    }

    /// Returns this value as an exact rational.
    pub fn to_rational(&self) -> Rational {
        let mut int = biguint_to_integer(&self.c);
        if self.s {
            int = -int;
        }
        if self.exp >= 0 {
            Rational::from(int << self.exp as u32)
        } else {
            Rational::from((int, Integer::from(1) << (-self.exp) as u32))
        }
    }

    // Round-to-odd lift of a nonzero rational at roughly `prec + 2`
    // significant bits: the quotient is truncated and the low bit is
    // forced high when any remainder was discarded. A later rounding at
    // `prec` or fewer bits under any mode is then correct.
    pub(crate) fn from_rational_rto(q: &Rational, prec: usize) -> RealFloat {
        debug_assert!(q.cmp0() != std::cmp::Ordering::Equal);
        let s = q.cmp0() == std::cmp::Ordering::Less;
        let num = Integer::from(q.numer().abs_ref());
        let den = q.denom();

        let e_num = num.significant_bits() as i64;
        let e_den = den.significant_bits() as i64;
        let shift = prec as i64 + 2 - (e_num - e_den);

        let (scaled_num, scaled_den) = if shift >= 0 {
            (num << shift as u32, den.clone())
        } else {
            (num, den.clone() << (-shift) as u32)
        };

        let (quot, rem) = scaled_num.div_rem(scaled_den);
        let mut c = integer_to_biguint(&quot);
        if rem != 0 {
            c.set_bit(0, true);
        }
        RealFloat::new(s, -shift, c)
    }
}

// Exact lift; fails unless the denominator is a power of two.
impl TryFrom<&Rational> for RealFloat {
    type Error = Error;

    fn try_from(q: &Rational) -> Result<Self, Error> {
        let den = q.denom();
        if den.count_ones() != Some(1) {
            return Err(Error::NonDyadic);
        }
        let exp = -(den.significant_bits() as i64 - 1);
        let s = q.cmp0() == std::cmp::Ordering::Less;
        let c = integer_to_biguint(&Integer::from(q.numer().abs_ref()));
        Ok(RealFloat::new(s, exp, c))
    }
}

impl TryFrom<Rational> for RealFloat {
    type Error = Error;

    fn try_from(q: Rational) -> Result<Self, Error> {
        RealFloat::try_from(&q)
    }
}
