/*
    Bit-level encoding for extended small-float formats
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::context::{Context, EncodableContext, RoundingContext, SizedContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::util::{bitvec_to_biguint, biguint_to_bitvec, BitVec};

use super::{ExtFloatContext, NanKind};

impl ExtFloatContext {
    // Magnitude code of a finite representable value.
    fn mag_code(&self, r: &crate::real::RealFloat) -> BigUint {
        if r.is_zero() {
            return BigUint::zero();
        }
        let mlen = self.m() as u64;
        let g = r.normalize_unchecked(Some(self.pmax()), Some(self.expmin() - 1));
        let c = g.significand();
        let hidden = BigUint::one() << mlen;
        if *c >= hidden {
            let biased = BigUint::from((g.e().unwrap() + self.bias()) as u64);
            (biased << mlen) + (c - &hidden)
        } else {
            c.clone()
        }
    }

    // Canonical NaN pattern, as an (sign, magnitude-code) pair.
    fn nan_code(&self) -> Result<(bool, BigUint), Error> {
        match self.nan_kind() {
            NanKind::Ieee754 => {
                // sign 0, exponent all-ones, mantissa MSB high
                let mlen = self.m() as u64;
                let ones = (BigUint::one() << self.es() as u64) - 1u8;
                Ok((false, (ones << mlen) + (BigUint::one() << (mlen - 1))))
            }
            NanKind::MaxVal => Ok((false, self.top_mag_code())),
            NanKind::NegZero => Ok((true, BigUint::zero())),
            NanKind::None => Err(Error::NoSuchContext("format has no NaN encoding")),
        }
    }

    // Infinity magnitude code.
    fn inf_code(&self) -> Result<BigUint, Error> {
        if !self.has_inf() {
            return Err(Error::NoSuchContext("format has no infinity encoding"));
        }
        match self.nan_kind() {
            NanKind::Ieee754 => {
                let ones = (BigUint::one() << self.es() as u64) - 1u8;
                Ok(ones << self.m() as u64)
            }
            NanKind::MaxVal => Ok(self.top_mag_code() - 1u8),
            NanKind::NegZero | NanKind::None => Ok(self.top_mag_code()),
        }
    }

    fn pack(&self, s: bool, mag: &BigUint) -> BitVec {
        let mut bv = biguint_to_bitvec(mag, self.nbits);
        bv.set(self.nbits - 1, s);
        bv
    }
}

impl SizedContext for ExtFloatContext {
    fn nbits(&self) -> usize {
        self.nbits
    }
}

impl EncodableContext for ExtFloatContext {
    fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        match &x.num {
            FloatNum::Nan(_) => {
                let (s, code) = self.nan_code()?;
                Ok(self.pack(s, &code))
            }
            FloatNum::Infinity(s) => {
                let code = self.inf_code()?;
                Ok(self.pack(*s, &code))
            }
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                Ok(self.pack(r.sign(), &self.mag_code(r)))
            }
        }
    }

    fn decode(&self, bv: &BitVec) -> Float {
        assert_eq!(
            bv.len(),
            self.nbits(),
            "expected a BitVec of length {}, received {}",
            self.nbits(),
            bv.len()
        );

        let ctx = Context::ExtFloat(self.clone());
        let s = bv[self.nbits() - 1];
        let mag = bitvec_to_biguint(&BitVec::from(&bv[..self.nbits() - 1]));

        match self.nan_kind() {
            NanKind::NegZero if s && mag.is_zero() => {
                return Float::nan(false).with_ctx(ctx);
            }
            NanKind::MaxVal if mag == self.top_mag_code() => {
                return Float::nan(s).with_ctx(ctx);
            }
            NanKind::Ieee754 => {
                let mlen = self.m() as u64;
                let ones = (BigUint::one() << self.es() as u64) - 1u8;
                if (&mag >> mlen) == ones {
                    let m = &mag - (ones << mlen);
                    return if m.is_zero() && self.has_inf() {
                        Float::infinity(s).with_ctx(ctx)
                    } else {
                        Float::nan(s).with_ctx(ctx)
                    };
                }
            }
            _ => {}
        }

        if self.has_inf() {
            if let Ok(code) = self.inf_code() {
                if mag == code {
                    return Float::infinity(s).with_ctx(ctx);
                }
            }
        }

        Float::from(self.mag_value(&mag).with_sign(s)).with_ctx(ctx)
    }
}
