/*
    Bit-level encoding
*/

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::context::{Context, EncodableContext, RoundingContext, SizedContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::RealFloat;
use crate::util::{pack_fields, unpack_fields, BitVec};

use super::IEEEContext;

impl SizedContext for IEEEContext {
    fn nbits(&self) -> usize {
        self.nbits
    }
}

impl EncodableContext for IEEEContext {
    fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        if !self.representable(x) {
            return Err(Error::NoSuchContext("value is not representable here"));
        }

        let es = self.es;
        let mlen = self.m();
        match &x.num {
            FloatNum::Nan(_) => {
                // canonical quiet NaN: positive, MSB of the mantissa high
                let e = (BigUint::one() << es as u64) - 1u8;
                let m = BigUint::one() << (mlen - 1) as u64;
                Ok(pack_fields(false, &e, es, &m, mlen))
            }
            FloatNum::Infinity(s) => {
                let e = (BigUint::one() << es as u64) - 1u8;
                Ok(pack_fields(*s, &e, es, &BigUint::zero(), mlen))
            }
            FloatNum::Real(r) => {
                if r.is_zero() {
                    return Ok(pack_fields(r.sign(), &BigUint::zero(), es, &BigUint::zero(), mlen));
                }
                // anchor the significand on the format grid
                let g = r.normalize_unchecked(Some(self.pmax()), Some(self.expmin() - 1));
                let c = g.significand();
                let hidden = BigUint::one() << mlen as u64;
                if *c >= hidden {
                    // normal: strip the hidden bit, bias the exponent
                    let e = g.e().unwrap();
                    let biased = BigUint::from((e - self.emin() + 1) as u64);
                    let m = c - &hidden;
                    Ok(pack_fields(g.sign(), &biased, es, &m, mlen))
                } else {
                    // subnormal
                    Ok(pack_fields(g.sign(), &BigUint::zero(), es, c, mlen))
                }
            }
        }
    }

    fn decode(&self, bv: &BitVec) -> Float {
        assert_eq!(
            bv.len(),
            self.nbits,
            "expected a BitVec of length {}, received {}",
            self.nbits,
            bv.len()
        );

        let ctx = Context::Ieee(self.clone());
        let mlen = self.m();
        let (s, e, m) = unpack_fields(bv, self.es, mlen);
        let ones = (BigUint::one() << self.es as u64) - 1u8;

        if e == ones {
            if m.is_zero() {
                Float::infinity(s).with_ctx(ctx)
            } else {
                Float::nan(s).with_ctx(ctx)
            }
        } else if e.is_zero() {
            // subnormal or zero
            Float::from(RealFloat::new(s, self.expmin(), m)).with_ctx(ctx)
        } else {
            // normal: restore the hidden bit
            let biased = e.to_i64().unwrap_or(0);
            let c = m + (BigUint::one() << mlen as u64);
            let exp = (biased - self.bias()) - mlen as i64;
            Float::from(RealFloat::new(s, exp, c)).with_ctx(ctx)
        }
    }
}
