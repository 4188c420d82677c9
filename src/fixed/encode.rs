/*
    Bit-level encodings for fixed-point formats
*/

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::context::{Context, EncodableContext, RoundingContext, SizedContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::RealFloat;
use crate::util::{bitvec_to_biguint, biguint_to_bitvec, BitVec};

use super::{grid_value, int_of_grid, FixedContext, SMFixedContext};

impl SizedContext for FixedContext {
    fn nbits(&self) -> usize {
        self.nbits
    }
}

impl EncodableContext for FixedContext {
    fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        match &x.num {
            FloatNum::Nan(_) => match self.nan_pattern() {
                Some(p) => Ok(biguint_to_bitvec(p, self.nbits)),
                None => Err(Error::NoSuchContext("format has no NaN encoding")),
            },
            FloatNum::Infinity(_) => match self.inf_pattern() {
                Some(p) => Ok(biguint_to_bitvec(p, self.nbits)),
                None => Err(Error::NoSuchContext("format has no infinity encoding")),
            },
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                // two's complement over `nbits`
                let k = int_of_grid(r, self.scale());
                let span = BigInt::one() << self.nbits as u64;
                let pattern = k.mod_floor(&span);
                Ok(biguint_to_bitvec(pattern.magnitude(), self.nbits))
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

        let ctx = Context::Fixed(self.clone());
        let pattern = bitvec_to_biguint(bv);
        if Some(&pattern) == self.nan_pattern() {
            return Float::nan(false).with_ctx(ctx);
        }
        if Some(&pattern) == self.inf_pattern() {
            return Float::infinity(false).with_ctx(ctx);
        }
        let k = self.pattern_to_int(&pattern);
        Float::from(grid_value(&k, self.scale())).with_ctx(ctx)
    }
}

impl SizedContext for SMFixedContext {
    fn nbits(&self) -> usize {
        self.nbits
    }
}

impl EncodableContext for SMFixedContext {
    fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        match &x.num {
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                // top bit is the sign, the rest the magnitude
                let k = int_of_grid(r, self.scale());
                let mut bv = biguint_to_bitvec(k.magnitude(), self.nbits);
                bv.set(self.nbits - 1, r.sign());
                Ok(bv)
            }
            _ => Err(Error::NoSuchContext("format has no NaN or infinity encoding")),
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

        let ctx = Context::SMFixed(self.clone());
        let s = bv[self.nbits - 1];
        let mag = bitvec_to_biguint(&BitVec::from(&bv[..self.nbits - 1]));
        Float::from(RealFloat::new(s, self.scale(), mag)).with_ctx(ctx)
    }
}
