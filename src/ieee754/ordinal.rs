/*
    Ordinal map
*/

use num_bigint::{BigInt, Sign};

use crate::context::{Context, OrdinalContext, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::mp::{from_mag_ordinal, to_mag_ordinal, to_signed_ordinal};
use crate::real::RealFloat;

use super::IEEEContext;

impl OrdinalContext for IEEEContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) => {
                if !self.representable(x) {
                    return Err(Error::NoSuchContext("value is not representable here"));
                }
                Ok(to_signed_ordinal(self.pmax(), self.expmin(), r))
            }
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let max_ord = to_mag_ordinal(self.pmax(), self.expmin(), &self.max_real());
        if i.magnitude() > &max_ord {
            return Err(Error::Overflow);
        }
        let mag = from_mag_ordinal(self.pmax(), self.expmin(), i.magnitude())
            .ok_or(Error::Overflow)?;
        let r = mag.with_sign(i.sign() == Sign::Minus);
        Ok(Float::from(r).with_ctx(Context::Ieee(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.expmin()))
    }

    fn maxval(&self) -> Option<Float> {
        Some(Float::from(self.max_real()))
    }
}
