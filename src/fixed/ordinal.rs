/*
    Ordinal maps for fixed-point grids
*/

use num_bigint::BigInt;

use crate::context::{Context, OrdinalContext, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::RealFloat;

use super::{grid_value, int_of_grid, FixedContext, MPBFixedContext, MPFixedContext, SMFixedContext};

// On a fixed-point grid the ordinal of a value is just its integer part
// in grid units.

impl OrdinalContext for FixedContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) if self.representable(x) => {
                Ok(int_of_grid(r, self.scale()))
            }
            FloatNum::Real(_) => Err(Error::NoSuchContext("value is not representable here")),
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let (kmin, kmax) = self.bounds();
        if *i < kmin || *i > kmax {
            return Err(Error::Overflow);
        }
        Ok(Float::from(grid_value(i, self.scale())).with_ctx(Context::Fixed(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.scale()))
    }

    fn maxval(&self) -> Option<Float> {
        let (_, kmax) = self.bounds();
        Some(Float::from(grid_value(&kmax, self.scale())))
    }
}

impl OrdinalContext for SMFixedContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) if self.representable(x) => {
                Ok(int_of_grid(r, self.scale()))
            }
            FloatNum::Real(_) => Err(Error::NoSuchContext("value is not representable here")),
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        if i.magnitude() > &self.kmax() {
            return Err(Error::Overflow);
        }
        Ok(Float::from(grid_value(i, self.scale())).with_ctx(Context::SMFixed(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.scale()))
    }

    fn maxval(&self) -> Option<Float> {
        let v = RealFloat::new(false, self.scale(), self.kmax());
        Some(Float::from(v))
    }
}

impl OrdinalContext for MPFixedContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) if self.representable(x) => {
                Ok(int_of_grid(r, self.scale()))
            }
            FloatNum::Real(_) => Err(Error::NoSuchContext("value is not representable here")),
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        Ok(Float::from(grid_value(i, self.scale())).with_ctx(Context::MPFixed(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.scale()))
    }

    fn maxval(&self) -> Option<Float> {
        None
    }
}

impl OrdinalContext for MPBFixedContext {
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        match &x.num {
            FloatNum::Real(r) if self.representable(x) => {
                Ok(int_of_grid(r, self.nmin() + 1))
            }
            FloatNum::Real(_) => Err(Error::NoSuchContext("value is not representable here")),
            _ => Err(Error::NotFinite),
        }
    }

    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        let v = grid_value(i, self.nmin() + 1);
        if v.cmp_abs(&self.maxval) == std::cmp::Ordering::Greater {
            return Err(Error::Overflow);
        }
        Ok(Float::from(v).with_ctx(Context::MPBFixed(self.clone())))
    }

    fn minval(&self) -> Float {
        Float::from(RealFloat::power_of_two(self.nmin() + 1))
    }

    fn maxval(&self) -> Option<Float> {
        Some(Float::from(self.maxval.clone()))
    }
}
