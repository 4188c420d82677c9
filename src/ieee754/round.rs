/*
    Rounding into an IEEE-754-style format
*/

use std::cmp::Ordering;

use crate::context::{Context, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::rounding::{OverflowMode, RoundingMode};

use super::IEEEContext;

impl RoundingContext for IEEEContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (Some(self.pmax()), Some(self.expmin() - 1))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn num_randbits(&self) -> u32 {
        self.num_randbits
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                if r.is_zero() {
                    return true;
                }
                let canon = r.canonicalized();
                canon.p() <= self.pmax()
                    && canon.exp() >= self.expmin()
                    && canon.e().unwrap() <= self.emax()
            }
            _ => true,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl IEEEContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::Ieee(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let (rounded, inexact) = self.as_mps().round_finite(r, min_n, randbits);
                if rounded.cmp_abs(&self.max_real()) == Ordering::Greater {
                    // the rounded exponent exceeds emax
                    let s = rounded.sign();
                    let v = match self.overflow {
                        OverflowMode::Overflow if self.rm.overflow_to_infinity(s) => {
                            Float::infinity(s)
                        }
                        _ => Float::from(self.max_real().with_sign(s)),
                    };
                    return Ok(v.with_ctx(ctx).with_inexact(true));
                }
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}
