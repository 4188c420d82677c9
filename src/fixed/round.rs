/*
    Rounding onto fixed-point grids
*/

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::context::{Context, RoundingContext};
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::real::RealFloat;
use crate::rounding::{OverflowMode, RoundingMode};

use super::{grid_value, int_of_grid, FixedContext, MPBFixedContext, MPFixedContext, SMFixedContext};

// A value is on a fixed-point grid when its bits sit at or above the
// grid exponent.
fn on_grid(r: &RealFloat, scale: i64) -> bool {
    r.is_zero() || r.canonicalized().exp() >= scale
}

impl RoundingContext for FixedContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (None, Some(self.scale - 1))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                if !on_grid(r, self.scale) {
                    return false;
                }
                let k = int_of_grid(r, self.scale);
                let (kmin, kmax) = self.bounds();
                kmin <= k && k <= kmax
            }
            FloatNum::Infinity(_) => self.inf_pattern().is_some(),
            FloatNum::Nan(_) => self.nan_pattern().is_some(),
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl FixedContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        _randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::Fixed(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => {
                // ∞ survives only through a sentinel encoding
                if self.inf_pattern().is_some() {
                    Ok(Float::infinity(*s).with_ctx(ctx))
                } else {
                    Ok(Float::nan(*s).with_ctx(ctx))
                }
            }
            FloatNum::Real(r) => {
                let anchor = min_n.map_or(self.scale - 1, |n| n.max(self.scale - 1));
                let (rounded, inexact) = r.round_exact(None, Some(anchor), self.rm);
                let k = int_of_grid(&rounded, self.scale);
                let (kmin, kmax) = self.bounds();

                if k < kmin || k > kmax {
                    let clamped = match self.overflow {
                        OverflowMode::Saturate => {
                            if k < kmin {
                                kmin
                            } else {
                                kmax
                            }
                        }
                        OverflowMode::Wrap => {
                            let span = BigInt::one() << self.nbits as u64;
                            let mut w = k.mod_floor(&span);
                            if self.signed && w >= (BigInt::one() << (self.nbits - 1) as u64) {
                                w -= span;
                            }
                            w
                        }
                        OverflowMode::Overflow => {
                            let s = k.sign() == num_bigint::Sign::Minus;
                            if self.inf_pattern().is_some() {
                                return Ok(Float::infinity(s).with_ctx(ctx).with_inexact(true));
                            } else if self.nan_pattern().is_some() {
                                return Ok(Float::nan(s).with_ctx(ctx).with_inexact(true));
                            } else {
                                return Err(Error::Overflow);
                            }
                        }
                    };
                    let v = grid_value(&clamped, self.scale);
                    return Ok(Float::from(v).with_ctx(ctx).with_inexact(true));
                }

                // `rounded.sign()` keeps the sign of a zero result
                let v = grid_value(&k, self.scale).with_sign(rounded.sign());
                Ok(Float::from(v).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl RoundingContext for SMFixedContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (None, Some(self.scale - 1))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                on_grid(r, self.scale)
                    && int_of_grid(r, self.scale).magnitude() <= &self.kmax()
            }
            _ => false,
        }
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, None, randbits)
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        self.round_at_impl(x, Some(n), randbits)
    }
}

impl SMFixedContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        _randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::SMFixed(self.clone());
        match &x.num {
            FloatNum::Nan(s) | FloatNum::Infinity(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let anchor = min_n.map_or(self.scale - 1, |n| n.max(self.scale - 1));
                let (rounded, inexact) = r.round_exact(None, Some(anchor), self.rm);
                let k = int_of_grid(&rounded, self.scale);
                let kmax = self.kmax();

                if k.magnitude() > &kmax {
                    let s = rounded.sign();
                    let mag = match self.overflow {
                        OverflowMode::Saturate => kmax,
                        OverflowMode::Wrap => {
                            k.magnitude().mod_floor(&(&kmax + 1u8))
                        }
                        OverflowMode::Overflow => return Err(Error::Overflow),
                    };
                    let v = RealFloat::new(s, self.scale, mag);
                    return Ok(Float::from(v).with_ctx(ctx).with_inexact(true));
                }

                let v = RealFloat::new(rounded.sign(), self.scale, k.magnitude().clone());
                Ok(Float::from(v).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl RoundingContext for MPFixedContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (None, Some(self.nmin))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => on_grid(r, self.scale()),
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

impl MPFixedContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        _randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::MPFixed(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let anchor = min_n.map_or(self.nmin, |n| n.max(self.nmin));
                let (rounded, inexact) = r.round_exact(None, Some(anchor), self.rm);
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}

impl RoundingContext for MPBFixedContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (None, Some(self.nmin))
    }

    fn rm(&self) -> RoundingMode {
        self.rm
    }

    fn representable(&self, x: &Float) -> bool {
        match &x.num {
            FloatNum::Real(r) => {
                on_grid(r, self.nmin + 1)
                    && r.cmp_abs(&self.maxval) != Ordering::Greater
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

impl MPBFixedContext {
    fn round_at_impl(
        &self,
        x: &Float,
        min_n: Option<i64>,
        _randbits: Option<u64>,
    ) -> Result<Float, Error> {
        let ctx = Context::MPBFixed(self.clone());
        match &x.num {
            FloatNum::Nan(s) => Ok(Float::nan(*s).with_ctx(ctx)),
            FloatNum::Infinity(s) => Ok(Float::infinity(*s).with_ctx(ctx)),
            FloatNum::Real(r) => {
                let anchor = min_n.map_or(self.nmin, |n| n.max(self.nmin));
                let (rounded, inexact) = r.round_exact(None, Some(anchor), self.rm);
                if rounded.cmp_abs(&self.maxval) == Ordering::Greater {
                    let s = rounded.sign();
                    let v = match self.overflow {
                        OverflowMode::Overflow if self.rm.overflow_to_infinity(s) => {
                            Float::infinity(s)
                        }
                        _ => Float::from(self.maxval.clone().with_sign(s)),
                    };
                    return Ok(v.with_ctx(ctx).with_inexact(true));
                }
                Ok(Float::from(rounded).with_ctx(ctx).with_inexact(inexact))
            }
        }
    }
}
