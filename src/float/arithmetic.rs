/*
    Exact arithmetic with IEEE special-value rules
*/

use std::ops::{Add, Mul, Neg, Sub};

use crate::real::RealFloat;

use super::{Float, FloatNum};

impl Float {
    fn untagged(num: FloatNum) -> Self {
        Self {
            num,
            ctx: None,
            inexact: false,
        }
    }

    /// Returns this value raised to a non-negative integer power.
    /// Exact; `pow(x, 0)` is 1 for every `x`, including NaN and ±∞.
    pub fn pow(&self, k: u32) -> Float {
        if k == 0 {
            return Float::from(RealFloat::one());
        }
        match &self.num {
            FloatNum::Nan(s) => Float::nan(*s),
            FloatNum::Infinity(s) => Float::infinity(*s && k % 2 == 1),
            FloatNum::Real(r) => Float::from(r.pow(k)),
        }
    }
}

impl Neg for &Float {
    type Output = Float;

    // IEEE negate: a sign-bit operation, defined on every value.
    fn neg(self) -> Float {
        let num = match &self.num {
            FloatNum::Nan(s) => FloatNum::Nan(!s),
            FloatNum::Infinity(s) => FloatNum::Infinity(!s),
            FloatNum::Real(r) => FloatNum::Real(-r),
        };
        Float::untagged(num)
    }
}

impl Neg for Float {
    type Output = Float;

    fn neg(self) -> Float {
        -&self
    }
}

impl Add for &Float {
    type Output = Float;

    fn add(self, other: &Float) -> Float {
        match (&self.num, &other.num) {
            (FloatNum::Nan(s), _) => Float::nan(*s),
            (_, FloatNum::Nan(s)) => Float::nan(*s),
            (FloatNum::Infinity(s1), FloatNum::Infinity(s2)) => {
                if s1 == s2 {
                    Float::infinity(*s1)
                } else {
                    // ∞ − ∞
                    Float::nan(false)
                }
            }
            (FloatNum::Infinity(s), _) => Float::infinity(*s),
            (_, FloatNum::Infinity(s)) => Float::infinity(*s),
            (FloatNum::Real(a), FloatNum::Real(b)) => Float::from(a + b),
        }
    }
}

impl Add for Float {
    type Output = Float;

    fn add(self, other: Float) -> Float {
        &self + &other
    }
}

impl Sub for &Float {
    type Output = Float;

    fn sub(self, other: &Float) -> Float {
        self + &(-other)
    }
}

impl Sub for Float {
    type Output = Float;

    fn sub(self, other: Float) -> Float {
        &self - &other
    }
}

impl Mul for &Float {
    type Output = Float;

    fn mul(self, other: &Float) -> Float {
        match (&self.num, &other.num) {
            (FloatNum::Nan(s), _) => Float::nan(*s),
            (_, FloatNum::Nan(s)) => Float::nan(*s),
            (FloatNum::Infinity(s1), FloatNum::Infinity(s2)) => Float::infinity(s1 != s2),
            (FloatNum::Infinity(s1), FloatNum::Real(r)) => {
                if r.is_zero() {
                    // 0 × ∞
                    Float::nan(false)
                } else {
                    Float::infinity(*s1 != r.sign())
                }
            }
            (FloatNum::Real(r), FloatNum::Infinity(s2)) => {
                if r.is_zero() {
                    Float::nan(false)
                } else {
                    Float::infinity(r.sign() != *s2)
                }
            }
            (FloatNum::Real(a), FloatNum::Real(b)) => Float::from(a * b),
        }
    }
}

impl Mul for Float {
    type Output = Float;

    fn mul(self, other: Float) -> Float {
        &self * &other
    }
}
