/*
    Exact arithmetic
*/

use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, Sign};

use super::RealFloat;

// Signed view of a magnitude.
fn to_bigint(s: bool, c: &num_bigint::BigUint) -> BigInt {
    let sign = if c.bits() == 0 {
        Sign::NoSign
    } else if s {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, c.clone())
}

impl RealFloat {
    /// Returns the magnitude of this value.
    pub fn abs(&self) -> RealFloat {
        let mut r = self.clone();
        r.s = false;
        r
    }

    /// Returns this value scaled by `2^k`. The operation is exact.
    pub fn scale(&self, k: i64) -> RealFloat {
        let mut r = self.clone();
        r.exp += k;
        r
    }

    /// Returns this value raised to a non-negative integer power.
    /// The operation is exact.
    pub fn pow(&self, k: u32) -> RealFloat {
        if k == 0 {
            return RealFloat::one();
        }
        RealFloat {
            s: self.s && k % 2 == 1,
            exp: self.exp * k as i64,
            c: self.c.pow(k),
        }
    }
}

impl Neg for &RealFloat {
    type Output = RealFloat;

    fn neg(self) -> RealFloat {
        let mut r = self.clone();
        r.s = !r.s;
        r
    }
}

impl Neg for RealFloat {
    type Output = RealFloat;

    fn neg(self) -> RealFloat {
        -&self
    }
}

impl Add for &RealFloat {
    type Output = RealFloat;

    fn add(self, other: &RealFloat) -> RealFloat {
        if self.is_zero() {
            return other.clone();
        } else if other.is_zero() {
            return self.clone();
        }

        // align the addends at the smaller exponent
        let exp = self.exp.min(other.exp);
        let a = to_bigint(self.s, &self.c) << (self.exp - exp) as u64;
        let b = to_bigint(other.s, &other.c) << (other.exp - exp) as u64;
        let v = a + b;

        // exact cancellation produces a positive zero; operations that
        // must honor a rounding mode's zero sign fix it up themselves
        RealFloat {
            s: v.sign() == Sign::Minus,
            exp,
            c: v.magnitude().clone(),
        }
    }
}

impl Add for RealFloat {
    type Output = RealFloat;

    fn add(self, other: RealFloat) -> RealFloat {
        &self + &other
    }
}

impl Sub for &RealFloat {
    type Output = RealFloat;

    fn sub(self, other: &RealFloat) -> RealFloat {
        self + &(-other)
    }
}

impl Sub for RealFloat {
    type Output = RealFloat;

    fn sub(self, other: RealFloat) -> RealFloat {
        &self - &other
    }
}

impl Mul for &RealFloat {
    type Output = RealFloat;

    fn mul(self, other: &RealFloat) -> RealFloat {
        // the sign of a zero product still follows the xor rule
        RealFloat {
            s: self.s != other.s,
            exp: self.exp + other.exp,
            c: &self.c * &other.c,
        }
    }
}

impl Mul for RealFloat {
    type Output = RealFloat;

    fn mul(self, other: RealFloat) -> RealFloat {
        &self * &other
    }
}
