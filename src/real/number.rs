/*
    Constructors and accessors
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};

use super::RealFloat;

impl RealFloat {
    /// Creates the dyadic rational `(-1)^s * c * 2^exp`.
    pub fn new(s: bool, exp: i64, c: BigUint) -> Self {
        Self { s, exp, c }
    }

    /// Returns a (positive) zero.
    pub fn zero() -> Self {
        Self::signed_zero(false)
    }

    /// Returns a zero with a particular sign.
    pub fn signed_zero(s: bool) -> Self {
        Self {
            s,
            exp: 0,
            c: BigUint::zero(),
        }
    }

    /// Returns the value 1.
    pub fn one() -> Self {
        Self {
            s: false,
            exp: 0,
            c: BigUint::one(),
        }
    }

    /// Returns the value `2^e`.
    pub fn power_of_two(e: i64) -> Self {
        Self {
            s: false,
            exp: e,
            c: BigUint::one(),
        }
    }

    /// Returns the sign of this value; `true` means negative.
    pub fn sign(&self) -> bool {
        self.s
    }

    /// Returns the binary exponent, the absolute position of the
    /// least significant bit of the significand.
    pub fn exp(&self) -> i64 {
        self.exp
    }

    /// Returns the unsigned integer significand.
    pub fn significand(&self) -> &BigUint {
        &self.c
    }

    /// Returns the precision of this representation, the number of bits
    /// in the significand.
    pub fn p(&self) -> usize {
        self.c.bits() as usize
    }

    /// Returns the absolute position of the most significant bit, or
    /// `None` for zero.
    pub fn e(&self) -> Option<i64> {
        if self.is_zero() {
            None
        } else {
            Some(self.exp + self.p() as i64 - 1)
        }
    }

    /// Returns the absolute position just below the least significant
    /// bit, `exp - 1`.
    pub fn n(&self) -> i64 {
        self.exp - 1
    }

    /// Returns true if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.c.is_zero()
    }

    /// Returns true if this value is strictly positive.
    pub fn is_positive(&self) -> bool {
        !self.s && !self.is_zero()
    }

    /// Returns true if this value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.s && !self.is_zero()
    }

    /// Returns true if this value is an integer.
    pub fn is_integer(&self) -> bool {
        if self.is_zero() || self.exp >= 0 {
            true
        } else {
            match self.c.trailing_zeros() {
                Some(tz) => tz as i64 + self.exp >= 0,
                None => true,
            }
        }
    }

    /// Returns true if this value is `2^k` for some `k`.
    pub fn is_power_of_two(&self) -> bool {
        !self.s && self.c.count_ones() == 1
    }

    /// Returns the bit of the magnitude at absolute position `k`.
    pub fn bit(&self, k: i64) -> bool {
        if self.is_zero() || k < self.exp {
            false
        } else {
            self.c.bit((k - self.exp) as u64)
        }
    }

    /// Returns true if every bit of this value sits strictly above
    /// absolute position `n`, that is, `exp > n`.
    pub fn is_more_significant(&self, n: i64) -> bool {
        self.exp > n
    }

    /// Returns this value with the given sign.
    pub fn with_sign(mut self, s: bool) -> Self {
        self.s = s;
        self
    }

    // Returns an equal value with no trailing zeros in the significand
    // (zero keeps its sign and is anchored at exponent 0).
    pub(crate) fn canonicalized(&self) -> Self {
        match self.c.trailing_zeros() {
            None => Self::signed_zero(self.s),
            Some(0) => self.clone(),
            Some(tz) => Self {
                s: self.s,
                exp: self.exp + tz as i64,
                c: &self.c >> tz,
            },
        }
    }
}
