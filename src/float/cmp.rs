/*
    IEEE comparison and hashable keys
*/

use std::cmp::Ordering;

use num_bigint::BigUint;

use crate::real::RealFloat;

use super::{Float, FloatNum};

impl Float {
    /// IEEE ordering: `None` whenever a NaN is involved, the numeric
    /// order otherwise (signed zeros compare equal, ±∞ at the ends).
    pub fn ieee_cmp(&self, other: &Float) -> Option<Ordering> {
        match (&self.num, &other.num) {
            (FloatNum::Nan(_), _) | (_, FloatNum::Nan(_)) => None,
            (FloatNum::Infinity(s1), FloatNum::Infinity(s2)) => match (s1, s2) {
                (true, true) | (false, false) => Some(Ordering::Equal),
                (true, false) => Some(Ordering::Less),
                (false, true) => Some(Ordering::Greater),
            },
            (FloatNum::Infinity(s), _) => {
                if *s {
                    Some(Ordering::Less)
                } else {
                    Some(Ordering::Greater)
                }
            }
            (_, FloatNum::Infinity(s)) => {
                if *s {
                    Some(Ordering::Greater)
                } else {
                    Some(Ordering::Less)
                }
            }
            (FloatNum::Real(a), FloatNum::Real(b)) => Some(a.cmp(b)),
        }
    }

    /// Returns a hashable key for this value.
    ///
    /// IEEE equality cannot back a hash map (NaN is not equal to
    /// itself), so the key canonicalizes instead: every NaN collapses
    /// to one representative and signed zeros are unified.
    pub fn key(&self) -> FloatKey {
        match &self.num {
            FloatNum::Nan(_) => FloatKey::Nan,
            FloatNum::Infinity(s) => FloatKey::Infinity(*s),
            FloatNum::Real(r) => {
                let canon = r.canonicalized();
                if canon.is_zero() {
                    FloatKey::Finite {
                        s: false,
                        exp: 0,
                        c: BigUint::default(),
                    }
                } else {
                    FloatKey::Finite {
                        s: canon.sign(),
                        exp: canon.exp(),
                        c: canon.significand().clone(),
                    }
                }
            }
        }
    }
}

/// Canonical hash key for a [`Float`]: NaNs collapse to a single
/// representative and signed zeros are unified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FloatKey {
    Nan,
    Infinity(bool),
    Finite { s: bool, exp: i64, c: BigUint },
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        self.ieee_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.ieee_cmp(other)
    }
}

impl PartialEq<RealFloat> for Float {
    fn eq(&self, other: &RealFloat) -> bool {
        matches!(&self.num, FloatNum::Real(r) if r == other)
    }
}

impl PartialOrd<RealFloat> for Float {
    fn partial_cmp(&self, other: &RealFloat) -> Option<Ordering> {
        match &self.num {
            FloatNum::Nan(_) => None,
            FloatNum::Infinity(s) => {
                if *s {
                    Some(Ordering::Less)
                } else {
                    Some(Ordering::Greater)
                }
            }
            FloatNum::Real(r) => Some(r.cmp(other)),
        }
    }
}

impl PartialEq<f64> for Float {
    fn eq(&self, other: &f64) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for Float {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.ieee_cmp(&Float::from(*other))
    }
}

impl PartialEq<i64> for Float {
    fn eq(&self, other: &i64) -> bool {
        matches!(&self.num, FloatNum::Real(r) if *r == *other)
    }
}

impl PartialOrd<i64> for Float {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        self.partial_cmp(&RealFloat::from(*other))
    }
}
