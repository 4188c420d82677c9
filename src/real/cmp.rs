/*
    Value comparison and hashing
*/

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::RealFloat;

impl RealFloat {
    /// Compares the magnitudes of two values.
    pub fn cmp_abs(&self, other: &RealFloat) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => {
                // nonzero magnitudes order by MSB position first
                let ea = self.e().unwrap();
                let eb = other.e().unwrap();
                if ea != eb {
                    return ea.cmp(&eb);
                }
                // equal MSB: align the significands
                let shift = self.exp - other.exp;
                if shift >= 0 {
                    (&self.c << shift as u64).cmp(&other.c)
                } else {
                    self.c.cmp(&(&other.c << (-shift) as u64))
                }
            }
        }
    }
}

impl PartialEq for RealFloat {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RealFloat {}

impl PartialOrd for RealFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        // signed zeros are equal as rationals
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }
        match (self.is_negative(), other.is_negative()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

// Value-based hash: equal rationals hash equally, so the hash runs
// over the canonical representation with zero sign unified.
impl Hash for RealFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let canon = self.canonicalized();
        if canon.is_zero() {
            false.hash(state);
            0i64.hash(state);
        } else {
            canon.s.hash(state);
            canon.exp.hash(state);
        }
        canon.c.hash(state);
    }
}

impl PartialEq<i64> for RealFloat {
    fn eq(&self, other: &i64) -> bool {
        *self == RealFloat::from(*other)
    }
}

impl PartialOrd<i64> for RealFloat {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp(&RealFloat::from(*other)))
    }
}

impl PartialEq<f64> for RealFloat {
    fn eq(&self, other: &f64) -> bool {
        match RealFloat::try_from(*other) {
            Ok(r) => *self == r,
            Err(_) => false,
        }
    }
}

impl PartialOrd<f64> for RealFloat {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        if other.is_nan() {
            None
        } else if other.is_infinite() {
            if *other > 0.0 {
                Some(Ordering::Less)
            } else {
                Some(Ordering::Greater)
            }
        } else {
            match RealFloat::try_from(*other) {
                Ok(r) => Some(self.cmp(&r)),
                Err(_) => None,
            }
        }
    }
}

impl PartialEq<rug::Rational> for RealFloat {
    fn eq(&self, other: &rug::Rational) -> bool {
        self.to_rational() == *other
    }
}

impl PartialOrd<rug::Rational> for RealFloat {
    fn partial_cmp(&self, other: &rug::Rational) -> Option<Ordering> {
        Some(self.to_rational().cmp(other))
    }
}
