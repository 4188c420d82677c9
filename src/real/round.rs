/*
    Splitting, normalization, and the rounding kernel
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::Error;
use crate::rounding::{RoundingDirection, RoundingMode};

use super::RealFloat;

// Returns true if the rounding information implies the magnitude,
// viewed as an integer, should be incremented by 1.
//
//  `sign`: sign of the unrounded value
//  `lsb`: lowest kept bit of the truncated magnitude
//  `half_bit`: the unrounded value is at least half way to the next
//      representable value
//  `sticky_bit`: some discarded bit below the half bit is high
pub(crate) fn round_requires_increment(
    sign: bool,
    lsb: bool,
    half_bit: bool,
    sticky_bit: bool,
    rm: RoundingMode,
) -> bool {
    match rm.direction(sign) {
        (true, RoundingDirection::ToEven) => {
            // no half bit => truncate
            // half bit and sticky bit => increment
            // tie => increment if lsb since we want it to be 0
            half_bit && (sticky_bit || lsb)
        }
        (true, RoundingDirection::AwayZero) => {
            // no half bit => truncate
            // half bit => increment (tie requires increment)
            half_bit
        }
        (true, RoundingDirection::ToZero) => {
            // (unused)
            // tie => truncate
            half_bit && sticky_bit
        }
        (true, RoundingDirection::ToOdd) => {
            // (unused)
            // tie => increment if even
            half_bit && !lsb
        }
        (false, RoundingDirection::AwayZero) => {
            // increment if not exact
            half_bit || sticky_bit
        }
        (false, RoundingDirection::ToZero) => {
            // always truncate
            false
        }
        (false, RoundingDirection::ToOdd) => {
            // LSB of the kept bits needs to be 1
            (half_bit || sticky_bit) && !lsb
        }
        (false, RoundingDirection::ToEven) => {
            // LSB of the kept bits needs to be 0
            (half_bit || sticky_bit) && lsb
        }
    }
}

// The truncated value and discarded information produced by anchoring
// a value at a rounding position.
struct RoundPrep {
    // kept bits, all strictly above position `n`
    hi: RealFloat,
    // the `k` discarded bits at positions `n` down to `n - k + 1`,
    // most significant first
    frac: u64,
    // true if any discarded bit below position `n - k + 1` is high
    sticky: bool,
}

impl RealFloat {
    /// Splits this value at absolute position `n`, returning values
    /// `(hi, lo)` with `hi + lo == self`, every bit of `hi` strictly
    /// above `n`, and every bit of `lo` at or below `n`.
    ///
    /// This is the primitive on which all rounding is built.
    pub fn split(&self, n: i64) -> (RealFloat, RealFloat) {
        if self.is_zero() {
            return (Self::signed_zero(self.s), Self::signed_zero(self.s));
        }

        let shift = n + 1 - self.exp;
        if shift <= 0 {
            // every bit is already above `n`
            (self.clone(), Self::signed_zero(self.s))
        } else if shift as u64 >= self.c.bits() {
            // every bit is at or below `n`
            let hi = Self {
                s: self.s,
                exp: n + 1,
                c: BigUint::zero(),
            };
            (hi, self.clone())
        } else {
            let shift = shift as u64;
            let mask = (BigUint::one() << shift) - 1u8;
            let hi = Self {
                s: self.s,
                exp: n + 1,
                c: &self.c >> shift,
            };
            let lo = Self {
                s: self.s,
                exp: self.exp,
                c: &self.c & &mask,
            };
            (hi, lo)
        }
    }

    /// Returns an equal value whose representation satisfies the
    /// requested form:
    ///
    ///  - `p` given: the significand fits in `p` bits and the exponent
    ///    is the largest consistent with that;
    ///  - `n` given: every bit sits strictly above position `n`;
    ///  - both given: both of the above.
    ///
    /// Fails with [`Error::LostBits`] when the requested form would
    /// require discarding nonzero low-order bits.
    pub fn normalize(&self, p: Option<usize>, n: Option<i64>) -> Result<RealFloat, Error> {
        let e = match self.e() {
            Some(e) => e,
            None => {
                // zero: anchor at the requested position
                let exp = n.map_or(0, |n| n + 1);
                return Ok(Self {
                    s: self.s,
                    exp,
                    c: BigUint::zero(),
                });
            }
        };

        let mut target = None;
        if let Some(p) = p {
            target = Some(e - p as i64 + 1);
        }
        if let Some(n) = n {
            target = Some(target.map_or(n + 1, |t: i64| t.max(n + 1)));
        }

        let target = match target {
            Some(t) => t,
            None => return Ok(self.clone()),
        };

        if target <= self.exp {
            // pad with low zeros
            Ok(Self {
                s: self.s,
                exp: target,
                c: &self.c << (self.exp - target) as u64,
            })
        } else {
            // drop low bits, failing if any are nonzero
            let shift = (target - self.exp) as u64;
            let tz = self.c.trailing_zeros().unwrap_or(0);
            if tz < shift {
                Err(Error::LostBits { p, n })
            } else {
                Ok(Self {
                    s: self.s,
                    exp: target,
                    c: &self.c >> shift,
                })
            }
        }
    }

    // `normalize` for forms known to be exact (e.g. freshly rounded
    // values); the exactness requirement is checked only in debug builds.
    pub(crate) fn normalize_unchecked(&self, p: Option<usize>, n: Option<i64>) -> RealFloat {
        debug_assert!(self.normalize(p, n).is_ok(), "normalize discarded bits");
        match self.normalize(p, n) {
            Ok(r) => r,
            Err(_) => self.clone(),
        }
    }

    // Anchors this (nonzero) value for rounding with `k` explicitly
    // retained discarded bits. Returns `None` if no bound applies.
    fn round_prepare(&self, max_p: Option<usize>, min_n: Option<i64>, k: u32) -> Option<RoundPrep> {
        let e = self.e().unwrap();

        let mut n = min_n;
        if let Some(p) = max_p {
            let anchor = e - p as i64;
            n = Some(n.map_or(anchor, |m| m.max(anchor)));
        }
        let n = n?;

        if n < self.n() {
            // nothing to discard
            return Some(RoundPrep {
                hi: self.clone(),
                frac: 0,
                sticky: false,
            });
        }

        let (hi, lo) = self.split(n);

        let mut frac = 0u64;
        for j in 0..k as i64 {
            frac = (frac << 1) | (lo.bit(n - j) as u64);
        }

        // any bit strictly below position `n - k + 1`
        let cutoff = n - (k as i64 - 1);
        let shift = cutoff - lo.exp;
        let sticky = if lo.is_zero() || shift <= 0 {
            false
        } else if shift as u64 >= lo.c.bits() {
            !lo.is_zero()
        } else {
            let mask = (BigUint::one() << shift as u64) - 1u8;
            !(&lo.c & &mask).is_zero()
        };

        Some(RoundPrep { hi, frac, sticky })
    }

    // Applies an increment decision to the truncated value, restoring
    // the precision bound if the carry widened the significand.
    fn round_finalize(prep: RoundPrep, max_p: Option<usize>, increment: bool) -> RealFloat {
        let mut hi = prep.hi;
        if increment {
            hi.c += 1u8;
            if let Some(p) = max_p {
                if hi.c.bits() as usize > p {
                    // carry to a power of two: the dropped bit is zero
                    hi.c >>= 1u8;
                    hi.exp += 1;
                }
            }
        }
        hi
    }

    /// Rounds this value so that its significand fits in `max_p` bits
    /// and its bits sit strictly above position `min_n`, whichever
    /// constraint anchors higher. A missing parameter means the
    /// corresponding constraint does not apply.
    pub fn round(&self, max_p: Option<usize>, min_n: Option<i64>, rm: RoundingMode) -> RealFloat {
        self.round_exact(max_p, min_n, rm).0
    }

    /// Like [`RealFloat::round`], but also reports whether any nonzero
    /// bits were discarded.
    pub fn round_exact(
        &self,
        max_p: Option<usize>,
        min_n: Option<i64>,
        rm: RoundingMode,
    ) -> (RealFloat, bool) {
        if self.is_zero() {
            let mut z = Self::signed_zero(self.s);
            z.exp = min_n.map_or(0, |n| n + 1);
            return (z, false);
        }

        match self.round_prepare(max_p, min_n, 1) {
            None => (self.clone(), false),
            Some(prep) => {
                let half = prep.frac != 0;
                let sticky = prep.sticky;
                if !half && !sticky {
                    return (prep.hi, false);
                }
                let lsb = prep.hi.c.bit(0);
                let up = round_requires_increment(self.s, lsb, half, sticky, rm);
                (Self::round_finalize(prep, max_p, up), true)
            }
        }
    }

    /// Rounds this value at absolute position `n`: the result has every
    /// bit strictly above `n` and unconstrained precision.
    pub fn round_at(&self, n: i64, rm: RoundingMode) -> RealFloat {
        self.round(None, Some(n), rm)
    }

    /// Stochastic rounding: rounds this value as [`RealFloat::round`],
    /// but the increment decision consumes `num_randbits` discarded bits
    /// below the anchor and compares them against the caller-supplied
    /// draw `randbits` (uniform in `[0, 2^num_randbits)`). The
    /// probability of rounding up is proportional to the distance from
    /// the truncated value, at the granularity of `num_randbits`.
    ///
    /// Returns the rounded value and whether it is inexact.
    pub fn round_stochastic(
        &self,
        max_p: Option<usize>,
        min_n: Option<i64>,
        num_randbits: u32,
        randbits: u64,
    ) -> (RealFloat, bool) {
        assert!(
            (1..=63).contains(&num_randbits),
            "num_randbits must be in 1..=63: {}",
            num_randbits
        );
        assert!(
            randbits < (1u64 << num_randbits),
            "randbits must be below 2^{}: {}",
            num_randbits,
            randbits
        );

        if self.is_zero() {
            let mut z = Self::signed_zero(self.s);
            z.exp = min_n.map_or(0, |n| n + 1);
            return (z, false);
        }

        match self.round_prepare(max_p, min_n, num_randbits) {
            None => (self.clone(), false),
            Some(prep) => {
                if prep.frac == 0 && !prep.sticky {
                    return (prep.hi, false);
                }
                // distance to the truncated value as a `num_randbits`-bit
                // fraction of an ulp; the sticky tail rounds it up
                let threshold = prep.frac + prep.sticky as u64;
                let up = randbits < threshold;
                (Self::round_finalize(prep, max_p, up), true)
            }
        }
    }
}
