/*
    Bridge to MPFR (via `rug`)
*/

use std::cmp::Ordering;

use num_bigint::BigUint;
use rug::float::Special;
use rug::integer::Order;
use rug::Integer;

use crate::float::Float;
use crate::real::RealFloat;

pub(crate) fn biguint_to_integer(u: &BigUint) -> Integer {
    Integer::from_digits(&u.to_bytes_le(), Order::Lsf)
}

// `i` must be non-negative
pub(crate) fn integer_to_biguint(i: &Integer) -> BigUint {
    debug_assert!(*i >= 0);
    BigUint::from_bytes_le(&i.to_digits::<u8>(Order::Lsf))
}

// Exact conversion: the MPFR value carries the full significand.
pub(crate) fn real_to_mpfr(r: &RealFloat) -> rug::Float {
    if r.is_zero() {
        let z = if r.sign() { Special::NegZero } else { Special::Zero };
        return rug::Float::with_val(2, z);
    }
    let prec = (r.p() as u32).max(2);
    let mut f = rug::Float::with_val(prec, biguint_to_integer(r.significand()));
    f <<= r.exp() as i32;
    if r.sign() {
        -f
    } else {
        f
    }
}

pub(crate) fn float_to_mpfr(x: &Float) -> rug::Float {
    if x.is_nan() {
        rug::Float::with_val(2, Special::Nan)
    } else if x.is_infinity() {
        let v = if x.sign() {
            Special::NegInfinity
        } else {
            Special::Infinity
        };
        rug::Float::with_val(2, v)
    } else {
        match x.real() {
            Some(r) => real_to_mpfr(r),
            None => rug::Float::with_val(2, Special::Nan),
        }
    }
}

// Recovers a `Float` from an MPFR result computed with `Round::Zero`,
// where `dir` is MPFR's ternary value (result vs. exact). Inexact
// results get their low bit forced high, so the returned value is the
// round-to-odd rendering of the exact result: a later rounding to at
// least two fewer bits under any mode is then correct.
//
// An inexact infinity or zero means MPFR over- or underflowed its own
// exponent range; a finite proxy beyond any context's range stands in
// so the caller's overflow handling sees a finite, inexact value.
pub(crate) fn mpfr_to_float(f: &rug::Float, dir: Ordering) -> Float {
    if f.is_nan() {
        Float::nan(f.is_sign_negative())
    } else if f.is_infinite() {
        if dir == Ordering::Equal {
            Float::infinity(f.is_sign_negative())
        } else {
            let proxy = RealFloat::new(f.is_sign_negative(), i64::MAX / 4, BigUint::from(3u8));
            Float::from(proxy)
        }
    } else if f.is_zero() {
        if dir == Ordering::Equal {
            Float::zero(f.is_sign_negative())
        } else {
            let proxy = RealFloat::new(f.is_sign_negative(), i64::MIN / 4, BigUint::from(3u8));
            Float::from(proxy)
        }
    } else {
        // f = i * 2^exp exactly
        let (i, exp) = match f.to_integer_exp() {
            Some(v) => v,
            None => return Float::nan(false),
        };
        let s = i < 0;
        let mut c = integer_to_biguint(&Integer::from(i.abs_ref()));
        if dir != Ordering::Equal {
            c.set_bit(0, true);
        }
        Float::from(RealFloat::new(s, exp as i64, c))
    }
}
