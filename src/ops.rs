/*
    Correctly-rounded operations
*/

//! Mathematical operations, each correctly rounded under a caller-chosen
//! [`RoundingContext`].
//!
//! Every operation runs in two steps: the IEEE-754 exceptional cases
//! first, then a kernel that produces the exact result (for the dyadic
//! operations) or an MPFR evaluation at a safe precision with
//! round-to-odd (for everything else), followed by a single rounding
//! under the target context. Rounding twice this way is still correct:
//! the round-to-odd intermediate keeps enough information that the final
//! rounding under any mode lands on the correctly rounded value of the
//! true real result.

use std::cmp::Ordering;

use num_integer::Integer;
use rug::float::Round;
use rug::ops::Pow;

use crate::context::RoundingContext;
use crate::error::Error;
use crate::float::{Float, FloatNum};
use crate::mpfr::{float_to_mpfr, mpfr_to_float};
use crate::real::RealFloat;
use crate::rounding::RoundingMode;

// Evaluates `compute` at a precision sufficient for the final rounding
// under `ctx` to be correct. Contexts that bound precision get
// `pmax + num_randbits + 2` working bits; position-only (fixed-point)
// contexts get a 53-bit trial first to estimate the result exponent.
fn eval_mpfr<C: RoundingContext, F>(ctx: &C, compute: F) -> Result<Float, Error>
where
    F: Fn(u32) -> (rug::Float, Ordering),
{
    let (p_opt, n_opt) = ctx.round_params();
    let k = ctx.num_randbits() as i64;
    let prec = match (p_opt, n_opt) {
        (Some(p), _) => (p as i64 + k + 2).max(4) as u32,
        (None, Some(nmin)) => {
            let (t, ord) = compute(53);
            if ord == Ordering::Equal || t.is_nan() || t.is_infinite() || t.is_zero() {
                return ctx.round_with(&mpfr_to_float(&t, ord), None);
            }
            let e_est = t.get_exp().map_or(0, |e| e as i64 - 1);
            (e_est - nmin + k + 4).max(8) as u32
        }
        (None, None) => {
            return Err(Error::NoSuchContext(
                "inexact operations need a precision or position bound",
            ))
        }
    };
    let (f, ord) = compute(prec);
    ctx.round_with(&mpfr_to_float(&f, ord), None)
}

fn round_value<C: RoundingContext>(ctx: &C, x: Float) -> Result<Float, Error> {
    ctx.round_with(&x, None)
}

fn propagated_nan(args: &[&Float]) -> Option<Float> {
    args.iter().find(|v| v.is_nan()).map(|v| Float::nan(v.sign()))
}

// Exact sum with the IEEE sign-of-zero rule: exact cancellation is +0
// under every mode except toward-negative, where it is −0.
fn ieee_add(a: &RealFloat, b: &RealFloat, rm: RoundingMode) -> RealFloat {
    let sum = a + b;
    if sum.is_zero() {
        if a.sign() == b.sign() {
            sum.with_sign(a.sign())
        } else {
            sum.with_sign(rm == RoundingMode::ToNegative)
        }
    } else {
        sum
    }
}

macro_rules! mpfr_unary {
    ($($(#[$meta:meta])* $name:ident => $method:ident;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
                let mx = float_to_mpfr(x);
                eval_mpfr(ctx, |p| rug::Float::with_val_round(p, mx.$method(), Round::Zero))
            }
        )*
    };
}

/// Negation: a sign-bit operation, exact before rounding.
pub fn neg<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_value(ctx, -x)
}

/// Absolute value: a sign-bit operation, exact before rounding.
pub fn fabs<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    let v = match &x.num {
        FloatNum::Nan(_) => Float::nan(false),
        FloatNum::Infinity(_) => Float::infinity(false),
        FloatNum::Real(r) => Float::from(r.abs()),
    };
    round_value(ctx, v)
}

/// Composes the magnitude of `x` with the sign of `y`.
pub fn copysign<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    let s = y.sign();
    let v = match &x.num {
        FloatNum::Nan(_) => Float::nan(s),
        FloatNum::Infinity(_) => Float::infinity(s),
        FloatNum::Real(r) => Float::from(r.abs().with_sign(s)),
    };
    round_value(ctx, v)
}

/// Addition. The finite case is computed exactly and rounded once.
pub fn add<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    match (&x.num, &y.num) {
        (FloatNum::Real(a), FloatNum::Real(b)) => {
            round_value(ctx, Float::from(ieee_add(a, b, ctx.rm())))
        }
        _ => round_value(ctx, x + y),
    }
}

/// Subtraction. The finite case is computed exactly and rounded once.
pub fn sub<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    add(x, &(-y), ctx)
}

/// Multiplication. The finite case is computed exactly and rounded once.
pub fn mul<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    round_value(ctx, x * y)
}

/// Fused multiply-add `x*y + z` with a single rounding.
pub fn fma<C: RoundingContext>(x: &Float, y: &Float, z: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y, z]) {
        return round_value(ctx, nan);
    }
    let prod = x * y;
    match (&prod.num, &z.num) {
        (FloatNum::Real(p), FloatNum::Real(b)) => {
            round_value(ctx, Float::from(ieee_add(p, b, ctx.rm())))
        }
        _ => round_value(ctx, &prod + z),
    }
}

/// Division, correctly rounded through MPFR. Division of a finite
/// nonzero value by zero yields ±∞, mapped by contexts without ∞ to
/// NaN; it is never an error.
pub fn div<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    let mx = float_to_mpfr(x);
    let my = float_to_mpfr(y);
    eval_mpfr(ctx, |p| rug::Float::with_val_round(p, &mx / &my, Round::Zero))
}

mpfr_unary! {
    /// Square root; `sqrt(−0)` is −0 and negative values yield NaN.
    sqrt => sqrt_ref;
    /// Cube root, odd and defined on all of ℝ.
    cbrt => cbrt_ref;
    /// Base-e exponential.
    exp => exp_ref;
    /// Base-2 exponential.
    exp2 => exp2_ref;
    /// Base-10 exponential.
    exp10 => exp10_ref;
    /// `e^x − 1`, accurate near zero.
    expm1 => exp_m1_ref;
    /// Natural logarithm; `log(0)` is −∞, negative values yield NaN.
    log => ln_ref;
    /// Base-2 logarithm.
    log2 => log2_ref;
    /// Base-10 logarithm.
    log10 => log10_ref;
    /// `log(1 + x)`, accurate near zero.
    log1p => ln_1p_ref;
    /// Sine; ±∞ yields NaN.
    sin => sin_ref;
    /// Cosine; ±∞ yields NaN.
    cos => cos_ref;
    /// Tangent; ±∞ yields NaN.
    tan => tan_ref;
    /// Arcsine; out of [−1, 1] yields NaN.
    asin => asin_ref;
    /// Arccosine; out of [−1, 1] yields NaN.
    acos => acos_ref;
    /// Arctangent; defined on all of ℝ, ±∞ map to ±π/2.
    atan => atan_ref;
    /// Hyperbolic sine.
    sinh => sinh_ref;
    /// Hyperbolic cosine.
    cosh => cosh_ref;
    /// Hyperbolic tangent.
    tanh => tanh_ref;
    /// Inverse hyperbolic sine.
    asinh => asinh_ref;
    /// Inverse hyperbolic cosine; below 1 yields NaN.
    acosh => acosh_ref;
    /// Inverse hyperbolic tangent; outside (−1, 1) yields NaN.
    atanh => atanh_ref;
    /// The error function.
    erf => erf_ref;
    /// The complementary error function.
    erfc => erfc_ref;
    /// The gamma function.
    tgamma => gamma_ref;
}

/// `log |Γ(x)|` (C `lgamma`). MPFR separates the magnitude from the
/// sign of Γ, so this one goes through the raw binding.
pub fn lgamma<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    let mx = float_to_mpfr(x);
    eval_mpfr(ctx, |p| {
        let mut v = rug::Float::new(p);
        let mut sign = 0i32;
        let ternary = unsafe {
            gmp_mpfr_sys::mpfr::lgamma(
                v.as_raw_mut(),
                &mut sign,
                mx.as_raw(),
                gmp_mpfr_sys::mpfr::rnd_t::RNDZ,
            )
        };
        (v, ternary.cmp(&0))
    })
}

/// `sqrt(x² + y²)` with a single rounding; infinite either way yields
/// +∞, even alongside a NaN.
pub fn hypot<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if x.is_infinity() || y.is_infinity() {
        return round_value(ctx, Float::infinity(false));
    }
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    let mx = float_to_mpfr(x);
    let my = float_to_mpfr(y);
    eval_mpfr(ctx, |p| {
        rug::Float::with_val_round(p, mx.hypot_ref(&my), Round::Zero)
    })
}

/// `x` raised to `y`, with the full IEEE-754 `pow` special-case table
/// (`pow(x, ±0) = 1` and `pow(1, y) = 1` even for NaN arguments).
pub fn pow<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    let mx = float_to_mpfr(x);
    let my = float_to_mpfr(y);
    eval_mpfr(ctx, |p| {
        rug::Float::with_val_round(p, (&mx).pow(&my), Round::Zero)
    })
}

/// Arctangent of `y/x` using the signs of both arguments to pick the
/// quadrant.
pub fn atan2<C: RoundingContext>(y: &Float, x: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[y, x]) {
        return round_value(ctx, nan);
    }
    let my = float_to_mpfr(y);
    let mx = float_to_mpfr(x);
    eval_mpfr(ctx, |p| {
        rug::Float::with_val_round(p, my.atan2_ref(&mx), Round::Zero)
    })
}

// Magnitude quotient and remainder: `|x| = q·|y| + r` with `0 <= r < |y|`.
// Exact, so fmod and remainder never touch MPFR.
fn mag_div_rem(x: &RealFloat, y: &RealFloat) -> (num_bigint::BigUint, RealFloat) {
    let delta = x.exp() - y.exp();
    let (num, den, rem_exp) = if delta >= 0 {
        (x.significand() << delta as u64, y.significand().clone(), y.exp())
    } else {
        (x.significand().clone(), y.significand() << (-delta) as u64, x.exp())
    };
    let (q, rem) = num.div_rem(&den);
    (q, RealFloat::new(false, rem_exp, rem))
}

/// Floating-point remainder with the sign of `x` (C `fmod`).
pub fn fmod<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    match (&x.num, &y.num) {
        (FloatNum::Infinity(_), _) => round_value(ctx, Float::nan(false)),
        (_, FloatNum::Real(b)) if b.is_zero() => round_value(ctx, Float::nan(false)),
        (FloatNum::Real(_), FloatNum::Infinity(_)) => round_value(ctx, x.clone()),
        (FloatNum::Real(a), FloatNum::Real(b)) => {
            if a.is_zero() {
                return round_value(ctx, x.clone());
            }
            let (_, r) = mag_div_rem(a, b);
            round_value(ctx, Float::from(r.with_sign(a.sign())))
        }
        _ => round_value(ctx, Float::nan(false)),
    }
}

/// IEEE remainder: `x − n·y` where `n` is the integer nearest `x/y`
/// (ties to even), so the result can carry either sign.
pub fn remainder<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    match (&x.num, &y.num) {
        (FloatNum::Infinity(_), _) => round_value(ctx, Float::nan(false)),
        (_, FloatNum::Real(b)) if b.is_zero() => round_value(ctx, Float::nan(false)),
        (FloatNum::Real(_), FloatNum::Infinity(_)) => round_value(ctx, x.clone()),
        (FloatNum::Real(a), FloatNum::Real(b)) => {
            if a.is_zero() {
                return round_value(ctx, x.clone());
            }
            let (q, r) = mag_div_rem(a, b);
            // round the quotient to nearest, ties to even
            let twice = RealFloat::new(false, r.exp() + 1, r.significand().clone());
            let b_mag = b.abs();
            let round_up = match twice.cmp_abs(&b_mag) {
                Ordering::Greater => true,
                Ordering::Equal => q.is_odd(),
                Ordering::Less => false,
            };
            let v = if round_up {
                // n = q + 1, so the remainder flips across zero
                (&b_mag - &r).with_sign(!a.sign())
            } else {
                r.with_sign(a.sign())
            };
            round_value(ctx, Float::from(v))
        }
        _ => round_value(ctx, Float::nan(false)),
    }
}

// Shared integer-rounding kernel: exact, so the only MPFR-free path.
fn round_integer<C: RoundingContext>(x: &Float, rm: RoundingMode, ctx: &C) -> Result<Float, Error> {
    match &x.num {
        FloatNum::Real(r) => {
            let (i, inexact) = r.round_exact(None, Some(-1), rm);
            let v = ctx.round_with(&Float::from(i), None)?;
            let combined = v.inexact() || inexact;
            Ok(v.with_inexact(combined))
        }
        _ => round_value(ctx, x.clone()),
    }
}

/// Rounds to an integer toward +∞.
pub fn ceil<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_integer(x, RoundingMode::ToPositive, ctx)
}

/// Rounds to an integer toward −∞.
pub fn floor<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_integer(x, RoundingMode::ToNegative, ctx)
}

/// Rounds to an integer toward zero.
pub fn trunc<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_integer(x, RoundingMode::ToZero, ctx)
}

/// Rounds to an integer using the context's rounding mode.
pub fn nearbyint<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_integer(x, ctx.rm(), ctx)
}

/// Rounds to the nearest integer, ties away from zero (C `round`).
pub fn round<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    round_integer(x, RoundingMode::NearestAway, ctx)
}

/// Splits `x` into fractional and integral parts, both with the sign
/// of `x`, both rounded under `ctx`.
pub fn modf<C: RoundingContext>(x: &Float, ctx: &C) -> Result<(Float, Float), Error> {
    match &x.num {
        FloatNum::Nan(s) => {
            let nan = round_value(ctx, Float::nan(*s))?;
            Ok((nan.clone(), nan))
        }
        FloatNum::Infinity(s) => Ok((
            round_value(ctx, Float::zero(*s))?,
            round_value(ctx, Float::infinity(*s))?,
        )),
        FloatNum::Real(r) => {
            let (i, _) = r.round_exact(None, Some(-1), RoundingMode::ToZero);
            let mut frac = r - &i;
            if frac.is_zero() {
                frac = frac.with_sign(r.sign());
            }
            Ok((
                round_value(ctx, Float::from(frac))?,
                round_value(ctx, Float::from(i))?,
            ))
        }
    }
}

/// The positive difference `max(x − y, 0)`.
pub fn fdim<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    if let Some(nan) = propagated_nan(&[x, y]) {
        return round_value(ctx, nan);
    }
    if x.partial_cmp(y) == Some(Ordering::Greater) {
        match (&x.num, &y.num) {
            (FloatNum::Real(a), FloatNum::Real(b)) => {
                round_value(ctx, Float::from(ieee_add(a, &-b, ctx.rm())))
            }
            _ => round_value(ctx, x - y),
        }
    } else {
        round_value(ctx, Float::zero(false))
    }
}

// IEEE max/min treat a single NaN as a missing operand and order
// −0 below +0.
fn pick(x: &Float, y: &Float, want_greater: bool) -> Float {
    let ord = match x.partial_cmp(y) {
        Some(Ordering::Equal) => {
            // distinguish the zeros by sign
            if x.sign() == y.sign() {
                Some(Ordering::Equal)
            } else if x.sign() {
                Some(Ordering::Less)
            } else {
                Some(Ordering::Greater)
            }
        }
        other => other,
    };
    match ord {
        Some(Ordering::Greater) => {
            if want_greater {
                x.clone()
            } else {
                y.clone()
            }
        }
        Some(Ordering::Less) => {
            if want_greater {
                y.clone()
            } else {
                x.clone()
            }
        }
        _ => x.clone(),
    }
}

/// IEEE `maxNum`: the greater operand, preferring a number over NaN.
pub fn fmax<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => round_value(ctx, Float::nan(x.sign())),
        (true, false) => round_value(ctx, y.clone()),
        (false, true) => round_value(ctx, x.clone()),
        (false, false) => round_value(ctx, pick(x, y, true)),
    }
}

/// IEEE `minNum`: the lesser operand, preferring a number over NaN.
pub fn fmin<C: RoundingContext>(x: &Float, y: &Float, ctx: &C) -> Result<Float, Error> {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => round_value(ctx, Float::nan(x.sign())),
        (true, false) => round_value(ctx, y.clone()),
        (false, true) => round_value(ctx, x.clone()),
        (false, false) => round_value(ctx, pick(x, y, false)),
    }
}

/// The exponent of `x` as a value: `floor(log2 |x|)`. `logb(0)` is −∞
/// and `logb(±∞)` is +∞.
pub fn logb<C: RoundingContext>(x: &Float, ctx: &C) -> Result<Float, Error> {
    match &x.num {
        FloatNum::Nan(s) => round_value(ctx, Float::nan(*s)),
        FloatNum::Infinity(_) => round_value(ctx, Float::infinity(false)),
        FloatNum::Real(r) => match r.e() {
            None => round_value(ctx, Float::infinity(true)),
            Some(e) => round_value(ctx, Float::from(RealFloat::from(e))),
        },
    }
}

/// Scales `x` by `2^k` exactly, then rounds.
pub fn ldexp<C: RoundingContext>(x: &Float, k: i64, ctx: &C) -> Result<Float, Error> {
    match &x.num {
        FloatNum::Real(r) => round_value(ctx, Float::from(r.scale(k))),
        _ => round_value(ctx, x.clone()),
    }
}
