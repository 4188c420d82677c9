/*
    Tagged floating-point values
*/

use crate::context::Context;
use crate::real::RealFloat;

mod arithmetic;
mod cmp;
mod convert;
mod number;

pub use cmp::FloatKey;

// Classification of a `Float`: a finite dyadic value, an infinity,
// or a NaN. Non-finite values carry only a sign.
#[derive(Clone, Debug)]
pub(crate) enum FloatNum {
    Real(RealFloat),
    Infinity(bool),
    Nan(bool),
}

/// A floating-point value: a [`RealFloat`] extended with ±∞ and NaN.
///
/// A `Float` optionally remembers the [`Context`] that produced it and
/// whether that rounding discarded nonzero bits (`inexact`). Both are
/// informational: arithmetic and comparison never consult them, and
/// exact arithmetic produces untagged results. Contexts attach only at
/// rounding.
#[derive(Clone, Debug)]
pub struct Float {
    pub(crate) num: FloatNum,
    ctx: Option<Context>,
    inexact: bool,
}
