/*
    Unbounded dyadic rationals
*/

use num_bigint::BigUint;

mod arithmetic;
mod cmp;
mod convert;
mod number;
mod round;

pub(crate) use round::round_requires_increment;

/// An unbounded signed dyadic rational.
///
/// A `RealFloat` denotes the value `(-1)^s * c * 2^exp` where `c` is an
/// arbitrary-precision unsigned integer. The sign is carried exclusively
/// in `s` so that signed zero is representable.
///
/// Multiple `(c, exp)` pairs may denote the same value. Equality and
/// ordering compare denoted values; representations are never silently
/// canonicalized. Values are immutable: arithmetic and rounding return
/// new `RealFloat`s.
#[derive(Clone, Debug)]
pub struct RealFloat {
    s: bool,
    exp: i64,
    c: BigUint,
}
