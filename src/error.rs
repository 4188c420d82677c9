/*
    Error types
*/

use thiserror::Error;

/// Failure kinds surfaced by the number tower.
///
/// NaN-producing operations are not errors; they return NaN per IEEE-754.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A rational with a non-power-of-two denominator cannot be lifted
    /// exactly to a dyadic value.
    #[error("non-dyadic rational cannot be represented exactly")]
    NonDyadic,

    /// `normalize` was asked for a representation that would discard
    /// nonzero low-order bits.
    #[error("normalize would lose bits: p = {p:?}, n = {n:?}")]
    LostBits { p: Option<usize>, n: Option<i64> },

    /// A NaN or infinity reached a conversion that only accepts
    /// finite values.
    #[error("cannot convert a non-finite value")]
    NotFinite,

    /// A bounded context met a value above its largest representable
    /// magnitude and its overflow policy has no way to express it.
    #[error("value exceeds the largest representable magnitude")]
    Overflow,

    /// The context does not support the requested rounding shape.
    #[error("unsupported for this context: {0}")]
    NoSuchContext(&'static str),
}
