/*
    Top-level
*/

//! Correctly-rounded arithmetic over user-definable number formats.
//!
//! The library generalizes IEEE-754 binary floating point to a family of
//! rounding contexts: each [`Context`] defines a subset of the reals it
//! can represent together with a procedure mapping any value into that
//! subset, plus bit-level encodings and ordinal maps where they exist.
//! Values live in a small tower: [`RealFloat`] is an unbounded signed
//! dyadic rational, and [`Float`] extends it with ±∞ and NaN and an
//! optional originating context.
//!
//! The [`ops`] module provides elementary arithmetic and transcendental
//! operations that round their mathematically exact result under any
//! chosen context, built on MPFR through a round-to-odd intermediate.

mod consts;
mod context;
mod error;
mod expfloat;
mod extfloat;
mod fixed;
mod float;
mod ieee754;
mod mp;
mod mpfr;
pub mod ops;
mod real;
mod rounding;
mod util;

pub use consts::*;
pub use context::{
    Context, EncodableContext, OrdinalContext, RealContext, RoundingContext, SizedContext,
};
pub use error::Error;
pub use expfloat::ExpContext;
pub use extfloat::{ExtFloatContext, NanKind};
pub use fixed::{FixedContext, MPBFixedContext, MPFixedContext, SMFixedContext};
pub use float::{Float, FloatKey};
pub use ieee754::IEEEContext;
pub use mp::{MPBFloatContext, MPFloatContext, MPSFloatContext};
pub use real::RealFloat;
pub use rounding::{OverflowMode, RoundingDirection, RoundingMode};
pub use util::BitVec;
