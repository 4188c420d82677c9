/*
    Rounding contexts
*/

use num_bigint::BigInt;
use rand::RngCore;
use rug::Rational;

use crate::error::Error;
use crate::expfloat::ExpContext;
use crate::extfloat::ExtFloatContext;
use crate::fixed::{FixedContext, MPBFixedContext, MPFixedContext, SMFixedContext};
use crate::float::Float;
use crate::ieee754::IEEEContext;
use crate::mp::{MPBFloatContext, MPFloatContext, MPSFloatContext};
use crate::real::RealFloat;
use crate::rounding::RoundingMode;
use crate::util::BitVec;

// Draws `k` uniform bits for a stochastic rounding decision.
pub(crate) fn draw_randbits(rng: &mut dyn RngCore, k: u32) -> u64 {
    if k == 0 {
        0
    } else {
        rng.next_u64() >> (64 - k)
    }
}

/// A specification for rounding behavior.
///
/// For any computer number system, most mathematical operators can be
/// decomposed into two operations:
///  - a real number operation: `R^n -> R`, and
///  - a rounding operation: `R -> R`.
///
/// A context describes the second operation: it defines a subset of the
/// reals and a procedure mapping any value into that subset. Rounding is
/// the only place where representability constraints are applied; the
/// result is tagged with the context that produced it.
pub trait RoundingContext {
    /// The rounding parameters `(max_p, min_n)`: the maximum precision
    /// and the least absolute bit position of representable values.
    /// Either may be absent.
    fn round_params(&self) -> (Option<usize>, Option<i64>);

    /// The rounding mode this context applies.
    fn rm(&self) -> RoundingMode;

    /// Number of random bits consumed per stochastic rounding decision.
    fn num_randbits(&self) -> u32 {
        0
    }

    /// Returns true if this context rounds stochastically.
    fn is_stochastic(&self) -> bool {
        self.num_randbits() > 0
    }

    /// Returns true if `x` is representable under this context,
    /// equivalently if rounding `x` returns it unchanged.
    fn representable(&self, x: &Float) -> bool;

    /// Rounds `x` into this context. `randbits` supplies the stochastic
    /// draw; a stochastic context samples from the thread RNG when it is
    /// absent (pass the draw explicitly for reproducibility).
    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error>;

    /// Like [`RoundingContext::round_with`], but with the rounding
    /// anchor raised to at least absolute position `n`. Models fused
    /// accumulators that keep more low bits than the final format.
    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        let _ = (x, n, randbits);
        Err(Error::NoSuchContext("round_at is not defined for this context"))
    }

    /// Rounds `x` into this context.
    fn round<T: Into<Float>>(&self, x: T) -> Result<Float, Error>
    where
        Self: Sized,
    {
        self.round_with(&x.into(), None)
    }

    /// Rounds `x` with an explicit stochastic draw
    /// (uniform in `[0, 2^num_randbits)`).
    fn round_with_randbits<T: Into<Float>>(&self, x: T, randbits: u64) -> Result<Float, Error>
    where
        Self: Sized,
    {
        self.round_with(&x.into(), Some(randbits))
    }

    /// Rounds `x`, drawing any stochastic bits from `rng`.
    fn round_rng<T: Into<Float>>(&self, x: T, rng: &mut dyn RngCore) -> Result<Float, Error>
    where
        Self: Sized,
    {
        let bits = draw_randbits(rng, self.num_randbits());
        self.round_with(&x.into(), Some(bits))
    }

    /// Rounds `x` with the anchor raised to at least position `n`.
    fn round_at(&self, x: &Float, n: i64) -> Result<Float, Error> {
        self.round_at_with(x, n, None)
    }

    /// Rounds an exact rational into this context. Non-dyadic rationals
    /// are lifted through a round-to-odd dyadic intermediate wide enough
    /// that the final rounding is correct.
    fn round_rational(&self, q: &Rational) -> Result<Float, Error> {
        if let Ok(r) = RealFloat::try_from(q) {
            return self.round_with(&Float::from(r), None);
        }
        if q.cmp0() == std::cmp::Ordering::Equal {
            return self.round_with(&Float::zero(false), None);
        }

        let k = self.num_randbits() as usize;
        let prec = match self.round_params() {
            (Some(p), _) => p + k + 2,
            (None, Some(nmin)) => {
                let e_est = q.numer().significant_bits() as i64
                    - q.denom().significant_bits() as i64;
                (e_est - nmin + k as i64 + 4).max(8) as usize
            }
            (None, None) => return Err(Error::NonDyadic),
        };
        let r = RealFloat::from_rational_rto(q, prec);
        self.round_with(&Float::from(r), None)
    }
}

/// A context whose countable representables form a total order, with a
/// bidirectional map between finite representables and the integers.
///
/// Ordinals are strictly increasing in numeric value, signed zeros share
/// ordinal 0, and adjacent representables differ by one ordinal step.
pub trait OrdinalContext: RoundingContext {
    /// Maps a finite representable value to its ordinal.
    fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error>;

    /// Maps an ordinal back to its value.
    fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error>;

    /// The smallest positive representable value.
    fn minval(&self) -> Float;

    /// The largest positive finite representable value, when the
    /// context is bounded above.
    fn maxval(&self) -> Option<Float>;

    /// The next representable value above `x` (one ordinal step).
    fn next_above(&self, x: &Float) -> Result<Float, Error> {
        let i = self.to_ordinal(x)? + 1;
        self.from_ordinal(&i)
    }

    /// The next representable value below `x` (one ordinal step).
    fn next_below(&self, x: &Float) -> Result<Float, Error> {
        let i = self.to_ordinal(x)? - 1;
        self.from_ordinal(&i)
    }
}

/// An [`OrdinalContext`] with a fixed bit budget.
pub trait SizedContext: OrdinalContext {
    /// Total number of bits in an encoded value.
    fn nbits(&self) -> usize;
}

/// A [`SizedContext`] with a bit-level encoding.
///
/// Every bit pattern of width `nbits` decodes to some value (possibly
/// NaN); `encode` is a left inverse of `decode` except on NaN code
/// points, which collapse to a canonical NaN.
pub trait EncodableContext: SizedContext {
    /// Encodes a representable value as a bit string of width `nbits`.
    fn encode(&self, x: &Float) -> Result<BitVec, Error>;

    /// Decodes a bit string of width `nbits`.
    fn decode(&self, bv: &BitVec) -> Float;
}

/// The real numbers: rounding is the identity.
///
/// Not ordinal or encodable, and inexact operations cannot be correctly
/// rounded to it, so the ops layer rejects it for everything but exact
/// computations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RealContext;

impl RealContext {
    pub const fn new() -> Self {
        Self
    }
}

impl RoundingContext for RealContext {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        (None, None)
    }

    fn rm(&self) -> RoundingMode {
        RoundingMode::NearestEven
    }

    fn representable(&self, _x: &Float) -> bool {
        true
    }

    fn round_with(&self, x: &Float, _randbits: Option<u64>) -> Result<Float, Error> {
        Ok(x.clone().with_ctx(Context::Real(*self)).with_inexact(false))
    }

    fn round_rational(&self, q: &Rational) -> Result<Float, Error> {
        // the identity rounding cannot absorb a non-dyadic value
        let r = RealFloat::try_from(q)?;
        self.round_with(&Float::from(r), None)
    }
}

/// The sum of every concrete context, used to tag values and to drive
/// operations over a context chosen at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Context {
    Real(RealContext),
    MPFloat(MPFloatContext),
    MPSFloat(MPSFloatContext),
    MPBFloat(MPBFloatContext),
    Ieee(IEEEContext),
    Fixed(FixedContext),
    SMFixed(SMFixedContext),
    MPFixed(MPFixedContext),
    MPBFixed(MPBFixedContext),
    ExtFloat(ExtFloatContext),
    Exp(ExpContext),
}

macro_rules! impl_from_ctx {
    ($($variant:ident($t:ty)),* $(,)?) => {
        $(
            impl From<$t> for Context {
                fn from(ctx: $t) -> Self {
                    Context::$variant(ctx)
                }
            }
        )*
    };
}

impl_from_ctx! {
    Real(RealContext),
    MPFloat(MPFloatContext),
    MPSFloat(MPSFloatContext),
    MPBFloat(MPBFloatContext),
    Ieee(IEEEContext),
    Fixed(FixedContext),
    SMFixed(SMFixedContext),
    MPFixed(MPFixedContext),
    MPBFixed(MPBFixedContext),
    ExtFloat(ExtFloatContext),
    Exp(ExpContext),
}

macro_rules! dispatch {
    ($self:ident, $ctx:ident => $e:expr) => {
        match $self {
            Context::Real($ctx) => $e,
            Context::MPFloat($ctx) => $e,
            Context::MPSFloat($ctx) => $e,
            Context::MPBFloat($ctx) => $e,
            Context::Ieee($ctx) => $e,
            Context::Fixed($ctx) => $e,
            Context::SMFixed($ctx) => $e,
            Context::MPFixed($ctx) => $e,
            Context::MPBFixed($ctx) => $e,
            Context::ExtFloat($ctx) => $e,
            Context::Exp($ctx) => $e,
        }
    };
}

impl RoundingContext for Context {
    fn round_params(&self) -> (Option<usize>, Option<i64>) {
        dispatch!(self, ctx => ctx.round_params())
    }

    fn rm(&self) -> RoundingMode {
        dispatch!(self, ctx => ctx.rm())
    }

    fn num_randbits(&self) -> u32 {
        dispatch!(self, ctx => ctx.num_randbits())
    }

    fn representable(&self, x: &Float) -> bool {
        dispatch!(self, ctx => ctx.representable(x))
    }

    fn round_with(&self, x: &Float, randbits: Option<u64>) -> Result<Float, Error> {
        dispatch!(self, ctx => ctx.round_with(x, randbits))
    }

    fn round_at_with(&self, x: &Float, n: i64, randbits: Option<u64>) -> Result<Float, Error> {
        dispatch!(self, ctx => ctx.round_at_with(x, n, randbits))
    }

    fn round_rational(&self, q: &Rational) -> Result<Float, Error> {
        dispatch!(self, ctx => ctx.round_rational(q))
    }
}

macro_rules! dispatch_ordinal {
    ($self:ident, $ctx:ident => $e:expr, $err:expr) => {
        match $self {
            Context::MPSFloat($ctx) => $e,
            Context::MPBFloat($ctx) => $e,
            Context::Ieee($ctx) => $e,
            Context::Fixed($ctx) => $e,
            Context::SMFixed($ctx) => $e,
            Context::MPFixed($ctx) => $e,
            Context::MPBFixed($ctx) => $e,
            Context::ExtFloat($ctx) => $e,
            Context::Exp($ctx) => $e,
            _ => $err,
        }
    };
}

impl Context {
    /// Maps a finite representable to its ordinal, for ordinal contexts.
    pub fn to_ordinal(&self, x: &Float) -> Result<BigInt, Error> {
        dispatch_ordinal!(self, ctx => ctx.to_ordinal(x),
            Err(Error::NoSuchContext("context has no ordinal map")))
    }

    /// Maps an ordinal back to its value, for ordinal contexts.
    pub fn from_ordinal(&self, i: &BigInt) -> Result<Float, Error> {
        dispatch_ordinal!(self, ctx => ctx.from_ordinal(i),
            Err(Error::NoSuchContext("context has no ordinal map")))
    }

    /// Encodes a value as a bit string, for encodable contexts.
    pub fn encode(&self, x: &Float) -> Result<BitVec, Error> {
        match self {
            Context::Ieee(ctx) => ctx.encode(x),
            Context::Fixed(ctx) => ctx.encode(x),
            Context::SMFixed(ctx) => ctx.encode(x),
            Context::ExtFloat(ctx) => ctx.encode(x),
            Context::Exp(ctx) => ctx.encode(x),
            _ => Err(Error::NoSuchContext("context has no encoding")),
        }
    }

    /// Decodes a bit string, for encodable contexts.
    pub fn decode(&self, bv: &BitVec) -> Result<Float, Error> {
        match self {
            Context::Ieee(ctx) => Ok(ctx.decode(bv)),
            Context::Fixed(ctx) => Ok(ctx.decode(bv)),
            Context::SMFixed(ctx) => Ok(ctx.decode(bv)),
            Context::ExtFloat(ctx) => Ok(ctx.decode(bv)),
            Context::Exp(ctx) => Ok(ctx.decode(bv)),
            _ => Err(Error::NoSuchContext("context has no encoding")),
        }
    }

    /// The encoded width in bits, for sized contexts.
    pub fn nbits(&self) -> Option<usize> {
        match self {
            Context::Ieee(ctx) => Some(ctx.nbits()),
            Context::Fixed(ctx) => Some(ctx.nbits()),
            Context::SMFixed(ctx) => Some(ctx.nbits()),
            Context::ExtFloat(ctx) => Some(ctx.nbits()),
            Context::Exp(ctx) => Some(ctx.nbits()),
            _ => None,
        }
    }

    /// Returns true if ±∞ are representable under this context.
    pub fn admits_infinity(&self) -> bool {
        self.representable(&Float::infinity(false))
    }

    /// Returns this context with a different rounding mode.
    /// The identity on [`RealContext`], which has none.
    pub fn with_rm(self, rm: RoundingMode) -> Context {
        match self {
            Context::Real(ctx) => Context::Real(ctx),
            Context::MPFloat(ctx) => Context::MPFloat(ctx.with_rm(rm)),
            Context::MPSFloat(ctx) => Context::MPSFloat(ctx.with_rm(rm)),
            Context::MPBFloat(ctx) => Context::MPBFloat(ctx.with_rm(rm)),
            Context::Ieee(ctx) => Context::Ieee(ctx.with_rm(rm)),
            Context::Fixed(ctx) => Context::Fixed(ctx.with_rm(rm)),
            Context::SMFixed(ctx) => Context::SMFixed(ctx.with_rm(rm)),
            Context::MPFixed(ctx) => Context::MPFixed(ctx.with_rm(rm)),
            Context::MPBFixed(ctx) => Context::MPBFixed(ctx.with_rm(rm)),
            Context::ExtFloat(ctx) => Context::ExtFloat(ctx.with_rm(rm)),
            Context::Exp(ctx) => Context::Exp(ctx.with_rm(rm)),
        }
    }
}
