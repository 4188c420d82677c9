/*
    Pre-built format constants
*/

use crate::context::RealContext;
use crate::expfloat::ExpContext;
use crate::extfloat::{ExtFloatContext, NanKind};
use crate::fixed::{FixedContext, MPFixedContext};
use crate::ieee754::IEEEContext;

/// IEEE-754 binary16 (half precision).
pub const FP16: IEEEContext = IEEEContext::new(5, 16);
/// IEEE-754 binary32 (single precision).
pub const FP32: IEEEContext = IEEEContext::new(8, 32);
/// IEEE-754 binary64 (double precision).
pub const FP64: IEEEContext = IEEEContext::new(11, 64);
/// IEEE-754 binary128 (quad precision).
pub const FP128: IEEEContext = IEEEContext::new(15, 128);
/// bfloat16: the top 16 bits of binary32.
pub const BF16: IEEEContext = IEEEContext::new(8, 16);

/// Unsigned 8-bit integers (wrapping, truncating).
pub const UINT8: FixedContext = FixedContext::new(false, 0, 8);
/// Unsigned 16-bit integers (wrapping, truncating).
pub const UINT16: FixedContext = FixedContext::new(false, 0, 16);
/// Unsigned 32-bit integers (wrapping, truncating).
pub const UINT32: FixedContext = FixedContext::new(false, 0, 32);
/// Unsigned 64-bit integers (wrapping, truncating).
pub const UINT64: FixedContext = FixedContext::new(false, 0, 64);
/// Two's-complement 8-bit integers (wrapping, truncating).
pub const SINT8: FixedContext = FixedContext::new(true, 0, 8);
/// Two's-complement 16-bit integers (wrapping, truncating).
pub const SINT16: FixedContext = FixedContext::new(true, 0, 16);
/// Two's-complement 32-bit integers (wrapping, truncating).
pub const SINT32: FixedContext = FixedContext::new(true, 0, 32);
/// Two's-complement 64-bit integers (wrapping, truncating).
pub const SINT64: FixedContext = FixedContext::new(true, 0, 64);

/// Graphcore FP8 1.5.2: the all-ones magnitude is NaN, no infinities.
pub const S1E5M2: ExtFloatContext = ExtFloatContext::new(5, 8, false, NanKind::MaxVal);
/// Graphcore FP8 1.4.3: the all-ones magnitude is NaN, no infinities.
pub const S1E4M3: ExtFloatContext = ExtFloatContext::new(4, 8, false, NanKind::MaxVal);

/// OCP MX FP8 E5M2, IEEE-like with infinities and NaNs.
pub const MX_E5M2: ExtFloatContext = ExtFloatContext::new(5, 8, true, NanKind::Ieee754);
/// OCP MX FP8 E4M3: NaN at `S.1111.111`, no infinities, max 448.
pub const MX_E4M3: ExtFloatContext = ExtFloatContext::new(4, 8, false, NanKind::MaxVal);
/// OCP MX FP6 E3M2: every code point is finite.
pub const MX_E3M2: ExtFloatContext = ExtFloatContext::new(3, 6, false, NanKind::None);
/// OCP MX FP6 E2M3: every code point is finite.
pub const MX_E2M3: ExtFloatContext = ExtFloatContext::new(2, 6, false, NanKind::None);
/// OCP MX FP4 E2M1: every code point is finite.
pub const MX_E2M1: ExtFloatContext = ExtFloatContext::new(2, 4, false, NanKind::None);
/// OCP MX scale format E8M0: exponent-only, one NaN code point.
pub const MX_E8M0: ExpContext = ExpContext::new(8);

/// IEEE-P3109 binary8 with precision 1.
pub const FP8P1: ExtFloatContext = p3109(1);
/// IEEE-P3109 binary8 with precision 2.
pub const FP8P2: ExtFloatContext = p3109(2);
/// IEEE-P3109 binary8 with precision 3.
pub const FP8P3: ExtFloatContext = p3109(3);
/// IEEE-P3109 binary8 with precision 4.
pub const FP8P4: ExtFloatContext = p3109(4);
/// IEEE-P3109 binary8 with precision 5.
pub const FP8P5: ExtFloatContext = p3109(5);
/// IEEE-P3109 binary8 with precision 6.
pub const FP8P6: ExtFloatContext = p3109(6);
/// IEEE-P3109 binary8 with precision 7.
pub const FP8P7: ExtFloatContext = p3109(7);

// P3109 binary8p formats: NaN at 0x80, ±∞ at the extremes, and a bias
// of 2^(es - 1) rather than the IEEE 2^(es - 1) - 1.
const fn p3109(p: usize) -> ExtFloatContext {
    ExtFloatContext::new(8 - p, 8, true, NanKind::NegZero).with_eoffset(-1)
}

/// The reals: the identity rounding.
pub const REAL: RealContext = RealContext;
/// Unbounded integers, truncating toward zero.
pub const INTEGER: MPFixedContext = MPFixedContext::new(-1);
