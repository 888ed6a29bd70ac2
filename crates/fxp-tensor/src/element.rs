use std::fmt::Debug;

use half::f16;
use num_traits::{CheckedShl, CheckedShr, PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub};

use crate::dtype::DType;

/// A fixed-width integer word usable as a ring element.
///
/// All arithmetic on ring elements is modulo `2^BITS`.
pub trait RingElement:
    PrimInt
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + CheckedShl
    + CheckedShr
    + Default
    + Debug
    + Send
    + Sync
    + 'static
{
    const DTYPE: DType;
    const BITS: u32;

    /// Integer division truncating toward zero. `MIN / -1` wraps to `MIN`.
    ///
    /// The caller guarantees `rhs != 0`.
    fn wrapping_div(self, rhs: Self) -> Self;

    /// Truncates `value` toward zero and wraps it into the word.
    ///
    /// Values beyond the `i128` range saturate before wrapping; NaN is 0.
    fn from_f64_truncated(value: f64) -> Self;

    /// The numeric value of the word, read with the word's own signedness.
    fn as_f64(self) -> f64;
}

macro_rules! impl_ring_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl RingElement for $t {
                const DTYPE: DType = DType::$dtype;
                const BITS: u32 = <$t>::BITS;

                #[inline]
                fn wrapping_div(self, rhs: Self) -> Self {
                    <$t>::wrapping_div(self, rhs)
                }

                #[inline]
                fn from_f64_truncated(value: f64) -> Self {
                    (value as i128) as $t
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_ring_element!(
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
);

/// A floating point element that can be quantized into a ring word.
pub trait FloatElement: Copy + Default + PartialEq + Debug + Send + Sync + 'static {
    const DTYPE: DType;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;
}

impl FloatElement for f32 {
    const DTYPE: DType = DType::F32;

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl FloatElement for f64 {
    const DTYPE: DType = DType::F64;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl FloatElement for f16 {
    const DTYPE: DType = DType::F16;

    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }
}
