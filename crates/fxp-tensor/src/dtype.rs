use std::fmt;

/// Element types a tensor can hold.
///
/// Integer variants are ring words used by [`FixedTensor`](crate::FixedTensor);
/// float variants are the sources and targets of fixed-point conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 16-bit floating point (IEEE 754 half-precision, via the `half` crate).
    F16,
    /// 32-bit floating point.
    F32,
    /// 64-bit floating point.
    F64,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::I128 => "i128",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::U128 => "u128",
        };
        write!(f, "{}", name)
    }
}
