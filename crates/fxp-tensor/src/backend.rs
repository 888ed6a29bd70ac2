use std::fmt::Debug;

use crate::element::RingElement;
use crate::error::Result;
use crate::ops::{BinaryOp, MatMulDims, UnaryOp};

/// Trait for pluggable compute backends executing ring-word kernels.
///
/// Backends work on raw row-major slices and write into caller-provided
/// output slices. Shape and placement checks happen in the tensor layer;
/// a backend only validates slice lengths. A backend must not write to
/// `out` when it returns an error.
pub trait ComputeBackend<T: RingElement>: Send + Sync + Debug {
    /// Returns the name of this backend (e.g., "cpu").
    fn name(&self) -> &str;

    /// Batched matrix product described by `dims`.
    ///
    /// - `lhs`: `dims.lhs_len()` elements, `batch` row-major slices
    /// - `rhs`: `dims.rhs_len()` elements, `rhs_batch` row-major slices
    /// - `out`: `dims.out_len()` elements, `batch` slices of `[m, n]`
    fn batched_matmul(&self, lhs: &[T], rhs: &[T], out: &mut [T], dims: &MatMulDims)
        -> Result<()>;

    /// Elementwise `out[i] = op(a[i], b[i])`.
    fn binary(&self, op: BinaryOp, a: &[T], b: &[T], out: &mut [T]) -> Result<()>;

    /// Elementwise `a[i] = op(a[i], b[i])`.
    fn binary_assign(&self, op: BinaryOp, a: &mut [T], b: &[T]) -> Result<()>;

    /// Elementwise `out[i] = op(a[i])`.
    fn unary(&self, op: UnaryOp, a: &[T], out: &mut [T]) -> Result<()>;

    /// Elementwise `a[i] = op(a[i])`.
    fn unary_assign(&self, op: UnaryOp, a: &mut [T]) -> Result<()>;
}
