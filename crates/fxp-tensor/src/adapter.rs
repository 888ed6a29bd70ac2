use crate::element::RingElement;
use crate::error::Result;
use crate::shape::Shape;

/// The operations secure-computation protocols need from a ring tensor.
///
/// Peer operands are `&Self`, so every operand of one call has the same
/// concrete tensor type. Each operation validates its preconditions before
/// touching `dst`; on error the destination keeps its prior contents.
///
/// Binary elementwise operations require `self`, `rhs` and `dst` to have
/// identical shapes. Arithmetic wraps modulo `2^T::BITS`.
pub trait TensorAdapter<T: RingElement>: Sized {
    fn shape(&self) -> &Shape;

    fn numel(&self) -> usize;

    /// Exponent of the fixed-point encoding: `real = raw / 2^scaling_factor`.
    fn scaling_factor(&self) -> u32;

    /// Relabel the fixed-point scale without touching the stored words.
    ///
    /// # Errors
    /// Returns `InvalidScalingFactor` if `scaling_factor` is 128 or more; the
    /// previous factor is kept.
    fn set_scaling_factor(&mut self, scaling_factor: u32) -> Result<()>;

    fn data(&self) -> &[T];

    fn data_mut(&mut self) -> &mut [T];

    /// Resize to `shape`. Contents survive only if the element count is
    /// unchanged; the scaling factor always survives.
    fn reshape(&mut self, shape: Shape);

    fn add(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn sub(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn mul(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    /// Raw integer division of the stored words. Fixed-point rescaling is the
    /// caller's job.
    fn div(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn negative(&self, dst: &mut Self) -> Result<()>;

    fn bitwise_and(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn bitwise_or(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn bitwise_xor(&self, rhs: &Self, dst: &mut Self) -> Result<()>;

    fn bitwise_not(&self, dst: &mut Self) -> Result<()>;

    fn lshift(&self, amount: u32, dst: &mut Self) -> Result<()>;

    /// Native right shift: sign-extending for signed `T`.
    fn rshift(&self, amount: u32, dst: &mut Self) -> Result<()>;

    /// Zero-filling right shift regardless of the signedness of `T`.
    fn logical_rshift(&self, amount: u32, dst: &mut Self) -> Result<()>;

    /// Batched matrix product `dst = op(self) @ op(rhs)`.
    ///
    /// Supports `[m, k] x [k, n]`, `[b, m, k] x [b, k, n]` and
    /// `[b, m, k] x [k, n]` (rhs broadcast over the batch). The transpose
    /// flags swap the row and column axes of each 2-D slice.
    fn mat_mul(&self, rhs: &Self, dst: &mut Self, trans_lhs: bool, trans_rhs: bool)
        -> Result<()>;

    /// Copy first-axis rows `[begin, end)` into `dst`, carrying over the
    /// scaling factor.
    fn slice(&self, begin: usize, end: usize, dst: &mut Self) -> Result<()>;
}
