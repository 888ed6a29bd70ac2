use log::{debug, trace};

use crate::adapter::TensorAdapter;
use crate::backend::ComputeBackend;
use crate::cpu::default_backend;
use crate::device::Device;
use crate::dtype::DType;
use crate::element::{FloatElement, RingElement};
use crate::error::{Result, TensorError};
use crate::float::FloatTensor;
use crate::ops::{BinaryOp, MatMulDims, UnaryOp};
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// Largest accepted scaling factor, exclusive.
pub const MAX_SCALING_FACTOR: u32 = 128;

/// A fixed-point tensor of ring words.
///
/// Each element is a raw integer `raw` standing for `raw / 2^scaling_factor`.
/// Data is contiguous and row-major; the scaling factor is shared by all
/// elements. Computation is dispatched to a [`ComputeBackend`], by default
/// the process-wide [`CpuBackend`](crate::CpuBackend).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTensor<T> {
    storage: CpuStorage<T>,
    shape: Shape,
    device: Device,
    scaling_factor: u32,
}

fn check_scaling_factor(scaling_factor: u32) -> Result<f64> {
    if scaling_factor >= MAX_SCALING_FACTOR {
        return Err(TensorError::InvalidScalingFactor(scaling_factor));
    }
    Ok(scale_of(scaling_factor))
}

/// `2^scaling_factor` as an `f64`, without narrowing the exponent.
fn scale_of(scaling_factor: u32) -> f64 {
    2f64.powf(f64::from(scaling_factor))
}

fn check_placement(expected: Device, got: Device) -> Result<()> {
    if expected != got {
        return Err(TensorError::PlacementMismatch { expected, got });
    }
    Ok(())
}

impl<T: RingElement> FixedTensor<T> {
    /// A tensor with no elements (shape `[0]`) on `device`.
    pub fn empty(device: Device) -> Self {
        FixedTensor {
            storage: CpuStorage::zeros(0),
            shape: Shape::empty(),
            device,
            scaling_factor: 0,
        }
    }

    /// Create a host tensor from raw ring words.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `data.len() != shape.numel()`, or
    /// `InvalidScalingFactor` if the scaling factor is 128 or more.
    pub fn new(data: Vec<T>, shape: Shape, scaling_factor: u32) -> Result<Self> {
        check_scaling_factor(scaling_factor)?;
        if data.len() != shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: shape.dims().to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(FixedTensor {
            storage: CpuStorage::from_vec(data),
            shape,
            device: Device::Cpu,
            scaling_factor,
        })
    }

    /// Create a zero-filled host tensor with scaling factor 0.
    pub fn zeros(shape: Shape) -> Self {
        FixedTensor {
            storage: CpuStorage::zeros(shape.numel()),
            shape,
            device: Device::Cpu,
            scaling_factor: 0,
        }
    }

    /// Returns the tensor relabeled with `device`. Data is not moved.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage.into_vec()
    }

    /// Quantize `source` into this tensor: `trunc(value * 2^scaling_factor)`.
    ///
    /// The product is formed in `f64` and truncated toward zero, then wrapped
    /// into the ring. This tensor takes the source's shape and records
    /// `scaling_factor`; its placement is kept.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_float_point_type<U: FloatElement>(
        &mut self,
        source: &FloatTensor<U>,
        scaling_factor: u32,
    ) -> Result<&mut Self> {
        let scale = check_scaling_factor(scaling_factor)?;
        trace!(
            "from_float_point_type: {} {} -> {} at scale 2^{}",
            U::DTYPE,
            source.shape(),
            T::DTYPE,
            scaling_factor
        );
        let data = source
            .data()
            .iter()
            .map(|v| T::from_f64_truncated(v.to_f64() * scale))
            .collect();
        self.storage = CpuStorage::from_vec(data);
        self.shape = source.shape().clone();
        self.scaling_factor = scaling_factor;
        Ok(self)
    }

    /// Resize to `shape` and fill every element with the quantized `scalar`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_float_point_scalar<U: FloatElement>(
        &mut self,
        scalar: U,
        shape: Shape,
        scaling_factor: u32,
    ) -> Result<&mut Self> {
        let scale = check_scaling_factor(scaling_factor)?;
        let raw = T::from_f64_truncated(scalar.to_f64() * scale);
        trace!(
            "from_float_point_scalar: {:?} -> {:?} filling {}",
            scalar,
            raw,
            shape
        );
        self.reshape(shape);
        self.storage.as_mut_slice().fill(raw);
        self.scaling_factor = scaling_factor;
        Ok(self)
    }

    /// Decode into floating point: `raw / 2^scaling_factor`.
    pub fn to_float_point<U: FloatElement>(&self) -> FloatTensor<U> {
        let scale = scale_of(self.scaling_factor);
        let data = self
            .storage
            .as_slice()
            .iter()
            .map(|raw| U::from_f64(raw.as_f64() / scale))
            .collect();
        FloatTensor::from_parts(CpuStorage::from_vec(data), self.shape.clone())
    }

    /// `self = op(self, rhs)`, the in-place form of the binary family.
    pub fn binary_assign(&mut self, rhs: &Self, op: BinaryOp) -> Result<()> {
        check_placement(self.device, rhs.device)?;
        self.shape.ensure_eq(&rhs.shape)?;
        default_backend().binary_assign(op, self.storage.as_mut_slice(), rhs.storage.as_slice())
    }

    /// `self = op(self)`, the in-place form of the unary and shift family.
    pub fn unary_assign(&mut self, op: UnaryOp) -> Result<()> {
        ComputeBackend::<T>::unary_assign(default_backend(), op, self.storage.as_mut_slice())
    }

    /// `dst = op(self, rhs)` on an explicit backend.
    pub fn binary_with(
        &self,
        rhs: &Self,
        dst: &mut Self,
        op: BinaryOp,
        backend: &dyn ComputeBackend<T>,
    ) -> Result<()> {
        check_placement(self.device, rhs.device)?;
        check_placement(self.device, dst.device)?;
        self.shape.ensure_eq(&rhs.shape)?;
        self.shape.ensure_eq(&dst.shape)?;
        backend.binary(
            op,
            self.storage.as_slice(),
            rhs.storage.as_slice(),
            dst.storage.as_mut_slice(),
        )
    }

    /// `dst = op(self)` on an explicit backend.
    pub fn unary_with(
        &self,
        dst: &mut Self,
        op: UnaryOp,
        backend: &dyn ComputeBackend<T>,
    ) -> Result<()> {
        check_placement(self.device, dst.device)?;
        self.shape.ensure_eq(&dst.shape)?;
        backend.unary(op, self.storage.as_slice(), dst.storage.as_mut_slice())
    }

    /// Validate a batched product and describe it for the backend.
    fn matmul_dims(
        &self,
        rhs: &Self,
        dst: &Self,
        trans_lhs: bool,
        trans_rhs: bool,
    ) -> Result<MatMulDims> {
        check_placement(self.device, rhs.device)?;
        check_placement(self.device, dst.device)?;

        let [batch, lhs_rows, lhs_cols] = self.shape.as_batched_matrix("mat_mul")?;
        let [rhs_batch, rhs_rows, rhs_cols] = rhs.shape.as_batched_matrix("mat_mul")?;
        dst.shape.as_batched_matrix("mat_mul")?;
        if rhs.shape.ndim() > self.shape.ndim() {
            return Err(TensorError::UnsupportedRank {
                op: "mat_mul",
                rank: rhs.shape.ndim(),
            });
        }

        let (m, k) = if trans_lhs {
            (lhs_cols, lhs_rows)
        } else {
            (lhs_rows, lhs_cols)
        };
        let (rhs_k, n) = if trans_rhs {
            (rhs_cols, rhs_rows)
        } else {
            (rhs_rows, rhs_cols)
        };
        if k != rhs_k {
            return Err(TensorError::ShapeMismatch {
                expected: vec![k],
                got: vec![rhs_k],
            });
        }
        if rhs_batch != batch && rhs_batch != 1 {
            return Err(TensorError::ShapeMismatch {
                expected: vec![batch],
                got: vec![rhs_batch],
            });
        }

        let expected = if dst.shape.ndim() == 2 && batch == 1 {
            vec![m, n]
        } else {
            vec![batch, m, n]
        };
        if dst.shape.dims() != expected.as_slice() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: dst.shape.dims().to_vec(),
            });
        }

        Ok(MatMulDims {
            batch,
            rhs_batch,
            m,
            k,
            n,
            trans_lhs,
            trans_rhs,
        })
    }

    /// Batched matrix product on an explicit backend.
    ///
    /// See [`TensorAdapter::mat_mul`] for the accepted shapes.
    pub fn mat_mul_with(
        &self,
        rhs: &Self,
        dst: &mut Self,
        trans_lhs: bool,
        trans_rhs: bool,
        backend: &dyn ComputeBackend<T>,
    ) -> Result<()> {
        let dims = self.matmul_dims(rhs, dst, trans_lhs, trans_rhs)?;
        debug!(
            "mat_mul on {}: {} x {} -> {} via {}",
            self.device,
            self.shape,
            rhs.shape,
            dst.shape,
            backend.name()
        );
        backend.batched_matmul(
            self.storage.as_slice(),
            rhs.storage.as_slice(),
            dst.storage.as_mut_slice(),
            &dims,
        )
    }
}

impl<T: RingElement> TensorAdapter<T> for FixedTensor<T> {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn numel(&self) -> usize {
        self.storage.len()
    }

    fn scaling_factor(&self) -> u32 {
        self.scaling_factor
    }

    fn set_scaling_factor(&mut self, scaling_factor: u32) -> Result<()> {
        check_scaling_factor(scaling_factor)?;
        self.scaling_factor = scaling_factor;
        Ok(())
    }

    fn data(&self) -> &[T] {
        self.storage.as_slice()
    }

    fn data_mut(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    fn reshape(&mut self, shape: Shape) {
        if shape.numel() != self.storage.len() {
            debug!("reshape {} -> {}: reallocating", self.shape, shape);
        }
        self.storage.reallocate(shape.numel());
        self.shape = shape;
    }

    fn add(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Add, default_backend())
    }

    fn sub(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Sub, default_backend())
    }

    fn mul(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Mul, default_backend())
    }

    fn div(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Div, default_backend())
    }

    fn negative(&self, dst: &mut Self) -> Result<()> {
        self.unary_with(dst, UnaryOp::Neg, default_backend())
    }

    fn bitwise_and(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::And, default_backend())
    }

    fn bitwise_or(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Or, default_backend())
    }

    fn bitwise_xor(&self, rhs: &Self, dst: &mut Self) -> Result<()> {
        self.binary_with(rhs, dst, BinaryOp::Xor, default_backend())
    }

    fn bitwise_not(&self, dst: &mut Self) -> Result<()> {
        self.unary_with(dst, UnaryOp::Not, default_backend())
    }

    fn lshift(&self, amount: u32, dst: &mut Self) -> Result<()> {
        self.unary_with(dst, UnaryOp::Shl(amount), default_backend())
    }

    fn rshift(&self, amount: u32, dst: &mut Self) -> Result<()> {
        self.unary_with(dst, UnaryOp::Shr(amount), default_backend())
    }

    fn logical_rshift(&self, amount: u32, dst: &mut Self) -> Result<()> {
        self.unary_with(dst, UnaryOp::LogicalShr(amount), default_backend())
    }

    fn mat_mul(&self, rhs: &Self, dst: &mut Self, trans_lhs: bool, trans_rhs: bool) -> Result<()> {
        self.mat_mul_with(rhs, dst, trans_lhs, trans_rhs, default_backend())
    }

    fn slice(&self, begin: usize, end: usize, dst: &mut Self) -> Result<()> {
        let shape = self.shape.slice_first_axis(begin, end)?;
        let storage = self.storage.copy_rows(begin, end, self.shape.row_len())?;
        dst.storage = storage;
        dst.shape = shape;
        dst.device = self.device;
        dst.scaling_factor = self.scaling_factor;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::{CpuBackend, CpuConfig};
    use approx::assert_abs_diff_eq;

    fn tensor(data: Vec<i64>, dims: Vec<usize>) -> FixedTensor<i64> {
        FixedTensor::new(data, Shape::new(dims), 0).unwrap()
    }

    #[test]
    fn test_new_tensor() {
        let t = FixedTensor::new(vec![1i64, 2, 3, 4, 5, 6], Shape::new(vec![2, 3]), 16).unwrap();
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert_eq!(t.numel(), 6);
        assert_eq!(t.dtype(), DType::I64);
        assert_eq!(t.device(), Device::Cpu);
        assert_eq!(t.scaling_factor(), 16);
        assert_eq!(t.data(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(FixedTensor::new(vec![1i64, 2], Shape::new(vec![3]), 0).is_err());
        assert_eq!(
            FixedTensor::new(vec![1i64], Shape::new(vec![1]), 128).unwrap_err(),
            TensorError::InvalidScalingFactor(128)
        );
    }

    #[test]
    fn test_empty() {
        let t = FixedTensor::<u64>::empty(Device::Accelerator(1));
        assert_eq!(t.numel(), 0);
        assert_eq!(t.shape().dims(), &[0]);
        assert_eq!(t.device(), Device::Accelerator(1));
    }

    #[test]
    fn test_reshape_keeps_or_reallocates() {
        let mut t = FixedTensor::new(vec![1i32, 2, 3, 4, 5, 6], Shape::new(vec![2, 3]), 8).unwrap();
        t.reshape(Shape::new(vec![3, 2]));
        assert_eq!(t.data(), &[1, 2, 3, 4, 5, 6]);
        t.reshape(Shape::new(vec![4]));
        assert_eq!(t.data(), &[0, 0, 0, 0]);
        assert_eq!(t.scaling_factor(), 8);
    }

    #[test]
    fn test_add_sub_mul_div() {
        let a = tensor(vec![10, -20, 30], vec![3]);
        let b = tensor(vec![3, 4, -5], vec![3]);
        let mut dst = FixedTensor::zeros(Shape::new(vec![3]));

        a.add(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[13, -16, 25]);
        a.sub(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[7, -24, 35]);
        a.mul(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[30, -80, -150]);
        a.div(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[3, -5, -6]);
    }

    #[test]
    fn test_add_shape_mismatch_leaves_destination() {
        let a = tensor(vec![1, 2, 3], vec![3]);
        let b = tensor(vec![1, 2], vec![2]);
        let mut dst = tensor(vec![7, 7, 7], vec![3]);
        let err = a.add(&b, &mut dst).unwrap_err();
        assert!(matches!(err, TensorError::ShapeMismatch { .. }));
        assert_eq!(dst.data(), &[7, 7, 7]);
    }

    #[test]
    fn test_destination_is_never_resized() {
        let a = tensor(vec![1, 2, 3], vec![3]);
        let mut dst = tensor(vec![0; 4], vec![4]);
        assert!(a.negative(&mut dst).is_err());
        assert_eq!(dst.shape().dims(), &[4]);
    }

    #[test]
    fn test_placement_mismatch() {
        let a = tensor(vec![1, 2], vec![2]);
        let b = tensor(vec![1, 2], vec![2]).with_device(Device::Accelerator(0));
        let mut dst = FixedTensor::zeros(Shape::new(vec![2]));
        assert_eq!(
            a.add(&b, &mut dst).unwrap_err(),
            TensorError::PlacementMismatch {
                expected: Device::Cpu,
                got: Device::Accelerator(0),
            }
        );
    }

    #[test]
    fn test_bitwise_and_negative() {
        let a = FixedTensor::new(vec![0b1100u8, 0xff], Shape::new(vec![2]), 0).unwrap();
        let b = FixedTensor::new(vec![0b1010u8, 0x0f], Shape::new(vec![2]), 0).unwrap();
        let mut dst = FixedTensor::zeros(Shape::new(vec![2]));
        a.bitwise_and(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[0b1000, 0x0f]);
        a.bitwise_or(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[0b1110, 0xff]);
        a.bitwise_xor(&b, &mut dst).unwrap();
        assert_eq!(dst.data(), &[0b0110, 0xf0]);
        a.bitwise_not(&mut dst).unwrap();
        assert_eq!(dst.data(), &[0b1111_0011, 0x00]);
        a.negative(&mut dst).unwrap();
        assert_eq!(dst.data(), &[0xf4, 0x01]);
    }

    #[test]
    fn test_shift_family() {
        let a = tensor(vec![-16, 16], vec![2]);
        let mut dst = FixedTensor::zeros(Shape::new(vec![2]));
        a.lshift(2, &mut dst).unwrap();
        assert_eq!(dst.data(), &[-64, 64]);
        a.rshift(2, &mut dst).unwrap();
        assert_eq!(dst.data(), &[-4, 4]);
        a.logical_rshift(2, &mut dst).unwrap();
        assert_eq!(dst.data(), &[((-16i64) as u64 >> 2) as i64, 4]);
        a.logical_rshift(0, &mut dst).unwrap();
        assert_eq!(dst.data(), a.data());
        a.logical_rshift(64, &mut dst).unwrap();
        assert_eq!(dst.data(), &[0, 0]);
    }

    #[test]
    fn test_in_place_variants() {
        let mut a = tensor(vec![5, 6], vec![2]);
        let b = tensor(vec![1, 2], vec![2]);
        a.binary_assign(&b, BinaryOp::Add).unwrap();
        assert_eq!(a.data(), &[6, 8]);
        a.unary_assign(UnaryOp::Shr(1)).unwrap();
        assert_eq!(a.data(), &[3, 4]);
        assert!(a.binary_assign(&tensor(vec![1], vec![1]), BinaryOp::Sub).is_err());
    }

    #[test]
    fn test_div_by_zero() {
        let a = tensor(vec![4, 4], vec![2]);
        let b = tensor(vec![1, 0], vec![2]);
        let mut dst = tensor(vec![9, 9], vec![2]);
        assert_eq!(
            a.div(&b, &mut dst).unwrap_err(),
            TensorError::DivisionByZero { index: 1 }
        );
        assert_eq!(dst.data(), &[9, 9]);
    }

    #[test]
    fn test_matmul_2d() {
        let a = tensor(vec![1, 2, 3, 4], vec![2, 2]);
        let b = tensor(vec![5, 6, 7, 8], vec![2, 2]);
        let mut c = FixedTensor::zeros(Shape::new(vec![2, 2]));
        a.mat_mul(&b, &mut c, false, false).unwrap();
        assert_eq!(c.data(), &[19, 22, 43, 50]);
    }

    #[test]
    fn test_matmul_transpose_flags() {
        // a^T where a = [1,2,3;4,5,6] is stored as [3, 2].
        let a_t = tensor(vec![1, 4, 2, 5, 3, 6], vec![3, 2]);
        let b = tensor(vec![1, 0, 0, 1, 1, 1], vec![3, 2]);
        let mut c = FixedTensor::zeros(Shape::new(vec![2, 2]));
        a_t.mat_mul(&b, &mut c, true, false).unwrap();
        assert_eq!(c.data(), &[4, 5, 10, 11]);

        // b^T stored as [2, 3].
        let a = tensor(vec![1, 2, 3, 4, 5, 6], vec![2, 3]);
        let b_t = tensor(vec![1, 0, 1, 0, 1, 1], vec![2, 3]);
        a.mat_mul(&b_t, &mut c, false, true).unwrap();
        assert_eq!(c.data(), &[4, 5, 10, 11]);
    }

    #[test]
    fn test_matmul_dimension_mismatch() {
        let a = tensor(vec![1, 2, 3], vec![1, 3]);
        let b = tensor(vec![1, 2, 3, 4], vec![2, 2]);
        let mut c = tensor(vec![0, 0], vec![1, 2]);
        assert!(matches!(
            a.mat_mul(&b, &mut c, false, false),
            Err(TensorError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_matmul_rank_errors() {
        let v = tensor(vec![1, 2], vec![2]);
        let m = tensor(vec![1, 2, 3, 4], vec![2, 2]);
        let batched = tensor(vec![0; 8], vec![2, 2, 2]);
        let mut c = FixedTensor::zeros(Shape::new(vec![2, 2]));
        assert_eq!(
            v.mat_mul(&m, &mut c, false, false).unwrap_err(),
            TensorError::UnsupportedRank { op: "mat_mul", rank: 1 }
        );
        assert_eq!(
            m.mat_mul(&batched, &mut c, false, false).unwrap_err(),
            TensorError::UnsupportedRank { op: "mat_mul", rank: 3 }
        );
    }

    #[test]
    fn test_matmul_destination_shape() {
        let a = tensor(vec![0; 12], vec![2, 2, 3]);
        let b = tensor(vec![0; 12], vec![3, 4]);
        let mut rank2 = FixedTensor::zeros(Shape::new(vec![2, 4]));
        assert!(a.mat_mul(&b, &mut rank2, false, false).is_err());
        let mut wrong_batch = FixedTensor::zeros(Shape::new(vec![3, 2, 4]));
        assert!(a.mat_mul(&b, &mut wrong_batch, false, false).is_err());
        let mut ok = FixedTensor::zeros(Shape::new(vec![2, 2, 4]));
        assert!(a.mat_mul(&b, &mut ok, false, false).is_ok());
    }

    #[test]
    fn test_matmul_serial_backend() {
        let backend = CpuBackend::with_config(CpuConfig {
            parallel: false,
            ..CpuConfig::default()
        });
        let a = tensor((0..12).collect(), vec![3, 2, 2]);
        let b = tensor(vec![1, 0, 0, 1], vec![2, 2]);
        let mut c = FixedTensor::zeros(Shape::new(vec![3, 2, 2]));
        a.mat_mul_with(&b, &mut c, false, false, &backend).unwrap();
        assert_eq!(c.data(), a.data());
    }

    #[test]
    fn test_from_float_point_type() {
        let source = FloatTensor::new(vec![1.5f64, -1.5, 0.25], Shape::new(vec![3])).unwrap();
        let mut t = FixedTensor::<i64>::empty(Device::Cpu);
        t.from_float_point_type(&source, 16).unwrap();
        assert_eq!(t.data(), &[98304, -98304, 16384]);
        assert_eq!(t.scaling_factor(), 16);
        assert_eq!(t.shape().dims(), &[3]);
    }

    #[test]
    fn test_from_float_point_type_truncates() {
        // 0.7 * 2^2 = 2.8 and -2.8 truncate toward zero.
        let source = FloatTensor::new(vec![0.7f32, -0.7], Shape::new(vec![2])).unwrap();
        let mut t = FixedTensor::<i32>::empty(Device::Cpu);
        t.from_float_point_type(&source, 2).unwrap();
        assert_eq!(t.data(), &[2, -2]);
    }

    #[test]
    fn test_from_float_point_scalar() {
        let mut t = FixedTensor::<i64>::zeros(Shape::new(vec![1]));
        t.from_float_point_scalar(0.5f64, Shape::new(vec![2, 3]), 10).unwrap();
        assert_eq!(t.shape().dims(), &[2, 3]);
        assert_eq!(t.data(), &[512; 6]);
        assert_eq!(t.scaling_factor(), 10);
    }

    #[test]
    fn test_from_float_rejects_scaling_factor() {
        let mut t = FixedTensor::<i64>::zeros(Shape::new(vec![2]));
        assert!(t.from_float_point_scalar(1.0f32, Shape::new(vec![3]), 200).is_err());
        assert_eq!(t.shape().dims(), &[2]);
    }

    #[test]
    fn test_to_float_point() {
        let t = FixedTensor::new(vec![98304i64, -32768], Shape::new(vec![2]), 16).unwrap();
        let f = t.to_float_point::<f64>();
        assert_eq!(f.shape().dims(), &[2]);
        assert_abs_diff_eq!(f.data()[0], 1.5);
        assert_abs_diff_eq!(f.data()[1], -0.5);
    }

    #[test]
    fn test_set_scaling_factor_bounds() {
        let mut t = FixedTensor::new(vec![4i64], Shape::new(vec![1]), 0).unwrap();
        t.set_scaling_factor(127).unwrap();
        assert_eq!(t.scaling_factor(), 127);

        assert_eq!(
            t.set_scaling_factor(128).unwrap_err(),
            TensorError::InvalidScalingFactor(128)
        );
        assert_eq!(
            t.set_scaling_factor(u32::MAX).unwrap_err(),
            TensorError::InvalidScalingFactor(u32::MAX)
        );
        assert_eq!(t.scaling_factor(), 127);

        t.set_scaling_factor(2).unwrap();
        assert_abs_diff_eq!(t.to_float_point::<f64>().data()[0], 1.0);
    }

    #[test]
    fn test_to_float_point_large_scale_divides() {
        let t = FixedTensor::new(vec![1i128 << 100], Shape::new(vec![1]), 100).unwrap();
        assert_abs_diff_eq!(t.to_float_point::<f64>().data()[0], 1.0);
        let tiny = FixedTensor::new(vec![4i64], Shape::new(vec![1]), 127).unwrap();
        let decoded = tiny.to_float_point::<f64>().data()[0];
        assert!(decoded > 0.0 && decoded < 4.0);
    }

    #[test]
    fn test_slice() {
        let t = FixedTensor::new((0i64..10).collect(), Shape::new(vec![5, 2]), 12).unwrap();
        let mut dst = FixedTensor::empty(Device::Cpu);
        t.slice(1, 3, &mut dst).unwrap();
        assert_eq!(dst.shape().dims(), &[2, 2]);
        assert_eq!(dst.data(), &[2, 3, 4, 5]);
        assert_eq!(dst.scaling_factor(), 12);
    }

    #[test]
    fn test_slice_out_of_range() {
        let t = tensor(vec![0; 5], vec![5]);
        let mut dst = tensor(vec![1], vec![1]);
        assert_eq!(
            t.slice(3, 1, &mut dst).unwrap_err(),
            TensorError::IndexOutOfRange { begin: 3, end: 1, len: 5 }
        );
        assert!(t.slice(2, 6, &mut dst).is_err());
        assert_eq!(dst.data(), &[1]);
    }
}
