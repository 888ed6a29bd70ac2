use crate::dtype::DType;
use crate::element::FloatElement;
use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::storage::CpuStorage;

/// A floating point tensor: the plaintext side of fixed-point conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatTensor<U> {
    storage: CpuStorage<U>,
    shape: Shape,
}

impl<U: FloatElement> FloatTensor<U> {
    /// Create a tensor from row-major data and a shape.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `data.len() != shape.numel()`.
    pub fn new(data: Vec<U>, shape: Shape) -> Result<Self> {
        if data.len() != shape.numel() {
            return Err(TensorError::ShapeMismatch {
                expected: shape.dims().to_vec(),
                got: vec![data.len()],
            });
        }
        Ok(FloatTensor {
            storage: CpuStorage::from_vec(data),
            shape,
        })
    }

    pub(crate) fn from_parts(storage: CpuStorage<U>, shape: Shape) -> Self {
        debug_assert_eq!(storage.len(), shape.numel());
        FloatTensor { storage, shape }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dtype(&self) -> DType {
        U::DTYPE
    }

    pub fn numel(&self) -> usize {
        self.storage.len()
    }

    pub fn data(&self) -> &[U] {
        self.storage.as_slice()
    }
}
