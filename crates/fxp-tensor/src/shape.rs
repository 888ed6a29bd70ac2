use crate::error::{Result, TensorError};
use std::fmt;

/// A tensor shape, wrapping a vector of dimension sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Self {
        Shape {
            dims: dims.to_vec(),
        }
    }

    /// The shape of a freshly created tensor: one axis of length zero.
    pub fn empty() -> Self {
        Shape { dims: vec![0] }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of elements in one row along the first axis.
    ///
    /// For `[d0, d1, d2]` this is `d1 * d2`. A rank-0 shape has no first axis
    /// and reports its single element.
    pub fn row_len(&self) -> usize {
        self.dims.iter().skip(1).product()
    }

    /// Fails with `ShapeMismatch` unless `other` is identical to `self`.
    pub fn ensure_eq(&self, other: &Shape) -> Result<()> {
        if self != other {
            return Err(TensorError::ShapeMismatch {
                expected: self.dims.clone(),
                got: other.dims.clone(),
            });
        }
        Ok(())
    }

    /// Views a rank-2 or rank-3 shape as `[batch, rows, cols]`.
    ///
    /// Rank-2 shapes are a batch of one.
    pub fn as_batched_matrix(&self, op: &'static str) -> Result<[usize; 3]> {
        match self.dims.as_slice() {
            &[rows, cols] => Ok([1, rows, cols]),
            &[batch, rows, cols] => Ok([batch, rows, cols]),
            _ => Err(TensorError::UnsupportedRank {
                op,
                rank: self.ndim(),
            }),
        }
    }

    /// The shape of rows `[begin, end)` taken along the first axis.
    pub fn slice_first_axis(&self, begin: usize, end: usize) -> Result<Shape> {
        let len = self.dims.first().copied().unwrap_or(0);
        if self.dims.is_empty() || begin > end || end > len {
            return Err(TensorError::IndexOutOfRange { begin, end, len });
        }
        let mut dims = self.dims.clone();
        dims[0] = end - begin;
        Ok(Shape::new(dims))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}
