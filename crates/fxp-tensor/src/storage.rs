use crate::error::{Result, TensorError};

/// Contiguous, row-major host storage for tensor elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuStorage<T> {
    data: Vec<T>,
}

impl<T: Copy + Default> CpuStorage<T> {
    /// Create default-filled (zero) storage holding `n` elements.
    pub fn zeros(n: usize) -> Self {
        CpuStorage {
            data: vec![T::default(); n],
        }
    }

    /// Create storage from an owned vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        CpuStorage { data }
    }

    /// Number of elements in this storage.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the storage contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Resize to `n` elements. Contents are kept when `n` equals the current
    /// length and replaced by a fresh zeroed allocation otherwise.
    pub fn reallocate(&mut self, n: usize) {
        if self.data.len() != n {
            self.data = vec![T::default(); n];
        }
    }

    /// Copy rows `[begin, end)` of `row_len` elements each into new storage.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if the range is reversed or runs past the end.
    pub fn copy_rows(&self, begin: usize, end: usize, row_len: usize) -> Result<Self> {
        let rows = if row_len == 0 { 0 } else { self.data.len() / row_len };
        if begin > end || (row_len != 0 && end > rows) {
            return Err(TensorError::IndexOutOfRange {
                begin,
                end,
                len: rows,
            });
        }
        if row_len == 0 {
            return Ok(CpuStorage::from_vec(Vec::new()));
        }
        Ok(CpuStorage::from_vec(
            self.data[begin * row_len..end * row_len].to_vec(),
        ))
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
