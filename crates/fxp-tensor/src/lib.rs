//! `fxp-tensor` - Fixed-point ring tensors for secret-shared computation.
//!
//! This crate provides:
//! - The `TensorAdapter` contract protocols program against
//! - `FixedTensor`, ring-word tensors carrying a fixed-point scaling factor
//! - A `ComputeBackend` trait and the reference `CpuBackend`, with
//!   batch-parallel matrix multiplication
//! - Truncating float-to-fixed conversion and bit-exact shift emulation
//!
//! Arithmetic is modulo `2^BITS` of the word type.

pub mod adapter;
pub mod backend;
pub mod cpu;
pub mod device;
pub mod dtype;
pub mod element;
pub mod error;
pub mod float;
pub mod ops;
pub mod shape;
pub mod storage;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use adapter::TensorAdapter;
pub use backend::ComputeBackend;
pub use cpu::{default_backend, CpuBackend, CpuConfig};
pub use device::Device;
pub use dtype::DType;
pub use element::{FloatElement, RingElement};
pub use error::{Result, TensorError};
pub use float::FloatTensor;
pub use ops::{BinaryOp, MatMulDims, UnaryOp};
pub use shape::Shape;
pub use storage::CpuStorage;
pub use tensor::{FixedTensor, MAX_SCALING_FACTOR};
