pub mod elementwise;
pub mod matmul;

use std::env;
use std::sync::OnceLock;

use log::{debug, trace};

use crate::backend::ComputeBackend;
use crate::element::RingElement;
use crate::error::Result;
use crate::ops::{BinaryOp, MatMulDims, UnaryOp};

use elementwise::{apply_binary, apply_unary, check_divisors, check_len};

/// Environment variable toggling batch parallelism (`0`/`false` disables).
pub const ENV_PARALLEL: &str = "FXP_TENSOR_PARALLEL";
/// Environment variable overriding [`CpuConfig::min_parallel_batch`].
pub const ENV_MIN_PARALLEL_BATCH: &str = "FXP_TENSOR_MIN_PARALLEL_BATCH";

/// Execution settings for [`CpuBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuConfig {
    /// Distribute batch slices of a matmul across the rayon pool.
    pub parallel: bool,
    /// Smallest batch size that is worth distributing.
    pub min_parallel_batch: usize,
}

impl CpuConfig {
    /// Read the configuration from the environment.
    ///
    /// Reads `FXP_TENSOR_PARALLEL` and `FXP_TENSOR_MIN_PARALLEL_BATCH`; absent
    /// or malformed values keep their defaults.
    pub fn from_env() -> Self {
        CpuConfig::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from `lookup`, which maps a variable name to its
    /// value the way [`CpuConfig::from_env`] reads the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = CpuConfig::default();
        if let Some(value) = lookup(ENV_PARALLEL) {
            match parse_flag(&value) {
                Some(flag) => config.parallel = flag,
                None => debug!("ignoring malformed {}={:?}", ENV_PARALLEL, value),
            }
        }
        if let Some(value) = lookup(ENV_MIN_PARALLEL_BATCH) {
            match value.trim().parse::<usize>() {
                Ok(n) => config.min_parallel_batch = n,
                Err(_) => debug!("ignoring malformed {}={:?}", ENV_MIN_PARALLEL_BATCH, value),
            }
        }
        config
    }

    /// Whether a matmul with `batch` slices should run in parallel.
    pub fn use_parallel(&self, batch: usize) -> bool {
        self.parallel && batch >= self.min_parallel_batch.max(2)
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            parallel: true,
            min_parallel_batch: 2,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// The process-wide backend used by [`TensorAdapter`](crate::TensorAdapter)
/// operations, configured from the environment on first use.
pub fn default_backend() -> &'static CpuBackend {
    static BACKEND: OnceLock<CpuBackend> = OnceLock::new();
    BACKEND.get_or_init(|| {
        let config = CpuConfig::from_env();
        debug!("initializing default cpu backend: {:?}", config);
        CpuBackend::with_config(config)
    })
}

/// Pure-Rust CPU compute backend.
///
/// Elementwise kernels are plain loops. Batched matmul runs one contraction
/// per batch slice, distributed over rayon when [`CpuConfig`] allows it.
#[derive(Debug, Clone, Default)]
pub struct CpuBackend {
    config: CpuConfig,
}

impl CpuBackend {
    pub fn new() -> Self {
        CpuBackend::default()
    }

    pub fn with_config(config: CpuConfig) -> Self {
        CpuBackend { config }
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }
}

impl<T: RingElement> ComputeBackend<T> for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn batched_matmul(
        &self,
        lhs: &[T],
        rhs: &[T],
        out: &mut [T],
        dims: &MatMulDims,
    ) -> Result<()> {
        check_len("mat_mul lhs", dims.lhs_len(), lhs.len())?;
        check_len("mat_mul rhs", dims.rhs_len(), rhs.len())?;
        check_len("mat_mul out", dims.out_len(), out.len())?;

        let parallel = self.config.use_parallel(dims.batch);
        debug!(
            "mat_mul<{}>: batch={} rhs_batch={} [{}x{}] @ [{}x{}] trans=({}, {}) parallel={}",
            T::DTYPE,
            dims.batch,
            dims.rhs_batch,
            dims.m,
            dims.k,
            dims.k,
            dims.n,
            dims.trans_lhs,
            dims.trans_rhs,
            parallel
        );
        matmul::batched_matmul(lhs, rhs, out, dims, parallel);
        Ok(())
    }

    fn binary(&self, op: BinaryOp, a: &[T], b: &[T], out: &mut [T]) -> Result<()> {
        check_len(op, a.len(), b.len())?;
        check_len(op, a.len(), out.len())?;
        if op == BinaryOp::Div {
            check_divisors(b)?;
        }
        trace!("{}<{}>: {} elements", op, T::DTYPE, a.len());
        for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
            *o = apply_binary(op, x, y);
        }
        Ok(())
    }

    fn binary_assign(&self, op: BinaryOp, a: &mut [T], b: &[T]) -> Result<()> {
        check_len(op, a.len(), b.len())?;
        if op == BinaryOp::Div {
            check_divisors(b)?;
        }
        trace!("{}<{}> in place: {} elements", op, T::DTYPE, a.len());
        for (x, &y) in a.iter_mut().zip(b) {
            *x = apply_binary(op, *x, y);
        }
        Ok(())
    }

    fn unary(&self, op: UnaryOp, a: &[T], out: &mut [T]) -> Result<()> {
        check_len(op, a.len(), out.len())?;
        trace!("{}<{}>: {} elements", op, T::DTYPE, a.len());
        for (o, &x) in out.iter_mut().zip(a) {
            *o = apply_unary(op, x);
        }
        Ok(())
    }

    fn unary_assign(&self, op: UnaryOp, a: &mut [T]) -> Result<()> {
        trace!("{}<{}> in place: {} elements", op, T::DTYPE, a.len());
        for x in a.iter_mut() {
            *x = apply_unary(op, *x);
        }
        Ok(())
    }
}
