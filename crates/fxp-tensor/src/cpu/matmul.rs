//! Batched ring-word matrix product.

use rayon::prelude::*;

use crate::element::RingElement;
use crate::ops::MatMulDims;

/// One `[m, k] x [k, n]` product into `out`, honoring the transpose flags.
///
/// `lhs` is stored as `[m, k]`, or `[k, m]` when `trans_lhs`; `rhs` is stored
/// as `[k, n]`, or `[n, k]` when `trans_rhs`.
pub fn matmul_slice<T: RingElement>(lhs: &[T], rhs: &[T], out: &mut [T], dims: &MatMulDims) {
    let MatMulDims { m, k, n, .. } = *dims;
    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            for p in 0..k {
                let a = if dims.trans_lhs { lhs[p * m + i] } else { lhs[i * k + p] };
                let b = if dims.trans_rhs { rhs[j * k + p] } else { rhs[p * n + j] };
                sum = sum.wrapping_add(&a.wrapping_mul(&b));
            }
            out[i * n + j] = sum;
        }
    }
}

/// Runs every batch slice of `dims`, optionally across the rayon pool.
///
/// Slice lengths must already match `dims`. Each batch index writes only its
/// own `[m, n]` chunk of `out`.
pub fn batched_matmul<T: RingElement>(
    lhs: &[T],
    rhs: &[T],
    out: &mut [T],
    dims: &MatMulDims,
    parallel: bool,
) {
    let lhs_stride = dims.m * dims.k;
    let rhs_len = dims.k * dims.n;
    let rhs_stride = if dims.rhs_batch == 1 { 0 } else { rhs_len };
    let out_stride = dims.m * dims.n;
    if out_stride == 0 {
        return;
    }

    let run = |(i, chunk): (usize, &mut [T])| {
        let a = &lhs[i * lhs_stride..(i + 1) * lhs_stride];
        let b = &rhs[i * rhs_stride..i * rhs_stride + rhs_len];
        matmul_slice(a, b, chunk, dims);
    };

    if parallel {
        out.par_chunks_mut(out_stride).enumerate().for_each(&run);
    } else {
        out.chunks_mut(out_stride).enumerate().for_each(&run);
    }
}
