//! Scalar kernels for the elementwise and shift families.

use std::fmt;

use crate::element::RingElement;
use crate::error::{Result, TensorError};
use crate::ops::{BinaryOp, UnaryOp};

#[inline]
pub fn apply_binary<T: RingElement>(op: BinaryOp, x: T, y: T) -> T {
    match op {
        BinaryOp::Add => x.wrapping_add(&y),
        BinaryOp::Sub => x.wrapping_sub(&y),
        BinaryOp::Mul => x.wrapping_mul(&y),
        BinaryOp::Div => x.wrapping_div(y),
        BinaryOp::And => x & y,
        BinaryOp::Or => x | y,
        BinaryOp::Xor => x ^ y,
    }
}

#[inline]
pub fn apply_unary<T: RingElement>(op: UnaryOp, x: T) -> T {
    match op {
        UnaryOp::Neg => x.wrapping_neg(),
        UnaryOp::Not => !x,
        UnaryOp::Shl(amount) => shl(x, amount),
        UnaryOp::Shr(amount) => shr(x, amount),
        UnaryOp::LogicalShr(amount) => logical_shr(x, amount),
    }
}

/// Left shift; shifting by the word width or more yields zero.
#[inline]
pub fn shl<T: RingElement>(x: T, amount: u32) -> T {
    x.checked_shl(amount).unwrap_or_else(T::zero)
}

/// Native right shift; shifting by the word width or more yields the sign fill.
#[inline]
pub fn shr<T: RingElement>(x: T, amount: u32) -> T {
    x.checked_shr(amount).unwrap_or_else(|| {
        if x < T::zero() {
            !T::zero()
        } else {
            T::zero()
        }
    })
}

/// Zero-filling right shift on a possibly signed word.
///
/// The native shift is masked down to its low `BITS - amount` bits, so the
/// sign-extended high bits of a signed word are cleared.
#[inline]
pub fn logical_shr<T: RingElement>(x: T, amount: u32) -> T {
    if amount >= T::BITS {
        return T::zero();
    }
    // Top bit of the mask, then fill everything below it.
    let top = T::one() << (T::BITS - amount - 1) as usize;
    let mask = top | top.wrapping_sub(&T::one());
    (x >> amount as usize) & mask
}

/// Fails on the first zero divisor so that no output is written.
pub fn check_divisors<T: RingElement>(divisors: &[T]) -> Result<()> {
    match divisors.iter().position(|d| d.is_zero()) {
        Some(index) => Err(TensorError::DivisionByZero { index }),
        None => Ok(()),
    }
}

/// Fails unless a kernel operand holds `expected` elements. `op` is only
/// rendered on the error path.
pub fn check_len<D: fmt::Display>(op: D, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(TensorError::Other(format!(
            "{}: slice length {} but expected {}",
            op, got, expected
        )));
    }
    Ok(())
}
