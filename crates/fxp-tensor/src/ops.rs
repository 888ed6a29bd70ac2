use std::fmt;

/// Binary elementwise operations over two equal-shape tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Raw integer division, truncating toward zero. No fixed-point rescale.
    Div,
    And,
    Or,
    Xor,
}

/// Unary elementwise operations. Shift amounts are in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    Shl(u32),
    /// Arithmetic for signed words, logical for unsigned ones.
    Shr(u32),
    /// Zero-filling right shift regardless of signedness.
    LogicalShr(u32),
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::And => "bitwise_and",
            BinaryOp::Or => "bitwise_or",
            BinaryOp::Xor => "bitwise_xor",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "negative"),
            UnaryOp::Not => write!(f, "bitwise_not"),
            UnaryOp::Shl(n) => write!(f, "lshift({})", n),
            UnaryOp::Shr(n) => write!(f, "rshift({})", n),
            UnaryOp::LogicalShr(n) => write!(f, "logical_rshift({})", n),
        }
    }
}

/// Problem description for one batched matrix product.
///
/// Operands are viewed as `[batch, rows, cols]`. With `trans_lhs` the lhs
/// slice is read as its transpose, likewise for `trans_rhs`; storage is never
/// moved. `rhs_batch` is either `batch` or 1 (broadcast).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatMulDims {
    pub batch: usize,
    pub rhs_batch: usize,
    /// Output rows.
    pub m: usize,
    /// Contracted length.
    pub k: usize,
    /// Output columns.
    pub n: usize,
    pub trans_lhs: bool,
    pub trans_rhs: bool,
}

impl MatMulDims {
    pub fn lhs_len(&self) -> usize {
        self.batch * self.m * self.k
    }

    pub fn rhs_len(&self) -> usize {
        self.rhs_batch * self.k * self.n
    }

    pub fn out_len(&self) -> usize {
        self.batch * self.m * self.n
    }
}
