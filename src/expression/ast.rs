use crate::foundation::core::Channel;

/// A compiled formula: `head op₁ v₁ op₂ v₂ …`, folded strictly left to right.
///
/// Without precedence levels the chain never nests, so it is stored flat.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expr {
    pub(crate) head: Operand,
    pub(crate) tail: Vec<(BinaryOp, Operand)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operand {
    Lit(f64),
    /// `r0`, `g3`, ...: one channel of one color slot of the input state.
    Component { channel: Channel, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub(crate) fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}
