use crate::expression::ast::{BinaryOp, Expr, Operand};
use crate::foundation::core::ColorState;

/// Evaluate a compiled formula against a color state. Total: never fails, never panics.
///
/// Division by exactly zero returns the left operand unchanged.
pub(crate) fn eval_expr(e: &Expr, state: &ColorState) -> f64 {
    e.tail
        .iter()
        .fold(operand(e.head, state), |acc, &(op, rhs)| {
            apply_op(op, acc, operand(rhs, state))
        })
}

fn operand(v: Operand, state: &ColorState) -> f64 {
    match v {
        Operand::Lit(v) => v,
        Operand::Component { channel, index } => {
            state.get(index).map_or(0.0, |color| color.channel(channel))
        }
    }
}

fn apply_op(op: BinaryOp, l: f64, r: f64) -> f64 {
    match op {
        BinaryOp::Add => l + r,
        BinaryOp::Sub => l - r,
        BinaryOp::Mul => l * r,
        BinaryOp::Div => {
            if r == 0.0 {
                l
            } else {
                l / r
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
