//! Channel formula language.
//!
//! ```text
//! Value     := Component | Literal
//! Component := ('r'|'g'|'b') Digit OpTail?
//! Literal   := Digit+ OpTail?
//! OpTail    := Op Value
//! Op        := '+' | '-' | '*' | '/'
//! ```
//!
//! A formula is compiled once into a flat operand chain and then evaluated at every node of the
//! recursion.

pub(crate) mod ast;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;

use std::fmt;

use crate::expression::ast::{Expr, Operand};
use crate::expression::error::ExprError;
use crate::foundation::core::ColorState;
use crate::foundation::error::QuiltResult;

/// An immutable compiled formula: a pure function from [`ColorState`] to a number.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    expr: Expr,
}

impl Expression {
    /// Compile `src` for states of `numcolors` colors.
    ///
    /// Fails with [`crate::QuiltError::Parse`] on malformed input or when a component
    /// references a color index `>= numcolors`.
    pub fn compile(src: &str, numcolors: usize) -> QuiltResult<Self> {
        Ok(Self::compile_raw(src, numcolors)?)
    }

    pub(crate) fn compile_raw(src: &str, numcolors: usize) -> Result<Self, ExprError> {
        let expr = parser::parse_expr(src, numcolors)?;
        Ok(Self {
            source: src.to_owned(),
            expr,
        })
    }

    /// Evaluate against a state. Evaluation is total.
    pub fn eval(&self, state: &ColorState) -> f64 {
        eval::eval_expr(&self.expr, state)
    }

    /// The formula text this expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_operand(f, self.expr.head)?;
        for &(op, v) in &self.expr.tail {
            write!(f, "{}", op.symbol())?;
            write_operand(f, v)?;
        }
        Ok(())
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, v: Operand) -> fmt::Result {
    match v {
        Operand::Lit(v) => write!(f, "{v}"),
        Operand::Component { channel, index } => write!(f, "{}{index}", channel.letter()),
    }
}
