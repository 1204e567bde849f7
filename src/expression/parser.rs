use crate::expression::ast::{BinaryOp, Expr, Operand};
use crate::expression::error::ExprError;
use crate::expression::lexer::{Span, Token, TokenKind, lex};

/// Parse a channel formula for a state of `numcolors` colors.
///
/// Operators have no precedence: the chain is folded strictly left to right, so `r0+5*2` is
/// `(r0+5)*2`.
pub(crate) fn parse_expr(src: &str, numcolors: usize) -> Result<Expr, ExprError> {
    let tokens = lex(src)?;
    let mut p = Parser {
        tokens,
        pos: 0,
        numcolors,
    };
    let head = p.parse_value()?;
    let mut tail = Vec::new();
    loop {
        let op = match p.peek().kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Eof => break,
            _ => {
                let span = p.span();
                return Err(ExprError::new(
                    span.start,
                    format!("expected an operator, found '{}'", &src[span.start..span.end]),
                ));
            }
        };
        p.bump();
        tail.push((op, p.parse_value()?));
    }
    Ok(Expr { head, tail })
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    numcolors: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn bump(&mut self) -> &Token {
        let t = &self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        t
    }

    fn span(&self) -> Span {
        self.peek().span
    }

    fn parse_value(&mut self) -> Result<Operand, ExprError> {
        let numcolors = self.numcolors;
        let t = self.bump().clone();
        match t.kind {
            TokenKind::Number(v) => Ok(Operand::Lit(v)),
            TokenKind::Component(channel, digit) => {
                let index = usize::from(digit);
                if index >= numcolors {
                    return Err(ExprError::new(
                        t.span.start,
                        format!(
                            "component {}{index} is outside the {numcolors} available colors",
                            channel.letter()
                        ),
                    ));
                }
                Ok(Operand::Component { channel, index })
            }
            TokenKind::Eof => Err(ExprError::new(
                t.span.start,
                "expected a value, found end of input",
            )),
            other => Err(ExprError::new(
                t.span.start,
                format!("expected a value, found {other:?}"),
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/expression/parser.rs"]
mod tests;
