use crate::ast::*;

/// InterpretErr represents an expression that has no defined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretErr {
    DivisionByZero,
}

impl std::fmt::Display for InterpretErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

/// Evaluates a tree with the same word semantics as the generated code:
/// wrapping 64-bit addition, subtraction and multiplication, and unsigned
/// division.
pub fn interpret(node: ExprNode) -> Result<i64, InterpretErr> {
    match node {
        ExprNode::Literal(value) => Ok(value),
        ExprNode::Binary(op, lhs, rhs) => interpret_binary_expression(op, *lhs, *rhs),
    }
}

pub fn interpret_binary_expression(
    op: BinaryOp,
    lhs: ExprNode,
    rhs: ExprNode,
) -> Result<i64, InterpretErr> {
    let lhs = interpret(lhs)?;
    let rhs = interpret(rhs)?;

    match op {
        BinaryOp::Add => Ok(lhs.wrapping_add(rhs)),
        BinaryOp::Sub => Ok(lhs.wrapping_sub(rhs)),
        BinaryOp::Mul => Ok((lhs as u64).wrapping_mul(rhs as u64) as i64),
        BinaryOp::Div => (lhs as u64)
            .checked_div(rhs as u64)
            .map(|quotient| quotient as i64)
            .ok_or(InterpretErr::DivisionByZero),
    }
}
