//! Legality and canonicality rules for combining two outstanding values
//!
//! The search only combines an `lhs` that was pushed before `rhs` when
//! `lhs >= rhs`. On top of that, each operator has a predicate that rejects
//! results which are illegal (zero, fractional, overflowing) and results whose
//! expression is a rearrangement of one the search builds elsewhere:
//!
//! | Operator | Illegal when | Non-canonical when |
//! |---|---|---|
//! | `+` | sum overflows | rhs is `+`/`-`; or lhs is `+` with inner < rhs |
//! | `-` | lhs == rhs; result == rhs | rhs is `-` with lhs < rhs + inner; or lhs is `-` with inner < rhs |
//! | `*` | rhs == 1; product overflows | rhs is `*`/`/`; or lhs is `*` with inner < rhs |
//! | `/` | rhs == 1; inexact; result == rhs | lhs is `/` with inner < rhs |
//!
//! `inner` is the value of the right operand of the operand's own root
//! operator. Requiring it to be at least `rhs` keeps every chain of the same
//! operator in non-increasing construction order.

use crate::expr::{ExpressionRecord, Number, Op};

/// One side of a candidate combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub value: Number,
    /// Root operator of the operand's sub-expression
    pub op: Op,
    /// Value of the root operator's right operand; equals `value` for a bare
    /// number.
    pub inner: Number,
}

impl Operand {
    pub fn number(value: Number) -> Self {
        Self {
            value,
            op: Op::Val,
            inner: value,
        }
    }

    pub fn compound(value: Number, op: Op, inner: Number) -> Self {
        Self { value, op, inner }
    }

    /// Describe the sub-expression whose last Operator Stack element is at `end`
    pub fn at(record: &ExpressionRecord, end: usize) -> Self {
        let ops = record.ops();
        let root = ops[end];
        match root.op {
            Op::Val => Self::number(root.value),
            op => Self::compound(root.value, op, ops[end - 1].value),
        }
    }

    fn chain_below(&self, op: Op, rhs: &Operand) -> bool {
        self.op == op && self.inner < rhs.value
    }
}

/// Result of `lhs + rhs`, or `None` if the combination is skipped
pub fn add(lhs: &Operand, rhs: &Operand) -> Option<Number> {
    if matches!(rhs.op, Op::Add | Op::Sub) || lhs.chain_below(Op::Add, rhs) {
        return None;
    }
    lhs.value.checked_add(rhs.value)
}

/// Result of `lhs - rhs`, or `None` if the combination is skipped
pub fn sub(lhs: &Operand, rhs: &Operand) -> Option<Number> {
    if lhs.value <= rhs.value {
        return None;
    }
    let value = lhs.value - rhs.value;
    if value == rhs.value {
        return None;
    }
    if rhs.op == Op::Sub && lhs.value < rhs.value.saturating_add(rhs.inner) {
        return None;
    }
    if lhs.chain_below(Op::Sub, rhs) {
        return None;
    }
    Some(value)
}

/// Result of `lhs * rhs`, or `None` if the combination is skipped
pub fn mul(lhs: &Operand, rhs: &Operand) -> Option<Number> {
    if rhs.value == 1 {
        return None;
    }
    if matches!(rhs.op, Op::Mul | Op::Div) || lhs.chain_below(Op::Mul, rhs) {
        return None;
    }
    lhs.value.checked_mul(rhs.value)
}

/// Result of `lhs / rhs`, or `None` if the combination is skipped
pub fn div(lhs: &Operand, rhs: &Operand) -> Option<Number> {
    if rhs.value == 1 || lhs.value % rhs.value != 0 {
        return None;
    }
    let value = lhs.value / rhs.value;
    if value == rhs.value || lhs.chain_below(Op::Div, rhs) {
        return None;
    }
    Some(value)
}

/// Dispatch to the predicate for `op`
pub fn apply(op: Op, lhs: &Operand, rhs: &Operand) -> Option<Number> {
    match op {
        Op::Add => add(lhs, rhs),
        Op::Sub => sub(lhs, rhs),
        Op::Mul => mul(lhs, rhs),
        Op::Div => div(lhs, rhs),
        Op::Val => None,
    }
}
