//! Append-only postfix expression record
//!
//! An [`ExpressionRecord`] holds two co-indexed stacks:
//! - the Operator Stack, the expression in postfix form where every element
//!   also carries the value of the sub-expression it closes
//! - the Outstanding-Value Stack, one [`Pending`] entry per sub-expression that
//!   has not been merged yet
//!
//! Both stacks are mutated strictly in LIFO order by the search, and their
//! capacity is sized once per job so the recursion never allocates.

use crate::expr::types::{Element, Number, Op, Pending};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionRecord {
    ops: Vec<Element>,
    pending: Vec<Pending>,
}

impl ExpressionRecord {
    /// Create a record able to hold an expression over `count` numbers
    pub fn with_capacity(count: usize) -> Self {
        let mut record = Self::default();
        record.reset(count);
        record
    }

    /// Empty both stacks and make room for `count` numbers
    pub fn reset(&mut self, count: usize) {
        self.ops.clear();
        self.pending.clear();
        self.ops.reserve((2 * count).saturating_sub(1));
        self.pending.reserve(count);
    }

    pub fn ops(&self) -> &[Element] {
        &self.ops
    }

    #[allow(dead_code)]
    pub fn pending(&self) -> &[Pending] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of unmerged sub-expressions
    pub fn arity(&self) -> usize {
        self.pending.len()
    }

    /// Value of the record when it holds exactly one complete expression
    pub fn value(&self) -> Option<Number> {
        match self.pending.as_slice() {
            [only] => Some(only.value),
            _ => None,
        }
    }

    /// The two topmost outstanding values, earlier-pushed first
    pub fn top_pair(&self) -> Option<(Pending, Pending)> {
        match self.pending.as_slice() {
            [.., lhs, rhs] => Some((*lhs, *rhs)),
            _ => None,
        }
    }

    pub fn push_value(&mut self, value: Number) {
        self.pending.push(Pending {
            value,
            origin: self.ops.len(),
        });
        self.ops.push(Element::value(value));
    }

    pub fn pop_value(&mut self) {
        debug_assert_eq!(self.ops.last().map(|e| e.op), Some(Op::Val));
        self.ops.pop();
        self.pending.pop();
    }

    /// Replace the two topmost outstanding values with `lhs op rhs`.
    ///
    /// Returns the two entries that were merged so the caller can restore them
    /// with [`ExpressionRecord::unmerge`].
    pub fn merge(&mut self, op: Op, value: Number) -> Option<(Pending, Pending)> {
        debug_assert!(!op.is_value());
        let rhs = self.pending.pop()?;
        let Some(lhs) = self.pending.pop() else {
            self.pending.push(rhs);
            return None;
        };
        self.ops.push(Element::operator(op, value));
        self.pending.push(Pending {
            value,
            origin: lhs.origin,
        });
        Some((lhs, rhs))
    }

    /// Undo the most recent [`ExpressionRecord::merge`]
    pub fn unmerge(&mut self, lhs: Pending, rhs: Pending) {
        debug_assert!(self.ops.last().is_some_and(|e| !e.op.is_value()));
        self.ops.pop();
        self.pending.pop();
        self.pending.push(lhs);
        self.pending.push(rhs);
    }

    /// Operator Stack index of the last element of `entry`'s sub-expression
    pub fn end_of(&self, entry: usize) -> usize {
        match self.pending.get(entry + 1) {
            Some(next) => next.origin - 1,
            None => self.ops.len() - 1,
        }
    }

    /// Bulk copy of another record into this one, reusing the buffers
    pub fn copy_from(&mut self, other: &ExpressionRecord) {
        self.ops.clone_from(&other.ops);
        self.pending.clone_from(&other.pending);
    }
}

/// Index of the first element of the sub-expression that ends at `end`.
///
/// Scans backwards counting how many complete operands are still owed: a value
/// settles one, an operator owes one more.
pub fn subexpr_start(ops: &[Element], end: usize) -> usize {
    let mut owed = 1usize;
    for index in (0..=end).rev() {
        if ops[index].op.is_value() {
            owed -= 1;
        } else {
            owed += 1;
        }
        if owed == 0 {
            return index;
        }
    }
    0
}

/// Evaluate a postfix element sequence, returning `None` if it is not a single
/// well-formed expression or if any intermediate result is not a positive
/// integer.
pub fn evaluate(ops: &[Element]) -> Option<Number> {
    let mut stack: Vec<Number> = Vec::with_capacity(ops.len());
    for element in ops {
        if element.op.is_value() {
            stack.push(element.value);
            continue;
        }
        let rhs = stack.pop()?;
        let lhs = stack.pop()?;
        let value = match element.op {
            Op::Add => lhs.checked_add(rhs)?,
            Op::Sub => lhs.checked_sub(rhs)?,
            Op::Mul => lhs.checked_mul(rhs)?,
            Op::Div if rhs != 0 && lhs % rhs == 0 => lhs / rhs,
            _ => return None,
        };
        if value == 0 {
            return None;
        }
        stack.push(value);
    }
    match stack.as_slice() {
        [value] => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_4_3_add() -> ExpressionRecord {
        let mut record = ExpressionRecord::with_capacity(2);
        record.push_value(4);
        record.push_value(3);
        record.merge(Op::Add, 7).unwrap();
        record
    }

    #[test]
    fn test_push_and_pop_value() {
        let mut record = ExpressionRecord::with_capacity(3);
        assert!(record.is_empty());
        assert_eq!(record.value(), None);

        record.push_value(10);
        assert_eq!(record.arity(), 1);
        assert_eq!(record.value(), Some(10));
        assert_eq!(record.pending()[0], Pending { value: 10, origin: 0 });

        record.push_value(5);
        assert_eq!(record.arity(), 2);
        assert_eq!(record.value(), None);
        assert_eq!(record.pending()[1], Pending { value: 5, origin: 1 });

        record.pop_value();
        record.pop_value();
        assert!(record.is_empty());
        assert_eq!(record.arity(), 0);
    }

    #[test]
    fn test_merge_and_unmerge() {
        let mut record = ExpressionRecord::with_capacity(2);
        record.push_value(4);
        record.push_value(3);
        let before = record.clone();

        let (lhs, rhs) = record.merge(Op::Add, 7).unwrap();
        assert_eq!(record.ops().len(), 3);
        assert_eq!(record.value(), Some(7));
        assert_eq!(record.pending()[0].origin, 0);

        record.unmerge(lhs, rhs);
        assert_eq!(record, before);
    }

    #[test]
    fn test_merge_requires_two_entries() {
        let mut record = ExpressionRecord::with_capacity(1);
        record.push_value(4);
        assert!(record.merge(Op::Add, 8).is_none());
        assert_eq!(record.arity(), 1);
        assert_eq!(record.ops().len(), 1);
    }

    #[test]
    fn test_end_of_entries() {
        // 4 3 + 2 -> pending [7 @0, 2 @3]
        let mut record = record_4_3_add();
        record.push_value(2);
        assert_eq!(record.end_of(0), 2);
        assert_eq!(record.end_of(1), 3);
    }

    #[test]
    fn test_subexpr_start() {
        // 8 4 3 + * : the sub-expression ending at `+` starts at index 1
        let ops = [
            Element::value(8),
            Element::value(4),
            Element::value(3),
            Element::operator(Op::Add, 7),
            Element::operator(Op::Mul, 56),
        ];
        assert_eq!(subexpr_start(&ops, 4), 0);
        assert_eq!(subexpr_start(&ops, 3), 1);
        assert_eq!(subexpr_start(&ops, 2), 2);
        assert_eq!(subexpr_start(&ops, 0), 0);
    }

    #[test]
    fn test_copy_from() {
        let source = record_4_3_add();
        let mut copy = ExpressionRecord::with_capacity(6);
        copy.push_value(99);
        copy.copy_from(&source);
        assert_eq!(copy, source);
    }

    #[test]
    fn test_evaluate() {
        let record = record_4_3_add();
        assert_eq!(evaluate(record.ops()), Some(7));

        let bad_sub = [Element::value(3), Element::value(3), Element::operator(Op::Sub, 0)];
        assert_eq!(evaluate(&bad_sub), None);

        let inexact = [Element::value(7), Element::value(2), Element::operator(Op::Div, 3)];
        assert_eq!(evaluate(&inexact), None);

        let unmerged = [Element::value(7), Element::value(2)];
        assert_eq!(evaluate(&unmerged), None);
    }
}
