//! Core value types for the expression representation

use std::fmt;
use std::str::FromStr;

use crate::error::NumbersError;

/// A numbers game value. Zero and negative values never occur.
pub type Number = u64;

/// Operator tag of an Operator Stack element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// A placed source number
    Val,
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// The four combining operators, in the order the search tries them
    pub const BINARY: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    /// Binding strength used when rendering infix text
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 0,
            Op::Mul | Op::Div => 1,
            Op::Val => 2,
        }
    }

    pub fn is_value(self) -> bool {
        self == Op::Val
    }

    /// Operators whose right operand cannot be re-associated
    pub fn is_left_associative_only(self) -> bool {
        matches!(self, Op::Sub | Op::Div)
    }

    pub fn symbol(self) -> Option<char> {
        match self {
            Op::Val => None,
            Op::Add => Some('+'),
            Op::Sub => Some('-'),
            Op::Mul => Some('*'),
            Op::Div => Some('/'),
        }
    }
}

/// One Operator Stack entry: a placed value, or an operator with its result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub op: Op,
    pub value: Number,
}

impl Element {
    pub fn value(value: Number) -> Self {
        Self { op: Op::Val, value }
    }

    pub fn operator(op: Op, value: Number) -> Self {
        Self { op, value }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op.symbol() {
            Some(symbol) => write!(f, "{}", symbol),
            None => write!(f, "{}", self.value),
        }
    }
}

/// One Outstanding-Value Stack entry.
///
/// `origin` is the Operator Stack index of the first element of the
/// sub-expression that evaluates to `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub value: Number,
    pub origin: usize,
}

/// Inclusive target range. A single target is the degenerate range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    start: Number,
    end: Number,
}

impl Target {
    /// Three-digit targets of the standard game, the `--generate` default
    pub const STANDARD: Target = Target {
        start: 100,
        end: 999,
    };

    pub fn exact(value: Number) -> Result<Self, NumbersError> {
        Self::range(value, value)
    }

    pub fn range(start: Number, end: Number) -> Result<Self, NumbersError> {
        if start == 0 {
            return Err(NumbersError::InvalidTarget(format!(
                "{}: targets must be positive",
                start
            )));
        }
        if start > end {
            return Err(NumbersError::InvalidTarget(format!(
                "{}..{}: start is greater than end",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Number {
        self.start
    }

    pub fn end(&self) -> Number {
        self.end
    }

    pub fn contains(&self, value: Number) -> bool {
        self.start <= value && value <= self.end
    }

    /// True when more than one value is accepted
    pub fn is_range(&self) -> bool {
        self.start != self.end
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_range() {
            write!(f, "{}..{}", self.start, self.end)
        } else {
            write!(f, "{}", self.start)
        }
    }
}

impl FromStr for Target {
    type Err = NumbersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<Number>()
                .map_err(|_| NumbersError::InvalidTarget(s.to_string()))
        };

        match s.split_once("..") {
            Some((start, end)) => Target::range(parse(start)?, parse(end)?),
            None => Target::exact(parse(s)?),
        }
    }
}

/// Parse one source number, rejecting zero and anything non-decimal
pub fn parse_number(s: &str) -> Result<Number, NumbersError> {
    match s.parse::<Number>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(NumbersError::InvalidNumber(s.to_string())),
    }
}
