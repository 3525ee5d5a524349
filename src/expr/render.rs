//! Rendering of expression records as text
//!
//! Reverse-Polish output is the Operator Stack verbatim. Infix output rebuilds
//! the binary tree from the top of the stack, locating each operator's left
//! operand with a balanced backward scan.

use std::fmt;

use crate::expr::record::subexpr_start;
use crate::expr::types::{Element, Op};

/// How solutions are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintStyle {
    /// Reverse Polish notation, e.g. `3 2 *`
    Rpn,
    /// Infix with the minimal parentheses, e.g. `(4 + 3) * 2`
    #[default]
    Expr,
    /// Infix with every compound operand parenthesized
    Paren,
}

impl fmt::Display for PrintStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintStyle::Rpn => write!(f, "rpn"),
            PrintStyle::Expr => write!(f, "expr"),
            PrintStyle::Paren => write!(f, "paren"),
        }
    }
}

impl std::str::FromStr for PrintStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rpn" => Ok(PrintStyle::Rpn),
            "expr" | "infix" => Ok(PrintStyle::Expr),
            "paren" | "parens" => Ok(PrintStyle::Paren),
            _ => Err(format!(
                "Unknown print style: '{}'. Valid options: rpn, expr, paren",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// A postfix element sequence rendered in a given style
#[derive(Debug, Clone, Copy)]
pub struct Rendered<'a> {
    ops: &'a [Element],
    style: PrintStyle,
}

pub fn render(ops: &[Element], style: PrintStyle) -> Rendered<'_> {
    Rendered { ops, style }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            PrintStyle::Rpn => write_rpn(f, self.ops),
            PrintStyle::Expr => write_root(f, self.ops, false),
            PrintStyle::Paren => write_root(f, self.ops, true),
        }
    }
}

/// One output line: the rendered expression, prefixed with its value when the
/// job accepts a range of targets.
#[derive(Debug, Clone, Copy)]
pub struct SolutionLine<'a> {
    rendered: Rendered<'a>,
    show_value: bool,
}

impl<'a> SolutionLine<'a> {
    pub fn new(ops: &'a [Element], style: PrintStyle, show_value: bool) -> Self {
        Self {
            rendered: render(ops, style),
            show_value,
        }
    }
}

impl fmt::Display for SolutionLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_value {
            if let Some(last) = self.rendered.ops.last() {
                write!(f, "{} = ", last.value)?;
            }
        }
        fmt::Display::fmt(&self.rendered, f)
    }
}

fn write_rpn(f: &mut fmt::Formatter<'_>, ops: &[Element]) -> fmt::Result {
    for (index, element) in ops.iter().enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", element)?;
    }
    Ok(())
}

fn write_root(f: &mut fmt::Formatter<'_>, ops: &[Element], parenthesize_all: bool) -> fmt::Result {
    match ops.len().checked_sub(1) {
        Some(top) => write_infix(f, ops, top, parenthesize_all),
        None => Ok(()),
    }
}

fn write_infix(
    f: &mut fmt::Formatter<'_>,
    ops: &[Element],
    end: usize,
    parenthesize_all: bool,
) -> fmt::Result {
    let element = ops[end];
    let Some(symbol) = element.op.symbol() else {
        return write!(f, "{}", element.value);
    };

    let rhs_end = end.checked_sub(1).ok_or(fmt::Error)?;
    let lhs_end = subexpr_start(ops, rhs_end)
        .checked_sub(1)
        .ok_or(fmt::Error)?;

    write_operand(f, ops, lhs_end, element.op, Side::Left, parenthesize_all)?;
    write!(f, " {} ", symbol)?;
    write_operand(f, ops, rhs_end, element.op, Side::Right, parenthesize_all)
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    ops: &[Element],
    end: usize,
    parent: Op,
    side: Side,
    parenthesize_all: bool,
) -> fmt::Result {
    if needs_parens(parent, ops[end].op, side, parenthesize_all) {
        f.write_str("(")?;
        write_infix(f, ops, end, parenthesize_all)?;
        f.write_str(")")
    } else {
        write_infix(f, ops, end, parenthesize_all)
    }
}

fn needs_parens(parent: Op, child: Op, side: Side, parenthesize_all: bool) -> bool {
    if child.is_value() {
        return false;
    }
    if parenthesize_all {
        return true;
    }
    let (parent_prec, child_prec) = (parent.precedence(), child.precedence());
    child_prec < parent_prec
        || (side == Side::Right && child_prec == parent_prec && parent.is_left_associative_only())
}
