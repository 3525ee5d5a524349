//! Postfix expression representation for numbers game solutions

pub mod record;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use record::{ExpressionRecord, evaluate};
pub use render::{PrintStyle, SolutionLine};
pub use types::{Element, Number, Op, Target, parse_number};
