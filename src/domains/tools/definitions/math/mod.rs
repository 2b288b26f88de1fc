//! Math tools module.
//!
//! - `add`: sum of two numbers
//! - `multiply`: product of two numbers
//!
//! Both share the operand and result types in `operands`.

pub mod add;
pub mod multiply;
pub mod operands;

pub use add::AddTool;
pub use multiply::MultiplyTool;
pub use operands::{ArithmeticParams, ArithmeticResult};
