//! Expression system for rill
//!
//! This module provides the expression framework used for representing
//! and evaluating scalar expressions against rows.

pub mod evaluator;
pub mod expression;
pub mod function;

pub use evaluator::*;
pub use expression::*;
pub use function::*;
