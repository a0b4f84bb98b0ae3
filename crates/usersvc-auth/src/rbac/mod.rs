//! Role-based permission evaluation.

pub mod evaluator;

pub use evaluator::PermissionEvaluator;
