/// Numeric conversion helpers.
///
/// This module provides the conversions the evaluator needs between `i64`,
/// `usize` and `f64`: promoting integers for mixed arithmetic, resolving
/// negative indices against a length and checked integer powers.
///
/// Every fallible helper returns a `Result` carrying the `RuntimeError` the
/// evaluator reports.
pub mod num;
