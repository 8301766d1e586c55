/// Operator dispatch.
///
/// Routes a binary operator and its two evaluated operands to the handler for
/// that family of operators.
pub mod core;

/// Arithmetic on numbers.
///
/// Checked integer arithmetic, promotion of mixed operands to reals and
/// division, which always yields a real.
pub mod scalar;

/// Exponentiation.
pub mod power;

/// Equality and ordering comparisons.
pub mod comparison;

/// Eager logical `&&` and `||`.
pub mod logic;

/// Concatenation and repetition of strings and lists.
pub mod sequence;
