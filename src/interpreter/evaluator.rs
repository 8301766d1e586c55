/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operations in expressions: arithmetic,
/// sequence concatenation and repetition, comparisons and logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation and logical NOT.
pub mod unary;

/// Core evaluation logic and runtime state.
///
/// Contains the `Runtime`, the `Flow` signal threaded through bodies, the
/// entry points that execute source units and the dispatch over expressions
/// and declarations.
pub mod core;

/// Name resolution and assignment.
///
/// Resolves dotted names against the innermost call frame and the global
/// namespace, and writes through dotted assignment targets.
pub mod scope;

/// Evaluation of conditionals and loops.
///
/// Runs `if` chains, `while` loops, C-style `for` loops and `for ... in`
/// loops, consuming `break` and `continue` at the innermost loop.
pub mod control;

/// Library imports.
///
/// Resolves module paths against the configured library roots and executes
/// the resolved library into the global namespace.
pub mod import;

/// Utility functions for evaluation.
///
/// Provides helpers shared by evaluation logic, such as subscripting.
pub mod utils;

/// Function evaluation.
///
/// Handles user-defined, struct and native calls, argument checking and the
/// builtin function table.
pub mod function;
