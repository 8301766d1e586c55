/// Built-in function implementations.
///
/// Contains the native functions bound in every fresh global namespace:
/// output, length, string conversion and type inspection.
pub mod builtin;

/// Call evaluation.
///
/// Resolves callees, checks arity, binds parameters (collecting variadic
/// arguments into a list) and runs functions in their own frame under the
/// call depth bound.
pub mod core;
