/// Native function support.
///
/// Defines the `NativeFunction` wrapper that lets host closures be bound in a
/// namespace and called from ox code like any declared function.
pub mod native;

pub mod core;
