use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// No context exposes this (possibly dotted) name.
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The name as written.
        name: String,
    },
    /// Called a name that no context exposes.
    #[error("undefined function: {name}")]
    UndefinedFunction {
        /// The name as written.
        name: String,
    },
    /// The callee resolved to something that cannot be called.
    #[error("can't call {name}: {type_name} is not a function or struct")]
    NotCallable {
        /// The name as written.
        name:      String,
        /// The type of the resolved value.
        type_name: &'static str,
    },
    /// The wrong number of arguments was supplied.
    #[error("function or struct {name} expected {}{expected} args, got {found}",
            at_least(.variadic))]
    ArityMismatch {
        /// The function or struct name.
        name:     String,
        /// The required number of arguments.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// Whether the callee accepts extra trailing arguments.
        variadic: bool,
    },
    /// An operator or builtin received operands it does not support.
    #[error("type mismatch: {details}")]
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
    },
    /// A for-in loop was given something other than text or a list.
    #[error("can't iterate: {type_name} is not a string or list")]
    NotIterable {
        /// The type of the value.
        type_name: &'static str,
    },
    /// No library root contains the imported module.
    #[error("library not found: {module}")]
    LibraryNotFound {
        /// The dotted module path.
        module: String,
    },
    /// A library file was found but could not be read.
    #[error("can't read library {module}: {reason}")]
    LibraryUnreadable {
        /// The dotted module path.
        module: String,
        /// The I/O failure.
        reason: String,
    },
    /// Calls or imports nested deeper than the configured bound.
    #[error("maximum call depth of {depth} exceeded (probably infinite recursion)")]
    StackExhausted {
        /// The bound that was exceeded.
        depth: usize,
    },
    /// Attempted division by zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Integer arithmetic overflowed.
    #[error("integer overflow")]
    Overflow,
    /// Indexed past either end of a list or string.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: i64,
        /// The length of the indexed value.
        len:   usize,
    },
    /// A native function reported a failure of its own.
    #[error("{0}")]
    Native(String),
}

impl RuntimeError {
    /// Shorthand for a [`RuntimeError::TypeMismatch`].
    pub fn mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch { details: details.into() }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn at_least(variadic: &bool) -> &'static str {
    if *variadic { "at least " } else { "" }
}
