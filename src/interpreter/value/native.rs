use std::fmt;

use crate::{
    ast::{Param, Params},
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Signature of host functions callable from ox code.
pub type NativeFn = dyn Fn(&[Value]) -> EvalResult<Value>;

/// A host function registered under a name.
///
/// Natives are called with the flat list of evaluated arguments after the
/// runtime has checked the argument count against `params`.
pub struct NativeFunction {
    /// The name the function is registered under.
    pub name:   String,
    /// Declared parameters; only the last may be variadic.
    pub params: Vec<Param>,
    func:       Box<NativeFn>,
}

impl NativeFunction {
    /// Wraps `func` as a native function.
    ///
    /// A trailing `...` on the last parameter name marks it variadic.
    ///
    /// # Example
    /// ```
    /// use oxlang::{
    ///     ast::Params,
    ///     interpreter::value::{core::Value, native::NativeFunction},
    /// };
    ///
    /// let sum = NativeFunction::new("sum", &["first", "rest..."], |args| {
    ///     Ok(Value::Integer(args.len() as i64))
    /// });
    ///
    /// assert!(sum.is_variadic());
    /// assert!(sum.accepts(1));
    /// assert!(!sum.accepts(0));
    /// ```
    pub fn new(name: impl Into<String>,
               params: &[&str],
               func: impl Fn(&[Value]) -> EvalResult<Value> + 'static)
               -> Self {
        let last = params.len().saturating_sub(1);
        let params = params.iter()
                           .enumerate()
                           .map(|(index, raw)| match raw.strip_suffix("...") {
                               Some(name) if index == last => Param { name:     name.to_string(),
                                                                      variadic: true, },
                               _ => Param { name:     (*raw).to_string(),
                                            variadic: false, },
                           })
                           .collect();

        Self { name: name.into(),
               params,
               func: Box::new(func) }
    }

    /// Invokes the host function.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.func)(args)
    }
}

impl Params for NativeFunction {
    fn params(&self) -> &[Param] {
        &self.params
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}
