use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
    util::num::checked_int_pow,
};

impl Runtime {
    /// Evaluates `left ^ right`.
    ///
    /// An integer raised to a non-negative integer stays an integer; every
    /// other combination of numbers yields a real.
    ///
    /// # Parameters
    /// - `left`: The base.
    /// - `right`: The exponent.
    ///
    /// # Returns
    /// The power, `DivisionByZero` when zero is raised to a negative exponent,
    /// `Overflow` when an integer power does not fit and `TypeMismatch` for
    /// non-numeric operands.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, error::RuntimeError};
    ///
    /// assert_eq!(Runtime::eval_pow(&Value::Integer(2), &Value::Integer(10)).unwrap(), Value::Integer(1024));
    /// assert_eq!(Runtime::eval_pow(&Value::Integer(2), &Value::Integer(-1)).unwrap(), Value::Real(0.5));
    /// assert_eq!(Runtime::eval_pow(&Value::Integer(0), &Value::Integer(-1)).unwrap_err(),
    ///            RuntimeError::DivisionByZero);
    /// ```
    pub fn eval_pow(left: &Value, right: &Value) -> EvalResult<Value> {
        if let (Value::Integer(base), Value::Integer(exponent)) = (left, right)
           && *exponent >= 0
        {
            return checked_int_pow(*base, *exponent).map(Value::Integer);
        }

        let (base, exponent) = Self::real_operands(BinaryOperator::Pow, left, right)?;
        if base == 0.0 && exponent < 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(Value::Real(base.powf(exponent)))
    }
}
