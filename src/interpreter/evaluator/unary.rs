use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: checked negation of integers, negation of reals.
    /// - `Not`: boolean negation of the operand's truthiness.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    ///
    /// # Returns
    /// The computed `Value` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::UnaryOperator};
    ///
    /// let v = Runtime::eval_unary(UnaryOperator::Negate, &Value::Integer(5)).unwrap();
    /// assert_eq!(v, Value::Integer(-5));
    ///
    /// let v = Runtime::eval_unary(UnaryOperator::Not, &Value::from("")).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => match value {
                Value::Integer(n) => n.checked_neg()
                                      .map(Value::Integer)
                                      .ok_or(RuntimeError::Overflow),
                Value::Real(r) => Ok(Value::Real(-r)),
                _ => Err(RuntimeError::mismatch(format!("can't negate {}", value.type_name()))),
            },
            UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        }
    }
}
