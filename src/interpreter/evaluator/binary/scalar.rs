use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates an arithmetic operation on two numbers.
    ///
    /// Two integers use checked `i64` arithmetic; any real operand promotes
    /// the other one. Division always yields a real.
    ///
    /// # Parameters
    /// - `op`: One of `+`, `-`, `*`, `/`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// The result, `Overflow` if integer arithmetic wraps, `DivisionByZero`
    /// for a zero divisor and `TypeMismatch` for non-numeric operands.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::BinaryOperator, error::RuntimeError};
    ///
    /// let quotient = Runtime::eval_scalar_op(BinaryOperator::Div, &Value::Integer(7), &Value::Integer(2));
    /// assert_eq!(quotient.unwrap(), Value::Real(3.5));
    ///
    /// let wrapped = Runtime::eval_scalar_op(BinaryOperator::Add, &i64::MAX.into(), &Value::Integer(1));
    /// assert_eq!(wrapped.unwrap_err(), RuntimeError::Overflow);
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Self::arithmetic(op, left, right, i64::checked_add, |a, b| a + b),
            BinaryOperator::Sub => Self::arithmetic(op, left, right, i64::checked_sub, |a, b| a - b),
            BinaryOperator::Mul => Self::arithmetic(op, left, right, i64::checked_mul, |a, b| a * b),
            BinaryOperator::Div => {
                let (a, b) = Self::real_operands(op, left, right)?;
                if b == 0.0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::Real(a / b))
            },
            _ => Err(Self::unsupported(op, left, right)),
        }
    }

    fn arithmetic(op: BinaryOperator,
                  left: &Value,
                  right: &Value,
                  integer: fn(i64, i64) -> Option<i64>,
                  real: fn(f64, f64) -> f64)
                  -> EvalResult<Value> {
        if let (Value::Integer(a), Value::Integer(b)) = (left, right) {
            return integer(*a, *b).map(Value::Integer)
                                  .ok_or(RuntimeError::Overflow);
        }

        let (a, b) = Self::real_operands(op, left, right)?;
        Ok(Value::Real(real(a, b)))
    }

    /// Both operands as reals, or a `TypeMismatch` naming the operator.
    pub(crate) fn real_operands(op: BinaryOperator,
                                left: &Value,
                                right: &Value)
                                -> EvalResult<(f64, f64)> {
        match (left.as_real(), right.as_real()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(Self::unsupported(op, left, right)),
        }
    }

    pub(crate) fn unsupported(op: BinaryOperator, left: &Value, right: &Value) -> RuntimeError {
        RuntimeError::mismatch(format!("can't apply {op} to {} and {}",
                                       left.type_name(),
                                       right.type_name()))
    }
}
