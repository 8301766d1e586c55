use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates an equality or ordering comparison.
    ///
    /// `==` and `!=` compare structurally and accept any pair of values.
    /// Ordering operators accept two numbers or two strings; strings compare
    /// lexicographically by code point.
    ///
    /// # Parameters
    /// - `op`: The comparison operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A boolean, or `TypeMismatch` for operands that are not mutually
    /// ordered.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::BinaryOperator};
    ///
    /// let ordered = Runtime::eval_comparison(BinaryOperator::Less, &Value::Integer(1), &1.5.into());
    /// assert_eq!(ordered.unwrap(), Value::Bool(true));
    ///
    /// let mixed = Runtime::eval_comparison(BinaryOperator::Less, &Value::Integer(1), &"2".into());
    /// assert!(mixed.is_err());
    /// ```
    pub fn eval_comparison(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        let result = match op {
            Equal => left == right,
            NotEqual => left != right,
            _ => {
                let ordering = Self::order(op, left, right)?;
                match op {
                    Less => ordering == Some(Ordering::Less),
                    LessEqual => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
                    Greater => ordering == Some(Ordering::Greater),
                    GreaterEqual => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
                    _ => return Err(Self::unsupported(op, left, right)),
                }
            },
        };

        Ok(Value::Bool(result))
    }

    /// Orders two values; `None` when a real operand is NaN.
    fn order(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => Ok(Some(a.cmp(b))),
            (Value::Text(a), Value::Text(b)) => Ok(Some(a.cmp(b))),
            _ => {
                let (a, b) = Self::real_operands(op, left, right)?;
                Ok(a.partial_cmp(&b))
            },
        }
    }
}
