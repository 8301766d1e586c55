use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates a binary operation between two values.
    ///
    /// `+`, `-`, `*` and `/` first try the sequence operations (concatenation
    /// and repetition of strings and lists), then numeric arithmetic. Power
    /// calls `eval_pow`. Equality and ordering operators use
    /// `eval_comparison`, and `&&`/`||` call `eval_logic`.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::BinaryOperator};
    ///
    /// let sum = Runtime::eval_binary(BinaryOperator::Add, &Value::Integer(3), &Value::Real(0.5));
    /// assert_eq!(sum.unwrap(), Value::Real(3.5));
    ///
    /// let joined = Runtime::eval_binary(BinaryOperator::Add, &"ox".into(), &"ide".into());
    /// assert_eq!(joined.unwrap(), Value::from("oxide"));
    /// ```
    pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };

        match op {
            Add | Sub | Mul | Div => {
                if let Some(result) = Self::eval_sequence_op(op, left, right) {
                    return result;
                }
                Self::eval_scalar_op(op, left, right)
            },

            Pow => Self::eval_pow(left, right),

            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },

            And | Or => Ok(Self::eval_logic(op, left, right)),
        }
    }
}
