use crate::{
    ast::BinaryOperator,
    interpreter::{evaluator::core::Runtime, value::core::Value},
};

impl Runtime {
    /// Evaluates a logical operation on two already evaluated operands.
    ///
    /// The operands are converted to booleans by truthiness, so any pair of
    /// values is accepted. Both sides have been evaluated by the time this is
    /// called; there is no short-circuiting.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::BinaryOperator};
    ///
    /// let both = Runtime::eval_logic(BinaryOperator::And, &Value::Integer(1), &"".into());
    /// assert_eq!(both, Value::Bool(false));
    ///
    /// let either = Runtime::eval_logic(BinaryOperator::Or, &Value::Nil, &vec![Value::Nil].into());
    /// assert_eq!(either, Value::Bool(true));
    /// ```
    #[must_use]
    pub fn eval_logic(op: BinaryOperator, left: &Value, right: &Value) -> Value {
        match op {
            BinaryOperator::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
            _ => Value::Bool(left.is_truthy() && right.is_truthy()),
        }
    }
}
