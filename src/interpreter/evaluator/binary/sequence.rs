use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates the string and list forms of `+` and `*`.
    ///
    /// `+` concatenates two strings or two lists. `*` repeats a string or a
    /// list by an integer count given on either side; a negative count yields
    /// an empty sequence, and a result longer than [`MAX_REPEATED_LEN`] is an
    /// `Overflow`.
    ///
    /// # Returns
    /// `None` if the operands are not a sequence operation, so the caller can
    /// fall back to arithmetic.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, ast::BinaryOperator};
    ///
    /// let twice = Runtime::eval_sequence_op(BinaryOperator::Mul, &Value::Integer(2), &"ab".into());
    /// assert_eq!(twice.unwrap().unwrap(), Value::from("abab"));
    ///
    /// let numbers = Runtime::eval_sequence_op(BinaryOperator::Mul, &Value::Integer(2), &Value::Integer(3));
    /// assert!(numbers.is_none());
    /// ```
    #[must_use]
    pub fn eval_sequence_op(op: BinaryOperator,
                            left: &Value,
                            right: &Value)
                            -> Option<EvalResult<Value>> {
        use Value::{Integer, List, Text};

        let result = match (op, left, right) {
            (BinaryOperator::Add, Text(a), Text(b)) => Ok(Value::from(format!("{a}{b}"))),
            (BinaryOperator::Add, List(a), List(b)) => {
                let mut joined = Vec::with_capacity(a.len() + b.len());
                joined.extend(a.iter().cloned());
                joined.extend(b.iter().cloned());
                Ok(joined.into())
            },
            (BinaryOperator::Mul, Text(text), Integer(count))
            | (BinaryOperator::Mul, Integer(count), Text(text)) => {
                repeat_count(text.len(), *count).map(|n| Value::from(text.repeat(n)))
            },
            (BinaryOperator::Mul, List(items), Integer(count))
            | (BinaryOperator::Mul, Integer(count), List(items)) => {
                repeat_count(items.len(), *count).map(|n| repeat_list(items, n))
            },
            _ => return None,
        };

        Some(result)
    }
}

/// Longest text, in bytes, or list, in elements, that `*` may build.
pub const MAX_REPEATED_LEN: usize = 1 << 24;

/// Clamps a repetition count at zero and checks the repeated length stays
/// within [`MAX_REPEATED_LEN`].
fn repeat_count(len: usize, count: i64) -> EvalResult<usize> {
    let count = usize::try_from(count).unwrap_or(0);
    match len.checked_mul(count) {
        Some(total) if total <= MAX_REPEATED_LEN => Ok(count),
        _ => Err(RuntimeError::Overflow),
    }
}

fn repeat_list(items: &[Value], count: usize) -> Value {
    let repeated: Vec<Value> = items.iter()
                                    .cycle()
                                    .take(items.len() * count)
                                    .cloned()
                                    .collect();
    repeated.into()
}
