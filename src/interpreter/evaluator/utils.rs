use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Runtime},
        value::core::Value,
    },
    util::num::resolve_index,
};

impl Runtime {
    /// Applies one subscript to a value.
    ///
    /// Lists and strings are indexed by integer, counting from the end when
    /// negative; a string yields a one-character string. Records are indexed
    /// by field name.
    ///
    /// # Parameters
    /// - `target`: The indexed value.
    /// - `index`: The evaluated subscript.
    ///
    /// # Returns
    /// The element, `IndexOutOfBounds` past either end, `UndefinedVariable`
    /// naming a missing record field and `TypeMismatch` for anything else.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value};
    ///
    /// let list = Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    /// assert_eq!(Runtime::index_value(&list, &Value::Integer(-1)).unwrap(), Value::Integer(3));
    ///
    /// let text = Value::from("ox");
    /// assert_eq!(Runtime::index_value(&text, &Value::Integer(1)).unwrap(), Value::from("x"));
    /// ```
    pub fn index_value(target: &Value, index: &Value) -> EvalResult<Value> {
        match (target, index) {
            (Value::List(items), Value::Integer(i)) => {
                let position = resolve_index(*i, items.len())?;
                items.get(position)
                     .cloned()
                     .ok_or(RuntimeError::IndexOutOfBounds { index: *i,
                                                             len:   items.len(), })
            },
            (Value::Text(text), Value::Integer(i)) => {
                let len = text.chars().count();
                let position = resolve_index(*i, len)?;
                text.chars()
                    .nth(position)
                    .map(|c| Value::from(c.to_string()))
                    .ok_or(RuntimeError::IndexOutOfBounds { index: *i, len })
            },
            (Value::Record(fields), Value::Text(key)) => {
                fields.get(&**key)
                      .cloned()
                      .ok_or_else(|| RuntimeError::UndefinedVariable { name: key.to_string() })
            },
            _ => Err(RuntimeError::mismatch(format!("can't index {} with {}",
                                                    target.type_name(),
                                                    index.type_name()))),
        }
    }
}
