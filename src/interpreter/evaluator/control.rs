use std::rc::Rc;

use crate::{
    ast::{Conditional, ForInLoop, Loop},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{ExecResult, Flow, Runtime},
        value::core::Value,
    },
};

impl Runtime {
    /// Evaluates an `if` / `else if` / `else` chain.
    ///
    /// Branch conditions are evaluated in order until one is truthy; only
    /// that branch's body runs. A terminal `else` has no condition and is
    /// always taken. Flow signals from the taken body are handed back to the
    /// enclosing body or loop.
    pub fn exec_conditional(&mut self, chain: &Conditional) -> ExecResult<Flow> {
        let mut branch = Some(chain);

        while let Some(current) = branch {
            let taken = match &current.cond {
                Some(cond) => self.eval(cond)?.is_truthy(),
                None => true,
            };
            if taken {
                return self.exec_body(&current.body);
            }
            branch = current.orelse.as_deref();
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `while` loop or a C-style `for` loop.
    ///
    /// The preloop assignment runs once in the current scope. Each iteration
    /// evaluates the condition, stops when it is falsy, runs the body and then
    /// the postloop assignment. `continue` skips to the postloop; `break` ends
    /// the loop without running it.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value};
    ///
    /// let mut runtime = Runtime::new();
    /// runtime.execute("seen = []\nfor i = 0, i <= 3, i += 1 { seen = seen + [i] }").unwrap();
    ///
    /// assert_eq!(runtime.get("seen").unwrap().to_string(), "[0, 1, 2, 3]");
    /// assert_eq!(runtime.get("i"), Some(Value::Integer(4)));
    /// ```
    pub fn exec_loop(&mut self, looped: &Loop) -> ExecResult<Flow> {
        if let Some(preloop) = &looped.preloop {
            self.exec_assign(preloop)?;
        }

        while self.eval(&looped.cond)?.is_truthy() {
            match self.exec_body(&looped.body)? {
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal | Flow::Continue => {},
            }
            if let Some(postloop) = &looped.postloop {
                self.exec_assign(postloop)?;
            }
        }

        Ok(Flow::Normal)
    }

    /// Evaluates a `for ... in` loop.
    ///
    /// The iterated expression is evaluated once. A list yields its elements
    /// and a string its characters, each bound in turn to the loop variable
    /// in the current scope. Changes to the iterated list made by the body do
    /// not affect the iteration.
    ///
    /// # Returns
    /// `NotIterable` for anything other than a string or a list.
    pub fn exec_for_in(&mut self, looped: &ForInLoop) -> ExecResult<Flow> {
        let items = match self.eval(&looped.expr)? {
            Value::List(items) => items,
            Value::Text(text) => Rc::new(text.chars().map(|c| Value::from(c.to_string())).collect()),
            other => {
                let kind = RuntimeError::NotIterable { type_name: other.type_name() };
                return Err(self.error(kind, looped.expr.span()));
            },
        };

        for item in items.iter() {
            self.bind(&looped.var, item.clone());
            match self.exec_body(&looped.body)? {
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
                Flow::Normal | Flow::Continue => {},
            }
        }

        Ok(Flow::Normal)
    }
}
