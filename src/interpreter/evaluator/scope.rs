use std::rc::Rc;

use crate::{
    ast::Variable,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, ExecResult, Runtime},
        value::core::{Namespace, Value},
    },
};

/// Follows the dotted path of `var` inside one namespace.
fn resolve_in<'a>(namespace: &'a Namespace, var: &Variable) -> Option<&'a Value> {
    let mut current = namespace.get(&var.name)?;

    for attr in &var.attrs {
        current = current.as_record()?.get(attr)?;
    }
    Some(current)
}

/// Mutable access to a record's fields, detaching them from other owners.
fn record_mut(value: &mut Value) -> Option<&mut Namespace> {
    match value {
        Value::Record(fields) => Some(Rc::make_mut(fields)),
        _ => None,
    }
}

impl Runtime {
    /// The namespace plain assignments bind into: the innermost frame, or the
    /// global namespace outside of any call.
    pub(crate) fn current_scope_mut(&mut self) -> &mut Namespace {
        match self.frames.last_mut() {
            Some(frame) => &mut frame.locals,
            None => &mut self.globals,
        }
    }

    /// Binds `name` in the current scope.
    pub(crate) fn bind(&mut self, name: &str, value: Value) {
        self.current_scope_mut().insert(name.to_string(), value);
    }

    /// Resolves a (dotted) name.
    ///
    /// The whole path is tried in the innermost frame first, then in the
    /// global namespace. Descent fails on a missing field or on a value that
    /// is not a record.
    pub(crate) fn lookup(&self, var: &Variable) -> Option<&Value> {
        self.frames
            .last()
            .and_then(|frame| resolve_in(&frame.locals, var))
            .or_else(|| resolve_in(&self.globals, var))
    }

    /// Resolves a (dotted) name or reports it as undefined.
    pub(crate) fn lookup_value(&self, var: &Variable) -> ExecResult<Value> {
        match self.lookup(var) {
            Some(value) => Ok(value.clone()),
            None => Err(self.error(RuntimeError::UndefinedVariable { name: var.raw() }, var.span)),
        }
    }

    /// Assigns `value` to a (dotted) target.
    ///
    /// A plain name is bound in the current scope. A dotted target resolves
    /// its root in the innermost frame, then in the global namespace, walks
    /// the intermediate records and sets the final field, creating it if it
    /// does not exist yet.
    ///
    /// # Parameters
    /// - `target`: The assigned name.
    /// - `value`: The new value.
    ///
    /// # Returns
    /// `UndefinedVariable` naming the whole target if the root is unbound or
    /// the path crosses something that is not a record.
    pub(crate) fn assign(&mut self, target: &Variable, value: Value) -> EvalResult<()> {
        let Some((last, path)) = target.attrs.split_last() else {
            self.bind(&target.name, value);
            return Ok(());
        };

        let undefined = || RuntimeError::UndefinedVariable { name: target.raw() };
        let scope = match self.frames.last_mut() {
            Some(frame) if frame.locals.contains_key(&target.name) => &mut frame.locals,
            _ => &mut self.globals,
        };

        let mut current = scope.get_mut(&target.name).ok_or_else(undefined)?;
        for attr in path {
            current = record_mut(current).and_then(|fields| fields.get_mut(attr))
                                         .ok_or_else(undefined)?;
        }

        record_mut(current).ok_or_else(undefined)?
                           .insert(last.clone(), value);
        Ok(())
    }
}
