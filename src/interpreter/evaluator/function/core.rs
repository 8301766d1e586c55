use std::{mem, rc::Rc};

use tracing::trace;

use crate::{
    ast::{Expr, Function, Params, Span, Variable},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{EvalResult, ExecResult, Flow, Frame, Runtime},
            function::builtin,
        },
        value::core::{Namespace, Value},
    },
    source::Source,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives a slice of evaluated argument values and returns a
/// value wrapped in `EvalResult`.
type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - the parameter names, where a trailing `...` marks the last one variadic,
/// - a function pointer implementing the builtin.
///
/// The macro produces:
/// - `BuiltinDef` (internal metadata),
/// - `BUILTIN_TABLE` (static table installed into every fresh namespace),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: $params:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub(crate) struct BuiltinDef {
            pub(crate) name:   &'static str,
            pub(crate) params: &'static [&'static str],
            pub(crate) func:   BuiltinFn,
        }
        pub(crate) static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, params: $params, func: $func },
            )*
        ];
        /// Names of the native functions bound in a fresh global namespace.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "print"   => { params: &["values..."], func: builtin::print },
    "println" => { params: &["values..."], func: builtin::println },
    "len"     => { params: &["value"],     func: builtin::len },
    "str"     => { params: &["value"],     func: builtin::str },
    "type"    => { params: &["value"],     func: builtin::type_of },
}

impl Runtime {
    /// Evaluates a call.
    ///
    /// The callee name is resolved like a variable. Its arity is checked
    /// before any argument is evaluated; the arguments are then evaluated
    /// left to right in the caller's context.
    ///
    /// - A function runs its body in a new frame and yields the returned
    ///   value, or `nil` if it finishes without `return`.
    /// - A struct yields a record of its fields bound to the arguments.
    /// - A native function is invoked with the evaluated arguments.
    ///
    /// # Parameters
    /// - `callee`: The called name.
    /// - `args`: Argument expressions.
    /// - `span`: Location of the callee, used for call errors.
    ///
    /// # Returns
    /// The call's value, or `UndefinedFunction`, `NotCallable`,
    /// `ArityMismatch` and any error raised by the callee.
    pub fn eval_call(&mut self, callee: &Variable, args: &[Expr], span: Span) -> ExecResult<Value> {
        let Some(target) = self.lookup(callee).cloned() else {
            return Err(self.error(RuntimeError::UndefinedFunction { name: callee.raw() }, span));
        };

        match target {
            Value::Function { decl, source } => {
                self.check_arity(decl.as_ref(), callee, args.len(), span)?;
                let values = self.eval_args(args)?;
                self.call_function(&decl, source, values, span)
            },
            Value::Struct(def) => {
                self.check_arity(def.as_ref(), callee, args.len(), span)?;
                let values = self.eval_args(args)?;
                Ok(Value::from(Self::bind_params(def.as_ref(), values)))
            },
            Value::Native(native) => {
                self.check_arity(native.as_ref(), callee, args.len(), span)?;
                let values = self.eval_args(args)?;
                trace!(native = %native.name, args = values.len(), "native call");
                native.call(&values).map_err(|kind| self.error(kind, span))
            },
            other => {
                let kind = RuntimeError::NotCallable { name:      callee.raw(),
                                                       type_name: other.type_name(), };
                Err(self.error(kind, span))
            },
        }
    }

    fn check_arity(&self,
                   target: &impl Params,
                   callee: &Variable,
                   found: usize,
                   span: Span)
                   -> ExecResult<()> {
        if target.accepts(found) {
            return Ok(());
        }

        let kind = RuntimeError::ArityMismatch { name: callee.raw(),
                                                 expected: target.required(),
                                                 found,
                                                 variadic: target.is_variadic() };
        Err(self.error(kind, span))
    }

    fn eval_args(&mut self, args: &[Expr]) -> ExecResult<Vec<Value>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    /// Binds evaluated arguments to parameter names.
    ///
    /// A variadic last parameter is bound to the list of every remaining
    /// argument, which may be empty. The argument count must already satisfy
    /// [`Params::accepts`].
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value, interpreter::value::native::NativeFunction};
    ///
    /// let target = NativeFunction::new("f", &["a", "rest..."], |_| Ok(Value::Nil));
    /// let bound = Runtime::bind_params(&target, vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]);
    ///
    /// assert_eq!(bound["a"], Value::Integer(1));
    /// assert_eq!(bound["rest"], Value::from(vec![Value::Integer(2), Value::Integer(3)]));
    /// ```
    pub fn bind_params(target: &impl Params, args: Vec<Value>) -> Namespace {
        let mut args = args.into_iter();
        let mut bound = Namespace::new();

        for param in target.params() {
            let value = if param.variadic {
                Value::from(args.by_ref().collect::<Vec<_>>())
            } else {
                args.next().unwrap_or(Value::Nil)
            };
            bound.insert(param.name.clone(), value);
        }

        bound
    }

    /// Runs a function body in a fresh frame.
    ///
    /// Errors raised by the body are rendered against `source`, the unit the
    /// function was declared in.
    fn call_function(&mut self,
                     decl: &Rc<Function>,
                     source: Rc<Source>,
                     args: Vec<Value>,
                     span: Span)
                     -> ExecResult<Value> {
        let limit = self.config.max_call_depth;
        if self.depth >= limit {
            return Err(self.error(RuntimeError::StackExhausted { depth: limit }, span));
        }

        trace!(function = %decl.name, depth = self.depth + 1, "call");
        let locals = Self::bind_params(decl.as_ref(), args);
        self.frames.push(Frame { name: decl.name.clone(),
                                 locals });
        self.depth += 1;
        let caller = mem::replace(&mut self.source, source);

        let flow = self.exec_body(&decl.body);

        self.source = caller;
        self.depth -= 1;
        self.frames.pop();

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal | Flow::Break | Flow::Continue => Ok(Value::Nil),
        }
    }
}
