use std::{mem, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Assign, Body, Decl, Expr, Span},
    config::RuntimeConfig,
    error::{
        Error, RuntimeError,
        diagnostic::{GLOBAL_CONTEXT, function_context},
    },
    interpreter::{
        evaluator::function::core::BUILTIN_TABLE,
        parser::parse,
        value::{
            core::{Namespace, Value},
            native::NativeFunction,
        },
    },
    source::Source,
};

/// Result type used by operator and builtin evaluation.
///
/// These helpers only know what went wrong, not where; the evaluator attaches
/// the location when it turns the `RuntimeError` into an [`Error`].
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Result type used by statement and expression evaluation.
pub type ExecResult<T> = Result<T, Error>;

/// How a declaration finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell through to the next declaration.
    Normal,
    /// `return` was reached with this value.
    Return(Value),
    /// `break` was reached.
    Break,
    /// `continue` was reached.
    Continue,
}

/// The local context of one active call.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Name of the called function.
    pub name:   String,
    /// Parameters and locally assigned names.
    pub locals: Namespace,
}

/// Stores the interpreter state.
///
/// A `Runtime` owns the global namespace, the stack of call frames, the
/// configuration and the source unit currently executing. The global
/// namespace persists across [`Runtime::execute`] calls until
/// [`Runtime::reset`].
///
/// ## Usage
/// ```
/// use oxlang::{Runtime, Value};
///
/// let mut runtime = Runtime::new();
/// runtime.execute("struct Point { x, y }\np = Point(1, 2)\np.x = 9").unwrap();
///
/// assert_eq!(runtime.get("p.x"), Some(Value::Integer(9)));
/// assert_eq!(runtime.get("p.y"), Some(Value::Integer(2)));
/// ```
pub struct Runtime {
    pub(crate) globals: Namespace,
    pub(crate) frames:  Vec<Frame>,
    pub(crate) config:  RuntimeConfig,
    pub(crate) source:  Rc<Source>,
    pub(crate) depth:   usize,
    natives:            Vec<Rc<NativeFunction>>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Creates a runtime with the default configuration and the builtin
    /// native functions bound globally.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a runtime with the given configuration.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut runtime = Self { globals: Namespace::new(),
                                 frames: Vec::new(),
                                 config,
                                 source: Rc::new(Source::anonymous("")),
                                 depth: 0,
                                 natives: Vec::new() };
        runtime.install_natives();
        runtime
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Mutable access to the configuration, e.g. to add library roots.
    pub const fn config_mut(&mut self) -> &mut RuntimeConfig {
        &mut self.config
    }

    /// Executes source text reported as `<stdin>`.
    ///
    /// # Returns
    /// The value of a top-level `return`, or `nil` if the unit ran to its end.
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value};
    ///
    /// let mut runtime = Runtime::new();
    /// assert_eq!(runtime.execute("return 2 + 3 * 4").unwrap(), Value::Integer(14));
    /// assert_eq!(runtime.execute("return (2 + 3) * 4").unwrap(), Value::Integer(20));
    /// ```
    pub fn execute(&mut self, text: &str) -> ExecResult<Value> {
        self.execute_source(Source::anonymous(text))
    }

    /// Executes source text reported under `name` in diagnostics.
    pub fn execute_named(&mut self, name: &str, text: &str) -> ExecResult<Value> {
        self.execute_source(Source::new(name, text))
    }

    /// Parses and executes a source unit against the global namespace.
    ///
    /// Nothing runs if the unit fails to parse. A runtime failure keeps every
    /// assignment committed before the failing declaration.
    pub fn execute_source(&mut self, source: Source) -> ExecResult<Value> {
        let source = Rc::new(source);
        debug!(unit = source.name(), "executing");

        let body = parse(&source)?;
        let outer = mem::replace(&mut self.source, source);
        let flow = self.exec_body(&body);
        self.source = outer;

        match flow? {
            Flow::Return(value) => Ok(value),
            Flow::Normal | Flow::Break | Flow::Continue => Ok(Value::Nil),
        }
    }

    /// Clears the global namespace back to the native functions: the builtins
    /// and everything installed with [`Runtime::register`].
    pub fn reset(&mut self) {
        debug!(natives = self.natives.len(), "resetting global namespace");
        self.globals.clear();
        self.frames.clear();
        self.depth = 0;
        self.install_natives();
    }

    /// Installs a host function callable from ox code.
    ///
    /// A trailing `...` on the last parameter name marks it variadic. The
    /// function survives [`Runtime::reset`].
    ///
    /// # Example
    /// ```
    /// use oxlang::{Runtime, Value};
    ///
    /// let mut runtime = Runtime::new();
    /// runtime.register("count", &["values..."], |args| Ok(Value::Integer(args.len() as i64)));
    ///
    /// assert_eq!(runtime.execute("return count(1, 2, 3)").unwrap(), Value::Integer(3));
    /// ```
    pub fn register(&mut self,
                    name: &str,
                    params: &[&str],
                    func: impl Fn(&[Value]) -> EvalResult<Value> + 'static) {
        let native = Rc::new(NativeFunction::new(name, params, func));
        self.natives.retain(|n| n.name != name);
        self.natives.push(Rc::clone(&native));
        self.globals.insert(name.to_string(), Value::Native(native));
    }

    /// Looks up a dotted path in the global namespace.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Value> {
        let mut segments = path.split('.');
        let mut current = self.globals.get(segments.next()?)?;

        for segment in segments {
            current = current.as_record()?.get(segment)?;
        }
        Some(current.clone())
    }

    /// The global namespace.
    #[must_use]
    pub const fn globals(&self) -> &Namespace {
        &self.globals
    }

    fn install_natives(&mut self) {
        for def in BUILTIN_TABLE {
            let native = NativeFunction::new(def.name, def.params, def.func);
            self.globals.insert(def.name.to_string(), Value::Native(Rc::new(native)));
        }
        for native in &self.natives {
            self.globals.insert(native.name.clone(), Value::Native(Rc::clone(native)));
        }
    }

    /// The declaration context reported in runtime diagnostics.
    pub(crate) fn context(&self) -> String {
        self.frames
            .last()
            .map_or_else(|| GLOBAL_CONTEXT.to_string(), |frame| function_context(&frame.name))
    }

    /// Locates `kind` at `span` in the unit currently executing.
    pub(crate) fn error(&self, kind: RuntimeError, span: Span) -> Error {
        Error::runtime(kind, &self.source, span, &self.context())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// always evaluated left to right, and both sides of `&&` and `||` are
    /// evaluated.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value, or the located error.
    pub fn eval(&mut self, expr: &Expr) -> ExecResult<Value> {
        match expr {
            Expr::Constant { value, .. } => Ok(value.into()),
            Expr::Variable(var) => self.lookup_value(var),
            Expr::UnaryOp { op, operand, span } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, &value).map_err(|kind| self.error(kind, *span))
            },
            Expr::BinaryOp { op,
                             left,
                             right,
                             span, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right).map_err(|kind| self.error(kind, *span))
            },
            Expr::Array { elements, .. } => {
                let values = elements.iter()
                                     .map(|element| self.eval(element))
                                     .collect::<ExecResult<Vec<_>>>()?;
                Ok(values.into())
            },
            Expr::Index { target, by, .. } => {
                let mut value = self.eval(target)?;
                for subscript in by {
                    let index = self.eval(subscript)?;
                    value = Self::index_value(&value, &index).map_err(|kind| {
                                                                 self.error(kind,
                                                                            subscript.span())
                                                             })?;
                }
                Ok(value)
            },
            Expr::Call { callee, args, span } => self.eval_call(callee, args, *span),
        }
    }

    /// Executes the declarations of a body in order.
    ///
    /// Stops at the first declaration that does not fall through and hands
    /// its [`Flow`] to the caller.
    pub fn exec_body(&mut self, body: &Body) -> ExecResult<Flow> {
        for decl in &body.decls {
            match self.exec_decl(decl)? {
                Flow::Normal => {},
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    /// Executes a single declaration.
    pub fn exec_decl(&mut self, decl: &Decl) -> ExecResult<Flow> {
        match decl {
            Decl::Comment { .. } => {},
            Decl::Expr(expr) => {
                self.eval(expr)?;
            },
            Decl::Assign(assign) => self.exec_assign(assign)?,
            Decl::Function(def) => {
                let value = Value::Function { decl:   Rc::clone(def),
                                              source: Rc::clone(&self.source), };
                self.bind(&def.name, value);
            },
            Decl::Struct(def) => self.bind(&def.name, Value::Struct(Rc::clone(def))),
            Decl::Return { expr, .. } => return Ok(Flow::Return(self.eval(expr)?)),
            Decl::Conditional(cond) => return self.exec_conditional(cond),
            Decl::Loop(looped) => return self.exec_loop(looped),
            Decl::ForIn(looped) => return self.exec_for_in(looped),
            Decl::Import(import) => self.exec_import(import)?,
            Decl::Break(_) => return Ok(Flow::Break),
            Decl::Continue(_) => return Ok(Flow::Continue),
        }
        Ok(Flow::Normal)
    }

    /// Evaluates the right-hand side, then binds it to the (dotted) target.
    pub(crate) fn exec_assign(&mut self, assign: &Assign) -> ExecResult<()> {
        let value = self.eval(&assign.value)?;
        self.assign(&assign.target, value)
            .map_err(|kind| self.error(kind, assign.target.span))
    }
}
