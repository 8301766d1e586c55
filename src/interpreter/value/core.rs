use std::{fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    ast::{Function, Literal, Struct},
    interpreter::value::native::NativeFunction,
    source::Source,
    util::num::i64_to_f64,
};

/// A context: an insertion-ordered mapping from name to value.
///
/// The global context, every call frame and every struct record is a
/// `Namespace`.
pub type Namespace = IndexMap<String, Value>;

/// Represents a runtime value in the interpreter.
///
/// Lists and records are shared behind `Rc` and copied on write, so
/// assignment and argument passing behave like copies.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absent value.
    Nil,
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A integer value (64 bit integer).
    Integer(i64),
    /// A numeric value (double precision floating-point).
    Real(f64),
    /// An immutable string.
    Text(Rc<str>),
    /// An ordered list of values.
    List(Rc<Vec<Self>>),
    /// A struct instance: field name to value.
    Record(Rc<Namespace>),
    /// A declared function and the unit it was declared in.
    Function {
        /// The declaration.
        decl:   Rc<Function>,
        /// Source unit of the declaration; errors raised by the body are
        /// rendered against it.
        source: Rc<Source>,
    },
    /// A declared struct, callable as a record constructor.
    Struct(Rc<Struct>),
    /// A host function registered with the runtime.
    Native(Rc<NativeFunction>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v.into())
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::List(Rc::new(v))
    }
}

impl From<Namespace> for Value {
    fn from(v: Namespace) -> Self {
        Self::Record(Rc::new(v))
    }
}

impl From<&Literal> for Value {
    fn from(lit: &Literal) -> Self {
        match lit {
            Literal::Nil => Self::Nil,
            Literal::Bool(b) => (*b).into(),
            Literal::Integer(i) => (*i).into(),
            Literal::Real(n) => (*n).into(),
            Literal::Text(s) => s.as_str().into(),
        }
    }
}

impl Value {
    /// The name of this value's type, as reported by `type()` and in errors.
    ///
    /// # Example
    /// ```
    /// use oxlang::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(1.5).type_name(), "real");
    /// assert_eq!(Value::from(Vec::<Value>::new()).type_name(), "list");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Function { .. } => "function",
            Self::Struct(_) => "struct",
            Self::Native(_) => "native function",
        }
    }

    /// Whether this value counts as true in a condition.
    ///
    /// `nil`, `false`, zero, the empty string, the empty list and the empty
    /// record are false; everything else is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::Real(r) => *r != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Record(fields) => !fields.is_empty(),
            Self::Function { .. } | Self::Struct(_) | Self::Native(_) => true,
        }
    }

    /// The value as an `f64`, if it is a number.
    #[must_use]
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(i64_to_f64(*n)),
            Self::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the record's fields if the value is a [`Value::Record`].
    #[must_use]
    pub fn as_record(&self) -> Option<&Namespace> {
        match self {
            Self::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Writes the value the way it appears inside a list or record, where
    /// text is quoted.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

/// Structural equality.
///
/// Integers and reals compare by numeric value, so `1 == 1.0`. Functions,
/// structs and native functions are equal only to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::{Bool, Function, Integer, List, Native, Nil, Real, Record, Struct, Text};

        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Real(a), Real(b)) => a == b,
            (Integer(a), Real(b)) | (Real(b), Integer(a)) => i64_to_f64(*a) == *b,
            (Text(a), Text(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Record(a), Record(b)) => a == b,
            (Function { decl: a, .. }, Function { decl: b, .. }) => Rc::ptr_eq(a, b),
            (Struct(a), Struct(b)) => Rc::ptr_eq(a, b),
            (Native(a), Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            // Debug keeps the fractional part of whole reals: `2.0`, not `2`.
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => {
                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    value.fmt_nested(f)?;
                }

                write!(f, "]")
            },
            Self::Record(fields) => {
                write!(f, "{{")?;
                for (index, (name, value)) in fields.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: ")?;
                    value.fmt_nested(f)?;
                }
                write!(f, "}}")
            },
            Self::Function { decl, .. } => write!(f, "<func {}>", decl.name),
            Self::Struct(def) => write!(f, "<struct {}>", def.name),
            Self::Native(native) => write!(f, "<native {}>", native.name),
        }
    }
}
