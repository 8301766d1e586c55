use std::{fmt, rc::Rc};

/// Location of a node in its source unit.
///
/// `offset` is the absolute byte offset of the node's leading token, `len` the
/// byte length underlined in diagnostics and `line` the zero-indexed line of
/// `offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Span {
    /// Absolute byte offset.
    pub offset: usize,
    /// Length in bytes.
    pub len:    usize,
    /// Zero-indexed line number.
    pub line:   usize,
}

impl Span {
    #[must_use]
    pub const fn new(offset: usize, len: usize, line: usize) -> Self {
        Self { offset, len, line }
    }

    /// Extends this span on its own line up to the end of `other`.
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        if other.line != self.line || other.offset < self.offset {
            return self;
        }
        Self { len: other.offset + other.len - self.offset,
               ..self }
    }
}

/// Represents a literal value in the language.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// `nil`
    Nil,
    /// `true` or `false`.
    Bool(bool),
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A single- or double-quoted string literal.
    Text(String),
}

/// A reference to a name, optionally followed by dotted attribute segments.
///
/// `p.pos.x` has `name == "p"` and `attrs == ["pos", "x"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The root name.
    pub name:  String,
    /// Trailing dotted segments, in order.
    pub attrs: Vec<String>,
    /// Covers the whole dotted path.
    pub span:  Span,
}

impl Variable {
    /// The dotted name as written.
    ///
    /// ```
    /// use oxlang::ast::{Span, Variable};
    ///
    /// let var = Variable { name:  "p".to_string(),
    ///                      attrs: vec!["x".to_string()],
    ///                      span:  Span::default(), };
    /// assert_eq!(var.raw(), "p.x");
    /// ```
    #[must_use]
    pub fn raw(&self) -> String {
        self.segments().collect::<Vec<_>>().join(".")
    }

    /// All segments of the path, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.attrs.iter().map(String::as_str))
    }
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant.
    Constant {
        /// The constant value.
        value: Literal,
        /// Source location.
        span:  Span,
    },
    /// A (dotted) name reference.
    Variable(Variable),
    /// A prefix operation.
    UnaryOp {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
        /// Location of the operator.
        span:    Span,
    },
    /// A binary operation.
    BinaryOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Location of the operator.
        span:  Span,
    },
    /// A list literal.
    Array {
        /// Elements, in order.
        elements: Vec<Self>,
        /// Location of the opening bracket.
        span:     Span,
    },
    /// Subscripts applied left to right.
    Index {
        /// The indexed expression.
        target: Box<Self>,
        /// Subscript expressions.
        by:     Vec<Self>,
        /// Location of the opening bracket.
        span:   Span,
    },
    /// A call of a function, struct or native function.
    Call {
        /// The callee name.
        callee: Variable,
        /// Positional arguments.
        args:   Vec<Self>,
        /// Location of the callee name.
        span:   Span,
    },
}

impl Expr {
    /// Gets the source location of `self`.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Variable(Variable { span, .. })
            | Self::Constant { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::Array { span, .. }
            | Self::Index { span, .. }
            | Self::Call { span, .. } => *span,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Whether this operator is one of the six comparisons.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Equal
                 | Self::NotEqual
                 | Self::Less
                 | Self::LessEqual
                 | Self::Greater
                 | Self::GreaterEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical not (`!x`).
    Not,
}

/// A declared parameter of a function or field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// The parameter name, without any `...` suffix.
    pub name:     String,
    /// Whether the parameter collects all trailing arguments.
    pub variadic: bool,
}

/// Parameter list helpers shared by functions, structs and native functions.
pub trait Params {
    /// The declared parameters.
    fn params(&self) -> &[Param];

    /// Whether the last parameter is variadic.
    fn is_variadic(&self) -> bool {
        self.params().last().is_some_and(|p| p.variadic)
    }

    /// Whether `count` arguments satisfy the parameter list.
    fn accepts(&self, count: usize) -> bool {
        let declared = self.params().len();
        if self.is_variadic() { count + 1 >= declared } else { count == declared }
    }

    /// The argument count reported when [`Params::accepts`] fails.
    fn required(&self) -> usize {
        let declared = self.params().len();
        if self.is_variadic() { declared - 1 } else { declared }
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// The function name.
    pub name:   String,
    /// Declared parameters.
    pub params: Vec<Param>,
    /// The function body.
    pub body:   Body,
    /// Location of the name.
    pub span:   Span,
}

impl Params for Function {
    fn params(&self) -> &[Param] {
        &self.params
    }
}

/// A record-type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    /// The struct name.
    pub name:   String,
    /// Field names, in construction order.
    pub fields: Vec<Param>,
    /// Location of the name.
    pub span:   Span,
}

impl Params for Struct {
    fn params(&self) -> &[Param] {
        &self.fields
    }
}

/// Binds a value under a (dotted) name.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    /// Assignment target.
    pub target: Variable,
    /// The assigned expression.
    pub value:  Expr,
    /// Location of the target.
    pub span:   Span,
}

/// One link of an `if` / `else if` / `else` chain.
///
/// The terminal `else` is a link whose `cond` is `None`; the parser never
/// attaches an `orelse` to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    /// The condition, or `None` for the terminal `else`.
    pub cond:   Option<Expr>,
    /// Evaluated when the condition is truthy.
    pub body:   Body,
    /// The next link of the chain.
    pub orelse: Option<Box<Self>>,
    /// Location of the `if` or `else` keyword.
    pub span:   Span,
}

/// A `while` loop or a C-style `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    /// Checked before every iteration.
    pub cond:     Expr,
    /// The loop body.
    pub body:     Body,
    /// Runs once, before the first check.
    pub preloop:  Option<Assign>,
    /// Runs after every iteration's body.
    pub postloop: Option<Assign>,
    /// Location of the `for` or `while` keyword.
    pub span:     Span,
}

/// A `for <var> in <expr>` loop over a string or list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInLoop {
    /// The loop variable.
    pub var:  String,
    /// The iterated expression.
    pub expr: Expr,
    /// The loop body.
    pub body: Body,
    /// Location of the `for` keyword.
    pub span: Span,
}

/// Which members an import names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMembers {
    /// `import m.*`
    All,
    /// `import m.(a, b)`
    Named(Vec<String>),
}

/// A library import or pragma activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Dotted module path segments.
    pub module:  Vec<String>,
    /// Imported members, if listed.
    pub members: Option<ImportMembers>,
    /// Location of the module path.
    pub span:    Span,
}

impl Import {
    /// First segment of pragma module paths.
    pub const PRAGMA: &'static str = "pragma";

    /// The dotted module path.
    #[must_use]
    pub fn path(&self) -> String {
        self.module.join(".")
    }

    /// Whether this import activates a pragma instead of loading a library.
    #[must_use]
    pub fn is_pragma(&self) -> bool {
        self.module.first().is_some_and(|m| m == Self::PRAGMA)
    }
}

/// A declaration: one entry of a [`Body`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// A comment, kept for tooling and ignored at evaluation.
    Comment {
        /// The comment text without its delimiters.
        text:  String,
        /// Whether it was written `/* ... */` rather than `// ...`.
        block: bool,
        /// Source location.
        span:  Span,
    },
    /// An expression evaluated for its side effects.
    Expr(Expr),
    /// An assignment.
    Assign(Assign),
    /// A function declaration.
    Function(Rc<Function>),
    /// `return <expr>`
    Return {
        /// The returned expression.
        expr: Expr,
        /// Location of the `return` keyword.
        span: Span,
    },
    /// A struct declaration.
    Struct(Rc<Struct>),
    /// An `if` chain.
    Conditional(Conditional),
    /// A `while` or C-style `for` loop.
    Loop(Loop),
    /// A `for ... in` loop.
    ForIn(ForInLoop),
    /// An import or pragma.
    Import(Import),
    /// `break`
    Break(Span),
    /// `continue`
    Continue(Span),
}

/// A scope's statement sequence, in execution order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// Declarations, in execution order.
    pub decls: Vec<Decl>,
    /// Location of the opening brace, or the start of the unit.
    pub span:  Span,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negate => write!(f, "-"),
            Self::Not => write!(f, "!"),
        }
    }
}

// The printers below emit source that parses back into an equal tree. Nested
// operations are fully parenthesized and bodies are indented four spaces.

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Text(s) if s.contains('"') => write!(f, "'{s}'"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, if self.variadic { "..." } else { "" })
    }
}

fn comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { value, .. } => write!(f, "{value}"),
            Self::Variable(var) => write!(f, "{var}"),
            Self::UnaryOp { op, operand, .. } => write!(f, "({op}{operand})"),
            Self::BinaryOp { op, left, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Array { elements, .. } => {
                write!(f, "[")?;
                comma_separated(f, elements)?;
                write!(f, "]")
            },
            Self::Index { target, by, .. } => {
                write!(f, "{target}[")?;
                comma_separated(f, by)?;
                write!(f, "]")
            },
            Self::Call { callee, args, .. } => {
                write!(f, "{callee}(")?;
                comma_separated(f, args)?;
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for Assign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl Body {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for decl in &self.decls {
            decl.write_indented(f, depth)?;
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_block(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{{")?;
        self.write_indented(f, depth + 1)?;
        write!(f, "{}}}", "    ".repeat(depth))
    }
}

impl Conditional {
    fn write_chain(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match &self.cond {
            Some(cond) => write!(f, "if {cond} ")?,
            None => {},
        }
        self.body.write_block(f, depth)?;
        if let Some(next) = &self.orelse {
            write!(f, " else ")?;
            next.write_chain(f, depth)?;
        }
        Ok(())
    }
}

impl Decl {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{}", "    ".repeat(depth))?;
        match self {
            Self::Comment { text, block: true, .. } => write!(f, "/*{text}*/"),
            Self::Comment { text, block: false, .. } => write!(f, "//{text}"),
            Self::Expr(expr) => write!(f, "{expr}"),
            Self::Assign(assign) => write!(f, "{assign}"),
            Self::Function(func) => {
                write!(f, "func {}(", func.name)?;
                comma_separated(f, &func.params)?;
                write!(f, ") ")?;
                func.body.write_block(f, depth)
            },
            Self::Return { expr, .. } => write!(f, "return {expr}"),
            Self::Struct(def) => {
                write!(f, "struct {} {{ ", def.name)?;
                comma_separated(f, &def.fields)?;
                write!(f, " }}")
            },
            Self::Conditional(cond) => cond.write_chain(f, depth),
            Self::Loop(Loop { cond,
                              body,
                              preloop: Some(pre),
                              postloop: Some(post),
                              .. }) => {
                write!(f, "for {pre}, {cond}, {post} ")?;
                body.write_block(f, depth)
            },
            Self::Loop(Loop { cond, body, .. }) => {
                write!(f, "while {cond} ")?;
                body.write_block(f, depth)
            },
            Self::ForIn(ForInLoop { var, expr, body, .. }) => {
                write!(f, "for {var} in {expr} ")?;
                body.write_block(f, depth)
            },
            Self::Import(import) => {
                write!(f, "import {}", import.path())?;
                match &import.members {
                    Some(ImportMembers::All) => write!(f, ".*"),
                    Some(ImportMembers::Named(names)) => {
                        write!(f, ".(")?;
                        comma_separated(f, names)?;
                        write!(f, ")")
                    },
                    None => Ok(()),
                }
            },
            Self::Break(_) => write!(f, "break"),
            Self::Continue(_) => write!(f, "continue"),
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
