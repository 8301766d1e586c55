/// The evaluator module executes a parsed program.
///
/// The evaluator walks the AST against the global namespace and a stack of
/// call frames, performing all operator semantics, control flow, struct
/// instantiation, function dispatch and library imports.
///
/// # Responsibilities
/// - Evaluates every expression and declaration kind.
/// - Resolves dotted names and dotted assignment targets.
/// - Reports runtime errors located in the unit that raised them.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads raw source text and produces tokens for keywords,
/// identifiers, literals, comments and operators, each with the absolute
/// offset and zero-indexed line it starts at.
///
/// # Responsibilities
/// - Converts the input character stream into located lexemes.
/// - Distinguishes integer and real literals.
/// - Reports unexpected characters and unterminated strings or comments.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from lexemes.
///
/// The parser consumes the lexemes of one source unit and constructs a
/// `Body` of declarations, tracking the declaration context and the active
/// pragmas for diagnostics.
///
/// # Responsibilities
/// - Converts lexemes into AST nodes.
/// - Applies operator precedence and associativity.
/// - Validates the grammar, reporting errors with caret diagnostics.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the `Value` enum, the `Namespace` used for contexts and records,
/// and the wrapper that exposes host functions to ox code.
///
/// # Responsibilities
/// - Defines every runtime value variant and its display form.
/// - Implements truthiness and structural equality.
/// - Provides conversions from host types and literals.
pub mod value;
