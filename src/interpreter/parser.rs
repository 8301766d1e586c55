/// Parser state, token cursor and the `parse` entry point.
///
/// Owns the lexemes of one source unit together with the diagnostic context
/// stack, the active pragmas and the loop nesting depth.
pub mod core;

/// Prefix operators and primary expressions.
///
/// Handles negation, logical not, literals, grouping, list literals, dotted
/// names, calls and subscripts.
pub mod unary;

/// Binary operators.
///
/// Implements precedence climbing over the binding-power table, including the
/// rule that comparisons do not chain.
pub mod binary;

/// Blocks.
///
/// Parses brace-delimited declaration sequences and turns comments in
/// statement position into declarations.
pub mod block;

/// Helpers shared by the other parser modules.
pub mod utils;

/// Declarations.
///
/// Assignments, functions, structs, returns, conditional chains, the loop
/// forms, loop control, imports and pragmas.
pub mod statement;

pub use self::core::{MAX_NESTING, ParseResult, Parser, parse};

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::{ast::Body, source::Source};

    const PROGRAM: &str = r#"
import pragma.returns
import std.math.(sqrt)
// points
struct Point { x, y }

func dist(a, b, rest...) returns {
    dx = a.x - b.x
    dy = a.y - b.y
    if dx < 0 {
        dx *= -1
    } else if dx == 0 {
        return 0
    } else {
        dx = dx
    }
    for i = 0, i < len(rest), i += 1 {
        if !rest[i] { continue }
        break
    }
    return sqrt(dx ^ 2 + dy ^ 2)
}

/* main */
total = 0.5
for c in ["a", 'b"c'] {
    while total < 3 { total += 1e2 }
}
print(dist(Point(1, 2), Point(4, 6))[0], -total, nil, true || false && !x)
"#;

    /// Debug form of `body` with every span removed, so trees parsed from
    /// differently laid out text can be compared.
    fn shape(body: &Body) -> String {
        let debug = format!("{body:?}");
        let mut shape = String::with_capacity(debug.len());
        let mut rest = debug.as_str();

        while let Some(start) = rest.find("Span {") {
            shape.push_str(&rest[..start]);
            let end = rest[start..].find('}').map_or(rest.len(), |close| start + close + 1);
            rest = &rest[end..];
        }
        shape.push_str(rest);
        shape
    }

    fn assert_round_trip(text: &str) {
        let parsed = parse(&Source::anonymous(text)).unwrap();
        let printed = parsed.to_string();
        let reparsed = parse(&Source::anonymous(printed.as_str())).unwrap_or_else(|e| {
                                                                       panic!("{printed}\n{e}")
                                                                   });

        assert_eq!(shape(&parsed), shape(&reparsed), "{printed}");
        assert_eq!(printed, reparsed.to_string());
    }

    #[test]
    fn printed_programs_parse_back_identically() {
        assert_round_trip(PROGRAM);
    }

    #[test]
    fn comments_keep_their_form() {
        assert_round_trip("// a */ b\nx = 1\n/* two\nlines */\ny = 2 // trailing");
        assert_eq!(parse(&Source::anonymous("// a */ b\nx = 1")).unwrap().to_string(),
                   "// a */ b\nx = 1\n");
    }

    #[test]
    fn reals_print_as_reparseable_literals() {
        assert_round_trip("x = [1e300, 2.5e-8, 0.1, 3.0, 1e5]");
    }
}
