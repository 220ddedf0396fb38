//! Destructuring patterns and the cover-grammar reinterpretation that
//! produces them.

use estree::{Pattern, Statement};
use parser::{parse_script, Options};

fn ok(source: &str) -> bool {
    parse_script(source, &Options::default()).is_ok()
}

#[test]
fn test_binding_patterns_in_declarations() {
    assert!(ok("let [a, b] = xs;"));
    assert!(ok("let [a = 1, , ...rest] = xs;"));
    assert!(ok("let { a, b: c, d = 2, ...rest } = o;"));
    assert!(ok("let { a: { b: [c] } } = o;"));
    assert!(ok("const [{ a }, [b]] = pairs;"));
}

#[test]
fn test_assignment_patterns_from_the_cover_grammar() {
    assert!(ok("[a, b] = xs;"));
    assert!(ok("({ a, b: c.d } = o);"));
    assert!(ok("[a.b, c[0]] = xs;"));
    assert!(ok("[, , a] = xs;"));
    assert!(ok("[...a.b] = xs;"));
}

#[test]
fn test_invalid_assignment_targets() {
    assert!(!ok("[a()] = xs;"));
    assert!(!ok("({ a: 1 } = o);"));
    assert!(!ok("[a + b] = xs;"));
    assert!(!ok("[a?.b] = xs;"));
    assert!(!ok("({ ...a() } = o);"));
}

#[test]
fn test_parenthesized_patterns_are_rejected() {
    assert!(!ok("({ a }) = o;"));
    assert!(!ok("([a]) = xs;"));
    // A parenthesized member target is still fine.
    assert!(ok("(a.b) = 1;"));
}

#[test]
fn test_shorthand_defaults_only_inside_patterns() {
    assert!(ok("({ a = 1 } = o);"));
    assert!(!ok("({ a = 1 });"));
    assert!(!ok("f({ a = 1 });"));
}

#[test]
fn test_rest_element_rules() {
    assert!(!ok("let [...a, b] = xs;"));
    assert!(!ok("let [...a = 1] = xs;"));
    assert!(!ok("let { ...a, b } = o;"));
    assert!(ok("let [a, ...b] = xs;"));
}

#[test]
fn test_duplicate_lexical_bindings_in_patterns() {
    assert!(!ok("let [a, a] = xs;"));
    assert!(!ok("let { a, b: a } = o;"));
    assert!(ok("var [a, a] = xs;"));
}

#[test]
fn test_catch_parameter_patterns() {
    assert!(ok("try {} catch ([a, b]) {}"));
    assert!(ok("try {} catch ({ message }) {}"));
    assert!(!ok("try {} catch ([a]) { let a; }"));
}

#[test]
fn test_arrow_parameter_patterns() {
    let program = parse_script("([a, { b = 1 }], ...rest) => a + b;", &Options::default())
        .expect("parses");
    let Statement::Expression(stmt) = &program.body[0] else {
        panic!("expected expression statement");
    };
    let estree::Expression::Arrow(arrow) = stmt.expression.as_ref() else {
        panic!("expected arrow");
    };
    assert_eq!(arrow.params.len(), 2);
    assert!(matches!(arrow.params[0], Pattern::Array(_)));
    assert!(matches!(arrow.params[1], Pattern::Rest(_)));
}

#[test]
fn test_for_of_targets() {
    assert!(ok("for (const [k, v] of entries) {}"));
    assert!(ok("for ([a, b] of pairs) {}"));
    assert!(ok("for ({ x } of points) {}"));
    assert!(!ok("for (([a]) of pairs) {}"));
    assert!(!ok("for (a() of xs) {}"));
}

#[test]
fn test_nested_defaults_reference_earlier_bindings() {
    assert!(ok("let [a, b = a] = xs;"));
    assert!(ok("function f({ a, b = a }) {}"));
}
