//! Public API contract for the parser crate.

use parser::{parse, parse_module, parse_script, ErrorKind, Options};

#[test]
fn test_default_options() {
    let options = Options::default();
    assert!(!options.module);
    assert!(!options.jsx);
    assert!(!options.next);
    assert!(!options.ranges);
    assert!(!options.loc);
    assert!(!options.raw);
    assert_eq!(options.max_depth, 256);
}

#[test]
fn test_parse_respects_the_module_option() {
    let module = Options { module: true, ..Options::default() };
    assert!(parse("export {};", &module).is_ok());
    assert!(parse("export {};", &Options::default()).is_err());
}

#[test]
fn test_goal_specific_entry_points_override_the_option() {
    let module = Options { module: true, ..Options::default() };
    // parse_script ignores a stray module flag, and vice versa.
    assert!(parse_script("export {};", &module).is_err());
    assert!(parse_module("export {};", &Options::default()).is_ok());
}

#[test]
fn test_errors_carry_kind_and_position() {
    let err = parse_script("let\nlet = 1;", &Options::default()).expect_err("must fail");
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 0);
    assert!(err.to_string().starts_with("SyntaxError:"));

    let err = parse_script("'unterminated", &Options::default()).expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::Lexical);

    let err = parse_script("var a = ;", &Options::default()).expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::Syntax);

    let err = parse_script("let a, a;", &Options::default()).expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::EarlyError);
}

#[test]
fn test_depth_limit_is_configurable() {
    let shallow = Options { max_depth: 8, ..Options::default() };
    let deep_source = format!("x = {}1{};", "(".repeat(64), ")".repeat(64));
    let err = parse_script(&deep_source, &shallow).expect_err("must fail");
    assert_eq!(err.kind, ErrorKind::DepthExceeded);
    assert!(parse_script(&deep_source, &Options::default()).is_ok());
}

#[test]
fn test_parses_are_independent() {
    // A failed parse leaves nothing behind that affects the next one.
    assert!(parse_script("let let;", &Options::default()).is_err());
    assert!(parse_script("let ok;", &Options::default()).is_ok());
}

#[test]
fn test_empty_and_whitespace_sources() {
    assert_eq!(parse_script("", &Options::default()).expect("parses").body.len(), 0);
    assert_eq!(parse_script("  \n\t", &Options::default()).expect("parses").body.len(), 0);
    assert_eq!(
        parse_script("// only a comment", &Options::default()).expect("parses").body.len(),
        0
    );
}

#[test]
fn test_global_return_option() {
    assert!(parse_script("return 1;", &Options::default()).is_err());
    let options = Options { global_return: true, ..Options::default() };
    assert!(parse_script("return 1;", &options).is_ok());
}
