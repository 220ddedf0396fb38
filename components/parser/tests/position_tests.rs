//! Position attachment modes and the serialized tree shape.

use parser::{parse_module, parse_script, Options};
use serde_json::{json, Value};

fn tree(source: &str, options: &Options) -> Value {
    let program = parse_script(source, options).expect("parses");
    serde_json::to_value(&program).expect("serializes")
}

#[test]
fn test_default_output_has_no_positions() {
    let value = tree("let x = 1;", &Options::default());
    assert_eq!(value["type"], "Program");
    assert_eq!(value["sourceType"], "script");
    assert!(value.get("start").is_none());
    assert!(value.get("end").is_none());
    assert!(value.get("loc").is_none());
    let decl = &value["body"][0];
    assert!(decl.get("start").is_none());
}

#[test]
fn test_ranges_attach_byte_offsets() {
    let options = Options { ranges: true, ..Options::default() };
    let value = tree("let x = 1;", &options);
    assert_eq!(value["start"], 0);
    assert_eq!(value["end"], 10);
    let decl = &value["body"][0];
    assert_eq!(decl["type"], "VariableDeclaration");
    assert_eq!(decl["start"], 0);
    assert_eq!(decl["end"], 10);
    let id = &decl["declarations"][0]["id"];
    assert_eq!(id["start"], 4);
    assert_eq!(id["end"], 5);
}

#[test]
fn test_offsets_are_bytes_not_chars() {
    let options = Options { ranges: true, ..Options::default() };
    // `é` is two bytes in UTF-8.
    let value = tree("é = 1;", &options);
    let target = &value["body"][0]["expression"]["left"];
    assert_eq!(target["start"], 0);
    assert_eq!(target["end"], 2);
}

#[test]
fn test_loc_attaches_lines_and_columns() {
    let options = Options { loc: true, ..Options::default() };
    let value = tree("let x = 1;\nf();", &options);
    let call = &value["body"][1];
    assert_eq!(call["loc"]["start"]["line"], 2);
    assert_eq!(call["loc"]["start"]["column"], 0);
    assert_eq!(call["loc"]["end"]["line"], 2);
    assert_eq!(call["loc"]["end"]["column"], 4);
    // Lines are 1-based, columns 0-based.
    assert_eq!(value["loc"]["start"]["line"], 1);
    assert_eq!(value["loc"]["start"]["column"], 0);
}

#[test]
fn test_loc_source_names_the_input() {
    let options = Options {
        loc: true,
        source: Some("input.js".to_string()),
        ..Options::default()
    };
    let value = tree("x;", &options);
    assert_eq!(value["loc"]["source"], "input.js");
}

#[test]
fn test_raw_attaches_literal_text() {
    let options = Options { raw: true, ..Options::default() };
    let value = tree("x = 0x10;", &options);
    let lit = &value["body"][0]["expression"]["right"];
    assert_eq!(lit["value"], json!(16.0));
    assert_eq!(lit["raw"], "0x10");
    let value = tree("x = 'a\\n';", &options);
    let lit = &value["body"][0]["expression"]["right"];
    assert_eq!(lit["value"], "a\n");
    assert_eq!(lit["raw"], "'a\\n'");
}

#[test]
fn test_module_source_type() {
    let program = parse_module("export {};", &Options::default()).expect("parses");
    let value = serde_json::to_value(&program).expect("serializes");
    assert_eq!(value["sourceType"], "module");
}

#[test]
fn test_program_span_covers_trailing_trivia() {
    let options = Options { ranges: true, ..Options::default() };
    let value = tree("x;\n// trailing\n", &options);
    assert_eq!(value["end"], 15);
}

#[test]
fn test_output_is_deterministic() {
    let options = Options { ranges: true, loc: true, raw: true, ..Options::default() };
    let source = "class A { #x = 1; m() { return this.#x ?? [1, ...rest]; } }";
    let options = Options { next: true, ..options };
    let first = serde_json::to_string(&parse_script(source, &options).expect("parses"))
        .expect("serializes");
    let second = serde_json::to_string(&parse_script(source, &options).expect("parses"))
        .expect("serializes");
    assert_eq!(first, second);
}

#[test]
fn test_absent_children_serialize_as_null() {
    let value = tree("function f() { return; }", &Options::default());
    let ret = &value["body"][0]["body"]["body"][0];
    assert_eq!(ret["type"], "ReturnStatement");
    assert_eq!(ret["argument"], Value::Null);
}
