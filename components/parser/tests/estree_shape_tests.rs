//! Serialized node vocabulary: the `"type"` tags and field names the
//! ESTree consumers key on.

use parser::{parse_module, parse_script, Options};
use serde_json::Value;

fn first(source: &str) -> Value {
    let program = parse_script(source, &Options::default()).expect("parses");
    let value = serde_json::to_value(&program).expect("serializes");
    value["body"][0].clone()
}

fn first_expr(source: &str) -> Value {
    first(source)["expression"].clone()
}

#[test]
fn test_expression_tags() {
    assert_eq!(first_expr("a + b;")["type"], "BinaryExpression");
    assert_eq!(first_expr("a && b;")["type"], "LogicalExpression");
    assert_eq!(first_expr("a ?? b;")["type"], "LogicalExpression");
    assert_eq!(first_expr("a = b;")["type"], "AssignmentExpression");
    assert_eq!(first_expr("a ? b : c;")["type"], "ConditionalExpression");
    assert_eq!(first_expr("a, b;")["type"], "SequenceExpression");
    assert_eq!(first_expr("-a;")["type"], "UnaryExpression");
    assert_eq!(first_expr("a++;")["type"], "UpdateExpression");
    assert_eq!(first_expr("a.b;")["type"], "MemberExpression");
    let chain = first_expr("a?.b;");
    assert_eq!(chain["type"], "MemberExpression");
    assert_eq!(chain["optional"], true);
    assert_eq!(first_expr("f();")["type"], "CallExpression");
    assert_eq!(first_expr("new F();")["type"], "NewExpression");
    assert_eq!(first_expr("[1];")["type"], "ArrayExpression");
    assert_eq!(first_expr("({});")["type"], "ObjectExpression");
    assert_eq!(first_expr("`a${b}`;")["type"], "TemplateLiteral");
    assert_eq!(first_expr("tag`a`;")["type"], "TaggedTemplateExpression");
    assert_eq!(first_expr("(x) => x;")["type"], "ArrowFunctionExpression");
    assert_eq!(first_expr("this;")["type"], "ThisExpression");
    assert_eq!(first_expr("/re/g;")["type"], "Literal");
}

#[test]
fn test_operator_fields_carry_source_spelling() {
    let expr = first_expr("a ** b;");
    assert_eq!(expr["operator"], "**");
    let expr = first_expr("a ??= b;");
    assert_eq!(expr["type"], "AssignmentExpression");
    assert_eq!(expr["operator"], "??=");
    let expr = first_expr("delete o.x;");
    assert_eq!(expr["operator"], "delete");
    assert_eq!(expr["prefix"], true);
}

#[test]
fn test_statement_tags() {
    assert_eq!(first("if (a) b;")["type"], "IfStatement");
    assert_eq!(first("while (a) b;")["type"], "WhileStatement");
    assert_eq!(first("do b; while (a);")["type"], "DoWhileStatement");
    assert_eq!(first("for (;;) break;")["type"], "ForStatement");
    assert_eq!(first("for (a in b) {}")["type"], "ForInStatement");
    assert_eq!(first("for (a of b) {}")["type"], "ForOfStatement");
    assert_eq!(first("switch (a) {}")["type"], "SwitchStatement");
    assert_eq!(first("try {} finally {}")["type"], "TryStatement");
    assert_eq!(first("throw a;")["type"], "ThrowStatement");
    assert_eq!(first("debugger;")["type"], "DebuggerStatement");
    assert_eq!(first(";")["type"], "EmptyStatement");
    assert_eq!(first("l: a;")["type"], "LabeledStatement");
}

#[test]
fn test_literal_values() {
    let lit = first_expr("42;");
    assert_eq!(lit["type"], "Literal");
    assert_eq!(lit["value"], 42.0);
    assert_eq!(first_expr("null;")["value"], Value::Null);
    assert_eq!(first_expr("true;")["value"], true);
    let regex = first_expr("/ab/gi;");
    assert_eq!(regex["regex"]["pattern"], "ab");
    assert_eq!(regex["regex"]["flags"], "gi");
}

#[test]
fn test_directive_field() {
    let program = parse_script("'use strict'; 'plain';", &Options::default()).expect("parses");
    let value = serde_json::to_value(&program).expect("serializes");
    assert_eq!(value["body"][0]["directive"], "use strict");
    assert_eq!(value["body"][1]["directive"], "plain");
    let other = first("('use strict');");
    assert_eq!(other["directive"], Value::Null);
}

#[test]
fn test_property_shapes() {
    let obj = first_expr("({ a, b: 1, [k]: 2, m() {}, get p() {} });");
    let props = obj["properties"].as_array().expect("array");
    assert_eq!(props[0]["shorthand"], true);
    assert_eq!(props[1]["shorthand"], false);
    assert_eq!(props[2]["computed"], true);
    assert_eq!(props[3]["method"], true);
    assert_eq!(props[4]["kind"], "get");
    assert_eq!(props[0]["kind"], "init");
}

#[test]
fn test_patterns_serialize_with_their_own_tags() {
    let decl = first("let { a, b = 1 } = o;");
    let id = &decl["declarations"][0]["id"];
    assert_eq!(id["type"], "ObjectPattern");
    assert_eq!(id["properties"][0]["type"], "Property");
    assert_eq!(id["properties"][1]["value"]["type"], "AssignmentPattern");
    let decl = first("let [a, ...b] = xs;");
    let id = &decl["declarations"][0]["id"];
    assert_eq!(id["type"], "ArrayPattern");
    assert_eq!(id["elements"][1]["type"], "RestElement");
}

#[test]
fn test_array_holes_are_null_elements() {
    let arr = first_expr("[1, , 3];");
    assert_eq!(arr["elements"][1], Value::Null);
}

#[test]
fn test_module_declaration_tags() {
    let program = parse_module(
        "import d, { a as b } from 'm'; export * as ns from 'n'; export default d;",
        &Options::default(),
    )
    .expect("parses");
    let value = serde_json::to_value(&program).expect("serializes");
    let import = &value["body"][0];
    assert_eq!(import["type"], "ImportDeclaration");
    assert_eq!(import["specifiers"][0]["type"], "ImportDefaultSpecifier");
    assert_eq!(import["specifiers"][1]["type"], "ImportSpecifier");
    assert_eq!(import["specifiers"][1]["imported"]["name"], "a");
    assert_eq!(import["specifiers"][1]["local"]["name"], "b");
    assert_eq!(value["body"][1]["type"], "ExportAllDeclaration");
    assert_eq!(value["body"][1]["exported"]["name"], "ns");
    assert_eq!(value["body"][2]["type"], "ExportDefaultDeclaration");
}

#[test]
fn test_class_shapes() {
    let program = parse_script(
        "class A extends B { constructor() { super(); } static m() {} }",
        &Options::default(),
    )
    .expect("parses");
    let value = serde_json::to_value(&program).expect("serializes");
    let class = &value["body"][0];
    assert_eq!(class["type"], "ClassDeclaration");
    assert_eq!(class["body"]["type"], "ClassBody");
    let ctor = &class["body"]["body"][0];
    assert_eq!(ctor["type"], "MethodDefinition");
    assert_eq!(ctor["kind"], "constructor");
    assert_eq!(class["body"]["body"][1]["static"], true);
}

#[test]
fn test_bigint_literals() {
    let lit = first_expr("10n;");
    assert_eq!(lit["type"], "Literal");
    assert_eq!(lit["bigint"], "10");
}
