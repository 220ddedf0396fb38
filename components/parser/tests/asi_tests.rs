//! Automatic semicolon insertion, including the restricted productions.

use estree::{Expression, Statement};
use parser::{parse_script, Options};

fn script(source: &str) -> estree::Program {
    parse_script(source, &Options::default()).expect("parses")
}

#[test]
fn test_newline_terminates_statements() {
    let program = script("a = 1\nb = 2");
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_eof_terminates_the_last_statement() {
    assert_eq!(script("a = 1").body.len(), 1);
}

#[test]
fn test_close_brace_terminates_statements() {
    assert!(parse_script("{ a = 1 }", &Options::default()).is_ok());
    assert!(parse_script("function f() { return 1 }", &Options::default()).is_ok());
}

#[test]
fn test_no_asi_without_a_line_break() {
    assert!(parse_script("a = 1 b = 2", &Options::default()).is_err());
    assert!(parse_script("let a = 1 let b = 2", &Options::default()).is_err());
}

#[test]
fn test_expressions_continue_across_lines() {
    assert_eq!(script("a = b +\n c").body.len(), 1);
    assert_eq!(script("a = b\n.c").body.len(), 1);
    // The parenthesized line continues the previous expression as a
    // call, so no semicolon is inserted.
    assert_eq!(script("a = b + c\n(d).e").body.len(), 1);
}

#[test]
fn test_return_is_restricted() {
    let program = script("function f() { return\n1; }");
    let Statement::FunctionDeclaration(function) = &program.body[0] else {
        panic!("expected function");
    };
    let Statement::Return(ret) = &function.body.body[0] else {
        panic!("expected return");
    };
    assert!(ret.argument.is_none());
    // The orphaned `1;` becomes its own statement.
    assert_eq!(function.body.body.len(), 2);
}

#[test]
fn test_throw_is_restricted_without_insertion() {
    assert!(parse_script("throw\nnew Error();", &Options::default()).is_err());
    assert!(parse_script("throw new Error();", &Options::default()).is_ok());
}

#[test]
fn test_update_operators_are_restricted() {
    let program = script("a\n++b");
    assert_eq!(program.body.len(), 2);
    let Statement::Expression(second) = &program.body[1] else {
        panic!("expected expression statement");
    };
    match second.expression.as_ref() {
        Expression::Update(update) => assert!(update.prefix),
        other => panic!("unexpected {other:?}"),
    }
    // Without the line break the postfix binds to `a`.
    assert_eq!(script("a++\nb").body.len(), 2);
}

#[test]
fn test_break_and_continue_labels_are_restricted() {
    let program = script("outer: while (x) { break\nouter; }");
    let Statement::Labeled(labeled) = &program.body[0] else {
        panic!("expected labeled statement");
    };
    let Statement::While(while_stmt) = labeled.body.as_ref() else {
        panic!("expected while");
    };
    let Statement::Block(block) = while_stmt.body.as_ref() else {
        panic!("expected block body");
    };
    let Statement::Break(brk) = &block.body[0] else {
        panic!("expected break");
    };
    assert!(brk.label.is_none());
}

#[test]
fn test_arrow_is_restricted() {
    assert!(parse_script("let f = a\n=> a;", &Options::default()).is_err());
    assert!(parse_script("let f = a =>\na;", &Options::default()).is_ok());
}

#[test]
fn test_do_while_gets_a_free_semicolon() {
    assert_eq!(script("do {} while (x) a = 1").body.len(), 2);
}

#[test]
fn test_empty_statement_is_not_inserted() {
    // `if (x)` needs a body; ASI never conjures an empty statement.
    assert!(parse_script("if (x)", &Options::default()).is_err());
}

#[test]
fn test_for_headers_never_use_asi() {
    assert!(parse_script("for (a = 1\n a < 4\n a++) {}", &Options::default()).is_err());
    assert!(parse_script("for (a = 1; a < 4; a++) {}", &Options::default()).is_ok());
}
