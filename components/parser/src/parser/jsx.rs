//! JSX elements and fragments.
//!
//! JSX text, element names, and attribute strings follow different
//! lexical rules than ordinary code, so this module drives the lexer's
//! rescan entry points directly: after a tag's `>` the next "token" is
//! a raw text run, and attribute strings perform no escape processing.

use estree::{
    ErrorKind, Expression, JsxAttribute, JsxAttributeItem, JsxAttributeName, JsxAttributeValue,
    JsxChild, JsxClosingElement, JsxClosingFragment, JsxContainedExpression, JsxElement,
    JsxElementName, JsxEmptyExpression, JsxExpressionContainer, JsxFragment, JsxIdentifier,
    JsxMemberExpression, JsxNamespacedName, JsxOpeningElement, JsxOpeningFragment,
    JsxSpreadAttribute, JsxText, Literal, LiteralValue, NodePos, ParseError, Position,
    SourceLocation,
};

use super::Parser;
use crate::context::Context;
use crate::lexer::{Punct, Token, TokenKind};

impl<'a> Parser<'a> {
    /// Entry point at a `<` in expression position.
    pub(crate) fn parse_jsx_element_or_fragment(
        &mut self,
        ctx: Context,
    ) -> Result<Expression, ParseError> {
        if self.peek_next()?.is_punct(Punct::Gt) {
            let fragment = self.parse_jsx_fragment(ctx, false)?;
            Ok(Expression::JsxFragment(Box::new(fragment)))
        } else {
            let element = self.parse_jsx_element(ctx, false)?;
            Ok(Expression::JsxElement(Box::new(element)))
        }
    }

    // Step past `current` and install the raw text run that starts
    // immediately after it. Used wherever JSX children follow.
    fn advance_into_jsx_text(&mut self) -> Result<(), ParseError> {
        let cp = self.lexer.checkpoint();
        let token = self.lexer.rescan_jsx_text(cp)?;
        self.before_current = cp;
        self.consume_current_with(token);
        Ok(())
    }

    // Step past `current`, installing a token the rescanning lexer has
    // already produced from the position just after it.
    fn consume_current_with(&mut self, token: Token) {
        self.prev_end = self.current.end;
        self.prev_end_line = self.current.end_line;
        self.prev_end_column = self.current.end_column;
        self.current = token;
    }

    // Consume the `>` that ends a tag. Inside another element's
    // children raw text follows; at expression level ordinary code
    // does.
    fn finish_jsx_tag(&mut self, in_child: bool) -> Result<(), ParseError> {
        if in_child {
            self.advance_into_jsx_text()
        } else {
            self.advance()?;
            Ok(())
        }
    }

    fn parse_jsx_element(
        &mut self,
        ctx: Context,
        in_child: bool,
    ) -> Result<JsxElement, ParseError> {
        let m = self.mark();
        let om = self.mark();
        self.advance()?; // <
        let name = self.parse_jsx_element_name()?;
        let name_text = jsx_name_text(&name);

        let mut attributes = Vec::new();
        loop {
            if self.current.is_punct(Punct::Gt) || self.current.is_punct(Punct::Slash) {
                break;
            }
            if self.current.is_eof() {
                return Err(self.unexpected());
            }
            attributes.push(self.parse_jsx_attribute(ctx)?);
        }

        if self.current.is_punct(Punct::Slash) {
            self.advance()?;
            if !self.current.is_punct(Punct::Gt) {
                return Err(self.unexpected());
            }
            self.finish_jsx_tag(in_child)?;
            let opening =
                JsxOpeningElement { name, attributes, self_closing: true, pos: self.finish(om) };
            return Ok(JsxElement {
                opening,
                children: Vec::new(),
                closing: None,
                pos: self.finish(m),
            });
        }

        self.advance_into_jsx_text()?; // >
        let opening =
            JsxOpeningElement { name, attributes, self_closing: false, pos: self.finish(om) };
        let children = self.parse_jsx_children(ctx)?;

        // Children parsing stops at `</`.
        let cm = self.mark();
        self.advance()?; // <
        self.advance()?; // /
        let closing_name = self.parse_jsx_element_name()?;
        if jsx_name_text(&closing_name) != name_text {
            return Err(self.error(
                ErrorKind::Syntax,
                format!("Expected corresponding JSX closing tag for <{name_text}>"),
            ));
        }
        if !self.current.is_punct(Punct::Gt) {
            return Err(self.unexpected());
        }
        self.finish_jsx_tag(in_child)?;
        let closing = JsxClosingElement { name: closing_name, pos: self.finish(cm) };
        Ok(JsxElement { opening, children, closing: Some(closing), pos: self.finish(m) })
    }

    fn parse_jsx_fragment(
        &mut self,
        ctx: Context,
        in_child: bool,
    ) -> Result<JsxFragment, ParseError> {
        let m = self.mark();
        let om = self.mark();
        self.advance()?; // <
        if !self.current.is_punct(Punct::Gt) {
            return Err(self.unexpected());
        }
        self.advance_into_jsx_text()?; // >
        let opening = JsxOpeningFragment { pos: self.finish(om) };
        let children = self.parse_jsx_children(ctx)?;

        let cm = self.mark();
        self.advance()?; // <
        self.advance()?; // /
        if !self.current.is_punct(Punct::Gt) {
            return Err(self.error(
                ErrorKind::Syntax,
                "Expected corresponding JSX closing tag for fragment",
            ));
        }
        self.finish_jsx_tag(in_child)?;
        let closing = JsxClosingFragment { pos: self.finish(cm) };
        Ok(JsxFragment { opening, children, closing, pos: self.finish(m) })
    }

    // Children of an element or fragment. On return `current` is the
    // `<` of the closing tag, with the `/` still unconsumed.
    fn parse_jsx_children(&mut self, ctx: Context) -> Result<Vec<JsxChild>, ParseError> {
        let mut children = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::JsxText(text) => {
                    if !text.is_empty() {
                        let raw = self
                            .lexer
                            .raw_slice(self.current.start, self.current.end)
                            .to_string();
                        let pos = self.token_node_pos(&self.current);
                        children.push(JsxChild::Text(JsxText { value: text.clone(), raw, pos }));
                    }
                    // The run ends at `<`, `{`, `}`, `>`, or EOF; scan
                    // that delimiter as an ordinary token.
                    self.advance()?;
                }
                TokenKind::Punct(Punct::LBrace) => {
                    let container = self.parse_jsx_child_container(ctx)?;
                    children.push(JsxChild::Container(container));
                }
                TokenKind::Punct(Punct::Lt) => {
                    if self.peek_next()?.is_punct(Punct::Slash) {
                        return Ok(children);
                    }
                    if self.peek_next()?.is_punct(Punct::Gt) {
                        let fragment = self.parse_jsx_fragment(ctx, true)?;
                        children.push(JsxChild::Fragment(Box::new(fragment)));
                    } else {
                        let element = self.parse_jsx_element(ctx, true)?;
                        children.push(JsxChild::Element(Box::new(element)));
                    }
                }
                TokenKind::Eof => {
                    return Err(self.error(ErrorKind::Syntax, "Unterminated JSX contents"));
                }
                // A stray `>` or `}` in text must be escaped as an
                // expression container.
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_jsx_child_container(
        &mut self,
        ctx: Context,
    ) -> Result<JsxExpressionContainer, ParseError> {
        let cm = self.mark();
        self.advance()?; // {
        let expression = if self.current.is_punct(Punct::RBrace) {
            JsxContainedExpression::Empty(JsxEmptyExpression { pos: self.between_tokens_pos() })
        } else {
            let expr = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
            self.check_cover_init()?;
            JsxContainedExpression::Expression(Box::new(expr))
        };
        if !self.current.is_punct(Punct::RBrace) {
            return Err(self.unexpected());
        }
        self.advance_into_jsx_text()?; // }
        Ok(JsxExpressionContainer { expression, pos: self.finish(cm) })
    }

    // Position of the gap between the previous token and `current`,
    // for the hole in an empty `{}` container.
    fn between_tokens_pos(&self) -> NodePos {
        let mut pos = NodePos::default();
        if self.options.ranges {
            pos.start = Some(self.prev_end);
            pos.end = Some(self.current.start);
        }
        if self.options.loc {
            pos.loc = Some(SourceLocation {
                start: Position { line: self.prev_end_line, column: self.prev_end_column },
                end: Position { line: self.current.line, column: self.current.column },
                source: self.options.source.clone(),
            });
        }
        pos
    }

    // -----------------------------------------------------------------
    // Names and attributes
    // -----------------------------------------------------------------

    // One JSX identifier, rescanned so dashes join the name.
    fn parse_jsx_identifier(&mut self) -> Result<JsxIdentifier, ParseError> {
        let token = self.lexer.rescan_jsx_identifier(self.before_current)?;
        self.replace_current(token);
        let token = self.advance()?;
        let TokenKind::Ident { name, .. } = token.kind.clone() else {
            return Err(self.error_at_token(&token, ErrorKind::Syntax, "Invalid JSX name"));
        };
        Ok(JsxIdentifier { name, pos: self.token_node_pos(&token) })
    }

    fn parse_jsx_element_name(&mut self) -> Result<JsxElementName, ParseError> {
        let m = self.mark();
        let first = self.parse_jsx_identifier()?;
        if self.current.is_punct(Punct::Colon) {
            self.advance()?;
            let name = self.parse_jsx_identifier()?;
            return Ok(JsxElementName::Namespaced(JsxNamespacedName {
                namespace: first,
                name,
                pos: self.finish(m),
            }));
        }
        let mut name = JsxElementName::Identifier(first);
        while self.current.is_punct(Punct::Dot) {
            self.advance()?;
            let property = self.parse_jsx_identifier()?;
            name = JsxElementName::Member(Box::new(JsxMemberExpression {
                object: name,
                property,
                pos: self.finish(m),
            }));
        }
        Ok(name)
    }

    fn parse_jsx_attribute_name(&mut self) -> Result<JsxAttributeName, ParseError> {
        let m = self.mark();
        let first = self.parse_jsx_identifier()?;
        if self.current.is_punct(Punct::Colon) {
            self.advance()?;
            let name = self.parse_jsx_identifier()?;
            return Ok(JsxAttributeName::Namespaced(JsxNamespacedName {
                namespace: first,
                name,
                pos: self.finish(m),
            }));
        }
        Ok(JsxAttributeName::Identifier(first))
    }

    fn parse_jsx_attribute(&mut self, ctx: Context) -> Result<JsxAttributeItem, ParseError> {
        if self.current.is_punct(Punct::LBrace) {
            let m = self.mark();
            self.advance()?;
            self.expect_punct(Punct::Ellipsis)?;
            let argument = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
            self.check_cover_init()?;
            self.expect_punct(Punct::RBrace)?;
            return Ok(JsxAttributeItem::Spread(JsxSpreadAttribute {
                argument: Box::new(argument),
                pos: self.finish(m),
            }));
        }
        let m = self.mark();
        let name = self.parse_jsx_attribute_name()?;
        let value = if self.current.is_punct(Punct::Assign) {
            Some(self.parse_jsx_attribute_value(ctx)?)
        } else {
            None
        };
        Ok(JsxAttributeItem::Attribute(JsxAttribute { name, value, pos: self.finish(m) }))
    }

    fn parse_jsx_attribute_value(&mut self, ctx: Context) -> Result<JsxAttributeValue, ParseError> {
        // `current` is the `=` and the lexer sits just after it, so a
        // quoted value can be rescanned raw before the ordinary
        // scanner applies string escapes to it.
        if self.jsx_quote_follows() {
            let cp = self.lexer.checkpoint();
            let token = self.lexer.rescan_jsx_string(cp)?;
            self.consume_current_with(token); // past `=`
            let token = self.advance()?;
            let TokenKind::Str(value) = token.kind.clone() else {
                return Err(self.unexpected());
            };
            return Ok(JsxAttributeValue::Literal(Literal {
                value: LiteralValue::String(value),
                raw: self
                    .options
                    .raw
                    .then(|| self.lexer.raw_slice(token.start, token.end).to_string()),
                regex: None,
                pos: self.token_node_pos(&token),
            }));
        }
        self.advance()?; // =
        match &self.current.kind {
            TokenKind::Punct(Punct::LBrace) => {
                let cm = self.mark();
                self.advance()?;
                if self.current.is_punct(Punct::RBrace) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "JSX attributes must only be assigned a non-empty expression",
                    ));
                }
                let expr = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                self.check_cover_init()?;
                self.expect_punct(Punct::RBrace)?;
                Ok(JsxAttributeValue::Container(JsxExpressionContainer {
                    expression: JsxContainedExpression::Expression(Box::new(expr)),
                    pos: self.finish(cm),
                }))
            }
            TokenKind::Punct(Punct::Lt) => {
                if self.peek_next()?.is_punct(Punct::Gt) {
                    let fragment = self.parse_jsx_fragment(ctx, false)?;
                    Ok(JsxAttributeValue::Fragment(Box::new(fragment)))
                } else {
                    let element = self.parse_jsx_element(ctx, false)?;
                    Ok(JsxAttributeValue::Element(Box::new(element)))
                }
            }
            _ => Err(self.error(
                ErrorKind::Syntax,
                "JSX value should be either an expression or a quoted JSX text",
            )),
        }
    }

    fn jsx_quote_follows(&self) -> bool {
        let rest = self.lexer.raw_slice(self.lexer.offset(), self.source_len);
        matches!(rest.trim_start().chars().next(), Some('"' | '\''))
    }
}

// Rendered form of an element name, for matching closing tags.
fn jsx_name_text(name: &JsxElementName) -> String {
    match name {
        JsxElementName::Identifier(id) => id.name.clone(),
        JsxElementName::Member(member) => {
            format!("{}.{}", jsx_name_text(&member.object), member.property.name)
        }
        JsxElementName::Namespaced(ns) => format!("{}:{}", ns.namespace.name, ns.name.name),
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Options};
    use estree::{
        Expression, JsxAttributeItem, JsxAttributeName, JsxAttributeValue, JsxChild,
        JsxContainedExpression, JsxElementName, Statement,
    };

    fn jsx_options() -> Options {
        Options { jsx: true, ..Options::default() }
    }

    fn first_element(source: &str) -> estree::JsxElement {
        let program = parse_script(source, &jsx_options()).expect("parses");
        let Statement::Expression(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::JsxElement(element) = stmt.expression.as_ref() else {
            panic!("expected JSX element");
        };
        (**element).clone()
    }

    #[test]
    fn jsx_requires_the_option() {
        assert!(parse_script("<div/>;", &Options::default()).is_err());
        assert!(parse_script("<div/>;", &jsx_options()).is_ok());
    }

    #[test]
    fn comparison_still_parses_with_jsx_enabled() {
        assert!(parse_script("a < b;", &jsx_options()).is_ok());
        assert!(parse_script("a < b > c;", &jsx_options()).is_ok());
    }

    #[test]
    fn self_closing_element() {
        let element = first_element("<br/>;");
        assert!(element.opening.self_closing);
        assert!(element.closing.is_none());
        match &element.opening.name {
            JsxElementName::Identifier(id) => assert_eq!(id.name, "br"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dashed_and_namespaced_names() {
        let element = first_element("<my-widget/>;");
        match &element.opening.name {
            JsxElementName::Identifier(id) => assert_eq!(id.name, "my-widget"),
            other => panic!("unexpected {other:?}"),
        }
        let element = first_element("<svg:path/>;");
        assert!(matches!(element.opening.name, JsxElementName::Namespaced(_)));
    }

    #[test]
    fn member_element_name() {
        let element = first_element("<A.B.C/>;");
        let JsxElementName::Member(outer) = &element.opening.name else {
            panic!("expected member name");
        };
        assert_eq!(outer.property.name, "C");
        assert!(matches!(outer.object, JsxElementName::Member(_)));
    }

    #[test]
    fn attributes() {
        let element = first_element(r#"<a href="x" data-id={n} checked {...rest}/>;"#);
        assert_eq!(element.opening.attributes.len(), 4);
        let JsxAttributeItem::Attribute(href) = &element.opening.attributes[0] else {
            panic!("expected plain attribute");
        };
        assert!(matches!(href.value, Some(JsxAttributeValue::Literal(_))));
        let JsxAttributeItem::Attribute(data) = &element.opening.attributes[1] else {
            panic!("expected plain attribute");
        };
        match &data.name {
            JsxAttributeName::Identifier(id) => assert_eq!(id.name, "data-id"),
            other => panic!("unexpected {other:?}"),
        }
        let JsxAttributeItem::Attribute(checked) = &element.opening.attributes[2] else {
            panic!("expected plain attribute");
        };
        assert!(checked.value.is_none());
        assert!(matches!(element.opening.attributes[3], JsxAttributeItem::Spread(_)));
    }

    #[test]
    fn attribute_strings_are_raw() {
        // `\u` is not a valid string escape, but JSX takes it
        // literally.
        let element = first_element(r#"<a href="\u"/>;"#);
        let JsxAttributeItem::Attribute(attr) = &element.opening.attributes[0] else {
            panic!("expected plain attribute");
        };
        let Some(JsxAttributeValue::Literal(lit)) = &attr.value else {
            panic!("expected literal value");
        };
        assert_eq!(lit.value, estree::LiteralValue::String("\\u".into()));
    }

    #[test]
    fn empty_attribute_container_is_rejected() {
        assert!(parse_script("<a b={}/>;", &jsx_options()).is_err());
    }

    #[test]
    fn text_children_keep_raw_characters() {
        let element = first_element("<p>it's here</p>;");
        assert_eq!(element.children.len(), 1);
        let JsxChild::Text(text) = &element.children[0] else {
            panic!("expected text child");
        };
        assert_eq!(text.value, "it's here");
    }

    #[test]
    fn mixed_children() {
        let element = first_element("<div>one {two} <b>three</b></div>;");
        assert_eq!(element.children.len(), 4);
        assert!(matches!(element.children[0], JsxChild::Text(_)));
        assert!(matches!(element.children[1], JsxChild::Container(_)));
        assert!(matches!(element.children[2], JsxChild::Text(_)));
        assert!(matches!(element.children[3], JsxChild::Element(_)));
    }

    #[test]
    fn empty_container_child() {
        let element = first_element("<div>{}</div>;");
        let JsxChild::Container(container) = &element.children[0] else {
            panic!("expected container child");
        };
        assert!(matches!(container.expression, JsxContainedExpression::Empty(_)));
    }

    #[test]
    fn fragments() {
        let program = parse_script("<>a{b}</>;", &jsx_options()).expect("parses");
        let Statement::Expression(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expression::JsxFragment(fragment) = stmt.expression.as_ref() else {
            panic!("expected fragment");
        };
        assert_eq!(fragment.children.len(), 2);
        assert!(parse_script("<><p>x</p></>;", &jsx_options()).is_ok());
    }

    #[test]
    fn closing_tag_must_match() {
        assert!(parse_script("<a></b>;", &jsx_options()).is_err());
        assert!(parse_script("<a:b></a:c>;", &jsx_options()).is_err());
        assert!(parse_script("<A.B></A.C>;", &jsx_options()).is_err());
        assert!(parse_script("<a></a>;", &jsx_options()).is_ok());
    }

    #[test]
    fn unterminated_contents() {
        assert!(parse_script("<div>text", &jsx_options()).is_err());
        assert!(parse_script("<div", &jsx_options()).is_err());
    }

    #[test]
    fn stray_close_brace_in_text_is_rejected() {
        assert!(parse_script("<p>a } b</p>;", &jsx_options()).is_err());
        assert!(parse_script("<p>a &gt; b</p>;", &jsx_options()).is_ok());
    }

    #[test]
    fn elements_nest_in_expressions() {
        assert!(parse_script("const x = cond ? <a/> : <b/>;", &jsx_options()).is_ok());
        assert!(parse_script("f(<div id={user.id}>hi</div>);", &jsx_options()).is_ok());
        assert!(parse_script("<a b=<c/> d=<>x</>/>;", &jsx_options()).is_ok());
    }
}
