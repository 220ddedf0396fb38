//! ESTree JSON serialization.
//!
//! Every node serializes as a map whose first entry is the closed-vocabulary
//! `"type"` tag, followed by the node's fields in ESTree order, followed by
//! whatever position fields the parse recorded (`start`/`end` offsets,
//! `loc`). Absent optional children serialize as `null`, matching the
//! reference ESTree producers; absent position fields are omitted entirely.
//!
//! Category enums (`Expression`, `Statement`, ...) are a Rust-side grouping
//! only and serialize transparently as the wrapped node.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::*;
use crate::source::NodePos;

/// Append the recorded position fields and close the map.
fn end_with_pos<M: SerializeMap>(mut map: M, pos: &NodePos) -> Result<M::Ok, M::Error> {
    if let Some(start) = pos.start {
        map.serialize_entry("start", &start)?;
    }
    if let Some(end) = pos.end {
        map.serialize_entry("end", &end)?;
    }
    if let Some(loc) = &pos.loc {
        map.serialize_entry("loc", loc)?;
    }
    map.end()
}

/// Implement `Serialize` for a node struct: `"type"` tag, listed fields in
/// order, then position fields. An explicit tag overrides the struct name
/// where the ESTree vocabulary differs (e.g. `PatternProperty` serializes
/// as `"Property"`).
macro_rules! impl_node {
    ($node:ident { $($key:literal => $field:ident),* $(,)? }) => {
        impl_node!($node as (stringify!($node)) { $($key => $field),* });
    };
    ($node:ident as $tag:literal { $($key:literal => $field:ident),* $(,)? }) => {
        impl_node!($node as ($tag) { $($key => $field),* });
    };
    ($node:ident as ($tag:expr) { $($key:literal => $field:ident),* $(,)? }) => {
        impl Serialize for $node {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", $tag)?;
                $( map.serialize_entry($key, &self.$field)?; )*
                end_with_pos(map, &self.pos)
            }
        }
    };
}

/// Implement transparent serialization for a category enum whose variants
/// all wrap a serializable node.
macro_rules! impl_passthrough {
    ($name:ident { $($variant:ident),* $(,)? }) => {
        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $( $name::$variant(inner) => inner.serialize(serializer), )*
                }
            }
        }
    };
}

/// Implement `as_str`, `Display` and string serialization for an operator
/// or keyword enum.
macro_rules! impl_str_enum {
    ($name:ident { $($variant:ident => $text:literal),* $(,)? }) => {
        impl $name {
            /// Source spelling, as serialized.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )*
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Operators and keyword-valued fields
// ---------------------------------------------------------------------------

impl_str_enum!(BinaryOp {
    Eq => "==",
    NotEq => "!=",
    StrictEq => "===",
    StrictNotEq => "!==",
    Lt => "<",
    LtEq => "<=",
    Gt => ">",
    GtEq => ">=",
    Shl => "<<",
    Shr => ">>",
    UShr => ">>>",
    Add => "+",
    Sub => "-",
    Mul => "*",
    Div => "/",
    Mod => "%",
    Exp => "**",
    BitOr => "|",
    BitXor => "^",
    BitAnd => "&",
    In => "in",
    Instanceof => "instanceof",
});

impl_str_enum!(LogicalOp {
    And => "&&",
    Or => "||",
    Nullish => "??",
});

impl_str_enum!(UnaryOp {
    Minus => "-",
    Plus => "+",
    Not => "!",
    BitNot => "~",
    Typeof => "typeof",
    Void => "void",
    Delete => "delete",
});

impl_str_enum!(UpdateOp {
    Increment => "++",
    Decrement => "--",
});

impl_str_enum!(AssignOp {
    Assign => "=",
    Add => "+=",
    Sub => "-=",
    Mul => "*=",
    Div => "/=",
    Mod => "%=",
    Exp => "**=",
    Shl => "<<=",
    Shr => ">>=",
    UShr => ">>>=",
    BitAnd => "&=",
    BitOr => "|=",
    BitXor => "^=",
    LogicalAnd => "&&=",
    LogicalOr => "||=",
    Nullish => "??=",
});

impl_str_enum!(PropertyKind {
    Init => "init",
    Get => "get",
    Set => "set",
});

impl_str_enum!(MethodKind {
    Constructor => "constructor",
    Method => "method",
    Get => "get",
    Set => "set",
});

impl_str_enum!(SourceType {
    Script => "script",
    Module => "module",
});

impl Serialize for VariableKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Category enums
// ---------------------------------------------------------------------------

impl_passthrough!(Statement {
    Expression, Block, Empty, Debugger, With, Return, Labeled, Break,
    Continue, If, Switch, Throw, Try, While, DoWhile, For, ForIn, ForOf,
    VariableDeclaration, FunctionDeclaration, ClassDeclaration, Import,
    ExportNamed, ExportDefault, ExportAll,
});

impl_passthrough!(Expression {
    Identifier, PrivateIdentifier, Literal, This, Array, Object, Function,
    Arrow, Class, TaggedTemplate, Template, Member, Super, MetaProperty,
    New, Call, Import, Update, Unary, Binary, Logical, Conditional, Yield,
    Await, Assignment, Sequence, JsxElement, JsxFragment,
});

impl_passthrough!(Pattern { Identifier, Object, Array, Assignment, Rest, Member });
impl_passthrough!(Argument { Expression, Spread });
impl_passthrough!(PropertyOrSpread { Property, Spread });
impl_passthrough!(ObjectPatternProperty { Property, Rest });
impl_passthrough!(PropertyKey { Expression, Private });
impl_passthrough!(AssignmentTarget { Pattern, Expression });
impl_passthrough!(ForInit { Declaration, Expression });
impl_passthrough!(ForTarget { Declaration, Pattern });
impl_passthrough!(ArrowBody { Block, Expression });
impl_passthrough!(ClassElement { Method, Property, StaticBlock });
impl_passthrough!(ExportDefaultPayload { Function, Class, Expression });
impl_passthrough!(ModuleExportName { Identifier, Literal });
impl_passthrough!(ImportSpecifier { Named, Default, Namespace });
impl_passthrough!(JsxElementName { Identifier, Member, Namespaced });
impl_passthrough!(JsxAttributeName { Identifier, Namespaced });
impl_passthrough!(JsxAttributeValue { Literal, Container, Element, Fragment });
impl_passthrough!(JsxAttributeItem { Attribute, Spread });
impl_passthrough!(JsxChild { Text, Container, Element, Fragment });
impl_passthrough!(JsxContainedExpression { Expression, Empty });

// ---------------------------------------------------------------------------
// Node structs
// ---------------------------------------------------------------------------

impl Serialize for Program {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Program")?;
        map.serialize_entry("body", &self.body)?;
        map.serialize_entry("sourceType", &self.source_type)?;
        end_with_pos(map, &self.pos)
    }
}

impl_node!(Identifier { "name" => name });
impl_node!(PrivateIdentifier { "name" => name });
impl_node!(ThisExpression {});
impl_node!(Super {});
impl_node!(MetaProperty { "meta" => meta, "property" => property });
impl_node!(SpreadElement { "argument" => argument });
impl_node!(RestElement { "argument" => argument });

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Literal")?;
        match &self.value {
            LiteralValue::Null => map.serialize_entry("value", &Option::<bool>::None)?,
            LiteralValue::Boolean(b) => map.serialize_entry("value", b)?,
            LiteralValue::Number(n) => map.serialize_entry("value", n)?,
            LiteralValue::String(s) => map.serialize_entry("value", s)?,
            // BigInt and RegExp values have no JSON representation; the
            // companion fields below carry the data.
            LiteralValue::BigInt(digits) => {
                map.serialize_entry("value", &Option::<bool>::None)?;
                map.serialize_entry("bigint", digits)?;
            }
            LiteralValue::Regex => map.serialize_entry("value", &Option::<bool>::None)?,
        }
        if let Some(regex) = &self.regex {
            map.serialize_entry("regex", regex)?;
        }
        if let Some(raw) = &self.raw {
            map.serialize_entry("raw", raw)?;
        }
        end_with_pos(map, &self.pos)
    }
}

impl Serialize for RegexValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("pattern", &self.pattern)?;
        map.serialize_entry("flags", &self.flags)?;
        map.end()
    }
}

impl_node!(ArrayExpression { "elements" => elements });
impl_node!(ObjectExpression { "properties" => properties });
impl_node!(Property {
    "key" => key,
    "value" => value,
    "kind" => kind,
    "method" => method,
    "shorthand" => shorthand,
    "computed" => computed,
});
impl_node!(MemberExpression {
    "object" => object,
    "property" => property,
    "computed" => computed,
    "optional" => optional,
});
impl_node!(CallExpression {
    "callee" => callee,
    "arguments" => arguments,
    "optional" => optional,
});
impl_node!(NewExpression { "callee" => callee, "arguments" => arguments });
impl_node!(ImportExpression { "source" => source });
impl_node!(UpdateExpression {
    "operator" => operator,
    "argument" => argument,
    "prefix" => prefix,
});
impl_node!(UnaryExpression {
    "operator" => operator,
    "argument" => argument,
    "prefix" => prefix,
});
impl_node!(BinaryExpression {
    "operator" => operator,
    "left" => left,
    "right" => right,
});
impl_node!(LogicalExpression {
    "operator" => operator,
    "left" => left,
    "right" => right,
});
impl_node!(ConditionalExpression {
    "test" => test,
    "consequent" => consequent,
    "alternate" => alternate,
});
impl_node!(AssignmentExpression {
    "operator" => operator,
    "left" => left,
    "right" => right,
});
impl_node!(SequenceExpression { "expressions" => expressions });
impl_node!(YieldExpression { "argument" => argument, "delegate" => delegate });
impl_node!(AwaitExpression { "argument" => argument });
impl_node!(TemplateLiteral { "quasis" => quasis, "expressions" => expressions });
impl_node!(TemplateElement { "value" => value, "tail" => tail });
impl_node!(TaggedTemplateExpression { "tag" => tag, "quasi" => quasi });

impl Serialize for TemplateElementValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("cooked", &self.cooked)?;
        map.serialize_entry("raw", &self.raw)?;
        map.end()
    }
}

impl_node!(FunctionExpression {
    "id" => id,
    "params" => params,
    "body" => body,
    "generator" => is_generator,
    "async" => is_async,
});
impl_node!(FunctionDeclaration {
    "id" => id,
    "params" => params,
    "body" => body,
    "generator" => is_generator,
    "async" => is_async,
});

impl Serialize for ArrowFunctionExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "ArrowFunctionExpression")?;
        map.serialize_entry("id", &Option::<bool>::None)?;
        map.serialize_entry("params", &self.params)?;
        map.serialize_entry("body", &self.body)?;
        map.serialize_entry("generator", &false)?;
        map.serialize_entry("async", &self.is_async)?;
        map.serialize_entry(
            "expression",
            &matches!(self.body, ArrowBody::Expression(_)),
        )?;
        end_with_pos(map, &self.pos)
    }
}

impl Serialize for ExpressionStatement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "ExpressionStatement")?;
        map.serialize_entry("expression", &self.expression)?;
        if let Some(directive) = &self.directive {
            map.serialize_entry("directive", directive)?;
        }
        end_with_pos(map, &self.pos)
    }
}

impl_node!(BlockStatement { "body" => body });
impl_node!(EmptyStatement {});
impl_node!(DebuggerStatement {});
impl_node!(WithStatement { "object" => object, "body" => body });
impl_node!(ReturnStatement { "argument" => argument });
impl_node!(LabeledStatement { "label" => label, "body" => body });
impl_node!(BreakStatement { "label" => label });
impl_node!(ContinueStatement { "label" => label });
impl_node!(IfStatement {
    "test" => test,
    "consequent" => consequent,
    "alternate" => alternate,
});
impl_node!(SwitchCase { "test" => test, "consequent" => consequent });
impl_node!(SwitchStatement { "discriminant" => discriminant, "cases" => cases });
impl_node!(ThrowStatement { "argument" => argument });
impl_node!(CatchClause { "param" => param, "body" => body });
impl_node!(TryStatement {
    "block" => block,
    "handler" => handler,
    "finalizer" => finalizer,
});
impl_node!(WhileStatement { "test" => test, "body" => body });
impl_node!(DoWhileStatement { "body" => body, "test" => test });
impl_node!(ForStatement {
    "init" => init,
    "test" => test,
    "update" => update,
    "body" => body,
});
impl_node!(ForInStatement { "left" => left, "right" => right, "body" => body });
impl_node!(ForOfStatement {
    "left" => left,
    "right" => right,
    "body" => body,
    "await" => is_await,
});
impl_node!(VariableDeclarator { "id" => id, "init" => init });
impl_node!(VariableDeclaration { "kind" => kind, "declarations" => declarations });

impl_node!(MethodDefinition {
    "key" => key,
    "value" => value,
    "kind" => kind,
    "static" => is_static,
    "computed" => computed,
});
impl_node!(PropertyDefinition {
    "key" => key,
    "value" => value,
    "static" => is_static,
    "computed" => computed,
});
impl_node!(StaticBlock { "body" => body });
impl_node!(ClassBody { "body" => body });
impl_node!(ClassDeclaration {
    "id" => id,
    "superClass" => super_class,
    "body" => body,
});
impl_node!(ClassExpression {
    "id" => id,
    "superClass" => super_class,
    "body" => body,
});

impl_node!(ObjectPattern { "properties" => properties });
impl_node!(ArrayPattern { "elements" => elements });
impl_node!(AssignmentPattern { "left" => left, "right" => right });

impl Serialize for PatternProperty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "Property")?;
        map.serialize_entry("key", &self.key)?;
        map.serialize_entry("value", &self.value)?;
        map.serialize_entry("kind", "init")?;
        map.serialize_entry("method", &false)?;
        map.serialize_entry("shorthand", &self.shorthand)?;
        map.serialize_entry("computed", &self.computed)?;
        end_with_pos(map, &self.pos)
    }
}

impl_node!(ImportNamedSpecifier as "ImportSpecifier" {
    "imported" => imported,
    "local" => local,
});
impl_node!(ImportDefaultSpecifier { "local" => local });
impl_node!(ImportNamespaceSpecifier { "local" => local });
impl_node!(ImportDeclaration { "specifiers" => specifiers, "source" => source });
impl_node!(ExportSpecifier { "local" => local, "exported" => exported });
impl_node!(ExportNamedDeclaration {
    "declaration" => declaration,
    "specifiers" => specifiers,
    "source" => source,
});
impl_node!(ExportDefaultDeclaration { "declaration" => declaration });
impl_node!(ExportAllDeclaration { "source" => source, "exported" => exported });

impl_node!(JsxIdentifier as "JSXIdentifier" { "name" => name });
impl_node!(JsxMemberExpression as "JSXMemberExpression" {
    "object" => object,
    "property" => property,
});
impl_node!(JsxNamespacedName as "JSXNamespacedName" {
    "namespace" => namespace,
    "name" => name,
});
impl_node!(JsxAttribute as "JSXAttribute" { "name" => name, "value" => value });
impl_node!(JsxSpreadAttribute as "JSXSpreadAttribute" { "argument" => argument });
impl_node!(JsxExpressionContainer as "JSXExpressionContainer" {
    "expression" => expression,
});
impl_node!(JsxEmptyExpression as "JSXEmptyExpression" {});
impl_node!(JsxText as "JSXText" { "value" => value, "raw" => raw });
impl_node!(JsxOpeningElement as "JSXOpeningElement" {
    "name" => name,
    "attributes" => attributes,
    "selfClosing" => self_closing,
});
impl_node!(JsxClosingElement as "JSXClosingElement" { "name" => name });
impl_node!(JsxOpeningFragment as "JSXOpeningFragment" {});
impl_node!(JsxClosingFragment as "JSXClosingFragment" {});
impl_node!(JsxElement as "JSXElement" {
    "openingElement" => opening,
    "children" => children,
    "closingElement" => closing,
});
impl_node!(JsxFragment as "JSXFragment" {
    "openingFragment" => opening,
    "children" => children,
    "closingFragment" => closing,
});

#[cfg(test)]
mod tests {
    use crate::node::*;
    use crate::source::NodePos;

    fn ident(name: &str) -> Identifier {
        Identifier {
            name: name.to_string(),
            pos: NodePos::default(),
        }
    }

    #[test]
    fn test_identifier_type_tag() {
        let json = serde_json::to_value(ident("x")).unwrap();
        assert_eq!(json["type"], "Identifier");
        assert_eq!(json["name"], "x");
        assert!(json.get("start").is_none());
        assert!(json.get("loc").is_none());
    }

    #[test]
    fn test_explicit_tag_overrides_struct_name() {
        let text = JsxText {
            value: "hi".to_string(),
            raw: "hi".to_string(),
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(text).unwrap();
        assert_eq!(json["type"], "JSXText");

        let spec = ImportNamedSpecifier {
            local: ident("a"),
            imported: ModuleExportName::Identifier(ident("a")),
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json["type"], "ImportSpecifier");
    }

    #[test]
    fn test_positions_emitted_when_recorded() {
        let mut id = ident("x");
        id.pos.start = Some(4);
        id.pos.end = Some(5);
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json["start"], 4);
        assert_eq!(json["end"], 5);
    }

    #[test]
    fn test_binary_expression_shape() {
        let expr = BinaryExpression {
            operator: BinaryOp::Add,
            left: Box::new(Expression::Identifier(ident("a"))),
            right: Box::new(Expression::Identifier(ident("b"))),
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(expr).unwrap();
        assert_eq!(json["type"], "BinaryExpression");
        assert_eq!(json["operator"], "+");
        assert_eq!(json["left"]["type"], "Identifier");
    }

    #[test]
    fn test_return_without_argument_serializes_null() {
        let stmt = ReturnStatement {
            argument: None,
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(stmt).unwrap();
        assert!(json["argument"].is_null());
    }

    #[test]
    fn test_array_holes_serialize_null() {
        let arr = ArrayExpression {
            elements: vec![
                None,
                Some(Argument::Expression(Expression::Identifier(ident("a")))),
            ],
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(arr).unwrap();
        assert!(json["elements"][0].is_null());
        assert_eq!(json["elements"][1]["type"], "Identifier");
    }

    #[test]
    fn test_pattern_property_serializes_as_property() {
        let prop = PatternProperty {
            key: PropertyKey::Expression(Box::new(Expression::Identifier(ident("b")))),
            value: Pattern::Identifier(ident("b")),
            shorthand: true,
            computed: false,
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(prop).unwrap();
        assert_eq!(json["type"], "Property");
        assert_eq!(json["kind"], "init");
        assert_eq!(json["shorthand"], true);
    }

    #[test]
    fn test_bigint_literal_carries_digits() {
        let lit = Literal {
            value: LiteralValue::BigInt("42".to_string()),
            raw: Some("42n".to_string()),
            regex: None,
            pos: NodePos::default(),
        };
        let json = serde_json::to_value(lit).unwrap();
        assert!(json["value"].is_null());
        assert_eq!(json["bigint"], "42");
        assert_eq!(json["raw"], "42n");
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinaryOp::UShr.as_str(), ">>>");
        assert_eq!(AssignOp::Nullish.as_str(), "??=");
        assert_eq!(UnaryOp::Typeof.to_string(), "typeof");
    }
}
