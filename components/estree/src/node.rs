//! ESTree node definitions.
//!
//! One type per ESTree node kind, grouped by grammar category. Every node
//! exclusively owns its children; the tree is acyclic with [`Program`] as
//! the sole root. Each node carries a [`NodePos`] whose fields are
//! populated exactly according to the parse configuration.
//!
//! Serialization (the `"type"`-tagged ESTree JSON form) lives in the
//! `ser` module; these definitions stay plain data.

use crate::source::NodePos;

/// Goal symbol the program was parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Script goal: `import`/`export` forbidden, sloppy by default
    Script,
    /// Module goal: implicitly strict, module items permitted
    Module,
}

/// Root node of every successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements and module items
    pub body: Vec<Statement>,
    /// Goal symbol this program was parsed under
    pub source_type: SourceType,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Any statement or declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Expression statement (possibly a directive)
    Expression(ExpressionStatement),
    /// `{ ... }` block
    Block(BlockStatement),
    /// Lone `;`
    Empty(EmptyStatement),
    /// `debugger;`
    Debugger(DebuggerStatement),
    /// `with (obj) stmt` (sloppy mode only)
    With(WithStatement),
    /// `return expr?;`
    Return(ReturnStatement),
    /// `label: stmt`
    Labeled(Box<LabeledStatement>),
    /// `break label?;`
    Break(BreakStatement),
    /// `continue label?;`
    Continue(ContinueStatement),
    /// `if (test) cons else alt`
    If(Box<IfStatement>),
    /// `switch (disc) { cases }`
    Switch(SwitchStatement),
    /// `throw expr;`
    Throw(ThrowStatement),
    /// `try { } catch { } finally { }`
    Try(Box<TryStatement>),
    /// `while (test) body`
    While(Box<WhileStatement>),
    /// `do body while (test);`
    DoWhile(Box<DoWhileStatement>),
    /// C-style `for`
    For(Box<ForStatement>),
    /// `for (lhs in rhs) body`
    ForIn(Box<ForInStatement>),
    /// `for (lhs of rhs) body`
    ForOf(Box<ForOfStatement>),
    /// `var`/`let`/`const` declaration
    VariableDeclaration(VariableDeclaration),
    /// `function f() {}` declaration
    FunctionDeclaration(FunctionDeclaration),
    /// `class C {}` declaration
    ClassDeclaration(ClassDeclaration),
    /// `import ... from "m";`
    Import(ImportDeclaration),
    /// `export { ... }` / `export decl`
    ExportNamed(Box<ExportNamedDeclaration>),
    /// `export default ...`
    ExportDefault(Box<ExportDefaultDeclaration>),
    /// `export * from "m";`
    ExportAll(ExportAllDeclaration),
}

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Identifier reference
    Identifier(Identifier),
    /// `#name` (only as the left operand of `in` or a member property)
    PrivateIdentifier(PrivateIdentifier),
    /// Number, string, boolean, null, bigint or regex literal
    Literal(Literal),
    /// `this`
    This(ThisExpression),
    /// `[ ... ]`
    Array(ArrayExpression),
    /// `{ ... }`
    Object(ObjectExpression),
    /// `function () {}`
    Function(FunctionExpression),
    /// `x => y` / `() => {}`
    Arrow(Box<ArrowFunctionExpression>),
    /// `class {}`
    Class(Box<ClassExpression>),
    /// `` tag`...` ``
    TaggedTemplate(Box<TaggedTemplateExpression>),
    /// `` `...${x}...` ``
    Template(TemplateLiteral),
    /// `a.b`, `a[b]`, `a?.b`
    Member(Box<MemberExpression>),
    /// `super` (in member/call position only)
    Super(Super),
    /// `new.target` / `import.meta`
    MetaProperty(MetaProperty),
    /// `new Callee(args)`
    New(Box<NewExpression>),
    /// `callee(args)`
    Call(Box<CallExpression>),
    /// Dynamic `import(source)`
    Import(Box<ImportExpression>),
    /// `++x`, `x--`
    Update(Box<UpdateExpression>),
    /// `-x`, `typeof x`, ...
    Unary(Box<UnaryExpression>),
    /// `a + b`, `a instanceof b`, ...
    Binary(Box<BinaryExpression>),
    /// `a && b`, `a || b`, `a ?? b`
    Logical(Box<LogicalExpression>),
    /// `test ? cons : alt`
    Conditional(Box<ConditionalExpression>),
    /// `yield expr?` / `yield* expr`
    Yield(Box<YieldExpression>),
    /// `await expr`
    Await(Box<AwaitExpression>),
    /// `lhs = rhs` and compound forms
    Assignment(Box<AssignmentExpression>),
    /// `a, b, c`
    Sequence(SequenceExpression),
    /// `<div ... />`
    JsxElement(Box<JsxElement>),
    /// `<> ... </>`
    JsxFragment(Box<JsxFragment>),
}

/// A binding or assignment pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// Plain identifier binding
    Identifier(Identifier),
    /// `{ a, b: c = d, ...rest }`
    Object(ObjectPattern),
    /// `[ a, , b = c, ...rest ]`
    Array(ArrayPattern),
    /// `lhs = default`
    Assignment(Box<AssignmentPattern>),
    /// `...rest`
    Rest(Box<RestElement>),
    /// Member expression target; valid in assignment positions only
    Member(Box<MemberExpression>),
}

/// Call argument / spreadable array element.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Plain expression
    Expression(Expression),
    /// `...expr`
    Spread(SpreadElement),
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOrSpread {
    /// Key/value, shorthand, method or accessor property
    Property(Box<Property>),
    /// `...expr`
    Spread(SpreadElement),
}

/// Object pattern member.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectPatternProperty {
    /// `key: pattern` / shorthand
    Property(Box<PatternProperty>),
    /// `...rest`
    Rest(RestElement),
}

/// Property key: an expression (identifier, literal, computed) or a
/// private name.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    /// Identifier, literal, or computed key expression
    Expression(Box<Expression>),
    /// `#name`
    Private(PrivateIdentifier),
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentTarget {
    /// Destructuring pattern (from the expression→pattern rewrite)
    Pattern(Pattern),
    /// Identifier or member expression used in place
    Expression(Box<Expression>),
}

/// Init clause of a C-style `for`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    /// `for (var/let/const ...;;)`
    Declaration(VariableDeclaration),
    /// `for (expr;;)`
    Expression(Box<Expression>),
}

/// Left side of `for-in`/`for-of`.
#[derive(Debug, Clone, PartialEq)]
pub enum ForTarget {
    /// Fresh declaration: `for (let x of ...)`
    Declaration(VariableDeclaration),
    /// Existing target: `for (x of ...)`, `for ([a, b] of ...)`
    Pattern(Pattern),
}

/// Arrow function body.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrowBody {
    /// `=> { ... }`
    Block(BlockStatement),
    /// `=> expr`
    Expression(Box<Expression>),
}

/// Member of a class body.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassElement {
    /// Method, accessor or constructor
    Method(Box<MethodDefinition>),
    /// Field definition
    Property(Box<PropertyDefinition>),
    /// `static { ... }`
    StaticBlock(StaticBlock),
}

/// Payload of `export default`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportDefaultPayload {
    /// `export default function ...`
    Function(FunctionDeclaration),
    /// `export default class ...`
    Class(ClassDeclaration),
    /// `export default expr;`
    Expression(Box<Expression>),
}

/// Exported or imported name: identifier or (ES2022) string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleExportName {
    /// Plain identifier name
    Identifier(Identifier),
    /// String literal name
    Literal(Literal),
}

/// Import clause specifier.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportSpecifier {
    /// `import { a as b }`
    Named(ImportNamedSpecifier),
    /// `import d from`
    Default(ImportDefaultSpecifier),
    /// `import * as ns from`
    Namespace(ImportNamespaceSpecifier),
}

// ---------------------------------------------------------------------------
// Leaves and shared shapes
// ---------------------------------------------------------------------------

/// Identifier reference or binding name.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The name, with unicode escapes already decoded
    pub name: String,
    /// Position attachment
    pub pos: NodePos,
}

/// Class private name, e.g. `#count`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateIdentifier {
    /// Name without the leading `#`
    pub name: String,
    /// Position attachment
    pub pos: NodePos,
}

/// Computed value of a literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean(bool),
    /// Numeric literal, after radix/separator processing
    Number(f64),
    /// String literal, after escape processing
    String(String),
    /// BigInt digits in canonical decimal form
    BigInt(String),
    /// Regex literal; the value is carried in `Literal::regex`
    Regex,
}

/// Regex pattern/flags pair attached to regex literals.
#[derive(Debug, Clone, PartialEq)]
pub struct RegexValue {
    /// Pattern between the slashes, uninterpreted
    pub pattern: String,
    /// Flag characters after the closing slash
    pub flags: String,
}

/// Literal node: number, string, boolean, null, bigint or regex.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    /// Computed value
    pub value: LiteralValue,
    /// Original source text, present iff the `raw` option was set
    pub raw: Option<String>,
    /// Pattern/flags for regex literals, `None` otherwise
    pub regex: Option<RegexValue>,
    /// Position attachment
    pub pos: NodePos,
}

/// `this`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThisExpression {
    /// Position attachment
    pub pos: NodePos,
}

/// `super`, legal only as a call or member base inside methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Super {
    /// Position attachment
    pub pos: NodePos,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaProperty {
    /// `new` or `import`
    pub meta: Identifier,
    /// `target` or `meta`
    pub property: Identifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `...argument` in call/array/object-literal position.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElement {
    /// Spread operand
    pub argument: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `...argument` in pattern position.
#[derive(Debug, Clone, PartialEq)]
pub struct RestElement {
    /// Rest target pattern
    pub argument: Box<Pattern>,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// `[ el, , ...rest ]`; `None` elements are elisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    /// Elements; `None` is a hole
    pub elements: Vec<Option<Argument>>,
    /// Position attachment
    pub pos: NodePos,
}

/// `{ a: 1, b, ...c, m() {} }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    /// Properties in source order
    pub properties: Vec<PropertyOrSpread>,
    /// Position attachment
    pub pos: NodePos,
}

/// Kind of an object literal property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Plain `key: value`
    Init,
    /// `get key() {}`
    Get,
    /// `set key(v) {}`
    Set,
}

/// Object literal property.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property key
    pub key: PropertyKey,
    /// Property value
    pub value: Box<Expression>,
    /// Plain, getter or setter
    pub kind: PropertyKind,
    /// True for method shorthand `m() {}`
    pub method: bool,
    /// True for `{ a }` shorthand
    pub shorthand: bool,
    /// True for `[expr]:` keys
    pub computed: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `a.b` / `a[b]` / `a?.b` / `a.#p`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    /// Base object
    pub object: Box<Expression>,
    /// Property expression or private name
    pub property: Box<Expression>,
    /// True for bracket access
    pub computed: bool,
    /// True for `?.` access
    pub optional: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `callee(args)` / `callee?.(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpression {
    /// Called expression (possibly `Super`)
    pub callee: Box<Expression>,
    /// Arguments, spread allowed
    pub arguments: Vec<Argument>,
    /// True for `?.()` calls
    pub optional: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `new Callee(args)`; callee parsed at member precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpression {
    /// Constructed expression
    pub callee: Box<Expression>,
    /// Arguments; empty for `new X`
    pub arguments: Vec<Argument>,
    /// Position attachment
    pub pos: NodePos,
}

/// Dynamic `import(source)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportExpression {
    /// Module specifier expression
    pub source: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// Update operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

/// `++x` / `x--`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// `++` or `--`
    pub operator: UpdateOp,
    /// Target, a simple assignment target
    pub argument: Box<Expression>,
    /// True for the prefix form
    pub prefix: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// Unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `~`
    BitNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

/// Prefix unary expression.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    /// Operator
    pub operator: UnaryOp,
    /// Operand
    pub argument: Box<Expression>,
    /// Always true; ESTree carries the field
    pub prefix: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// Binary (non-logical) operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `>>>`
    UShr,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Exp,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `in`
    In,
    /// `instanceof`
    Instanceof,
}

/// `left op right`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    /// Operator
    pub operator: BinaryOp,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// Logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    Nullish,
}

/// `left && right` and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalExpression {
    /// Operator
    pub operator: LogicalOp,
    /// Left operand
    pub left: Box<Expression>,
    /// Right operand
    pub right: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `test ? consequent : alternate`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpression {
    /// Condition
    pub test: Box<Expression>,
    /// Value when truthy
    pub consequent: Box<Expression>,
    /// Value when falsy
    pub alternate: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// Assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
    /// `%=`
    Mod,
    /// `**=`
    Exp,
    /// `<<=`
    Shl,
    /// `>>=`
    Shr,
    /// `>>>=`
    UShr,
    /// `&=`
    BitAnd,
    /// `|=`
    BitOr,
    /// `^=`
    BitXor,
    /// `&&=`
    LogicalAnd,
    /// `||=`
    LogicalOr,
    /// `??=`
    Nullish,
}

/// `left op right` assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    /// Operator
    pub operator: AssignOp,
    /// Target, converted to a pattern where required
    pub left: AssignmentTarget,
    /// Assigned value
    pub right: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// Comma-separated expression sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceExpression {
    /// At least two expressions
    pub expressions: Vec<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `yield` / `yield expr` / `yield* expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldExpression {
    /// Yielded value, if any
    pub argument: Option<Box<Expression>>,
    /// True for `yield*`
    pub delegate: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `await expr`.
#[derive(Debug, Clone, PartialEq)]
pub struct AwaitExpression {
    /// Awaited operand
    pub argument: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// Cooked/raw value pair of one template chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElementValue {
    /// Interpreted text; `None` when an escape was invalid (tagged only)
    pub cooked: Option<String>,
    /// Raw source text of the chunk
    pub raw: String,
}

/// One literal chunk of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateElement {
    /// Cooked and raw text
    pub value: TemplateElementValue,
    /// True for the final chunk
    pub tail: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `` `a${b}c` ``.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLiteral {
    /// Literal chunks; always `expressions.len() + 1` of them
    pub quasis: Vec<TemplateElement>,
    /// Interpolated expressions
    pub expressions: Vec<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `` tag`...` ``.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedTemplateExpression {
    /// Tag function expression
    pub tag: Box<Expression>,
    /// The template operand
    pub quasi: TemplateLiteral,
    /// Position attachment
    pub pos: NodePos,
}

/// `function f(params) { body }` expression form.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpression {
    /// Optional name
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Function body block
    pub body: BlockStatement,
    /// True for `async function`
    pub is_async: bool,
    /// True for `function*`
    pub is_generator: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// Arrow function.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowFunctionExpression {
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Expression or block body
    pub body: ArrowBody,
    /// True for `async` arrows
    pub is_async: bool,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

/// Expression statement; `directive` holds the raw text when the
/// statement is part of a directive prologue.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    /// The expression
    pub expression: Box<Expression>,
    /// Raw directive text (`use strict` etc.), prologue positions only
    pub directive: Option<String>,
    /// Position attachment
    pub pos: NodePos,
}

/// `{ ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    /// Statements in the block
    pub body: Vec<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// Lone semicolon.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyStatement {
    /// Position attachment
    pub pos: NodePos,
}

/// `debugger;`.
#[derive(Debug, Clone, PartialEq)]
pub struct DebuggerStatement {
    /// Position attachment
    pub pos: NodePos,
}

/// `with (object) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct WithStatement {
    /// Scope object expression
    pub object: Box<Expression>,
    /// Body statement
    pub body: Box<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `return argument?;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    /// Returned value, if any
    pub argument: Option<Box<Expression>>,
    /// Position attachment
    pub pos: NodePos,
}

/// `label: body`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledStatement {
    /// The label
    pub label: Identifier,
    /// Labeled statement
    pub body: Box<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `break label?;`.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakStatement {
    /// Target label, if any
    pub label: Option<Identifier>,
    /// Position attachment
    pub pos: NodePos,
}

/// `continue label?;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStatement {
    /// Target label, if any
    pub label: Option<Identifier>,
    /// Position attachment
    pub pos: NodePos,
}

/// `if (test) consequent else alternate?`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    /// Condition
    pub test: Box<Expression>,
    /// Taken branch
    pub consequent: Box<Statement>,
    /// `else` branch, if any
    pub alternate: Option<Box<Statement>>,
    /// Position attachment
    pub pos: NodePos,
}

/// One `case`/`default` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    /// Test expression; `None` for `default`
    pub test: Option<Expression>,
    /// Statements of the clause
    pub consequent: Vec<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `switch (discriminant) { cases }`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    /// Switched-on expression
    pub discriminant: Box<Expression>,
    /// Clauses in source order
    pub cases: Vec<SwitchCase>,
    /// Position attachment
    pub pos: NodePos,
}

/// `throw argument;`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowStatement {
    /// Thrown value
    pub argument: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `catch (param?) { body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    /// Binding; `None` for the optional-binding form
    pub param: Option<Pattern>,
    /// Handler block
    pub body: BlockStatement,
    /// Position attachment
    pub pos: NodePos,
}

/// `try { } catch { } finally { }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TryStatement {
    /// Protected block
    pub block: BlockStatement,
    /// Catch clause, if present
    pub handler: Option<CatchClause>,
    /// Finally block, if present
    pub finalizer: Option<BlockStatement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `while (test) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    /// Condition
    pub test: Box<Expression>,
    /// Loop body
    pub body: Box<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `do body while (test);`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhileStatement {
    /// Loop body
    pub body: Box<Statement>,
    /// Condition
    pub test: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// C-style `for (init; test; update) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    /// Init clause
    pub init: Option<ForInit>,
    /// Condition
    pub test: Option<Box<Expression>>,
    /// Update expression
    pub update: Option<Box<Expression>>,
    /// Loop body
    pub body: Box<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `for (left in right) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// Iteration target
    pub left: ForTarget,
    /// Enumerated object
    pub right: Box<Expression>,
    /// Loop body
    pub body: Box<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `for await? (left of right) body`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForOfStatement {
    /// Iteration target
    pub left: ForTarget,
    /// Iterated expression
    pub right: Box<Expression>,
    /// Loop body
    pub body: Box<Statement>,
    /// True for `for await`
    pub is_await: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// Declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

/// One `id = init?` declarator.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    /// Binding pattern
    pub id: Pattern,
    /// Initializer, if any
    pub init: Option<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `var`/`let`/`const` declaration list.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    /// Declaration keyword
    pub kind: VariableKind,
    /// Declarators in source order
    pub declarations: Vec<VariableDeclarator>,
    /// Position attachment
    pub pos: NodePos,
}

/// `function f(params) { body }` declaration form.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// Name; `None` only for anonymous `export default function`
    pub id: Option<Identifier>,
    /// Formal parameters
    pub params: Vec<Pattern>,
    /// Function body block
    pub body: BlockStatement,
    /// True for `async function`
    pub is_async: bool,
    /// True for `function*`
    pub is_generator: bool,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// Method kind within a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    /// The constructor
    Constructor,
    /// Ordinary method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Class method or accessor.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinition {
    /// Method name
    pub key: PropertyKey,
    /// The method function
    pub value: FunctionExpression,
    /// Constructor, method or accessor
    pub kind: MethodKind,
    /// True for `static` members
    pub is_static: bool,
    /// True for `[expr]` keys
    pub computed: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// Class field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDefinition {
    /// Field name
    pub key: PropertyKey,
    /// Initializer, if any
    pub value: Option<Box<Expression>>,
    /// True for `static` fields
    pub is_static: bool,
    /// True for `[expr]` keys
    pub computed: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `static { ... }` initialization block.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticBlock {
    /// Block statements
    pub body: Vec<Statement>,
    /// Position attachment
    pub pos: NodePos,
}

/// `class C extends S { body }` member list.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    /// Class members
    pub body: Vec<ClassElement>,
    /// Position attachment
    pub pos: NodePos,
}

/// Class declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    /// Name; `None` only for anonymous `export default class`
    pub id: Option<Identifier>,
    /// `extends` expression, if any
    pub super_class: Option<Box<Expression>>,
    /// Member list
    pub body: ClassBody,
    /// Position attachment
    pub pos: NodePos,
}

/// Class expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassExpression {
    /// Optional name
    pub id: Option<Identifier>,
    /// `extends` expression, if any
    pub super_class: Option<Box<Expression>>,
    /// Member list
    pub body: ClassBody,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// `{ a, b: c, ...rest }` binding pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectPattern {
    /// Pattern properties
    pub properties: Vec<ObjectPatternProperty>,
    /// Position attachment
    pub pos: NodePos,
}

/// One `key: value` entry of an object pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternProperty {
    /// Property key
    pub key: PropertyKey,
    /// Bound pattern
    pub value: Pattern,
    /// True for `{ a }` / `{ a = 1 }` shorthand
    pub shorthand: bool,
    /// True for `[expr]:` keys
    pub computed: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `[ a, , b ]` binding pattern; `None` elements are elisions.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayPattern {
    /// Element patterns; `None` is a hole
    pub elements: Vec<Option<Pattern>>,
    /// Position attachment
    pub pos: NodePos,
}

/// `left = right` default pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPattern {
    /// Bound pattern
    pub left: Box<Pattern>,
    /// Default value
    pub right: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

/// `import { a as b } from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportNamedSpecifier {
    /// Name as exported by the module
    pub imported: ModuleExportName,
    /// Local binding
    pub local: Identifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `import d from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDefaultSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `import * as ns from "m"`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportNamespaceSpecifier {
    /// Local binding
    pub local: Identifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `import ...specifiers from "source";`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// Import clause; empty for side-effect imports
    pub specifiers: Vec<ImportSpecifier>,
    /// Module specifier string
    pub source: Literal,
    /// Position attachment
    pub pos: NodePos,
}

/// `export { local as exported }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSpecifier {
    /// Local name (or re-exported name with `source`)
    pub local: ModuleExportName,
    /// Exported name
    pub exported: ModuleExportName,
    /// Position attachment
    pub pos: NodePos,
}

/// `export decl` / `export { ... } from?`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportNamedDeclaration {
    /// Exported declaration, if the `export decl` form
    pub declaration: Option<Statement>,
    /// Export clause specifiers
    pub specifiers: Vec<ExportSpecifier>,
    /// Re-export source, if any
    pub source: Option<Literal>,
    /// Position attachment
    pub pos: NodePos,
}

/// `export default ...`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDefaultDeclaration {
    /// Exported function, class or expression
    pub declaration: ExportDefaultPayload,
    /// Position attachment
    pub pos: NodePos,
}

/// `export * as ns? from "source";`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportAllDeclaration {
    /// Re-export source
    pub source: Literal,
    /// `as ns` name, if any
    pub exported: Option<ModuleExportName>,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// JSX
// ---------------------------------------------------------------------------

/// JSX element name.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxElementName {
    /// `<div>`
    Identifier(JsxIdentifier),
    /// `<A.B.C>`
    Member(Box<JsxMemberExpression>),
    /// `<a:b>`
    Namespaced(JsxNamespacedName),
}

/// JSX attribute name.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeName {
    /// `attr=`
    Identifier(JsxIdentifier),
    /// `ns:attr=`
    Namespaced(JsxNamespacedName),
}

/// JSX attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeValue {
    /// `attr="text"`
    Literal(Literal),
    /// `attr={expr}`
    Container(JsxExpressionContainer),
    /// `attr=<el/>`
    Element(Box<JsxElement>),
    /// `attr=<>...</>`
    Fragment(Box<JsxFragment>),
}

/// Attribute or spread attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxAttributeItem {
    /// `attr=value`
    Attribute(JsxAttribute),
    /// `{...props}`
    Spread(JsxSpreadAttribute),
}

/// Child of a JSX element or fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    /// Raw text run
    Text(JsxText),
    /// `{expr}` container
    Container(JsxExpressionContainer),
    /// Nested element
    Element(Box<JsxElement>),
    /// Nested fragment
    Fragment(Box<JsxFragment>),
}

/// Expression inside a `{...}` container.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxContainedExpression {
    /// Ordinary expression
    Expression(Box<Expression>),
    /// Empty `{}` / comment-only container
    Empty(JsxEmptyExpression),
}

/// JSX identifier (allows dashes).
#[derive(Debug, Clone, PartialEq)]
pub struct JsxIdentifier {
    /// The name
    pub name: String,
    /// Position attachment
    pub pos: NodePos,
}

/// `A.B` element name.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxMemberExpression {
    /// Base name
    pub object: JsxElementName,
    /// Member name
    pub property: JsxIdentifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `ns:name`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxNamespacedName {
    /// Namespace part
    pub namespace: JsxIdentifier,
    /// Name part
    pub name: JsxIdentifier,
    /// Position attachment
    pub pos: NodePos,
}

/// `attr` / `attr=value`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxAttribute {
    /// Attribute name
    pub name: JsxAttributeName,
    /// Value; `None` for bare boolean attributes
    pub value: Option<JsxAttributeValue>,
    /// Position attachment
    pub pos: NodePos,
}

/// `{...props}`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxSpreadAttribute {
    /// Spread operand
    pub argument: Box<Expression>,
    /// Position attachment
    pub pos: NodePos,
}

/// `{expr}` child or attribute value.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxExpressionContainer {
    /// Contained expression
    pub expression: JsxContainedExpression,
    /// Position attachment
    pub pos: NodePos,
}

/// The hole in an empty `{}` container.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxEmptyExpression {
    /// Position attachment
    pub pos: NodePos,
}

/// Raw text between JSX tags.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxText {
    /// Decoded text
    pub value: String,
    /// Raw source text
    pub raw: String,
    /// Position attachment
    pub pos: NodePos,
}

/// `<name attrs> children </name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxOpeningElement {
    /// Element name
    pub name: JsxElementName,
    /// Attributes in source order
    pub attributes: Vec<JsxAttributeItem>,
    /// True for `<el />`
    pub self_closing: bool,
    /// Position attachment
    pub pos: NodePos,
}

/// `</name>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxClosingElement {
    /// Element name; must match the opening tag
    pub name: JsxElementName,
    /// Position attachment
    pub pos: NodePos,
}

/// `<>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxOpeningFragment {
    /// Position attachment
    pub pos: NodePos,
}

/// `</>`.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxClosingFragment {
    /// Position attachment
    pub pos: NodePos,
}

/// Complete JSX element.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    /// Opening tag
    pub opening: JsxOpeningElement,
    /// Children; empty for self-closing elements
    pub children: Vec<JsxChild>,
    /// Closing tag; `None` for self-closing elements
    pub closing: Option<JsxClosingElement>,
    /// Position attachment
    pub pos: NodePos,
}

/// Complete JSX fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxFragment {
    /// `<>`
    pub opening: JsxOpeningFragment,
    /// Children
    pub children: Vec<JsxChild>,
    /// `</>`
    pub closing: JsxClosingFragment,
    /// Position attachment
    pub pos: NodePos,
}

// ---------------------------------------------------------------------------
// Small helpers used across parser stages
// ---------------------------------------------------------------------------

impl Expression {
    /// The identifier's name when this expression is a plain identifier.
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Expression::Identifier(id) => Some(&id.name),
            _ => None,
        }
    }

    /// True for expressions valid as simple assignment targets.
    pub fn is_simple_target(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Member(_))
    }
}

impl VariableKind {
    /// Keyword spelling, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }

    /// True for `let`/`const` (lexical) declarations.
    pub fn is_lexical(&self) -> bool {
        !matches!(self, VariableKind::Var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_name_helper() {
        let expr = Expression::Identifier(Identifier {
            name: "x".to_string(),
            pos: NodePos::default(),
        });
        assert_eq!(expr.identifier_name(), Some("x"));
        assert!(expr.is_simple_target());
    }

    #[test]
    fn test_literal_is_not_simple_target() {
        let expr = Expression::Literal(Literal {
            value: LiteralValue::Number(1.0),
            raw: None,
            regex: None,
            pos: NodePos::default(),
        });
        assert!(!expr.is_simple_target());
    }

    #[test]
    fn test_variable_kind_spelling() {
        assert_eq!(VariableKind::Var.as_str(), "var");
        assert_eq!(VariableKind::Let.as_str(), "let");
        assert_eq!(VariableKind::Const.as_str(), "const");
        assert!(VariableKind::Let.is_lexical());
        assert!(!VariableKind::Var.is_lexical());
    }
}
