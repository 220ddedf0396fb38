//! Expression grammar.
//!
//! Assignment, conditional, binary (precedence climbing), unary,
//! left-hand-side chains, and the primary forms. Parenthesized
//! expressions and call-style `async (...)` are parsed once under the
//! cover grammar and resolved into arrows, calls, or plain
//! parenthesized expressions when the following token is known.

use std::collections::HashSet;

use estree::{
    Argument, ArrayExpression, ArrowBody, ArrowFunctionExpression, AssignOp, AssignmentExpression,
    AssignmentTarget, AwaitExpression, BinaryExpression, BinaryOp, BlockStatement, CallExpression,
    ConditionalExpression, ErrorKind, Expression, Identifier, ImportExpression, Literal,
    LiteralValue, LogicalExpression, LogicalOp, MemberExpression, MetaProperty, NewExpression,
    NodePos, ObjectExpression, ParseError, Pattern, Position, PrivateIdentifier, Property,
    PropertyKey, PropertyKind, PropertyOrSpread, RegexValue, SequenceExpression, SourceLocation,
    SpreadElement, Super, TaggedTemplateExpression, TemplateElement, TemplateElementValue,
    TemplateLiteral, ThisExpression, UnaryExpression, UnaryOp, UpdateExpression, UpdateOp,
    YieldExpression,
};

use super::pattern::{collect_bound_names, has_optional_chain};
use super::{Marker, Parser, PatternKind};
use crate::context::Context;
use crate::lexer::{Keyword, Punct, TemplatePart, Token, TokenKind};

// Binary or logical operator with its binding power.
#[derive(Clone, Copy)]
enum BinOp {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

// One item of the `(...)` cover: a plain expression or a spread/rest.
enum CoverItem {
    Expr(Expression),
    Spread(SpreadElement),
}

impl<'a> Parser<'a> {
    /// Expression, including comma sequences.
    pub(crate) fn parse_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        let first = self.parse_assignment_expression(ctx)?;
        if !self.current.is_punct(Punct::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat_punct(Punct::Comma)? {
            expressions.push(self.parse_assignment_expression(ctx)?);
        }
        Ok(Expression::Sequence(SequenceExpression {
            expressions,
            pos: self.finish(m),
        }))
    }

    /// AssignmentExpression, the workhorse entry for most contexts.
    pub(crate) fn parse_assignment_expression(
        &mut self,
        ctx: Context,
    ) -> Result<Expression, ParseError> {
        self.with_depth(|p| p.parse_assignment_inner(ctx))
    }

    fn parse_assignment_inner(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        if ctx.yield_is_keyword() && self.current.is_ident("yield") {
            return self.parse_yield_expression(ctx);
        }
        let m = self.mark();
        let expr = self.parse_conditional(ctx)?;

        // `x => ...` over a bare identifier.
        if self.current.is_punct(Punct::Arrow) && !self.current.newline_before {
            if let Expression::Identifier(id) = expr {
                self.validate_binding_name(&id.name, ctx.enter_arrow(false), PatternKind::Binding)?;
                return self.parse_arrow_tail(ctx, m, vec![Pattern::Identifier(id)], false);
            }
            return Err(self.unexpected());
        }

        let Some(op) = assign_op_of(&self.current.kind) else {
            return Ok(expr);
        };
        let left = if op == AssignOp::Assign {
            match expr {
                Expression::Identifier(id) => {
                    self.validate_binding_name(&id.name, ctx, PatternKind::Assignment)?;
                    AssignmentTarget::Expression(Box::new(Expression::Identifier(id)))
                }
                Expression::Member(member) => {
                    let target = Expression::Member(member);
                    if has_optional_chain(&target) {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Invalid left-hand side in assignment",
                        ));
                    }
                    AssignmentTarget::Expression(Box::new(target))
                }
                target @ (Expression::Array(_) | Expression::Object(_)) => {
                    if self.paren_expr_start == Some(m.offset) {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Invalid left-hand side in assignment",
                        ));
                    }
                    let pattern =
                        self.expression_to_pattern(target, PatternKind::Assignment, ctx)?;
                    AssignmentTarget::Pattern(pattern)
                }
                _ => {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Invalid left-hand side in assignment",
                    ));
                }
            }
        } else {
            // Compound and logical assignment need a simple target.
            match expr {
                Expression::Identifier(id) => {
                    self.validate_binding_name(&id.name, ctx, PatternKind::Assignment)?;
                    AssignmentTarget::Expression(Box::new(Expression::Identifier(id)))
                }
                Expression::Member(member) => {
                    let target = Expression::Member(member);
                    if has_optional_chain(&target) {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Invalid left-hand side in assignment",
                        ));
                    }
                    AssignmentTarget::Expression(Box::new(target))
                }
                _ => {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Invalid left-hand side in assignment",
                    ));
                }
            }
        };
        self.advance()?;
        let right = self.parse_assignment_expression(ctx)?;
        Ok(Expression::Assignment(Box::new(AssignmentExpression {
            operator: op,
            left,
            right: Box::new(right),
            pos: self.finish(m),
        })))
    }

    fn parse_yield_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        if ctx.contains(Context::IN_PARAMS) {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Yield expression is not allowed in formal parameters",
            ));
        }
        let m = self.mark();
        self.advance()?; // yield
        let delegate = !self.current.newline_before && self.eat_punct(Punct::Star)?;
        let argument = if delegate {
            Some(Box::new(self.parse_assignment_expression(ctx)?))
        } else if !self.current.newline_before && self.token_starts_expression() {
            Some(Box::new(self.parse_assignment_expression(ctx)?))
        } else {
            None
        };
        Ok(Expression::Yield(Box::new(YieldExpression {
            argument,
            delegate,
            pos: self.finish(m),
        })))
    }

    // Whether the current token can begin an expression; decides if a
    // `yield` or `return` takes an operand.
    pub(crate) fn token_starts_expression(&self) -> bool {
        match &self.current.kind {
            TokenKind::Ident { .. }
            | TokenKind::PrivateIdent(_)
            | TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::Str(_)
            | TokenKind::Template { .. }
            | TokenKind::Regex { .. } => true,
            TokenKind::Keyword(kw) => matches!(
                kw,
                Keyword::This
                    | Keyword::Super
                    | Keyword::New
                    | Keyword::Function
                    | Keyword::Class
                    | Keyword::Import
                    | Keyword::Typeof
                    | Keyword::Void
                    | Keyword::Delete
                    | Keyword::Null
                    | Keyword::True
                    | Keyword::False
            ),
            TokenKind::Punct(p) => matches!(
                p,
                Punct::LParen
                    | Punct::LBracket
                    | Punct::LBrace
                    | Punct::Plus
                    | Punct::Minus
                    | Punct::Not
                    | Punct::Tilde
                    | Punct::PlusPlus
                    | Punct::MinusMinus
                    | Punct::Slash
                    | Punct::SlashAssign
                    | Punct::Lt
            ),
            _ => false,
        }
    }

    fn parse_conditional(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        let test = self.parse_binary(ctx, 0)?;
        if !self.current.is_punct(Punct::Question) {
            return Ok(test);
        }
        self.advance()?;
        // `in` is unrestricted between `?` and `:`.
        let consequent = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
        self.expect_punct(Punct::Colon)?;
        let alternate = self.parse_assignment_expression(ctx)?;
        Ok(Expression::Conditional(Box::new(ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
            pos: self.finish(m),
        })))
    }

    fn binary_op_info(&self, ctx: Context) -> Option<(u8, BinOp)> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Instanceof) => {
                Some((7, BinOp::Binary(BinaryOp::Instanceof)))
            }
            TokenKind::Keyword(Keyword::In) if !ctx.contains(Context::NO_IN) => {
                Some((7, BinOp::Binary(BinaryOp::In)))
            }
            TokenKind::Punct(p) => {
                let info = match p {
                    Punct::Nullish => (1, BinOp::Logical(LogicalOp::Nullish)),
                    Punct::OrOr => (1, BinOp::Logical(LogicalOp::Or)),
                    Punct::AndAnd => (2, BinOp::Logical(LogicalOp::And)),
                    Punct::Pipe => (3, BinOp::Binary(BinaryOp::BitOr)),
                    Punct::Caret => (4, BinOp::Binary(BinaryOp::BitXor)),
                    Punct::Amp => (5, BinOp::Binary(BinaryOp::BitAnd)),
                    Punct::Eq => (6, BinOp::Binary(BinaryOp::Eq)),
                    Punct::NotEq => (6, BinOp::Binary(BinaryOp::NotEq)),
                    Punct::StrictEq => (6, BinOp::Binary(BinaryOp::StrictEq)),
                    Punct::StrictNotEq => (6, BinOp::Binary(BinaryOp::StrictNotEq)),
                    Punct::Lt => (7, BinOp::Binary(BinaryOp::Lt)),
                    Punct::Gt => (7, BinOp::Binary(BinaryOp::Gt)),
                    Punct::LtEq => (7, BinOp::Binary(BinaryOp::LtEq)),
                    Punct::GtEq => (7, BinOp::Binary(BinaryOp::GtEq)),
                    Punct::Shl => (8, BinOp::Binary(BinaryOp::Shl)),
                    Punct::Shr => (8, BinOp::Binary(BinaryOp::Shr)),
                    Punct::UShr => (8, BinOp::Binary(BinaryOp::UShr)),
                    Punct::Plus => (9, BinOp::Binary(BinaryOp::Add)),
                    Punct::Minus => (9, BinOp::Binary(BinaryOp::Sub)),
                    Punct::Star => (10, BinOp::Binary(BinaryOp::Mul)),
                    Punct::Slash => (10, BinOp::Binary(BinaryOp::Div)),
                    Punct::Percent => (10, BinOp::Binary(BinaryOp::Mod)),
                    Punct::StarStar => (11, BinOp::Binary(BinaryOp::Exp)),
                    _ => return None,
                };
                Some(info)
            }
            _ => None,
        }
    }

    // Precedence climbing. `??` refuses to mix with `&&`/`||` in one
    // unparenthesized run; `**` is right-associative.
    fn parse_binary(&mut self, ctx: Context, min_prec: u8) -> Result<Expression, ParseError> {
        let m = self.mark();
        let mut left = self.parse_binary_operand(ctx)?;
        let mut seen_logical: Option<LogicalOp> = None;
        loop {
            let Some((prec, op)) = self.binary_op_info(ctx) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            if let BinOp::Logical(lop) = op {
                let clash = match (seen_logical, lop) {
                    (Some(LogicalOp::Nullish), LogicalOp::And | LogicalOp::Or) => true,
                    (Some(LogicalOp::And | LogicalOp::Or), LogicalOp::Nullish) => true,
                    _ => false,
                };
                if clash {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Cannot mix `??` with `&&` or `||` without parentheses",
                    ));
                }
                seen_logical = Some(lop);
            }
            self.advance()?;
            let rhs_min = match op {
                // The right side of `??` may not pick up `&&`/`||`; a
                // clash surfaces in this loop instead.
                BinOp::Logical(LogicalOp::Nullish) => 3,
                // Right-associative.
                BinOp::Binary(BinaryOp::Exp) => 11,
                _ => prec + 1,
            };
            let right = self.parse_binary(ctx, rhs_min)?;
            left = match op {
                BinOp::Binary(operator) => Expression::Binary(Box::new(BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    pos: self.finish(m),
                })),
                BinOp::Logical(operator) => Expression::Logical(Box::new(LogicalExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                    pos: self.finish(m),
                })),
            };
        }
        Ok(left)
    }

    fn parse_binary_operand(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        if let TokenKind::PrivateIdent(name) = &self.current.kind {
            // `#field in obj` brand checks.
            let name = name.clone();
            if !ctx.contains(Context::IN_CLASS) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Private names are only valid inside class bodies",
                ));
            }
            let m = self.mark();
            self.advance()?;
            if ctx.contains(Context::NO_IN) || !self.current.is_keyword(Keyword::In) {
                return Err(self.error(ErrorKind::Syntax, "Unexpected private name"));
            }
            return Ok(Expression::PrivateIdentifier(PrivateIdentifier {
                name,
                pos: self.finish(m),
            }));
        }
        self.parse_unary(ctx)
    }

    fn parse_unary(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        self.with_depth(|p| p.parse_unary_inner(ctx))
    }

    fn parse_unary_inner(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();

        if ctx.await_is_keyword() && self.current.is_ident("await") {
            if ctx.contains(Context::IN_PARAMS) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Await expression is not allowed in formal parameters",
                ));
            }
            self.advance()?;
            let argument = self.parse_unary(ctx)?;
            let expr = Expression::Await(Box::new(AwaitExpression {
                argument: Box::new(argument),
                pos: self.finish(m),
            }));
            self.reject_exponent_after_unary()?;
            return Ok(expr);
        }

        let unary_op = match &self.current.kind {
            TokenKind::Punct(Punct::Plus) => Some(UnaryOp::Plus),
            TokenKind::Punct(Punct::Minus) => Some(UnaryOp::Minus),
            TokenKind::Punct(Punct::Not) => Some(UnaryOp::Not),
            TokenKind::Punct(Punct::Tilde) => Some(UnaryOp::BitNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOp::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOp::Void),
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOp::Delete),
            _ => None,
        };
        if let Some(operator) = unary_op {
            self.advance()?;
            let argument = self.parse_unary(ctx)?;
            if operator == UnaryOp::Delete {
                if ctx.contains(Context::STRICT)
                    && matches!(argument, Expression::Identifier(_))
                {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Delete of an unqualified identifier in strict mode.",
                    ));
                }
                if let Expression::Member(member) = &argument {
                    if matches!(&*member.property, Expression::PrivateIdentifier(_)) {
                        return Err(self.error(
                            ErrorKind::EarlyError,
                            "Private fields can not be deleted",
                        ));
                    }
                }
            }
            let expr = Expression::Unary(Box::new(UnaryExpression {
                operator,
                argument: Box::new(argument),
                prefix: true,
                pos: self.finish(m),
            }));
            self.reject_exponent_after_unary()?;
            return Ok(expr);
        }

        if let Some(operator) = update_op_of(&self.current.kind) {
            self.advance()?;
            let argument = self.parse_unary(ctx)?;
            self.validate_update_target(&argument, ctx, true)?;
            return Ok(Expression::Update(Box::new(UpdateExpression {
                operator,
                argument: Box::new(argument),
                prefix: true,
                pos: self.finish(m),
            })));
        }

        let expr = self.parse_lhs_expression(ctx, true)?;
        if !self.current.newline_before {
            if let Some(operator) = update_op_of(&self.current.kind) {
                self.validate_update_target(&expr, ctx, false)?;
                self.advance()?;
                return Ok(Expression::Update(Box::new(UpdateExpression {
                    operator,
                    argument: Box::new(expr),
                    prefix: false,
                    pos: self.finish(m),
                })));
            }
        }
        Ok(expr)
    }

    fn reject_exponent_after_unary(&self) -> Result<(), ParseError> {
        if self.current.is_punct(Punct::StarStar) {
            return Err(self.error(
                ErrorKind::Syntax,
                "Unary operand must be parenthesized on the left of `**`",
            ));
        }
        Ok(())
    }

    fn validate_update_target(
        &self,
        expr: &Expression,
        ctx: Context,
        prefix: bool,
    ) -> Result<(), ParseError> {
        let side = if prefix { "prefix" } else { "postfix" };
        match expr {
            Expression::Identifier(id) => {
                self.validate_binding_name(&id.name, ctx, PatternKind::Assignment)
            }
            Expression::Member(_) => {
                if has_optional_chain(expr) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        format!("Invalid left-hand side expression in {side} operation"),
                    ));
                }
                Ok(())
            }
            _ => Err(self.error(
                ErrorKind::Syntax,
                format!("Invalid left-hand side expression in {side} operation"),
            )),
        }
    }

    // -----------------------------------------------------------------
    // Left-hand side chains
    // -----------------------------------------------------------------

    pub(crate) fn parse_lhs_expression(
        &mut self,
        ctx: Context,
        allow_call: bool,
    ) -> Result<Expression, ParseError> {
        let m = self.mark();
        let base = if self.current.is_keyword(Keyword::New) {
            self.parse_new_expression(ctx)?
        } else if self.current.is_keyword(Keyword::Super) {
            self.parse_super(ctx)?
        } else if self.current.is_keyword(Keyword::Import) {
            self.parse_import_expression(ctx)?
        } else {
            self.parse_primary(ctx)?
        };
        self.parse_member_chain(ctx, base, m, allow_call)
    }

    fn parse_member_chain(
        &mut self,
        ctx: Context,
        mut expr: Expression,
        m: Marker,
        allow_call: bool,
    ) -> Result<Expression, ParseError> {
        let mut in_optional_chain = false;
        loop {
            if self.eat_punct(Punct::Dot)? {
                let property = self.parse_member_property(ctx)?;
                expr = Expression::Member(Box::new(MemberExpression {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: false,
                    optional: false,
                    pos: self.finish(m),
                }));
            } else if self.eat_punct(Punct::LBracket)? {
                let property = self.parse_expression(ctx & !Context::NO_IN)?;
                self.expect_punct(Punct::RBracket)?;
                expr = Expression::Member(Box::new(MemberExpression {
                    object: Box::new(expr),
                    property: Box::new(property),
                    computed: true,
                    optional: false,
                    pos: self.finish(m),
                }));
            } else if self.current.is_punct(Punct::QuestionDot) {
                in_optional_chain = true;
                self.advance()?;
                if self.current.is_punct(Punct::LParen) {
                    if !allow_call {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Invalid optional chain from new expression",
                        ));
                    }
                    let arguments = self.parse_arguments(ctx)?;
                    expr = Expression::Call(Box::new(CallExpression {
                        callee: Box::new(expr),
                        arguments,
                        optional: true,
                        pos: self.finish(m),
                    }));
                } else if self.eat_punct(Punct::LBracket)? {
                    let property = self.parse_expression(ctx & !Context::NO_IN)?;
                    self.expect_punct(Punct::RBracket)?;
                    expr = Expression::Member(Box::new(MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: true,
                        optional: true,
                        pos: self.finish(m),
                    }));
                } else {
                    let property = self.parse_member_property(ctx)?;
                    expr = Expression::Member(Box::new(MemberExpression {
                        object: Box::new(expr),
                        property: Box::new(property),
                        computed: false,
                        optional: true,
                        pos: self.finish(m),
                    }));
                }
            } else if allow_call && self.current.is_punct(Punct::LParen) {
                let arguments = self.parse_arguments(ctx)?;
                expr = Expression::Call(Box::new(CallExpression {
                    callee: Box::new(expr),
                    arguments,
                    optional: false,
                    pos: self.finish(m),
                }));
            } else if matches!(
                self.current.kind,
                TokenKind::Template { part: TemplatePart::Complete | TemplatePart::Head, .. }
            ) {
                if in_optional_chain {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Tagged template cannot be used in an optional chain",
                    ));
                }
                let quasi = self.parse_template_literal(ctx, true)?;
                expr = Expression::TaggedTemplate(Box::new(TaggedTemplateExpression {
                    tag: Box::new(expr),
                    quasi,
                    pos: self.finish(m),
                }));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    // `.name` after a member dot: any IdentifierName or private name.
    fn parse_member_property(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        if let TokenKind::PrivateIdent(name) = &self.current.kind {
            let name = name.clone();
            if !ctx.contains(Context::IN_CLASS) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Private names are only valid inside class bodies",
                ));
            }
            let m = self.mark();
            self.advance()?;
            return Ok(Expression::PrivateIdentifier(PrivateIdentifier {
                name,
                pos: self.finish(m),
            }));
        }
        Ok(Expression::Identifier(self.parse_identifier_name()?))
    }

    fn parse_new_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        self.with_depth(|p| p.parse_new_inner(ctx))
    }

    fn parse_new_inner(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        let new_token = self.advance()?; // new
        if self.eat_punct(Punct::Dot)? {
            if !self.current.is_ident("target") {
                return Err(self.unexpected());
            }
            if !ctx.contains(Context::IN_FUNCTION) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "new.target is only allowed inside functions",
                ));
            }
            let prop_token = self.current.clone();
            self.advance()?;
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: Identifier {
                    name: "new".to_string(),
                    pos: self.token_node_pos(&new_token),
                },
                property: Identifier {
                    name: "target".to_string(),
                    pos: self.token_node_pos(&prop_token),
                },
                pos: self.finish(m),
            }));
        }
        let callee_m = self.mark();
        let callee = if self.current.is_keyword(Keyword::New) {
            self.parse_new_expression(ctx)?
        } else {
            let base = if self.current.is_keyword(Keyword::Super) {
                self.parse_super(ctx)?
            } else {
                self.parse_primary(ctx)?
            };
            self.parse_member_chain(ctx, base, callee_m, false)?
        };
        if matches!(callee, Expression::Super(_)) {
            return Err(self.error(ErrorKind::Syntax, "Unexpected keyword `super`"));
        }
        if has_optional_chain(&callee) {
            return Err(self.error(
                ErrorKind::Syntax,
                "Invalid optional chain from new expression",
            ));
        }
        let arguments = if self.current.is_punct(Punct::LParen) {
            self.parse_arguments(ctx)?
        } else {
            Vec::new()
        };
        Ok(Expression::New(Box::new(NewExpression {
            callee: Box::new(callee),
            arguments,
            pos: self.finish(m),
        })))
    }

    fn parse_super(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        self.advance()?; // super
        let allowed = if self.current.is_punct(Punct::LParen) {
            ctx.contains(Context::SUPER_CALL)
        } else if self.current.is_punct(Punct::Dot) || self.current.is_punct(Punct::LBracket) {
            ctx.contains(Context::SUPER_PROPERTY)
        } else {
            false
        };
        if !allowed {
            return Err(self.error(ErrorKind::EarlyError, "`super` keyword unexpected here"));
        }
        Ok(Expression::Super(Super { pos: self.finish(m) }))
    }

    fn parse_import_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        let import_token = self.advance()?; // import
        if self.eat_punct(Punct::Dot)? {
            if !self.current.is_ident("meta") {
                return Err(self.unexpected());
            }
            if !self.options.next_enabled() {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "`import.meta` requires the `next` option",
                ));
            }
            if !ctx.contains(Context::MODULE) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Cannot use `import.meta` outside a module",
                ));
            }
            let prop_token = self.current.clone();
            self.advance()?;
            return Ok(Expression::MetaProperty(MetaProperty {
                meta: Identifier {
                    name: "import".to_string(),
                    pos: self.token_node_pos(&import_token),
                },
                property: Identifier {
                    name: "meta".to_string(),
                    pos: self.token_node_pos(&prop_token),
                },
                pos: self.finish(m),
            }));
        }
        if !self.current.is_punct(Punct::LParen) {
            return Err(self.unexpected());
        }
        if !self.options.next_enabled() {
            return Err(self.error(
                ErrorKind::Syntax,
                "Dynamic `import()` requires the `next` option",
            ));
        }
        self.advance()?;
        let source = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
        self.check_cover_init()?;
        self.expect_punct(Punct::RParen)?;
        Ok(Expression::Import(Box::new(ImportExpression {
            source: Box::new(source),
            pos: self.finish(m),
        })))
    }

    /// Call arguments, spread and trailing comma allowed.
    pub(crate) fn parse_arguments(&mut self, ctx: Context) -> Result<Vec<Argument>, ParseError> {
        self.expect_punct(Punct::LParen)?;
        let mut arguments = Vec::new();
        while !self.current.is_punct(Punct::RParen) {
            if self.current.is_punct(Punct::Ellipsis) {
                let sm = self.mark();
                self.advance()?;
                let argument = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                arguments.push(Argument::Spread(SpreadElement {
                    argument: Box::new(argument),
                    pos: self.finish(sm),
                }));
            } else {
                arguments
                    .push(Argument::Expression(self.parse_assignment_expression(ctx & !Context::NO_IN)?));
            }
            self.check_cover_init()?;
            if !self.current.is_punct(Punct::RParen) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.advance()?; // )
        Ok(arguments)
    }

    // -----------------------------------------------------------------
    // Primary expressions
    // -----------------------------------------------------------------

    fn parse_primary(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        match &self.current.kind {
            TokenKind::Number(_) => {
                if ctx.contains(Context::STRICT) && self.current.octal {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Octal literals are not allowed in strict mode.",
                    ));
                }
                let token = self.advance()?;
                let TokenKind::Number(value) = token.kind else {
                    return Err(self.unexpected());
                };
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::Number(value),
                    None,
                )))
            }
            TokenKind::BigInt(_) => {
                let token = self.advance()?;
                let TokenKind::BigInt(digits) = token.kind.clone() else {
                    return Err(self.unexpected());
                };
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::BigInt(digits),
                    None,
                )))
            }
            TokenKind::Str(_) => {
                if ctx.contains(Context::STRICT) && self.current.octal {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Octal literals are not allowed in strict mode.",
                    ));
                }
                let token = self.advance()?;
                let TokenKind::Str(value) = token.kind.clone() else {
                    return Err(self.unexpected());
                };
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::String(value),
                    None,
                )))
            }
            TokenKind::Keyword(Keyword::True) | TokenKind::Keyword(Keyword::False) => {
                let token = self.advance()?;
                let value = token.is_keyword(Keyword::True);
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::Boolean(value),
                    None,
                )))
            }
            TokenKind::Keyword(Keyword::Null) => {
                let token = self.advance()?;
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::Null,
                    None,
                )))
            }
            TokenKind::Punct(Punct::Slash) | TokenKind::Punct(Punct::SlashAssign) => {
                let token = self.lexer.rescan_as_regex(self.before_current)?;
                self.replace_current(token);
                let token = self.advance()?;
                let TokenKind::Regex { pattern, flags } = token.kind.clone() else {
                    return Err(self.unexpected());
                };
                Ok(Expression::Literal(self.literal_from_token(
                    &token,
                    m,
                    LiteralValue::Regex,
                    Some(RegexValue { pattern, flags }),
                )))
            }
            TokenKind::Template { .. } => {
                Ok(Expression::Template(self.parse_template_literal(ctx, false)?))
            }
            TokenKind::Keyword(Keyword::This) => {
                self.advance()?;
                Ok(Expression::This(ThisExpression { pos: self.finish(m) }))
            }
            TokenKind::Keyword(Keyword::Function) => self.parse_function_expression(ctx, m, false),
            TokenKind::Keyword(Keyword::Class) => self.parse_class_expression(ctx),
            TokenKind::Punct(Punct::LBracket) => self.parse_array_literal(ctx),
            TokenKind::Punct(Punct::LBrace) => self.parse_object_literal(ctx),
            TokenKind::Punct(Punct::LParen) => self.parse_paren_or_arrow(ctx),
            TokenKind::Punct(Punct::Lt) if self.options.jsx => self.parse_jsx_element_or_fragment(ctx),
            TokenKind::Ident { name, escaped } if name == "async" && !escaped => {
                self.parse_async_prefixed(ctx)
            }
            TokenKind::Ident { .. } => {
                Ok(Expression::Identifier(self.parse_identifier_reference(ctx)?))
            }
            TokenKind::PrivateIdent(_) => {
                Err(self.error(ErrorKind::Syntax, "Unexpected private name"))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn literal_from_token(
        &self,
        token: &Token,
        m: Marker,
        value: LiteralValue,
        regex: Option<RegexValue>,
    ) -> Literal {
        Literal {
            value,
            raw: self
                .options
                .raw
                .then(|| self.lexer.raw_slice(token.start, token.end).to_string()),
            regex,
            pos: self.finish(m),
        }
    }

    pub(crate) fn token_node_pos(&self, token: &Token) -> NodePos {
        let mut pos = NodePos::default();
        if self.options.ranges {
            pos.start = Some(token.start);
            pos.end = Some(token.end);
        }
        if self.options.loc {
            pos.loc = Some(SourceLocation {
                start: Position { line: token.line, column: token.column },
                end: Position { line: token.end_line, column: token.end_column },
                source: self.options.source.clone(),
            });
        }
        pos
    }

    /// `[ ... ]`, also the cover for array destructuring targets.
    pub(crate) fn parse_array_literal(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        self.expect_punct(Punct::LBracket)?;
        let mut elements = Vec::new();
        while !self.current.is_punct(Punct::RBracket) {
            if self.current.is_punct(Punct::Comma) {
                self.advance()?;
                elements.push(None);
                continue;
            }
            if self.current.is_punct(Punct::Ellipsis) {
                let sm = self.mark();
                self.advance()?;
                let argument = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                elements.push(Some(Argument::Spread(SpreadElement {
                    argument: Box::new(argument),
                    pos: self.finish(sm),
                })));
            } else {
                let element = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                elements.push(Some(Argument::Expression(element)));
            }
            if !self.current.is_punct(Punct::RBracket) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.advance()?; // ]
        Ok(Expression::Array(ArrayExpression { elements, pos: self.finish(m) }))
    }

    /// `{ ... }`, also the cover for object destructuring targets.
    pub(crate) fn parse_object_literal(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        self.expect_punct(Punct::LBrace)?;
        let mut properties = Vec::new();
        let mut seen_proto = false;
        while !self.current.is_punct(Punct::RBrace) {
            if self.current.is_punct(Punct::Ellipsis) {
                let sm = self.mark();
                self.advance()?;
                let argument = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                properties.push(PropertyOrSpread::Spread(SpreadElement {
                    argument: Box::new(argument),
                    pos: self.finish(sm),
                }));
            } else {
                properties.push(self.parse_object_property(ctx, &mut seen_proto)?);
            }
            if !self.current.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.advance()?; // }
        Ok(Expression::Object(ObjectExpression { properties, pos: self.finish(m) }))
    }

    fn parse_object_property(
        &mut self,
        ctx: Context,
        seen_proto: &mut bool,
    ) -> Result<PropertyOrSpread, ParseError> {
        let m = self.mark();
        let mut is_async = false;
        let mut is_generator = false;
        let mut kind = PropertyKind::Init;

        if self.current.is_ident("async") {
            let next = self.peek_next()?;
            if !next.newline_before && token_starts_property_key(&next) {
                is_async = true;
                self.advance()?;
                if self.eat_punct(Punct::Star)? {
                    is_generator = true;
                }
            }
        } else if self.current.is_punct(Punct::Star) {
            is_generator = true;
            self.advance()?;
        } else if self.current.is_ident("get") || self.current.is_ident("set") {
            let next = self.peek_next()?;
            if token_starts_property_key(&next) {
                kind = if self.current.is_ident("get") {
                    PropertyKind::Get
                } else {
                    PropertyKind::Set
                };
                self.advance()?;
            }
        }

        let (key, computed, key_name) = self.parse_property_key(ctx, false)?;

        if is_async || is_generator || kind != PropertyKind::Init
            || self.current.is_punct(Punct::LParen)
        {
            let method_kind = match kind {
                PropertyKind::Get => estree::MethodKind::Get,
                PropertyKind::Set => estree::MethodKind::Set,
                PropertyKind::Init => estree::MethodKind::Method,
            };
            let value = self.parse_method_function(ctx, is_async, is_generator, method_kind, false)?;
            return Ok(PropertyOrSpread::Property(Box::new(Property {
                key,
                value: Box::new(Expression::Function(value)),
                kind,
                method: kind == PropertyKind::Init,
                shorthand: false,
                computed,
                pos: self.finish(m),
            })));
        }

        if self.current.is_punct(Punct::Colon) {
            if !computed && key_name.as_deref() == Some("__proto__") {
                if *seen_proto && self.cover_init_error.is_none() {
                    self.cover_init_error = Some(self.error(
                        ErrorKind::EarlyError,
                        "Duplicate `__proto__` fields are not allowed in object literals",
                    ));
                }
                *seen_proto = true;
            }
            self.advance()?;
            let value = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
            return Ok(PropertyOrSpread::Property(Box::new(Property {
                key,
                value: Box::new(value),
                kind: PropertyKind::Init,
                method: false,
                shorthand: false,
                computed,
                pos: self.finish(m),
            })));
        }

        // Shorthand; the key doubles as the value reference.
        let id = match &key {
            PropertyKey::Expression(expr) => match expr.as_ref() {
                Expression::Identifier(id) => id.clone(),
                _ => return Err(self.unexpected()),
            },
            PropertyKey::Private(_) => return Err(self.unexpected()),
        };
        self.check_word_usable(&id.name, false, ctx)?;
        if self.current.is_punct(Punct::Assign) {
            // CoverInitializedName, legal only if this literal becomes
            // a pattern.
            if self.cover_init_error.is_none() {
                self.cover_init_error = Some(self.error(
                    ErrorKind::Syntax,
                    "Invalid shorthand property initializer",
                ));
            }
            self.advance()?;
            let right = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
            let value = Expression::Assignment(Box::new(AssignmentExpression {
                operator: AssignOp::Assign,
                left: AssignmentTarget::Expression(Box::new(Expression::Identifier(id.clone()))),
                right: Box::new(right),
                pos: self.finish(m),
            }));
            return Ok(PropertyOrSpread::Property(Box::new(Property {
                key,
                value: Box::new(value),
                kind: PropertyKind::Init,
                method: false,
                shorthand: true,
                computed: false,
                pos: self.finish(m),
            })));
        }
        Ok(PropertyOrSpread::Property(Box::new(Property {
            key,
            value: Box::new(Expression::Identifier(id)),
            kind: PropertyKind::Init,
            method: false,
            shorthand: true,
            computed: false,
            pos: self.finish(m),
        })))
    }

    /// PropertyName: literal, identifier-name, computed, or (classes
    /// only) private name. Returns the key, whether it was computed,
    /// and the plain text for keys that have one.
    pub(crate) fn parse_property_key(
        &mut self,
        ctx: Context,
        allow_private: bool,
    ) -> Result<(PropertyKey, bool, Option<String>), ParseError> {
        let m = self.mark();
        match &self.current.kind {
            TokenKind::Punct(Punct::LBracket) => {
                self.advance()?;
                let expr = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                self.check_cover_init()?;
                self.expect_punct(Punct::RBracket)?;
                Ok((PropertyKey::Expression(Box::new(expr)), true, None))
            }
            TokenKind::PrivateIdent(name) => {
                if !allow_private {
                    return Err(self.error(ErrorKind::Syntax, "Unexpected private name"));
                }
                let name = name.clone();
                self.advance()?;
                let text = format!("#{name}");
                Ok((
                    PropertyKey::Private(PrivateIdentifier { name, pos: self.finish(m) }),
                    false,
                    Some(text),
                ))
            }
            TokenKind::Str(_) => {
                if ctx.contains(Context::STRICT) && self.current.octal {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Octal literals are not allowed in strict mode.",
                    ));
                }
                let token = self.advance()?;
                let TokenKind::Str(value) = token.kind.clone() else {
                    return Err(self.unexpected());
                };
                let literal =
                    self.literal_from_token(&token, m, LiteralValue::String(value.clone()), None);
                Ok((
                    PropertyKey::Expression(Box::new(Expression::Literal(literal))),
                    false,
                    Some(value),
                ))
            }
            TokenKind::Number(_) => {
                if ctx.contains(Context::STRICT) && self.current.octal {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Octal literals are not allowed in strict mode.",
                    ));
                }
                let token = self.advance()?;
                let TokenKind::Number(value) = token.kind else {
                    return Err(self.unexpected());
                };
                let literal = self.literal_from_token(&token, m, LiteralValue::Number(value), None);
                Ok((
                    PropertyKey::Expression(Box::new(Expression::Literal(literal))),
                    false,
                    None,
                ))
            }
            TokenKind::BigInt(_) => {
                let token = self.advance()?;
                let TokenKind::BigInt(digits) = token.kind.clone() else {
                    return Err(self.unexpected());
                };
                let literal =
                    self.literal_from_token(&token, m, LiteralValue::BigInt(digits), None);
                Ok((
                    PropertyKey::Expression(Box::new(Expression::Literal(literal))),
                    false,
                    None,
                ))
            }
            _ => {
                let id = self.parse_identifier_name()?;
                let name = id.name.clone();
                Ok((
                    PropertyKey::Expression(Box::new(Expression::Identifier(id))),
                    false,
                    Some(name),
                ))
            }
        }
    }

    // -----------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------

    pub(crate) fn parse_template_literal(
        &mut self,
        ctx: Context,
        tagged: bool,
    ) -> Result<TemplateLiteral, ParseError> {
        let m = self.mark();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let em = self.mark();
            let token = self.advance()?;
            let TokenKind::Template { cooked, raw, part } = &token.kind else {
                return Err(self.error_at_token(&token, ErrorKind::Syntax, "Unexpected token"));
            };
            if cooked.is_none() && !tagged {
                return Err(self.error_at_token(
                    &token,
                    ErrorKind::Syntax,
                    "Invalid escape sequence in template literal",
                ));
            }
            let tail = matches!(part, TemplatePart::Complete | TemplatePart::Tail);
            quasis.push(TemplateElement {
                value: TemplateElementValue { cooked: cooked.clone(), raw: raw.clone() },
                tail,
                pos: self.finish(em),
            });
            if tail {
                break;
            }
            expressions.push(self.parse_expression(ctx & !Context::NO_IN)?);
            if !self.current.is_punct(Punct::RBrace) {
                return Err(self.unexpected());
            }
            let token = self.lexer.rescan_template_continuation(self.before_current)?;
            self.replace_current(token);
        }
        Ok(TemplateLiteral { quasis, expressions, pos: self.finish(m) })
    }

    // -----------------------------------------------------------------
    // Parenthesized cover and arrows
    // -----------------------------------------------------------------

    fn parse_paren_or_arrow(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        self.advance()?; // (
        if self.eat_punct(Punct::RParen)? {
            if !self.current.is_punct(Punct::Arrow) || self.current.newline_before {
                return Err(self.unexpected());
            }
            return self.parse_arrow_tail(ctx, m, Vec::new(), false);
        }
        let (items, trailing_comma) = self.parse_cover_items(ctx)?;
        if self.current.is_punct(Punct::Arrow) && !self.current.newline_before {
            let params = self.cover_items_to_params(items, trailing_comma, ctx.enter_arrow(false))?;
            return self.parse_arrow_tail(ctx, m, params, false);
        }
        if trailing_comma {
            return Err(self.unexpected());
        }
        let mut expressions = Vec::with_capacity(items.len());
        for item in items {
            match item {
                CoverItem::Expr(expr) => expressions.push(expr),
                CoverItem::Spread(_) => {
                    return Err(self.error(ErrorKind::Syntax, "Unexpected token `...`"));
                }
            }
        }
        self.check_cover_init()?;
        let expr = if expressions.len() == 1 {
            expressions.remove(0)
        } else {
            Expression::Sequence(SequenceExpression {
                expressions,
                pos: self.finish(m),
            })
        };
        self.paren_expr_start = Some(m.offset);
        Ok(expr)
    }

    fn parse_cover_items(
        &mut self,
        ctx: Context,
    ) -> Result<(Vec<CoverItem>, bool), ParseError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.current.is_punct(Punct::RParen) {
                break;
            }
            if self.current.is_punct(Punct::Ellipsis) {
                let sm = self.mark();
                self.advance()?;
                let argument = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                items.push(CoverItem::Spread(SpreadElement {
                    argument: Box::new(argument),
                    pos: self.finish(sm),
                }));
            } else {
                items.push(CoverItem::Expr(
                    self.parse_assignment_expression(ctx & !Context::NO_IN)?,
                ));
            }
            if self.current.is_punct(Punct::Comma) {
                self.advance()?;
                if self.current.is_punct(Punct::RParen) {
                    trailing_comma = true;
                    break;
                }
            } else {
                break;
            }
        }
        self.expect_punct(Punct::RParen)?;
        Ok((items, trailing_comma))
    }

    fn cover_items_to_params(
        &mut self,
        items: Vec<CoverItem>,
        trailing_comma: bool,
        inner_ctx: Context,
    ) -> Result<Vec<Pattern>, ParseError> {
        let len = items.len();
        let mut params = Vec::with_capacity(len);
        for (index, item) in items.into_iter().enumerate() {
            match item {
                CoverItem::Expr(expr) => {
                    params.push(self.expression_to_pattern(expr, PatternKind::Binding, inner_ctx)?);
                }
                CoverItem::Spread(spread) => {
                    if index + 1 != len || trailing_comma {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Rest element must be last element",
                        ));
                    }
                    let target =
                        self.expression_to_pattern(*spread.argument, PatternKind::Binding, inner_ctx)?;
                    if matches!(target, Pattern::Assignment(_)) {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Rest element may not have a default",
                        ));
                    }
                    params.push(Pattern::Rest(Box::new(estree::RestElement {
                        argument: Box::new(target),
                        pos: spread.pos,
                    })));
                }
            }
        }
        Ok(params)
    }

    /// Body of an arrow whose parameters are already rewritten.
    fn parse_arrow_tail(
        &mut self,
        ctx: Context,
        m: Marker,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> Result<Expression, ParseError> {
        self.expect_punct(Punct::Arrow)?;
        let inner = ctx.enter_arrow(is_async);

        // Arrow parameters never tolerate duplicates.
        let mut names = Vec::new();
        for param in &params {
            collect_bound_names(param, &mut names);
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.clone()) {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Duplicate parameter name not allowed in this context",
                ));
            }
        }
        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier(_)));

        let saved_labels = self.take_labels();
        self.enter_scope(true);
        for name in &names {
            self.declare_param(name);
        }
        let body = if self.current.is_punct(Punct::LBrace) {
            let bm = self.mark();
            self.advance()?;
            let mut body_ctx = inner;
            let (mut stmts, became_strict) = self.parse_directive_prologue(&mut body_ctx, simple)?;
            if became_strict {
                for name in &names {
                    self.validate_binding_name(name, body_ctx, PatternKind::Binding)?;
                }
            }
            let stmt_ctx = body_ctx.enter_block();
            while !self.current.is_punct(Punct::RBrace) {
                stmts.push(self.parse_statement_list_item(stmt_ctx)?);
            }
            self.expect_punct(Punct::RBrace)?;
            ArrowBody::Block(BlockStatement { body: stmts, pos: self.finish(bm) })
        } else {
            let concise_ctx = inner | (ctx & Context::NO_IN);
            ArrowBody::Expression(Box::new(self.parse_assignment_expression(concise_ctx)?))
        };
        self.exit_scope();
        self.restore_labels(saved_labels);
        Ok(Expression::Arrow(Box::new(ArrowFunctionExpression {
            params,
            body,
            is_async,
            pos: self.finish(m),
        })))
    }

    // `async` at primary position: async function expression, async
    // arrow, or a plain identifier named `async`.
    fn parse_async_prefixed(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        let next = self.peek_next()?;
        if !next.newline_before {
            if next.is_keyword(Keyword::Function) {
                self.advance()?; // async
                return self.parse_function_expression(ctx, m, true);
            }
            if matches!(next.kind, TokenKind::Ident { .. }) {
                let (_, after) = self.peek_two()?;
                if after.is_punct(Punct::Arrow) && !after.newline_before {
                    self.advance()?; // async
                    let id =
                        self.parse_binding_identifier(ctx.enter_arrow(true), PatternKind::Binding)?;
                    return self.parse_arrow_tail(ctx, m, vec![Pattern::Identifier(id)], true);
                }
            }
            if next.is_punct(Punct::LParen) {
                let async_token = self.advance()?; // async
                return self.parse_async_paren(ctx, m, &async_token);
            }
        }
        Ok(Expression::Identifier(self.parse_identifier_reference(ctx)?))
    }

    // `async (...)`: either async arrow parameters or a call of a
    // function named `async`. Decided by the token after `)`.
    fn parse_async_paren(
        &mut self,
        ctx: Context,
        m: Marker,
        async_token: &Token,
    ) -> Result<Expression, ParseError> {
        self.advance()?; // (
        let (items, trailing_comma) = self.parse_cover_items(ctx)?;
        if self.current.is_punct(Punct::Arrow) && !self.current.newline_before {
            let params = self.cover_items_to_params(items, trailing_comma, ctx.enter_arrow(true))?;
            return self.parse_arrow_tail(ctx, m, params, true);
        }
        // A plain call; trailing commas are fine in argument lists.
        let mut arguments = Vec::with_capacity(items.len());
        for item in items {
            match item {
                CoverItem::Expr(expr) => arguments.push(Argument::Expression(expr)),
                CoverItem::Spread(spread) => arguments.push(Argument::Spread(spread)),
            }
        }
        self.check_cover_init()?;
        let callee = Expression::Identifier(Identifier {
            name: "async".to_string(),
            pos: self.token_node_pos(async_token),
        });
        Ok(Expression::Call(Box::new(CallExpression {
            callee: Box::new(callee),
            arguments,
            optional: false,
            pos: self.finish(m),
        })))
    }
}

fn assign_op_of(kind: &TokenKind) -> Option<AssignOp> {
    let TokenKind::Punct(p) = kind else { return None };
    Some(match p {
        Punct::Assign => AssignOp::Assign,
        Punct::PlusAssign => AssignOp::Add,
        Punct::MinusAssign => AssignOp::Sub,
        Punct::StarAssign => AssignOp::Mul,
        Punct::SlashAssign => AssignOp::Div,
        Punct::PercentAssign => AssignOp::Mod,
        Punct::StarStarAssign => AssignOp::Exp,
        Punct::ShlAssign => AssignOp::Shl,
        Punct::ShrAssign => AssignOp::Shr,
        Punct::UShrAssign => AssignOp::UShr,
        Punct::AmpAssign => AssignOp::BitAnd,
        Punct::PipeAssign => AssignOp::BitOr,
        Punct::CaretAssign => AssignOp::BitXor,
        Punct::AndAndAssign => AssignOp::LogicalAnd,
        Punct::OrOrAssign => AssignOp::LogicalOr,
        Punct::NullishAssign => AssignOp::Nullish,
        _ => return None,
    })
}

fn update_op_of(kind: &TokenKind) -> Option<UpdateOp> {
    match kind {
        TokenKind::Punct(Punct::PlusPlus) => Some(UpdateOp::Increment),
        TokenKind::Punct(Punct::MinusMinus) => Some(UpdateOp::Decrement),
        _ => None,
    }
}

fn token_starts_property_key(token: &Token) -> bool {
    match &token.kind {
        TokenKind::Ident { .. }
        | TokenKind::Keyword(_)
        | TokenKind::Str(_)
        | TokenKind::Number(_)
        | TokenKind::BigInt(_) => true,
        TokenKind::Punct(Punct::LBracket) => true,
        TokenKind::Punct(Punct::Star) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Options};
    use estree::{BinaryOp, Expression, LogicalOp, Statement};

    fn expr(source: &str) -> Expression {
        let program = parse_script(source, &Options::default()).expect("parses");
        match program.body.into_iter().next() {
            Some(Statement::Expression(stmt)) => *stmt.expression,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        match expr("a + b * c") {
            Expression::Binary(add) => {
                assert_eq!(add.operator, BinaryOp::Add);
                match *add.right {
                    Expression::Binary(mul) => assert_eq!(mul.operator, BinaryOp::Mul),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn exponentiation_is_right_associative() {
        match expr("2 ** 3 ** 2") {
            Expression::Binary(outer) => {
                assert_eq!(outer.operator, BinaryOp::Exp);
                match *outer.right {
                    Expression::Binary(inner) => assert_eq!(inner.operator, BinaryOp::Exp),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unary_left_of_exponent_is_rejected() {
        assert!(parse_script("-2 ** 2", &Options::default()).is_err());
        assert!(parse_script("typeof a ** 2", &Options::default()).is_err());
        // Parenthesized forms are fine.
        assert!(parse_script("(-2) ** 2", &Options::default()).is_ok());
        assert!(parse_script("2 ** -3", &Options::default()).is_ok());
    }

    #[test]
    fn nullish_must_not_mix_with_logical() {
        assert!(parse_script("a ?? b || c", &Options::default()).is_err());
        assert!(parse_script("a && b ?? c", &Options::default()).is_err());
        assert!(parse_script("a ?? b && c", &Options::default()).is_err());
        match expr("(a && b) ?? c") {
            Expression::Logical(log) => assert_eq!(log.operator, LogicalOp::Nullish),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn conditional_over_logical() {
        match expr("a || b ? c : d") {
            Expression::Conditional(cond) => {
                assert!(matches!(*cond.test, Expression::Logical(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sequence_and_assignment_shapes() {
        match expr("a = 1, b = 2") {
            Expression::Sequence(seq) => assert_eq!(seq.expressions.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn destructuring_assignment_becomes_pattern() {
        match expr("[a, b] = c") {
            Expression::Assignment(assign) => {
                assert!(matches!(assign.left, estree::AssignmentTarget::Pattern(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
        match expr("({x = 1} = y)") {
            Expression::Assignment(assign) => {
                assert!(matches!(assign.left, estree::AssignmentTarget::Pattern(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn call_on_literal_is_not_assignable() {
        assert!(parse_script("[a()] = c", &Options::default()).is_err());
        assert!(parse_script("a() = 1", &Options::default()).is_err());
        assert!(parse_script("1 = 2", &Options::default()).is_err());
    }

    #[test]
    fn parenthesized_pattern_is_not_assignable() {
        assert!(parse_script("({a}) = b", &Options::default()).is_err());
        assert!(parse_script("([a]) = b", &Options::default()).is_err());
        // The identifier form stays legal.
        assert!(parse_script("(a) = b", &Options::default()).is_ok());
    }

    #[test]
    fn shorthand_initializer_only_in_patterns() {
        assert!(parse_script("({a = 1});", &Options::default()).is_err());
        assert!(parse_script("x = {a = 1};", &Options::default()).is_err());
        assert!(parse_script("({a = 1} = x);", &Options::default()).is_ok());
        assert!(parse_script("[{a = 1}] = x;", &Options::default()).is_ok());
    }

    #[test]
    fn duplicate_proto_is_rejected_in_literals_only() {
        assert!(parse_script("({__proto__: a, __proto__: b});", &Options::default()).is_err());
        assert!(parse_script("({__proto__: a, __proto__: b} = c);", &Options::default()).is_ok());
        // Shorthand and computed forms do not count.
        assert!(parse_script("({__proto__, __proto__: b});", &Options::default()).is_ok());
        assert!(parse_script("({[\"__proto__\"]: a, __proto__: b});", &Options::default()).is_ok());
    }

    #[test]
    fn arrow_forms() {
        assert!(matches!(expr("x => x"), Expression::Arrow(_)));
        assert!(matches!(expr("() => 1"), Expression::Arrow(_)));
        assert!(matches!(expr("(a, b = 1, ...rest) => a"), Expression::Arrow(_)));
        match expr("async (a) => a") {
            Expression::Arrow(arrow) => assert!(arrow.is_async),
            other => panic!("unexpected {other:?}"),
        }
        match expr("async x => x") {
            Expression::Arrow(arrow) => assert!(arrow.is_async),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn arrow_requires_same_line() {
        assert!(parse_script("x\n=> x", &Options::default()).is_err());
    }

    #[test]
    fn async_call_when_no_arrow_follows() {
        match expr("async(a, b)") {
            Expression::Call(call) => {
                assert_eq!(call.callee.identifier_name(), Some("async"));
                assert_eq!(call.arguments.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn arrow_rejects_duplicate_params() {
        assert!(parse_script("(a, a) => a", &Options::default()).is_err());
    }

    #[test]
    fn arrow_rejects_trailing_comma_after_rest() {
        assert!(parse_script("(...a,) => a;", &Options::default()).is_err());
        assert!(parse_script("(a, ...b,) => a;", &Options::default()).is_err());
        assert!(parse_script("async (...a,) => a;", &Options::default()).is_err());
        // A trailing comma after an ordinary parameter stays legal.
        assert!(parse_script("(a, b,) => a;", &Options::default()).is_ok());
        assert!(parse_script("f(...a,);", &Options::default()).is_ok());
    }

    #[test]
    fn member_params_are_not_bindings() {
        assert!(parse_script("(a.b) => a", &Options::default()).is_err());
    }

    #[test]
    fn optional_chain_shapes() {
        match expr("a?.b.c") {
            Expression::Member(outer) => {
                assert!(!outer.optional);
                match *outer.object {
                    Expression::Member(inner) => assert!(inner.optional),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(expr("a?.(1)"), Expression::Call(_)));
        assert!(parse_script("a?.b = 1", &Options::default()).is_err());
        assert!(parse_script("new a?.b()", &Options::default()).is_err());
        assert!(parse_script("a?.b`x`", &Options::default()).is_err());
    }

    #[test]
    fn new_member_chain() {
        match expr("new a.b(1).c") {
            Expression::Member(member) => {
                assert!(matches!(*member.object, Expression::New(_)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn regex_primary_after_operator_position() {
        match expr("a = /ab/g") {
            Expression::Assignment(assign) => match *assign.right {
                Expression::Literal(lit) => {
                    let regex = lit.regex.expect("regex value");
                    assert_eq!(regex.pattern, "ab");
                    assert_eq!(regex.flags, "g");
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
        // Division of identifiers still parses as division.
        assert!(matches!(expr("a / b"), Expression::Binary(_)));
    }

    #[test]
    fn template_with_substitutions() {
        match expr("`a${x}b${y}c`") {
            Expression::Template(template) => {
                assert_eq!(template.quasis.len(), 3);
                assert_eq!(template.expressions.len(), 2);
                assert!(template.quasis[2].tail);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn untagged_template_rejects_invalid_escape() {
        assert!(parse_script("`\\x`", &Options::default()).is_err());
        // Tagged templates keep the raw text and a None cooked value.
        let program = parse_script("tag`\\x`", &Options::default()).unwrap();
        match program.body.into_iter().next() {
            Some(Statement::Expression(stmt)) => match *stmt.expression {
                Expression::TaggedTemplate(tagged) => {
                    assert!(tagged.quasi.quasis[0].value.cooked.is_none());
                }
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn yield_in_generator_only() {
        assert!(parse_script("function* g() { yield 1; }", &Options::default()).is_ok());
        assert!(parse_script("function* g() { yield; }", &Options::default()).is_ok());
        // Outside a generator in sloppy code it is an identifier.
        assert!(parse_script("var yield = 1;", &Options::default()).is_ok());
        assert!(parse_script("'use strict'; var yield = 1;", &Options::default()).is_err());
    }

    #[test]
    fn await_requires_async_context() {
        assert!(parse_script("async function f() { await x; }", &Options::default()).is_ok());
        // Sloppy scripts treat await as an identifier.
        assert!(parse_script("var await = 1;", &Options::default()).is_ok());
    }

    #[test]
    fn new_target_only_inside_functions() {
        assert!(parse_script("function f() { new.target; }", &Options::default()).is_ok());
        assert!(parse_script("new.target;", &Options::default()).is_err());
    }

    #[test]
    fn dynamic_import_gated_by_next() {
        assert!(parse_script("import('m')", &Options::default()).is_err());
        let next = Options { next: true, ..Options::default() };
        assert!(parse_script("import('m')", &next).is_ok());
    }

    #[test]
    fn strict_mode_assignment_restrictions() {
        assert!(parse_script("'use strict'; eval = 1;", &Options::default()).is_err());
        assert!(parse_script("'use strict'; arguments++;", &Options::default()).is_err());
        assert!(parse_script("eval = 1;", &Options::default()).is_ok());
        assert!(parse_script("'use strict'; delete x;", &Options::default()).is_err());
    }
}
