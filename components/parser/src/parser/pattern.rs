//! Expression-to-pattern rewrite.
//!
//! Destructuring targets and arrow parameters are first parsed as
//! ordinary expressions under the cover grammar, then rewritten into
//! patterns here once `=`, `=>`, or a for-head proves they are
//! targets. The rewrite either produces a [`Pattern`] or fails with a
//! syntax error naming the offending construct; it never mutates
//! shared parser state except to discharge the deferred cover error.

use estree::{
    Argument, ArrayExpression, ArrayPattern, AssignOp, AssignmentPattern, AssignmentTarget,
    ErrorKind, Expression, Identifier, ObjectExpression, ObjectPattern, ObjectPatternProperty,
    ParseError, Pattern, PatternProperty, PropertyKind, PropertyOrSpread, RestElement,
    SpreadElement,
};

use super::Parser;
use crate::context::Context;
use crate::lexer::{Punct, TokenKind};

/// What kind of position a pattern is being rewritten for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PatternKind {
    /// Assignment left-hand side or for-head target; member
    /// expressions are legal leaves.
    Assignment,
    /// `var` declarator, parameter, or catch binding.
    Binding,
    /// `let`/`const` declarator; additionally bans the name `let`.
    Lexical,
}

impl PatternKind {
    pub(crate) fn is_binding(self) -> bool {
        !matches!(self, PatternKind::Assignment)
    }
}

/// Whether any link of a member/call chain uses `?.`. Optional chains
/// are never valid assignment targets.
pub(crate) fn has_optional_chain(expr: &Expression) -> bool {
    match expr {
        Expression::Member(m) => m.optional || has_optional_chain(&m.object),
        Expression::Call(c) => c.optional || has_optional_chain(&c.callee),
        _ => false,
    }
}

/// Bound names of a pattern, in source order.
pub(crate) fn collect_bound_names(pattern: &Pattern, out: &mut Vec<String>) {
    match pattern {
        Pattern::Identifier(id) => out.push(id.name.clone()),
        Pattern::Object(obj) => {
            for prop in &obj.properties {
                match prop {
                    ObjectPatternProperty::Property(p) => collect_bound_names(&p.value, out),
                    ObjectPatternProperty::Rest(r) => collect_bound_names(&r.argument, out),
                }
            }
        }
        Pattern::Array(arr) => {
            for element in arr.elements.iter().flatten() {
                collect_bound_names(element, out);
            }
        }
        Pattern::Assignment(a) => collect_bound_names(&a.left, out),
        Pattern::Rest(r) => collect_bound_names(&r.argument, out),
        Pattern::Member(_) => {}
    }
}

impl<'a> Parser<'a> {
    /// Rewrite `expr` into a pattern for the given position, or fail.
    pub(crate) fn expression_to_pattern(
        &mut self,
        expr: Expression,
        kind: PatternKind,
        ctx: Context,
    ) -> Result<Pattern, ParseError> {
        match expr {
            Expression::Identifier(id) => {
                self.validate_binding_name(&id.name, ctx, kind)?;
                Ok(Pattern::Identifier(id))
            }
            Expression::Member(member) => {
                if kind.is_binding() {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Invalid destructuring assignment target",
                    ));
                }
                if member.optional || has_optional_chain(&member.object) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Invalid left-hand side in assignment",
                    ));
                }
                Ok(Pattern::Member(member))
            }
            Expression::Array(array) => self.array_to_pattern(array, kind, ctx),
            Expression::Object(object) => self.object_to_pattern(object, kind, ctx),
            Expression::Assignment(assign) => {
                if assign.operator != AssignOp::Assign {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Invalid destructuring assignment target",
                    ));
                }
                let left = match assign.left {
                    AssignmentTarget::Pattern(pattern) => {
                        if kind.is_binding() {
                            self.validate_pattern_for_binding(&pattern, ctx, kind)?;
                        }
                        pattern
                    }
                    AssignmentTarget::Expression(expr) => {
                        self.expression_to_pattern(*expr, kind, ctx)?
                    }
                };
                Ok(Pattern::Assignment(Box::new(AssignmentPattern {
                    left: Box::new(left),
                    right: assign.right,
                    pos: assign.pos,
                })))
            }
            _ => Err(self.error(ErrorKind::Syntax, "Invalid destructuring assignment target")),
        }
    }

    fn array_to_pattern(
        &mut self,
        array: ArrayExpression,
        kind: PatternKind,
        ctx: Context,
    ) -> Result<Pattern, ParseError> {
        let len = array.elements.len();
        let mut elements = Vec::with_capacity(len);
        for (index, element) in array.elements.into_iter().enumerate() {
            match element {
                None => elements.push(None),
                Some(Argument::Expression(expr)) => {
                    elements.push(Some(self.expression_to_pattern(expr, kind, ctx)?));
                }
                Some(Argument::Spread(spread)) => {
                    if index + 1 != len {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Rest element must be last element",
                        ));
                    }
                    let rest = self.spread_to_rest(spread, kind, ctx, false)?;
                    elements.push(Some(Pattern::Rest(Box::new(rest))));
                }
            }
        }
        Ok(Pattern::Array(ArrayPattern { elements, pos: array.pos }))
    }

    fn object_to_pattern(
        &mut self,
        object: ObjectExpression,
        kind: PatternKind,
        ctx: Context,
    ) -> Result<Pattern, ParseError> {
        // Shorthand defaults and repeated `__proto__` keys are legal
        // once the literal turns out to be a pattern.
        self.cover_init_error = None;
        let len = object.properties.len();
        let mut properties = Vec::with_capacity(len);
        for (index, property) in object.properties.into_iter().enumerate() {
            match property {
                PropertyOrSpread::Property(p) => {
                    if p.method || p.kind != PropertyKind::Init {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Invalid destructuring assignment target",
                        ));
                    }
                    let value = self.expression_to_pattern(*p.value, kind, ctx)?;
                    properties.push(ObjectPatternProperty::Property(Box::new(PatternProperty {
                        key: p.key,
                        value,
                        shorthand: p.shorthand,
                        computed: p.computed,
                        pos: p.pos,
                    })));
                }
                PropertyOrSpread::Spread(spread) => {
                    if index + 1 != len {
                        return Err(self.error(
                            ErrorKind::Syntax,
                            "Rest element must be last element",
                        ));
                    }
                    let rest = self.spread_to_rest(spread, kind, ctx, true)?;
                    properties.push(ObjectPatternProperty::Rest(rest));
                }
            }
        }
        Ok(Pattern::Object(ObjectPattern { properties, pos: object.pos }))
    }

    fn spread_to_rest(
        &mut self,
        spread: SpreadElement,
        kind: PatternKind,
        ctx: Context,
        object_position: bool,
    ) -> Result<RestElement, ParseError> {
        let target = self.expression_to_pattern(*spread.argument, kind, ctx)?;
        if matches!(target, Pattern::Assignment(_)) {
            return Err(self.error(ErrorKind::Syntax, "Rest element may not have a default"));
        }
        // Object rest targets cannot destructure further.
        if object_position && !matches!(target, Pattern::Identifier(_) | Pattern::Member(_)) {
            return Err(self.error(
                ErrorKind::Syntax,
                "`...` must be followed by an assignable reference",
            ));
        }
        Ok(RestElement { argument: Box::new(target), pos: spread.pos })
    }

    /// Re-validate a pattern produced under assignment rules for use
    /// in a binding position.
    pub(crate) fn validate_pattern_for_binding(
        &self,
        pattern: &Pattern,
        ctx: Context,
        kind: PatternKind,
    ) -> Result<(), ParseError> {
        match pattern {
            Pattern::Identifier(id) => self.validate_binding_name(&id.name, ctx, kind),
            Pattern::Member(_) => Err(self.error(
                ErrorKind::Syntax,
                "Invalid destructuring assignment target",
            )),
            Pattern::Object(obj) => {
                for prop in &obj.properties {
                    match prop {
                        ObjectPatternProperty::Property(p) => {
                            self.validate_pattern_for_binding(&p.value, ctx, kind)?;
                        }
                        ObjectPatternProperty::Rest(r) => {
                            self.validate_pattern_for_binding(&r.argument, ctx, kind)?;
                        }
                    }
                }
                Ok(())
            }
            Pattern::Array(arr) => {
                for element in arr.elements.iter().flatten() {
                    self.validate_pattern_for_binding(element, ctx, kind)?;
                }
                Ok(())
            }
            Pattern::Assignment(a) => self.validate_pattern_for_binding(&a.left, ctx, kind),
            Pattern::Rest(r) => self.validate_pattern_for_binding(&r.argument, ctx, kind),
        }
    }

    /// Parse a binding position directly: an identifier, or an
    /// array/object literal rewritten on the spot.
    pub(crate) fn parse_binding_target(
        &mut self,
        ctx: Context,
        kind: PatternKind,
    ) -> Result<Pattern, ParseError> {
        match &self.current.kind {
            TokenKind::Punct(Punct::LBracket) => {
                let expr = self.parse_array_literal(ctx)?;
                self.expression_to_pattern(expr, kind, ctx)
            }
            TokenKind::Punct(Punct::LBrace) => {
                let expr = self.parse_object_literal(ctx)?;
                self.expression_to_pattern(expr, kind, ctx)
            }
            _ => {
                let id = self.parse_binding_identifier(ctx, kind)?;
                Ok(Pattern::Identifier(id))
            }
        }
    }

    /// A single identifier in binding position.
    pub(crate) fn parse_binding_identifier(
        &mut self,
        ctx: Context,
        kind: PatternKind,
    ) -> Result<Identifier, ParseError> {
        let m = self.mark();
        let (name, escaped) = match &self.current.kind {
            TokenKind::Ident { name, escaped } => (name.clone(), *escaped),
            _ => return Err(self.unexpected()),
        };
        self.check_word_usable(&name, escaped, ctx)?;
        self.validate_binding_name(&name, ctx, kind)?;
        self.advance()?;
        Ok(Identifier { name, pos: self.finish(m) })
    }
}
