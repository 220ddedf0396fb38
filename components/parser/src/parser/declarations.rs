//! Declarations: variables, functions, classes, and module
//! import/export forms.
//!
//! Function and method parsing share one core that handles parameter
//! lists, the directive prologue with its retroactive strictness
//! effects, and the scope/label boundary.

use std::collections::HashSet;

use estree::{
    AssignmentPattern, BlockStatement, ClassBody, ClassDeclaration, ClassElement, ClassExpression,
    ErrorKind, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultPayload,
    ExportNamedDeclaration, ExportSpecifier, Expression, FunctionDeclaration, FunctionExpression,
    Identifier, ImportDeclaration, ImportDefaultSpecifier, ImportNamedSpecifier,
    ImportNamespaceSpecifier, ImportSpecifier, Literal, LiteralValue, MethodDefinition, MethodKind,
    ModuleExportName, ParseError, Pattern, PropertyDefinition, RestElement, Statement,
    StaticBlock, VariableDeclaration, VariableDeclarator, VariableKind,
};

use super::pattern::collect_bound_names;
use super::{Marker, Parser, PatternKind};
use crate::context::Context;
use crate::lexer::{is_keyword_text, Keyword, Punct, Token, TokenKind};

impl<'a> Parser<'a> {
    // -----------------------------------------------------------------
    // Variable declarations
    // -----------------------------------------------------------------

    /// `var`/`let`/`const` statement with its terminator.
    pub(crate) fn parse_variable_statement(
        &mut self,
        ctx: Context,
        kind: VariableKind,
    ) -> Result<Statement, ParseError> {
        let m = self.mark();
        let mut declaration = self.parse_variable_declaration(ctx, kind, false)?;
        self.consume_semicolon()?;
        declaration.pos = self.finish(m);
        Ok(Statement::VariableDeclaration(declaration))
    }

    /// The declarator list of a `var`/`let`/`const`, without the
    /// terminator. In a `for` head the first declarator may be followed
    /// by `in`/`of`, in which case parsing stops there and the caller
    /// validates the head form.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        ctx: Context,
        kind: VariableKind,
        in_for_head: bool,
    ) -> Result<VariableDeclaration, ParseError> {
        let m = self.mark();
        self.advance()?; // var / let / const
        let pattern_kind = if kind == VariableKind::Var {
            PatternKind::Binding
        } else {
            PatternKind::Lexical
        };
        let mut declarations = Vec::new();
        loop {
            let dm = self.mark();
            let id = self.parse_binding_target(ctx, pattern_kind)?;
            if in_for_head
                && declarations.is_empty()
                && (self.current.is_keyword(Keyword::In) || self.current.is_ident("of"))
            {
                self.declare_declaration_names(&id, kind)?;
                declarations.push(VariableDeclarator { id, init: None, pos: self.finish(dm) });
                return Ok(VariableDeclaration { kind, declarations, pos: self.finish(m) });
            }
            let init_ctx = if in_for_head {
                ctx | Context::NO_IN
            } else {
                ctx & !Context::NO_IN
            };
            let init = if self.eat_punct(Punct::Assign)? {
                Some(self.parse_assignment_expression(init_ctx)?)
            } else {
                None
            };
            if init.is_none() && !in_for_head {
                if kind == VariableKind::Const {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Missing initializer in const declaration",
                    ));
                }
                if !matches!(id, Pattern::Identifier(_)) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Missing initializer in destructuring declaration",
                    ));
                }
            }
            self.declare_declaration_names(&id, kind)?;
            declarations.push(VariableDeclarator { id, init, pos: self.finish(dm) });
            if !self.eat_punct(Punct::Comma)? {
                break;
            }
        }
        Ok(VariableDeclaration { kind, declarations, pos: self.finish(m) })
    }

    fn declare_declaration_names(
        &mut self,
        id: &Pattern,
        kind: VariableKind,
    ) -> Result<(), ParseError> {
        let mut names = Vec::new();
        collect_bound_names(id, &mut names);
        for name in &names {
            if kind.is_lexical() {
                self.declare_lexical(name)?;
            } else {
                self.declare_var(name)?;
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Functions
    // -----------------------------------------------------------------

    /// `function` / `async function` declaration statement.
    pub(crate) fn parse_function_declaration(
        &mut self,
        ctx: Context,
        is_async: bool,
    ) -> Result<Statement, ParseError> {
        let declaration = self.parse_function_declaration_inner(ctx, is_async, true)?;
        Ok(Statement::FunctionDeclaration(declaration))
    }

    fn parse_function_declaration_inner(
        &mut self,
        ctx: Context,
        is_async: bool,
        require_name: bool,
    ) -> Result<FunctionDeclaration, ParseError> {
        let m = self.mark();
        if is_async {
            self.advance()?; // async
        }
        self.expect_keyword(Keyword::Function)?;
        let is_generator = self.eat_punct(Punct::Star)?;
        // The declared name binds in the enclosing context, so it is
        // validated there, not inside the function.
        let id = if matches!(self.current.kind, TokenKind::Ident { .. }) {
            Some(self.parse_binding_identifier(ctx, PatternKind::Binding)?)
        } else if require_name {
            return Err(self.unexpected());
        } else {
            None
        };
        if let Some(id) = &id {
            if self.in_function_scope() {
                self.declare_var(&id.name)?;
            } else {
                self.declare_lexical(&id.name)?;
            }
        }
        let inner = ctx.enter_function(is_async, is_generator);
        let (params, body) = self.parse_function_core(inner, true, None, id.as_ref())?;
        Ok(FunctionDeclaration {
            id,
            params,
            body,
            is_async,
            is_generator,
            pos: self.finish(m),
        })
    }

    /// `function` expression; `m` marks the start (`async` when the
    /// expression is async).
    pub(crate) fn parse_function_expression(
        &mut self,
        ctx: Context,
        m: Marker,
        is_async: bool,
    ) -> Result<Expression, ParseError> {
        self.expect_keyword(Keyword::Function)?;
        let is_generator = self.eat_punct(Punct::Star)?;
        let inner = ctx.enter_function(is_async, is_generator);
        // An expression's name binds only inside the function, so the
        // inner context governs it.
        let id = if matches!(self.current.kind, TokenKind::Ident { .. }) {
            Some(self.parse_binding_identifier(inner, PatternKind::Binding)?)
        } else {
            None
        };
        let (params, body) = self.parse_function_core(inner, true, None, id.as_ref())?;
        Ok(Expression::Function(FunctionExpression {
            id,
            params,
            body,
            is_async,
            is_generator,
            pos: self.finish(m),
        }))
    }

    /// A method's function part, starting at the parameter list.
    pub(crate) fn parse_method_function(
        &mut self,
        ctx: Context,
        is_async: bool,
        is_generator: bool,
        kind: MethodKind,
        allow_super_call: bool,
    ) -> Result<FunctionExpression, ParseError> {
        let m = self.mark();
        let mut inner = ctx.enter_function(is_async, is_generator) | Context::SUPER_PROPERTY;
        if allow_super_call {
            inner |= Context::SUPER_CALL;
        }
        let (params, body) = self.parse_function_core(inner, false, Some(kind), None)?;
        Ok(FunctionExpression {
            id: None,
            params,
            body,
            is_async,
            is_generator,
            pos: self.finish(m),
        })
    }

    // Parameter list and body under an already-derived inner context.
    // `lenient_dups` permits duplicate parameter names for sloppy
    // functions with simple parameter lists; methods and arrows never
    // qualify. `accessor` triggers get/set arity checks.
    fn parse_function_core(
        &mut self,
        inner: Context,
        lenient_dups: bool,
        accessor: Option<MethodKind>,
        id: Option<&Identifier>,
    ) -> Result<(Vec<Pattern>, BlockStatement), ParseError> {
        let saved_labels = self.take_labels();
        self.enter_scope(true);

        let param_ctx = inner | Context::IN_PARAMS;
        self.expect_punct(Punct::LParen)?;
        let mut params: Vec<Pattern> = Vec::new();
        let mut has_rest = false;
        while !self.current.is_punct(Punct::RParen) {
            if self.current.is_punct(Punct::Ellipsis) {
                let sm = self.mark();
                self.advance()?;
                let target = self.parse_binding_target(param_ctx, PatternKind::Binding)?;
                params.push(Pattern::Rest(Box::new(RestElement {
                    argument: Box::new(target),
                    pos: self.finish(sm),
                })));
                has_rest = true;
                if !self.current.is_punct(Punct::RParen) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Rest parameter must be last formal parameter",
                    ));
                }
            } else {
                let pm = self.mark();
                let target = self.parse_binding_target(param_ctx, PatternKind::Binding)?;
                let param = if self.eat_punct(Punct::Assign)? {
                    let right = self.parse_assignment_expression(param_ctx & !Context::NO_IN)?;
                    Pattern::Assignment(Box::new(AssignmentPattern {
                        left: Box::new(target),
                        right: Box::new(right),
                        pos: self.finish(pm),
                    }))
                } else {
                    target
                };
                params.push(param);
            }
            if !self.current.is_punct(Punct::RParen) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.advance()?; // )

        match accessor {
            Some(MethodKind::Get) if !params.is_empty() => {
                return Err(self.error(ErrorKind::Syntax, "Getter must not have any formal parameters"));
            }
            Some(MethodKind::Set) if params.len() != 1 || has_rest => {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "Setter must have exactly one formal parameter",
                ));
            }
            _ => {}
        }

        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier(_)));
        let mut names = Vec::new();
        for param in &params {
            collect_bound_names(param, &mut names);
        }
        let mut seen = HashSet::new();
        let mut has_dup = false;
        for name in &names {
            if !seen.insert(name.clone()) {
                has_dup = true;
            }
            self.declare_param(name);
        }
        let dups_tolerated = lenient_dups && simple && !inner.contains(Context::STRICT);
        if has_dup && !dups_tolerated {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Duplicate parameter name not allowed in this context",
            ));
        }

        let bm = self.mark();
        self.expect_punct(Punct::LBrace)?;
        let mut body_ctx = inner;
        let (mut body, became_strict) = self.parse_directive_prologue(&mut body_ctx, simple)?;
        if became_strict {
            // A late directive retroactively applies strict rules to
            // the name and parameters.
            if let Some(id) = id {
                self.validate_binding_name(&id.name, body_ctx, PatternKind::Binding)?;
            }
            for name in &names {
                self.validate_binding_name(name, body_ctx, PatternKind::Binding)?;
            }
            if has_dup {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Duplicate parameter name not allowed in this context",
                ));
            }
        }
        while !self.current.is_punct(Punct::RBrace) {
            body.push(self.parse_statement_list_item(body_ctx)?);
        }
        self.advance()?; // }
        let body = BlockStatement { body, pos: self.finish(bm) };

        self.exit_scope();
        self.restore_labels(saved_labels);
        Ok((params, body))
    }

    // -----------------------------------------------------------------
    // Classes
    // -----------------------------------------------------------------

    /// `class` declaration statement.
    pub(crate) fn parse_class_declaration(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let declaration = self.parse_class_declaration_inner(ctx, true)?;
        Ok(Statement::ClassDeclaration(declaration))
    }

    fn parse_class_declaration_inner(
        &mut self,
        ctx: Context,
        require_name: bool,
    ) -> Result<ClassDeclaration, ParseError> {
        let m = self.mark();
        self.expect_keyword(Keyword::Class)?;
        let cls_ctx = ctx.enter_class();
        let id = if matches!(self.current.kind, TokenKind::Ident { .. }) {
            Some(self.parse_binding_identifier(cls_ctx, PatternKind::Lexical)?)
        } else if require_name {
            return Err(self.unexpected());
        } else {
            None
        };
        if let Some(id) = &id {
            self.declare_lexical(&id.name)?;
        }
        let super_class = self.parse_class_heritage(cls_ctx)?;
        let body = self.parse_class_body(cls_ctx, super_class.is_some())?;
        Ok(ClassDeclaration { id, super_class, body, pos: self.finish(m) })
    }

    /// `class` expression.
    pub(crate) fn parse_class_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        let m = self.mark();
        self.expect_keyword(Keyword::Class)?;
        let cls_ctx = ctx.enter_class();
        let id = if matches!(self.current.kind, TokenKind::Ident { .. }) {
            Some(self.parse_binding_identifier(cls_ctx, PatternKind::Lexical)?)
        } else {
            None
        };
        let super_class = self.parse_class_heritage(cls_ctx)?;
        let body = self.parse_class_body(cls_ctx, super_class.is_some())?;
        Ok(Expression::Class(Box::new(ClassExpression {
            id,
            super_class,
            body,
            pos: self.finish(m),
        })))
    }

    fn parse_class_heritage(
        &mut self,
        cls_ctx: Context,
    ) -> Result<Option<Box<Expression>>, ParseError> {
        if self.eat_keyword(Keyword::Extends)? {
            Ok(Some(Box::new(self.parse_lhs_expression(cls_ctx, true)?)))
        } else {
            Ok(None)
        }
    }

    fn parse_class_body(
        &mut self,
        cls_ctx: Context,
        has_super: bool,
    ) -> Result<ClassBody, ParseError> {
        let m = self.mark();
        self.expect_punct(Punct::LBrace)?;
        let mut body = Vec::new();
        let mut seen_constructor = false;
        while !self.current.is_punct(Punct::RBrace) {
            if self.eat_punct(Punct::Semicolon)? {
                continue;
            }
            body.push(self.parse_class_element(cls_ctx, has_super, &mut seen_constructor)?);
        }
        self.advance()?; // }
        Ok(ClassBody { body, pos: self.finish(m) })
    }

    fn parse_class_element(
        &mut self,
        cls_ctx: Context,
        has_super: bool,
        seen_constructor: &mut bool,
    ) -> Result<ClassElement, ParseError> {
        let m = self.mark();
        let mut is_static = false;
        if self.current.is_ident("static") {
            // `static` is itself a member name when member syntax
            // follows directly.
            let next = self.peek_next()?;
            let is_name = next.is_punct(Punct::LParen)
                || next.is_punct(Punct::Assign)
                || next.is_punct(Punct::Semicolon)
                || next.is_punct(Punct::RBrace);
            if !is_name {
                is_static = true;
                self.advance()?;
            }
        }

        if is_static && self.current.is_punct(Punct::LBrace) {
            if !self.options.next_enabled() {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "Class static blocks require the `next` option",
                ));
            }
            let bm = self.mark();
            self.advance()?; // {
            let inner = cls_ctx.enter_static_block();
            let saved_labels = self.take_labels();
            self.enter_scope(true);
            let mut body = Vec::new();
            while !self.current.is_punct(Punct::RBrace) {
                body.push(self.parse_statement_list_item(inner)?);
            }
            self.advance()?; // }
            self.exit_scope();
            self.restore_labels(saved_labels);
            return Ok(ClassElement::StaticBlock(StaticBlock { body, pos: self.finish(bm) }));
        }

        let mut is_async = false;
        let mut is_generator = false;
        let mut accessor: Option<MethodKind> = None;
        if self.current.is_ident("async") {
            let next = self.peek_next()?;
            if !next.newline_before && class_key_follows(&next) {
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
            if class_key_follows(&next) {
                accessor = Some(if self.current.is_ident("get") {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                });
                self.advance()?;
            }
        }

        let (key, computed, key_name) = self.parse_property_key(cls_ctx, true)?;
        if !computed && key_name.as_deref() == Some("#constructor") {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Classes may not have a member named `#constructor`",
            ));
        }

        let is_method =
            is_async || is_generator || accessor.is_some() || self.current.is_punct(Punct::LParen);
        if is_method {
            let is_constructor = !is_static
                && !computed
                && key_name.as_deref() == Some("constructor");
            if is_constructor {
                if accessor.is_some() {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Class constructor may not be an accessor",
                    ));
                }
                if is_async {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Class constructor may not be an async method",
                    ));
                }
                if is_generator {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "Class constructor may not be a generator",
                    ));
                }
                if *seen_constructor {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        "A class may only have one constructor",
                    ));
                }
                *seen_constructor = true;
            }
            if is_static && !computed && key_name.as_deref() == Some("prototype") {
                return Err(self.error(
                    ErrorKind::EarlyError,
                    "Classes may not have a static property named `prototype`",
                ));
            }
            let kind = if is_constructor {
                MethodKind::Constructor
            } else {
                accessor.unwrap_or(MethodKind::Method)
            };
            let value = self.parse_method_function(
                cls_ctx,
                is_async,
                is_generator,
                kind,
                is_constructor && has_super,
            )?;
            return Ok(ClassElement::Method(Box::new(MethodDefinition {
                key,
                value,
                kind,
                is_static,
                computed,
                pos: self.finish(m),
            })));
        }

        // Field definition.
        if !self.options.next_enabled() {
            return Err(self.error(ErrorKind::Syntax, "Class fields require the `next` option"));
        }
        if !computed && key_name.as_deref() == Some("constructor") {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Classes may not have a field named `constructor`",
            ));
        }
        if is_static && !computed && key_name.as_deref() == Some("prototype") {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Classes may not have a static property named `prototype`",
            ));
        }
        let value = if self.eat_punct(Punct::Assign)? {
            let init_ctx = (cls_ctx | Context::IN_FIELD_INIT | Context::SUPER_PROPERTY)
                & !Context::NO_IN;
            Some(Box::new(self.parse_assignment_expression(init_ctx)?))
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(ClassElement::Property(Box::new(PropertyDefinition {
            key,
            value,
            is_static,
            computed,
            pos: self.finish(m),
        })))
    }

    // -----------------------------------------------------------------
    // Modules
    // -----------------------------------------------------------------

    fn require_module_top_level(&self, ctx: Context, what: &str) -> Result<(), ParseError> {
        if !ctx.contains(Context::MODULE) {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("{what} declarations may only appear in modules"),
            ));
        }
        if !ctx.contains(Context::TOP_LEVEL) {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("{what} declarations may only appear at the top level of a module"),
            ));
        }
        Ok(())
    }

    fn parse_module_specifier(&mut self) -> Result<Literal, ParseError> {
        let m = self.mark();
        if !matches!(self.current.kind, TokenKind::Str(_)) {
            return Err(self.error(
                ErrorKind::Syntax,
                "Module specifier must be a string literal",
            ));
        }
        let token = self.advance()?;
        let TokenKind::Str(value) = token.kind.clone() else {
            return Err(self.unexpected());
        };
        Ok(self.literal_from_string_token(&token, m, value))
    }

    fn literal_from_string_token(
        &self,
        token: &Token,
        m: Marker,
        value: String,
    ) -> Literal {
        Literal {
            value: LiteralValue::String(value),
            raw: self
                .options
                .raw
                .then(|| self.lexer.raw_slice(token.start, token.end).to_string()),
            regex: None,
            pos: self.finish(m),
        }
    }

    // `name` or `"string name"` in an import/export clause.
    fn parse_module_export_name(&mut self) -> Result<ModuleExportName, ParseError> {
        if matches!(self.current.kind, TokenKind::Str(_)) {
            let m = self.mark();
            let token = self.advance()?;
            let TokenKind::Str(value) = token.kind.clone() else {
                return Err(self.unexpected());
            };
            return Ok(ModuleExportName::Literal(
                self.literal_from_string_token(&token, m, value),
            ));
        }
        Ok(ModuleExportName::Identifier(self.parse_identifier_name()?))
    }

    fn module_export_name_text(name: &ModuleExportName) -> String {
        match name {
            ModuleExportName::Identifier(id) => id.name.clone(),
            ModuleExportName::Literal(lit) => match &lit.value {
                LiteralValue::String(s) => s.clone(),
                _ => String::new(),
            },
        }
    }

    /// `import ... from "m";` and its clause forms.
    pub(crate) fn parse_import_declaration(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        self.require_module_top_level(ctx, "Import")?;
        let m = self.mark();
        self.advance()?; // import
        let mut specifiers = Vec::new();

        if matches!(self.current.kind, TokenKind::Str(_)) {
            // Side-effect import.
            let source = self.parse_module_specifier()?;
            self.consume_semicolon()?;
            return Ok(Statement::Import(ImportDeclaration {
                specifiers,
                source,
                pos: self.finish(m),
            }));
        }

        if matches!(self.current.kind, TokenKind::Ident { .. }) {
            let sm = self.mark();
            let local = self.parse_binding_identifier(ctx, PatternKind::Lexical)?;
            self.declare_lexical(&local.name)?;
            specifiers.push(ImportSpecifier::Default(ImportDefaultSpecifier {
                local,
                pos: self.finish(sm),
            }));
            if self.eat_punct(Punct::Comma)? {
                self.parse_import_clause_rest(ctx, &mut specifiers)?;
            }
        } else {
            self.parse_import_clause_rest(ctx, &mut specifiers)?;
        }

        self.expect_contextual("from")?;
        let source = self.parse_module_specifier()?;
        self.consume_semicolon()?;
        Ok(Statement::Import(ImportDeclaration { specifiers, source, pos: self.finish(m) }))
    }

    // The namespace or named part of an import clause.
    fn parse_import_clause_rest(
        &mut self,
        ctx: Context,
        specifiers: &mut Vec<ImportSpecifier>,
    ) -> Result<(), ParseError> {
        if self.current.is_punct(Punct::Star) {
            let sm = self.mark();
            self.advance()?;
            self.expect_contextual("as")?;
            let local = self.parse_binding_identifier(ctx, PatternKind::Lexical)?;
            self.declare_lexical(&local.name)?;
            specifiers.push(ImportSpecifier::Namespace(ImportNamespaceSpecifier {
                local,
                pos: self.finish(sm),
            }));
            return Ok(());
        }
        self.expect_punct(Punct::LBrace)?;
        while !self.current.is_punct(Punct::RBrace) {
            let sm = self.mark();
            let name_token = self.current.clone();
            let imported = self.parse_module_export_name()?;
            let local = if self.eat_contextual("as")? {
                self.parse_binding_identifier(ctx, PatternKind::Lexical)?
            } else {
                match &imported {
                    ModuleExportName::Identifier(id) => {
                        if is_keyword_text(&id.name) {
                            return Err(self.error_at_token(
                                &name_token,
                                ErrorKind::EarlyError,
                                format!("Unexpected reserved word `{}`", id.name),
                            ));
                        }
                        self.validate_binding_name(&id.name, ctx, PatternKind::Lexical)?;
                        id.clone()
                    }
                    ModuleExportName::Literal(_) => {
                        return Err(self.error_at_token(
                            &name_token,
                            ErrorKind::Syntax,
                            "String import names require `as`",
                        ));
                    }
                }
            };
            self.declare_lexical(&local.name)?;
            specifiers.push(ImportSpecifier::Named(ImportNamedSpecifier {
                imported,
                local,
                pos: self.finish(sm),
            }));
            if !self.current.is_punct(Punct::RBrace) {
                self.expect_punct(Punct::Comma)?;
            }
        }
        self.advance()?; // }
        Ok(())
    }

    /// The `export` declaration forms.
    pub(crate) fn parse_export_declaration(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        self.require_module_top_level(ctx, "Export")?;
        let m = self.mark();
        let export_token = self.advance()?; // export

        if self.eat_punct(Punct::Star)? {
            let exported = if self.eat_contextual("as")? {
                let name_token = self.current.clone();
                let name = self.parse_module_export_name()?;
                self.add_export(&Self::module_export_name_text(&name), &name_token)?;
                Some(name)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_specifier()?;
            self.consume_semicolon()?;
            return Ok(Statement::ExportAll(ExportAllDeclaration {
                source,
                exported,
                pos: self.finish(m),
            }));
        }

        if self.current.is_keyword(Keyword::Default) {
            let default_token = self.advance()?;
            self.add_export("default", &default_token)?;
            let declaration = self.parse_export_default_payload(ctx)?;
            return Ok(Statement::ExportDefault(Box::new(ExportDefaultDeclaration {
                declaration,
                pos: self.finish(m),
            })));
        }

        if self.current.is_punct(Punct::LBrace) {
            self.advance()?;
            let mut specifiers = Vec::new();
            let mut locals_need_idents = false;
            while !self.current.is_punct(Punct::RBrace) {
                let sm = self.mark();
                let name_token = self.current.clone();
                let local = self.parse_module_export_name()?;
                if matches!(local, ModuleExportName::Literal(_)) {
                    locals_need_idents = true;
                }
                let exported = if self.eat_contextual("as")? {
                    self.parse_module_export_name()?
                } else {
                    local.clone()
                };
                self.add_export(&Self::module_export_name_text(&exported), &name_token)?;
                specifiers.push(ExportSpecifier { local, exported, pos: self.finish(sm) });
                if !self.current.is_punct(Punct::RBrace) {
                    self.expect_punct(Punct::Comma)?;
                }
            }
            self.advance()?; // }
            let source = if self.eat_contextual("from")? {
                Some(self.parse_module_specifier()?)
            } else {
                if locals_need_idents {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "String export names require a `from` clause",
                    ));
                }
                None
            };
            self.consume_semicolon()?;
            return Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source,
                pos: self.finish(m),
            })));
        }

        // `export <declaration>`.
        let declaration = match &self.current.kind {
            TokenKind::Keyword(Keyword::Var) => self.parse_variable_statement(ctx, VariableKind::Var)?,
            TokenKind::Keyword(Keyword::Const) => {
                self.parse_variable_statement(ctx, VariableKind::Const)?
            }
            TokenKind::Ident { name, escaped } if name == "let" && !escaped => {
                self.parse_variable_statement(ctx, VariableKind::Let)?
            }
            TokenKind::Keyword(Keyword::Function) => self.parse_function_declaration(ctx, false)?,
            TokenKind::Keyword(Keyword::Class) => self.parse_class_declaration(ctx)?,
            TokenKind::Ident { name, escaped } if name == "async" && !escaped => {
                let next = self.peek_next()?;
                if !next.is_keyword(Keyword::Function) || next.newline_before {
                    return Err(self.unexpected());
                }
                self.parse_function_declaration(ctx, true)?
            }
            _ => return Err(self.unexpected()),
        };
        for name in declared_names(&declaration) {
            self.add_export(&name, &export_token)?;
        }
        Ok(Statement::ExportNamed(Box::new(ExportNamedDeclaration {
            declaration: Some(declaration),
            specifiers: Vec::new(),
            source: None,
            pos: self.finish(m),
        })))
    }

    fn parse_export_default_payload(
        &mut self,
        ctx: Context,
    ) -> Result<ExportDefaultPayload, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Function) => {
                let declaration = self.parse_function_declaration_inner(ctx, false, false)?;
                Ok(ExportDefaultPayload::Function(declaration))
            }
            TokenKind::Keyword(Keyword::Class) => {
                let declaration = self.parse_class_declaration_inner(ctx, false)?;
                Ok(ExportDefaultPayload::Class(declaration))
            }
            TokenKind::Ident { name, escaped } if name == "async" && !escaped => {
                let next = self.peek_next()?;
                if next.is_keyword(Keyword::Function) && !next.newline_before {
                    let declaration = self.parse_function_declaration_inner(ctx, true, false)?;
                    return Ok(ExportDefaultPayload::Function(declaration));
                }
                let expression = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                self.check_cover_init()?;
                self.consume_semicolon()?;
                Ok(ExportDefaultPayload::Expression(Box::new(expression)))
            }
            _ => {
                let expression = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                self.check_cover_init()?;
                self.consume_semicolon()?;
                Ok(ExportDefaultPayload::Expression(Box::new(expression)))
            }
        }
    }
}

// Names an exported declaration introduces, for duplicate-export checks.
fn declared_names(statement: &Statement) -> Vec<String> {
    match statement {
        Statement::VariableDeclaration(declaration) => {
            let mut names = Vec::new();
            for declarator in &declaration.declarations {
                collect_bound_names(&declarator.id, &mut names);
            }
            names
        }
        Statement::FunctionDeclaration(declaration) => {
            declaration.id.iter().map(|id| id.name.clone()).collect()
        }
        Statement::ClassDeclaration(declaration) => {
            declaration.id.iter().map(|id| id.name.clone()).collect()
        }
        _ => Vec::new(),
    }
}

// Whether `token` can be a class member key (including private names)
// after a `static`/`async`/`get`/`set` modifier.
fn class_key_follows(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Ident { .. }
            | TokenKind::Keyword(_)
            | TokenKind::PrivateIdent(_)
            | TokenKind::Str(_)
            | TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::Punct(Punct::LBracket)
            | TokenKind::Punct(Punct::Star)
    )
}

#[cfg(test)]
mod tests {
    use crate::{parse_module, parse_script, Options};
    use estree::{ClassElement, MethodKind, Statement};

    fn next_options() -> Options {
        Options { next: true, ..Options::default() }
    }

    #[test]
    fn const_requires_initializer() {
        assert!(parse_script("const a = 1;", &Options::default()).is_ok());
        assert!(parse_script("const a;", &Options::default()).is_err());
        assert!(parse_script("let [a] = xs, b;", &Options::default()).is_ok());
        assert!(parse_script("var [a];", &Options::default()).is_err());
    }

    #[test]
    fn lexical_cannot_bind_let() {
        assert!(parse_script("let let = 1;", &Options::default()).is_err());
        assert!(parse_script("const { let } = o;", &Options::default()).is_err());
        assert!(parse_script("var let = 1;", &Options::default()).is_ok());
    }

    #[test]
    fn function_parameter_rules() {
        assert!(parse_script("function f(a, a) {}", &Options::default()).is_ok());
        assert!(parse_script("'use strict'; function f(a, a) {}", &Options::default()).is_err());
        assert!(parse_script("function f(a, a) { 'use strict'; }", &Options::default()).is_err());
        assert!(parse_script("function f([a], a) {}", &Options::default()).is_err());
        assert!(parse_script("function f(a, ...rest) {}", &Options::default()).is_ok());
        assert!(parse_script("function f(...rest, b) {}", &Options::default()).is_err());
        assert!(parse_script("function f(a = 1, [b, c] = d) {}", &Options::default()).is_ok());
    }

    #[test]
    fn non_simple_params_reject_use_strict() {
        assert!(
            parse_script("function f(a = 1) { 'use strict'; }", &Options::default()).is_err()
        );
        assert!(parse_script("function f(a) { 'use strict'; }", &Options::default()).is_ok());
    }

    #[test]
    fn param_and_body_share_redeclaration_rules() {
        assert!(parse_script("function f(a) { var a; }", &Options::default()).is_ok());
        assert!(parse_script("function f(a) { let a; }", &Options::default()).is_err());
    }

    #[test]
    fn generator_and_async_names() {
        assert!(parse_script("function* g(yield) {}", &Options::default()).is_err());
        assert!(parse_script("async function f(await) {}", &Options::default()).is_err());
        assert!(parse_script("function f(yield) {}", &Options::default()).is_ok());
        // The declared name binds outside, so only the outer context
        // restricts it.
        assert!(parse_script("function yield() {}", &Options::default()).is_ok());
        assert!(
            parse_script("function* g() { function yield() {} }", &Options::default()).is_err()
        );
    }

    #[test]
    fn class_constructor_rules() {
        assert!(parse_script("class A { constructor() {} }", &Options::default()).is_ok());
        assert!(parse_script(
            "class A { constructor() {} constructor() {} }",
            &Options::default()
        )
        .is_err());
        assert!(parse_script("class A { *constructor() {} }", &Options::default()).is_err());
        assert!(
            parse_script("class A { async constructor() {} }", &Options::default()).is_err()
        );
        assert!(parse_script("class A { get constructor() {} }", &Options::default()).is_err());
        // Static and computed members named constructor are fine.
        assert!(parse_script("class A { static constructor() {} }", &Options::default()).is_ok());
        assert!(
            parse_script("class A { ['constructor']() {} }", &Options::default()).is_ok()
        );
    }

    #[test]
    fn class_bodies_are_strict() {
        assert!(parse_script("class A { m() { with (o) {} } }", &Options::default()).is_err());
        assert!(parse_script("class A { m(a, a) {} }", &Options::default()).is_err());
    }

    #[test]
    fn super_permissions() {
        assert!(parse_script(
            "class B extends A { constructor() { super(); } }",
            &Options::default()
        )
        .is_ok());
        assert!(parse_script("class B { constructor() { super(); } }", &Options::default())
            .is_err());
        assert!(parse_script("class B { m() { super.x; } }", &Options::default()).is_ok());
        assert!(parse_script("class B { m() { super(); } }", &Options::default()).is_err());
        assert!(parse_script("function f() { super.x; }", &Options::default()).is_err());
        // Arrows inherit the permission, ordinary functions do not.
        assert!(parse_script(
            "class B { m() { const f = () => super.x; } }",
            &Options::default()
        )
        .is_ok());
        assert!(parse_script(
            "class B { m() { function f() { return super.x; } } }",
            &Options::default()
        )
        .is_err());
    }

    #[test]
    fn accessor_arity() {
        assert!(parse_script("class A { get x() {} set x(v) {} }", &Options::default()).is_ok());
        assert!(parse_script("class A { get x(v) {} }", &Options::default()).is_err());
        assert!(parse_script("class A { set x() {} }", &Options::default()).is_err());
        assert!(parse_script("class A { set x(...v) {} }", &Options::default()).is_err());
        assert!(parse_script("({ get x() {}, set x(v) {} });", &Options::default()).is_ok());
    }

    #[test]
    fn fields_and_static_blocks_gated_by_next() {
        assert!(parse_script("class A { x = 1; }", &Options::default()).is_err());
        assert!(parse_script("class A { x = 1; }", &next_options()).is_ok());
        assert!(parse_script("class A { static { x; } }", &Options::default()).is_err());
        assert!(parse_script("class A { static { x; } }", &next_options()).is_ok());
        assert!(parse_script("class A { #x = 1; m() { return this.#x; } }", &next_options())
            .is_ok());
        assert!(parse_script("class A { #constructor() {} }", &next_options()).is_err());
        assert!(parse_script("class A { x = 1; constructor() {} }", &next_options()).is_ok());
    }

    #[test]
    fn private_names_require_class_context() {
        assert!(parse_script("this.#x;", &next_options()).is_err());
        assert!(parse_script("class A { m() { return #x in this; } }", &next_options()).is_ok());
    }

    #[test]
    fn static_member_forms() {
        let program = parse_script(
            "class A { static m() {} static get p() {} static() {} }",
            &Options::default(),
        )
        .unwrap();
        let Statement::ClassDeclaration(class) = &program.body[0] else {
            panic!("expected class");
        };
        match &class.body.body[0] {
            ClassElement::Method(m) => {
                assert!(m.is_static);
                assert_eq!(m.kind, MethodKind::Method);
            }
            other => panic!("unexpected {other:?}"),
        }
        match &class.body.body[2] {
            // A method literally named `static`.
            ClassElement::Method(m) => assert!(!m.is_static),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn import_forms() {
        assert!(parse_module("import 'm';", &Options::default()).is_ok());
        assert!(parse_module("import d from 'm';", &Options::default()).is_ok());
        assert!(parse_module("import * as ns from 'm';", &Options::default()).is_ok());
        assert!(parse_module("import d, { a, b as c } from 'm';", &Options::default()).is_ok());
        assert!(parse_module("import { default as d } from 'm';", &Options::default()).is_ok());
        assert!(parse_module("import { default } from 'm';", &Options::default()).is_err());
        assert!(parse_module("import { 'x y' as z } from 'm';", &Options::default()).is_ok());
        assert!(parse_module("import { 'x y' } from 'm';", &Options::default()).is_err());
    }

    #[test]
    fn import_requires_module_goal_and_top_level() {
        assert!(parse_script("import d from 'm';", &Options::default()).is_err());
        assert!(parse_module("{ import d from 'm'; }", &Options::default()).is_err());
        assert!(
            parse_module("function f() { import d from 'm'; }", &Options::default()).is_err()
        );
    }

    #[test]
    fn import_bindings_are_lexical() {
        assert!(parse_module("import d from 'm'; let d;", &Options::default()).is_err());
        assert!(parse_module("import { a } from 'm'; var a;", &Options::default()).is_err());
    }

    #[test]
    fn module_specifier_must_be_string() {
        assert!(parse_module("import d from m;", &Options::default()).is_err());
        assert!(parse_module("export { a } from 42;", &Options::default()).is_err());
    }

    #[test]
    fn export_forms() {
        assert!(parse_module("export const a = 1;", &Options::default()).is_ok());
        assert!(parse_module("export function f() {}", &Options::default()).is_ok());
        assert!(parse_module("export class C {}", &Options::default()).is_ok());
        assert!(parse_module("let a; export { a };", &Options::default()).is_ok());
        assert!(parse_module("let a; export { a as b };", &Options::default()).is_ok());
        assert!(parse_module("export { a } from 'm';", &Options::default()).is_ok());
        assert!(parse_module("export * from 'm';", &Options::default()).is_ok());
        assert!(parse_module("export * as ns from 'm';", &Options::default()).is_ok());
        assert!(parse_module("export default 1 + 2;", &Options::default()).is_ok());
        assert!(parse_module("export default function () {}", &Options::default()).is_ok());
        assert!(parse_module("export default class {}", &Options::default()).is_ok());
        assert!(
            parse_module("export { 'x y' as z } from 'm';", &Options::default()).is_ok()
        );
        assert!(parse_module("export { 'x y' };", &Options::default()).is_err());
    }

    #[test]
    fn duplicate_exports_are_rejected() {
        assert!(parse_module("let a, b; export { a, b as a };", &Options::default()).is_err());
        assert!(
            parse_module("export const a = 1; export function a() {}", &Options::default())
                .is_err()
        );
        assert!(parse_module(
            "export default 1; export default 2;",
            &Options::default()
        )
        .is_err());
    }

    #[test]
    fn module_top_level_await_is_reserved() {
        assert!(parse_module("var await = 1;", &Options::default()).is_err());
        assert!(parse_script("var await = 1;", &Options::default()).is_ok());
    }
}
