//! Statement grammar.
//!
//! Statement-list items dispatch to declarations; plain statements
//! cover blocks, control flow, loops with their three `for` forms,
//! labels, and exception handling.

use estree::{
    BlockStatement, BreakStatement, ContinueStatement, DebuggerStatement, DoWhileStatement,
    EmptyStatement, ErrorKind, Expression, ExpressionStatement, ForInStatement, ForInit,
    ForOfStatement, ForStatement, ForTarget, Identifier, IfStatement, LabeledStatement,
    ParseError, Pattern, ReturnStatement, Statement, SwitchCase, SwitchStatement, ThrowStatement,
    TryStatement, VariableKind, WhileStatement, WithStatement,
};

use super::pattern::collect_bound_names;
use super::{Parser, PatternKind};
use crate::context::Context;
use crate::lexer::{Keyword, Punct, Token, TokenKind};

// Whether `token` can begin a binding after `let`: an identifier or a
// destructuring pattern opener. Anything else leaves `let` an ordinary
// expression.
fn starts_binding(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Ident { .. }
            | TokenKind::Punct(Punct::LBracket)
            | TokenKind::Punct(Punct::LBrace)
    )
}

impl<'a> Parser<'a> {
    /// StatementListItem: a declaration or a statement.
    pub(crate) fn parse_statement_list_item(
        &mut self,
        ctx: Context,
    ) -> Result<Statement, ParseError> {
        match &self.current.kind {
            TokenKind::Keyword(Keyword::Function) => self.parse_function_declaration(ctx, false),
            TokenKind::Keyword(Keyword::Class) => self.parse_class_declaration(ctx),
            TokenKind::Keyword(Keyword::Const) => {
                self.parse_variable_statement(ctx, VariableKind::Const)
            }
            TokenKind::Keyword(Keyword::Import) => {
                let next = self.peek_next()?;
                if next.is_punct(Punct::LParen) || next.is_punct(Punct::Dot) {
                    self.parse_statement(ctx)
                } else {
                    self.parse_import_declaration(ctx)
                }
            }
            TokenKind::Keyword(Keyword::Export) => self.parse_export_declaration(ctx),
            TokenKind::Ident { name, escaped } if name == "let" && !escaped => {
                let next = self.peek_next()?;
                if starts_binding(&next) {
                    self.parse_variable_statement(ctx, VariableKind::Let)
                } else {
                    self.parse_statement(ctx)
                }
            }
            TokenKind::Ident { name, escaped } if name == "async" && !escaped => {
                let next = self.peek_next()?;
                if next.is_keyword(Keyword::Function) && !next.newline_before {
                    self.parse_function_declaration(ctx, true)
                } else {
                    self.parse_statement(ctx)
                }
            }
            _ => self.parse_statement(ctx),
        }
    }

    /// Statement proper; declarations are not allowed here.
    pub(crate) fn parse_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        self.with_depth(|p| p.parse_statement_inner(ctx))
    }

    fn parse_statement_inner(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        match &self.current.kind {
            TokenKind::Punct(Punct::LBrace) => {
                Ok(Statement::Block(self.parse_block_statement(ctx)?))
            }
            TokenKind::Punct(Punct::Semicolon) => {
                let m = self.mark();
                self.advance()?;
                Ok(Statement::Empty(EmptyStatement { pos: self.finish(m) }))
            }
            TokenKind::Keyword(Keyword::Var) => {
                self.parse_variable_statement(ctx, VariableKind::Var)
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(ctx),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while_statement(ctx),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(ctx),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(ctx),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch_statement(ctx),
            TokenKind::Keyword(Keyword::Continue) => self.parse_continue_statement(ctx),
            TokenKind::Keyword(Keyword::Break) => self.parse_break_statement(ctx),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(ctx),
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(ctx),
            TokenKind::Keyword(Keyword::Throw) => self.parse_throw_statement(ctx),
            TokenKind::Keyword(Keyword::Try) => self.parse_try_statement(ctx),
            TokenKind::Keyword(Keyword::Debugger) => {
                let m = self.mark();
                self.advance()?;
                self.consume_semicolon()?;
                Ok(Statement::Debugger(DebuggerStatement { pos: self.finish(m) }))
            }
            TokenKind::Keyword(Keyword::Function) => Err(self.error(
                ErrorKind::Syntax,
                "Function declaration is not allowed in a single-statement context",
            )),
            TokenKind::Keyword(Keyword::Class) => Err(self.error(
                ErrorKind::Syntax,
                "Class declaration is not allowed in a single-statement context",
            )),
            TokenKind::Ident { name, escaped } => {
                if name == "let" && !escaped && self.peek_next()?.is_punct(Punct::LBracket) {
                    // An expression statement may not begin `let [`.
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "`let` declaration is ambiguous here; use parentheses",
                    ));
                }
                if self.peek_next()?.is_punct(Punct::Colon) {
                    return self.parse_labeled_statement(ctx);
                }
                self.parse_expression_statement(ctx)
            }
            _ => self.parse_expression_statement(ctx),
        }
    }

    fn parse_expression_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        let expression = self.parse_expression(ctx & !Context::NO_IN)?;
        self.check_cover_init()?;
        self.consume_semicolon()?;
        Ok(Statement::Expression(ExpressionStatement {
            expression: Box::new(expression),
            directive: None,
            pos: self.finish(m),
        }))
    }

    /// `{ ... }` with a fresh lexical scope.
    pub(crate) fn parse_block_statement(
        &mut self,
        ctx: Context,
    ) -> Result<BlockStatement, ParseError> {
        let m = self.mark();
        self.expect_punct(Punct::LBrace)?;
        self.enter_scope(false);
        let inner = ctx.enter_block();
        let mut body = Vec::new();
        while !self.current.is_punct(Punct::RBrace) {
            body.push(self.parse_statement_list_item(inner)?);
        }
        self.advance()?; // }
        self.exit_scope();
        Ok(BlockStatement { body, pos: self.finish(m) })
    }

    // Parenthesized head expression of `if`/`while`/`do`/`switch`.
    fn parse_head_expression(&mut self, ctx: Context) -> Result<Expression, ParseError> {
        self.expect_punct(Punct::LParen)?;
        let expr = self.parse_expression(ctx & !Context::NO_IN)?;
        self.check_cover_init()?;
        self.expect_punct(Punct::RParen)?;
        Ok(expr)
    }

    fn parse_if_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // if
        let test = self.parse_head_expression(ctx)?;
        let consequent = self.parse_statement(ctx)?;
        let alternate = if self.eat_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_statement(ctx)?))
        } else {
            None
        };
        Ok(Statement::If(Box::new(IfStatement {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
            pos: self.finish(m),
        })))
    }

    fn parse_do_while_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // do
        let body = self.parse_statement(ctx.enter_iteration())?;
        self.expect_keyword(Keyword::While)?;
        let test = self.parse_head_expression(ctx)?;
        // The closing semicolon of do-while is always optional.
        self.eat_punct(Punct::Semicolon)?;
        Ok(Statement::DoWhile(Box::new(DoWhileStatement {
            body: Box::new(body),
            test: Box::new(test),
            pos: self.finish(m),
        })))
    }

    fn parse_while_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // while
        let test = self.parse_head_expression(ctx)?;
        let body = self.parse_statement(ctx.enter_iteration())?;
        Ok(Statement::While(Box::new(WhileStatement {
            test: Box::new(test),
            body: Box::new(body),
            pos: self.finish(m),
        })))
    }

    fn parse_for_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // for
        let is_await = ctx.await_is_keyword() && self.eat_contextual("await")?;
        self.expect_punct(Punct::LParen)?;
        // Head scope holds `for (let ...)` bindings.
        self.enter_scope(false);
        let result = self.parse_for_head_and_body(ctx, m, is_await);
        self.exit_scope();
        result
    }

    fn parse_for_head_and_body(
        &mut self,
        ctx: Context,
        m: super::Marker,
        is_await: bool,
    ) -> Result<Statement, ParseError> {
        // Empty init.
        if self.current.is_punct(Punct::Semicolon) {
            if is_await {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "`for await` is only valid with a for-of head",
                ));
            }
            self.advance()?;
            return self.parse_classic_for_tail(ctx, m, None);
        }

        // Declaration heads.
        let decl_kind = match &self.current.kind {
            TokenKind::Keyword(Keyword::Var) => Some(VariableKind::Var),
            TokenKind::Keyword(Keyword::Const) => Some(VariableKind::Const),
            TokenKind::Ident { name, escaped } if name == "let" && !escaped => {
                if starts_binding(&self.peek_next()?) {
                    Some(VariableKind::Let)
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(kind) = decl_kind {
            let declaration = self.parse_variable_declaration(ctx, kind, true)?;
            if self.current.is_keyword(Keyword::In) {
                if is_await {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "`for await` is only valid with a for-of head",
                    ));
                }
                self.check_for_each_declaration(&declaration)?;
                self.advance()?;
                let right = self.parse_expression(ctx & !Context::NO_IN)?;
                self.expect_punct(Punct::RParen)?;
                let body = self.parse_statement(ctx.enter_iteration())?;
                return Ok(Statement::ForIn(Box::new(ForInStatement {
                    left: ForTarget::Declaration(declaration),
                    right: Box::new(right),
                    body: Box::new(body),
                    pos: self.finish(m),
                })));
            }
            if self.current.is_ident("of") {
                self.check_for_each_declaration(&declaration)?;
                self.advance()?;
                let right = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
                self.expect_punct(Punct::RParen)?;
                let body = self.parse_statement(ctx.enter_iteration())?;
                return Ok(Statement::ForOf(Box::new(ForOfStatement {
                    left: ForTarget::Declaration(declaration),
                    right: Box::new(right),
                    body: Box::new(body),
                    is_await,
                    pos: self.finish(m),
                })));
            }
            if is_await {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "`for await` is only valid with a for-of head",
                ));
            }
            self.check_classic_for_declaration(&declaration)?;
            self.expect_punct(Punct::Semicolon)?;
            return self.parse_classic_for_tail(ctx, m, Some(ForInit::Declaration(declaration)));
        }

        // Expression head; `in` must not be consumed by the expression.
        let em = self.mark();
        let expr = self.parse_expression(ctx | Context::NO_IN)?;
        if self.current.is_keyword(Keyword::In) {
            if is_await {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "`for await` is only valid with a for-of head",
                ));
            }
            let left = self.for_each_target(expr, em, ctx)?;
            self.advance()?;
            let right = self.parse_expression(ctx & !Context::NO_IN)?;
            self.expect_punct(Punct::RParen)?;
            let body = self.parse_statement(ctx.enter_iteration())?;
            return Ok(Statement::ForIn(Box::new(ForInStatement {
                left,
                right: Box::new(right),
                body: Box::new(body),
                pos: self.finish(m),
            })));
        }
        if self.current.is_ident("of") && !matches!(expr, Expression::Assignment(_)) {
            if !is_await && expr.identifier_name() == Some("async") {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "The left-hand side of a for-of loop may not be `async`",
                ));
            }
            let left = self.for_each_target(expr, em, ctx)?;
            self.advance()?;
            let right = self.parse_assignment_expression(ctx & !Context::NO_IN)?;
            self.expect_punct(Punct::RParen)?;
            let body = self.parse_statement(ctx.enter_iteration())?;
            return Ok(Statement::ForOf(Box::new(ForOfStatement {
                left,
                right: Box::new(right),
                body: Box::new(body),
                is_await,
                pos: self.finish(m),
            })));
        }
        if is_await {
            return Err(self.error(
                ErrorKind::Syntax,
                "`for await` is only valid with a for-of head",
            ));
        }
        self.check_cover_init()?;
        self.expect_punct(Punct::Semicolon)?;
        self.parse_classic_for_tail(ctx, m, Some(ForInit::Expression(Box::new(expr))))
    }

    fn parse_classic_for_tail(
        &mut self,
        ctx: Context,
        m: super::Marker,
        init: Option<ForInit>,
    ) -> Result<Statement, ParseError> {
        let test = if self.current.is_punct(Punct::Semicolon) {
            None
        } else {
            let test = self.parse_expression(ctx & !Context::NO_IN)?;
            self.check_cover_init()?;
            Some(Box::new(test))
        };
        self.expect_punct(Punct::Semicolon)?;
        let update = if self.current.is_punct(Punct::RParen) {
            None
        } else {
            let update = self.parse_expression(ctx & !Context::NO_IN)?;
            self.check_cover_init()?;
            Some(Box::new(update))
        };
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_statement(ctx.enter_iteration())?;
        Ok(Statement::For(Box::new(ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
            pos: self.finish(m),
        })))
    }

    // The declaration head of for-in/for-of: one declarator, no
    // initializer.
    fn check_for_each_declaration(
        &self,
        declaration: &estree::VariableDeclaration,
    ) -> Result<(), ParseError> {
        if declaration.declarations.len() != 1 {
            return Err(self.error(
                ErrorKind::Syntax,
                "A for-in or for-of head may declare only one binding",
            ));
        }
        if declaration.declarations[0].init.is_some() {
            return Err(self.error(
                ErrorKind::Syntax,
                "A for-in or for-of declaration may not have an initializer",
            ));
        }
        Ok(())
    }

    // A classic `for (decl;;)` head still owes const and destructuring
    // declarators their initializers.
    fn check_classic_for_declaration(
        &self,
        declaration: &estree::VariableDeclaration,
    ) -> Result<(), ParseError> {
        for declarator in &declaration.declarations {
            if declarator.init.is_none() {
                if declaration.kind == VariableKind::Const {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Missing initializer in const declaration",
                    ));
                }
                if !matches!(declarator.id, Pattern::Identifier(_)) {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "Missing initializer in destructuring declaration",
                    ));
                }
            }
        }
        Ok(())
    }

    // Rewrite an expression head of for-in/for-of into its target.
    fn for_each_target(
        &mut self,
        expr: Expression,
        em: super::Marker,
        ctx: Context,
    ) -> Result<ForTarget, ParseError> {
        if matches!(expr, Expression::Array(_) | Expression::Object(_))
            && self.paren_expr_start == Some(em.offset)
        {
            return Err(self.error(
                ErrorKind::Syntax,
                "Invalid left-hand side in for-loop",
            ));
        }
        let pattern = self
            .expression_to_pattern(expr, PatternKind::Assignment, ctx)
            .map_err(|mut err| {
                err.message = "Invalid left-hand side in for-loop".to_string();
                err
            })?;
        if matches!(pattern, Pattern::Assignment(_)) {
            return Err(self.error(
                ErrorKind::Syntax,
                "Invalid left-hand side in for-loop",
            ));
        }
        Ok(ForTarget::Pattern(pattern))
    }

    fn parse_switch_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // switch
        let discriminant = self.parse_head_expression(ctx)?;
        self.expect_punct(Punct::LBrace)?;
        self.enter_scope(false);
        let inner = ctx.enter_switch();
        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.current.is_punct(Punct::RBrace) {
            let cm = self.mark();
            let test = if self.eat_keyword(Keyword::Case)? {
                let test = self.parse_expression(inner & !Context::NO_IN)?;
                self.check_cover_init()?;
                Some(test)
            } else {
                self.expect_keyword(Keyword::Default)?;
                if seen_default {
                    return Err(self.error(
                        ErrorKind::Syntax,
                        "More than one default clause in switch statement",
                    ));
                }
                seen_default = true;
                None
            };
            self.expect_punct(Punct::Colon)?;
            let mut consequent = Vec::new();
            while !self.current.is_punct(Punct::RBrace)
                && !self.current.is_keyword(Keyword::Case)
                && !self.current.is_keyword(Keyword::Default)
            {
                consequent.push(self.parse_statement_list_item(inner)?);
            }
            cases.push(SwitchCase { test, consequent, pos: self.finish(cm) });
        }
        self.advance()?; // }
        self.exit_scope();
        Ok(Statement::Switch(SwitchStatement {
            discriminant: Box::new(discriminant),
            cases,
            pos: self.finish(m),
        }))
    }

    fn parse_continue_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // continue
        let label = self.parse_jump_label(ctx)?;
        self.consume_semicolon()?;
        match &label {
            Some(id) => match self.find_label(&id.name) {
                Some(true) => {}
                Some(false) => {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        format!("Label '{}' does not mark an iteration statement", id.name),
                    ));
                }
                None => {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        format!("Undefined label '{}'", id.name),
                    ));
                }
            },
            None => {
                if !ctx.contains(Context::IN_ITERATION) {
                    return Err(self.error(ErrorKind::EarlyError, "Illegal continue statement"));
                }
            }
        }
        Ok(Statement::Continue(ContinueStatement { label, pos: self.finish(m) }))
    }

    fn parse_break_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // break
        let label = self.parse_jump_label(ctx)?;
        self.consume_semicolon()?;
        match &label {
            Some(id) => {
                if self.find_label(&id.name).is_none() {
                    return Err(self.error(
                        ErrorKind::EarlyError,
                        format!("Undefined label '{}'", id.name),
                    ));
                }
            }
            None => {
                if !ctx.contains(Context::IN_ITERATION) && !ctx.contains(Context::IN_SWITCH) {
                    return Err(self.error(ErrorKind::EarlyError, "Illegal break statement"));
                }
            }
        }
        Ok(Statement::Break(BreakStatement { label, pos: self.finish(m) }))
    }

    // The optional label of break/continue; a line break forces the
    // bare form.
    fn parse_jump_label(&mut self, ctx: Context) -> Result<Option<Identifier>, ParseError> {
        if self.current.newline_before {
            return Ok(None);
        }
        match &self.current.kind {
            TokenKind::Ident { .. } => Ok(Some(self.parse_identifier_reference(ctx)?)),
            _ => Ok(None),
        }
    }

    fn parse_return_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        if !ctx.contains(Context::ALLOW_RETURN) {
            return Err(self.error(ErrorKind::EarlyError, "Illegal return statement"));
        }
        let m = self.mark();
        self.advance()?; // return
        let argument = if !self.current.newline_before && self.token_starts_expression() {
            let argument = self.parse_expression(ctx & !Context::NO_IN)?;
            self.check_cover_init()?;
            Some(Box::new(argument))
        } else {
            None
        };
        self.consume_semicolon()?;
        Ok(Statement::Return(ReturnStatement { argument, pos: self.finish(m) }))
    }

    fn parse_with_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        if ctx.contains(Context::STRICT) {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Strict mode code may not include a with statement",
            ));
        }
        let m = self.mark();
        self.advance()?; // with
        let object = self.parse_head_expression(ctx)?;
        let body = self.parse_statement(ctx)?;
        Ok(Statement::With(WithStatement {
            object: Box::new(object),
            body: Box::new(body),
            pos: self.finish(m),
        }))
    }

    fn parse_throw_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // throw
        if self.current.newline_before {
            return Err(self.error(ErrorKind::Syntax, "Illegal newline after throw"));
        }
        let argument = self.parse_expression(ctx & !Context::NO_IN)?;
        self.check_cover_init()?;
        self.consume_semicolon()?;
        Ok(Statement::Throw(ThrowStatement {
            argument: Box::new(argument),
            pos: self.finish(m),
        }))
    }

    fn parse_try_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        let m = self.mark();
        self.advance()?; // try
        if !self.current.is_punct(Punct::LBrace) {
            return Err(self.unexpected());
        }
        let block = self.parse_block_statement(ctx)?;
        let handler = if self.current.is_keyword(Keyword::Catch) {
            let cm = self.mark();
            self.advance()?;
            // Catch parameter bindings live in the handler scope.
            self.enter_scope(false);
            let param = if self.eat_punct(Punct::LParen)? {
                let param = self.parse_binding_target(ctx, PatternKind::Lexical)?;
                let mut names = Vec::new();
                collect_bound_names(&param, &mut names);
                for name in &names {
                    self.declare_lexical(name)?;
                }
                self.expect_punct(Punct::RParen)?;
                Some(param)
            } else {
                None
            };
            if !self.current.is_punct(Punct::LBrace) {
                return Err(self.unexpected());
            }
            // The handler block shares the parameter scope.
            let bm = self.mark();
            self.advance()?;
            let inner = ctx.enter_block();
            let mut body = Vec::new();
            while !self.current.is_punct(Punct::RBrace) {
                body.push(self.parse_statement_list_item(inner)?);
            }
            self.advance()?; // }
            self.exit_scope();
            Some(estree::CatchClause {
                param,
                body: BlockStatement { body, pos: self.finish(bm) },
                pos: self.finish(cm),
            })
        } else {
            None
        };
        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            if !self.current.is_punct(Punct::LBrace) {
                return Err(self.unexpected());
            }
            Some(self.parse_block_statement(ctx)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error(ErrorKind::Syntax, "Missing catch or finally after try"));
        }
        Ok(Statement::Try(Box::new(TryStatement {
            block,
            handler,
            finalizer,
            pos: self.finish(m),
        })))
    }

    fn parse_labeled_statement(&mut self, ctx: Context) -> Result<Statement, ParseError> {
        // Collect the full label run first so every label on a loop
        // counts as an iteration label for `continue`.
        let mut labels: Vec<Token> = Vec::new();
        loop {
            let (name, escaped) = match &self.current.kind {
                TokenKind::Ident { name, escaped } => (name.clone(), *escaped),
                _ => break,
            };
            if !self.peek_next()?.is_punct(Punct::Colon) {
                break;
            }
            self.check_word_usable(&name, escaped, ctx)?;
            labels.push(self.current.clone());
            self.advance()?; // label
            self.advance()?; // :
        }
        let is_iteration = matches!(
            self.current.kind,
            TokenKind::Keyword(Keyword::While)
                | TokenKind::Keyword(Keyword::Do)
                | TokenKind::Keyword(Keyword::For)
        );
        for token in &labels {
            let TokenKind::Ident { name, .. } = &token.kind else { continue };
            self.push_label(name.clone(), is_iteration)?;
        }
        let mut body = self.parse_statement(ctx)?;
        for token in labels.iter().rev() {
            self.pop_label();
            let TokenKind::Ident { name, .. } = &token.kind else { continue };
            body = Statement::Labeled(Box::new(LabeledStatement {
                label: Identifier {
                    name: name.clone(),
                    pos: self.token_node_pos(token),
                },
                body: Box::new(body),
                pos: self.finish(super::Parser::marker_of(token)),
            }));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Options};
    use estree::{ForTarget, Statement};

    fn stmts(source: &str) -> Vec<Statement> {
        parse_script(source, &Options::default()).expect("parses").body
    }

    #[test]
    fn if_else_chain() {
        let body = stmts("if (a) b; else if (c) d; else e;");
        assert!(matches!(&body[0], Statement::If(_)));
    }

    #[test]
    fn block_introduces_scope() {
        assert!(parse_script("let x; { let x; }", &Options::default()).is_ok());
        assert!(parse_script("let x; let x;", &Options::default()).is_err());
        assert!(parse_script("{ var x; let x; }", &Options::default()).is_err());
        assert!(parse_script("let x; { var x; }", &Options::default()).is_err());
    }

    #[test]
    fn for_forms() {
        let body = stmts("for (var i = 0; i < 3; i++) ;");
        assert!(matches!(&body[0], Statement::For(_)));
        let body = stmts("for (const k in obj) ;");
        match &body[0] {
            Statement::ForIn(stmt) => assert!(matches!(stmt.left, ForTarget::Declaration(_))),
            other => panic!("unexpected {other:?}"),
        }
        let body = stmts("for (x of xs) ;");
        match &body[0] {
            Statement::ForOf(stmt) => assert!(matches!(stmt.left, ForTarget::Pattern(_))),
            other => panic!("unexpected {other:?}"),
        }
        let body = stmts("for ([a, b] of pairs) ;");
        match &body[0] {
            Statement::ForOf(stmt) => assert!(matches!(stmt.left, ForTarget::Pattern(_))),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn for_head_restrictions() {
        assert!(parse_script("for (let x = 1 of xs) ;", &Options::default()).is_err());
        assert!(parse_script("for (const x;;) ;", &Options::default()).is_err());
        assert!(parse_script("for (let x, y of xs) ;", &Options::default()).is_err());
        assert!(parse_script("for (async of xs) ;", &Options::default()).is_err());
        assert!(parse_script("for (a() of xs) ;", &Options::default()).is_err());
    }

    #[test]
    fn for_await_requires_async_and_of() {
        assert!(
            parse_script("async function f() { for await (const x of xs) ; }", &Options::default())
                .is_ok()
        );
        assert!(
            parse_script("async function f() { for await (const k in o) ; }", &Options::default())
                .is_err()
        );
        assert!(parse_script("function f() { for await (const x of xs) ; }", &Options::default())
            .is_err());
    }

    #[test]
    fn in_operator_allowed_outside_for_head() {
        assert!(parse_script("for (var a = 'x' in o; false; ) ;", &Options::default()).is_err());
        assert!(parse_script("if ('x' in o) ;", &Options::default()).is_ok());
        assert!(parse_script("for (var i = ('x' in o);;) ;", &Options::default()).is_ok());
    }

    #[test]
    fn break_continue_label_checks() {
        assert!(parse_script("outer: while (a) { continue outer; }", &Options::default()).is_ok());
        assert!(parse_script("outer: { break outer; }", &Options::default()).is_ok());
        assert!(parse_script("outer: { continue outer; }", &Options::default()).is_err());
        assert!(parse_script("while (a) { continue missing; }", &Options::default()).is_err());
        assert!(parse_script("continue;", &Options::default()).is_err());
        assert!(parse_script("break;", &Options::default()).is_err());
        assert!(parse_script("switch (a) { case 1: break; }", &Options::default()).is_ok());
    }

    #[test]
    fn labels_do_not_cross_functions() {
        assert!(parse_script(
            "outer: while (a) { function f() { break outer; } }",
            &Options::default()
        )
        .is_err());
    }

    #[test]
    fn duplicate_label_is_rejected() {
        assert!(parse_script("a: a: ;", &Options::default()).is_err());
        assert!(parse_script("a: while (x) { a: ; }", &Options::default()).is_err());
    }

    #[test]
    fn labeled_loop_run_marks_all_labels() {
        assert!(
            parse_script("a: b: while (x) { continue a; continue b; }", &Options::default())
                .is_ok()
        );
    }

    #[test]
    fn return_only_inside_functions() {
        assert!(parse_script("return 1;", &Options::default()).is_err());
        assert!(parse_script("function f() { return 1; }", &Options::default()).is_ok());
        let global = Options { global_return: true, ..Options::default() };
        assert!(parse_script("return 1;", &global).is_ok());
    }

    #[test]
    fn return_respects_asi() {
        let body = stmts("function f() { return\n1; }");
        match &body[0] {
            Statement::FunctionDeclaration(func) => {
                match &func.body.body[0] {
                    Statement::Return(ret) => assert!(ret.argument.is_none()),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn throw_requires_same_line_argument() {
        assert!(parse_script("throw\nnew Error()", &Options::default()).is_err());
        assert!(parse_script("throw new Error()", &Options::default()).is_ok());
    }

    #[test]
    fn with_banned_in_strict_mode() {
        assert!(parse_script("with (o) x;", &Options::default()).is_ok());
        assert!(parse_script("'use strict'; with (o) x;", &Options::default()).is_err());
    }

    #[test]
    fn switch_allows_single_default() {
        assert!(
            parse_script("switch (a) { default: ; default: ; }", &Options::default()).is_err()
        );
        assert!(parse_script(
            "switch (a) { case 1: let x; break; case 2: let y; break; }",
            &Options::default()
        )
        .is_ok());
        assert!(parse_script(
            "switch (a) { case 1: let x; break; case 2: let x; break; }",
            &Options::default()
        )
        .is_err());
    }

    #[test]
    fn try_forms() {
        assert!(parse_script("try { a; } catch (e) { b; }", &Options::default()).is_ok());
        assert!(parse_script("try { a; } catch { b; }", &Options::default()).is_ok());
        assert!(parse_script("try { a; } finally { b; }", &Options::default()).is_ok());
        assert!(parse_script("try { a; }", &Options::default()).is_err());
        assert!(
            parse_script("try { a; } catch ([e, f]) { b; }", &Options::default()).is_ok()
        );
        assert!(parse_script("try {} catch (e) { let e; }", &Options::default()).is_err());
    }

    #[test]
    fn let_as_identifier_in_sloppy_code() {
        assert!(parse_script("let = 1;", &Options::default()).is_ok());
        assert!(parse_script("let(x);", &Options::default()).is_ok());
        assert!(parse_script("'use strict'; let = 1;", &Options::default()).is_err());
    }

    #[test]
    fn function_declaration_needs_list_position() {
        assert!(parse_script("if (a) function f() {}", &Options::default()).is_err());
        assert!(parse_script("if (a) { function f() {} }", &Options::default()).is_ok());
    }
}
