//! Recursive-descent parser core.
//!
//! The submodules carry the grammar: expressions (with the
//! cover-grammar machinery), statements, declarations and modules, the
//! expression-to-pattern rewrite, and JSX. This module owns the parser
//! state and the plumbing every stage shares: token buffering with
//! rescan checkpoints, node position assembly, automatic semicolon
//! insertion, the directive prologue, block scoping for redeclaration
//! errors, and the nesting-depth guard.

mod declarations;
mod expressions;
mod jsx;
mod pattern;
mod statements;

use std::collections::HashSet;

use estree::{
    ErrorKind, Expression, ExpressionStatement, Identifier, LiteralValue, NodePos, ParseError,
    Position, Program, SourceLocation, SourceType, Statement,
};

use crate::context::{classify, Context, WordKind};
use crate::lexer::{is_keyword_text, Checkpoint, Keyword, Lexer, Punct, Token, TokenKind};
use crate::Options;

pub(crate) use pattern::PatternKind;

/// Start position of a node under construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Marker {
    offset: u32,
    line: u32,
    column: u32,
}

// One lexical scope for redeclaration checks. `vars` holds var-declared
// names hoisted through this scope; `params` holds formal parameter
// names, which tolerate `var` but not `let` redeclaration.
struct Scope {
    lexical: HashSet<String>,
    vars: HashSet<String>,
    params: HashSet<String>,
    is_function: bool,
}

impl Scope {
    fn new(is_function: bool) -> Self {
        Scope {
            lexical: HashSet::new(),
            vars: HashSet::new(),
            params: HashSet::new(),
            is_function,
        }
    }
}

/// Single-pass parser over a token stream.
pub(crate) struct Parser<'a> {
    pub(crate) lexer: Lexer<'a>,
    pub(crate) options: &'a Options,
    source_len: u32,
    /// The one-token lookahead.
    pub(crate) current: Token,
    /// Lexer state immediately before `current`, for rescans.
    pub(crate) before_current: Checkpoint,
    // End of the previous token, for node end positions.
    prev_end: u32,
    prev_end_line: u32,
    prev_end_column: u32,
    depth: u32,
    scopes: Vec<Scope>,
    // (name, targets an iteration statement)
    labels: Vec<(String, bool)>,
    exported: HashSet<String>,
    /// Deferred error for cover-grammar constructs (`{a = 1}` shorthand
    /// defaults, duplicate `__proto__`) that are only legal if the
    /// subtree is later rewritten into a pattern. Cleared by the
    /// rewrite, raised at the next sequence point otherwise.
    pub(crate) cover_init_error: Option<ParseError>,
    /// Start offset of the expression most recently returned from a
    /// parenthesized cover, used to reject `({a}) = b`.
    pub(crate) paren_expr_start: Option<u32>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: &'a Options) -> Self {
        let lexer = Lexer::new(source);
        let before = lexer.checkpoint();
        // A placeholder until the first advance.
        let eof = Token {
            kind: TokenKind::Eof,
            start: 0,
            end: 0,
            line: 1,
            column: 0,
            end_line: 1,
            end_column: 0,
            newline_before: false,
            octal: false,
        };
        Parser {
            lexer,
            options,
            source_len: source.len() as u32,
            current: eof,
            before_current: before,
            prev_end: 0,
            prev_end_line: 1,
            prev_end_column: 0,
            depth: 0,
            scopes: Vec::new(),
            labels: Vec::new(),
            exported: HashSet::new(),
            cover_init_error: None,
            paren_expr_start: None,
        }
    }

    /// Parse a whole program under the configured goal symbol.
    pub(crate) fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut ctx = Context::TOP_LEVEL;
        if self.options.module {
            ctx |= Context::MODULE | Context::STRICT;
        }
        if self.options.implied_strict {
            ctx |= Context::STRICT;
        }
        if self.options.global_return {
            ctx |= Context::ALLOW_RETURN;
        }
        self.enter_scope(true);
        self.advance()?;
        let (mut body, _) = self.parse_directive_prologue(&mut ctx, true)?;
        while !self.current.is_eof() {
            body.push(self.parse_statement_list_item(ctx)?);
        }
        let mut pos = NodePos::default();
        if self.options.ranges {
            pos.start = Some(0);
            pos.end = Some(self.source_len);
        }
        if self.options.loc {
            pos.loc = Some(SourceLocation {
                start: Position { line: 1, column: 0 },
                end: Position { line: self.current.line, column: self.current.column },
                source: self.options.source.clone(),
            });
        }
        Ok(Program {
            body,
            source_type: if self.options.module {
                SourceType::Module
            } else {
                SourceType::Script
            },
            pos,
        })
    }

    // -----------------------------------------------------------------
    // Token plumbing
    // -----------------------------------------------------------------

    /// Step to the next token, returning the one just left behind.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        self.prev_end = self.current.end;
        self.prev_end_line = self.current.end_line;
        self.prev_end_column = self.current.end_column;
        let cp = self.lexer.checkpoint();
        let next = self.lexer.next_token()?;
        self.before_current = cp;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Replace `current` with a rescanned token. The lexer must have
    /// been advanced past the replacement by the rescan itself.
    pub(crate) fn replace_current(&mut self, token: Token) {
        self.current = token;
    }

    /// Scan one token past `current` without consuming anything.
    pub(crate) fn peek_next(&mut self) -> Result<Token, ParseError> {
        let cp = self.lexer.checkpoint();
        let token = self.lexer.next_token();
        self.lexer.restore(cp);
        token
    }

    /// Scan two tokens past `current` without consuming anything.
    pub(crate) fn peek_two(&mut self) -> Result<(Token, Token), ParseError> {
        let cp = self.lexer.checkpoint();
        let first = self.lexer.next_token();
        let second = first.as_ref().ok().map(|_| self.lexer.next_token());
        self.lexer.restore(cp);
        let first = first?;
        match second {
            Some(second) => Ok((first, second?)),
            None => Err(self.unexpected()),
        }
    }

    pub(crate) fn eat_punct(&mut self, p: Punct) -> Result<bool, ParseError> {
        if self.current.is_punct(p) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_punct(&mut self, p: Punct) -> Result<(), ParseError> {
        if self.current.is_punct(p) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    pub(crate) fn eat_keyword(&mut self, kw: Keyword) -> Result<bool, ParseError> {
        if self.current.is_keyword(kw) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_keyword(&mut self, kw: Keyword) -> Result<(), ParseError> {
        if self.current.is_keyword(kw) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume a contextual word written without escapes.
    pub(crate) fn eat_contextual(&mut self, word: &str) -> Result<bool, ParseError> {
        if self.current.is_ident(word) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_contextual(&mut self, word: &str) -> Result<(), ParseError> {
        if self.eat_contextual(word)? {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    // -----------------------------------------------------------------
    // Positions
    // -----------------------------------------------------------------

    /// Marker at the start of the current token.
    pub(crate) fn mark(&self) -> Marker {
        Marker {
            offset: self.current.start,
            line: self.current.line,
            column: self.current.column,
        }
    }

    /// Marker from a token that has already been consumed.
    pub(crate) fn marker_of(token: &Token) -> Marker {
        Marker { offset: token.start, line: token.line, column: token.column }
    }

    /// Node position running from `m` to the end of the previous token.
    pub(crate) fn finish(&self, m: Marker) -> NodePos {
        let mut pos = NodePos::default();
        if self.options.ranges {
            pos.start = Some(m.offset);
            pos.end = Some(self.prev_end);
        }
        if self.options.loc {
            pos.loc = Some(SourceLocation {
                start: Position { line: m.line, column: m.column },
                end: Position { line: self.prev_end_line, column: self.prev_end_column },
                source: self.options.source.clone(),
            });
        }
        pos
    }

    // -----------------------------------------------------------------
    // Errors
    // -----------------------------------------------------------------

    pub(crate) fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line: self.current.line,
            column: self.current.column,
            offset: self.current.start,
        }
    }

    pub(crate) fn error_at_token(
        &self,
        token: &Token,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line: token.line,
            column: token.column,
            offset: token.start,
        }
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        if self.current.is_eof() {
            self.error(ErrorKind::Syntax, "Unexpected end of input")
        } else {
            self.error(
                ErrorKind::Syntax,
                format!("Unexpected {}", self.current.kind.describe()),
            )
        }
    }

    /// Raise the pending cover-grammar error, if any. Called at the
    /// sequence points where a pattern rewrite can no longer happen.
    pub(crate) fn check_cover_init(&mut self) -> Result<(), ParseError> {
        match self.cover_init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Run `f` one grammar level deeper, rejecting pathological nesting.
    pub(crate) fn with_depth<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(
                ErrorKind::DepthExceeded,
                format!("Maximum parse depth of {} exceeded", self.options.max_depth),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // -----------------------------------------------------------------
    // Automatic semicolon insertion
    // -----------------------------------------------------------------

    /// Consume a statement terminator: an explicit `;`, or a virtual
    /// one before `}`, at end of input, or after a line break.
    pub(crate) fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.current.is_punct(Punct::Semicolon) {
            self.advance()?;
            return Ok(());
        }
        if self.current.is_punct(Punct::RBrace)
            || self.current.is_eof()
            || self.current.newline_before
        {
            return Ok(());
        }
        Err(self.unexpected())
    }

    // -----------------------------------------------------------------
    // Directive prologue
    // -----------------------------------------------------------------

    /// Parse the run of leading string-literal statements. A
    /// `"use strict"` directive flips `ctx` to strict, which also
    /// retroactively outlaws octal escapes in earlier directives and
    /// requires a simple parameter list on the enclosing function.
    /// Returns the parsed statements and whether strictness was newly
    /// introduced here.
    pub(crate) fn parse_directive_prologue(
        &mut self,
        ctx: &mut Context,
        simple_params: bool,
    ) -> Result<(Vec<Statement>, bool), ParseError> {
        let mut stmts = Vec::new();
        let mut octal_directives: Vec<Token> = Vec::new();
        let mut became_strict = false;
        loop {
            if !matches!(self.current.kind, TokenKind::Str(_)) {
                break;
            }
            let token = self.current.clone();
            let m = self.mark();
            let expr = self.parse_expression(*ctx)?;
            let is_directive = self.prev_end == token.end
                && matches!(
                    &expr,
                    Expression::Literal(lit) if matches!(lit.value, LiteralValue::String(_))
                );
            if !is_directive {
                self.check_cover_init()?;
                self.consume_semicolon()?;
                stmts.push(Statement::Expression(ExpressionStatement {
                    expression: Box::new(expr),
                    directive: None,
                    pos: self.finish(m),
                }));
                return Ok((stmts, became_strict));
            }
            self.consume_semicolon()?;
            let raw = self.lexer.raw_slice(token.start, token.end);
            let directive = raw[1..raw.len() - 1].to_string();
            if token.octal {
                octal_directives.push(token.clone());
            }
            if directive == "use strict" {
                if !simple_params {
                    return Err(self.error_at_token(
                        &token,
                        ErrorKind::EarlyError,
                        "Illegal 'use strict' directive in function with non-simple parameter list",
                    ));
                }
                if !ctx.contains(Context::STRICT) {
                    became_strict = true;
                }
                *ctx |= Context::STRICT;
            }
            stmts.push(Statement::Expression(ExpressionStatement {
                expression: Box::new(expr),
                directive: Some(directive),
                pos: self.finish(m),
            }));
        }
        if ctx.contains(Context::STRICT) {
            if let Some(token) = octal_directives.first() {
                return Err(self.error_at_token(
                    token,
                    ErrorKind::EarlyError,
                    "Octal literals are not allowed in strict mode.",
                ));
            }
        }
        Ok((stmts, became_strict))
    }

    // -----------------------------------------------------------------
    // Identifiers
    // -----------------------------------------------------------------

    /// IdentifierReference: a context-checked identifier use.
    pub(crate) fn parse_identifier_reference(
        &mut self,
        ctx: Context,
    ) -> Result<Identifier, ParseError> {
        let m = self.mark();
        let (name, escaped) = match &self.current.kind {
            TokenKind::Ident { name, escaped } => (name.clone(), *escaped),
            _ => return Err(self.unexpected()),
        };
        self.check_word_usable(&name, escaped, ctx)?;
        self.advance()?;
        Ok(Identifier { name, pos: self.finish(m) })
    }

    /// IdentifierName: member names and property keys, where reserved
    /// words are plain names.
    pub(crate) fn parse_identifier_name(&mut self) -> Result<Identifier, ParseError> {
        let m = self.mark();
        let name = match &self.current.kind {
            TokenKind::Ident { name, .. } => name.clone(),
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            _ => return Err(self.unexpected()),
        };
        self.advance()?;
        Ok(Identifier { name, pos: self.finish(m) })
    }

    /// Rejects reserved words and escaped keywords at identifier
    /// positions.
    pub(crate) fn check_word_usable(
        &self,
        name: &str,
        escaped: bool,
        ctx: Context,
    ) -> Result<(), ParseError> {
        if escaped && (is_keyword_text(name) || classify(name, ctx) != WordKind::Ordinary) {
            return Err(self.error(
                ErrorKind::EarlyError,
                "Keyword must not contain escaped characters",
            ));
        }
        if classify(name, ctx) == WordKind::Reserved {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("Unexpected reserved word `{name}`"),
            ));
        }
        Ok(())
    }

    /// Shared binding-name validation for declarations, parameters and
    /// the pattern rewrite.
    pub(crate) fn validate_binding_name(
        &self,
        name: &str,
        ctx: Context,
        kind: PatternKind,
    ) -> Result<(), ParseError> {
        if classify(name, ctx) == WordKind::Reserved {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("Unexpected reserved word `{name}`"),
            ));
        }
        if ctx.contains(Context::STRICT) && matches!(name, "eval" | "arguments") {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("`{name}` can not be assigned in strict mode"),
            ));
        }
        if kind == PatternKind::Lexical && name == "let" {
            return Err(self.error(
                ErrorKind::EarlyError,
                "`let` is disallowed as a lexically bound name",
            ));
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Scopes and labels
    // -----------------------------------------------------------------

    pub(crate) fn enter_scope(&mut self, is_function: bool) {
        self.scopes.push(Scope::new(is_function));
    }

    pub(crate) fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    /// Whether the innermost scope is a function (or program) scope,
    /// where function declarations bind like `var`.
    pub(crate) fn in_function_scope(&self) -> bool {
        self.scopes.last().is_some_and(|scope| scope.is_function)
    }

    /// Record a `let`/`const`/class/import binding in the innermost
    /// scope, rejecting redeclaration.
    pub(crate) fn declare_lexical(&mut self, name: &str) -> Result<(), ParseError> {
        let clash = match self.scopes.last() {
            Some(scope) => {
                scope.lexical.contains(name)
                    || scope.vars.contains(name)
                    || scope.params.contains(name)
            }
            None => false,
        };
        if clash {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("Identifier '{name}' has already been declared"),
            ));
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.lexical.insert(name.to_string());
        }
        Ok(())
    }

    /// Record a `var` binding, hoisting it to the innermost function
    /// scope and rejecting collisions with lexical names on the way.
    pub(crate) fn declare_var(&mut self, name: &str) -> Result<(), ParseError> {
        let mut func_idx = 0;
        let mut clash = false;
        for (i, scope) in self.scopes.iter().enumerate().rev() {
            if scope.lexical.contains(name) {
                clash = true;
                break;
            }
            if scope.is_function {
                func_idx = i;
                break;
            }
        }
        if clash {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("Identifier '{name}' has already been declared"),
            ));
        }
        for scope in self.scopes.iter_mut().skip(func_idx) {
            scope.vars.insert(name.to_string());
        }
        Ok(())
    }

    /// Record a formal parameter name in the innermost scope.
    pub(crate) fn declare_param(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.params.insert(name.to_string());
        }
    }

    pub(crate) fn push_label(&mut self, name: String, is_iteration: bool) -> Result<(), ParseError> {
        if self.labels.iter().any(|(n, _)| n == &name) {
            return Err(self.error(
                ErrorKind::EarlyError,
                format!("Label '{name}' has already been declared"),
            ));
        }
        self.labels.push((name, is_iteration));
        Ok(())
    }

    pub(crate) fn pop_label(&mut self) {
        self.labels.pop();
    }

    /// Look up a label; returns whether it marks an iteration statement.
    pub(crate) fn find_label(&self, name: &str) -> Option<bool> {
        self.labels
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, iter)| *iter)
    }

    /// Labels do not cross function boundaries.
    pub(crate) fn take_labels(&mut self) -> Vec<(String, bool)> {
        std::mem::take(&mut self.labels)
    }

    pub(crate) fn restore_labels(&mut self, labels: Vec<(String, bool)>) {
        self.labels = labels;
    }

    /// Record an exported name, rejecting duplicates across the module.
    pub(crate) fn add_export(&mut self, name: &str, token: &Token) -> Result<(), ParseError> {
        if !self.exported.insert(name.to_string()) {
            return Err(self.error_at_token(
                token,
                ErrorKind::EarlyError,
                format!("Duplicate export of '{name}'"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_script, Options};

    #[test]
    fn asi_inserts_at_newline_and_eof() {
        let program = parse_script("a = 1\nb = 2", &Options::default()).unwrap();
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn asi_does_not_split_without_newline() {
        assert!(parse_script("a = 1 b = 2", &Options::default()).is_err());
    }

    #[test]
    fn directive_prologue_is_marked() {
        let program =
            parse_script("'use strict';\n'other';\nx;", &Options::default()).unwrap();
        match &program.body[0] {
            estree::Statement::Expression(stmt) => {
                assert_eq!(stmt.directive.as_deref(), Some("use strict"));
            }
            other => panic!("unexpected {other:?}"),
        }
        match &program.body[2] {
            estree::Statement::Expression(stmt) => assert!(stmt.directive.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn directive_lookalike_is_not_a_directive() {
        // The string participates in a larger expression.
        let program = parse_script("'use strict' + 1; 0755;", &Options::default()).unwrap();
        match &program.body[0] {
            estree::Statement::Expression(stmt) => assert!(stmt.directive.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn late_strict_directive_rejects_earlier_octal_escape() {
        assert!(parse_script("'\\101'; 'use strict';", &Options::default()).is_err());
    }

    #[test]
    fn depth_limit_is_reported() {
        let source = format!("{}x{}", "(".repeat(64), ")".repeat(64));
        let options = Options { max_depth: 16, ..Options::default() };
        let err = parse_script(&source, &options).unwrap_err();
        assert_eq!(err.kind, estree::ErrorKind::DepthExceeded);
        // The same source parses with the default limit.
        assert!(parse_script(&source, &Options::default()).is_ok());
    }
}
