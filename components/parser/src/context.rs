//! Parsing context flags and context-sensitive word classification.
//!
//! The parser never mutates shared state to track where it is in the
//! grammar. Instead every parse method receives a [`Context`] by value
//! and derives a new one when it crosses a boundary such as a function
//! body, a loop, or a class. Backtracking therefore never has to undo
//! context changes.

use bitflags::bitflags;

bitflags! {
    /// Immutable grammar-context bitmask threaded through the parser.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Context: u32 {
        /// Strict mode code (module, "use strict", or class body).
        const STRICT = 1 << 0;
        /// Parsing with the Module goal symbol.
        const MODULE = 1 << 1;
        /// Inside a function body of any kind.
        const IN_FUNCTION = 1 << 2;
        /// Inside a generator function, so `yield` is an operator.
        const IN_GENERATOR = 1 << 3;
        /// Inside an async function, so `await` is an operator.
        const IN_ASYNC = 1 << 4;
        /// Inside a formal parameter list.
        const IN_PARAMS = 1 << 5;
        /// Inside an iteration statement body.
        const IN_ITERATION = 1 << 6;
        /// Inside a switch case list.
        const IN_SWITCH = 1 << 7;
        /// The `in` operator is not a relational operator here
        /// (for-statement head before the first semicolon).
        const NO_IN = 1 << 8;
        /// `return` is legal (function bodies, or scripts with the
        /// global-return option).
        const ALLOW_RETURN = 1 << 9;
        /// `super.x` / `super[x]` is legal (method bodies).
        const SUPER_PROPERTY = 1 << 10;
        /// `super(...)` is legal (derived class constructors).
        const SUPER_CALL = 1 << 11;
        /// Inside a class body, so private names may be referenced.
        const IN_CLASS = 1 << 12;
        /// Inside a class static initialization block.
        const IN_STATIC_BLOCK = 1 << 13;
        /// Statement position is the top level of the program, where
        /// import and export declarations may appear.
        const TOP_LEVEL = 1 << 14;
        /// Inside a class field initializer, where `arguments` is
        /// banned.
        const IN_FIELD_INIT = 1 << 15;
    }
}

impl Context {
    /// Context for the body of an ordinary (non-arrow) function.
    ///
    /// Only strictness and the module goal survive the boundary. The
    /// `super` permissions are granted separately by the method parser.
    pub fn enter_function(self, is_async: bool, is_generator: bool) -> Context {
        // Private-name visibility is lexical, so IN_CLASS survives into
        // nested functions.
        let mut ctx = self & (Context::STRICT | Context::MODULE | Context::IN_CLASS);
        ctx |= Context::IN_FUNCTION | Context::ALLOW_RETURN;
        if is_async {
            ctx |= Context::IN_ASYNC;
        }
        if is_generator {
            ctx |= Context::IN_GENERATOR;
        }
        ctx
    }

    /// Context for an arrow function body. Arrows are transparent to
    /// `super`, and to the enclosing function for `new.target`, but
    /// reset iteration and labels like any function.
    pub fn enter_arrow(self, is_async: bool) -> Context {
        let mut ctx = self
            & (Context::STRICT
                | Context::MODULE
                | Context::IN_FUNCTION
                | Context::SUPER_PROPERTY
                | Context::SUPER_CALL
                | Context::IN_CLASS
                | Context::IN_STATIC_BLOCK
                | Context::IN_FIELD_INIT);
        ctx |= Context::IN_FUNCTION | Context::ALLOW_RETURN;
        if is_async {
            ctx |= Context::IN_ASYNC;
        }
        ctx
    }

    /// Context for an iteration statement body.
    pub fn enter_iteration(self) -> Context {
        (self | Context::IN_ITERATION) & !Context::TOP_LEVEL
    }

    /// Context for a switch case list.
    pub fn enter_switch(self) -> Context {
        (self | Context::IN_SWITCH) & !Context::TOP_LEVEL
    }

    /// Context for any nested statement list that is not the program
    /// top level.
    pub fn enter_block(self) -> Context {
        self & !Context::TOP_LEVEL
    }

    /// Context for a class body. Class bodies are always strict.
    pub fn enter_class(self) -> Context {
        self | Context::STRICT | Context::IN_CLASS
    }

    /// Context for a class static initialization block body.
    pub fn enter_static_block(self) -> Context {
        let mut ctx = self.enter_function(false, false);
        ctx &= !(Context::ALLOW_RETURN | Context::IN_ASYNC | Context::IN_GENERATOR);
        ctx |= Context::IN_STATIC_BLOCK | Context::SUPER_PROPERTY | Context::IN_CLASS;
        ctx
    }

    /// Whether `await` is an operator rather than an identifier here.
    pub fn await_is_keyword(self) -> bool {
        self.contains(Context::IN_ASYNC)
            || self.contains(Context::IN_STATIC_BLOCK)
            || (self.contains(Context::MODULE) && !self.contains(Context::IN_FUNCTION))
    }

    /// Whether `yield` is an operator rather than an identifier here.
    pub fn yield_is_keyword(self) -> bool {
        self.contains(Context::IN_GENERATOR)
    }
}

/// How a word behaves at an identifier position under a given context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordKind {
    /// An ordinary identifier.
    Ordinary,
    /// Reserved here; using it as an identifier is a syntax error.
    Reserved,
    /// An identifier here, but one the parser gives special meaning to
    /// when the surrounding tokens call for it (`async`, `of`, `get`).
    Contextual,
}

/// Classify a non-keyword word at an identifier position.
///
/// The lexer only reserves the words that are keywords under every
/// context. Everything context-sensitive funnels through this single
/// pure function so that the rules live in one place.
pub fn classify(word: &str, ctx: Context) -> WordKind {
    match word {
        "implements" | "interface" | "package" | "private" | "protected" | "public" => {
            if ctx.contains(Context::STRICT) {
                WordKind::Reserved
            } else {
                WordKind::Ordinary
            }
        }
        "let" | "static" => {
            if ctx.contains(Context::STRICT) {
                WordKind::Reserved
            } else {
                WordKind::Contextual
            }
        }
        "yield" => {
            if ctx.yield_is_keyword() || ctx.contains(Context::STRICT) {
                WordKind::Reserved
            } else {
                WordKind::Contextual
            }
        }
        "await" => {
            if ctx.await_is_keyword() || ctx.contains(Context::MODULE) {
                WordKind::Reserved
            } else {
                WordKind::Contextual
            }
        }
        "async" | "of" | "get" | "set" | "as" | "from" | "target" | "meta" => {
            WordKind::Contextual
        }
        _ => WordKind::Ordinary,
    }
}
