//! Hand-written ECMAScript scanner.
//!
//! The lexer produces one token at a time and keeps no lookahead of its
//! own. Context-sensitive token boundaries (regular expressions, the
//! continuation of a template after `}`, JSX text) cannot be decided
//! here, so the parser takes a [`Checkpoint`] before each token and
//! asks for a rescan when the grammar calls for a different
//! interpretation of the same characters.

use estree::{ErrorKind, ParseError};
use num_bigint::BigInt;

/// Template token position within its literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplatePart {
    /// `` `...` `` with no substitutions.
    Complete,
    /// `` `...${ ``
    Head,
    /// `}...${`
    Middle,
    /// `` }...` ``
    Tail,
}

/// Reserved words that are keywords under every parsing context.
///
/// Context-sensitive words (`let`, `async`, `await`, `yield`, `of`,
/// `static`, ...) are lexed as identifiers and classified by the
/// parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Keyword {
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    False,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    New,
    Null,
    Return,
    Super,
    Switch,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
}

/// Whether `word` spells an unconditionally reserved keyword.
pub(crate) fn is_keyword_text(word: &str) -> bool {
    keyword_from_str(word).is_some()
}

fn keyword_from_str(word: &str) -> Option<Keyword> {
    Some(match word {
        "break" => Keyword::Break,
        "case" => Keyword::Case,
        "catch" => Keyword::Catch,
        "class" => Keyword::Class,
        "const" => Keyword::Const,
        "continue" => Keyword::Continue,
        "debugger" => Keyword::Debugger,
        "default" => Keyword::Default,
        "delete" => Keyword::Delete,
        "do" => Keyword::Do,
        "else" => Keyword::Else,
        "enum" => Keyword::Enum,
        "export" => Keyword::Export,
        "extends" => Keyword::Extends,
        "false" => Keyword::False,
        "finally" => Keyword::Finally,
        "for" => Keyword::For,
        "function" => Keyword::Function,
        "if" => Keyword::If,
        "import" => Keyword::Import,
        "in" => Keyword::In,
        "instanceof" => Keyword::Instanceof,
        "new" => Keyword::New,
        "null" => Keyword::Null,
        "return" => Keyword::Return,
        "super" => Keyword::Super,
        "switch" => Keyword::Switch,
        "this" => Keyword::This,
        "throw" => Keyword::Throw,
        "true" => Keyword::True,
        "try" => Keyword::Try,
        "typeof" => Keyword::Typeof,
        "var" => Keyword::Var,
        "void" => Keyword::Void,
        "while" => Keyword::While,
        "with" => Keyword::With,
        _ => return None,
    })
}

impl Keyword {
    /// Source spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
        }
    }
}

/// Punctuators and operators, lexed with maximal munch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Punct {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
    Ellipsis,
    Arrow,
    Question,
    QuestionDot,
    Nullish,
    NullishAssign,
    Colon,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Shl,
    Shr,
    UShr,
    Assign,
    Eq,
    StrictEq,
    NotEq,
    StrictNotEq,
    PlusAssign,
    MinusAssign,
    StarAssign,
    StarStarAssign,
    SlashAssign,
    PercentAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Not,
    AndAnd,
    OrOr,
    AndAndAssign,
    OrOrAssign,
    AmpAssign,
    PipeAssign,
    CaretAssign,
}

/// Lexed token payload.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Identifier or context-sensitive word.
    Ident {
        /// Cooked identifier text.
        name: String,
        /// At least one character was written as a unicode escape.
        escaped: bool,
    },
    /// `#name` private identifier (without the `#`).
    PrivateIdent(String),
    /// Unconditionally reserved word.
    Keyword(Keyword),
    /// Numeric literal value.
    Number(f64),
    /// BigInt literal, canonical decimal digits without the `n`.
    BigInt(String),
    /// String literal cooked value.
    Str(String),
    /// One span of a template literal.
    Template {
        /// Cooked value, `None` when an escape sequence is invalid.
        cooked: Option<String>,
        /// Raw characters between the delimiters, CR and CRLF
        /// normalized to LF.
        raw: String,
        /// Position of this span within the literal.
        part: TemplatePart,
    },
    /// Regular expression literal, produced only by rescan.
    Regex {
        /// Pattern between the slashes.
        pattern: String,
        /// Flag characters after the closing slash.
        flags: String,
    },
    /// Raw JSX text run, produced only by rescan.
    JsxText(String),
    /// Punctuator or operator.
    Punct(Punct),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident { name, .. } => format!("identifier `{name}`"),
            TokenKind::PrivateIdent(name) => format!("private name `#{name}`"),
            TokenKind::Keyword(kw) => format!("keyword `{}`", kw.as_str()),
            TokenKind::Number(_) => "number".to_string(),
            TokenKind::BigInt(_) => "bigint".to_string(),
            TokenKind::Str(_) => "string".to_string(),
            TokenKind::Template { .. } => "template".to_string(),
            TokenKind::Regex { .. } => "regular expression".to_string(),
            TokenKind::JsxText(_) => "JSX text".to_string(),
            TokenKind::Punct(_) => "punctuator".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A scanned token with its source extent.
#[derive(Clone, Debug)]
pub struct Token {
    /// Payload.
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub start: u32,
    /// Byte offset one past the last character.
    pub end: u32,
    /// 1-based line of the first character.
    pub line: u32,
    /// 0-based column of the first character.
    pub column: u32,
    /// 1-based line one past the token.
    pub end_line: u32,
    /// 0-based column one past the token.
    pub end_column: u32,
    /// A line terminator appeared between the previous token and this
    /// one. Drives automatic semicolon insertion.
    pub newline_before: bool,
    /// Legacy octal numeric literal, or an octal / `\8` / `\9` escape
    /// in a string. Rejected retroactively in strict mode code.
    pub octal: bool,
}

impl Token {
    /// Whether this token is the given punctuator.
    pub fn is_punct(&self, p: Punct) -> bool {
        matches!(self.kind, TokenKind::Punct(q) if q == p)
    }

    /// Whether this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self.kind, TokenKind::Keyword(k) if k == kw)
    }

    /// Whether this token is an unescaped identifier equal to `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident { name: n, escaped: false } if n == name)
    }

    /// End of input marker.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

/// Restorable scanner position, taken before a token is scanned.
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    pos: usize,
    line: u32,
    column: u32,
    newline_before: bool,
}

/// The scanner.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    // Byte offset of every char, with one trailing entry for EOF.
    byte_offsets: Vec<u32>,
    pos: usize,
    line: u32,
    column: u32,
    newline_before: bool,
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_es_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\u{000B}'
            | '\u{000C}'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_id_start(c: char) -> bool {
    c == '$' || c == '_' || unicode_ident::is_xid_start(c)
}

fn is_id_continue(c: char) -> bool {
    c == '$' || c == '_' || c == '\u{200C}' || c == '\u{200D}' || unicode_ident::is_xid_continue(c)
}

// Pushes one UTF-16 code unit, pairing surrogates. Lone surrogates
// cannot live in a Rust String and degrade to U+FFFD.
fn push_code_point(buf: &mut String, pending_high: &mut Option<u16>, cp: u32) {
    if let Some(high) = pending_high.take() {
        if (0xDC00..=0xDFFF).contains(&cp) {
            let combined = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (cp - 0xDC00);
            if let Some(c) = char::from_u32(combined) {
                buf.push(c);
                return;
            }
        }
        buf.push('\u{FFFD}');
    }
    if (0xD800..=0xDBFF).contains(&cp) {
        *pending_high = Some(cp as u16);
    } else if let Some(c) = char::from_u32(cp) {
        buf.push(c);
    } else {
        buf.push('\u{FFFD}');
    }
}

fn flush_pending(buf: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        buf.push('\u{FFFD}');
    }
}

impl<'a> Lexer<'a> {
    /// Create a scanner over `source`. A leading `#!` line is consumed
    /// here so the first token starts after it.
    pub fn new(source: &'a str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut byte_offsets = Vec::with_capacity(chars.len() + 1);
        for (off, _) in source.char_indices() {
            byte_offsets.push(off as u32);
        }
        byte_offsets.push(source.len() as u32);
        let mut lexer = Lexer {
            source,
            chars,
            byte_offsets,
            pos: 0,
            line: 1,
            column: 0,
            newline_before: false,
        };
        if lexer.peek() == Some('#') && lexer.peek_at(1) == Some('!') {
            while let Some(c) = lexer.peek() {
                if is_line_terminator(c) {
                    break;
                }
                lexer.advance();
            }
        }
        lexer
    }

    /// Byte offset of the current scan position.
    pub fn offset(&self) -> u32 {
        self.byte_offsets[self.pos]
    }

    /// Slice of the original source between two byte offsets.
    pub fn raw_slice(&self, start: u32, end: u32) -> &'a str {
        &self.source[start as usize..end as usize]
    }

    /// Capture the current scanner state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
            newline_before: self.newline_before,
        }
    }

    /// Restore a previously captured state.
    pub fn restore(&mut self, cp: Checkpoint) {
        self.pos = cp.pos;
        self.line = cp.line;
        self.column = cp.column;
        self.newline_before = cp.newline_before;
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            // A CRLF pair counts as a single terminator.
            if self.pos < 2 || self.chars[self.pos - 2] != '\r' {
                self.line += 1;
            }
            self.column = 0;
        } else if c == '\r' || c == '\u{2028}' || c == '\u{2029}' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line: self.line,
            column: self.column,
            offset: self.offset(),
        }
    }

    fn error_at(&self, cp: Checkpoint, kind: ErrorKind, message: impl Into<String>) -> ParseError {
        ParseError {
            kind,
            message: message.into(),
            line: cp.line,
            column: cp.column,
            offset: self.byte_offsets[cp.pos],
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        self.newline_before = false;
        loop {
            match self.peek() {
                Some(c) if is_es_whitespace(c) => {
                    self.advance();
                }
                Some(c) if is_line_terminator(c) => {
                    self.newline_before = true;
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if is_line_terminator(c) {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.checkpoint();
                    self.advance();
                    self.advance();
                    let mut closed = false;
                    while let Some(c) = self.peek() {
                        if c == '*' && self.peek_at(1) == Some('/') {
                            self.advance();
                            self.advance();
                            closed = true;
                            break;
                        }
                        if is_line_terminator(c) {
                            self.newline_before = true;
                        }
                        self.advance();
                    }
                    if !closed {
                        return Err(self.error_at(start, ErrorKind::Lexical, "Unterminated comment"));
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn make_token(&self, cp: Checkpoint, kind: TokenKind, octal: bool) -> Token {
        Token {
            kind,
            start: self.byte_offsets[cp.pos],
            end: self.offset(),
            line: cp.line,
            column: cp.column,
            end_line: self.line,
            end_column: self.column,
            newline_before: cp.newline_before,
            octal,
        }
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments()?;
        let cp = self.checkpoint();
        let Some(c) = self.peek() else {
            return Ok(self.make_token(cp, TokenKind::Eof, false));
        };
        if is_id_start(c) || c == '\\' {
            return self.scan_identifier(cp);
        }
        if c.is_ascii_digit() {
            return self.scan_number(cp);
        }
        match c {
            '"' | '\'' => self.scan_string(cp),
            '`' => {
                self.advance();
                self.scan_template_span(cp, true)
            }
            '#' => {
                self.advance();
                let next = self.peek();
                if next.map_or(false, is_id_start) || next == Some('\\') {
                    let name_cp = self.checkpoint();
                    let (name, _escaped) = self.scan_identifier_name(name_cp)?;
                    Ok(self.make_token(cp, TokenKind::PrivateIdent(name), false))
                } else {
                    Err(self.error_at(cp, ErrorKind::Lexical, "Invalid or unexpected token"))
                }
            }
            '.' => {
                if self.peek_at(1).map_or(false, |c| c.is_ascii_digit()) {
                    return self.scan_number(cp);
                }
                self.advance();
                if self.peek() == Some('.') && self.peek_at(1) == Some('.') {
                    self.advance();
                    self.advance();
                    Ok(self.make_token(cp, TokenKind::Punct(Punct::Ellipsis), false))
                } else {
                    Ok(self.make_token(cp, TokenKind::Punct(Punct::Dot), false))
                }
            }
            _ => self.scan_punctuator(cp),
        }
    }

    fn scan_punctuator(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        let c = self
            .advance()
            .ok_or_else(|| self.error(ErrorKind::Lexical, "Unexpected end of input"))?;
        let punct = match c {
            '(' => Punct::LParen,
            ')' => Punct::RParen,
            '{' => Punct::LBrace,
            '}' => Punct::RBrace,
            '[' => Punct::LBracket,
            ']' => Punct::RBracket,
            ';' => Punct::Semicolon,
            ',' => Punct::Comma,
            ':' => Punct::Colon,
            '~' => Punct::Tilde,
            '?' => {
                if self.peek() == Some('.')
                    && !self.peek_at(1).map_or(false, |c| c.is_ascii_digit())
                {
                    self.advance();
                    Punct::QuestionDot
                } else if self.peek() == Some('?') {
                    self.advance();
                    if self.match_char('=') {
                        Punct::NullishAssign
                    } else {
                        Punct::Nullish
                    }
                } else {
                    Punct::Question
                }
            }
            '+' => {
                if self.match_char('+') {
                    Punct::PlusPlus
                } else if self.match_char('=') {
                    Punct::PlusAssign
                } else {
                    Punct::Plus
                }
            }
            '-' => {
                if self.match_char('-') {
                    Punct::MinusMinus
                } else if self.match_char('=') {
                    Punct::MinusAssign
                } else {
                    Punct::Minus
                }
            }
            '*' => {
                if self.match_char('*') {
                    if self.match_char('=') {
                        Punct::StarStarAssign
                    } else {
                        Punct::StarStar
                    }
                } else if self.match_char('=') {
                    Punct::StarAssign
                } else {
                    Punct::Star
                }
            }
            '/' => {
                if self.match_char('=') {
                    Punct::SlashAssign
                } else {
                    Punct::Slash
                }
            }
            '%' => {
                if self.match_char('=') {
                    Punct::PercentAssign
                } else {
                    Punct::Percent
                }
            }
            '<' => {
                if self.match_char('<') {
                    if self.match_char('=') {
                        Punct::ShlAssign
                    } else {
                        Punct::Shl
                    }
                } else if self.match_char('=') {
                    Punct::LtEq
                } else {
                    Punct::Lt
                }
            }
            '>' => {
                if self.match_char('>') {
                    if self.match_char('>') {
                        if self.match_char('=') {
                            Punct::UShrAssign
                        } else {
                            Punct::UShr
                        }
                    } else if self.match_char('=') {
                        Punct::ShrAssign
                    } else {
                        Punct::Shr
                    }
                } else if self.match_char('=') {
                    Punct::GtEq
                } else {
                    Punct::Gt
                }
            }
            '=' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Punct::StrictEq
                    } else {
                        Punct::Eq
                    }
                } else if self.match_char('>') {
                    Punct::Arrow
                } else {
                    Punct::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    if self.match_char('=') {
                        Punct::StrictNotEq
                    } else {
                        Punct::NotEq
                    }
                } else {
                    Punct::Not
                }
            }
            '&' => {
                if self.match_char('&') {
                    if self.match_char('=') {
                        Punct::AndAndAssign
                    } else {
                        Punct::AndAnd
                    }
                } else if self.match_char('=') {
                    Punct::AmpAssign
                } else {
                    Punct::Amp
                }
            }
            '|' => {
                if self.match_char('|') {
                    if self.match_char('=') {
                        Punct::OrOrAssign
                    } else {
                        Punct::OrOr
                    }
                } else if self.match_char('=') {
                    Punct::PipeAssign
                } else {
                    Punct::Pipe
                }
            }
            '^' => {
                if self.match_char('=') {
                    Punct::CaretAssign
                } else {
                    Punct::Caret
                }
            }
            _ => {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Invalid or unexpected token"));
            }
        };
        Ok(self.make_token(cp, TokenKind::Punct(punct), false))
    }

    // Reads `\u XXXX` or `\u{...}` after the backslash was consumed,
    // returning the code point.
    fn scan_unicode_escape(&mut self) -> Result<u32, ParseError> {
        if !self.match_char('u') {
            return Err(self.error(ErrorKind::Lexical, "Invalid Unicode escape sequence"));
        }
        if self.match_char('{') {
            let mut value: u32 = 0;
            let mut any = false;
            while let Some(c) = self.peek() {
                if c == '}' {
                    break;
                }
                let digit = c.to_digit(16).ok_or_else(|| {
                    self.error(ErrorKind::Lexical, "Invalid Unicode escape sequence")
                })?;
                value = value
                    .checked_mul(16)
                    .and_then(|v| v.checked_add(digit))
                    .filter(|v| *v <= 0x0010_FFFF)
                    .ok_or_else(|| self.error(ErrorKind::Lexical, "Undefined Unicode code-point"))?;
                any = true;
                self.advance();
            }
            if !any || !self.match_char('}') {
                return Err(self.error(ErrorKind::Lexical, "Invalid Unicode escape sequence"));
            }
            Ok(value)
        } else {
            let mut value: u32 = 0;
            for _ in 0..4 {
                let digit = self.peek().and_then(|c| c.to_digit(16)).ok_or_else(|| {
                    self.error(ErrorKind::Lexical, "Invalid Unicode escape sequence")
                })?;
                value = value * 16 + digit;
                self.advance();
            }
            Ok(value)
        }
    }

    // Identifier name with unicode escapes, starting at the current
    // position. Returns the cooked name and whether escapes appeared.
    fn scan_identifier_name(&mut self, cp: Checkpoint) -> Result<(String, bool), ParseError> {
        let mut name = String::new();
        let mut escaped = false;
        let mut first = true;
        loop {
            match self.peek() {
                Some('\\') => {
                    self.advance();
                    escaped = true;
                    let value = self.scan_unicode_escape()?;
                    let c = char::from_u32(value).ok_or_else(|| {
                        self.error_at(cp, ErrorKind::Lexical, "Invalid Unicode escape sequence")
                    })?;
                    let valid = if first { is_id_start(c) } else { is_id_continue(c) };
                    if !valid {
                        return Err(self.error_at(
                            cp,
                            ErrorKind::Lexical,
                            "Invalid Unicode escape sequence",
                        ));
                    }
                    name.push(c);
                }
                Some(c) if (first && is_id_start(c)) || (!first && is_id_continue(c)) => {
                    name.push(c);
                    self.advance();
                }
                _ => break,
            }
            first = false;
        }
        if name.is_empty() {
            return Err(self.error_at(cp, ErrorKind::Lexical, "Invalid or unexpected token"));
        }
        Ok((name, escaped))
    }

    fn scan_identifier(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        let (name, escaped) = self.scan_identifier_name(cp)?;
        if !escaped {
            if let Some(kw) = keyword_from_str(&name) {
                return Ok(self.make_token(cp, TokenKind::Keyword(kw), false));
            }
        }
        Ok(self.make_token(cp, TokenKind::Ident { name, escaped }, false))
    }

    // Digits in `radix` with `_` separators. A separator must sit
    // between two digits.
    fn scan_digits(&mut self, radix: u32, out: &mut String) -> Result<(), ParseError> {
        let mut last_was_sep = false;
        let mut any = false;
        while let Some(c) = self.peek() {
            if c == '_' {
                if !any || last_was_sep {
                    return Err(self.error(ErrorKind::Lexical, "Invalid numeric separator"));
                }
                last_was_sep = true;
                self.advance();
                continue;
            }
            if c.to_digit(radix).is_none() {
                break;
            }
            out.push(c);
            any = true;
            last_was_sep = false;
            self.advance();
        }
        if last_was_sep {
            return Err(self.error(ErrorKind::Lexical, "Invalid numeric separator"));
        }
        if !any {
            return Err(self.error(ErrorKind::Lexical, "Invalid or unexpected token"));
        }
        Ok(())
    }

    fn check_after_number(&self, cp: Checkpoint) -> Result<(), ParseError> {
        if let Some(c) = self.peek() {
            if is_id_start(c) || c.is_ascii_digit() {
                return Err(self.error_at(
                    cp,
                    ErrorKind::Lexical,
                    "Identifier directly after number",
                ));
            }
        }
        Ok(())
    }

    fn bigint_token(&self, cp: Checkpoint, digits: &str, radix: u32) -> Result<Token, ParseError> {
        let value = BigInt::parse_bytes(digits.as_bytes(), radix)
            .ok_or_else(|| self.error_at(cp, ErrorKind::Lexical, "Invalid BigInt literal"))?;
        Ok(self.make_token(cp, TokenKind::BigInt(value.to_str_radix(10)), false))
    }

    fn scan_number(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        // Radix-prefixed forms.
        if self.peek() == Some('0') {
            let radix = match self.peek_at(1) {
                Some('x') | Some('X') => Some(16),
                Some('o') | Some('O') => Some(8),
                Some('b') | Some('B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                self.advance();
                let mut digits = String::new();
                self.scan_digits(radix, &mut digits)?;
                if self.match_char('n') {
                    let token = self.bigint_token(cp, &digits, radix)?;
                    self.check_after_number(cp)?;
                    return Ok(token);
                }
                self.check_after_number(cp)?;
                let mut value = 0.0f64;
                for c in digits.chars() {
                    value = value * f64::from(radix) + f64::from(c.to_digit(radix).unwrap_or(0));
                }
                return Ok(self.make_token(cp, TokenKind::Number(value), false));
            }
            // Legacy octal, or a non-octal decimal that merely starts
            // with 0. Both carry the octal flag for strict mode.
            if self.peek_at(1).map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
                let mut digits = String::new();
                let mut all_octal = true;
                while let Some(c) = self.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    if c > '7' {
                        all_octal = false;
                    }
                    digits.push(c);
                    self.advance();
                }
                if all_octal {
                    self.check_after_number(cp)?;
                    let mut value = 0.0f64;
                    for c in digits.chars() {
                        value = value * 8.0 + f64::from(c.to_digit(8).unwrap_or(0));
                    }
                    return Ok(self.make_token(cp, TokenKind::Number(value), true));
                }
                // NonOctalDecimalIntegerLiteral: may continue with a
                // decimal point or exponent.
                let mut text = digits;
                if self.peek() == Some('.') {
                    text.push('.');
                    self.advance();
                    while let Some(c) = self.peek() {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        text.push(c);
                        self.advance();
                    }
                }
                self.scan_exponent(&mut text)?;
                self.check_after_number(cp)?;
                let value = text
                    .parse::<f64>()
                    .map_err(|_| self.error_at(cp, ErrorKind::Lexical, "Invalid number"))?;
                return Ok(self.make_token(cp, TokenKind::Number(value), true));
            }
        }

        let mut text = String::new();
        let mut integer_only = true;
        if self.peek() == Some('.') {
            integer_only = false;
            text.push_str("0.");
            self.advance();
            self.scan_digits(10, &mut text)?;
        } else {
            self.scan_digits(10, &mut text)?;
            if self.peek() == Some('.') {
                integer_only = false;
                text.push('.');
                self.advance();
                if self.peek().map_or(false, |c| c.is_ascii_digit()) {
                    self.scan_digits(10, &mut text)?;
                }
            }
        }
        if integer_only && self.peek() == Some('n') {
            self.advance();
            let token = self.bigint_token(cp, &text, 10)?;
            self.check_after_number(cp)?;
            return Ok(token);
        }
        self.scan_exponent(&mut text)?;
        self.check_after_number(cp)?;
        let value = text
            .parse::<f64>()
            .map_err(|_| self.error_at(cp, ErrorKind::Lexical, "Invalid number"))?;
        Ok(self.make_token(cp, TokenKind::Number(value), false))
    }

    fn scan_exponent(&mut self, text: &mut String) -> Result<(), ParseError> {
        if matches!(self.peek(), Some('e') | Some('E')) {
            text.push('e');
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                if self.advance() == Some('-') {
                    text.push('-');
                }
            }
            self.scan_digits(10, text)?;
        }
        Ok(())
    }

    fn scan_string(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        let quote = self
            .advance()
            .ok_or_else(|| self.error(ErrorKind::Lexical, "Unexpected end of input"))?;
        let mut value = String::new();
        let mut pending_high: Option<u16> = None;
        let mut octal = false;
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated string literal"));
            };
            if c == quote {
                self.advance();
                break;
            }
            if is_line_terminator(c) {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated string literal"));
            }
            if c != '\\' {
                flush_pending(&mut value, &mut pending_high);
                value.push(c);
                self.advance();
                continue;
            }
            self.advance();
            let Some(esc) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated string literal"));
            };
            match esc {
                'n' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\n');
                    self.advance();
                }
                't' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\t');
                    self.advance();
                }
                'r' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\r');
                    self.advance();
                }
                'b' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\u{0008}');
                    self.advance();
                }
                'f' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\u{000C}');
                    self.advance();
                }
                'v' => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push('\u{000B}');
                    self.advance();
                }
                'x' => {
                    self.advance();
                    let mut cu: u32 = 0;
                    for _ in 0..2 {
                        let digit = self.peek().and_then(|c| c.to_digit(16)).ok_or_else(|| {
                            self.error(ErrorKind::Lexical, "Invalid hexadecimal escape sequence")
                        })?;
                        cu = cu * 16 + digit;
                        self.advance();
                    }
                    push_code_point(&mut value, &mut pending_high, cu);
                }
                'u' => {
                    let cu = self.scan_unicode_escape()?;
                    push_code_point(&mut value, &mut pending_high, cu);
                }
                '0'..='7' => {
                    // LegacyOctalEscapeSequence, except a lone \0 not
                    // followed by a digit, which is NUL even in strict.
                    let mut v = esc.to_digit(8).unwrap_or(0);
                    self.advance();
                    let mut len = 1;
                    let lone_zero =
                        esc == '0' && !self.peek().map_or(false, |c| c.is_ascii_digit());
                    if !lone_zero {
                        octal = true;
                        let max_len = if esc <= '3' { 3 } else { 2 };
                        while len < max_len {
                            let Some(d) = self.peek().and_then(|c| c.to_digit(8)) else {
                                break;
                            };
                            v = v * 8 + d;
                            len += 1;
                            self.advance();
                        }
                    }
                    flush_pending(&mut value, &mut pending_high);
                    push_code_point(&mut value, &mut pending_high, v);
                }
                '8' | '9' => {
                    // NonOctalDecimalEscapeSequence, banned in strict
                    // mode like the octal forms.
                    octal = true;
                    flush_pending(&mut value, &mut pending_high);
                    value.push(esc);
                    self.advance();
                }
                c if is_line_terminator(c) => {
                    // Line continuation contributes nothing.
                    self.advance();
                    if c == '\r' && self.peek() == Some('\n') {
                        self.advance();
                    }
                }
                other => {
                    flush_pending(&mut value, &mut pending_high);
                    value.push(other);
                    self.advance();
                }
            }
        }
        flush_pending(&mut value, &mut pending_high);
        Ok(self.make_token(cp, TokenKind::Str(value), octal))
    }

    // One template span. Entered after the opening backtick (normal
    // scan) or at a `}` (rescan). The terminating characters are
    // consumed and the raw text excludes them.
    fn scan_template_span(&mut self, cp: Checkpoint, head: bool) -> Result<Token, ParseError> {
        let mut raw = String::new();
        let mut cooked = Some(String::new());
        let mut pending_high: Option<u16> = None;
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated template literal"));
            };
            if c == '`' {
                self.advance();
                let part = if head {
                    TemplatePart::Complete
                } else {
                    TemplatePart::Tail
                };
                if let Some(v) = cooked.as_mut() {
                    flush_pending(v, &mut pending_high);
                }
                return Ok(self.make_token(cp, TokenKind::Template { cooked, raw, part }, false));
            }
            if c == '$' && self.peek_at(1) == Some('{') {
                self.advance();
                self.advance();
                let part = if head {
                    TemplatePart::Head
                } else {
                    TemplatePart::Middle
                };
                if let Some(v) = cooked.as_mut() {
                    flush_pending(v, &mut pending_high);
                }
                return Ok(self.make_token(cp, TokenKind::Template { cooked, raw, part }, false));
            }
            if c == '\r' {
                // CR and CRLF normalize to LF in both raw and cooked.
                self.advance();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                raw.push('\n');
                if let Some(v) = cooked.as_mut() {
                    v.push('\n');
                }
                continue;
            }
            if c != '\\' {
                raw.push(c);
                if let Some(v) = cooked.as_mut() {
                    flush_pending(v, &mut pending_high);
                    v.push(c);
                }
                self.advance();
                continue;
            }
            // Escape sequence. Invalid sequences only poison the
            // cooked value; a tagged template still sees the raw text.
            raw.push('\\');
            self.advance();
            let Some(esc) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated template literal"));
            };
            match esc {
                'n' | 't' | 'r' | 'b' | 'f' | 'v' | '\'' | '"' | '\\' | '`' | '$' => {
                    raw.push(esc);
                    self.advance();
                    if let Some(v) = cooked.as_mut() {
                        flush_pending(v, &mut pending_high);
                        v.push(match esc {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            'b' => '\u{0008}',
                            'f' => '\u{000C}',
                            'v' => '\u{000B}',
                            other => other,
                        });
                    }
                }
                'x' => {
                    raw.push('x');
                    self.advance();
                    let mut cu: u32 = 0;
                    let mut ok = true;
                    for _ in 0..2 {
                        match self.peek().and_then(|c| c.to_digit(16)) {
                            Some(d) => {
                                raw.push(self.peek().unwrap_or('0'));
                                cu = cu * 16 + d;
                                self.advance();
                            }
                            None => {
                                ok = false;
                                break;
                            }
                        }
                    }
                    if ok {
                        if let Some(v) = cooked.as_mut() {
                            push_code_point(v, &mut pending_high, cu);
                        }
                    } else {
                        cooked = None;
                        pending_high = None;
                    }
                }
                'u' => {
                    let save = self.checkpoint();
                    match self.scan_unicode_escape() {
                        Ok(cu) => {
                            for i in save.pos..self.pos {
                                raw.push(self.chars[i]);
                            }
                            if let Some(v) = cooked.as_mut() {
                                push_code_point(v, &mut pending_high, cu);
                            }
                        }
                        Err(_) => {
                            self.restore(save);
                            cooked = None;
                            pending_high = None;
                            raw.push('u');
                            self.advance();
                        }
                    }
                }
                '0' if !self.peek_at(1).map_or(false, |c| c.is_ascii_digit()) => {
                    raw.push('0');
                    self.advance();
                    if let Some(v) = cooked.as_mut() {
                        flush_pending(v, &mut pending_high);
                        v.push('\0');
                    }
                }
                '0'..='9' => {
                    // Octal and \8 \9 escapes are illegal in templates.
                    raw.push(esc);
                    self.advance();
                    cooked = None;
                    pending_high = None;
                }
                c if is_line_terminator(c) => {
                    self.advance();
                    if c == '\r' && self.peek() == Some('\n') {
                        self.advance();
                    }
                    raw.push('\n');
                }
                other => {
                    raw.push(other);
                    self.advance();
                    if let Some(v) = cooked.as_mut() {
                        flush_pending(v, &mut pending_high);
                        v.push(other);
                    }
                }
            }
        }
    }

    /// Re-lex from `cp`, which must point at a `/` or `/=` token, as a
    /// regular expression literal.
    pub fn rescan_as_regex(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        self.restore(cp);
        self.skip_whitespace_and_comments()?;
        let cp = self.checkpoint();
        self.advance(); // the opening slash
        let mut pattern = String::new();
        let mut in_class = false;
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated regular expression"));
            };
            if is_line_terminator(c) {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated regular expression"));
            }
            match c {
                '\\' => {
                    pattern.push('\\');
                    self.advance();
                    let Some(next) = self.peek() else {
                        return Err(self.error_at(
                            cp,
                            ErrorKind::Lexical,
                            "Unterminated regular expression",
                        ));
                    };
                    if is_line_terminator(next) {
                        return Err(self.error_at(
                            cp,
                            ErrorKind::Lexical,
                            "Unterminated regular expression",
                        ));
                    }
                    pattern.push(next);
                    self.advance();
                }
                '[' => {
                    in_class = true;
                    pattern.push(c);
                    self.advance();
                }
                ']' => {
                    in_class = false;
                    pattern.push(c);
                    self.advance();
                }
                '/' if !in_class => {
                    self.advance();
                    break;
                }
                _ => {
                    pattern.push(c);
                    self.advance();
                }
            }
        }
        let mut flags = String::new();
        while let Some(c) = self.peek() {
            if !is_id_continue(c) {
                break;
            }
            if !matches!(c, 'd' | 'g' | 'i' | 'm' | 's' | 'u' | 'v' | 'y') || flags.contains(c) {
                return Err(self.error(ErrorKind::Lexical, "Invalid regular expression flags"));
            }
            flags.push(c);
            self.advance();
        }
        if flags.contains('u') && flags.contains('v') {
            return Err(self.error_at(cp, ErrorKind::Lexical, "Invalid regular expression flags"));
        }
        Ok(self.make_token(cp, TokenKind::Regex { pattern, flags }, false))
    }

    /// Re-lex from `cp`, which must point at a `}` token, as the
    /// middle or tail span of a template literal.
    pub fn rescan_template_continuation(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        self.restore(cp);
        self.skip_whitespace_and_comments()?;
        let cp = self.checkpoint();
        self.advance(); // the closing brace of the substitution
        self.scan_template_span(cp, false)
    }

    /// Re-lex from `cp` as a JSX identifier, which may contain `-`.
    pub fn rescan_jsx_identifier(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        self.restore(cp);
        self.skip_whitespace_and_comments()?;
        let cp = self.checkpoint();
        let mut name = String::new();
        match self.peek() {
            Some(c) if is_id_start(c) => {
                name.push(c);
                self.advance();
            }
            _ => return Err(self.error_at(cp, ErrorKind::Lexical, "Invalid or unexpected token")),
        }
        while let Some(c) = self.peek() {
            if c == '-' || is_id_continue(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.make_token(cp, TokenKind::Ident { name, escaped: false }, false))
    }

    /// Re-lex from `cp` as a raw JSX text run ending before `<`, `>`,
    /// `{`, `}`, or end of input. JSX text performs no escape
    /// processing.
    pub fn rescan_jsx_text(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        self.restore(cp);
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if matches!(c, '<' | '{' | '}' | '>') {
                break;
            }
            text.push(c);
            self.advance();
        }
        Ok(self.make_token(cp, TokenKind::JsxText(text), false))
    }

    /// Re-lex from `cp`, which must point at a quote, as a JSX
    /// attribute string. JSX strings take their characters literally.
    pub fn rescan_jsx_string(&mut self, cp: Checkpoint) -> Result<Token, ParseError> {
        self.restore(cp);
        self.skip_whitespace_and_comments()?;
        let cp = self.checkpoint();
        let quote = self
            .advance()
            .ok_or_else(|| self.error(ErrorKind::Lexical, "Unexpected end of input"))?;
        let mut value = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(self.error_at(cp, ErrorKind::Lexical, "Unterminated string literal"));
            };
            self.advance();
            if c == quote {
                break;
            }
            value.push(c);
        }
        Ok(self.make_token(cp, TokenKind::Str(value), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().expect("lexes");
            if token.is_eof() {
                break;
            }
            out.push(token.kind);
        }
        out
    }

    fn single(source: &str) -> Token {
        let mut lexer = Lexer::new(source);
        lexer.next_token().expect("lexes")
    }

    #[test]
    fn keywords_and_identifiers() {
        let kinds = all_tokens("var let x instanceof");
        assert_eq!(kinds[0], TokenKind::Keyword(Keyword::Var));
        assert_eq!(
            kinds[1],
            TokenKind::Ident { name: "let".into(), escaped: false }
        );
        assert_eq!(
            kinds[2],
            TokenKind::Ident { name: "x".into(), escaped: false }
        );
        assert_eq!(kinds[3], TokenKind::Keyword(Keyword::Instanceof));
    }

    #[test]
    fn escaped_keyword_is_marked() {
        let token = single("\\u0069f");
        assert_eq!(
            token.kind,
            TokenKind::Ident { name: "if".into(), escaped: true }
        );
    }

    #[test]
    fn maximal_munch_punctuators() {
        assert_eq!(
            all_tokens(">>>= === ?? **="),
            vec![
                TokenKind::Punct(Punct::UShrAssign),
                TokenKind::Punct(Punct::StrictEq),
                TokenKind::Punct(Punct::Nullish),
                TokenKind::Punct(Punct::StarStarAssign),
            ]
        );
    }

    #[test]
    fn optional_chain_not_before_digit() {
        // `?.` followed by a digit lexes as `?` then `.5`.
        let kinds = all_tokens("a?.5:b");
        assert_eq!(kinds[1], TokenKind::Punct(Punct::Question));
        assert_eq!(kinds[2], TokenKind::Number(0.5));
    }

    #[test]
    fn numeric_forms() {
        assert_eq!(single("0x1F").kind, TokenKind::Number(31.0));
        assert_eq!(single("0b101").kind, TokenKind::Number(5.0));
        assert_eq!(single("0o17").kind, TokenKind::Number(15.0));
        assert_eq!(single("1_000_000").kind, TokenKind::Number(1_000_000.0));
        assert_eq!(single(".5e2").kind, TokenKind::Number(50.0));
        assert_eq!(single("1e-3").kind, TokenKind::Number(0.001));
    }

    #[test]
    fn legacy_octal_sets_flag() {
        let token = single("0755");
        assert_eq!(token.kind, TokenKind::Number(493.0));
        assert!(token.octal);
        // 08 is a decimal literal but still flagged.
        let token = single("08");
        assert_eq!(token.kind, TokenKind::Number(8.0));
        assert!(token.octal);
        let token = single("42");
        assert!(!token.octal);
    }

    #[test]
    fn bigint_is_canonical_decimal() {
        assert_eq!(single("0x10n").kind, TokenKind::BigInt("16".into()));
        assert_eq!(single("123n").kind, TokenKind::BigInt("123".into()));
        assert_eq!(single("1_000n").kind, TokenKind::BigInt("1000".into()));
    }

    #[test]
    fn bigint_rejects_fractions() {
        let mut lexer = Lexer::new("1.5n");
        // `1.5` scans, then `n` sits directly after the number.
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn invalid_separator_rejected() {
        assert!(Lexer::new("1__0").next_token().is_err());
        assert!(Lexer::new("1_").next_token().is_err());
        assert!(Lexer::new("0x_1").next_token().is_err());
    }

    #[test]
    fn string_escapes() {
        assert_eq!(single("'a\\nb'").kind, TokenKind::Str("a\nb".into()));
        assert_eq!(single("'\\x41'").kind, TokenKind::Str("A".into()));
        assert_eq!(single("'\\u0041'").kind, TokenKind::Str("A".into()));
        assert_eq!(
            single("'\\u{1F600}'").kind,
            TokenKind::Str("\u{1F600}".into())
        );
        // Surrogate pair written as two escapes.
        assert_eq!(
            single("'\\uD83D\\uDE00'").kind,
            TokenKind::Str("\u{1F600}".into())
        );
    }

    #[test]
    fn string_octal_escape_sets_flag() {
        let token = single("'\\101'");
        assert_eq!(token.kind, TokenKind::Str("A".into()));
        assert!(token.octal);
        let token = single("'\\8'");
        assert!(token.octal);
        // A lone \0 is not an octal escape.
        let token = single("'\\0'");
        assert_eq!(token.kind, TokenKind::Str("\0".into()));
        assert!(!token.octal);
    }

    #[test]
    fn line_continuation() {
        assert_eq!(single("'a\\\nb'").kind, TokenKind::Str("ab".into()));
    }

    #[test]
    fn unterminated_string() {
        assert!(Lexer::new("'abc").next_token().is_err());
        assert!(Lexer::new("'a\nb'").next_token().is_err());
    }

    #[test]
    fn newline_before_flag() {
        let mut lexer = Lexer::new("a\nb c");
        let a = lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        let c = lexer.next_token().unwrap();
        assert!(!a.newline_before);
        assert!(b.newline_before);
        assert!(!c.newline_before);
    }

    #[test]
    fn newline_inside_block_comment_counts() {
        let mut lexer = Lexer::new("a /* x\ny */ b");
        lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        assert!(b.newline_before);
    }

    #[test]
    fn unterminated_block_comment() {
        let mut lexer = Lexer::new("/* never closed");
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn template_complete_and_spans() {
        let token = single("`ab`");
        assert_eq!(
            token.kind,
            TokenKind::Template {
                cooked: Some("ab".into()),
                raw: "ab".into(),
                part: TemplatePart::Complete,
            }
        );
        let token = single("`a${");
        match token.kind {
            TokenKind::Template { part, raw, .. } => {
                assert_eq!(part, TemplatePart::Head);
                assert_eq!(raw, "a");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn template_continuation_rescan() {
        let mut lexer = Lexer::new("`a${x}b`");
        lexer.next_token().unwrap(); // head
        lexer.next_token().unwrap(); // x
        let cp = lexer.checkpoint();
        let rbrace = lexer.next_token().unwrap();
        assert!(rbrace.is_punct(Punct::RBrace));
        let tail = lexer.rescan_template_continuation(cp).unwrap();
        match tail.kind {
            TokenKind::Template { part, cooked, .. } => {
                assert_eq!(part, TemplatePart::Tail);
                assert_eq!(cooked.as_deref(), Some("b"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn template_invalid_escape_poisons_cooked() {
        let token = single("`\\x`");
        match token.kind {
            TokenKind::Template { cooked, raw, .. } => {
                assert!(cooked.is_none());
                assert_eq!(raw, "\\x");
            }
            other => panic!("unexpected {other:?}"),
        }
        let token = single("`\\07`");
        match token.kind {
            TokenKind::Template { cooked, .. } => assert!(cooked.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn template_normalizes_crlf() {
        let token = single("`a\r\nb`");
        match token.kind {
            TokenKind::Template { cooked, raw, .. } => {
                assert_eq!(cooked.as_deref(), Some("a\nb"));
                assert_eq!(raw, "a\nb");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn regex_rescan() {
        let mut lexer = Lexer::new("/ab[/]c/gi");
        let cp = lexer.checkpoint();
        let slash = lexer.next_token().unwrap();
        assert!(slash.is_punct(Punct::Slash));
        let token = lexer.rescan_as_regex(cp).unwrap();
        assert_eq!(
            token.kind,
            TokenKind::Regex { pattern: "ab[/]c".into(), flags: "gi".into() }
        );
    }

    #[test]
    fn regex_flag_validation() {
        let mut lexer = Lexer::new("/a/gg");
        let cp = lexer.checkpoint();
        lexer.next_token().unwrap();
        assert!(lexer.rescan_as_regex(cp).is_err());
        let mut lexer = Lexer::new("/a/uv");
        let cp = lexer.checkpoint();
        lexer.next_token().unwrap();
        assert!(lexer.rescan_as_regex(cp).is_err());
    }

    #[test]
    fn unterminated_regex() {
        let mut lexer = Lexer::new("/ab\nc/");
        let cp = lexer.checkpoint();
        lexer.next_token().unwrap();
        assert!(lexer.rescan_as_regex(cp).is_err());
    }

    #[test]
    fn private_identifier() {
        let kinds = all_tokens("#field");
        assert_eq!(kinds[0], TokenKind::PrivateIdent("field".into()));
        assert!(Lexer::new("# x").next_token().is_err());
    }

    #[test]
    fn hashbang_skipped() {
        let mut lexer = Lexer::new("#!/usr/bin/env node\nlet");
        let token = lexer.next_token().unwrap();
        assert!(token.is_ident("let"));
        assert!(token.newline_before);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let mut lexer = Lexer::new("日本 = 1");
        let ident = lexer.next_token().unwrap();
        assert_eq!(ident.start, 0);
        assert_eq!(ident.end, 6);
        assert_eq!(ident.column, 0);
        assert_eq!(ident.end_column, 2);
        let eq = lexer.next_token().unwrap();
        assert_eq!(eq.start, 7);
    }

    #[test]
    fn positions_track_lines() {
        let mut lexer = Lexer::new("a\r\nb\u{2028}c");
        let a = lexer.next_token().unwrap();
        let b = lexer.next_token().unwrap();
        let c = lexer.next_token().unwrap();
        assert_eq!((a.line, a.column), (1, 0));
        assert_eq!((b.line, b.column), (2, 0));
        assert_eq!((c.line, c.column), (3, 0));
    }

    #[test]
    fn jsx_text_rescan() {
        let mut lexer = Lexer::new("hello world<");
        let cp = lexer.checkpoint();
        let token = lexer.rescan_jsx_text(cp).unwrap();
        assert_eq!(token.kind, TokenKind::JsxText("hello world".into()));
    }

    #[test]
    fn jsx_identifier_with_dash() {
        let mut lexer = Lexer::new("data-value=");
        let cp = lexer.checkpoint();
        let token = lexer.rescan_jsx_identifier(cp).unwrap();
        assert!(token.is_ident("data-value"));
    }

    #[test]
    fn jsx_string_is_raw() {
        let mut lexer = Lexer::new("\"a\\nb\"");
        let cp = lexer.checkpoint();
        let token = lexer.rescan_jsx_string(cp).unwrap();
        assert_eq!(token.kind, TokenKind::Str("a\\nb".into()));
    }
}
