use std::str::CharIndices;

use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::LexErrorKind;
use crate::diagnostics::Range;

/// Returned by the cursor past the end of input. Real U+0000 characters are
/// read as U+FFFD, so this never collides with source text.
pub const C_EOF: char = '\0';
pub const C_REPLACEMENT: char = '\u{FFFD}';

pub const C_LINE_FEED: char = '\n';
pub const C_CARRIAGE_RETURN: char = '\r';
pub const C_FORM_FEED: char = '\u{c}';

pub const C_TAB: char = '\t';
pub const C_SPACE: char = ' ';

pub const C_SOLIDUS: char = '/';
pub const C_REVERSE_SOLIDUS: char = '\\';
pub const C_ASTERISK: char = '*';

pub const C_LEFT_PARENTHESIS: char = '(';
pub const C_RIGHT_PARENTHESIS: char = ')';
pub const C_LEFT_CURLY: char = '{';
pub const C_RIGHT_CURLY: char = '}';
pub const C_LEFT_SQUARE: char = '[';
pub const C_RIGHT_SQUARE: char = ']';

pub const C_QUOTATION_MARK: char = '"';
pub const C_APOSTROPHE: char = '\'';

pub const C_FULL_STOP: char = '.';
pub const C_COLON: char = ':';
pub const C_SEMICOLON: char = ';';
pub const C_COMMA: char = ',';
pub const C_PERCENTAGE: char = '%';
pub const C_AT_SIGN: char = '@';
pub const C_EXCLAMATION_MARK: char = '!';

pub const C_LOW_LINE: char = '_';
pub const C_LOWER_E: char = 'e';
pub const C_UPPER_E: char = 'E';

pub const C_NUMBER_SIGN: char = '#';
pub const C_PLUS_SIGN: char = '+';
pub const C_HYPHEN_MINUS: char = '-';

pub const C_LESS_THAN_SIGN: char = '<';
pub const C_GREATER_THAN_SIGN: char = '>';

/// Byte offset into the source. Sources longer than `u32::MAX` bytes are
/// rejected by `transform`.
pub type Pos = u32;

/// Character cursor with two characters of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'s> {
    value: &'s str,
    base: usize,
    iter: CharIndices<'s>,
    cur: (Pos, char),
    peek: (Pos, char),
    peek2: (Pos, char),
}

impl<'s> From<&'s str> for Lexer<'s> {
    fn from(value: &'s str) -> Self {
        Self::new(value)
    }
}

impl<'s> Lexer<'s> {
    pub fn new(value: &'s str) -> Self {
        Self::at(value, 0)
    }

    /// Starts reading at byte offset `pos`, rounded up to the next char boundary.
    pub fn at(value: &'s str, pos: Pos) -> Self {
        let mut base = (pos as usize).min(value.len());
        while !value.is_char_boundary(base) {
            base += 1;
        }
        let eof = (value.len() as Pos, C_EOF);
        let mut lexer = Self {
            value,
            base,
            iter: value[base..].char_indices(),
            cur: eof,
            peek: eof,
            peek2: eof,
        };
        lexer.cur = lexer.next_char();
        lexer.peek = lexer.next_char();
        lexer.peek2 = lexer.next_char();
        lexer
    }

    fn next_char(&mut self) -> (Pos, char) {
        match self.iter.next() {
            Some((i, c)) => {
                let c = if c == C_EOF { C_REPLACEMENT } else { c };
                ((self.base + i) as Pos, c)
            }
            None => (self.value.len() as Pos, C_EOF),
        }
    }

    /// Moves past the current character and returns the new current one.
    pub fn consume(&mut self) -> char {
        self.cur = self.peek;
        self.peek = self.peek2;
        self.peek2 = self.next_char();
        self.cur()
    }

    pub fn cur_pos(&self) -> Pos {
        self.cur.0
    }

    pub fn cur(&self) -> char {
        self.cur.1
    }

    pub fn peek_pos(&self) -> Pos {
        self.peek.0
    }

    pub fn peek(&self) -> char {
        self.peek.1
    }

    pub fn peek2_pos(&self) -> Pos {
        self.peek2.0
    }

    pub fn peek2(&self) -> char {
        self.peek2.1
    }

    pub fn is_eof(&self) -> bool {
        self.cur() == C_EOF
    }

    pub fn source(&self) -> &'s str {
        self.value
    }

    pub fn slice(&self, start: Pos, end: Pos) -> Option<&'s str> {
        self.value.get(start as usize..end as usize)
    }

    pub fn consume_space(&mut self) {
        while is_white_space(self.cur()) {
            self.consume();
        }
    }

    pub fn consume_new_line(&mut self) {
        if self.cur() == C_CARRIAGE_RETURN && self.peek() == C_LINE_FEED {
            self.consume();
        }
        self.consume();
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric<'s> {
    pub value: f64,
    pub is_integer: bool,
    pub repr: &'s str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind<'s> {
    Ident(&'s str),
    /// Name without the opening parenthesis.
    Function(&'s str),
    /// Name without the `@`.
    AtKeyword(&'s str),
    Hash { value: &'s str, is_id: bool },
    /// Contents between the quotes, escapes left as written.
    String { value: &'s str, quote: char },
    BadString,
    /// Contents of an unquoted `url(...)`, surrounding whitespace trimmed.
    Url(&'s str),
    BadUrl,
    Number(Numeric<'s>),
    Percentage(Numeric<'s>),
    Dimension(Numeric<'s>, &'s str),
    Delim(char),
    Whitespace,
    /// Body of a `/* */` or `//` comment.
    Comment(&'s str),
    Colon,
    Semicolon,
    Comma,
    LeftParenthesis,
    RightParenthesis,
    LeftSquare,
    RightSquare,
    LeftCurly,
    RightCurly,
    Cdo,
    Cdc,
    Eof,
}

impl TokenKind<'_> {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    pub fn is_delim(&self, c: char) -> bool {
        matches!(self, TokenKind::Delim(d) if *d == c)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, TokenKind::Ident(ident) if ident.eq_ignore_ascii_case(name))
    }

    /// The character closing a block opened by this token, if it opens one.
    pub fn closing_char(&self) -> Option<char> {
        match self {
            TokenKind::Function(_) | TokenKind::LeftParenthesis => Some(C_RIGHT_PARENTHESIS),
            TokenKind::LeftSquare => Some(C_RIGHT_SQUARE),
            TokenKind::LeftCurly => Some(C_RIGHT_CURLY),
            _ => None,
        }
    }

    pub fn as_closing_char(&self) -> Option<char> {
        match self {
            TokenKind::RightParenthesis => Some(C_RIGHT_PARENTHESIS),
            TokenKind::RightSquare => Some(C_RIGHT_SQUARE),
            TokenKind::RightCurly => Some(C_RIGHT_CURLY),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'s> {
    pub kind: TokenKind<'s>,
    pub range: Range,
    /// Source text covered by `range`.
    pub raw: &'s str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Treat `//` up to the end of the line as a comment.
    pub line_comments: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            line_comments: true,
        }
    }
}

/// Pull-based tokenizer. Yields tokens up to and including a single `Eof`.
#[derive(Debug, Clone)]
pub struct Tokenizer<'s> {
    lexer: Lexer<'s>,
    options: TokenizerOptions,
    diagnostics: Vec<Diagnostic>,
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(input: &'s str) -> Self {
        Self::with_options(input, TokenizerOptions::default())
    }

    pub fn with_options(input: &'s str, options: TokenizerOptions) -> Self {
        Self {
            lexer: Lexer::new(input),
            options,
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    pub fn source(&self) -> &'s str {
        self.lexer.source()
    }

    pub fn position(&self) -> Pos {
        self.lexer.cur_pos()
    }

    /// Restarts tokenization at byte offset `pos`.
    pub fn reset(&mut self, pos: Pos) {
        self.lexer = Lexer::at(self.lexer.source(), pos);
        self.finished = false;
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn next_token(&mut self) -> Token<'s> {
        let start = self.lexer.cur_pos();
        let kind = self.consume_token();
        let end = self.lexer.cur_pos();
        Token {
            kind,
            range: Range::new(start, end),
            raw: self.slice(start, end),
        }
    }

    fn slice(&self, start: Pos, end: Pos) -> &'s str {
        self.lexer.slice(start, end).unwrap_or_default()
    }

    fn report(&mut self, start: Pos, end: Pos, kind: LexErrorKind) {
        self.diagnostics.push(Diagnostic::new(
            Range::new(start, end),
            DiagnosticKind::Lex(kind),
        ));
    }

    // https://drafts.csswg.org/css-syntax/#consume-token
    fn consume_token(&mut self) -> TokenKind<'s> {
        let c = self.lexer.cur();
        let c2 = self.lexer.peek();
        let c3 = self.lexer.peek2();
        match c {
            C_EOF => TokenKind::Eof,
            C_SOLIDUS if c2 == C_ASTERISK => self.consume_block_comment(),
            C_SOLIDUS if c2 == C_SOLIDUS && self.options.line_comments => {
                self.consume_line_comment()
            }
            c if is_white_space(c) => {
                self.lexer.consume_space();
                TokenKind::Whitespace
            }
            C_QUOTATION_MARK | C_APOSTROPHE => self.consume_string(c),
            C_NUMBER_SIGN => self.consume_number_sign(),
            C_LEFT_PARENTHESIS => self.consume_simple(TokenKind::LeftParenthesis),
            C_RIGHT_PARENTHESIS => self.consume_simple(TokenKind::RightParenthesis),
            C_PLUS_SIGN | C_FULL_STOP if start_number(c, c2, c3) => self.consume_numeric_token(),
            C_COMMA => self.consume_simple(TokenKind::Comma),
            C_HYPHEN_MINUS => self.consume_minus(),
            C_COLON => self.consume_simple(TokenKind::Colon),
            C_SEMICOLON => self.consume_simple(TokenKind::Semicolon),
            C_LESS_THAN_SIGN => self.consume_less_than_sign(),
            C_AT_SIGN => self.consume_at_sign(),
            C_LEFT_SQUARE => self.consume_simple(TokenKind::LeftSquare),
            C_RIGHT_SQUARE => self.consume_simple(TokenKind::RightSquare),
            C_REVERSE_SOLIDUS => self.consume_reverse_solidus(),
            C_LEFT_CURLY => self.consume_simple(TokenKind::LeftCurly),
            C_RIGHT_CURLY => self.consume_simple(TokenKind::RightCurly),
            c if is_digit(c) => self.consume_numeric_token(),
            c if is_ident_start(c) => self.consume_ident_like(),
            _ => self.consume_delim(),
        }
    }

    fn consume_simple(&mut self, kind: TokenKind<'s>) -> TokenKind<'s> {
        self.lexer.consume();
        kind
    }

    fn consume_delim(&mut self) -> TokenKind<'s> {
        let c = self.lexer.cur();
        self.lexer.consume();
        TokenKind::Delim(c)
    }

    fn consume_block_comment(&mut self) -> TokenKind<'s> {
        let start = self.lexer.cur_pos();
        self.lexer.consume();
        self.lexer.consume();
        let body_start = self.lexer.cur_pos();
        loop {
            let c = self.lexer.cur();
            if c == C_EOF {
                let end = self.lexer.cur_pos();
                self.report(start, end, LexErrorKind::UnterminatedComment);
                return TokenKind::Comment(self.slice(body_start, end));
            }
            if c == C_ASTERISK && self.lexer.peek() == C_SOLIDUS {
                let body_end = self.lexer.cur_pos();
                self.lexer.consume();
                self.lexer.consume();
                return TokenKind::Comment(self.slice(body_start, body_end));
            }
            self.lexer.consume();
        }
    }

    fn consume_line_comment(&mut self) -> TokenKind<'s> {
        self.lexer.consume();
        self.lexer.consume();
        let body_start = self.lexer.cur_pos();
        while !self.lexer.is_eof() && !is_new_line(self.lexer.cur()) {
            self.lexer.consume();
        }
        TokenKind::Comment(self.slice(body_start, self.lexer.cur_pos()))
    }

    fn consume_string(&mut self, quote: char) -> TokenKind<'s> {
        let start = self.lexer.cur_pos();
        self.lexer.consume();
        let value_start = self.lexer.cur_pos();
        loop {
            let c = self.lexer.cur();
            if c == quote {
                let value_end = self.lexer.cur_pos();
                self.lexer.consume();
                return TokenKind::String {
                    value: self.slice(value_start, value_end),
                    quote,
                };
            }
            if c == C_EOF {
                let end = self.lexer.cur_pos();
                self.report(start, end, LexErrorKind::UnterminatedString);
                return TokenKind::String {
                    value: self.slice(value_start, end),
                    quote,
                };
            }
            if is_new_line(c) {
                // The newline is left for the next token.
                self.report(start, self.lexer.cur_pos(), LexErrorKind::BadString);
                return TokenKind::BadString;
            }
            if c == C_REVERSE_SOLIDUS {
                let c2 = self.lexer.peek();
                if c2 == C_EOF {
                    self.lexer.consume();
                } else if is_new_line(c2) {
                    self.lexer.consume();
                    self.lexer.consume_new_line();
                } else {
                    self.lexer.consume();
                    self.consume_escaped();
                }
                continue;
            }
            self.lexer.consume();
        }
    }

    /// Expects the cursor right after a `\`.
    fn consume_escaped(&mut self) {
        let c = self.lexer.cur();
        if is_hex_digit(c) {
            let mut count = 0;
            while count < 6 && is_hex_digit(self.lexer.cur()) {
                self.lexer.consume();
                count += 1;
            }
            if is_white_space(self.lexer.cur()) {
                self.lexer.consume_new_line();
            }
        } else if c == C_EOF {
            let end = self.lexer.cur_pos();
            self.report(end.saturating_sub(1), end, LexErrorKind::BadEscape);
        } else {
            self.lexer.consume();
        }
    }

    fn consume_ident_sequence(&mut self) {
        loop {
            let c = self.lexer.cur();
            if are_valid_escape(c, self.lexer.peek()) {
                self.lexer.consume();
                self.consume_escaped();
            } else if is_ident(c) {
                self.lexer.consume();
            } else {
                return;
            }
        }
    }

    fn consume_number_sign(&mut self) -> TokenKind<'s> {
        let c2 = self.lexer.peek();
        if !is_ident(c2) && !are_valid_escape(c2, self.lexer.peek2()) {
            return self.consume_delim();
        }
        self.lexer.consume();
        let is_id = start_ident_sequence(self.lexer.cur(), self.lexer.peek(), self.lexer.peek2());
        let start = self.lexer.cur_pos();
        self.consume_ident_sequence();
        TokenKind::Hash {
            value: self.slice(start, self.lexer.cur_pos()),
            is_id,
        }
    }

    fn consume_numeric_token(&mut self) -> TokenKind<'s> {
        let start = self.lexer.cur_pos();
        let is_integer = self.consume_number();
        let repr = self.slice(start, self.lexer.cur_pos());
        let value = match repr.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            Ok(value) if value.is_sign_negative() => f64::MIN,
            Ok(_) => f64::MAX,
            Err(_) => 0.0,
        };
        let numeric = Numeric {
            value,
            is_integer,
            repr,
        };
        let c = self.lexer.cur();
        if start_ident_sequence(c, self.lexer.peek(), self.lexer.peek2()) {
            let unit_start = self.lexer.cur_pos();
            self.consume_ident_sequence();
            return TokenKind::Dimension(numeric, self.slice(unit_start, self.lexer.cur_pos()));
        }
        if c == C_PERCENTAGE {
            self.lexer.consume();
            return TokenKind::Percentage(numeric);
        }
        TokenKind::Number(numeric)
    }

    fn consume_number(&mut self) -> bool {
        let mut is_integer = true;
        let c = self.lexer.cur();
        if c == C_PLUS_SIGN || c == C_HYPHEN_MINUS {
            self.lexer.consume();
        }
        while is_digit(self.lexer.cur()) {
            self.lexer.consume();
        }
        if self.lexer.cur() == C_FULL_STOP && is_digit(self.lexer.peek()) {
            is_integer = false;
            self.lexer.consume();
            while is_digit(self.lexer.cur()) {
                self.lexer.consume();
            }
        }
        let c = self.lexer.cur();
        if c == C_LOWER_E || c == C_UPPER_E {
            let c2 = self.lexer.peek();
            let signed = (c2 == C_HYPHEN_MINUS || c2 == C_PLUS_SIGN) && is_digit(self.lexer.peek2());
            if is_digit(c2) || signed {
                is_integer = false;
                self.lexer.consume();
                if signed {
                    self.lexer.consume();
                }
                while is_digit(self.lexer.cur()) {
                    self.lexer.consume();
                }
            }
        }
        is_integer
    }

    fn consume_minus(&mut self) -> TokenKind<'s> {
        let c = self.lexer.cur();
        let c2 = self.lexer.peek();
        let c3 = self.lexer.peek2();
        if start_number(c, c2, c3) {
            self.consume_numeric_token()
        } else if c2 == C_HYPHEN_MINUS && c3 == C_GREATER_THAN_SIGN {
            self.lexer.consume();
            self.lexer.consume();
            self.lexer.consume();
            TokenKind::Cdc
        } else if start_ident_sequence(c, c2, c3) {
            self.consume_ident_like()
        } else {
            self.consume_delim()
        }
    }

    fn consume_less_than_sign(&mut self) -> TokenKind<'s> {
        self.lexer.consume();
        if self.lexer.cur() == C_EXCLAMATION_MARK
            && self.lexer.peek() == C_HYPHEN_MINUS
            && self.lexer.peek2() == C_HYPHEN_MINUS
        {
            self.lexer.consume();
            self.lexer.consume();
            self.lexer.consume();
            return TokenKind::Cdo;
        }
        TokenKind::Delim(C_LESS_THAN_SIGN)
    }

    fn consume_at_sign(&mut self) -> TokenKind<'s> {
        self.lexer.consume();
        if start_ident_sequence(self.lexer.cur(), self.lexer.peek(), self.lexer.peek2()) {
            let start = self.lexer.cur_pos();
            self.consume_ident_sequence();
            return TokenKind::AtKeyword(self.slice(start, self.lexer.cur_pos()));
        }
        TokenKind::Delim(C_AT_SIGN)
    }

    fn consume_reverse_solidus(&mut self) -> TokenKind<'s> {
        if are_valid_escape(self.lexer.cur(), self.lexer.peek()) {
            return self.consume_ident_like();
        }
        let start = self.lexer.cur_pos();
        self.lexer.consume();
        self.report(start, self.lexer.cur_pos(), LexErrorKind::BadEscape);
        TokenKind::Delim(C_REVERSE_SOLIDUS)
    }

    fn consume_ident_like(&mut self) -> TokenKind<'s> {
        let start = self.lexer.cur_pos();
        self.consume_ident_sequence();
        let name = self.slice(start, self.lexer.cur_pos());
        if self.lexer.cur() != C_LEFT_PARENTHESIS {
            return TokenKind::Ident(name);
        }
        self.lexer.consume();
        if !name.eq_ignore_ascii_case("url") {
            return TokenKind::Function(name);
        }
        while is_white_space(self.lexer.cur()) && is_white_space(self.lexer.peek()) {
            self.lexer.consume();
        }
        let c = self.lexer.cur();
        let c2 = self.lexer.peek();
        if is_quote(c) || (is_white_space(c) && is_quote(c2)) {
            TokenKind::Function(name)
        } else {
            self.consume_url(start)
        }
    }

    fn consume_url(&mut self, start: Pos) -> TokenKind<'s> {
        self.lexer.consume_space();
        let content_start = self.lexer.cur_pos();
        loop {
            let c = self.lexer.cur();
            if c == C_RIGHT_PARENTHESIS {
                let content_end = self.lexer.cur_pos();
                self.lexer.consume();
                return TokenKind::Url(self.slice(content_start, content_end));
            }
            if c == C_EOF {
                let end = self.lexer.cur_pos();
                self.diagnostics.push(Diagnostic::new(
                    Range::new(start, end),
                    DiagnosticKind::UnbalancedBlock {
                        expected: C_RIGHT_PARENTHESIS,
                    },
                ));
                return TokenKind::Url(self.slice(content_start, end));
            }
            if is_white_space(c) {
                let content_end = self.lexer.cur_pos();
                self.lexer.consume_space();
                let c = self.lexer.cur();
                if c == C_RIGHT_PARENTHESIS || c == C_EOF {
                    if c == C_RIGHT_PARENTHESIS {
                        self.lexer.consume();
                    }
                    return TokenKind::Url(self.slice(content_start, content_end));
                }
                return self.consume_bad_url(start);
            }
            if is_quote(c) || c == C_LEFT_PARENTHESIS || is_non_printable(c) {
                return self.consume_bad_url(start);
            }
            if c == C_REVERSE_SOLIDUS {
                if !are_valid_escape(c, self.lexer.peek()) {
                    return self.consume_bad_url(start);
                }
                self.lexer.consume();
                self.consume_escaped();
                continue;
            }
            self.lexer.consume();
        }
    }

    fn consume_bad_url(&mut self, start: Pos) -> TokenKind<'s> {
        loop {
            let c = self.lexer.cur();
            if c == C_EOF {
                break;
            }
            if c == C_RIGHT_PARENTHESIS {
                self.lexer.consume();
                break;
            }
            if are_valid_escape(c, self.lexer.peek()) {
                self.lexer.consume();
                self.consume_escaped();
            } else {
                self.lexer.consume();
            }
        }
        self.report(start, self.lexer.cur_pos(), LexErrorKind::BadUrl);
        TokenKind::BadUrl
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

pub fn is_new_line(c: char) -> bool {
    c == C_LINE_FEED || c == C_CARRIAGE_RETURN || c == C_FORM_FEED
}

pub fn is_space(c: char) -> bool {
    c == C_TAB || c == C_SPACE
}

pub fn is_white_space(c: char) -> bool {
    is_new_line(c) || is_space(c)
}

pub fn is_quote(c: char) -> bool {
    c == C_QUOTATION_MARK || c == C_APOSTROPHE
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

pub fn is_ident_start(c: char) -> bool {
    c == C_LOW_LINE || c.is_ascii_alphabetic() || c >= '\u{80}'
}

pub fn is_ident(c: char) -> bool {
    is_ident_start(c) || is_digit(c) || c == C_HYPHEN_MINUS
}

pub fn is_non_printable(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{8}' | '\u{b}' | '\u{e}'..='\u{1f}' | '\u{7f}')
}

pub fn start_ident_sequence(c1: char, c2: char, c3: char) -> bool {
    if c1 == C_HYPHEN_MINUS {
        is_ident_start(c2) || c2 == C_HYPHEN_MINUS || are_valid_escape(c2, c3)
    } else {
        is_ident_start(c1) || are_valid_escape(c1, c2)
    }
}

pub fn are_valid_escape(c1: char, c2: char) -> bool {
    c1 == C_REVERSE_SOLIDUS && c2 != C_EOF && !is_new_line(c2)
}

pub fn start_number(c1: char, c2: char, c3: char) -> bool {
    if c1 == C_PLUS_SIGN || c1 == C_HYPHEN_MINUS {
        is_digit(c2) || (c2 == C_FULL_STOP && is_digit(c3))
    } else {
        is_digit(c1) || (c1 == C_FULL_STOP && is_digit(c2))
    }
}
