use smallvec::SmallVec;

use crate::ast::AtRule;
use crate::ast::AtRuleBlock;
use crate::ast::AtRulePrelude;
use crate::ast::Declaration;
use crate::ast::DeclarationBlock;
use crate::ast::QualifiedRule;
use crate::ast::Rule;
use crate::ast::Stylesheet;
use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::Range;
use crate::lexer::Pos;
use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::lexer::Tokenizer;
use crate::lexer::TokenizerOptions;
use crate::lexer::C_EXCLAMATION_MARK;
use crate::lexer::C_RIGHT_CURLY;
use crate::media::parse_media_list;
use crate::properties::at_rule_block_kind;
use crate::properties::is_custom_property;
use crate::properties::is_known_property;
use crate::properties::BlockKind;
use crate::selector::parse_selector_list;
use crate::token_list::is_balanced;
use crate::token_list::trim_whitespace;
use crate::token_list::TokenList;
use crate::values::parse_value;
use crate::values::raw_text;
use crate::values::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Blocks and brackets nested deeper than this abort the parse.
    pub max_nesting_depth: usize,
    pub line_comments: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: 128,
            line_comments: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult<'s> {
    pub stylesheet: Stylesheet<'s>,
    /// Sorted by source position.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses `input` into a stylesheet. Syntax errors are recovered from and
/// reported in [`ParseResult::diagnostics`].
pub fn parse_stylesheet<'s>(input: &'s str, options: &ParserOptions) -> ParseResult<'s> {
    let mut parser = Parser::new(input, options);
    let rules = parser.parse_rule_list(0, false);
    parser.finish(Stylesheet { rules })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    /// A `{` opening the block of the construct.
    Block,
    Semicolon,
    /// A `}` closing the enclosing block, left unconsumed.
    BlockEnd,
    Eof,
}

/// The component tokens of a prelude or declaration.
#[derive(Debug)]
struct Segment<'s> {
    tokens: Vec<Token<'s>>,
    terminator: Terminator,
    terminator_range: Range,
    /// The first closing character that was missing, if any.
    unbalanced: Option<char>,
}

impl Segment<'_> {
    fn range(&self) -> Range {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => first.range.join(&last.range),
            _ => self.terminator_range,
        }
    }
}

struct Parser<'s> {
    tokenizer: Tokenizer<'s>,
    lookahead: Option<Token<'s>>,
    max_nesting_depth: usize,
    diagnostics: Vec<Diagnostic>,
    /// Set once `Eof` was produced or the parse was aborted.
    done: bool,
    aborted: bool,
}

impl<'s> Parser<'s> {
    fn new(input: &'s str, options: &ParserOptions) -> Self {
        let tokenizer = Tokenizer::with_options(
            input,
            TokenizerOptions {
                line_comments: options.line_comments,
            },
        );
        Self {
            tokenizer,
            lookahead: None,
            max_nesting_depth: options.max_nesting_depth,
            diagnostics: Vec::new(),
            done: false,
            aborted: false,
        }
    }

    fn finish(mut self, stylesheet: Stylesheet<'s>) -> ParseResult<'s> {
        self.diagnostics.extend(self.tokenizer.take_diagnostics());
        self.diagnostics.sort_by_key(|diagnostic| diagnostic.range().start);
        ParseResult {
            stylesheet,
            diagnostics: self.diagnostics,
        }
    }

    fn source(&self) -> &'s str {
        self.tokenizer.source()
    }

    fn eof_token(&self) -> Token<'s> {
        let end = self.source().len() as Pos;
        Token {
            kind: TokenKind::Eof,
            range: Range::new(end, end),
            raw: "",
        }
    }

    fn next(&mut self) -> Token<'s> {
        if let Some(token) = self.lookahead.take() {
            return token;
        }
        if self.done {
            return self.eof_token();
        }
        let token = self.tokenizer.next_token();
        if !self.tokenizer.diagnostics().is_empty() {
            self.diagnostics.extend(self.tokenizer.take_diagnostics());
        }
        if token.kind == TokenKind::Eof {
            self.done = true;
        }
        token
    }

    fn report(&mut self, range: Range, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::new(range, kind));
    }

    fn abort(&mut self, range: Range) {
        self.report(
            range,
            DiagnosticKind::DepthExceeded {
                max_depth: self.max_nesting_depth,
            },
        );
        self.aborted = true;
        self.done = true;
        self.lookahead = None;
    }

    /// Checks that a block opened at `depth` stays within the nesting limit.
    fn enter_block(&mut self, depth: usize, range: Range) -> bool {
        if depth + 1 > self.max_nesting_depth {
            self.abort(range);
            return false;
        }
        true
    }

    /// Collects component tokens up to the end of a prelude or declaration.
    /// Nested blocks are kept whole. A `;` or `}` while only parentheses or
    /// brackets are open closes them implicitly.
    fn collect(&mut self, depth: usize, stop_at_curly: bool, stop_at_semicolon: bool) -> Segment<'s> {
        let mut tokens = Vec::new();
        let mut stack: SmallVec<[char; 16]> = SmallVec::new();
        let mut unbalanced = None;
        loop {
            let token = self.next();
            let in_curly = stack.contains(&C_RIGHT_CURLY);
            let terminator = match token.kind {
                TokenKind::Eof => {
                    if let Some(&close) = stack.last() {
                        unbalanced.get_or_insert(close);
                    }
                    Some(Terminator::Eof)
                }
                TokenKind::LeftCurly if stack.is_empty() && stop_at_curly => Some(Terminator::Block),
                TokenKind::Semicolon if !in_curly && stop_at_semicolon => {
                    if let Some(&close) = stack.last() {
                        unbalanced.get_or_insert(close);
                    }
                    Some(Terminator::Semicolon)
                }
                TokenKind::RightCurly if !in_curly => {
                    if let Some(&close) = stack.last() {
                        unbalanced.get_or_insert(close);
                    }
                    self.lookahead = Some(token);
                    Some(Terminator::BlockEnd)
                }
                _ => None,
            };
            if let Some(terminator) = terminator {
                return Segment {
                    tokens,
                    terminator,
                    terminator_range: token.range,
                    unbalanced,
                };
            }

            if let Some(close) = token.kind.closing_char() {
                if depth + stack.len() + 1 > self.max_nesting_depth {
                    self.abort(token.range);
                    return Segment {
                        tokens,
                        terminator: Terminator::Eof,
                        terminator_range: token.range,
                        unbalanced,
                    };
                }
                stack.push(close);
            } else if let Some(close) = token.kind.as_closing_char() {
                if stack.last() == Some(&close) {
                    stack.pop();
                } else if let Some(index) = stack.iter().rposition(|&c| c == close) {
                    unbalanced.get_or_insert(stack[stack.len() - 1]);
                    stack.truncate(index);
                } else {
                    unbalanced.get_or_insert(close);
                }
            }
            tokens.push(token);
        }
    }

    fn parse_rule_list(&mut self, depth: usize, nested: bool) -> Vec<Rule<'s>> {
        let mut rules = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Whitespace | TokenKind::Comment(_) => {}
                TokenKind::Eof => {
                    if nested && !self.aborted {
                        self.report(
                            token.range,
                            DiagnosticKind::UnbalancedBlock {
                                expected: C_RIGHT_CURLY,
                            },
                        );
                    }
                    break;
                }
                TokenKind::RightCurly if nested => break,
                TokenKind::RightCurly => {
                    tracing::debug!(offset = token.range.start, "skipping stray '}}'");
                    self.report(token.range, DiagnosticKind::UnbalancedBlock { expected: '{' });
                }
                TokenKind::Cdo | TokenKind::Cdc if !nested => {}
                TokenKind::AtKeyword(name) => {
                    if let Some(rule) = self.parse_at_rule(token, name, depth) {
                        rules.push(rule);
                    }
                }
                _ => {
                    self.lookahead = Some(token);
                    if let Some(rule) = self.parse_qualified_rule(depth) {
                        rules.push(Rule::Qualified(rule));
                    }
                }
            }
        }
        rules
    }

    fn parse_qualified_rule(&mut self, depth: usize) -> Option<QualifiedRule<'s>> {
        let segment = self.collect(depth, true, false);
        if segment.terminator != Terminator::Block {
            if !self.aborted {
                self.report(
                    segment.range(),
                    DiagnosticKind::InvalidSelector {
                        message: "expected '{' after selector",
                    },
                );
            }
            return None;
        }
        if !self.enter_block(depth, segment.terminator_range) {
            return None;
        }
        let declarations = self.parse_declaration_list(depth + 1);

        if segment.unbalanced.is_some() {
            self.report(
                segment.range(),
                DiagnosticKind::InvalidSelector {
                    message: "unbalanced brackets in selector",
                },
            );
            return None;
        }
        match parse_selector_list(&segment.tokens) {
            Ok(selectors) => Some(QualifiedRule {
                selectors,
                declarations,
            }),
            Err(message) => {
                let range = segment.range();
                tracing::debug!(offset = range.start, reason = message, "dropping rule with invalid selector");
                self.report(range, DiagnosticKind::InvalidSelector { message });
                None
            }
        }
    }

    fn parse_at_rule(&mut self, at: Token<'s>, name: &'s str, depth: usize) -> Option<Rule<'s>> {
        let segment = self.collect(depth, true, true);
        if let Some(expected) = segment.unbalanced {
            self.report(
                at.range.join(&segment.range()),
                DiagnosticKind::UnbalancedBlock { expected },
            );
        }
        let prelude_tokens = trim_whitespace(&segment.tokens);
        let prelude = if name.eq_ignore_ascii_case("media") {
            match parse_media_list(prelude_tokens) {
                Ok(media) => AtRulePrelude::Media(media),
                Err(message) => {
                    tracing::debug!(reason = message, "keeping unparsed media query");
                    AtRulePrelude::Tokens(TokenList::from_tokens(prelude_tokens))
                }
            }
        } else {
            AtRulePrelude::Tokens(TokenList::from_tokens(prelude_tokens))
        };

        let block = match segment.terminator {
            Terminator::Block => {
                if !self.enter_block(depth, segment.terminator_range) {
                    return None;
                }
                let block = match at_rule_block_kind(name) {
                    BlockKind::Rules => AtRuleBlock::Rules(Stylesheet {
                        rules: self.parse_rule_list(depth + 1, true),
                    }),
                    BlockKind::Declarations => {
                        AtRuleBlock::Declarations(self.parse_declaration_list(depth + 1))
                    }
                };
                Some(block)
            }
            Terminator::Semicolon | Terminator::BlockEnd | Terminator::Eof => None,
        };
        Some(Rule::At(AtRule {
            name,
            prelude,
            block,
        }))
    }

    fn parse_declaration_list(&mut self, depth: usize) -> DeclarationBlock<'s> {
        let mut declarations = Vec::new();
        loop {
            let token = self.next();
            match token.kind {
                TokenKind::Whitespace | TokenKind::Comment(_) | TokenKind::Semicolon => {}
                TokenKind::RightCurly => break,
                TokenKind::Eof => {
                    if !self.aborted {
                        self.report(
                            token.range,
                            DiagnosticKind::UnbalancedBlock {
                                expected: C_RIGHT_CURLY,
                            },
                        );
                    }
                    break;
                }
                TokenKind::AtKeyword(name) => {
                    let start = token.range;
                    self.parse_at_rule(token, name, depth);
                    if !self.aborted {
                        self.report(
                            start,
                            DiagnosticKind::InvalidDeclaration {
                                message: "at-rules are not allowed in a declaration block",
                            },
                        );
                    }
                }
                _ => {
                    self.lookahead = Some(token);
                    if let Some(declaration) = self.parse_declaration(depth) {
                        declarations.push(declaration);
                    }
                }
            }
        }
        DeclarationBlock { declarations }
    }

    fn parse_declaration(&mut self, depth: usize) -> Option<Declaration<'s>> {
        let segment = self.collect(depth, false, true);
        if self.aborted {
            return None;
        }
        let range = segment.range();
        let tokens = trim_whitespace(&segment.tokens);

        let (name, rest) = match tokens.split_first() {
            Some((
                Token {
                    kind: TokenKind::Ident(name),
                    ..
                },
                rest,
            )) => (*name, rest),
            _ => return self.invalid_declaration(range, "expected a property name"),
        };
        let value_tokens = match trim_whitespace(rest).split_first() {
            Some((
                Token {
                    kind: TokenKind::Colon,
                    ..
                },
                value,
            )) => value,
            _ => return self.invalid_declaration(range, "expected ':' after the property name"),
        };
        if segment.unbalanced.is_some() || !is_balanced(value_tokens) {
            return self.invalid_declaration(range, "unbalanced parentheses or brackets in value");
        }
        if value_tokens
            .iter()
            .any(|token| matches!(token.kind, TokenKind::BadString | TokenKind::BadUrl))
        {
            return self.invalid_declaration(range, "invalid string or url in value");
        }

        let (value_tokens, important) = strip_important(value_tokens);
        let value_tokens = trim_whitespace(value_tokens);
        let custom = is_custom_property(name);
        if value_tokens.is_empty() && !custom {
            return self.invalid_declaration(range, "empty value");
        }

        let source = self.source();
        let value = if is_known_property(name) {
            parse_value(source, value_tokens).unwrap_or_else(|error| {
                tracing::debug!(property = name, %error, "keeping value as raw text");
                Value::Raw(raw_text(source, value_tokens))
            })
        } else {
            Value::Raw(raw_text(source, value_tokens))
        };
        Some(Declaration {
            name,
            value,
            important,
        })
    }

    fn invalid_declaration(&mut self, range: Range, message: &'static str) -> Option<Declaration<'s>> {
        tracing::debug!(offset = range.start, reason = message, "dropping declaration");
        self.report(range, DiagnosticKind::InvalidDeclaration { message });
        None
    }
}

/// Splits a trailing `!important`, which may be separated by whitespace or
/// comments.
fn strip_important<'a, 's>(tokens: &'a [Token<'s>]) -> (&'a [Token<'s>], bool) {
    let significant = |token: &&Token<'_>| {
        !matches!(token.kind, TokenKind::Whitespace | TokenKind::Comment(_))
    };
    let mut iter = tokens.iter().enumerate().rev().filter(|(_, t)| significant(t));
    match (iter.next(), iter.next()) {
        (Some((_, last)), Some((bang, delim)))
            if last.kind.is_ident("important") && delim.kind.is_delim(C_EXCLAMATION_MARK) =>
        {
            (&tokens[..bang], true)
        }
        _ => (tokens, false),
    }
}
