use std::fmt;
use std::fmt::Write;

use smallvec::SmallVec;

use crate::lexer::C_PLUS_SIGN;
use crate::lexer::Numeric;
use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::printer::Serializer;
use crate::printer::ToCss;

/// A run of component tokens kept as written, with comments and whitespace
/// collapsed into single spaces. Used where the structure is not modelled,
/// such as most at-rule preludes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenList<'s>(pub Vec<TokenKind<'s>>);

impl<'s> TokenList<'s> {
    pub fn from_tokens(tokens: &[Token<'s>]) -> Self {
        let mut list: Vec<TokenKind<'s>> = Vec::with_capacity(tokens.len());
        for token in tokens {
            match token.kind {
                TokenKind::BadString | TokenKind::BadUrl | TokenKind::Eof => continue,
                // A comment still separates the tokens around it.
                TokenKind::Whitespace | TokenKind::Comment(_) => {
                    if matches!(list.last(), None | Some(TokenKind::Whitespace)) {
                        continue;
                    }
                    list.push(TokenKind::Whitespace);
                }
                kind => list.push(kind),
            }
        }
        if list.last() == Some(&TokenKind::Whitespace) {
            list.pop();
        }
        Self(list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ToCss for TokenList<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, kind) in self.0.iter().enumerate() {
            if kind.is_whitespace() && dest.minify() {
                let after_open = i > 0
                    && matches!(
                        self.0[i - 1],
                        TokenKind::LeftParenthesis
                            | TokenKind::Function(_)
                            | TokenKind::LeftSquare
                            | TokenKind::Comma
                            | TokenKind::Colon
                    );
                let before_close = matches!(
                    self.0.get(i + 1),
                    Some(TokenKind::RightParenthesis | TokenKind::RightSquare | TokenKind::Comma)
                );
                if after_open || before_close {
                    continue;
                }
            }
            kind.to_css(dest)?;
        }
        Ok(())
    }
}

/// An explicit `+` is kept: it separates the terms of `An+B` in `2n+1`.
fn write_numeric<W: Write>(numeric: &Numeric<'_>, dest: &mut Serializer<'_, W>) -> fmt::Result {
    if !dest.minify() {
        return dest.write_str(numeric.repr);
    }
    if numeric.repr.starts_with(C_PLUS_SIGN) {
        dest.write_char(C_PLUS_SIGN)?;
    }
    dest.write_number(numeric.value)
}

impl ToCss for TokenKind<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => dest.write_str(name),
            TokenKind::Function(name) => {
                dest.write_str(name)?;
                dest.write_char('(')
            }
            TokenKind::AtKeyword(name) => {
                dest.write_char('@')?;
                dest.write_str(name)
            }
            TokenKind::Hash { value, .. } => {
                dest.write_char('#')?;
                dest.write_str(value)
            }
            TokenKind::String { value, quote } => dest.write_string(value, *quote),
            TokenKind::Url(value) => dest.write_url(value),
            TokenKind::Number(numeric) => write_numeric(numeric, dest),
            TokenKind::Percentage(numeric) => {
                write_numeric(numeric, dest)?;
                dest.write_char('%')
            }
            TokenKind::Dimension(numeric, unit) => {
                write_numeric(numeric, dest)?;
                dest.write_str(unit)
            }
            TokenKind::Delim(c) => dest.write_char(*c),
            TokenKind::Whitespace => dest.write_char(' '),
            TokenKind::Colon => dest.write_char(':'),
            TokenKind::Semicolon => dest.write_char(';'),
            TokenKind::Comma => dest.write_char(','),
            TokenKind::LeftParenthesis => dest.write_char('('),
            TokenKind::RightParenthesis => dest.write_char(')'),
            TokenKind::LeftSquare => dest.write_char('['),
            TokenKind::RightSquare => dest.write_char(']'),
            TokenKind::LeftCurly => dest.write_char('{'),
            TokenKind::RightCurly => dest.write_char('}'),
            TokenKind::Cdo => dest.write_str("<!--"),
            TokenKind::Cdc => dest.write_str("-->"),
            TokenKind::Comment(_) | TokenKind::BadString | TokenKind::BadUrl | TokenKind::Eof => {
                Ok(())
            }
        }
    }
}

/// Index of the token closing the block whose opener sits right before
/// `start`.
pub fn block_end(tokens: &[Token<'_>], start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        if token.kind.closing_char().is_some() {
            depth += 1;
        } else if token.kind.as_closing_char().is_some() {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Whether every `(`, `[` and `{` is closed by its own kind, in order.
pub fn is_balanced(tokens: &[Token<'_>]) -> bool {
    let mut stack: SmallVec<[char; 8]> = SmallVec::new();
    for token in tokens {
        if let Some(close) = token.kind.closing_char() {
            stack.push(close);
        } else if let Some(close) = token.kind.as_closing_char() {
            if stack.pop() != Some(close) {
                return false;
            }
        }
    }
    stack.is_empty()
}

/// Splits on commas that are not nested inside any block.
pub fn split_top_level_commas<'a, 's>(tokens: &'a [Token<'s>]) -> Vec<&'a [Token<'s>]> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind.closing_char().is_some() {
            depth += 1;
        } else if token.kind.as_closing_char().is_some() {
            depth = depth.saturating_sub(1);
        } else if token.kind == TokenKind::Comma && depth == 0 {
            groups.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    groups.push(&tokens[start..]);
    groups
}

pub fn trim_whitespace<'a, 's>(tokens: &'a [Token<'s>]) -> &'a [Token<'s>] {
    let is_trivia = |token: &Token<'_>| {
        matches!(token.kind, TokenKind::Whitespace | TokenKind::Comment(_))
    };
    let start = tokens.iter().position(|t| !is_trivia(t)).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(|t| !is_trivia(t)).map_or(start, |i| i + 1);
    &tokens[start..end]
}
