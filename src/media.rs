use std::fmt;
use std::fmt::Write;

use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::printer::Serializer;
use crate::printer::ToCss;
use crate::token_list::block_end;
use crate::token_list::split_top_level_commas;
use crate::token_list::trim_whitespace;
use crate::token_list::TokenList;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaList<'s> {
    pub queries: Vec<MediaQuery<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery<'s> {
    pub qualifier: Option<Qualifier>,
    pub media_type: Option<&'s str>,
    pub condition: Option<MediaCondition<'s>>,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Qualifier {
    Not,
    Only,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCondition<'s> {
    Feature(MediaFeature<'s>),
    Not(Box<MediaCondition<'s>>),
    And(Vec<MediaCondition<'s>>),
    Or(Vec<MediaCondition<'s>>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaFeature<'s> {
    /// `(name: value)`
    Plain {
        name: &'s str,
        value: TokenList<'s>,
    },
    /// `(name)`
    Boolean(&'s str),
    /// `(width >= 600px)` and friends, kept as written.
    Range(TokenList<'s>),
}

pub fn parse_media_list<'s>(tokens: &[Token<'s>]) -> Result<MediaList<'s>, &'static str> {
    if trim_whitespace(tokens).is_empty() {
        return Ok(MediaList::default());
    }
    let queries = split_top_level_commas(tokens)
        .into_iter()
        .map(parse_media_query)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MediaList { queries })
}

fn parse_media_query<'s>(tokens: &[Token<'s>]) -> Result<MediaQuery<'s>, &'static str> {
    let mut cursor = Cursor::new(tokens);
    let qualifier = match (cursor.peek(), cursor.peek_nth(1)) {
        (Some(TokenKind::Ident(word)), Some(TokenKind::Ident(_))) => {
            let qualifier = if word.eq_ignore_ascii_case("not") {
                Some(Qualifier::Not)
            } else if word.eq_ignore_ascii_case("only") {
                Some(Qualifier::Only)
            } else {
                None
            };
            if qualifier.is_some() {
                cursor.bump();
            }
            qualifier
        }
        _ => None,
    };

    let query = match cursor.peek() {
        Some(TokenKind::Ident(media_type)) if !media_type.eq_ignore_ascii_case("not") => {
            cursor.bump();
            let condition = match cursor.peek() {
                Some(kind) if kind.is_ident("and") => {
                    cursor.bump();
                    Some(parse_condition(&mut cursor, false)?)
                }
                _ => None,
            };
            MediaQuery {
                qualifier,
                media_type: Some(media_type),
                condition,
            }
        }
        _ if qualifier.is_some() => return Err("expected media type"),
        _ => MediaQuery {
            qualifier: None,
            media_type: None,
            condition: Some(parse_condition(&mut cursor, true)?),
        },
    };
    if cursor.peek().is_some() {
        return Err("unexpected token in media query");
    }
    Ok(query)
}

fn parse_condition<'s>(
    cursor: &mut Cursor<'_, 's>,
    allow_or: bool,
) -> Result<MediaCondition<'s>, &'static str> {
    if matches!(cursor.peek(), Some(kind) if kind.is_ident("not")) {
        cursor.bump();
        let inner = parse_in_parens(cursor)?;
        return Ok(MediaCondition::Not(Box::new(inner)));
    }
    let mut conditions = vec![parse_in_parens(cursor)?];
    let mut is_or = None;
    while let Some(kind) = cursor.peek() {
        let or = if kind.is_ident("and") {
            false
        } else if allow_or && kind.is_ident("or") {
            true
        } else {
            break;
        };
        if is_or.is_some_and(|is_or| is_or != or) {
            return Err("cannot mix 'and' and 'or' without parentheses");
        }
        is_or = Some(or);
        cursor.bump();
        conditions.push(parse_in_parens(cursor)?);
    }
    Ok(match is_or {
        None => conditions.remove(0),
        Some(false) => MediaCondition::And(conditions),
        Some(true) => MediaCondition::Or(conditions),
    })
}

fn parse_in_parens<'s>(cursor: &mut Cursor<'_, 's>) -> Result<MediaCondition<'s>, &'static str> {
    let inner = cursor.parenthesized()?;
    let mut inner_cursor = Cursor::new(inner);
    let nested = match inner_cursor.peek() {
        Some(TokenKind::LeftParenthesis) => true,
        Some(kind) => kind.is_ident("not"),
        None => false,
    };
    if nested {
        let condition = parse_condition(&mut inner_cursor, true)?;
        if inner_cursor.peek().is_some() {
            return Err("unexpected token in media condition");
        }
        return Ok(condition);
    }
    parse_feature(inner).map(MediaCondition::Feature)
}

fn parse_feature<'s>(inner: &[Token<'s>]) -> Result<MediaFeature<'s>, &'static str> {
    let inner = trim_whitespace(inner);
    match inner {
        [] => return Err("empty media feature"),
        [Token {
            kind: TokenKind::Ident(name),
            ..
        }] => return Ok(MediaFeature::Boolean(name)),
        _ => {}
    }
    let mut cursor = Cursor::new(inner);
    if let (Some(TokenKind::Ident(name)), Some(TokenKind::Colon)) = (cursor.peek(), cursor.peek_nth(1)) {
        cursor.bump();
        cursor.bump();
        let value = trim_whitespace(&inner[cursor.pos..]);
        if value.is_empty() {
            return Err("missing media feature value");
        }
        return Ok(MediaFeature::Plain {
            name,
            value: TokenList::from_tokens(value),
        });
    }
    let is_range = inner
        .iter()
        .any(|token| matches!(token.kind, TokenKind::Delim('<' | '>' | '=')));
    if is_range {
        return Ok(MediaFeature::Range(TokenList::from_tokens(inner)));
    }
    Err("invalid media feature")
}

/// Walks significant tokens, skipping whitespace and comments.
struct Cursor<'a, 's> {
    tokens: &'a [Token<'s>],
    pos: usize,
}

impl<'a, 's> Cursor<'a, 's> {
    fn new(tokens: &'a [Token<'s>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn skip_trivia(&mut self) {
        while matches!(
            self.tokens.get(self.pos).map(|t| t.kind),
            Some(TokenKind::Whitespace | TokenKind::Comment(_))
        ) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<TokenKind<'s>> {
        self.peek_nth(0)
    }

    fn peek_nth(&mut self, n: usize) -> Option<TokenKind<'s>> {
        self.skip_trivia();
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .filter(|kind| !matches!(kind, TokenKind::Whitespace | TokenKind::Comment(_)))
            .nth(n)
    }

    fn bump(&mut self) {
        self.skip_trivia();
        self.pos += 1;
    }

    /// Consumes a `( ... )` block and returns its contents.
    fn parenthesized(&mut self) -> Result<&'a [Token<'s>], &'static str> {
        if self.peek() != Some(TokenKind::LeftParenthesis) {
            return Err("expected '('");
        }
        let start = self.pos + 1;
        let end = block_end(self.tokens, start).ok_or("unclosed parenthesis")?;
        self.pos = end + 1;
        Ok(&self.tokens[start..end])
    }
}

impl ToCss for MediaList<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, query) in self.queries.iter().enumerate() {
            if i > 0 {
                dest.delim(',', false)?;
            }
            query.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for MediaQuery<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self.qualifier {
            Some(Qualifier::Not) => dest.write_str("not ")?,
            Some(Qualifier::Only) => dest.write_str("only ")?,
            None => {}
        }
        if let Some(media_type) = self.media_type {
            dest.write_str(media_type)?;
            if self.condition.is_some() {
                dest.write_str(" and ")?;
            }
        }
        if let Some(condition) = &self.condition {
            condition.to_css(dest)?;
        }
        Ok(())
    }
}

impl MediaCondition<'_> {
    fn to_css_in_parens<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        if let MediaCondition::Feature(feature) = self {
            return feature.to_css(dest);
        }
        dest.write_char('(')?;
        self.to_css(dest)?;
        dest.write_char(')')
    }
}

impl ToCss for MediaCondition<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        let (conditions, keyword) = match self {
            MediaCondition::Feature(feature) => return feature.to_css(dest),
            MediaCondition::Not(condition) => {
                dest.write_str("not ")?;
                return condition.to_css_in_parens(dest);
            }
            MediaCondition::And(conditions) => (conditions, " and "),
            MediaCondition::Or(conditions) => (conditions, " or "),
        };
        for (i, condition) in conditions.iter().enumerate() {
            if i > 0 {
                dest.write_str(keyword)?;
            }
            condition.to_css_in_parens(dest)?;
        }
        Ok(())
    }
}

impl ToCss for MediaFeature<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_char('(')?;
        match self {
            MediaFeature::Plain { name, value } => {
                dest.write_str(name)?;
                dest.delim(':', false)?;
                value.to_css(dest)?;
            }
            MediaFeature::Boolean(name) => dest.write_str(name)?,
            MediaFeature::Range(tokens) => tokens.to_css(dest)?,
        }
        dest.write_char(')')
    }
}
