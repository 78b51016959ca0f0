pub mod color;

use std::borrow::Cow;
use std::fmt;
use std::fmt::Write;

use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::lexer::C_ASTERISK;
use crate::lexer::C_HYPHEN_MINUS;
use crate::lexer::C_PLUS_SIGN;
use crate::lexer::C_SOLIDUS;
use crate::printer::Serializer;
use crate::printer::ToCss;
use crate::token_list::block_end;
use crate::token_list::is_balanced;
use crate::token_list::split_top_level_commas;
use crate::token_list::trim_whitespace;

use self::color::is_color_function;
use self::color::named_color;
use self::color::parse_hex;
use self::color::resolve_function;
use self::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum Value<'s> {
    Number(f64),
    Dimension(Dimension<'s>),
    Percentage(f64),
    Color(Color<'s>),
    Keyword(CssWideKeyword),
    Ident(&'s str),
    String(CssString<'s>),
    Url(Url<'s>),
    Function(Function<'s>),
    Var(Variable<'s>),
    /// One of `/`, `+`, `-` or `*` between two components.
    Delimiter(char),
    List(ValueList<'s>),
    /// Text the value parser does not model, emitted as is.
    Raw(Cow<'s, str>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimension<'s> {
    pub value: f64,
    pub unit: &'s str,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CssWideKeyword {
    Initial,
    Inherit,
    Unset,
    Revert,
    RevertLayer,
}

impl CssWideKeyword {
    pub fn from_ident(ident: &str) -> Option<Self> {
        let keyword = match ident.to_ascii_lowercase().as_str() {
            "initial" => CssWideKeyword::Initial,
            "inherit" => CssWideKeyword::Inherit,
            "unset" => CssWideKeyword::Unset,
            "revert" => CssWideKeyword::Revert,
            "revert-layer" => CssWideKeyword::RevertLayer,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CssWideKeyword::Initial => "initial",
            CssWideKeyword::Inherit => "inherit",
            CssWideKeyword::Unset => "unset",
            CssWideKeyword::Revert => "revert",
            CssWideKeyword::RevertLayer => "revert-layer",
        }
    }
}

/// String contents with escapes left as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CssString<'s> {
    pub value: &'s str,
    pub quote: char,
}

/// Target of a `url()`, whether it was written quoted or bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Url<'s> {
    pub value: &'s str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function<'s> {
    pub name: &'s str,
    /// One entry per top-level comma separated argument.
    pub arguments: Vec<Value<'s>>,
}

/// `var(--name)` with an optional fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<'s> {
    pub name: &'s str,
    pub fallback: Option<Box<Value<'s>>>,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Separator {
    Space,
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueList<'s> {
    pub separator: Separator,
    pub items: Vec<Value<'s>>,
}

impl<'s> Value<'s> {
    pub fn as_ident(&self) -> Option<&'s str> {
        match self {
            Value::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Value::Raw(_))
    }

    /// The items of a space separated list, or the value itself.
    pub fn space_items(&self) -> &[Value<'s>] {
        match self {
            Value::List(ValueList {
                separator: Separator::Space,
                items,
            }) => items,
            value => std::slice::from_ref(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("unbalanced parentheses or brackets")]
    Unbalanced,
    #[error("empty value")]
    Empty,
    #[error("unsupported value syntax")]
    Unsupported,
}

/// Parses a declaration value. `tokens` may carry surrounding whitespace and
/// comments.
pub fn parse_value<'s>(source: &'s str, tokens: &[Token<'s>]) -> Result<Value<'s>, ValueError> {
    if !is_balanced(tokens) {
        return Err(ValueError::Unbalanced);
    }
    ValueParser { source }.parse_comma_list(tokens)
}

/// The source text of `tokens` without surrounding whitespace. Comments
/// inside the run are replaced by a single space.
pub fn raw_text<'s>(source: &'s str, tokens: &[Token<'s>]) -> Cow<'s, str> {
    let tokens = trim_whitespace(tokens);
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Cow::Borrowed("");
    };
    if !tokens
        .iter()
        .any(|token| matches!(token.kind, TokenKind::Comment(_)))
    {
        let start = first.range.start as usize;
        let end = last.range.end as usize;
        if let Some(text) = source.get(start..end) {
            return Cow::Borrowed(text);
        }
    }
    let mut text = String::new();
    for token in tokens {
        match token.kind {
            TokenKind::Comment(_) | TokenKind::Whitespace => {
                if !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => text.push_str(token.raw),
        }
    }
    Cow::Owned(text)
}

struct ValueParser<'s> {
    source: &'s str,
}

impl<'s> ValueParser<'s> {
    fn parse_comma_list(&self, tokens: &[Token<'s>]) -> Result<Value<'s>, ValueError> {
        let mut groups = split_top_level_commas(tokens);
        if groups.len() == 1 {
            return self.parse_space_list(groups.remove(0));
        }
        let items = groups
            .into_iter()
            .map(|group| self.parse_space_list(group))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::List(ValueList {
            separator: Separator::Comma,
            items,
        }))
    }

    fn parse_space_list(&self, tokens: &[Token<'s>]) -> Result<Value<'s>, ValueError> {
        let tokens = trim_whitespace(tokens);
        if tokens.is_empty() {
            return Err(ValueError::Empty);
        }
        let mut items = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::Whitespace | TokenKind::Comment(_) => i += 1,
                TokenKind::Function(name) => {
                    let end = block_end(tokens, i + 1).ok_or(ValueError::Unbalanced)?;
                    items.push(self.parse_function(name, &tokens[i + 1..end])?);
                    i = end + 1;
                }
                kind => {
                    items.push(parse_component(kind)?);
                    i += 1;
                }
            }
        }
        if items.len() == 1 {
            return Ok(items.remove(0));
        }
        Ok(Value::List(ValueList {
            separator: Separator::Space,
            items,
        }))
    }

    fn parse_function(&self, name: &'s str, inner: &[Token<'s>]) -> Result<Value<'s>, ValueError> {
        if name.eq_ignore_ascii_case("url") {
            return match trim_whitespace(inner) {
                [Token {
                    kind: TokenKind::String { value, .. },
                    ..
                }] => Ok(Value::Url(Url { value })),
                _ => Err(ValueError::Unsupported),
            };
        }
        if name.eq_ignore_ascii_case("var") {
            return self.parse_var(inner);
        }
        let function = Function {
            name,
            arguments: self.parse_arguments(inner)?,
        };
        if is_color_function(name) {
            let rgba = resolve_function(&function);
            return Ok(Value::Color(Color::Function { function, rgba }));
        }
        Ok(Value::Function(function))
    }

    fn parse_arguments(&self, inner: &[Token<'s>]) -> Result<Vec<Value<'s>>, ValueError> {
        if trim_whitespace(inner).is_empty() {
            return Ok(Vec::new());
        }
        split_top_level_commas(inner)
            .into_iter()
            .map(|group| self.parse_space_list(group))
            .collect()
    }

    fn parse_var(&self, inner: &[Token<'s>]) -> Result<Value<'s>, ValueError> {
        let inner = trim_whitespace(inner);
        let Some((first, rest)) = inner.split_first() else {
            return Err(ValueError::Empty);
        };
        let name = match first.kind {
            TokenKind::Ident(name) if name.starts_with("--") => name,
            _ => return Err(ValueError::Unsupported),
        };
        let rest = trim_whitespace(rest);
        let fallback = match rest.split_first() {
            None => None,
            Some((comma, fallback)) if comma.kind == TokenKind::Comma => {
                let fallback = if trim_whitespace(fallback).is_empty() {
                    Value::Raw(Cow::Borrowed(""))
                } else {
                    self.parse_comma_list(fallback)
                        .unwrap_or_else(|_| Value::Raw(raw_text(self.source, fallback)))
                };
                Some(Box::new(fallback))
            }
            Some(_) => return Err(ValueError::Unsupported),
        };
        Ok(Value::Var(Variable { name, fallback }))
    }
}

fn parse_component<'s>(kind: TokenKind<'s>) -> Result<Value<'s>, ValueError> {
    let value = match kind {
        TokenKind::Number(numeric) => Value::Number(numeric.value),
        TokenKind::Percentage(numeric) => Value::Percentage(numeric.value),
        TokenKind::Dimension(numeric, unit) => Value::Dimension(Dimension {
            value: numeric.value,
            unit,
        }),
        TokenKind::Ident(ident) => parse_ident(ident),
        TokenKind::Hash { value, .. } => {
            let rgba = parse_hex(value).ok_or(ValueError::Unsupported)?;
            Value::Color(Color::Hex {
                digits: value,
                rgba,
            })
        }
        TokenKind::String { value, quote } => Value::String(CssString { value, quote }),
        TokenKind::Url(value) => Value::Url(Url { value }),
        TokenKind::Delim(c @ (C_SOLIDUS | C_PLUS_SIGN | C_HYPHEN_MINUS | C_ASTERISK)) => {
            Value::Delimiter(c)
        }
        _ => return Err(ValueError::Unsupported),
    };
    Ok(value)
}

fn parse_ident(ident: &str) -> Value<'_> {
    if let Some(keyword) = CssWideKeyword::from_ident(ident) {
        return Value::Keyword(keyword);
    }
    if let Some(rgba) = named_color(ident) {
        return Value::Color(Color::Named { name: ident, rgba });
    }
    Value::Ident(ident)
}

impl ToCss for Value<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self {
            Value::Number(number) => dest.write_number(*number),
            Value::Dimension(dimension) => dimension.to_css(dest),
            Value::Percentage(percentage) => {
                dest.write_number(*percentage)?;
                dest.write_char('%')
            }
            Value::Color(color) => color.to_css(dest),
            Value::Keyword(keyword) => dest.write_str(keyword.as_str()),
            Value::Ident(ident) => dest.write_str(ident),
            Value::String(string) => dest.write_string(string.value, string.quote),
            Value::Url(url) => dest.write_url(url.value),
            Value::Function(function) => function.to_css(dest),
            Value::Var(variable) => variable.to_css(dest),
            Value::Delimiter(c) => dest.write_char(*c),
            Value::List(list) => list.to_css(dest),
            Value::Raw(text) => dest.write_str(text),
        }
    }
}

impl ToCss for Dimension<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_number(self.value)?;
        dest.write_str(self.unit)
    }
}

impl ToCss for Function<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_str(self.name)?;
        dest.write_char('(')?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                dest.delim(',', false)?;
            }
            argument.to_css(dest)?;
        }
        dest.write_char(')')
    }
}

impl ToCss for Variable<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_str("var(")?;
        dest.write_str(self.name)?;
        match self.fallback.as_deref() {
            Some(Value::Raw(text)) if text.is_empty() => dest.write_char(',')?,
            Some(fallback) => {
                dest.delim(',', false)?;
                fallback.to_css(dest)?;
            }
            None => {}
        }
        dest.write_char(')')
    }
}

impl ToCss for ValueList<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                match self.separator {
                    Separator::Comma => dest.delim(',', false)?,
                    Separator::Space => {
                        let previous = &self.items[i - 1];
                        if !(dest.minify() && (is_tight(previous) || is_tight(item))) {
                            dest.write_char(' ')?;
                        }
                    }
                }
            }
            item.to_css(dest)?;
        }
        Ok(())
    }
}

/// Delimiters that never need surrounding whitespace.
fn is_tight(value: &Value<'_>) -> bool {
    matches!(value, Value::Delimiter(C_SOLIDUS | C_ASTERISK))
}
