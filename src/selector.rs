use std::fmt;
use std::fmt::Write;

use crate::lexer::Token;
use crate::lexer::TokenKind;
use crate::lexer::C_ASTERISK;
use crate::lexer::C_FULL_STOP;
use crate::lexer::C_GREATER_THAN_SIGN;
use crate::lexer::C_PLUS_SIGN;
use crate::printer::Serializer;
use crate::printer::ToCss;
use crate::token_list::block_end;
use crate::token_list::split_top_level_commas;
use crate::token_list::trim_whitespace;
use crate::token_list::TokenList;
use crate::values::CssString;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectorList<'s>(pub Vec<Selector<'s>>);

/// Compound selectors joined by combinators, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector<'s> {
    pub components: Vec<Component<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component<'s> {
    Type(&'s str),
    Universal,
    /// `&`
    Nesting,
    Class(&'s str),
    Id(&'s str),
    Attribute(AttributeSelector<'s>),
    PseudoClass(&'s str),
    PseudoElement(&'s str),
    PseudoFunction {
        name: &'s str,
        argument: PseudoArgument<'s>,
    },
    PseudoElementFunction {
        name: &'s str,
        argument: TokenList<'s>,
    },
    Combinator(Combinator),
    /// Keyframe offset such as `50%`.
    Percentage(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PseudoArgument<'s> {
    Selectors(SelectorList<'s>),
    Tokens(TokenList<'s>),
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    NextSibling,
    SubsequentSibling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector<'s> {
    pub name: &'s str,
    pub matcher: Option<AttributeMatcher<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMatcher<'s> {
    pub operator: AttributeOperator,
    pub value: AttributeValue<'s>,
    pub case: Option<CaseSensitivity>,
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `=`
    Equal,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttributeOperator {
    fn from_prefix(c: char) -> Option<Self> {
        let operator = match c {
            '~' => AttributeOperator::Includes,
            '|' => AttributeOperator::DashMatch,
            '^' => AttributeOperator::Prefix,
            '$' => AttributeOperator::Suffix,
            '*' => AttributeOperator::Substring,
            _ => return None,
        };
        Some(operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeOperator::Equal => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue<'s> {
    Ident(&'s str),
    String(CssString<'s>),
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CaseSensitivity {
    /// `i`
    AsciiCaseInsensitive,
    /// `s`
    ExplicitCaseSensitive,
}

/// Functional pseudo-classes whose argument is itself a selector list.
const SELECTOR_LIST_PSEUDO_CLASSES: [&str; 9] = [
    "not",
    "is",
    "where",
    "has",
    "matches",
    "host",
    "host-context",
    "-webkit-any",
    "-moz-any",
];

/// Parses a rule prelude into a selector list. The error is a short message
/// for an `InvalidSelector` diagnostic.
pub fn parse_selector_list<'s>(tokens: &[Token<'s>]) -> Result<SelectorList<'s>, &'static str> {
    parse_list(tokens, false)
}

fn parse_list<'s>(tokens: &[Token<'s>], relative: bool) -> Result<SelectorList<'s>, &'static str> {
    split_top_level_commas(tokens)
        .into_iter()
        .map(|group| parse_selector(group, relative))
        .collect::<Result<Vec<_>, _>>()
        .map(SelectorList)
}

fn parse_selector<'s>(tokens: &[Token<'s>], relative: bool) -> Result<Selector<'s>, &'static str> {
    let tokens = trim_whitespace(tokens);
    let mut components = Vec::new();
    let mut pending: Option<Combinator> = None;
    let mut saw_whitespace = false;
    let mut compound_start = true;
    let mut i = 0;
    while i < tokens.len() {
        let kind = tokens[i].kind;
        if matches!(kind, TokenKind::Whitespace | TokenKind::Comment(_)) {
            saw_whitespace = true;
            i += 1;
            continue;
        }
        if let Some(combinator) = as_combinator(&kind) {
            if pending.is_some() {
                return Err("consecutive combinators");
            }
            if components.is_empty() && !relative {
                return Err("selector starts with a combinator");
            }
            pending = Some(combinator);
            i += 1;
            continue;
        }
        let combinator = match pending.take() {
            Some(combinator) => Some(combinator),
            None if saw_whitespace && !components.is_empty() => Some(Combinator::Descendant),
            None => None,
        };
        if let Some(combinator) = combinator {
            components.push(Component::Combinator(combinator));
            compound_start = true;
        }
        saw_whitespace = false;
        let (component, next) = parse_simple_selector(tokens, i, compound_start)?;
        components.push(component);
        compound_start = false;
        i = next;
    }
    if pending.is_some() {
        return Err("selector ends with a combinator");
    }
    if components.is_empty() {
        return Err("empty selector");
    }
    Ok(Selector { components })
}

fn as_combinator(kind: &TokenKind<'_>) -> Option<Combinator> {
    match kind {
        TokenKind::Delim(C_GREATER_THAN_SIGN) => Some(Combinator::Child),
        TokenKind::Delim(C_PLUS_SIGN) => Some(Combinator::NextSibling),
        TokenKind::Delim('~') => Some(Combinator::SubsequentSibling),
        _ => None,
    }
}

fn parse_simple_selector<'s>(
    tokens: &[Token<'s>],
    i: usize,
    compound_start: bool,
) -> Result<(Component<'s>, usize), &'static str> {
    let component = match tokens[i].kind {
        TokenKind::Ident(name) => {
            if !compound_start {
                return Err("type selector must come first in a compound selector");
            }
            Component::Type(name)
        }
        TokenKind::Delim(C_ASTERISK) => {
            if !compound_start {
                return Err("universal selector must come first in a compound selector");
            }
            Component::Universal
        }
        TokenKind::Delim('&') => Component::Nesting,
        TokenKind::Delim(C_FULL_STOP) => match tokens.get(i + 1).map(|t| t.kind) {
            Some(TokenKind::Ident(name)) => return Ok((Component::Class(name), i + 2)),
            _ => return Err("expected class name after '.'"),
        },
        TokenKind::Hash { value, is_id: true } => Component::Id(value),
        TokenKind::Hash { is_id: false, .. } => return Err("invalid id selector"),
        TokenKind::LeftSquare => {
            let end = block_end(tokens, i + 1).ok_or("unclosed attribute selector")?;
            let attribute = parse_attribute(&tokens[i + 1..end])?;
            return Ok((Component::Attribute(attribute), end + 1));
        }
        TokenKind::Colon => return parse_pseudo(tokens, i + 1),
        TokenKind::Percentage(numeric) => Component::Percentage(numeric.value),
        TokenKind::RightParenthesis | TokenKind::RightSquare | TokenKind::RightCurly => {
            return Err("unexpected closing bracket");
        }
        _ => return Err("unexpected token in selector"),
    };
    Ok((component, i + 1))
}

fn parse_pseudo<'s>(tokens: &[Token<'s>], i: usize) -> Result<(Component<'s>, usize), &'static str> {
    let element = matches!(tokens.get(i).map(|t| t.kind), Some(TokenKind::Colon));
    let i = if element { i + 1 } else { i };
    match tokens.get(i).map(|t| t.kind) {
        Some(TokenKind::Ident(name)) if element => Ok((Component::PseudoElement(name), i + 1)),
        Some(TokenKind::Ident(name)) => Ok((Component::PseudoClass(name), i + 1)),
        Some(TokenKind::Function(name)) => {
            let end = block_end(tokens, i + 1).ok_or("unclosed pseudo-class function")?;
            let inner = &tokens[i + 1..end];
            let component = if element {
                Component::PseudoElementFunction {
                    name,
                    argument: TokenList::from_tokens(inner),
                }
            } else {
                Component::PseudoFunction {
                    name,
                    argument: parse_pseudo_argument(name, inner)?,
                }
            };
            Ok((component, end + 1))
        }
        _ => Err("expected pseudo-class name after ':'"),
    }
}

fn parse_pseudo_argument<'s>(
    name: &str,
    inner: &[Token<'s>],
) -> Result<PseudoArgument<'s>, &'static str> {
    if SELECTOR_LIST_PSEUDO_CLASSES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
    {
        let relative = name.eq_ignore_ascii_case("has");
        return parse_list(inner, relative).map(PseudoArgument::Selectors);
    }
    Ok(PseudoArgument::Tokens(TokenList::from_tokens(inner)))
}

fn parse_attribute<'s>(inner: &[Token<'s>]) -> Result<AttributeSelector<'s>, &'static str> {
    let kinds: Vec<TokenKind<'s>> = inner
        .iter()
        .map(|token| token.kind)
        .filter(|kind| !matches!(kind, TokenKind::Whitespace | TokenKind::Comment(_)))
        .collect();
    let (name, rest) = match kinds.split_first() {
        Some((TokenKind::Ident(name), rest)) => (*name, rest),
        _ => return Err("expected attribute name"),
    };
    let (operator, rest) = match rest {
        [] => {
            return Ok(AttributeSelector {
                name,
                matcher: None,
            })
        }
        [TokenKind::Delim('='), rest @ ..] => (AttributeOperator::Equal, rest),
        [TokenKind::Delim(c), TokenKind::Delim('='), rest @ ..] => {
            let operator = AttributeOperator::from_prefix(*c).ok_or("invalid attribute operator")?;
            (operator, rest)
        }
        _ => return Err("invalid attribute operator"),
    };
    let (value, rest) = match rest {
        [TokenKind::Ident(value), rest @ ..] => (AttributeValue::Ident(value), rest),
        [TokenKind::String { value, quote }, rest @ ..] => (
            AttributeValue::String(CssString {
                value,
                quote: *quote,
            }),
            rest,
        ),
        _ => return Err("expected attribute value"),
    };
    let case = match rest {
        [] => None,
        [flag] if flag.is_ident("i") => Some(CaseSensitivity::AsciiCaseInsensitive),
        [flag] if flag.is_ident("s") => Some(CaseSensitivity::ExplicitCaseSensitive),
        _ => return Err("unexpected token in attribute selector"),
    };
    Ok(AttributeSelector {
        name,
        matcher: Some(AttributeMatcher {
            operator,
            value,
            case,
        }),
    })
}

impl ToCss for SelectorList<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                dest.delim(',', false)?;
            }
            selector.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for Selector<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            match component {
                Component::Combinator(Combinator::Descendant) => dest.write_char(' ')?,
                Component::Combinator(combinator) => {
                    let c = match combinator {
                        Combinator::Child => '>',
                        Combinator::NextSibling => '+',
                        _ => '~',
                    };
                    dest.delim(c, i > 0)?;
                }
                component => component.to_css(dest)?,
            }
        }
        Ok(())
    }
}

impl ToCss for Component<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self {
            Component::Type(name) => dest.write_str(name),
            Component::Universal => dest.write_char('*'),
            Component::Nesting => dest.write_char('&'),
            Component::Class(name) => {
                dest.write_char('.')?;
                dest.write_str(name)
            }
            Component::Id(name) => {
                dest.write_char('#')?;
                dest.write_str(name)
            }
            Component::Attribute(attribute) => attribute.to_css(dest),
            Component::PseudoClass(name) => {
                dest.write_char(':')?;
                dest.write_str(name)
            }
            Component::PseudoElement(name) => {
                dest.write_str("::")?;
                dest.write_str(name)
            }
            Component::PseudoFunction { name, argument } => {
                dest.write_char(':')?;
                dest.write_str(name)?;
                dest.write_char('(')?;
                match argument {
                    PseudoArgument::Selectors(selectors) => selectors.to_css(dest)?,
                    PseudoArgument::Tokens(tokens) => tokens.to_css(dest)?,
                }
                dest.write_char(')')
            }
            Component::PseudoElementFunction { name, argument } => {
                dest.write_str("::")?;
                dest.write_str(name)?;
                dest.write_char('(')?;
                argument.to_css(dest)?;
                dest.write_char(')')
            }
            Component::Combinator(_) => Ok(()),
            Component::Percentage(value) => {
                dest.write_number(*value)?;
                dest.write_char('%')
            }
        }
    }
}

impl ToCss for AttributeSelector<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_char('[')?;
        dest.write_str(self.name)?;
        if let Some(matcher) = &self.matcher {
            dest.write_str(matcher.operator.as_str())?;
            match matcher.value {
                AttributeValue::Ident(value) => dest.write_str(value)?,
                AttributeValue::String(string) => dest.write_string(string.value, string.quote)?,
            }
            match matcher.case {
                Some(CaseSensitivity::AsciiCaseInsensitive) => dest.write_str(" i")?,
                Some(CaseSensitivity::ExplicitCaseSensitive) => dest.write_str(" s")?,
                None => {}
            }
        }
        dest.write_char(']')
    }
}
