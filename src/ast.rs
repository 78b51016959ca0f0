use std::fmt;
use std::fmt::Write;

use crate::media::MediaList;
use crate::parser::parse_stylesheet;
use crate::parser::ParseResult;
use crate::parser::ParserOptions;
use crate::printer::Serializer;
use crate::printer::SerializerOptions;
use crate::printer::ToCss;
use crate::selector::SelectorList;
use crate::token_list::TokenList;
use crate::values::Value;

/// A parsed stylesheet. Nodes borrow from the source text and keep rules and
/// declarations in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet<'s> {
    pub rules: Vec<Rule<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule<'s> {
    Qualified(QualifiedRule<'s>),
    At(AtRule<'s>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedRule<'s> {
    pub selectors: SelectorList<'s>,
    pub declarations: DeclarationBlock<'s>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AtRule<'s> {
    /// Name without the `@`, as written.
    pub name: &'s str,
    pub prelude: AtRulePrelude<'s>,
    /// `None` for statement at-rules ending in `;`.
    pub block: Option<AtRuleBlock<'s>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtRulePrelude<'s> {
    Media(MediaList<'s>),
    Tokens(TokenList<'s>),
}

impl AtRulePrelude<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            AtRulePrelude::Media(media) => media.queries.is_empty(),
            AtRulePrelude::Tokens(tokens) => tokens.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtRuleBlock<'s> {
    Rules(Stylesheet<'s>),
    Declarations(DeclarationBlock<'s>),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclarationBlock<'s> {
    pub declarations: Vec<Declaration<'s>>,
}

impl<'s> DeclarationBlock<'s> {
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration<'s>> {
        self.declarations.iter()
    }

    /// The last declaration of `name`, the one that wins the cascade.
    pub fn get(&self, name: &str) -> Option<&Declaration<'s>> {
        self.declarations
            .iter()
            .rev()
            .find(|declaration| declaration.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration<'s> {
    pub name: &'s str,
    pub value: Value<'s>,
    pub important: bool,
}

impl<'s> Stylesheet<'s> {
    pub fn parse(input: &'s str, options: &ParserOptions) -> ParseResult<'s> {
        parse_stylesheet(input, options)
    }

    /// Serializes the whole stylesheet. Pretty output ends with a newline.
    pub fn serialize(&self, options: SerializerOptions) -> Result<String, fmt::Error> {
        let mut css = self.to_css_string(options)?;
        if !options.minify && !css.is_empty() {
            css.push('\n');
        }
        Ok(css)
    }
}

impl ToCss for Stylesheet<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                dest.blank_line()?;
                dest.newline()?;
            }
            rule.to_css(dest)?;
        }
        Ok(())
    }
}

impl ToCss for Rule<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self {
            Rule::Qualified(rule) => rule.to_css(dest),
            Rule::At(rule) => rule.to_css(dest),
        }
    }
}

impl ToCss for QualifiedRule<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        self.selectors.to_css(dest)?;
        dest.whitespace()?;
        self.declarations.to_css(dest)
    }
}

impl ToCss for AtRule<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_char('@')?;
        dest.write_str(self.name)?;
        if !self.prelude.is_empty() {
            dest.write_char(' ')?;
            match &self.prelude {
                AtRulePrelude::Media(media) => media.to_css(dest)?,
                AtRulePrelude::Tokens(tokens) => tokens.to_css(dest)?,
            }
        }
        match &self.block {
            None => dest.write_char(';'),
            Some(AtRuleBlock::Declarations(declarations)) => {
                dest.whitespace()?;
                declarations.to_css(dest)
            }
            Some(AtRuleBlock::Rules(rules)) => {
                dest.whitespace()?;
                write_block(dest, rules.rules.is_empty(), |dest| rules.to_css(dest))
            }
        }
    }
}

impl ToCss for DeclarationBlock<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        write_block(dest, self.is_empty(), |dest| {
            let last = self.declarations.len().saturating_sub(1);
            for (i, declaration) in self.declarations.iter().enumerate() {
                if i > 0 {
                    dest.newline()?;
                }
                declaration.to_css(dest)?;
                if i != last || !dest.minify() {
                    dest.write_char(';')?;
                }
            }
            Ok(())
        })
    }
}

impl ToCss for Declaration<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        dest.write_str(self.name)?;
        if matches!(&self.value, Value::Raw(text) if text.is_empty()) {
            dest.write_char(':')?;
        } else {
            dest.delim(':', false)?;
            self.value.to_css(dest)?;
        }
        if self.important {
            dest.whitespace()?;
            dest.write_str("!important")?;
        }
        Ok(())
    }
}

fn write_block<W: Write>(
    dest: &mut Serializer<'_, W>,
    is_empty: bool,
    body: impl FnOnce(&mut Serializer<'_, W>) -> fmt::Result,
) -> fmt::Result {
    dest.write_char('{')?;
    if !is_empty {
        dest.indent();
        dest.newline()?;
        body(dest)?;
        dest.dedent();
    }
    dest.newline()?;
    dest.write_char('}')
}
