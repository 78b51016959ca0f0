//! Typed CSS Text and Text Decoration properties.
//!
//! Each type parses from an already parsed [`Value`] and converts back into
//! its canonical [`Value`], which is how the minifier normalizes them.

use bitflags::bitflags;

use crate::values::Separator;
use crate::values::Value;
use crate::values::ValueList;

macro_rules! keyword_property {
    ($(#[$meta:meta])* $name:ident { $($keyword:literal => $variant:ident,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn from_ident(ident: &str) -> Option<Self> {
                $(
                    if ident.eq_ignore_ascii_case($keyword) {
                        return Some($name::$variant);
                    }
                )+
                None
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $keyword,)+
                }
            }

            pub fn parse(value: &Value<'_>) -> Option<Self> {
                match value.space_items() {
                    [item] => item.as_ident().and_then(Self::from_ident),
                    _ => None,
                }
            }

            pub fn to_value<'s>(&self) -> Value<'s> {
                Value::Ident(self.as_str())
            }
        }
    };
}

// https://www.w3.org/TR/css-text-3/#text-transform-property
keyword_property!(TextTransformCase {
    "none" => None,
    "uppercase" => Uppercase,
    "lowercase" => Lowercase,
    "capitalize" => Capitalize,
});

bitflags! {
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
    pub struct TextTransformOther: u8 {
        const FULL_WIDTH = 1 << 0;
        const FULL_SIZE_KANA = 1 << 1;
    }
}

impl TextTransformOther {
    fn from_ident(ident: &str) -> Option<Self> {
        if ident.eq_ignore_ascii_case("full-width") {
            Some(TextTransformOther::FULL_WIDTH)
        } else if ident.eq_ignore_ascii_case("full-size-kana") {
            Some(TextTransformOther::FULL_SIZE_KANA)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct TextTransform {
    pub case: TextTransformCase,
    pub other: TextTransformOther,
}

impl TextTransform {
    pub fn parse(value: &Value<'_>) -> Option<Self> {
        let mut case = None;
        let mut other = TextTransformOther::empty();
        for item in value.space_items() {
            let ident = item.as_ident()?;
            if case.is_none() {
                if let Some(c) = TextTransformCase::from_ident(ident) {
                    case = Some(c);
                    continue;
                }
            }
            let flag = TextTransformOther::from_ident(ident)?;
            if other.contains(flag) {
                return None;
            }
            other |= flag;
        }
        // `none` excludes everything else.
        if case == Some(TextTransformCase::None) && !other.is_empty() {
            return None;
        }
        if case.is_none() && other.is_empty() {
            return None;
        }
        Some(TextTransform {
            case: case.unwrap_or(TextTransformCase::None),
            other,
        })
    }

    pub fn to_value<'s>(&self) -> Value<'s> {
        let mut items = Vec::new();
        if self.case != TextTransformCase::None || self.other.is_empty() {
            items.push(self.case.to_value());
        }
        if self.other.contains(TextTransformOther::FULL_WIDTH) {
            items.push(Value::Ident("full-width"));
        }
        if self.other.contains(TextTransformOther::FULL_SIZE_KANA) {
            items.push(Value::Ident("full-size-kana"));
        }
        space_list(items)
    }
}

// https://www.w3.org/TR/css-text-3/#white-space-property
keyword_property!(WhiteSpace {
    "normal" => Normal,
    "pre" => Pre,
    "nowrap" => NoWrap,
    "pre-wrap" => PreWrap,
    "break-spaces" => BreakSpaces,
    "pre-line" => PreLine,
});

keyword_property!(WordBreak {
    "normal" => Normal,
    "keep-all" => KeepAll,
    "break-all" => BreakAll,
    "break-word" => BreakWord,
});

keyword_property!(LineBreak {
    "auto" => Auto,
    "loose" => Loose,
    "normal" => Normal,
    "strict" => Strict,
    "anywhere" => Anywhere,
});

keyword_property!(Hyphens {
    "none" => None,
    "manual" => Manual,
    "auto" => Auto,
});

keyword_property!(
    /// Also used for the legacy `word-wrap` alias.
    OverflowWrap {
        "normal" => Normal,
        "break-word" => BreakWord,
        "anywhere" => Anywhere,
    }
);

keyword_property!(TextAlign {
    "start" => Start,
    "end" => End,
    "left" => Left,
    "right" => Right,
    "center" => Center,
    "justify" => Justify,
    "match-parent" => MatchParent,
    "justify-all" => JustifyAll,
});

keyword_property!(TextAlignLast {
    "auto" => Auto,
    "start" => Start,
    "end" => End,
    "left" => Left,
    "right" => Right,
    "center" => Center,
    "justify" => Justify,
    "match-parent" => MatchParent,
});

keyword_property!(TextJustify {
    "auto" => Auto,
    "none" => None,
    "inter-word" => InterWord,
    "inter-character" => InterCharacter,
});

// https://www.w3.org/TR/css-text-decor-4/#text-decoration-style-property
keyword_property!(TextDecorationStyle {
    "solid" => Solid,
    "double" => Double,
    "dotted" => Dotted,
    "dashed" => Dashed,
    "wavy" => Wavy,
});

/// `word-spacing` and `letter-spacing`.
#[derive(Debug, Clone, PartialEq)]
pub enum Spacing<'s> {
    Normal,
    Length(Value<'s>),
}

impl<'s> Spacing<'s> {
    pub fn parse(value: &Value<'s>) -> Option<Self> {
        match value.space_items() {
            [item] if is_ident(item, "normal") => Some(Spacing::Normal),
            [item] if is_length(item) => Some(Spacing::Length(item.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value<'s> {
        match self {
            Spacing::Normal => Value::Ident("normal"),
            Spacing::Length(length) => length.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextIndent<'s> {
    pub value: Value<'s>,
    pub hanging: bool,
    pub each_line: bool,
}

impl<'s> TextIndent<'s> {
    pub fn parse(value: &Value<'s>) -> Option<Self> {
        let mut length = None;
        let mut hanging = false;
        let mut each_line = false;
        for item in value.space_items() {
            if length.is_none() && is_length_percentage(item) {
                length = Some(item.clone());
            } else if !hanging && is_ident(item, "hanging") {
                hanging = true;
            } else if !each_line && is_ident(item, "each-line") {
                each_line = true;
            } else {
                return None;
            }
        }
        Some(TextIndent {
            value: length?,
            hanging,
            each_line,
        })
    }

    pub fn to_value(&self) -> Value<'s> {
        let mut items = vec![self.value.clone()];
        if self.hanging {
            items.push(Value::Ident("hanging"));
        }
        if self.each_line {
            items.push(Value::Ident("each-line"));
        }
        space_list(items)
    }
}

// https://www.w3.org/TR/css-text-decor-4/#text-decoration-line-property
bitflags! {
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
    pub struct TextDecorationLine: u8 {
        const UNDERLINE = 1 << 0;
        const OVERLINE = 1 << 1;
        const LINE_THROUGH = 1 << 2;
        const BLINK = 1 << 3;
        const SPELLING_ERROR = 1 << 4;
        const GRAMMAR_ERROR = 1 << 5;
    }
}

impl TextDecorationLine {
    const EXCLUSIVE: TextDecorationLine =
        TextDecorationLine::SPELLING_ERROR.union(TextDecorationLine::GRAMMAR_ERROR);

    pub fn parse(value: &Value<'_>) -> Option<Self> {
        let items = value.space_items();
        match Self::parse_prefix(items) {
            Some((line, consumed)) if consumed == items.len() => Some(line),
            _ => None,
        }
    }

    /// Parses the leading line keywords of `items`, returning how many were used.
    fn parse_prefix(items: &[Value<'_>]) -> Option<(Self, usize)> {
        let mut line = TextDecorationLine::empty();
        let mut consumed = 0;
        for item in items {
            let Some(ident) = item.as_ident() else {
                break;
            };
            let exclusive = match ident.to_ascii_lowercase().as_str() {
                "none" => Some(TextDecorationLine::empty()),
                "spelling-error" => Some(TextDecorationLine::SPELLING_ERROR),
                "grammar-error" => Some(TextDecorationLine::GRAMMAR_ERROR),
                _ => None,
            };
            if let Some(flag) = exclusive {
                if consumed > 0 {
                    return None;
                }
                line = flag;
                consumed = 1;
                // Nothing may follow an exclusive keyword.
                if items.get(1).and_then(Value::as_ident).is_some_and(is_line_keyword) {
                    return None;
                }
                break;
            }
            let flag = match ident.to_ascii_lowercase().as_str() {
                "underline" => TextDecorationLine::UNDERLINE,
                "overline" => TextDecorationLine::OVERLINE,
                "line-through" => TextDecorationLine::LINE_THROUGH,
                "blink" => TextDecorationLine::BLINK,
                _ => break,
            };
            if line.contains(flag) {
                return None;
            }
            line |= flag;
            consumed += 1;
        }
        (consumed > 0).then_some((line, consumed))
    }

    pub fn to_value<'s>(&self) -> Value<'s> {
        if self.is_empty() {
            return Value::Ident("none");
        }
        if self.intersects(Self::EXCLUSIVE) {
            let keyword = if self.contains(TextDecorationLine::SPELLING_ERROR) {
                "spelling-error"
            } else {
                "grammar-error"
            };
            return Value::Ident(keyword);
        }
        let mut items = Vec::new();
        for (flag, keyword) in [
            (TextDecorationLine::UNDERLINE, "underline"),
            (TextDecorationLine::OVERLINE, "overline"),
            (TextDecorationLine::LINE_THROUGH, "line-through"),
            (TextDecorationLine::BLINK, "blink"),
        ] {
            if self.contains(flag) {
                items.push(Value::Ident(keyword));
            }
        }
        space_list(items)
    }
}

fn is_line_keyword(ident: &str) -> bool {
    [
        "none",
        "underline",
        "overline",
        "line-through",
        "blink",
        "spelling-error",
        "grammar-error",
    ]
    .iter()
    .any(|keyword| keyword.eq_ignore_ascii_case(ident))
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextDecorationThickness<'s> {
    Auto,
    FromFont,
    LengthPercentage(Value<'s>),
}

impl<'s> TextDecorationThickness<'s> {
    fn parse_item(item: &Value<'s>) -> Option<Self> {
        if is_ident(item, "auto") {
            Some(TextDecorationThickness::Auto)
        } else if is_ident(item, "from-font") {
            Some(TextDecorationThickness::FromFont)
        } else if is_length_percentage(item) {
            Some(TextDecorationThickness::LengthPercentage(item.clone()))
        } else {
            None
        }
    }

    pub fn parse(value: &Value<'s>) -> Option<Self> {
        match value.space_items() {
            [item] => Self::parse_item(item),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value<'s> {
        match self {
            TextDecorationThickness::Auto => Value::Ident("auto"),
            TextDecorationThickness::FromFont => Value::Ident("from-font"),
            TextDecorationThickness::LengthPercentage(value) => value.clone(),
        }
    }
}

/// The `text-decoration` shorthand. Longhands left out take their initial
/// value and are omitted again on output.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDecoration<'s> {
    pub line: TextDecorationLine,
    pub thickness: TextDecorationThickness<'s>,
    pub style: TextDecorationStyle,
    /// `None` stands for `currentcolor`.
    pub color: Option<Value<'s>>,
}

impl<'s> TextDecoration<'s> {
    pub fn parse(value: &Value<'s>) -> Option<Self> {
        let items = value.space_items();
        let mut line = None;
        let mut thickness = None;
        let mut style = None;
        let mut color = None;
        let mut i = 0;
        while i < items.len() {
            if line.is_none() {
                if let Some((parsed, consumed)) = TextDecorationLine::parse_prefix(&items[i..]) {
                    line = Some(parsed);
                    i += consumed;
                    continue;
                }
            }
            let item = &items[i];
            i += 1;
            if thickness.is_none() {
                if let Some(parsed) = TextDecorationThickness::parse_item(item) {
                    thickness = Some(parsed);
                    continue;
                }
            }
            if style.is_none() {
                if let Some(parsed) = item.as_ident().and_then(TextDecorationStyle::from_ident) {
                    style = Some(parsed);
                    continue;
                }
            }
            if color.is_none() && is_color(item) {
                color = Some(item.clone());
                continue;
            }
            return None;
        }
        let color = color.filter(|color| !is_ident(color, "currentcolor"));
        Some(TextDecoration {
            line: line.unwrap_or(TextDecorationLine::empty()),
            thickness: thickness.unwrap_or(TextDecorationThickness::Auto),
            style: style.unwrap_or(TextDecorationStyle::Solid),
            color,
        })
    }

    pub fn to_value(&self) -> Value<'s> {
        let line = self.line.to_value();
        if self.line.is_empty() {
            return line;
        }
        let mut items = match line {
            Value::List(list) => list.items,
            line => vec![line],
        };
        if self.thickness != TextDecorationThickness::Auto {
            items.push(self.thickness.to_value());
        }
        if self.style != TextDecorationStyle::Solid {
            items.push(self.style.to_value());
        }
        if let Some(color) = &self.color {
            items.push(color.clone());
        }
        space_list(items)
    }
}

static TEXT_PROPERTIES: &[&str] = &[
    "text-transform",
    "white-space",
    "word-break",
    "line-break",
    "hyphens",
    "overflow-wrap",
    "word-wrap",
    "text-align",
    "text-align-last",
    "text-justify",
    "word-spacing",
    "letter-spacing",
    "text-indent",
    "text-decoration-line",
    "text-decoration-style",
    "text-decoration-thickness",
    "text-decoration",
];

pub fn is_text_property(name: &str) -> bool {
    TEXT_PROPERTIES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// The canonical form of a text property value, or `None` when the property
/// is not a text property or the value does not match its grammar.
pub fn canonicalize<'s>(property: &str, value: &Value<'s>) -> Option<Value<'s>> {
    let property = property.to_ascii_lowercase();
    let canonical = match property.as_str() {
        "text-transform" => TextTransform::parse(value)?.to_value(),
        "white-space" => WhiteSpace::parse(value)?.to_value(),
        "word-break" => WordBreak::parse(value)?.to_value(),
        "line-break" => LineBreak::parse(value)?.to_value(),
        "hyphens" => Hyphens::parse(value)?.to_value(),
        "overflow-wrap" | "word-wrap" => OverflowWrap::parse(value)?.to_value(),
        "text-align" => TextAlign::parse(value)?.to_value(),
        "text-align-last" => TextAlignLast::parse(value)?.to_value(),
        "text-justify" => TextJustify::parse(value)?.to_value(),
        "word-spacing" | "letter-spacing" => Spacing::parse(value)?.to_value(),
        "text-indent" => TextIndent::parse(value)?.to_value(),
        "text-decoration-line" => TextDecorationLine::parse(value)?.to_value(),
        "text-decoration-style" => TextDecorationStyle::parse(value)?.to_value(),
        "text-decoration-thickness" => TextDecorationThickness::parse(value)?.to_value(),
        "text-decoration" => TextDecoration::parse(value)?.to_value(),
        _ => return None,
    };
    Some(canonical)
}

fn space_list(mut items: Vec<Value<'_>>) -> Value<'_> {
    if items.len() == 1 {
        return items.remove(0);
    }
    Value::List(ValueList {
        separator: Separator::Space,
        items,
    })
}

fn is_ident(value: &Value<'_>, keyword: &str) -> bool {
    value
        .as_ident()
        .is_some_and(|ident| ident.eq_ignore_ascii_case(keyword))
}

const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "ex", "rex", "ch", "rch", "cap", "ic", "lh", "rlh", "vw", "vh", "vi",
    "vb", "vmin", "vmax", "svw", "svh", "lvw", "lvh", "dvw", "dvh", "cqw", "cqh", "cqi", "cqb",
    "cqmin", "cqmax", "cm", "mm", "q", "in", "pt", "pc",
];

const MATH_FUNCTIONS: &[&str] = &["calc", "min", "max", "clamp"];

fn is_length(value: &Value<'_>) -> bool {
    match value {
        Value::Dimension(dimension) => LENGTH_UNITS
            .iter()
            .any(|unit| unit.eq_ignore_ascii_case(dimension.unit)),
        Value::Number(number) => *number == 0.0,
        Value::Function(function) => MATH_FUNCTIONS
            .iter()
            .any(|name| name.eq_ignore_ascii_case(function.name)),
        _ => false,
    }
}

fn is_length_percentage(value: &Value<'_>) -> bool {
    matches!(value, Value::Percentage(_)) || is_length(value)
}

fn is_color(value: &Value<'_>) -> bool {
    matches!(value, Value::Color(_)) || is_ident(value, "currentcolor")
}
