use std::fmt;
use std::fmt::Write;

use crate::lexer::is_non_printable;
use crate::lexer::is_white_space;
use crate::lexer::C_APOSTROPHE;
use crate::lexer::C_LEFT_PARENTHESIS;
use crate::lexer::C_QUOTATION_MARK;
use crate::lexer::C_REVERSE_SOLIDUS;
use crate::lexer::C_RIGHT_PARENTHESIS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    pub minify: bool,
    pub indent_width: usize,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            minify: false,
            indent_width: 2,
        }
    }
}

impl SerializerOptions {
    pub fn minified() -> Self {
        Self {
            minify: true,
            ..Self::default()
        }
    }
}

pub struct Serializer<'a, W> {
    dest: &'a mut W,
    minify: bool,
    indent_width: usize,
    indent: usize,
}

impl<'a, W: Write> Serializer<'a, W> {
    pub fn new(dest: &'a mut W, options: SerializerOptions) -> Self {
        Self {
            dest,
            minify: options.minify,
            indent_width: options.indent_width,
            indent: 0,
        }
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn write_str(&mut self, s: &str) -> fmt::Result {
        self.dest.write_str(s)
    }

    pub fn write_char(&mut self, c: char) -> fmt::Result {
        self.dest.write_char(c)
    }

    /// A space that is only there for readability.
    pub fn whitespace(&mut self) -> fmt::Result {
        if self.minify {
            return Ok(());
        }
        self.write_char(' ')
    }

    pub fn delim(&mut self, c: char, space_before: bool) -> fmt::Result {
        if space_before {
            self.whitespace()?;
        }
        self.write_char(c)?;
        self.whitespace()
    }

    pub fn newline(&mut self) -> fmt::Result {
        if self.minify {
            return Ok(());
        }
        self.write_char('\n')?;
        for _ in 0..self.indent {
            self.write_char(' ')?;
        }
        Ok(())
    }

    /// A newline without indentation, used to leave a blank line between rules.
    pub fn blank_line(&mut self) -> fmt::Result {
        if self.minify {
            return Ok(());
        }
        self.write_char('\n')
    }

    pub fn indent(&mut self) {
        self.indent += self.indent_width;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(self.indent_width);
    }

    pub fn write_number(&mut self, value: f64) -> fmt::Result {
        let number = format_number(value, self.minify);
        self.write_str(&number)
    }

    pub fn write_string(&mut self, value: &str, quote: char) -> fmt::Result {
        self.write_char(quote)?;
        self.write_str(value)?;
        self.write_char(quote)
    }

    pub fn write_url(&mut self, value: &str) -> fmt::Result {
        self.write_str("url(")?;
        if is_unquoted_url_safe(value) {
            self.write_str(value)?;
        } else if has_unescaped(value, C_QUOTATION_MARK) {
            self.write_string(value, C_APOSTROPHE)?;
        } else {
            self.write_string(value, C_QUOTATION_MARK)?;
        }
        self.write_char(C_RIGHT_PARENTHESIS)
    }
}

pub trait ToCss {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result;

    fn to_css_string(&self, options: SerializerOptions) -> Result<String, fmt::Error> {
        let mut css = String::new();
        let mut serializer = Serializer::new(&mut css, options);
        self.to_css(&mut serializer)?;
        Ok(css)
    }
}

/// Shortest round-trip representation; minified output also drops the
/// leading zero of fractions.
pub fn format_number(value: f64, minify: bool) -> String {
    // Normalizes -0 to 0.
    let value = if value == 0.0 { 0.0 } else { value };
    let number = value.to_string();
    if !minify {
        return number;
    }
    if let Some(fraction) = number.strip_prefix("0.") {
        return format!(".{fraction}");
    }
    if let Some(fraction) = number.strip_prefix("-0.") {
        return format!("-.{fraction}");
    }
    number
}

fn is_unquoted_url_safe(value: &str) -> bool {
    !value.is_empty()
        && !value.chars().any(|c| {
            is_white_space(c)
                || c == C_QUOTATION_MARK
                || c == C_APOSTROPHE
                || c == C_LEFT_PARENTHESIS
                || c == C_RIGHT_PARENTHESIS
                || is_non_printable(c)
        })
}

fn has_unescaped(value: &str, needle: char) -> bool {
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == C_REVERSE_SOLIDUS {
            chars.next();
        } else if c == needle {
            return true;
        }
    }
    false
}
