use std::borrow::Cow;

use crate::diagnostics::Diagnostic;
use crate::diagnostics::DiagnosticKind;
use crate::diagnostics::LexErrorKind;
use crate::diagnostics::Range;
use crate::error::Result;
use crate::error::TransformError;
use crate::lexer::Pos;
use crate::minify::minify_stylesheet;
use crate::parser::parse_stylesheet;
use crate::parser::ParserOptions;
use crate::printer::SerializerOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Only used to label diagnostics.
    pub filename: String,
    pub minify: bool,
    pub max_nesting_depth: usize,
    pub line_comments: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        let parser = ParserOptions::default();
        Self {
            filename: String::new(),
            minify: false,
            max_nesting_depth: parser.max_nesting_depth,
            line_comments: parser.line_comments,
        }
    }
}

impl TransformOptions {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions {
            max_nesting_depth: self.max_nesting_depth,
            line_comments: self.line_comments,
        }
    }

    pub fn serializer_options(&self) -> SerializerOptions {
        SerializerOptions {
            minify: self.minify,
            ..SerializerOptions::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: Vec<u8>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses `code`, optionally minifies it, and serializes it back to CSS.
///
/// Malformed input is recovered from and reported in
/// [`TransformOutput::diagnostics`]. Only input that cannot be parsed at all,
/// such as a string left open at the end or nesting beyond
/// [`TransformOptions::max_nesting_depth`], returns an error.
///
/// Source positions are `u32` byte offsets, so input longer than
/// `u32::MAX` bytes is rejected with [`TransformError::InputTooLarge`].
pub fn transform(code: &[u8], options: &TransformOptions) -> Result<TransformOutput> {
    let span = tracing::debug_span!("transform", filename = %options.filename);
    let _enter = span.enter();
    check_input_len(code.len())?;

    let source = String::from_utf8_lossy(code);
    let mut diagnostics = Vec::new();
    if let Cow::Owned(_) = source {
        let offset = std::str::from_utf8(code)
            .err()
            .map_or(0, |error| error.valid_up_to());
        diagnostics.push(Diagnostic::new(
            Range::new(offset as Pos, offset as Pos + 1),
            DiagnosticKind::Lex(LexErrorKind::InvalidUtf8),
        ));
    }

    let mut result = parse_stylesheet(&source, &options.parser_options());
    diagnostics.append(&mut result.diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.range().start);
    for diagnostic in &diagnostics {
        tracing::warn!(
            "{}",
            diagnostic.to_string_with_location(&options.filename, &source)
        );
    }

    let fatal = diagnostics
        .iter()
        .find(|diagnostic| diagnostic.kind().is_fatal())
        .map(|diagnostic| (diagnostic.kind().clone(), diagnostic.range().start));
    if let Some((kind, offset)) = fatal {
        let error = match kind {
            DiagnosticKind::DepthExceeded { max_depth } => TransformError::DepthExceeded {
                max_depth,
                diagnostics,
            },
            _ => TransformError::UnterminatedString {
                offset,
                diagnostics,
            },
        };
        return Err(error);
    }

    let mut stylesheet = result.stylesheet;
    if options.minify {
        minify_stylesheet(&mut stylesheet);
    }
    let css = stylesheet.serialize(options.serializer_options())?;
    tracing::debug!(
        input_len = code.len(),
        output_len = css.len(),
        rules = stylesheet.rules.len(),
        diagnostics = diagnostics.len(),
        "transformed stylesheet"
    );
    Ok(TransformOutput {
        code: css.into_bytes(),
        diagnostics,
    })
}

fn check_input_len(len: usize) -> Result<()> {
    if Pos::try_from(len).is_err() {
        return Err(TransformError::InputTooLarge { len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn input_length_must_fit_positions() {
        assert!(check_input_len(0).is_ok());
        assert!(check_input_len(Pos::MAX as usize).is_ok());
        let error = check_input_len(Pos::MAX as usize + 1).unwrap_err();
        assert!(matches!(error, TransformError::InputTooLarge { len } if len == 1 << 32));
        assert_eq!(
            error.to_string(),
            "Input of 4294967296 bytes exceeds the maximum of 4294967295 bytes"
        );
        assert!(error.diagnostics().is_empty());
    }
}
