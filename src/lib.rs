mod ast;
mod diagnostics;
mod error;
mod lexer;
mod media;
mod minify;
mod parser;
mod printer;
pub mod properties;
mod selector;
mod token_list;
mod transform;
pub mod values;

pub use ast::AtRule;
pub use ast::AtRuleBlock;
pub use ast::AtRulePrelude;
pub use ast::Declaration;
pub use ast::DeclarationBlock;
pub use ast::QualifiedRule;
pub use ast::Rule;
pub use ast::Stylesheet;
pub use diagnostics::Diagnostic;
pub use diagnostics::DiagnosticKind;
pub use diagnostics::LexErrorKind;
pub use diagnostics::Range;
pub use error::Result;
pub use error::TransformError;
pub use lexer::Lexer;
pub use lexer::Numeric;
pub use lexer::Pos;
pub use lexer::Token;
pub use lexer::TokenKind;
pub use lexer::Tokenizer;
pub use lexer::TokenizerOptions;
pub use media::MediaCondition;
pub use media::MediaFeature;
pub use media::MediaList;
pub use media::MediaQuery;
pub use media::Qualifier;
pub use minify::minify_stylesheet;
pub use parser::parse_stylesheet;
pub use parser::ParseResult;
pub use parser::ParserOptions;
pub use printer::Serializer;
pub use printer::SerializerOptions;
pub use printer::ToCss;
pub use selector::AttributeMatcher;
pub use selector::AttributeOperator;
pub use selector::AttributeSelector;
pub use selector::AttributeValue;
pub use selector::CaseSensitivity;
pub use selector::Combinator;
pub use selector::Component;
pub use selector::PseudoArgument;
pub use selector::Selector;
pub use selector::SelectorList;
pub use token_list::TokenList;
pub use transform::transform;
pub use transform::TransformOptions;
pub use transform::TransformOutput;

pub fn collect_tokens(input: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(input);
    let tokens = tokenizer.by_ref().collect();
    (tokens, tokenizer.take_diagnostics())
}

/// Parses and re-serializes `input` with default parser options.
pub fn serialize_css(input: &str, options: SerializerOptions) -> Result<(String, Vec<Diagnostic>)> {
    let result = parse_stylesheet(input, &ParserOptions::default());
    let css = result.stylesheet.serialize(options)?;
    Ok((css, result.diagnostics))
}
