use crate::ast::AtRuleBlock;
use crate::ast::DeclarationBlock;
use crate::ast::Rule;
use crate::ast::Stylesheet;
use crate::properties::is_color_property;
use crate::properties::text;
use crate::values::color::Color;
use crate::values::Value;

/// Rewrites values into forms that serialize shorter. Run before minified
/// serialization; applying it twice changes nothing.
pub fn minify_stylesheet(stylesheet: &mut Stylesheet<'_>) {
    for rule in &mut stylesheet.rules {
        match rule {
            Rule::Qualified(rule) => minify_declarations(&mut rule.declarations),
            Rule::At(rule) => match &mut rule.block {
                Some(AtRuleBlock::Rules(rules)) => minify_stylesheet(rules),
                Some(AtRuleBlock::Declarations(declarations)) => minify_declarations(declarations),
                None => {}
            },
        }
    }
}

fn minify_declarations(block: &mut DeclarationBlock<'_>) {
    for declaration in &mut block.declarations {
        if let Some(canonical) = text::canonicalize(declaration.name, &declaration.value) {
            declaration.value = canonical;
        }
        if is_color_property(declaration.name) {
            compute_colors(&mut declaration.value);
        }
    }
}

fn compute_colors(value: &mut Value<'_>) {
    match value {
        Value::Color(Color::Named { rgba, .. }) => {
            let rgba = *rgba;
            *value = Value::Color(Color::Rgba(rgba));
        }
        Value::List(list) => list.items.iter_mut().for_each(compute_colors),
        Value::Function(function) => function.arguments.iter_mut().for_each(compute_colors),
        Value::Var(variable) => {
            if let Some(fallback) = &mut variable.fallback {
                compute_colors(fallback);
            }
        }
        _ => {}
    }
}
