use css_transformer::properties::at_rule_block_kind;
use css_transformer::properties::is_color_property;
use css_transformer::properties::is_custom_property;
use css_transformer::properties::is_known_property;
use css_transformer::properties::text::canonicalize;
use css_transformer::properties::text::is_text_property;
use css_transformer::properties::text::TextDecoration;
use css_transformer::properties::text::TextDecorationLine;
use css_transformer::properties::text::TextDecorationStyle;
use css_transformer::properties::text::TextDecorationThickness;
use css_transformer::properties::text::TextTransform;
use css_transformer::properties::text::TextTransformCase;
use css_transformer::properties::text::TextTransformOther;
use css_transformer::properties::text::WhiteSpace;
use css_transformer::properties::BlockKind;
use css_transformer::values::color::Color;
use css_transformer::values::color::Rgba;
use css_transformer::values::Dimension;
use css_transformer::values::Separator;
use css_transformer::values::Value;
use css_transformer::values::ValueList;

fn idents<'s>(words: &[&'s str]) -> Value<'s> {
    let mut items: Vec<Value<'s>> = words.iter().map(|word| Value::Ident(*word)).collect();
    if items.len() == 1 {
        return items.remove(0);
    }
    Value::List(ValueList {
        separator: Separator::Space,
        items,
    })
}

fn red() -> Value<'static> {
    Value::Color(Color::Named {
        name: "red",
        rgba: Rgba::opaque(255, 0, 0),
    })
}

#[test]
fn property_registry() {
    assert!(is_known_property("color"));
    assert!(is_known_property("COLOR"));
    assert!(!is_known_property("--color"));
    assert!(!is_known_property("-webkit-box-orient"));
    assert!(is_custom_property("--x"));
    assert!(!is_custom_property("-x"));
    assert!(is_color_property("border-color"));
    assert!(!is_color_property("font-family"));
    assert!(is_text_property("text-transform"));
    assert!(!is_text_property("color"));
}

#[test]
fn at_rule_blocks() {
    assert_eq!(at_rule_block_kind("media"), BlockKind::Rules);
    assert_eq!(at_rule_block_kind("supports"), BlockKind::Rules);
    assert_eq!(at_rule_block_kind("keyframes"), BlockKind::Rules);
    assert_eq!(at_rule_block_kind("font-face"), BlockKind::Declarations);
    assert_eq!(at_rule_block_kind("Page"), BlockKind::Declarations);
    assert_eq!(at_rule_block_kind("-webkit-viewport"), BlockKind::Declarations);
    assert_eq!(at_rule_block_kind("-webkit-keyframes"), BlockKind::Rules);
}

#[test]
fn text_transform() {
    assert_eq!(
        TextTransform::parse(&idents(&["full-width", "Capitalize", "full-size-kana"])),
        Some(TextTransform {
            case: TextTransformCase::Capitalize,
            other: TextTransformOther::FULL_WIDTH | TextTransformOther::FULL_SIZE_KANA,
        })
    );
    assert_eq!(
        TextTransform::parse(&idents(&["none"])),
        Some(TextTransform {
            case: TextTransformCase::None,
            other: TextTransformOther::empty(),
        })
    );
    assert_eq!(TextTransform::parse(&idents(&["none", "full-width"])), None);
    assert_eq!(TextTransform::parse(&idents(&["full-width", "full-width"])), None);
    assert_eq!(TextTransform::parse(&idents(&["upper"])), None);

    assert_eq!(
        canonicalize("text-transform", &idents(&["FULL-SIZE-KANA", "lowercase"])),
        Some(idents(&["lowercase", "full-size-kana"]))
    );
    assert_eq!(
        canonicalize("text-transform", &idents(&["full-width"])),
        Some(idents(&["full-width"]))
    );
}

#[test]
fn keyword_properties() {
    assert_eq!(WhiteSpace::parse(&idents(&["PRE-WRAP"])), Some(WhiteSpace::PreWrap));
    assert_eq!(WhiteSpace::PreWrap.as_str(), "pre-wrap");
    assert_eq!(WhiteSpace::parse(&idents(&["pre", "wrap"])), None);
    assert_eq!(
        canonicalize("word-wrap", &idents(&["Break-Word"])),
        Some(idents(&["break-word"]))
    );
    assert_eq!(
        canonicalize("text-align", &idents(&["CENTER"])),
        Some(idents(&["center"]))
    );
    assert_eq!(canonicalize("text-align", &idents(&["middle"])), None);
    assert_eq!(canonicalize("color", &idents(&["red"])), None);
}

#[test]
fn text_decoration_line() {
    assert_eq!(
        TextDecorationLine::parse(&idents(&["line-through", "underline"])),
        Some(TextDecorationLine::UNDERLINE | TextDecorationLine::LINE_THROUGH)
    );
    assert_eq!(
        TextDecorationLine::parse(&idents(&["none"])),
        Some(TextDecorationLine::empty())
    );
    assert_eq!(TextDecorationLine::parse(&idents(&["underline", "underline"])), None);
    assert_eq!(TextDecorationLine::parse(&idents(&["none", "underline"])), None);
    assert_eq!(TextDecorationLine::parse(&idents(&["spelling-error", "blink"])), None);
    assert_eq!(
        TextDecorationLine::GRAMMAR_ERROR.to_value(),
        Value::Ident("grammar-error")
    );
    assert_eq!(
        canonicalize("text-decoration-line", &idents(&["blink", "overline"])),
        Some(idents(&["overline", "blink"]))
    );
}

#[test]
fn text_decoration_shorthand() {
    let value = Value::List(ValueList {
        separator: Separator::Space,
        items: vec![
            Value::Ident("wavy"),
            red(),
            Value::Ident("underline"),
            Value::Dimension(Dimension {
                value: 2.0,
                unit: "px",
            }),
        ],
    });
    let decoration = TextDecoration::parse(&value).unwrap();
    assert_eq!(decoration.line, TextDecorationLine::UNDERLINE);
    assert_eq!(decoration.style, TextDecorationStyle::Wavy);
    assert_eq!(decoration.color, Some(red()));
    assert_eq!(
        decoration.thickness,
        TextDecorationThickness::LengthPercentage(Value::Dimension(Dimension {
            value: 2.0,
            unit: "px",
        }))
    );
    assert_eq!(
        decoration.to_value(),
        Value::List(ValueList {
            separator: Separator::Space,
            items: vec![
                Value::Ident("underline"),
                Value::Dimension(Dimension {
                    value: 2.0,
                    unit: "px",
                }),
                Value::Ident("wavy"),
                red(),
            ],
        })
    );

    // Initial values are dropped.
    assert_eq!(
        canonicalize("text-decoration", &idents(&["overline", "auto", "solid", "currentColor"])),
        Some(idents(&["overline"]))
    );
    assert_eq!(
        canonicalize("text-decoration", &idents(&["solid"])),
        Some(idents(&["none"]))
    );
    assert_eq!(canonicalize("text-decoration", &idents(&["solid", "dotted"])), None);
}

#[test]
fn spacing_and_indent() {
    let length = Value::Dimension(Dimension {
        value: 0.5,
        unit: "em",
    });
    assert_eq!(canonicalize("letter-spacing", &length), Some(length.clone()));
    assert_eq!(
        canonicalize("word-spacing", &idents(&["NORMAL"])),
        Some(idents(&["normal"]))
    );
    assert_eq!(canonicalize("word-spacing", &Value::Percentage(10.0)), None);
    assert_eq!(
        canonicalize("text-indent", &Value::Percentage(10.0)),
        Some(Value::Percentage(10.0))
    );
    assert_eq!(canonicalize("text-indent", &idents(&["hanging"])), None);
}
