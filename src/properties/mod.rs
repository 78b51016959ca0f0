pub mod text;

/// Properties whose values go through the value parser. Everything else,
/// custom properties included, is kept as raw text.
static KNOWN_PROPERTIES: &[&str] = &[
    "align-content",
    "align-items",
    "align-self",
    "animation",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-timing-function",
    "aspect-ratio",
    "background",
    "background-attachment",
    "background-clip",
    "background-color",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-collapse",
    "border-color",
    "border-left",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-radius",
    "border-right",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-spacing",
    "border-style",
    "border-top",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "border-width",
    "bottom",
    "box-shadow",
    "box-sizing",
    "caret-color",
    "clear",
    "color",
    "column-gap",
    "content",
    "cursor",
    "display",
    "fill",
    "flex",
    "flex-basis",
    "flex-direction",
    "flex-flow",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "font",
    "font-family",
    "font-size",
    "font-style",
    "font-variant",
    "font-weight",
    "gap",
    "grid-column",
    "grid-column-gap",
    "grid-gap",
    "grid-row",
    "grid-row-gap",
    "grid-template-columns",
    "grid-template-rows",
    "height",
    "hyphens",
    "inset",
    "justify-content",
    "justify-items",
    "justify-self",
    "left",
    "letter-spacing",
    "line-break",
    "line-height",
    "list-style",
    "list-style-type",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "object-fit",
    "opacity",
    "order",
    "outline",
    "outline-color",
    "outline-offset",
    "outline-style",
    "outline-width",
    "overflow",
    "overflow-wrap",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "pointer-events",
    "position",
    "right",
    "row-gap",
    "stroke",
    "stroke-width",
    "text-align",
    "text-align-last",
    "text-decoration",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-decoration-thickness",
    "text-indent",
    "text-justify",
    "text-overflow",
    "text-shadow",
    "text-transform",
    "top",
    "transform",
    "transform-origin",
    "transition",
    "transition-delay",
    "transition-duration",
    "transition-property",
    "transition-timing-function",
    "user-select",
    "vertical-align",
    "visibility",
    "white-space",
    "width",
    "word-break",
    "word-spacing",
    "word-wrap",
    "z-index",
];

/// Properties whose values may hold colors that can be rewritten.
static COLOR_PROPERTIES: &[&str] = &[
    "background",
    "background-color",
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-color",
    "border-left",
    "border-left-color",
    "border-right",
    "border-right-color",
    "border-top",
    "border-top-color",
    "box-shadow",
    "caret-color",
    "color",
    "fill",
    "outline",
    "outline-color",
    "stroke",
    "text-decoration",
    "text-decoration-color",
    "text-shadow",
];

/// At-rules whose block holds declarations rather than rules.
static DECLARATION_AT_RULES: &[&str] = &[
    "font-face",
    "page",
    "property",
    "counter-style",
    "font-palette-values",
    "viewport",
    "font-feature-values",
];

fn contains(list: &[&str], name: &str) -> bool {
    list.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}

pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

pub fn is_known_property(name: &str) -> bool {
    !is_custom_property(name) && contains(KNOWN_PROPERTIES, name)
}

pub fn is_color_property(name: &str) -> bool {
    contains(COLOR_PROPERTIES, name)
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum BlockKind {
    Rules,
    Declarations,
}

pub fn at_rule_block_kind(name: &str) -> BlockKind {
    // Vendor prefixed forms such as `@-webkit-viewport` behave the same.
    let unprefixed = strip_vendor_prefix(name);
    if contains(DECLARATION_AT_RULES, unprefixed) {
        BlockKind::Declarations
    } else {
        BlockKind::Rules
    }
}

fn strip_vendor_prefix(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('-') {
        if let Some(index) = rest.find('-') {
            return &rest[index + 1..];
        }
    }
    name
}
