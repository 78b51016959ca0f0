use std::fmt;
use std::fmt::Write;

use crate::printer::Serializer;
use crate::printer::ToCss;
use crate::values::Function;
use crate::values::Separator;
use crate::values::Value;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    const fn from_rgb24(rgb: u32) -> Self {
        Self::opaque((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 255
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Color<'s> {
    /// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`; `digits` as written.
    Hex { digits: &'s str, rgba: Rgba },
    /// A named color, `name` as written.
    Named { name: &'s str, rgba: Rgba },
    /// `rgb()`, `hsl()` and friends; `rgba` is set when every argument is a literal.
    Function {
        function: Function<'s>,
        rgba: Option<Rgba>,
    },
    /// A color computed by a rewrite pass, always printed in its shortest form.
    Rgba(Rgba),
}

impl Color<'_> {
    pub fn rgba(&self) -> Option<Rgba> {
        match self {
            Color::Hex { rgba, .. } | Color::Named { rgba, .. } | Color::Rgba(rgba) => Some(*rgba),
            Color::Function { rgba, .. } => *rgba,
        }
    }
}

impl ToCss for Color<'_> {
    fn to_css<W: Write>(&self, dest: &mut Serializer<'_, W>) -> fmt::Result {
        match self {
            Color::Hex { digits, rgba } => {
                if dest.minify() {
                    dest.write_str(&shortest_form(*rgba))
                } else {
                    dest.write_char('#')?;
                    dest.write_str(digits)
                }
            }
            Color::Named { name, .. } => dest.write_str(name),
            Color::Function { function, rgba } => match rgba {
                Some(rgba) if dest.minify() && (rgba.alpha == 255 || rgba.alpha == 0) => {
                    dest.write_str(&shortest_form(*rgba))
                }
                _ => function.to_css(dest),
            },
            Color::Rgba(rgba) => {
                if dest.minify() {
                    dest.write_str(&shortest_form(*rgba))
                } else {
                    dest.write_str(&full_hex(*rgba))
                }
            }
        }
    }
}

pub fn parse_hex(digits: &str) -> Option<Rgba> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 | 4 => {
            let expand = |v: u8| v * 17;
            let alpha = if digits.len() == 4 { expand(nibble(3)?) } else { 255 };
            Some(Rgba::new(
                expand(nibble(0)?),
                expand(nibble(1)?),
                expand(nibble(2)?),
                alpha,
            ))
        }
        6 | 8 => {
            let alpha = if digits.len() == 8 { byte(6)? } else { 255 };
            Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, alpha))
        }
        _ => None,
    }
}

pub fn named_color(name: &str) -> Option<Rgba> {
    if name.eq_ignore_ascii_case("transparent") {
        return Some(Rgba::TRANSPARENT);
    }
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, rgb)| Rgba::from_rgb24(*rgb))
}

/// The shortest name for `rgba`, if it has one.
pub fn color_name(rgba: Rgba) -> Option<&'static str> {
    if rgba == Rgba::TRANSPARENT {
        return Some("transparent");
    }
    if !rgba.is_opaque() {
        return None;
    }
    NAMED_COLORS
        .iter()
        .filter(|(_, rgb)| Rgba::from_rgb24(*rgb) == rgba)
        .map(|(name, _)| *name)
        .min_by_key(|name| name.len())
}

pub fn full_hex(rgba: Rgba) -> String {
    let Rgba {
        red,
        green,
        blue,
        alpha,
    } = rgba;
    if rgba.is_opaque() {
        format!("#{red:02x}{green:02x}{blue:02x}")
    } else {
        format!("#{red:02x}{green:02x}{blue:02x}{alpha:02x}")
    }
}

pub fn shortest_hex(rgba: Rgba) -> String {
    let shortenable = |v: u8| v >> 4 == v & 0xf;
    let Rgba {
        red,
        green,
        blue,
        alpha,
    } = rgba;
    if !(shortenable(red) && shortenable(green) && shortenable(blue) && shortenable(alpha)) {
        return full_hex(rgba);
    }
    if rgba.is_opaque() {
        format!("#{:x}{:x}{:x}", red & 0xf, green & 0xf, blue & 0xf)
    } else {
        format!(
            "#{:x}{:x}{:x}{:x}",
            red & 0xf,
            green & 0xf,
            blue & 0xf,
            alpha & 0xf
        )
    }
}

/// Shortest hex form or color name, the name winning ties.
pub fn shortest_form(rgba: Rgba) -> String {
    let hex = shortest_hex(rgba);
    match color_name(rgba) {
        Some(name) if name.len() <= hex.len() => name.to_string(),
        _ => hex,
    }
}

pub fn is_color_function(name: &str) -> bool {
    ["rgb", "rgba", "hsl", "hsla"]
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Computes the color of `rgb()`/`hsl()` calls whose arguments are literals,
/// in either the comma separated or the space separated syntax.
pub fn resolve_function(function: &Function<'_>) -> Option<Rgba> {
    let (channels, alpha) = split_channels(&function.arguments)?;
    let alpha = match alpha {
        Some(alpha) => alpha_channel(alpha)?,
        None => 255,
    };
    let name = function.name.to_ascii_lowercase();
    match name.as_str() {
        "rgb" | "rgba" => Some(Rgba::new(
            rgb_channel(channels[0])?,
            rgb_channel(channels[1])?,
            rgb_channel(channels[2])?,
            alpha,
        )),
        "hsl" | "hsla" => {
            let hue = hue_degrees(channels[0])?;
            let saturation = fraction(channels[1])?;
            let lightness = fraction(channels[2])?;
            let (red, green, blue) = hsl_to_rgb(hue, saturation, lightness);
            Some(Rgba::new(
                to_channel(red),
                to_channel(green),
                to_channel(blue),
                alpha,
            ))
        }
        _ => None,
    }
}

type Channels<'a, 's> = ([&'a Value<'s>; 3], Option<&'a Value<'s>>);

fn split_channels<'a, 's>(arguments: &'a [Value<'s>]) -> Option<Channels<'a, 's>> {
    match arguments {
        [r, g, b] => Some(([r, g, b], None)),
        [r, g, b, a] => Some(([r, g, b], Some(a))),
        [Value::List(list)] if list.separator == Separator::Space => match list.items.as_slice() {
            [r, g, b] => Some(([r, g, b], None)),
            [r, g, b, Value::Delimiter('/'), a] => Some(([r, g, b], Some(a))),
            _ => None,
        },
        _ => None,
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

fn rgb_channel(value: &Value<'_>) -> Option<u8> {
    match value {
        Value::Number(n) => Some(n.round().clamp(0.0, 255.0) as u8),
        Value::Percentage(p) => Some(to_channel(p / 100.0)),
        _ => None,
    }
}

fn alpha_channel(value: &Value<'_>) -> Option<u8> {
    match value {
        Value::Number(n) => Some(to_channel(n.clamp(0.0, 1.0))),
        Value::Percentage(p) => Some(to_channel((p / 100.0).clamp(0.0, 1.0))),
        _ => None,
    }
}

fn fraction(value: &Value<'_>) -> Option<f64> {
    match value {
        Value::Percentage(p) => Some((p / 100.0).clamp(0.0, 1.0)),
        Value::Number(n) => Some((n / 100.0).clamp(0.0, 1.0)),
        _ => None,
    }
}

fn hue_degrees(value: &Value<'_>) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Dimension(dimension) => {
            let unit = dimension.unit.to_ascii_lowercase();
            let factor = match unit.as_str() {
                "deg" => 1.0,
                "grad" => 0.9,
                "rad" => 180.0 / std::f64::consts::PI,
                "turn" => 360.0,
                _ => return None,
            };
            Some(dimension.value * factor)
        }
        _ => None,
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (f64, f64, f64) {
    let hue = hue.rem_euclid(360.0) / 360.0;
    if saturation == 0.0 {
        return (lightness, lightness, lightness);
    }
    let t2 = if lightness <= 0.5 {
        lightness * (saturation + 1.0)
    } else {
        lightness + saturation - lightness * saturation
    };
    let t1 = lightness * 2.0 - t2;
    (
        hue_to_rgb(t1, t2, hue + 1.0 / 3.0),
        hue_to_rgb(t1, t2, hue),
        hue_to_rgb(t1, t2, hue - 1.0 / 3.0),
    )
}

fn hue_to_rgb(t1: f64, t2: f64, hue: f64) -> f64 {
    let hue = if hue < 0.0 {
        hue + 1.0
    } else if hue > 1.0 {
        hue - 1.0
    } else {
        hue
    };
    if hue * 6.0 < 1.0 {
        t1 + (t2 - t1) * hue * 6.0
    } else if hue * 2.0 < 1.0 {
        t2
    } else if hue * 3.0 < 2.0 {
        t1 + (t2 - t1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        t1
    }
}

// https://www.w3.org/TR/css-color-4/#named-colors
static NAMED_COLORS: [(&str, u32); 148] = [
    ("aliceblue", 0xf0f8ff),
    ("antiquewhite", 0xfaebd7),
    ("aqua", 0x00ffff),
    ("aquamarine", 0x7fffd4),
    ("azure", 0xf0ffff),
    ("beige", 0xf5f5dc),
    ("bisque", 0xffe4c4),
    ("black", 0x000000),
    ("blanchedalmond", 0xffebcd),
    ("blue", 0x0000ff),
    ("blueviolet", 0x8a2be2),
    ("brown", 0xa52a2a),
    ("burlywood", 0xdeb887),
    ("cadetblue", 0x5f9ea0),
    ("chartreuse", 0x7fff00),
    ("chocolate", 0xd2691e),
    ("coral", 0xff7f50),
    ("cornflowerblue", 0x6495ed),
    ("cornsilk", 0xfff8dc),
    ("crimson", 0xdc143c),
    ("cyan", 0x00ffff),
    ("darkblue", 0x00008b),
    ("darkcyan", 0x008b8b),
    ("darkgoldenrod", 0xb8860b),
    ("darkgray", 0xa9a9a9),
    ("darkgreen", 0x006400),
    ("darkgrey", 0xa9a9a9),
    ("darkkhaki", 0xbdb76b),
    ("darkmagenta", 0x8b008b),
    ("darkolivegreen", 0x556b2f),
    ("darkorange", 0xff8c00),
    ("darkorchid", 0x9932cc),
    ("darkred", 0x8b0000),
    ("darksalmon", 0xe9967a),
    ("darkseagreen", 0x8fbc8f),
    ("darkslateblue", 0x483d8b),
    ("darkslategray", 0x2f4f4f),
    ("darkslategrey", 0x2f4f4f),
    ("darkturquoise", 0x00ced1),
    ("darkviolet", 0x9400d3),
    ("deeppink", 0xff1493),
    ("deepskyblue", 0x00bfff),
    ("dimgray", 0x696969),
    ("dimgrey", 0x696969),
    ("dodgerblue", 0x1e90ff),
    ("firebrick", 0xb22222),
    ("floralwhite", 0xfffaf0),
    ("forestgreen", 0x228b22),
    ("fuchsia", 0xff00ff),
    ("gainsboro", 0xdcdcdc),
    ("ghostwhite", 0xf8f8ff),
    ("gold", 0xffd700),
    ("goldenrod", 0xdaa520),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("greenyellow", 0xadff2f),
    ("grey", 0x808080),
    ("honeydew", 0xf0fff0),
    ("hotpink", 0xff69b4),
    ("indianred", 0xcd5c5c),
    ("indigo", 0x4b0082),
    ("ivory", 0xfffff0),
    ("khaki", 0xf0e68c),
    ("lavender", 0xe6e6fa),
    ("lavenderblush", 0xfff0f5),
    ("lawngreen", 0x7cfc00),
    ("lemonchiffon", 0xfffacd),
    ("lightblue", 0xadd8e6),
    ("lightcoral", 0xf08080),
    ("lightcyan", 0xe0ffff),
    ("lightgoldenrodyellow", 0xfafad2),
    ("lightgray", 0xd3d3d3),
    ("lightgreen", 0x90ee90),
    ("lightgrey", 0xd3d3d3),
    ("lightpink", 0xffb6c1),
    ("lightsalmon", 0xffa07a),
    ("lightseagreen", 0x20b2aa),
    ("lightskyblue", 0x87cefa),
    ("lightslategray", 0x778899),
    ("lightslategrey", 0x778899),
    ("lightsteelblue", 0xb0c4de),
    ("lightyellow", 0xffffe0),
    ("lime", 0x00ff00),
    ("limegreen", 0x32cd32),
    ("linen", 0xfaf0e6),
    ("magenta", 0xff00ff),
    ("maroon", 0x800000),
    ("mediumaquamarine", 0x66cdaa),
    ("mediumblue", 0x0000cd),
    ("mediumorchid", 0xba55d3),
    ("mediumpurple", 0x9370db),
    ("mediumseagreen", 0x3cb371),
    ("mediumslateblue", 0x7b68ee),
    ("mediumspringgreen", 0x00fa9a),
    ("mediumturquoise", 0x48d1cc),
    ("mediumvioletred", 0xc71585),
    ("midnightblue", 0x191970),
    ("mintcream", 0xf5fffa),
    ("mistyrose", 0xffe4e1),
    ("moccasin", 0xffe4b5),
    ("navajowhite", 0xffdead),
    ("navy", 0x000080),
    ("oldlace", 0xfdf5e6),
    ("olive", 0x808000),
    ("olivedrab", 0x6b8e23),
    ("orange", 0xffa500),
    ("orangered", 0xff4500),
    ("orchid", 0xda70d6),
    ("palegoldenrod", 0xeee8aa),
    ("palegreen", 0x98fb98),
    ("paleturquoise", 0xafeeee),
    ("palevioletred", 0xdb7093),
    ("papayawhip", 0xffefd5),
    ("peachpuff", 0xffdab9),
    ("peru", 0xcd853f),
    ("pink", 0xffc0cb),
    ("plum", 0xdda0dd),
    ("powderblue", 0xb0e0e6),
    ("purple", 0x800080),
    ("rebeccapurple", 0x663399),
    ("red", 0xff0000),
    ("rosybrown", 0xbc8f8f),
    ("royalblue", 0x4169e1),
    ("saddlebrown", 0x8b4513),
    ("salmon", 0xfa8072),
    ("sandybrown", 0xf4a460),
    ("seagreen", 0x2e8b57),
    ("seashell", 0xfff5ee),
    ("sienna", 0xa0522d),
    ("silver", 0xc0c0c0),
    ("skyblue", 0x87ceeb),
    ("slateblue", 0x6a5acd),
    ("slategray", 0x708090),
    ("slategrey", 0x708090),
    ("snow", 0xfffafa),
    ("springgreen", 0x00ff7f),
    ("steelblue", 0x4682b4),
    ("tan", 0xd2b48c),
    ("teal", 0x008080),
    ("thistle", 0xd8bfd8),
    ("tomato", 0xff6347),
    ("turquoise", 0x40e0d0),
    ("violet", 0xee82ee),
    ("wheat", 0xf5deb3),
    ("white", 0xffffff),
    ("whitesmoke", 0xf5f5f5),
    ("yellow", 0xffff00),
    ("yellowgreen", 0x9acd32),
];
