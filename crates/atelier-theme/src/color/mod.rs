//! CSS color values.
//!
//! [`parse_css_color`] understands the color grammar design tokens are
//! written in and produces an [`Rgba`], whose `Display` is the computed-value
//! serialization a browser reports (`rgb(0, 123, 255)`, or `rgba(...)` when
//! translucent).
//!
//! Supported input:
//!
//! | Form | Example |
//! |------|---------|
//! | Hex | `#07f`, `#0077ff`, `#0077ff80` |
//! | Named | `rebeccapurple`, `transparent` |
//! | `rgb()` / `rgba()` | `rgb(0, 123, 255)`, `rgb(0 123 255 / 50%)` |
//! | `hsl()` / `hsla()` | `hsl(211, 100%, 50%)`, `hsl(211 100% 50% / .5)` |
//!
//! Hue accepts `deg`, `rad`, `grad` and `turn`; `none` counts as zero.
//!
//! The [`normalize`] submodule hosts the token-facing operations that route
//! expressions through a [`StyleEngine`](crate::StyleEngine).

mod named;
pub mod normalize;

use std::fmt;

use cssparser::{ParseError, Parser, ParserInput, Token};

pub use normalize::{resolve_computed_color, to_css_color_expression, to_hex};

/// An sRGB color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub alpha: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self { r, g, b, alpha }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.alpha * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Parses a CSS color expression. Returns `None` for anything outside the
/// supported grammar, including the empty string.
pub fn parse_css_color(input: &str) -> Option<Rgba> {
    let mut parser_input = ParserInput::new(input.trim());
    let mut parser = Parser::new(&mut parser_input);
    parser.parse_entirely(parse_color).ok()
}

type ColorResult<'i, T> = Result<T, ParseError<'i, ()>>;

fn parse_color<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, Rgba> {
    let token = input.next()?.clone();
    match token {
        Token::Hash(ref value) | Token::IDHash(ref value) => {
            parse_hex(value).ok_or_else(|| input.new_custom_error::<(), ()>(()))
        }
        Token::Ident(ref name) => {
            named::lookup(name).ok_or_else(|| input.new_custom_error::<(), ()>(()))
        }
        Token::Function(ref name) => {
            let name = name.to_ascii_lowercase();
            input.parse_nested_block(|input| match name.as_str() {
                "rgb" | "rgba" => parse_rgb(input),
                "hsl" | "hsla" => parse_hsl(input),
                _ => Err(input.new_custom_error::<(), ()>(())),
            })
        }
        _ => Err(input.new_custom_error::<(), ()>(())),
    }
}

fn parse_hex(value: &str) -> Option<Rgba> {
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let digit = |i: usize| u8::from_str_radix(&value[i..i + 1], 16).ok();
    let pair = |i: usize| u8::from_str_radix(&value[i..i + 2], 16).ok();
    match value.len() {
        3 | 4 => {
            let r = digit(0)? * 17;
            let g = digit(1)? * 17;
            let b = digit(2)? * 17;
            let a = if value.len() == 4 { digit(3)? * 17 } else { 255 };
            Some(Rgba::new(r, g, b, a as f32 / 255.0))
        }
        6 | 8 => {
            let r = pair(0)?;
            let g = pair(2)?;
            let b = pair(4)?;
            let a = if value.len() == 8 { pair(6)? } else { 255 };
            Some(Rgba::new(r, g, b, a as f32 / 255.0))
        }
        _ => None,
    }
}

/// Consumes a comma if the function uses the legacy comma syntax.
fn expect_separator<'i, 't>(input: &mut Parser<'i, 't>, legacy: bool) -> ColorResult<'i, ()> {
    if legacy {
        input.expect_comma()?;
    }
    Ok(())
}

/// Parses the optional alpha component, introduced by `,` (legacy) or `/`.
fn parse_optional_alpha<'i, 't>(input: &mut Parser<'i, 't>, legacy: bool) -> ColorResult<'i, f32> {
    let introduced = if legacy {
        input.try_parse(|i| i.expect_comma()).is_ok()
    } else {
        input.try_parse(|i| i.expect_delim('/')).is_ok()
    };
    if !introduced {
        return Ok(1.0);
    }
    let token = input.next()?.clone();
    let alpha = match token {
        Token::Number { value, .. } => value,
        Token::Percentage { unit_value, .. } => unit_value,
        Token::Ident(ref ident) if ident.eq_ignore_ascii_case("none") => 0.0,
        _ => return Err(input.new_custom_error::<(), ()>(())),
    };
    Ok(alpha.clamp(0.0, 1.0))
}

fn parse_rgb_channel<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, u8> {
    let token = input.next()?.clone();
    let value = match token {
        Token::Number { value, .. } => value,
        Token::Percentage { unit_value, .. } => unit_value * 255.0,
        Token::Ident(ref ident) if ident.eq_ignore_ascii_case("none") => 0.0,
        _ => return Err(input.new_custom_error::<(), ()>(())),
    };
    Ok(value.round().clamp(0.0, 255.0) as u8)
}

fn parse_rgb<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, Rgba> {
    let r = parse_rgb_channel(input)?;
    let legacy = input.try_parse(|i| i.expect_comma()).is_ok();
    let g = parse_rgb_channel(input)?;
    expect_separator(input, legacy)?;
    let b = parse_rgb_channel(input)?;
    let alpha = parse_optional_alpha(input, legacy)?;
    Ok(Rgba::new(r, g, b, alpha))
}

fn parse_hue<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, f32> {
    let token = input.next()?.clone();
    let degrees = match token {
        Token::Number { value, .. } => value,
        Token::Dimension {
            value, ref unit, ..
        } => match unit.to_ascii_lowercase().as_str() {
            "deg" => value,
            "rad" => value.to_degrees(),
            "grad" => value * 0.9,
            "turn" => value * 360.0,
            _ => return Err(input.new_custom_error::<(), ()>(())),
        },
        Token::Ident(ref ident) if ident.eq_ignore_ascii_case("none") => 0.0,
        _ => return Err(input.new_custom_error::<(), ()>(())),
    };
    Ok(degrees.rem_euclid(360.0))
}

/// Saturation or lightness as a fraction. Bare numbers are read as percents.
fn parse_fraction<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, f32> {
    let token = input.next()?.clone();
    let fraction = match token {
        Token::Percentage { unit_value, .. } => unit_value,
        Token::Number { value, .. } => value / 100.0,
        Token::Ident(ref ident) if ident.eq_ignore_ascii_case("none") => 0.0,
        _ => return Err(input.new_custom_error::<(), ()>(())),
    };
    Ok(fraction.clamp(0.0, 1.0))
}

fn parse_hsl<'i, 't>(input: &mut Parser<'i, 't>) -> ColorResult<'i, Rgba> {
    let hue = parse_hue(input)?;
    let legacy = input.try_parse(|i| i.expect_comma()).is_ok();
    let saturation = parse_fraction(input)?;
    expect_separator(input, legacy)?;
    let lightness = parse_fraction(input)?;
    let alpha = parse_optional_alpha(input, legacy)?;
    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    Ok(Rgba::new(r, g, b, alpha))
}

/// CSS Color 4 `hsl()` to sRGB conversion.
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let a = saturation * lightness.min(1.0 - lightness);
    let channel = |n: f32| {
        let k = (n + hue / 30.0) % 12.0;
        let value = lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (value * 255.0).round().clamp(0.0, 255.0) as u8
    };
    (channel(0.0), channel(8.0), channel(4.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_css_color("#007bff"), Some(Rgba::opaque(0, 123, 255)));
        assert_eq!(parse_css_color("#fff"), Some(Rgba::opaque(255, 255, 255)));
        let translucent = parse_css_color("#00000080").unwrap();
        assert!((translucent.alpha - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(parse_css_color("#ggg"), None);
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_css_color("red"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(
            parse_css_color("RebeccaPurple"),
            Some(Rgba::opaque(102, 51, 153))
        );
        assert_eq!(parse_css_color("transparent"), Some(Rgba::TRANSPARENT));
        assert_eq!(parse_css_color("notacolor"), None);
    }

    #[test]
    fn test_rgb_legacy_and_modern() {
        assert_eq!(
            parse_css_color("rgb(0, 123, 255)"),
            Some(Rgba::opaque(0, 123, 255))
        );
        assert_eq!(
            parse_css_color("rgb(0 123 255)"),
            Some(Rgba::opaque(0, 123, 255))
        );
        assert_eq!(
            parse_css_color("rgba(255, 0, 0, 0.5)"),
            Some(Rgba::new(255, 0, 0, 0.5))
        );
        assert_eq!(
            parse_css_color("rgb(100% 0% 0% / 50%)"),
            Some(Rgba::new(255, 0, 0, 0.5))
        );
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
        assert_eq!(parse_css_color("rgb(1 2 3 4)"), None);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(parse_css_color("hsl(0, 100%, 50%)"), Some(Rgba::opaque(255, 0, 0)));
        assert_eq!(parse_css_color("hsl(120 100% 50%)"), Some(Rgba::opaque(0, 255, 0)));
        assert_eq!(parse_css_color("hsl(240deg 100% 50%)"), Some(Rgba::opaque(0, 0, 255)));
        assert_eq!(parse_css_color("hsl(0.5turn 100% 50%)"), Some(Rgba::opaque(0, 255, 255)));
        assert_eq!(parse_css_color("hsl(0 0% 100%)"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_css_color("hsl(0 0% 0%)"), Some(Rgba::opaque(0, 0, 0)));
    }

    #[test]
    fn test_hsl_with_alpha() {
        let color = parse_css_color("hsla(0, 100%, 50%, 0.25)").unwrap();
        assert_eq!((color.r, color.g, color.b), (255, 0, 0));
        assert_eq!(color.alpha, 0.25);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(Rgba::opaque(0, 123, 255).to_string(), "rgb(0, 123, 255)");
        assert_eq!(Rgba::new(0, 0, 0, 0.5).to_string(), "rgba(0, 0, 0, 0.5)");
        assert_eq!(Rgba::TRANSPARENT.to_string(), "rgba(0, 0, 0, 0)");
        assert_eq!(Rgba::opaque(0, 123, 255).to_hex(), "#007bff");
    }

    #[test]
    fn test_rejects_empty_and_trailing_garbage() {
        assert_eq!(parse_css_color(""), None);
        assert_eq!(parse_css_color("red blue"), None);
        assert_eq!(parse_css_color("var(--primary)"), None);
    }
}
