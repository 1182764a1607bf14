//! Token values to canonical hex strings.
//!
//! Every function here degrades to the empty string instead of failing, so
//! callers can treat "no value yet" uniformly (blank swatch, "unresolved"
//! label).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::{Probe, ProbeStyle, StyleEngine};

static COMPUTED_CHANNELS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rgba?\(\s*(\d+),\s*(\d+),\s*(\d+)(?:,\s*([0-9.]+))?\s*\)")
        .expect("channel pattern is valid")
});

/// Wraps an HSL triplet such as `221 83% 53%` into `hsl(221 83% 53%)`.
pub fn to_css_color_expression(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        String::new()
    } else {
        format!("hsl({raw})")
    }
}

/// Lets the engine compute `expression` and returns its serialized color.
///
/// Returns `""` for empty input, when the engine has no document, or when the
/// engine cannot compute the expression.
pub fn resolve_computed_color<E: StyleEngine + ?Sized>(engine: &E, expression: &str) -> String {
    let expression = expression.trim();
    if expression.is_empty() {
        return String::new();
    }
    match Probe::attach(engine, ProbeStyle::with_color(expression)) {
        Some(probe) => probe.color(),
        None => String::new(),
    }
}

/// Resolves `expression` and formats it as `#rrggbb`.
///
/// Returns `""` when the computed form carries no channels (unresolvable
/// input) or is fully transparent.
pub fn to_hex<E: StyleEngine + ?Sized>(engine: &E, expression: &str) -> String {
    let resolved = resolve_computed_color(engine, expression);
    let Some(captures) = COMPUTED_CHANNELS.captures(&resolved) else {
        return String::new();
    };
    if let Some(alpha) = captures.get(4) {
        if alpha.as_str().parse::<f32>().map_or(false, |a| a == 0.0) {
            return String::new();
        }
    }
    let mut hex = String::from("#");
    for index in 1..=3 {
        let channel = captures[index].parse::<u16>().unwrap_or(0).min(255);
        hex.push_str(&format!("{channel:02x}"));
    }
    hex
}
