//! Token Reader: resolved raw values of design tokens for a theme mode.
//!
//! [`read_tokens`] answers "what is `--name` under mode M right now" for any
//! list of names, regardless of which mode is visually active. It attaches a
//! single probe carrying the dark marker iff `mode` is dark, reads every
//! requested custom property and detaches the probe before returning.
//!
//! ```rust
//! use atelier_theme::{read_tokens, Document, ThemeMode};
//!
//! let document = Document::from_css(
//!     ":root { --primary: 221  83%\n 53%; } .dark { --primary: 217 91% 60%; }",
//! );
//! let light = read_tokens(&document, &["primary"], ThemeMode::Light);
//! let dark = read_tokens(&document, &["primary"], ThemeMode::Dark);
//!
//! assert_eq!(light["primary"], "221 83% 53%");
//! assert_eq!(dark["primary"], "217 91% 60%");
//! assert_eq!(document.attached_probes(), 0);
//! ```

use std::collections::BTreeMap;

use crate::engine::{Probe, ProbeStyle, StyleEngine};
use crate::mode::ThemeMode;

/// Token name (without `--`) to resolved raw value.
pub type TokenValues = BTreeMap<String, String>;

/// Semantic color tokens shown on the foundations pages and exported.
pub const COLOR_TOKENS: &[&str] = &[
    "background",
    "foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "muted",
    "muted-foreground",
    "border",
];

/// Font family tokens.
pub const FONT_TOKENS: &[&str] = &["font-sans", "font-mono"];

/// Spacing scale tokens.
pub const SPACING_TOKENS: &[&str] = &[
    "spacing-sm",
    "spacing-md",
    "spacing-lg",
    "spacing-xl",
    "spacing-2xl",
];

pub const RADIUS_TOKEN: &str = "radius";

/// Every token the export documents are generated from.
pub fn export_tokens() -> Vec<&'static str> {
    COLOR_TOKENS
        .iter()
        .chain(FONT_TOKENS)
        .chain(SPACING_TOKENS)
        .copied()
        .chain(std::iter::once(RADIUS_TOKEN))
        .collect()
}

/// Reads `names` as defined for `mode`.
///
/// Values are trimmed and internal whitespace runs collapse to one space.
/// Undefined tokens map to `""`. Without a visual document the result is
/// empty. The probe is detached on every exit path.
pub fn read_tokens<E, S>(engine: &E, names: &[S], mode: ThemeMode) -> TokenValues
where
    E: StyleEngine + ?Sized,
    S: AsRef<str>,
{
    let Some(probe) = Probe::attach(engine, ProbeStyle::for_mode(mode)) else {
        tracing::trace!(%mode, "no document available, token read skipped");
        return TokenValues::new();
    };

    names
        .iter()
        .map(|name| {
            let name = name.as_ref().trim_start_matches("--");
            let value = collapse_whitespace(&probe.custom_property(name));
            (name.to_string(), value)
        })
        .collect()
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
