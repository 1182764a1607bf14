//! Token export documents generated from live token values.
//!
//! [`TokenExport::capture`] reads the export token set in both modes through
//! the Token Reader; [`TokenExport::render`] turns the captured values into a
//! downloadable document. Tokens without a resolved value fall back to a
//! `var(--name)` reference so the output is always syntactically complete.

use std::fmt;
use std::str::FromStr;

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;
use thiserror::Error;

use crate::engine::StyleEngine;
use crate::mode::ThemeMode;
use crate::tokens::{
    export_tokens, read_tokens, TokenValues, COLOR_TOKENS, FONT_TOKENS, RADIUS_TOKEN,
    SPACING_TOKENS,
};

const CSS_TEMPLATE: &str = include_str!("../templates/tokens.css.j2");
const JS_TEMPLATE: &str = include_str!("../templates/tokens.js.j2");

/// Colors listed in the ES module export.
const JS_COLORS: &[&str] = &["primary", "secondary", "background", "foreground"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to render {format} export: {source}")]
    Render {
        format: ExportFormat,
        #[source]
        source: minijinja::Error,
    },
}

/// Output document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// CSS custom properties (`tokens.css`).
    Css,
    /// ES module (`tokens.js`).
    EsModule,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Css => "tokens.css",
            ExportFormat::EsModule => "tokens.js",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Css => "text/css",
            ExportFormat::EsModule => "application/javascript",
        }
    }

    fn template_name(self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::EsModule => "js",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template_name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "css" => Ok(ExportFormat::Css),
            "js" | "esm" | "javascript" => Ok(ExportFormat::EsModule),
            other => Err(format!("unknown export format '{other}', expected 'css' or 'js'")),
        }
    }
}

#[derive(Serialize)]
struct Declaration<'a> {
    name: &'a str,
    value: String,
}

#[derive(Serialize)]
struct ColorEntry<'a> {
    key: &'a str,
    light: String,
    dark: String,
}

#[derive(Serialize)]
struct Entry {
    key: String,
    value: String,
}

/// Token values captured in both modes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenExport {
    light: TokenValues,
    dark: TokenValues,
}

impl TokenExport {
    /// Reads the export token set from `engine` in both modes.
    ///
    /// With a headless engine both sides are empty and every rendered value
    /// falls back to its `var(--name)` reference.
    pub fn capture<E: StyleEngine + ?Sized>(engine: &E) -> Self {
        let names = export_tokens();
        Self {
            light: read_tokens(engine, &names, ThemeMode::Light),
            dark: read_tokens(engine, &names, ThemeMode::Dark),
        }
    }

    /// Builds an export from already resolved values.
    pub fn from_values(light: TokenValues, dark: TokenValues) -> Self {
        Self { light, dark }
    }

    pub fn values(&self, mode: ThemeMode) -> &TokenValues {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Resolved value of `name` in `mode`, or `var(--name)`.
    pub fn value_or_reference(&self, name: &str, mode: ThemeMode) -> String {
        match self.values(mode).get(name) {
            Some(value) if !value.is_empty() => value.clone(),
            _ => format!("var(--{name})"),
        }
    }

    /// Renders the export document for `format`.
    pub fn render(&self, format: ExportFormat) -> Result<String, ExportError> {
        let env = environment().map_err(|source| ExportError::Render { format, source })?;
        let template = env
            .get_template(format.template_name())
            .map_err(|source| ExportError::Render { format, source })?;

        let rendered = match format {
            ExportFormat::Css => template.render(self.css_context()),
            ExportFormat::EsModule => template.render(self.js_context()),
        };
        rendered.map_err(|source| ExportError::Render { format, source })
    }

    fn css_context(&self) -> minijinja::Value {
        let light: Vec<_> = COLOR_TOKENS
            .iter()
            .copied()
            .chain(std::iter::once(RADIUS_TOKEN))
            .chain(FONT_TOKENS.iter().copied())
            .chain(SPACING_TOKENS.iter().copied())
            .map(|name| Declaration {
                name,
                value: self.value_or_reference(name, ThemeMode::Light),
            })
            .collect();
        let dark: Vec<_> = COLOR_TOKENS
            .iter()
            .map(|&name| Declaration {
                name,
                value: self.value_or_reference(name, ThemeMode::Dark),
            })
            .collect();
        context! { light, dark }
    }

    fn js_context(&self) -> minijinja::Value {
        let hsl = |name: &str, mode| js_string(&format!("hsl({})", self.value_or_reference(name, mode)));

        let colors: Vec<_> = JS_COLORS
            .iter()
            .map(|&key| ColorEntry {
                key,
                light: hsl(key, ThemeMode::Light),
                dark: hsl(key, ThemeMode::Dark),
            })
            .collect();
        let spacing: Vec<_> = SPACING_TOKENS
            .iter()
            .map(|&name| Entry {
                key: js_key(name.trim_start_matches("spacing-")),
                value: js_string(&self.value_or_reference(name, ThemeMode::Light)),
            })
            .collect();

        context! {
            colors,
            sans => js_string(&self.value_or_reference("font-sans", ThemeMode::Light)),
            mono => js_string(&self.value_or_reference("font-mono", ThemeMode::Light)),
            spacing,
            radius => js_string(&self.value_or_reference(RADIUS_TOKEN, ThemeMode::Light)),
        }
    }
}

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("css", CSS_TEMPLATE)?;
    env.add_template("js", JS_TEMPLATE)?;
    Ok(env)
}

/// A double-quoted JS string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// An object key, quoted when it is not a plain identifier.
fn js_key(key: &str) -> String {
    let mut chars = key.chars();
    let identifier = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if identifier {
        key.to_string()
    } else {
        js_string(key)
    }
}
