//! Subcommand handlers.
//!
//! Every handler writes its regular output to the given writer so the
//! commands can be driven from tests as well as from `main`.

mod color;
mod dtcg;
mod export;
mod sitemap;
mod theme;
mod tokens;

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use atelier_theme::{Document, FileStore, ThemeController, ThemeMode};

use crate::cli::{Cli, Command};

/// Runs the parsed command line.
pub fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let preferences = cli.preferences.as_deref();
    match cli.command {
        Command::Sitemap(args) => sitemap::run(args, out),
        Command::Dtcg(args) => dtcg::run(args, out),
        Command::Export(args) => export::run(args, out),
        Command::Tokens(args) => tokens::run(args, preferences, out),
        Command::Color(args) => color::run(args, preferences, out),
        Command::Theme(args) => theme::run(args, preferences, out),
    }
}

/// The document styled by `stylesheet`, or by the bundled stylesheet.
pub(crate) fn load_document(stylesheet: Option<&Path>) -> Result<Document> {
    let Some(path) = stylesheet else {
        return Ok(Document::atelier());
    };
    let css = fs::read_to_string(path)
        .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
    let document = Document::from_css(&css);
    if document.stylesheet().is_empty() {
        tracing::warn!(path = %path.display(), "stylesheet defines no theme tokens");
    }
    Ok(document)
}

/// The preference store at `path`, or at the default location.
pub(crate) fn preference_store(path: Option<&Path>) -> Result<FileStore> {
    match path {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::default_location()
            .context("no configuration directory found; pass --preferences <PATH>"),
    }
}

/// `explicit`, or the theme the persisted preference selects.
pub(crate) fn resolve_mode(
    explicit: Option<ThemeMode>,
    preferences: Option<&Path>,
) -> Result<ThemeMode> {
    if let Some(mode) = explicit {
        return Ok(mode);
    }
    let store = preference_store(preferences)?;
    Ok(ThemeController::new(Document::default(), store).theme())
}

/// Writes `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
