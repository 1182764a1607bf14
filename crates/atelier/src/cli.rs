//! Command line definition.

use std::path::PathBuf;

use atelier_sitemap::{DEFAULT_OUT, DEFAULT_SITE_URL, DEFAULT_SOURCE};
use atelier_theme::{ExportFormat, ThemeMode};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "atelier", version, about = "Atelier design system tooling")]
pub struct Cli {
    /// Preference file holding the theme choice [default: <config dir>/atelier/preferences.json]
    #[arg(long, global = true, env = "ATELIER_PREFERENCES", value_name = "PATH")]
    pub preferences: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate sitemap.xml from the site's route declarations
    Sitemap(SitemapArgs),
    /// Convert a legacy token file to the DTCG format
    Dtcg(DtcgArgs),
    /// Export live token values as tokens.css or tokens.js
    Export(ExportArgs),
    /// Print resolved token values for a theme mode
    Tokens(TokensArgs),
    /// Resolve color expressions to their computed value and hex form
    Color(ColorArgs),
    /// Show or change the persisted theme
    Theme(ThemeArgs),
}

#[derive(Debug, Args)]
pub struct SitemapArgs {
    /// Public base URL of the site
    #[arg(long = "site", env = "ATELIER_SITE_URL", default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    /// File holding the route declarations
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: PathBuf,

    /// Output path of the sitemap
    #[arg(long, default_value = DEFAULT_OUT)]
    pub out: PathBuf,

    /// Date stamped on every entry (YYYY-MM-DD) [default: today, UTC]
    #[arg(long)]
    pub lastmod: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct DtcgArgs {
    /// Legacy token file; `-` or nothing reads stdin
    pub input: Option<PathBuf>,

    /// Write the converted tokens here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct StylesheetArg {
    /// CSS file defining the tokens [default: the bundled Atelier stylesheet]
    #[arg(long, env = "ATELIER_STYLESHEET", value_name = "PATH")]
    pub stylesheet: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Export format: css or js
    #[arg(long, short, default_value = "css")]
    pub format: ExportFormat,

    #[command(flatten)]
    pub stylesheet: StylesheetArg,

    /// Write the export to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Copy the export to the system clipboard
    #[arg(long)]
    pub copy: bool,
}

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Token names, with or without the leading `--` [default: the export token set]
    pub names: Vec<String>,

    /// Mode to read [default: the persisted theme]
    #[arg(long)]
    pub mode: Option<ThemeMode>,

    #[command(flatten)]
    pub stylesheet: StylesheetArg,

    /// Print a JSON object instead of CSS declarations
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ColorArgs {
    /// Color expressions such as `#007bff`, `rgb(0 123 255)` or `hsl(var(--primary))`
    #[arg(required = true)]
    pub expressions: Vec<String>,

    /// Treat each expression as an HSL triplet such as `221 83% 53%`
    #[arg(long)]
    pub triplet: bool,

    /// Theme the page shows while resolving [default: the persisted theme]
    #[arg(long)]
    pub mode: Option<ThemeMode>,

    #[command(flatten)]
    pub stylesheet: StylesheetArg,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ThemeAction {
    /// Print the active theme (default)
    Get,
    /// Set and persist the theme
    Set {
        /// light or dark
        mode: ThemeMode,
    },
    /// Switch between light and dark
    Toggle,
}
