//! # Atelier - Design System Tooling
//!
//! The `atelier` binary bundles the build-time and inspection tools of the
//! Atelier design system documentation:
//!
//! - `atelier sitemap`: `sitemap.xml` from the site's route declarations
//! - `atelier dtcg`: legacy token files to the DTCG format
//! - `atelier export`: `tokens.css` or `tokens.js` from live token values
//! - `atelier tokens` / `atelier color`: resolved tokens and canonical colors
//! - `atelier theme`: the persisted light/dark choice
//!
//! Logging goes to stderr and is controlled by `ATELIER_LOG`
//! (`tracing_subscriber::EnvFilter` syntax, default `warn`).

pub mod cli;
pub mod clipboard;
mod commands;

pub use cli::Cli;
pub use commands::run;
