//! # Atelier Theme - Design Token Resolution and Theme State
//!
//! `atelier-theme` is the runtime core of the Atelier design system
//! documentation: it knows which theme is active, what every design token
//! resolves to in either theme, and how to turn those values into canonical
//! colors and export documents.
//!
//! ## Core Concepts
//!
//! - [`ThemeMode`]: Light or dark
//! - [`Document`]: The host page (stylesheet, root marker, probes, observers)
//! - [`StyleEngine`]: Seam for computing styles through transient [`Probe`]s
//! - [`read_tokens`]: Resolved raw token values for a mode
//! - [`to_hex`] and friends: Color expressions to canonical hex
//! - [`ThemeController`]: Owner of the active mode, persisted via a [`PreferenceStore`]
//! - [`TokenExport`]: `tokens.css` / `tokens.js` generated from live values
//!
//! ## Quick Start
//!
//! ```rust
//! use atelier_theme::{
//!     read_tokens, to_css_color_expression, to_hex, Document, MemoryStore, ThemeController,
//!     ThemeMode,
//! };
//!
//! let document = Document::atelier();
//! let mut controller = ThemeController::new(document.clone(), MemoryStore::new());
//! controller.mount();
//! controller.set_theme(ThemeMode::Light);
//!
//! // Dark values are available while the page shows light.
//! let dark = read_tokens(&document, &["primary"], ThemeMode::Dark);
//! let hex = to_hex(&document, &to_css_color_expression(&dark["primary"]));
//! assert_eq!(hex.len(), 7);
//! assert!(!document.root_is_dark());
//! ```
//!
//! ## Without a Document
//!
//! Every read degrades to an empty result when no visual document exists:
//!
//! ```rust
//! use atelier_theme::{read_tokens, to_hex, Headless, ThemeMode};
//!
//! assert!(read_tokens(&Headless, &["primary"], ThemeMode::Dark).is_empty());
//! assert_eq!(to_hex(&Headless, "red"), "");
//! ```

pub mod color;
mod controller;
mod copy;
pub mod document;
pub mod engine;
mod export;
mod mode;
pub mod store;
mod tokens;

pub use color::{parse_css_color, resolve_computed_color, to_css_color_expression, to_hex, Rgba};
pub use controller::ThemeController;
pub use copy::{CopyIndicator, COPY_RESET_DELAY};
pub use document::{Document, Observation, Stylesheet, ATELIER_STYLESHEET};
pub use engine::{Headless, Probe, ProbeId, ProbeStyle, StyleEngine};
pub use export::{ExportError, ExportFormat, TokenExport};
pub use mode::{ParseThemeModeError, ThemeMode};
pub use store::{
    DisabledStore, FileStore, MemoryStore, PreferenceStore, StoreError, THEME_STORAGE_KEY,
};
pub use tokens::{
    export_tokens, read_tokens, TokenValues, COLOR_TOKENS, FONT_TOKENS, RADIUS_TOKEN,
    SPACING_TOKENS,
};
