//! Theme Controller: the single owner of the active [`ThemeMode`].
//!
//! The controller keeps three things consistent:
//!
//! 1. its in-memory mode,
//! 2. the root element's dark marker and `color-scheme` hint on the [`Document`],
//! 3. the last explicit choice in a [`PreferenceStore`].
//!
//! Only [`ThemeController::set_theme`] writes the marker and the store. The
//! reconciliation observer registered by [`ThemeController::mount`] is the
//! only other writer of the in-memory mode: when a host (for example a
//! documentation toolbar) flips the marker directly, the controller adopts
//! the new mode without writing the marker back.
//!
//! ```rust
//! use atelier_theme::{Document, MemoryStore, ThemeController, ThemeMode};
//!
//! let document = Document::atelier();
//! let mut controller = ThemeController::new(document.clone(), MemoryStore::new());
//! controller.mount();
//! assert_eq!(controller.theme(), ThemeMode::Dark);
//!
//! // The host switches the page to light behind our back.
//! document.set_root_marker(false);
//! assert_eq!(controller.theme(), ThemeMode::Light);
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use crate::document::{Document, Observation};
use crate::mode::ThemeMode;
use crate::store::{PreferenceStore, THEME_STORAGE_KEY};

/// Owns the active theme mode of one document.
pub struct ThemeController {
    document: Document,
    store: Box<dyn PreferenceStore>,
    mode: Arc<RwLock<ThemeMode>>,
    observation: Option<Observation>,
}

impl ThemeController {
    /// Creates a controller and runs the initialization policy once.
    ///
    /// A dark marker already on the root wins. Otherwise a valid stored
    /// choice is used, and without one the mode defaults to dark. Nothing is
    /// written to the document or the store here.
    pub fn new<S>(document: Document, store: S) -> Self
    where
        S: PreferenceStore + 'static,
    {
        let store: Box<dyn PreferenceStore> = Box::new(store);
        let mode = initial_mode(&document, store.as_ref());
        tracing::debug!(%mode, "theme controller initialized");
        Self {
            document,
            store,
            mode: Arc::new(RwLock::new(mode)),
            observation: None,
        }
    }

    /// The current mode.
    pub fn theme(&self) -> ThemeMode {
        *self.mode.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the mode, applies it to the document root and persists it.
    ///
    /// Idempotent. Persistence failures are logged and otherwise ignored.
    pub fn set_theme(&self, mode: ThemeMode) {
        *self.mode.write().unwrap_or_else(PoisonError::into_inner) = mode;
        self.apply(mode);

        if let Err(err) = self.store.set(THEME_STORAGE_KEY, mode.as_str()) {
            tracing::debug!(error = %err, "theme preference not persisted");
        }
    }

    /// Flips light and dark through [`set_theme`](Self::set_theme) and
    /// returns the new mode.
    pub fn toggle_theme(&self) -> ThemeMode {
        let mode = self.theme().toggled();
        self.set_theme(mode);
        mode
    }

    /// Applies the current mode to the root and starts reconciling with
    /// external marker changes. Calling it again while mounted does nothing.
    pub fn mount(&mut self) {
        if self.observation.is_some() {
            return;
        }
        self.apply(self.theme());

        let mode = Arc::clone(&self.mode);
        self.observation = Some(self.document.observe_root(move |marked| {
            let mut current = mode.write().unwrap_or_else(PoisonError::into_inner);
            if *current != marked {
                tracing::debug!(mode = %marked, "adopted external theme change");
                *current = marked;
            }
        }));
    }

    /// Stops reconciling with the root marker.
    pub fn unmount(&mut self) {
        self.observation = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.observation.is_some()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn apply(&self, mode: ThemeMode) {
        self.document.set_root_marker(mode.is_dark());
        self.document.set_color_scheme(mode);
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("mode", &self.theme())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

fn initial_mode(document: &Document, store: &dyn PreferenceStore) -> ThemeMode {
    if document.root_is_dark() {
        return ThemeMode::Dark;
    }
    match store.get(THEME_STORAGE_KEY) {
        Ok(Some(stored)) => stored.parse().unwrap_or_else(|_| {
            tracing::debug!(value = %stored, "ignoring invalid stored theme");
            ThemeMode::Dark
        }),
        Ok(None) => ThemeMode::Dark,
        Err(err) => {
            tracing::debug!(error = %err, "theme preference unavailable");
            ThemeMode::Dark
        }
    }
}
