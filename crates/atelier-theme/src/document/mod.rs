//! The host document: root marker, color-scheme hint, probes and observers.
//!
//! [`Document`] plays the part a browser page plays for the documentation
//! site. It owns the parsed [`Stylesheet`], the root element's dark marker and
//! `color-scheme` hint, the set of currently attached probes, and the
//! observers interested in root-marker changes.
//!
//! `Document` is a cheap, cloneable handle; every clone refers to the same
//! page.
//!
//! ## Root marker observation
//!
//! [`Document::observe_root`] registers a callback that runs whenever the
//! dark marker changes, whoever changed it (the theme controller or an
//! embedding host such as a documentation toolbar). The returned
//! [`Observation`] deregisters the callback when dropped.
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use atelier_theme::{Document, ThemeMode};
//!
//! let document = Document::default();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! let observation = document.observe_root(move |mode| sink.lock().unwrap().push(mode));
//!
//! document.set_root_marker(true);
//! document.set_root_marker(true); // unchanged, no notification
//! drop(observation);
//! document.set_root_marker(false);
//!
//! assert_eq!(*seen.lock().unwrap(), vec![ThemeMode::Dark]);
//! ```

mod stylesheet;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub use stylesheet::Stylesheet;

use crate::color::parse_css_color;
use crate::engine::{ProbeId, ProbeStyle, StyleEngine};
use crate::mode::ThemeMode;

/// The stylesheet shipped with the Atelier documentation site.
pub const ATELIER_STYLESHEET: &str = include_str!("../../assets/atelier.css");

type RootCallback = Arc<dyn Fn(ThemeMode) + Send + Sync>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RootElement {
    dark: bool,
    color_scheme: Option<ThemeMode>,
}

#[derive(Default)]
struct DocumentState {
    stylesheet: Stylesheet,
    root: RootElement,
    probes: BTreeMap<ProbeId, ProbeStyle>,
    observers: Vec<(u64, RootCallback)>,
}

struct Shared {
    state: Mutex<DocumentState>,
    next_id: AtomicU64,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

/// A page with a stylesheet and a root element.
#[derive(Clone)]
pub struct Document {
    shared: Arc<Shared>,
}

impl Document {
    /// Creates a document styled by `stylesheet`, with no root marker.
    pub fn new(stylesheet: Stylesheet) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(DocumentState {
                    stylesheet,
                    ..DocumentState::default()
                }),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Parses `css` and creates a document styled by it.
    pub fn from_css(css: &str) -> Self {
        Self::new(Stylesheet::parse(css))
    }

    /// A document styled by [`ATELIER_STYLESHEET`].
    pub fn atelier() -> Self {
        Self::from_css(ATELIER_STYLESHEET)
    }

    /// Replaces the stylesheet, e.g. after the token source was rebuilt.
    pub fn set_stylesheet(&self, stylesheet: Stylesheet) {
        self.shared.lock().stylesheet = stylesheet;
    }

    pub fn stylesheet(&self) -> Stylesheet {
        self.shared.lock().stylesheet.clone()
    }

    /// Whether the root element carries the dark marker.
    pub fn root_is_dark(&self) -> bool {
        self.shared.lock().root.dark
    }

    /// Adds or removes the root dark marker.
    ///
    /// Observers run after the change is applied and only when the marker
    /// actually changed. They are invoked without any document lock held, so
    /// they may read the document freely.
    pub fn set_root_marker(&self, dark: bool) {
        let callbacks: Vec<RootCallback> = {
            let mut state = self.shared.lock();
            if state.root.dark == dark {
                return;
            }
            state.root.dark = dark;
            state
                .observers
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };

        let mode = ThemeMode::from_marker(dark);
        tracing::debug!(%mode, observers = callbacks.len(), "root marker changed");
        for callback in callbacks {
            callback(mode);
        }
    }

    /// The root `color-scheme` hint, if one was set.
    pub fn color_scheme(&self) -> Option<ThemeMode> {
        self.shared.lock().root.color_scheme
    }

    pub fn set_color_scheme(&self, scheme: ThemeMode) {
        self.shared.lock().root.color_scheme = Some(scheme);
    }

    /// Registers `callback` for root-marker changes.
    pub fn observe_root<F>(&self, callback: F) -> Observation
    where
        F: Fn(ThemeMode) + Send + Sync + 'static,
    {
        let id = self.shared.next_id();
        self.shared.lock().observers.push((id, Arc::new(callback)));
        Observation {
            shared: Arc::downgrade(&self.shared),
            id,
        }
    }

    /// Number of registered root observers.
    pub fn observer_count(&self) -> usize {
        self.shared.lock().observers.len()
    }

    /// Number of probes currently attached.
    pub fn attached_probes(&self) -> usize {
        self.shared.lock().probes.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Stylesheet::default())
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Document")
            .field("root", &state.root)
            .field("probes", &state.probes.len())
            .field("observers", &state.observers.len())
            .finish()
    }
}

impl StyleEngine for Document {
    fn attach_probe(&self, style: ProbeStyle) -> Option<ProbeId> {
        let id = ProbeId(self.shared.next_id());
        self.shared.lock().probes.insert(id, style);
        Some(id)
    }

    fn custom_property(&self, probe: ProbeId, name: &str) -> String {
        let state = self.shared.lock();
        let Some(style) = state.probes.get(&probe) else {
            return String::new();
        };
        let mode = style.effective_mode(ThemeMode::from_marker(state.root.dark));
        state.stylesheet.computed(name, mode).unwrap_or_default()
    }

    fn computed_color(&self, probe: ProbeId) -> String {
        let state = self.shared.lock();
        let Some(style) = state.probes.get(&probe) else {
            return String::new();
        };
        let Some(expression) = style.color.as_deref() else {
            return String::new();
        };
        let mode = style.effective_mode(ThemeMode::from_marker(state.root.dark));
        state
            .stylesheet
            .substitute(expression, mode)
            .and_then(|expression| parse_css_color(&expression))
            .map(|color| color.to_string())
            .unwrap_or_default()
    }

    fn detach_probe(&self, probe: ProbeId) {
        self.shared.lock().probes.remove(&probe);
    }
}

/// A registered root-marker observer. Dropping it deregisters the callback.
#[must_use = "the observer is deregistered as soon as the Observation is dropped"]
pub struct Observation {
    shared: Weak<Shared>,
    id: u64,
}

impl Observation {
    /// Deregisters the callback now.
    pub fn disconnect(self) {}
}

impl Drop for Observation {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.lock().observers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation").field("id", &self.id).finish()
    }
}
