//! The style-computation seam.
//!
//! Token and color resolution never re-implement the cascade themselves. They
//! attach a transient probe to a [`StyleEngine`], ask it for computed values
//! and detach the probe again. [`Document`](crate::Document) is the in-process
//! engine backed by a parsed stylesheet; [`Headless`] models an environment
//! with no visual document at all.
//!
//! # Probe lifetime
//!
//! [`Probe`] is a guard: the probe is detached when the guard is dropped, on
//! every exit path including unwinding. Callers never detach by hand.
//!
//! ```rust
//! use atelier_theme::{Document, Probe, ProbeStyle, StyleEngine, ThemeMode};
//!
//! let document = Document::from_css(":root { --primary: 221 83% 53%; }");
//! {
//!     let probe = Probe::attach(&document, ProbeStyle::for_mode(ThemeMode::Light)).unwrap();
//!     assert_eq!(probe.custom_property("primary"), "221 83% 53%");
//!     assert_eq!(document.attached_probes(), 1);
//! }
//! assert_eq!(document.attached_probes(), 0);
//! ```

use crate::mode::ThemeMode;

/// Identifier of a probe attached to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProbeId(pub(crate) u64);

impl ProbeId {
    /// Wraps an engine-specific probe handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Inline style of a probe element.
///
/// Probes are always positioned off-screen, hidden, excluded from pointer
/// events and from the accessibility tree; only the theme marker and the
/// inline color vary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProbeStyle {
    /// Theme the probe is pinned to by carrying (or not carrying) the dark
    /// marker itself. `None` inherits the page's active theme.
    pub mode: Option<ThemeMode>,
    /// Inline `color` expression, if any.
    pub color: Option<String>,
}

impl ProbeStyle {
    /// A probe that resolves custom properties as defined for `mode`,
    /// whatever the page shows.
    pub fn for_mode(mode: ThemeMode) -> Self {
        Self {
            mode: Some(mode),
            color: None,
        }
    }

    /// A probe whose inline `color` is set to `expression`. It inherits the
    /// page's theme.
    pub fn with_color(expression: impl Into<String>) -> Self {
        Self {
            mode: None,
            color: Some(expression.into()),
        }
    }

    /// The theme the probe resolves in on a page showing `page`.
    pub fn effective_mode(&self, page: ThemeMode) -> ThemeMode {
        self.mode.unwrap_or(page)
    }
}

/// Access to a host style engine.
///
/// Implementations must make `detach_probe` idempotent and must never fail:
/// value lookups that cannot be answered return the empty string.
pub trait StyleEngine {
    /// Attaches a probe. Returns `None` when there is no visual document.
    fn attach_probe(&self, style: ProbeStyle) -> Option<ProbeId>;

    /// Computed value of the custom property `--name` on the probe, or `""`.
    fn custom_property(&self, probe: ProbeId, name: &str) -> String;

    /// Computed `color` of the probe serialized as `rgb()`/`rgba()`, or `""`.
    fn computed_color(&self, probe: ProbeId) -> String;

    /// Removes the probe from the document.
    fn detach_probe(&self, probe: ProbeId);
}

impl<E: StyleEngine + ?Sized> StyleEngine for &E {
    fn attach_probe(&self, style: ProbeStyle) -> Option<ProbeId> {
        (**self).attach_probe(style)
    }

    fn custom_property(&self, probe: ProbeId, name: &str) -> String {
        (**self).custom_property(probe, name)
    }

    fn computed_color(&self, probe: ProbeId) -> String {
        (**self).computed_color(probe)
    }

    fn detach_probe(&self, probe: ProbeId) {
        (**self).detach_probe(probe)
    }
}

/// An engine without a visual document (server-side render, plain CLI runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl StyleEngine for Headless {
    fn attach_probe(&self, _style: ProbeStyle) -> Option<ProbeId> {
        None
    }

    fn custom_property(&self, _probe: ProbeId, _name: &str) -> String {
        String::new()
    }

    fn computed_color(&self, _probe: ProbeId) -> String {
        String::new()
    }

    fn detach_probe(&self, _probe: ProbeId) {}
}

/// A probe attached to an engine for the lifetime of the guard.
pub struct Probe<'e, E: StyleEngine + ?Sized> {
    engine: &'e E,
    id: ProbeId,
}

impl<'e, E: StyleEngine + ?Sized> Probe<'e, E> {
    /// Attaches a probe, or returns `None` if the engine has no document.
    pub fn attach(engine: &'e E, style: ProbeStyle) -> Option<Self> {
        let id = engine.attach_probe(style)?;
        tracing::trace!(probe = id.0, "attached style probe");
        Some(Self { engine, id })
    }

    pub fn id(&self) -> ProbeId {
        self.id
    }

    /// Computed value of `--name` on this probe.
    pub fn custom_property(&self, name: &str) -> String {
        self.engine.custom_property(self.id, name)
    }

    /// Computed color of this probe.
    pub fn color(&self) -> String {
        self.engine.computed_color(self.id)
    }
}

impl<E: StyleEngine + ?Sized> Drop for Probe<'_, E> {
    fn drop(&mut self) {
        self.engine.detach_probe(self.id);
        tracing::trace!(probe = self.id.0, "detached style probe");
    }
}
