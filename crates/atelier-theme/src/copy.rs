//! The transient "copied!" indicator.

use std::time::{Duration, Instant};

/// How long an indicator stays active after a copy.
pub const COPY_RESET_DELAY: Duration = Duration::from_secs(2);

/// Remembers the most recent copy action for a short while.
///
/// A later copy replaces the label and restarts the delay.
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    delay: Duration,
    last: Option<(String, Instant)>,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::with_delay(COPY_RESET_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Records a copy of `label` now.
    pub fn copied(&mut self, label: impl Into<String>) {
        self.copied_at(label, Instant::now());
    }

    pub fn copied_at(&mut self, label: impl Into<String>, at: Instant) {
        self.last = Some((label.into(), at));
    }

    /// The label still shown as copied, if any.
    pub fn active(&self) -> Option<&str> {
        self.active_at(Instant::now())
    }

    pub fn active_at(&self, now: Instant) -> Option<&str> {
        let (label, at) = self.last.as_ref()?;
        (now.saturating_duration_since(*at) < self.delay).then_some(label.as_str())
    }

    /// Whether `label` is the one currently shown as copied.
    pub fn is_active(&self, label: &str) -> bool {
        self.active() == Some(label)
    }
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new()
    }
}
