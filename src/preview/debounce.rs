//! Preview refresh scheduling
//!
//! Rendering on every keystroke is wasteful, so content changes only mark
//! the preview dirty. The refresh becomes due once the buffer has been quiet
//! for the configured interval; a burst of edits yields one refresh.
//!
//! Time is passed in by the caller, which keeps this deterministic in tests.

use std::time::{Duration, Instant};

/// Default quiet period before a refresh.
pub const DEFAULT_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalescing single-shot timer for preview refreshes.
#[derive(Debug, Clone)]
pub struct PreviewScheduler {
    interval: Duration,
    /// Time of the most recent change not yet rendered
    last_change: Option<Instant>,
}

impl PreviewScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_change: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Record a change; restarts the quiet period.
    pub fn mark_dirty(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    /// Whether a change is waiting to be rendered.
    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    /// Returns `true` exactly once per quiet period that has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(changed) if now.saturating_duration_since(changed) >= self.interval => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }

    /// Render now if anything is pending, regardless of the interval.
    pub fn flush(&mut self) -> bool {
        self.last_change.take().is_some()
    }
}

impl Default for PreviewScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_DEBOUNCE)
    }
}
