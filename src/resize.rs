//! Debounced container-width observation.
//!
//! The dashboard surface feeds the observed content width in every frame;
//! the coordinator starts (or restarts) a quiet-period timer whenever the
//! width changes and only resolves a column count once the size has settled.
//! The timer is just a recorded `Instant`, so a newer width wins by
//! overwriting it and teardown cancels by dropping the pending state.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::{breakpoints::MIN_WIDTH_PX, resize::DEBOUNCE_MS};
use crate::layout::resolve_columns;

/// Published when a settled resize lands on a different column count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnChange {
    /// Settled content width, floored at the minimum supported width.
    pub width_px: f32,
    pub columns: u32,
}

pub struct ResizeCoordinator {
    debounce: Duration,
    observed_width: Option<f32>,
    pending_since: Option<Instant>,
    published_width: f32,
    published_columns: Option<u32>,
}

impl ResizeCoordinator {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(DEBOUNCE_MS))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            observed_width: None,
            pending_since: None,
            published_width: MIN_WIDTH_PX,
            published_columns: None,
        }
    }

    /// Record the current container width. A changed width restarts the
    /// quiet-period timer; an unchanged one leaves any running timer alone.
    pub fn observe(&mut self, width_px: f32, now: Instant) {
        if self.observed_width == Some(width_px) {
            return;
        }
        debug!(width = width_px, "Container width changed, debouncing");
        self.observed_width = Some(width_px);
        self.pending_since = Some(now);
    }

    /// Check the timer. Returns a change exactly once per settled resize
    /// that lands on a new column count.
    ///
    /// The very first observation publishes without waiting out the quiet
    /// period so the dashboard leaves its loading state immediately.
    pub fn poll(&mut self, now: Instant) -> Option<ColumnChange> {
        let since = self.pending_since?;
        let settle_now = self.published_columns.is_none();
        if !settle_now && now.duration_since(since) < self.debounce {
            return None;
        }
        self.pending_since = None;

        let width = self.observed_width?.max(MIN_WIDTH_PX);
        self.published_width = width;
        let columns = resolve_columns(self.observed_width?);
        if self.published_columns == Some(columns) {
            return None;
        }
        self.published_columns = Some(columns);
        debug!(width = width, columns = columns, "Resize settled on new column count");
        Some(ColumnChange { width_px: width, columns })
    }

    /// True while a resize is waiting out the quiet period. The UI uses this
    /// to schedule a repaint so the timer fires without further input.
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// Drop any pending timer (teardown path).
    pub fn cancel(&mut self) {
        self.pending_since = None;
    }

    /// Last settled width, floored at the minimum supported width.
    pub fn width_px(&self) -> f32 {
        self.published_width
    }
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
