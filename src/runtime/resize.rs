//! Resize coalescing.
//!
//! Raw resize notifications arrive in bursts. Each one restarts a debounce
//! timer; when the timer finally fires a frame is requested, and only when that
//! frame runs is the latest width handed to the reducer. A burst of any length
//! therefore produces at most one `ViewportSettled` event.
//!
//! ```text
//! resize ─▶ (re)arm timer ──150ms──▶ request frame ──tick──▶ settled width
//!   └──── a new resize cancels both the timer and the frame ────┘
//! ```

use crate::runtime::scheduler::{FrameId, Scheduler, Task, TimerId};
use std::time::Duration;

/// Debounce window used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug)]
pub struct ResizeCoalescer {
    debounce: Duration,
    latest_width: Option<u32>,
    timer: Option<TimerId>,
    frame: Option<FrameId>,
}

impl ResizeCoalescer {
    #[must_use]
    pub const fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            latest_width: None,
            timer: None,
            frame: None,
        }
    }

    /// Records a raw resize and restarts the debounce window.
    pub fn observe(&mut self, width_px: u32, scheduler: &mut dyn Scheduler) {
        tracing::trace!(width_px, "resize observed");
        self.latest_width = Some(width_px);
        self.cancel(scheduler);
        self.timer = Some(scheduler.set_timeout(self.debounce, Task::ResizeDebounce));
    }

    /// Debounce elapsed: wait for the next frame before applying.
    pub fn on_debounce(&mut self, scheduler: &mut dyn Scheduler) {
        self.timer = None;
        if self.latest_width.is_none() {
            return;
        }
        self.frame = Some(scheduler.request_frame(Task::ResizeFrame));
    }

    /// Frame ran: returns the width to apply, if any.
    pub fn on_frame(&mut self) -> Option<u32> {
        self.frame = None;
        let width = self.latest_width.take();
        if let Some(width_px) = width {
            tracing::debug!(width_px, "resize settled");
        }
        width
    }

    /// Cancels pending work and forgets the last observed width.
    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel(scheduler);
        self.latest_width = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.timer.is_some() || self.frame.is_some()
    }

    fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.clear_timeout(timer);
        }
        if let Some(frame) = self.frame.take() {
            scheduler.cancel_frame(frame);
        }
    }
}

impl Default for ResizeCoalescer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
