//! Timer and frame scheduling.
//!
//! Everything time-based in the shell (simulated worker latency, the resize
//! debounce, the frame that ends a transition) goes through a [`Scheduler`].
//! The shell never sleeps; it asks the scheduler for due work and delivers it.
//!
//! Two implementations share one [`TaskQueue`]:
//!
//! - [`ManualScheduler`]: a virtual clock advanced explicitly, for tests
//! - [`SystemScheduler`]: wall clock based on [`Instant`], for the binary
//!
//! Frames have no deadline. Every frame requested before a `take_frames` call
//! is returned by it, mirroring one animation-frame tick.

use crate::worker::WorkerMessage;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Handle returned by [`Scheduler::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Handle returned by [`Scheduler::request_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

/// Work the shell schedules for later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Deliver a request to the session worker.
    Worker(WorkerMessage),
    /// Resize debounce window elapsed.
    ResizeDebounce,
    /// Frame after the resize debounce; applies the settled width.
    ResizeFrame,
    /// Frame after a navigation; clears the transitioning flag.
    TransitionFrame,
}

/// Source of timers and frames.
pub trait Scheduler {
    /// Time elapsed since the scheduler was created.
    fn now(&self) -> Duration;

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId;

    /// Cancels a timer. Returns `false` if it already fired or was cancelled.
    fn clear_timeout(&mut self, id: TimerId) -> bool;

    fn request_frame(&mut self, task: Task) -> FrameId;

    /// Cancels a frame. Returns `false` if it already ran or was cancelled.
    fn cancel_frame(&mut self, id: FrameId) -> bool;

    /// Removes and returns timers whose deadline has passed, earliest first.
    fn take_due(&mut self) -> Vec<Task>;

    /// Removes and returns every requested frame, in request order.
    fn take_frames(&mut self) -> Vec<Task>;

    /// Deadline of the earliest pending timer.
    fn next_deadline(&self) -> Option<Duration>;

    /// Whether any frame is waiting.
    fn has_frames(&self) -> bool;

    /// Drops every pending timer and frame.
    fn clear(&mut self);
}

/// Pending timers and frames, independent of the clock.
#[derive(Debug, Default)]
pub struct TaskQueue {
    next_id: u64,
    timers: BTreeMap<(Duration, u64), Task>,
    frames: Vec<(u64, Task)>,
}

impl TaskQueue {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn schedule(&mut self, deadline: Duration, task: Task) -> TimerId {
        let id = self.allocate_id();
        self.timers.insert((deadline, id), task);
        TimerId(id)
    }

    pub fn unschedule(&mut self, id: TimerId) -> bool {
        let key = self.timers.keys().find(|(_, timer)| *timer == id.0).copied();
        key.and_then(|key| self.timers.remove(&key)).is_some()
    }

    pub fn push_frame(&mut self, task: Task) -> FrameId {
        let id = self.allocate_id();
        self.frames.push((id, task));
        FrameId(id)
    }

    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|(frame, _)| *frame != id.0);
        self.frames.len() != before
    }

    pub fn take_due(&mut self, now: Duration) -> Vec<Task> {
        let mut due = Vec::new();
        while let Some(entry) = self.timers.first_entry() {
            if entry.key().0 > now {
                break;
            }
            due.push(entry.remove());
        }
        due
    }

    pub fn take_frames(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.frames)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.keys().next().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.timers.clear();
        self.frames.clear();
    }
}

/// Scheduler driven by a virtual clock.
///
/// # Example
///
/// ```
/// use delv_shell::runtime::scheduler::{ManualScheduler, Scheduler, Task};
/// use std::time::Duration;
///
/// let mut scheduler = ManualScheduler::new();
/// scheduler.set_timeout(Duration::from_millis(150), Task::ResizeDebounce);
///
/// scheduler.advance(Duration::from_millis(149));
/// assert!(scheduler.take_due().is_empty());
///
/// scheduler.advance(Duration::from_millis(1));
/// assert_eq!(scheduler.take_due(), vec![Task::ResizeDebounce]);
/// ```
#[derive(Debug, Default)]
pub struct ManualScheduler {
    clock: Duration,
    queue: TaskQueue,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the virtual clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    #[must_use]
    pub const fn queue(&self) -> &TaskQueue {
        &self.queue
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.clock
    }

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        self.queue.schedule(self.clock + delay, task)
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.queue.unschedule(id)
    }

    fn request_frame(&mut self, task: Task) -> FrameId {
        self.queue.push_frame(task)
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.queue.cancel_frame(id)
    }

    fn take_due(&mut self) -> Vec<Task> {
        self.queue.take_due(self.clock)
    }

    fn take_frames(&mut self) -> Vec<Task> {
        self.queue.take_frames()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn has_frames(&self) -> bool {
        self.queue.has_frames()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Scheduler driven by the monotonic system clock.
#[derive(Debug)]
pub struct SystemScheduler {
    started: Instant,
    queue: TaskQueue,
}

impl SystemScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            queue: TaskQueue::default(),
        }
    }

    /// Time until the next timer fires, or `None` when nothing is pending.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        if self.queue.has_frames() {
            return Some(Duration::ZERO);
        }
        self.queue
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now()))
    }
}

impl Default for SystemScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for SystemScheduler {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn set_timeout(&mut self, delay: Duration, task: Task) -> TimerId {
        let deadline = self.now() + delay;
        self.queue.schedule(deadline, task)
    }

    fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.queue.unschedule(id)
    }

    fn request_frame(&mut self, task: Task) -> FrameId {
        self.queue.push_frame(task)
    }

    fn cancel_frame(&mut self, id: FrameId) -> bool {
        self.queue.cancel_frame(id)
    }

    fn take_due(&mut self) -> Vec<Task> {
        let now = self.now();
        self.queue.take_due(now)
    }

    fn take_frames(&mut self) -> Vec<Task> {
        self.queue.take_frames()
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn has_frames(&self) -> bool {
        self.queue.has_frames()
    }

    fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let mut s = ManualScheduler::new();
        s.set_timeout(MS * 300, Task::TransitionFrame);
        s.set_timeout(MS * 100, Task::ResizeDebounce);
        s.set_timeout(MS * 100, Task::ResizeFrame);

        s.advance(MS * 300);
        assert_eq!(
            s.take_due(),
            vec![Task::ResizeDebounce, Task::ResizeFrame, Task::TransitionFrame]
        );
        assert!(s.next_deadline().is_none());
    }

    #[test]
    fn cleared_timer_never_fires() {
        let mut s = ManualScheduler::new();
        let id = s.set_timeout(MS * 10, Task::ResizeDebounce);
        assert!(s.clear_timeout(id));
        assert!(!s.clear_timeout(id));
        s.advance(MS * 10);
        assert!(s.take_due().is_empty());
    }

    #[test]
    fn cancelled_frame_is_not_taken() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame(Task::ResizeFrame);
        s.request_frame(Task::TransitionFrame);
        assert!(s.cancel_frame(a));
        assert_eq!(s.take_frames(), vec![Task::TransitionFrame]);
        assert!(!s.has_frames());
    }

    #[test]
    fn timer_deadline_is_relative_to_virtual_now() {
        let mut s = ManualScheduler::new();
        s.advance(MS * 1000);
        s.set_timeout(MS * 500, Task::ResizeDebounce);
        assert_eq!(s.next_deadline(), Some(MS * 1500));
    }

    #[test]
    fn clear_drops_everything() {
        let mut s = ManualScheduler::new();
        s.set_timeout(MS, Task::ResizeDebounce);
        s.request_frame(Task::ResizeFrame);
        s.clear();
        assert_eq!(s.queue().pending_timers(), 0);
        assert_eq!(s.queue().pending_frames(), 0);
    }

    #[test]
    fn system_scheduler_reports_zero_wait_for_frames() {
        let mut s = SystemScheduler::new();
        s.request_frame(Task::TransitionFrame);
        assert_eq!(s.time_until_next(), Some(Duration::ZERO));
    }
}
