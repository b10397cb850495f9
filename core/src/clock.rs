//! Scan clock: a cyclic cursor advanced on a fixed period.
//!
//! The clock is an explicit scheduler. It owns at most one active
//! [`TimerHandle`]; every change to `playing`, the interval, the hold flag or
//! the identity of the driving set cancels that handle and schedules a fresh
//! one. A handle that was cancelled can still be presented to [`ScanClock::fire`]
//! by a slow caller, but it is recognised by its generation and ignored.
//!
//! The clock never stores the length of the set it scans. Callers pass the
//! current length every time the cursor moves, so a set that shrank between
//! scheduling and firing can never be indexed with a stale length.
//!
//! Time is passed in as `Instant` values so the front-end owns the real clock
//! and tests can drive it deterministically.

use std::time::{Duration, Instant};

/// Default scan period.
pub const DEFAULT_INTERVAL_MS: u64 = 2000;

/// Shortest accepted scan period.
pub const MIN_INTERVAL_MS: u64 = 50;

/// A scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
    due: Instant,
}

impl TimerHandle {
    /// When this tick is due.
    pub fn due(&self) -> Instant {
        self.due
    }
}

/// Cursor plus play state plus the single pending tick.
#[derive(Debug, Clone)]
pub struct ScanClock {
    cursor: usize,
    playing: bool,
    /// Temporarily stopped without changing `playing` (hover focus)
    held: bool,
    interval: Duration,
    generation: u64,
    timer: Option<TimerHandle>,
}

impl ScanClock {
    /// Create a stopped clock with no pending tick.
    pub fn new(interval_ms: u64, playing: bool) -> Self {
        Self {
            cursor: 0,
            playing,
            held: false,
            interval: Duration::from_millis(interval_ms.max(MIN_INTERVAL_MS)),
            generation: 0,
            timer: None,
        }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current cursor, or `None` when the driving set is empty.
    pub fn active_cursor(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.cursor.min(len - 1))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// True when ticks will advance the cursor.
    pub fn is_running(&self) -> bool {
        self.playing && !self.held
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval.as_millis() as u64
    }

    /// The pending tick, if any.
    pub fn pending(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// When the pending tick is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timer.map(|t| t.due)
    }

    // ========== Scheduling ==========

    /// Cancel the pending tick and schedule a new one a full interval from `now`.
    pub fn reschedule(&mut self, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        self.timer = self.is_running().then(|| TimerHandle {
            generation: self.generation,
            due: now + self.interval,
        });
    }

    /// Cancel the pending tick without scheduling another.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.timer = None;
    }

    pub fn set_playing(&mut self, playing: bool, now: Instant) {
        self.playing = playing;
        self.reschedule(now);
    }

    pub fn set_interval_ms(&mut self, interval_ms: u64, now: Instant) {
        self.interval = Duration::from_millis(interval_ms.max(MIN_INTERVAL_MS));
        self.reschedule(now);
    }

    /// Stop advancing without touching `playing` or the cursor.
    pub fn hold(&mut self, now: Instant) {
        self.held = true;
        self.reschedule(now);
    }

    /// Undo [`hold`](Self::hold); the cursor stays where it is.
    pub fn release(&mut self, now: Instant) {
        self.held = false;
        self.reschedule(now);
    }

    /// The driving set changed identity: back to the first item.
    pub fn reset(&mut self, now: Instant) {
        self.cursor = 0;
        self.reschedule(now);
    }

    /// Place the cursor on `index`, clamped into a set of `len` items.
    pub fn set_cursor(&mut self, index: usize, len: usize, now: Instant) {
        self.cursor = if len == 0 { 0 } else { index.min(len - 1) };
        self.reschedule(now);
    }

    // ========== Cursor movement ==========

    /// Advance one step over a set of `len` items.
    ///
    /// No-op when stopped or when the set is empty. Returns true if the cursor moved.
    pub fn tick(&mut self, len: usize) -> bool {
        if !self.is_running() || len == 0 {
            return false;
        }
        self.cursor = (self.cursor + 1) % len;
        true
    }

    /// Step one item backwards with wraparound, then restart the period.
    pub fn previous(&mut self, len: usize, now: Instant) {
        if len == 0 {
            return;
        }
        let cursor = self.cursor.min(len - 1);
        self.cursor = if cursor == 0 { len - 1 } else { cursor - 1 };
        self.reschedule(now);
    }

    /// Fire a scheduled tick against the current set length.
    ///
    /// Returns false without side effects when `handle` is not the active one.
    pub fn fire(&mut self, handle: TimerHandle, len: usize, now: Instant) -> bool {
        if self.timer != Some(handle) {
            return false;
        }
        let moved = self.tick(len);
        self.reschedule(now);
        moved
    }

    /// Fire the pending tick if it is due. Returns true if the cursor moved.
    pub fn poll(&mut self, len: usize, now: Instant) -> bool {
        match self.timer {
            Some(handle) if now >= handle.due => self.fire(handle, len, now),
            _ => false,
        }
    }
}

impl Default for ScanClock {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS, true)
    }
}
