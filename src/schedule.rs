// Scheduling primitives for a single-threaded event loop.
// FrameLoop: self-re-arming rAF task that never stacks and can be cancelled.
// Debouncer: fires once after a quiet period. Generation: detects stale async results.

use std::cell::Cell;
use std::rc::Rc;

use crate::types::Millis;

/// Outcome of a frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTick {
    /// Do the frame's work, then request exactly one more frame.
    Run,
    /// Stale or cancelled callback; do nothing and do not re-arm.
    Skip,
}

/// Cooperative, cancellable animation loop.
///
/// The host requests a frame when `start` returns true, and again after every
/// `FrameTick::Run`. At most one request is ever outstanding.
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    running: bool,
    pending: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        FrameLoop::default()
    }

    /// Returns true when the caller must request the first frame.
    pub fn start(&mut self) -> bool {
        if self.running || self.pending {
            // A callback is already armed; restarting would stack a second chain.
            self.running = true;
            return false;
        }
        self.running = true;
        self.pending = true;
        true
    }

    pub fn on_frame(&mut self) -> FrameTick {
        if !self.pending {
            return FrameTick::Skip;
        }
        self.pending = false;
        if !self.running {
            return FrameTick::Skip;
        }
        self.frames += 1;
        self.pending = true;
        FrameTick::Run
    }

    /// Cancel the loop. The outstanding callback, if any, becomes a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames run since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Trailing-edge debounce.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    quiet_period_ms: f64,
    deadline: Option<Millis>,
}

impl Debouncer {
    pub fn new(quiet_period_ms: f64) -> Self {
        Debouncer {
            quiet_period_ms: quiet_period_ms.max(0.0),
            deadline: None,
        }
    }

    /// Record an input event, pushing the deadline out. Returns the new deadline.
    pub fn trigger(&mut self, now: Millis) -> Millis {
        let deadline = now.after(self.quiet_period_ms);
        self.deadline = Some(deadline);
        deadline
    }

    /// True exactly once, when the quiet period has elapsed since the last trigger.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Millis> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

/// Page-liveness counter shared by a page and its in-flight async work.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Rc<Cell<u64>>,
}

/// Snapshot of a `Generation` taken when async work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket(u64);

impl GenerationTicket {
    pub fn from_raw(value: u64) -> Self {
        GenerationTicket(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Generation {
    pub fn new() -> Self {
        Generation::default()
    }

    pub fn ticket(&self) -> GenerationTicket {
        GenerationTicket(self.current.get())
    }

    /// Invalidate every outstanding ticket (rebuild started, page torn down).
    pub fn advance(&self) -> GenerationTicket {
        let next = self.current.get() + 1;
        self.current.set(next);
        GenerationTicket(next)
    }

    pub fn is_current(&self, ticket: GenerationTicket) -> bool {
        self.current.get() == ticket.0
    }
}
