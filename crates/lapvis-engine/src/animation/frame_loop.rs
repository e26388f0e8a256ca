use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Lifecycle of a [`FrameLoop`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    /// Created, `start` not called yet.
    Idle,
    /// Producing elapsed time on every poll.
    Running { started: Instant },
    /// Cancelled through a [`LoopHandle`]. Terminal.
    Stopped,
}

/// Cancellation handle for a running [`FrameLoop`].
///
/// Cheap to clone; all clones refer to the same loop. Single-threaded.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl LoopHandle {
    /// Requests the loop to stop. Takes effect on the next poll.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Per-frame animation driver.
///
/// The runtime already delivers one redraw per display refresh; this type only
/// tracks when the animation started and whether it was cancelled.
#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    handle: LoopHandle,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            handle: LoopHandle::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Returns a handle that can cancel this loop.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Moves `Idle -> Running` with `now` as time zero.
    ///
    /// Calling it again while running keeps the first start time. A stopped
    /// loop stays stopped.
    pub fn start(&mut self, now: Instant) -> LoopHandle {
        if self.state == LoopState::Idle && !self.handle.is_cancelled() {
            log::debug!("frame loop started");
            self.state = LoopState::Running { started: now };
        }
        self.handle()
    }

    /// Elapsed time since start for the frame at `now`.
    ///
    /// Returns `None` when idle or stopped; the caller should not draw.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        if self.handle.is_cancelled() && self.state != LoopState::Stopped {
            log::debug!("frame loop cancelled");
            self.state = LoopState::Stopped;
        }

        match self.state {
            LoopState::Running { started } => Some(now.saturating_duration_since(started)),
            LoopState::Idle | LoopState::Stopped => None,
        }
    }
}
