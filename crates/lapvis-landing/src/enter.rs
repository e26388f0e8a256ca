use std::time::{Duration, Instant};

pub const IDLE_TITLE: &str = "LapVis";
pub const LOADING_TITLE: &str = "LapVis | Loading Telemetry...";

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EnterState {
    Idle,
    Loading { since: Instant },
    /// Terminal; the URL has been handed off.
    Redirected,
}

/// The "enter dashboard" button: a short loading phase, then one redirect.
#[derive(Debug, Clone)]
pub struct EnterButton {
    state: EnterState,
    delay: Duration,
}

impl EnterButton {
    pub fn new(delay: Duration) -> Self {
        Self { state: EnterState::Idle, delay }
    }

    pub fn state(&self) -> EnterState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, EnterState::Loading { .. })
    }

    /// Starts loading. Returns `false` if the button was not idle.
    pub fn activate(&mut self, now: Instant) -> bool {
        if self.state != EnterState::Idle {
            return false;
        }
        self.state = EnterState::Loading { since: now };
        true
    }

    /// Returns `true` exactly once, on the first poll after the delay ran out.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            EnterState::Loading { since } if now.saturating_duration_since(since) >= self.delay => {
                self.state = EnterState::Redirected;
                true
            }
            _ => false,
        }
    }

    /// Loading progress in `[0, 1]`; 0 when idle, 1 once redirected.
    pub fn progress(&self, now: Instant) -> f32 {
        match self.state {
            EnterState::Idle => 0.0,
            EnterState::Redirected => 1.0,
            EnterState::Loading { since } => {
                if self.delay.is_zero() {
                    return 1.0;
                }
                let t = now.saturating_duration_since(since).as_secs_f32() / self.delay.as_secs_f32();
                t.clamp(0.0, 1.0)
            }
        }
    }

    /// Back to idle, e.g. after the browser failed to launch.
    pub fn reset(&mut self) {
        self.state = EnterState::Idle;
    }

    pub fn title(&self) -> &'static str {
        match self.state {
            EnterState::Idle => IDLE_TITLE,
            EnterState::Loading { .. } | EnterState::Redirected => LOADING_TITLE,
        }
    }
}
