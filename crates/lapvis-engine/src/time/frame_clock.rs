use std::time::Instant;

/// Per-window frame timestamps.
///
/// Successive ticks never go backwards, so animation time derived from them
/// is non-decreasing even if the platform clock misbehaves.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp for a frame presented now.
    pub fn tick(&mut self) -> Instant {
        self.tick_at(Instant::now())
    }

    /// Timestamp for a frame at `now`. An instant earlier than the previous
    /// tick is treated as the previous tick.
    pub fn tick_at(&mut self, now: Instant) -> Instant {
        let now = self.last.map_or(now, |last| now.max(last));
        self.last = Some(now);
        now
    }
}
