use std::time::{Duration, Instant};

/// Fixed-period schedule polled once per frame.
///
/// Behaves like a browser `setInterval`: a backlog is not replayed. If a poll
/// comes in more than one period late, the schedule restarts from that poll.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    /// First fire is one `period` after `start`.
    ///
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next: start + period,
        }
    }

    /// Returns `true` if the interval fired at or before `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_120: Duration = Duration::from_millis(120);

    #[test]
    fn does_not_fire_before_first_period() {
        let t0 = Instant::now();
        let mut iv = Interval::new(MS_120, t0);
        assert!(!iv.poll(t0));
        assert!(!iv.poll(t0 + Duration::from_millis(119)));
        assert!(iv.poll(t0 + MS_120));
    }

    #[test]
    fn fires_once_per_period_at_frame_rate() {
        let t0 = Instant::now();
        let mut iv = Interval::new(MS_120, t0);
        // ~60 Hz for one second.
        let fired = (1..=60)
            .filter(|i| iv.poll(t0 + Duration::from_micros(16_667 * i)))
            .count();
        assert_eq!(fired, 8);
    }

    #[test]
    fn late_poll_fires_once_and_reschedules() {
        let t0 = Instant::now();
        let mut iv = Interval::new(MS_120, t0);
        let late = t0 + Duration::from_secs(2);
        assert!(iv.poll(late));
        assert!(!iv.poll(late + Duration::from_millis(60)));
        assert!(iv.poll(late + MS_120));
    }

    #[test]
    fn zero_period_is_bumped_to_one_millisecond() {
        let t0 = Instant::now();
        let mut iv = Interval::new(Duration::ZERO, t0);
        assert!(!iv.poll(t0));
        assert!(iv.poll(t0 + Duration::from_millis(1)));
        assert!(!iv.poll(t0 + Duration::from_millis(1)));
    }
}
