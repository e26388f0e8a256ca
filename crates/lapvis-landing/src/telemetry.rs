//! Fabricated vehicle telemetry for the HUD.
//!
//! Values random-walk inside plausible ranges; nothing here reads a real car.

use std::ops::RangeInclusive;
use std::time::{Duration, Instant};

use lapvis_engine::time::Interval;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SPEED_RANGE: RangeInclusive<f32> = 120.0..=340.0;
pub const THROTTLE_RANGE: RangeInclusive<f32> = 0.0..=100.0;
pub const GEAR_RANGE: RangeInclusive<u8> = 1..=8;

/// Max brake pressure of a random brake event, in percent.
const BRAKE_MAX: f32 = 40.0;
/// Chance per update that the driver is on the brakes.
const BRAKE_CHANCE: f32 = 0.15;
/// km/h per gear step.
const SPEED_PER_GEAR: f32 = 40.0;

/// Current simulated car state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Telemetry {
    /// km/h
    pub speed: f32,
    /// percent
    pub throttle: f32,
    /// percent
    pub brake: f32,
    pub gear: u8,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self {
            speed: 200.0,
            throttle: 40.0,
            brake: 0.0,
            gear: 4,
        }
    }
}

/// Integer values as shown on the HUD.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Readout {
    pub speed_kmh: u32,
    pub throttle_pct: u32,
    pub brake_pct: u32,
    pub gear: u8,
}

impl Telemetry {
    /// Advances the simulation by one update.
    ///
    /// Gear follows the speed before it is clamped, so a speed that drifts
    /// under the floor can still show first gear for one update.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.speed += rng.gen_range(-4.0..4.0);
        self.throttle += rng.gen_range(-5.0..5.0);
        self.brake = if rng.r#gen::<f32>() > 1.0 - BRAKE_CHANCE {
            rng.r#gen::<f32>() * BRAKE_MAX
        } else {
            0.0
        };

        let gear = (self.speed / SPEED_PER_GEAR).floor();
        self.gear = gear.clamp(*GEAR_RANGE.start() as f32, *GEAR_RANGE.end() as f32) as u8;

        self.speed = self.speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
        self.throttle = self.throttle.clamp(*THROTTLE_RANGE.start(), *THROTTLE_RANGE.end());
    }

    pub fn readout(&self) -> Readout {
        Readout {
            speed_kmh: self.speed.floor() as u32,
            throttle_pct: self.throttle.floor() as u32,
            brake_pct: self.brake.floor() as u32,
            gear: self.gear,
        }
    }
}

/// Telemetry updated on a fixed interval, polled from the frame callback.
#[derive(Debug)]
pub struct TelemetryFeed {
    current: Telemetry,
    interval: Interval,
    rng: StdRng,
}

impl TelemetryFeed {
    /// `seed` makes the sequence reproducible; `None` seeds from the OS.
    pub fn new(period: Duration, start: Instant, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            current: Telemetry::default(),
            interval: Interval::new(period, start),
            rng,
        }
    }

    pub fn current(&self) -> &Telemetry {
        &self.current
    }

    /// Steps the simulation if the interval fired. Returns `true` on update.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.interval.poll(now) {
            return false;
        }
        self.current.step(&mut self.rng);
        log::trace!("telemetry update: {:?}", self.current.readout());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_known_state() {
        assert_eq!(
            Telemetry::default().readout(),
            Readout { speed_kmh: 200, throttle_pct: 40, brake_pct: 0, gear: 4 }
        );
    }

    #[test]
    fn long_runs_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut t = Telemetry::default();
        for _ in 0..20_000 {
            t.step(&mut rng);
            assert!(SPEED_RANGE.contains(&t.speed), "speed {}", t.speed);
            assert!(THROTTLE_RANGE.contains(&t.throttle), "throttle {}", t.throttle);
            assert!((0.0..BRAKE_MAX).contains(&t.brake), "brake {}", t.brake);
            assert!(GEAR_RANGE.contains(&t.gear), "gear {}", t.gear);
        }
    }

    #[test]
    fn speed_moves_at_most_four_per_step() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut t = Telemetry::default();
        for _ in 0..1_000 {
            let before = t.speed;
            t.step(&mut rng);
            assert!((t.speed - before).abs() <= 4.0);
        }
    }

    #[test]
    fn gear_tracks_speed_bands() {
        let mut rng = StdRng::seed_from_u64(3);
        for (speed, gear) in [(330.0, 8), (215.0, 5), (165.0, 4), (125.0, 3)] {
            let mut t = Telemetry { speed, ..Telemetry::default() };
            t.step(&mut rng);
            // One step moves speed by < 4 km/h; none of these sit near a band edge.
            assert_eq!(t.gear, gear, "from {speed}");
        }
    }

    #[test]
    fn brakes_sometimes() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut t = Telemetry::default();
        let braking = (0..2_000)
            .filter(|_| {
                t.step(&mut rng);
                t.brake > 0.0
            })
            .count();
        // ~15% of updates.
        assert!((150..=450).contains(&braking), "braking {braking}");
    }

    #[test]
    fn same_seed_same_sequence() {
        let t0 = Instant::now();
        let mut a = TelemetryFeed::new(Duration::from_millis(120), t0, Some(9));
        let mut b = TelemetryFeed::new(Duration::from_millis(120), t0, Some(9));
        for i in 1..=10 {
            let now = t0 + Duration::from_millis(120 * i);
            assert!(a.poll(now));
            assert!(b.poll(now));
            assert_eq!(a.current(), b.current());
        }
    }

    #[test]
    fn feed_waits_for_interval() {
        let t0 = Instant::now();
        let mut feed = TelemetryFeed::new(Duration::from_millis(120), t0, Some(1));
        assert!(!feed.poll(t0 + Duration::from_millis(100)));
        assert_eq!(*feed.current(), Telemetry::default());
        assert!(feed.poll(t0 + Duration::from_millis(121)));
    }
}
