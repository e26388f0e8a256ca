use std::time::Duration;

use glam::Vec3;

use super::{GroundPlane, PerspectiveCamera};

/// Time for the scan beam to sweep the floor once (`1 / k` with `k = 0.2/s`).
pub const SCAN_PERIOD: Duration = Duration::from_secs(5);

/// Largest `f32` strictly below 1.0.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Shader parameters for one frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameParams {
    /// `uTime`: seconds since the animation started.
    pub time: f32,
    /// `uScan`: horizontal beam position, always in `[0, 1)`.
    pub scan: f32,
}

/// Beam position after `elapsed`: `(elapsed / period) mod 1`.
///
/// Computed on integer nanoseconds so the wrap lands exactly on multiples of
/// the period.
pub fn scan_at(elapsed: Duration, period: Duration) -> f32 {
    let period_ns = period.as_nanos().max(1);
    let phase = (elapsed.as_nanos() % period_ns) as f64 / period_ns as f64;
    (phase as f32).min(BELOW_ONE)
}

/// Slow sideways sway of the camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraDrift {
    /// Peak sideways offset in world units.
    pub amplitude: f32,
    /// Angular rate in radians per second.
    pub rate: f32,
}

impl Default for CameraDrift {
    fn default() -> Self {
        Self {
            amplitude: 2.0,
            rate: 0.3,
        }
    }
}

impl CameraDrift {
    pub fn offset_at(&self, seconds: f32) -> f32 {
        (seconds * self.rate).sin() * self.amplitude
    }
}

/// The animated floor: camera, plane and current shader parameters.
///
/// Single writer: the frame callback calls [`advance`](Self::advance) once per
/// frame before the renderer reads [`params`](Self::params).
#[derive(Debug, Clone)]
pub struct GridScene {
    pub camera: PerspectiveCamera,
    pub plane: GroundPlane,
    pub drift: CameraDrift,
    pub scan_period: Duration,
    base_position: Vec3,
    params: FrameParams,
}

impl GridScene {
    /// Builds the scene for a `width` x `height` surface.
    pub fn new(width: u32, height: u32) -> Self {
        let mut camera = PerspectiveCamera::new(60.0, 1.0, 0.1, 1000.0);
        camera.set_viewport(width, height);

        let base_position = Vec3::new(0.0, 3.0, 12.0);
        camera.position = base_position;
        camera.look_at(Vec3::ZERO);

        Self {
            camera,
            plane: GroundPlane::default(),
            drift: CameraDrift::default(),
            scan_period: SCAN_PERIOD,
            base_position,
            params: FrameParams::default(),
        }
    }

    pub fn params(&self) -> FrameParams {
        self.params
    }

    /// Updates `uTime`, `uScan` and the camera drift for `elapsed` since start.
    pub fn advance(&mut self, elapsed: Duration) {
        let seconds = elapsed.as_secs_f32();
        self.params = FrameParams {
            time: seconds,
            scan: scan_at(elapsed, self.scan_period),
        };

        self.camera.position = Vec3::new(
            self.base_position.x + self.drift.offset_at(seconds),
            self.base_position.y,
            self.base_position.z,
        );
        self.camera.look_at(Vec3::ZERO);
    }

    /// Recomputes the camera aspect for the new surface size.
    ///
    /// Idempotent; zero-sized surfaces are ignored.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.camera.set_viewport(width, height) {
            log::debug!("ignoring zero-sized resize {width}x{height}");
        }
    }
}
