//! CPU mirror of the grid floor fragment program.
//!
//! Same formulas as `shaders/grid_floor.wgsl`. The GPU reads the style from
//! the uniform buffer, so both sides share one set of constants. `footprint`
//! stands in for `fwidth`: how much the grid coordinate changes across one
//! screen pixel.

use glam::{Vec2, Vec3};

/// Floor for the derivative term; avoids `0 / 0` exactly on a line.
pub const MIN_FOOTPRINT: f32 = 1e-6;

/// One periodic line pattern.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridLayer {
    /// Lines per unit of grid coordinate.
    pub scale: f32,
    pub weight: f32,
}

/// Visual constants of the grid floor.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GridStyle {
    /// Straight-alpha RGB.
    pub accent: Vec3,
    pub coarse: GridLayer,
    pub fine: GridLayer,
    /// Exponential falloff rate of the beam with horizontal distance.
    pub beam_sharpness: f32,
    /// Beam intensity at its center.
    pub beam_weight: f32,
    /// Smallest magnitude the perspective divisor may take.
    pub min_divisor: f32,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            accent: Vec3::new(0.0, 0.9, 1.0),
            coarse: GridLayer { scale: 20.0, weight: 0.4 },
            fine: GridLayer { scale: 80.0, weight: 0.15 },
            beam_sharpness: 20.0,
            beam_weight: 0.8,
            min_divisor: 1e-3,
        }
    }
}

/// GLSL/WGSL `fract`: `x - floor(x)`, always in `[0, 1)`.
#[inline]
fn fract(v: Vec2) -> Vec2 {
    v - v.floor()
}

/// Clamps `d` away from zero to at least `min_mag`, keeping its sign.
#[inline]
pub fn safe_divisor(d: f32, min_mag: f32) -> f32 {
    if d.abs() < min_mag {
        if d.is_sign_negative() { -min_mag } else { min_mag }
    } else {
        d
    }
}

/// One-point perspective: `x / (1 + 2y)`, `y` unchanged.
#[inline]
pub fn perspective_warp(uv: Vec2, min_divisor: f32) -> Vec2 {
    let d = safe_divisor(1.0 + 2.0 * uv.y, min_divisor);
    Vec2::new(uv.x / d, uv.y)
}

/// Grid line intensity in `[0, 1]` at `coord` for a layer of `scale` lines.
///
/// `footprint` is the per-pixel change of `coord` (before scaling).
#[inline]
pub fn grid_line(coord: Vec2, scale: f32, footprint: Vec2) -> f32 {
    let p = coord * scale;
    let fw = (footprint * scale).abs().max(Vec2::splat(MIN_FOOTPRINT));
    let g = (fract(p - 0.5) - 0.5).abs() / fw;
    1.0 - g.x.min(g.y).min(1.0)
}

/// Beam intensity at horizontal position `x` for beam center `scan`.
#[inline]
pub fn scan_beam(x: f32, scan: f32, style: &GridStyle) -> f32 {
    (-(x - scan).abs() * style.beam_sharpness).exp() * style.beam_weight
}

/// Combined scalar intensity before tinting.
pub fn intensity(uv: Vec2, footprint: Vec2, scan: f32, style: &GridStyle) -> f32 {
    let guv = perspective_warp(uv, style.min_divisor);
    let g1 = grid_line(guv, style.coarse.scale, footprint) * style.coarse.weight;
    let g2 = grid_line(guv, style.fine.scale, footprint) * style.fine.weight;
    g1 + g2 + scan_beam(uv.x, scan, style)
}

/// Final fragment color: RGB clamped to `[0, 1]`, alpha 1.
pub fn shade(uv: Vec2, footprint: Vec2, scan: f32, style: &GridStyle) -> [f32; 4] {
    let rgb = (style.accent * intensity(uv, footprint, scan, style)).clamp(Vec3::ZERO, Vec3::ONE);
    [rgb.x, rgb.y, rgb.z, 1.0]
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// Roughly one pixel of a 1000 px wide floor.
    const FP: Vec2 = Vec2::splat(1e-3);

    #[rstest]
    #[case(0.0)]
    #[case(0.3)]
    #[case(0.77)]
    #[case(1.0)]
    fn warp_is_identity_at_near_edge(#[case] x: f32) {
        assert_eq!(perspective_warp(Vec2::new(x, 0.0), 1e-3), Vec2::new(x, 0.0));
    }

    #[test]
    fn warp_compresses_toward_horizon() {
        let w = perspective_warp(Vec2::new(0.8, 0.5), 1e-3);
        assert!((w.x - 0.4).abs() < 1e-6);
        assert_eq!(w.y, 0.5);
    }

    #[test]
    fn divisor_never_reaches_zero() {
        assert_eq!(safe_divisor(0.0, 1e-3), 1e-3);
        assert_eq!(safe_divisor(-1e-9, 1e-3), -1e-3);
        assert_eq!(safe_divisor(2.0, 1e-3), 2.0);

        let w = perspective_warp(Vec2::new(0.5, -0.5), 1e-3);
        assert!(w.x.is_finite());
        assert!((w.x - 500.0).abs() < 1e-2);
    }

    #[rstest]
    #[case(0.0)]
    #[case(0.013)]
    #[case(0.4)]
    #[case(0.6251)]
    fn coarse_grid_is_periodic(#[case] x: f32) {
        let a = grid_line(Vec2::new(x, 0.021), 20.0, FP);
        let b = grid_line(Vec2::new(x + 1.0 / 20.0, 0.021), 20.0, FP);
        assert!((a - b).abs() < 1e-3, "{a} vs {b} at x={x}");
    }

    #[rstest]
    #[case(0.0255)]
    #[case(0.31)]
    fn fine_grid_is_periodic_in_y(#[case] y: f32) {
        let a = grid_line(Vec2::new(0.0061, y), 80.0, FP);
        let b = grid_line(Vec2::new(0.0061, y + 1.0 / 80.0), 80.0, FP);
        assert!((a - b).abs() < 1e-3, "{a} vs {b} at y={y}");
    }

    #[test]
    fn lines_are_full_and_cells_are_empty() {
        assert_eq!(grid_line(Vec2::new(0.05, 0.025), 20.0, FP), 1.0);
        assert_eq!(grid_line(Vec2::new(0.025, 0.025), 20.0, FP), 0.0);
    }

    #[test]
    fn line_width_follows_footprint() {
        // Half a footprint off the line: half intensity, whatever the footprint.
        for fp in [1e-3, 4e-3] {
            let off = 0.5 * fp;
            let v = grid_line(Vec2::new(0.1 + off, 0.025), 20.0, Vec2::splat(fp));
            assert!((v - 0.5).abs() < 1e-2, "fp={fp} v={v}");
        }
    }

    #[test]
    fn zero_footprint_does_not_produce_nan() {
        let v = grid_line(Vec2::new(0.05, 0.05), 20.0, Vec2::ZERO);
        assert!(v.is_finite());
    }

    #[test]
    fn beam_peaks_at_scan_position() {
        let style = GridStyle::default();
        assert!((scan_beam(0.5, 0.5, &style) - 0.8).abs() < 1e-6);
        assert!((scan_beam(0.0, 0.0, &style) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn beam_decays_monotonically_with_distance() {
        let style = GridStyle::default();
        let mut last = f32::INFINITY;
        for i in 0..=50 {
            let d = i as f32 * 0.02;
            let v = scan_beam(0.3 + d, 0.3, &style);
            assert!(v < last);
            assert!((v - scan_beam(0.3 - d, 0.3, &style)).abs() < 1e-6);
            last = v;
        }
    }

    #[test]
    fn shade_is_clamped_and_opaque() {
        let style = GridStyle::default();
        // On a coarse and fine line under the beam: intensity > 1.
        let c = shade(Vec2::new(0.0, 0.0), FP, 0.0, &style);
        assert_eq!(c[3], 1.0);
        assert!(c.iter().all(|ch| (0.0..=1.0).contains(ch)));
        assert_eq!(c[2], 1.0);
        assert_eq!(c[0], 0.0);
    }

    #[test]
    fn shade_is_dark_between_lines_far_from_beam() {
        let style = GridStyle::default();
        // Warped coordinate sits mid-cell for both layers.
        let uv = Vec2::new(0.51875 * 1.0375, 0.01875);
        let c = shade(uv, FP, 0.0, &style);
        assert!(c[1] < 0.01 && c[2] < 0.01, "{c:?}");
    }
}
