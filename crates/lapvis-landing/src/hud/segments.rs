//! Seven-segment digits built from solid quads.
//!
//! Segment bits: `a` (top) is bit 0, then clockwise `b`..`f`, `g` (middle) is bit 6.

use lapvis_engine::coords::{Rect, Vec2};
use lapvis_engine::paint::Color;
use lapvis_engine::scene::{Layer, OverlayList};

const DIGIT_MASKS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

const WIDTH_RATIO: f32 = 0.55;
const THICKNESS_RATIO: f32 = 0.12;
const SPACING_RATIO: f32 = 0.2;

/// Segment mask for a decimal digit. `None` for anything above 9.
pub fn digit_mask(digit: u8) -> Option<u8> {
    DIGIT_MASKS.get(digit as usize).copied()
}

/// Rectangles of the lit segments of `mask` in a glyph of `height` at `origin`.
pub fn segment_rects(mask: u8, origin: Vec2, height: f32) -> impl Iterator<Item = Rect> {
    let w = height * WIDTH_RATIO;
    let t = height * THICKNESS_RATIO;
    let half = height * 0.5;
    let v = (half - 1.5 * t).max(0.0);
    let (x, y) = (origin.x, origin.y);

    let all = [
        Rect::new(x + t, y, w - 2.0 * t, t),
        Rect::new(x + w - t, y + t, t, v),
        Rect::new(x + w - t, y + half + 0.5 * t, t, v),
        Rect::new(x + t, y + height - t, w - 2.0 * t, t),
        Rect::new(x, y + half + 0.5 * t, t, v),
        Rect::new(x, y + t, t, v),
        Rect::new(x + t, y + half - 0.5 * t, w - 2.0 * t, t),
    ];
    all.into_iter()
        .enumerate()
        .filter(move |(bit, _)| mask & (1 << bit) != 0)
        .map(|(_, r)| r)
}

fn digit_count(mut value: u32) -> u32 {
    let mut n = 1;
    while value >= 10 {
        value /= 10;
        n += 1;
    }
    n
}

/// Width of `value` rendered at `height`.
pub fn number_width(value: u32, height: f32) -> f32 {
    let n = digit_count(value) as f32;
    n * height * WIDTH_RATIO + (n - 1.0) * height * SPACING_RATIO
}

/// Pushes `value` as seven-segment digits starting at `origin` (top-left).
/// Returns the rendered width.
pub fn push_number(
    list: &mut OverlayList,
    layer: Layer,
    origin: Vec2,
    height: f32,
    value: u32,
    color: Color,
) -> f32 {
    let step = height * (WIDTH_RATIO + SPACING_RATIO);
    let n = digit_count(value);
    let mut rest = value;

    // Rightmost digit first.
    for i in (0..n).rev() {
        let mask = digit_mask((rest % 10) as u8).unwrap_or_default();
        rest /= 10;
        let at = Vec2::new(origin.x + i as f32 * step, origin.y);
        for rect in segment_rects(mask, at, height) {
            list.push(layer, rect, color);
        }
    }
    number_width(value, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 6)]
    #[case(1, 2)]
    #[case(4, 4)]
    #[case(7, 3)]
    #[case(8, 7)]
    fn lit_segment_counts(#[case] digit: u8, #[case] lit: u32) {
        assert_eq!(digit_mask(digit).map(u8::count_ones), Some(lit));
    }

    #[test]
    fn no_mask_above_nine() {
        assert_eq!(digit_mask(10), None);
    }

    #[test]
    fn one_lights_right_side_only() {
        let rects: Vec<_> = segment_rects(0x06, Vec2::default(), 40.0).collect();
        assert_eq!(rects.len(), 2);
        assert!(rects.iter().all(|r| r.origin.x > 40.0 * WIDTH_RATIO * 0.5));
    }

    #[test]
    fn segments_stay_inside_glyph_box() {
        let h = 40.0;
        let bbox = Rect::new(10.0, 10.0, h * WIDTH_RATIO, h).inflate(1e-3);
        for r in segment_rects(0x7F, Vec2::new(10.0, 10.0), h) {
            assert!(!r.is_empty());
            assert!(bbox.contains(r.origin));
            let max = r.max();
            assert!(max.x <= bbox.max().x && max.y <= bbox.max().y);
        }
    }

    #[rstest]
    #[case(0, 1)]
    #[case(9, 1)]
    #[case(10, 2)]
    #[case(340, 3)]
    fn digit_counts(#[case] value: u32, #[case] n: u32) {
        assert_eq!(digit_count(value), n);
    }

    #[test]
    fn push_number_emits_every_lit_segment() {
        let mut list = OverlayList::new();
        let w = push_number(&mut list, Layer::CONTENT, Vec2::default(), 20.0, 188, Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(list.len(), 2 + 7 + 7);
        assert!((w - number_width(188, 20.0)).abs() < 1e-4);
    }

    #[test]
    fn digits_are_written_left_to_right() {
        let mut list = OverlayList::new();
        push_number(&mut list, Layer::CONTENT, Vec2::default(), 20.0, 17, Color::rgb(1.0, 1.0, 1.0));
        // "1" has no segment on the left edge of the first cell.
        let leftmost = list
            .iter_in_paint_order()
            .map(|q| q.rect.origin.x)
            .fold(f32::INFINITY, f32::min);
        assert!(leftmost > 0.0);
    }
}
