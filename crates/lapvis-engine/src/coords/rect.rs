use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of `size` centered on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Grows (positive `d`) or shrinks (negative `d`) every edge by `d`.
    #[inline]
    pub fn inflate(self, d: f32) -> Self {
        Rect::new(
            self.origin.x - d,
            self.origin.y - d,
            self.size.x + 2.0 * d,
            self.size.y + 2.0 * d,
        )
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < max.x && p.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    #[test]
    fn centered_places_origin_at_half_size() {
        let rect = Rect::centered(Vec2::new(50.0, 20.0), Vec2::new(10.0, 4.0));
        assert_eq!(rect, r(45.0, 18.0, 10.0, 4.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(5.0, 5.0)));
        assert!(!rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn inflate_and_deflate() {
        assert_eq!(r(10.0, 10.0, 10.0, 10.0).inflate(2.0), r(8.0, 8.0, 14.0, 14.0));
        assert!(r(0.0, 0.0, 4.0, 4.0).inflate(-2.0).is_empty());
    }
}
