use super::Vec2;

/// Axis-aligned rectangle stored as its min and max corners.
///
/// Used both for clip regions (logical pixels) and texture bounds (texels).
/// A rect with `max <= min` on either axis is empty.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Rect anchored at the origin, e.g. the bounds of a `width x height` texture.
    #[inline]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Maps `t` in `[0, 1]^2` onto this rect (`t = (0, 0)` is `min`, `(1, 1)` is `max`).
    #[inline]
    pub fn lerp(self, t: Vec2) -> Vec2 {
        Vec2::lerp(self.min, self.max, t)
    }

    /// Overlap of two rects, or `None` when they share no area.
    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let r = Rect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() { None } else { Some(r) }
    }
}
