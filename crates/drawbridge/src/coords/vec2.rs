/// 2D vector in logical pixels or texels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub const fn from_array(v: [f32; 2]) -> Self {
        Self { x: v[0], y: v[1] }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 2] {
        [self.x, self.y]
    }

    /// Component-wise `a * (1 - t) + b * t`.
    #[inline]
    pub fn lerp(a: Vec2, b: Vec2, t: Vec2) -> Vec2 {
        Vec2::new(
            a.x * (1.0 - t.x) + b.x * t.x,
            a.y * (1.0 - t.y) + b.y * t.y,
        )
    }
}
