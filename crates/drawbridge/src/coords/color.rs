/// Straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Unpacks a 32-bit color word laid out as little-endian RGBA8
    /// (byte 0 = R, byte 1 = G, byte 2 = B, byte 3 = A).
    #[inline]
    pub fn from_packed(word: u32) -> Self {
        let channel = |shift: u32| ((word >> shift) & 0xFF) as f32 / 255.0;
        Self::new(channel(0), channel(8), channel(16), channel(24))
    }

    /// Inverse of [`from_packed`](Self::from_packed) for channels already in `[0, 255]`.
    #[inline]
    pub const fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
        u32::from_le_bytes([r, g, b, a])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}
