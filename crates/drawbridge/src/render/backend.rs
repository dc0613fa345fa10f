use crate::config::TextureFilter;
use crate::coords::Rect;
use crate::decode::Vertex;

/// Per-draw options passed alongside the geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DrawTrianglesOptions {
    /// Clip region in logical pixels. `None` draws everywhere.
    pub clip_rect: Option<Rect>,
}

/// A 2D renderer that can draw indexed, textured triangles.
pub trait RenderBackend {
    type Texture;

    /// Creates a texture from packed RGBA8 pixels (`width * height * 4` bytes).
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> Self::Texture;

    /// Pixel bounds of `texture`, the space UVs are expressed in.
    fn texture_bounds(&self, texture: &Self::Texture) -> Rect;

    /// Draws `indices` as a triangle list over `vertices`.
    ///
    /// Vertex UVs are in `texture`'s pixel space. Neither slice may be retained
    /// past the call.
    fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u16],
        texture: &Self::Texture,
        options: &DrawTrianglesOptions,
    );
}
