use crate::layout::VertexLayout;

/// Default font atlas pixels, packed RGBA8, row-major.
#[derive(Debug, Copy, Clone)]
pub struct AtlasImage<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

impl AtlasImage<'_> {
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// The GUI library as seen by the translator.
///
/// Layout queries return runtime values; callers must not cache them across
/// library versions. The translator re-queries the buffer layouts every frame
/// and the float size once at startup.
pub trait GuiHost {
    /// Size in bytes of one float in the library's vertex records (4 or 8).
    fn vertex_float_size(&self) -> usize;

    /// Stride and field offsets of one vertex record.
    fn vertex_layout(&self) -> VertexLayout;

    /// Size in bytes of one index buffer element (2, 4 or 8).
    fn index_size(&self) -> usize;

    /// Pixels of the default font texture.
    ///
    /// Only queried on a texture cache miss.
    fn font_atlas_rgba32(&self) -> AtlasImage<'_>;
}
