//! Fakes shared by the unit tests.

use std::cell::Cell;

use crate::config::TextureFilter;
use crate::coords::Rect;
use crate::decode::Vertex;
use crate::gui::{AtlasImage, GuiHost};
use crate::layout::VertexLayout;
use crate::render::{DrawTrianglesOptions, RenderBackend};

// ── host ──────────────────────────────────────────────────────────────────

pub(crate) struct FakeHost {
    pub float_size: usize,
    pub layout: VertexLayout,
    pub index_size: usize,
    pub atlas_width: u32,
    pub atlas_height: u32,
    pub atlas_pixels: Vec<u8>,
    pub atlas_queries: Cell<usize>,
    pub layout_queries: Cell<usize>,
}

impl FakeHost {
    fn with_layout(float_size: usize, layout: VertexLayout) -> Self {
        let (w, h) = (64, 32);
        Self {
            float_size,
            layout,
            index_size: 2,
            atlas_width: w,
            atlas_height: h,
            atlas_pixels: vec![0xFF; (w * h * 4) as usize],
            atlas_queries: Cell::new(0),
            layout_queries: Cell::new(0),
        }
    }

    pub fn f32() -> Self {
        Self::with_layout(4, VertexLayout::F32)
    }

    pub fn f64() -> Self {
        Self::with_layout(8, VertexLayout::F64)
    }
}

impl GuiHost for FakeHost {
    fn vertex_float_size(&self) -> usize {
        self.float_size
    }

    fn vertex_layout(&self) -> VertexLayout {
        self.layout_queries.set(self.layout_queries.get() + 1);
        self.layout
    }

    fn index_size(&self) -> usize {
        self.index_size
    }

    fn font_atlas_rgba32(&self) -> AtlasImage<'_> {
        self.atlas_queries.set(self.atlas_queries.get() + 1);
        AtlasImage { width: self.atlas_width, height: self.atlas_height, pixels: &self.atlas_pixels }
    }
}

// ── backend ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FakeTexture {
    pub width: u32,
    pub height: u32,
    pub filter: TextureFilter,
    pub serial: usize,
}

impl FakeTexture {
    pub fn sized(width: u32, height: u32, serial: usize) -> Self {
        Self { width, height, filter: TextureFilter::Nearest, serial }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedDraw {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub texture_serial: usize,
    pub options: DrawTrianglesOptions,
}

#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub created: Vec<FakeTexture>,
    pub draws: Vec<RecordedDraw>,
}

impl RenderBackend for RecordingBackend {
    type Texture = FakeTexture;

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8], filter: TextureFilter) -> FakeTexture {
        assert_eq!(rgba.len(), (width * height * 4) as usize);
        let tex = FakeTexture { width, height, filter, serial: self.created.len() };
        self.created.push(tex.clone());
        tex
    }

    fn texture_bounds(&self, texture: &FakeTexture) -> Rect {
        Rect::from_size(texture.width as f32, texture.height as f32)
    }

    fn draw_triangles(
        &mut self,
        vertices: &[Vertex],
        indices: &[u16],
        texture: &FakeTexture,
        options: &DrawTrianglesOptions,
    ) {
        self.draws.push(RecordedDraw {
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
            texture_serial: texture.serial,
            options: *options,
        });
    }
}

// ── buffer builders ───────────────────────────────────────────────────────

/// One record in [`VertexLayout::F32`].
pub(crate) fn encode_vertex_f32(pos: [f32; 2], uv: [f32; 2], col: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(VertexLayout::F32.stride);
    out.extend_from_slice(bytemuck::bytes_of(&pos));
    out.extend_from_slice(bytemuck::bytes_of(&uv));
    out.extend_from_slice(&col.to_le_bytes());
    out
}

/// One record in [`VertexLayout::F64`], including trailing padding.
pub(crate) fn encode_vertex_f64(pos: [f64; 2], uv: [f64; 2], col: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(VertexLayout::F64.stride);
    out.extend_from_slice(bytemuck::bytes_of(&pos));
    out.extend_from_slice(bytemuck::bytes_of(&uv));
    out.extend_from_slice(&col.to_le_bytes());
    out.resize(VertexLayout::F64.stride, 0);
    out
}
