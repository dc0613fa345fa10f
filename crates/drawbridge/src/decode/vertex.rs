use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Vec2};
use crate::error::Result;
use crate::layout::{FloatWidth, VertexLayout};

/// Canonical vertex handed to render backends.
///
/// Layout (32 bytes):
///
///  offset  0  pos    [f32; 2]   destination, logical px
///  offset  8  uv     [f32; 2]   source texture space
///  offset 16  color  [f32; 4]   straight RGBA in [0, 1]
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    #[inline]
    pub fn uv(&self) -> Vec2 {
        Vec2::from_array(self.uv)
    }
}

/// Decodes `bytes` as a packed array of vertex records.
///
/// Yields `bytes.len() / layout.stride` vertices; a trailing partial record is
/// padding and is ignored. Fails only when `layout` cannot hold the fields for
/// `float_width`.
pub fn decode_vertices(bytes: &[u8], layout: &VertexLayout, float_width: FloatWidth) -> Result<Vec<Vertex>> {
    layout.validate(float_width)?;

    let records = bytes.chunks_exact(layout.stride);
    let vertices = match float_width {
        FloatWidth::F32 => records.map(|rec| decode_f32(rec, layout)).collect(),
        FloatWidth::F64 => records.map(|rec| decode_f64(rec, layout)).collect(),
    };
    Ok(vertices)
}

// ── per-width paths ───────────────────────────────────────────────────────

fn decode_f32(rec: &[u8], layout: &VertexLayout) -> Vertex {
    Vertex {
        pos: read_vec2_f32(rec, layout.pos_offset),
        uv: read_vec2_f32(rec, layout.uv_offset),
        color: read_color(rec, layout.col_offset),
    }
}

fn decode_f64(rec: &[u8], layout: &VertexLayout) -> Vertex {
    Vertex {
        pos: read_vec2_f64(rec, layout.pos_offset),
        uv: read_vec2_f64(rec, layout.uv_offset),
        color: read_color(rec, layout.col_offset),
    }
}

// ── field readers ─────────────────────────────────────────────────────────
//
// Records are not guaranteed to be aligned inside the foreign buffer, so every
// field goes through an unaligned read. Offsets are pre-validated against the
// stride.

#[inline]
fn read_vec2_f32(rec: &[u8], offset: usize) -> [f32; 2] {
    bytemuck::pod_read_unaligned(&rec[offset..offset + 8])
}

#[inline]
fn read_vec2_f64(rec: &[u8], offset: usize) -> [f32; 2] {
    let v: [f64; 2] = bytemuck::pod_read_unaligned(&rec[offset..offset + 16]);
    [v[0] as f32, v[1] as f32]
}

#[inline]
fn read_color(rec: &[u8], offset: usize) -> [f32; 4] {
    let word: [u8; 4] = bytemuck::pod_read_unaligned(&rec[offset..offset + 4]);
    ColorRgba::from_packed(u32::from_le_bytes(word)).to_array()
}
