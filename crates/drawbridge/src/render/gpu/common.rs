//! GPU types and helpers for the triangle pipeline.

use bytemuck::{Pod, Zeroable};

use crate::coords::{Rect, Vec2};
use crate::decode::Vertex;

// ── blend ─────────────────────────────────────────────────────────────────

/// The fragment shader outputs premultiplied color.
pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

pub(super) fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(size_of::<ViewportUniform>() as u64)
        .expect("ViewportUniform has non-zero size by construction")
}

// ── vertex layout ─────────────────────────────────────────────────────────

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x2, // pos
    1 => Float32x2, // uv
    2 => Float32x4  // color
];

pub(super) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

// ── scissor rect ──────────────────────────────────────────────────────────

/// Converts a logical-pixel clip rect to physical scissor rect arguments.
///
/// Returns `None` if the clipped area is empty (the draw should be skipped).
/// `clip = None` means "no scissor" and returns the full viewport.
pub(super) fn logical_clip_to_scissor(
    clip: Option<Rect>,
    viewport: Vec2,
    scale: f32,
) -> Option<(u32, u32, u32, u32)> {
    let phys_vw = (viewport.x * scale).max(1.0) as u32;
    let phys_vh = (viewport.y * scale).max(1.0) as u32;

    let (x, y, w, h) = match clip {
        None => (0, 0, phys_vw, phys_vh),
        Some(r) => {
            let r = r.intersect(Rect::from_size(viewport.x, viewport.y))?;
            let x  = ((r.min.x * scale) as u32).min(phys_vw);
            let y  = ((r.min.y * scale) as u32).min(phys_vh);
            let x2 = ((r.max.x * scale) as u32).min(phys_vw);
            let y2 = ((r.max.y * scale) as u32).min(phys_vh);
            (x, y, x2.saturating_sub(x), y2.saturating_sub(y))
        }
    };

    if w == 0 || h == 0 { None } else { Some((x, y, w, h)) }
}

// ── uv ────────────────────────────────────────────────────────────────────

/// Converts a texel-space UV back to the `[0, 1]` range the sampler expects.
#[inline]
pub(super) fn texel_to_normalized(uv: [f32; 2], size: (u32, u32)) -> [f32; 2] {
    [uv[0] / size.0.max(1) as f32, uv[1] / size.1.max(1) as f32]
}
