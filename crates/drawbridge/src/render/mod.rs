//! Translation of decoded GUI geometry into backend triangle draws.
//!
//! Convention:
//! - vertex positions are logical pixels (top-left origin, +Y down)
//! - UVs handed to a backend are in the bound texture's pixel space
//!
//! [`DrawTranslator`] drives any [`RenderBackend`]; [`gpu::WgpuBackend`] is the
//! GPU implementation.

mod backend;
mod ctx;
mod translate;
mod uv;

pub mod gpu;

pub use backend::{DrawTrianglesOptions, RenderBackend};
pub use ctx::{RenderCtx, RenderTarget};
pub use translate::{DrawTranslator, FrameStats};
pub use uv::rescale_uvs;
