//! Coordinate and color types shared by the decoders, the translator and backends.
//!
//! Canonical CPU space:
//! - Logical pixels, origin top-left
//! - +X right, +Y down
//!
//! Texture space uses the same convention in texels.

mod color;
mod rect;
mod vec2;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
