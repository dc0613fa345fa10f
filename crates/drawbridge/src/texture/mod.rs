//! Texture cache keyed by GUI texture handles.

mod cache;

pub use cache::TextureCache;
