//! Drawbridge: immediate-mode GUI draw data to 2D triangle draws.
//!
//! The GUI library hands over raw vertex/index bytes whose layout is only known
//! at runtime. This crate decodes them, resolves textures through a persistent
//! cache, remaps UVs into texel space and emits one backend draw per command.
//!
//! Entry point: [`render::DrawTranslator`].

pub mod config;
pub mod coords;
pub mod decode;
pub mod device;
pub mod gui;
pub mod layout;
pub mod logging;
pub mod render;
pub mod texture;

mod error;

#[cfg(test)]
mod testing;

pub use config::{BridgeConfig, TextureFilter};
pub use error::{Error, Result};
pub use render::{DrawTranslator, FrameStats, RenderBackend};
pub use texture::TextureCache;
