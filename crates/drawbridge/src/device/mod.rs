//! GPU device acquisition for hosts without a window.
//!
//! Windowed hosts already own a `wgpu::Device`/`Queue` and pass them straight to
//! [`WgpuBackend`](crate::render::gpu::WgpuBackend). This module covers tools
//! and tests that render offscreen.

mod headless;

pub use headless::{GpuInit, HeadlessGpu};
