//! Decoders from the GUI library's raw buffers to renderer-native data.
//!
//! Both decoders are pure functions over borrowed bytes. The vertex decoder
//! always produces owned canonical vertices; the index decoder borrows when it can.

mod index;
mod vertex;

pub use index::decode_indices;
pub use vertex::{decode_vertices, Vertex};
