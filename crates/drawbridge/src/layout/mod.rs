//! Runtime description of the GUI library's vertex and index buffer layout.
//!
//! The GUI library is compiled separately, so neither the width of its vertex
//! floats nor the offsets inside a vertex record are compile-time facts here.
//! Everything in this module is queried from the host and validated once.

mod float;
mod index;
mod vertex;

pub use float::{FloatWidth, NumericLayout};
pub use index::IndexWidth;
pub use vertex::VertexLayout;
