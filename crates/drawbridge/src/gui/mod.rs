//! Borrowed views over the GUI library's per-frame output.
//!
//! Nothing here owns GUI memory. `DrawData<'a>` and everything reachable from it
//! borrow the library's buffers for one frame; the lifetime keeps decoded views
//! from outliving the call that produced them.

mod draw_data;
mod host;
mod texture_id;

pub use draw_data::{CommandList, DrawCmd, DrawData, UserCallback};
pub use host::{AtlasImage, GuiHost};
pub use texture_id::TextureId;
