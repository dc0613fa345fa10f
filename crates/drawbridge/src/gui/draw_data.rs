use core::fmt;

use crate::coords::Rect;

use super::TextureId;

/// Host callback attached to a draw command in place of geometry.
///
/// Invoked with the command list it belongs to.
#[derive(Copy, Clone)]
pub struct UserCallback<'a>(pub &'a dyn Fn(&CommandList<'_>));

impl UserCallback<'_> {
    #[inline]
    pub fn call(&self, list: &CommandList<'_>) {
        (self.0)(list)
    }
}

impl fmt::Debug for UserCallback<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserCallback(..)")
    }
}

/// One unit of work inside a command list.
///
/// Both variants consume `count` indices from the list's index buffer.
#[derive(Debug, Copy, Clone)]
pub enum DrawCmd<'a> {
    /// Triangle draw over the next `count` indices with one texture.
    Elements {
        count: usize,
        texture_id: TextureId,
        /// Clip region in logical pixels.
        clip_rect: Rect,
    },
    /// Custom host rendering; no geometry is drawn for this command.
    UserCallback {
        count: usize,
        callback: UserCallback<'a>,
    },
}

impl DrawCmd<'_> {
    #[inline]
    pub fn count(&self) -> usize {
        match *self {
            DrawCmd::Elements { count, .. } | DrawCmd::UserCallback { count, .. } => count,
        }
    }
}

/// A vertex/index buffer pair plus the commands drawing from it.
///
/// The buffers are raw bytes in the GUI library's layout and are only valid for
/// the current frame.
#[derive(Debug, Clone)]
pub struct CommandList<'a> {
    vtx_buffer: &'a [u8],
    idx_buffer: &'a [u8],
    commands: Vec<DrawCmd<'a>>,
}

impl<'a> CommandList<'a> {
    pub fn new(vtx_buffer: &'a [u8], idx_buffer: &'a [u8]) -> Self {
        Self { vtx_buffer, idx_buffer, commands: Vec::new() }
    }

    /// Appends a textured triangle draw.
    pub fn push_elements(&mut self, count: usize, texture_id: TextureId, clip_rect: Rect) {
        self.commands.push(DrawCmd::Elements { count, texture_id, clip_rect });
    }

    /// Appends a host callback command.
    pub fn push_callback(&mut self, count: usize, callback: &'a dyn Fn(&CommandList<'_>)) {
        self.commands.push(DrawCmd::UserCallback { count, callback: UserCallback(callback) });
    }

    #[inline]
    pub fn vtx_buffer(&self) -> &'a [u8] {
        self.vtx_buffer
    }

    #[inline]
    pub fn idx_buffer(&self) -> &'a [u8] {
        self.idx_buffer
    }

    #[inline]
    pub fn commands(&self) -> &[DrawCmd<'a>] {
        &self.commands
    }

    /// Sum of element counts across all commands.
    pub fn total_elem_count(&self) -> usize {
        self.commands.iter().map(DrawCmd::count).sum()
    }
}

/// Everything the GUI library produced for one frame.
#[derive(Debug, Clone, Default)]
pub struct DrawData<'a> {
    /// `false` when the library has no renderable frame; translation is skipped.
    pub valid: bool,
    pub lists: Vec<CommandList<'a>>,
}

impl<'a> DrawData<'a> {
    pub fn new(lists: Vec<CommandList<'a>>) -> Self {
        Self { valid: true, lists }
    }

    pub fn invalid() -> Self {
        Self::default()
    }
}
