use crate::error::{Error, Result};

use super::FloatWidth;

/// Byte layout of one vertex record, as reported by the GUI library.
///
/// Position and UV are two floats each; color is one packed `u32`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    /// Size of one record, including trailing padding.
    pub stride: usize,
    pub pos_offset: usize,
    pub uv_offset: usize,
    pub col_offset: usize,
}

impl VertexLayout {
    /// Layout of the common `{ pos: [f32; 2], uv: [f32; 2], col: u32 }` record.
    pub const F32: VertexLayout = VertexLayout { stride: 20, pos_offset: 0, uv_offset: 8, col_offset: 16 };

    /// Same record compiled with 8-byte floats; `col` is followed by 4 bytes of padding.
    pub const F64: VertexLayout = VertexLayout { stride: 40, pos_offset: 0, uv_offset: 16, col_offset: 32 };

    /// Checks that every field fits inside one record for the given float width.
    pub fn validate(&self, float_width: FloatWidth) -> Result<()> {
        if self.stride == 0 {
            return Err(Error::InvalidVertexLayout("stride is zero".into()));
        }

        let vec2 = 2 * float_width.size();
        let fields = [
            ("position", self.pos_offset, vec2),
            ("uv", self.uv_offset, vec2),
            ("color", self.col_offset, size_of::<u32>()),
        ];
        for (name, offset, size) in fields {
            if offset.checked_add(size).is_none_or(|end| end > self.stride) {
                return Err(Error::InvalidVertexLayout(format!(
                    "{name} field at offset {offset} ({size} bytes) overruns stride {}",
                    self.stride
                )));
            }
        }
        Ok(())
    }
}
