use crate::error::{Error, Result};

/// Width of one element in the GUI library's index buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexWidth {
    U16,
    U32,
    U64,
}

impl IndexWidth {
    pub fn from_size(bytes: usize) -> Result<Self> {
        match bytes {
            2 => Ok(IndexWidth::U16),
            4 => Ok(IndexWidth::U32),
            8 => Ok(IndexWidth::U64),
            n => Err(Error::UnsupportedIndexWidth(n)),
        }
    }

    #[inline]
    pub const fn size(self) -> usize {
        match self {
            IndexWidth::U16 => 2,
            IndexWidth::U32 => 4,
            IndexWidth::U64 => 8,
        }
    }
}
