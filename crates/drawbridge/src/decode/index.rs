use std::borrow::Cow;

use crate::layout::IndexWidth;

/// Decodes `bytes` into 16-bit indices; yields `bytes.len() / width` indices.
///
/// `U16` buffers are borrowed as-is when the slice is 2-byte aligned and copied
/// otherwise; the result reads the same either way.
///
/// `U32` and `U64` elements are truncated to their low 16 bits. Sources that
/// reference vertices at or above 65536 decode to wrong geometry; hosts must
/// keep each command list below that bound.
pub fn decode_indices(bytes: &[u8], width: IndexWidth) -> Cow<'_, [u16]> {
    let size = width.size();
    let whole = &bytes[..bytes.len() - bytes.len() % size];

    match width {
        IndexWidth::U16 => match bytemuck::try_cast_slice::<u8, u16>(whole) {
            Ok(view) => Cow::Borrowed(view),
            Err(_) => Cow::Owned(narrow::<u16>(whole)),
        },
        IndexWidth::U32 => Cow::Owned(narrow::<u32>(whole)),
        IndexWidth::U64 => Cow::Owned(narrow::<u64>(whole)),
    }
}

trait Narrow: bytemuck::Pod {
    fn low_u16(self) -> u16;
}

impl Narrow for u16 {
    #[inline]
    fn low_u16(self) -> u16 {
        self
    }
}

impl Narrow for u32 {
    #[inline]
    fn low_u16(self) -> u16 {
        self as u16
    }
}

impl Narrow for u64 {
    #[inline]
    fn low_u16(self) -> u16 {
        self as u16
    }
}

fn narrow<T: Narrow>(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(size_of::<T>())
        .map(|chunk| bytemuck::pod_read_unaligned::<T>(chunk).low_u16())
        .collect()
}
