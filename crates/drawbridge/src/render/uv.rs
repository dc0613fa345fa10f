use crate::coords::Rect;
use crate::decode::Vertex;

/// Writes `src` into `dst` with UVs remapped from `[0, 1]` onto `bounds`.
///
/// Positions and colors are copied unchanged. `src` is left as-is so it can be
/// rescaled again for the next texture.
///
/// # Panics
/// Panics if `src` and `dst` differ in length.
pub fn rescale_uvs(src: &[Vertex], dst: &mut [Vertex], bounds: Rect) {
    assert_eq!(src.len(), dst.len(), "rescale_uvs: source and destination lengths differ");

    for (out, v) in dst.iter_mut().zip(src) {
        *out = Vertex {
            uv: bounds.lerp(v.uv()).to_array(),
            ..*v
        };
    }
}
