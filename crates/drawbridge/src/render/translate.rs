use crate::config::BridgeConfig;
use crate::decode::{decode_indices, decode_vertices};
use crate::error::{Error, Result};
use crate::gui::{CommandList, DrawCmd, DrawData, GuiHost};
use crate::layout::{IndexWidth, NumericLayout};
use crate::texture::TextureCache;

use super::{rescale_uvs, DrawTrianglesOptions, RenderBackend};

/// Counters for one translated frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub lists: usize,
    pub draw_calls: usize,
    pub callbacks: usize,
    pub vertices: usize,
    pub indices: usize,
}

/// Turns GUI draw data into backend triangle draws, one frame at a time.
///
/// Construction probes the GUI build's numeric layout; an unsupported build is
/// reported here instead of on every frame. The translator itself holds no
/// per-frame state, so one instance serves the whole session.
#[derive(Debug, Clone)]
pub struct DrawTranslator {
    numeric: NumericLayout,
    config: BridgeConfig,
}

impl DrawTranslator {
    pub fn new<H: GuiHost + ?Sized>(host: &H, config: &BridgeConfig) -> Result<Self> {
        let numeric = NumericLayout::probe(host)?;
        log::debug!(
            "draw translator ready: {:?} vertex floats, {:?} texture filter",
            numeric.float_width(),
            config.filter
        );
        Ok(Self { numeric, config: config.clone() })
    }

    #[inline]
    pub fn numeric_layout(&self) -> NumericLayout {
        self.numeric
    }

    #[inline]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Creates an empty texture cache using this translator's filter setting.
    pub fn new_texture_cache<T>(&self) -> TextureCache<T> {
        TextureCache::new(self.config.filter)
    }

    /// Translates one frame.
    ///
    /// Each command list is decoded once. Element commands resolve their
    /// texture, rescale UVs into a per-list working copy and draw their index
    /// range; callback commands are invoked with their list instead. The index
    /// cursor advances by every command's count, whatever its kind.
    ///
    /// The whole frame is decoded and range-checked before the first draw or
    /// callback, so a malformed frame returns `Err` with nothing submitted to
    /// `backend`. Invalid draw data is skipped without touching `cache` or
    /// `backend`.
    pub fn render<H, B>(
        &self,
        draw_data: &DrawData<'_>,
        host: &H,
        cache: &mut TextureCache<B::Texture>,
        backend: &mut B,
    ) -> Result<FrameStats>
    where
        H: GuiHost + ?Sized,
        B: RenderBackend + ?Sized,
    {
        let mut stats = FrameStats::default();
        if !draw_data.valid {
            return Ok(stats);
        }

        let vertex_layout = host.vertex_layout();
        let index_width = IndexWidth::from_size(host.index_size())?;

        let mut decoded = Vec::with_capacity(draw_data.lists.len());
        for list in &draw_data.lists {
            let vertices = decode_vertices(list.vtx_buffer(), &vertex_layout, self.numeric.float_width())?;
            let indices = decode_indices(list.idx_buffer(), index_width);
            check_index_ranges(list, indices.len())?;
            for cmd in list.commands() {
                if let DrawCmd::Elements { texture_id, .. } = *cmd {
                    cache.resolve(texture_id, host, backend)?;
                }
            }
            decoded.push((list, vertices, indices));
        }

        for (list, vertices, indices) in decoded {
            let mut working = vertices.clone();

            let mut cursor = 0usize;
            for cmd in list.commands() {
                let end = cursor + cmd.count();
                match *cmd {
                    DrawCmd::UserCallback { callback, .. } => {
                        callback.call(list);
                        stats.callbacks += 1;
                    }
                    DrawCmd::Elements { texture_id, clip_rect, .. } => {
                        let range = indices.get(cursor..end).ok_or(Error::IndexRangeOutOfBounds {
                            start: cursor,
                            end,
                            len: indices.len(),
                        })?;
                        let texture = cache.resolve(texture_id, host, backend)?;
                        rescale_uvs(&vertices, &mut working, backend.texture_bounds(texture));
                        backend.draw_triangles(
                            &working,
                            range,
                            texture,
                            &DrawTrianglesOptions { clip_rect: Some(clip_rect) },
                        );
                        stats.draw_calls += 1;
                    }
                }
                cursor = end;
            }

            stats.lists += 1;
            stats.vertices += vertices.len();
            stats.indices += indices.len();
        }

        log::trace!(
            "frame translated: {} lists, {} draws, {} callbacks, {} vertices, {} indices",
            stats.lists,
            stats.draw_calls,
            stats.callbacks,
            stats.vertices,
            stats.indices
        );
        Ok(stats)
    }
}

/// Walks `list`'s commands, callbacks included, and fails on the first one
/// whose index range ends past `len` or overflows the cursor.
fn check_index_ranges(list: &CommandList<'_>, len: usize) -> Result<()> {
    let mut cursor = 0usize;
    for cmd in list.commands() {
        cursor = match cursor.checked_add(cmd.count()) {
            Some(end) if end <= len => end,
            end => {
                return Err(Error::IndexRangeOutOfBounds {
                    start: cursor,
                    end: end.unwrap_or(usize::MAX),
                    len,
                });
            }
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::coords::{ColorRgba, Rect};
    use crate::gui::TextureId;
    use crate::testing::{encode_vertex_f32, encode_vertex_f64, FakeHost, FakeTexture, RecordingBackend};

    const FONT: TextureId = TextureId::new(1);
    const WHITE: u32 = ColorRgba::pack(255, 255, 255, 255);

    fn quad_f32() -> Vec<u8> {
        [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.5, 0.5]]
            .iter()
            .enumerate()
            .flat_map(|(i, uv)| encode_vertex_f32([i as f32 * 10.0, 5.0], *uv, WHITE))
            .collect()
    }

    fn setup(host: &FakeHost) -> (DrawTranslator, TextureCache<FakeTexture>, RecordingBackend) {
        let translator = DrawTranslator::new(host, &BridgeConfig::default()).unwrap();
        let cache = translator.new_texture_cache();
        (translator, cache, RecordingBackend::default())
    }

    // ── validity ──────────────────────────────────────────────────────────

    #[test]
    fn invalid_draw_data_is_a_no_op() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::from_size(100.0, 100.0));
        let draw_data = DrawData { valid: false, lists: vec![list] };

        let stats = translator.render(&draw_data, &host, &mut cache, &mut backend).unwrap();
        assert_eq!(stats, FrameStats::default());
        assert!(backend.draws.is_empty());
        assert!(cache.is_empty());
        assert_eq!(host.atlas_queries.get(), 0);
        assert_eq!(host.layout_queries.get(), 0);
    }

    #[test]
    fn empty_buffers_draw_nothing() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let draw_data = DrawData::new(vec![CommandList::new(&[], &[])]);

        let stats = translator.render(&draw_data, &host, &mut cache, &mut backend).unwrap();
        assert_eq!(stats.lists, 1);
        assert_eq!(stats.draw_calls, 0);
        assert!(backend.draws.is_empty());
    }

    // ── index cursor ──────────────────────────────────────────────────────

    #[test]
    fn cursor_advances_across_commands() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: Vec<u16> = (0..10).map(|i| i % 4).collect();
        let clip = Rect::from_size(800.0, 600.0);

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, clip);
        list.push_elements(5, FONT, clip);
        list.push_elements(2, FONT, clip);
        assert_eq!(list.total_elem_count(), idx.len());

        let stats = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();

        assert_eq!(stats.draw_calls, 3);
        assert_eq!(stats.indices, 10);
        assert_eq!(backend.draws[0].indices, idx[0..3]);
        assert_eq!(backend.draws[1].indices, idx[3..8]);
        assert_eq!(backend.draws[2].indices, idx[8..10]);
    }

    #[test]
    fn callbacks_consume_their_range_without_drawing() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: Vec<u16> = (0..10).collect();
        let calls = Cell::new(0);
        let callback = |list: &CommandList<'_>| {
            assert_eq!(list.commands().len(), 3);
            calls.set(calls.get() + 1);
        };

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::default());
        list.push_callback(5, &callback);
        list.push_elements(2, FONT, Rect::default());

        let stats = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(stats.callbacks, 1);
        assert_eq!(backend.draws.len(), 2);
        assert_eq!(backend.draws[0].indices, [0, 1, 2]);
        assert_eq!(backend.draws[1].indices, [8, 9]);
    }

    #[test]
    fn callback_only_list_touches_no_textures() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let callback = |_: &CommandList<'_>| {};
        let mut list = CommandList::new(&[], &[]);
        list.push_callback(0, &callback);

        translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();
        assert!(cache.is_empty());
        assert_eq!(host.atlas_queries.get(), 0);
    }

    #[test]
    fn overrunning_command_is_an_error() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 4] = [0, 1, 2, 3];

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::default());
        list.push_elements(3, FONT, Rect::default());

        let err = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap_err();
        assert_eq!(err, Error::IndexRangeOutOfBounds { start: 3, end: 6, len: 4 });
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn malformed_later_list_rejects_the_whole_frame() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];
        let calls = Cell::new(0);
        let callback = |_: &CommandList<'_>| calls.set(calls.get() + 1);

        let mut good = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        good.push_callback(0, &callback);
        good.push_elements(3, FONT, Rect::default());
        let mut bad = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        bad.push_elements(4, FONT, Rect::default());

        let err = translator
            .render(&DrawData::new(vec![good, bad]), &host, &mut cache, &mut backend)
            .unwrap_err();
        assert_eq!(err, Error::IndexRangeOutOfBounds { start: 0, end: 4, len: 3 });
        assert!(backend.draws.is_empty());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn callback_range_is_bounds_checked() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];
        let calls = Cell::new(0);
        let callback = |_: &CommandList<'_>| calls.set(calls.get() + 1);

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::default());
        list.push_callback(1, &callback);

        let err = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap_err();
        assert_eq!(err, Error::IndexRangeOutOfBounds { start: 3, end: 4, len: 3 });
        assert_eq!(calls.get(), 0);
        assert!(backend.draws.is_empty());
    }

    #[test]
    fn huge_element_count_does_not_overflow_the_cursor() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];
        let callback = |_: &CommandList<'_>| {};

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_callback(usize::MAX, &callback);
        list.push_elements(1, FONT, Rect::default());

        let err = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap_err();
        assert_eq!(err, Error::IndexRangeOutOfBounds { start: 0, end: usize::MAX, len: 3 });

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(2, FONT, Rect::default());
        list.push_elements(usize::MAX, FONT, Rect::default());

        let err = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap_err();
        assert_eq!(err, Error::IndexRangeOutOfBounds { start: 2, end: usize::MAX, len: 3 });
        assert!(backend.draws.is_empty());
    }

    // ── textures + uv ─────────────────────────────────────────────────────

    #[test]
    fn uvs_are_rescaled_per_command_texture() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let image = TextureId::new(2);
        cache.insert(image, FakeTexture::sized(8, 8, 100));

        let vtx = quad_f32();
        let idx: [u16; 6] = [0, 1, 2, 0, 2, 3];
        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::default());
        list.push_elements(3, image, Rect::default());

        translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();

        let font_uvs: Vec<_> = backend.draws[0].vertices.iter().map(|v| v.uv).collect();
        assert_eq!(font_uvs, [[0.0, 0.0], [64.0, 0.0], [64.0, 32.0], [32.0, 16.0]]);

        let image_uvs: Vec<_> = backend.draws[1].vertices.iter().map(|v| v.uv).collect();
        assert_eq!(image_uvs, [[0.0, 0.0], [8.0, 0.0], [8.0, 8.0], [4.0, 4.0]]);
        assert_eq!(backend.draws[1].texture_serial, 100);

        // positions pass through untouched
        assert_eq!(backend.draws[1].vertices[3].pos, [30.0, 5.0]);
    }

    #[test]
    fn font_atlas_is_realized_once_across_frames() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];

        for _ in 0..3 {
            let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
            list.push_elements(3, FONT, Rect::default());
            translator
                .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
                .unwrap();
        }

        assert_eq!(host.atlas_queries.get(), 1);
        assert_eq!(backend.created.len(), 1);
        assert_eq!(backend.draws.len(), 3);
        assert_eq!(host.layout_queries.get(), 3);
    }

    #[test]
    fn clip_rect_is_forwarded() {
        let host = FakeHost::f32();
        let (translator, mut cache, mut backend) = setup(&host);
        let vtx = quad_f32();
        let idx: [u16; 3] = [0, 1, 2];
        let clip = Rect::new(10.0, 20.0, 30.0, 40.0);

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, clip);
        translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();

        assert_eq!(backend.draws[0].options.clip_rect, Some(clip));
    }

    // ── layouts ───────────────────────────────────────────────────────────

    #[test]
    fn f64_build_with_wide_indices() {
        let mut host = FakeHost::f64();
        host.index_size = 4;
        let (translator, mut cache, mut backend) = setup(&host);

        let vtx: Vec<u8> = [[0.0, 0.0], [1.0, 1.0], [0.5, 0.0]]
            .iter()
            .flat_map(|uv| encode_vertex_f64([2.0, 3.0], *uv, WHITE))
            .collect();
        let idx: [u32; 3] = [0x0001_0000, 1, 2];

        let mut list = CommandList::new(&vtx, bytemuck::cast_slice(&idx));
        list.push_elements(3, FONT, Rect::default());
        let stats = translator
            .render(&DrawData::new(vec![list]), &host, &mut cache, &mut backend)
            .unwrap();

        assert_eq!(stats.vertices, 3);
        assert_eq!(backend.draws[0].indices, [0, 1, 2]);
        assert_eq!(backend.draws[0].vertices[1].uv, [64.0, 32.0]);
        assert_eq!(backend.draws[0].vertices[2].uv, [32.0, 0.0]);
    }

    #[test]
    fn unsupported_float_width_fails_at_construction() {
        let mut host = FakeHost::f32();
        host.float_size = 16;
        let err = DrawTranslator::new(&host, &BridgeConfig::default()).unwrap_err();
        assert_eq!(err, Error::UnsupportedFloatWidth(16));
        assert!(err.is_configuration());
    }

    #[test]
    fn unsupported_index_width_fails_the_frame() {
        let mut host = FakeHost::f32();
        host.index_size = 3;
        let (translator, mut cache, mut backend) = setup(&host);
        let draw_data = DrawData::new(vec![CommandList::new(&[], &[])]);

        let err = translator.render(&draw_data, &host, &mut cache, &mut backend).unwrap_err();
        assert_eq!(err, Error::UnsupportedIndexWidth(3));
    }
}
