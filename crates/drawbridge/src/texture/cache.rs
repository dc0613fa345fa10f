use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::config::TextureFilter;
use crate::error::{Error, Result};
use crate::gui::{GuiHost, TextureId};
use crate::render::RenderBackend;

/// Owns backend textures for the lifetime of the host application.
///
/// An entry is created at most once per [`TextureId`] and never replaced or
/// evicted. Insert-if-absent ([`resolve`](Self::resolve) on a miss, or
/// [`insert`](Self::insert)) is the only way entries appear.
///
/// On a miss, `resolve` always realizes the GUI's default font atlas, whatever
/// the id. Hosts drawing their own images register them up front with `insert`.
///
/// The cache does no locking. Hosts that render from several threads must hold
/// one mutex around both the cache and the translator call.
pub struct TextureCache<T> {
    textures: HashMap<TextureId, T>,
    filter: TextureFilter,
}

impl<T> TextureCache<T> {
    pub fn new(filter: TextureFilter) -> Self {
        Self { textures: HashMap::new(), filter }
    }

    /// Filter used for textures realized from now on.
    #[inline]
    pub fn filter(&self) -> TextureFilter {
        self.filter
    }

    /// Changes the filter for future realizations. Cached textures are untouched.
    #[inline]
    pub fn set_filter(&mut self, filter: TextureFilter) {
        self.filter = filter;
    }

    /// Returns the texture for `id`, realizing the font atlas on first use.
    pub fn resolve<H, B>(&mut self, id: TextureId, host: &H, backend: &mut B) -> Result<&T>
    where
        H: GuiHost + ?Sized,
        B: RenderBackend<Texture = T> + ?Sized,
    {
        match self.textures.entry(id) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let atlas = host.font_atlas_rgba32();
                if atlas.width == 0 || atlas.height == 0 {
                    return Err(Error::InvalidAtlas(format!(
                        "zero-sized atlas {}x{}",
                        atlas.width, atlas.height
                    )));
                }
                if atlas.pixels.len() != atlas.expected_len() {
                    return Err(Error::InvalidAtlas(format!(
                        "{}x{} atlas needs {} bytes, got {}",
                        atlas.width,
                        atlas.height,
                        atlas.expected_len(),
                        atlas.pixels.len()
                    )));
                }

                let texture = backend.create_texture(atlas.width, atlas.height, atlas.pixels, self.filter);
                log::debug!(
                    "texture cache: realized {}x{} font atlas for {:?} ({:?})",
                    atlas.width,
                    atlas.height,
                    id,
                    self.filter
                );
                Ok(e.insert(texture))
            }
        }
    }

    /// Registers `texture` under `id` unless the id is already cached.
    ///
    /// Returns `false` (dropping `texture`) when an entry exists.
    pub fn insert(&mut self, id: TextureId, texture: T) -> bool {
        match self.textures.entry(id) {
            Entry::Occupied(_) => {
                log::warn!("texture cache: {id:?} already cached; keeping existing texture");
                false
            }
            Entry::Vacant(e) => {
                e.insert(texture);
                true
            }
        }
    }

    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&T> {
        self.textures.get(&id)
    }

    #[inline]
    pub fn contains(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self::new(TextureFilter::default())
    }
}
