/// Sampling filter applied to textures created from GUI pixel data.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum TextureFilter {
    /// Crisp texel edges. Matches the pixel-exact look of GUI font atlases.
    #[default]
    Nearest,
    Linear,
}

impl From<TextureFilter> for wgpu::FilterMode {
    fn from(filter: TextureFilter) -> Self {
        match filter {
            TextureFilter::Nearest => wgpu::FilterMode::Nearest,
            TextureFilter::Linear => wgpu::FilterMode::Linear,
        }
    }
}

/// Configuration threaded into the translator and the texture cache.
///
/// Values apply to resources created after they are set; cached textures keep
/// the settings they were created with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BridgeConfig {
    pub filter: TextureFilter,
}

impl BridgeConfig {
    #[inline]
    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }
}
