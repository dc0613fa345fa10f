use thiserror::Error;

/// Errors surfaced by the draw-data bridge.
///
/// Configuration variants describe a GUI build this crate cannot decode. They
/// are reported when the translator is created or on the first frame, and the
/// host is expected to stop rendering rather than retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported vertex float width: {0} bytes (expected 4 or 8)")]
    UnsupportedFloatWidth(usize),

    #[error("unsupported index width: {0} bytes (expected 2, 4 or 8)")]
    UnsupportedIndexWidth(usize),

    #[error("invalid vertex layout: {0}")]
    InvalidVertexLayout(String),

    #[error("index range {start}..{end} exceeds {len} decoded indices")]
    IndexRangeOutOfBounds { start: usize, end: usize, len: usize },

    #[error("invalid font atlas: {0}")]
    InvalidAtlas(String),
}

impl Error {
    /// Returns `true` for errors caused by the GUI build's memory layout.
    ///
    /// These never go away by skipping a frame.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedFloatWidth(_)
                | Error::UnsupportedIndexWidth(_)
                | Error::InvalidVertexLayout(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
