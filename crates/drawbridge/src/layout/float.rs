use crate::error::{Error, Result};
use crate::gui::GuiHost;

/// Width of the floating-point fields in the GUI library's vertex records.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    pub fn from_size(bytes: usize) -> Result<Self> {
        match bytes {
            4 => Ok(FloatWidth::F32),
            8 => Ok(FloatWidth::F64),
            n => Err(Error::UnsupportedFloatWidth(n)),
        }
    }

    #[inline]
    pub const fn size(self) -> usize {
        match self {
            FloatWidth::F32 => 4,
            FloatWidth::F64 => 8,
        }
    }
}

/// Numeric layout of the GUI build, probed once at startup.
///
/// The float width reflects how the foreign library was compiled, so it never
/// changes while the process runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NumericLayout {
    float_width: FloatWidth,
}

impl NumericLayout {
    /// Queries the host for its vertex float size.
    pub fn probe<H: GuiHost + ?Sized>(host: &H) -> Result<Self> {
        let size = host.vertex_float_size();
        let layout = Self::from_float_size(size)?;
        log::debug!("numeric layout probed: {size}-byte vertex floats");
        Ok(layout)
    }

    pub fn from_float_size(bytes: usize) -> Result<Self> {
        Ok(Self { float_width: FloatWidth::from_size(bytes)? })
    }

    #[inline]
    pub const fn float_width(self) -> FloatWidth {
        self.float_width
    }

    #[inline]
    pub const fn float_size(self) -> usize {
        self.float_width.size()
    }
}
