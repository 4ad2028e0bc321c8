use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding/encoding and pixel-grid transforms.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("invalid BMP signature 0x{0:04x} (expected \"BM\")")]
    InvalidSignature(u16),

    #[error("unsupported BMP info header size: {0} (expected 40)")]
    InvalidHeaderSize(u32),

    #[error("BMP planes field is {0}, expected 1")]
    TooManyPlanes(u16),

    #[error("invalid color table: {0}")]
    InvalidColorTable(String),

    #[error("unsupported bit depth: {0}")]
    InvalidBitDepth(u16),

    #[error("unsupported BMP compression scheme: {0}")]
    UnsupportedCompression(u32),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("palette index {index} out of range (palette has {len} entries)")]
    PaletteIndexOutOfRange { index: u32, len: usize },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("cannot seek to offset {offset} (input is {len} bytes)")]
    SeekOutOfBounds { offset: u32, len: usize },

    #[error("pixel data truncated: {rows_read} of {height} rows present")]
    Truncated { rows_read: u32, height: u32 },

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("bad parameter: {0}")]
    BadParameter(String),

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl BitmapError {
    /// Numeric status code, grouped by family.
    ///
    /// `0001` resource, `0002` I/O, `2000..` codec format errors,
    /// `4000..` caller errors.
    pub fn code(&self) -> u16 {
        match self {
            Self::DimensionsTooLarge { .. } | Self::LimitExceeded(_) => 1,
            Self::UnexpectedEof | Self::SeekOutOfBounds { .. } | Self::Truncated { .. } => 2,
            #[cfg(feature = "std")]
            Self::Io(_) => 2,
            Self::InvalidSignature(_) => 2000,
            Self::TooManyPlanes(_) => 2001,
            Self::InvalidColorTable(_) | Self::PaletteIndexOutOfRange { .. } => 2002,
            Self::InvalidBitDepth(_) => 2003,
            Self::UnsupportedCompression(_) => 2004,
            Self::InvalidHeaderSize(_) | Self::InvalidHeader(_) => 2005,
            Self::InvalidDimensions { .. } => 2006,
            Self::BadParameter(_) | Self::BufferTooSmall { .. } => 4000,
            Self::Cancelled(_) => 4001,
        }
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
