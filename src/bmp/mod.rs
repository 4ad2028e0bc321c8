//! Windows BMP codec (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.
//!
//! Decodes the classic 40-byte `BITMAPINFOHEADER` layout at 1, 4, 8, 16 and
//! 24 bits per pixel, uncompressed. Encodes 24-bit only.

mod bits;
mod decode;
mod encode;
mod header;

pub use bits::{BitCursor, extract_field, row_stride};
pub use decode::{BmpInfo, Permissiveness};
pub use header::{FileHeader, InfoHeader, PaletteEntry, SIGNATURE};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;
use alloc::vec::Vec;
use enough::Stop;

/// Probe headers only.
pub(crate) fn probe(data: &[u8], permissiveness: Permissiveness) -> Result<BmpInfo, BitmapError> {
    decode::probe(data, permissiveness)
}

/// Decode BMP data into a grid.
pub(crate) fn decode(
    data: &[u8],
    permissiveness: Permissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    decode::decode_bmp_pixels(data, permissiveness, limits, stop)
}

/// Encode to 24-bit BMP.
pub(crate) fn encode(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    encode::encode_bmp(grid, stop)
}
