use alloc::vec::Vec;

use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::pixel::PixelGrid;

/// Encode a grid as an uncompressed 24-bit BMP.
///
/// The output has a 54-byte header, no palette, zero resolution fields and
/// rows in grid order, each padded to a 4-byte boundary.
pub fn encode_bmp(grid: &PixelGrid, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(grid, &stop)
}

/// Encode a grid and write it to `writer`.
#[cfg(feature = "std")]
pub fn encode_bmp_to<W: std::io::Write>(
    grid: &PixelGrid,
    mut writer: W,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    let bytes = bmp::encode(grid, &stop)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
