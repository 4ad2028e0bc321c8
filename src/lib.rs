//! # photoman
//!
//! Windows BMP decoder/encoder plus a small set of pixel-grid transforms.
//!
//! ## Supported Formats
//!
//! - **Decode**: classic BMP (`BITMAPINFOHEADER`, 40 bytes), uncompressed,
//!   at 1, 4, 8, 16 and 24 bits per pixel. 1-bit images carry a single
//!   foreground color drawn on black; 4/8-bit images carry a full palette.
//! - **Encode**: uncompressed 24-bit BMP.
//!
//! Rows are kept in stream order: decoding never flips the image and
//! encoding writes rows in grid order, so `decode(encode(grid)) == grid`.
//!
//! ## Transforms
//!
//! [`transform`] provides nearest-neighbor [`scale`](transform::scale),
//! [`mirror_x`](transform::mirror_x) / [`mirror_y`](transform::mirror_y),
//! 3x3 [`blur`](transform::blur) / sharpen and saturating
//! [`exposure`](transform::exposure).
//!
//! ## Non-Goals
//!
//! - RLE / bitfield / embedded JPEG or PNG compression
//! - V4/V5 headers, color spaces, ICC profiles, alpha
//! - Multi-frame images
//!
//! ## Usage
//!
//! ```no_run
//! use photoman::{decode_bmp, encode_bmp, transform, Unstoppable};
//!
//! let data: &[u8] = &[]; // your BMP bytes
//! let mut grid = decode_bmp(data, Unstoppable)?;
//! transform::mirror_y(&mut grid);
//! transform::blur(&mut grid, 2, Unstoppable)?;
//! transform::exposure(&mut grid, 20);
//! let out = encode_bmp(&grid, Unstoppable)?;
//! # Ok::<(), photoman::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod limits;
mod pixel;

pub mod bmp;
pub mod transform;

mod decode;
mod encode;

// Re-exports
pub use bmp::{BmpInfo, Permissiveness};
pub use decode::DecodeRequest;
pub use encode::encode_bmp;
#[cfg(feature = "std")]
pub use encode::encode_bmp_to;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;
pub use pixel::{BLACK, Pixel, PixelGrid};

/// Decode BMP bytes with default settings ([`Permissiveness::Standard`], no limits).
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelGrid, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Parse and validate BMP headers without decoding pixel data.
pub fn probe_bmp(data: &[u8]) -> Result<BmpInfo, BitmapError> {
    DecodeRequest::new(data).probe()
}

/// Read a whole BMP stream from `reader` and decode it.
#[cfg(feature = "std")]
pub fn decode_bmp_from<R: std::io::Read>(
    mut reader: R,
    stop: impl Stop,
) -> Result<PixelGrid, BitmapError> {
    let mut data = alloc::vec::Vec::new();
    reader.read_to_end(&mut data)?;
    decode_bmp(&data, stop)
}
