//! On-disk BMP structures: 14-byte file header, 40-byte info header, palette entries.
//!
//! Fields are (de)serialized one by one in little-endian order, so no
//! alignment padding ever reaches the byte stream.

use alloc::vec::Vec;

use crate::error::BitmapError;

/// `"BM"` read as a little-endian `u16`.
pub const SIGNATURE: u16 = 0x4D42;
pub const FILE_HEADER_LEN: usize = 14;
pub const INFO_HEADER_LEN: usize = 40;
pub const PALETTE_ENTRY_LEN: usize = 4;

#[inline]
fn u16_le(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

#[inline]
fn u32_le(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
}

impl FileHeader {
    pub fn from_bytes(b: &[u8; FILE_HEADER_LEN]) -> Self {
        Self {
            signature: u16_le(b, 0),
            file_size: u32_le(b, 2),
            reserved: u32_le(b, 6),
            data_offset: u32_le(b, 10),
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.signature.to_le_bytes());
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved.to_le_bytes());
        out.extend_from_slice(&self.data_offset.to_le_bytes());
    }

    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.signature != SIGNATURE {
            return Err(BitmapError::InvalidSignature(self.signature));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_m: i32,
    pub y_pixels_per_m: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl InfoHeader {
    pub fn from_bytes(b: &[u8; INFO_HEADER_LEN]) -> Self {
        Self {
            header_size: u32_le(b, 0),
            width: u32_le(b, 4) as i32,
            height: u32_le(b, 8) as i32,
            planes: u16_le(b, 12),
            bits_per_pixel: u16_le(b, 14),
            compression: u32_le(b, 16),
            image_size: u32_le(b, 20),
            x_pixels_per_m: u32_le(b, 24) as i32,
            y_pixels_per_m: u32_le(b, 28) as i32,
            colors_used: u32_le(b, 32),
            important_colors: u32_le(b, 36),
        }
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        out.extend_from_slice(&self.compression.to_le_bytes());
        out.extend_from_slice(&self.image_size.to_le_bytes());
        out.extend_from_slice(&self.x_pixels_per_m.to_le_bytes());
        out.extend_from_slice(&self.y_pixels_per_m.to_le_bytes());
        out.extend_from_slice(&self.colors_used.to_le_bytes());
        out.extend_from_slice(&self.important_colors.to_le_bytes());
    }

    /// Header-only checks, in the order the decoder reports them.
    ///
    /// The palette count rule depends on the decoder's permissiveness and is
    /// checked by [`InfoHeader::palette_len`].
    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.header_size as usize != INFO_HEADER_LEN {
            return Err(BitmapError::InvalidHeaderSize(self.header_size));
        }
        if self.planes != 1 {
            return Err(BitmapError::TooManyPlanes(self.planes));
        }
        if self.important_colors > self.colors_used {
            return Err(BitmapError::InvalidColorTable(alloc::format!(
                "{} important colors but only {} colors used",
                self.important_colors,
                self.colors_used
            )));
        }
        if !matches!(self.bits_per_pixel, 1 | 4 | 8 | 16 | 24) {
            return Err(BitmapError::InvalidBitDepth(self.bits_per_pixel));
        }
        if self.compression != 0 {
            return Err(BitmapError::UnsupportedCompression(self.compression));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(BitmapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Number of palette entries to read.
    ///
    /// Exact rule: one entry for 1 bpp, `2^bpp` for 4/8 bpp, none above 8 bpp.
    /// With `lenient`, 4/8 bpp palettes may hold 1..=2^bpp entries and a
    /// count of zero means the full `2^bpp`.
    pub fn palette_len(&self, lenient: bool) -> Result<usize, BitmapError> {
        let bpp = self.bits_per_pixel;
        let required = match bpp {
            1 => 1,
            4 | 8 => 1u32 << bpp,
            _ => return Ok(0),
        };
        let used = self.colors_used;
        if used == required {
            return Ok(used as usize);
        }
        if lenient && bpp != 1 {
            if used == 0 {
                return Ok(required as usize);
            }
            if used < required {
                return Ok(used as usize);
            }
        }
        Err(BitmapError::InvalidColorTable(alloc::format!(
            "{used} palette entries for {bpp}-bit image (expected {required})"
        )))
    }

    pub fn width_u32(&self) -> u32 {
        self.width.unsigned_abs()
    }

    pub fn height_u32(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

/// Palette entry, stored as blue, green, red, reserved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaletteEntry {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
    pub reserved: u8,
}

impl PaletteEntry {
    pub fn from_bytes([blue, green, red, reserved]: [u8; PALETTE_ENTRY_LEN]) -> Self {
        Self {
            blue,
            green,
            red,
            reserved,
        }
    }

    pub fn to_bytes(self) -> [u8; PALETTE_ENTRY_LEN] {
        [self.blue, self.green, self.red, self.reserved]
    }

    pub fn to_pixel(self) -> crate::Pixel {
        crate::Pixel::new(self.red, self.green, self.blue)
    }
}
