//! BMP decoder: classic 40-byte info header, uncompressed 1/4/8/16/24-bit rows.
//!
//! Rows are unpacked through [`BitCursor`] and kept in file order.

use alloc::vec::Vec;

use enough::Stop;

use super::bits::{BitCursor, row_stride};
use super::header::{
    FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader, PALETTE_ENTRY_LEN, PaletteEntry,
};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BLACK, Pixel, PixelGrid};

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permissiveness {
    /// Everything `Standard` checks, plus: pixel data must hold every
    /// declared row, and non-zero file size / image size fields must match
    /// the input.
    Strict,

    /// Default behavior. Header and palette rules are enforced exactly.
    /// A pixel section that ends early is tolerated: rows that were never
    /// read stay black.
    #[default]
    Standard,

    /// Accept short 4/8-bit palettes (a count of 0 means a full palette)
    /// and decode out-of-range palette indices as black.
    Permissive,
}

// ── Probe output ────────────────────────────────────────────────────

/// Header summary of a BMP stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub palette_len: usize,
    pub data_offset: u32,
    /// Bytes per stored row, including alignment padding.
    pub row_stride: usize,
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: u32) -> Result<(), BitmapError> {
        if pos as usize > self.data.len() {
            return Err(BitmapError::SeekOutOfBounds {
                offset: pos,
                len: self.data.len(),
            });
        }
        self.pos = pos as usize;
        Ok(())
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let chunk = self.take(N).ok_or(BitmapError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(chunk);
        Ok(buf)
    }

    /// Next `n` bytes, or `None` (without advancing) if fewer remain.
    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let chunk = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(chunk)
    }
}

// ── Internal decoder state ──────────────────────────────────────────

struct BmpDecoderState<'a> {
    bytes: Cursor<'a>,
    file: FileHeader,
    info: InfoHeader,
    palette: Vec<PaletteEntry>,
    permissiveness: Permissiveness,
}

impl<'a> BmpDecoderState<'a> {
    /// Read and validate both headers and the palette.
    fn read_headers(data: &'a [u8], permissiveness: Permissiveness) -> Result<Self, BitmapError> {
        let mut bytes = Cursor::new(data);

        let file = FileHeader::from_bytes(&bytes.read_fixed_bytes::<FILE_HEADER_LEN>()?);
        file.validate()?;

        let info = InfoHeader::from_bytes(&bytes.read_fixed_bytes::<INFO_HEADER_LEN>()?);
        info.validate()?;
        let palette_len = info.palette_len(permissiveness == Permissiveness::Permissive)?;

        if permissiveness == Permissiveness::Strict {
            check_strict_fields(&file, &info, data.len())?;
        }

        let mut palette = Vec::with_capacity(palette_len);
        for _ in 0..palette_len {
            let raw = bytes.read_fixed_bytes::<PALETTE_ENTRY_LEN>()?;
            palette.push(PaletteEntry::from_bytes(raw));
        }

        log::debug!(
            "bmp: {}x{} {}bpp, {} palette entries, pixel data at {}",
            info.width,
            info.height,
            info.bits_per_pixel,
            palette.len(),
            file.data_offset
        );

        Ok(Self {
            bytes,
            file,
            info,
            palette,
            permissiveness,
        })
    }

    fn info(&self) -> BmpInfo {
        let width = self.info.width_u32();
        BmpInfo {
            width,
            height: self.info.height_u32(),
            bits_per_pixel: self.info.bits_per_pixel,
            palette_len: self.palette.len(),
            data_offset: self.file.data_offset,
            row_stride: row_stride(width, self.info.bits_per_pixel),
        }
    }

    fn decode_pixels(
        &mut self,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<PixelGrid, BitmapError> {
        let width = self.info.width_u32();
        let height = self.info.height_u32();
        let bpp = self.info.bits_per_pixel;

        if let Some(limits) = limits {
            limits.check_grid(width, height)?;
        }

        self.bytes.set_position(self.file.data_offset)?;

        let mut grid = PixelGrid::new(width, height)?;
        let stride = row_stride(width, bpp);

        stop.check()?;

        for (y, out) in grid.rows_mut().enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            let Some(row) = self.bytes.take(stride) else {
                let rows_read = y as u32;
                if self.permissiveness == Permissiveness::Strict {
                    return Err(BitmapError::Truncated { rows_read, height });
                }
                log::warn!("bmp: pixel data truncated, {rows_read} of {height} rows decoded");
                break;
            };
            self.unpack_row(row, out)?;
        }

        Ok(grid)
    }

    fn unpack_row(&self, row: &[u8], out: &mut [Pixel]) -> Result<(), BitmapError> {
        let bpp = self.info.bits_per_pixel;
        let fields = BitCursor::new(row, bpp, out.len());

        match bpp {
            1 => {
                // One foreground color against an implicit black background.
                let fg = self.palette.first().copied().unwrap_or_default();
                for (px, bit) in out.iter_mut().zip(fields) {
                    let bit = bit as u8;
                    *px = Pixel::new(fg.red * bit, fg.green * bit, fg.blue * bit);
                }
            }
            4 | 8 => {
                let lenient = self.permissiveness == Permissiveness::Permissive;
                for (px, index) in out.iter_mut().zip(fields) {
                    *px = match self.palette.get(index as usize) {
                        Some(entry) => entry.to_pixel(),
                        None if lenient => BLACK,
                        None => {
                            return Err(BitmapError::PaletteIndexOutOfRange {
                                index,
                                len: self.palette.len(),
                            });
                        }
                    };
                }
            }
            // 16 and 24: packed B,G,R from the low byte up. A 16-bit field
            // has no third byte, so red is always zero.
            _ => {
                for (px, v) in out.iter_mut().zip(fields) {
                    *px = Pixel::new((v >> 16) as u8, (v >> 8) as u8, v as u8);
                }
            }
        }
        Ok(())
    }
}

fn check_strict_fields(
    file: &FileHeader,
    info: &InfoHeader,
    data_len: usize,
) -> Result<(), BitmapError> {
    if file.file_size != 0 && file.file_size as usize != data_len {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "BMP file size field ({}) doesn't match actual size ({data_len})",
            file.file_size
        )));
    }
    if info.image_size != 0 {
        let expected = row_stride(info.width_u32(), info.bits_per_pixel)
            .checked_mul(info.height_u32() as usize)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: info.width_u32(),
                height: info.height_u32(),
            })?;
        if info.image_size as usize != expected {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "BMP image data size field ({}) doesn't match expected ({expected})",
                info.image_size
            )));
        }
    }
    Ok(())
}

// ── Entry points ────────────────────────────────────────────────────

/// Parse and validate headers and palette without touching pixel data.
pub(crate) fn probe(data: &[u8], permissiveness: Permissiveness) -> Result<BmpInfo, BitmapError> {
    Ok(BmpDecoderState::read_headers(data, permissiveness)?.info())
}

/// Decode a whole BMP stream into a grid.
pub(crate) fn decode_bmp_pixels(
    data: &[u8],
    permissiveness: Permissiveness,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PixelGrid, BitmapError> {
    let mut dec = BmpDecoderState::read_headers(data, permissiveness)?;
    dec.decode_pixels(limits, stop)
}
