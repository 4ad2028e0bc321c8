//! BMP encoder: uncompressed 24-bit, no palette.

use alloc::vec::Vec;

use enough::Stop;

use super::bits::row_stride;
use super::header::{FILE_HEADER_LEN, FileHeader, INFO_HEADER_LEN, InfoHeader, SIGNATURE};
use crate::error::BitmapError;
use crate::pixel::PixelGrid;

const DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Encode a grid as a 24-bit BMP. Rows are written in grid order.
pub(crate) fn encode_bmp(grid: &PixelGrid, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let width = grid.width();
    let height = grid.height();
    let too_large = BitmapError::DimensionsTooLarge { width, height };

    let stride = row_stride(width, 24);
    let image_size = stride
        .checked_mul(height as usize)
        .filter(|&n| n <= u32::MAX as usize - DATA_OFFSET)
        .ok_or(too_large)?;
    let file_size = image_size + DATA_OFFSET;
    let (Ok(disk_width), Ok(disk_height)) = (i32::try_from(width), i32::try_from(height)) else {
        return Err(BitmapError::DimensionsTooLarge { width, height });
    };

    let mut out = Vec::with_capacity(file_size);
    write_bmp_header(&mut out, file_size as u32, image_size as u32, disk_width, disk_height);

    stop.check()?;

    let pad_bytes = stride - width as usize * 3;
    for (y, row) in grid.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

fn write_bmp_header(out: &mut Vec<u8>, file_size: u32, image_size: u32, width: i32, height: i32) {
    FileHeader {
        signature: SIGNATURE,
        file_size,
        reserved: 0,
        data_offset: DATA_OFFSET as u32,
    }
    .write_to(out);

    InfoHeader {
        header_size: INFO_HEADER_LEN as u32,
        width,
        height,
        planes: 1,
        bits_per_pixel: 24,
        compression: 0,
        image_size,
        x_pixels_per_m: 0,
        y_pixels_per_m: 0,
        colors_used: 0,
        important_colors: 0,
    }
    .write_to(out);
}
