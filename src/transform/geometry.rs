//! Nearest-neighbor scaling and mirroring.

use alloc::vec::Vec;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{PixelGrid, checked_len, try_alloc};

/// Scale by `horizontal` x `vertical` with nearest-neighbor sampling.
///
/// Only clean ratios are accepted: `floor(dim / factor) * factor` must equal
/// `dim` on both axes, and the resulting dimensions must be non-zero.
/// On error the grid is left untouched.
pub fn scale(grid: &mut PixelGrid, horizontal: f32, vertical: f32) -> Result<(), BitmapError> {
    scale_with_limits(grid, horizontal, vertical, None)
}

/// [`scale`] with the new dimensions checked against `limits` before allocating.
pub fn scale_with_limits(
    grid: &mut PixelGrid,
    horizontal: f32,
    vertical: f32,
    limits: Option<&Limits>,
) -> Result<(), BitmapError> {
    let new_width = scaled_dimension(grid.width(), horizontal, "horizontal")?;
    let new_height = scaled_dimension(grid.height(), vertical, "vertical")?;

    if let Some(limits) = limits {
        limits.check_grid(new_width, new_height)?;
    }
    let len = checked_len(new_width, new_height)?;
    let mut pixels = try_alloc(len, new_width, new_height)?;

    log::trace!(
        "scale {}x{} -> {new_width}x{new_height}",
        grid.width(),
        grid.height()
    );

    let src_width = grid.width() as usize;
    let max_x = grid.width() - 1;
    let max_y = grid.height() - 1;
    // Source column for every destination column, computed once.
    let mut columns: Vec<usize> = Vec::new();
    columns
        .try_reserve_exact(new_width as usize)
        .map_err(|_| BitmapError::DimensionsTooLarge {
            width: new_width,
            height: new_height,
        })?;
    columns.extend((0..new_width).map(|x| source_coord(x, horizontal, max_x) as usize));

    let src = grid.pixels();
    for y in 0..new_height {
        let sy = source_coord(y, vertical, max_y) as usize;
        let src_row = &src[sy * src_width..(sy + 1) * src_width];
        pixels.extend(columns.iter().map(|&sx| src_row[sx]));
    }

    grid.replace(new_width, new_height, pixels);
    Ok(())
}

fn scaled_dimension(dim: u32, factor: f32, axis: &str) -> Result<u32, BitmapError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(BitmapError::BadParameter(alloc::format!(
            "{axis} scale factor must be positive, got {factor}"
        )));
    }
    let d = dim as f32;
    if floor_positive(d / factor) * factor != d {
        return Err(BitmapError::BadParameter(alloc::format!(
            "{axis} scale {factor} does not divide dimension {dim} evenly"
        )));
    }
    let scaled = d * factor;
    if scaled < 1.0 || scaled >= u32::MAX as f32 {
        return Err(BitmapError::BadParameter(alloc::format!(
            "{axis} scale {factor} turns dimension {dim} into {scaled}"
        )));
    }
    Ok(scaled as u32)
}

/// `floor` for finite non-negative values, without `std`.
#[inline]
fn floor_positive(v: f32) -> f32 {
    // Every f32 at or above 2^24 is already an integer.
    if v >= 16_777_216.0 {
        v
    } else {
        (v as u32) as f32
    }
}

#[inline]
fn source_coord(dest: u32, factor: f32, max: u32) -> u32 {
    // Truncation is floor for a non-negative quotient; `as` saturates.
    ((dest as f32 / factor) as u32).min(max)
}

/// Flip top/bottom: row `y` swaps with row `height - 1 - y`.
pub fn mirror_x(grid: &mut PixelGrid) {
    let w = grid.width() as usize;
    let h = grid.height() as usize;
    let pixels = grid.pixels_mut();
    let (top, bottom) = pixels.split_at_mut(h / 2 * w);
    // `bottom` may start with an untouched middle row when `h` is odd.
    let skip = bottom.len() - top.len();
    for (upper, lower) in top
        .chunks_exact_mut(w)
        .zip(bottom[skip..].rchunks_exact_mut(w))
    {
        upper.swap_with_slice(lower);
    }
}

/// Flip left/right: column `x` swaps with column `width - 1 - x` in every row.
pub fn mirror_y(grid: &mut PixelGrid) {
    for row in grid.rows_mut() {
        row.reverse();
    }
}
