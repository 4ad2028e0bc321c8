//! In-place pixel-grid transforms.
//!
//! Every operation takes the grid by `&mut`. Operations that change the
//! dimensions ([`scale`]) build a replacement buffer and swap it in; the old
//! buffer is dropped. A failed operation leaves the grid untouched.

mod filter;
mod geometry;

pub use filter::{Kernel, blur, convolve_passes, exposure};
pub use geometry::{mirror_x, mirror_y, scale, scale_with_limits};

use enough::Stop;
use filter::blur_dyn;

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// One step of an editing pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum Operation {
    /// Scale width only.
    ScaleX(f32),
    /// Scale height only.
    ScaleY(f32),
    /// Scale both axes.
    Scale { horizontal: f32, vertical: f32 },
    /// Flip top/bottom.
    MirrorX,
    /// Flip left/right.
    MirrorY,
    /// Blur (positive) or sharpen (negative) passes.
    Blur(i32),
    /// Brightness offset added to every channel.
    Exposure(i32),
}

impl Operation {
    pub fn apply(&self, grid: &mut PixelGrid, stop: &dyn Stop) -> Result<(), BitmapError> {
        self.apply_with_limits(grid, None, stop)
    }

    pub fn apply_with_limits(
        &self,
        grid: &mut PixelGrid,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        match *self {
            Self::ScaleX(h) => scale_with_limits(grid, h, 1.0, limits),
            Self::ScaleY(v) => scale_with_limits(grid, 1.0, v, limits),
            Self::Scale {
                horizontal,
                vertical,
            } => scale_with_limits(grid, horizontal, vertical, limits),
            Self::MirrorX => {
                mirror_x(grid);
                Ok(())
            }
            Self::MirrorY => {
                mirror_y(grid);
                Ok(())
            }
            Self::Blur(value) => blur_dyn(grid, value, stop),
            Self::Exposure(value) => {
                exposure(grid, value);
                Ok(())
            }
        }
    }
}

/// Run `ops` in order, stopping at the first failure.
///
/// Operations before the failing one stay applied.
pub fn apply_all(
    grid: &mut PixelGrid,
    ops: &[Operation],
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<(), BitmapError> {
    for op in ops {
        stop.check()?;
        log::debug!("applying {op:?}");
        op.apply_with_limits(grid, limits, &stop)?;
    }
    Ok(())
}
