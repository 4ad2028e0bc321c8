//! Per-pixel exposure and 3x3 convolution (blur / sharpen).

use enough::Stop;

use crate::error::BitmapError;
use crate::pixel::{Pixel, PixelGrid, try_alloc};

/// Add `value` to every channel, saturating at 0 and 255.
pub fn exposure(grid: &mut PixelGrid, value: i32) {
    let adjust = |c: u8| i32::from(c).saturating_add(value).clamp(0, 255) as u8;
    for px in grid.pixels_mut() {
        *px = Pixel::new(adjust(px.r), adjust(px.g), adjust(px.b));
    }
}

/// 3x3 integer convolution kernel. The weighted sum is divided by `divisor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    pub weights: [[i32; 3]; 3],
    pub divisor: i32,
}

impl Kernel {
    /// Gaussian-like smoothing, `{1,2,1; 2,4,2; 1,2,1} / 16`.
    pub const fn gaussian_3x3() -> Self {
        Self {
            weights: [[1, 2, 1], [2, 4, 2], [1, 2, 1]],
            divisor: 16,
        }
    }

    /// Unnormalized sharpen, `{0,-1,0; -1,5,-1; 0,-1,0}`.
    pub const fn sharpen_3x3() -> Self {
        Self {
            weights: [[0, -1, 0], [-1, 5, -1], [0, -1, 0]],
            divisor: 1,
        }
    }
}

/// Blur (`value > 0`) or sharpen (`value < 0`), repeated `|value|` times.
///
/// Each pass reads the previous pass's output. The outermost one-pixel ring
/// is copied through unchanged. `value == 0` is rejected with
/// [`BitmapError::BadParameter`] and the grid is left as is.
pub fn blur(grid: &mut PixelGrid, value: i32, stop: impl Stop) -> Result<(), BitmapError> {
    blur_dyn(grid, value, &stop)
}

pub(crate) fn blur_dyn(
    grid: &mut PixelGrid,
    value: i32,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    let kernel = match value {
        0 => {
            return Err(BitmapError::BadParameter(
                "blur amount must be non-zero".into(),
            ));
        }
        v if v > 0 => Kernel::gaussian_3x3(),
        _ => Kernel::sharpen_3x3(),
    };
    convolve_passes(grid, &kernel, value.unsigned_abs(), stop)
}

/// Apply `kernel` `passes` times, ping-ponging between two buffers.
pub fn convolve_passes(
    grid: &mut PixelGrid,
    kernel: &Kernel,
    passes: u32,
    stop: &dyn Stop,
) -> Result<(), BitmapError> {
    if kernel.divisor == 0 {
        return Err(BitmapError::BadParameter("kernel divisor is zero".into()));
    }
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    // Check before taking the buffer so a cancelled call leaves the grid intact.
    stop.check()?;

    let mut current = try_alloc(grid.pixels().len(), grid.width(), grid.height())?;
    current.extend_from_slice(grid.pixels());
    let mut previous = grid.take_pixels();
    for pass in 0..passes {
        if let Err(reason) = stop.check() {
            grid.put_pixels(previous);
            return Err(reason.into());
        }
        log::trace!("convolution pass {}/{passes}", pass + 1);
        convolve_once(&previous, &mut current, width, height, kernel);
        core::mem::swap(&mut previous, &mut current);
    }
    grid.put_pixels(previous);
    Ok(())
}

/// One pass from `src` into `dst`. Border pixels are copied, interior pixels convolved.
fn convolve_once(src: &[Pixel], dst: &mut [Pixel], width: usize, height: usize, kernel: &Kernel) {
    dst.copy_from_slice(src);
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = [0i32; 3];
            for (ky, weights) in kernel.weights.iter().enumerate() {
                let row = (y + ky - 1) * width;
                for (kx, &w) in weights.iter().enumerate() {
                    let p = src[row + x + kx - 1];
                    sum[0] += w * i32::from(p.r);
                    sum[1] += w * i32::from(p.g);
                    sum[2] += w * i32::from(p.b);
                }
            }
            let channel = |s: i32| (s / kernel.divisor).clamp(0, 255) as u8;
            dst[y * width + x] = Pixel::new(channel(sum[0]), channel(sum[1]), channel(sum[2]));
        }
    }
}
