use alloc::vec::Vec;

use rgb::ComponentBytes as _;

use crate::error::BitmapError;

/// One 8-bit RGB pixel. No alpha.
pub type Pixel = rgb::RGB8;

/// Black, the fill color for freshly allocated grids.
pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

/// A `width` x `height` buffer of [`Pixel`]s in row-major order.
///
/// The buffer length always equals `width * height` and neither dimension
/// is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// Allocate a black grid.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        let mut pixels = try_alloc(len, width, height)?;
        pixels.resize(len, BLACK);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing pixel buffer.
    ///
    /// Returns [`BitmapError::BufferTooSmall`] (or `BadParameter` for a
    /// longer buffer) unless `pixels.len() == width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        let len = checked_len(width, height)?;
        if pixels.len() < len {
            return Err(BitmapError::BufferTooSmall {
                needed: len,
                actual: pixels.len(),
            });
        }
        if pixels.len() > len {
            return Err(BitmapError::BadParameter(alloc::format!(
                "{} pixels supplied for a {width}x{height} grid",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Pixel data as packed R,G,B bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_bytes()
    }

    /// Pixel at column `x`, row `y`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Overwrite the pixel at column `x`, row `y`. Returns false when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = pixel;
        true
    }

    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        let w = self.width as usize;
        let start = (y as usize).checked_mul(w)?;
        self.pixels.get(start..start + w)
    }

    pub fn row_mut(&mut self, y: u32) -> Option<&mut [Pixel]> {
        let w = self.width as usize;
        let start = (y as usize).checked_mul(w)?;
        self.pixels.get_mut(start..start + w)
    }

    /// Iterate rows top to bottom (in buffer order).
    pub fn rows(&self) -> core::slice::ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub(crate) fn rows_mut(&mut self) -> core::slice::ChunksExactMut<'_, Pixel> {
        self.pixels.chunks_exact_mut(self.width as usize)
    }

    /// Replace dimensions and buffer at once. Caller guarantees the invariant.
    pub(crate) fn replace(&mut self, width: u32, height: u32, pixels: Vec<Pixel>) {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
    }

    pub(crate) fn take_pixels(&mut self) -> Vec<Pixel> {
        core::mem::take(&mut self.pixels)
    }

    pub(crate) fn put_pixels(&mut self, pixels: Vec<Pixel>) {
        debug_assert_eq!(pixels.len(), self.width as usize * self.height as usize);
        self.pixels = pixels;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

#[cfg(feature = "imgref")]
impl From<PixelGrid> for imgref::ImgVec<Pixel> {
    fn from(grid: PixelGrid) -> Self {
        imgref::ImgVec::new(grid.pixels, grid.width as usize, grid.height as usize)
    }
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgVec<Pixel>> for PixelGrid {
    type Error = BitmapError;

    fn try_from(img: imgref::ImgVec<Pixel>) -> Result<Self, Self::Error> {
        let width = u32::try_from(img.width()).map_err(|_| BitmapError::DimensionsTooLarge {
            width: u32::MAX,
            height: img.height() as u32,
        })?;
        let height = u32::try_from(img.height()).map_err(|_| BitmapError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let mut out = Vec::with_capacity(img.width() * img.height());
        for row in img.rows() {
            out.extend_from_slice(row);
        }
        Self::from_pixels(width, height, out)
    }
}

/// Pixel count of a `width` x `height` grid whose byte size fits in `isize`.
pub(crate) fn checked_len(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: width as i32,
            height: height as i32,
        });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&len| {
            len.checked_mul(core::mem::size_of::<Pixel>())
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}

/// Empty buffer with room for `len` pixels. Allocation failure is an error.
pub(crate) fn try_alloc(len: usize, width: u32, height: u32) -> Result<Vec<Pixel>, BitmapError> {
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(len)
        .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
    Ok(pixels)
}
