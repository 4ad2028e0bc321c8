/// Resource limits for decode and transform operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for a pixel grid allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits sized for 8K UHD (7680x4320) content.
    pub fn uhd_8k() -> Self {
        Self {
            max_width: Some(7680),
            max_height: Some(4320),
            max_pixels: Some(7680 * 4320),
            max_memory_bytes: None,
        }
    }

    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub fn check(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub fn check_memory(&self, bytes: usize) -> Result<(), crate::BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(crate::BitmapError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }

    /// Check both dimensions and the memory a `width`x`height` grid would need.
    pub(crate) fn check_grid(&self, width: u32, height: u32) -> Result<(), crate::BitmapError> {
        self.check(width, height)?;
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(core::mem::size_of::<crate::Pixel>()))
            .ok_or(crate::BitmapError::DimensionsTooLarge { width, height })?;
        self.check_memory(bytes)
    }
}
