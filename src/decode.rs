use enough::Stop;

use crate::bmp::{self, BmpInfo, Permissiveness};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::PixelGrid;

/// Configurable BMP decode.
///
/// ```no_run
/// use photoman::{DecodeRequest, Limits, Permissiveness, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits::uhd_8k();
/// let grid = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(Permissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), photoman::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: Permissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: Permissiveness::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: Permissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Parse and validate headers (and palette) without decoding pixels.
    pub fn probe(&self) -> Result<BmpInfo, BitmapError> {
        let info = bmp::probe(self.data, self.permissiveness)?;
        if let Some(limits) = self.limits {
            limits.check(info.width, info.height)?;
        }
        Ok(info)
    }

    pub fn decode(self, stop: impl Stop) -> Result<PixelGrid, BitmapError> {
        bmp::decode(self.data, self.permissiveness, self.limits, &stop)
    }
}
