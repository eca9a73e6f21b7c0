use crate::error::CoreError;

/// Rows at the top of the frame left untouched for the overlay printer.
pub const OVERLAY_MARGIN: u32 = 20;

/// Dimensions of the display frame and the renderable region below the
/// overlay margin.
///
/// The width is always even: pixels are computed and encoded in horizontal
/// pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    width: u32,
    height: u32,
    margin: u32,
}

impl Resolution {
    /// 640×480 interlaced NTSC.
    pub const NTSC: Self = Self {
        width: 640,
        height: 480,
        margin: OVERLAY_MARGIN,
    };

    /// 640×528 interlaced PAL.
    pub const PAL: Self = Self {
        width: 640,
        height: 528,
        margin: OVERLAY_MARGIN,
    };

    /// 640×480 interlaced PAL-M.
    pub const MPAL: Self = Self {
        width: 640,
        height: 480,
        margin: OVERLAY_MARGIN,
    };

    /// Create a resolution with an explicit overlay margin.
    pub fn new(width: u32, height: u32, margin: u32) -> crate::Result<Self> {
        if width == 0 || width % 2 != 0 {
            return Err(CoreError::InvalidResolution {
                reason: format!("width must be even and > 0, got {width}"),
            });
        }
        if height <= margin {
            return Err(CoreError::InvalidResolution {
                reason: format!("height {height} leaves no rows below a {margin}-row margin"),
            });
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// First renderable row.
    #[inline]
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Number of rows below the overlay margin.
    #[inline]
    pub fn renderable_rows(&self) -> u32 {
        self.height - self.margin
    }

    /// Packed words per frame row (one per horizontal pixel pair).
    #[inline]
    pub fn words_per_row(&self) -> u32 {
        self.width / 2
    }

    /// Integer half extents used by the pixel → plane transform.
    #[inline]
    pub fn half_extents(&self) -> (i64, i64) {
        ((self.width / 2) as i64, (self.height / 2) as i64)
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::NTSC
    }
}
