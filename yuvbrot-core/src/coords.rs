use tracing::trace;

use crate::complex::Complex;
use crate::memory::try_filled_vec;
use crate::resolution::Resolution;

/// Per-axis plane coordinates for the current view.
///
/// `column_re[x]` is the real part of every pixel in column `x`, and
/// `row_im[y - margin]` the imaginary part of every pixel in frame row `y`.
/// Both arrays are always computed from the same view snapshot, identified
/// by its recompute epoch.
#[derive(Debug, Clone)]
pub struct CoordinateCache {
    resolution: Resolution,
    column_re: Vec<f64>,
    row_im: Vec<f64>,
    epoch: Option<u64>,
}

impl CoordinateCache {
    /// Allocate both axes for `resolution`. Nothing is valid until the first
    /// [`refresh`](Self::refresh).
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        Ok(Self {
            resolution,
            column_re: try_filled_vec(resolution.width() as usize, 0.0, "column coordinates")?,
            row_im: try_filled_vec(
                resolution.renderable_rows() as usize,
                0.0,
                "row coordinates",
            )?,
            epoch: None,
        })
    }

    /// Bring both axes up to date with `center`/`zoom` at `epoch`.
    ///
    /// Returns `true` if the arrays were recomputed, `false` if they were
    /// already valid for `epoch`.
    pub fn refresh(&mut self, center: Complex, zoom: f64, epoch: u64) -> bool {
        if self.epoch == Some(epoch) {
            return false;
        }

        let (half_w, half_h) = self.resolution.half_extents();
        for (x, re) in self.column_re.iter_mut().enumerate() {
            *re = (x as i64 - half_w) as f64 * zoom + center.re;
        }
        let margin = self.resolution.margin() as i64;
        for (i, im) in self.row_im.iter_mut().enumerate() {
            let y = margin + i as i64;
            *im = center.im - (y - half_h) as f64 * zoom;
        }

        self.epoch = Some(epoch);
        trace!(epoch, zoom, "Coordinate cache refreshed");
        true
    }

    /// Drop validity for both axes at once.
    fn invalidate(&mut self) {
        self.epoch = None;
    }

    /// Free both axes. The cache holds nothing until it is recreated.
    pub fn release(&mut self) {
        self.column_re = Vec::new();
        self.row_im = Vec::new();
        self.invalidate();
    }

    /// Epoch the cached axes belong to, if any.
    #[inline]
    pub fn epoch(&self) -> Option<u64> {
        self.epoch
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn column_re(&self) -> &[f64] {
        &self.column_re
    }

    /// Imaginary coordinates of the renderable rows, first row at the margin.
    #[inline]
    pub fn row_im(&self) -> &[f64] {
        &self.row_im
    }

    /// Bytes held by both axes.
    pub fn memory_footprint(&self) -> usize {
        (self.column_re.len() + self.row_im.len()) * std::mem::size_of::<f64>()
    }
}
