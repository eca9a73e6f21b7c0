use yuvbrot_core::memory::try_filled_vec;
use yuvbrot_core::Resolution;

/// Stores one iteration count per pixel of the renderable region.
///
/// Counts are kept separate from encoded frames so palette switches and
/// color cycling only re-encode; the field is recomputed only when the view
/// changes.
#[derive(Debug, Clone)]
pub struct FieldBuffer {
    width: usize,
    rows: usize,
    data: Vec<u32>,
}

impl FieldBuffer {
    /// Allocate a zeroed field for the region below the overlay margin.
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        let width = resolution.width() as usize;
        let rows = resolution.renderable_rows() as usize;
        let data = try_filled_vec(width * rows, 0u32, "iteration field")?;
        Ok(Self { width, rows, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Row-major counts, `width` per row.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// Count at renderable-region coordinates `(x, row)`.
    #[inline]
    pub fn get(&self, x: usize, row: usize) -> Option<u32> {
        if x >= self.width || row >= self.rows {
            return None;
        }
        Some(self.data[row * self.width + x])
    }

    /// Iterate over the field one row at a time.
    pub fn row_iter(&self) -> std::slice::ChunksExact<'_, u32> {
        self.data.chunks_exact(self.width)
    }

    /// Bytes held by the counts.
    pub fn memory_footprint(&self) -> usize {
        self.data.len() * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sized_to_renderable_region() {
        let field = FieldBuffer::new(Resolution::new(16, 12, 4).unwrap()).unwrap();
        assert_eq!(field.width(), 16);
        assert_eq!(field.rows(), 8);
        assert_eq!(field.data().len(), 16 * 8);
        assert_eq!(field.row_iter().count(), 8);
        assert_eq!(field.memory_footprint(), 16 * 8 * 4);
    }

    #[test]
    fn get_is_bounds_checked() {
        let mut field = FieldBuffer::new(Resolution::new(4, 3, 1).unwrap()).unwrap();
        field.data_mut()[4 + 3] = 9;
        assert_eq!(field.get(3, 1), Some(9));
        assert_eq!(field.get(4, 0), None);
        assert_eq!(field.get(0, 2), None);
    }
}
