use yuvbrot_core::memory::try_filled_vec;
use yuvbrot_core::Resolution;

use crate::encoder::BLACK_WORD;
use crate::palette::Yuv;

/// Cursor marker color as a packed pair.
pub const MARKER_RED: u32 = 0x4C54_4CFF;

/// A packed 4:2:2 frame: one `u32` per horizontal pixel pair, row-major.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    words_per_row: usize,
    height: usize,
    words: Vec<u32>,
}

impl FrameBuffer {
    /// Create a frame cleared to black.
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        let words_per_row = resolution.words_per_row() as usize;
        let height = resolution.height() as usize;
        let words = try_filled_vec(words_per_row * height, BLACK_WORD, "frame buffer")?;
        Ok(Self {
            words_per_row,
            height,
            words,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.words_per_row * 2
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    #[inline]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u32] {
        let start = y * self.words_per_row;
        &self.words[start..start + self.words_per_row]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.words_per_row;
        &mut self.words[start..start + self.words_per_row]
    }

    /// Fill rows `rows` with `word`.
    pub fn clear_rows(&mut self, rows: std::ops::Range<usize>, word: u32) {
        let start = rows.start * self.words_per_row;
        let end = rows.end.min(self.height) * self.words_per_row;
        if start < end {
            self.words[start..end].fill(word);
        }
    }

    /// Stamp a 5-word × 9-row block centred on pixel `(px, py)`, clipped to
    /// the frame.
    pub fn draw_marker(&mut self, px: i32, py: i32, word: u32) {
        let x = px >> 1;
        let x_start = x.saturating_sub(2).max(0);
        let x_end = x.saturating_add(2).min(self.words_per_row as i32 - 1);
        let y_start = py.saturating_sub(4).max(0);
        let y_end = py.saturating_add(4).min(self.height as i32 - 1);
        if x_start > x_end || y_start > y_end {
            return;
        }
        for y in y_start..=y_end {
            let row = self.row_mut(y as usize);
            row[x_start as usize..=x_end as usize].fill(word);
        }
    }

    /// Convert to opaque RGBA, one pixel per 4 bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(self.words.len() * 8);
        for word in &self.words {
            let [y0, u, y1, v] = word.to_be_bytes();
            for y in [y0, y1] {
                let [r, g, b] = Yuv::new(y, u, v).to_rgb();
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }
        pixels
    }

    /// Bytes held by the frame.
    pub fn memory_footprint(&self) -> usize {
        self.words.len() * std::mem::size_of::<u32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> FrameBuffer {
        FrameBuffer::new(Resolution::new(32, 24, 4).unwrap()).unwrap()
    }

    #[test]
    fn new_frame_is_black() {
        let f = frame();
        assert_eq!(f.width(), 32);
        assert_eq!(f.words().len(), 16 * 24);
        assert!(f.words().iter().all(|&w| w == BLACK_WORD));
        assert!(f.to_rgba().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn clear_rows_touches_only_range() {
        let mut f = frame();
        f.clear_rows(0..24, MARKER_RED);
        f.clear_rows(0..4, BLACK_WORD);
        assert!(f.row(3).iter().all(|&w| w == BLACK_WORD));
        assert!(f.row(4).iter().all(|&w| w == MARKER_RED));
        f.clear_rows(20..100, BLACK_WORD);
        assert!(f.row(23).iter().all(|&w| w == BLACK_WORD));
    }

    #[test]
    fn marker_covers_block() {
        let mut f = frame();
        f.draw_marker(16, 12, MARKER_RED);
        let marked = f.words().iter().filter(|&&w| w == MARKER_RED).count();
        assert_eq!(marked, 5 * 9);
        assert_eq!(f.row(12)[8], MARKER_RED);
        assert_eq!(f.row(12)[6], MARKER_RED);
        assert_eq!(f.row(12)[5], BLACK_WORD);
        assert_eq!(f.row(3)[8], BLACK_WORD);
    }

    #[test]
    fn marker_is_clipped_at_edges() {
        let mut f = frame();
        f.draw_marker(0, 0, MARKER_RED);
        let marked = f.words().iter().filter(|&&w| w == MARKER_RED).count();
        assert_eq!(marked, 3 * 5);

        let mut f = frame();
        f.draw_marker(31, 23, MARKER_RED);
        let marked = f.words().iter().filter(|&&w| w == MARKER_RED).count();
        assert_eq!(marked, 3 * 5);
    }

    #[test]
    fn marker_off_frame_is_ignored() {
        let mut f = frame();
        f.draw_marker(-40, 100, MARKER_RED);
        assert!(f.words().iter().all(|&w| w == BLACK_WORD));
    }

    #[test]
    fn extreme_marker_positions_do_not_overflow() {
        let mut f = frame();
        for (px, py) in [
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MIN),
            (i32::MAX, 12),
            (16, i32::MIN),
        ] {
            f.draw_marker(px, py, MARKER_RED);
        }
        assert!(f.words().iter().all(|&w| w == BLACK_WORD));
    }
}
