use crate::palette::{Palette, Yuv};

/// Two black pixels as one packed word.
pub const BLACK_WORD: u32 = pack(Yuv::BLACK, Yuv::BLACK);

/// Pack two horizontally adjacent pixels into one 4:2:2 word.
///
/// In memory order the word reads `Y0 U Y1 V`: each pixel keeps its own
/// luma and the pair shares the truncated mean of both chroma channels.
#[inline]
pub const fn pack(left: Yuv, right: Yuv) -> u32 {
    let u = ((left.u as u16 + right.u as u16) >> 1) as u8;
    let v = ((left.v as u16 + right.v as u16) >> 1) as u8;
    u32::from_be_bytes([left.y, u, right.y, v])
}

/// Maps pairs of iteration counts to packed display words for one frame.
///
/// Each count is first shifted by the color-cycle offset. A shifted count
/// equal to the iteration limit uses [`Yuv::BLACK`]; every other one is
/// looked up in the palette. While cycling, interior points therefore take
/// palette colors and escaped points flash black as their shifted count
/// passes the limit.
#[derive(Debug, Clone, Copy)]
pub struct PixelEncoder<'a> {
    palette: &'a Palette,
    limit: u32,
    cycle_offset: u32,
}

impl<'a> PixelEncoder<'a> {
    pub fn new(palette: &'a Palette, limit: u32, cycle_offset: u32) -> Self {
        Self {
            palette,
            limit,
            cycle_offset,
        }
    }

    /// Display color for a single count.
    #[inline]
    pub fn color(&self, count: u32) -> Yuv {
        let shifted = count.wrapping_add(self.cycle_offset);
        if shifted == self.limit {
            Yuv::BLACK
        } else {
            self.palette.lookup(shifted)
        }
    }

    /// Packed word for two adjacent counts.
    #[inline]
    pub fn encode_pair(&self, left: u32, right: u32) -> u32 {
        pack(self.color(left), self.color(right))
    }

    /// Encode one row of counts (two per output word) into `out`.
    pub fn encode_row(&self, counts: &[u32], out: &mut [u32]) {
        debug_assert_eq!(counts.len(), out.len() * 2);
        for (word, pair) in out.iter_mut().zip(counts.chunks_exact(2)) {
            *word = self.encode_pair(pair[0], pair[1]);
        }
    }
}
