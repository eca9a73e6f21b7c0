use std::time::{Duration, Instant};

use tracing::{debug, info};

use yuvbrot_core::{Resolution, ViewState};

use crate::encoder::PixelEncoder;
use crate::field::FieldBuffer;
use crate::frame::FrameBuffer;
use crate::palette::PaletteTable;

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Receives finished frames.
///
/// The sink owns the swap: it shows `frame` at the next vertical blank and
/// may block until then. It is only ever handed a fully written frame.
pub trait FrameSink {
    type Error;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// What one call to [`FrameOrchestrator::render_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// The field was recomputed this frame.
    pub recomputed: bool,
    /// View epoch the field now belongs to.
    pub epoch: u64,
    /// Frame buffer written this frame.
    pub buffer_index: usize,
    pub compute_time: Duration,
    pub encode_time: Duration,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives one recompute/encode pass per display frame.
///
/// Owns the iteration field and both frame buffers. Each frame is written
/// into the buffer that is not currently on screen, then handed to a
/// [`FrameSink`].
pub struct FrameOrchestrator {
    resolution: Resolution,
    palettes: PaletteTable,
    field: FieldBuffer,
    frames: [FrameBuffer; 2],
    back: usize,
    frames_rendered: u64,
}

impl FrameOrchestrator {
    /// Allocate the field and both frames for `resolution`.
    pub fn new(resolution: Resolution) -> crate::Result<Self> {
        let field = FieldBuffer::new(resolution)?;
        let frames = [FrameBuffer::new(resolution)?, FrameBuffer::new(resolution)?];
        let orchestrator = Self {
            resolution,
            palettes: PaletteTable::builtin(),
            field,
            frames,
            back: 1,
            frames_rendered: 0,
        };
        info!(
            width = resolution.width(),
            height = resolution.height(),
            bytes = orchestrator.memory_footprint(),
            "Frame orchestrator ready"
        );
        Ok(orchestrator)
    }

    #[inline]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[inline]
    pub fn palettes(&self) -> &PaletteTable {
        &self.palettes
    }

    #[inline]
    pub fn field(&self) -> &FieldBuffer {
        &self.field
    }

    /// The frame most recently written by [`render_frame`](Self::render_frame).
    #[inline]
    pub fn back_buffer(&self) -> &FrameBuffer {
        &self.frames[self.back]
    }

    /// Mutable access to the frame being prepared, for drawing on top of
    /// the encoded field before it is presented.
    #[inline]
    pub fn back_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frames[self.back]
    }

    /// Prepare the next frame for `view`.
    ///
    /// Recomputes the field if the view changed since the last recompute,
    /// encodes the whole field into the back buffer, then advances the
    /// color-cycle offset.
    pub fn render_frame(&mut self, view: &mut ViewState) -> FrameReport {
        debug_assert_eq!(view.resolution(), self.resolution);
        self.back ^= 1;

        let start = Instant::now();
        let recomputed = view.is_dirty();
        if recomputed {
            self.recompute(view);
        }
        let compute_time = start.elapsed();

        let start = Instant::now();
        self.encode(view);
        let encode_time = start.elapsed();

        view.advance_cycle();
        self.frames_rendered += 1;

        FrameReport {
            recomputed,
            epoch: view.epoch(),
            buffer_index: self.back,
            compute_time,
            encode_time,
        }
    }

    /// Hand the back buffer to `sink`.
    pub fn present<S: FrameSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.present(&self.frames[self.back])
    }

    /// Fill the field from the view's coordinate cache, row-major, two
    /// columns at a time.
    fn recompute(&mut self, view: &mut ViewState) {
        let epoch = view.epoch();
        let engine = view.engine();
        let coords = view.coordinates();
        let width = self.field.width();

        for (row, &ci) in self
            .field
            .data_mut()
            .chunks_exact_mut(width)
            .zip(coords.row_im())
        {
            for (pair, re) in row
                .chunks_exact_mut(2)
                .zip(coords.column_re().chunks_exact(2))
            {
                pair[0] = engine.iterate(re[0], ci);
                pair[1] = engine.iterate(re[1], ci);
            }
        }

        view.mark_rendered(epoch);
        debug!(
            epoch,
            limit = engine.limit(),
            zoom = view.zoom(),
            "Field recomputed"
        );
    }

    /// Encode the field into the back buffer below the overlay margin.
    fn encode(&mut self, view: &ViewState) {
        let encoder = PixelEncoder::new(
            self.palettes.get(view.palette_index()),
            view.iteration_limit(),
            view.cycle_offset(),
        );
        let margin = self.resolution.margin() as usize;
        let frame = &mut self.frames[self.back];
        for (i, counts) in self.field.row_iter().enumerate() {
            encoder.encode_row(counts, frame.row_mut(margin + i));
        }
    }

    /// Bytes held by the field and both frames.
    pub fn memory_footprint(&self) -> usize {
        self.field.memory_footprint()
            + self.frames.iter().map(FrameBuffer::memory_footprint).sum::<usize>()
    }

    /// Release the field and frames.
    pub fn release(self) {
        info!(frames = self.frames_rendered, "Releasing frame buffers");
        drop(self);
    }
}
