use std::path::{Path, PathBuf};

use tracing::{debug, info};

use yuvbrot_core::{CommandSet, Resolution, ViewState};
use yuvbrot_render::{
    export_png, ExportMetadata, FrameOrchestrator, FrameReport, FrameSink, BLACK_WORD, MARKER_RED,
};

use crate::app_dir::unique_path;
use crate::shutdown::ShutdownSignal;

/// Result of one [`Session::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Presented(FrameReport),
    Shutdown,
}

/// The explorer's per-frame loop.
///
/// Each step observes the shutdown signal, applies that frame's commands,
/// renders, stamps the cursor marker and presents. Once shutdown is seen the
/// frame buffers are released and every later step is a no-op.
pub struct Session {
    view: ViewState,
    orchestrator: Option<FrameOrchestrator>,
    shutdown: ShutdownSignal,
    show_marker: bool,
    last_report: Option<FrameReport>,
}

impl Session {
    pub fn new(resolution: Resolution, shutdown: ShutdownSignal) -> yuvbrot_render::Result<Self> {
        let view = ViewState::new(resolution)?;
        let orchestrator = FrameOrchestrator::new(resolution)?;
        info!(
            width = resolution.width(),
            height = resolution.height(),
            "Session started"
        );
        Ok(Self {
            view,
            orchestrator: Some(orchestrator),
            shutdown,
            show_marker: true,
            last_report: None,
        })
    }

    pub fn set_show_marker(&mut self, show: bool) {
        self.show_marker = show;
    }

    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    #[inline]
    pub fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    /// Name of the selected palette; `None` once the frame buffers have
    /// been released.
    pub fn palette_name(&self) -> Option<&'static str> {
        self.orchestrator
            .as_ref()
            .map(|o| o.palettes().get(self.view.palette_index()).name)
    }

    /// Bytes held by the coordinate cache, field and frames.
    pub fn memory_footprint(&self) -> usize {
        self.view.memory_footprint()
            + self
                .orchestrator
                .as_ref()
                .map_or(0, FrameOrchestrator::memory_footprint)
    }

    /// Run one frame. `cursor` is the pointer position in frame pixels.
    pub fn step<S: FrameSink>(
        &mut self,
        commands: &CommandSet,
        sink: &mut S,
        cursor: Option<(i32, i32)>,
    ) -> Result<StepOutcome, S::Error> {
        if commands.quit {
            self.shutdown.raise();
        }
        if self.shutdown.is_raised() {
            self.release();
            return Ok(StepOutcome::Shutdown);
        }
        let Some(orchestrator) = self.orchestrator.as_mut() else {
            return Ok(StepOutcome::Shutdown);
        };

        self.view.apply(commands);
        let report = orchestrator.render_frame(&mut self.view);
        if report.recomputed {
            debug!(
                epoch = report.epoch,
                compute_ms = report.compute_time.as_secs_f64() * 1000.0,
                "Frame recomputed"
            );
        }

        // The encoder never writes the margin, so clear old markers there.
        let margin = self.view.resolution().margin() as usize;
        let frame = orchestrator.back_buffer_mut();
        frame.clear_rows(0..margin, BLACK_WORD);
        if let (true, Some((x, y))) = (self.show_marker, cursor) {
            frame.draw_marker(x, y, MARKER_RED);
        }

        orchestrator.present(sink)?;
        self.last_report = Some(report);
        Ok(StepOutcome::Presented(report))
    }

    /// Write the most recently presented frame as a PNG in `dir`.
    ///
    /// Returns `Ok(None)` once the session has been released.
    pub fn export_snapshot(&self, dir: &Path) -> yuvbrot_render::Result<Option<PathBuf>> {
        let Some(orchestrator) = self.orchestrator.as_ref() else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)?;
        let path = unique_path(dir, "yuvbrot", "png");
        let center = self.view.center();
        let metadata = ExportMetadata {
            center_re: center.re,
            center_im: center.im,
            magnification: self.view.magnification(),
            iteration_limit: self.view.iteration_limit(),
            palette_name: orchestrator
                .palettes()
                .get(self.view.palette_index())
                .name
                .to_string(),
        };
        export_png(orchestrator.back_buffer(), &path, &metadata)?;
        info!("Snapshot saved to {}", path.display());
        Ok(Some(path))
    }

    /// Release the field, frames and coordinate cache.
    pub fn release(&mut self) {
        if let Some(orchestrator) = self.orchestrator.take() {
            orchestrator.release();
            self.view.release_buffers();
            info!("Session released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuvbrot_render::FrameBuffer;

    struct Recorder {
        frames: Vec<Vec<u32>>,
    }

    impl FrameSink for Recorder {
        type Error = std::convert::Infallible;

        fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
            self.frames.push(frame.words().to_vec());
            Ok(())
        }
    }

    struct Unplugged;

    impl FrameSink for Unplugged {
        type Error = &'static str;

        fn present(&mut self, _frame: &FrameBuffer) -> Result<(), Self::Error> {
            Err("display lost")
        }
    }

    fn session() -> (Session, ShutdownSignal) {
        let signal = ShutdownSignal::new();
        let res = Resolution::new(64, 48, 4).unwrap();
        (Session::new(res, signal.clone()).unwrap(), signal)
    }

    #[test]
    fn first_step_recomputes_and_presents() {
        let (mut s, _) = session();
        let mut sink = Recorder { frames: Vec::new() };
        match s.step(&CommandSet::default(), &mut sink, None).unwrap() {
            StepOutcome::Presented(report) => assert!(report.recomputed),
            StepOutcome::Shutdown => panic!("session should be running"),
        }
        assert_eq!(sink.frames.len(), 1);
        assert!(s.last_report().is_some());
        assert_eq!(s.palette_name(), Some("Rainbow"));
    }

    #[test]
    fn quit_command_releases_buffers() {
        let (mut s, signal) = session();
        let mut sink = Recorder { frames: Vec::new() };
        s.step(&CommandSet::default(), &mut sink, None).unwrap();

        let quit = CommandSet {
            quit: true,
            ..Default::default()
        };
        assert_eq!(s.step(&quit, &mut sink, None).unwrap(), StepOutcome::Shutdown);
        assert!(signal.is_raised());
        assert_eq!(s.palette_name(), None);
        assert_eq!(s.memory_footprint(), 0);

        assert_eq!(
            s.step(&CommandSet::default(), &mut sink, None).unwrap(),
            StepOutcome::Shutdown
        );
        assert_eq!(sink.frames.len(), 1);
    }

    #[test]
    fn external_signal_is_seen_at_frame_boundary() {
        let (mut s, signal) = session();
        let mut sink = Recorder { frames: Vec::new() };
        signal.raise();
        assert_eq!(
            s.step(&CommandSet::default(), &mut sink, None).unwrap(),
            StepOutcome::Shutdown
        );
        assert!(sink.frames.is_empty());
        assert_eq!(s.memory_footprint(), 0);
    }

    #[test]
    fn marker_in_margin_is_cleared_on_reuse() {
        let (mut s, _) = session();
        let mut sink = Recorder { frames: Vec::new() };
        let none = CommandSet::default();

        s.step(&none, &mut sink, Some((10, 2))).unwrap();
        assert_eq!(sink.frames[0][5], MARKER_RED);

        // The marked buffer comes back around on the third frame.
        s.step(&none, &mut sink, None).unwrap();
        s.step(&none, &mut sink, None).unwrap();
        assert!(sink.frames[2][..4 * 32].iter().all(|&w| w == BLACK_WORD));
    }

    #[test]
    fn marker_can_be_disabled() {
        let (mut s, _) = session();
        s.set_show_marker(false);
        let mut sink = Recorder { frames: Vec::new() };
        s.step(&CommandSet::default(), &mut sink, Some((10, 2))).unwrap();
        assert_eq!(sink.frames[0][5], BLACK_WORD);
    }

    #[test]
    fn sink_errors_propagate() {
        let (mut s, _) = session();
        assert_eq!(
            s.step(&CommandSet::default(), &mut Unplugged, None),
            Err("display lost")
        );
    }

    #[test]
    fn snapshot_is_written() {
        let (mut s, _) = session();
        let mut sink = Recorder { frames: Vec::new() };
        s.step(&CommandSet::default(), &mut sink, None).unwrap();

        let dir = std::env::temp_dir().join(format!("yuvbrot_snap_{}", std::process::id()));
        let path = s.export_snapshot(&dir).unwrap().unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).unwrap();

        s.release();
        assert!(s.export_snapshot(&dir).unwrap().is_none());
    }
}
