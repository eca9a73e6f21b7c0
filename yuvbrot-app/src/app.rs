use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{error, info};

use yuvbrot_core::Resolution;
use yuvbrot_render::{FrameBuffer, FrameSink};

use crate::app_dir;
use crate::preferences::AppPreferences;
use crate::session::{Session, StepOutcome};
use crate::shutdown::ShutdownSignal;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub(crate) const HUD_MARGIN: f32 = 4.0;
pub(crate) const NOTIFICATION_DURATION: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

/// Uploads each presented frame into the egui texture shown on the canvas.
/// eframe swaps on vsync, so the upload is the only work done here.
struct TextureSink<'a> {
    ctx: &'a egui::Context,
    texture: &'a mut Option<egui::TextureHandle>,
}

impl FrameSink for TextureSink<'_> {
    type Error = std::convert::Infallible;

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error> {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [frame.width(), frame.height()],
            &frame.to_rgba(),
        );
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, egui::TextureOptions::NEAREST);
        } else {
            *self.texture =
                Some(self.ctx.load_texture("frame", image, egui::TextureOptions::NEAREST));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub(crate) struct YuvBrotApp {
    pub(crate) session: Session,
    pub(crate) shutdown: ShutdownSignal,
    pub(crate) preferences: AppPreferences,
    pub(crate) resolution: Resolution,
    pub(crate) texture: Option<egui::TextureHandle>,
    /// Pointer position in frame pixels, if over the canvas.
    pub(crate) cursor: Option<(i32, i32)>,
    pub(crate) export_requested: bool,
    pub(crate) notification: Option<(String, Instant)>,
    pub(crate) frame_time: Duration,
    last_frame: Instant,
    closing: bool,
}

impl YuvBrotApp {
    pub(crate) fn new(session: Session, shutdown: ShutdownSignal, preferences: AppPreferences) -> Self {
        let resolution = session.view().resolution();
        Self {
            session,
            shutdown,
            preferences,
            resolution,
            texture: None,
            cursor: None,
            export_requested: false,
            notification: None,
            frame_time: Duration::ZERO,
            last_frame: Instant::now(),
            closing: false,
        }
    }

    fn export_snapshot(&mut self) {
        self.export_requested = false;
        let message = match self.session.export_snapshot(&app_dir::images_directory()) {
            Ok(Some(path)) => format!("Saved {}", path.display()),
            Ok(None) => return,
            Err(e) => {
                error!("Snapshot export failed: {e}");
                format!("Export failed: {e}")
            }
        };
        self.notification = Some((message, Instant::now()));
    }

    fn begin_close(&mut self, ctx: &egui::Context) {
        if self.closing {
            return;
        }
        self.closing = true;
        self.preferences.save();
        info!("Closing window");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for YuvBrotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.frame_time = now - self.last_frame;
        self.last_frame = now;

        if ctx.input(|i| i.viewport().close_requested()) {
            self.shutdown.raise();
        }

        let mut commands = self.handle_keyboard(ctx);

        let outcome = egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) = ui.allocate_painter(available, egui::Sense::click());
                self.handle_canvas_input(&response, &mut commands);

                let mut sink = TextureSink {
                    ctx,
                    texture: &mut self.texture,
                };
                let outcome = match self.session.step(&commands, &mut sink, self.cursor) {
                    Ok(outcome) => outcome,
                    Err(never) => match never {},
                };

                if let Some(texture) = &self.texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture.id(), response.rect, uv, egui::Color32::WHITE);
                }
                outcome
            })
            .inner;

        match outcome {
            StepOutcome::Presented(_) => {
                if self.export_requested {
                    self.export_snapshot();
                }
                self.show_hud(ctx);
                ctx.request_repaint();
            }
            StepOutcome::Shutdown => self.begin_close(ctx),
        }
    }
}
