use std::time::Duration;

use eframe::egui;

use yuvbrot_core::{Complex, ViewState};

use crate::app::{YuvBrotApp, HUD_MARGIN, NOTIFICATION_DURATION};

/// Position and zoom readout, with the plane coordinate under the cursor.
pub(crate) fn status_line(view: &ViewState, cursor: Option<Complex>) -> String {
    let center = view.center();
    let cursor = match cursor {
        Some(c) => format!("re:{:.8} im:{:.8}", c.re, c.im),
        None => "No Cursor".to_string(),
    };
    format!(
        "cX:{:.8} cY:{:.8}  zoom:{:.4e}  {cursor}",
        center.re,
        center.im,
        view.magnification()
    )
}

/// Coloring and timing readout.
pub(crate) fn detail_line(
    view: &ViewState,
    palette: &str,
    frame_time: Duration,
    render_time: Duration,
    memory_bytes: usize,
) -> String {
    format!(
        "limit:{}  palette:{}{}  frame:{:.1} ms  render:{:.1} ms  mem:{:.2} MiB",
        view.iteration_limit(),
        palette,
        if view.color_cycling() { " (cycling)" } else { "" },
        frame_time.as_secs_f64() * 1000.0,
        render_time.as_secs_f64() * 1000.0,
        memory_bytes as f64 / (1024.0 * 1024.0),
    )
}

impl YuvBrotApp {
    /// Draw the readout over the reserved top margin of the frame.
    pub(crate) fn show_hud(&mut self, ctx: &egui::Context) {
        let session = &self.session;
        let view = session.view();
        let cursor = self.cursor.map(|(x, y)| view.plane_at(x, y));
        let status = status_line(view, cursor);
        let detail = detail_line(
            view,
            session.palette_name().unwrap_or("-"),
            self.frame_time,
            session
                .last_report()
                .map_or(Duration::ZERO, |r| r.compute_time + r.encode_time),
            session.memory_footprint(),
        );

        if self
            .notification
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() > NOTIFICATION_DURATION)
        {
            self.notification = None;
        }

        egui::Area::new(egui::Id::new("hud_status"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(4))
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));
                        ui.style_mut().spacing.item_spacing.y = 1.0;
                        ui.label(egui::RichText::new(status).monospace());
                        ui.label(egui::RichText::new(detail).monospace());
                        if let Some((message, _)) = &self.notification {
                            ui.colored_label(egui::Color32::from_rgb(255, 180, 50), message);
                        }
                    });
            });
    }
}
