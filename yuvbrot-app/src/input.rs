use eframe::egui;

use yuvbrot_core::{CommandSet, Resolution};

use crate::app::YuvBrotApp;

/// Keys pressed this frame mapped to commands. The second value is `true`
/// when a snapshot export was requested.
pub(crate) fn commands_from_keys(pressed: impl Fn(egui::Key) -> bool) -> (CommandSet, bool) {
    let commands = CommandSet {
        reset_view: pressed(egui::Key::R),
        double_limit: pressed(egui::Key::Num1),
        halve_limit: pressed(egui::Key::Num2),
        palette_next: pressed(egui::Key::Plus) || pressed(egui::Key::Equals),
        palette_prev: pressed(egui::Key::Minus),
        toggle_cycling: pressed(egui::Key::C) || pressed(egui::Key::ArrowDown),
        quit: pressed(egui::Key::Escape) || pressed(egui::Key::Home),
        ..Default::default()
    };
    (commands, pressed(egui::Key::S))
}

/// Frame pixel under `pos` when the frame is stretched over `rect`.
pub(crate) fn frame_pixel(rect: egui::Rect, pos: egui::Pos2, resolution: Resolution) -> (i32, i32) {
    let rel = pos - rect.min;
    let x = (rel.x / rect.width() * resolution.width() as f32).floor() as i32;
    let y = (rel.y / rect.height() * resolution.height() as f32).floor() as i32;
    (
        x.clamp(0, resolution.width() as i32 - 1),
        y.clamp(0, resolution.height() as i32 - 1),
    )
}

impl YuvBrotApp {
    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) -> CommandSet {
        let (commands, export) = ctx.input(|input| commands_from_keys(|key| input.key_pressed(key)));
        self.export_requested |= export;
        commands
    }

    pub(crate) fn handle_canvas_input(&mut self, response: &egui::Response, commands: &mut CommandSet) {
        let resolution = self.resolution;
        let rect = response.rect;
        self.cursor = response
            .hover_pos()
            .map(|pos| frame_pixel(rect, pos, resolution));

        let pointer = response
            .interact_pointer_pos()
            .map(|pos| frame_pixel(rect, pos, resolution));
        if response.clicked() {
            commands.zoom_to = pointer;
        }
        if response.secondary_clicked() {
            commands.pan_to = pointer;
        }
        if response.middle_clicked() {
            commands.reset_view = true;
        }
    }
}
