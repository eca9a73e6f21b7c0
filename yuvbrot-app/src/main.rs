mod app;
mod app_dir;
mod hud;
mod input;
mod preferences;
mod session;
mod shutdown;

use eframe::egui;
use tracing::{error, info};

use app::YuvBrotApp;
use preferences::AppPreferences;
use session::Session;
use shutdown::ShutdownSignal;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting YuvBrot");

    let prefs = AppPreferences::load();
    let resolution = prefs.video_mode.resolution();
    info!(
        mode = prefs.video_mode.label(),
        width = resolution.width(),
        height = resolution.height(),
        "Video mode selected"
    );

    let shutdown = ShutdownSignal::new();
    let mut session = match Session::new(resolution, shutdown.clone()) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to allocate render buffers: {e}");
            std::process::exit(1);
        }
    };
    session.set_show_marker(prefs.show_cursor_marker);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("YuvBrot")
            .with_inner_size(prefs.window_size()),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "YuvBrot",
        options,
        Box::new(move |_cc| Ok(Box::new(YuvBrotApp::new(session, shutdown, prefs)))),
    )
}
