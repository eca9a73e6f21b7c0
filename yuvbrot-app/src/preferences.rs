use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use yuvbrot_core::Resolution;

// ---------------------------------------------------------------------------
// Video mode
// ---------------------------------------------------------------------------

/// Output video standard; selects the frame resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoMode {
    #[default]
    Ntsc,
    Pal,
    Mpal,
}

impl VideoMode {
    pub fn resolution(self) -> Resolution {
        match self {
            VideoMode::Ntsc => Resolution::NTSC,
            VideoMode::Pal => Resolution::PAL,
            VideoMode::Mpal => Resolution::MPAL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VideoMode::Ntsc => "NTSC",
            VideoMode::Pal => "PAL",
            VideoMode::Mpal => "MPAL",
        }
    }
}

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default)]
    pub video_mode: VideoMode,
    /// Window size as a multiple of the native frame size.
    #[serde(default = "default_window_scale")]
    pub window_scale: f32,
    /// Stamp a red marker under the pointer.
    #[serde(default = "default_true")]
    pub show_cursor_marker: bool,
}

fn default_window_scale() -> f32 {
    2.0
}
fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            video_mode: VideoMode::default(),
            window_scale: default_window_scale(),
            show_cursor_marker: true,
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(mut prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        if !(prefs.window_scale.is_finite() && prefs.window_scale > 0.0) {
                            prefs.window_scale = default_window_scale();
                        }
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Initial window size in logical points.
    pub fn window_size(&self) -> [f32; 2] {
        let res = self.video_mode.resolution();
        [
            res.width() as f32 * self.window_scale,
            res.height() as f32 * self.window_scale,
        ]
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
