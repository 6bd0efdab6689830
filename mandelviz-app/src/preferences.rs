use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelviz_core::{EscapeParams, GridSize, Viewport, DEFAULT_PRESET_INDEX, GRID_PRESETS};

// ---------------------------------------------------------------------------
// Last-view snapshot
// ---------------------------------------------------------------------------

/// Minimal state captured so the app can restore its previous view on startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastView {
    pub bounds: Viewport,
    pub max_iterations: u32,
    pub grid: GridSize,
    pub colormap: String,
}

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_max_iterations")]
    pub default_max_iterations: u32,
    #[serde(default = "default_preset_index")]
    pub default_preset_index: usize,
    /// Colormap name; unknown names fall back to the default scheme.
    #[serde(default)]
    pub default_colormap: String,
    #[serde(default = "default_true")]
    pub restore_last_view: bool,
    #[serde(default)]
    pub last_view: Option<LastView>,
}

fn default_max_iterations() -> u32 {
    EscapeParams::DEFAULT_DEPTH
}
fn default_preset_index() -> usize {
    DEFAULT_PRESET_INDEX
}
fn default_true() -> bool {
    true
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            default_max_iterations: default_max_iterations(),
            default_preset_index: default_preset_index(),
            default_colormap: String::new(),
            restore_last_view: true,
            last_view: None,
        }
    }
}

impl AppPreferences {
    /// Load preferences from the file next to the executable, falling back
    /// to defaults.
    pub fn load() -> Self {
        Self::load_from(config_path())
    }

    pub(crate) fn load_from(path: PathBuf) -> Self {
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
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
        self.save_to(config_path());
    }

    pub(crate) fn save_to(&self, path: PathBuf) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    /// Grid for the configured preset, clamped to the preset table.
    pub fn default_grid(&self) -> GridSize {
        GRID_PRESETS[self.default_preset_index.min(GRID_PRESETS.len() - 1)]
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
