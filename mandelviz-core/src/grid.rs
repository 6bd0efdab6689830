use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Pixel resolution of the render grid.
///
/// Height comes first to match the preset labels (`30x45` means 30 rows by
/// 45 columns). All presets share the same 2:3 height-to-width ratio, which
/// is also the ratio the box-selection aspect lock enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub height: u32,
    pub width: u32,
}

/// Resolution presets offered to the UI, coarsest first.
pub const GRID_PRESETS: [GridSize; 6] = [
    GridSize {
        height: 30,
        width: 45,
    },
    GridSize {
        height: 60,
        width: 90,
    },
    GridSize {
        height: 120,
        width: 180,
    },
    GridSize {
        height: 180,
        width: 270,
    },
    GridSize {
        height: 240,
        width: 360,
    },
    GridSize {
        height: 480,
        width: 720,
    },
];

/// Preset used when no preference says otherwise (180×270).
pub const DEFAULT_PRESET_INDEX: usize = 3;

impl GridSize {
    pub fn new(height: u32, width: u32) -> crate::Result<Self> {
        if height == 0 || width == 0 {
            return Err(CoreError::InvalidGrid { height, width });
        }
        Ok(Self { height, width })
    }

    /// Total number of pixels (and mesh vertices) in the grid.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.height as usize * self.width as usize
    }

    /// Label in the `HxW` form used by the resolution dropdown.
    pub fn label(&self) -> String {
        format!("{}x{}", self.height, self.width)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GRID_PRESETS[DEFAULT_PRESET_INDEX]
    }
}
