use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;
use crate::grid::GridSize;

/// An axis-aligned rectangle in *centered* pixel space.
///
/// Centered pixel space puts the origin at the middle of the grid, the same
/// space mesh vertices live in (`px - width/2`, `py - height/2`). Pointer
/// positions projected by the host arrive in this space, so the box-selection
/// overlays and the zoom conversion below share it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PixelBox {
    /// Normalized box from two opposite corners (any order).
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x_min: ax.min(bx),
            x_max: ax.max(bx),
            y_min: ay.min(by),
            y_max: ay.max(by),
        }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// The visible region of the complex plane.
///
/// Bounds are strict (`x_min < x_max`, `y_min < y_max`) and finite; the
/// constructor enforces this so nothing downstream has to re-check. Values
/// are snapshots: history stores copies, never references into live state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// The whole-set home view, `[-2, 0.5] × [-1, 1]`.
    pub fn initial() -> Self {
        Self {
            x_min: -2.0,
            x_max: 0.5,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> crate::Result<Self> {
        for v in [x_min, x_max, y_min, y_max] {
            if !v.is_finite() {
                return Err(CoreError::InvalidViewport {
                    reason: format!("bounds must be finite, got {v}"),
                });
            }
        }
        if x_min >= x_max || y_min >= y_max {
            return Err(CoreError::InvalidViewport {
                reason: format!("bounds must be ordered, got [{x_min}, {x_max}] × [{y_min}, {y_max}]"),
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Center of the viewport in the complex plane.
    pub fn center(&self) -> Complex {
        Complex::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Real-axis extent.
    pub fn span_x(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Imaginary-axis extent.
    pub fn span_y(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Complex-plane units per pixel, `(zoom_x, zoom_y)`.
    #[inline]
    pub fn pixel_step(&self, grid: GridSize) -> (f64, f64) {
        (
            self.span_x() / grid.width as f64,
            self.span_y() / grid.height as f64,
        )
    }

    /// Map a pixel coordinate to a point on the complex plane.
    ///
    /// The pixel y-axis points the same way as the imaginary axis (no flip),
    /// so row 0 is the *bottom* of the image.
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32, grid: GridSize) -> Complex {
        let (zoom_x, zoom_y) = self.pixel_step(grid);
        let center = self.center();
        Complex::new(
            center.re + (px as f64 - grid.width as f64 / 2.0) * zoom_x,
            center.im + (py as f64 - grid.height as f64 / 2.0) * zoom_y,
        )
    }

    /// Convert a selection box in centered pixel space into the viewport it
    /// covers, using this viewport and `grid` as the mapping that produced
    /// the pixels.
    ///
    /// This is the inverse of [`pixel_to_complex`](Self::pixel_to_complex):
    /// corner-origin pixel coordinate `p` maps to `x_min + span/extent · p`.
    /// Degenerate boxes fail viewport validation and surface as `Err`.
    pub fn from_pixel_box(&self, sel: PixelBox, grid: GridSize) -> crate::Result<Self> {
        // Shift from centered to corner-origin pixel coordinates.
        let px_min = sel.x_min + grid.width as f64 / 2.0;
        let px_max = sel.x_max + grid.width as f64 / 2.0;
        let py_min = sel.y_min + grid.height as f64 / 2.0;
        let py_max = sel.y_max + grid.height as f64 / 2.0;

        let (zoom_x, zoom_y) = self.pixel_step(grid);
        Self::new(
            self.x_min + zoom_x * px_min,
            self.x_min + zoom_x * px_max,
            self.y_min + zoom_y * py_min,
            self.y_min + zoom_y * py_max,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::initial()
    }
}

/// The human-readable bounds readout: `x_min, x_max, y_min, y_max`.
impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}

/// Parse user-edited bounds text. Requires exactly four numeric tokens
/// separated by commas, with `x_min < x_max` and `y_min < y_max`; anything
/// else is `CoreError::InvalidDimensions` and the caller leaves its state
/// unchanged.
impl FromStr for Viewport {
    type Err = CoreError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut values = [0.0f64; 4];
        let mut count = 0;
        for token in s.split(',') {
            if count == 4 {
                return Err(CoreError::InvalidDimensions);
            }
            values[count] = token
                .trim()
                .parse::<f64>()
                .map_err(|_| CoreError::InvalidDimensions)?;
            count += 1;
        }
        if count != 4 {
            return Err(CoreError::InvalidDimensions);
        }
        Self::new(values[0], values[1], values[2], values[3])
            .map_err(|_| CoreError::InvalidDimensions)
    }
}
