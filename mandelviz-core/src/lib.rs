pub mod complex;
pub mod error;
pub mod escape;
pub mod grid;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{evaluate, sample_pixel, EscapeParams, PixelSample, MAX_DEPTH};
pub use grid::{GridSize, DEFAULT_PRESET_INDEX, GRID_PRESETS};
pub use viewport::{PixelBox, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
