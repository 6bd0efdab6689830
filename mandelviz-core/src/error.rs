use thiserror::Error;

/// Errors originating from the core view-state and escape-time engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid depth: {0} (must be between 1 and 1000)")]
    InvalidDepth(u32),

    #[error("invalid grid size: {height}\u{d7}{width} (dimensions must be > 0)")]
    InvalidGrid { height: u32, width: u32 },

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid dimensions")]
    InvalidDimensions,
}
