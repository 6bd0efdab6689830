use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The controller asked for more geometry than `ensure_capacity`
    /// provided. This is a broken invariant, not a recoverable condition.
    #[error("geometry pool exhausted: {kind} free list empty with {active} active of {capacity}")]
    PoolExhausted {
        kind: &'static str,
        active: usize,
        capacity: usize,
    },

    #[error("pixel ({px}, {py}) outside frame {width}\u{d7}{height}")]
    PixelOutOfBounds {
        px: u32,
        py: u32,
        width: u32,
        height: u32,
    },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode png: {0}")]
    Encode(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] mandelviz_core::CoreError),
}
