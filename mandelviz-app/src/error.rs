use thiserror::Error;

/// Errors surfaced to the user from session entry points.
///
/// All of these are transient input failures: the session's state is
/// unchanged and the message is meant to be shown in the status line.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Depth must be between 1 and {max}, got {value}")]
    DepthOutOfRange { value: String, max: u32 },

    #[error("Invalid dimensions")]
    InvalidDimensions,

    #[error(transparent)]
    Core(#[from] mandelviz_core::CoreError),

    #[error(transparent)]
    Render(#[from] mandelviz_render::RenderError),
}
