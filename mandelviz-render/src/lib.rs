pub mod buffer;
pub mod colormap;
pub mod error;
pub mod export;
pub mod pool;
pub mod renderer;

pub use buffer::FrameImage;
pub use colormap::{color_of, shade, ColorScheme, Rgb, ALL_SCHEMES};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use pool::{GeometryPool, QuadId, VertexId};
pub use renderer::{quad_capacity_for, render_frame, FrameStats, RenderProgress};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
