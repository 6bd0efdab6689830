pub mod app_dir;
pub mod error;
pub mod history;
pub mod input;
pub mod preferences;
pub mod selection;
pub mod session;

pub use error::AppError;
pub use history::ViewHistory;
pub use preferences::{AppPreferences, LastView};
pub use selection::{BoxSelection, PointerPos, SelectionOverlay};
pub use session::{NavDirection, Session};

/// Convenience result type for the app crate.
pub type Result<T> = std::result::Result<T, AppError>;
