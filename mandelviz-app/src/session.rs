//! The view controller: owns all mutable render state and funnels every
//! user action through one commit path.

use std::path::Path;

use tracing::{debug, info, warn};

use mandelviz_core::{EscapeParams, GridSize, PixelBox, Viewport};
use mandelviz_render::{
    export_png, quad_capacity_for, render_frame, ColorScheme, ExportMetadata, FrameImage,
    FrameStats, GeometryPool, RenderProgress,
};

use crate::error::AppError;
use crate::history::ViewHistory;
use crate::input;
use crate::preferences::{AppPreferences, LastView};

/// History navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Back,
    Forward,
}

/// Re-validate a deserialized view snapshot.
///
/// Serde fills the viewport and grid fields directly, bypassing their
/// constructors, so a hand-edited preferences file can hold inverted bounds
/// or a zero-sized grid. Anything that fails re-validation is dropped and
/// startup falls back to the defaults, same as any other unreadable
/// preference.
fn validate_snapshot(last: &LastView) -> Option<(Viewport, u32, GridSize, &str)> {
    let viewport = Viewport::new(
        last.bounds.x_min,
        last.bounds.x_max,
        last.bounds.y_min,
        last.bounds.y_max,
    );
    let grid = GridSize::new(last.grid.height, last.grid.width);
    match (viewport, grid) {
        (Ok(viewport), Ok(grid)) => {
            Some((viewport, last.max_iterations, grid, last.colormap.as_str()))
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!("Ignoring saved view: {e}");
            None
        }
    }
}

/// One interactive viewing session.
///
/// All state lives here; entry points are the only way to mutate it. Every
/// committed change funnels through [`apply`](Self::apply): mark busy,
/// recycle the pool, commit parameters, record history when the change is a
/// zoom, grow the pool if needed, render, clear busy. Entry points called
/// while a render is in flight are silent no-ops so a half-built frame can
/// never be observed.
pub struct Session {
    viewport: Viewport,
    params: EscapeParams,
    grid: GridSize,
    scheme: ColorScheme,
    history: ViewHistory,
    pool: GeometryPool,
    image: FrameImage,
    progress: RenderProgress,
    busy: bool,
    last_stats: Option<FrameStats>,
}

impl Session {
    /// Build a session from preferences and render the first frame.
    ///
    /// The restored snapshot wins when `restore_last_view` is set; otherwise
    /// the whole-set home view with the preference defaults.
    pub fn new(prefs: &AppPreferences) -> Result<Self, AppError> {
        let restored = prefs
            .restore_last_view
            .then(|| prefs.last_view.as_ref())
            .flatten()
            .and_then(validate_snapshot);

        let (viewport, depth, grid, scheme_name) = match restored {
            Some((viewport, depth, grid, scheme_name)) => {
                info!("Restoring last view: [{viewport}]");
                (viewport, depth, grid, scheme_name)
            }
            None => (
                Viewport::initial(),
                prefs.default_max_iterations,
                prefs.default_grid(),
                prefs.default_colormap.as_str(),
            ),
        };

        let params = EscapeParams::new(depth).unwrap_or_else(|e| {
            warn!("Ignoring configured depth: {e}");
            EscapeParams::default()
        });

        let mut session = Self {
            viewport,
            params,
            grid,
            scheme: ColorScheme::from_name(scheme_name),
            history: ViewHistory::new(viewport),
            pool: GeometryPool::new(),
            image: FrameImage::new(grid),
            progress: RenderProgress::new(),
            busy: false,
            last_stats: None,
        };
        session.apply(viewport, false)?;
        Ok(session)
    }

    // -- entry points -------------------------------------------------------

    /// Zoom to a finished box selection (centered pixel space).
    ///
    /// Degenerate boxes fail viewport validation and are dropped without
    /// touching state or history.
    pub fn select_region(&mut self, sel: PixelBox) -> Result<(), AppError> {
        if self.reject_while_busy("select_region") {
            return Ok(());
        }
        let target = match self.viewport.from_pixel_box(sel, self.grid) {
            Ok(vp) => vp,
            Err(e) => {
                debug!("Dropping degenerate selection: {e}");
                return Ok(());
            }
        };
        self.apply(target, true)
    }

    /// Commit a user-edited bounds string as a new view.
    ///
    /// Rejected text leaves the session unchanged; the caller shows the
    /// error and keeps the field editable.
    pub fn set_bounds_text(&mut self, text: &str) -> Result<(), AppError> {
        if self.reject_while_busy("set_bounds_text") {
            return Ok(());
        }
        let target = input::parse_bounds(text)?;
        self.apply(target, true)
    }

    /// Commit a user-edited depth string and re-render the current view.
    pub fn set_depth(&mut self, text: &str) -> Result<(), AppError> {
        if self.reject_while_busy("set_depth") {
            return Ok(());
        }
        let depth = input::parse_depth(text)?;
        self.params = EscapeParams::new(depth)?;
        self.apply(self.viewport, false)
    }

    /// Switch the grid resolution and re-render the current view.
    pub fn set_grid(&mut self, grid: GridSize) -> Result<(), AppError> {
        if self.reject_while_busy("set_grid") {
            return Ok(());
        }
        self.grid = grid;
        self.apply(self.viewport, false)
    }

    /// Switch colormaps and re-render the current view. Unknown names fall
    /// back to the default scheme.
    pub fn set_scheme(&mut self, name: &str) -> Result<(), AppError> {
        if self.reject_while_busy("set_scheme") {
            return Ok(());
        }
        self.scheme = ColorScheme::from_name(name);
        self.apply(self.viewport, false)
    }

    /// Step through the view history. Exhausted history is a silent no-op;
    /// a restored view renders with the current depth, grid, and colormap
    /// and is not recorded again.
    pub fn navigate(&mut self, direction: NavDirection) -> Result<(), AppError> {
        if self.reject_while_busy("navigate") {
            return Ok(());
        }
        let target = match direction {
            NavDirection::Back => self.history.undo(),
            NavDirection::Forward => self.history.redo(),
        };
        match target {
            Some(vp) => self.apply(vp, false),
            None => {
                debug!(?direction, "History exhausted");
                Ok(())
            }
        }
    }

    /// Export the current frame as a PNG with view metadata.
    pub fn export_png(&self, path: &Path) -> Result<(), AppError> {
        let metadata = ExportMetadata {
            bounds: self.viewport.to_string(),
            max_iterations: self.params.max_iterations(),
            colormap: self.scheme.name().to_string(),
            resolution: self.grid.label(),
        };
        export_png(&self.image, path, &metadata)?;
        info!("Exported {} to {}", self.grid.label(), path.display());
        Ok(())
    }

    // -- commit path --------------------------------------------------------

    /// The single commit path for every state change that triggers a render.
    fn apply(&mut self, viewport: Viewport, record: bool) -> Result<(), AppError> {
        self.busy = true;
        self.pool.recycle_all();
        self.viewport = viewport;
        if record {
            self.history.record(viewport);
        }
        self.pool
            .ensure_capacity(self.grid.pixel_count(), quad_capacity_for(self.grid));
        self.image.reset(self.grid);
        let result = render_frame(
            &self.viewport,
            self.grid,
            self.params,
            self.scheme,
            &mut self.pool,
            &mut self.image,
            &self.progress,
        );
        self.busy = false;
        self.last_stats = Some(result?);
        Ok(())
    }

    fn reject_while_busy(&self, op: &str) -> bool {
        if self.busy {
            debug!(op, "Ignoring interaction while rendering");
        }
        self.busy
    }

    // -- read surface -------------------------------------------------------

    /// The bounds readout string, `x_min, x_max, y_min, y_max`.
    pub fn bounds_text(&self) -> String {
        self.viewport.to_string()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn depth(&self) -> u32 {
        self.params.max_iterations()
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn image(&self) -> &FrameImage {
        &self.image
    }

    pub fn progress(&self) -> &RenderProgress {
        &self.progress
    }

    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Pool capacity as `(vertex_slots, quad_slots)`. Monotone over the
    /// session's lifetime.
    pub fn pool_capacity(&self) -> (usize, usize) {
        (self.pool.vertex_capacity(), self.pool.quad_capacity())
    }

    /// Snapshot for the restore-last-view preference.
    pub fn snapshot(&self) -> LastView {
        LastView {
            bounds: self.viewport,
            max_iterations: self.params.max_iterations(),
            grid: self.grid,
            colormap: self.scheme.name().to_string(),
        }
    }
}
