use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use mandelviz_core::{evaluate, EscapeParams, GridSize, PixelSample, Viewport};

use crate::buffer::FrameImage;
use crate::colormap::{shade, ColorScheme};
use crate::pool::{GeometryPool, VertexId};

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Column-granular progress counters for the loading indicator.
///
/// A render runs to completion once started (there is no cancellation), but
/// the counters are atomics so a host polling from its event loop can show a
/// progress bar while the frame builds.
#[derive(Debug, Default)]
pub struct RenderProgress {
    done: AtomicUsize,
    total: AtomicUsize,
}

impl RenderProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new frame of `total` work units (columns).
    pub fn reset(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
    }

    pub fn inc(&self) {
        self.done.fetch_add(1, Ordering::Relaxed);
    }

    /// Current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.done.load(Ordering::Relaxed),
            self.total.load(Ordering::Relaxed),
        )
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Summary of a completed frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub vertices_used: usize,
    pub quads_used: usize,
    pub interior_pixels: usize,
    pub elapsed: Duration,
}

/// Quad slots the pool must hold for `grid`: `(height − 1) · width`,
/// slightly more than the `(width − 1) · (height − 1)` cells actually wired.
pub fn quad_capacity_for(grid: GridSize) -> usize {
    (grid.height as usize - 1) * grid.width as usize
}

// ---------------------------------------------------------------------------
// Frame renderer
// ---------------------------------------------------------------------------

/// Render one full frame into the pool mesh and the flat frame image.
///
/// The walk is column-major: outer loop over `px`, inner over `py`. Each
/// pixel is classified by the escape engine, shaded, written to `image`, and
/// given a pooled vertex at `(px − w/2, py − h/2)`. From the second column
/// on, each row pair is closed into a quad whose corners reference the
/// current and previous column's vertices, producing a seamless mesh of unit
/// cells.
///
/// The caller must `recycle_all` and `ensure_capacity` first; an exhausted
/// pool mid-frame is a controller bug and comes back as `PoolExhausted`.
pub fn render_frame(
    viewport: &Viewport,
    grid: GridSize,
    params: EscapeParams,
    scheme: ColorScheme,
    pool: &mut GeometryPool,
    image: &mut FrameImage,
    progress: &RenderProgress,
) -> crate::Result<FrameStats> {
    let start = Instant::now();
    progress.reset(grid.width as usize);
    debug!(
        width = grid.width,
        height = grid.height,
        depth = params.max_iterations(),
        scheme = scheme.name(),
        "Starting frame render"
    );

    let half_w = grid.width as f64 / 2.0;
    let half_h = grid.height as f64 / 2.0;

    let mut interior_pixels = 0usize;
    let mut quads_used = 0usize;

    // Double column buffers for quad wiring.
    let mut previous_col: Vec<VertexId> = Vec::with_capacity(grid.height as usize);
    let mut current_col: Vec<VertexId> = Vec::with_capacity(grid.height as usize);

    for px in 0..grid.width {
        current_col.clear();
        for py in 0..grid.height {
            let sample = evaluate(viewport.pixel_to_complex(px, py, grid), params);
            if sample == PixelSample::Interior {
                interior_pixels += 1;
            }
            let color = shade(sample, params, scheme);
            image.set(px, py, color)?;

            let vid = pool.acquire_vertex()?;
            let vertex = pool.vertex_mut(vid);
            vertex.pos = [px as f64 - half_w, py as f64 - half_h];
            vertex.color = color;
            current_col.push(vid);

            // Close the cell between this column and the previous one.
            if px > 0 && py > 0 {
                let qid = pool.acquire_quad()?;
                let py = py as usize;
                let quad = pool.quad_mut(qid);
                quad.corners = [
                    current_col[py],
                    current_col[py - 1],
                    previous_col[py - 1],
                    previous_col[py],
                ];
                quad.visible = true;
                quads_used += 1;
            }
        }
        std::mem::swap(&mut previous_col, &mut current_col);
        progress.inc();
    }

    let stats = FrameStats {
        vertices_used: grid.pixel_count(),
        quads_used,
        interior_pixels,
        elapsed: start.elapsed(),
    };
    info!(
        elapsed_ms = stats.elapsed.as_millis(),
        vertices = stats.vertices_used,
        quads = stats.quads_used,
        interior = stats.interior_pixels,
        "Frame complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_once(grid: GridSize) -> (GeometryPool, FrameImage, FrameStats) {
        let mut pool = GeometryPool::new();
        pool.ensure_capacity(grid.pixel_count(), quad_capacity_for(grid));
        let mut image = FrameImage::new(grid);
        let progress = RenderProgress::new();
        let stats = render_frame(
            &Viewport::initial(),
            grid,
            EscapeParams::new(64).unwrap(),
            ColorScheme::Default,
            &mut pool,
            &mut image,
            &progress,
        )
        .unwrap();
        (pool, image, stats)
    }

    #[test]
    fn frame_uses_every_pixel_vertex() {
        let grid = GridSize::new(30, 45).unwrap();
        let (pool, _, stats) = render_once(grid);
        assert_eq!(stats.vertices_used, 30 * 45);
        assert_eq!(pool.active_vertex_count(), 30 * 45);
    }

    #[test]
    fn frame_wires_interior_cells_only() {
        let grid = GridSize::new(30, 45).unwrap();
        let (pool, _, stats) = render_once(grid);
        assert_eq!(stats.quads_used, 29 * 44);
        assert_eq!(pool.active_quad_count(), 29 * 44);
    }

    #[test]
    fn quads_reference_adjacent_columns() {
        let grid = GridSize::new(4, 4).unwrap();
        let (pool, _, _) = render_once(grid);
        for &qid in pool.active_quads() {
            let quad = pool.quad(qid);
            assert!(quad.visible);
            let xs: Vec<f64> = quad.corners.iter().map(|&v| pool.vertex(v).pos[0]).collect();
            let ys: Vec<f64> = quad.corners.iter().map(|&v| pool.vertex(v).pos[1]).collect();
            // Corner order: (px,py), (px,py-1), (px-1,py-1), (px-1,py).
            assert_eq!(xs[0], xs[1]);
            assert_eq!(xs[2], xs[3]);
            assert_eq!(xs[0] - xs[2], 1.0, "columns one pixel apart");
            assert_eq!(ys[0], ys[3]);
            assert_eq!(ys[1], ys[2]);
            assert_eq!(ys[0] - ys[1], 1.0, "rows one pixel apart");
        }
    }

    #[test]
    fn vertex_positions_are_centered() {
        let grid = GridSize::new(4, 4).unwrap();
        let (pool, _, _) = render_once(grid);
        // First acquired vertex is pixel (0, 0) → (-w/2, -h/2).
        let first = pool
            .active_quads()
            .first()
            .map(|&q| pool.quad(q).corners[2])
            .unwrap();
        assert_eq!(pool.vertex(first).pos, [-2.0, -2.0]);
    }

    #[test]
    fn interior_pixels_render_black() {
        let grid = GridSize::new(30, 45).unwrap();
        let (_, image, stats) = render_once(grid);
        assert!(stats.interior_pixels > 0, "home view contains the set");
        // Center pixel lies inside the set and must be exactly black.
        let center = image.get(grid.width / 2, grid.height / 2).unwrap();
        assert_eq!(center, [0, 0, 0, 255]);
    }

    #[test]
    fn progress_reaches_total() {
        let grid = GridSize::new(30, 45).unwrap();
        let mut pool = GeometryPool::new();
        pool.ensure_capacity(grid.pixel_count(), quad_capacity_for(grid));
        let mut image = FrameImage::new(grid);
        let progress = RenderProgress::new();
        render_frame(
            &Viewport::initial(),
            grid,
            EscapeParams::default(),
            ColorScheme::Viridis,
            &mut pool,
            &mut image,
            &progress,
        )
        .unwrap();
        assert_eq!(progress.progress(), (45, 45));
    }

    #[test]
    fn undersized_pool_surfaces_exhaustion() {
        let grid = GridSize::new(30, 45).unwrap();
        let mut pool = GeometryPool::new();
        pool.ensure_capacity(10, 10); // far too small
        let mut image = FrameImage::new(grid);
        let progress = RenderProgress::new();
        let result = render_frame(
            &Viewport::initial(),
            grid,
            EscapeParams::default(),
            ColorScheme::Default,
            &mut pool,
            &mut image,
            &progress,
        );
        assert!(matches!(
            result,
            Err(crate::RenderError::PoolExhausted { .. })
        ));
    }
}
