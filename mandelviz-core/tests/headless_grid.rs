use mandelviz_core::{sample_pixel, EscapeParams, GridSize, PixelSample, Viewport};

/// Classify every pixel of a viewport into a flat Vec.
fn classify_grid(viewport: &Viewport, grid: GridSize, params: EscapeParams) -> Vec<PixelSample> {
    let mut results = Vec::with_capacity(grid.pixel_count());
    for px in 0..grid.width {
        for py in 0..grid.height {
            results.push(sample_pixel(px, py, grid, viewport, params));
        }
    }
    results
}

#[test]
fn home_view_contains_both_classes() {
    let grid = GridSize::new(30, 45).unwrap();
    let params = EscapeParams::new(100).unwrap();
    let results = classify_grid(&Viewport::initial(), grid, params);

    assert_eq!(results.len(), 30 * 45);

    let escaped = results
        .iter()
        .filter(|s| matches!(s, PixelSample::Escaped { .. }))
        .count();
    let interior = results
        .iter()
        .filter(|s| matches!(s, PixelSample::Interior))
        .count();

    assert!(escaped > 0, "should have some escaped points");
    assert!(interior > 0, "should have some interior points");
    assert_eq!(escaped + interior, 30 * 45);
}

#[test]
fn home_view_center_pixel_is_interior() {
    // The pixel at the grid midpoint maps to c close to -0.778, inside the
    // period-2 bulb, so it must survive the full depth.
    let grid = GridSize::new(30, 45).unwrap();
    let params = EscapeParams::new(100).unwrap();
    let vp = Viewport::initial();

    let sample = sample_pixel(grid.width / 2, grid.height / 2, grid, &vp, params);
    assert_eq!(sample, PixelSample::Interior);
}

#[test]
fn grid_classification_is_deterministic() {
    let grid = GridSize::new(60, 90).unwrap();
    let params = EscapeParams::default();
    let vp = Viewport::initial();

    let run1 = classify_grid(&vp, grid, params);
    let run2 = classify_grid(&vp, grid, params);
    assert_eq!(run1, run2, "identical renders must produce identical results");
}
