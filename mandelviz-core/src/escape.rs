use crate::complex::Complex;
use crate::error::CoreError;
use crate::grid::GridSize;
use crate::viewport::Viewport;

/// Upper bound on iteration depth accepted from the UI.
pub const MAX_DEPTH: u32 = 1000;

/// Validated iteration depth for the escape-time loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeParams {
    max_iterations: u32,
}

impl EscapeParams {
    pub const DEFAULT_DEPTH: u32 = 100;

    /// Depth must be in `[1, 1000]`; anything else is a user-input error
    /// that leaves the current render state untouched.
    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 || max_iterations > MAX_DEPTH {
            return Err(CoreError::InvalidDepth(max_iterations));
        }
        Ok(Self { max_iterations })
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl Default for EscapeParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_DEPTH,
        }
    }
}

/// The classification of a single pixel, produced by the engine and consumed
/// immediately by the colormap. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelSample {
    /// The orbit exceeded `|z| = 2` after `iterations` steps (always ≥ 1,
    /// since `z₀ = 0` never escapes before the first step).
    Escaped { iterations: u32 },

    /// The orbit survived `max_iterations` steps. Rendered pure black
    /// regardless of colormap.
    Interior,
}

impl PixelSample {
    /// Iteration fraction `n / max_iter` in `(0, 1]`, or `None` for interior
    /// points.
    #[inline]
    pub fn normalized(&self, params: EscapeParams) -> Option<f64> {
        match self {
            Self::Escaped { iterations } => {
                Some(*iterations as f64 / params.max_iterations() as f64)
            }
            Self::Interior => None,
        }
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
///
/// Closed-form check that skips iterating a large share of visible points at
/// the home view.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

/// Escape-time iteration: `z ← z² + c` from `z₀ = 0`.
///
/// The loop runs while `|z|² ≤ 4` and `n < max_iter`; reaching `max_iter`
/// classifies the point interior even if the final iterate also escaped,
/// so escaped samples always satisfy `1 ≤ n < max_iter`.
///
/// At extreme zoom the `f64` spacing between adjacent pixels underflows and
/// the output degenerates into uniform blocks. That is an accepted limit of
/// the arithmetic, not an error condition.
pub fn evaluate(c: Complex, params: EscapeParams) -> PixelSample {
    // Fast rejection: points provably inside the set need no iteration.
    if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
        return PixelSample::Interior;
    }

    let max_iter = params.max_iterations();
    let mut z = Complex::ZERO;
    let mut n = 0;
    while z.norm_sq() <= 4.0 && n < max_iter {
        z = z * z + c;
        n += 1;
    }

    if n == max_iter {
        PixelSample::Interior
    } else {
        PixelSample::Escaped { iterations: n }
    }
}

/// Map a pixel through the viewport and classify it in one step.
#[inline]
pub fn sample_pixel(
    px: u32,
    py: u32,
    grid: GridSize,
    viewport: &Viewport,
    params: EscapeParams,
) -> PixelSample {
    evaluate(viewport.pixel_to_complex(px, py, grid), params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_interior() {
        assert_eq!(evaluate(Complex::ZERO, EscapeParams::default()), PixelSample::Interior);
    }

    #[test]
    fn cardioid_point_is_interior() {
        // c = -0.75 sits inside the main cardioid.
        assert_eq!(
            evaluate(Complex::new(-0.75, 0.0), EscapeParams::default()),
            PixelSample::Interior
        );
    }

    #[test]
    fn period2_bulb_is_interior() {
        assert_eq!(
            evaluate(Complex::new(-1.0, 0.0), EscapeParams::default()),
            PixelSample::Interior
        );
    }

    #[test]
    fn far_point_escapes_after_one_step() {
        // z₁ = c is already outside |z| = 2, but the loop applies one step
        // before noticing, so the count is 1.
        match evaluate(Complex::new(10.0, 0.0), EscapeParams::default()) {
            PixelSample::Escaped { iterations } => assert_eq!(iterations, 1),
            PixelSample::Interior => panic!("far point must escape"),
        }
    }

    #[test]
    fn known_escape_count() {
        // c = 1: z₁ = 1, z₂ = 2 (|z|² = 4, still ≤ 4), z₃ = 5 → exits with n = 3.
        match evaluate(Complex::new(1.0, 0.0), EscapeParams::default()) {
            PixelSample::Escaped { iterations } => assert_eq!(iterations, 3),
            PixelSample::Interior => panic!("c = 1 must escape"),
        }
    }

    #[test]
    fn escape_count_bounded_by_depth() {
        let params = EscapeParams::new(50).unwrap();
        let grid = GridSize::new(30, 45).unwrap();
        let vp = Viewport::initial();
        for py in 0..grid.height {
            for px in 0..grid.width {
                if let PixelSample::Escaped { iterations } = sample_pixel(px, py, grid, &vp, params)
                {
                    assert!(iterations >= 1 && iterations < 50);
                }
            }
        }
    }

    #[test]
    fn normalized_in_unit_interval() {
        let params = EscapeParams::new(200).unwrap();
        let sample = PixelSample::Escaped { iterations: 37 };
        let t = sample.normalized(params).unwrap();
        assert!(t > 0.0 && t <= 1.0);
        assert!((t - 37.0 / 200.0).abs() < 1e-12);
        assert_eq!(PixelSample::Interior.normalized(params), None);
    }

    #[test]
    fn depth_validation() {
        assert!(EscapeParams::new(0).is_err());
        assert!(EscapeParams::new(1001).is_err());
        assert!(EscapeParams::new(1).is_ok());
        assert!(EscapeParams::new(1000).is_ok());
    }

    #[test]
    fn deterministic_results() {
        let params = EscapeParams::default();
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&c| evaluate(c, params)).collect();
        let run2: Vec<_> = points.iter().map(|&c| evaluate(c, params)).collect();
        assert_eq!(run1, run2);
    }
}
