use mandelviz_core::{EscapeParams, PixelSample};

/// A linear RGB triple.
///
/// Components are deliberately *not* clamped to `[0, 1]`: the colormap
/// formulas below overshoot on purpose for contrast, and the display layer
/// (or [`Rgb::to_srgb8`]) clamps at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Clamp each component to `[0, 1]` and quantize to 8-bit.
    pub fn to_srgb8(self) -> [u8; 3] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }
}

/// The five selectable coloring formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Default,
    Inferno,
    Viridis,
    Spectral,
    Plasma,
}

/// All schemes in dropdown order.
pub const ALL_SCHEMES: [ColorScheme; 5] = [
    ColorScheme::Default,
    ColorScheme::Inferno,
    ColorScheme::Viridis,
    ColorScheme::Spectral,
    ColorScheme::Plasma,
];

impl ColorScheme {
    /// Resolve a scheme by its dropdown name. Unknown names fall back to
    /// `Default` rather than erroring.
    pub fn from_name(name: &str) -> Self {
        match name {
            "inferno" => Self::Inferno,
            "viridis" => Self::Viridis,
            "spectral" => Self::Spectral,
            "plasma" => Self::Plasma,
            _ => Self::Default,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Inferno => "inferno",
            Self::Viridis => "viridis",
            Self::Spectral => "spectral",
            Self::Plasma => "plasma",
        }
    }
}

/// Map a normalized 3-component value to a color.
///
/// Pure and total: any finite input produces a color, and the output is not
/// clamped. The formulas are fixed; rendered images are expected to match
/// them exactly, so do not "simplify" the arithmetic.
pub fn color_of(v: [f64; 3], scheme: ColorScheme) -> Rgb {
    let [x, y, z] = v;
    match scheme {
        // Blue-black to orange-black gradient with a white-hot center.
        ColorScheme::Default => Rgb::new(
            (x + 0.9).sin().powi(30),
            0.9 * (y + 0.97).sin().powi(80),
            1.0 - ((z + 0.5).powi(6) - 0.8).powi(2),
        ),
        // Deep warm red with yellow highlights.
        ColorScheme::Inferno => Rgb::new(x.sqrt(), y * y, 0.2 - 5.0 * (z - 0.2).powi(2)),
        // Cool gradient, greenish mids and bluish lows.
        ColorScheme::Viridis => Rgb::new(
            (x + 0.5).sin().powi(16),
            y,
            0.6 - 3.0 * (z - 0.38).powi(2),
        ),
        // High-frequency sinusoids, vivid at large depths.
        ColorScheme::Spectral => Rgb::new(
            (100.0 * x + 1.0).sin().abs(),
            (100.0 * y + 2.0).sin(),
            (100.0 * z + 3.0).sin(),
        ),
        // Bright purple-yellow transitions.
        ColorScheme::Plasma => Rgb::new(
            x.sin(),
            y.powi(10) + y.powf(1.0 / 6.0) - 0.8,
            1.0 - z,
        ),
    }
}

/// Color a classified pixel: interior points are pure black in every scheme;
/// escaped points feed `n / max_iter` into all three colormap components.
pub fn shade(sample: PixelSample, params: EscapeParams, scheme: ColorScheme) -> Rgb {
    match sample.normalized(params) {
        None => Rgb::BLACK,
        Some(t) => color_of([t, t, t], scheme),
    }
}
