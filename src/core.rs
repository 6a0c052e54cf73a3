use crate::error::{RadwalkError, RadwalkResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Vec2};

/// Logical host viewport, in CSS-pixel-like units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shorter viewport edge, the basis for the square drawing surface.
    pub fn min_edge(self) -> f64 {
        self.width.min(self.height)
    }

    /// A viewport is drawable once both edges are finite and positive.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Straight-alpha RGBA8 used by style configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
}

/// Clamp a progress value into [0,1]; NaN collapses to 0.
pub fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}

pub fn ensure_unit_fraction(name: &str, v: f64) -> RadwalkResult<()> {
    if !v.is_finite() || !(0.0..=1.0).contains(&v) {
        return Err(RadwalkError::validation(format!(
            "{name} must be in [0,1], got {v}"
        )));
    }
    Ok(())
}
