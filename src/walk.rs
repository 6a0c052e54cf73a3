use crate::{
    core::{BezPath, Point, clamp_progress},
    ease::Ease,
    error::{RadwalkError, RadwalkResult},
};

/// Geometry and iteration engine for the unit-radian walk.
///
/// Point `i` sits at angle `i` radians on the circle; the angle accumulates
/// as a raw integer and is never reduced mod 2π. The trig functions handle
/// periodicity, and skipping the explicit modulo avoids introducing rounding
/// seams between neighbouring iteration counts.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct WalkConfig {
    pub max_iterations: u32,
    pub ease: Ease,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1500,
            ease: Ease::Linear,
        }
    }
}

impl WalkConfig {
    pub fn validate(&self) -> RadwalkResult<()> {
        if self.max_iterations == 0 {
            return Err(RadwalkError::validation("max_iterations must be > 0"));
        }
        self.ease.validate()
    }

    /// Number of chords to draw at `progress`.
    ///
    /// `floor(ease(progress) * max_iterations)`, clamped defensively so that
    /// out-of-range or NaN progress can never produce a negative or runaway
    /// loop count.
    pub fn iteration_count(&self, progress: f64) -> u32 {
        let eased = self.ease.apply(clamp_progress(progress));
        let raw = (eased * f64::from(self.max_iterations)).floor();
        if raw <= 0.0 {
            0
        } else if raw >= f64::from(self.max_iterations) {
            self.max_iterations
        } else {
            raw as u32
        }
    }
}

/// Position on the circle after `i` unit-radian steps.
pub fn walk_point(center: Point, radius: f64, i: u32) -> Point {
    let angle = f64::from(i);
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Connected polyline through `Point(0) .. Point(n)`.
///
/// Empty when `n < 1`: a single point is not a chord.
pub fn chord_path(center: Point, radius: f64, n: u32) -> BezPath {
    let mut path = BezPath::new();
    if n < 1 {
        return path;
    }
    path.move_to(walk_point(center, radius, 0));
    for i in 1..=n {
        path.line_to(walk_point(center, radius, i));
    }
    path
}

/// The most recently added chord, `Point(n-1) -> Point(n)`.
pub fn head_chord(center: Point, radius: f64, n: u32) -> Option<BezPath> {
    if n < 1 {
        return None;
    }
    let mut path = BezPath::new();
    path.move_to(walk_point(center, radius, n - 1));
    path.line_to(walk_point(center, radius, n));
    Some(path)
}
