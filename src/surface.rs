use crate::{
    core::Viewport,
    error::{RadwalkError, RadwalkResult},
};

/// Lifecycle of the drawing surface. `Unattached` until the first usable
/// viewport arrives, then `Sized`/`Rendering` loop for the life of the
/// visualization; teardown is just dropping the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceState {
    Unattached,
    Sized,
    Rendering,
}

/// Resolved geometry for one frame, in both logical and backing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    /// Logical (square) edge length: `min(vw, vh) * scale_factor`.
    pub logical_size: f64,
    /// Backing pixel edge length: `round(logical_size * dpr)`.
    pub backing_px: u16,
    /// Device pixel ratio actually applied (invalid inputs collapse to 1).
    pub dpr: f64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceStats {
    /// Backing buffer (re)allocations, including the first.
    pub allocations: u64,
    /// Frames that reused the existing allocation.
    pub reuses: u64,
}

/// Keeps the backing pixel buffer synchronized with viewport size and device
/// pixel density. The buffer is reallocated only when the computed backing
/// size differs from the current allocation.
pub struct SurfaceManager {
    scale_factor: f64,
    state: SurfaceState,
    pixmap: Option<vello_cpu::Pixmap>,
    backing_px: u16,
    stats: SurfaceStats,
}

impl SurfaceManager {
    pub const DEFAULT_SCALE_FACTOR: f64 = 0.8;

    pub fn new(scale_factor: f64) -> RadwalkResult<Self> {
        if !(0.8..=0.9).contains(&scale_factor) {
            return Err(RadwalkError::validation(format!(
                "scale_factor must be in [0.8, 0.9], got {scale_factor}"
            )));
        }
        Ok(Self {
            scale_factor,
            state: SurfaceState::Unattached,
            pixmap: None,
            backing_px: 0,
            stats: SurfaceStats::default(),
        })
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    /// Size (or resize) the surface for `viewport`. Returns `None` when the
    /// viewport is not drawable; the frame is skipped, never an error.
    pub fn ensure(&mut self, viewport: Viewport, dpr: f64) -> Option<SurfaceGeometry> {
        if !viewport.is_drawable() {
            return None;
        }

        let dpr = normalize_dpr(dpr);
        let logical_size = viewport.min_edge() * self.scale_factor;
        let backing = (logical_size * dpr).round();
        if backing < 1.0 {
            return None;
        }
        // Pixmap edges are u16; saturate rather than fail on absurd inputs.
        let backing_px = if backing >= f64::from(u16::MAX) {
            u16::MAX
        } else {
            backing as u16
        };

        if self.pixmap.is_none() || self.backing_px != backing_px {
            tracing::debug!(backing_px, logical_size, "reallocating surface");
            self.pixmap = Some(vello_cpu::Pixmap::new(backing_px, backing_px));
            self.backing_px = backing_px;
            self.stats.allocations += 1;
        } else {
            self.stats.reuses += 1;
        }

        if self.state == SurfaceState::Unattached {
            self.state = SurfaceState::Sized;
        }

        Some(SurfaceGeometry {
            logical_size,
            backing_px,
            dpr,
        })
    }

    pub fn pixmap_mut(&mut self) -> Option<&mut vello_cpu::Pixmap> {
        self.pixmap.as_mut()
    }

    /// Record a completed redraw (`Sized`/`Rendering` self-loop).
    pub fn note_rendered(&mut self) {
        if self.state != SurfaceState::Unattached {
            self.state = SurfaceState::Rendering;
        }
    }
}

fn normalize_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_scale_factor_outside_band() {
        assert!(SurfaceManager::new(0.5).is_err());
        assert!(SurfaceManager::new(0.95).is_err());
        assert!(SurfaceManager::new(SurfaceManager::DEFAULT_SCALE_FACTOR).is_ok());
    }

    #[test]
    fn reallocates_only_on_size_change() {
        let mut mgr = SurfaceManager::new(0.8).unwrap();
        let a = Viewport::new(1000.0, 800.0);
        let b = Viewport::new(500.0, 800.0);

        assert!(mgr.ensure(a, 1.0).is_some());
        assert!(mgr.ensure(a, 1.0).is_some());
        assert!(mgr.ensure(b, 1.0).is_some());

        let stats = mgr.stats();
        assert_eq!(stats.allocations, 2);
        assert_eq!(stats.reuses, 1);
    }

    #[test]
    fn dpr_scales_backing_store() {
        let mut mgr = SurfaceManager::new(0.8).unwrap();
        let geom = mgr.ensure(Viewport::new(1000.0, 800.0), 2.0).unwrap();
        assert_eq!(geom.logical_size, 640.0);
        assert_eq!(geom.backing_px, 1280);
    }

    #[test]
    fn invalid_dpr_collapses_to_one() {
        let mut mgr = SurfaceManager::new(0.8).unwrap();
        let geom = mgr.ensure(Viewport::new(1000.0, 800.0), f64::NAN).unwrap();
        assert_eq!(geom.dpr, 1.0);
        assert_eq!(geom.backing_px, 640);
    }

    #[test]
    fn undrawable_viewport_skips() {
        let mut mgr = SurfaceManager::new(0.8).unwrap();
        assert!(mgr.ensure(Viewport::new(0.0, 800.0), 1.0).is_none());
        assert_eq!(mgr.state(), SurfaceState::Unattached);
        assert_eq!(mgr.stats().allocations, 0);
    }

    #[test]
    fn state_machine_progresses() {
        let mut mgr = SurfaceManager::new(0.8).unwrap();
        assert_eq!(mgr.state(), SurfaceState::Unattached);
        mgr.ensure(Viewport::new(640.0, 480.0), 1.0).unwrap();
        assert_eq!(mgr.state(), SurfaceState::Sized);
        mgr.note_rendered();
        assert_eq!(mgr.state(), SurfaceState::Rendering);
        mgr.note_rendered();
        assert_eq!(mgr.state(), SurfaceState::Rendering);
    }
}
