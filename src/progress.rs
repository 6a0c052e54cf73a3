/// Scroll-position snapshot from the host, mapped to the renderer's
/// progress value. The host owns mutation; the renderer only reads the
/// resulting `[0,1]` scalar.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub document_height: f64,
}

impl ScrollMetrics {
    /// Normalized scroll position in [0,1].
    ///
    /// A document no taller than the viewport has nowhere to scroll; that
    /// maps to full progress so the walk is complete rather than blank.
    pub fn progress(self) -> f64 {
        let max_scroll = self.document_height - self.viewport_height;
        if !max_scroll.is_finite() || max_scroll <= 0.0 {
            return 1.0;
        }
        let raw = self.scroll_y / max_scroll;
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }
}
