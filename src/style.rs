use crate::{
    core::{Rgba8, ensure_unit_fraction},
    error::{RadwalkError, RadwalkResult},
};

/// How chord stroke alpha responds to chord density.
///
/// `Fixed` relies on accumulation of a constant low alpha; `Adaptive` thins
/// the stroke as the walk fills in, but never below `floor`, so the path
/// stays legible at full density instead of whiting out.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum ChordOpacity {
    Fixed { alpha: f64 },
    Adaptive { base: f64, floor: f64 },
}

impl ChordOpacity {
    /// Effective alpha for `fill = iteration_count / max_iterations`.
    pub fn alpha_for(self, fill: f64) -> f64 {
        let fill = fill.clamp(0.0, 1.0);
        match self {
            Self::Fixed { alpha } => alpha,
            Self::Adaptive { base, floor } => (base * (1.0 - fill)).max(floor),
        }
    }

    pub fn validate(self) -> RadwalkResult<()> {
        match self {
            Self::Fixed { alpha } => ensure_unit_fraction("chord alpha", alpha),
            Self::Adaptive { base, floor } => {
                ensure_unit_fraction("chord base alpha", base)?;
                ensure_unit_fraction("chord floor alpha", floor)?;
                if floor <= 0.0 {
                    return Err(RadwalkError::validation(
                        "chord floor alpha must be > 0 so the path stays visible",
                    ));
                }
                if floor > base {
                    return Err(RadwalkError::validation(
                        "chord floor alpha must be <= base alpha",
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Full compositing policy for one frame.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FrameStyle {
    /// Frame clear color (the frame is always drawn from blank).
    pub background: Rgba8,
    /// Faint reference circle, drawn regardless of iteration count.
    pub circle_color: Rgba8,
    pub circle_width: f64,
    /// Chord polyline.
    pub chord_color: Rgba8,
    pub chord_width: f64,
    pub chord_opacity: ChordOpacity,
    /// Most recent chord, emphasized over the body of the path.
    pub head_chord_width: f64,
    pub head_chord_alpha: f64,
    /// Head marker disc.
    pub head_radius: f64,
    pub head_glow_radius: f64,
    pub head_glow_alpha: f64,
    /// Center glyph fade: opacity = max(0, 1 - progress * glyph_fade_rate).
    pub glyph_color: Rgba8,
    pub glyph_fade_rate: f64,
    /// Padding between circle and surface edge, in logical units.
    pub padding: f64,
}

impl Default for FrameStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::BLACK,
            circle_color: Rgba8::new(255, 255, 255, 77),
            circle_width: 1.0,
            chord_color: Rgba8::WHITE,
            chord_width: 0.5,
            chord_opacity: ChordOpacity::Fixed { alpha: 0.15 },
            head_chord_width: 1.0,
            head_chord_alpha: 0.9,
            head_radius: 3.0,
            head_glow_radius: 7.0,
            head_glow_alpha: 0.25,
            glyph_color: Rgba8::new(255, 255, 255, 204),
            glyph_fade_rate: 3.0,
            padding: 20.0,
        }
    }
}

impl FrameStyle {
    pub fn validate(&self) -> RadwalkResult<()> {
        for (name, width) in [
            ("circle_width", self.circle_width),
            ("chord_width", self.chord_width),
            ("head_chord_width", self.head_chord_width),
            ("head_radius", self.head_radius),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(RadwalkError::validation(format!(
                    "{name} must be finite and > 0, got {width}"
                )));
            }
        }
        if !self.head_glow_radius.is_finite() || self.head_glow_radius < self.head_radius {
            return Err(RadwalkError::validation(
                "head_glow_radius must be >= head_radius",
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(RadwalkError::validation("padding must be >= 0"));
        }
        if !self.glyph_fade_rate.is_finite() || self.glyph_fade_rate <= 0.0 {
            return Err(RadwalkError::validation("glyph_fade_rate must be > 0"));
        }
        ensure_unit_fraction("head_chord_alpha", self.head_chord_alpha)?;
        ensure_unit_fraction("head_glow_alpha", self.head_glow_alpha)?;
        self.chord_opacity.validate()
    }

    /// Glyph opacity at `progress`; fully transparent past `1/fade_rate`.
    pub fn glyph_alpha(&self, progress: f64) -> f64 {
        (1.0 - progress * self.glyph_fade_rate).max(0.0)
    }
}
