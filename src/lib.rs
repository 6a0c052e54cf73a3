#![forbid(unsafe_code)]

pub mod core;
pub mod ease;
pub mod error;
pub mod explain;
pub mod glyph;
pub mod progress;
pub mod render;
pub mod style;
pub mod surface;
pub mod walk;

pub use core::{Rgba8, Viewport};
pub use ease::Ease;
pub use error::{RadwalkError, RadwalkResult};
pub use explain::{ExplainBackend, Explainer};
pub use progress::ScrollMetrics;
pub use render::{FrameRGBA, Renderer, Scene};
pub use style::{ChordOpacity, FrameStyle};
pub use surface::{SurfaceManager, SurfaceState};
pub use walk::WalkConfig;
