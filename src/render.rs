use crate::{
    core::{BezPath, Circle, Point, Rgba8, Viewport, clamp_progress},
    error::RadwalkResult,
    glyph::pi_glyph,
    style::FrameStyle,
    surface::{SurfaceGeometry, SurfaceManager},
    walk::{WalkConfig, chord_path, head_chord, walk_point},
};

use kurbo::{Shape as _, Stroke, StrokeOpts};

/// Flattening tolerance for circles and stroke expansion, in logical units.
const PATH_TOLERANCE: f64 = 0.1;

/// One rendered frame: straight RGBA8 rows, premultiplied alpha.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Everything a frame is a function of, apart from `(progress, viewport, dpr)`.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub walk: WalkConfig,
    pub style: FrameStyle,
}

impl Scene {
    pub fn validate(&self) -> RadwalkResult<()> {
        self.walk.validate()?;
        self.style.validate()
    }
}

/// Renders complete frames of the chord walk. Every frame is drawn from a
/// cleared surface; there is no incremental patching, so progress jumps and
/// resizes can never ghost.
pub struct Renderer {
    scene: Scene,
    surfaces: SurfaceManager,
}

impl Renderer {
    pub fn new(scene: Scene) -> RadwalkResult<Self> {
        Self::with_scale_factor(scene, SurfaceManager::DEFAULT_SCALE_FACTOR)
    }

    pub fn with_scale_factor(scene: Scene, scale_factor: f64) -> RadwalkResult<Self> {
        scene.validate()?;
        Ok(Self {
            scene,
            surfaces: SurfaceManager::new(scale_factor)?,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surfaces(&self) -> &SurfaceManager {
        &self.surfaces
    }

    /// Render the frame for `progress` at the given viewport and pixel
    /// density. Returns `Ok(None)` when no surface can be sized (zero or
    /// invalid viewport): the frame is skipped, never an error.
    #[tracing::instrument(skip(self))]
    pub fn render_frame(
        &mut self,
        progress: f64,
        viewport: Viewport,
        dpr: f64,
    ) -> RadwalkResult<Option<FrameRGBA>> {
        let Some(geom) = self.surfaces.ensure(viewport, dpr) else {
            return Ok(None);
        };

        let progress = clamp_progress(progress);
        let ops = build_frame_ops(&self.scene, &geom, progress);

        let Some(pixmap) = self.surfaces.pixmap_mut() else {
            return Ok(None);
        };
        clear_pixmap(pixmap, premul_rgba8(self.scene.style.background));

        let mut ctx = vello_cpu::RenderContext::new(geom.backing_px, geom.backing_px);
        // Logical drawing units regardless of pixel density.
        ctx.set_transform(vello_cpu::kurbo::Affine::scale(geom.dpr));
        for op in &ops {
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                op.color.r, op.color.g, op.color.b, op.color.a,
            ));
            if op.opacity < 1.0 {
                ctx.push_opacity_layer(op.opacity);
            }
            ctx.fill_path(&bezpath_to_cpu(&op.path));
            if op.opacity < 1.0 {
                ctx.pop_layer();
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(pixmap);

        let data = pixmap.data_as_u8_slice().to_vec();
        self.surfaces.note_rendered();

        Ok(Some(FrameRGBA {
            width: u32::from(geom.backing_px),
            height: u32::from(geom.backing_px),
            data,
            premultiplied: true,
        }))
    }
}

struct FillOp {
    path: BezPath,
    color: Rgba8,
    opacity: f32,
}

impl FillOp {
    fn opaque(path: BezPath, color: Rgba8) -> Self {
        Self {
            path,
            color,
            opacity: 1.0,
        }
    }

    fn faded(path: BezPath, color: Rgba8, opacity: f64) -> Self {
        Self {
            path,
            color,
            opacity: opacity.clamp(0.0, 1.0) as f32,
        }
    }
}

/// Assemble the frame's fill list in paint order: glyph first, then the base
/// circle, the chord body, the highlighted head chord, and the head marker.
fn build_frame_ops(scene: &Scene, geom: &SurfaceGeometry, progress: f64) -> Vec<FillOp> {
    let walk = &scene.walk;
    let style = &scene.style;
    let size = geom.logical_size;
    let center = Point::new(size / 2.0, size / 2.0);
    let radius = size / 2.0 - style.padding;

    let mut ops = Vec::new();
    if radius <= 0.0 {
        return ops;
    }

    let glyph_alpha = style.glyph_alpha(progress);
    if glyph_alpha > 0.0 {
        ops.push(FillOp::faded(
            pi_glyph(center, radius),
            style.glyph_color,
            glyph_alpha,
        ));
    }

    // Faint reference circle, drawn at every iteration count.
    ops.push(FillOp::opaque(
        stroke_outline(
            &Circle::new(center, radius).to_path(PATH_TOLERANCE),
            style.circle_width,
        ),
        style.circle_color,
    ));

    let n = walk.iteration_count(progress);
    if n < 1 {
        return ops;
    }

    let fill = f64::from(n) / f64::from(walk.max_iterations);
    let chord_alpha = style.chord_opacity.alpha_for(fill);
    ops.push(FillOp::faded(
        stroke_outline(&chord_path(center, radius, n), style.chord_width),
        style.chord_color,
        chord_alpha,
    ));

    if let Some(head) = head_chord(center, radius, n) {
        ops.push(FillOp::faded(
            stroke_outline(&head, style.head_chord_width),
            style.chord_color,
            style.head_chord_alpha,
        ));
    }

    let head_pt = walk_point(center, radius, n);
    ops.push(FillOp::faded(
        Circle::new(head_pt, style.head_glow_radius).to_path(PATH_TOLERANCE),
        style.chord_color,
        style.head_glow_alpha,
    ));
    ops.push(FillOp::opaque(
        Circle::new(head_pt, style.head_radius).to_path(PATH_TOLERANCE),
        style.chord_color,
    ));

    ops
}

/// Expand a stroked path into a fillable outline. The raster backend is
/// fill-only, so stroking happens at the geometry level.
fn stroke_outline(path: &BezPath, width: f64) -> BezPath {
    kurbo::stroke(
        path.elements().iter().copied(),
        &Stroke::new(width),
        &StrokeOpts::default(),
        PATH_TOLERANCE,
    )
}

fn premul_rgba8(c: Rgba8) -> [u8; 4] {
    let af = u16::from(c.a) + 1;
    let premul = |v: u8| -> u8 { ((u16::from(v) * af) >> 8) as u8 };
    [premul(c.r), premul(c.g), premul(c.b), c.a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
        vello_cpu::kurbo::Point::new(p.x, p.y)
    }

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Ease;

    fn test_scene() -> Scene {
        Scene {
            walk: WalkConfig {
                max_iterations: 200,
                ease: Ease::Linear,
            },
            style: FrameStyle::default(),
        }
    }

    fn geom(size: f64) -> SurfaceGeometry {
        SurfaceGeometry {
            logical_size: size,
            backing_px: size as u16,
            dpr: 1.0,
        }
    }

    #[test]
    fn zero_progress_draws_glyph_and_circle_only() {
        let scene = test_scene();
        let ops = build_frame_ops(&scene, &geom(200.0), 0.0);
        // Glyph + base circle, no chords, no head.
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn full_progress_draws_chords_and_head() {
        let scene = test_scene();
        let ops = build_frame_ops(&scene, &geom(200.0), 1.0);
        // Circle, chord body, head chord, glow, head disc; glyph faded out.
        assert_eq!(ops.len(), 5);
    }

    #[test]
    fn degenerate_radius_draws_nothing() {
        let scene = test_scene();
        // Logical size smaller than twice the padding.
        let ops = build_frame_ops(&scene, &geom(10.0), 0.5);
        assert!(ops.is_empty());
    }

    #[test]
    fn undrawable_viewport_skips_frame() {
        let mut renderer = Renderer::new(test_scene()).unwrap();
        let out = renderer
            .render_frame(0.5, Viewport::new(0.0, 0.0), 1.0)
            .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn stroke_outline_is_fillable() {
        let mut line = BezPath::new();
        line.move_to(Point::new(0.0, 0.0));
        line.line_to(Point::new(10.0, 0.0));
        let outline = stroke_outline(&line, 2.0);
        let bbox = outline.bounding_box();
        assert!((bbox.height() - 2.0).abs() < 0.5);
        assert!(bbox.width() >= 10.0);
    }

    #[test]
    fn premul_is_identity_for_opaque() {
        assert_eq!(premul_rgba8(Rgba8::new(10, 20, 30, 255)), [10, 20, 30, 255]);
        assert_eq!(premul_rgba8(Rgba8::new(255, 255, 255, 0)), [0, 0, 0, 0]);
    }
}
