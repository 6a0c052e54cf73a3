use crate::core::{Affine, BezPath, Point, Vec2};

use kurbo::{Rect, Shape as _};

/// Vector π glyph, built as three bars in a unit box centered on the origin.
///
/// Drawn under the chord path; a font stack would be overkill for one
/// decorative symbol.
pub fn pi_glyph(center: Point, size: f64) -> BezPath {
    let mut path = BezPath::new();

    // Crossbar, slightly wider than the legs it caps.
    append_rect(&mut path, Rect::new(-0.46, -0.38, 0.46, -0.26));
    // Left and right legs.
    append_rect(&mut path, Rect::new(-0.26, -0.26, -0.14, 0.42));
    append_rect(&mut path, Rect::new(0.14, -0.26, 0.26, 0.42));

    Affine::translate(Vec2::new(center.x, center.y)) * Affine::scale(size) * path
}

fn append_rect(path: &mut BezPath, rect: Rect) {
    path.extend(rect.to_path(0.1));
}
