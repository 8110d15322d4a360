//! Drawing primitives consumed by the toolkit
//!
//! The overlay never talks to a graphics API directly. Everything it renders
//! goes through [`Painter`], which a host implements on top of whatever it
//! has (see `MacroquadPainter` in `backend.rs`).

use macroquad::color::Color;
use macroquad::math::Vec2;

use super::Quad;

/// Opaque handle to an image owned by the painter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

/// Low-level 2D drawing API supplied by the host
///
/// Methods take `&self` so that drawing can happen from `draw(&self)` passes;
/// implementations that keep state use interior mutability.
pub trait Painter {
    /// Fill a convex quad given in drawing order
    fn draw_quad(&self, points: [Vec2; 4], color: Color);

    fn draw_polyline(&self, points: &[Vec2], color: Color, width: f32);

    /// Draw text with its baseline-left at `pos`
    fn draw_text(&self, text: &str, pos: Vec2, size: f32, color: Color);

    /// Width and height of `text` at `size`
    fn measure_text(&self, text: &str, size: f32) -> Vec2;

    /// Load an image by name; `None` when it cannot be loaded
    fn load_image(&self, name: &str) -> Option<ImageHandle>;

    fn draw_image(&self, image: ImageHandle, quad: &Quad);

    fn free_image(&self, image: ImageHandle);
}

/// Fill a quad
pub fn fill(painter: &dyn Painter, quad: &Quad, color: Color) {
    painter.draw_quad(quad.points(), color);
}

/// Stroke a quad's outline
pub fn stroke(painter: &dyn Painter, quad: &Quad, color: Color, width: f32) {
    painter.draw_polyline(&quad.outline(), color, width);
}

/// Points around a circle, closed (first point repeated at the end)
pub fn circle_points(center: Vec2, radius: f32, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let a = i as f32 / segments as f32 * std::f32::consts::TAU;
            center + Vec2::new(a.cos(), a.sin()) * radius
        })
        .collect()
}

/// Filled disc built from degenerate quads fanning out of the center
pub fn fill_circle(painter: &dyn Painter, center: Vec2, radius: f32, color: Color) {
    let ring = circle_points(center, radius, 24);
    for pair in ring.windows(2) {
        painter.draw_quad([center, pair[0], pair[1], pair[1]], color);
    }
}

/// Ring outline
pub fn stroke_circle(painter: &dyn Painter, center: Vec2, radius: f32, color: Color, width: f32) {
    painter.draw_polyline(&circle_points(center, radius, 24), color, width);
}

/// Draw `text` vertically centered inside `quad`, starting `inset` from its left edge
pub fn text_in(painter: &dyn Painter, text: &str, quad: &Quad, inset: f32, size: f32, color: Color) {
    let dims = painter.measure_text(text, size);
    let y = quad.bottom() + (quad.height - dims.y) * 0.5;
    painter.draw_text(text, Vec2::new(quad.left() + inset, y.round()), size, color);
}
