//! Axis-aligned quads for panel layout and hit testing
//!
//! All coordinates are viewport coordinates: origin at the bottom-left of the
//! host viewport, y growing upward. Backends that draw with y pointing down
//! flip at the edge (see `backend.rs`).

use macroquad::math::Vec2;

/// An axis-aligned quad stored as its four corners
///
/// Corners are always consistently ordered: `tl`/`tr` share the top edge,
/// `bl`/`br` share the bottom edge, `tl`/`bl` share the left edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quad {
    pub tl: Vec2,
    pub tr: Vec2,
    pub bl: Vec2,
    pub br: Vec2,
    pub width: f32,
    pub height: f32,
    /// Hit-test tolerance margin around the quad
    pub padding: f32,
}

impl Quad {
    /// Create from the bottom-left corner and a size
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        let w = w.max(0.0);
        let h = h.max(0.0);
        Self {
            tl: Vec2::new(x, y + h),
            tr: Vec2::new(x + w, y + h),
            bl: Vec2::new(x, y),
            br: Vec2::new(x + w, y),
            width: w,
            height: h,
            padding: 0.0,
        }
    }

    /// Create from two opposite corners in any order
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    pub fn left(&self) -> f32 {
        self.bl.x
    }

    pub fn right(&self) -> f32 {
        self.br.x
    }

    pub fn bottom(&self) -> f32 {
        self.bl.y
    }

    pub fn top(&self) -> f32 {
        self.tl.y
    }

    pub fn center(&self) -> Vec2 {
        (self.bl + self.tr) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point test using the quad's own padding as tolerance
    pub fn contains(&self, p: Vec2) -> bool {
        self.contains_with(p, self.padding)
    }

    /// Point test with an explicit tolerance margin on every side
    pub fn contains_with(&self, p: Vec2, tolerance: f32) -> bool {
        p.x >= self.left() - tolerance
            && p.x <= self.right() + tolerance
            && p.y >= self.bottom() - tolerance
            && p.y <= self.top() + tolerance
    }

    /// Whether `other` lies fully inside this quad
    pub fn encloses(&self, other: &Quad) -> bool {
        other.left() >= self.left()
            && other.right() <= self.right()
            && other.bottom() >= self.bottom()
            && other.top() <= self.top()
    }

    /// Smallest quad covering both
    pub fn union(&self, other: &Quad) -> Quad {
        Quad::from_corners(self.bl.min(other.bl), self.tr.max(other.tr))
    }

    /// Grow by `amount` on every side
    pub fn expand(&self, amount: f32) -> Quad {
        Quad::new(
            self.left() - amount,
            self.bottom() - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Whether the vertical spans of two quads overlap
    pub fn overlaps_y(&self, bottom: f32, top: f32) -> bool {
        self.bottom() < top && self.top() > bottom
    }

    /// Corners in drawing order for a filled quad
    pub fn points(&self) -> [Vec2; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }

    /// Closed outline for polyline drawing
    pub fn outline(&self) -> [Vec2; 5] {
        [self.tl, self.tr, self.br, self.bl, self.tl]
    }
}
