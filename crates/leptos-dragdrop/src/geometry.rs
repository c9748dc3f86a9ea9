//! Geometry primitives in viewport (client) coordinates.

/// A pointer position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical midpoint, the reference line for placement
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Edges are inclusive on the top/left and exclusive on the bottom/right
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Offset of `p` from the top-left corner
    pub fn offset_of(&self, p: Point) -> (f64, f64) {
        (p.x - self.x, p.y - self.y)
    }
}
