//! Bounding-box geometry for positioned elements.

use kurbo::{Point, Size};

/// Axis-aligned bounding box with its derived comparison points.
///
/// Always recomputed on demand from an element or a pending placement,
/// never stored. All values are px relative to the frame origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Bounds of a box at `origin` with the given size.
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
            center_x: origin.x + size.width / 2.0,
            center_y: origin.y + size.height / 2.0,
            width: size.width,
            height: size.height,
        }
    }

    /// The same box translated so its top-left corner sits at `origin`.
    pub fn at(&self, origin: Point) -> Self {
        Self::new(origin, Size::new(self.width, self.height))
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Check whether a point lies inside the box (edges inclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// All coordinates are finite. Malformed bounds are rejected by the
    /// snapping engine rather than propagated.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }
}
