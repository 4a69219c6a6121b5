#![forbid(unsafe_code)]

//! Geometric primitives for drop-target hit testing.
//!
//! Coordinates are host pixels (origin at top-left, y grows downward) and may
//! be fractional. A rectangle is *valid* only when every component is finite
//! and both dimensions are strictly positive; invalid rectangles never contain
//! a point and never intersect anything.

use serde::{Deserialize, Serialize};

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle for droppable bounds and the dragged element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Area of the rectangle. Zero for invalid rectangles.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.is_valid() {
            self.width * self.height
        } else {
            0.0
        }
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The four corners, clockwise from top-left.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.top()),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left(), self.bottom()),
        ]
    }

    /// Finite components and strictly positive size.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Check if a point is inside the rectangle (edges inclusive).
    ///
    /// Always `false` for invalid rectangles or non-finite points.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.is_valid()
            && point.is_finite()
            && point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Return the rectangle moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they do not overlap or either one is invalid.
    #[inline]
    #[must_use]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Intersection over union, in `[0, 1]`.
    #[must_use]
    pub fn overlap_ratio(&self, other: &Rect) -> f64 {
        let Some(shared) = self.intersection_opt(other) else {
            return 0.0;
        };
        let shared_area = shared.area();
        let union_area = self.area() + other.area() - shared_area;
        if union_area > 0.0 {
            shared_area / union_area
        } else {
            0.0
        }
    }
}
