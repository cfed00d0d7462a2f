/// A point in screen space. Absolute points are measured from the top-left
/// corner, normalized points from the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Extent of the touch surface, captured at startup and on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Disc diameter at full progress, as a multiple of the larger viewport side.
const COVERAGE_FACTOR: f64 = 3.0;

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Convert an absolute position into an offset from the viewport center.
    pub fn normalize(&self, x: f64, y: f64) -> Point {
        let c = self.center();
        Point::new(x - c.x, y - c.y)
    }

    /// Inverse of [`Viewport::normalize`].
    pub fn denormalize(&self, p: Point) -> Point {
        let c = self.center();
        Point::new(p.x + c.x, p.y + c.y)
    }

    /// Radius of the reveal disc for a progress value in `0.0..=1.0`.
    /// At 1.0 the disc covers the whole surface from any origin.
    pub fn coverage_radius(&self, progress: f64) -> f64 {
        let diameter = self.width.max(self.height) * COVERAGE_FACTOR;
        progress.clamp(0.0, 1.0) * diameter / 2.0
    }
}
