//! Pixel-space geometry primitives and the edge-zone classifier.
//!
//! The classifier partitions a rectangle into four triangular regions by
//! its diagonals and reports which edge a point is nearest to. It drives
//! both drop placement and the drop-preview highlight, so the same
//! classification is guaranteed for both.

/// Point in panel-local pixel coordinates. Drag positions may land outside
/// the panel, so components are signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Integer size measured in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Half-open containment test: the right and bottom boundaries belong
    /// to the neighbouring cell.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Edge of a reference rectangle a point is nearest to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Classify which edge zone of `bounds` the point falls in.
///
/// The rectangle is first bucketed into quadrants by its midlines, then
/// each quadrant tests the point against the diagonal running from its
/// corner to the centre. The top-left test compares `x` against `2 * y`;
/// the other quadrants apply the same test with the point reflected into
/// the top-left. Ties go to the horizontal edge in the top quadrants and
/// to the vertical edge in the bottom ones; the policy is an
/// implementation detail, not a symmetric guarantee.
///
/// Degenerate bounds (non-positive width or height) classify as `Top` by
/// convention so the function stays total.
pub fn classify_edge(point: Point, bounds: Size) -> Edge {
    if bounds.width <= 0 || bounds.height <= 0 {
        return Edge::Top;
    }

    let left_half = point.x < bounds.width / 2;
    let top_half = point.y < bounds.height / 2;

    match (left_half, top_half) {
        (true, true) => {
            if point.x > 2 * point.y {
                Edge::Top
            } else {
                Edge::Left
            }
        }
        (false, true) => {
            let rx = bounds.width - point.x;
            if rx > 2 * point.y {
                Edge::Top
            } else {
                Edge::Right
            }
        }
        (true, false) => {
            let ry = bounds.height - point.y;
            if point.x > 2 * ry {
                Edge::Bottom
            } else {
                Edge::Left
            }
        }
        (false, false) => {
            let rx = bounds.width - point.x;
            let ry = bounds.height - point.y;
            if rx > 2 * ry {
                Edge::Bottom
            } else {
                Edge::Right
            }
        }
    }
}
