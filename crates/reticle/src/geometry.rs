use derive_more::{Add, Sub};
use strum::{EnumCount, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Default, Add, Sub)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// No extent along either axis.
    pub fn is_point(&self) -> bool {
        self.width <= 0.0 && self.height <= 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

/// Bracket order used everywhere a `[Point; 4]` appears: clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub fn as_index(&self) -> usize {
        *self as usize
    }
}

pub type Corners = [Point; Corner::COUNT];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketMetrics {
    /// Gap kept between the target's edge and the bracket.
    pub border_width: f64,
    /// Side length of one bracket.
    pub corner_size: f64,
}

impl Default for BracketMetrics {
    fn default() -> Self {
        Self {
            border_width: 3.0,
            corner_size: 12.0,
        }
    }
}

impl BracketMetrics {
    /// Absolute top-left positions of the four brackets framing `rect`.
    ///
    /// A rectangle with no extent collapses every bracket onto its centre. A
    /// flat one (a rule, a separator) is still framed edge to edge.
    pub fn resolve(&self, rect: Rect) -> Corners {
        if rect.is_point() {
            return [rect.center(); Corner::COUNT];
        }

        let (b, c) = (self.border_width, self.corner_size);
        let (near_x, near_y) = (rect.left() - b, rect.top() - b);
        let (far_x, far_y) = (rect.right() + b - c, rect.bottom() + b - c);

        [
            Point::new(near_x, near_y),
            Point::new(far_x, near_y),
            Point::new(far_x, far_y),
            Point::new(near_x, far_y),
        ]
    }

    /// Cursor-relative bracket offsets when nothing is locked.
    pub fn rest_offsets(&self) -> Corners {
        let (near, far) = (-self.corner_size * 1.5, self.corner_size * 0.5);
        [
            Point::new(near, near),
            Point::new(far, near),
            Point::new(far, far),
            Point::new(near, far),
        ]
    }
}
