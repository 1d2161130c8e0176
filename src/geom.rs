//! Rectangle and axis primitives
//!
//! Overlap tests use open intervals: rectangles that merely share an edge do
//! not intersect. The swept-collision resolver depends on that when it parks
//! an actor flush against a tile boundary.

use glam::{IVec2, Vec2};

/// The two world axes. The sweep picks one as the fast axis and derives the
/// other from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component index for `glam` vector indexing
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis-aligned rectangle in float pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Open-interval overlap test; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Axis-aligned rectangle in integer pixel coordinates, used by the sweep
/// and the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Open-interval overlap test; touching edges do not count
    #[inline]
    pub fn intersects(&self, other: &IRect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &IRect) -> IRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        IRect::new(x, y, right - x, bottom - y)
    }

    #[inline]
    pub fn translate(&self, by: IVec2) -> IRect {
        IRect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// This rectangle as an offset box anchored at a world position
    #[inline]
    pub fn at(&self, pos: Vec2) -> Rect {
        Rect::new(
            pos.x + self.x as f32,
            pos.y + self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}
