// Origin is the top-left corner, y grows downward.

use std::fmt;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Implementations receive already-validated geometry. Extents are never
/// negative, but may be zero; such shapes should render as nothing.
pub trait Canvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Color);

    // origin is the top-left corner
    fn draw_rect(&mut self, origin: Point, width: f64, height: f64, color: Color, filled: bool);

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color, filled: bool);

    fn draw_polygon(&mut self, points: &[Point], color: Color, filled: bool);

    fn clear(&mut self, background: Color);
}
