use crate::canvas::{Canvas, Point};
use crate::color::Color;
use crate::interpreter::Log;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        color: Color,
        filled: bool,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
        color: Color,
        filled: bool,
    },
    Polygon {
        points: Vec<Point>,
        color: Color,
        filled: bool,
    },
    Clear {
        background: Color,
    },
}

impl DrawOp {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Line { .. } => "line",
            Self::Rect { .. } => "rect",
            Self::Ellipse { .. } => "ellipse",
            Self::Polygon { .. } => "polygon",
            Self::Clear { .. } => "clear",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Self::Line { color, .. }
            | Self::Rect { color, .. }
            | Self::Ellipse { color, .. }
            | Self::Polygon { color, .. } => *color,
            Self::Clear { background } => *background,
        }
    }

    pub fn filled(&self) -> Option<bool> {
        match self {
            Self::Rect { filled, .. }
            | Self::Ellipse { filled, .. }
            | Self::Polygon { filled, .. } => Some(*filled),
            Self::Line { .. } | Self::Clear { .. } => None,
        }
    }

    pub fn geometry(&self) -> String {
        match self {
            Self::Line { from, to, .. } => format!("{from} -> {to}"),
            Self::Rect {
                origin,
                width,
                height,
                ..
            } => format!("{origin} {width}x{height}"),
            Self::Ellipse { center, rx, ry, .. } => format!("{center} r={rx},{ry}"),
            Self::Polygon { points, .. } => points
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
            Self::Clear { .. } => String::new(),
        }
    }
}

/// Keeps every drawing call in order instead of rendering it.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.ops.push(DrawOp::Line { from, to, color });
    }

    fn draw_rect(&mut self, origin: Point, width: f64, height: f64, color: Color, filled: bool) {
        self.ops.push(DrawOp::Rect {
            origin,
            width,
            height,
            color,
            filled,
        });
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color, filled: bool) {
        self.ops.push(DrawOp::Ellipse {
            center,
            rx,
            ry,
            color,
            filled,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color, filled: bool) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            color,
            filled,
        });
    }

    fn clear(&mut self, background: Color) {
        self.ops.push(DrawOp::Clear { background });
    }
}

pub struct Tee<'a, A: Canvas, B: Canvas>(pub &'a mut A, pub &'a mut B);

impl<A: Canvas, B: Canvas> Canvas for Tee<'_, A, B> {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.0.draw_line(from, to, color);
        self.1.draw_line(from, to, color);
    }

    fn draw_rect(&mut self, origin: Point, width: f64, height: f64, color: Color, filled: bool) {
        self.0.draw_rect(origin, width, height, color, filled);
        self.1.draw_rect(origin, width, height, color, filled);
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color, filled: bool) {
        self.0.draw_ellipse(center, rx, ry, color, filled);
        self.1.draw_ellipse(center, rx, ry, color, filled);
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color, filled: bool) {
        self.0.draw_polygon(points, color, filled);
        self.1.draw_polygon(points, color, filled);
    }

    fn clear(&mut self, background: Color) {
        self.0.clear(background);
        self.1.clear(background);
    }
}

#[derive(Debug, Default)]
pub struct VecLog {
    pub lines: Vec<String>,
}

impl Log for VecLog {
    fn log(&mut self, msg: String) {
        self.lines.push(msg);
    }
}

pub struct NullLog;

impl Log for NullLog {
    fn log(&mut self, _msg: String) {}
}
