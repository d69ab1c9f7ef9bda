//! Renders canvas calls into a standalone SVG document.

use std::fmt::Write;

use crate::canvas::{Canvas, Point};
use crate::color::Color;

pub struct SvgCanvas {
    width: u32,
    height: u32,
    background: Color,
    elements: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            elements: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn to_document(&self) -> String {
        let mut doc = String::new();
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(
            doc,
            r#"  <rect width="100%" height="100%" {}/>"#,
            paint(self.background, true)
        );
        for element in &self.elements {
            let _ = writeln!(doc, "  {element}");
        }
        doc.push_str("</svg>\n");
        doc
    }
}

fn paint(color: Color, filled: bool) -> String {
    let mut attrs = if filled {
        format!(r#"fill="{}""#, color.hex())
    } else {
        format!(r#"fill="none" stroke="{}""#, color.hex())
    };
    if color.a != 255 {
        let key = if filled { "fill-opacity" } else { "stroke-opacity" };
        let _ = write!(attrs, r#" {key}="{:.3}""#, color.opacity());
    }
    attrs
}

impl Canvas for SvgCanvas {
    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            paint(color, false)
        ));
    }

    fn draw_rect(&mut self, origin: Point, width: f64, height: f64, color: Color, filled: bool) {
        if width == 0.0 || height == 0.0 {
            return;
        }
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{width}" height="{height}" {}/>"#,
            origin.x,
            origin.y,
            paint(color, filled)
        ));
    }

    fn draw_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Color, filled: bool) {
        if rx == 0.0 || ry == 0.0 {
            return;
        }
        self.elements.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{rx}" ry="{ry}" {}/>"#,
            center.x,
            center.y,
            paint(color, filled)
        ));
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color, filled: bool) {
        let points = points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"<polygon points="{points}" {}/>"#,
            paint(color, filled)
        ));
    }

    fn clear(&mut self, background: Color) {
        self.elements.clear();
        self.background = background;
    }
}
