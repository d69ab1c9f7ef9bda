use crate::canvas::{Canvas, Point};
use crate::color::Color;
use crate::parse::{parse_line, Command, CommandError};

pub trait Log {
    fn log(&mut self, msg: String);
}

/// Pen position, color and fill mode carried from one command to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenState {
    pub position: Point,
    pub color: Color,
    pub fill: bool,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            color: Color::BLACK,
            fill: false,
        }
    }
}

/// Executes commands against a pen, painting onto a borrowed canvas.
///
/// One interpreter is one drawing session: the pen persists across calls
/// to [`Interpreter::execute`] and [`Interpreter::process`].
pub struct Interpreter<'a, C: Canvas, L: Log> {
    pen: PenState,
    background: Color,
    canvas: &'a mut C,
    logger: &'a mut L,
}

impl<'a, C: Canvas, L: Log> Interpreter<'a, C, L> {
    pub fn new(canvas: &'a mut C, logger: &'a mut L) -> Self {
        Self {
            pen: PenState::default(),
            background: Color::WHITE,
            canvas,
            logger,
        }
    }

    /// Color used by `clear` to erase the canvas.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn canvas(&self) -> &C {
        &*self.canvas
    }

    /// Parses and executes a single line. Nothing is drawn if parsing fails.
    pub fn process(&mut self, line: &str) -> Result<(), CommandError> {
        let cmd = parse_line(line)?;
        self.execute(&cmd);
        Ok(())
    }

    pub fn execute(&mut self, cmd: &Command) {
        self.logger.log(format!("--> {cmd}"));

        match *cmd {
            Command::MoveTo(p) => self.move_to(p),
            Command::DrawTo(p) => self.draw_to(p),
            Command::Clear => self.clear(),
            Command::Rectangle { width, height } => self.rectangle(width, height),
            Command::Circle { radius } => self.circle(radius),
            Command::Triangle(points) => self.triangle(&points),
            Command::Color { name, color } => self.set_color(name, color),
            Command::Reset => self.reset(),
            Command::Fill(on) => self.set_fill(on),
        }
    }

    fn move_to(&mut self, to: Point) {
        self.pen.position = to;
    }

    fn draw_to(&mut self, to: Point) {
        self.canvas.draw_line(self.pen.position, to, self.pen.color);
        self.pen.position = to;
    }

    fn clear(&mut self) {
        self.canvas.clear(self.background);
        self.pen.position = Point::ORIGIN;
    }

    fn rectangle(&mut self, width: f64, height: f64) {
        let (width, height) = (self.extent(width), self.extent(height));
        self.canvas
            .draw_rect(self.pen.position, width, height, self.pen.color, self.pen.fill);
    }

    fn circle(&mut self, radius: f64) {
        let radius = self.extent(radius);
        self.canvas
            .draw_ellipse(self.pen.position, radius, radius, self.pen.color, self.pen.fill);
    }

    fn triangle(&mut self, points: &[Point; 3]) {
        self.canvas
            .draw_polygon(points, self.pen.color, self.pen.fill);
    }

    fn set_color(&mut self, name: &str, color: Color) {
        self.pen.color = color;
        self.logger.log(format!("--> pen color is now {name}"));
    }

    fn reset(&mut self) {
        self.pen.position = Point::ORIGIN;
    }

    fn set_fill(&mut self, on: bool) {
        self.pen.fill = on;
        self.logger.log(format!("--> fill is now {}", if on { "on" } else { "off" }));
    }

    // negative or NaN extents collapse to an empty shape
    fn extent(&mut self, value: f64) -> f64 {
        if value.is_nan() || value < 0.0 {
            self.logger
                .log(format!("--> extent {value} is not a size: drawing empty shape"));
            0.0
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DrawOp, NullLog, RecordingCanvas, VecLog};

    fn run(lines: &[&str]) -> (PenState, Vec<DrawOp>) {
        let mut canvas = RecordingCanvas::default();
        let mut logger = NullLog;
        let mut interpreter = Interpreter::new(&mut canvas, &mut logger);
        for line in lines {
            interpreter.process(line).unwrap();
        }
        let pen = *interpreter.pen();
        (pen, canvas.ops)
    }

    #[test]
    fn starts_at_origin() {
        let (pen, ops) = run(&[]);
        assert_eq!(pen, PenState::default());
        assert_eq!(pen.position, Point::ORIGIN);
        assert_eq!(pen.color, Color::BLACK);
        assert!(!pen.fill);
        assert!(ops.is_empty());
    }

    #[test]
    fn moveto_does_not_draw() {
        let (pen, ops) = run(&["moveto 12 -3.5"]);
        assert_eq!(pen.position, Point::new(12.0, -3.5));
        assert!(ops.is_empty());
    }

    #[test]
    fn drawto_draws_from_previous_position() {
        let (pen, ops) = run(&["moveto 1 2", "drawto 3 4"]);
        assert_eq!(pen.position, Point::new(3.0, 4.0));
        assert_eq!(
            ops,
            vec![DrawOp::Line {
                from: Point::new(1.0, 2.0),
                to: Point::new(3.0, 4.0),
                color: Color::BLACK
            }]
        );
    }

    #[test]
    fn clear_keeps_color_and_fill() {
        let (pen, ops) = run(&["color blue", "fill on", "moveto 5 5", "clear"]);
        assert_eq!(pen.position, Point::ORIGIN);
        assert_eq!(pen.color, Color::rgb(0, 0, 255));
        assert!(pen.fill);
        assert_eq!(
            ops,
            vec![DrawOp::Clear {
                background: Color::WHITE
            }]
        );
    }

    #[test]
    fn clear_uses_configured_background() {
        let mut canvas = RecordingCanvas::default();
        let mut logger = NullLog;
        let mut interpreter =
            Interpreter::new(&mut canvas, &mut logger).with_background(Color::BLACK);
        interpreter.process("clear").unwrap();
        assert_eq!(
            canvas.ops,
            vec![DrawOp::Clear {
                background: Color::BLACK
            }]
        );
    }

    #[test]
    fn reset_only_touches_position() {
        let (before, _) = run(&["color green", "fill on", "moveto 7 8"]);
        let (after, ops) = run(&["color green", "fill on", "moveto 7 8", "reset"]);
        assert_eq!(after.position, Point::ORIGIN);
        assert_eq!(after.color, before.color);
        assert_eq!(after.fill, before.fill);
        assert!(ops.is_empty());
    }

    #[test]
    fn fill_toggles_circle_style() {
        let (_, filled) = run(&["moveto 10 10", "fill on", "circle 5"]);
        let (_, outlined) = run(&["moveto 10 10", "fill off", "circle 5"]);
        let expected = |filled| DrawOp::Ellipse {
            center: Point::new(10.0, 10.0),
            rx: 5.0,
            ry: 5.0,
            color: Color::BLACK,
            filled,
        };
        assert_eq!(filled, vec![expected(true)]);
        assert_eq!(outlined, vec![expected(false)]);
    }

    #[test]
    fn shapes_do_not_move_pen() {
        let (pen, ops) = run(&[
            "moveto 4 4",
            "rectangle 2 3",
            "circle 1",
            "triangle 0 0 10 0 5 5",
        ]);
        assert_eq!(pen.position, Point::new(4.0, 4.0));
        assert_eq!(ops.len(), 3);
        assert_eq!(
            ops[2],
            DrawOp::Polygon {
                points: vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 0.0),
                    Point::new(5.0, 5.0)
                ],
                color: Color::BLACK,
                filled: false
            }
        );
    }

    #[test]
    fn negative_extents_are_empty_shapes() {
        let (_, ops) = run(&["circle -4", "rectangle -2 3"]);
        assert_eq!(
            ops,
            vec![
                DrawOp::Ellipse {
                    center: Point::ORIGIN,
                    rx: 0.0,
                    ry: 0.0,
                    color: Color::BLACK,
                    filled: false
                },
                DrawOp::Rect {
                    origin: Point::ORIGIN,
                    width: 0.0,
                    height: 3.0,
                    color: Color::BLACK,
                    filled: false
                },
            ]
        );
    }

    #[test]
    fn failed_line_changes_nothing() {
        let mut canvas = RecordingCanvas::default();
        let mut logger = NullLog;
        let mut interpreter = Interpreter::new(&mut canvas, &mut logger);
        interpreter.process("moveto 3 3").unwrap();
        assert!(interpreter.process("drawto 1 x").is_err());
        assert!(interpreter.process("color puce").is_err());
        assert_eq!(interpreter.pen().position, Point::new(3.0, 3.0));
        assert_eq!(interpreter.pen().color, Color::BLACK);
        assert!(interpreter.canvas().ops.is_empty());
    }

    #[test]
    fn logs_each_command() {
        let mut canvas = RecordingCanvas::default();
        let mut logger = VecLog::default();
        let mut interpreter = Interpreter::new(&mut canvas, &mut logger);
        interpreter.process("MOVETO 1 2").unwrap();
        interpreter.process("color red").unwrap();
        assert_eq!(
            logger.lines,
            vec!["--> moveto 1 2", "--> color Red", "--> pen color is now Red"]
        );
    }

    #[test]
    fn logs_color_as_spelled() {
        let mut canvas = RecordingCanvas::default();
        let mut logger = VecLog::default();
        let mut interpreter = Interpreter::new(&mut canvas, &mut logger);
        interpreter.process("color cyan").unwrap();
        assert_eq!(
            logger.lines,
            vec!["--> color Cyan", "--> pen color is now Cyan"]
        );
    }

    #[test]
    fn nan_extents_are_empty_shapes() {
        let mut canvas = RecordingCanvas::default();
        let mut logger = NullLog;
        let mut interpreter = Interpreter::new(&mut canvas, &mut logger);
        interpreter.execute(&Command::Circle { radius: f64::NAN });
        interpreter.execute(&Command::Rectangle {
            width: f64::NAN,
            height: 2.0,
        });
        assert_eq!(
            canvas.ops,
            vec![
                DrawOp::Ellipse {
                    center: Point::ORIGIN,
                    rx: 0.0,
                    ry: 0.0,
                    color: Color::BLACK,
                    filled: false
                },
                DrawOp::Rect {
                    origin: Point::ORIGIN,
                    width: 0.0,
                    height: 2.0,
                    color: Color::BLACK,
                    filled: false
                },
            ]
        );
    }
}
