use std::fmt;
use std::slice::Iter;

use thiserror::Error;

use crate::canvas::Point;
use crate::color::Color;
use crate::lex::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    MoveTo,
    DrawTo,
    Clear,
    Rectangle,
    Circle,
    Triangle,
    Color,
    Reset,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Float,
    Color,
    Switch,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => write!(f, "a number"),
            Self::Color => write!(f, "a color name"),
            Self::Switch => write!(f, "on or off"),
        }
    }
}

use ArgKind::{Color as ColorArg, Float, Switch};

impl Keyword {
    pub const ALL: [Keyword; 9] = [
        Keyword::MoveTo,
        Keyword::DrawTo,
        Keyword::Clear,
        Keyword::Rectangle,
        Keyword::Circle,
        Keyword::Triangle,
        Keyword::Color,
        Keyword::Reset,
        Keyword::Fill,
    ];

    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.name().eq_ignore_ascii_case(word))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::MoveTo => "moveto",
            Self::DrawTo => "drawto",
            Self::Clear => "clear",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Color => "color",
            Self::Reset => "reset",
            Self::Fill => "fill",
        }
    }

    pub fn signature(self) -> &'static [ArgKind] {
        match self {
            Self::MoveTo | Self::DrawTo => &[Float, Float],
            Self::Clear | Self::Reset => &[],
            Self::Rectangle => &[Float, Float],
            Self::Circle => &[Float],
            Self::Triangle => &[Float, Float, Float, Float, Float, Float],
            Self::Color => &[ColorArg],
            Self::Fill => &[Switch],
        }
    }

    pub fn arity(self) -> usize {
        self.signature().len()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    MoveTo(Point),
    DrawTo(Point),
    Clear,
    Rectangle { width: f64, height: f64 },
    Circle { radius: f64 },
    Triangle([Point; 3]),
    Color { name: &'static str, color: Color },
    Reset,
    Fill(bool),
}

impl Command {
    pub fn keyword(&self) -> Keyword {
        match self {
            Self::MoveTo(_) => Keyword::MoveTo,
            Self::DrawTo(_) => Keyword::DrawTo,
            Self::Clear => Keyword::Clear,
            Self::Rectangle { .. } => Keyword::Rectangle,
            Self::Circle { .. } => Keyword::Circle,
            Self::Triangle(_) => Keyword::Triangle,
            Self::Color { .. } => Keyword::Color,
            Self::Reset => Keyword::Reset,
            Self::Fill(_) => Keyword::Fill,
        }
    }
}

// canonical source form
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kw = self.keyword();
        match self {
            Self::MoveTo(p) | Self::DrawTo(p) => write!(f, "{kw} {} {}", p.x, p.y),
            Self::Clear | Self::Reset => write!(f, "{kw}"),
            Self::Rectangle { width, height } => write!(f, "{kw} {width} {height}"),
            Self::Circle { radius } => write!(f, "{kw} {radius}"),
            Self::Triangle([a, b, c]) => {
                write!(f, "{kw} {} {} {} {} {} {}", a.x, a.y, b.x, b.y, c.x, c.y)
            }
            Self::Color { name, .. } => write!(f, "{kw} {name}"),
            Self::Fill(on) => write!(f, "{kw} {}", if *on { "on" } else { "off" }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyLine,
    UnknownCommand,
    Arity,
    ArgumentFormat,
    UnknownColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    EmptyLine,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{keyword} requires {expected} argument(s), found {found}")]
    Arity {
        keyword: Keyword,
        expected: usize,
        found: usize,
    },

    #[error("invalid argument '{token}': expected {expected}")]
    ArgumentFormat { token: String, expected: ArgKind },

    #[error("unknown color: {0}")]
    UnknownColor(String),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyLine => ErrorKind::EmptyLine,
            Self::UnknownCommand(_) => ErrorKind::UnknownCommand,
            Self::Arity { .. } => ErrorKind::Arity,
            Self::ArgumentFormat { .. } => ErrorKind::ArgumentFormat,
            Self::UnknownColor(_) => ErrorKind::UnknownColor,
        }
    }
}

struct Parser<'a> {
    keyword: Keyword,
    args: Iter<'a, &'a str>,
}

impl<'a> Parser<'a> {
    fn new(keyword: Keyword, args: &'a [&'a str]) -> Result<Self, CommandError> {
        if args.len() != keyword.arity() {
            return Err(CommandError::Arity {
                keyword,
                expected: keyword.arity(),
                found: args.len(),
            });
        }

        Ok(Self {
            keyword,
            args: args.iter(),
        })
    }

    fn consume(&mut self) -> Result<&'a str, CommandError> {
        self.args.next().copied().ok_or(CommandError::Arity {
            keyword: self.keyword,
            expected: self.keyword.arity(),
            found: 0,
        })
    }

    fn float(&mut self) -> Result<f64, CommandError> {
        let token = self.consume()?;
        match token.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(CommandError::ArgumentFormat {
                token: token.to_owned(),
                expected: ArgKind::Float,
            }),
        }
    }

    fn point(&mut self) -> Result<Point, CommandError> {
        Ok(Point::new(self.float()?, self.float()?))
    }

    fn color(&mut self) -> Result<(&'static str, Color), CommandError> {
        let token = self.consume()?;
        Color::named(token).ok_or_else(|| CommandError::UnknownColor(token.to_owned()))
    }

    fn switch(&mut self) -> Result<bool, CommandError> {
        let token = self.consume()?;
        if token.eq_ignore_ascii_case("on") {
            Ok(true)
        } else if token.eq_ignore_ascii_case("off") {
            Ok(false)
        } else {
            Err(CommandError::ArgumentFormat {
                token: token.to_owned(),
                expected: ArgKind::Switch,
            })
        }
    }

    fn command(mut self) -> Result<Command, CommandError> {
        let cmd = match self.keyword {
            Keyword::MoveTo => Command::MoveTo(self.point()?),
            Keyword::DrawTo => Command::DrawTo(self.point()?),
            Keyword::Clear => Command::Clear,
            Keyword::Rectangle => Command::Rectangle {
                width: self.float()?,
                height: self.float()?,
            },
            Keyword::Circle => Command::Circle {
                radius: self.float()?,
            },
            Keyword::Triangle => Command::Triangle([self.point()?, self.point()?, self.point()?]),
            Keyword::Color => {
                let (name, color) = self.color()?;
                Command::Color { name, color }
            }
            Keyword::Reset => Command::Reset,
            Keyword::Fill => Command::Fill(self.switch()?),
        };

        Ok(cmd)
    }
}

/// Parses one trimmed command line. Pure: nothing is executed.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let tokens = tokenize(line);
    let (word, args) = match tokens.split_first() {
        Some((word, args)) if !word.is_empty() => (*word, args),
        _ => return Err(CommandError::EmptyLine),
    };

    let keyword =
        Keyword::from_word(word).ok_or_else(|| CommandError::UnknownCommand(word.to_owned()))?;

    Parser::new(keyword, args)?.command()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(line: &str) -> Command {
        parse_line(line).unwrap()
    }

    fn kind(line: &str) -> ErrorKind {
        parse_line(line).unwrap_err().kind()
    }

    #[test]
    fn parse_moves() {
        assert_eq!(single("moveto 10 20"), Command::MoveTo(Point::new(10.0, 20.0)));
        assert_eq!(single("drawto -1.5 2e2"), Command::DrawTo(Point::new(-1.5, 200.0)));
    }

    #[test]
    fn parse_shapes() {
        assert_eq!(
            single("rectangle 5 7"),
            Command::Rectangle {
                width: 5.0,
                height: 7.0
            }
        );
        assert_eq!(single("circle 3"), Command::Circle { radius: 3.0 });
        assert_eq!(
            single("triangle 0 0 10 0 5 5"),
            Command::Triangle([
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 5.0)
            ])
        );
    }

    #[test]
    fn parse_without_args() {
        assert_eq!(single("clear"), Command::Clear);
        assert_eq!(single("reset"), Command::Reset);
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(single("MoveTo 1 2"), Command::MoveTo(Point::new(1.0, 2.0)));
        assert_eq!(single("CLEAR"), Command::Clear);
    }

    #[test]
    fn parse_color() {
        assert_eq!(
            single("color red"),
            Command::Color {
                name: "Red",
                color: Color::rgb(255, 0, 0)
            }
        );
        assert_eq!(kind("color puce"), ErrorKind::UnknownColor);
    }

    #[test]
    fn parse_fill() {
        assert_eq!(single("fill on"), Command::Fill(true));
        assert_eq!(single("fill OFF"), Command::Fill(false));
        assert_eq!(
            parse_line("fill maybe"),
            Err(CommandError::ArgumentFormat {
                token: "maybe".into(),
                expected: ArgKind::Switch
            })
        );
    }

    #[test]
    fn negative_and_zero_geometry_is_accepted() {
        assert_eq!(single("circle -4"), Command::Circle { radius: -4.0 });
        assert_eq!(single("circle 0"), Command::Circle { radius: 0.0 });
        assert!(parse_line("rectangle -1 0").is_ok());
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_line("foo 1 2"),
            Err(CommandError::UnknownCommand("foo".into()))
        );
        assert_eq!(kind(""), ErrorKind::EmptyLine);
        assert_eq!(kind(" moveto 1 2"), ErrorKind::EmptyLine);
    }

    #[test]
    fn arity() {
        assert_eq!(
            parse_line("triangle 1 2 3"),
            Err(CommandError::Arity {
                keyword: Keyword::Triangle,
                expected: 6,
                found: 3
            })
        );

        // too few
        assert_eq!(kind("moveto 1"), ErrorKind::Arity);
        assert_eq!(kind("color"), ErrorKind::Arity);
        assert_eq!(kind("fill"), ErrorKind::Arity);

        // too many
        assert_eq!(kind("circle 1 2"), ErrorKind::Arity);
        assert_eq!(kind("clear now"), ErrorKind::Arity);
        assert_eq!(kind("triangle 1 2 3 4 5 6 7"), ErrorKind::Arity);
    }

    #[test]
    fn argument_format_names_token() {
        assert_eq!(
            parse_line("moveto 10 ten"),
            Err(CommandError::ArgumentFormat {
                token: "ten".into(),
                expected: ArgKind::Float
            })
        );
        assert_eq!(kind("circle NaN"), ErrorKind::ArgumentFormat);
        assert_eq!(kind("circle inf"), ErrorKind::ArgumentFormat);
        assert_eq!(kind("moveto  1 2"), ErrorKind::Arity);
        assert_eq!(kind("rectangle  5"), ErrorKind::ArgumentFormat);
    }

    #[test]
    fn display_reparses() {
        for line in [
            "moveto 1.5 -2",
            "triangle 0 0 10 0 5 5",
            "color Red",
            "fill on",
            "rectangle 3 4",
        ] {
            let cmd = single(line);
            assert_eq!(cmd.to_string(), line);
            assert_eq!(single(&cmd.to_string()), cmd);
        }
    }

    #[test]
    fn signatures() {
        assert_eq!(Keyword::Triangle.arity(), 6);
        assert_eq!(Keyword::Clear.arity(), 0);
        assert_eq!(Keyword::Fill.signature(), &[ArgKind::Switch]);
        assert_eq!(Keyword::from_word("Rectangle"), Some(Keyword::Rectangle));
        assert_eq!(Keyword::from_word("square"), None);
    }
}
