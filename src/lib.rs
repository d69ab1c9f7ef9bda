mod lex;

pub mod canvas;
pub mod cli;
pub mod color;
pub mod interpreter;
pub mod parse;
pub mod record;
pub mod store;
pub mod svg;
pub mod validate;

use thiserror::Error;

pub use canvas::{Canvas, Point};
pub use color::Color;
pub use interpreter::{Interpreter, Log, PenState};
pub use lex::{split_lines, tokenize, SourceLine};
pub use parse::{parse_line, Command, CommandError, ErrorKind, Keyword};
pub use validate::{check_line, validate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error @ line {line_number}: {source} (in \"{line}\")")]
pub struct ProgramError {
    pub line_number: usize,
    pub line: String,
    pub source: CommandError,
}

impl ProgramError {
    pub(crate) fn new(line: &SourceLine<'_>, source: CommandError) -> Self {
        Self {
            line_number: line.number,
            line: line.text.to_owned(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Executes program text line by line against `interpreter`.
///
/// Stops at the first failing line. Drawing done by earlier lines stays on
/// the canvas. Returns the number of lines executed.
pub fn run_program<C: Canvas, L: Log>(
    source: &str,
    interpreter: &mut Interpreter<'_, C, L>,
) -> Result<usize, ProgramError> {
    let lines = split_lines(source);

    for line in &lines {
        interpreter
            .process(line.text)
            .map_err(|e| ProgramError::new(line, e))?;
    }

    Ok(lines.len())
}
