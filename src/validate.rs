use crate::lex::split_lines;
use crate::parse::{parse_line, CommandError};
use crate::ProgramError;

pub fn check_line(line: &str) -> Result<(), CommandError> {
    parse_line(line).map(|_| ())
}

/// Stops at the first invalid line; returns the number of lines checked.
pub fn validate(source: &str) -> Result<usize, ProgramError> {
    let lines = split_lines(source);

    for line in &lines {
        check_line(line.text).map_err(|e| ProgramError::new(line, e))?;
    }

    Ok(lines.len())
}
