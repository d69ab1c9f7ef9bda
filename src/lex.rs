#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    // one-based
    pub number: usize,
    pub text: &'a str,
}

// blank lines are dropped but still counted
pub fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let text = line.trim();
            if text.is_empty() {
                None
            } else {
                Some(SourceLine { number: i + 1, text })
            }
        })
        .collect()
}

// runs of spaces are not collapsed
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split(' ').collect()
}
