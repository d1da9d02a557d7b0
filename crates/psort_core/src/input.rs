use crate::errors::{Result, SortError};
use std::io::BufRead;

/// Lazily parses one decimal integer per line.
///
/// Surrounding whitespace is ignored. An empty or malformed line yields
/// [`SortError::Parse`] with its 1-based line number; the caller is expected
/// to abort on the first error.
pub fn parse_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<i32>> {
    reader.lines().enumerate().map(|(i, line)| {
        let line = line?;
        let token = line.trim();
        token.parse::<i32>().map_err(|_| SortError::Parse {
            line: i as u64 + 1,
            token: token.to_string(),
        })
    })
}
