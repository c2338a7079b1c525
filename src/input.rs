//! Text board loader.
//!
//! One tube per line, slots listed from the closed end, separated by
//! whitespace or commas. Negative values are empty slots. `#` starts a
//! comment; blank and comment-only lines are skipped.
//!
//! ```text
//! # three colors, two extra tubes
//! 0, 1, 2, 0
//! 2, 2, 1, 0
//! 1, 0, 1, 2
//! -1 -1 -1 -1
//! -1 -1 -1 -1
//! ```

use std::fs;
use std::io;
use std::path::Path;

use crate::error::LoadError;
use crate::tube::{Color, Slot};
use crate::validate::validate;

/// A parsed and validated board, ready for `Board::load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBoard {
    pub num_tubes: usize,
    pub num_colors: usize,
    pub num_slots: usize,
    /// Tube-major: slot `j` of tube `i` is at `i * num_slots + j`.
    pub slots: Vec<Slot>,
}

/// Read, parse and validate the board stored at `path`.
pub fn read_board(path: impl AsRef<Path>) -> Result<RawBoard, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    parse_board(&text, path)
}

/// Parse and validate board text. `path` is only used in error messages.
pub fn parse_board(text: &str, path: &Path) -> Result<RawBoard, LoadError> {
    let mut num_slots: Option<usize> = None;
    let mut num_tubes = 0;
    let mut slots = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let values = parse_line(line).ok_or_else(|| LoadError::Parse {
            path: path.to_path_buf(),
            line: line_no,
        })?;
        if values.is_empty() {
            continue;
        }

        let expected = *num_slots.get_or_insert(values.len());
        if values.len() != expected {
            return Err(LoadError::InconsistentElementCount {
                path: path.to_path_buf(),
                line: line_no,
                expected,
                found: values.len(),
            });
        }

        num_tubes += 1;
        slots.extend(
            values
                .into_iter()
                .map(|v| u32::try_from(v).ok().map(Color)),
        );
    }

    let Some(num_slots) = num_slots else {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    };

    let num_extra = validate(&slots, num_slots).map_err(|source| LoadError::Validation {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        num_tubes,
        num_extra,
        num_slots,
        "loaded board"
    );

    Ok(RawBoard {
        num_tubes,
        num_colors: num_tubes - num_extra,
        num_slots,
        slots,
    })
}

/// Integers on one line, or `None` if the line is malformed. A blank or
/// comment-only line yields an empty list.
fn parse_line(line: &str) -> Option<Vec<i64>> {
    let data = line.split('#').next().unwrap_or_default();
    if data.chars().any(char::is_alphabetic) {
        return None;
    }
    data.split(|c: char| !(c.is_ascii_digit() || c == '-'))
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<i64>().ok().filter(|v| *v <= u32::MAX as i64))
        .collect()
}
