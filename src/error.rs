//! Error types for the puzzle core and its loader.
//!
//! Pour and undo failures are ordinary outcomes the game loop and solver
//! branch on; loader and validation errors are fatal to the run that
//! requested them.

use std::path::PathBuf;

use thiserror::Error;

use crate::tube::Color;

/// `add_color` on a tube with no empty slot left.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("tube is full ({capacity} slots)")]
pub struct TubeFull {
    pub capacity: usize,
}

/// Why a pour was rejected. Neither tube is touched when this is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PourError {
    #[error("tube index {index} out of range (board has {num_tubes} tubes)")]
    OutOfRange { index: usize, num_tubes: usize },

    #[error("cannot pour a tube into itself")]
    SameTube,

    #[error("source tube is empty")]
    EmptySource,

    #[error("destination tube is full")]
    FullDestination,

    #[error("color {chunk} does not match destination top color {top}")]
    ColorMismatch { chunk: Color, top: Color },

    #[error("chunk of {count} does not fit in {free} free slots")]
    Overflow { count: usize, free: usize },
}

/// Invalid generation parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid number of {name}: {value} (must be at least 1)")]
    InvalidParameter { name: &'static str, value: usize },
}

/// A flattened slot list that does not describe a well-formed board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("board has no slots")]
    NoSlots,

    #[error("board has no empty slots (at least one extra tube is required)")]
    NoEmptySlots,

    #[error("{empties} empty slots is not a multiple of {num_slots} slots per tube")]
    EmptiesNotMultiple { empties: usize, num_slots: usize },

    #[error("color {color} occupies {found} slots, expected {expected}")]
    ColorCount {
        color: Color,
        expected: usize,
        found: usize,
    },
}

/// Failure to read a board from a text file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading file '{}' at line {line}", path.display())]
    Parse { path: PathBuf, line: usize },

    #[error(
        "invalid number of elements in file '{}' at line {line}: expected {expected}, got {found}",
        path.display()
    )]
    InconsistentElementCount {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("file '{}' contains no tubes", path.display())]
    Empty { path: PathBuf },

    #[error("input file '{}' failed sanity check: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}
