//! Color sorting puzzle: pour colored liquid between tubes until every
//! tube holds a single color.
//!
//! This crate provides the tube/chunk pouring algebra, an undo log that
//! makes every pour reversible, a seeded board generator, a text board
//! loader, and a naive backtracking solver.

pub mod board;
pub mod color_pool;
pub mod error;
pub mod input;
pub mod log;
pub mod play;
pub mod report;
pub mod seed;
pub mod solver;
pub mod tube;
pub mod validate;

// Re-export main types
pub use board::{Board, GameConfig, Origin};
pub use error::{BoardError, LoadError, PourError, TubeFull, ValidationError};
pub use input::{read_board, RawBoard};
pub use log::{Action, ActionLog};
pub use solver::{find_solution, solve, DestinationPolicy, SolverConfig, SolverResult};
pub use tube::{Color, ColorChunk, Slot, Tube};
