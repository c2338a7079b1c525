//! Naive depth-first backtracking solver.
//!
//! The search pours, recurses, and on a dead end undoes exactly the pour it
//! made through the action log. Recursion is kept on an explicit stack of
//! resume cursors so deep searches never touch the call stack.
//!
//! With the default [`DestinationPolicy::FirstFit`], only the first
//! admissible destination is ever tried for a source at a given depth, so a
//! solvable board can be reported unsolvable. [`DestinationPolicy::Exhaustive`]
//! retries every destination.
//!
//! A board state is entered at most once per search. A state seen before is
//! either on the current path, where descending again would repeat the same
//! choices forever, or was already searched without success. Under a depth
//! bound a state is entered again only when it is reached at a shallower
//! depth than before.

use std::collections::HashMap;
use std::time::Instant;

use crate::board::Board;
use crate::log::ActionLog;
use crate::tube::Tube;

/// Which destinations are explored for a source tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationPolicy {
    /// Take the first destination that accepts a pour; on backtrack move on
    /// to the next source.
    #[default]
    FirstFit,
    /// On backtrack try the remaining destinations of the same source.
    Exhaustive,
}

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub policy: DestinationPolicy,
    /// Maximum number of outstanding pours. `None` searches without bound.
    pub max_depth: Option<usize>,
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// Pours leading from the starting board to a solved one
    pub solution: Option<ActionLog>,
    /// Number of pours attempted, legal or not
    pub pours_attempted: usize,
    /// Deepest number of outstanding pours reached
    pub max_depth: usize,
    /// Time elapsed in milliseconds
    pub time_elapsed_ms: u64,
}

impl SolverResult {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

/// Where a search level resumes after its last pour was undone.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    src: usize,
    dst: usize,
}

#[derive(Debug, Default)]
struct SearchStats {
    pours_attempted: usize,
    max_depth: usize,
}

/// A single-colored source poured into a pure destination changes nothing
/// worth searching. Still legal in interactive play.
pub fn is_pointless_pour(board: &Board, src: usize, dst: usize) -> bool {
    match (board.tube(src), board.tube(dst)) {
        (Some(tube_src), Some(tube_dst)) => tube_src.is_single_colored() && tube_dst.is_pure(),
        _ => false,
    }
}

/// Search for a sequence of pours that solves `board`.
///
/// On success the board is left in the solved arrangement and the solution
/// is returned; callers that want the starting board back should run
/// `Board::revert_all` on a clone of the solution. On failure the board is
/// exactly as it was on entry. Pure tubes are never used as sources, so a
/// board that is already solved has no search path and yields no solution.
pub fn solve(board: &mut Board, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    let mut log = ActionLog::new();
    let mut stats = SearchStats::default();

    let found = search(board, &mut log, config, &mut stats);

    let result = SolverResult {
        solution: found.then_some(log),
        pours_attempted: stats.pours_attempted,
        max_depth: stats.max_depth,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    };
    tracing::info!(
        solved = result.is_solved(),
        moves = result.solution.as_ref().map_or(0, ActionLog::len),
        pours_attempted = result.pours_attempted,
        max_depth = result.max_depth,
        elapsed_ms = result.time_elapsed_ms,
        policy = ?config.policy,
        "search finished"
    );
    result
}

/// Solve with the default configuration, returning only the solution.
pub fn find_solution(board: &mut Board) -> Option<ActionLog> {
    solve(board, &SolverConfig::default()).solution
}

fn search(
    board: &mut Board,
    log: &mut ActionLog,
    config: &SolverConfig,
    stats: &mut SearchStats,
) -> bool {
    // Shallowest depth at which each state was entered.
    let mut visited: HashMap<Vec<Tube>, usize> = HashMap::new();
    visited.insert(board.tubes().to_vec(), 0);

    // One cursor per level; every level below the top has exactly one
    // outstanding pour in `log`.
    let mut frames = vec![Cursor::default()];
    while let Some(cursor) = frames.pop() {
        let Some(taken) = next_pour(board, log, cursor, stats) else {
            // Dead end: undo the pour that led here and resume the parent.
            if frames.is_empty() {
                return false;
            }
            board.revert_one(log);
            continue;
        };

        if board.is_solved() {
            return true;
        }
        stats.max_depth = stats.max_depth.max(log.len());

        frames.push(match config.policy {
            DestinationPolicy::FirstFit => Cursor {
                src: taken.src + 1,
                dst: 0,
            },
            DestinationPolicy::Exhaustive => Cursor {
                src: taken.src,
                dst: taken.dst + 1,
            },
        });

        let depth = log.len();
        let too_deep = config.max_depth.is_some_and(|max| depth >= max);
        let seen = visited
            .get(board.tubes())
            .is_some_and(|&entered| config.max_depth.is_none() || entered <= depth);
        if too_deep || seen {
            board.revert_one(log);
        } else {
            tracing::trace!(depth, src = taken.src, dst = taken.dst, "descend");
            visited.insert(board.tubes().to_vec(), depth);
            frames.push(Cursor::default());
        }
    }
    false
}

/// Make the first admissible pour at or after `cursor`, scanning sources in
/// order and skipping pure ones.
fn next_pour(
    board: &mut Board,
    log: &mut ActionLog,
    cursor: Cursor,
    stats: &mut SearchStats,
) -> Option<Cursor> {
    let num_tubes = board.num_tubes();
    for src in cursor.src..num_tubes {
        if board.tubes()[src].is_pure() {
            continue;
        }
        let first_dst = if src == cursor.src { cursor.dst } else { 0 };
        for dst in first_dst..num_tubes {
            if dst == src || is_pointless_pour(board, src, dst) {
                continue;
            }
            stats.pours_attempted += 1;
            match board.pour(src, dst, log) {
                Ok(_) => return Some(Cursor { src, dst }),
                Err(err) => tracing::trace!(src, dst, %err, "pour rejected"),
            }
        }
    }
    None
}
