//! Solution reports.
//!
//! The text report is the starting board in display form, a blank line,
//! then the numbered list of 1-based `src dst` moves. The JSON report
//! carries the same data for tools.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::log::ActionLog;
use crate::tube::Slot;

/// A single 1-based move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolutionReport {
    pub source: String,
    pub num_slots: usize,
    /// Starting tubes, slots from the closed end, `null` for empty.
    pub tubes: Vec<Vec<Slot>>,
    pub moves: Vec<Move>,
}

impl SolutionReport {
    /// Build a report for `solution` applied to `board` in its starting
    /// arrangement.
    pub fn new(board: &Board, solution: &ActionLog) -> Self {
        Self {
            source: board.origin().to_string(),
            num_slots: board.num_slots(),
            tubes: board.tubes().iter().map(|t| t.slots().to_vec()).collect(),
            moves: solution
                .moves()
                .map(|(from, to)| Move { from, to })
                .collect(),
        }
    }
}

/// Undo `solution` on a board the solver left solved, keeping `solution`
/// intact for reporting.
pub fn rewind(board: &mut Board, solution: &ActionLog) {
    let mut scratch = solution.clone();
    board.revert_all(&mut scratch);
}

/// Text report for `solution` starting from `board`.
pub fn render_text(board: &Board, solution: &ActionLog) -> String {
    format!("{}\n{}", board, solution)
}

/// Write the text report next to the board source and return its path.
pub fn write_text(board: &Board, solution: &ActionLog) -> io::Result<PathBuf> {
    let path = board.solution_path();
    fs::write(&path, render_text(board, solution))?;
    tracing::info!(path = %path.display(), moves = solution.len(), "wrote solution");
    Ok(path)
}

/// Write `report` as pretty-printed JSON to `path`.
pub fn write_json(report: &SolutionReport, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "wrote JSON solution");
    Ok(())
}

/// `<solution path>.json`
pub fn json_path(board: &Board) -> PathBuf {
    let mut name = board.solution_path().into_os_string();
    name.push(".json");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_board;
    use crate::solver::find_solution;

    fn solved_pair(dir: &Path) -> (Board, ActionLog) {
        let source = dir.join("two.txt");
        let raw = parse_board("0 1\n1 0\n-1 -1\n", &source).unwrap();
        let mut board = Board::load(&raw, &source);
        let solution = find_solution(&mut board).unwrap();
        (board, solution)
    }

    #[test]
    fn test_rewind_restores_start() {
        let dir = tempfile::tempdir().unwrap();
        let (mut board, solution) = solved_pair(dir.path());
        assert!(board.is_solved());

        rewind(&mut board, &solution);
        assert!(!board.is_solved());
        assert_eq!(solution.len(), 3);
    }

    #[test]
    fn test_text_report() {
        let dir = tempfile::tempdir().unwrap();
        let (mut board, solution) = solved_pair(dir.path());
        rewind(&mut board, &solution);

        let path = write_text(&board, &solution).unwrap();
        assert_eq!(path, dir.path().join("two.txt.solution"));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1:  0,  1\n2:  1,  0\n3: -1, -1\n\n1:  1  3\n2:  2  1\n3:  2  3\n"
        );
    }

    #[test]
    fn test_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let (mut board, solution) = solved_pair(dir.path());
        rewind(&mut board, &solution);

        let report = SolutionReport::new(&board, &solution);
        let path = json_path(&board);
        write_json(&report, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: SolutionReport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.moves[0], Move { from: 1, to: 3 });
        assert_eq!(parsed.tubes[2], vec![None, None]);
    }
}
