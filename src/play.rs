//! Interactive, line-based play session.

use std::io::{self, BufRead, Write};

use crate::board::Board;
use crate::log::ActionLog;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pour from `src` into `dst` (0-based).
    Move { src: usize, dst: usize },
    Revert,
    Quit,
    Invalid,
}

impl Command {
    /// Parse a line. If it contains a letter, the first letter decides:
    /// `r` reverts, `q` quits (case-insensitive), anything else is invalid.
    /// Otherwise it must hold two 1-based tube numbers separated by anything
    /// that is not a digit.
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        if let Some(letter) = line.chars().find(|c| c.is_alphabetic()) {
            return match letter.to_ascii_lowercase() {
                'r' => Command::Revert,
                'q' => Command::Quit,
                _ => Command::Invalid,
            };
        }

        let numbers = match line
            .split(|c: char| !c.is_ascii_digit())
            .filter(|token| !token.is_empty())
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(numbers) => numbers,
            Err(_) => return Command::Invalid,
        };
        match numbers.as_slice() {
            &[src, dst] if src >= 1 && dst >= 1 => Command::Move {
                src: src - 1,
                dst: dst - 1,
            },
            _ => Command::Invalid,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Solved,
    Quit,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub end: SessionEnd,
    /// Pours still in effect when the session ended.
    pub moves: usize,
}

const PROMPT: &str = "Src and dst tube: ";

/// Run an interactive session on `board`, reading commands from `input`
/// and printing the board to `out` after every accepted command.
///
/// Illegal moves and reverts with nothing to undo are ignored; the board
/// is reprinted either way. Invalid input just prompts again.
pub fn play<R: BufRead, W: Write>(
    board: &mut Board,
    input: R,
    mut out: W,
) -> io::Result<SessionSummary> {
    let mut log = ActionLog::new();
    let summary = |end, log: &ActionLog| SessionSummary {
        end,
        moves: log.len(),
    };

    writeln!(out, "{}", board)?;
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;
        let Some(line) = lines.next() else {
            writeln!(out)?;
            return Ok(summary(SessionEnd::EndOfInput, &log));
        };

        match Command::parse(&line?) {
            Command::Quit => return Ok(summary(SessionEnd::Quit, &log)),
            Command::Invalid => continue,
            Command::Move { src, dst } => {
                if let Err(err) = board.pour(src, dst, &mut log) {
                    tracing::debug!(src = src + 1, dst = dst + 1, %err, "move ignored");
                }
            }
            Command::Revert => {
                if board.revert_one(&mut log).is_none() {
                    tracing::debug!("nothing to revert");
                }
            }
        }

        writeln!(out, "{}", board)?;
        if board.is_solved() {
            writeln!(out, "Congratulations, all tubes are sorted!")?;
            return Ok(summary(SessionEnd::Solved, &log));
        }
    }
}
