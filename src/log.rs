//! Action log: the undo stack of executed pours.
//!
//! The log is a plain LIFO stack. `Clone` gives an independent copy, which
//! callers use when one copy is consumed by `Board::revert_all` while the
//! other is kept for reporting.

use std::fmt;

use crate::tube::ColorChunk;

/// A successful pour. Tube indices are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    pub src: usize,
    pub dst: usize,
    pub chunk: ColorChunk,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Remove the most recent action, or `None` when the log is empty.
    pub fn pop(&mut self) -> Option<Action> {
        self.actions.pop()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in the order they were executed.
    pub fn iter(&self) -> impl Iterator<Item = &Action> + '_ {
        self.actions.iter()
    }

    /// `(src, dst)` pairs with 1-based tube indices, in execution order.
    pub fn moves(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.actions.iter().map(|a| (a.src + 1, a.dst + 1))
    }
}

impl<'a> IntoIterator for &'a ActionLog {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

/// Numbered move list, one `n: src dst` line per action.
impl fmt::Display for ActionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.len() + 1).to_string().len();
        for (i, (src, dst)) in self.moves().enumerate() {
            writeln!(f, "{:>width$}: {:>2} {:>2}", i + 1, src, dst)?;
        }
        Ok(())
    }
}
