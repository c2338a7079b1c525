//! Tubes, slots and the chunk algebra behind every pour.
//!
//! Slots are stored from the closed end (index 0) to the open end (last
//! index). Filled slots always form a prefix: `add_color` fills the first
//! empty slot, and pours only ever take from or add to the open end.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{PourError, TubeFull};

/// Color identifier of a filled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One position in a tube: `None` is an empty slot.
pub type Slot = Option<Color>;

/// Maximal run of one color at a tube's open end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorChunk {
    pub color: Color,
    pub count: usize,
}

/// Fixed-capacity container of colored slots with one open end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tube {
    slots: SmallVec<[Slot; 8]>,
}

impl Tube {
    /// Create an empty tube with `num_slots` slots.
    pub fn new(num_slots: usize) -> Self {
        Self {
            slots: SmallVec::from_elem(None, num_slots),
        }
    }

    /// Create a tube and fill it from the closed end with `colors`.
    pub fn with_colors(
        num_slots: usize,
        colors: impl IntoIterator<Item = Color>,
    ) -> Result<Self, TubeFull> {
        let mut tube = Self::new(num_slots);
        for color in colors {
            tube.add_color(color)?;
        }
        Ok(tube)
    }

    /// Number of slots (filled or not).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots from the closed end to the open end.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    /// Number of filled slots, counted from the closed end up to the
    /// outermost filled slot.
    fn level(&self) -> usize {
        self.slots
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn free_slots(&self) -> usize {
        self.capacity() - self.level()
    }

    /// All slots hold the same value. An empty tube is pure.
    pub fn is_pure(&self) -> bool {
        match self.slots.first() {
            Some(first) => self.slots.iter().all(|slot| slot == first),
            None => true,
        }
    }

    /// All filled slots share one color, ignoring empty slots.
    pub fn is_single_colored(&self) -> bool {
        let mut colors = self.slots.iter().flatten();
        match colors.next() {
            Some(first) => colors.all(|color| color == first),
            None => true,
        }
    }

    /// Color of the outermost filled slot.
    pub fn top_color(&self) -> Option<Color> {
        self.slots.iter().rev().find_map(|slot| *slot)
    }

    /// Put `color` into the first empty slot from the closed end.
    ///
    /// Only used while building a board, never during play.
    pub fn add_color(&mut self, color: Color) -> Result<(), TubeFull> {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(color);
                Ok(())
            }
            None => Err(TubeFull {
                capacity: self.capacity(),
            }),
        }
    }

    /// The run of equal colors contiguous from the open end, or `None` for
    /// an empty tube.
    pub fn top_chunk(&self) -> Option<ColorChunk> {
        let mut filled = self.slots.iter().rev().skip_while(|slot| slot.is_none());
        let color = (*filled.next()?)?;
        let count = 1 + filled.take_while(|slot| **slot == Some(color)).count();
        Some(ColorChunk { color, count })
    }

    /// Pour the top chunk of `self` into `dst`.
    ///
    /// On success the moved chunk is returned; on failure neither tube is
    /// modified.
    pub fn pour(&mut self, dst: &mut Tube) -> Result<ColorChunk, PourError> {
        if self.is_empty() {
            return Err(PourError::EmptySource);
        }
        if dst.is_full() {
            return Err(PourError::FullDestination);
        }
        let chunk = self.top_chunk().ok_or(PourError::EmptySource)?;
        if let Some(top) = dst.top_color() {
            if top != chunk.color {
                return Err(PourError::ColorMismatch {
                    chunk: chunk.color,
                    top,
                });
            }
        }
        let free = dst.free_slots();
        if chunk.count > free {
            return Err(PourError::Overflow {
                count: chunk.count,
                free,
            });
        }

        dst.push_chunk(chunk);
        self.remove_chunk(chunk);
        Ok(chunk)
    }

    /// Undo a pour of `chunk` from `self` into `dst`.
    ///
    /// No legality checks: `chunk` must be exactly what the matching
    /// `pour` returned, and no other pour on either tube may have happened
    /// since (other than ones already reverted).
    pub fn revert(&mut self, dst: &mut Tube, chunk: ColorChunk) {
        dst.remove_chunk(chunk);
        self.push_chunk(chunk);
    }

    fn push_chunk(&mut self, chunk: ColorChunk) {
        let level = self.level();
        debug_assert!(level + chunk.count <= self.capacity());
        self.slots
            .iter_mut()
            .skip(level)
            .take(chunk.count)
            .for_each(|slot| *slot = Some(chunk.color));
    }

    fn remove_chunk(&mut self, chunk: ColorChunk) {
        let level = self.level();
        self.slots[..level]
            .iter_mut()
            .rev()
            .take(chunk.count)
            .take_while(|slot| **slot == Some(chunk.color))
            .for_each(|slot| *slot = None);
    }
}
