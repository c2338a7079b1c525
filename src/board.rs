//! Board state: generation, loading, pour dispatch and win detection.

use std::fmt;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color_pool::ColorPool;
use crate::error::{BoardError, PourError};
use crate::input::RawBoard;
use crate::log::{Action, ActionLog};
use crate::tube::{ColorChunk, Slot, Tube};

/// Parameters for a generated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub num_colors: usize,
    pub num_extra: usize,
    pub num_slots: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_colors: 5,
            num_extra: 2,
            num_slots: 4,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), BoardError> {
        for (name, value) in [
            ("colors", self.num_colors),
            ("extra tubes", self.num_extra),
            ("slots per tube", self.num_slots),
        ] {
            if value < 1 {
                return Err(BoardError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Where a board came from. Only used to name output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Seed(u32),
    File(PathBuf),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Seed(seed) => write!(f, "seed {}", seed),
            Origin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The full game state.
///
/// The first `num_tubes - num_extra` tubes are color tubes, the rest are
/// extra tubes that start empty on generated boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tubes: Vec<Tube>,
    num_extra: usize,
    origin: Origin,
}

impl Board {
    /// Generate a random well-formed board, deterministically from `seed`.
    ///
    /// Every color tube ends up full, every color appears `num_slots` times
    /// and the extra tubes are empty. Solvability is not checked.
    pub fn generate(config: &GameConfig, seed: u32) -> Result<Self, BoardError> {
        config.validate()?;
        let GameConfig {
            num_colors,
            num_extra,
            num_slots,
        } = *config;

        let mut rng = StdRng::seed_from_u64(u64::from(seed));
        let mut tubes = vec![Tube::new(num_slots); num_colors + num_extra];
        let mut pool = ColorPool::full(num_colors, num_slots);

        while let Some(color) = pool.draw(&mut rng) {
            // Retry until a color tube with room is hit; the pool never holds
            // more units than the color tubes have slots.
            loop {
                let index = rng.random_range(0..num_colors);
                if tubes[index].add_color(color).is_ok() {
                    break;
                }
            }
        }

        tracing::debug!(seed, num_colors, num_extra, num_slots, "generated board");
        Ok(Self {
            tubes,
            num_extra,
            origin: Origin::Seed(seed),
        })
    }

    /// Build a board from loader output, replaying `add_color` for every
    /// filled slot in file order. Empty slots inside a row therefore float
    /// to the open end.
    ///
    /// The per-color invariant is not re-checked here; `RawBoard`s produced
    /// by `input::read_board` are already validated.
    ///
    /// # Panics
    ///
    /// If `raw.slots` does not hold exactly `num_tubes * num_slots` slots.
    pub fn load(raw: &RawBoard, source: impl Into<PathBuf>) -> Self {
        let n = raw.num_slots;
        assert_eq!(
            raw.slots.len(),
            raw.num_tubes * n,
            "RawBoard must hold num_tubes * num_slots slots"
        );
        let tubes = (0..raw.num_tubes)
            .map(|i| {
                let row = &raw.slots[i * n..(i + 1) * n];
                match Tube::with_colors(n, row.iter().flatten().copied()) {
                    Ok(tube) => tube,
                    Err(err) => unreachable!("row of {} slots overflowed: {}", n, err),
                }
            })
            .collect();

        Self {
            tubes,
            num_extra: raw.num_tubes.saturating_sub(raw.num_colors),
            origin: Origin::File(source.into()),
        }
    }

    pub fn num_tubes(&self) -> usize {
        self.tubes.len()
    }

    pub fn num_extra(&self) -> usize {
        self.num_extra
    }

    pub fn num_colors(&self) -> usize {
        self.tubes.len() - self.num_extra
    }

    pub fn num_slots(&self) -> usize {
        self.tubes.first().map_or(0, Tube::capacity)
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    pub fn tube(&self, index: usize) -> Option<&Tube> {
        self.tubes.get(index)
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Every tube is pure.
    pub fn is_solved(&self) -> bool {
        self.tubes.iter().all(Tube::is_pure)
    }

    /// Pour tube `src` into tube `dst` (0-based) and log the action.
    pub fn pour(
        &mut self,
        src: usize,
        dst: usize,
        log: &mut ActionLog,
    ) -> Result<ColorChunk, PourError> {
        let (tube_src, tube_dst) = self.tube_pair_mut(src, dst)?;
        let chunk = tube_src.pour(tube_dst)?;
        log.push(Action { src, dst, chunk });
        Ok(chunk)
    }

    /// Undo the most recent action in `log`, or `None` if it is empty.
    pub fn revert_one(&mut self, log: &mut ActionLog) -> Option<Action> {
        let action = log.pop()?;
        match self.tube_pair_mut(action.src, action.dst) {
            Ok((tube_src, tube_dst)) => tube_src.revert(tube_dst, action.chunk),
            Err(err) => tracing::error!(?action, %err, "logged action does not fit board"),
        }
        Some(action)
    }

    /// Undo every action in `log`, leaving it empty.
    pub fn revert_all(&mut self, log: &mut ActionLog) {
        while self.revert_one(log).is_some() {}
    }

    /// File name for the solution report: `seed<seed>.solution` or the
    /// source path with `.solution` appended.
    pub fn solution_path(&self) -> PathBuf {
        match &self.origin {
            Origin::Seed(seed) => PathBuf::from(format!("seed{}.solution", seed)),
            Origin::File(path) => {
                let mut name = path.clone().into_os_string();
                name.push(".solution");
                PathBuf::from(name)
            }
        }
    }

    fn tube_pair_mut(
        &mut self,
        src: usize,
        dst: usize,
    ) -> Result<(&mut Tube, &mut Tube), PourError> {
        let num_tubes = self.tubes.len();
        for index in [src, dst] {
            if index >= num_tubes {
                return Err(PourError::OutOfRange { index, num_tubes });
            }
        }
        if src == dst {
            return Err(PourError::SameTube);
        }

        if src < dst {
            let (head, tail) = self.tubes.split_at_mut(dst);
            Ok((&mut head[src], &mut tail[0]))
        } else {
            let (head, tail) = self.tubes.split_at_mut(src);
            Ok((&mut tail[0], &mut head[dst]))
        }
    }
}

/// One line per tube: right-aligned 1-based index, colon, then the slots
/// from the closed end, with `-1` for empty slots.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |slot: &Slot| match slot {
            Some(color) => color.to_string(),
            None => "-1".to_string(),
        };
        let tube_width = self.num_tubes().to_string().len();
        let slot_width = self
            .tubes
            .iter()
            .flat_map(|tube| tube.slots().iter().map(render))
            .map(|s| s.len())
            .max()
            .unwrap_or(1);

        for (i, tube) in self.tubes.iter().enumerate() {
            let slots: Vec<String> = tube
                .slots()
                .iter()
                .map(|slot| format!("{:>slot_width$}", render(slot)))
                .collect();
            writeln!(f, "{:>tube_width$}: {}", i + 1, slots.join(", "))?;
        }
        Ok(())
    }
}
