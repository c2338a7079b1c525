//! Pool of color units still to be placed while generating a board.

use rand::Rng;

use crate::tube::Color;

/// Remaining units per color, indexed by color value.
#[derive(Debug, Clone)]
pub struct ColorPool {
    remaining: Vec<usize>,
}

impl ColorPool {
    /// A pool holding `num_slots` units of each of `num_colors` colors.
    pub fn full(num_colors: usize, num_slots: usize) -> Self {
        Self {
            remaining: vec![num_slots; num_colors],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.iter().all(|&n| n == 0)
    }

    /// Draw one unit of a uniformly chosen color that still has units left.
    ///
    /// Colors are rejection-sampled over the whole range, so the sequence of
    /// random draws depends only on the pool contents and the RNG state.
    /// Returns `None` once the pool is exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Color> {
        if self.is_empty() {
            return None;
        }
        loop {
            let index = rng.random_range(0..self.remaining.len());
            if self.remaining[index] > 0 {
                self.remaining[index] -= 1;
                return Some(Color(index as u32));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_exhausts_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = ColorPool::full(3, 4);
        let mut counts = [0usize; 3];

        while let Some(color) = pool.draw(&mut rng) {
            counts[color.0 as usize] += 1;
        }

        assert_eq!(counts, [4, 4, 4]);
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), None);
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(ColorPool::full(0, 4).is_empty());
        assert!(ColorPool::full(3, 0).draw(&mut rng).is_none());
    }
}
