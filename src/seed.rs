//! Fresh seeds for generated boards.
//!
//! Generation itself is fully determined by the seed it is given; this is
//! the only place that consults environment entropy.

/// A new seed drawn from the thread-local, OS-seeded generator.
pub fn fresh_seed() -> u32 {
    let seed = rand::random::<u32>();
    tracing::debug!(seed, "drew fresh seed");
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_seeds_vary() {
        let seeds: std::collections::HashSet<u32> = (0..16).map(|_| fresh_seed()).collect();
        assert!(seeds.len() > 1);
    }
}
