use alloc::vec::Vec;

use super::*;

/// Uniformly random placement that keeps the first click and its neighbors
/// free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMapGenerator {
    seed: u64,
}

impl RandomMapGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MapGenerator for RandomMapGenerator {
    fn generate(&mut self, placer: &mut MinePlacer<'_>, first_click: Coord2) -> Result<()> {
        use rand::prelude::*;

        let (rows, cols) = placer.size();
        let mut candidates: Vec<Coord2> = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| !is_adjacent_or_same(coords, first_click))
            .collect();

        let mines = usize::from(placer.total_mines());
        if mines > candidates.len() {
            log::warn!(
                "Cannot keep first click safe, requested {} mines but only {} cells are outside the safe zone",
                mines,
                candidates.len()
            );
            return Err(GameError::TooManyMines);
        }

        // partial Fisher-Yates, the first `mines` candidates end up chosen
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..mines {
            let pick = rng.random_range(i..candidates.len());
            candidates.swap(i, pick);
            placer.place_mine(candidates[i])?;
        }

        log::debug!(
            "Placed {} mines around first click {:?} (seed {})",
            placer.placed(),
            first_click,
            self.seed
        );
        Ok(())
    }
}
