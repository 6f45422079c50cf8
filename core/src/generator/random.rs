use super::*;

/// Uniform random placement that keeps the clipped 3x3 block around the center clear.
///
/// Cells are drawn uniformly over the whole board and rejected when they fall in the safe
/// zone or already hold a mine. The same seed always yields the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RejectionSampler {
    fn generate(self, config: &BoardConfig) -> MineLayout {
        use rand::prelude::*;

        let size = config.size();
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());
        if size.0 == 0 || size.1 == 0 {
            return MineLayout::from_mine_mask(mines);
        }

        let mut safe: Array2<bool> = Array2::default(size.to_nd_index());
        for coords in safe_zone(size) {
            safe[coords.to_nd_index()] = true;
        }

        let available = config.total_cells() - safe.iter().filter(|&&s| s).count() as CellCount;
        let target = if config.mines > available {
            log::warn!(
                "Cannot fit {} mines outside the safe zone, placing {} instead",
                config.mines,
                available
            );
            available
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed = 0;
        let mut draws = 0u64;
        while mines_placed < target {
            let coords: Coord2 = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            draws += 1;
            let index = coords.to_nd_index();
            if !safe[index] && !mines[index] {
                mines[index] = true;
                mines_placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on {}x{} with seed {} after {} draws",
            mines_placed,
            size.0,
            size.1,
            self.seed,
            draws
        );
        MineLayout::from_mine_mask(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(config: BoardConfig, seed: u64) -> MineLayout {
        RejectionSampler::new(seed).generate(&config)
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..20 {
            let layout = generate(BoardConfig::new(10, 10, 50), seed);
            assert_eq!(layout.mine_count(), 50);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = BoardConfig::new(16, 30, 99);
        assert_eq!(generate(config, 7), generate(config, 7));
        assert_ne!(generate(config, 7), generate(config, 8));
    }

    #[test]
    fn safe_zone_stays_clear() {
        for seed in 0..50 {
            let layout = generate(BoardConfig::new(6, 7, 21), seed);
            assert_eq!(layout.mine_in_safe_zone(), None, "seed {seed}");
        }
    }

    #[test]
    fn dense_narrow_board_still_terminates() {
        let layout = generate(BoardConfig::new(1, 6, 3), 3);
        assert_eq!(layout.mine_count(), 3);
        assert!(layout.contains_mine((0, 0)));
        assert!(layout.contains_mine((0, 1)));
        assert!(layout.contains_mine((0, 5)));
    }

    #[test]
    fn oversized_request_is_capped() {
        let layout = generate(BoardConfig::new(3, 3, 4), 0);
        assert_eq!(layout.mine_count(), 0);
    }
}
