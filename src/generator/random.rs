use ndarray::Array2;

use super::*;

/// Seeded placement with no bias: every set of `mines` distinct tiles is
/// equally likely, with no carve-out around a starting tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniformGenerator {
    seed: u64,
}

impl UniformGenerator {
    pub fn new(seed: u64) -> UniformGenerator {
        UniformGenerator { seed }
    }
}

impl MinefieldGenerator for UniformGenerator {
    fn generate(self, config: BoardConfig) -> Minefield {
        use rand::prelude::*;

        let side = usize::from(config.size);
        let mut mines: Array2<bool> = Array2::default([side, side]);
        let mut free_tiles = config.total_tiles();
        let mut mines_placed: TileCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let tiles = mines.as_slice_mut().expect("layout should be standard");
            // draw an index among the still-free tiles, then walk the mask
            // skipping occupied slots until reaching it
            while mines_placed < config.mines && free_tiles > 0 {
                let mut place = usize::from(rng.random_range(0..free_tiles));
                for (i, tile) in tiles.iter_mut().enumerate() {
                    if *tile {
                        place += 1;
                    }
                    if i == place {
                        *tile = true;
                        mines_placed += 1;
                        free_tiles -= 1;
                        break;
                    }
                }
            }
        }

        let placed = mines.iter().filter(|&&tile| tile).count();
        if placed != usize::from(config.mines) {
            log::warn!(
                "generated minefield mismatch, placed {} of {} mines",
                placed,
                config.mines
            );
        }

        Minefield::from_mine_mask(mines).expect("a validated config yields a valid mask")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mines() {
        let config = BoardConfig::new(9, 10).unwrap();
        let field = UniformGenerator::new(42).generate(config);

        assert_eq!(field.size(), 9);
        assert_eq!(field.mine_count(), 10);
        assert_eq!(field.safe_tiles(), 71);
    }

    #[test]
    fn same_seed_gives_the_same_layout() {
        let config = BoardConfig::beginner();
        let first = UniformGenerator::new(7).generate(config);
        let second = UniformGenerator::new(7).generate(config);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_give_different_layouts() {
        let config = BoardConfig::intermediate();
        let first = UniformGenerator::new(1).generate(config);
        let second = UniformGenerator::new(2).generate(config);
        assert_ne!(first, second);
    }

    #[test]
    fn mine_free_and_nearly_full_layouts_work() {
        let empty = UniformGenerator::new(3).generate(BoardConfig::new(4, 0).unwrap());
        assert_eq!(empty.mine_count(), 0);

        let packed = UniformGenerator::new(3).generate(BoardConfig::new(4, 15).unwrap());
        assert_eq!(packed.mine_count(), 15);
        assert_eq!(packed.safe_tiles(), 1);
    }

    #[test]
    fn generated_counts_stay_consistent() {
        let config = BoardConfig::new(12, 30).unwrap();
        let field = UniformGenerator::new(99).generate(config);

        for x in 0..12 {
            for y in 0..12 {
                let expected = field
                    .iter_neighbors((x, y))
                    .filter(|&pos| field.contains_mine(pos))
                    .count() as u8;
                assert_eq!(field.count_at((x, y)), expected);
            }
        }
    }
}
