//! Raw random sampling of terrain and numbers onto the slots.
//!
//! This knows nothing about placement rules. Both inventories are shuffled as
//! flat lists and dealt out in tile-id order, so every draw consumes them
//! exactly.

use crate::board::{number_pool, terrain_pool, Board};
use rand::seq::SliceRandom;
use rand::Rng;

/// Deal one uniformly random terrain + number assignment.
pub fn random_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut terrains = terrain_pool();
    terrains.shuffle(rng);

    let mut numbers = number_pool();
    numbers.shuffle(rng);
    let mut numbers = numbers.into_iter();

    Board::from_parts_unchecked(terrains.into_iter().map(|terrain| {
        let number = if terrain.is_desert() { None } else { numbers.next() };
        (terrain, number)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{NUMBER_INVENTORY, TERRAIN_INVENTORY};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    #[test]
    fn test_draws_consume_inventories_exactly() {
        let mut rng = StdRng::seed_from_u64(7);
        let terrains: BTreeMap<_, _> = TERRAIN_INVENTORY.iter().copied().collect();
        let numbers: BTreeMap<_, _> = NUMBER_INVENTORY.iter().copied().collect();

        for _ in 0..50 {
            let board = random_board(&mut rng);
            assert_eq!(board.terrain_counts(), terrains);
            assert_eq!(board.number_counts(), numbers);
            for tile in board.tiles() {
                assert_eq!(tile.terrain.is_desert(), tile.number.is_none());
            }
        }
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = random_board(&mut StdRng::seed_from_u64(42));
        let b = random_board(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_desert_moves_around() {
        let mut rng = StdRng::seed_from_u64(3);
        let deserts: std::collections::HashSet<_> =
            (0..100).filter_map(|_| random_board(&mut rng).desert()).collect();
        assert!(deserts.len() > 5, "desert landed on only {:?}", deserts);
    }
}
