//! Spawn position generation inside the arena's margin-inset rectangle

use rand::Rng;
use shared::{SPAWN_MIN_X, SPAWN_MIN_Y, SPAWN_RANGE_X, SPAWN_RANGE_Y};

/// Returns a uniformly random position with x in [20, 620) and y in [40, 440).
///
/// Both players and collectibles spawn here. The rectangle is inset from the
/// movement clamps so fresh entities are always fully visible and never sit
/// on a wall.
pub fn random_position<R: Rng>(rng: &mut R) -> (i32, i32) {
    let x = rng.gen_range(SPAWN_MIN_X..SPAWN_MIN_X + SPAWN_RANGE_X);
    let y = rng.gen_range(SPAWN_MIN_Y..SPAWN_MIN_Y + SPAWN_RANGE_Y);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_positions_stay_inside_spawn_bounds() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..10_000 {
            let (x, y) = random_position(&mut rng);
            assert!((SPAWN_MIN_X..SPAWN_MIN_X + SPAWN_RANGE_X).contains(&x));
            assert!((SPAWN_MIN_Y..SPAWN_MIN_Y + SPAWN_RANGE_Y).contains(&y));
        }
    }

    #[test]
    fn test_positions_cover_the_rectangle() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut seen_left = false;
        let mut seen_right = false;
        let mut seen_top = false;
        let mut seen_bottom = false;

        for _ in 0..10_000 {
            let (x, y) = random_position(&mut rng);
            seen_left |= x < SPAWN_MIN_X + SPAWN_RANGE_X / 4;
            seen_right |= x >= SPAWN_MIN_X + 3 * SPAWN_RANGE_X / 4;
            seen_top |= y < SPAWN_MIN_Y + SPAWN_RANGE_Y / 4;
            seen_bottom |= y >= SPAWN_MIN_Y + 3 * SPAWN_RANGE_Y / 4;
        }

        assert!(seen_left && seen_right && seen_top && seen_bottom);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        for _ in 0..100 {
            assert_eq!(random_position(&mut rng_a), random_position(&mut rng_b));
        }
    }
}
