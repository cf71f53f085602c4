//! Seeded decorative star placement.
//!
//! One star per cell of a fixed grid, jittered uniformly inside its cell.
//! Purely scenery; nothing in the sync core depends on these positions.

use glam::Vec2;
use rand::Rng;

/// Stars are scattered over a square grid of this many cells per side.
const STAR_GRID: u32 = 8;

/// Side length of a single star cell in world units.
const STAR_CELL: u32 = 62;

/// Produces one jittered star position per grid cell.
pub(crate) fn scatter_stars<R: Rng>(rng: &mut R) -> Vec<Vec2> {
    let mut positions = Vec::with_capacity((STAR_GRID * STAR_GRID) as usize);
    for column in 0..STAR_GRID {
        for row in 0..STAR_GRID {
            let x = rng.gen_range((column * STAR_CELL)..=(column * STAR_CELL + STAR_CELL));
            let y = rng.gen_range((row * STAR_CELL)..=(row * STAR_CELL + STAR_CELL));
            positions.push(Vec2::new(x as f32, y as f32));
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fills_every_grid_cell() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let stars = scatter_stars(&mut rng);

        assert_eq!(stars.len(), 64);
        for star in &stars {
            assert!(star.x >= 0.0 && star.x <= (STAR_GRID * STAR_CELL) as f32);
            assert!(star.y >= 0.0 && star.y <= (STAR_GRID * STAR_CELL) as f32);
        }
    }

    #[test]
    fn same_seed_scatters_identically() {
        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(scatter_stars(&mut first), scatter_stars(&mut second));
    }
}
