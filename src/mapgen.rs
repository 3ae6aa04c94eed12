//! Procedural map generation: a circular island of grass with scattered gold.

use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::model::{Grid, TileKind};

/// Tiles kept as open water between the island rim and the map edge.
const ISLAND_MARGIN: f64 = 5.0;
/// Lower bound of the per-tile radius jitter; the upper bound is 1.0.
const RIM_JITTER_MIN: f64 = 0.8;
const GOLD_CHANCE: f64 = 0.02;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainCounts {
    pub water: usize,
    pub grass: usize,
    pub gold: usize,
    pub plain: usize,
}

impl TerrainCounts {
    pub fn of(grid: &Grid) -> Self {
        let mut counts = Self::default();
        for t in grid.tiles() {
            match t.kind {
                TileKind::Water => counts.water += 1,
                TileKind::Grass => counts.grass += 1,
                TileKind::Gold => counts.gold += 1,
                TileKind::Plain => counts.plain += 1,
            }
        }
        counts
    }
}

/// Generates an island map. Shape is fixed by the dimensions; content depends on `rng`.
///
/// A tile is land when its distance from the map center is below the island
/// radius scaled by a fresh jitter in `[0.8, 1.0)`. Land turns to gold with a
/// 2% chance. Small maps have a non-positive radius and come out all water.
pub fn generate<R: Rng + ?Sized>(
    columns: u32,
    rows: u32,
    tile_size: u32,
    rng: &mut R,
) -> Result<Grid> {
    let mut grid = Grid::new(columns, rows, tile_size)?;
    let center_x = columns as f64 / 2.0;
    let center_y = rows as f64 / 2.0;
    let radius = columns.min(rows) as f64 / 2.0 - ISLAND_MARGIN;

    for y in 0..rows {
        for x in 0..columns {
            let dx = x as f64 - center_x;
            let dy = y as f64 - center_y;
            let dist = (dx * dx + dy * dy).sqrt();
            let jitter = RIM_JITTER_MIN + rng.random::<f64>() * (1.0 - RIM_JITTER_MIN);
            let mut kind = if dist < radius * jitter {
                TileKind::Grass
            } else {
                TileKind::Water
            };
            if kind == TileKind::Grass && rng.random::<f64>() < GOLD_CHANCE {
                kind = TileKind::Gold;
            }
            if let Some(t) = grid.tile_mut(x, y) {
                t.kind = kind;
            }
        }
    }

    let counts = TerrainCounts::of(&grid);
    debug!(
        columns,
        rows,
        radius,
        water = counts.water,
        grass = counts.grass,
        gold = counts.gold,
        "generated island map"
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RtsError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn tiny_map_is_all_water() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let grid = generate(5, 5, 32, &mut rng).unwrap();
        assert!(grid.tiles().all(|t| t.kind == TileKind::Water));
        assert_eq!(TerrainCounts::of(&grid).water, 25);
    }

    #[test]
    fn same_seed_same_map() {
        let a = generate(32, 24, 32, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        let b = generate(32, 24, 32, &mut ChaCha8Rng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn island_shape_holds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let grid = generate(40, 40, 16, &mut rng).unwrap();
        // radius = 15; the center is always land, the corners always sea
        let center = grid.tile(20, 20).unwrap();
        assert!(matches!(center.kind, TileKind::Grass | TileKind::Gold));
        for (x, y) in [(0, 0), (39, 0), (0, 39), (39, 39)] {
            assert_eq!(grid.tile(x, y).unwrap().kind, TileKind::Water);
        }
        // anything at or beyond the full radius is water
        for t in grid.tiles() {
            let dx = t.pos.x as f64 - 20.0;
            let dy = t.pos.y as f64 - 20.0;
            if (dx * dx + dy * dy).sqrt() >= 15.0 {
                assert_eq!(t.kind, TileKind::Water);
            }
        }
        let counts = TerrainCounts::of(&grid);
        assert_eq!(counts.plain, 0);
        assert_eq!(counts.water + counts.grass + counts.gold, 1600);
    }

    #[test]
    fn gold_is_rare_on_large_maps() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let grid = generate(200, 200, 32, &mut rng).unwrap();
        let counts = TerrainCounts::of(&grid);
        assert!(counts.gold > 0);
        assert!(counts.gold * 10 < counts.grass);
    }

    #[test]
    fn invalid_dimensions_propagate() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate(0, 5, 32, &mut rng),
            Err(RtsError::InvalidDimensions { .. })
        ));
    }
}
