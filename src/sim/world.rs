//! Tile world storage and terrain generation
//!
//! The world is a bounded, dense grid indexed by integer column/row with rows
//! growing downward. Anything outside the grid reads as Air and ignores
//! writes, so callers never need to bounds-check.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::tile::TileKind;
use crate::settings::TerrainConfig;
use crate::span_to_tiles;

/// Bounded 2-D tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    /// Seed the terrain was generated from (0 for hand-built worlds)
    seed: u64,
    /// Row-major tile storage
    tiles: Vec<TileKind>,
    /// Non-Air kinds that do not block movement
    pass_through: Vec<TileKind>,
}

impl WorldGrid {
    /// Empty (all Air) world
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: 0,
            tiles: vec![TileKind::Air; width * height],
            pass_through: TerrainConfig::default().pass_through,
        }
    }

    /// Generate terrain with the default terrain parameters
    pub fn generate(width: usize, height: usize, seed: u64) -> Self {
        Self::generate_with(&TerrainConfig::default(), width, height, seed)
    }

    /// Generate terrain from a seed
    pub fn generate_with(config: &TerrainConfig, width: usize, height: usize, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = Self::generate_with_rng(config, width, height, &mut rng);
        world.seed = seed;
        world
    }

    /// Generate terrain drawing all randomness from `rng`
    pub fn generate_with_rng<R: Rng>(
        config: &TerrainConfig,
        width: usize,
        height: usize,
        rng: &mut R,
    ) -> Self {
        let mut world = Self::new(width, height);
        world.pass_through = config.pass_through.clone();

        // Terrain pass first so canopies can spill into neighbouring columns
        let mut grounds = Vec::with_capacity(width);
        for x in 0..width as i32 {
            let ground = ground_height(config, x, height);
            grounds.push(ground);
            for y in 0..height as i32 {
                let depth = y - ground;
                let kind = if depth < 0 {
                    TileKind::Air
                } else if depth == 0 {
                    TileKind::Grass
                } else if depth <= config.dirt_depth {
                    TileKind::Dirt
                } else {
                    stone_or_ore(config, depth, rng)
                };
                world.set_tile(x, y, kind);
            }
        }

        let mut trees = 0;
        for (x, &ground) in grounds.iter().enumerate() {
            if rng.random::<f32>() < config.tree_chance {
                let trunk_max = config.trunk_max.max(config.trunk_min);
                let trunk = rng.random_range(config.trunk_min..=trunk_max);
                world.plant_tree(x as i32, ground, trunk, config.canopy_radius);
                trees += 1;
            }
        }

        log::info!(
            "Generated {}x{} world ({} trees)",
            width,
            height,
            trees
        );
        world
    }

    /// Trunk of Wood above `ground`, Leaves canopy around its top.
    /// Only Air is filled, so neighbouring trees keep their cells.
    fn plant_tree(&mut self, x: i32, ground: i32, trunk: i32, radius: i32) {
        if self.get_tile(x, ground) != TileKind::Grass {
            return;
        }
        for t in 1..=trunk {
            if self.get_tile(x, ground - t).is_air() {
                self.set_tile(x, ground - t, TileKind::Wood);
            }
        }
        let top = ground - trunk;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                // trim corners
                if radius > 0 && dx.abs() == radius && dy.abs() == radius {
                    continue;
                }
                if self.get_tile(x + dx, top + dy).is_air() {
                    self.set_tile(x + dx, top + dy, TileKind::Leaves);
                }
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// World extent in pixels
    pub fn pixel_size(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            self.width as f32 * tile_size,
            self.height as f32 * tile_size,
        )
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    /// Tile at `(x, y)`, Air outside the grid
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        self.index(x, y)
            .map(|i| self.tiles[i])
            .unwrap_or(TileKind::Air)
    }

    /// Overwrite the tile at `(x, y)`; ignored outside the grid
    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = kind;
        }
    }

    /// Whether `kind` blocks movement in this world
    pub fn kind_is_solid(&self, kind: TileKind) -> bool {
        kind.is_solid_by_default() && !self.pass_through.contains(&kind)
    }

    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.kind_is_solid(self.get_tile(x, y))
    }

    pub fn pass_through(&self) -> &[TileKind] {
        &self.pass_through
    }

    pub fn set_pass_through(&mut self, kinds: Vec<TileKind>) {
        self.pass_through = kinds;
    }

    /// Whether an axis-aligned box (pixels, top-left origin) touches any solid tile
    pub fn box_overlaps_solid(&self, pos: Vec2, size: Vec2, tile_size: f32) -> bool {
        let (x0, x1) = span_to_tiles(pos.x, size.x, tile_size);
        let (y0, y1) = span_to_tiles(pos.y, size.y, tile_size);
        (y0..=y1).any(|y| (x0..=x1).any(|x| self.is_solid(x, y)))
    }

    /// First Grass row scanning column `x` top-down
    pub fn ground_row(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.get_tile(x, y) == TileKind::Grass)
    }

    /// First solid row scanning column `x` top-down
    pub fn surface_row(&self, x: i32) -> Option<i32> {
        (0..self.height as i32).find(|&y| self.is_solid(x, y))
    }

    /// Spawn position for a body of `body_size`: standing on the first Grass
    /// tile of `column`, or on the first solid tile if the column has no Grass.
    pub fn spawn_point(&self, column: i32, tile_size: f32, body_size: Vec2) -> Vec2 {
        let column = column.clamp(0, self.width.saturating_sub(1) as i32);
        let x = column as f32 * tile_size;
        let Some(row) = self.ground_row(column).or_else(|| self.surface_row(column)) else {
            return Vec2::new(x, 0.0);
        };

        let mut pos = Vec2::new(x, row as f32 * tile_size - body_size.y);
        // Lift out of anything solid sitting on the ground tile
        while pos.y > -body_size.y && self.box_overlaps_solid(pos, body_size, tile_size) {
            pos.y -= tile_size;
        }
        pos
    }

    /// Column-major copy of the tiles (`columns[x][y]`)
    pub fn to_columns(&self) -> Vec<Vec<TileKind>> {
        (0..self.width as i32)
            .map(|x| (0..self.height as i32).map(|y| self.get_tile(x, y)).collect())
            .collect()
    }

    /// Build from column-major tiles; every column must have the same length
    pub fn from_columns(columns: &[Vec<TileKind>]) -> Option<Self> {
        let width = columns.len();
        let height = columns.first().map_or(0, |c| c.len());
        if columns.iter().any(|c| c.len() != height) {
            return None;
        }
        let mut world = Self::new(width, height);
        for (x, column) in columns.iter().enumerate() {
            for (y, &kind) in column.iter().enumerate() {
                world.set_tile(x as i32, y as i32, kind);
            }
        }
        Some(world)
    }

    /// Count of tiles of a given kind
    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&k| k == kind).count()
    }
}

/// Ground row of column `x`: sine height field around the base height,
/// clamped into the grid.
pub fn ground_height(config: &TerrainConfig, x: i32, height: usize) -> i32 {
    let base = (height as f32 * config.base_height_ratio).floor() as i32;
    let offset = (config.amplitude * (x as f32 * config.frequency).sin()).floor() as i32;
    (base + offset).clamp(0, height.saturating_sub(1) as i32)
}

fn stone_or_ore<R: Rng>(config: &TerrainConfig, depth: i32, rng: &mut R) -> TileKind {
    let roll = rng.random::<f32>();
    if depth > config.iron_min_depth && roll < config.iron_chance {
        TileKind::IronOre
    } else if roll < config.iron_chance + config.coal_chance {
        TileKind::CoalOre
    } else {
        TileKind::Stone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_air_and_ignores_writes() {
        let mut world = WorldGrid::generate(10, 20, 1);
        let before = world.clone();
        assert_eq!(world.get_tile(-1, 5), TileKind::Air);
        assert_eq!(world.get_tile(10, 5), TileKind::Air);
        assert_eq!(world.get_tile(3, 20), TileKind::Air);
        assert!(!world.is_solid(3, 999));

        world.set_tile(-1, 0, TileKind::Stone);
        world.set_tile(10, 19, TileKind::Stone);
        world.set_tile(0, -3, TileKind::Stone);
        assert_eq!(world, before);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = WorldGrid::generate(120, 60, 7);
        let b = WorldGrid::generate(120, 60, 7);
        assert_eq!(a, b);

        let c = WorldGrid::generate(120, 60, 8);
        assert_ne!(a.to_columns(), c.to_columns());
    }

    #[test]
    fn test_column_five_of_small_world() {
        let world = WorldGrid::generate(10, 20, 42);
        // base 10, 5 * sin(0.75) = 3.408 -> 3
        let expected = 10 + (5.0f32 * (5.0f32 * 0.15).sin()).floor() as i32;
        assert_eq!(expected, 13);
        assert_eq!(ground_height(&TerrainConfig::default(), 5, 20), expected);
        assert_eq!(world.get_tile(5, expected), TileKind::Grass);
        assert_eq!(world.get_tile(5, expected + 1), TileKind::Dirt);
        assert_eq!(world.ground_row(5), Some(expected));
    }

    #[test]
    fn test_layering() {
        let config = TerrainConfig {
            tree_chance: 0.0,
            coal_chance: 0.0,
            iron_chance: 0.0,
            ..TerrainConfig::default()
        };
        let world = WorldGrid::generate_with(&config, 30, 40, 3);
        for x in 0..30 {
            let ground = ground_height(&config, x, 40);
            for y in 0..40 {
                let expected = match y - ground {
                    d if d < 0 => TileKind::Air,
                    0 => TileKind::Grass,
                    d if d <= config.dirt_depth => TileKind::Dirt,
                    _ => TileKind::Stone,
                };
                assert_eq!(world.get_tile(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_trees_sit_on_grass() {
        let config = TerrainConfig {
            tree_chance: 1.0,
            ..TerrainConfig::default()
        };
        let world = WorldGrid::generate_with(&config, 40, 60, 11);
        assert!(world.count(TileKind::Wood) > 0);
        assert!(world.count(TileKind::Leaves) > 0);
        for x in 0..40 {
            let ground = ground_height(&config, x, 60);
            // Trunk directly above the grass, unless a neighbour's canopy got there first
            assert!(matches!(
                world.get_tile(x, ground - 1),
                TileKind::Wood | TileKind::Leaves
            ));
            // Nothing below ground changes
            assert_eq!(world.get_tile(x, ground), TileKind::Grass);
        }
    }

    #[test]
    fn test_canopy_never_overwrites_solid() {
        let mut world = WorldGrid::new(5, 10);
        for x in 0..5 {
            world.set_tile(x, 8, TileKind::Grass);
        }
        world.set_tile(3, 4, TileKind::Stone);
        world.plant_tree(2, 8, 3, 2);
        assert_eq!(world.get_tile(3, 4), TileKind::Stone);
        assert_eq!(world.get_tile(2, 5), TileKind::Wood);
        assert_eq!(world.get_tile(1, 5), TileKind::Leaves);
        // trimmed corner
        assert_eq!(world.get_tile(0, 3), TileKind::Air);
    }

    #[test]
    fn test_trunk_keeps_neighbour_canopy() {
        let mut world = WorldGrid::new(8, 12);
        for x in 0..8 {
            world.set_tile(x, 10, TileKind::Grass);
        }
        world.plant_tree(2, 10, 3, 2);
        assert_eq!(world.get_tile(4, 8), TileKind::Leaves);

        world.plant_tree(4, 10, 3, 2);
        assert_eq!(world.get_tile(4, 8), TileKind::Leaves);
        assert_eq!(world.get_tile(4, 9), TileKind::Wood);
        // first tree untouched
        assert_eq!(world.get_tile(2, 7), TileKind::Wood);
        assert_eq!(world.get_tile(3, 7), TileKind::Leaves);
    }

    #[test]
    fn test_pass_through_kinds_are_not_solid() {
        let mut world = WorldGrid::new(4, 4);
        world.set_tile(0, 0, TileKind::Wood);
        world.set_tile(1, 0, TileKind::Stone);
        assert!(!world.is_solid(0, 0));
        assert!(world.is_solid(1, 0));

        world.set_pass_through(Vec::new());
        assert!(world.is_solid(0, 0));
    }

    #[test]
    fn test_spawn_point_on_grass() {
        let world = WorldGrid::generate(40, 80, 5);
        let ground = world.ground_row(20).unwrap();
        let pos = world.spawn_point(20, 32.0, Vec2::new(24.0, 32.0));
        assert_eq!(pos.x, 20.0 * 32.0);
        assert_eq!(pos.y, (ground - 1) as f32 * 32.0);
    }

    #[test]
    fn test_spawn_point_without_grass() {
        let mut world = WorldGrid::new(3, 10);
        world.set_tile(1, 6, TileKind::Stone);
        let pos = world.spawn_point(1, 16.0, Vec2::new(12.0, 16.0));
        assert_eq!(pos, Vec2::new(16.0, 5.0 * 16.0));

        // Empty column: top of the world
        let pos = world.spawn_point(0, 16.0, Vec2::new(12.0, 16.0));
        assert_eq!(pos, Vec2::ZERO);

        // Column beyond the world clamps to the last column
        let pos = world.spawn_point(50, 16.0, Vec2::new(12.0, 16.0));
        assert_eq!(pos.x, 2.0 * 16.0);
    }

    #[test]
    fn test_column_round_trip() {
        let world = WorldGrid::generate(12, 16, 9);
        let rebuilt = WorldGrid::from_columns(&world.to_columns()).unwrap();
        assert_eq!(rebuilt.to_columns(), world.to_columns());

        let ragged = vec![vec![TileKind::Air; 3], vec![TileKind::Air; 2]];
        assert!(WorldGrid::from_columns(&ragged).is_none());
    }
}
