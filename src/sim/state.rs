//! Game state and core simulation types
//!
//! Everything a tick mutates lives in [`GameState`]; components receive the
//! pieces they need by reference and never keep them across ticks.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::interaction::{Inventory, InteractionController};
use super::survival::SurvivalController;
use super::tile::TileKind;
use super::world::WorldGrid;
use crate::settings::SimConfig;

/// The player's body and survival stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the bounding box (pixels)
    pub pos: Vec2,
    /// Velocity (pixels/tick)
    pub vel: Vec2,
    /// Bounding box size (pixels)
    pub size: Vec2,
    /// Resting on a solid tile top
    pub grounded: bool,
    pub health: f32,
    pub hunger: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2, health: f32, hunger: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            grounded: false,
            health,
            hunger,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Reset position and motion (stats untouched)
    pub fn respawn(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    /// Whether the bounding box overlaps tile `(x, y)`
    pub fn overlaps_tile(&self, x: i32, y: i32, tile_size: f32) -> bool {
        let (x0, x1) = crate::span_to_tiles(self.pos.x, self.size.x, tile_size);
        let (y0, y1) = crate::span_to_tiles(self.pos.y, self.size.y, tile_size);
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    }
}

/// Why the player was put back at the spawn point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnCause {
    FellOutOfWorld,
    Died,
}

/// Notable things that happened during a tick (for renderer/audio feedback)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TileMined { x: i32, y: i32, kind: TileKind },
    TileBuilt { x: i32, y: i32, kind: TileKind },
    PlayerRespawned { cause: RespawnCause },
}

/// RNG seed record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    /// Stream used for survival rolls (terrain uses its own generator)
    pub const SURVIVAL_STREAM: u64 = 0x5eed_f00d;

    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stream: Self::SURVIVAL_STREAM,
        }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Survival rolls
    pub rng: Pcg32,
    pub world: WorldGrid,
    pub player: Player,
    pub inventory: Inventory,
    pub camera: Camera,
    pub interaction: InteractionController,
    pub survival: SurvivalController,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session with default tunables
    pub fn new(seed: u64) -> Self {
        Self::with_config(SimConfig::default(), seed)
    }

    /// New session: generate the world and spawn the player
    pub fn with_config(config: SimConfig, seed: u64) -> Self {
        let world = WorldGrid::generate_with(
            &config.terrain,
            config.world_width,
            config.world_height,
            seed,
        );
        Self::with_world(config, world, seed)
    }

    /// New session on an existing world (hand-built or restored)
    pub fn with_world(config: SimConfig, world: WorldGrid, seed: u64) -> Self {
        let spawn = world.spawn_point(config.spawn_column, config.tile_size, config.physics.body_size);
        let player = Player::new(
            spawn,
            config.physics.body_size,
            config.survival.max_health,
            config.survival.max_hunger,
        );
        let mut camera = Camera::new(config.camera.smoothing);
        camera.snap_to(&player, &config.camera, world.pixel_size(config.tile_size));
        let rng_state = RngState::new(seed);

        log::info!(
            "Session started (seed {}), player spawned at ({}, {})",
            seed,
            spawn.x,
            spawn.y
        );

        Self {
            rng: rng_state.to_rng(),
            rng_state,
            seed,
            world,
            player,
            inventory: Inventory::new(),
            camera,
            interaction: InteractionController::new(),
            survival: SurvivalController::new(),
            time_ticks: 0,
            events: Vec::new(),
            config,
        }
    }

    /// Current spawn position for the player's body
    pub fn spawn_point(&self) -> Vec2 {
        self.world.spawn_point(
            self.config.spawn_column,
            self.config.tile_size,
            self.player.size,
        )
    }

    /// Put the player back at spawn. Death also restores full stats.
    pub fn respawn_player(&mut self, cause: RespawnCause) {
        let spawn = self.spawn_point();
        self.player.respawn(spawn);
        if cause == RespawnCause::Died {
            self.player.health = self.config.survival.max_health;
            self.player.hunger = self.config.survival.max_hunger;
            self.survival.reset();
        }
        self.interaction.cancel_mining();
        self.events.push(GameEvent::PlayerRespawned { cause });
        log::info!("Player respawned ({:?}) at ({}, {})", cause, spawn.x, spawn.y);
    }

    /// Replace the world with a freshly generated one and respawn
    pub fn regenerate(&mut self, seed: u64) {
        self.world = WorldGrid::generate_with(
            &self.config.terrain,
            self.config.world_width,
            self.config.world_height,
            seed,
        );
        self.seed = seed;
        self.rng_state = RngState::new(seed);
        self.rng = self.rng_state.to_rng();
        self.interaction.cancel_mining();
        let spawn = self.spawn_point();
        self.player.respawn(spawn);
        let world_px = self.world.pixel_size(self.config.tile_size);
        self.camera.snap_to(&self.player, &self.config.camera, world_px);
        log::info!("World regenerated with seed {}", seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_on_grass_column() {
        let state = GameState::new(42);
        let ground = state.world.ground_row(20).unwrap();
        assert_eq!(state.player.pos.x, 20.0 * 32.0);
        assert_eq!(state.player.pos.y, (ground - 1) as f32 * 32.0);
        assert_eq!(state.player.health, 10.0);
        assert_eq!(state.player.hunger, 10.0);
        assert!(!state
            .world
            .box_overlaps_solid(state.player.pos, state.player.size, 32.0));
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        assert_eq!(a.world, b.world);
        assert_eq!(a.player, b.player);
        assert_eq!(a.camera.pos, b.camera.pos);
    }

    #[test]
    fn test_overlaps_tile() {
        let player = Player::new(Vec2::new(40.0, 64.0), Vec2::new(24.0, 32.0), 10.0, 10.0);
        assert!(player.overlaps_tile(1, 2, 32.0));
        assert!(!player.overlaps_tile(1, 1, 32.0));
        assert!(!player.overlaps_tile(1, 3, 32.0));
        assert!(!player.overlaps_tile(2, 2, 32.0));
        assert!(!player.overlaps_tile(0, 2, 32.0));
    }

    #[test]
    fn test_death_respawn_restores_stats() {
        let mut state = GameState::new(7);
        state.player.health = 0.0;
        state.player.hunger = 0.0;
        state.player.pos = Vec2::new(0.0, -500.0);
        state.respawn_player(RespawnCause::Died);
        assert_eq!(state.player.health, state.config.survival.max_health);
        assert_eq!(state.player.hunger, state.config.survival.max_hunger);
        assert_eq!(state.player.pos, state.spawn_point());
        assert_eq!(
            state.events,
            vec![GameEvent::PlayerRespawned {
                cause: RespawnCause::Died
            }]
        );
    }

    #[test]
    fn test_regenerate_changes_world() {
        let mut state = GameState::new(1);
        let before = state.world.to_columns();
        state.regenerate(2);
        assert_eq!(state.seed, 2);
        assert_eq!(state.world.seed(), 2);
        assert_ne!(state.world.to_columns(), before);
        assert_eq!(state.player.pos, state.spawn_point());
    }
}
