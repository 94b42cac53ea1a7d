//! Simulation tunables
//!
//! Every balancing constant lives here so variants can be expressed as data.
//! Loaded from JSON; missing fields take their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::TileKind;

/// How mining resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MiningMode {
    /// Hold the pointer on a tile for `mining_duration` ticks
    #[default]
    Progressive,
    /// A single press removes the tile
    Instant,
}

impl MiningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MiningMode::Progressive => "Progressive",
            MiningMode::Instant => "Instant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "progressive" | "hold" => Some(MiningMode::Progressive),
            "instant" | "click" => Some(MiningMode::Instant),
            _ => None,
        }
    }
}

/// Player movement and collision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Horizontal speed (pixels/tick)
    pub speed: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_impulse: f32,
    /// Added to vy every tick
    pub gravity: f32,
    /// Terminal downward velocity
    pub max_fall_speed: f32,
    /// Fraction of vx removed per tick without input (1.0 = instant stop)
    pub friction_factor: f32,
    /// Player bounding box
    pub body_size: Vec2,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            jump_impulse: -10.0,
            gravity: 0.5,
            max_fall_speed: 20.0,
            friction_factor: 1.0,
            body_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

/// Terrain height field and decoration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Base ground row as a fraction of world height
    pub base_height_ratio: f32,
    /// Sine amplitude in rows
    pub amplitude: f32,
    /// Sine frequency per column
    pub frequency: f32,
    /// Rows of Dirt below the Grass before Stone begins
    pub dirt_depth: i32,
    pub coal_chance: f32,
    pub iron_chance: f32,
    /// Depth below ground before iron can appear
    pub iron_min_depth: i32,
    /// Per-column tree probability
    pub tree_chance: f32,
    pub trunk_min: i32,
    pub trunk_max: i32,
    pub canopy_radius: i32,
    /// Kinds the player passes through
    pub pass_through: Vec<TileKind>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            base_height_ratio: 0.5,
            amplitude: 5.0,
            frequency: 0.15,
            dirt_depth: 4,
            coal_chance: 0.06,
            iron_chance: 0.03,
            iron_min_depth: 12,
            tree_chance: 0.1,
            trunk_min: 3,
            trunk_max: 5,
            canopy_radius: 2,
            pass_through: vec![TileKind::Wood, TileKind::Leaves],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered each tick, in (0, 1]
    pub smoothing: f32,
    pub viewport: Vec2,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub mining_mode: MiningMode,
    /// Ticks of sustained action needed to break a tile
    pub mining_duration: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            mining_mode: MiningMode::Progressive,
            mining_duration: 30,
        }
    }
}

impl InteractionConfig {
    /// Ticks required to mine; 0 means the tile breaks on press
    pub fn effective_duration(&self) -> u32 {
        match self.mining_mode {
            MiningMode::Progressive => self.mining_duration,
            MiningMode::Instant => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    pub max_health: f32,
    pub max_hunger: f32,
    /// Ticks per hunger point lost
    pub hunger_decay_ticks: u32,
    /// Per-tick probability of losing 1 health while starving
    pub starvation_damage_chance: f64,
    /// Hunger fraction above which health regenerates
    pub regen_threshold: f32,
    /// Health regained per tick while well fed
    pub regen_per_tick: f32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            max_hunger: 10.0,
            hunger_decay_ticks: 600,
            starvation_damage_chance: 0.01,
            regen_threshold: 0.6,
            regen_per_tick: 0.005,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Tile edge length in pixels
    pub tile_size: f32,
    pub world_width: usize,
    pub world_height: usize,
    pub spawn_column: i32,
    pub physics: PhysicsConfig,
    pub terrain: TerrainConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
    pub survival: SurvivalConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            spawn_column: SPAWN_COLUMN,
            physics: PhysicsConfig::default(),
            terrain: TerrainConfig::default(),
            camera: CameraConfig::default(),
            interaction: InteractionConfig::default(),
            survival: SurvivalConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse from a JSON document and clamp out-of-range values
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: SimConfig = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Load from a JSON file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load from a JSON file, falling back to defaults on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp tunables into the ranges the simulation assumes
    pub fn validate(&mut self) {
        self.tile_size = self.tile_size.max(1.0);
        self.world_width = self.world_width.max(1);
        self.world_height = self.world_height.max(1);

        let p = &mut self.physics;
        p.friction_factor = p.friction_factor.clamp(0.0, 1.0);
        p.max_fall_speed = p.max_fall_speed.max(0.0);
        p.body_size = p.body_size.max(Vec2::ONE);

        let t = &mut self.terrain;
        t.coal_chance = t.coal_chance.clamp(0.0, 1.0);
        t.iron_chance = t.iron_chance.clamp(0.0, 1.0);
        t.tree_chance = t.tree_chance.clamp(0.0, 1.0);
        t.trunk_min = t.trunk_min.max(1);
        t.trunk_max = t.trunk_max.max(t.trunk_min);
        t.canopy_radius = t.canopy_radius.max(0);
        t.pass_through.retain(|k| *k != TileKind::Air);

        let c = &mut self.camera;
        if c.smoothing.is_nan() || c.smoothing <= 0.0 {
            c.smoothing = CameraConfig::default().smoothing;
        }
        c.smoothing = c.smoothing.min(1.0);
        c.viewport = c.viewport.max(Vec2::ONE);

        let s = &mut self.survival;
        s.max_health = s.max_health.max(1.0);
        s.max_hunger = s.max_hunger.max(1.0);
        s.hunger_decay_ticks = s.hunger_decay_ticks.max(1);
        s.starvation_damage_chance = s.starvation_damage_chance.clamp(0.0, 1.0);
        s.regen_threshold = s.regen_threshold.clamp(0.0, 1.0);
        s.regen_per_tick = s.regen_per_tick.max(0.0);
    }
}
