//! Save/load persistence
//!
//! Features:
//! - Versioned JSON document (world, player, inventory)
//! - Atomic write (tmp → save)
//! - Dimension and value validation on load

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};
use crate::settings::SimConfig;
use crate::sim::{GameState, TileKind, WorldGrid};

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub x: f32,
    pub y: f32,
    pub health: f32,
    pub hunger: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStack {
    pub kind: TileKind,
    pub count: u32,
}

/// Persisted session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub world_width: usize,
    pub world_height: usize,
    pub seed: u64,
    /// Column-major: `tiles[x][y]`
    pub tiles: Vec<Vec<TileKind>>,
    pub player: SavedPlayer,
    pub inventory: Vec<SavedStack>,
    pub selected_slot: usize,
}

impl SaveGame {
    /// Snapshot a running session
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SAVE_VERSION,
            world_width: state.world.width(),
            world_height: state.world.height(),
            seed: state.seed,
            tiles: state.world.to_columns(),
            player: SavedPlayer {
                x: state.player.pos.x,
                y: state.player.pos.y,
                health: state.player.health,
                hunger: state.player.hunger,
            },
            inventory: state
                .inventory
                .stacks()
                .map(|(kind, count)| SavedStack { kind, count })
                .collect(),
            selected_slot: state.inventory.selected_slot(),
        }
    }

    /// Check the document before building a session from it
    pub fn validate(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(SandboxError::UnsupportedVersion {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        if self.world_width == 0 || self.world_height == 0 {
            return Err(SandboxError::validation("world has no tiles"));
        }
        if self.tiles.len() != self.world_width {
            return Err(SandboxError::validation(format!(
                "tiles column count {} != width {}",
                self.tiles.len(),
                self.world_width
            )));
        }
        if let Some((x, column)) = self
            .tiles
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != self.world_height)
        {
            return Err(SandboxError::validation(format!(
                "column {} has {} rows, expected {}",
                x,
                column.len(),
                self.world_height
            )));
        }
        let p = &self.player;
        if ![p.x, p.y, p.health, p.hunger].iter().all(|v| v.is_finite()) {
            return Err(SandboxError::validation("player values must be finite"));
        }
        if self.inventory.iter().any(|s| s.kind == TileKind::Air) {
            return Err(SandboxError::validation("inventory cannot hold air"));
        }
        Ok(())
    }

    /// Rebuild a session. World dimensions come from the save; all other
    /// tunables from `config`.
    pub fn restore(&self, mut config: SimConfig) -> Result<GameState> {
        self.validate()?;

        let mut world = WorldGrid::from_columns(&self.tiles)
            .ok_or_else(|| SandboxError::validation("ragged tile columns"))?;
        world.set_seed(self.seed);
        world.set_pass_through(config.terrain.pass_through.clone());

        config.world_width = self.world_width;
        config.world_height = self.world_height;
        let mut state = GameState::with_world(config, world, self.seed);

        let tile_size = state.config.tile_size;
        let saved_pos = Vec2::new(self.player.x, self.player.y);
        if state.world.box_overlaps_solid(saved_pos, state.player.size, tile_size) {
            log::warn!(
                "Saved player position ({}, {}) is inside terrain, using spawn",
                saved_pos.x,
                saved_pos.y
            );
            state.player.pos = state.spawn_point();
        } else {
            state.player.pos = saved_pos;
        }

        let survival = &state.config.survival;
        state.player.health = self.player.health.clamp(0.0, survival.max_health);
        state.player.hunger = self.player.hunger.clamp(0.0, survival.max_hunger);

        for stack in &self.inventory {
            state.inventory.set_count(stack.kind, stack.count);
        }
        state.inventory.select_slot(self.selected_slot);

        let world_px = state.world.pixel_size(state.config.tile_size);
        state
            .camera
            .snap_to(&state.player, &state.config.camera, world_px);
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let save: SaveGame = serde_json::from_str(json)?;
        save.validate()?;
        Ok(save)
    }
}

/// Write a save atomically: write `<path>.tmp`, then rename over `path`
pub fn save_to_path(state: &GameState, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = SaveGame::capture(state).to_json()?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    log::info!("Game saved to {} (tick {})", path.display(), state.time_ticks);
    Ok(())
}

/// Load a save written by [`save_to_path`]
pub fn load_from_path(path: impl AsRef<Path>, config: SimConfig) -> Result<GameState> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let state = SaveGame::from_json(&json)?.restore(config)?;
    log::info!("Loaded save from {}", path.display());
    Ok(state)
}
