//! Tile Sandbox - A 2D tile-world sandbox simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, physics, camera, interaction, survival)
//! - `game_loop`: Fixed timestep scheduler that drives `sim::tick`
//! - `platform`: Input provider / renderer collaborator traits
//! - `persistence`: Versioned save/load
//! - `settings`: Data-driven tunables

pub mod error;
pub mod game_loop;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{Result, SandboxError};
pub use game_loop::GameLoop;
pub use settings::{MiningMode, SimConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Tile edge length in pixels
    pub const TILE_SIZE: f32 = 32.0;
    /// Default world dimensions in tiles
    pub const WORLD_WIDTH: usize = 400;
    pub const WORLD_HEIGHT: usize = 80;
    /// Column scanned top-down for the spawn Grass tile
    pub const SPAWN_COLUMN: i32 = 20;

    /// Player bounding box
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;

    /// Default viewport (pixels)
    pub const VIEWPORT_WIDTH: f32 = 960.0;
    pub const VIEWPORT_HEIGHT: f32 = 540.0;
}

/// Convert a pixel coordinate to the tile index containing it
#[inline]
pub fn pixel_to_tile(px: f32, tile_size: f32) -> i32 {
    (px / tile_size).floor() as i32
}

/// Tile index range `[first, last]` covered by a span `[start, start + len)`.
///
/// The far edge is exclusive, so a body resting exactly on a tile boundary
/// does not count as overlapping the next tile.
#[inline]
pub fn span_to_tiles(start: f32, len: f32, tile_size: f32) -> (i32, i32) {
    let first = (start / tile_size).floor() as i32;
    let last = ((start + len) / tile_size).ceil() as i32 - 1;
    (first, last.max(first))
}
