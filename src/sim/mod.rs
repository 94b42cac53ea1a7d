//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-counted delays only (no wall clock)
//! - Seeded RNG only
//! - Fixed per-tick component order
//! - No rendering or platform dependencies

pub mod camera;
pub mod interaction;
pub mod physics;
pub mod state;
pub mod survival;
pub mod tick;
pub mod tile;
pub mod world;

pub use camera::Camera;
pub use interaction::{
    ActionMode, HOTBAR, InteractionController, Inventory, MiningState, Pointer, screen_to_tile,
};
pub use physics::{MoveIntent, StepOutcome, step_body};
pub use state::{GameEvent, GameState, Player, RespawnCause, RngState};
pub use survival::{SurvivalController, Vitals};
pub use tick::{TickInput, tick};
pub use tile::TileKind;
pub use world::{WorldGrid, ground_height};
