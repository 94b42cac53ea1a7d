//! Fixed-order simulation tick
//!
//! One call advances the session by exactly one step:
//! slot selection → physics → interaction → survival → camera.

use super::interaction::{ActionMode, Pointer};
use super::physics::{MoveIntent, StepOutcome, step_body};
use super::state::{GameState, RespawnCause};
use super::survival::Vitals;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub action_mode: ActionMode,
    pub pointer: Pointer,
    /// Hotbar slot chosen this tick
    pub select_slot: Option<usize>,
}

impl TickInput {
    pub fn movement(&self) -> MoveIntent {
        MoveIntent {
            left: self.move_left,
            right: self.move_right,
            jump: self.jump,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    state.time_ticks += 1;

    if let Some(slot) = input.select_slot {
        state.inventory.select_slot(slot);
    }

    let tile_size = state.config.tile_size;

    let outcome = step_body(
        &mut state.player,
        input.movement(),
        &state.world,
        &state.config.physics,
        tile_size,
    );
    if outcome == StepOutcome::FellOutOfWorld {
        state.respawn_player(RespawnCause::FellOutOfWorld);
    }

    if let Some(event) = state.interaction.update(
        input.action_mode,
        input.pointer,
        &state.camera,
        &mut state.world,
        &mut state.inventory,
        &state.player,
        &state.config.interaction,
        tile_size,
    ) {
        state.events.push(event);
    }

    let vitals = state
        .survival
        .update(&mut state.player, &mut state.rng, &state.config.survival);
    if vitals == Vitals::Dead {
        log::info!("Player died at tick {}", state.time_ticks);
        state.respawn_player(RespawnCause::Died);
    }

    let world_px = state.world.pixel_size(tile_size);
    state
        .camera
        .update(&state.player, &state.config.camera, world_px);
}
