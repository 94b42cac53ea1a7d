//! Player body integration and tile collision
//!
//! Collision is resolved one axis at a time (X, then Y). Each axis sweeps
//! every tile column/row the leading edge of the box enters this tick, so a
//! fast body cannot tunnel through a thin wall or clip a corner.

use glam::Vec2;

use super::state::Player;
use super::world::WorldGrid;
use crate::settings::PhysicsConfig;
use crate::span_to_tiles;

/// Movement intent for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// What happened to the body during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Body is somewhere inside the world
    InWorld,
    /// Body dropped below the bottom of the world and must be respawned
    FellOutOfWorld,
}

/// Advance the player's body by one tick: input, jump, gravity, then
/// collision on X and Y.
pub fn step_body(
    player: &mut Player,
    intent: MoveIntent,
    world: &WorldGrid,
    config: &PhysicsConfig,
    tile_size: f32,
) -> StepOutcome {
    match (intent.left, intent.right) {
        (true, false) => player.vel.x = -config.speed,
        (false, true) => player.vel.x = config.speed,
        _ => {
            player.vel.x *= 1.0 - config.friction_factor;
            if player.vel.x.abs() < 0.01 {
                player.vel.x = 0.0;
            }
        }
    }

    if intent.jump && player.grounded {
        player.vel.y = config.jump_impulse;
        player.grounded = false;
    }

    player.vel.y = (player.vel.y + config.gravity).min(config.max_fall_speed);

    let world_px = world.pixel_size(tile_size);
    resolve_x(player, world, tile_size, world_px);
    resolve_y(player, world, tile_size);

    if player.pos.y > world_px.y {
        StepOutcome::FellOutOfWorld
    } else {
        StepOutcome::InWorld
    }
}

/// Horizontal move; world side edges act as walls
fn resolve_x(player: &mut Player, world: &WorldGrid, tile_size: f32, world_px: Vec2) {
    let vx = player.vel.x;
    if vx == 0.0 {
        return;
    }

    let max_x = (world_px.x - player.size.x).max(0.0);
    let wanted = player.pos.x + vx;
    let next_x = wanted.clamp(0.0, max_x);
    let (row0, row1) = span_to_tiles(player.pos.y, player.size.y, tile_size);
    let column_blocked = |col: i32| (row0..=row1).any(|row| world.is_solid(col, row));

    let (cur_first, cur_last) = span_to_tiles(player.pos.x, player.size.x, tile_size);
    let (next_first, next_last) = span_to_tiles(next_x, player.size.x, tile_size);

    if vx > 0.0 {
        if let Some(col) = ((cur_last + 1)..=next_last).find(|&c| column_blocked(c)) {
            player.pos.x = col as f32 * tile_size - player.size.x;
            player.vel.x = 0.0;
            return;
        }
    } else if let Some(col) = (next_first..cur_first).rev().find(|&c| column_blocked(c)) {
        player.pos.x = (col + 1) as f32 * tile_size;
        player.vel.x = 0.0;
        return;
    }

    player.pos.x = next_x;
    if next_x != wanted {
        player.vel.x = 0.0;
    }
}

/// Vertical move; sets `grounded` only when a fall lands on a solid top
fn resolve_y(player: &mut Player, world: &WorldGrid, tile_size: f32) {
    let vy = player.vel.y;
    let next_y = player.pos.y + vy;
    let (col0, col1) = span_to_tiles(player.pos.x, player.size.x, tile_size);
    let row_blocked = |row: i32| (col0..=col1).any(|col| world.is_solid(col, row));

    let (cur_first, cur_last) = span_to_tiles(player.pos.y, player.size.y, tile_size);
    let (next_first, next_last) = span_to_tiles(next_y, player.size.y, tile_size);

    if vy > 0.0 {
        if let Some(row) = ((cur_last + 1)..=next_last).find(|&r| row_blocked(r)) {
            player.pos.y = row as f32 * tile_size - player.size.y;
            player.vel.y = 0.0;
            player.grounded = true;
            return;
        }
    } else if vy < 0.0 {
        if let Some(row) = (next_first..cur_first).rev().find(|&r| row_blocked(r)) {
            player.pos.y = (row + 1) as f32 * tile_size;
            player.vel.y = 0.0;
            player.grounded = false;
            return;
        }
    }

    player.pos.y = next_y;
    player.grounded = false;
}
