//! Smoothed follow camera

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Player;
use crate::settings::CameraConfig;

/// Scrolling view offset (pixels, top-left of the viewport in world space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
    /// Fraction of the remaining distance covered per tick, in (0, 1]
    pub smoothing: f32,
}

impl Camera {
    pub fn new(smoothing: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            smoothing: smoothing.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Offset that centres the player's box in the viewport
    pub fn target(player: &Player, viewport: Vec2) -> Vec2 {
        player.center() - viewport / 2.0
    }

    /// Keep the viewport inside the world
    pub fn clamp_to_world(pos: Vec2, viewport: Vec2, world_px: Vec2) -> Vec2 {
        let max = (world_px - viewport).max(Vec2::ZERO);
        pos.clamp(Vec2::ZERO, max)
    }

    /// Ease toward the player, then clamp
    pub fn update(&mut self, player: &Player, config: &CameraConfig, world_px: Vec2) {
        let target = Self::target(player, config.viewport);
        self.pos += (target - self.pos) * self.smoothing;
        self.pos = Self::clamp_to_world(self.pos, config.viewport, world_px);
    }

    /// Jump straight to the player (spawn, world regeneration)
    pub fn snap_to(&mut self, player: &Player, config: &CameraConfig, world_px: Vec2) {
        let target = Self::target(player, config.viewport);
        self.pos = Self::clamp_to_world(target, config.viewport, world_px);
    }

    /// Tile window `[x0, x1) × [y0, y1)` intersecting the viewport, with a
    /// one-tile margin on each side
    pub fn visible_tiles(&self, viewport: Vec2, tile_size: f32) -> (i32, i32, i32, i32) {
        let x0 = (self.pos.x / tile_size).floor() as i32 - 1;
        let y0 = (self.pos.y / tile_size).floor() as i32 - 1;
        let x1 = ((self.pos.x + viewport.x) / tile_size).ceil() as i32 + 1;
        let y1 = ((self.pos.y + viewport.y) / tile_size).ceil() as i32 + 1;
        (x0, y0, x1, y1)
    }

    /// Screen position of a world point
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.pos
    }
}
